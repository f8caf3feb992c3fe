//! Archive lightbox cursor

use party_core::ArchiveItem;

/// Full-screen viewer over the archive photos.
///
/// Closed until [`open`](Self::open) is called; `next`/`prev` wrap around.
#[derive(Debug, Clone, Default)]
pub struct ArchiveLightbox {
    items: Vec<ArchiveItem>,
    current: Option<usize>,
}

impl ArchiveLightbox {
    pub fn new(items: Vec<ArchiveItem>) -> Self {
        Self {
            items,
            current: None,
        }
    }

    /// Open at `index`; an out-of-range index leaves the lightbox as it was
    pub fn open(&mut self, index: usize) -> Option<&ArchiveItem> {
        if index < self.items.len() {
            self.current = Some(index);
        }
        self.current()
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Photo on screen
    pub fn current(&self) -> Option<&ArchiveItem> {
        self.current.and_then(|i| self.items.get(i))
    }

    pub fn next(&mut self) -> Option<&ArchiveItem> {
        let len = self.items.len();
        if let Some(i) = self.current.as_mut() {
            *i = (*i + 1) % len;
        }
        self.current()
    }

    pub fn prev(&mut self) -> Option<&ArchiveItem> {
        let len = self.items.len();
        if let Some(i) = self.current.as_mut() {
            *i = (*i + len - 1) % len;
        }
        self.current()
    }

    /// 1-based position for a "3 / 12" counter
    pub fn slide_number(&self) -> Option<usize> {
        self.current.map(|i| i + 1)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
