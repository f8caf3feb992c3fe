//! Document query sent to the content store

/// Single projection returning all three result sets.
///
/// The shape must stay in sync with [`crate::dto::ContentQueryResult`].
pub const CONTENT_QUERY: &str = r#"{
  "nominees": *[_type == "nominee"]{ handle, "photoUrls": photos[].asset->url },
  "archive": *[_type == "archive"]{ "url": image.asset->url, caption },
  "settings": *[_type == "siteSettings"][0]{ "videoUrl": heroVideo.asset->url }
}"#;
