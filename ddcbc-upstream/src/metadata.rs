use serde::{Deserialize, Serialize};

/// Title used when the upstream page has none or the fetch failed.
pub const DEFAULT_TITLE: &str = "CBC News";
/// Description used when no description meta tag matched.
pub const DEFAULT_DESCRIPTION: &str = "View this CBC article";
/// Preview image used when the page carries no Open Graph or Twitter image.
pub const DEFAULT_IMAGE: &str = "https://www.cbc.ca/favicon.ico";

pub const MP4_CONTENT_TYPE: &str = "video/mp4";
pub const HLS_CONTENT_TYPE: &str = "application/x-mpegURL";

/// Link-preview metadata extracted from an upstream page.
///
/// Every field is populated; extraction misses fall back to defaults so a
/// renderer never has to handle absent values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub image: String,
    pub video: Option<VideoStream>,
}

/// A direct media stream discovered in a video player page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoStream {
    pub url: String,
    pub content_type: String,
}

impl PageMetadata {
    /// Metadata served when the upstream fetch fails entirely.
    pub fn fallback() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            image: DEFAULT_IMAGE.to_string(),
            video: None,
        }
    }
}
