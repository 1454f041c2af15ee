pub mod error;
pub mod extract;
pub mod fetch;
pub mod metadata;

pub use error::UpstreamError;
pub use extract::{extract_metadata, is_player_path};
pub use fetch::UpstreamClient;
pub use metadata::{PageMetadata, VideoStream};
