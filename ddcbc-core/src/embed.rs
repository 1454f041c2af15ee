use askama::Template;
use ddcbc_upstream::{PageMetadata, VideoStream};

/// The embed page served to link-preview crawlers.
///
/// Every interpolated value is HTML-escaped by the template engine, so
/// whatever the upstream page contained can never break out of the
/// document markup.
#[derive(Template)]
#[template(path = "embed.html")]
pub struct EmbedPage<'a> {
    pub target_url: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub image: &'a str,
    pub video: Option<&'a VideoStream>,
}

/// Render the full embed document for a relayed article.
///
/// Pure function: identical inputs produce byte-identical output.
pub fn render_embed_page(target_url: &str, metadata: &PageMetadata) -> askama::Result<String> {
    EmbedPage {
        target_url,
        title: &metadata.title,
        description: &metadata.description,
        image: &metadata.image,
        video: metadata.video.as_ref(),
    }
    .render()
}
