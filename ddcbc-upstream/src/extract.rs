use crate::metadata::{
    DEFAULT_DESCRIPTION, DEFAULT_IMAGE, DEFAULT_TITLE, HLS_CONTENT_TYPE, MP4_CONTENT_TYPE,
    PageMetadata, VideoStream,
};
use regex::Regex;
use scraper::{Html, Selector};

/// Path prefix of CBC's video player routes.
const PLAYER_PATH_PREFIX: &str = "/player/";

/// Descriptions longer than this are truncated with a trailing ellipsis.
const MAX_DESCRIPTION_CHARS: usize = 200;

/// Whether a relayed path points at a video player page, which makes it
/// worth scanning the body for a direct media stream.
pub fn is_player_path(path: &str) -> bool {
    path.starts_with(PLAYER_PATH_PREFIX)
}

/// Extract link-preview metadata from raw upstream HTML.
///
/// Each field is an independent best-effort search with its own fallback:
/// a miss is not an error. Only the first occurrence of each pattern is
/// considered. The media stream scan only runs when `want_video` is set
/// (player pages), since it reads the raw body rather than the DOM.
pub fn extract_metadata(html: &str, want_video: bool) -> PageMetadata {
    let document = Html::parse_document(html);

    let title = extract_title(&document).unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let description = extract_description(&document)
        .map(|d| truncate_description(&d))
        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());
    let image = extract_image(&document).unwrap_or_else(|| DEFAULT_IMAGE.to_string());
    let video = if want_video {
        extract_video_stream(html)
    } else {
        None
    };

    PageMetadata {
        title,
        description,
        image,
        video,
    }
}

fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").unwrap();
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Description meta tag, in priority order. CBC pages are rendered with
/// react-helmet, which stamps `data-rh` on the tags it owns; that variant
/// wins over a bare description tag, which wins over Open Graph.
fn extract_description(document: &Html) -> Option<String> {
    let selectors = [
        r#"meta[name="description"][data-rh]"#,
        r#"meta[name="description"]"#,
        r#"meta[property="og:description"]"#,
    ];

    for selector in selectors {
        let selector = Selector::parse(selector).unwrap();
        if let Some(content) = document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr("content"))
        {
            let content = content.trim();
            if !content.is_empty() {
                return Some(content.to_string());
            }
        }
    }

    None
}

fn extract_image(document: &Html) -> Option<String> {
    let selectors = [
        r#"meta[property="og:image"]"#,
        r#"meta[name="twitter:image"]"#,
    ];

    for selector in selectors {
        let selector = Selector::parse(selector).unwrap();
        if let Some(content) = document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr("content"))
        {
            let content = content.trim();
            if !content.is_empty() {
                return Some(content.to_string());
            }
        }
    }

    None
}

/// Cap a description at 200 characters, ellipsis included. Counts chars,
/// never splitting a multi-byte scalar.
fn truncate_description(raw: &str) -> String {
    if raw.chars().count() <= MAX_DESCRIPTION_CHARS {
        return raw.to_string();
    }

    let mut truncated: String = raw.chars().take(MAX_DESCRIPTION_CHARS - 3).collect();
    truncated.push_str("...");
    truncated
}

/// First quoted URL ending in `.mp4` (optionally with a query string),
/// falling back to `.m3u8`. Player pages embed these in inline script
/// blobs, so this scans the raw text rather than the parsed DOM.
fn extract_video_stream(html: &str) -> Option<VideoStream> {
    let mp4 = Regex::new(r#"(?i)["']([^"']+\.mp4(?:\?[^"']*)?)["']"#).unwrap();
    if let Some(caps) = mp4.captures(html) {
        return Some(VideoStream {
            url: caps[1].to_string(),
            content_type: MP4_CONTENT_TYPE.to_string(),
        });
    }

    let m3u8 = Regex::new(r#"(?i)["']([^"']+\.m3u8(?:\?[^"']*)?)["']"#).unwrap();
    m3u8.captures(html).map(|caps| VideoStream {
        url: caps[1].to_string(),
        content_type: HLS_CONTENT_TYPE.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Title extraction
    // ========================================================================

    #[test]
    fn test_title_from_title_element() {
        let html = "<html><head><title>  Big Story | CBC News  </title></head></html>";
        let metadata = extract_metadata(html, false);
        assert_eq!(metadata.title, "Big Story | CBC News");
    }

    #[test]
    fn test_title_missing_uses_default() {
        let html = "<html><head></head><body>no title here</body></html>";
        let metadata = extract_metadata(html, false);
        assert_eq!(metadata.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_title_empty_uses_default() {
        let html = "<html><head><title>   </title></head></html>";
        let metadata = extract_metadata(html, false);
        assert_eq!(metadata.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_title_first_occurrence_wins() {
        let html = "<html><head><title>First</title><title>Second</title></head></html>";
        let metadata = extract_metadata(html, false);
        assert_eq!(metadata.title, "First");
    }

    // ========================================================================
    // Description extraction
    // ========================================================================

    #[test]
    fn test_description_framework_tag_wins() {
        let html = r#"<html><head>
            <meta property="og:description" content="og text">
            <meta name="description" content="bare text">
            <meta data-rh="true" name="description" content="helmet text">
        </head></html>"#;
        let metadata = extract_metadata(html, false);
        assert_eq!(metadata.description, "helmet text");
    }

    #[test]
    fn test_description_bare_tag_beats_og() {
        let html = r#"<html><head>
            <meta property="og:description" content="og text">
            <meta name="description" content="bare text">
        </head></html>"#;
        let metadata = extract_metadata(html, false);
        assert_eq!(metadata.description, "bare text");
    }

    #[test]
    fn test_description_og_fallback() {
        let html = r#"<html><head>
            <meta property="og:description" content="og text">
        </head></html>"#;
        let metadata = extract_metadata(html, false);
        assert_eq!(metadata.description, "og text");
    }

    #[test]
    fn test_description_missing_uses_default() {
        let html = "<html><head><title>t</title></head></html>";
        let metadata = extract_metadata(html, false);
        assert_eq!(metadata.description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_description_exactly_200_untouched() {
        let text = "a".repeat(200);
        let html = format!(r#"<html><head><meta name="description" content="{}"></head></html>"#, text);
        let metadata = extract_metadata(&html, false);
        assert_eq!(metadata.description.len(), 200);
        assert!(!metadata.description.ends_with("..."));
    }

    #[test]
    fn test_description_250_truncated_to_200_with_ellipsis() {
        let text = "b".repeat(250);
        let html = format!(r#"<html><head><meta name="description" content="{}"></head></html>"#, text);
        let metadata = extract_metadata(&html, false);
        assert_eq!(metadata.description.chars().count(), 200);
        assert!(metadata.description.ends_with("..."));
        assert!(metadata.description.starts_with("bbb"));
    }

    #[test]
    fn test_description_truncation_is_char_safe() {
        // 250 two-byte scalars; byte-indexed truncation would panic or split.
        let text = "é".repeat(250);
        let html = format!(r#"<html><head><meta name="description" content="{}"></head></html>"#, text);
        let metadata = extract_metadata(&html, false);
        assert_eq!(metadata.description.chars().count(), 200);
        assert!(metadata.description.ends_with("..."));
    }

    // ========================================================================
    // Image extraction
    // ========================================================================

    #[test]
    fn test_image_og_wins() {
        let html = r#"<html><head>
            <meta property="og:image" content="https://i.cbc.ca/og.jpg">
            <meta name="twitter:image" content="https://i.cbc.ca/tw.jpg">
        </head></html>"#;
        let metadata = extract_metadata(html, false);
        assert_eq!(metadata.image, "https://i.cbc.ca/og.jpg");
    }

    #[test]
    fn test_image_twitter_fallback() {
        let html = r#"<html><head>
            <meta name="twitter:image" content="https://i.cbc.ca/tw.jpg">
        </head></html>"#;
        let metadata = extract_metadata(html, false);
        assert_eq!(metadata.image, "https://i.cbc.ca/tw.jpg");
    }

    #[test]
    fn test_image_missing_uses_default() {
        let html = "<html><head></head></html>";
        let metadata = extract_metadata(html, false);
        assert_eq!(metadata.image, DEFAULT_IMAGE);
    }

    // ========================================================================
    // Video stream extraction
    // ========================================================================

    #[test]
    fn test_video_mp4_found() {
        let html = r#"<html><body><script>var src = "https://cdn.cbc.ca/clip.mp4";</script></body></html>"#;
        let metadata = extract_metadata(html, true);
        let video = metadata.video.expect("expected a video stream");
        assert_eq!(video.url, "https://cdn.cbc.ca/clip.mp4");
        assert_eq!(video.content_type, MP4_CONTENT_TYPE);
    }

    #[test]
    fn test_video_mp4_with_query_string() {
        let html = r#"<script>load('https://cdn.cbc.ca/clip.mp4?token=abc123')</script>"#;
        let metadata = extract_metadata(html, true);
        let video = metadata.video.expect("expected a video stream");
        assert_eq!(video.url, "https://cdn.cbc.ca/clip.mp4?token=abc123");
    }

    #[test]
    fn test_video_mp4_preferred_over_m3u8() {
        let html = r#"
            <script>var hls = "https://cdn.cbc.ca/master.m3u8";</script>
            <script>var mp4 = "https://cdn.cbc.ca/clip.mp4";</script>
        "#;
        let metadata = extract_metadata(html, true);
        let video = metadata.video.expect("expected a video stream");
        assert_eq!(video.url, "https://cdn.cbc.ca/clip.mp4");
        assert_eq!(video.content_type, MP4_CONTENT_TYPE);
    }

    #[test]
    fn test_video_m3u8_fallback() {
        let html = r#"<script>var hls = "https://cdn.cbc.ca/master.m3u8?start=0";</script>"#;
        let metadata = extract_metadata(html, true);
        let video = metadata.video.expect("expected a video stream");
        assert_eq!(video.url, "https://cdn.cbc.ca/master.m3u8?start=0");
        assert_eq!(video.content_type, HLS_CONTENT_TYPE);
    }

    #[test]
    fn test_video_case_insensitive_extension() {
        let html = r#"<script>var src = "https://cdn.cbc.ca/CLIP.MP4";</script>"#;
        let metadata = extract_metadata(html, true);
        assert!(metadata.video.is_some());
    }

    #[test]
    fn test_video_absent_when_no_stream() {
        let html = "<html><body>just an article</body></html>";
        let metadata = extract_metadata(html, true);
        assert!(metadata.video.is_none());
    }

    #[test]
    fn test_video_skipped_for_article_pages() {
        let html = r#"<script>var src = "https://cdn.cbc.ca/clip.mp4";</script>"#;
        let metadata = extract_metadata(html, false);
        assert!(metadata.video.is_none());
    }

    // ========================================================================
    // Player path detection
    // ========================================================================

    #[test]
    fn test_player_path() {
        assert!(is_player_path("/player/play/video/1.7000000"));
        assert!(!is_player_path("/news/canada/some-article-1.7000000"));
        assert!(!is_player_path("/"));
        assert!(!is_player_path("/playerless"));
    }
}
