use crate::config::RelayConfig;

/// User-agent fragments that identify link-preview crawlers and other
/// automated fetchers. Matched case-insensitively as substrings.
pub const DEFAULT_BOT_KEYWORDS: &[&str] = &[
    "bot",
    "crawler",
    "spider",
    "crawling",
    "facebook",
    "twitter",
    "discord",
    "slack",
    "telegram",
    "whatsapp",
    "linkedinbot",
];

/// How a relayed request gets answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// The landing page at `/` or `/index.html`.
    Landing,
    /// A preview crawler: serve the metadata embed page.
    Embed,
    /// A person in a browser: redirect to the original article.
    Redirect,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Landing => "landing",
            RequestKind::Embed => "embed",
            RequestKind::Redirect => "redirect",
        }
    }
}

/// Policy for requests that carry no `User-Agent` header at all.
///
/// The default treats them as people and redirects; some deployments
/// prefer serving the embed page to headerless clients instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingUserAgentPolicy {
    TreatAsBot,
    #[default]
    TreatAsHuman,
}

/// Whether a user-agent string belongs to a link-preview crawler.
pub fn is_preview_bot(user_agent: &str, keywords: &[String]) -> bool {
    let user_agent = user_agent.to_lowercase();
    keywords
        .iter()
        .any(|keyword| user_agent.contains(&keyword.to_lowercase()))
}

/// Classify a request from its path and user-agent header.
///
/// Pure function of its inputs; the landing check runs first so the
/// landing page is served regardless of who asks for it.
pub fn classify(path: &str, user_agent: Option<&str>, config: &RelayConfig) -> RequestKind {
    if path == "/" || path == "/index.html" {
        return RequestKind::Landing;
    }

    match user_agent {
        Some(ua) if is_preview_bot(ua, &config.bot_keywords) => RequestKind::Embed,
        Some(_) => RequestKind::Redirect,
        None => match config.missing_user_agent_policy {
            MissingUserAgentPolicy::TreatAsBot => RequestKind::Embed,
            MissingUserAgentPolicy::TreatAsHuman => RequestKind::Redirect,
        },
    }
}
