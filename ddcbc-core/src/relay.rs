use crate::classify::{self, RequestKind};
use crate::config::RelayConfig;
use crate::embed;
use crate::target;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use ddcbc_upstream::{PageMetadata, UpstreamClient, extract_metadata, is_player_path};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const LANDING_PAGE: &str = include_str!("../static/index.html");

/// Shared state for all request handlers: the immutable config plus one
/// pooled upstream client.
pub struct RelayState {
    pub config: RelayConfig,
    pub upstream: UpstreamClient,
}

/// Build the relay router. Split out from [`serve`] so tests can bind it
/// to an ephemeral port.
pub fn build_router(config: RelayConfig) -> Router {
    let state = Arc::new(RelayState {
        upstream: UpstreamClient::with_timeout(config.fetch_timeout),
        config,
    });

    Router::new()
        .route("/", get(landing_handler))
        .route("/index.html", get(landing_handler))
        .fallback(relay_handler)
        .with_state(state)
}

/// Bind and run the relay server until it is shut down.
pub async fn serve(config: RelayConfig) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{}", config.listen_port);
    let upstream_origin = config.upstream_origin.clone();
    let app = build_router(config);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("DDCBC relay for {} listening on http://{}", upstream_origin, addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn landing_handler() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

/// Everything that is not the landing page: redirect people, serve
/// preview crawlers an embed page.
async fn relay_handler(
    State(state): State<Arc<RelayState>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let path = uri.path();
    let query = uri.query();
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok());

    let target = target::upstream_url(&state.config.upstream_origin, path, query);
    let kind = classify::classify(path, user_agent, &state.config);
    debug!(
        "Classified {} as {} (user-agent: {})",
        path,
        kind.as_str(),
        user_agent.unwrap_or("<none>")
    );

    match kind {
        RequestKind::Landing => Html(LANDING_PAGE).into_response(),
        RequestKind::Redirect => {
            (StatusCode::FOUND, [(header::LOCATION, target)]).into_response()
        }
        RequestKind::Embed => {
            let metadata = match state.upstream.fetch_page(&target).await {
                Ok(body) => extract_metadata(&body, is_player_path(path)),
                Err(e) => {
                    warn!("Upstream fetch failed for {}: {}", target, e);
                    PageMetadata::fallback()
                }
            };

            match embed::render_embed_page(&target, &metadata) {
                Ok(html) => Html(html).into_response(),
                Err(e) => {
                    error!("Failed to render embed page for {}: {}", target, e);
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                }
            }
        }
    }
}
