/// Build the absolute upstream URL for a relayed request.
///
/// Concatenation only: the incoming path and query pass through exactly
/// as received, so the upstream sees the same URL the client asked for.
pub fn upstream_url(origin: &str, path: &str, query: Option<&str>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{}{}?{}", origin, path, query),
        _ => format!("{}{}", origin, path),
    }
}
