use axum::response::Html;

/// Serves the single dashboard page.
///
/// The page itself decides between the onboarding view (default) and the
/// admin view (`?admin` URL marker). That marker is a UI routing concern
/// only, not an authentication boundary; access control is explicitly out
/// of scope for this tool.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}
