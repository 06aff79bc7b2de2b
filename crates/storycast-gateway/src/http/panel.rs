use axum::response::Html;

static INDEX_HTML: &str = include_str!("../../static/index.html");

/// Serve the embedded control panel at `GET /`.
pub async fn panel_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
