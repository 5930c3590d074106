//! Static pages.

use axum::response::Html;

/// GET / - Landing page.
pub async fn home() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}
