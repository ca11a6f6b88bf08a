use axum::{
    body::Body,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

// Embed the static page, script and styles
#[derive(RustEmbed)]
#[folder = "public/"]
pub struct Assets;

pub async fn serve_frontend(uri: Uri) -> impl IntoResponse {
    let path = match uri.path().trim_start_matches('/') {
        "" => "index.html",
        path => path,
    };

    match Assets::get(path) {
        Some(content) => serve_asset(path, content.data.into_owned()),
        None => not_found(),
    }
}

fn serve_asset(path: &str, data: Vec<u8>) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime.as_ref().to_string()),
            (header::CACHE_CONTROL, "public, max-age=0, must-revalidate".to_string()),
        ],
        Body::from(data),
    )
        .into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "404 Not Found").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_root_serves_index() {
        let response = serve_frontend(Uri::from_static("/")).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_script_mime_type() {
        let response = serve_frontend(Uri::from_static("/app.js")).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.contains("javascript"));
    }

    #[tokio::test]
    async fn test_unknown_asset() {
        let response = serve_frontend(Uri::from_static("/missing.png")).await.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
