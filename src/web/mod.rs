//! HTTP front end: the prompt form and the static files it links to

use std::num::NonZeroU16;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use axum::http::header::CACHE_CONTROL;
use axum::http::{HeaderValue, Response};
use tower_http::services::ServeDir;
use tower_http::services::fs::ServeFileSystemResponseBody;
use tower_http::set_header::SetResponseHeader;
use tracing::{error, info};

use crate::constants::{STATIC_CACHE_CONTROL, STATIC_URL_PREFIX};
use crate::render::CaptionFont;
use crate::storage::{ensure_generated_dir, generated_dir};

mod prelude;
mod views;

use views::{generate_handler, index_handler};

#[derive(Clone, Debug)]
pub(crate) struct AppState {
    generated_dir: PathBuf,
    font: Arc<CaptionFont>,
}

impl AppState {
    fn new(static_root: &Path, font: Arc<CaptionFont>) -> Self {
        Self {
            generated_dir: generated_dir(static_root),
            font,
        }
    }
}

/// Generated files never change, but don't let caches hold on to a 404.
fn static_cache_control(response: &Response<ServeFileSystemResponseBody>) -> Option<HeaderValue> {
    response
        .status()
        .is_success()
        .then(|| HeaderValue::from_static(STATIC_CACHE_CONTROL))
}

fn create_router(static_root: &Path) -> Router<AppState> {
    let static_files = SetResponseHeader::overriding(
        ServeDir::new(static_root),
        CACHE_CONTROL,
        static_cache_control,
    );
    Router::new()
        .route(
            "/",
            axum::routing::get(index_handler).post(generate_handler),
        )
        .nest_service(STATIC_URL_PREFIX, static_files)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

/// Creates the generated directory under `static_root` and serves until Ctrl-C.
pub async fn setup_server(
    listen_addr: &str,
    port: NonZeroU16,
    static_root: &Path,
    font: CaptionFont,
) -> Result<(), anyhow::Error> {
    let generated = ensure_generated_dir(static_root).await?;
    info!("Writing generated images to {}", generated.display());

    let app = create_router(static_root).with_state(AppState::new(static_root, Arc::new(font)));

    let addr = format!("{}:{}", listen_addr, port);
    info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header::CONTENT_TYPE};
    use http_body_util::BodyExt;
    use tempfile::TempDir;
    use tower::ServiceExt;

    async fn setup_app() -> (TempDir, Router) {
        let dir = tempfile::tempdir().expect("tempdir");
        ensure_generated_dir(dir.path())
            .await
            .expect("create generated dir");
        let state = AppState::new(dir.path(), Arc::new(CaptionFont::Bitmap));
        let app = create_router(dir.path()).with_state(state);
        (dir, app)
    }

    async fn read_body(response: axum::response::Response) -> String {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        String::from_utf8_lossy(&bytes).to_string()
    }

    fn post_form(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    fn image_src(body: &str) -> String {
        let start = body.find("src=\"").expect("img src") + 5;
        let end = body[start..].find('"').expect("closing quote") + start;
        body[start..end].to_string()
    }

    #[tokio::test]
    async fn get_renders_blank_form() {
        let (_dir, app) = setup_app().await;

        let request = Request::builder()
            .method("GET")
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_body(response).await;
        assert!(body.contains("name=\"prompt\""));
        assert!(body.contains("required></textarea>"));
        assert!(!body.contains("<img"));
    }

    #[tokio::test]
    async fn post_generates_and_links_image() {
        let (dir, app) = setup_app().await;

        let response = app
            .oneshot(post_form(
                "prompt=ho%C3%A0ng+h%C3%B4n+tr%C3%AAn+bi%E1%BB%83n",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_body(response).await;
        assert!(body.contains("required>hoàng hôn trên biển</textarea>"));
        assert!(body.contains("Prompt: hoàng hôn trên biển"));

        let src = image_src(&body);
        let filename = src
            .strip_prefix("/static/generated/")
            .expect("generated url");
        assert!(crate::storage::is_generated_filename(filename), "{src}");

        let path = dir.path().join("generated").join(filename);
        let decoded = image::open(&path).expect("valid png");
        assert_eq!((decoded.width(), decoded.height()), (1024, 512));
        assert_eq!(decoded.color(), image::ColorType::Rgb8);
    }

    #[tokio::test]
    async fn generated_image_is_served_from_static() {
        let (_dir, app) = setup_app().await;

        let response = app
            .clone()
            .oneshot(post_form("prompt=sea"))
            .await
            .unwrap();
        let src = image_src(&read_body(response).await);

        let request = Request::builder()
            .method("GET")
            .uri(src.as_str())
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), "image/png");
        assert_eq!(
            response.headers().get(CACHE_CONTROL).unwrap(),
            STATIC_CACHE_CONTROL
        );
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        assert!(bytes.starts_with(b"\x89PNG"));
    }

    #[tokio::test]
    async fn missing_static_file_is_not_cached() {
        let (_dir, app) = setup_app().await;

        let request = Request::builder()
            .method("GET")
            .uri("/static/generated/nope.png")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get(CACHE_CONTROL).is_none());
    }

    #[tokio::test]
    async fn repeated_prompts_get_distinct_files() {
        let (dir, app) = setup_app().await;

        let mut sources = Vec::new();
        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(post_form("prompt=same+prompt"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            sources.push(image_src(&read_body(response).await));
        }
        assert_ne!(sources[0], sources[1]);

        let count = std::fs::read_dir(dir.path().join("generated"))
            .expect("read dir")
            .count();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn missing_field_is_an_empty_prompt() {
        let (_dir, app) = setup_app().await;

        let response = app.oneshot(post_form("")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_body(response).await;
        assert!(body.contains("required></textarea>"));
        assert!(body.contains("Prompt: (Trống)"));
        assert!(image_src(&body).starts_with("/static/generated/"));
    }

    #[tokio::test]
    async fn unparseable_body_is_an_empty_prompt() {
        let (_dir, app) = setup_app().await;

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{\"prompt\": \"ignored\"}"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_body(response).await;
        assert!(body.contains("Prompt: (Trống)"));
    }

    #[tokio::test]
    async fn prompt_is_trimmed_and_escaped() {
        let (_dir, app) = setup_app().await;

        let response = app
            .oneshot(post_form("prompt=++%3Cb%3Ebold%3C%2Fb%3E%0A+"))
            .await
            .unwrap();
        let body = read_body(response).await;
        assert!(body.contains("required>&#60;b&#62;bold&#60;/b&#62;</textarea>"));
        assert!(!body.contains("<b>"));
    }

    #[tokio::test]
    async fn storage_failure_is_a_server_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        // generated dir deliberately not created
        let state = AppState::new(dir.path(), Arc::new(CaptionFont::Bitmap));
        let app = create_router(dir.path()).with_state(state);

        let response = app.oneshot(post_form("prompt=sea")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(read_body(response).await, "Internal server error");
    }
}
