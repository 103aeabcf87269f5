//! florakg web server
//!
//! Axum-based REST API and question page over a loaded [`QaService`].

pub mod routes;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use florakg_core::QaService;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/plant_list", get(routes::plants::plant_list))
        .route("/plant_detail", post(routes::plants::plant_detail))
        .route("/plants/{name}", get(routes::plants::get_plant))
        .route("/answer", post(routes::answer::answer))
        .route("/health", get(routes::health::health))
        .with_state(state.clone());

    Router::new()
        .route("/", get(routes::page::index))
        .route("/ask", post(routes::page::ask))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server until Ctrl-C, then release the store.
pub async fn run_server(qa: Arc<QaService>, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(qa.clone())?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Web server listening on http://{}:{}", host, port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    qa.close().await;
    tracing::info!("Web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use florakg_core::config::AnswerConfig;
    use florakg_core::plant::default_aliases;
    use florakg_core::qa::composer::{AnswerComposer, EMPTY_QUESTION};
    use florakg_core::store::fixture::fixture_store;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn app() -> Router {
        let composer = AnswerComposer::template(&AnswerConfig::default());
        let qa = QaService::load(Arc::new(fixture_store()), &default_aliases(), composer)
            .await
            .unwrap();
        create_router(AppState::new(Arc::new(qa)).unwrap())
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, String) {
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_plant_list() {
        let (status, body) = send(app().await, get("/api/plant_list")).await;
        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["code"], 200);
        assert_eq!(json["msg"], "success");
        let names = json["data"].as_array().unwrap();
        assert_eq!(names.len(), 6);
        assert!(names.iter().any(|n| n == "梅"));
    }

    #[tokio::test]
    async fn test_plant_detail() {
        let req = post_json("/api/plant_detail", serde_json::json!({ "plant_name": "梅" }));
        let (status, body) = send(app().await, req).await;
        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["data"]["name"], "梅");
        assert_eq!(json["data"]["latin"], "Prunus mume");
        assert_eq!(json["data"]["festivals"][0], "春节");
    }

    #[tokio::test]
    async fn test_plant_detail_not_found() {
        let req = post_json("/api/plant_detail", serde_json::json!({ "plant_name": "水仙" }));
        let (status, body) = send(app().await, req).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["code"], 404);
        assert!(json["data"].is_null());
    }

    #[tokio::test]
    async fn test_get_plant_by_path() {
        let (status, body) = send(app().await, get("/api/plants/%E8%89%BE")).await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["name"], "艾");

        let (status, _) = send(app().await, get("/api/plants/%E6%B0%B4%E4%BB%99")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_answer() {
        let req = post_json("/api/answer", serde_json::json!({ "question": "端午节和什么植物有关？" }));
        let (status, body) = send(app().await, req).await;
        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_str(&body).unwrap();
        let text = json["data"].as_str().unwrap();
        assert!(text.contains("艾"));
        assert!(text.contains("菖蒲"));
    }

    #[tokio::test]
    async fn test_answer_without_question() {
        let req = post_json("/api/answer", serde_json::json!({}));
        let (status, body) = send(app().await, req).await;
        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["data"], EMPTY_QUESTION);
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app().await, get("/api/health")).await;
        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["backend"], "fixture");
        assert_eq!(json["strategy"], "template");
        assert_eq!(json["plants"], 6);
    }

    #[tokio::test]
    async fn test_index_page() {
        let (status, body) = send(app().await, get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("荆楚植物智能问答"));
        assert!(body.contains("植物总数：6 种"));
        assert!(body.contains("今日推荐植物"));
        assert!(body.contains("离线模式"));
    }

    #[tokio::test]
    async fn test_ask_form() {
        // question=梅
        let req = Request::builder()
            .method("POST")
            .uri("/ask")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("question=%E6%A2%85"))
            .unwrap();
        let (status, body) = send(app().await, req).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("📝 回答"));
        assert!(body.contains("value=\"梅\""));
    }
}
