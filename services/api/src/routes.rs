use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use josaa_predictor::counselling::{preference_router, CutoffRepository, PreferenceService};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

pub(crate) fn with_preference_routes<R>(service: Arc<PreferenceService<R>>) -> Router
where
    R: CutoffRepository + 'static,
{
    preference_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    if state.readiness.load(Ordering::Relaxed) {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "initializing" })),
        )
    }
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryCutoffRepository;
    use axum::body::Body;
    use axum::http::Request;
    use josaa_predictor::cutoffs::CutoffTable;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app(ready: bool) -> Router {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(handle),
        };
        let repository = Arc::new(InMemoryCutoffRepository::new(CutoffTable::default()));
        with_preference_routes(Arc::new(PreferenceService::new(repository)))
            .layer(Extension(state))
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json payload")
    }

    #[tokio::test]
    async fn readiness_reflects_startup_flag() {
        let response = app(false)
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json_body(response).await["status"], "initializing");

        let response = app(true)
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_endpoint_serves_prometheus_text() {
        let response = app(true)
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }

    #[tokio::test]
    async fn predict_without_data_synthesizes_template_seats() {
        let body = json!({
            "jee_rank": 2500,
            "category": "OPEN",
            "college_type": "NIT",
            "preferred_branch": "All",
            "round_no": "1",
            "gender": "Gender-Neutral",
            "min_probability": 0.0
        });

        let response = app(true)
            .oneshot(
                Request::post("/api/predict")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = json_body(response).await;
        assert_eq!(payload["source"], "synthesized");
        let preferences = payload["preferences"].as_array().expect("preferences");
        assert_eq!(preferences.len(), 5);
        assert_eq!(preferences[0]["quota"], "OS");
        assert_eq!(preferences[0]["branch"], "Computer Science and Engineering");
    }

    #[tokio::test]
    async fn healthcheck_and_data_health_are_both_mounted() {
        let response = app(true)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .expect("route executes");
        assert_eq!(json_body(response).await["status"], "ok");

        let response = app(true)
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .expect("route executes");
        let payload = json_body(response).await;
        assert_eq!(payload["status"], "healthy");
        assert_eq!(payload["data_loaded"], false);
    }
}
