//! Route definitions for the Farm Layout Planner

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Farm projects and their layouts
        .nest("/farms", farm_routes())
        // Boundary surveys
        .nest("/surveys", survey_routes())
}

/// Farm, plot and path routes
fn farm_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_farms).post(handlers::create_farm))
        .route(
            "/:farm_id",
            get(handlers::get_farm).delete(handlers::delete_farm),
        )
        // Plots
        .route(
            "/:farm_id/plots",
            get(handlers::list_plots).post(handlers::create_plot),
        )
        .route(
            "/:farm_id/plots/:plot_id",
            put(handlers::update_plot).delete(handlers::delete_plot),
        )
        .route("/:farm_id/plots/:plot_id/position", put(handlers::move_plot))
        // Walking paths
        .route("/:farm_id/paths", post(handlers::create_path))
        .route("/:farm_id/paths/:path_id", delete(handlers::delete_path))
        // Surveys
        .route("/:farm_id/surveys", post(handlers::start_survey))
}

/// Survey routes
fn survey_routes() -> Router<AppState> {
    Router::new()
        .route("/:survey_id", get(handlers::get_survey))
        .route("/:survey_id/points", post(handlers::record_point))
        .route("/:survey_id/finalize", post(handlers::finalize_survey))
        .route("/:survey_id/export.csv", get(handlers::export_survey_csv))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{create_app, store::MemoryStore, AppState, Config};

    fn app() -> Router {
        create_app(AppState {
            store: MemoryStore::new(),
            config: Arc::new(Config::default()),
        })
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn create_farm(app: &Router) -> String {
        let (status, farm) = send(
            app,
            Method::POST,
            "/api/v1/farms",
            Some(json!({ "name": "Market garden", "grid_size": "medium", "area_acres": "1.5" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        farm["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), Method::GET, "/api/v1/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_plot_placement_and_drag() {
        let app = app();
        let farm_id = create_farm(&app).await;
        let plots_uri = format!("/api/v1/farms/{}/plots", farm_id);

        let mut positions = Vec::new();
        for _ in 0..3 {
            let (status, placed) = send(
                &app,
                Method::POST,
                &plots_uri,
                Some(json!({ "name": "Beds", "width": 5, "height": 3, "color": "brown" })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
            assert_eq!(placed["strategy"], "spaced");
            let plot = &placed["plot"];
            positions.push((plot["x"].as_i64().unwrap(), plot["y"].as_i64().unwrap()));
        }
        assert_eq!(positions, vec![(1, 1), (13, 1), (1, 9)]);

        let (_, listed) = send(&app, Method::GET, &plots_uri, None).await;
        let plot_id = listed["plots"][0]["id"].as_str().unwrap().to_string();

        let (status, moved) = send(
            &app,
            Method::PUT,
            &format!("{}/{}/position", plots_uri, plot_id),
            Some(json!({ "x": 3.6, "y": -4.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(moved["drag"]["outcome"], "moved");
        assert_eq!(moved["plot"]["x"], 4);
        assert_eq!(moved["plot"]["y"], 1);
    }

    #[tokio::test]
    async fn test_invalid_plot_dimensions() {
        let app = app();
        let farm_id = create_farm(&app).await;
        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/v1/farms/{}/plots", farm_id),
            Some(json!({ "name": "Flat", "width": 0, "height": 3 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_extreme_plot_width_is_a_bad_request() {
        let app = app();
        let farm_id = create_farm(&app).await;
        let plots_uri = format!("/api/v1/farms/{}/plots", farm_id);
        let (status, body) = send(
            &app,
            Method::POST,
            &plots_uri,
            Some(json!({ "name": "x", "width": 2147483647, "height": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (_, listed) = send(&app, Method::GET, &plots_uri, None).await;
        assert!(listed["plots"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_extreme_farm_area_is_a_bad_request() {
        let (status, body) = send(
            &app(),
            Method::POST,
            "/api/v1/farms",
            Some(json!({ "name": "Ranch", "area_acres": "79228162514264337593543950" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["field"], "area_acres");
    }

    #[tokio::test]
    async fn test_farm_detail_includes_area_in_square_meters() {
        let app = app();
        let farm_id = create_farm(&app).await;
        let farm_uri = format!("/api/v1/farms/{}", farm_id);
        let (status, farm) = send(&app, Method::GET, &farm_uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(farm["grid"]["width"], 30);
        assert_eq!(farm["area_square_meters"], "6070.28463360");
    }

    #[tokio::test]
    async fn test_survey_flow() {
        let app = app();
        let farm_id = create_farm(&app).await;
        let (status, survey) = send(
            &app,
            Method::POST,
            &format!("/api/v1/farms/{}/surveys", farm_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let survey_uri = format!("/api/v1/surveys/{}", survey["id"].as_str().unwrap());

        let (status, _) = send(&app, Method::POST, &format!("{}/finalize", survey_uri), None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        for (lat, lon) in [(0.0, 0.0), (0.0, 0.001), (0.001, 0.001), (0.001, 0.0)] {
            let (status, _) = send(
                &app,
                Method::POST,
                &format!("{}/points", survey_uri),
                Some(json!({ "latitude": lat, "longitude": lon, "accuracy_meters": 5.0 })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let finalize_uri = format!("{}/finalize", survey_uri);
        let (status, measurement) = send(&app, Method::POST, &finalize_uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let area = measurement["area_square_meters"].as_f64().unwrap();
        assert!((area - 12_392.14).abs() < 0.1);
        assert_eq!(measurement["points"].as_array().unwrap().len(), 4);

        let (status, body) = send(
            &app,
            Method::POST,
            &format!("{}/points", survey_uri),
            Some(json!({ "latitude": 0.0, "longitude": 0.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "SURVEY_FINALIZED");
    }

    #[tokio::test]
    async fn test_unknown_farm_is_not_found() {
        let (status, body) = send(
            &app(),
            Method::GET,
            "/api/v1/farms/00000000-0000-0000-0000-000000000000/plots",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
