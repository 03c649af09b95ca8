use axum::middleware as axum_mw;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::middleware;
use crate::routes;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .route("/profile", post(routes::profiles::create_profile))
        .route("/profile", get(routes::profiles::get_profile))
        .route("/intake", post(routes::intake::start_intake))
        .route("/intake", get(routes::intake::get_intake))
        .route("/intake/demographics", put(routes::intake::set_demographics))
        .route("/intake/disclosures", put(routes::intake::set_disclosures))
        .route(
            "/intake/answers/{question}",
            put(routes::intake::select_answer),
        )
        .route("/intake/advance", post(routes::intake::advance))
        .route("/intake/retreat", post(routes::intake::retreat))
        .route("/intake/submit", post(routes::intake::submit))
        .route_layer(axum_mw::from_fn(middleware::auth::require_auth));

    Router::new()
        // Health (no auth)
        .route("/health", get(routes::health::health_check))
        // Instruments (no auth)
        .route("/instruments", get(routes::instruments::list_instruments))
        .route(
            "/instruments/{id}",
            get(routes::instruments::get_instrument_detail),
        )
        .merge(protected)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
