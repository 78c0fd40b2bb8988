mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::assist::{self, AssistClient};
use crate::db::Database;

pub fn create_router(db: Database, assist: AssistClient) -> Router {
    let api = Router::new()
        // Accounts
        .route("/signup", post(handlers::signup))
        .route("/login", post(handlers::login))
        .route("/users/uid", get(handlers::get_uid))
        .route("/users/{uid}/household", get(handlers::get_household_id))
        // Tasks
        .route("/tasks", post(handlers::create_task))
        // Households
        .route("/households", post(handlers::new_household))
        .route("/households/join", post(handlers::join_household))
        .route("/households/{id}/address", get(handlers::my_address))
        .route("/households/{id}/tasks", get(handlers::list_household_tasks))
        // Appliances
        .route("/appliances", post(handlers::add_appliance))
        // Health
        .route("/health", get(handlers::health))
        .with_state(db);

    let ask = Router::new()
        .route("/ask", post(assist::ask))
        .with_state(assist);

    Router::new()
        .nest("/api/v1", api)
        .nest("/api", ask)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
