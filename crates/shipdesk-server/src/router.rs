use axum::routing::{get, post};
use axum::Router;
use shipdesk_office::BackOffice;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handler::{self, AppState};

/// Build the axum router with all back office endpoints.
pub fn build_router(office: BackOffice) -> Router {
    Router::new()
        .route("/health", get(handler::health_handler))
        .route(
            "/api/paquetes",
            get(handler::list_packages)
                .post(handler::create_package)
                .put(handler::update_package)
                .delete(handler::delete_package),
        )
        .route("/api/historial", get(handler::list_audit))
        .route(
            "/api/transacciones",
            get(handler::list_transactions).post(handler::create_transaction),
        )
        .route(
            "/api/facturas",
            get(handler::list_documents).post(handler::create_document),
        )
        .route("/api/facturas/buscar", post(handler::search_documents))
        .route(
            "/api/facturas/:id",
            get(handler::get_document)
                .put(handler::update_document)
                .delete(handler::delete_document),
        )
        .route(
            "/api/facturas/:id/cambiar-tipo",
            post(handler::change_document_type),
        )
        .route("/api/facturas/:id/duplicar", post(handler::duplicate_document))
        .route(
            "/api/usuarios",
            get(handler::list_users)
                .post(handler::register_user)
                .delete(handler::delete_user),
        )
        .route(
            "/api/empleados",
            get(handler::list_employees).post(handler::register_employee),
        )
        .route("/api/cuentas/buscar", post(handler::find_account))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState::new(office))
}
