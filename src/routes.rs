// src/routes.rs

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::{AppState, Config},
    docs::ApiDoc,
    handlers,
    middleware::auth::auth_guard,
};

pub fn build_router(app_state: AppState, config: &Config) -> anyhow::Result<Router> {
    let cors = cors_layer(&config.cors_allowed_origins)?;

    let user_routes = Router::new()
        .route("/", get(handlers::user::list_users).post(handlers::user::create_user))
        .route("/me", get(handlers::user::get_me))
        .route(
            "/{id}",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        )
        .route("/{id}/language", patch(handlers::user::update_language));

    let client_routes = Router::new()
        .route(
            "/",
            get(handlers::client::list_clients).post(handlers::client::create_client),
        )
        .route(
            "/{id}",
            get(handlers::client::get_client)
                .put(handlers::client::update_client)
                .delete(handlers::client::delete_client),
        );

    let project_routes = Router::new()
        .route(
            "/",
            get(handlers::project::list_projects).post(handlers::project::create_project),
        )
        .route(
            "/{id}",
            get(handlers::project::get_project)
                .put(handlers::project::update_project)
                .delete(handlers::project::delete_project),
        )
        .route("/{id}/hours", put(handlers::project::update_hours))
        .route("/{id}/hours-summary", get(handlers::project::hours_summary))
        // Anexos: o limite de corpo vale só para o upload
        .route(
            "/{id}/files",
            post(handlers::project::upload_file)
                .layer(DefaultBodyLimit::max(config.max_upload_bytes))
                .get(handlers::project::list_files),
        )
        .route("/{id}/files/{file_id}", delete(handlers::project::delete_file))
        .route(
            "/{id}/files/{file_id}/download",
            get(handlers::project::download_file),
        );

    let task_routes = Router::new()
        .route(
            "/",
            get(handlers::task_item::list_tasks).post(handlers::task_item::create_task),
        )
        .route(
            "/project/{project_id}",
            get(handlers::task_item::list_by_project),
        )
        .route(
            "/{id}",
            get(handlers::task_item::get_task)
                .put(handlers::task_item::update_task)
                .delete(handlers::task_item::delete_task),
        );

    let invoice_routes = Router::new()
        .route(
            "/",
            get(handlers::invoice::list_invoices).post(handlers::invoice::create_invoice),
        )
        .route(
            "/{id}",
            get(handlers::invoice::get_invoice)
                .put(handlers::invoice::update_invoice)
                .delete(handlers::invoice::delete_invoice),
        )
        .route("/{id}/pdf", get(handlers::invoice::invoice_pdf));

    let payment_routes = Router::new()
        .route(
            "/",
            get(handlers::payment::list_payments).post(handlers::payment::create_payment),
        )
        .route(
            "/invoice/{invoice_id}",
            get(handlers::payment::list_by_invoice),
        )
        .route(
            "/{id}",
            get(handlers::payment::get_payment)
                .put(handlers::payment::update_payment)
                .delete(handlers::payment::delete_payment),
        );

    let expense_routes = Router::new()
        .route(
            "/",
            get(handlers::expense::list_expenses).post(handlers::expense::create_expense),
        )
        .route(
            "/{id}",
            get(handlers::expense::get_expense)
                .put(handlers::expense::update_expense)
                .delete(handlers::expense::delete_expense),
        );

    // Tudo abaixo de /api exige bearer token, exceto o health check
    let protected_routes = Router::new()
        .nest("/User", user_routes)
        .nest("/Client", client_routes)
        .nest("/Project", project_routes)
        .nest("/TaskItem", task_routes)
        .nest("/Invoice", invoice_routes)
        .nest("/Payment", payment_routes)
        .nest("/Expense", expense_routes)
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let api_routes = Router::new()
        .route("/Health", get(handlers::health::health))
        .merge(protected_routes);

    let app = Router::new()
        .nest("/api", api_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Origem CORS inválida: '{}'", origin))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    // Credenciais não combinam com `*`, então métodos e headers espelham a requisição
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}
