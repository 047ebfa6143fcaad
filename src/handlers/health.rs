// src/handlers/health.rs

// GET|HEAD /api/Health
#[utoipa::path(
    get,
    path = "/api/Health",
    tag = "Health",
    responses((status = 200, description = "API no ar", body = String, example = "OK"))
)]
pub async fn health() -> &'static str {
    "OK"
}
