// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Health ---
        handlers::health::health,

        // --- User ---
        handlers::user::list_users,
        handlers::user::get_me,
        handlers::user::get_user,
        handlers::user::create_user,
        handlers::user::update_user,
        handlers::user::update_language,
        handlers::user::delete_user,

        // --- Client ---
        handlers::client::list_clients,
        handlers::client::get_client,
        handlers::client::create_client,
        handlers::client::update_client,
        handlers::client::delete_client,

        // --- Project ---
        handlers::project::list_projects,
        handlers::project::get_project,
        handlers::project::create_project,
        handlers::project::update_project,
        handlers::project::delete_project,
        handlers::project::update_hours,
        handlers::project::hours_summary,
        handlers::project::upload_file,
        handlers::project::list_files,
        handlers::project::download_file,
        handlers::project::delete_file,

        // --- TaskItem ---
        handlers::task_item::list_tasks,
        handlers::task_item::list_by_project,
        handlers::task_item::get_task,
        handlers::task_item::create_task,
        handlers::task_item::update_task,
        handlers::task_item::delete_task,

        // --- Invoice ---
        handlers::invoice::list_invoices,
        handlers::invoice::get_invoice,
        handlers::invoice::invoice_pdf,
        handlers::invoice::create_invoice,
        handlers::invoice::update_invoice,
        handlers::invoice::delete_invoice,

        // --- Payment ---
        handlers::payment::list_payments,
        handlers::payment::list_by_invoice,
        handlers::payment::get_payment,
        handlers::payment::create_payment,
        handlers::payment::update_payment,
        handlers::payment::delete_payment,

        // --- Expense ---
        handlers::expense::list_expenses,
        handlers::expense::get_expense,
        handlers::expense::create_expense,
        handlers::expense::update_expense,
        handlers::expense::delete_expense,
    ),
    components(
        schemas(
            // --- User ---
            models::user::User,
            models::user::CreateUserPayload,
            models::user::UpdateUserPayload,
            models::user::UpdateLanguagePayload,

            // --- Client ---
            models::client::Client,
            models::client::ClientPayload,

            // --- Project ---
            models::project::Project,
            models::project::ProjectResponse,
            models::project::ProjectPayload,
            models::project::UpdateProjectHoursPayload,
            models::project::ProjectHoursSummary,

            // --- TaskItem ---
            models::task_item::TaskItem,
            models::task_item::CreateTaskItemPayload,
            models::task_item::UpdateTaskItemPayload,

            // --- Finance ---
            models::finance::Invoice,
            models::finance::CreateInvoicePayload,
            models::finance::UpdateInvoicePayload,
            models::finance::Payment,
            models::finance::CreatePaymentPayload,
            models::finance::UpdatePaymentPayload,
            models::finance::Expense,
            models::finance::ExpensePayload,

            // --- Files ---
            models::file::StoredFile,
            models::file::ProjectFile,
            models::file::FileUploadForm,
        )
    ),
    tags(
        (name = "Health", description = "Disponibilidade da API"),
        (name = "User", description = "Perfil do usuário e preferências"),
        (name = "Client", description = "Carteira de clientes"),
        (name = "Project", description = "Projetos, horas trabalhadas e anexos"),
        (name = "TaskItem", description = "Tarefas dos projetos"),
        (name = "Invoice", description = "Faturas e PDF"),
        (name = "Payment", description = "Pagamentos recebidos"),
        (name = "Expense", description = "Despesas do freelancer")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_documents_every_entity_and_the_bearer_scheme() {
        let doc = ApiDoc::openapi();

        for path in [
            "/api/Health",
            "/api/User/me",
            "/api/Client/{id}",
            "/api/Project/{id}/hours",
            "/api/Project/{id}/files/{fileId}/download",
            "/api/TaskItem",
            "/api/TaskItem/project/{projectId}",
            "/api/Invoice/{id}/pdf",
            "/api/Payment/invoice/{invoiceId}",
            "/api/Expense",
        ] {
            assert!(doc.paths.paths.contains_key(path), "rota ausente: {}", path);
        }

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("api_jwt"));
    }
}
