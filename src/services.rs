pub mod auth;
pub mod blob_storage;
pub mod client_service;
pub mod document_service;
pub mod expense_service;
pub mod file_service;
pub mod invoice_service;
pub mod payment_service;
pub mod project_service;
pub mod task_item_service;
pub mod user_service;
