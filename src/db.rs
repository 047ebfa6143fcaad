pub mod user_repo;
pub use user_repo::{PgUserRepository, UserRepository};
pub mod client_repo;
pub use client_repo::{ClientRepository, PgClientRepository};
pub mod project_repo;
pub use project_repo::{PgProjectRepository, ProjectRepository};
pub mod task_item_repo;
pub use task_item_repo::{PgTaskItemRepository, TaskItemRepository};
pub mod invoice_repo;
pub use invoice_repo::{InvoiceRepository, PgInvoiceRepository};
pub mod payment_repo;
pub use payment_repo::{PaymentRepository, PgPaymentRepository};
pub mod expense_repo;
pub use expense_repo::{ExpenseRepository, PgExpenseRepository};
pub mod file_repo;
pub use file_repo::{FileRepository, PgFileRepository};
