pub mod client;
pub mod expense;
pub mod health;
pub mod invoice;
pub mod payment;
pub mod project;
pub mod task_item;
pub mod user;
