pub mod client;
pub mod file;
pub mod finance;
pub mod project;
pub mod task_item;
pub mod user;
