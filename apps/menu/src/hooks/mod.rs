pub mod chat;
pub mod client;
pub mod dish;
pub mod menu;
pub mod task;
