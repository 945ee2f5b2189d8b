pub mod chat;
pub mod conversation;
pub mod dish;
pub mod menu;
