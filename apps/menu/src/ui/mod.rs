pub mod card;
pub mod chatbot;
pub mod dish_page;
pub mod menu_page;
pub mod not_found;
pub mod section;
pub mod status;
