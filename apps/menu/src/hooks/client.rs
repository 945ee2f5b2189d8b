use std::sync::Arc;

use dioxus::prelude::*;

use crate::api::MenuClient;
use crate::config::AppConfig;

/// The client injected by `App`; `None` when it failed to build at startup.
pub fn use_menu_client() -> Option<MenuClient> {
    try_use_context::<Option<MenuClient>>().flatten()
}

pub fn use_app_config() -> Arc<AppConfig> {
    use_context::<Arc<AppConfig>>()
}
