#![allow(non_snake_case)]

mod api;
mod config;
#[cfg(test)]
mod fixtures;
mod hooks;
mod models;
mod services;
mod state;
mod ui;

use std::sync::Arc;

use api::{ClientError, MenuClient};
use config::AppConfig;
use dioxus::prelude::*;
use dioxus_router::prelude::*;
use once_cell::sync::OnceCell;
use tracing::{error, info};
use ui::dish_page::DishPage;
use ui::menu_page::MenuPage;
use ui::not_found::NotFound;

pub(crate) static APP_CONFIG: OnceCell<Arc<AppConfig>> = OnceCell::new();
pub(crate) static API_CLIENT: OnceCell<MenuClient> = OnceCell::new();

fn main() {
    console_error_panic_hook::set_once();
    let config = AppConfig::from_env();
    init_logging(config.profile.log_level());
    bootstrap_infrastructure(config);
    launch(App);
}

fn init_logging(level: tracing::Level) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = dioxus_logger::init(level);
    });
}

fn bootstrap_infrastructure(config: AppConfig) {
    info!(
        api = %config.api_base_url,
        profile = ?config.profile,
        trigger = ?config.feedback_trigger,
        "menu config loaded"
    );
    let _ = APP_CONFIG.set(Arc::new(config.clone()));

    match MenuClient::new(config) {
        Ok(client) => {
            let _ = API_CLIENT.set(client);
            info!("menu client initialized");
        }
        Err(err) => {
            report_client_error("failed to build menu client", &err);
        }
    }
}

fn report_client_error(context: &str, err: &ClientError) {
    error!(%context, ?err, status = ?err.status(), "api bootstrap error");
}

#[component]
fn App() -> Element {
    use_context_provider(|| {
        APP_CONFIG
            .get()
            .cloned()
            .unwrap_or_else(|| Arc::new(AppConfig::default()))
    });
    use_context_provider(|| API_CLIENT.get().cloned());

    rsx! {
        div { class: "min-h-screen bg-slate-50",
            Router::<Route> {}
        }
    }
}

#[derive(Clone, Routable, Debug, PartialEq)]
enum Route {
    #[route("/")]
    MenuPage {},
    #[route("/menu/:id")]
    DishPage { id: String },
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}
