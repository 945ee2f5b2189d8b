use dioxus::prelude::*;

use crate::hooks::client::{use_app_config, use_menu_client};
use crate::hooks::task::use_task_group;
use crate::services::menu::load_menu;
use crate::state::MenuListingState;

/// Loads the full menu once, on mount.
pub fn use_menu_listing() -> Signal<MenuListingState> {
    let client = use_menu_client();
    let config = use_app_config();
    let tasks = use_task_group();
    let mut listing = use_signal(MenuListingState::default);

    use_effect(move || {
        let policy = config.error_policies.menu;
        let client = client.clone();
        tasks.respawn(async move {
            listing.set(load_menu(&client, policy).await);
        });
    });

    listing
}
