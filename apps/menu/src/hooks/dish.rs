use dioxus::prelude::*;

use crate::hooks::client::{use_app_config, use_menu_client};
use crate::hooks::task::use_task_group;
use crate::models::DishId;
use crate::services::dish::load_dish;
use crate::state::DishViewState;

/// Dish record plus insight for `id`, reloaded whenever `id` changes.
///
/// A change of dish aborts the reads still running for the previous one.
pub fn use_dish_view(id: String) -> Signal<DishViewState> {
    let client = use_menu_client();
    let config = use_app_config();
    let tasks = use_task_group();
    let mut view = use_signal(DishViewState::default);

    use_effect(use_reactive!(|id| {
        let policies = config.error_policies;
        let dish_id = DishId::new(id);
        view.set(DishViewState::default());

        let Some(client) = client.clone() else {
            view.write().apply_dish::<&str>(Err("menu client unavailable"), policies.dish);
            return;
        };

        tracing::debug!(%dish_id, "loading dish");
        tasks.respawn(async move {
            let mut dish_view = view;
            let mut insight_view = view;
            load_dish(
                &client,
                &dish_id,
                move |result| dish_view.write().apply_dish(result, policies.dish),
                move |result| insight_view.write().apply_insight(result, policies.insight),
            )
            .await;
        });
    }));

    view
}
