use dioxus::prelude::*;
use dioxus_router::prelude::*;

use crate::hooks::dish::use_dish_view;
use crate::models::{dish_image_path, DishId};
use crate::state::LoadState;
use crate::ui::chatbot::DishChatbot;
use crate::ui::status::StatusBadge;
use crate::Route;

#[component]
pub fn DishPage(id: String) -> Element {
    let mut view = use_dish_view(id.clone());
    let snapshot = view.read().clone();

    let Some(dish) = snapshot.dish.ready().cloned() else {
        let message = match &snapshot.dish {
            LoadState::Failed(message) => message.clone(),
            _ => "Loading...".to_string(),
        };
        return rsx! { p { class: "loading p-6 text-center text-sm text-slate-500", "{message}" } };
    };

    let image = dish_image_path(&DishId::new(id.clone()));
    let insight_text = snapshot.insight_text();

    rsx! {
        div { class: "dish-page mx-auto max-w-3xl space-y-4 p-4",
            Link { to: Route::MenuPage {}, class: "text-xs text-slate-500 hover:text-slate-800", "← Back to menu" }
            img { class: "dish-hero h-64 w-full rounded-lg object-cover", src: "{image}", alt: "{dish.name}" }

            div { class: "dish-info space-y-3",
                h1 { class: "text-2xl font-bold text-slate-900", "{dish.name}" }
                p { class: "dish-meta flex items-center gap-2 text-sm text-slate-600",
                    span { "Category: {dish.category} ·" }
                    StatusBadge { status: dish.status }
                }
                if let Some(checked) = dish.last_checked.as_ref() {
                    p { class: "last-checked text-xs text-slate-500", "Last checked: {checked}" }
                }

                button {
                    class: "insight-btn rounded bg-slate-900 px-3 py-2 text-xs font-semibold text-white hover:bg-slate-800",
                    onclick: move |_| view.write().toggle_insight(),
                    "🤖 AI Food Insight"
                }
                if snapshot.show_insight {
                    div { class: "ai-insight rounded-lg border border-slate-200 bg-slate-50 p-3 text-sm text-slate-700",
                        p { "{insight_text}" }
                    }
                }

                DishChatbot { key: "{id}", dish_id: id.clone() }
            }
        }
    }
}
