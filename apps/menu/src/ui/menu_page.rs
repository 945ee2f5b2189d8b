use dioxus::prelude::*;

use crate::hooks::menu::use_menu_listing;
use crate::state::LoadState;
use crate::ui::section::MenuSection;

#[component]
pub fn MenuPage() -> Element {
    let listing = use_menu_listing();

    let body = match &*listing.read() {
        LoadState::Loading => rsx! { p { class: "loading text-xs text-slate-500", "Loading menu..." } },
        LoadState::Failed(message) => rsx! { p { class: "text-xs text-red-500", "{message}" } },
        LoadState::Ready(categories) => rsx! {
            for category in categories.iter() {
                MenuSection {
                    key: "{category.title}",
                    title: category.title.clone(),
                    items: category.items.clone(),
                }
            }
        },
    };

    rsx! {
        div { class: "menu-page mx-auto max-w-5xl space-y-6 p-4",
            header { class: "menu-title space-y-1 text-center",
                h1 { class: "text-2xl font-bold text-slate-900", "Blue Tide Kitchen" }
                p { class: "text-sm text-slate-500", "AI-Powered Food Menu" }
            }
            {body}
        }
    }
}
