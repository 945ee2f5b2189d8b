use dioxus::prelude::*;

use crate::models::MenuItem;
use crate::ui::card::FoodCard;

#[component]
pub fn MenuSection(title: String, items: Vec<MenuItem>) -> Element {
    rsx! {
        section { class: "menu-section space-y-3",
            h2 { class: "text-lg font-semibold text-slate-900", "{title}" }
            div { class: "horizontal-scroll flex gap-4 overflow-x-auto pb-2",
                for item in items.iter() {
                    FoodCard { key: "{item.id}", item: item.clone() }
                }
            }
        }
    }
}
