use dioxus::prelude::*;
use dioxus_router::prelude::*;

use crate::models::MenuItem;
use crate::ui::status::StatusBadge;
use crate::Route;

pub fn format_price(price: f64) -> String {
    format!("₹{price:.0}")
}

#[component]
pub fn FoodCard(item: MenuItem) -> Element {
    let price = format_price(item.price);
    let image = item.image_path();

    rsx! {
        Link {
            to: Route::DishPage { id: item.id.to_string() },
            class: "food-card-link block shrink-0",
            div { class: "food-card w-56 overflow-hidden rounded-lg border border-slate-200 bg-white shadow-sm transition hover:shadow-md",
                img { class: "h-36 w-full object-cover", src: "{image}", alt: "{item.name}" }
                div { class: "food-info space-y-2 p-3",
                    h4 { class: "text-sm font-semibold text-slate-900", "{item.name}" }
                    div { class: "flex items-center justify-between",
                        StatusBadge { status: item.status }
                        span { class: "text-xs text-slate-500", "{price}" }
                    }
                    if !item.warnings.is_empty() {
                        ul { class: "space-y-0.5 text-[11px] text-amber-700",
                            for warning in item.warnings.iter() {
                                li { key: "{warning}", "⚠ {warning}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_render_as_whole_rupees() {
        assert_eq!(format_price(750.0), "₹750");
        assert_eq!(format_price(1399.6), "₹1400");
    }
}
