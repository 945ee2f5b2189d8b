use dioxus::prelude::*;
use dioxus_router::prelude::*;

use crate::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");

    rsx! {
        div { class: "mx-auto max-w-md space-y-2 p-6 text-center",
            h1 { class: "text-lg font-semibold text-slate-900", "Nothing on the menu here" }
            p { class: "text-xs text-slate-500", "/{path}" }
            Link { to: Route::MenuPage {}, class: "text-sm text-slate-700 underline", "Back to menu" }
        }
    }
}
