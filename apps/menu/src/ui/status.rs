use dioxus::prelude::*;

use crate::models::DishStatus;

/// Class list for a status badge: the case-folded status plus its colours.
pub fn status_class(status: DishStatus) -> String {
    let accent = match status {
        DishStatus::Fresh => "bg-emerald-100 text-emerald-700",
        DishStatus::Caution => "bg-amber-100 text-amber-700",
        DishStatus::Unavailable => "bg-red-100 text-red-700",
    };
    format!("status-badge {} {accent}", status.css_key())
}

#[component]
pub fn StatusBadge(status: DishStatus) -> Element {
    rsx! {
        span {
            class: format!(
                "{} rounded-full px-2 py-0.5 text-[11px] font-semibold",
                status_class(status)
            ),
            "{status}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn each_status_has_its_own_class() {
        let classes: HashSet<String> = DishStatus::ALL.into_iter().map(status_class).collect();
        assert_eq!(classes.len(), 3);
    }

    #[test]
    fn classes_are_case_folded_and_stable() {
        assert_eq!(
            status_class(DishStatus::Fresh),
            "status-badge fresh bg-emerald-100 text-emerald-700"
        );
        assert_eq!(
            status_class(DishStatus::Caution),
            "status-badge caution bg-amber-100 text-amber-700"
        );
        assert_eq!(
            status_class(DishStatus::Unavailable),
            "status-badge unavailable bg-red-100 text-red-700"
        );
    }
}
