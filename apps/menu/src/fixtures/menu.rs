use crate::models::{DishId, DishStatus, MenuItem};

pub fn dish(id: u64, name: &str, category: &str, status: DishStatus) -> MenuItem {
    let availability = match status {
        DishStatus::Fresh => "AVAILABLE",
        DishStatus::Caution => "LIMITED",
        DishStatus::Unavailable => "UNAVAILABLE",
    };

    MenuItem {
        id: DishId::from(id),
        name: name.to_string(),
        category: category.to_string(),
        price: 500.0,
        status,
        availability: availability.to_string(),
        priority: 1,
        warnings: Vec::new(),
    }
}

/// Five dishes across three categories, categories interleaved.
pub fn sample_menu() -> Vec<MenuItem> {
    vec![
        dish(1, "Grilled Salmon", "Seafood", DishStatus::Fresh),
        dish(16, "Paneer Tikka", "Veg", DishStatus::Caution),
        dish(8, "Clam Soup", "Seafood", DishStatus::Fresh),
        dish(11, "Butter Chicken", "Chicken", DishStatus::Unavailable),
        dish(17, "Veg Curry", "Veg", DishStatus::Fresh),
    ]
}
