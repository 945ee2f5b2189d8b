use std::collections::HashMap;

use tracing::debug;

use crate::api::MenuSource;
use crate::config::ErrorPolicy;
use crate::models::MenuItem;
use crate::state::{settle_menu, MenuListingState};

#[derive(Clone, Debug, PartialEq)]
pub struct MenuCategory {
    pub title: String,
    pub items: Vec<MenuItem>,
}

/// Groups dishes by category label.
///
/// Categories appear in the order they are first seen and each keeps the
/// fetch order of its dishes; `priority` is deliberately not consulted.
pub fn group_by_category(items: Vec<MenuItem>) -> Vec<MenuCategory> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut categories: Vec<MenuCategory> = Vec::new();

    for item in items {
        match positions.get(&item.category) {
            Some(&index) => categories[index].items.push(item),
            None => {
                positions.insert(item.category.clone(), categories.len());
                categories.push(MenuCategory {
                    title: item.category.clone(),
                    items: vec![item],
                });
            }
        }
    }

    categories
}

/// Reads the whole menu once and settles it into listing state.
pub async fn load_menu<S: MenuSource>(source: &S, policy: ErrorPolicy) -> MenuListingState {
    let result = source.list_menu().await;
    if let Ok(items) = &result {
        debug!(count = items.len(), "menu loaded");
    }
    settle_menu(result, policy)
}
