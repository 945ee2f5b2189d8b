use std::fmt::Display;

use crate::config::ErrorPolicy;
use crate::models::{DishDetail, MenuItem, TextReply};
use crate::services::menu::{group_by_category, MenuCategory};

/// Outcome of a read as the page sees it.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> LoadState<T> {
    /// Turns a fetch result into page state. A failure the policy keeps off
    /// screen becomes `quiet` instead of `Failed`.
    pub fn settle<E: Display>(
        result: Result<T, E>,
        policy: ErrorPolicy,
        context: &str,
        quiet: LoadState<T>,
    ) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => match policy.report(context, &err) {
                Some(message) => Self::Failed(message),
                None => quiet,
            },
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}

pub type MenuListingState = LoadState<Vec<MenuCategory>>;

/// A quiet listing failure renders as an empty menu.
pub fn settle_menu<E: Display>(
    result: Result<Vec<MenuItem>, E>,
    policy: ErrorPolicy,
) -> MenuListingState {
    LoadState::settle(
        result.map(group_by_category),
        policy,
        "menu fetch",
        LoadState::Ready(Vec::new()),
    )
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DishViewState {
    pub dish: LoadState<DishDetail>,
    pub insight: LoadState<String>,
    pub show_insight: bool,
}

impl DishViewState {
    /// A quiet dish failure leaves the page on its loading placeholder.
    pub fn apply_dish<E: Display>(
        &mut self,
        result: Result<DishDetail, E>,
        policy: ErrorPolicy,
    ) {
        self.dish = LoadState::settle(result, policy, "dish fetch", LoadState::Loading);
    }

    pub fn apply_insight<E: Display>(
        &mut self,
        result: Result<TextReply, E>,
        policy: ErrorPolicy,
    ) {
        self.insight = LoadState::settle(
            result.map(|reply| reply.text),
            policy,
            "insight fetch",
            LoadState::Loading,
        );
    }

    pub fn toggle_insight(&mut self) {
        self.show_insight = !self.show_insight;
    }

    pub fn insight_text(&self) -> String {
        match &self.insight {
            LoadState::Ready(text) if !text.trim().is_empty() => text.clone(),
            LoadState::Failed(message) => message.clone(),
            _ => "Analyzing freshness and safety...".to_string(),
        }
    }
}
