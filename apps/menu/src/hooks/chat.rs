use std::future::Future;

use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use tracing::debug;

use crate::api::MenuClient;
use crate::hooks::client::{use_app_config, use_menu_client};
use crate::hooks::task::{use_task_group, TaskGroup};
use crate::models::DishId;
use crate::services::chat::{ChatSession, ConversationCell, Outgoing};
use crate::services::conversation::{Conversation, QuickFeedback};

pub const TRANSCRIPT_END_ID: &str = "chat-transcript-end";

impl ConversationCell for Signal<Conversation> {
    fn update<R>(&mut self, apply: impl FnOnce(&mut Conversation) -> R) -> R {
        let mut conversation = self.write();
        apply(&mut conversation)
    }
}

/// Widget state for one dish conversation, plus the actions that drive it.
#[derive(Clone)]
pub struct ChatController {
    pub conversation: Signal<Conversation>,
    pub input: Signal<String>,
    session: ChatSession<Option<MenuClient>, Signal<Conversation>>,
    feedback_delay_ms: u32,
    tasks: TaskGroup,
}

pub fn use_dish_chat(dish_id: DishId) -> ChatController {
    let client = use_menu_client();
    let config = use_app_config();
    let tasks = use_task_group();
    let trigger = config.feedback_trigger;
    let mut conversation = use_signal(move || Conversation::new(trigger));
    let mut input = use_signal(String::new);

    let current = dish_id.clone();
    let pending = tasks.clone();
    use_effect(use_reactive!(|current| {
        pending.cancel_all();
        if conversation.peek().user_message_count() > 0 {
            debug!(dish_id = %current, "chat reset for new dish");
            conversation.set(Conversation::new(trigger));
            input.set(String::new());
        }
    }));

    use_effect(move || {
        let len = conversation.read().messages().len();
        scroll_transcript_to_end(len);
    });

    ChatController {
        conversation,
        input,
        session: ChatSession {
            backend: client,
            dish_id,
            conversation,
            chat_errors: config.error_policies.chat,
            feedback_errors: config.error_policies.feedback,
        },
        feedback_delay_ms: config.feedback_delay_ms(),
        tasks,
    }
}

impl ChatController {
    /// Sends the text box as a question or as written feedback, depending
    /// on the stage, and clears it once something was accepted.
    pub fn submit_input(&mut self) {
        let draft = self.input.peek().clone();
        let delay_ms = self.feedback_delay_ms;
        let Some(outgoing) = self
            .session
            .submit_text(&draft, move || TimeoutFuture::new(delay_ms))
        else {
            return;
        };
        self.input.set(String::new());

        match outgoing {
            Outgoing::Question(task) => self.tasks.spawn(task),
            Outgoing::Feedback(task) => spawn_detached(task),
        }
    }

    pub fn choose(&mut self, choice: QuickFeedback) {
        self.session.choose(choice);
    }
}

/// Feedback posts outlive the widget, so they are not tied to its scope.
#[cfg(target_arch = "wasm32")]
fn spawn_detached(future: impl Future<Output = ()> + 'static) {
    wasm_bindgen_futures::spawn_local(future);
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn_detached(future: impl Future<Output = ()> + 'static) {
    spawn(future);
}

#[cfg(target_arch = "wasm32")]
fn scroll_transcript_to_end(_len: usize) {
    let Some(marker) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(TRANSCRIPT_END_ID))
    else {
        return;
    };

    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    marker.scroll_into_view_with_scroll_into_view_options(&options);
}

#[cfg(not(target_arch = "wasm32"))]
fn scroll_transcript_to_end(len: usize) {
    tracing::trace!(len, "transcript updated");
}
