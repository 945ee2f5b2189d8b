use dioxus::prelude::*;

use crate::hooks::chat::{use_dish_chat, TRANSCRIPT_END_ID};
use crate::models::DishId;
use crate::services::conversation::{ConversationStage, InputAffordance, QuickFeedback, Sender};

fn bubble_class(sender: Sender) -> String {
    let layout = match sender {
        Sender::Assistant => "self-start bg-slate-100 text-slate-800",
        Sender::User => "self-end bg-slate-900 text-white",
    };
    format!(
        "chat-message {} max-w-[80%] rounded-lg px-3 py-2 text-sm {layout}",
        sender.css_key()
    )
}

#[component]
pub fn DishChatbot(dish_id: String) -> Element {
    let chat = use_dish_chat(DishId::new(dish_id));
    let conversation = chat.conversation.read().clone();
    let stage = conversation.stage();
    let draft = chat.input.read().clone();

    let affordance = match stage.affordance() {
        InputAffordance::Text { placeholder } => {
            let mut input = chat.input;
            let mut on_enter = chat.clone();
            let mut on_click = chat.clone();
            let action = if stage == ConversationStage::Chatting {
                "Send"
            } else {
                "Submit"
            };
            rsx! {
                div { class: "chat-input flex gap-2 border-t border-slate-200 p-2",
                    input {
                        class: "flex-1 rounded border border-slate-300 px-2 py-1 text-sm",
                        placeholder: "{placeholder}",
                        value: "{draft}",
                        oninput: move |evt| input.set(evt.value()),
                        onkeydown: move |evt: KeyboardEvent| {
                            if evt.key() == Key::Enter {
                                evt.prevent_default();
                                on_enter.submit_input();
                            }
                        },
                    }
                    button {
                        class: "rounded bg-slate-900 px-3 py-1 text-xs font-semibold text-white hover:bg-slate-800",
                        onclick: move |_| on_click.submit_input(),
                        "{action}"
                    }
                }
            }
        }
        InputAffordance::QuickChoices => rsx! {
            div { class: "feedback-buttons flex flex-wrap gap-2 border-t border-slate-200 p-2",
                {QuickFeedback::ALL.into_iter().map(|choice| {
                    let label = choice.label();
                    let mut chat = chat.clone();
                    rsx! {
                        button {
                            key: "{label}",
                            class: "rounded-full border border-slate-300 px-3 py-1 text-xs text-slate-700 hover:bg-slate-100",
                            onclick: move |_| chat.choose(choice),
                            "{label}"
                        }
                    }
                })}
            }
        },
        InputAffordance::Hidden => rsx! {},
    };

    rsx! {
        div { class: "chatbot rounded-lg border border-slate-200 bg-white shadow-sm",
            div { class: "chat-header border-b border-slate-200 px-3 py-2 text-sm font-semibold text-slate-900",
                "🍽 Ask about this dish"
            }
            div { class: "chat-messages flex max-h-80 flex-col gap-2 overflow-y-auto p-3",
                for (index, message) in conversation.messages().iter().enumerate() {
                    div { key: "{index}", class: bubble_class(message.sender), "{message.text}" }
                }
                if conversation.is_waiting_for_reply() {
                    div { class: "chat-message bot typing self-start text-xs text-slate-400", "Typing..." }
                }
                div { id: TRANSCRIPT_END_ID }
            }
            {affordance}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bubbles_are_tagged_by_sender() {
        assert!(bubble_class(Sender::Assistant).starts_with("chat-message bot "));
        assert!(bubble_class(Sender::User).starts_with("chat-message user "));
    }
}
