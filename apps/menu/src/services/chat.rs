use std::future::Future;

use futures::future::LocalBoxFuture;
use futures::FutureExt;
use tracing::debug;

use crate::api::ChatBackend;
use crate::config::ErrorPolicy;
use crate::models::DishId;
use crate::services::conversation::{
    Conversation, ConversationStage, FollowUp, QuickFeedback, Reply,
};

/// Shared handle to a conversation that async work can update in place.
pub trait ConversationCell: Clone + 'static {
    fn update<R>(&mut self, apply: impl FnOnce(&mut Conversation) -> R) -> R;
}

/// Network work produced by a submission, still to be spawned.
pub enum Outgoing {
    /// Asks the backend and applies its reply. Owned by the widget.
    Question(LocalBoxFuture<'static, ()>),
    /// Posts written feedback. Outlives the widget.
    Feedback(LocalBoxFuture<'static, ()>),
}

/// One dish conversation wired to a backend.
#[derive(Clone)]
pub struct ChatSession<B, C> {
    pub backend: B,
    pub dish_id: DishId,
    pub conversation: C,
    pub chat_errors: ErrorPolicy,
    pub feedback_errors: ErrorPolicy,
}

impl<B, C> ChatSession<B, C>
where
    B: ChatBackend + Clone + 'static,
    C: ConversationCell,
{
    /// Routes the text box to whichever action the current stage expects.
    ///
    /// Blank input and stages without a text box yield `None`; nothing is
    /// sent in that case.
    pub fn submit_text<D, F>(&mut self, draft: &str, delay: D) -> Option<Outgoing>
    where
        D: FnOnce() -> F + 'static,
        F: Future<Output = ()> + 'static,
    {
        let stage = self.conversation.update(|conversation| conversation.stage());
        match stage {
            ConversationStage::Chatting => self.ask(draft, delay).map(Outgoing::Question),
            ConversationStage::CollectingWrittenFeedback => {
                self.give_feedback(draft).map(Outgoing::Feedback)
            }
            stage => {
                debug!(?stage, "text input ignored");
                None
            }
        }
    }

    /// Records the question now; the returned future asks the backend,
    /// applies the reply and, when the trigger fires, shows the feedback
    /// prompt once `delay` resolves.
    pub fn ask<D, F>(&mut self, draft: &str, delay: D) -> Option<LocalBoxFuture<'static, ()>>
    where
        D: FnOnce() -> F + 'static,
        F: Future<Output = ()> + 'static,
    {
        let question = match self
            .conversation
            .update(|conversation| conversation.submit_question(draft))
        {
            Ok(Some(question)) => question,
            Ok(None) => return None,
            Err(err) => {
                debug!("{err}");
                return None;
            }
        };

        let backend = self.backend.clone();
        let dish_id = self.dish_id.clone();
        let mut conversation = self.conversation.clone();
        let policy = self.chat_errors;

        Some(
            async move {
                let reply = match backend.ask_question(&dish_id, &question).await {
                    Ok(answer) => Reply::Answer(answer.text),
                    Err(err) => match policy.report("chat", &err) {
                        Some(_) => Reply::Fallback,
                        None => Reply::Dropped,
                    },
                };

                let follow_up = conversation.update(|state| state.receive_reply(reply));
                if follow_up == FollowUp::ScheduleFeedbackPrompt {
                    delay().await;
                    if let Err(err) = conversation.update(|state| state.show_feedback_prompt()) {
                        debug!("feedback prompt skipped: {err}");
                    }
                }
            }
            .boxed_local(),
        )
    }

    pub fn choose(&mut self, choice: QuickFeedback) {
        if let Err(err) = self
            .conversation
            .update(|conversation| conversation.choose_quick_feedback(choice))
        {
            debug!("{err}");
        }
    }

    /// Records the feedback and thanks the user now. The returned future
    /// posts it; its outcome is only logged.
    pub fn give_feedback(&mut self, draft: &str) -> Option<LocalBoxFuture<'static, ()>> {
        let text = match self
            .conversation
            .update(|conversation| conversation.submit_written_feedback(draft))
        {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(err) => {
                debug!("{err}");
                return None;
            }
        };

        let backend = self.backend.clone();
        let dish_id = self.dish_id.clone();
        let policy = self.feedback_errors;

        Some(
            async move {
                match backend.submit_feedback(&dish_id, &text).await {
                    Ok(receipt) => debug!(?receipt, %dish_id, "feedback recorded"),
                    Err(err) => {
                        let _ = policy.report("feedback", &err);
                    }
                }
            }
            .boxed_local(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ClientError, ClientResult};
    use crate::config::FeedbackTrigger;
    use crate::models::{FeedbackReceipt, TextReply};
    use crate::services::conversation::{CHAT_FALLBACK, FEEDBACK_PROMPT, THANK_YOU};
    use futures::channel::oneshot;
    use futures::executor::{block_on, LocalPool};
    use futures::future::{ready, Ready};
    use futures::task::LocalSpawnExt;
    use reqwest::StatusCode;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Shared = Rc<RefCell<Conversation>>;

    impl ConversationCell for Shared {
        fn update<R>(&mut self, apply: impl FnOnce(&mut Conversation) -> R) -> R {
            apply(&mut self.borrow_mut())
        }
    }

    #[derive(Clone, Default)]
    struct FakeKitchen {
        calls: Rc<RefCell<Vec<String>>>,
        fail_chat: bool,
        fail_feedback: bool,
    }

    impl ChatBackend for FakeKitchen {
        async fn ask_question(&self, id: &DishId, question: &str) -> ClientResult<TextReply> {
            self.calls.borrow_mut().push(format!("chat:{id}:{question}"));
            if self.fail_chat {
                return Err(ClientError::EmptyResponse(StatusCode::BAD_GATEWAY));
            }
            Ok(TextReply {
                text: format!("About {question}: caught today."),
            })
        }

        async fn submit_feedback(
            &self,
            id: &DishId,
            text: &str,
        ) -> ClientResult<Option<FeedbackReceipt>> {
            self.calls.borrow_mut().push(format!("feedback:{id}:{text}"));
            if self.fail_feedback {
                return Err(ClientError::UnexpectedStatus {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: Vec::new(),
                });
            }
            Ok(None)
        }
    }

    fn session(kitchen: &FakeKitchen) -> (ChatSession<FakeKitchen, Shared>, Shared) {
        let shared = Rc::new(RefCell::new(Conversation::new(FeedbackTrigger::Exact(2))));
        let session = ChatSession {
            backend: kitchen.clone(),
            dish_id: DishId::from("grilled-salmon"),
            conversation: shared.clone(),
            chat_errors: ErrorPolicy::UserVisible,
            feedback_errors: ErrorPolicy::Silent,
        };
        (session, shared)
    }

    fn no_delay() -> Ready<()> {
        ready(())
    }

    fn collecting_feedback(shared: &Shared) {
        let mut conversation = shared.borrow_mut();
        conversation.show_feedback_prompt().unwrap();
        conversation
            .choose_quick_feedback(QuickFeedback::Somewhat)
            .unwrap();
    }

    fn stage(shared: &Shared) -> ConversationStage {
        shared.borrow().stage()
    }

    #[test]
    fn text_input_sends_questions_while_chatting() {
        let kitchen = FakeKitchen::default();
        let (mut session, shared) = session(&kitchen);

        let Some(Outgoing::Question(task)) = session.submit_text("Is it fresh?", no_delay) else {
            panic!("chatting input should ask the backend");
        };
        block_on(task);

        assert_eq!(*kitchen.calls.borrow(), ["chat:grilled-salmon:Is it fresh?"]);
        let conversation = shared.borrow();
        assert_eq!(conversation.messages().len(), 3);
        assert_eq!(
            conversation.messages()[2].text,
            "About Is it fresh?: caught today."
        );
    }

    #[test]
    fn text_input_posts_written_feedback_when_collecting() {
        let kitchen = FakeKitchen::default();
        let (mut session, shared) = session(&kitchen);
        collecting_feedback(&shared);

        let Some(Outgoing::Feedback(task)) = session.submit_text(" Too oily ", no_delay) else {
            panic!("feedback input should post to the backend");
        };
        block_on(task);

        assert_eq!(*kitchen.calls.borrow(), ["feedback:grilled-salmon:Too oily"]);
        assert_eq!(stage(&shared), ConversationStage::Complete);
    }

    #[test]
    fn text_input_is_ignored_while_awaiting_a_choice() {
        let kitchen = FakeKitchen::default();
        let (mut session, shared) = session(&kitchen);
        shared.borrow_mut().show_feedback_prompt().unwrap();
        let before = shared.borrow().clone();

        assert!(session.submit_text("hello?", no_delay).is_none());
        assert!(kitchen.calls.borrow().is_empty());
        assert_eq!(*shared.borrow(), before);
    }

    #[test]
    fn blank_input_issues_no_request() {
        let kitchen = FakeKitchen::default();
        let (mut session, shared) = session(&kitchen);

        assert!(session.submit_text("   ", no_delay).is_none());
        assert_eq!(shared.borrow().messages().len(), 1);
        assert_eq!(stage(&shared), ConversationStage::Chatting);

        collecting_feedback(&shared);
        let before = shared.borrow().clone();
        assert!(session.submit_text("\t ", no_delay).is_none());
        assert_eq!(*shared.borrow(), before);

        assert!(kitchen.calls.borrow().is_empty());
    }

    #[test]
    fn feedback_prompt_waits_for_the_delay() {
        let kitchen = FakeKitchen::default();
        let (mut session, shared) = session(&kitchen);

        let first = session.ask("Is it spicy?", no_delay).unwrap();
        block_on(first);
        assert_eq!(stage(&shared), ConversationStage::Chatting);

        let (elapsed, timer) = oneshot::channel::<()>();
        let second = session
            .ask("Any shellfish?", move || timer.map(|_| ()))
            .unwrap();

        let mut pool = LocalPool::new();
        pool.spawner().spawn_local(second).unwrap();
        pool.run_until_stalled();

        assert_eq!(stage(&shared), ConversationStage::Chatting);
        assert_ne!(
            shared.borrow().messages().last().unwrap().text,
            FEEDBACK_PROMPT
        );

        elapsed.send(()).unwrap();
        pool.run_until_stalled();

        let conversation = shared.borrow();
        assert_eq!(conversation.stage(), ConversationStage::AwaitingFeedbackChoice);
        let prompts = conversation
            .messages()
            .iter()
            .filter(|message| message.text == FEEDBACK_PROMPT)
            .count();
        assert_eq!(prompts, 1);
    }

    #[test]
    fn failed_feedback_post_leaves_the_transcript_alone() {
        let kitchen = FakeKitchen {
            fail_feedback: true,
            ..FakeKitchen::default()
        };
        let (mut session, shared) = session(&kitchen);
        collecting_feedback(&shared);

        let task = session.give_feedback("Too salty").unwrap();
        let before = shared.borrow().clone();
        block_on(task);

        assert_eq!(*shared.borrow(), before);
        assert_eq!(stage(&shared), ConversationStage::Complete);
        assert_eq!(shared.borrow().messages().last().unwrap().text, THANK_YOU);
        assert_eq!(kitchen.calls.borrow().len(), 1);
    }

    #[test]
    fn visible_chat_failure_adds_one_fallback() {
        let kitchen = FakeKitchen {
            fail_chat: true,
            ..FakeKitchen::default()
        };
        let (mut session, shared) = session(&kitchen);

        block_on(session.ask("Is it fresh?", no_delay).unwrap());

        let conversation = shared.borrow();
        let fallbacks = conversation
            .messages()
            .iter()
            .filter(|message| message.text == CHAT_FALLBACK)
            .count();
        assert_eq!(fallbacks, 1);
        assert_eq!(conversation.stage(), ConversationStage::Chatting);
        assert!(!conversation.is_waiting_for_reply());
    }

    #[test]
    fn quiet_chat_failure_adds_nothing() {
        let kitchen = FakeKitchen {
            fail_chat: true,
            ..FakeKitchen::default()
        };
        let (mut session, shared) = session(&kitchen);
        session.chat_errors = ErrorPolicy::Log;

        block_on(session.ask("Is it fresh?", no_delay).unwrap());

        let conversation = shared.borrow();
        assert_eq!(conversation.messages().len(), 2);
        assert!(!conversation.is_waiting_for_reply());
    }
}
