//! Scripted dish chat: free questions first, then a feedback round.
//!
//! ```text
//! Chatting --(user messages hit the trigger, after a delay)--> AwaitingFeedbackChoice
//! AwaitingFeedbackChoice --(any quick choice)--> CollectingWrittenFeedback
//! CollectingWrittenFeedback --(non-empty text)--> Complete
//! ```
//!
//! The transcript only grows and the stage never moves backwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::FeedbackTrigger;

pub const GREETING: &str = "Hi 👋 I can help you understand this dish better. Ask me anything.";
pub const CHAT_FALLBACK: &str = "Sorry, I couldn’t fetch food insights right now.";
pub const FEEDBACK_PROMPT: &str = "Did this help you feel confident about this dish?";
pub const ELABORATION_PROMPT: &str =
    "Thanks 🙏 Please write a short feedback so we can improve food safety insights.";
pub const THANK_YOU: &str = "Thank you for sharing your feedback 🙏";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    Assistant,
    User,
}

impl Sender {
    pub fn css_key(self) -> &'static str {
        match self {
            Self::Assistant => "bot",
            Self::User => "user",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStage {
    Chatting,
    AwaitingFeedbackChoice,
    CollectingWrittenFeedback,
    Complete,
}

/// The single input control shown for a stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAffordance {
    Text { placeholder: &'static str },
    QuickChoices,
    Hidden,
}

impl ConversationStage {
    pub fn affordance(self) -> InputAffordance {
        match self {
            Self::Chatting => InputAffordance::Text {
                placeholder: "Ask about this dish...",
            },
            Self::AwaitingFeedbackChoice => InputAffordance::QuickChoices,
            Self::CollectingWrittenFeedback => InputAffordance::Text {
                placeholder: "Write your feedback here...",
            },
            Self::Complete => InputAffordance::Hidden,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuickFeedback {
    Yes,
    Somewhat,
    NotReally,
}

impl QuickFeedback {
    pub const ALL: [QuickFeedback; 3] = [Self::Yes, Self::Somewhat, Self::NotReally];

    pub fn label(self) -> &'static str {
        match self {
            Self::Yes => "👍 Yes",
            Self::Somewhat => "😐 Somewhat",
            Self::NotReally => "👎 Not really",
        }
    }
}

/// How a finished chat request lands in the transcript.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    Answer(String),
    /// Request failed and the user should see the canned apology.
    Fallback,
    /// Request failed quietly.
    Dropped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowUp {
    None,
    ScheduleFeedbackPrompt,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversationError {
    #[error("{action} is not allowed while {actual:?}, expected {expected:?}")]
    WrongStage {
        action: &'static str,
        expected: ConversationStage,
        actual: ConversationStage,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    stage: ConversationStage,
    trigger: FeedbackTrigger,
    pending_replies: usize,
    prompt_scheduled: bool,
}

impl Conversation {
    pub fn new(trigger: FeedbackTrigger) -> Self {
        Self::from_transcript(vec![ChatMessage::assistant(GREETING)], trigger)
    }

    /// Starts in `Chatting` with an existing transcript.
    pub fn from_transcript(messages: Vec<ChatMessage>, trigger: FeedbackTrigger) -> Self {
        Self {
            messages,
            stage: ConversationStage::Chatting,
            trigger,
            pending_replies: 0,
            prompt_scheduled: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn stage(&self) -> ConversationStage {
        self.stage
    }

    pub fn is_waiting_for_reply(&self) -> bool {
        self.pending_replies > 0
    }

    pub fn user_message_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|message| message.sender == Sender::User)
            .count()
    }

    /// Records a question and returns the text to send, or `None` when the
    /// input is blank.
    pub fn submit_question(&mut self, input: &str) -> Result<Option<String>, ConversationError> {
        self.expect_stage("submit question", ConversationStage::Chatting)?;

        let question = input.trim();
        if question.is_empty() {
            return Ok(None);
        }

        self.messages.push(ChatMessage::user(question));
        self.pending_replies += 1;
        Ok(Some(question.to_string()))
    }

    /// Applies a chat result, then checks whether it is time to ask for
    /// feedback. At most one prompt is ever scheduled.
    pub fn receive_reply(&mut self, reply: Reply) -> FollowUp {
        self.pending_replies = self.pending_replies.saturating_sub(1);

        match reply {
            Reply::Answer(text) => self.messages.push(ChatMessage::assistant(text)),
            Reply::Fallback => self.messages.push(ChatMessage::assistant(CHAT_FALLBACK)),
            Reply::Dropped => {}
        }

        if self.stage == ConversationStage::Chatting
            && !self.prompt_scheduled
            && self.trigger.is_met(self.user_message_count())
        {
            self.prompt_scheduled = true;
            FollowUp::ScheduleFeedbackPrompt
        } else {
            FollowUp::None
        }
    }

    pub fn show_feedback_prompt(&mut self) -> Result<(), ConversationError> {
        self.expect_stage("show feedback prompt", ConversationStage::Chatting)?;

        self.messages.push(ChatMessage::assistant(FEEDBACK_PROMPT));
        self.stage = ConversationStage::AwaitingFeedbackChoice;
        Ok(())
    }

    pub fn choose_quick_feedback(&mut self, choice: QuickFeedback) -> Result<(), ConversationError> {
        self.expect_stage(
            "choose quick feedback",
            ConversationStage::AwaitingFeedbackChoice,
        )?;

        self.messages.push(ChatMessage::user(choice.label()));
        self.messages.push(ChatMessage::assistant(ELABORATION_PROMPT));
        self.stage = ConversationStage::CollectingWrittenFeedback;
        Ok(())
    }

    /// Records written feedback and returns the text to post, or `None` when
    /// the input is blank.
    pub fn submit_written_feedback(
        &mut self,
        input: &str,
    ) -> Result<Option<String>, ConversationError> {
        self.expect_stage(
            "submit written feedback",
            ConversationStage::CollectingWrittenFeedback,
        )?;

        let feedback = input.trim();
        if feedback.is_empty() {
            return Ok(None);
        }

        self.messages.push(ChatMessage::user(feedback));
        self.messages.push(ChatMessage::assistant(THANK_YOU));
        self.stage = ConversationStage::Complete;
        Ok(Some(feedback.to_string()))
    }

    fn expect_stage(
        &self,
        action: &'static str,
        expected: ConversationStage,
    ) -> Result<(), ConversationError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(ConversationError::WrongStage {
                action,
                expected,
                actual: self.stage,
            })
        }
    }
}
