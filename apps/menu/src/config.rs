use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_API_BASE_URL: &str = "https://ai-food-menu-backend.onrender.com";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
const DEFAULT_FEEDBACK_DELAY_MS: u64 = 400;
const DEFAULT_FEEDBACK_AFTER_QUESTIONS: usize = 2;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppProfile {
    Dev,
    Prod,
}

impl AppProfile {
    pub fn from_env(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("prod") | Some("production") => Self::Prod,
            _ => Self::Dev,
        }
    }

    pub fn log_level(self) -> tracing::Level {
        match self {
            Self::Dev => tracing::Level::DEBUG,
            Self::Prod => tracing::Level::INFO,
        }
    }
}

/// When the chatbot asks for feedback, measured in user-authored messages.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTrigger {
    /// Fires only when the count equals `n`; a jump past `n` never fires.
    Exact(usize),
    AtLeast(usize),
}

impl Default for FeedbackTrigger {
    fn default() -> Self {
        Self::Exact(DEFAULT_FEEDBACK_AFTER_QUESTIONS)
    }
}

impl FeedbackTrigger {
    pub fn is_met(self, user_messages: usize) -> bool {
        match self {
            Self::Exact(n) => user_messages == n,
            Self::AtLeast(n) => user_messages >= n,
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        let (kind, count) = raw.trim().split_once(':')?;
        let count = count.trim().parse::<usize>().ok()?;
        match kind.trim() {
            "exact" => Some(Self::Exact(count)),
            "at_least" | "at-least" => Some(Self::AtLeast(count)),
            _ => None,
        }
    }
}

/// What a failed request turns into.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    Silent,
    Log,
    UserVisible,
}

impl ErrorPolicy {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "silent" => Some(Self::Silent),
            "log" => Some(Self::Log),
            "visible" | "user_visible" => Some(Self::UserVisible),
            _ => None,
        }
    }

    /// Logs `err` at the level this policy asks for and hands back the text
    /// to put on screen, if any.
    pub fn report(self, context: &str, err: &dyn std::fmt::Display) -> Option<String> {
        match self {
            Self::Silent => {
                tracing::debug!(%context, %err, "request failed");
                None
            }
            Self::Log => {
                tracing::warn!(%context, %err, "request failed");
                None
            }
            Self::UserVisible => {
                tracing::error!(%context, %err, "request failed");
                Some(format!("{context}: {err}"))
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorPolicies {
    pub menu: ErrorPolicy,
    pub dish: ErrorPolicy,
    pub insight: ErrorPolicy,
    pub chat: ErrorPolicy,
    pub feedback: ErrorPolicy,
}

impl Default for ErrorPolicies {
    fn default() -> Self {
        Self {
            menu: ErrorPolicy::Log,
            dish: ErrorPolicy::Log,
            insight: ErrorPolicy::Log,
            chat: ErrorPolicy::UserVisible,
            feedback: ErrorPolicy::Silent,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub profile: AppProfile,
    pub request_timeout: Duration,
    pub feedback_delay: Duration,
    pub feedback_trigger: FeedbackTrigger,
    pub error_policies: ErrorPolicies,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            profile: AppProfile::Dev,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            feedback_delay: Duration::from_millis(DEFAULT_FEEDBACK_DELAY_MS),
            feedback_trigger: FeedbackTrigger::default(),
            error_policies: ErrorPolicies::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        crate::config::load_dotenv();

        Self::from_lookup(read_env)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("MENU_API_BASE_URL").filter(|url| !url.trim().is_empty()) {
            config.api_base_url = url.trim().to_string();
        }

        config.profile = AppProfile::from_env(lookup("MENU_PROFILE"));

        if let Some(secs) =
            lookup("MENU_REQUEST_TIMEOUT_SECS").and_then(|value| value.parse::<u64>().ok())
        {
            config.request_timeout = Duration::from_secs(secs.max(1));
        }

        if let Some(ms) =
            lookup("MENU_FEEDBACK_DELAY_MS").and_then(|value| value.parse::<u64>().ok())
        {
            config.feedback_delay = Duration::from_millis(ms);
        }

        match lookup("MENU_FEEDBACK_TRIGGER").map(|raw| (FeedbackTrigger::parse(&raw), raw)) {
            Some((Some(trigger), _)) => config.feedback_trigger = trigger,
            Some((None, raw)) => tracing::warn!("ignoring MENU_FEEDBACK_TRIGGER={raw}"),
            None => {}
        }

        let policies = &mut config.error_policies;
        for (key, slot) in [
            ("MENU_LIST_ERRORS", &mut policies.menu),
            ("MENU_DISH_ERRORS", &mut policies.dish),
            ("MENU_INSIGHT_ERRORS", &mut policies.insight),
            ("MENU_CHAT_ERRORS", &mut policies.chat),
            ("MENU_FEEDBACK_ERRORS", &mut policies.feedback),
        ] {
            if let Some(policy) = lookup(key).as_deref().and_then(ErrorPolicy::parse) {
                *slot = policy;
            }
        }

        config
    }

    pub fn feedback_delay_ms(&self) -> u32 {
        u32::try_from(self.feedback_delay.as_millis()).unwrap_or(u32::MAX)
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .or_else(|| option_env_from_build(key).map(|s| s.to_string()))
}

fn option_env_from_build(key: &str) -> Option<&'static str> {
    match key {
        "MENU_API_BASE_URL" => option_env!("MENU_API_BASE_URL"),
        "MENU_PROFILE" => option_env!("MENU_PROFILE"),
        "MENU_REQUEST_TIMEOUT_SECS" => option_env!("MENU_REQUEST_TIMEOUT_SECS"),
        "MENU_FEEDBACK_DELAY_MS" => option_env!("MENU_FEEDBACK_DELAY_MS"),
        "MENU_FEEDBACK_TRIGGER" => option_env!("MENU_FEEDBACK_TRIGGER"),
        "MENU_LIST_ERRORS" => option_env!("MENU_LIST_ERRORS"),
        "MENU_DISH_ERRORS" => option_env!("MENU_DISH_ERRORS"),
        "MENU_INSIGHT_ERRORS" => option_env!("MENU_INSIGHT_ERRORS"),
        "MENU_CHAT_ERRORS" => option_env!("MENU_CHAT_ERRORS"),
        "MENU_FEEDBACK_ERRORS" => option_env!("MENU_FEEDBACK_ERRORS"),
        _ => None,
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_dotenv() {
    if let Err(err) = dotenvy::dotenv() {
        if !matches!(err, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            tracing::warn!("failed to load .env: {err}");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[inline]
pub fn load_dotenv() {}
