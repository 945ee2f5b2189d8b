use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::{serde_as, DefaultOnNull};

/// Dish identifier as served by the backend.
///
/// The listing route hands out slugs (`"grilled-salmon"`) while older
/// payloads carry the numeric menu id, so both JSON shapes are accepted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DishId(String);

impl DishId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DishId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for DishId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for DishId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for DishId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DishId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(value) => Self::from(value),
            RawId::Text(value) => Self(value),
        })
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DishStatus {
    Fresh,
    Caution,
    Unavailable,
}

impl DishStatus {
    pub const ALL: [DishStatus; 3] = [Self::Fresh, Self::Caution, Self::Unavailable];

    pub fn label(self) -> &'static str {
        match self {
            Self::Fresh => "Fresh",
            Self::Caution => "Caution",
            Self::Unavailable => "Unavailable",
        }
    }

    /// Case-folded label, used as the CSS modifier class.
    pub fn css_key(self) -> String {
        self.label().to_lowercase()
    }
}

impl fmt::Display for DishStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[serde_as]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    pub id: DishId,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub price: f64,
    pub status: DishStatus,
    #[serde(default)]
    pub availability: String,
    #[serde(default)]
    pub priority: i32,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl MenuItem {
    pub fn image_path(&self) -> String {
        dish_image_path(&self.id)
    }
}

/// Single dish as returned by `GET /menu/{id}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DishDetail {
    pub id: DishId,
    pub name: String,
    pub category: String,
    pub status: DishStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_checked: Option<String>,
}

pub fn dish_image_path(id: &DishId) -> String {
    format!("/images/{id}.jpeg")
}

/// Body shared by the insight and chat replies.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextReply {
    pub text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest<'a> {
    pub question: &'a str,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedbackRequest<'a> {
    pub text: &'a str,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct FeedbackAnalysis {
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct FeedbackReceipt {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub analysis: Option<FeedbackAnalysis>,
}
