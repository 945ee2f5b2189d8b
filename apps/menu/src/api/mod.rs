use anyhow::Context;
use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::AppConfig;
use crate::models::{
    ChatRequest, DishDetail, DishId, FeedbackReceipt, FeedbackRequest, MenuItem, TextReply,
};

pub type ClientResult<T> = Result<T, ClientError>;

/// Read side of the menu backend, as seen by the pages.
#[allow(async_fn_in_trait)]
pub trait MenuSource {
    async fn list_menu(&self) -> ClientResult<Vec<MenuItem>>;
    async fn get_dish(&self, id: &DishId) -> ClientResult<DishDetail>;
    async fn get_insight(&self, id: &DishId) -> ClientResult<TextReply>;
}

/// Write side used by the dish chatbot.
#[allow(async_fn_in_trait)]
pub trait ChatBackend {
    async fn ask_question(&self, id: &DishId, question: &str) -> ClientResult<TextReply>;
    async fn submit_feedback(
        &self,
        id: &DishId,
        text: &str,
    ) -> ClientResult<Option<FeedbackReceipt>>;
}

#[derive(Clone)]
pub struct MenuClient {
    inner: reqwest::Client,
    base_url: String,
}

impl PartialEq for MenuClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url
    }
}

impl MenuClient {
    pub fn new(config: AppConfig) -> ClientResult<Self> {
        let base_url = normalize_base_url(&config.api_base_url);

        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.request_timeout);

        let client = builder.build().context("failed to build reqwest client")?;

        Ok(Self {
            inner: client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_menu(&self) -> ClientResult<Vec<MenuItem>> {
        let builder = self.request(Method::GET, "menu");
        self.send(builder).await
    }

    pub async fn get_dish(&self, id: &DishId) -> ClientResult<DishDetail> {
        let builder = self.request(Method::GET, &format!("menu/{id}"));
        self.send(builder).await
    }

    pub async fn get_insight(&self, id: &DishId) -> ClientResult<TextReply> {
        let builder = self.request(Method::GET, &format!("menu/{id}/insight"));
        self.send(builder).await
    }

    pub async fn ask_question(&self, id: &DishId, question: &str) -> ClientResult<TextReply> {
        let builder = self
            .request(Method::POST, &format!("menu/{id}/chat"))
            .json(&ChatRequest { question });
        self.send(builder).await
    }

    /// The backend's reply is optional; an empty 2xx body yields `None`.
    pub async fn submit_feedback(
        &self,
        id: &DishId,
        text: &str,
    ) -> ClientResult<Option<FeedbackReceipt>> {
        let builder = self
            .request(Method::POST, &format!("menu/{id}/feedback"))
            .json(&FeedbackRequest { text });
        let (status, bytes) = self.fetch(builder).await?;

        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status,
                body: bytes,
            });
        }
        if bytes.is_empty() {
            return Ok(None);
        }
        Ok(serde_json::from_slice(&bytes).ok())
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.inner
            .request(method, self.join_path(path))
            .header(header::ACCEPT, "application/json")
    }

    fn join_path(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn fetch(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> ClientResult<(StatusCode, Vec<u8>)> {
        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        Ok((status, bytes.to_vec()))
    }

    async fn send<T>(&self, builder: reqwest::RequestBuilder) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let (status, bytes) = self.fetch(builder).await?;
        decode_body(status, &bytes)
    }
}

impl MenuSource for MenuClient {
    async fn list_menu(&self) -> ClientResult<Vec<MenuItem>> {
        MenuClient::list_menu(self).await
    }

    async fn get_dish(&self, id: &DishId) -> ClientResult<DishDetail> {
        MenuClient::get_dish(self, id).await
    }

    async fn get_insight(&self, id: &DishId) -> ClientResult<TextReply> {
        MenuClient::get_insight(self, id).await
    }
}

impl ChatBackend for MenuClient {
    async fn ask_question(&self, id: &DishId, question: &str) -> ClientResult<TextReply> {
        MenuClient::ask_question(self, id, question).await
    }

    async fn submit_feedback(
        &self,
        id: &DishId,
        text: &str,
    ) -> ClientResult<Option<FeedbackReceipt>> {
        MenuClient::submit_feedback(self, id, text).await
    }
}

/// A client that failed to build at startup answers every call with `Setup`.
impl<T: MenuSource> MenuSource for Option<T> {
    async fn list_menu(&self) -> ClientResult<Vec<MenuItem>> {
        match self {
            Some(source) => source.list_menu().await,
            None => Err(ClientError::unavailable()),
        }
    }

    async fn get_dish(&self, id: &DishId) -> ClientResult<DishDetail> {
        match self {
            Some(source) => source.get_dish(id).await,
            None => Err(ClientError::unavailable()),
        }
    }

    async fn get_insight(&self, id: &DishId) -> ClientResult<TextReply> {
        match self {
            Some(source) => source.get_insight(id).await,
            None => Err(ClientError::unavailable()),
        }
    }
}

impl<T: ChatBackend> ChatBackend for Option<T> {
    async fn ask_question(&self, id: &DishId, question: &str) -> ClientResult<TextReply> {
        match self {
            Some(backend) => backend.ask_question(id, question).await,
            None => Err(ClientError::unavailable()),
        }
    }

    async fn submit_feedback(
        &self,
        id: &DishId,
        text: &str,
    ) -> ClientResult<Option<FeedbackReceipt>> {
        match self {
            Some(backend) => backend.submit_feedback(id, text).await,
            None => Err(ClientError::unavailable()),
        }
    }
}

fn decode_body<T>(status: StatusCode, bytes: &[u8]) -> ClientResult<T>
where
    T: DeserializeOwned,
{
    if !status.is_success() {
        return Err(ClientError::UnexpectedStatus {
            status,
            body: bytes.to_vec(),
        });
    }

    if bytes.is_empty() {
        return Err(ClientError::EmptyResponse(status));
    }

    serde_json::from_slice(bytes).map_err(ClientError::from)
}

fn normalize_base_url(input: &str) -> String {
    input.trim_end_matches('/').to_string()
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("client setup failed: {0}")]
    Setup(#[from] anyhow::Error),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("empty response body: {0}")]
    EmptyResponse(StatusCode),
    #[error("unexpected status {status}")]
    UnexpectedStatus { status: StatusCode, body: Vec<u8> },
}

impl ClientError {
    pub fn unavailable() -> Self {
        Self::Setup(anyhow::anyhow!("menu client unavailable"))
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::EmptyResponse(status) => Some(*status),
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> MenuClient {
        MenuClient::new(AppConfig {
            api_base_url: base.to_string(),
            ..AppConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn joins_paths_against_one_base_url() {
        let client = client("http://localhost:8000///");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(
            client.join_path("/menu/grilled-salmon/insight"),
            "http://localhost:8000/menu/grilled-salmon/insight"
        );
    }

    #[test]
    fn decodes_successful_bodies() {
        let reply: TextReply =
            decode_body(StatusCode::OK, br#"{"text":"Caught this morning."}"#).unwrap();
        assert_eq!(reply.text, "Caught this morning.");
    }

    #[test]
    fn maps_failures_to_client_errors() {
        let err =
            decode_body::<TextReply>(StatusCode::INTERNAL_SERVER_ERROR, b"{}").unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));

        let err = decode_body::<TextReply>(StatusCode::OK, b"").unwrap_err();
        assert!(matches!(err, ClientError::EmptyResponse(status) if status == StatusCode::OK));

        let err = decode_body::<TextReply>(StatusCode::OK, b"not json").unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn chat_bodies_match_the_backend_fields() {
        let question = serde_json::to_value(ChatRequest {
            question: "Is it fresh?",
        })
        .unwrap();
        assert_eq!(question, serde_json::json!({ "question": "Is it fresh?" }));

        let feedback = serde_json::to_value(FeedbackRequest { text: "ok" }).unwrap();
        assert_eq!(feedback, serde_json::json!({ "text": "ok" }));
    }

    #[test]
    fn missing_client_answers_with_setup_errors() {
        let backend: Option<MenuClient> = None;
        let id = DishId::from("clam-soup");

        let err = futures::executor::block_on(backend.ask_question(&id, "Spicy?")).unwrap_err();
        assert!(matches!(err, ClientError::Setup(_)));

        let err = futures::executor::block_on(backend.submit_feedback(&id, "Too salty")).unwrap_err();
        assert!(matches!(err, ClientError::Setup(_)));
    }
}
