use async_trait::async_trait;

use crate::models::ChatReply;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("cannot connect to {0}")]
    Unreachable(String),

    #[error("{0}")]
    Request(String),
}

/// Where the UI sends chat messages.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, message: &str) -> Result<String, BackendError>;

    /// Base URL shown to the user when the backend cannot be reached.
    fn url(&self) -> &str;
}

pub struct HttpChatBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpChatBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send(&self, message: &str) -> Result<String, BackendError> {
        let res = self
            .client
            .post(format!("{}/chat", self.base_url))
            .form(&[("message", message)])
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    BackendError::Unreachable(self.base_url.clone())
                } else {
                    BackendError::Request(e.to_string())
                }
            })?;

        let status = res.status();
        if !status.is_success() {
            return Err(BackendError::Request(format!("backend returned {status}")));
        }

        let reply: ChatReply = res
            .json()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        Ok(reply.response)
    }

    fn url(&self) -> &str {
        &self.base_url
    }
}

/// Inline message shown in place of a bot reply.
pub fn describe(error: &BackendError, backend_url: &str) -> String {
    match error {
        BackendError::Unreachable(_) => format!(
            "Cannot connect to the backend server. Make sure it's running on {backend_url}"
        ),
        BackendError::Request(e) => format!("Error: {e}"),
    }
}
