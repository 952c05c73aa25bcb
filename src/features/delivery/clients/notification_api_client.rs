use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

use crate::features::notifications::dtos::{NotificationDto, NotificationStateDto};
use crate::features::preferences::dtos::{ToggleCategoryDto, ToggleCategoryResponseDto};
use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server responded with HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Server response carried no data")]
    EmptyResponse,
}

/// Server round trips the delivery queue depends on
#[async_trait]
pub trait NotificationApi: Send + Sync {
    async fn fetch_state(&self) -> Result<NotificationStateDto, ClientError>;

    /// Mark read and return the refreshed unread list
    async fn mark_read(&self, notification_id: Uuid) -> Result<Vec<NotificationDto>, ClientError>;

    async fn toggle_category(
        &self,
        category_id: Uuid,
    ) -> Result<ToggleCategoryResponseDto, ClientError>;
}

/// `NotificationApi` over HTTP with a bearer token
pub struct HttpNotificationApi {
    base_url: String,
    token: String,
    http_client: reqwest::Client,
}

impl HttpNotificationApi {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            http_client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn unwrap_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiResponse<serde_json::Value>>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| status.to_string());
            tracing::warn!("Notification API error: HTTP {} - {}", status, message);
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<ApiResponse<T>>()
            .await?
            .data
            .ok_or(ClientError::EmptyResponse)
    }
}

#[async_trait]
impl NotificationApi for HttpNotificationApi {
    async fn fetch_state(&self) -> Result<NotificationStateDto, ClientError> {
        let url = self.url("/api/notifications/state");
        tracing::debug!("Fetching notification state: {}", url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        Self::unwrap_envelope(response).await
    }

    async fn mark_read(&self, notification_id: Uuid) -> Result<Vec<NotificationDto>, ClientError> {
        let url = self.url(&format!("/api/notifications/{}/read", notification_id));

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        Self::unwrap_envelope(response).await
    }

    async fn toggle_category(
        &self,
        category_id: Uuid,
    ) -> Result<ToggleCategoryResponseDto, ClientError> {
        let url = self.url("/api/notifications/preferences/toggle-category");
        let body = ToggleCategoryDto {
            category_id: category_id.to_string(),
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        Self::unwrap_envelope(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let api = HttpNotificationApi::new("http://localhost:3000/", "token");
        assert_eq!(
            api.url("/api/notifications/state"),
            "http://localhost:3000/api/notifications/state"
        );
    }
}
