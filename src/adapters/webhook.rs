use crate::domain::model::{NotificationMessage, WebhookPayload};
use crate::domain::ports::Notifier;
use crate::utils::error::{Result, WatcherError};
use async_trait::async_trait;
use reqwest::Client;

#[derive(Debug, Clone)]
pub struct SlackWebhook {
    client: Client,
    url: String,
}

impl SlackWebhook {
    pub fn new(url: String) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }
}

#[async_trait]
impl Notifier for SlackWebhook {
    async fn notify(&self, message: &NotificationMessage) -> Result<()> {
        let payload = WebhookPayload::from(message);

        tracing::debug!("Posting notification to webhook: {}", payload.text);
        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| WatcherError::NotifyDeliveryFailed {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WatcherError::NotifyDeliveryFailed {
                message: format!("webhook responded with {}: {}", status, body),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn message() -> NotificationMessage {
        NotificationMessage {
            region_display_name: "東京".to_string(),
            added: vec!["bedrock".to_string(), "q".to_string()],
        }
    }

    #[tokio::test]
    async fn test_notify_posts_slack_payload() {
        let server = MockServer::start();
        let hook_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/services/T0/B0/x")
                .header("content-type", "application/json")
                .json_body(serde_json::json!({
                    "username": "AWS Service Watcher",
                    "text": "東京リージョンに新たに *bedrock, q* がやってきた。",
                    "icon_emoji": ":robot_face:"
                }));
            then.status(200).body("ok");
        });

        let webhook = SlackWebhook::new(server.url("/services/T0/B0/x"));
        webhook.notify(&message()).await.unwrap();

        hook_mock.assert();
    }

    #[tokio::test]
    async fn test_notify_non_success_status_fails() {
        let server = MockServer::start();
        let hook_mock = server.mock(|when, then| {
            when.method(POST).path("/hook");
            then.status(404).body("no_service");
        });

        let webhook = SlackWebhook::new(server.url("/hook"));
        let result = webhook.notify(&message()).await;

        hook_mock.assert();
        match result {
            Err(WatcherError::NotifyDeliveryFailed { message }) => {
                assert!(message.contains("404"));
                assert!(message.contains("no_service"));
            }
            other => panic!("expected NotifyDeliveryFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_notify_unreachable_endpoint_fails() {
        // 沒有人在聽的 port
        let webhook = SlackWebhook::new("http://127.0.0.1:9/hook".to_string());
        let result = webhook.notify(&message()).await;

        assert!(matches!(
            result,
            Err(WatcherError::NotifyDeliveryFailed { .. })
        ));
    }
}
