//! Twilio-compatible SMS sink
//!
//! Posts form-encoded `From`, `To`, `Body` to
//! `{api_base}/2010-04-01/Accounts/{sid}/Messages.json` with HTTP basic auth.
//! Credentials are resolved on every send.

use crate::{Notification, NotificationSink, Result, SinkError};
use async_trait::async_trait;
use bandwatch_config::SmsCredentials;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
enum CredentialSource {
    /// Read the four secrets from the process environment at send time
    Environment,
    Fixed(SmsCredentials),
}

/// SMS delivery through a Twilio-style REST API
#[derive(Debug, Clone)]
pub struct SmsSink {
    client: reqwest::Client,
    api_base_url: String,
    timeout: Duration,
    credentials: CredentialSource,
}

impl SmsSink {
    /// Sink that resolves credentials from the environment on each send
    pub fn new(api_base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SinkError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            timeout,
            credentials: CredentialSource::Environment,
        })
    }

    /// Use fixed credentials instead of the environment
    pub fn with_credentials(mut self, credentials: SmsCredentials) -> Self {
        self.credentials = CredentialSource::Fixed(credentials);
        self
    }

    fn resolve_credentials(&self) -> Result<SmsCredentials> {
        match &self.credentials {
            CredentialSource::Environment => {
                SmsCredentials::from_env().map_err(|e| SinkError::Configuration(e.to_string()))
            }
            CredentialSource::Fixed(credentials) => Ok(credentials.clone()),
        }
    }

    fn messages_url(&self, account_sid: &str) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_base_url, account_sid
        )
    }
}

#[async_trait]
impl NotificationSink for SmsSink {
    fn name(&self) -> &str {
        "sms"
    }

    async fn send(&self, notification: &Notification) -> Result<()> {
        let credentials = self.resolve_credentials()?;
        let url = self.messages_url(&credentials.account_sid);

        debug!("Sending SMS to {} via {}", credentials.to_number, self.api_base_url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&credentials.account_sid, Some(&credentials.auth_token))
            .form(&[
                ("From", credentials.from_number.as_str()),
                ("To", credentials.to_number.as_str()),
                ("Body", notification.body.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SinkError::Timeout(self.timeout.as_millis() as u64)
                } else {
                    SinkError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("SMS provider rejected message: {} {}", status, body);
            return Err(SinkError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!("SMS delivered to {}", credentials.to_number);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn credentials() -> SmsCredentials {
        SmsCredentials {
            account_sid: "AC123".to_string(),
            auth_token: "secret".to_string(),
            from_number: "+15550001".to_string(),
            to_number: "+15550002".to_string(),
        }
    }

    #[tokio::test]
    async fn test_posts_form_with_basic_auth() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/2010-04-01/Accounts/AC123/Messages.json")
            .match_header("authorization", "Basic QUMxMjM6c2VjcmV0")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("From".into(), "+15550001".into()),
                Matcher::UrlEncoded("To".into(), "+15550002".into()),
                Matcher::UrlEncoded("Body".into(), "BTC STRONG BUY!\nPrice: $1".into()),
            ]))
            .with_status(201)
            .with_body(r#"{"sid":"SM1"}"#)
            .create_async()
            .await;

        let sink = SmsSink::new(server.url(), Duration::from_secs(5))
            .unwrap()
            .with_credentials(credentials());
        let notification = Notification::new("BTC STRONG BUY!\nPrice: $1").unwrap();

        sink.send(&notification).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/2010-04-01/Accounts/AC123/Messages.json")
            .with_status(401)
            .with_body("unauthorized")
            .create_async()
            .await;

        let sink = SmsSink::new(server.url(), Duration::from_secs(5))
            .unwrap()
            .with_credentials(credentials());
        let err = sink
            .send(&Notification::new("hello").unwrap())
            .await
            .unwrap_err();

        match err {
            SinkError::Rejected { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "unauthorized");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
