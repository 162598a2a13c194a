//! Fire-and-forget outbound notifications.
//!
//! Shop operations hand a message string to [`Notifier::send`] and move on;
//! delivery happens on a worker task fed through an unbounded channel, so the
//! triggering request never waits on Telegram and never observes a delivery
//! failure. Failures are logged, not propagated.

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::config::TelegramConfig;

/// Telegram Bot API base URL.
const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Delivery failure inside the worker; never leaves this module except as a
/// log line.
#[derive(Debug, Error)]
enum NotifyError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("malformed response: {0}")]
    Response(String),
    #[error("telegram error: {0}")]
    Api(String),
}

/// Handle the shop engine sends notifications through.
///
/// Cheap to clone; a disabled notifier drops messages silently (at debug
/// level) so the engine code never branches on configuration.
#[derive(Clone)]
pub struct Notifier {
    tx: Option<mpsc::UnboundedSender<String>>,
}

impl Notifier {
    /// A notifier that discards everything. Used when Telegram is not
    /// configured, and in tests.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { tx: None }
    }

    /// Spawn a delivery worker for the configured Telegram chat and return a
    /// handle feeding it.
    #[must_use]
    pub fn telegram(config: &TelegramConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = TelegramWorker {
            client: Client::new(),
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
        };
        tokio::spawn(worker.run(rx));
        Self { tx: Some(tx) }
    }

    /// Queue a message for delivery. Never blocks, never fails the caller.
    pub fn send(&self, text: impl Into<String>) {
        match &self.tx {
            Some(tx) => {
                if tx.send(text.into()).is_err() {
                    warn!("notification worker is gone, dropping message");
                }
            }
            None => debug!("notifier disabled, dropping message"),
        }
    }
}

struct TelegramWorker {
    client: Client,
    bot_token: SecretString,
    chat_id: String,
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct SendMessageResponse {
    ok: bool,
    description: Option<String>,
}

impl TelegramWorker {
    async fn run(self, mut rx: mpsc::UnboundedReceiver<String>) {
        while let Some(text) = rx.recv().await {
            match self.deliver(&text).await {
                Ok(()) => debug!("notification delivered"),
                Err(e) => warn!(error = %e, "notification delivery failed"),
            }
        }
    }

    async fn deliver(&self, text: &str) -> Result<(), NotifyError> {
        let url = format!(
            "{TELEGRAM_API_BASE}/bot{}/sendMessage",
            self.bot_token.expose_secret()
        );
        let response = self
            .client
            .post(url)
            .json(&SendMessageRequest {
                chat_id: &self.chat_id,
                text,
            })
            .send()
            .await
            .map_err(|e| NotifyError::Request(e.to_string()))?;

        let result: SendMessageResponse = response
            .json()
            .await
            .map_err(|e| NotifyError::Response(e.to_string()))?;

        if !result.ok {
            return Err(NotifyError::Api(
                result
                    .description
                    .unwrap_or_else(|| "Unknown error".to_owned()),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_notifier_accepts_messages() {
        // Must not panic or block without a runtime
        Notifier::disabled().send("hello");
    }
}
