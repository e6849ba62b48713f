use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::json;
use tracing::{info, warn};

const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

fn env_nonempty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

/// SendGrid mailer, configured from the environment.
pub struct Mailer {
    client: Client,
    api_key: String,
    sender: String,
    recipient: String,
}

impl Mailer {
    /// Build a mailer from `SENDGRID_API_KEY`, `SENDGRID_SENDER_EMAIL`
    /// and `SENDGRID_RECIPIENT_EMAIL`. Returns `None` (with a warning)
    /// when any of them is unset, so an unconfigured run still works.
    pub fn from_env() -> Result<Option<Self>> {
        let Some(api_key) = env_nonempty("SENDGRID_API_KEY") else {
            warn!("SENDGRID_API_KEY not set, email delivery disabled");
            return Ok(None);
        };
        let Some(sender) = env_nonempty("SENDGRID_SENDER_EMAIL") else {
            warn!("SENDGRID_SENDER_EMAIL not set, email delivery disabled");
            return Ok(None);
        };
        let Some(recipient) = env_nonempty("SENDGRID_RECIPIENT_EMAIL") else {
            warn!("SENDGRID_RECIPIENT_EMAIL not set, email delivery disabled");
            return Ok(None);
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Some(Self {
            client,
            api_key,
            sender,
            recipient,
        }))
    }

    /// Send one HTML email through the SendGrid v3 API.
    pub async fn send(&self, subject: &str, html_body: &str) -> Result<()> {
        let body = json!({
            "personalizations": [{"to": [{"email": self.recipient}]}],
            "from": {"email": self.sender},
            "subject": subject,
            "content": [{"type": "text/html", "value": html_body}],
        });

        let response = self
            .client
            .post(SENDGRID_SEND_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to reach SendGrid")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("SendGrid rejected the email: {status} {detail}");
        }

        info!("Email sent: {subject}");
        Ok(())
    }
}
