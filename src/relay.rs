//! Contact form relay to the transactional email provider.
//!
//! The flow is deliberately thin: validate the four submitted fields, read
//! the provider credential from the environment, issue one outbound POST,
//! and report the provider-assigned id. At-most-once semantics throughout —
//! no retry, no queue, no idempotency key. The only suspension point is the
//! outbound call itself, bounded by the transport's default timeout.
//!
//! Error taxonomy mirrors what callers are allowed to learn:
//!
//! - [`RelayError::Validation`] — the submitter's fault; the message is safe
//!   to echo back.
//! - [`RelayError::Configuration`] / [`RelayError::Upstream`] — our fault or
//!   the provider's; `Display` gives the generic client-facing message and
//!   the `detail` field stays server-side for the logs.

use crate::config::ContactConfig;
use maud::html;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    /// Invalid submission. The message is echoed to the caller with a 400.
    #[error("{0}")]
    Validation(String),
    /// Provider credential missing. Generic 500; detail is logged only.
    #[error("Email service not configured")]
    Configuration { detail: String },
    /// Provider rejected or failed the request. Generic 500; detail logged.
    #[error("Failed to send email")]
    Upstream { detail: String },
}

/// The contact form payload. Fields default to empty so a missing field
/// validates as missing rather than failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactRequest {
    /// All four fields required; email must have a plausible shape.
    pub fn validate(&self) -> Result<(), RelayError> {
        let fields = [&self.name, &self.email, &self.subject, &self.message];
        if fields.iter().any(|field| field.trim().is_empty()) {
            return Err(RelayError::Validation("All fields are required".into()));
        }
        if !email_pattern().is_match(&self.email) {
            return Err(RelayError::Validation("Invalid email address".into()));
        }
        Ok(())
    }
}

/// Syntactic email check only: something@something.something, no whitespace.
/// Deliverability is the provider's problem.
fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("pattern compiles"))
}

/// The JSON body sent to the provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// What we read back from the provider on success.
#[derive(Debug, Deserialize)]
pub struct ProviderReceipt {
    #[serde(default)]
    pub id: String,
}

/// Read the provider credential named in config from the environment.
///
/// Checked before any network I/O so a misconfigured deployment fails fast
/// with a configuration error rather than an opaque provider rejection.
pub fn api_key(contact: &ContactConfig) -> Result<String, RelayError> {
    std::env::var(&contact.api_key_env)
        .ok()
        .filter(|key| !key.is_empty())
        .ok_or_else(|| RelayError::Configuration {
            detail: format!("{} is not set", contact.api_key_env),
        })
}

/// Assemble the provider payload for a validated submission.
///
/// Reply-to is the submitter, so replying in a mail client just works.
/// Both HTML and plain-text bodies are generated; the HTML side is
/// template-escaped, so hostile submissions render inert.
pub fn build_email(contact: &ContactConfig, site_name: &str, req: &ContactRequest) -> OutboundEmail {
    let html_body = html! {
        div {
            h2 { "New Contact Form Submission" }
            p { strong { "Name: " } (req.name) }
            p { strong { "Email: " } (req.email) }
            p { strong { "Subject: " } (req.subject) }
            h3 { "Message:" }
            p style="white-space: pre-wrap;" { (req.message) }
            hr;
            p { "This email was sent from the " (site_name) " contact form." }
        }
    };

    let text_body = format!(
        "New Contact Form Submission\n\n\
         Name: {}\nEmail: {}\nSubject: {}\n\n\
         Message:\n{}\n\n---\n\
         This email was sent from the {} contact form.\n",
        req.name, req.email, req.subject, req.message, site_name
    );

    OutboundEmail {
        from: contact.from.clone(),
        to: contact.to.clone(),
        reply_to: req.email.clone(),
        subject: format!("{}{}", contact.subject_prefix, req.subject),
        html: html_body.into_string(),
        text: text_body,
    }
}

/// One bearer-authed POST to the provider. Non-2xx is an upstream error
/// whose payload is preserved for the logs, never for the caller.
pub async fn send(
    client: &reqwest::Client,
    contact: &ContactConfig,
    api_key: &str,
    email: &OutboundEmail,
) -> Result<ProviderReceipt, RelayError> {
    let response = client
        .post(&contact.provider_url)
        .bearer_auth(api_key)
        .json(email)
        .send()
        .await
        .map_err(|err| RelayError::Upstream {
            detail: err.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RelayError::Upstream {
            detail: format!("provider returned {status}: {body}"),
        });
    }

    response.json().await.map_err(|err| RelayError::Upstream {
        detail: format!("unreadable provider response: {err}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> ContactRequest {
        ContactRequest {
            name: "A".into(),
            email: "a@b.com".into(),
            subject: "S".into(),
            message: "M".into(),
        }
    }

    #[test]
    fn valid_payload_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn each_missing_field_fails_validation() {
        for field in ["name", "email", "subject", "message"] {
            let mut req = valid_request();
            match field {
                "name" => req.name.clear(),
                "email" => req.email.clear(),
                "subject" => req.subject.clear(),
                _ => req.message.clear(),
            }
            let err = req.validate().unwrap_err();
            assert_eq!(err.to_string(), "All fields are required", "field: {field}");
        }
    }

    #[test]
    fn whitespace_only_field_counts_as_missing() {
        let mut req = valid_request();
        req.message = "   ".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn malformed_email_fails_validation() {
        for bad in ["not-an-email", "a@b", "a b@c.com", "@b.com", "a@.com "] {
            let mut req = valid_request();
            req.email = bad.into();
            let err = req.validate().unwrap_err();
            assert_eq!(err.to_string(), "Invalid email address", "email: {bad}");
        }
    }

    #[test]
    fn plausible_emails_pass() {
        for ok in ["a@b.com", "first.last@sub.domain.org", "x+tag@y.co"] {
            let mut req = valid_request();
            req.email = ok.into();
            assert!(req.validate().is_ok(), "email: {ok}");
        }
    }

    #[test]
    fn missing_json_fields_deserialize_to_empty() {
        let req: ContactRequest = serde_json::from_str(r#"{"name": "A"}"#).unwrap();
        assert_eq!(req.name, "A");
        assert_eq!(req.email, "");
        // and therefore fail validation rather than deserialization
        assert!(req.validate().is_err());
    }

    #[test]
    fn build_email_sets_reply_to_and_prefixes_subject() {
        let contact = ContactConfig::default();
        let email = build_email(&contact, "Portfolio", &valid_request());
        assert_eq!(email.reply_to, "a@b.com");
        assert_eq!(email.subject, "Portfolio Contact: S");
        assert_eq!(email.from, contact.from);
        assert_eq!(email.to, contact.to);
    }

    #[test]
    fn build_email_escapes_html_in_the_submission() {
        let mut req = valid_request();
        req.message = "<script>alert('x')</script>".into();
        let email = build_email(&ContactConfig::default(), "Portfolio", &req);
        assert!(!email.html.contains("<script>"));
        assert!(email.html.contains("&lt;script&gt;"));
        // the plain-text body carries it verbatim — it is not markup there
        assert!(email.text.contains("<script>"));
    }

    #[test]
    fn build_email_carries_both_bodies() {
        let email = build_email(&ContactConfig::default(), "Portfolio", &valid_request());
        assert!(email.html.contains("New Contact Form Submission"));
        assert!(email.text.contains("New Contact Form Submission"));
        assert!(email.text.contains("Message:\nM"));
    }

    #[test]
    fn missing_credential_is_a_configuration_error() {
        let mut contact = ContactConfig::default();
        contact.api_key_env = "BREAKWATER_TEST_KEY_THAT_IS_NEVER_SET".into();
        let err = api_key(&contact).unwrap_err();
        assert!(matches!(err, RelayError::Configuration { .. }));
        assert_eq!(err.to_string(), "Email service not configured");
    }

    #[test]
    fn provider_receipt_tolerates_missing_id() {
        let receipt: ProviderReceipt = serde_json::from_str("{}").unwrap();
        assert_eq!(receipt.id, "");
        let receipt: ProviderReceipt =
            serde_json::from_str(r#"{"id": "re_123", "other": 1}"#).unwrap();
        assert_eq!(receipt.id, "re_123");
    }
}
