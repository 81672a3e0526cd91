//! Link preference policy and unsubscribe action planning

use crate::error::{ExtractError, Result};
use crate::types::{ExtractionResult, Message};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

/// Marks a header HTTP endpoint as one-click capable (RFC 8058)
const POST_HEADER: &str = "List-Unsubscribe-Post";

const DEFAULT_SUBJECT: &str = "Unsubscribe";
const DEFAULT_BODY: &str = "Please unsubscribe me.";

/// How to act on a message's unsubscribe mechanisms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum UnsubscribeAction {
    /// HTTP endpoint the sender advertises as safe to trigger without
    /// further interaction
    OneClick { url: String },

    /// HTTP link that needs a browser visit
    Browse { url: String },

    /// Unsubscribe request composed and sent as an email
    SendMail(MailtoMessage),

    /// No machine-actionable mechanism; hand off to the user
    Manual,
}

/// Outgoing unsubscribe mail parsed from a mailto URI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MailtoMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl MailtoMessage {
    /// Parse a mailto URI into a sendable message.
    ///
    /// `subject` and `body` query parameters are honored and fall back to
    /// the conventional defaults. A URI without a recipient is an error:
    /// there is nothing to send to.
    pub fn parse(uri: &str) -> Result<Self> {
        let parsed = Url::parse(uri).map_err(|e| ExtractError::InvalidMailto(e.to_string()))?;
        if parsed.scheme() != "mailto" {
            return Err(ExtractError::InvalidMailto(format!(
                "not a mailto URI: {uri}"
            )));
        }

        let to = parsed.path().trim().to_string();
        if to.is_empty() {
            return Err(ExtractError::InvalidMailto("missing recipient".into()));
        }

        let mut subject = None;
        let mut body = None;
        for (key, value) in parsed.query_pairs() {
            match key.as_ref() {
                "subject" => subject = Some(value.into_owned()),
                "body" => body = Some(value.into_owned()),
                _ => {}
            }
        }

        Ok(Self {
            to,
            subject: subject.unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
            body: body.unwrap_or_else(|| DEFAULT_BODY.to_string()),
        })
    }

    /// Render as a minimal RFC 822 message
    #[must_use]
    pub fn to_rfc822(&self) -> String {
        format!(
            "To: {}\r\nSubject: {}\r\n\r\n{}",
            self.to, self.subject, self.body
        )
    }

    /// Base64url encoding of the rendered message, the provider's `raw`
    /// send format
    #[must_use]
    pub fn encode_raw(&self) -> String {
        URL_SAFE.encode(self.to_rfc822())
    }
}

/// Choose the action for one message.
///
/// Preference order: header HTTP link (one-click when the sender
/// advertises it), then header mailto, then body link, then manual. A
/// mailto that cannot be parsed falls through to the next preference
/// instead of failing the plan.
#[must_use]
pub fn plan_action(message: &Message, extraction: &ExtractionResult) -> UnsubscribeAction {
    if let Some(url) = &extraction.header_link {
        if message.has_header(POST_HEADER) {
            return UnsubscribeAction::OneClick { url: url.clone() };
        }
        return UnsubscribeAction::Browse { url: url.clone() };
    }

    if let Some(uri) = &extraction.mailto_link {
        match MailtoMessage::parse(uri) {
            Ok(mail) => return UnsubscribeAction::SendMail(mail),
            Err(e) => warn!("Skipping unusable mailto link: {e}"),
        }
    }

    if let Some(url) = &extraction.body_link {
        return UnsubscribeAction::Browse { url: url.clone() };
    }

    UnsubscribeAction::Manual
}
