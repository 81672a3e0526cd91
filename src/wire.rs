//! Message ingestion: provider wire resources and raw RFC 822 bytes

use crate::error::{ExtractError, Result};
use crate::types::Message;
use base64::Engine;
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One message resource as returned by the provider's metadata or full fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResource {
    pub id: String,
    pub payload: Option<MessagePayload>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessagePayload {
    #[serde(default)]
    pub headers: Vec<MessageHeader>,
    #[serde(rename = "mimeType", default)]
    pub mime_type: String,
    pub body: Option<PartBody>,
    #[serde(default)]
    pub parts: Vec<MessagePart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageHeader {
    pub name: String,
    pub value: String,
}

/// Body of a message part; `data` is base64url-encoded on the wire
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartBody {
    pub data: Option<String>,
    #[serde(default)]
    pub size: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessagePart {
    #[serde(rename = "mimeType", default)]
    pub mime_type: String,
    pub body: Option<PartBody>,
    #[serde(default)]
    pub parts: Vec<MessagePart>,
}

/// Parse a provider JSON message resource into a [`Message`].
///
/// Only a structurally unreadable resource is an error. A body part that
/// fails base64 or UTF-8 decoding is logged and dropped, leaving
/// `html: None`; header-only metadata fetches simply carry no parts.
pub fn parse_metadata(json: &str) -> Result<Message> {
    let resource: MessageResource =
        serde_json::from_str(json).map_err(|e| ExtractError::Decode(e.to_string()))?;
    Ok(resource.into())
}

impl From<MessageResource> for Message {
    fn from(resource: MessageResource) -> Self {
        let payload = resource.payload.unwrap_or_default();
        let headers = payload
            .headers
            .iter()
            .map(|h| (h.name.clone(), h.value.clone()))
            .collect();
        let html = find_html_part(&payload);

        Self {
            id: resource.id,
            headers,
            html,
        }
    }
}

/// Parse raw RFC 822 bytes into a [`Message`].
///
/// Headers are collected in arrival order; the first `text/html` leaf of
/// the multipart tree (if any) becomes the decoded body.
pub fn parse_raw(id: impl Into<String>, raw: &[u8]) -> Result<Message> {
    let parsed = mailparse::parse_mail(raw).map_err(|e| ExtractError::Structure(e.to_string()))?;

    let headers = parsed
        .headers
        .iter()
        .map(|h| (h.get_key(), h.get_value()))
        .collect();
    let html = html_from_mail(&parsed);

    Ok(Message {
        id: id.into(),
        headers,
        html,
    })
}

fn find_html_part(payload: &MessagePayload) -> Option<String> {
    if payload.mime_type.to_lowercase().contains("text/html")
        && let Some(data) = payload.body.as_ref().and_then(|b| b.data.as_deref())
    {
        return decode_body(data);
    }
    find_html_recursive(&payload.parts)
}

fn find_html_recursive(parts: &[MessagePart]) -> Option<String> {
    for part in parts {
        if part.parts.is_empty() {
            if part.mime_type.to_lowercase().contains("text/html")
                && let Some(data) = part.body.as_ref().and_then(|b| b.data.as_deref())
                && let Some(html) = decode_body(data)
            {
                return Some(html);
            }
        } else if let Some(html) = find_html_recursive(&part.parts) {
            return Some(html);
        }
    }
    None
}

/// Decode a base64url body part; tolerates both padded and unpadded data.
fn decode_body(data: &str) -> Option<String> {
    let bytes = match URL_SAFE
        .decode(data)
        .or_else(|_| URL_SAFE_NO_PAD.decode(data))
    {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Discarding body part with invalid base64: {e}");
            return None;
        }
    };

    match String::from_utf8(bytes) {
        Ok(html) => Some(html),
        Err(e) => {
            warn!("Discarding body part with invalid UTF-8: {e}");
            None
        }
    }
}

fn html_from_mail(parsed: &mailparse::ParsedMail) -> Option<String> {
    if parsed.subparts.is_empty() {
        if parsed.ctype.mimetype.to_lowercase().contains("text/html") {
            return parsed.get_body().ok();
        }
        return None;
    }

    for part in &parsed.subparts {
        if let Some(html) = html_from_mail(part) {
            return Some(html);
        }
    }
    None
}
