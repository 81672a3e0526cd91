//! Core types: message view, sender identity, extraction results

use serde::{Deserialize, Serialize};
use std::fmt;

/// A read-only view of one message, as handed to the extractor.
///
/// Header names are matched case-insensitively and duplicates are kept in
/// arrival order. The HTML body, when present, has already been decoded
/// from the provider's wire encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Provider message id (synthetic for raw ingestion)
    pub id: String,

    /// Header name/value pairs in arrival order
    pub headers: Vec<(String, String)>,

    /// Decoded UTF-8 HTML body, if the fetch format supplied one
    pub html: Option<String>,
}

impl Message {
    pub fn new(id: impl Into<String>, headers: Vec<(String, String)>) -> Self {
        Self {
            id: id.into(),
            headers,
            html: None,
        }
    }

    pub fn with_html(
        id: impl Into<String>,
        headers: Vec<(String, String)>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            headers,
            html: Some(html.into()),
        }
    }

    /// First value for a header name, matched case-insensitively
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// All values for a header name, in arrival order
    pub fn headers_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        self.headers
            .iter()
            .filter(move |(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Whether any header with this name is present
    #[must_use]
    pub fn has_header(&self, name: &str) -> bool {
        self.headers
            .iter()
            .any(|(n, _)| n.eq_ignore_ascii_case(name))
    }
}

/// Cleaned sender identity, used to group scan results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Sender {
    /// Display name if present, otherwise the bare address or raw value
    pub display: String,

    /// Address part, when one could be recognized
    pub address: Option<String>,
}

impl Sender {
    /// Parse a `From` header value into a display identity.
    ///
    /// `"Ad Team" <ads@example.com>` keeps the quoted name; a bare or
    /// bracketed address with no name falls back to the address itself.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();

        if let Some(start) = raw.find('<')
            && let Some(end) = raw.find('>')
            && start < end
        {
            let address = raw[start + 1..end].trim().to_string();
            let name = raw[..start].trim().trim_matches('"').trim();
            let display = if name.is_empty() {
                address.clone()
            } else {
                name.to_string()
            };
            return Self {
                display,
                address: Some(address),
            };
        }

        Self {
            display: raw.to_string(),
            address: raw.contains('@').then(|| raw.to_string()),
        }
    }

    /// Placeholder identity for messages without a `From` header
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            display: "Unknown Sender".to_string(),
            address: None,
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display)
    }
}

/// All unsubscribe mechanisms found in one message.
///
/// The three slots are independent; preference between them is the
/// caller's decision. Within a slot, a candidate only replaces an
/// incumbent when it is strictly more trustworthy: HTTPS over HTTP for
/// the header slot, a higher score for the body slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractionResult {
    /// HTTP(S) URL from a `List-Unsubscribe`-family header
    pub header_link: Option<String>,

    /// `mailto:` URI from the same header family
    pub mailto_link: Option<String>,

    /// HTTP(S) URL recovered from the HTML body
    pub body_link: Option<String>,

    /// Confidence score for `body_link`; 0 when no body link was found
    pub body_link_score: u32,
}

impl ExtractionResult {
    /// True when no mechanism of any kind was found
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.header_link.is_none() && self.mailto_link.is_none() && self.body_link.is_none()
    }

    /// Offer an HTTP(S) candidate for the header slot.
    ///
    /// Accepted when the slot is empty, or when the candidate is HTTPS
    /// and the incumbent is not.
    pub fn offer_header_link(&mut self, link: &str) {
        let upgrade = match &self.header_link {
            None => true,
            Some(current) => link.starts_with("https") && !current.starts_with("https"),
        };
        if upgrade {
            self.header_link = Some(link.to_string());
        }
    }

    /// Offer a mailto candidate; the first occurrence wins.
    pub fn offer_mailto_link(&mut self, link: &str) {
        if self.mailto_link.is_none() {
            self.mailto_link = Some(link.to_string());
        }
    }

    /// Offer a scored body candidate; a higher score replaces a lower one.
    pub fn offer_body_link(&mut self, link: &str, score: u32) {
        if self.body_link.is_none() || score > self.body_link_score {
            self.body_link = Some(link.to_string());
            self.body_link_score = score;
        }
    }
}
