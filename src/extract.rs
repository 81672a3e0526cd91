//! Unsubscribe mechanism extraction

use crate::body;
use crate::types::{ExtractionResult, Message};
use tracing::debug;

/// Header names carrying machine-actionable unsubscribe URIs, in priority
/// order (RFC 2369/8058 plus the legacy `X-` variant).
const HEADER_PRIORITY: [&str; 3] = [
    "List-Unsubscribe",
    "X-List-Unsubscribe",
    "List-Unsubscribe-Post",
];

/// Extract every unsubscribe mechanism from one message.
///
/// Pure and synchronous: no I/O, no shared state, safe to call from any
/// number of threads on independent messages. Malformed headers or markup
/// degrade to empty slots; this function never fails.
///
/// The body pass runs whenever a decoded HTML body is present, even when
/// the headers already produced a link, so callers can apply their own
/// preference between the slots.
#[must_use]
pub fn extract_unsubscribe(message: &Message) -> ExtractionResult {
    let mut result = ExtractionResult::default();

    scan_headers(message, &mut result);

    if let Some(html) = message.html.as_deref()
        && let Some((url, score)) = body::find_body_link(html)
    {
        result.offer_body_link(&url, score);
    }

    debug!(
        "Extraction for {}: header={} mailto={} body={} (score {})",
        message.id,
        result.header_link.is_some(),
        result.mailto_link.is_some(),
        result.body_link.is_some(),
        result.body_link_score
    );

    result
}

/// Walk the header family in priority order.
///
/// An HTTP(S) hit ends the scan immediately; a mailto-only hit is kept as
/// fallback while later names are still consulted for an HTTP link.
fn scan_headers(message: &Message, result: &mut ExtractionResult) {
    for name in HEADER_PRIORITY {
        for value in message.headers_named(name) {
            parse_header_value(value, result);
            if result.header_link.is_some() {
                return;
            }
        }
    }
}

/// Parse one comma-separated header value into the result slots.
///
/// Parts that match none of the URI shapes are skipped, not errors.
fn parse_header_value(value: &str, result: &mut ExtractionResult) {
    for part in value.split(',') {
        let part = part.trim();

        if let Some(idx) = part.find("<mailto:") {
            if let Some(uri) = bracketed(&part[idx..]) {
                result.offer_mailto_link(uri);
            }
        } else if let Some(idx) = part.find("<http") {
            if let Some(uri) = bracketed(&part[idx..]) {
                result.offer_header_link(uri);
            }
        } else if part.starts_with("http") {
            result.offer_header_link(part);
        } else if part.starts_with("mailto:") {
            result.offer_mailto_link(part);
        }
    }
}

/// Substring strictly between the leading `<` and the first `>` after it.
///
/// Unbalanced or empty brackets yield `None` so the caller skips the part.
fn bracketed(part: &str) -> Option<&str> {
    let start = part.find('<')? + 1;
    let end = part[start..].find('>')? + start;
    (end > start).then_some(&part[start..end])
}
