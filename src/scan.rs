//! Inbox scanning: per-sender aggregation of extraction results

use crate::action::{UnsubscribeAction, plan_action};
use crate::extract::extract_unsubscribe;
use crate::types::{ExtractionResult, Message, Sender};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Search terms that surface bulk mail with unsubscribe options
const SEARCH_TERMS: [&str; 8] = [
    "unsubscribe",
    "\"manage subscriptions\"",
    "\"email preferences\"",
    "\"click here to unsubscribe\"",
    "\"opt-out\"",
    "\"update preferences\"",
    "\"manage your account\"",
    "newsletter",
];

/// Explicit scan configuration, passed to every call site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOptions {
    /// Upper bound on messages examined in one scan
    pub max_messages: usize,

    /// Terms OR-combined into the provider search query
    pub search_terms: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_messages: 50,
            search_terms: SEARCH_TERMS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl ScanOptions {
    /// Provider search query matching any of the configured terms
    #[must_use]
    pub fn search_query(&self) -> String {
        self.search_terms.join(" OR ")
    }
}

/// One message with at least one unsubscribe mechanism
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanEntry {
    /// Provider message id, for archive or follow-up calls
    pub message_id: String,

    pub subject: String,

    /// `Date` header, when present and parseable
    pub date: Option<DateTime<Utc>>,

    /// Planned action under the default preference policy
    pub action: UnsubscribeAction,

    /// Full extraction result, for callers with their own policy
    pub extraction: ExtractionResult,
}

/// All matched messages from one sender
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenderGroup {
    pub sender: Sender,
    pub entries: Vec<ScanEntry>,
}

/// Outcome of scanning a batch of messages
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanReport {
    /// Sender groups in first-seen order
    pub groups: Vec<SenderGroup>,

    /// Messages examined
    pub scanned: usize,

    /// Messages with at least one mechanism
    pub matched: usize,
}

/// Scan a batch of already-fetched messages and group the hits by sender.
///
/// Fetching, pagination, and any follow-up calls stay with the caller;
/// this function is pure. At most `options.max_messages` messages are
/// examined.
pub fn scan_messages<I>(messages: I, options: &ScanOptions) -> ScanReport
where
    I: IntoIterator<Item = Message>,
{
    let mut report = ScanReport::default();

    for message in messages.into_iter().take(options.max_messages) {
        report.scanned += 1;

        let extraction = extract_unsubscribe(&message);
        if extraction.is_empty() {
            continue;
        }
        report.matched += 1;

        let sender = message
            .header("from")
            .map_or_else(Sender::unknown, Sender::parse);
        let subject = message
            .header("subject")
            .unwrap_or("No Subject")
            .to_string();
        let date = message
            .header("date")
            .and_then(|d| DateTime::parse_from_rfc2822(d).ok())
            .map(|dt| dt.with_timezone(&Utc));
        let action = plan_action(&message, &extraction);

        let entry = ScanEntry {
            message_id: message.id,
            subject,
            date,
            action,
            extraction,
        };

        match report
            .groups
            .iter()
            .position(|g| g.sender.display == sender.display)
        {
            Some(i) => report.groups[i].entries.push(entry),
            None => report.groups.push(SenderGroup {
                sender,
                entries: vec![entry],
            }),
        }
    }

    debug!(
        "Scan finished: {} of {} messages carried unsubscribe mechanisms",
        report.matched, report.scanned
    );

    report
}