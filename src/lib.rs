// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Unsubscribe Extractor
//!
//! A library for finding out whether — and how — a recipient can
//! unsubscribe from a bulk email: `List-Unsubscribe`-family headers,
//! scored HTML body links, and mailto actions, plus per-sender scan
//! aggregation and action planning on top.
//!
//! # Features
//!
//! - Priority-ordered `List-Unsubscribe` header parsing (RFC 2369/8058)
//! - HTML body anchor scoring with a raw-markup fallback
//! - One-click / browser-link / mailto action classification
//! - Provider wire-format and raw RFC 822 ingestion
//! - Pure, synchronous extraction; safe to call concurrently
//!
//! # Example
//!
//! ```rust
//! use unsub_extract::{Message, extract_unsubscribe};
//!
//! let message = Message::new(
//!     "m1",
//!     vec![(
//!         "List-Unsubscribe".to_string(),
//!         "<mailto:leave@news.example>, <https://news.example/u/42>".to_string(),
//!     )],
//! );
//! let result = extract_unsubscribe(&message);
//!
//! assert_eq!(result.header_link.as_deref(), Some("https://news.example/u/42"));
//! assert_eq!(result.mailto_link.as_deref(), Some("mailto:leave@news.example"));
//! ```

mod action;
mod body;
mod error;
mod extract;
mod scan;
mod types;
mod wire;

pub use action::{MailtoMessage, UnsubscribeAction, plan_action};
pub use error::{ExtractError, Result};
pub use extract::extract_unsubscribe;
pub use scan::*;
pub use types::*;
pub use wire::*;
