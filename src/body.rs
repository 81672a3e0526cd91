//! Body-based link discovery: anchor scoring with a raw-HTML fallback

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

/// Score at which a candidate is trusted enough to stop the strategy chain
const CONFIDENT_SCORE: i32 = 5;

/// Fixed score carried by raw-HTML fallback matches
const FALLBACK_SCORE: i32 = 2;

static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("a[href]").expect("Failed to parse anchor selector - this is a bug")
});

/// Ordered fallback patterns; the first one with a match wins
static FALLBACK_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r#"(?i)href=["'](https?://[^"']*unsubscribe[^"']*)["']"#).unwrap(),
        Regex::new(r#"(?i)href=["'](https?://[^"']*opt-?out[^"']*)["']"#).unwrap(),
        Regex::new(r#"(?i)href=["'](https?://[^"']*preferences[^"']*)["']"#).unwrap(),
    ]
});

#[derive(Debug, Clone)]
struct ScoredLink {
    url: String,
    score: i32,
}

type Strategy = fn(&str) -> Option<ScoredLink>;

/// Discovery strategies in preference order; a later strategy only runs
/// when the chain has not yet produced a confident candidate, and its
/// match supersedes a weaker earlier one.
const STRATEGIES: &[Strategy] = &[score_anchors, fallback_scan];

/// Find the best unsubscribe candidate in an HTML body.
///
/// Returns the winning URL with its score, or `None` when nothing scored
/// above zero. Never fails: unparseable markup simply yields no candidate.
pub(crate) fn find_body_link(html: &str) -> Option<(String, u32)> {
    let mut best: Option<ScoredLink> = None;

    for strategy in STRATEGIES {
        if best.as_ref().is_some_and(|b| b.score >= CONFIDENT_SCORE) {
            break;
        }
        if let Some(candidate) = strategy(html) {
            best = Some(candidate);
        }
    }

    best.filter(|c| c.score > 0)
        .and_then(|c| u32::try_from(c.score).ok().map(|score| (c.url, score)))
}

/// Score every absolute-HTTP(S) anchor and keep the strict maximum.
///
/// Ties keep the first anchor in document order.
fn score_anchors(html: &str) -> Option<ScoredLink> {
    let document = Html::parse_document(html);
    let mut best: Option<ScoredLink> = None;

    for element in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if !href.starts_with("http://") && !href.starts_with("https://") {
            continue;
        }

        let text: String = element.text().collect();
        let score = score_anchor(&text, href);

        if best.as_ref().is_none_or(|b| score > b.score) {
            best = Some(ScoredLink {
                url: href.to_string(),
                score,
            });
        }
    }

    best
}

fn score_anchor(text: &str, href: &str) -> i32 {
    let text = text.to_lowercase();
    let href = href.to_lowercase();
    // URL keyword rules run over the whole anchor, text included:
    // redirector hrefs often carry no keyword while the visible text does.
    let anchor = format!("{text} {href}");

    let mut score = 0;

    if text.contains("unsubscribe") {
        score += 10;
    }
    if text.contains("opt out") || text.contains("opt-out") {
        score += 8;
    }
    if text.contains("cancel") && (text.contains("subscription") || text.contains("newsletter")) {
        score += 7;
    }
    if text.contains("preferences") || text.contains("manage") {
        score += 5;
    }

    if anchor.contains("unsubscribe") {
        score += 5;
    }
    if anchor.contains("opt-out") || anchor.contains("optout") {
        score += 4;
    }
    if anchor.contains("preference") {
        score += 3;
    }
    if anchor.contains("webhook") || anchor.contains("callback") || anchor.contains("track") {
        score -= 5;
    }

    score
}

/// Raw-HTML href scan for messages whose anchors carried no usable signal
fn fallback_scan(html: &str) -> Option<ScoredLink> {
    FALLBACK_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| ScoredLink {
                url: m.as_str().to_string(),
                score: FALLBACK_SCORE,
            })
    })
}
