use unsub_extract::{Message, extract_unsubscribe};

fn html_message(html: &str) -> Message {
    Message::with_html("test", vec![], html)
}

#[test]
fn test_unsubscribe_anchor_with_tracking_url() {
    // +10 anchor text, +5 unsubscribe keyword, -5 tracking penalty
    let message = html_message(r#"<a href="http://track.me/x">unsubscribe</a>"#);
    let result = extract_unsubscribe(&message);

    assert_eq!(result.body_link.as_deref(), Some("http://track.me/x"));
    assert_eq!(result.body_link_score, 10);
}

#[test]
fn test_anchor_without_signal_yields_nothing() {
    let message = html_message(r#"<a href="http://site.com/go">click here</a>"#);
    let result = extract_unsubscribe(&message);

    assert!(result.body_link.is_none());
    assert_eq!(result.body_link_score, 0);
}

#[test]
fn test_clean_unsubscribe_anchor() {
    let message = html_message(
        r#"<html><body><p>You get this because you signed up.</p>
        <a href="https://news.example/unsub?u=9">Unsubscribe</a></body></html>"#,
    );
    let result = extract_unsubscribe(&message);

    assert_eq!(
        result.body_link.as_deref(),
        Some("https://news.example/unsub?u=9")
    );
    assert_eq!(result.body_link_score, 15);
}

#[test]
fn test_opt_out_anchor() {
    let message = html_message(r#"<a href="https://x.com/go">Opt out of these emails</a>"#);
    let result = extract_unsubscribe(&message);

    assert_eq!(result.body_link.as_deref(), Some("https://x.com/go"));
    assert_eq!(result.body_link_score, 8);
}

#[test]
fn test_cancel_subscription_anchor() {
    let message = html_message(r#"<a href="https://x.com/go">Cancel your subscription</a>"#);
    let result = extract_unsubscribe(&message);

    assert_eq!(result.body_link_score, 7);
}

#[test]
fn test_manage_preferences_anchor() {
    // +5 for the text, +3 for the preference keyword in the anchor
    let message = html_message(r#"<a href="https://x.com/preferences">Manage preferences</a>"#);
    let result = extract_unsubscribe(&message);

    assert_eq!(result.body_link.as_deref(), Some("https://x.com/preferences"));
    assert_eq!(result.body_link_score, 8);
}

#[test]
fn test_highest_score_wins() {
    let message = html_message(
        r#"<a href="https://x.com/prefs">Manage preferences</a>
        <a href="https://x.com/unsub">Unsubscribe</a>"#,
    );
    let result = extract_unsubscribe(&message);

    assert_eq!(result.body_link.as_deref(), Some("https://x.com/unsub"));
    assert_eq!(result.body_link_score, 15);
}

#[test]
fn test_tie_keeps_first_in_document_order() {
    let message = html_message(
        r#"<a href="https://a.example/unsub">Unsubscribe</a>
        <a href="https://b.example/unsub">Unsubscribe</a>"#,
    );
    let result = extract_unsubscribe(&message);

    assert_eq!(result.body_link.as_deref(), Some("https://a.example/unsub"));
}

#[test]
fn test_relative_hrefs_are_skipped() {
    let message = html_message(r#"<a href="/unsubscribe">unsubscribe</a>"#);
    let result = extract_unsubscribe(&message);

    assert!(result.body_link.is_none());
}

#[test]
fn test_tracking_only_anchor_stays_negative() {
    let message = html_message(r#"<a href="https://t.example/track?m=1">View in browser</a>"#);
    let result = extract_unsubscribe(&message);

    assert!(result.body_link.is_none());
    assert_eq!(result.body_link_score, 0);
}

#[test]
fn test_fallback_finds_href_outside_anchors() {
    // The only anchor is a penalized tracking link; the unsubscribe href
    // lives on a <link> element the anchor pass cannot see.
    let message = html_message(
        r#"<html><head><link href="https://news.example/unsubscribe?u=1"></head>
        <body><a href="https://img.example/track/open.gif">View online</a></body></html>"#,
    );
    let result = extract_unsubscribe(&message);

    assert_eq!(
        result.body_link.as_deref(),
        Some("https://news.example/unsubscribe?u=1")
    );
    assert_eq!(result.body_link_score, 2);
}

#[test]
fn test_fallback_pattern_order() {
    // No "unsubscribe" href anywhere, so the opt-out pattern is next.
    let message = html_message(
        r#"<link href="https://x.com/preferences/1">
        <link href="https://x.com/optout/2">"#,
    );
    let result = extract_unsubscribe(&message);

    assert_eq!(result.body_link.as_deref(), Some("https://x.com/optout/2"));
    assert_eq!(result.body_link_score, 2);
}

#[test]
fn test_weak_anchor_kept_when_fallback_finds_nothing() {
    let message = html_message(r#"<a href="https://x.com/preference-center">Your options</a>"#);
    let result = extract_unsubscribe(&message);

    assert_eq!(
        result.body_link.as_deref(),
        Some("https://x.com/preference-center")
    );
    assert_eq!(result.body_link_score, 3);
}

#[test]
fn test_confident_anchor_skips_fallback() {
    // The anchor is confident, so the <link> href must not replace it.
    let message = html_message(
        r#"<link href="https://other.example/unsubscribe">
        <a href="https://news.example/unsub">Unsubscribe</a>"#,
    );
    let result = extract_unsubscribe(&message);

    assert_eq!(result.body_link.as_deref(), Some("https://news.example/unsub"));
    assert_eq!(result.body_link_score, 15);
}

#[test]
fn test_no_html_body_no_body_link() {
    let message = Message::new("test", vec![]);
    let result = extract_unsubscribe(&message);

    assert!(result.body_link.is_none());
}

#[test]
fn test_body_and_header_coexist() {
    let message = Message::with_html(
        "test",
        vec![(
            "List-Unsubscribe".to_string(),
            "<https://hdr.example/u>".to_string(),
        )],
        r#"<a href="https://body.example/unsub">Unsubscribe</a>"#,
    );
    let result = extract_unsubscribe(&message);

    assert_eq!(result.header_link.as_deref(), Some("https://hdr.example/u"));
    assert_eq!(result.body_link.as_deref(), Some("https://body.example/unsub"));
}

#[test]
fn test_broken_markup_degrades_gracefully() {
    let message = html_message("<a href=<<<>>> <div <span");
    let result = extract_unsubscribe(&message);

    assert!(result.body_link.is_none());
}
