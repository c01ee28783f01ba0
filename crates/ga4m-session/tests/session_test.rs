use chrono::{DateTime, Utc};
use ga4m_session::{latest, parse_session, session_from_cookies, Session};
use proptest::prelude::*;

/// Epoch seconds comfortably in the past for any test run.
const PAST_EPOCH: i64 = 1_726_969_270;

fn past_time() -> DateTime<Utc> {
    DateTime::from_timestamp(PAST_EPOCH, 0).unwrap()
}

// ── Client cookie grammar ─────────────────────────────────────────────────

#[test]
fn canonical_client_cookie_parses_fully() {
    let session = parse_session("GA1.1.476555468.1726969270", "");

    assert_eq!(session.client_id, "476555468.1726969270");
    assert_eq!(session.client_version, "1");
    assert_eq!(session.first_visit, Some(past_time()));
}

#[test]
fn client_cookie_with_extra_fields_anchors_on_last_two() {
    // Some deployments prepend fields; positions 2 and 3 are not reliable.
    let session = parse_session("GA1.2.extra.476555468.1726969270", "");

    assert_eq!(session.client_id, "476555468.1726969270");
    assert_eq!(session.client_version, "2");
    assert_eq!(session.first_visit, Some(past_time()));
}

#[test]
fn client_cookie_future_epoch_keeps_id_but_drops_first_visit() {
    let future = Utc::now().timestamp() + 86_400;
    let session = parse_session(&format!("GA1.1.476555468.{future}"), "");

    assert_eq!(session.client_id, format!("476555468.{future}"));
    assert_eq!(session.first_visit, None);
}

#[test]
fn client_cookie_nonpositive_epoch_drops_first_visit() {
    let zero = parse_session("GA1.1.476555468.0", "");
    assert_eq!(zero.client_id, "476555468.0");
    assert_eq!(zero.first_visit, None);

    let negative = parse_session("GA1.1.476555468.-5", "");
    assert_eq!(negative.client_id, "476555468.-5");
    assert_eq!(negative.first_visit, None);
}

#[test]
fn client_cookie_below_minimum_fields_contributes_nothing() {
    let session = parse_session("GA1.1.476555468", "");
    assert!(session.is_empty());
}

#[test]
fn client_cookie_wrong_prefix_contributes_nothing() {
    let session = parse_session("XX1.1.476555468.1726969270", "");
    assert!(session.is_empty());
}

// ── Session cookie grammar ────────────────────────────────────────────────

#[test]
fn canonical_session_cookie_parses_fully() {
    let session = parse_session("", &format!("GS1.1.1731019235.3.1.{PAST_EPOCH}.5.0.1"));

    assert_eq!(session.session_version, "1");
    assert_eq!(session.session_id, "1731019235");
    assert_eq!(session.session_count, 3);
    assert!(session.is_engaged);
    assert_eq!(session.last_session, Some(past_time()));
    assert_eq!(session.hit_count, 5);
    assert!(!session.is_first_session);
    assert!(session.is_new_session);
}

#[test]
fn session_cookie_fields_degrade_independently() {
    // Non-numeric count and hit count are skipped; the rest still parse.
    let session = parse_session("", &format!("GS1.1.sid123.bogus.1.{PAST_EPOCH}.nope.1.0"));

    assert_eq!(session.session_id, "sid123");
    assert_eq!(session.session_count, 0);
    assert_eq!(session.hit_count, 0);
    assert!(session.is_engaged);
    assert!(session.is_first_session);
    assert!(!session.is_new_session);
    assert_eq!(session.last_session, Some(past_time()));
}

#[test]
fn session_cookie_future_epoch_drops_last_session() {
    let future = Utc::now().timestamp() + 86_400;
    let session = parse_session("", &format!("GS1.1.sid.1.1.{future}.0.0.0"));

    assert_eq!(session.session_id, "sid");
    assert_eq!(session.last_session, None);
}

#[test]
fn session_cookie_below_minimum_fields_contributes_nothing() {
    // 8 fields: no partial positional parsing below the threshold.
    let session = parse_session("", "GS1.1.sid.1.1.1726969270.0.0");
    assert!(session.is_empty());
}

#[test]
fn session_cookie_wrong_prefix_contributes_nothing() {
    let session = parse_session("", &format!("GA1.1.sid.1.1.{PAST_EPOCH}.0.0.0"));
    assert!(session.is_empty());
}

#[test]
fn negative_counts_are_skipped() {
    let session = parse_session("", &format!("GS1.1.sid.-2.1.{PAST_EPOCH}.-7.0.0"));

    assert_eq!(session.session_count, 0);
    assert_eq!(session.hit_count, 0);
}

#[test]
fn both_cookies_combine_into_one_session() {
    let session = parse_session(
        "GA1.1.476555468.1726969270",
        &format!("GS1.1.1731019235.3.1.{PAST_EPOCH}.5.0.1"),
    );

    assert_eq!(session.client_id, "476555468.1726969270");
    assert_eq!(session.session_id, "1731019235");
}

#[test]
fn empty_inputs_yield_the_empty_session() {
    let session = parse_session("", "");
    assert_eq!(session, Session::default());
    assert!(session.is_empty());
}

// ── Latest-session selection ──────────────────────────────────────────────

#[test]
fn latest_of_empty_slice_is_the_empty_session() {
    assert!(latest(&[]).is_empty());
}

#[test]
fn latest_of_one_returns_it_unchanged() {
    let session = parse_session("GA1.1.476555468.1726969270", "");
    assert_eq!(latest(std::slice::from_ref(&session)), session);
}

#[test]
fn latest_prefers_strictly_greater_last_session() {
    let older = Session {
        session_id: "old".to_string(),
        last_session: DateTime::from_timestamp(PAST_EPOCH - 100, 0),
        ..Session::default()
    };
    let newer = Session {
        session_id: "new".to_string(),
        last_session: DateTime::from_timestamp(PAST_EPOCH, 0),
        ..Session::default()
    };

    assert_eq!(latest(&[older.clone(), newer.clone()]).session_id, "new");
    assert_eq!(latest(&[newer, older]).session_id, "new");
}

#[test]
fn latest_tie_keeps_the_earliest_indexed() {
    let first = Session {
        session_id: "first".to_string(),
        last_session: DateTime::from_timestamp(PAST_EPOCH, 0),
        ..Session::default()
    };
    let second = Session {
        session_id: "second".to_string(),
        last_session: DateTime::from_timestamp(PAST_EPOCH, 0),
        ..Session::default()
    };

    assert_eq!(latest(&[first, second]).session_id, "first");
}

#[test]
fn latest_with_no_timestamps_keeps_the_first() {
    let a = Session {
        session_id: "a".to_string(),
        ..Session::default()
    };
    let b = Session {
        session_id: "b".to_string(),
        ..Session::default()
    };

    assert_eq!(latest(&[a, b]).session_id, "a");
}

// ── Cookie-jar selection ──────────────────────────────────────────────────

#[test]
fn from_cookies_picks_ga_and_first_prefixed_session_cookie() {
    let first_session = format!("GS1.1.first.1.1.{PAST_EPOCH}.0.0.0");
    let second_session = format!("GS1.1.second.1.1.{PAST_EPOCH}.0.0.0");
    let cookies = [
        ("other", "irrelevant"),
        ("_ga_AAAA", first_session.as_str()),
        ("_ga", "GA1.1.476555468.1726969270"),
        ("_ga_BBBB", second_session.as_str()),
    ];

    let session = session_from_cookies(cookies);

    assert_eq!(session.client_id, "476555468.1726969270");
    assert_eq!(session.session_id, "first");
}

#[test]
fn from_cookies_without_analytics_cookies_is_empty() {
    let session = session_from_cookies([("theme", "dark"), ("lang", "en")]);
    assert!(session.is_empty());
}

// ── Totality over arbitrary input ─────────────────────────────────────────

proptest! {
    #[test]
    fn parse_never_panics_on_arbitrary_input(client in ".*", session in ".*") {
        let _ = parse_session(&client, &session);
    }

    #[test]
    fn well_formed_client_cookies_always_yield_identity(
        id in 1u32..u32::MAX,
        epoch in 1i64..1_600_000_000,
    ) {
        let session = parse_session(&format!("GA1.1.{id}.{epoch}"), "");
        prop_assert_eq!(session.client_id, format!("{id}.{epoch}"));
        prop_assert_eq!(session.first_visit, DateTime::from_timestamp(epoch, 0));
    }
}
