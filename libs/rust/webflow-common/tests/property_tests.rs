//! Property-based tests for webflow-common crate.
//!
//! These tests verify universal properties across all inputs using proptest.

use proptest::prelude::*;
use std::time::Duration;
use webflow_common::credential::{EMPTY_MARKER, REDACTED};
use webflow_common::{ApiError, Credential, RetryPolicy, redact, safe_field, truncate_for_logging};

// **Property 1: Credential Redaction**
// *For any* credential value, redaction never yields the value itself unless it
// is empty; empty values redact to a distinct marker.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_redaction_never_reveals_value(token in "[A-Za-z0-9_\\-]{1,80}") {
        let redacted = redact(&token);
        prop_assert_ne!(redacted, token.as_str());
        prop_assert_eq!(redacted, REDACTED);
    }

    #[test]
    fn prop_credential_debug_never_contains_token(token in "[A-Za-z0-9]{10,64}") {
        let credential = Credential::new(token.clone()).unwrap();
        let debug = format!("{credential:?}");
        prop_assert!(!debug.contains(&token));
        prop_assert_eq!(credential.redacted(), REDACTED);
    }

    #[test]
    fn prop_sensitive_fields_redacted(
        prefix in "[a-z]{0,8}",
        value in "[A-Za-z0-9]{1,40}",
    ) {
        let name = format!("{prefix}Token");
        prop_assert_eq!(safe_field(&name, &value), REDACTED);
    }
}

#[test]
fn test_empty_redacts_to_marker() {
    assert_eq!(redact(""), EMPTY_MARKER);
    assert_ne!(EMPTY_MARKER, REDACTED);
}

// **Property 2: Exponential Backoff Formula**
// *For any* attempt `n` with base delay `d` and max delay `M`, the computed delay
// equals min(M, d * 2^n).
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_delay_matches_formula(
        base_ms in 1u64..2_000,
        max_ms in 1u64..60_000,
        attempt in 0u32..16,
    ) {
        let policy = RetryPolicy::new(
            3,
            Duration::from_millis(base_ms),
            Duration::from_millis(max_ms),
        );
        let expected = Duration::from_millis((base_ms << attempt).min(max_ms));
        prop_assert_eq!(policy.delay_for_attempt(attempt), expected);
    }

    #[test]
    fn prop_delay_never_exceeds_max(
        base_ms in 1u64..10_000,
        max_ms in 1u64..60_000,
        attempt in any::<u32>(),
    ) {
        let policy = RetryPolicy::new(3, Duration::from_millis(base_ms), Duration::from_millis(max_ms));
        prop_assert!(policy.delay_for_attempt(attempt) <= Duration::from_millis(max_ms));
    }
}

// **Property 3: Retry-After Override**
// *For any* valid server hint no larger than the max delay, the hint replaces the
// computed backoff exactly; invalid hints fall back to the backoff.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_valid_hint_overrides_exactly(
        hint_secs in 1u64..=30,
        attempt in 0u32..8,
    ) {
        let policy = RetryPolicy::default();
        let hint = hint_secs.to_string();
        prop_assert_eq!(
            policy.delay_with_hint(attempt, Some(&hint)),
            Duration::from_secs(hint_secs)
        );
    }

    #[test]
    fn prop_invalid_hint_falls_back(
        hint in prop_oneof![
            Just("0".to_string()),
            "-[1-9][0-9]{0,3}",
            "[a-zA-Z ]{1,12}",
            "[0-9]{1,2}\\.[0-9]",
        ],
        attempt in 0u32..8,
    ) {
        let policy = RetryPolicy::default();
        prop_assert_eq!(
            policy.delay_with_hint(attempt, Some(&hint)),
            policy.delay_for_attempt(attempt)
        );
    }
}

// **Property 4: Error Classification Preserves Diagnostics**
// *For any* non-success status and body, the classified error keeps both.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_classification_preserves_status_and_body(
        status in 400u16..600,
        body in "[a-zA-Z0-9 {}:\",]{0,64}",
    ) {
        let err = ApiError::from_status(status, body.clone());
        prop_assert_eq!(err.status(), status);
        prop_assert_eq!(err.body(), body.as_str());
        prop_assert!(!err.to_string().is_empty());
    }

    #[test]
    fn prop_truncation_is_bounded(value in ".{0,200}", max in 1usize..100) {
        let truncated = truncate_for_logging(&value, max);
        prop_assert!(truncated.chars().count() <= max + 3);
    }
}
