//! Edge-case coverage for the masking primitives and configuration.
//!
//! These tests focus on behavior across Unicode scalar values, on malformed
//! positional bounds (which must leave values unchanged) and on configurations
//! that disable or replace the default pattern.

use outbound_mask::{
    mask_range, ApiResult, ConfigError, DataBase, History, Masker, MaskingConfig, PartialMask,
    ResponseInterceptor,
};

fn masker() -> Masker {
    Masker::new(&MaskingConfig::default()).unwrap()
}

// ============================================================================
// Full masking
// ============================================================================

#[test]
fn test_text_without_match_is_unchanged() {
    let masker = masker();
    for text in ["", "select 1", "'user'='root'", "password='x'", "'password'=''"] {
        assert_eq!(masker.mask_full(text), text);
    }
}

#[test]
fn test_every_occurrence_is_replaced() {
    let text = "'password'='a', 'url'='u', 'password' =  'b', 'password'='c'";
    let masked = masker().mask_full(text).into_owned();
    assert_eq!(masked.matches("'password'='******'").count(), 3);
    assert!(masked.contains("'url'='u'"));
    assert!(!masked.contains("'a'") && !masked.contains("'b'") && !masked.contains("'c'"));
}

#[test]
fn test_match_is_non_greedy() {
    assert_eq!(
        masker().mask_full("'password'='x' and 'k'='v'"),
        "'password'='******' and 'k'='v'"
    );
}

#[test]
fn test_full_masking_is_idempotent() {
    let masker = masker();
    let once = masker.mask_full("with ('password'='p1', 'password'='p2')").into_owned();
    let twice = masker.mask_full(&once).into_owned();
    assert_eq!(once, twice);
}

#[test]
fn test_mask_token_is_inserted_literally() {
    let config = MaskingConfig::default().with_mask_token("'password'='$1'");
    let masker = Masker::new(&config).unwrap();
    assert_eq!(masker.mask_full("'password'='x'"), "'password'='$1'");
}

#[test]
fn test_alternate_pattern() {
    let config = MaskingConfig::from_json_str(
        r#"{ "sensitive_pattern": "\"secret\"\\s*:\\s*\".*?\"", "mask_token": "\"secret\":\"***\"" }"#,
    )
    .unwrap();
    let masker = Masker::new(&config).unwrap();
    assert_eq!(
        masker.mask_full(r#"{"user":"a","secret": "b"}"#),
        r#"{"user":"a","secret":"***"}"#
    );
    // the default key is no longer sensitive
    assert_eq!(masker.mask_full("'password'='x'"), "'password'='x'");
}

#[test]
fn test_unset_token_disables_full_masking_only() {
    let config = MaskingConfig::from_json_str(r#"{ "mask_token": null }"#).unwrap();
    let masker = Masker::new(&config).unwrap();
    assert!(!masker.has_pattern());
    assert_eq!(masker.mask_full("'password'='x'"), "'password'='x'");
    assert_eq!(masker.mask_credential("abcdefgh12"), "ab****gh12");
}

#[test]
fn test_invalid_pattern_is_reported() {
    let config = MaskingConfig::default().with_pattern("'password'=(");
    match Masker::new(&config) {
        Err(ConfigError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "'password'=("),
        other => panic!("expected invalid pattern, got {other:?}"),
    }
}

#[test]
fn test_zero_denominator_is_reported() {
    let config = MaskingConfig::default().with_partial(PartialMask::new(2, 2, 0));
    assert!(matches!(
        ResponseInterceptor::new(&config),
        Err(ConfigError::InvalidPartialMask(_))
    ));
}

#[test]
fn test_malformed_document_is_reported() {
    assert!(matches!(
        MaskingConfig::from_json_str("{ not json"),
        Err(ConfigError::Parse(_))
    ));
}

// ============================================================================
// Positional masking
// ============================================================================

#[test]
fn test_invalid_bounds_leave_text_unchanged() {
    for (from, to) in [(0, 2), (2, 1), (2, 2), (1, 9), (3, 100)] {
        assert_eq!(mask_range("abcdefgh", from, to, '*'), "abcdefgh");
    }
}

#[test]
fn test_range_up_to_the_last_character() {
    assert_eq!(mask_range("abcdefgh", 1, 8, '*'), "a*******");
}

#[test]
fn test_partial_preserves_prefix_and_suffix() {
    let masker = masker();
    for text in ["abcdefgh12", "0123456789abcdef", "correcthorsebatterystaple"] {
        let masked = masker.mask_credential(text);
        let (from, to) = masker.partial().range_for(text.chars().count());
        assert_eq!(masked.chars().count(), text.chars().count());
        assert_eq!(&masked[..from], &text[..from]);
        assert_eq!(&masked[to..], &text[to..]);
        assert!(masked[from..to].chars().all(|c| c == '*'));
    }
}

#[test]
fn test_short_values_are_unchanged() {
    let masker = masker();
    // len 3 gives 2..2, len 2 gives 2..1
    for text in ["", "a", "ab", "abc"] {
        assert_eq!(masker.mask_credential(text), text);
    }
    assert_eq!(masker.mask_credential("abcd"), "abcd");
    assert_eq!(masker.mask_credential("abcdef"), "ab**ef");
}

#[test]
fn test_partial_counts_characters() {
    let masker = masker();
    assert_eq!(masker.mask_credential("пароль1234"), "па****1234");
    assert_eq!(masker.mask_credential("秘密数据秘密"), "秘密**秘密");
    assert_eq!(masker.mask_credential("ab🔒🔒🔒🔒gh12"), "ab****gh12");
}

#[test]
fn test_partial_masking_is_idempotent() {
    let masker = masker();
    let once = masker.mask_credential("abcdefgh12").into_owned();
    assert_eq!(masker.mask_credential(&once), once);
}

#[test]
fn test_custom_bounds_and_mask_char() {
    let config = MaskingConfig::default().with_partial(PartialMask::new(1, 1, 2).with_mask_char('#'));
    let masker = Masker::new(&config).unwrap();
    assert_eq!(masker.mask_credential("abcdefgh"), "a###efgh");
}

// ============================================================================
// Interceptor pass-through
// ============================================================================

#[test]
fn test_payloadless_envelopes_pass_through() {
    let interceptor = ResponseInterceptor::new(&MaskingConfig::default()).unwrap();
    let response = interceptor.intercept(ApiResult::failed("no such job").into());
    let result = response.as_api().unwrap();
    assert!(result.datas.is_none());
    assert_eq!(result.msg.as_deref(), Some("no such job"));

    let response = interceptor.intercept(ApiResult::succeed_msg("saved").into());
    assert!(response.as_api().unwrap().datas.is_none());
}

#[test]
fn test_lookalike_types_are_not_masked() {
    let interceptor = ResponseInterceptor::new(&MaskingConfig::default()).unwrap();
    let statements = vec!["'password'='x'".to_string()];
    let response = interceptor.intercept(ApiResult::succeed(statements, "ok").into());
    assert_eq!(
        response
            .as_api()
            .and_then(|r| r.datas_ref::<Vec<String>>())
            .map(|s| s[0].as_str()),
        Some("'password'='x'")
    );

    // boxed records are a different type than the record itself
    let boxed = Box::new(History {
        statement: Some("'password'='x'".into()),
        ..History::default()
    });
    let response = interceptor.intercept(ApiResult::succeed(boxed, "ok").into());
    let history = response
        .as_api()
        .and_then(|r| r.datas_ref::<Box<History>>())
        .unwrap();
    assert_eq!(history.statement.as_deref(), Some("'password'='x'"));
}

#[test]
fn test_absent_fields_stay_absent() {
    let interceptor = ResponseInterceptor::new(&MaskingConfig::default()).unwrap();
    let response = interceptor.intercept(ApiResult::succeed(DataBase::default(), "ok").into());
    let database = response
        .as_api()
        .and_then(|r| r.datas_ref::<DataBase>())
        .unwrap();
    assert_eq!(database, &DataBase::default());
}

// ============================================================================
// Debug output
// ============================================================================

#[cfg(not(feature = "testing"))]
#[test]
fn test_debug_hides_text_but_walks_nested_records() {
    use outbound_mask::JobInfoDetail;

    let detail = JobInfoDetail {
        id: Some(41),
        history: Some(History {
            id: Some(7),
            job_id: Some("job-7".into()),
            statement: Some("'password'='hunter2'".into()),
            ..History::default()
        }),
        ..JobInfoDetail::default()
    };
    let rendered = format!("{detail:?}");
    assert!(rendered.contains("job-7"));
    assert!(rendered.contains("statement: \"[MASKED]\""));
    assert!(!rendered.contains("hunter2"));
}
