use super::*;
use voicepath_protocols::ActionKind;

fn profile() -> UserProfile {
    UserProfile {
        name: Some("홍길동".into()),
        birth_date: Some("1990-01-15".into()),
        phone_number: Some("010-1234-5678".into()),
    }
}

fn input(selectors: &[&str], labels: &[&str]) -> Step {
    Step::new(
        0,
        "https://gov.example.kr/apply",
        ActionKind::Input,
        selectors.to_vec(),
    )
    .with_text_labels(labels.iter().copied())
}

#[test]
fn test_name_from_label() {
    let step = input(&["#field1"], &["성명"]);
    assert_eq!(AutoFillResolver::detect_family(&step), Some(FieldFamily::Name));
    assert_eq!(
        AutoFillResolver::resolve(&step, &profile()).as_deref(),
        Some("홍길동")
    );
}

#[test]
fn test_birth_date_normalized() {
    let step = input(&["input#dob"], &[]);
    assert_eq!(
        AutoFillResolver::resolve(&step, &profile()).as_deref(),
        Some("19900115")
    );
}

#[test]
fn test_attribute_key_is_not_a_name_hint() {
    let step = input(&["input[name='mobile_no']"], &[]);
    assert_eq!(AutoFillResolver::detect_family(&step), Some(FieldFamily::Phone));
    assert_eq!(
        AutoFillResolver::resolve(&step, &profile()).as_deref(),
        Some("01012345678")
    );
}

#[test]
fn test_phone_rest_segment() {
    let step = input(&["input[name='phone2']"], &["뒤 4자리"]);
    assert_eq!(
        AutoFillResolver::resolve(&step, &profile()).as_deref(),
        Some("12345678")
    );
}

#[test]
fn test_phone_first_and_middle_segments() {
    let first = input(&["#tel1"], &["앞자리"]);
    assert_eq!(
        AutoFillResolver::resolve(&first, &profile()).as_deref(),
        Some("010")
    );

    let middle = input(&["#tel2"], &["가운데"]);
    assert_eq!(
        AutoFillResolver::resolve(&middle, &profile()).as_deref(),
        Some("1234")
    );
}

#[test]
fn test_phone_hyphenated() {
    let step = input(&["#contact"], &["연락처 (- 포함)"]);
    assert_eq!(
        AutoFillResolver::resolve(&step, &profile()).as_deref(),
        Some("010-1234-5678")
    );
}

#[test]
fn test_phone_hyphen_forbidden_by_hint() {
    for label in [
        "휴대폰 번호 ('-' 없이 숫자만 입력)",
        "연락처 (하이픈 제외)",
        "Phone number without hyphens",
    ] {
        let step = input(&["#phone"], &[label]);
        assert_eq!(
            AutoFillResolver::resolve(&step, &profile()).as_deref(),
            Some("01012345678"),
            "{}",
            label
        );
    }
}

#[test]
fn test_phone_dash_in_label_alone_is_not_a_format_request() {
    let step = input(&["#phone"], &["휴대폰 - 본인 명의"]);
    assert_eq!(
        AutoFillResolver::resolve(&step, &profile()).as_deref(),
        Some("01012345678")
    );
}

#[test]
fn test_invalid_profile_values_yield_none() {
    let profile = UserProfile {
        name: Some("  ".into()),
        birth_date: Some("90-1-15".into()),
        phone_number: Some("1234".into()),
    };

    assert_eq!(AutoFillResolver::resolve(&input(&["#n"], &["이름"]), &profile), None);
    assert_eq!(AutoFillResolver::resolve(&input(&["#b"], &["생일"]), &profile), None);
    assert_eq!(AutoFillResolver::resolve(&input(&["#p"], &["phone"]), &profile), None);
}

#[test]
fn test_unrelated_or_non_input_steps() {
    let unrelated = input(&["#search"], &["검색어"]);
    assert_eq!(AutoFillResolver::detect_family(&unrelated), None);
    assert_eq!(AutoFillResolver::resolve(&unrelated, &profile()), None);

    let click = Step::new(0, "", ActionKind::Click, ["#phone"]);
    assert_eq!(AutoFillResolver::resolve(&click, &profile()), None);
}
