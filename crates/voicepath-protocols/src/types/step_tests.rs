use super::*;

#[test]
fn test_click_without_selectors_gets_sentinel() {
    let step = Step::new(0, "https://a.com", ActionKind::Click, Vec::<String>::new());
    assert_eq!(step.selectors(), &[SENTINEL_SELECTOR.to_string()]);
}

#[test]
fn test_blank_selectors_are_dropped() {
    let step = Step::new(0, "https://a.com", ActionKind::Input, vec!["", "  ", "#q"]);
    assert_eq!(step.selectors(), &["#q".to_string()]);
}

#[test]
fn test_navigate_keeps_empty_selectors() {
    let step = Step::new(0, "https://a.com", ActionKind::Navigate, Vec::<String>::new());
    assert!(step.selectors().is_empty());
}

#[test]
fn test_flags_follow_action() {
    let input = Step::new(0, "", ActionKind::Input, vec!["#a"]);
    assert!(input.is_input());
    assert!(!input.should_wait());

    let wait = Step::new(1, "", ActionKind::Wait, Vec::<String>::new());
    assert!(wait.should_wait());
    assert!(!wait.is_input());
}

#[test]
fn test_hint_text_lowercases_and_joins() {
    let step = Step::new(0, "", ActionKind::Input, vec!["#a"])
        .with_text_labels(vec!["Phone", "Last 4"]);
    assert_eq!(step.hint_text(), "phone last 4");
}

#[test]
fn test_display_label_falls_back_to_action() {
    let step = Step::new(0, "", ActionKind::Click, vec!["#a"]);
    assert_eq!(step.display_label(), "click");

    let step = step.with_description("Open menu");
    assert_eq!(step.display_label(), "Open menu");
}

#[test]
fn test_action_kind_from_str() {
    assert_eq!("Click".parse::<ActionKind>().unwrap(), ActionKind::Click);
    assert_eq!(" wait ".parse::<ActionKind>().unwrap(), ActionKind::Wait);
    assert!("hover".parse::<ActionKind>().is_err());
}

#[test]
fn test_action_kind_serde() {
    let json = serde_json::to_string(&ActionKind::Navigate).unwrap();
    assert_eq!(json, "\"navigate\"");
    let kind: ActionKind = serde_json::from_str("\"input\"").unwrap();
    assert_eq!(kind, ActionKind::Input);
}
