//! Profile-driven auto-fill for input steps.
//!
//! An input step is matched to a profile field by keyword families checked
//! against the step's text labels and its selectors. Phone numbers can be
//! split across several inputs, so the hint text also selects which segment
//! of the number to type.

use once_cell::sync::Lazy;
use regex::Regex;
use voicepath_protocols::{Step, UserProfile};

const NAME_KEYWORDS: &[&str] = &["이름", "성명", "성함", "fullname", "name"];
const BIRTH_KEYWORDS: &[&str] = &["생년월일", "생일", "birthday", "birth", "dob"];
const PHONE_KEYWORDS: &[&str] = &[
    "전화", "휴대폰", "핸드폰", "연락처", "phone", "mobile", "tel",
];

const FIRST_SEGMENT: &[&str] = &["앞", "first", "prefix"];
const MIDDLE_SEGMENT: &[&str] = &["가운데", "중간", "middle"];
const LAST_SEGMENT: &[&str] = &["뒤", "끝", "last"];
const HYPHENATED: &[&str] = &["하이픈", "hyphen", "- 포함", "-포함", "'-' 포함", "\"-\" 포함"];
/// Hints like `('-' 없이 숫자만 입력)` ask for the opposite of a hyphenated value.
const HYPHEN_NEGATIONS: &[&str] = &["없이", "제외", "빼고", "without", "no hyphen", "no dash", "not include"];

/// Attribute keys inside selectors, e.g. the `name=` of `[name='q']`.
static ATTRIBUTE_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\s*[\w-]+\s*[~|^$*]?=").expect("valid regex"));

/// Which profile field an input step asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFamily {
    Name,
    BirthDate,
    Phone,
}

/// Part of a phone number requested by a split phone field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PhoneSegment {
    First,
    Middle,
    /// Everything after the carrier prefix. Two-field forms ask for the
    /// prefix in one input and the remaining digits in another.
    Rest,
    Hyphenated,
    Full,
}

/// Resolves input values from a [`UserProfile`].
pub struct AutoFillResolver;

impl AutoFillResolver {
    /// Value to type into `step`, or `None` when the step is not an input,
    /// no family matches, or the profile lacks a usable value.
    pub fn resolve(step: &Step, profile: &UserProfile) -> Option<String> {
        if !step.is_input() {
            return None;
        }
        let hint = step.hint_text();
        match Self::detect_family(step)? {
            FieldFamily::Name => profile.name().map(str::to_string),
            FieldFamily::BirthDate => profile.birth_date().and_then(format_birth_date),
            FieldFamily::Phone => profile
                .phone_number()
                .and_then(|phone| format_phone(phone, phone_segment(&hint))),
        }
    }

    /// Keyword family of the step, checked name first, then birth date,
    /// then phone.
    pub fn detect_family(step: &Step) -> Option<FieldFamily> {
        let hint = step.hint_text();
        let selectors = selector_haystack(step.selectors());
        let matches = |keywords: &[&str]| {
            keywords
                .iter()
                .any(|keyword| hint.contains(keyword) || selectors.contains(keyword))
        };

        if matches(NAME_KEYWORDS) {
            Some(FieldFamily::Name)
        } else if matches(BIRTH_KEYWORDS) {
            Some(FieldFamily::BirthDate)
        } else if matches(PHONE_KEYWORDS) {
            Some(FieldFamily::Phone)
        } else {
            None
        }
    }
}

fn selector_haystack(selectors: &[String]) -> String {
    let joined = selectors.join(" ").to_lowercase();
    ATTRIBUTE_KEY.replace_all(&joined, "[").into_owned()
}

fn phone_segment(hint: &str) -> PhoneSegment {
    let has = |keywords: &[&str]| keywords.iter().any(|keyword| hint.contains(keyword));
    if has(FIRST_SEGMENT) {
        PhoneSegment::First
    } else if has(MIDDLE_SEGMENT) {
        PhoneSegment::Middle
    } else if has(LAST_SEGMENT) {
        PhoneSegment::Rest
    } else if has(HYPHENATED) && !has(HYPHEN_NEGATIONS) {
        PhoneSegment::Hyphenated
    } else {
        PhoneSegment::Full
    }
}

fn digits_of(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Eight-digit `YYYYMMDD`, whatever separators the profile uses.
fn format_birth_date(value: &str) -> Option<String> {
    let digits = digits_of(value);
    (digits.len() == 8).then_some(digits)
}

fn format_phone(value: &str, segment: PhoneSegment) -> Option<String> {
    let digits = digits_of(value);
    let len = digits.len();
    if !(10..=11).contains(&len) {
        return None;
    }
    let formatted = match segment {
        PhoneSegment::First => digits[..3].to_string(),
        PhoneSegment::Middle => digits[3..len - 4].to_string(),
        PhoneSegment::Rest => digits[3..].to_string(),
        PhoneSegment::Hyphenated => {
            format!("{}-{}-{}", &digits[..3], &digits[3..len - 4], &digits[len - 4..])
        }
        PhoneSegment::Full => digits,
    };
    Some(formatted)
}

#[cfg(test)]
#[path = "autofill_tests.rs"]
mod tests;
