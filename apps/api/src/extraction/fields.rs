//! Field extractors — pull candidate emails and phone numbers out of raw résumé text.
//!
//! Both extractors are total: any input yields a (possibly empty) list, never an error.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Local part, `@`, domain, then a top-level segment of two or more ASCII
/// letters. The segment is letters only: a `|` after it ends the match, so
/// `x@y.co|uk` yields `x@y.co` (a `[A-Z|a-z]` class would also take the `|uk`).
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
        .expect("email pattern must compile")
});

/// Optional 1-3 digit country code, then 3/3/4 digit clusters separated by
/// any run of space, dot, dash or parentheses.
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:\+?(\d{1,3}))?[-. (]*(\d{3})[-. )]*(\d{3})[-. ]*(\d{4})\b")
        .expect("phone pattern must compile")
});

/// One phone-pattern hit, kept as its four captured fragments.
///
/// `country_code` is empty when the optional group did not participate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneMatch {
    pub country_code: String,
    pub area: String,
    pub exchange: String,
    pub subscriber: String,
}

impl PhoneMatch {
    fn fragments(&self) -> [&str; 4] {
        [
            &self.country_code,
            &self.area,
            &self.exchange,
            &self.subscriber,
        ]
    }
}

/// Renders the match as a quoted 4-tuple, e.g. `('1', '555', '123', '4567')`.
///
/// This is the stringified form stored on a `Record`; it is not a dialable number.
impl fmt::Display for PhoneMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quoted: Vec<String> = self
            .fragments()
            .iter()
            .map(|fragment| format!("'{fragment}'"))
            .collect();
        write!(f, "({})", quoted.join(", "))
    }
}

/// All non-overlapping email-shaped substrings, left to right, duplicates kept.
pub fn extract_emails(text: &str) -> Vec<String> {
    EMAIL_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// All phone-pattern hits, left to right, as captured 4-tuples.
pub fn extract_contact_numbers(text: &str) -> Vec<PhoneMatch> {
    PHONE_PATTERN
        .captures_iter(text)
        .map(|caps| {
            let group = |i: usize| {
                caps.get(i)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default()
            };
            PhoneMatch {
                country_code: group(1),
                area: group(2),
                exchange: group(3),
                subscriber: group(4),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME_TEXT: &str = "Jane Doe\nEmail: jane.doe@example.com | Alt: j_doe+jobs@mail.co.uk\n\
        Phone: +1 (555) 123-4567\nOffice: 555.999.0000\nReferences: jane.doe@example.com";

    #[test]
    fn test_emails_in_order_with_duplicates() {
        let emails = extract_emails(RESUME_TEXT);
        assert_eq!(
            emails,
            vec![
                "jane.doe@example.com",
                "j_doe+jobs@mail.co.uk",
                "jane.doe@example.com"
            ]
        );
    }

    #[test]
    fn test_emails_stable_across_runs() {
        assert_eq!(extract_emails(RESUME_TEXT), extract_emails(RESUME_TEXT));
    }

    #[test]
    fn test_email_requires_alpha_tld() {
        assert!(extract_emails("contact: someone@host.1").is_empty());
        assert!(extract_emails("a@b.c").is_empty());
        assert_eq!(extract_emails("x@y.io"), vec!["x@y.io"]);
        assert_eq!(extract_emails("x@y.co|uk"), vec!["x@y.co"]);
    }

    #[test]
    fn test_no_matches_is_empty() {
        assert!(extract_emails("").is_empty());
        assert!(extract_contact_numbers("").is_empty());
        assert!(extract_contact_numbers("no digits here").is_empty());
    }

    #[test]
    fn test_phone_with_country_code() {
        let numbers = extract_contact_numbers("Call +1 (555) 123-4567 today");
        assert_eq!(numbers.len(), 1);
        assert_eq!(
            numbers[0],
            PhoneMatch {
                country_code: "1".to_string(),
                area: "555".to_string(),
                exchange: "123".to_string(),
                subscriber: "4567".to_string(),
            }
        );
    }

    #[test]
    fn test_phone_without_country_code() {
        let numbers = extract_contact_numbers("Office: 555.999.0000");
        assert_eq!(numbers.len(), 1);
        assert_eq!(numbers[0].country_code, "");
        assert_eq!(numbers[0].area, "555");
        assert_eq!(numbers[0].exchange, "999");
        assert_eq!(numbers[0].subscriber, "0000");
    }

    #[test]
    fn test_phone_order_preserved() {
        let numbers = extract_contact_numbers(RESUME_TEXT);
        assert_eq!(numbers.len(), 2);
        assert_eq!(numbers[0].country_code, "1");
        assert_eq!(numbers[1].exchange, "999");
    }

    #[test]
    fn test_display_is_quoted_tuple() {
        let with_code = PhoneMatch {
            country_code: "1".to_string(),
            area: "555".to_string(),
            exchange: "123".to_string(),
            subscriber: "4567".to_string(),
        };
        assert_eq!(with_code.to_string(), "('1', '555', '123', '4567')");

        let without_code = PhoneMatch {
            country_code: String::new(),
            ..with_code
        };
        assert_eq!(without_code.to_string(), "('', '555', '123', '4567')");
    }
}
