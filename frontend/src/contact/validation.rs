use once_cell::sync::Lazy;
use regex::Regex;

use super::models::{ContactSubmission, Field, ValidationErrors};

const NAME_MIN_CHARS: usize = 2;
const SUBJECT_MIN_CHARS: usize = 5;
const MESSAGE_MIN_CHARS: usize = 10;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Computes the error message for every invalid field. Only the first failing
/// rule of a field is reported.
pub fn validate(submission: &ContactSubmission) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for field in Field::ALL {
        if let Some(message) = check_field(field, submission.value(field)) {
            errors.insert(field, message);
        }
    }
    errors
}

pub fn check_field(field: Field, raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Some(format!("{} is required", field.label()));
    }
    let chars = value.chars().count();
    match field {
        Field::Name => {
            if chars < NAME_MIN_CHARS {
                Some(format!("Name must be at least {} characters", NAME_MIN_CHARS))
            } else if !value.chars().all(|c| c.is_alphabetic() || c.is_whitespace()) {
                Some("Name can only contain letters and spaces".to_string())
            } else {
                None
            }
        }
        Field::Email => (!EMAIL_RE.is_match(value)).then(|| "Email is invalid".to_string()),
        Field::Subject => (chars < SUBJECT_MIN_CHARS)
            .then(|| format!("Subject must be at least {} characters", SUBJECT_MIN_CHARS)),
        Field::Message => (chars < MESSAGE_MIN_CHARS)
            .then(|| format!("Message must be at least {} characters", MESSAGE_MIN_CHARS)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ContactSubmission {
        ContactSubmission {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            subject: "New website".to_string(),
            message: "We would like a quote for a redesign.".to_string(),
            attachments: Vec::new(),
        }
    }

    #[test]
    fn valid_submission_has_no_errors() {
        assert!(validate(&valid()).is_empty());
    }

    #[test]
    fn every_empty_field_is_reported() {
        let errors = validate(&ContactSubmission::default());
        assert_eq!(errors.len(), 4);
        for field in Field::ALL {
            assert!(errors.contains(field), "missing error for {field}");
        }
        assert_eq!(errors.get(Field::Name), Some("Name is required"));
        assert_eq!(errors.get(Field::Message), Some("Message is required"));
    }

    #[test]
    fn single_empty_field_is_reported_alone() {
        for field in Field::ALL {
            let mut submission = valid();
            submission.set_value(field, String::new());
            let errors = validate(&submission);
            assert_eq!(errors.len(), 1);
            assert!(errors.contains(field));
        }
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        let mut submission = valid();
        submission.subject = "   \t".to_string();
        assert_eq!(validate(&submission).get(Field::Subject), Some("Subject is required"));
    }

    #[test]
    fn email_without_at_is_flagged() {
        let mut submission = valid();
        submission.email = "ada.example.com".to_string();
        assert_eq!(validate(&submission).get(Field::Email), Some("Email is invalid"));

        let mut everything_wrong = ContactSubmission::default();
        everything_wrong.email = "nope".to_string();
        assert_eq!(validate(&everything_wrong).get(Field::Email), Some("Email is invalid"));
    }

    #[test]
    fn email_needs_a_dotted_domain_and_no_spaces() {
        assert!(check_field(Field::Email, "ada@localhost").is_some());
        assert!(check_field(Field::Email, "ada lovelace@example.com").is_some());
        assert!(check_field(Field::Email, " ada@example.co.uk ").is_none());
    }

    #[test]
    fn name_rules() {
        assert_eq!(
            check_field(Field::Name, "A").as_deref(),
            Some("Name must be at least 2 characters")
        );
        assert_eq!(
            check_field(Field::Name, "R2 D2").as_deref(),
            Some("Name can only contain letters and spaces")
        );
        assert!(check_field(Field::Name, "José Núñez").is_none());
    }

    #[test]
    fn minimum_lengths_count_trimmed_chars() {
        assert!(check_field(Field::Subject, " Hey ").is_some());
        assert!(check_field(Field::Subject, "Hello").is_none());
        assert!(check_field(Field::Message, "too short").is_some());
        assert!(check_field(Field::Message, "long enough").is_none());
    }
}
