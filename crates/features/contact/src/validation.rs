use fxhash::FxHashMap;
use regex::Regex;
use strum_macros::{AsRefStr, Display};
use vitae_domain::config::ContactConfig;
use vitae_domain::constants::{FIELD_EMAIL, REQUIRED_FIELDS};

/// Something `@` something `.` something, with no whitespace or extra `@` in any part.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Submitted field values by name. A repeated name keeps its last value.
pub type Fields = FxHashMap<String, String>;

/// Why a submission was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Rejection {
    MissingFields,
    InvalidEmail,
}

impl Rejection {
    /// Text shown to the visitor.
    #[must_use]
    pub fn message(self, config: &ContactConfig) -> &str {
        match self {
            Self::MissingFields => &config.missing_fields_text,
            Self::InvalidEmail => &config.invalid_email_text,
        }
    }
}

#[must_use]
pub fn collect_fields(entries: Vec<(String, String)>) -> Fields {
    entries.into_iter().collect()
}

/// Every required field must be non-empty, then the email must look like one.
///
/// # Errors
/// Returns the first [`Rejection`] that applies.
pub fn validate(fields: &Fields, email: &Regex) -> Result<(), Rejection> {
    let filled = |name: &str| fields.get(name).is_some_and(|value| !value.is_empty());
    if !REQUIRED_FIELDS.iter().all(|name| filled(name)) {
        return Err(Rejection::MissingFields);
    }

    let address = fields.get(FIELD_EMAIL).map_or("", String::as_str);
    if !email.is_match(address) {
        return Err(Rejection::InvalidEmail);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> Fields {
        collect_fields(pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect())
    }

    fn pattern() -> Regex {
        Regex::new(EMAIL_PATTERN).unwrap()
    }

    #[test]
    fn complete_submission_is_valid() {
        let data = fields(&[("name", "Jane"), ("email", "jane@example.com"), ("message", "hi")]);
        assert_eq!(validate(&data, &pattern()), Ok(()));
    }

    #[test]
    fn empty_or_absent_fields_are_missing() {
        let data = fields(&[("name", ""), ("email", "jane@example.com"), ("message", "hi")]);
        assert_eq!(validate(&data, &pattern()), Err(Rejection::MissingFields));

        let data = fields(&[("name", "Jane"), ("email", "jane@example.com")]);
        assert_eq!(validate(&data, &pattern()), Err(Rejection::MissingFields));
    }

    #[test]
    fn whitespace_counts_as_filled() {
        let data = fields(&[("name", " "), ("email", "jane@example.com"), ("message", "hi")]);
        assert_eq!(validate(&data, &pattern()), Ok(()));
    }

    #[test]
    fn email_shape_is_checked() {
        let rejected =
            ["not-an-email", "jane@example", "jane @example.com", "a@b@c.d", "@example.com"];
        for bad in rejected {
            let data = fields(&[("name", "Jane"), ("email", bad), ("message", "hi")]);
            assert_eq!(validate(&data, &pattern()), Err(Rejection::InvalidEmail), "{bad}");
        }
        for good in ["a@b.c", "jane.doe@mail.example.org"] {
            let data = fields(&[("name", "Jane"), ("email", good), ("message", "hi")]);
            assert_eq!(validate(&data, &pattern()), Ok(()), "{good}");
        }
    }

    #[test]
    fn last_value_wins_for_repeated_names() {
        let data = fields(&[("name", ""), ("name", "Jane")]);
        assert_eq!(data.get("name").map(String::as_str), Some("Jane"));
    }

    #[test]
    fn rejection_messages_come_from_config() {
        let config = ContactConfig::default();
        assert_eq!(Rejection::MissingFields.message(&config), "Please fill in all fields.");
        assert_eq!(Rejection::InvalidEmail.message(&config), "Please enter a valid email address.");
        assert_eq!(Rejection::InvalidEmail.as_ref(), "invalid-email");
    }
}
