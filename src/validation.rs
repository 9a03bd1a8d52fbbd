//! Input schemas and the rules that gate every write.
//!
//! Each `validate_*` function is pure: it inspects a raw request body and
//! either accepts it or returns a map of field name to message. Nothing is
//! written to storage before validation succeeds.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use email_address::EmailAddress;
use regex::Regex;
use serde::Deserialize;

pub const HANDLE_MIN_LEN: usize = 2;
pub const HANDLE_MAX_LEN: usize = 40;
pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 30;
pub const POST_TEXT_MIN_LEN: usize = 10;
pub const POST_TEXT_MAX_LEN: usize = 300;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Field name to message. Ordered so responses are deterministic.
pub type ValidationErrors = BTreeMap<String, String>;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(https?://)?([a-z0-9-]+\.)+[a-z]{2,}(:\d+)?(/\S*)?$")
        .expect("url pattern compiles")
});

// ---------------------------------------------------------------------------
// Raw inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterInput {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Profile submission. `skills` arrives comma-delimited.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileInput {
    pub handle: Option<String>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub githubusername: Option<String>,
    pub skills: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExperienceInput {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EducationInput {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub fieldofstudy: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

/// Body of a post or a comment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextInput {
    pub text: Option<String>,
}

// ---------------------------------------------------------------------------
// Validated records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    pub name: String,
    pub email: String,
}

/// Shared shape of an accepted experience or education period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub from: NaiveDate,
    /// Always `None` when `current` is set.
    pub to: Option<NaiveDate>,
    pub current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidExperience {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub period: Period,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEducation {
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub period: Period,
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn char_len_between(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    (min..=max).contains(&len)
}

pub fn is_url(value: &str) -> bool {
    URL_RE.is_match(value)
}

fn require<'a>(
    errors: &mut ValidationErrors,
    field: &str,
    value: &'a Option<String>,
    message: &str,
) -> Option<&'a str> {
    let found = non_empty(value);
    if found.is_none() {
        errors.insert(field.to_string(), message.to_string());
    }
    found
}

fn parse_date(errors: &mut ValidationErrors, field: &str, value: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(value.trim(), DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.insert(
                field.to_string(),
                "Date must be in YYYY-MM-DD format".to_string(),
            );
            None
        }
    }
}

fn validate_period(
    errors: &mut ValidationErrors,
    from: &Option<String>,
    to: &Option<String>,
    current: Option<bool>,
) -> Option<Period> {
    let from = require(errors, "from", from, "From date field is required")
        .and_then(|value| parse_date(errors, "from", value));
    let current = current.unwrap_or(false);
    let to = match non_empty(to) {
        Some(value) => parse_date(errors, "to", value).map(Some)?,
        None => None,
    };
    let from = from?;
    if let Some(to) = to {
        if !current && to < from {
            errors.insert("to".to_string(), "To date must not be before from date".to_string());
            return None;
        }
    }
    Some(Period {
        from,
        to: if current { None } else { to },
        current,
    })
}

pub fn validate_register(input: &RegisterInput) -> Result<ValidRegistration, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = require(&mut errors, "name", &input.name, "Name field is required");
    if let Some(name) = name {
        if !char_len_between(name.trim(), NAME_MIN_LEN, NAME_MAX_LEN) {
            errors.insert(
                "name".to_string(),
                format!("Name must be between {NAME_MIN_LEN} and {NAME_MAX_LEN} characters"),
            );
        }
    }

    let email = require(&mut errors, "email", &input.email, "Email field is required");
    if let Some(email) = email {
        if EmailAddress::from_str(email.trim()).is_err() {
            errors.insert("email".to_string(), "Email is invalid".to_string());
        }
    }

    match (name, email) {
        (Some(name), Some(email)) if errors.is_empty() => Ok(ValidRegistration {
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
        }),
        _ => Err(errors),
    }
}

pub fn validate_profile(input: &ProfileInput) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if let Some(handle) = require(&mut errors, "handle", &input.handle, "Profile handle is required") {
        if !char_len_between(handle.trim(), HANDLE_MIN_LEN, HANDLE_MAX_LEN) {
            errors.insert(
                "handle".to_string(),
                format!(
                    "Handle needs to be between {HANDLE_MIN_LEN} and {HANDLE_MAX_LEN} characters"
                ),
            );
        }
    }
    require(&mut errors, "status", &input.status, "Status field is required");
    require(&mut errors, "skills", &input.skills, "Skills field is required");

    let links = [
        ("website", &input.website),
        ("youtube", &input.youtube),
        ("twitter", &input.twitter),
        ("facebook", &input.facebook),
        ("linkedin", &input.linkedin),
        ("instagram", &input.instagram),
    ];
    for (field, value) in links {
        if let Some(url) = non_empty(value) {
            if !is_url(url) {
                errors.insert(field.to_string(), "Not a valid URL".to_string());
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn validate_experience(input: &ExperienceInput) -> Result<ValidExperience, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let title = require(&mut errors, "title", &input.title, "Job title field is required");
    let company = require(&mut errors, "company", &input.company, "Company field is required");
    let period = validate_period(&mut errors, &input.from, &input.to, input.current);

    match (title, company, period) {
        (Some(title), Some(company), Some(period)) if errors.is_empty() => Ok(ValidExperience {
            title: title.to_string(),
            company: company.to_string(),
            location: input.location.clone(),
            period,
            description: input.description.clone(),
        }),
        _ => Err(errors),
    }
}

pub fn validate_education(input: &EducationInput) -> Result<ValidEducation, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let school = require(&mut errors, "school", &input.school, "School field is required");
    let degree = require(&mut errors, "degree", &input.degree, "Degree field is required");
    let fieldofstudy = require(
        &mut errors,
        "fieldofstudy",
        &input.fieldofstudy,
        "Field of study field is required",
    );
    let period = validate_period(&mut errors, &input.from, &input.to, input.current);

    match (school, degree, fieldofstudy, period) {
        (Some(school), Some(degree), Some(fieldofstudy), Some(period)) if errors.is_empty() => {
            Ok(ValidEducation {
                school: school.to_string(),
                degree: degree.to_string(),
                fieldofstudy: fieldofstudy.to_string(),
                period,
                description: input.description.clone(),
            })
        }
        _ => Err(errors),
    }
}

/// Posts and comments share one rule: 10 to 300 characters of text, not
/// counting surrounding whitespace. The trimmed text is what gets stored.
pub fn validate_text(input: &TextInput) -> Result<String, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if let Some(text) = require(&mut errors, "text", &input.text, "Text field is required") {
        let text = text.trim();
        if char_len_between(text, POST_TEXT_MIN_LEN, POST_TEXT_MAX_LEN) {
            return Ok(text.to_string());
        }
        errors.insert(
            "text".to_string(),
            format!("Post must be between {POST_TEXT_MIN_LEN} and {POST_TEXT_MAX_LEN} characters"),
        );
    }
    Err(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_input() -> ProfileInput {
        ProfileInput {
            handle: Some("alice".to_string()),
            status: Some("Developer".to_string()),
            skills: Some("rust,sql".to_string()),
            ..ProfileInput::default()
        }
    }

    #[test]
    fn profile_requires_handle_status_and_skills() {
        let errors = validate_profile(&ProfileInput::default()).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains_key("handle"));
        assert!(errors.contains_key("status"));
        assert!(errors.contains_key("skills"));
    }

    #[test]
    fn profile_handle_length_is_bounded() {
        let mut input = profile_input();
        input.handle = Some("a".to_string());
        assert!(validate_profile(&input).unwrap_err().contains_key("handle"));

        input.handle = Some("a".repeat(HANDLE_MAX_LEN + 1));
        assert!(validate_profile(&input).unwrap_err().contains_key("handle"));

        input.handle = Some("a".repeat(HANDLE_MAX_LEN));
        assert!(validate_profile(&input).is_ok());
    }

    #[test]
    fn profile_links_must_be_urls() {
        let mut input = profile_input();
        input.website = Some("not a url".to_string());
        input.twitter = Some("https://twitter.com/alice".to_string());
        input.youtube = Some(String::new());

        let errors = validate_profile(&input).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["website"], "Not a valid URL");
    }

    #[test]
    fn url_check_accepts_common_forms() {
        assert!(is_url("https://example.com"));
        assert!(is_url("example.com/path?q=1"));
        assert!(is_url("http://sub.example.co.uk:8080/a"));
        assert!(!is_url("example"));
        assert!(!is_url("https://exa mple.com"));
    }

    #[test]
    fn experience_requires_title_company_and_from() {
        let errors = validate_experience(&ExperienceInput::default()).unwrap_err();
        assert!(errors.contains_key("title"));
        assert!(errors.contains_key("company"));
        assert!(errors.contains_key("from"));
    }

    #[test]
    fn experience_current_supersedes_end_date() {
        let valid = validate_experience(&ExperienceInput {
            title: Some("Engineer".to_string()),
            company: Some("Acme".to_string()),
            from: Some("2020-01-01".to_string()),
            to: Some("2021-06-30".to_string()),
            current: Some(true),
            ..ExperienceInput::default()
        })
        .unwrap();
        assert!(valid.period.current);
        assert_eq!(valid.period.to, None);
    }

    #[test]
    fn experience_rejects_bad_dates() {
        let errors = validate_experience(&ExperienceInput {
            title: Some("Engineer".to_string()),
            company: Some("Acme".to_string()),
            from: Some("01/02/2020".to_string()),
            ..ExperienceInput::default()
        })
        .unwrap_err();
        assert!(errors.contains_key("from"));

        let errors = validate_experience(&ExperienceInput {
            title: Some("Engineer".to_string()),
            company: Some("Acme".to_string()),
            from: Some("2020-01-01".to_string()),
            to: Some("2019-01-01".to_string()),
            ..ExperienceInput::default()
        })
        .unwrap_err();
        assert!(errors.contains_key("to"));
    }

    #[test]
    fn education_requires_school_degree_and_field() {
        let errors = validate_education(&EducationInput {
            from: Some("2010-09-01".to_string()),
            ..EducationInput::default()
        })
        .unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains_key("fieldofstudy"));
    }

    #[test]
    fn text_length_is_bounded() {
        let short = TextInput {
            text: Some("too short".to_string()),
        };
        assert!(validate_text(&short).unwrap_err().contains_key("text"));

        let ok = TextInput {
            text: Some("long enough to post".to_string()),
        };
        assert_eq!(validate_text(&ok).unwrap(), "long enough to post");

        let long = TextInput {
            text: Some("x".repeat(POST_TEXT_MAX_LEN + 1)),
        };
        assert!(validate_text(&long).is_err());
    }

    #[test]
    fn text_length_ignores_surrounding_whitespace() {
        let padded = TextInput {
            text: Some(format!("a{}", " ".repeat(9))),
        };
        assert!(validate_text(&padded).unwrap_err().contains_key("text"));

        let ok = TextInput {
            text: Some("  long enough to post  ".to_string()),
        };
        assert_eq!(validate_text(&ok).unwrap(), "long enough to post");
    }

    #[test]
    fn profile_handle_length_ignores_whitespace() {
        let mut input = profile_input();
        input.handle = Some(" a ".to_string());
        assert!(validate_profile(&input).unwrap_err().contains_key("handle"));
    }

    #[test]
    fn register_normalises_email() {
        let valid = validate_register(&RegisterInput {
            name: Some(" Alice ".to_string()),
            email: Some("Alice@Example.com".to_string()),
        })
        .unwrap();
        assert_eq!(valid.name, "Alice");
        assert_eq!(valid.email, "alice@example.com");

        let errors = validate_register(&RegisterInput {
            name: Some("A".to_string()),
            email: Some("nope".to_string()),
        })
        .unwrap_err();
        assert!(errors.contains_key("name"));
        assert!(errors.contains_key("email"));
    }
}
