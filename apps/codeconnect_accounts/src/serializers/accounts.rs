use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-field validation errors, keyed by form field name. Errors that belong
/// to no single field go under [`FormErrors::NON_FIELD`].
#[derive(Debug, Default, Clone)]
pub struct FormErrors {
    fields: BTreeMap<&'static str, Vec<String>>,
}

impl FormErrors {
    pub const NON_FIELD: &'static str = "__all__";

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn for_field(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn non_field(&self) -> &[String] {
        self.for_field(Self::NON_FIELD)
    }
}

/// Raw freelancer signup submission, straight off the form body.
/// `hourly_rate` arrives as text; the rendered form prefills it with 50.00.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FreelancerSignupForm {
    pub username: String,
    pub email: String,
    pub password1: String,
    pub password2: String,
    pub hourly_rate: Option<String>,
}

/// A signup submission that passed every field check. Uniqueness is the
/// registration workflow's concern, not the form's.
#[derive(Debug, Clone)]
pub struct ValidatedSignup {
    pub username: String,
    pub email: String,
    pub password: String,
    pub hourly_rate: Decimal,
}

const USERNAME_MAX: usize = 150;
const EMAIL_MAX: usize = 254;
const PASSWORD_MIN: usize = 8;
const RATE_MAX_DIGITS: usize = 6;
const RATE_MAX_PLACES: u32 = 2;

// Head of the usual banned-password list; enough to stop the worst offenders.
const COMMON_PASSWORDS: &[&str] = &[
    "password", "password1", "123456", "1234567", "12345678", "123456789",
    "qwerty", "qwerty123", "abc123", "football", "baseball", "letmein",
    "monkey", "dragon", "111111", "123123", "mustang", "access", "shadow",
    "master", "superman", "batman", "trustno1", "welcome", "iloveyou",
    "sunshine", "princess", "admin", "charlie", "freedom", "whatever",
];

impl FreelancerSignupForm {
    pub fn validate(&self) -> Result<ValidatedSignup, FormErrors> {
        let mut errors = FormErrors::default();

        let username = self.username.trim();
        if username.is_empty() {
            errors.add("username", "This field is required.");
        } else {
            if username.chars().count() > USERNAME_MAX {
                errors.add("username", "Ensure this value has at most 150 characters.");
            }
            if !username
                .chars()
                .all(|c| c.is_alphanumeric() || "@.+-_".contains(c))
            {
                errors.add(
                    "username",
                    "Enter a valid username: letters, digits and @/./+/-/_ only.",
                );
            }
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.add("email", "This field is required.");
        } else if email.chars().count() > EMAIL_MAX || !well_formed_email(email) {
            errors.add("email", "Enter a valid email address.");
        }

        if self.password1.is_empty() {
            errors.add("password1", "This field is required.");
        } else {
            if self.password1.chars().count() < PASSWORD_MIN {
                errors.add(
                    "password1",
                    "This password is too short. It must contain at least 8 characters.",
                );
            }
            if self.password1.chars().all(|c| c.is_ascii_digit()) {
                errors.add("password1", "This password is entirely numeric.");
            }
            if COMMON_PASSWORDS.contains(&self.password1.to_lowercase().as_str()) {
                errors.add("password1", "This password is too common.");
            }
            if too_similar(&self.password1, username) {
                errors.add("password1", "The password is too similar to the username.");
            } else if too_similar(&self.password1, email)
                || email
                    .split_once('@')
                    .is_some_and(|(local, _)| too_similar(&self.password1, local))
            {
                errors.add(
                    "password1",
                    "The password is too similar to the email address.",
                );
            }
        }
        if self.password2 != self.password1 {
            errors.add("password2", "The two password fields didn't match.");
        }

        let hourly_rate = match self.hourly_rate.as_deref().map(str::trim) {
            None | Some("") => {
                errors.add("hourly_rate", "This field is required.");
                None
            }
            Some(raw) => match Decimal::from_str(raw) {
                Err(_) => {
                    errors.add("hourly_rate", "Enter a number.");
                    None
                }
                Ok(rate) => {
                    let mut ok = true;
                    if rate.scale() > RATE_MAX_PLACES {
                        errors.add(
                            "hourly_rate",
                            "Ensure that there are no more than 2 decimal places.",
                        );
                        ok = false;
                    }
                    if rate.mantissa().unsigned_abs().to_string().len() > RATE_MAX_DIGITS {
                        errors.add(
                            "hourly_rate",
                            "Ensure that there are no more than 6 digits in total.",
                        );
                        ok = false;
                    }
                    if rate < Decimal::new(1, 2) {
                        errors.add(
                            "hourly_rate",
                            "Ensure this value is greater than or equal to 0.01.",
                        );
                        ok = false;
                    }
                    ok.then_some(rate)
                }
            },
        };

        match hourly_rate {
            Some(hourly_rate) if errors.is_empty() => Ok(ValidatedSignup {
                username: username.to_string(),
                email: email.to_string(),
                password: self.password1.clone(),
                hourly_rate,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Contents of the signed session cookie. Sessions are explicit state carried
/// by the request, decoded against the keys held in `AppState`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    pub sub: i64,
    pub username: String,
    pub sid: Uuid,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

fn well_formed_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
}

fn too_similar(password: &str, attribute: &str) -> bool {
    let pw = password.to_lowercase();
    let attr = attribute.to_lowercase();
    if attr.chars().count() < 4 {
        return false;
    }
    pw.contains(&attr) || attr.contains(&pw)
}
