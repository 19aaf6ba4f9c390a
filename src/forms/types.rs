//! Form definitions and their local validation rules
//!
//! Field names in [`FormErrors`] use the backend's wire names, so local and
//! server-side messages land on the same keys.

use super::errors::FormErrors;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(-[0-9]+)*$").expect("valid phone regex"));

pub const PASSWORD_MIN_LEN: usize = 8;
pub const NICKNAME_MIN_LEN: usize = 2;
pub const NICKNAME_MAX_LEN: usize = 20;
pub const BIO_MAX_LEN: usize = 200;
pub const DESCRIPTION_MAX_LEN: usize = 1000;
pub const MAX_REQUEST_IMAGES: usize = 5;
pub const QUERY_MAX_LEN: usize = 200;

/// Something that can be checked before it is sent
pub trait Form {
    /// Local validation; an empty result means the form may be submitted
    fn validate(&self) -> FormErrors;
}

// ============================================================================
// Shared Rules
// ============================================================================

fn check_email(errors: &mut FormErrors, email: &str) {
    if email.trim().is_empty() {
        errors.add_field("email", "Email is required");
    } else if !EMAIL_RE.is_match(email.trim()) {
        errors.add_field("email", "Enter a valid email address");
    }
}

fn check_nickname(errors: &mut FormErrors, nickname: &str) {
    let len = nickname.trim().chars().count();
    if len == 0 {
        errors.add_field("nickname", "Nickname is required");
    } else if !(NICKNAME_MIN_LEN..=NICKNAME_MAX_LEN).contains(&len) {
        errors.add_field(
            "nickname",
            format!("Nickname must be {NICKNAME_MIN_LEN}-{NICKNAME_MAX_LEN} characters"),
        );
    }
}

fn check_required(errors: &mut FormErrors, field: &str, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.add_field(field, format!("{label} is required"));
    }
}

fn check_max_len(errors: &mut FormErrors, field: &str, value: &str, max: usize, label: &str) {
    if value.chars().count() > max {
        errors.add_field(field, format!("{label} must be at most {max} characters"));
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

// ============================================================================
// Login
// ============================================================================

/// Email/password login
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl Form for LoginForm {
    fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        check_email(&mut errors, &self.email);
        if self.password.is_empty() {
            errors.add_field("password", "Password is required");
        }
        errors
    }
}

// ============================================================================
// Signup
// ============================================================================

/// New account registration
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    #[serde(skip)]
    pub password_confirm: String,
    pub nickname: String,
}

impl Form for SignupForm {
    fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        check_email(&mut errors, &self.email);

        if self.password.chars().count() < PASSWORD_MIN_LEN {
            errors.add_field(
                "password",
                format!("Password must be at least {PASSWORD_MIN_LEN} characters"),
            );
        } else if !self.password.chars().any(char::is_alphabetic)
            || !self.password.chars().any(|c| c.is_ascii_digit())
        {
            errors.add_field("password", "Password must contain a letter and a digit");
        }

        if self.password_confirm != self.password {
            errors.add_field("passwordConfirm", "Passwords do not match");
        }

        check_nickname(&mut errors, &self.nickname);
        errors
    }
}

// ============================================================================
// Profile Edit
// ============================================================================

/// Nickname and bio changes on the profile tab
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileEditForm {
    pub nickname: String,
    pub bio: Option<String>,
}

/// Body of `PATCH /users/me`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub nickname: String,
    pub bio: Option<String>,
    /// Storage key of a freshly uploaded profile image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_key: Option<String>,
}

impl ProfileEditForm {
    /// Trimmed request body; a blank bio clears it
    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            nickname: self.nickname.trim().to_string(),
            bio: non_blank(&self.bio),
            profile_image_key: None,
        }
    }
}

impl Form for ProfileEditForm {
    fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        check_nickname(&mut errors, &self.nickname);
        if let Some(bio) = &self.bio {
            check_max_len(&mut errors, "bio", bio.trim(), BIO_MAX_LEN, "Bio");
        }
        errors
    }
}

// ============================================================================
// Restaurant Registration Request
// ============================================================================

/// Submission on the registration-requests tab
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequestForm {
    pub name: String,
    pub address: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Storage keys returned by presigned uploads
    #[serde(default)]
    pub image_keys: Vec<String>,
}

impl RegistrationRequestForm {
    /// Copy with whitespace trimmed and blank optionals dropped
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            category: self.category.trim().to_string(),
            phone: non_blank(&self.phone),
            description: non_blank(&self.description),
            latitude: self.latitude,
            longitude: self.longitude,
            image_keys: self.image_keys.clone(),
        }
    }
}

impl Form for RegistrationRequestForm {
    fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        check_required(&mut errors, "name", &self.name, "Restaurant name");
        check_required(&mut errors, "address", &self.address, "Address");
        check_required(&mut errors, "category", &self.category, "Category");

        if let Some(phone) = non_blank(&self.phone) {
            if !PHONE_RE.is_match(&phone) {
                errors.add_field("phone", "Phone must be digits, optionally separated by dashes");
            }
        }
        if let Some(description) = &self.description {
            check_max_len(
                &mut errors,
                "description",
                description.trim(),
                DESCRIPTION_MAX_LEN,
                "Description",
            );
        }

        if let Some(lat) = self.latitude {
            if !(-90.0..=90.0).contains(&lat) {
                errors.add_field("latitude", "Latitude must be between -90 and 90");
            }
        }
        if let Some(lng) = self.longitude {
            if !(-180.0..=180.0).contains(&lng) {
                errors.add_field("longitude", "Longitude must be between -180 and 180");
            }
        }
        if self.latitude.is_some() != self.longitude.is_some() {
            errors.add_field("latitude", "Latitude and longitude must be given together");
        }

        if self.image_keys.len() > MAX_REQUEST_IMAGES {
            errors.add_field(
                "imageKeys",
                format!("At most {MAX_REQUEST_IMAGES} images can be attached"),
            );
        }
        errors
    }
}

// ============================================================================
// Recommendation Search
// ============================================================================

/// The AI recommendation search box
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecommendForm {
    pub query: String,
}

impl RecommendForm {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    pub fn normalized(&self) -> Self {
        Self {
            query: self.query.trim().to_string(),
        }
    }
}

impl Form for RecommendForm {
    fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        check_required(&mut errors, "query", &self.query, "Search text");
        check_max_len(&mut errors, "query", self.query.trim(), QUERY_MAX_LEN, "Search text");
        errors
    }
}
