//! Forms module
//!
//! Login, signup, profile edit, registration request, and recommendation
//! search forms. Each validates locally before anything is sent, and
//! backend failures are mapped back onto the same per-field messages.
//!
//! Submitting never consumes a form, so entered values survive a failed
//! attempt and can be corrected and resubmitted.

mod errors;
mod types;

pub use errors::FormErrors;
pub use types::{
    Form, LoginForm, ProfileEditForm, ProfileUpdate, RecommendForm, RegistrationRequestForm,
    SignupForm, BIO_MAX_LEN, DESCRIPTION_MAX_LEN, MAX_REQUEST_IMAGES, NICKNAME_MAX_LEN,
    NICKNAME_MIN_LEN, PASSWORD_MIN_LEN, QUERY_MAX_LEN,
};

use crate::error::{Error, Result};
use tracing::debug;

/// Run local validation, failing with [`Error::InvalidInput`]
pub fn ensure_valid<F: Form>(form: &F) -> Result<()> {
    let errors = form.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        debug!("Form rejected locally: {}", errors);
        Err(Error::InvalidInput(errors))
    }
}
