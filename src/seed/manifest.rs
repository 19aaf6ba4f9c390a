//! Seed manifest parsing
//!
//! ```yaml
//! account:
//!   email: seed@example.com
//!   password: secret123
//! requests:
//!   - name: Kim's BBQ
//!     address: 12 Mapo-daero, Seoul
//!     category: korean
//!     phone: 02-123-4567
//!     images: [photos/kims-1.jpg, photos/kims-2.jpg]
//! ```
//!
//! Image paths are resolved against the manifest's directory.

use crate::error::{Error, Result};
use crate::forms::{Form, LoginForm, RegistrationRequestForm, MAX_REQUEST_IMAGES};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A parsed seed file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedManifest {
    pub account: SeedAccount,
    #[serde(default)]
    pub requests: Vec<SeedRequest>,
}

/// Account the records are submitted as
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedAccount {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for SeedAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedAccount")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl SeedAccount {
    pub fn login_form(&self) -> LoginForm {
        LoginForm::new(self.email.as_str(), self.password.as_str())
    }
}

/// One registration request to create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedRequest {
    pub name: String,
    pub address: String,
    pub category: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Photo files, uploaded in this order
    #[serde(default)]
    pub images: Vec<PathBuf>,
}

impl SeedRequest {
    /// The submission form once images have storage keys
    pub fn to_form(&self, image_keys: Vec<String>) -> RegistrationRequestForm {
        RegistrationRequestForm {
            name: self.name.clone(),
            address: self.address.clone(),
            category: self.category.clone(),
            phone: self.phone.clone(),
            description: self.description.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            image_keys,
        }
    }

    /// Images that do not exist on disk
    pub fn missing_images(&self) -> Vec<&Path> {
        self.images
            .iter()
            .map(PathBuf::as_path)
            .filter(|p| !p.is_file())
            .collect()
    }
}

/// Load a manifest file, resolving image paths next to it
pub fn load_manifest(path: impl AsRef<Path>) -> Result<SeedManifest> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::seed(format!(
                "Failed to read manifest '{}': {}",
                path.display(),
                e
            ))
        }
    })?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    load_manifest_from_str(&content, base_dir)
}

/// Parse manifest YAML; relative image paths are joined onto `base_dir`
pub fn load_manifest_from_str(yaml: &str, base_dir: &Path) -> Result<SeedManifest> {
    let mut manifest: SeedManifest = serde_yaml::from_str(yaml)
        .map_err(|e| Error::seed(format!("Failed to parse manifest YAML: {e}")))?;

    for request in &mut manifest.requests {
        for image in &mut request.images {
            if image.is_relative() {
                *image = base_dir.join(&*image);
            }
        }
    }

    validate_manifest(&manifest)?;
    Ok(manifest)
}

/// Structural checks; files are only looked at when seeding
fn validate_manifest(manifest: &SeedManifest) -> Result<()> {
    let account = manifest.account.login_form().validate();
    if !account.is_empty() {
        return Err(Error::seed(format!("Invalid account: {account}")));
    }

    if manifest.requests.is_empty() {
        return Err(Error::seed("Manifest must list at least one request"));
    }

    for (index, request) in manifest.requests.iter().enumerate() {
        validate_request(index, request)?;
    }

    Ok(())
}

fn validate_request(index: usize, request: &SeedRequest) -> Result<()> {
    if request.images.len() > MAX_REQUEST_IMAGES {
        return Err(Error::seed(format!(
            "Request #{} '{}' lists {} images; at most {} are allowed",
            index + 1,
            request.name,
            request.images.len(),
            MAX_REQUEST_IMAGES
        )));
    }

    let errors = request.to_form(Vec::new()).validate();
    if !errors.is_empty() {
        return Err(Error::seed(format!(
            "Request #{} '{}' is invalid: {}",
            index + 1,
            request.name,
            errors
        )));
    }

    Ok(())
}
