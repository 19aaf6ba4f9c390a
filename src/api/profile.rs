//! Profile tab

use super::models::User;
use super::upload::Uploader;
use crate::auth::Session;
use crate::error::Result;
use crate::forms::{ensure_valid, ProfileEditForm, ProfileUpdate};
use crate::http::{ApiClient, RequestConfig};
use std::path::Path;
use tracing::info;

pub const PROFILE_PATH: &str = "/users/me";
pub const PROFILE_IMAGE_PRESIGN_PATH: &str = "/users/me/profile-image/presigned-url";

#[derive(Debug, Clone, Copy)]
pub struct ProfileApi<'c> {
    client: &'c ApiClient,
}

impl<'c> ProfileApi<'c> {
    pub fn new(client: &'c ApiClient) -> Self {
        Self { client }
    }

    /// Reload the profile and refresh the session's copy
    pub async fn get(&self, session: &mut Session) -> Result<User> {
        let user: User = self.client.get(PROFILE_PATH, RequestConfig::default()).await?;
        session.replace_user(user.clone());
        Ok(user)
    }

    /// Save nickname and bio
    ///
    /// On failure the session keeps the previous user and the form keeps
    /// what was entered.
    pub async fn update(&self, session: &mut Session, form: &ProfileEditForm) -> Result<User> {
        ensure_valid(form)?;
        self.patch(session, &form.to_update()).await
    }

    /// Upload a new profile picture and attach it to the account
    pub async fn update_image(&self, session: &mut Session, path: &Path) -> Result<User> {
        let uploaded = Uploader::new(self.client, PROFILE_IMAGE_PRESIGN_PATH)
            .upload_file(path)
            .await?;

        let current = session.user();
        let update = ProfileUpdate {
            nickname: current.nickname.clone(),
            bio: current.bio.clone(),
            profile_image_key: Some(uploaded.key),
        };
        self.patch(session, &update).await
    }

    async fn patch(&self, session: &mut Session, update: &ProfileUpdate) -> Result<User> {
        let user: User = self.client.patch(PROFILE_PATH, update).await?;
        info!("Updated profile of user {}", user.id);
        session.replace_user(user.clone());
        Ok(user)
    }
}
