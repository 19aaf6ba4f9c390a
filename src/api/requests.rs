//! Restaurant registration requests tab

use super::models::RegistrationRequest;
use super::pages::ResourcePages;
use super::upload::{UploadedFile, Uploader};
use crate::auth::Session;
use crate::error::{Error, Result};
use crate::forms::{ensure_valid, FormErrors, RegistrationRequestForm};
use crate::http::ApiClient;
use crate::pagination::PaginatedCursor;
use std::path::Path;
use tracing::info;

pub const MY_REQUESTS_PATH: &str = "/restaurant-requests/me";
pub const REQUESTS_PATH: &str = "/restaurant-requests";
pub const REQUEST_PRESIGN_PATH: &str = "/restaurant-requests/presigned-url";

#[derive(Debug, Clone, Copy)]
pub struct RequestsApi<'c> {
    client: &'c ApiClient,
}

impl<'c> RequestsApi<'c> {
    pub fn new(client: &'c ApiClient) -> Self {
        Self { client }
    }

    pub fn pages(&self, _session: &Session) -> ResourcePages<'c, RegistrationRequest> {
        ResourcePages::new(self.client, MY_REQUESTS_PATH)
    }

    pub fn cursor(
        &self,
        session: &Session,
        page_size: u32,
    ) -> PaginatedCursor<ResourcePages<'c, RegistrationRequest>> {
        PaginatedCursor::new(self.pages(session), page_size)
    }

    /// Uploader for request photos
    pub fn uploader(&self) -> Uploader<'c> {
        Uploader::new(self.client, REQUEST_PRESIGN_PATH)
    }

    /// Upload one photo; put the returned key into the form's `image_keys`
    pub async fn upload_image(&self, _session: &Session, path: &Path) -> Result<UploadedFile> {
        self.uploader().upload_file(path).await
    }

    pub async fn submit(
        &self,
        session: &Session,
        form: &RegistrationRequestForm,
    ) -> Result<RegistrationRequest> {
        ensure_valid(form)?;
        let created: RegistrationRequest =
            self.client.post(REQUESTS_PATH, &form.normalized()).await?;
        info!(
            "User {} submitted registration request {} ({})",
            session.user_id(),
            created.id,
            created.name
        );
        Ok(created)
    }

    /// Withdraw a request that has not been reviewed yet
    pub async fn cancel(&self, session: &Session, request: &RegistrationRequest) -> Result<()> {
        if !request.status.is_cancellable() {
            let mut errors = FormErrors::new();
            errors.set_global(format!(
                "Request is already {} and can no longer be cancelled",
                request.status
            ));
            return Err(Error::InvalidInput(errors));
        }

        self.client
            .delete(&format!("{REQUESTS_PATH}/{}", request.id))
            .await?;
        info!(
            "User {} cancelled registration request {}",
            session.user_id(),
            request.id
        );
        Ok(())
    }
}
