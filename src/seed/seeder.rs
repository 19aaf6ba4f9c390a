//! Bulk creation of registration requests from a manifest

use super::manifest::{SeedManifest, SeedRequest};
use crate::api::RequestsApi;
use crate::auth::{AuthApi, Session};
use crate::error::Result;
use crate::http::{ApiClient, RateLimiter, RateLimiterConfig};
use crate::types::RecordId;
use futures::{stream, StreamExt, TryStreamExt};
use serde::Serialize;
use tracing::{info, warn};

/// Seeding behavior
#[derive(Debug, Clone)]
pub struct SeedOptions {
    /// Validate and report without touching the network
    pub dry_run: bool,
    /// Parallel image uploads within one request
    pub upload_concurrency: usize,
    /// Pacing between records
    pub pacing: RateLimiterConfig,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            upload_concurrency: 3,
            pacing: RateLimiterConfig::gentle(),
        }
    }
}

/// A record the backend accepted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeededRequest {
    pub name: String,
    /// `None` in a dry run
    pub id: Option<RecordId>,
}

/// A record that was skipped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeedFailure {
    pub name: String,
    pub message: String,
}

/// Outcome of a seeding run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeedReport {
    pub dry_run: bool,
    pub created: Vec<SeededRequest>,
    pub failed: Vec<SeedFailure>,
}

impl SeedReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    fn fail(&mut self, name: &str, message: impl Into<String>) {
        self.failed.push(SeedFailure {
            name: name.to_string(),
            message: message.into(),
        });
    }
}

/// Submits manifest records one by one
pub struct Seeder<'c> {
    client: &'c ApiClient,
    limiter: RateLimiter,
    options: SeedOptions,
}

impl<'c> Seeder<'c> {
    pub fn new(client: &'c ApiClient, options: SeedOptions) -> Self {
        Self {
            client,
            limiter: RateLimiter::new(&options.pacing),
            options,
        }
    }

    /// Seed every record; only a failed login aborts the run
    pub async fn run(&self, manifest: &SeedManifest) -> Result<SeedReport> {
        if self.options.dry_run {
            return Ok(self.plan(manifest));
        }

        let auth = AuthApi::new(self.client);
        let session = auth.login(&manifest.account.login_form()).await?;
        info!(
            "Seeding {} requests as {}",
            manifest.requests.len(),
            session.user().email
        );

        let mut report = SeedReport::default();
        for request in &manifest.requests {
            self.limiter.wait().await;
            match self.seed_one(&session, request).await {
                Ok(id) => {
                    info!("Created request {} '{}'", id, request.name);
                    report.created.push(SeededRequest {
                        name: request.name.clone(),
                        id: Some(id),
                    });
                }
                Err(e) => {
                    warn!("Skipping '{}': {}", request.name, e);
                    report.fail(&request.name, e.user_message());
                }
            }
        }

        if let Err(e) = auth.logout(session).await {
            warn!("Logout after seeding failed: {}", e);
        }

        info!(
            "Seeding finished: {} created, {} failed",
            report.created.len(),
            report.failed.len()
        );
        Ok(report)
    }

    /// Dry run: report which records could be submitted
    fn plan(&self, manifest: &SeedManifest) -> SeedReport {
        let mut report = SeedReport {
            dry_run: true,
            ..SeedReport::default()
        };

        for request in &manifest.requests {
            let missing = request.missing_images();
            if missing.is_empty() {
                report.created.push(SeededRequest {
                    name: request.name.clone(),
                    id: None,
                });
            } else {
                let paths: Vec<String> = missing.iter().map(|p| p.display().to_string()).collect();
                report.fail(&request.name, format!("Missing images: {}", paths.join(", ")));
            }
        }
        report
    }

    async fn seed_one(&self, session: &Session, request: &SeedRequest) -> Result<RecordId> {
        let api = RequestsApi::new(self.client);
        let uploader = api.uploader();

        // `buffered` keeps the manifest order of the keys
        let image_keys: Vec<String> = stream::iter(&request.images)
            .map(|path| uploader.upload_file(path))
            .buffered(self.options.upload_concurrency.max(1))
            .map_ok(|uploaded| uploaded.key)
            .try_collect()
            .await?;

        let created = api.submit(session, &request.to_form(image_keys)).await?;
        Ok(created.id)
    }
}
