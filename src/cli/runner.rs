//! CLI runner - executes commands

use crate::api::{LikesApi, ProfileApi, RecommendApi, RequestsApi, ResourcePages, ReviewsApi};
use crate::auth::{AuthApi, Session};
use crate::cli::commands::{Cli, Commands, ListArgs, OutputFormat, PageArgs};
use crate::config::AppConfig;
use crate::error::{ApiError, Error, Result};
use crate::forms::{
    FormErrors, LoginForm, ProfileEditForm, RecommendForm, RegistrationRequestForm, SignupForm,
};
use crate::http::{ApiClient, RateLimiterConfig};
use crate::listing::{ListQuery, Listable};
use crate::pagination::PaginatedCursor;
use crate::seed::{load_manifest, SeedOptions, Seeder};
use crate::types::RecordId;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = AppConfig::load(self.cli.config.as_deref())?;
        debug!("Using API at {}", config.api_url);
        let client = ApiClient::new(config.to_client_config())?;

        match &self.cli.command {
            Commands::Signup {
                nickname,
                password_confirm,
            } => self.signup(&client, nickname, password_confirm).await,
            Commands::Me => self.me(&client).await,
            Commands::ProfileEdit {
                nickname,
                bio,
                image,
            } => {
                self.profile_edit(&client, nickname.as_deref(), bio.as_deref(), image.as_deref())
                    .await
            }
            Commands::Likes(args) => {
                let session = self.login(&client).await?;
                let cursor = LikesApi::new(&client).cursor(&session, config.page_size);
                self.list(cursor, args).await
            }
            Commands::Unlike { restaurant_id } => {
                let session = self.login(&client).await?;
                LikesApi::new(&client).unlike(&session, *restaurant_id).await
            }
            Commands::Reviews(args) => {
                let session = self.login(&client).await?;
                let cursor = ReviewsApi::new(&client).cursor(&session, config.page_size);
                self.list(cursor, args).await
            }
            Commands::ReviewDelete { review_id } => {
                let session = self.login(&client).await?;
                ReviewsApi::new(&client).delete(&session, *review_id).await
            }
            Commands::Requests(args) => {
                let session = self.login(&client).await?;
                let cursor = RequestsApi::new(&client).cursor(&session, config.page_size);
                self.list_unsorted(cursor, args).await
            }
            Commands::RequestSubmit {
                name,
                address,
                category,
                phone,
                description,
                latitude,
                longitude,
                images,
            } => {
                let form = RegistrationRequestForm {
                    name: name.clone(),
                    address: address.clone(),
                    category: category.clone(),
                    phone: phone.clone(),
                    description: description.clone(),
                    latitude: *latitude,
                    longitude: *longitude,
                    image_keys: Vec::new(),
                };
                self.request_submit(&client, form, images).await
            }
            Commands::RequestCancel { request_id } => {
                self.request_cancel(&client, config.page_size, *request_id)
                    .await
            }
            Commands::Recommend { query } => {
                let results = RecommendApi::new(&client)
                    .search(&RecommendForm::new(query.as_str()))
                    .await?;
                results.iter().try_for_each(|r| self.emit(r))
            }
            Commands::Seed {
                manifest,
                dry_run,
                concurrency,
                rate,
            } => {
                let options = SeedOptions {
                    dry_run: *dry_run,
                    upload_concurrency: *concurrency,
                    pacing: RateLimiterConfig::new(*rate, 1),
                };
                self.seed(&client, manifest, options).await
            }
        }
    }

    /// Log in with the global credentials
    async fn login(&self, client: &ApiClient) -> Result<Session> {
        let form = self.login_form()?;
        AuthApi::new(client).login(&form).await
    }

    fn login_form(&self) -> Result<LoginForm> {
        match (&self.cli.email, &self.cli.password) {
            (Some(email), Some(password)) => Ok(LoginForm::new(email.as_str(), password.as_str())),
            _ => Err(Error::config(
                "This command needs an account: pass --email and --password or set MATJIP_EMAIL and MATJIP_PASSWORD",
            )),
        }
    }

    async fn signup(&self, client: &ApiClient, nickname: &str, password_confirm: &str) -> Result<()> {
        let login = self.login_form()?;
        let form = SignupForm {
            email: login.email,
            password: login.password,
            password_confirm: password_confirm.to_string(),
            nickname: nickname.to_string(),
        };
        let user = AuthApi::new(client).signup(&form).await?;
        self.emit(&user)
    }

    async fn me(&self, client: &ApiClient) -> Result<()> {
        let mut session = self.login(client).await?;
        let user = ProfileApi::new(client).get(&mut session).await?;
        self.emit(&user)
    }

    async fn profile_edit(
        &self,
        client: &ApiClient,
        nickname: Option<&str>,
        bio: Option<&str>,
        image: Option<&Path>,
    ) -> Result<()> {
        let mut session = self.login(client).await?;
        let profile = ProfileApi::new(client);

        if nickname.is_some() || bio.is_some() {
            let current = session.user();
            let form = ProfileEditForm {
                nickname: nickname.map_or_else(|| current.nickname.clone(), String::from),
                bio: bio.map(String::from).or_else(|| current.bio.clone()),
            };
            profile.update(&mut session, &form).await?;
        }

        if let Some(image) = image {
            profile.update_image(&mut session, image).await?;
        }

        self.emit(session.user())
    }

    /// Load pages, then print the filtered and sorted view
    async fn list<T>(&self, cursor: PaginatedCursor<ResourcePages<'_, T>>, args: &ListArgs) -> Result<()>
    where
        T: DeserializeOwned + Serialize + Listable + Send,
    {
        let started = Instant::now();
        let pages = cursor.fetch_all(args.max_pages()).await?;
        info!(
            "Loaded {} items in {} pages ({:.2?}){}",
            cursor.len(),
            pages,
            started.elapsed(),
            if cursor.has_more() { ", more available" } else { "" }
        );

        let query = ListQuery::new()
            .keyword(args.keyword.as_str())
            .min_rating(args.min_rating)
            .sort(args.sort.into());
        cursor.with_items(|items| query.apply(items).into_iter().try_for_each(|item| self.emit(item)))
    }

    /// Registration requests have no rating; they print in server order
    async fn list_unsorted<T>(
        &self,
        cursor: PaginatedCursor<ResourcePages<'_, T>>,
        args: &PageArgs,
    ) -> Result<()>
    where
        T: DeserializeOwned + Serialize + Send,
    {
        cursor.fetch_all(args.max_pages()).await?;
        cursor.with_items(|items| items.iter().try_for_each(|item| self.emit(item)))
    }

    async fn request_submit(
        &self,
        client: &ApiClient,
        mut form: RegistrationRequestForm,
        images: &[PathBuf],
    ) -> Result<()> {
        let session = self.login(client).await?;
        let api = RequestsApi::new(client);

        for image in images {
            let uploaded = api.upload_image(&session, image).await?;
            form.image_keys.push(uploaded.key);
        }

        let created = api.submit(&session, &form).await?;
        self.emit(&created)
    }

    async fn request_cancel(&self, client: &ApiClient, page_size: u32, request_id: RecordId) -> Result<()> {
        let session = self.login(client).await?;
        let api = RequestsApi::new(client);

        let cursor = api.cursor(&session, page_size);
        cursor.fetch_all(None).await?;
        let request = cursor
            .with_items(|items| items.iter().find(|r| r.id == request_id).cloned())
            .ok_or_else(|| ApiError::NotFound {
                message: format!("No registration request with id {request_id}"),
            })?;

        api.cancel(&session, &request).await?;
        info!("Cancelled request {}", request_id);
        Ok(())
    }

    async fn seed(&self, client: &ApiClient, manifest: &Path, options: SeedOptions) -> Result<()> {
        let manifest = load_manifest(manifest)?;
        let report = Seeder::new(client, options).run(&manifest).await?;
        self.emit(&report)?;

        if report.is_success() {
            Ok(())
        } else {
            Err(Error::seed(format!(
                "{} of {} records failed",
                report.failed.len(),
                manifest.requests.len()
            )))
        }
    }

    /// Print one value in the selected format
    fn emit<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let text = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{text}");
        Ok(())
    }
}

/// Message shown for a failed command
///
/// Form errors are listed per field; everything else gets its user-facing
/// text.
pub fn describe_error(error: &Error) -> String {
    match error {
        Error::InvalidInput(_) | Error::Api(ApiError::Validation { .. }) => {
            FormErrors::from_error(error).to_string()
        }
        Error::Api(api) if api.requires_login() => {
            format!("{} (check --email/--password)", api.user_message())
        }
        other => other.user_message(),
    }
}
