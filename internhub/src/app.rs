//! Application state and initialization
//!
//! This module manages the central application state.
//! All services are initialized here and made available through AppState.

use crate::config::Config;
use crate::database::Store;
use crate::error::Result;
use crate::remote::{AuthGateway, ExtractionClient};
use crate::services::{
    AnnouncementsService, ApplicationsService, CoursesService, HackathonsService, JobsService,
    NotificationsService, ResourcesService, TicketsService, UsersService,
};

/// Central application state holding all services
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub users: UsersService,
    pub jobs: JobsService,
    pub applications: ApplicationsService,
    pub notifications: NotificationsService,
    pub hackathons: HackathonsService,
    pub courses: CoursesService,
    pub resources: ResourcesService,
    pub announcements: AnnouncementsService,
    pub tickets: TicketsService,
    pub gateway: AuthGateway,
    pub extraction: ExtractionClient,
}

impl AppState {
    /// Open the on-disk store named in `config`, seed it and wire every service
    pub async fn open(config: &Config) -> Result<Self> {
        tracing::info!("Initializing application");
        tracing::info!("Database path: {:?}", config.db_path);

        let store = Store::open(&config.db_path).await?;
        let state = Self::from_store(store, config)?;

        tracing::info!("Application initialized successfully");
        Ok(state)
    }

    /// Wire every service over an already-opened store
    pub fn from_store(store: Store, config: &Config) -> Result<Self> {
        let notifications = NotificationsService::new(store.clone());

        Ok(Self {
            users: UsersService::new(store.clone()),
            jobs: JobsService::new(store.clone()),
            applications: ApplicationsService::new(store.clone(), notifications.clone()),
            notifications,
            hackathons: HackathonsService::new(store.clone()),
            courses: CoursesService::new(store.clone()),
            resources: ResourcesService::new(store.clone()),
            announcements: AnnouncementsService::new(store.clone()),
            tickets: TicketsService::new(store.clone()),
            gateway: AuthGateway::new(config.api_url.clone(), config.http_timeout, store.clone())?,
            extraction: ExtractionClient::new(config.extract_url.clone(), config.http_timeout)?,
            store,
        })
    }
}
