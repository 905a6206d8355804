use std::sync::Arc;

use natours_core::IdCheck;
use natours_infra::{AppConfig, InMemoryRecordStore, JsonFileRecordStore, RecordStore, StoreError};

use crate::app::routes::records::{Resource, ResourceContext};

/// Stores behind the two resources, shared by every request.
#[derive(Clone)]
pub struct AppServices {
    tours: Arc<dyn RecordStore>,
    users: Arc<dyn RecordStore>,
    id_check: IdCheck,
}

impl AppServices {
    pub fn new(tours: Arc<dyn RecordStore>, users: Arc<dyn RecordStore>, id_check: IdCheck) -> Self {
        Self {
            tours,
            users,
            id_check,
        }
    }

    /// Tours from the configured JSON file, users in memory.
    pub fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        let tours = JsonFileRecordStore::open(&config.tours_file)?;
        Ok(Self::new(
            Arc::new(tours),
            Arc::new(InMemoryRecordStore::new()),
            config.id_check,
        ))
    }

    pub(crate) fn tours_context(&self) -> ResourceContext {
        ResourceContext::new(Resource::TOURS, self.tours.clone(), self.id_check)
    }

    pub(crate) fn users_context(&self) -> ResourceContext {
        ResourceContext::new(Resource::USERS, self.users.clone(), self.id_check)
    }
}
