use std::path::Path;
use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::Config;
use crate::rules::RuleStore;
use crate::sla::SlaService;
use crate::storage::Storage;
use crate::tickets::TicketStore;

/// Server state: shared handles to every service
///
/// Cheap to clone; everything mutable lives behind an `Arc` and guards
/// its own interior.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    /// Embedded database (rules, users)
    pub storage: Storage,
    pub rules: Arc<RuleStore>,
    pub tickets: Arc<TicketStore>,
    pub sla: Arc<SlaService>,
    jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Initialize all services
    ///
    /// Creates the working directory, opens the database under
    /// `work_dir/database/helpdesk.redb` and loads (or seeds) the
    /// routing rules.
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        let db_dir = Path::new(&config.work_dir).join("database");
        std::fs::create_dir_all(&db_dir)?;

        let storage = Storage::open(db_dir.join("helpdesk.redb"))?;
        Self::with_storage(config, storage)
    }

    /// Build the state on top of an already-open database
    ///
    /// Integration tests use this with an in-memory database.
    pub fn with_storage(config: &Config, storage: Storage) -> anyhow::Result<Self> {
        let rules = Arc::new(RuleStore::load_or_seed(storage.clone())?);
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Ok(Self {
            config: config.clone(),
            storage,
            rules,
            tickets: Arc::new(TicketStore::new()),
            sla: Arc::new(SlaService::new()),
            jwt_service,
        })
    }

    pub fn jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
