//! redb-based storage layer for locally persisted state
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `rule_state` | `"routingRules"` | `Vec<RoutingRule>` (JSON) | full rule collection |
//! | `rule_state` | `"nextRuleId"` | `i64` (JSON) | monotonic rule id counter |
//! | `users` | username (lowercase) | `User` (JSON) | registered accounts |
//! | `counters` | `"nextUserId"` | `u64` | monotonic user id counter |
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate`: once `commit()` returns the
//! write is persistent and the file is in a consistent state. The rule
//! collection and its counter are always written in a single transaction,
//! so readers never observe a half-persisted rule set.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use thiserror::Error;

use shared::models::{RoutingRule, User};

/// Serialized rule collection plus its id counter, two string keys
const RULE_STATE_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("rule_state");

/// Registered users, keyed by lowercase username
const USERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("users");

/// Monotonic counters
const COUNTERS_TABLE: TableDefinition<&str, u64> = TableDefinition::new("counters");

const ROUTING_RULES_KEY: &str = "routingRules";
const NEXT_RULE_ID_KEY: &str = "nextRuleId";
const NEXT_USER_ID_KEY: &str = "nextUserId";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for crate::utils::AppError {
    fn from(e: StorageError) -> Self {
        crate::utils::AppError::database(e.to_string())
    }
}

/// Local state storage backed by redb
#[derive(Clone)]
pub struct Storage {
    db: Arc<Database>,
}

impl Storage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(RULE_STATE_TABLE)?;
            let _ = write_txn.open_table(USERS_TABLE)?;
            let mut counters = write_txn.open_table(COUNTERS_TABLE)?;
            if counters.get(NEXT_USER_ID_KEY)?.is_none() {
                counters.insert(NEXT_USER_ID_KEY, 1u64)?;
            }
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    // ========== Rule State Operations ==========

    /// Restore the persisted rule collection and id counter
    ///
    /// Returns `None` when nothing was ever persisted (first run).
    pub fn load_rule_state(&self) -> StorageResult<Option<(Vec<RoutingRule>, i64)>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RULE_STATE_TABLE)?;

        let Some(raw_rules) = table.get(ROUTING_RULES_KEY)? else {
            return Ok(None);
        };
        let rules: Vec<RoutingRule> = serde_json::from_slice(raw_rules.value())?;

        let next_id: i64 = match table.get(NEXT_RULE_ID_KEY)? {
            Some(raw) => serde_json::from_slice(raw.value())?,
            // Counter missing but rules present: recover from the max id
            None => rules.iter().map(|r| r.id).max().unwrap_or(0) + 1,
        };

        Ok(Some((rules, next_id)))
    }

    /// Persist the full rule collection and counter atomically
    pub fn save_rule_state(&self, rules: &[RoutingRule], next_id: i64) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(RULE_STATE_TABLE)?;
            let raw_rules = serde_json::to_vec(rules)?;
            let raw_next = serde_json::to_vec(&next_id)?;
            table.insert(ROUTING_RULES_KEY, raw_rules.as_slice())?;
            table.insert(NEXT_RULE_ID_KEY, raw_next.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    // ========== User Operations ==========

    /// Look up a user by username (case-insensitive)
    pub fn find_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(USERS_TABLE)?;
        match table.get(username.to_lowercase().as_str())? {
            Some(raw) => Ok(Some(serde_json::from_slice(raw.value())?)),
            None => Ok(None),
        }
    }

    /// Look up a user by email (case-insensitive full scan)
    ///
    /// The user table is small (operators and registered clients), a scan
    /// is fine here.
    pub fn find_user_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let needle = email.to_lowercase();
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(USERS_TABLE)?;
        for entry in table.iter()? {
            let (_, raw) = entry?;
            let user: User = serde_json::from_slice(raw.value())?;
            if user.email.to_lowercase() == needle {
                return Ok(Some(user));
            }
        }
        Ok(None)
    }

    /// Insert a new user record
    pub fn insert_user(&self, user: &User) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(USERS_TABLE)?;
            let raw = serde_json::to_vec(user)?;
            table.insert(user.username.to_lowercase().as_str(), raw.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Get and increment the user id counter atomically
    pub fn next_user_id(&self) -> StorageResult<i64> {
        let write_txn = self.db.begin_write()?;
        let next = {
            let mut table = write_txn.open_table(COUNTERS_TABLE)?;
            let current = table.get(NEXT_USER_ID_KEY)?.map(|g| g.value()).unwrap_or(1);
            table.insert(NEXT_USER_ID_KEY, current + 1)?;
            current
        };
        write_txn.commit()?;
        Ok(next as i64)
    }
}
