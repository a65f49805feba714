use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use sqlx::SqlitePool;
use tokio::sync::Mutex;

use crate::config::Settings;

/// Shared data available to all commands and handlers
pub struct Data {
    pub pool: SqlitePool,
    pub settings: Settings,
    /// Per-guild send locks. The select-then-record sequence is a critical
    /// section shared by the scheduler tick and /sendnow.
    send_locks: DashMap<i64, Arc<Mutex<()>>>,
}

impl Data {
    pub fn new(pool: SqlitePool, settings: Settings) -> Self {
        Self {
            pool,
            settings,
            send_locks: DashMap::new(),
        }
    }

    /// Get (or create) the send lock for a guild
    pub fn send_lock(&self, guild_id: i64) -> Arc<Mutex<()>> {
        self.send_locks
            .entry(guild_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Data")
            .field("send_locks_count", &self.send_locks.len())
            .finish_non_exhaustive()
    }
}

pub type Context<'a> = poise::Context<'a, Arc<Data>, crate::bot::error::Error>;
