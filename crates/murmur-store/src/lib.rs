mod migrations;
mod store;

pub use store::ChatStore;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("sqlite connection lock poisoned")]
    Lock,
    #[error("blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
