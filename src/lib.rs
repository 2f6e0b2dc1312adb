pub mod commands;
pub mod config;
pub mod download;
pub mod events;
pub mod pending;
pub mod sweeper;
pub mod transport;
pub mod utils;

use std::sync::Arc;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

pub struct Data {
    pub pending: pending::PendingStore,
    pub settings: download::DownloadSettings,
    pub engine: Arc<dyn download::engine::MediaEngine>,
}
