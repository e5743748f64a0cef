use std::sync::Arc;

use crate::config::ServerConfig;
use crate::snapshot::SnapshotStore;
use crate::utils::encoder_registry::EncoderRegistry;

/// 全局应用状态，负责在各个 handler 之间共享编码器、快照存储与配置
pub struct AppState {
    pub encoder_registry: Arc<EncoderRegistry>,
    pub snapshot_store: Arc<SnapshotStore>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            encoder_registry: Arc::new(EncoderRegistry::new()),
            snapshot_store: Arc::new(SnapshotStore::new(config.snapshot_ttl)),
            config,
        }
    }
}
