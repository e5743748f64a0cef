use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use uuid::Uuid;

use crate::utils::particle_table::ParticleTable;

/// 上传的快照数据，某一时刻的完整粒子表
pub struct SnapshotData {
    /// 快照标签，例如 "10ns"
    pub label: String,
    pub table: ParticleTable,
    /// 创建时间，用于 TTL 过期检查
    pub created_at: Instant,
}

impl SnapshotData {
    pub fn new(label: String, table: ParticleTable) -> Self {
        Self {
            label,
            table,
            created_at: Instant::now(),
        }
    }
}

/// 快照存储，按 snapshot_id 保存已上传的粒子表
/// 同一快照可以反复按不同类型/视角/分辨率生成网格
pub struct SnapshotStore {
    snapshots: RwLock<HashMap<String, Arc<SnapshotData>>>,
    /// TTL（Time-To-Live）过期时间
    default_ttl: Duration,
}

impl SnapshotStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            snapshots: RwLock::new(HashMap::new()),
            default_ttl: ttl,
        }
    }

    pub fn insert(&self, data: SnapshotData) -> String {
        let snapshot_id = Uuid::new_v4().to_string();
        self.snapshots
            .write()
            .insert(snapshot_id.clone(), Arc::new(data));
        snapshot_id
    }

    pub fn get(&self, snapshot_id: &str) -> Option<Arc<SnapshotData>> {
        self.snapshots.read().get(snapshot_id).cloned()
    }

    pub fn remove(&self, snapshot_id: &str) -> Option<Arc<SnapshotData>> {
        self.snapshots.write().remove(snapshot_id)
    }

    /// 清理过期的快照
    /// 返回清理的快照数量
    pub fn cleanup_expired(&self) -> usize {
        let now = Instant::now();
        let mut snapshots = self.snapshots.write();
        let before_count = snapshots.len();

        snapshots.retain(|_, snapshot| now.duration_since(snapshot.created_at) < self.default_ttl);

        before_count - snapshots.len()
    }

    /// 获取当前快照数量
    pub fn snapshot_count(&self) -> usize {
        self.snapshots.read().len()
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}
