use glam::Vec2;
use parking_lot::{RwLock, RwLockReadGuard};
use std::sync::Arc;

/// Read-only view of a chart's latest committed marker positions (bounds-local).
///
/// Clones share storage: the owning chart republishes in place, so every holder
/// sees the new positions as soon as an update completes.
#[derive(Clone, Debug, Default)]
pub struct MarkerSnapshot {
    positions: Arc<RwLock<Vec<Vec2>>>,
}

impl MarkerSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Vec<Vec2>> {
        self.positions.read()
    }

    pub fn to_vec(&self) -> Vec<Vec2> {
        self.positions.read().clone()
    }

    pub fn len(&self) -> usize {
        self.positions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.read().is_empty()
    }

    /// True when both handles share the same storage.
    pub fn shares_storage_with(&self, other: &MarkerSnapshot) -> bool {
        Arc::ptr_eq(&self.positions, &other.positions)
    }

    pub(crate) fn publish(&self, fill: impl FnOnce(&mut Vec<Vec2>)) {
        let mut guard = self.positions.write();
        guard.clear();
        fill(&mut *guard);
    }
}

impl From<Vec<Vec2>> for MarkerSnapshot {
    fn from(positions: Vec<Vec2>) -> Self {
        Self {
            positions: Arc::new(RwLock::new(positions)),
        }
    }
}
