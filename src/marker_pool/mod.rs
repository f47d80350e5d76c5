//! Pooled point markers.
//!
//! A chart never creates or destroys markers on its update path: it asks its
//! pool for an active count and then positions the active markers in series
//! order. Two strategies implement [`MarkerPool`]:
//!
//! * [`DynamicPool`] grows on demand and recycles surplus markers through a
//!   free list. Growth is bounded by the largest series ever shown.
//! * [`StaticCachedPool`] owns a fixed, pre-provisioned marker set and only
//!   toggles visibility. Series longer than the set are truncated.

pub mod discovery;
pub mod dynamic;
pub mod static_cached;

pub use discovery::discover_marker_names;
pub use dynamic::DynamicPool;
pub use static_cached::StaticCachedPool;

use crate::data_types::PoolConfig;
use crate::error::ChartResult;
use crate::transform::{horizontal_ratio, ChartBounds};
use glam::Vec2;

/// Stable identity of a marker for the lifetime of its pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u32);

/// Ticket returned by [`MarkerPool::acquire`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MarkerHandle(MarkerId);

impl MarkerHandle {
    pub fn id(&self) -> MarkerId {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointMarker {
    pub id: MarkerId,
    /// Position in the series; only meaningful while visible.
    pub index: usize,
    /// Bounds-local position.
    pub position: Vec2,
    pub visible: bool,
}

impl PointMarker {
    fn new(id: MarkerId) -> Self {
        Self {
            id,
            index: 0,
            position: Vec2::ZERO,
            visible: false,
        }
    }
}

/// Placeholder position for a freshly activated marker: even horizontal
/// spread over `count`, bottom of the bounds. Valid even for degenerate bounds.
pub(crate) fn placeholder_position(index: usize, count: usize, bounds: &ChartBounds) -> Vec2 {
    bounds.lerp(Vec2::new(horizontal_ratio(index, count), 0.0))
}

pub trait MarkerPool: Send {
    /// Activates one more marker at the end of the series.
    fn acquire(&mut self) -> ChartResult<MarkerHandle>;

    /// Deactivates the marker; later markers shift down one index.
    /// Returns false for handles that are not active in this pool.
    fn release(&mut self, handle: MarkerHandle) -> bool;

    /// Makes exactly `count` markers active (fewer if the pool is capped) and
    /// returns the number actually active.
    fn set_active_count(&mut self, count: usize, bounds: &ChartBounds) -> usize;

    fn active_count(&self) -> usize;

    /// Moves the active marker at series `index`. False if out of range.
    fn set_position(&mut self, index: usize, position: Vec2) -> bool;

    /// Active markers, in series order.
    fn active_markers(&self) -> Box<dyn Iterator<Item = &PointMarker> + '_>;

    /// Every marker owned by the pool, active or not.
    fn total_markers(&self) -> usize;

    /// Hard cap on the active count, if any.
    fn capacity_limit(&self) -> Option<usize>;

    /// Releases every marker and frees pool storage.
    fn teardown(&mut self);

    fn positions_into(&self, out: &mut Vec<Vec2>) {
        out.clear();
        out.extend(self.active_markers().map(|m| m.position));
    }

    fn positions(&self) -> Vec<Vec2> {
        let mut out = Vec::with_capacity(self.active_count());
        self.positions_into(&mut out);
        out
    }
}

/// Builds the pool strategy named by `config`.
pub fn build_pool(config: &PoolConfig) -> Box<dyn MarkerPool> {
    match config {
        PoolConfig::Dynamic { warm_count } => Box::new(DynamicPool::new(*warm_count)),
        PoolConfig::StaticCached { provisioned } => {
            Box::new(StaticCachedPool::with_capacity(*provisioned))
        }
    }
}
