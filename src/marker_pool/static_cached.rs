use super::discovery::discover_marker_names;
use super::{MarkerHandle, MarkerId, MarkerPool, PointMarker};
use crate::error::{ChartError, ChartResult};
use crate::transform::ChartBounds;
use glam::Vec2;
use tracing::{debug, trace, warn};

/// Default name prefix of provisioned markers.
pub const MARKER_NAME_PREFIX: &str = "Marker_";

/// Fixed marker set that is only ever shown and hidden.
///
/// The slot order is fixed at construction. `set_active_count(n)` shows the
/// first `n` slots in slot order; `acquire` appends the first hidden slot to
/// the end of the series. Requests beyond the provisioned count are truncated
/// and logged once.
pub struct StaticCachedPool {
    markers: Vec<PointMarker>,
    names: Vec<String>,
    /// Slot indices of visible markers, in series order.
    active: Vec<usize>,
    exhaustion_logged: bool,
}

impl StaticCachedPool {
    /// Takes ownership of an already ordered marker list.
    pub fn new(names: Vec<String>) -> Self {
        let markers = (0..names.len())
            .map(|slot| PointMarker::new(MarkerId(slot as u32)))
            .collect();
        debug!(provisioned = names.len(), "static marker pool cached");
        Self {
            markers,
            active: Vec::with_capacity(names.len()),
            names,
            exhaustion_logged: false,
        }
    }

    /// Provisions `count` markers named `Marker_0 .. Marker_{count-1}`.
    pub fn with_capacity(count: usize) -> Self {
        Self::new(
            (0..count)
                .map(|i| format!("{}{}", MARKER_NAME_PREFIX, i))
                .collect(),
        )
    }

    /// Builds the pool from unordered entity names, keeping those that follow
    /// the `<prefix><ordinal>` convention, sorted by ordinal.
    pub fn discover<I, S>(names: I, prefix: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(discover_marker_names(names, prefix))
    }

    pub fn provisioned(&self) -> usize {
        self.markers.len()
    }

    /// Name of the marker in `slot`.
    pub fn name(&self, slot: usize) -> Option<&str> {
        self.names.get(slot).map(String::as_str)
    }

    fn note_exhaustion(&mut self, requested: usize) {
        let err = ChartError::PoolExhausted {
            requested,
            provisioned: self.markers.len(),
        };
        if self.exhaustion_logged {
            trace!(%err, "series truncated");
        } else {
            warn!(%err, "series truncated to provisioned markers");
            self.exhaustion_logged = true;
        }
    }

    fn reindex_from(&mut self, start: usize) {
        for (index, slot) in self.active.iter().enumerate().skip(start) {
            self.markers[*slot].index = index;
        }
    }
}

impl MarkerPool for StaticCachedPool {
    fn acquire(&mut self) -> ChartResult<MarkerHandle> {
        match self.markers.iter().position(|m| !m.visible) {
            Some(slot) => {
                let marker = &mut self.markers[slot];
                marker.visible = true;
                marker.index = self.active.len();
                self.active.push(slot);
                Ok(MarkerHandle(MarkerId(slot as u32)))
            }
            None => {
                let requested = self.markers.len() + 1;
                self.note_exhaustion(requested);
                Err(ChartError::PoolExhausted {
                    requested,
                    provisioned: self.markers.len(),
                })
            }
        }
    }

    fn release(&mut self, handle: MarkerHandle) -> bool {
        let slot = handle.id().0 as usize;
        let Some(position) = self.active.iter().position(|s| *s == slot) else {
            return false;
        };
        self.active.remove(position);
        self.markers[slot].visible = false;
        self.reindex_from(position);
        true
    }

    fn set_active_count(&mut self, count: usize, _bounds: &ChartBounds) -> usize {
        if count > self.markers.len() {
            self.note_exhaustion(count);
        }
        let granted = count.min(self.markers.len());
        self.active.clear();
        for (slot, marker) in self.markers.iter_mut().enumerate() {
            marker.visible = slot < granted;
            if marker.visible {
                marker.index = slot;
                self.active.push(slot);
            }
        }
        granted
    }

    fn active_count(&self) -> usize {
        self.active.len()
    }

    fn set_position(&mut self, index: usize, position: Vec2) -> bool {
        match self.active.get(index).copied() {
            Some(slot) => {
                self.markers[slot].position = position;
                true
            }
            None => false,
        }
    }

    fn active_markers(&self) -> Box<dyn Iterator<Item = &PointMarker> + '_> {
        Box::new(self.active.iter().map(|slot| &self.markers[*slot]))
    }

    fn total_markers(&self) -> usize {
        self.markers.len()
    }

    fn capacity_limit(&self) -> Option<usize> {
        Some(self.markers.len())
    }

    fn teardown(&mut self) {
        debug!(provisioned = self.markers.len(), "static marker pool torn down");
        self.active.clear();
        self.markers.clear();
        self.names.clear();
        self.active.shrink_to_fit();
        self.markers.shrink_to_fit();
        self.names.shrink_to_fit();
    }
}
