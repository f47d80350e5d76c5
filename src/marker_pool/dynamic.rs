use super::{placeholder_position, MarkerHandle, MarkerId, MarkerPool, PointMarker};
use crate::error::ChartResult;
use crate::transform::ChartBounds;
use glam::Vec2;
use tracing::{debug, trace};

/// Grow-on-demand pool backed by a free list.
///
/// Markers are never freed individually: the pool only ever holds as many as
/// the largest active count it has served (or its warm count, if larger).
pub struct DynamicPool {
    markers: Vec<PointMarker>,
    active: Vec<MarkerId>,
    free: Vec<MarkerId>,
}

impl DynamicPool {
    pub fn new(warm_count: usize) -> Self {
        let mut pool = Self {
            markers: Vec::with_capacity(warm_count),
            active: Vec::with_capacity(warm_count),
            free: Vec::with_capacity(warm_count),
        };
        for _ in 0..warm_count {
            let id = pool.create();
            pool.free.push(id);
        }
        // Pop order hands out the lowest ids first.
        pool.free.reverse();
        debug!(warm_count, "dynamic marker pool warmed");
        pool
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    fn create(&mut self) -> MarkerId {
        let id = MarkerId(self.markers.len() as u32);
        self.markers.push(PointMarker::new(id));
        id
    }

    fn marker_mut(&mut self, id: MarkerId) -> &mut PointMarker {
        &mut self.markers[id.0 as usize]
    }

    fn activate(&mut self) -> MarkerId {
        let id = match self.free.pop() {
            Some(id) => id,
            None => {
                let id = self.create();
                trace!(total = self.markers.len(), "dynamic marker pool grew");
                id
            }
        };
        let index = self.active.len();
        let marker = self.marker_mut(id);
        marker.visible = true;
        marker.index = index;
        self.active.push(id);
        id
    }
}

impl MarkerPool for DynamicPool {
    fn acquire(&mut self) -> ChartResult<MarkerHandle> {
        Ok(MarkerHandle(self.activate()))
    }

    fn release(&mut self, handle: MarkerHandle) -> bool {
        let Some(slot) = self.active.iter().position(|id| *id == handle.id()) else {
            return false;
        };
        self.active.remove(slot);
        for (index, id) in self.active.iter().enumerate().skip(slot) {
            self.markers[id.0 as usize].index = index;
        }
        self.marker_mut(handle.id()).visible = false;
        self.free.push(handle.id());
        true
    }

    fn set_active_count(&mut self, count: usize, bounds: &ChartBounds) -> usize {
        let current = self.active.len();
        if count < current {
            for id in self.active.drain(count..) {
                self.markers[id.0 as usize].visible = false;
                self.free.push(id);
            }
        } else {
            for index in current..count {
                let id = self.activate();
                self.marker_mut(id).position = placeholder_position(index, count, bounds);
            }
        }
        count
    }

    fn active_count(&self) -> usize {
        self.active.len()
    }

    fn set_position(&mut self, index: usize, position: Vec2) -> bool {
        match self.active.get(index).copied() {
            Some(id) => {
                self.marker_mut(id).position = position;
                true
            }
            None => false,
        }
    }

    fn active_markers(&self) -> Box<dyn Iterator<Item = &PointMarker> + '_> {
        Box::new(self.active.iter().map(|id| &self.markers[id.0 as usize]))
    }

    fn total_markers(&self) -> usize {
        self.markers.len()
    }

    fn capacity_limit(&self) -> Option<usize> {
        None
    }

    fn teardown(&mut self) {
        debug!(total = self.markers.len(), "dynamic marker pool torn down");
        self.active.clear();
        self.free.clear();
        self.markers.clear();
        self.active.shrink_to_fit();
        self.free.shrink_to_fit();
        self.markers.shrink_to_fit();
    }
}
