//! Proximity tooltip controller.
//!
//! Every input tick the host hands over the pointer position (container-local).
//! The controller maps it back into bounds-local space, scans the bound
//! marker positions for the nearest one within the detection radius and
//! turns the result into a show/hide intent for the host to render.

use crate::data_types::{Dataset, HoverState, MarkerSnapshot, TooltipConfig, TooltipState};
use crate::transform::CoordinatePipeline;
use crate::utils::date_formatter::{determine_date_format, format_timestamp};
use chrono::{DateTime, Utc};
use glam::Vec2;
use tracing::{trace, warn};

#[derive(Clone, Debug, PartialEq)]
pub struct TooltipContent {
    pub index: usize,
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TooltipIntent {
    /// Show (or move) the tooltip; `position` is container-local.
    Show {
        content: TooltipContent,
        position: Vec2,
    },
    Hide,
    /// Nothing to do this tick.
    Unchanged,
}

/// Index of the position nearest to `point`, if within `radius`.
/// Ties go to the lower index.
pub fn nearest_marker(positions: &[Vec2], point: Vec2, radius: f32) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, p) in positions.iter().enumerate() {
        let d = p.distance_squared(point);
        if best.map_or(true, |(_, b)| d < b) {
            best = Some((index, d));
        }
    }
    best.filter(|(_, d)| *d <= radius * radius).map(|(i, _)| i)
}

pub struct TooltipController {
    config: TooltipConfig,
    positions: MarkerSnapshot,
    dataset: Option<Dataset>,
    state: TooltipState,
}

impl TooltipController {
    pub fn new(config: TooltipConfig) -> Self {
        Self {
            config,
            positions: MarkerSnapshot::new(),
            dataset: None,
            state: TooltipState::default(),
        }
    }

    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TooltipConfig) {
        self.config = config;
        self.invalidate_hover();
    }

    /// Binds marker positions and their dataset. A missing or empty dataset
    /// keeps the controller suppressed until the next call.
    pub fn initialize(&mut self, positions: MarkerSnapshot, dataset: Option<Dataset>) {
        self.positions = positions;
        self.dataset = dataset.filter(|d| !d.is_empty());
        self.state.reset();
        if self.dataset.is_none() {
            warn!("tooltip initialized without data, staying suppressed");
            self.state.hover = HoverState::Suppressed;
        }
    }

    pub fn state(&self) -> TooltipState {
        self.state
    }

    pub fn hover(&self) -> HoverState {
        self.state.hover
    }

    pub fn hovered_index(&self) -> Option<usize> {
        self.state.hovered_index()
    }

    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    pub fn has_data(&self) -> bool {
        self.dataset.is_some()
    }

    pub fn positions(&self) -> &MarkerSnapshot {
        &self.positions
    }

    pub fn hide(&mut self) -> TooltipIntent {
        let was_visible = self.state.visible;
        self.state = TooltipState {
            hover: if self.has_data() {
                HoverState::Idle
            } else {
                HoverState::Suppressed
            },
            visible: false,
        };
        if was_visible {
            TooltipIntent::Hide
        } else {
            TooltipIntent::Unchanged
        }
    }

    /// Drops positions, dataset and state.
    pub fn reset(&mut self) {
        self.positions = MarkerSnapshot::new();
        self.dataset = None;
        self.state.reset();
    }

    /// Forces the next hit to refresh content even on the same index.
    pub fn invalidate_hover(&mut self) {
        if let HoverState::Hovering(_) = self.state.hover {
            self.state.hover = HoverState::Idle;
        }
    }

    pub fn on_tick(
        &mut self,
        pointer: Option<Vec2>,
        pipeline: Option<&CoordinatePipeline>,
    ) -> TooltipIntent {
        let Some(dataset) = self.dataset.as_ref() else {
            return self.suppress();
        };
        let (Some(pointer), Some(pipeline)) = (pointer, pipeline) else {
            return self.suppress();
        };
        let Some(local) = pipeline.to_bounds_local(pointer) else {
            return self.suppress();
        };
        if !pipeline
            .bounds()
            .contains_with_trailing_margin(local, self.config.trailing_margin)
        {
            return self.suppress();
        }

        let hit = {
            let positions = self.positions.read();
            nearest_marker(&positions, local, self.config.detection_radius)
                .map(|index| (index, positions[index], positions.len()))
        };
        let Some((index, marker, count)) = hit else {
            return self.suppress();
        };

        if self.state.visible && self.state.hover == HoverState::Hovering(index) {
            return TooltipIntent::Unchanged;
        }

        let Some((timestamp, value)) = dataset.sample(index) else {
            return self.suppress();
        };
        let Some(anchor) = pipeline.to_container(marker) else {
            return self.suppress();
        };

        let content = TooltipContent {
            index,
            timestamp,
            value,
            label: self.format_label(dataset, timestamp, value),
        };
        let position = self.place(anchor, index, count);
        trace!(index, "tooltip hovering");
        self.state = TooltipState {
            hover: HoverState::Hovering(index),
            visible: true,
        };
        TooltipIntent::Show { content, position }
    }

    fn suppress(&mut self) -> TooltipIntent {
        let was_visible = self.state.visible;
        self.state = TooltipState {
            hover: HoverState::Suppressed,
            visible: false,
        };
        if was_visible {
            TooltipIntent::Hide
        } else {
            TooltipIntent::Unchanged
        }
    }

    /// Above the marker, pushed inwards near either end of the series.
    fn place(&self, anchor: Vec2, index: usize, count: usize) -> Vec2 {
        let edge = self.config.edge_index_count;
        let shift = if index < edge {
            self.config.edge_shift
        } else if index + edge >= count {
            -self.config.edge_shift
        } else {
            0.0
        };
        anchor + Vec2::new(shift, -self.config.vertical_offset)
    }

    fn format_label(&self, dataset: &Dataset, timestamp: DateTime<Utc>, value: f64) -> String {
        let time = if self.config.time_format.is_empty() {
            let span = dataset.sample_interval.num_milliseconds() as f64 / 1000.0
                * dataset.len() as f64;
            format_timestamp(timestamp, self.config.timezone, determine_date_format(span).pattern())
        } else {
            format_timestamp(timestamp, self.config.timezone, &self.config.time_format)
        };
        format!(
            "{} · {:.*}{}",
            time, self.config.value_precision, value, self.config.unit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_marker() {
        let positions = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(20.0, 0.0)];
        assert_eq!(nearest_marker(&positions, Vec2::new(9.0, 1.0), 5.0), Some(1));
        assert_eq!(nearest_marker(&positions, Vec2::new(5.0, 0.0), 5.0), Some(0));
        assert_eq!(nearest_marker(&positions, Vec2::new(5.0, 40.0), 5.0), None);
        assert_eq!(nearest_marker(&[], Vec2::ZERO, 5.0), None);
    }

    #[test]
    fn test_edge_placement() {
        let controller = TooltipController::new(TooltipConfig {
            edge_index_count: 2,
            edge_shift: 40.0,
            vertical_offset: 10.0,
            ..Default::default()
        });
        let anchor = Vec2::new(100.0, 100.0);
        assert_eq!(controller.place(anchor, 0, 10), Vec2::new(140.0, 90.0));
        assert_eq!(controller.place(anchor, 5, 10), Vec2::new(100.0, 90.0));
        assert_eq!(controller.place(anchor, 9, 10), Vec2::new(60.0, 90.0));
    }
}
