//! Line chart model.
//!
//! `LineChart` ties the pieces together: a normalized series goes through the
//! coordinate pipeline into the marker pool, the resulting marker positions
//! are projected into the render container and turned into line geometry.
//! Every operation completes synchronously and never fails towards the
//! caller: problems are logged and leave the chart cleared or inert.

use crate::data_types::{
    normalize_series_into, ChartConfig, Dataset, LineStyle, MarkerSnapshot, TooltipState,
};
use crate::error::{ChartError, ChartResult};
use crate::marker_pool::{build_pool, MarkerPool, PointMarker};
use crate::mesh::{LineGeometry, PolylineMeshBuilder};
use crate::tooltip::{TooltipController, TooltipIntent};
use crate::transform::{BoundsRegion, ChartBounds, CoordinatePipeline, RenderContainer};
use glam::Vec2;
use tracing::{debug, error, trace, warn};

pub struct LineChart {
    region: Option<BoundsRegion>,
    container: RenderContainer,
    /// Present only when `region` is set and valid for `container`.
    pipeline: Option<CoordinatePipeline>,
    pool: Box<dyn MarkerPool>,
    mesh: PolylineMeshBuilder,
    style: LineStyle,
    tooltip: TooltipController,
    snapshot: MarkerSnapshot,
    /// Last accepted series, normalized.
    values: Vec<f32>,
    projected: Vec<Vec2>,
    dirty: bool,
    render_version: u64,
}

impl LineChart {
    pub fn new(config: ChartConfig) -> Self {
        let pool = build_pool(&config.pool);
        Self::with_pool(pool, config)
    }

    /// Uses a caller-built pool (e.g. a [`StaticCachedPool`](crate::StaticCachedPool)
    /// discovered from scene names) instead of `config.pool`.
    pub fn with_pool(pool: Box<dyn MarkerPool>, config: ChartConfig) -> Self {
        let style = match config.line.validate() {
            Ok(()) => config.line,
            Err(err) => {
                warn!(%err, "falling back to default line style");
                LineStyle::default()
            }
        };
        Self {
            region: None,
            container: RenderContainer::default(),
            pipeline: None,
            pool,
            mesh: PolylineMeshBuilder::new(),
            style,
            tooltip: TooltipController::new(config.tooltip),
            snapshot: MarkerSnapshot::new(),
            values: Vec::new(),
            projected: Vec::new(),
            dirty: false,
            render_version: 0,
        }
    }

    /// Binds the chart to its bounds, starting from a cleared chart.
    ///
    /// `None` is logged as a configuration error and leaves the chart cleared
    /// and inert, dropping any series and tooltip binding it was showing.
    pub fn initialize(&mut self, region: Option<BoundsRegion>) {
        let Some(region) = region else {
            error!(err = %ChartError::MissingBounds, "chart initialize failed");
            self.region = None;
            self.pipeline = None;
            self.clear_chart();
            return;
        };
        self.clear_chart();
        self.bind(region);
        debug!(bounds = ?region.bounds, "chart initialized");
    }

    /// Rebinds bounds after a layout change and replays the last series.
    pub fn relayout(&mut self, region: BoundsRegion) {
        self.bind(region);
        self.replay();
    }

    /// Layout change of both the bounds and the container, replayed once.
    pub fn relayout_in(&mut self, region: BoundsRegion, container: RenderContainer) {
        self.container = container;
        self.relayout(region);
    }

    pub fn set_container(&mut self, container: RenderContainer) {
        self.container = container;
        if let Some(region) = self.region {
            self.bind(region);
        }
        self.replay();
    }

    pub fn container(&self) -> &RenderContainer {
        &self.container
    }

    pub fn region(&self) -> Option<&BoundsRegion> {
        self.region.as_ref()
    }

    pub fn pipeline(&self) -> Option<&CoordinatePipeline> {
        self.pipeline.as_ref()
    }

    fn bind(&mut self, region: BoundsRegion) {
        self.region = Some(region);
        self.pipeline = match CoordinatePipeline::new(region, self.container) {
            Ok(pipeline) => Some(pipeline),
            Err(err) => {
                match err {
                    ChartError::DegenerateBounds { .. } => warn!(%err, "chart bounds unusable"),
                    _ => error!(%err, "chart bounds unusable"),
                }
                None
            }
        };
    }

    /// Replays the last accepted series. Without a usable pipeline the
    /// markers and geometry are hidden but the series and the tooltip binding
    /// are kept for the next successful layout.
    fn replay(&mut self) {
        if self.values.is_empty() {
            return;
        }
        if self.pipeline.is_none() {
            self.hide_series();
            debug!(kept = self.values.len(), "series hidden until the next usable layout");
            return;
        }
        let values = std::mem::take(&mut self.values);
        self.update_chart(&values);
    }

    fn hide_series(&mut self) {
        let bounds = self
            .region
            .map(|r| r.bounds)
            .unwrap_or(ChartBounds::new(Vec2::ZERO, Vec2::ZERO));
        self.pool.set_active_count(0, &bounds);
        self.projected.clear();
        self.snapshot.publish(|_| {});
        self.mesh.clear();
        self.tooltip.hide();
        self.tooltip.invalidate_hover();
        self.mark_dirty();
    }

    /// Shows a new series of magnitudes in `[0, 1]` (out-of-range values are clamped).
    /// Empty input or unusable bounds clear the chart.
    pub fn update_chart(&mut self, values: &[f32]) {
        if let Err(err) = self.try_update(values) {
            match err {
                ChartError::EmptySeries => debug!("empty series, clearing chart"),
                _ => warn!(%err, "chart update rejected, clearing chart"),
            }
            self.clear_chart();
        }
    }

    fn try_update(&mut self, values: &[f32]) -> ChartResult<()> {
        if values.is_empty() {
            return Err(ChartError::EmptySeries);
        }
        if self.region.is_none() {
            return Err(ChartError::MissingBounds);
        }
        let Some(pipeline) = self.pipeline.as_ref() else {
            let bounds = self.region.as_ref().map(|r| r.bounds);
            return Err(match bounds {
                Some(b) if b.is_degenerate() => ChartError::DegenerateBounds {
                    width: b.width(),
                    height: b.height(),
                },
                _ => ChartError::SingularTransform,
            });
        };

        normalize_series_into(values, &mut self.values);
        let count = self.pool.set_active_count(self.values.len(), pipeline.bounds());
        for (index, magnitude) in self.values.iter().take(count).enumerate() {
            let position = pipeline.domain_to_bounds_local(index, count, *magnitude);
            self.pool.set_position(index, position);
        }

        let pool = &self.pool;
        self.snapshot.publish(|positions| pool.positions_into(positions));
        self.rebuild_geometry();
        self.tooltip.invalidate_hover();
        trace!(requested = values.len(), shown = count, "chart updated");
        Ok(())
    }

    fn rebuild_geometry(&mut self) {
        match &self.pipeline {
            Some(pipeline) => {
                let positions = self.snapshot.read();
                let skipped = pipeline.project_into(&positions, &mut self.projected);
                if skipped > 0 {
                    trace!(skipped, "markers outside the projectable volume");
                }
            }
            None => self.projected.clear(),
        }
        self.mesh
            .rebuild(&self.projected, self.style.thickness, self.style.color);
        self.mark_dirty();
    }

    /// Hides every marker, empties geometry and resets the tooltip.
    pub fn clear_chart(&mut self) {
        self.hide_series();
        self.values.clear();
        self.tooltip.reset();
    }

    /// Releases all markers and pool storage. The chart stays inert until
    /// the next [`initialize`](Self::initialize).
    pub fn teardown(&mut self) {
        self.clear_chart();
        self.pool.teardown();
        self.region = None;
        self.pipeline = None;
        debug!("chart torn down");
    }

    pub fn style(&self) -> &LineStyle {
        &self.style
    }

    /// Rebuilds geometry from the current markers with the new style.
    pub fn set_style(&mut self, style: LineStyle) {
        if let Err(err) = style.validate() {
            warn!(%err, "line style rejected");
            return;
        }
        self.style = style;
        if self.pool.active_count() > 0 {
            self.rebuild_geometry();
        }
    }

    /// Shared, always-current view of the bounds-local marker positions.
    pub fn marker_positions(&self) -> MarkerSnapshot {
        self.snapshot.clone()
    }

    pub fn markers(&self) -> impl Iterator<Item = &PointMarker> + '_ {
        self.pool.active_markers()
    }

    pub fn pool(&self) -> &dyn MarkerPool {
        self.pool.as_ref()
    }

    /// Normalized values currently on screen (possibly truncated by the pool).
    pub fn values(&self) -> &[f32] {
        &self.values[..self.pool.active_count().min(self.values.len())]
    }

    /// Marker positions projected into the render container.
    pub fn container_positions(&self) -> &[Vec2] {
        &self.projected
    }

    pub fn geometry(&self) -> &LineGeometry {
        self.mesh.geometry()
    }

    pub fn initialize_tooltip(&mut self, positions: MarkerSnapshot, dataset: Option<Dataset>) {
        self.tooltip.initialize(positions, dataset);
    }

    pub fn hide_tooltip(&mut self) -> TooltipIntent {
        self.tooltip.hide()
    }

    /// Per-input-tick pointer handling; `pointer` is container-local.
    pub fn on_tick(&mut self, pointer: Option<Vec2>) -> TooltipIntent {
        self.tooltip.on_tick(pointer, self.pipeline.as_ref())
    }

    pub fn tooltip_state(&self) -> TooltipState {
        self.tooltip.state()
    }

    pub fn tooltip(&self) -> &TooltipController {
        &self.tooltip
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns and clears the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn render_version(&self) -> u64 {
        self.render_version
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
        self.render_version += 1;
    }
}

impl Default for LineChart {
    fn default() -> Self {
        Self::new(ChartConfig::default())
    }
}
