//! gpui view hosting a [`LineChart`].
//!
//! The view owns the series and dataset it shows. The canvas size defines the
//! chart bounds, so the chart is (re)laid out from the paint pass whenever the
//! canvas moves or resizes, and geometry is painted in the same frame.

use crate::chart::LineChart;
use crate::data_types::{Dataset, MarkerStyle};
use crate::mesh::LineGeometry;
use crate::theme::ChartTheme;
use crate::tooltip::{TooltipContent, TooltipIntent};
use crate::transform::{BoundsRegion, ChartBounds, RenderContainer};
use crate::utils::{to_point, PixelsExt, PointExt};
use glam::{Affine2, Vec2};
use gpui::prelude::*;
use gpui::*;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Bounds region and container for a canvas laid out at `bounds` (window pixels).
///
/// Bounds-local space is the canvas itself with y pointing up; the container is
/// the canvas with y pointing down, so container-local coordinates are the
/// offsets from the canvas origin.
pub fn layout_for(bounds: Bounds<Pixels>) -> (BoundsRegion, RenderContainer) {
    let origin = bounds.origin.to_vec2();
    let width = bounds.size.width.as_f32();
    let height = bounds.size.height.as_f32();
    let placement = Affine2::from_translation(origin + Vec2::new(0.0, height))
        * Affine2::from_scale(Vec2::new(1.0, -1.0));
    let region =
        BoundsRegion::new(ChartBounds::from_rect(0.0, 0.0, width, height)).with_placement(placement);
    (region, RenderContainer::overlay(Affine2::from_translation(origin)))
}

pub struct LineChartView {
    pub chart: Entity<LineChart>,
    pub marker_style: MarkerStyle,
    pub theme: ChartTheme,
    values: Vec<f32>,
    dataset: Option<Dataset>,
    tooltip: Option<(TooltipContent, Vec2)>,
    canvas_bounds: Rc<RefCell<Bounds<Pixels>>>,
    laid_out: Option<Bounds<Pixels>>,
}

impl LineChartView {
    pub fn new(chart: Entity<LineChart>, cx: &mut Context<Self>) -> Self {
        cx.observe(&chart, |_, _, cx| cx.notify()).detach();
        Self {
            chart,
            marker_style: MarkerStyle::default(),
            theme: ChartTheme::default(),
            values: Vec::new(),
            dataset: None,
            tooltip: None,
            canvas_bounds: Rc::new(RefCell::new(Bounds::default())),
            laid_out: None,
        }
    }

    pub fn with_marker_style(mut self, style: MarkerStyle) -> Self {
        self.marker_style = style;
        self
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn tooltip(&self) -> Option<&(TooltipContent, Vec2)> {
        self.tooltip.as_ref()
    }

    /// Replaces the series. Applied right away once the canvas has been laid
    /// out, otherwise on the first layout.
    pub fn set_data(&mut self, values: Vec<f32>, dataset: Option<Dataset>, cx: &mut Context<Self>) {
        self.values = values;
        self.dataset = dataset;
        if self.laid_out.is_some() {
            self.push_data(cx);
        }
        cx.notify();
    }

    pub fn clear(&mut self, cx: &mut Context<Self>) {
        self.values.clear();
        self.dataset = None;
        self.tooltip = None;
        self.chart.update(cx, |chart, _| chart.clear_chart());
        cx.notify();
    }

    pub fn hide_tooltip(&mut self, cx: &mut Context<Self>) {
        let intent = self.chart.update(cx, |chart, _| chart.hide_tooltip());
        self.apply_intent(intent, cx);
    }

    fn push_data(&mut self, cx: &mut Context<Self>) {
        let values = &self.values;
        let dataset = self.dataset.clone();
        self.chart.update(cx, |chart, _| {
            chart.update_chart(values);
            let positions = chart.marker_positions();
            chart.initialize_tooltip(positions, dataset);
        });
        self.tooltip = None;
    }

    fn sync_layout(&mut self, bounds: Bounds<Pixels>, cx: &mut Context<Self>) {
        let (region, container) = layout_for(bounds);
        let first = self.laid_out.is_none();
        self.laid_out = Some(bounds);
        self.tooltip = None;
        if first {
            self.chart.update(cx, |chart, _| {
                chart.set_container(container);
                chart.initialize(Some(region));
            });
            if !self.values.is_empty() {
                self.push_data(cx);
            }
        } else {
            self.chart
                .update(cx, |chart, _| chart.relayout_in(region, container));
        }
        debug!(?bounds, first, "line chart laid out");
    }

    fn apply_intent(&mut self, intent: TooltipIntent, cx: &mut Context<Self>) {
        match intent {
            TooltipIntent::Show { content, position } => {
                self.tooltip = Some((content, position));
                cx.notify();
            }
            TooltipIntent::Hide => {
                self.tooltip = None;
                cx.notify();
            }
            TooltipIntent::Unchanged => {}
        }
    }

    fn handle_mouse_move(
        &mut self,
        event: &MouseMoveEvent,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if self.laid_out.is_none() {
            return;
        }
        let origin = self.canvas_bounds.borrow().origin;
        let pointer = (event.position - origin).to_vec2();
        let intent = self.chart.update(cx, |chart, _| chart.on_tick(Some(pointer)));
        self.apply_intent(intent, cx);
    }

    fn handle_hover(&mut self, hovered: &bool, _window: &mut Window, cx: &mut Context<Self>) {
        if *hovered {
            return;
        }
        let intent = self.chart.update(cx, |chart, _| chart.on_tick(None));
        self.apply_intent(intent, cx);
    }

    fn render_tooltip(&self) -> Option<Div> {
        let (content, position) = self.tooltip.as_ref()?;
        Some(
            div()
                .absolute()
                .left(px(position.x))
                .top(px(position.y))
                .px_1()
                .bg(self.theme.tooltip_background)
                .border_1()
                .border_color(self.theme.tooltip_border)
                .rounded_sm()
                .text_size(self.theme.tooltip_text_size)
                .text_color(self.theme.tooltip_text)
                .child(content.label.clone()),
        )
    }
}

fn paint_line(window: &mut Window, origin: Vec2, geometry: &LineGeometry, color: Hsla) {
    for quad in geometry.quads() {
        let mut builder = PathBuilder::fill();
        builder.move_to(to_point(origin + quad[0]));
        for corner in &quad[1..] {
            builder.line_to(to_point(origin + *corner));
        }
        builder.close();
        if let Ok(path) = builder.build() {
            window.paint_path(path, color);
        }
    }
}

fn paint_markers(window: &mut Window, origin: Vec2, positions: &[Vec2], style: &MarkerStyle) {
    let r = style.radius;
    let color: Hsla = style.color.into();
    for p in positions {
        let corner = origin + *p - Vec2::splat(r);
        window.paint_quad(fill(
            Bounds::new(to_point(corner), size(px(2.0 * r), px(2.0 * r))),
            color,
        ));
    }
}

impl Render for LineChartView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let view = cx.entity();
        let chart = self.chart.clone();
        let bounds_rc = self.canvas_bounds.clone();
        let laid_out = self.laid_out;
        let marker_style = self.marker_style;

        div()
            .id(("line-chart-view", cx.entity_id()))
            .size_full()
            .relative()
            .bg(self.theme.background)
            .child(
                canvas(
                    move |_, _, _| {},
                    move |bounds, (), window, cx| {
                        *bounds_rc.borrow_mut() = bounds;
                        if laid_out != Some(bounds) && bounds.size.width > px(0.0) {
                            view.update(cx, |view, cx| view.sync_layout(bounds, cx));
                        }
                        let chart = chart.read(cx);
                        let origin = bounds.origin.to_vec2();
                        let line_color: Hsla = chart.style().color.into();
                        window.with_content_mask(Some(ContentMask { bounds }), |window| {
                            paint_line(window, origin, chart.geometry(), line_color);
                            paint_markers(window, origin, chart.container_positions(), &marker_style);
                        });
                    },
                )
                .size_full()
                .absolute(),
            )
            .children(self.render_tooltip())
            .on_mouse_move(cx.listener(Self::handle_mouse_move))
            .on_hover(cx.listener(Self::handle_hover))
    }
}
