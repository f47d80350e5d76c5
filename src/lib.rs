//! gpui_linechart: procedural line charts for GPUI.
//!
//! A [`LineChart`] maps a normalized series onto pooled point markers inside a
//! bounds rectangle, builds a quad-strip mesh through the markers and reports
//! the nearest marker under the pointer as a tooltip intent.
//! [`LineChartView`] hosts a chart inside a gpui window.

pub mod chart;
pub mod chart_view;
pub mod data_types;
pub mod error;
pub mod marker_pool;
pub mod mesh;
pub mod theme;
pub mod tooltip;
pub mod transform;
pub mod utils;

pub use chart::LineChart;
pub use chart_view::{layout_for, LineChartView};
pub use data_types::{
    ChartColor, ChartConfig, Dataset, HoverState, LineStyle, MarkerSnapshot, MarkerStyle,
    PoolConfig, TooltipConfig, TooltipState,
};
pub use error::{ChartError, ChartResult, ErrorKind};
pub use marker_pool::{
    build_pool, discover_marker_names, DynamicPool, MarkerHandle, MarkerId, MarkerPool,
    PointMarker, StaticCachedPool,
};
pub use mesh::{LineGeometry, LineVertex, PolylineMeshBuilder};
pub use tooltip::{TooltipContent, TooltipController, TooltipIntent};
pub use transform::{BoundsRegion, ChartBounds, CoordinatePipeline, Projection, RenderContainer};
