use chrono::{TimeDelta, TimeZone, Utc};
use glam::{Affine2, Mat3, Vec2, Vec3};
use gpui_linechart::{
    BoundsRegion, ChartBounds, ChartConfig, Dataset, HoverState, LineChart, MarkerSnapshot,
    RenderContainer, TooltipConfig, TooltipController, TooltipIntent,
};

fn dataset(len: usize) -> Dataset {
    Dataset::new(
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        TimeDelta::seconds(30),
        (0..len).map(|i| i as f64 * 1.5).collect(),
    )
}

fn hovered_chart(values: usize) -> LineChart {
    let mut chart = LineChart::default();
    chart.initialize(Some(BoundsRegion::new(ChartBounds::from_rect(
        0.0, 0.0, 900.0, 100.0,
    ))));
    let series: Vec<f32> = (0..values).map(|i| (i % 3) as f32 / 2.0).collect();
    chart.update_chart(&series);
    let positions = chart.marker_positions();
    chart.initialize_tooltip(positions, Some(dataset(values)));
    chart
}

#[test]
fn test_pointer_on_marker_hovers_it() {
    let mut chart = hovered_chart(10);
    let marker = chart.marker_positions().to_vec()[4];

    match chart.on_tick(Some(marker)) {
        TooltipIntent::Show { content, position } => {
            assert_eq!(content.index, 4);
            assert_eq!(content.value, 6.0);
            assert_eq!(content.label, "12:02:00 · 6.00");
            assert_eq!(position, marker - Vec2::new(0.0, 24.0));
        }
        other => panic!("expected Show, got {:?}", other),
    }
    assert_eq!(chart.tooltip_state().hover, HoverState::Hovering(4));
    assert!(chart.tooltip_state().visible);

    // Same marker again: nothing to redraw.
    assert_eq!(chart.on_tick(Some(marker)), TooltipIntent::Unchanged);

    assert_eq!(
        chart.on_tick(Some(marker + Vec2::new(1000.0, 0.0))),
        TooltipIntent::Hide
    );
    assert_eq!(chart.tooltip_state().hover, HoverState::Suppressed);
    assert!(!chart.tooltip_state().visible);
}

#[test]
fn test_edge_markers_shift_inwards() {
    let mut chart = hovered_chart(10);
    let positions = chart.marker_positions().to_vec();

    let TooltipIntent::Show { position, .. } = chart.on_tick(Some(positions[0])) else {
        panic!("expected Show");
    };
    assert_eq!(position.x, positions[0].x + 40.0);

    let TooltipIntent::Show { position, .. } = chart.on_tick(Some(positions[9])) else {
        panic!("expected Show");
    };
    assert_eq!(position.x, positions[9].x - 40.0);
}

#[test]
fn test_trailing_margin_extends_hover_area() {
    let mut chart = hovered_chart(10);
    let last = chart.marker_positions().to_vec()[9];

    let intent = chart.on_tick(Some(last + Vec2::new(10.0, 0.0)));
    assert!(matches!(intent, TooltipIntent::Show { ref content, .. } if content.index == 9));

    let intent = chart.on_tick(Some(Vec2::new(-5.0, 0.0)));
    assert_eq!(intent, TooltipIntent::Hide);
}

#[test]
fn test_hide_then_rehover() {
    let mut chart = hovered_chart(5);
    let marker = chart.marker_positions().to_vec()[2];

    assert!(matches!(chart.on_tick(Some(marker)), TooltipIntent::Show { .. }));
    assert_eq!(chart.hide_tooltip(), TooltipIntent::Hide);
    assert_eq!(chart.tooltip_state().hover, HoverState::Idle);
    assert_eq!(chart.hide_tooltip(), TooltipIntent::Unchanged);
    assert!(matches!(chart.on_tick(Some(marker)), TooltipIntent::Show { .. }));
}

#[test]
fn test_update_refreshes_hovered_content() {
    let mut chart = hovered_chart(5);
    let marker = chart.marker_positions().to_vec()[2];
    assert!(matches!(chart.on_tick(Some(marker)), TooltipIntent::Show { .. }));

    // Same positions, new data behind them.
    let values: Vec<f32> = chart.values().to_vec();
    chart.update_chart(&values);
    assert!(matches!(chart.on_tick(Some(marker)), TooltipIntent::Show { .. }));
}

#[test]
fn test_missing_data_keeps_tooltip_suppressed() {
    let mut chart = hovered_chart(5);
    let marker = chart.marker_positions().to_vec()[1];
    let positions = chart.marker_positions();
    chart.initialize_tooltip(positions.clone(), None);
    assert_eq!(chart.tooltip_state().hover, HoverState::Suppressed);
    assert_eq!(chart.on_tick(Some(marker)), TooltipIntent::Unchanged);

    chart.initialize_tooltip(positions, Some(dataset(0)));
    assert_eq!(chart.on_tick(Some(marker)), TooltipIntent::Unchanged);
    assert_eq!(chart.tooltip_state().hover, HoverState::Suppressed);
}

#[test]
fn test_no_bounds_never_hits() {
    let mut chart = LineChart::default();
    chart.initialize(None);
    chart.initialize_tooltip(MarkerSnapshot::from(vec![Vec2::ZERO]), Some(dataset(1)));
    assert_eq!(chart.on_tick(Some(Vec2::ZERO)), TooltipIntent::Unchanged);
    assert_eq!(chart.tooltip_state().hover, HoverState::Suppressed);
}

#[test]
fn test_pointer_mapped_through_container() {
    let mut chart = LineChart::new(ChartConfig::default());
    chart.set_container(RenderContainer::overlay(Affine2::from_translation(Vec2::new(
        50.0, 50.0,
    ))));
    chart.initialize(Some(BoundsRegion::new(ChartBounds::from_rect(
        0.0, 0.0, 100.0, 100.0,
    ))));
    chart.update_chart(&[0.0, 0.5, 1.0]);
    let positions = chart.marker_positions();
    chart.initialize_tooltip(positions, Some(dataset(3)));

    // Bounds-local (50, 50) is container-local (0, 0).
    match chart.on_tick(Some(Vec2::ZERO)) {
        TooltipIntent::Show { content, position } => {
            assert_eq!(content.index, 1);
            // Index 1 of 3 is an edge index.
            assert_eq!(position, Vec2::new(40.0, -24.0));
        }
        other => panic!("expected Show, got {:?}", other),
    }
}

#[test]
fn test_controller_with_custom_format() {
    let mut controller = TooltipController::new(TooltipConfig {
        timezone: chrono_tz::Europe::Paris,
        time_format: "%d/%m %H:%M".to_string(),
        value_precision: 1,
        unit: " kW".to_string(),
        ..Default::default()
    });
    let positions = MarkerSnapshot::from(vec![Vec2::new(10.0, 10.0), Vec2::new(20.0, 10.0)]);
    controller.initialize(positions, Some(dataset(2)));

    let mut chart = LineChart::default();
    chart.initialize(Some(BoundsRegion::new(ChartBounds::from_rect(
        0.0, 0.0, 100.0, 100.0,
    ))));
    let pipeline = chart.pipeline().unwrap();
    match controller.on_tick(Some(Vec2::new(21.0, 11.0)), Some(pipeline)) {
        TooltipIntent::Show { content, .. } => {
            assert_eq!(content.label, "01/03 13:00 · 1.5 kW");
        }
        other => panic!("expected Show, got {:?}", other),
    }
}

#[test]
fn test_pointer_between_markers_is_suppressed() {
    let mut chart = hovered_chart(10);
    let marker = chart.marker_positions().to_vec()[1];
    assert!(matches!(chart.on_tick(Some(marker)), TooltipIntent::Show { .. }));

    // Inside the bounds, but over 12 units from every marker.
    let between = Vec2::new(50.0, 75.0);
    assert_eq!(chart.on_tick(Some(between)), TooltipIntent::Hide);
    assert_eq!(chart.tooltip_state().hover, HoverState::Suppressed);
    assert_eq!(chart.on_tick(Some(between)), TooltipIntent::Unchanged);
}

#[test]
fn test_unprojectable_marker_never_hovers() {
    let view_projection = Mat3::from_cols(
        Vec3::new(1.0, 0.0, 0.01),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
    );
    let mut chart = LineChart::default();
    chart.set_container(RenderContainer::camera(Affine2::IDENTITY, view_projection));
    chart.initialize(Some(BoundsRegion::new(ChartBounds::from_rect(
        -500.0, 0.0, 1000.0, 10.0,
    ))));
    chart.update_chart(&[0.0, 0.5, 1.0]);
    let positions = chart.marker_positions();
    chart.initialize_tooltip(positions, Some(dataset(3)));

    // Where marker 0 (behind the camera) would land on screen.
    assert_eq!(
        chart.on_tick(Some(Vec2::new(125.0, 0.0))),
        TooltipIntent::Unchanged
    );
    assert_eq!(chart.tooltip_state().hover, HoverState::Suppressed);

    match chart.on_tick(Some(Vec2::new(0.0, 5.0))) {
        TooltipIntent::Show { content, .. } => assert_eq!(content.index, 1),
        other => panic!("expected Show, got {:?}", other),
    }
}
