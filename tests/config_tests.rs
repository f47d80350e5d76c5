use gpui_linechart::{ChartColor, ChartConfig, LineChart, PoolConfig};

#[test]
fn test_defaults() {
    let config = ChartConfig::default();
    assert_eq!(config.pool, PoolConfig::Dynamic { warm_count: 100 });
    assert_eq!(config.line.thickness, 2.0);
    assert_eq!(config.tooltip.edge_index_count, 2);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_json_keeps_defaults() {
    let config = ChartConfig::from_json(
        r##"{
            "line": { "thickness": 3.5, "color": "#FF8000" },
            "pool": { "strategy": "static_cached", "provisioned": 24 },
            "tooltip": { "timezone": "Europe/Paris", "unit": " °C" }
        }"##,
    )
    .unwrap();

    assert_eq!(config.line.thickness, 3.5);
    assert_eq!(config.line.color, ChartColor::from_hex("FF8000FF").unwrap());
    assert_eq!(config.pool, PoolConfig::StaticCached { provisioned: 24 });
    assert_eq!(config.tooltip.timezone, chrono_tz::Europe::Paris);
    assert_eq!(config.tooltip.unit, " °C");
    assert_eq!(config.tooltip.detection_radius, 12.0);
    assert_eq!(config.markers.radius, 3.0);

    let chart = LineChart::new(config);
    assert_eq!(chart.pool().capacity_limit(), Some(24));
}

#[test]
fn test_invalid_json_is_reported() {
    let err = ChartConfig::from_json(r#"{ "line": { "thickness": -2.0 } }"#).unwrap_err();
    assert!(format!("{:?}", err).contains("thickness"));

    assert!(ChartConfig::from_json(r##"{ "line": { "color": "#12" } }"##).is_err());
    assert!(ChartConfig::from_json(r#"{ "pool": { "strategy": "unknown" } }"#).is_err());
    let config = ChartConfig::from_json(r#"{ "pool": { "strategy": "static_cached" } }"#).unwrap();
    assert_eq!(config.pool, PoolConfig::StaticCached { provisioned: 24 });
    assert!(ChartConfig::from_json(r#"{ "tooltip": { "detection_radius": 0.0 } }"#).is_err());
}

#[test]
fn test_config_survives_serialization() {
    let mut config = ChartConfig::default();
    config.line.color = ChartColor::rgba(1.0, 0.0, 0.0, 0.5);
    config.pool = PoolConfig::StaticCached { provisioned: 8 };

    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"#FF000080\""));
    let parsed = ChartConfig::from_json(&json).unwrap();
    assert_eq!(parsed.pool, config.pool);
    assert_eq!(parsed.line.color.to_hex(), "#FF000080");
}
