//! End-to-end tests for sheet generation

use colorcode_maze::engine::PlacementConfig;
use colorcode_maze::{
    generate_seeded, ActivityKind, ConfigError, Difficulty, GenerateConfig, GenerateRequest,
    GridSpec, Orientation, PaperSize, QuantityRange, QuantityTable, Tier,
};
use pretty_assertions::assert_eq;

fn custom(symbols: &[&str], max_total: Option<usize>) -> Difficulty {
    Difficulty::Custom {
        symbols: symbols.iter().map(|s| s.to_string()).collect(),
        max_total,
    }
}

/// Keeps failing placements cheap
fn quick_config() -> GenerateConfig {
    GenerateConfig::new().with_placement(PlacementConfig::new().with_max_attempts(1_000))
}

#[test]
fn test_tier_requests_every_symbol_of_its_level() {
    let sheet = generate_seeded(&GenerateRequest::new(Tier::Medium), &quick_config(), 9).unwrap();

    let names: Vec<&str> = sheet.requests.iter().map(|r| r.symbol.name).collect();
    assert_eq!(
        names,
        vec![
            "Left at Intersection",
            "Straight at Intersection",
            "Right at Intersection",
            "Line Switch Left",
            "Line Switch Straight",
            "Line Switch Right",
        ]
    );
    assert!(sheet.requests.iter().all(|r| (1..=2).contains(&r.quantity)));
}

#[test]
fn test_maze_connects_consecutive_codes() {
    let request = GenerateRequest::new(Tier::Easy).with_activity(ActivityKind::Maze);
    let sheet = generate_seeded(&request, &quick_config(), 21).unwrap();

    let report = sheet.routing.as_ref().unwrap();
    assert_eq!(report.paths.len(), sheet.placed.len().saturating_sub(1));
    assert!(report.skipped.is_empty());
    for (index, path) in report.paths.iter().enumerate() {
        assert_eq!(path.from, index);
        assert!(path.to > path.from);
    }
}

#[test]
fn test_city_challenge_paints_only_codes() {
    let request = GenerateRequest::new(Tier::HardHigh).with_activity(ActivityKind::CityChallenge);
    let sheet = generate_seeded(&request, &quick_config(), 4).unwrap();

    assert!(sheet.routing.is_none());
    let code_cells: usize = sheet.placed.iter().map(|p| p.coordinates.len()).sum();
    assert_eq!(sheet.grid.painted_count(), code_cells);
    assert!(sheet.grid.is_finalized());
}

#[test]
fn test_custom_difficulty_respects_cap() {
    let request = GenerateRequest::new(custom(&["U-Turn", "line switch left"], Some(2)));
    let sheet = generate_seeded(&request, &quick_config(), 13).unwrap();

    assert_eq!(sheet.requested_total(), 2);
    let names: Vec<&str> = sheet.requested_quantities().iter().map(|(n, _)| *n).collect();
    assert_eq!(names, vec!["U-Turn", "Line Switch Left"]);
}

#[test]
fn test_custom_difficulty_unknown_symbol_suggests() {
    let request = GenerateRequest::new(custom(&["U-Trun"], None));
    let err = generate_seeded(&request, &quick_config(), 0).unwrap_err();

    match err {
        ConfigError::UnknownSymbol { name, suggestions } => {
            assert_eq!(name, "U-Trun");
            assert!(suggestions.contains(&"U-Turn".to_string()));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_configured_quantities_apply() {
    let config = quick_config().with_quantities(
        QuantityTable::default().with_range(Tier::Hard, QuantityRange::new(1, 1)),
    );
    let sheet = generate_seeded(&GenerateRequest::new(Tier::Hard), &config, 30).unwrap();

    assert_eq!(sheet.requests.len(), 8);
    assert!(sheet.requests.iter().all(|r| r.quantity == 1));
}

#[test]
fn test_paper_size_drives_grid_dimensions() {
    let request = GenerateRequest::new(Tier::EasyLow).with_grid(
        GridSpec::new(PaperSize::A3).with_orientation(Orientation::Portrait),
    );
    let sheet = generate_seeded(&request, &quick_config(), 2).unwrap();

    assert_eq!((sheet.grid.rows(), sheet.grid.cols()), (73, 60));
}

#[test]
fn test_config_file_contents_drive_generation() {
    let config = GenerateConfig::from_toml_str(
        r#"
[placement]
max_attempts = 1000
code_gap_mm = 30.0

[quantities.tiers]
easy = { min = 2, max = 2 }
"#,
    )
    .unwrap();

    let sheet = generate_seeded(&GenerateRequest::new(Tier::Easy), &config, 5).unwrap();
    assert_eq!(sheet.requested_total(), 6);
    assert_eq!(sheet.placed.len() + sheet.failures.len(), 6);
}

#[test]
fn test_nan_cell_size_is_rejected() {
    let request = GenerateRequest::new(Tier::Easy)
        .with_grid(GridSpec::new(PaperSize::Letter).with_cell_size(f64::NAN));
    let err = generate_seeded(&request, &quick_config(), 0).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidCellSize(_)));
}

#[test]
fn test_oversized_spacing_is_rejected() {
    let request = GenerateRequest::new(Tier::Easy);
    for placement in [
        PlacementConfig::new().with_max_attempts(1_000).with_edge_white_space(1e30),
        PlacementConfig::new().with_max_attempts(1_000).with_code_gap(1e12),
    ] {
        let config = GenerateConfig::new().with_placement(placement);
        let err = generate_seeded(&request, &config, 0).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPlacement(_)), "{err}");
    }
}

#[test]
fn test_low_attempt_ceiling_in_config_file_is_rejected() {
    let config = GenerateConfig::from_toml_str("[placement]\nmax_attempts = 300\n").unwrap();
    let err = generate_seeded(&GenerateRequest::new(Tier::Easy), &config, 0).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPlacement(_)));
}
