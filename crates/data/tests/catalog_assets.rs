use ptcgp_odds_core::{calculate, calculate_with, CalculationInput, CardCatalog, IONO, MARS, RED_CARD};
use ptcgp_odds_data::{load_catalog, load_server_config};
use std::path::PathBuf;

fn assets_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("assets")
}

#[test]
fn shipped_catalog_matches_builtin() {
    let catalog = load_catalog(&assets_root()).expect("load catalog");
    assert_eq!(catalog, CardCatalog::standard());
    assert_eq!(catalog.names(), vec![IONO, MARS, RED_CARD]);
}

#[test]
fn shipped_catalog_gives_builtin_results() {
    let catalog = load_catalog(&assets_root()).expect("load catalog");
    let inputs = [
        CalculationInput::new(IONO, 13, 7).with_target(1, 0),
        CalculationInput::new(IONO, 12, 6).with_target(2, 0).with_target(1, 1),
        CalculationInput::new(MARS, 14, 4).with_target(2, 1).with_opponent_points(0),
        CalculationInput::new(MARS, 14, 4).with_target(2, 0).with_opponent_points(2),
        CalculationInput::new(RED_CARD, 10, 5),
    ];
    for input in &inputs {
        assert_eq!(calculate_with(&catalog, input), calculate(input));
    }
}

#[test]
fn shipped_server_config_loads() {
    let config = load_server_config(&assets_root()).expect("load config");
    assert!(!config.addr.is_empty());
    assert_eq!(config.assets_dir, assets_root());
}
