//! End-to-end tests that build and render wage tables through the app layer.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_cli::app::{self, RunConfig};
use tax_cli::table::TableLayout;
use tax_core::calculations::{BisectionConfig, InversionStrategy};

const DEFAULT_TABLE: &str = include_str!("fixtures/default_table.txt");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_default_config_renders_reference_table() {
    let table = app::build_table(&RunConfig::default()).expect("default table should build");

    assert_eq!(table.to_string(), DEFAULT_TABLE);
}

#[test]
fn test_bisection_renders_same_table() {
    let config = RunConfig {
        strategy: InversionStrategy::Bisection(BisectionConfig {
            tolerance: dec!(0.000000001),
            ..BisectionConfig::default()
        }),
        ..RunConfig::default()
    };

    let table = app::build_table(&config).expect("bisection table should build");

    assert_eq!(table.to_string(), DEFAULT_TABLE);
}

#[test]
fn test_tiers_file_replaces_default_schedule() {
    let config = RunConfig {
        tiers: Some(fixture_path("flat_tiers.csv")),
        layout: TableLayout {
            hours: vec![dec!(40)],
            net_weekly_incomes: vec![dec!(100), dec!(1000)],
            weeks_per_year: dec!(46),
        },
        ..RunConfig::default()
    };

    let table = app::build_table(&config).expect("flat table should build");

    // 5200 / 0.8 / 1840 = 3.53 and 52000 / 0.8 / 1840 = 35.33
    assert_eq!(
        &table.cells()[1..],
        &[
            vec!["($100, $5200)".to_string(), "$4".to_string()],
            vec!["($1000, $52000)".to_string(), "$35".to_string()],
        ]
    );
}

#[test]
fn test_bisection_with_tiers_file_topping_out_below_search_bound() {
    let layout = TableLayout {
        hours: vec![dec!(40)],
        net_weekly_incomes: vec![dec!(100), dec!(1000), dec!(2500)],
        weeks_per_year: dec!(46),
    };
    let closed_form = RunConfig {
        tiers: Some(fixture_path("capped_tiers.csv")),
        layout,
        strategy: InversionStrategy::ClosedForm,
    };
    let bisection = RunConfig {
        strategy: InversionStrategy::Bisection(BisectionConfig::default()),
        ..closed_form.clone()
    };

    let expected = app::build_table(&closed_form).expect("closed-form table should build");
    let table = app::build_table(&bisection).expect("bisection table should build");

    // 5200 / 0.9 / 1840 = 3.14, (52000 - 1000) / 0.8 / 1840 = 34.65 and
    // (130000 - 1000) / 0.8 / 1840 = 87.64
    assert_eq!(
        &table.cells()[1..],
        &[
            vec!["($100, $5200)".to_string(), "$3".to_string()],
            vec!["($1000, $52000)".to_string(), "$35".to_string()],
            vec!["($2500, $130000)".to_string(), "$88".to_string()],
        ]
    );
    assert_eq!(table, expected);
}

#[test]
fn test_missing_tiers_file_reports_path() {
    let config = RunConfig {
        tiers: Some(PathBuf::from("/no/such/tiers.csv")),
        ..RunConfig::default()
    };

    let err = app::build_table(&config).expect_err("missing file should fail");

    assert!(
        err.to_string().contains("/no/such/tiers.csv"),
        "unexpected error: {err:#}"
    );
}
