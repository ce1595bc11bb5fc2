// Aggregation properties checked through the public API

use approx::assert_relative_eq;
use hex_harms_assets::aggregate::HexAggregator;
use hex_harms_assets::indicator::{Baseline, IndicatorRow, IndicatorSet, IndicatorType};
use more_asserts::assert_lt;

fn harm(var: &str, pct: f64) -> IndicatorRow {
    IndicatorRow::new(var, IndicatorType::Harm).with_percentile(Baseline::County, pct)
}

#[test]
fn test_display_order_is_bin_descending_and_stable() {
    // bins [1, 4, 2, 4, 1]
    let rows = vec![
        harm("v_one", 0.05),
        harm("v_two", 0.95),
        harm("v_three", 0.4),
        harm("v_four", 0.8),
        harm("v_five", 0.25),
    ];
    let selected: IndicatorSet = rows.iter().map(|r| r.variable.clone()).collect();
    let out = HexAggregator::new(Baseline::County).aggregate(&rows, &selected);

    let order: Vec<usize> = ["V Two", "V Four", "V Three", "V One", "V Five"]
        .iter()
        .map(|name| out.display.find(name).unwrap_or_else(|| panic!("{} missing", name)))
        .collect();
    for pair in order.windows(2) {
        assert_lt!(pair[0], pair[1]);
    }

    assert_relative_eq!(out.harm_value(), (0.05 + 0.95 + 0.4 + 0.8 + 0.25) / 5.0, epsilon = 1e-12);
    assert_eq!(out.composite_key, "1,2");
}

#[test]
fn test_selection_subset_only() {
    let rows = vec![harm("a", 0.9), harm("b", 0.1)];
    let selected: IndicatorSet = ["b"].into_iter().collect();
    let out = HexAggregator::new(Baseline::County).aggregate(&rows, &selected);
    assert_eq!(out.composite_key, "1,1");
    assert_eq!(out.display, "B: 0-25% <br>");
    assert_eq!(out.mean_harm, Some(0.1));
}
