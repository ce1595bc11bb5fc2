//! Load a city dataset, select every indicator and print the sync report.
//!
//! Usage: cargo run --example load_city [path/to/city.json]

use hex_harms_assets::config::EngineConfig;
use hex_harms_assets::dataset::Dataset;
use hex_harms_assets::error::Result;
use hex_harms_assets::indicator::Baseline;
use hex_harms_assets::selection::{SelectionEvent, SyncScheduler};
use std::sync::Arc;

const SAMPLE_CITY: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/sample_city.json");

fn main() -> Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| SAMPLE_CITY.to_string());
    println!("🗺️ Loading city from {}", path);

    let dataset = Dataset::from_json_file(&path)?;
    println!("   {} hexes, {} flag layers", dataset.hex_count(), dataset.flags().len());

    let indicators = vec![
        "burn_prob".to_string(),
        "flood_risk".to_string(),
        "library_dist".to_string(),
    ];

    let mut scheduler = SyncScheduler::new(&EngineConfig::default());
    scheduler.submit(SelectionEvent::DatasetLoaded(Arc::new(dataset)));
    scheduler.submit(SelectionEvent::IndicatorsChanged(Some(indicators)));

    for baseline in Baseline::ALL {
        scheduler.submit(SelectionEvent::BaselineChanged(baseline));
        let Some(report) = scheduler.flush()? else {
            println!("   nothing to synchronize for {}", baseline);
            continue;
        };
        println!("\n📊 Baseline {}", baseline);
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if let Some(layer) = scheduler.layer() {
        println!("\n🔎 Hover tooltips");
        for id in layer.store.features().iter().map(|f| &f.hex_id) {
            if let Some(tooltip) = layer.cache.tooltip(id.as_str()) {
                println!("   {} {}", id, tooltip);
            }
        }
        for name in layer.screeners.names() {
            println!("   screener: {}", name);
        }
    }

    Ok(())
}
