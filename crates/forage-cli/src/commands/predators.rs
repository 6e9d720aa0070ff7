use std::fs;
use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use forage_core::{Point, QualityField};
use forage_simulation::report::{records_to_csv, records_to_json};
use forage_simulation::{PlacementScenario, PredatorRecord, Simulation};

use crate::{ReportFormat, SetupArgs};

pub fn run(setup: &SetupArgs, format: ReportFormat, output: Option<&Path>) -> Result<(), String> {
    let landscape = super::load_landscape(setup)?;
    let config = super::build_config(setup)?;
    let seed = config.seed;
    let scenario = config.scenario();

    let mut sim = Simulation::new(config);
    let manager = sim
        .predators(&landscape)
        .map_err(|e| format!("predator generation failed: {e}"))?;
    let records = manager.records();

    let content = match format {
        ReportFormat::Csv => records_to_csv(&records),
        ReportFormat::Json => {
            records_to_json(&records).map_err(|e| format!("JSON serialization failed: {e}"))?
        }
        ReportFormat::Table => {
            if output.is_none() {
                println!(
                    "  {} for landscape {} {}",
                    format!("{} predators", records.len()).bold(),
                    landscape.identity(),
                    format!(
                        "({}x{}, seed={seed}, {})",
                        landscape.width(),
                        landscape.height(),
                        scenario_label(scenario)
                    )
                    .dimmed()
                );
                println!();
            }
            format!("{}\n", predator_table(&records, &landscape))
        }
    };

    match output {
        Some(path) => {
            fs::write(path, &content)
                .map_err(|e| format!("cannot write {}: {e}", path.display()))?;
            println!(
                "  {} {} predators to {}",
                "Wrote".green().bold(),
                records.len(),
                path.display()
            );
        }
        None => print!("{content}"),
    }

    Ok(())
}

fn predator_table(records: &[PredatorRecord], landscape: &impl QualityField) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Start", "Stop", "X", "Y", "Cell quality"]);

    for (i, r) in records.iter().enumerate() {
        let cell = landscape.cell_at(Point::new(r.x, r.y));
        table.add_row(vec![
            (i + 1).to_string(),
            r.start_interval.to_string(),
            r.stop_interval.to_string(),
            format!("{:.2}", r.x),
            format!("{:.2}", r.y),
            format!("{:.3}", landscape.intrinsic_quality(cell)),
        ]);
    }
    table
}

fn scenario_label(scenario: PlacementScenario) -> &'static str {
    match scenario {
        PlacementScenario::Natural => "natural",
        PlacementScenario::Introduced => "introduced",
    }
}
