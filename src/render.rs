use chrono::NaiveDateTime;
use comfy_table::{Attribute, Cell, CellAlignment, Table, modifiers, presets};

use crate::{
    dataset::{Dataset, N_ZONES},
    series::{Series, histogram::Bin, resample::Period},
    stats::Summary,
    units::Watts,
};

const BAR_WIDTH: usize = 40;

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}

fn value_cell(value: f64) -> Cell {
    Cell::new(format!("{value:.2}")).set_alignment(CellAlignment::Right)
}

pub fn render_readings(dataset: &Dataset, limit: usize) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Timestamp",
        "Day type",
        "Zone 1",
        "Zone 2",
        "Zone 3",
        "Total",
        "Temperature",
        "Humidity",
        "Wind speed",
        "General diffuse flow",
        "Diffuse flow",
    ]);
    for reading in dataset.readings().iter().take(limit) {
        let mut row = vec![
            Cell::new(reading.timestamp.format("%Y-%m-%d %H:%M")),
            Cell::new(format!("{:?}", reading.day_type())),
        ];
        row.extend(reading.zone_powers.iter().map(|power| watts_cell(*power)));
        row.push(watts_cell(reading.total_power()));
        row.extend(
            [
                reading.temperature,
                reading.humidity,
                reading.wind_speed,
                reading.general_diffuse_flow,
                reading.diffuse_flow,
            ]
            .map(value_cell),
        );
        table.add_row(row);
    }
    table
}

pub fn render_summaries(summaries: &[(&'static str, Summary)]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Column", "Count", "Mean", "Std", "Min", "25%", "50%", "75%", "Max"]);
    for (name, summary) in summaries {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(summary.count).set_alignment(CellAlignment::Right),
            value_cell(summary.mean),
            summary.std.map_or_else(missing_cell, value_cell),
            value_cell(summary.min),
            value_cell(summary.q1),
            value_cell(summary.median),
            value_cell(summary.q3),
            value_cell(summary.max),
        ]);
    }
    table
}

pub fn render_resampled(
    series: &Series<NaiveDateTime, [Option<Watts>; N_ZONES]>,
    period: Period,
) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Bucket", "Zone 1", "Zone 2", "Zone 3"]);
    for (bucket_start, zones) in series {
        let mut row = vec![Cell::new(bucket_start.format(period.bucket_format()))];
        row.extend(zones.iter().map(|zone| zone.map_or_else(missing_cell, watts_cell)));
        table.add_row(row);
    }
    table
}

pub fn render_demand_curve(curve: &Series<u32, Watts>) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Hour", "Mean total power"]);
    for (hour, power) in curve {
        table.add_row(vec![Cell::new(format!("{hour:02}:00")), watts_cell(*power)]);
    }
    table
}

pub fn render_histogram(bins: &[Bin]) -> Table {
    let max_count = bins.iter().map(|bin| bin.count).max().unwrap_or(0).max(1);
    let mut table = new_table();
    table.set_header(vec!["Range", "Count", ""]);
    for bin in bins {
        table.add_row(vec![
            Cell::new(format!("{:.1}..{:.1} W", bin.lower.0, bin.upper.0)),
            Cell::new(bin.count).set_alignment(CellAlignment::Right),
            Cell::new("▇".repeat(bin.count * BAR_WIDTH / max_count)),
        ]);
    }
    table
}

fn watts_cell(watts: Watts) -> Cell {
    Cell::new(watts).set_alignment(CellAlignment::Right)
}

fn missing_cell() -> Cell {
    Cell::new("n/a").add_attribute(Attribute::Dim).set_alignment(CellAlignment::Right)
}
