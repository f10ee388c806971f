mod cli;
mod dataset;
mod error;
mod prelude;
mod render;
mod series;
mod stats;
mod units;

use std::collections::BTreeMap;

use clap::Parser;

use crate::{
    cli::{Args, Command},
    dataset::cache,
    prelude::*,
};

fn main() -> Result {
    tracing_subscriber::fmt().with_target(false).init();

    let args = Args::parse();
    let dataset = cache::load(&args.source_file)
        .with_context(|| format!("failed to load `{}`", args.source_file.display()))?;

    match args.command {
        Command::Show(show_args) => {
            println!("{}", render::render_readings(&dataset, show_args.limit));
            info!(n_readings = dataset.len(), "total");
        }

        Command::Describe(describe_args) => {
            let summaries = dataset.describe().map_err(error::Error::from)?;
            println!("{}", render::render_summaries(&summaries));
            if let Some(output_file) = describe_args.output_file {
                let by_column: BTreeMap<_, _> = summaries.iter().copied().collect();
                std::fs::write(&output_file, toml::to_string(&by_column)?)
                    .with_context(|| format!("failed to write `{}`", output_file.display()))?;
                info!(path = %output_file.display(), "wrote the statistics");
            }
        }

        Command::Resample(resample_args) => {
            let series = dataset.resample(resample_args.period, resample_args.aggregate);
            if resample_args.json {
                println!("{}", serde_json::to_string_pretty(&series)?);
            } else {
                println!("{}", render::render_resampled(&series, resample_args.period));
            }
        }

        Command::DemandCurve(curve_args) => {
            if curve_args.by_day_type {
                let curves = dataset.demand_curve_by_day_type();
                if curve_args.json {
                    println!("{}", serde_json::to_string_pretty(&curves)?);
                } else {
                    println!("Weekdays:\n{}", render::render_demand_curve(&curves.weekday));
                    println!("Weekends:\n{}", render::render_demand_curve(&curves.weekend));
                }
            } else {
                let curve = dataset.hourly_demand_curve();
                if curve_args.json {
                    println!("{}", serde_json::to_string_pretty(&curve)?);
                } else {
                    println!("{}", render::render_demand_curve(&curve));
                }
            }
        }

        Command::Histogram(histogram_args) => {
            let bins = dataset.histogram(histogram_args.column, histogram_args.bins);
            println!("{}", render::render_histogram(&bins));
        }
    }
    Ok(())
}
