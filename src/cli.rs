use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::series::{
    histogram::PowerColumn,
    resample::{Aggregate, Period},
};

#[derive(Parser)]
#[command(version, about, propagate_version = true)]
pub struct Args {
    /// Path to the readings CSV.
    #[clap(long = "source-file", env = "SOURCE_FILE")]
    pub source_file: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the head of the raw readings table.
    Show(ShowArgs),

    /// Descriptive statistics of every numeric column.
    Describe(DescribeArgs),

    /// Resample the zone columns into daily or monthly buckets.
    Resample(ResampleArgs),

    /// Mean total power per hour of the day.
    DemandCurve(DemandCurveArgs),

    /// Equal-width histogram of one power column.
    Histogram(HistogramArgs),
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Number of readings to print.
    #[clap(long, default_value = "10")]
    pub limit: usize,
}

#[derive(Parser)]
pub struct DescribeArgs {
    /// Also write the statistics to a TOML file.
    #[clap(long, env = "STATISTICS_PATH")]
    pub output_file: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ResampleArgs {
    #[clap(long, value_enum, default_value = "day")]
    pub period: Period,

    #[clap(long, value_enum, default_value = "mean")]
    pub aggregate: Aggregate,

    /// Print the series as JSON instead of a table.
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct DemandCurveArgs {
    /// Split the curve into weekday and weekend buckets.
    #[clap(long)]
    pub by_day_type: bool,

    /// Print the curve as JSON instead of a table.
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct HistogramArgs {
    #[clap(long, value_enum, default_value = "total")]
    pub column: PowerColumn,

    /// Number of equal-width bins.
    #[clap(long, default_value = "30")]
    pub bins: usize,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_resample() {
        let args = Args::parse_from([
            "zone-demand",
            "--source-file",
            "readings.csv",
            "resample",
            "--period",
            "month",
            "--aggregate",
            "std-dev",
        ]);
        match args.command {
            Command::Resample(resample_args) => {
                assert_eq!(resample_args.period, Period::Month);
                assert_eq!(resample_args.aggregate, Aggregate::StdDev);
            }
            _ => panic!("expected the resample command"),
        }
    }
}
