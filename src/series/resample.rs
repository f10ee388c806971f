use chrono::{Datelike, DurationRound, NaiveDateTime, NaiveTime, TimeDelta};
use clap::ValueEnum;
use itertools::Itertools;

use crate::{
    dataset::{Dataset, N_ZONES},
    series::Series,
    units::Watts,
};

/// Fixed-width resampling bucket.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Period {
    Day,
    Month,
}

impl Period {
    /// Start of the bucket the timestamp falls into.
    pub fn bucket_start(self, timestamp: NaiveDateTime) -> NaiveDateTime {
        match self {
            Self::Day => timestamp.duration_trunc(TimeDelta::days(1)).unwrap(),
            Self::Month => timestamp.date().with_day0(0).unwrap().and_time(NaiveTime::MIN),
        }
    }

    pub const fn bucket_format(self) -> &'static str {
        match self {
            Self::Day => "%Y-%m-%d",
            Self::Month => "%Y-%m",
        }
    }
}

/// Bucket reducer for the zone columns.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Aggregate {
    Mean,
    StdDev,
}

impl Aggregate {
    /// Reduce one bucket's samples.
    ///
    /// The sample (n − 1) standard deviation of a single sample is undefined and
    /// reported as `None`, never coerced to zero.
    fn reduce(self, samples: &[f64]) -> Option<f64> {
        match self {
            Self::Mean => (!samples.is_empty()).then(|| mean(samples)),
            Self::StdDev => (samples.len() > 1).then(|| {
                let mean = mean(samples);
                let sum_of_squares =
                    samples.iter().map(|sample| (sample - mean).powi(2)).sum::<f64>();
                (sum_of_squares / (samples.len() - 1) as f64).sqrt()
            }),
        }
    }
}

fn mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}

impl Dataset {
    /// Group the readings into fixed-width buckets and reduce each zone column.
    ///
    /// Buckets without readings are omitted rather than zero-filled; bucket starts are
    /// ascending.
    pub fn resample(
        &self,
        period: Period,
        aggregate: Aggregate,
    ) -> Series<NaiveDateTime, [Option<Watts>; N_ZONES]> {
        self.readings()
            .iter()
            .into_group_map_by(|reading| period.bucket_start(reading.timestamp))
            .into_iter()
            .sorted_unstable_by_key(|(bucket_start, _)| *bucket_start)
            .map(|(bucket_start, readings)| {
                let zones = std::array::from_fn(|zone| {
                    let samples =
                        readings.iter().map(|reading| reading.zone_powers[zone].0).collect_vec();
                    aggregate.reduce(&samples).map(Watts)
                });
                (bucket_start, zones)
            })
            .collect()
    }
}
