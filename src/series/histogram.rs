use clap::ValueEnum;
use serde::Serialize;

use crate::{
    dataset::{Dataset, Reading},
    units::Watts,
};

/// Power column selector for the histogram view.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum PowerColumn {
    #[value(name = "zone-1")]
    Zone1,
    #[value(name = "zone-2")]
    Zone2,
    #[value(name = "zone-3")]
    Zone3,
    Total,
}

impl PowerColumn {
    fn of(self, reading: &Reading) -> Watts {
        match self {
            Self::Zone1 => reading.zone_powers[0],
            Self::Zone2 => reading.zone_powers[1],
            Self::Zone3 => reading.zone_powers[2],
            Self::Total => reading.total_power(),
        }
    }
}

/// One equal-width histogram bin. `lower` is inclusive; `upper` is exclusive except
/// for the last bin, which also admits the observed maximum.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Bin {
    pub lower: Watts,
    pub upper: Watts,
    pub count: usize,
}

impl Dataset {
    /// Partition one power column into `n_bins` equal-width bins across the observed
    /// range. A degenerate range collapses into a single bin.
    pub fn histogram(&self, column: PowerColumn, n_bins: usize) -> Vec<Bin> {
        let values: Vec<f64> = self.readings().iter().map(|reading| column.of(reading).0).collect();
        if values.is_empty() || n_bins == 0 {
            return Vec::new();
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min == max {
            return vec![Bin { lower: Watts(min), upper: Watts(max), count: values.len() }];
        }
        let width = (max - min) / n_bins as f64;
        let mut bins: Vec<Bin> = (0..n_bins)
            .map(|index| Bin {
                lower: Watts(min + width * index as f64),
                upper: Watts(min + width * (index + 1) as f64),
                count: 0,
            })
            .collect();
        for value in values {
            #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
            let index = (((value - min) / width) as usize).min(n_bins - 1);
            bins[index].count += 1;
        }
        bins
    }
}
