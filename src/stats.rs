use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::{
    dataset::{Dataset, Reading},
    error::EmptyDatasetError,
};

/// Descriptive statistics of one numeric column.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,

    /// Sample standard deviation, undefined for a single reading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std: Option<f64>,

    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl Summary {
    fn of(values: &mut [f64]) -> Self {
        values.sort_unstable_by_key(|value| OrderedFloat(*value));
        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let std = (count > 1).then(|| {
            let sum_of_squares = values.iter().map(|value| (value - mean).powi(2)).sum::<f64>();
            (sum_of_squares / (count - 1) as f64).sqrt()
        });
        Self {
            count,
            mean,
            std,
            min: values[0],
            q1: quantile(values, 0.25),
            median: quantile(values, 0.5),
            q3: quantile(values, 0.75),
            max: values[count - 1],
        }
    }
}

/// Linear interpolation between the two closest order statistics.
fn quantile(sorted: &[f64], quantile: f64) -> f64 {
    let position = quantile * (sorted.len() - 1) as f64;
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    let index = position.floor() as usize;
    let fraction = position - index as f64;
    if fraction == 0.0 || index + 1 == sorted.len() {
        sorted[index]
    } else {
        sorted[index].mul_add(1.0 - fraction, sorted[index + 1] * fraction)
    }
}

/// The numeric columns, in presentation order.
static COLUMNS: [(&str, fn(&Reading) -> f64); 9] = [
    ("zone_1_power", |reading| reading.zone_powers[0].0),
    ("zone_2_power", |reading| reading.zone_powers[1].0),
    ("zone_3_power", |reading| reading.zone_powers[2].0),
    ("total_power", |reading| reading.total_power().0),
    ("temperature", |reading| reading.temperature),
    ("humidity", |reading| reading.humidity),
    ("wind_speed", |reading| reading.wind_speed),
    ("general_diffuse_flow", |reading| reading.general_diffuse_flow),
    ("diffuse_flow", |reading| reading.diffuse_flow),
];

impl Dataset {
    /// Descriptive statistics for every numeric column, in presentation order.
    pub fn describe(&self) -> Result<Vec<(&'static str, Summary)>, EmptyDatasetError> {
        if self.is_empty() {
            return Err(EmptyDatasetError);
        }
        Ok(COLUMNS
            .into_iter()
            .map(|(name, extract)| {
                let mut values: Vec<f64> = self.readings().iter().map(extract).collect();
                (name, Summary::of(&mut values))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::dataset::testing::reading;

    #[test]
    fn test_describe_empty_dataset_fails() {
        let dataset: Dataset = [].into_iter().collect();
        assert_eq!(dataset.describe().unwrap_err(), EmptyDatasetError);
    }

    #[test]
    fn test_describe_single_reading() {
        let dataset: Dataset =
            [reading("2017-01-02 00:00", [10.0, 20.0, 5.0])].into_iter().collect();
        let summaries = dataset.describe().unwrap();
        let (_, total) = summaries.iter().find(|(name, _)| *name == "total_power").unwrap();
        assert_eq!(total.count, 1);
        assert_eq!(total.std, None);
        assert_abs_diff_eq!(total.mean, 35.0);
        assert_abs_diff_eq!(total.min, 35.0);
        assert_abs_diff_eq!(total.max, 35.0);
    }

    #[test]
    fn test_describe_covers_every_numeric_column() {
        let dataset: Dataset =
            [reading("2017-01-02 00:00", [10.0, 20.0, 5.0])].into_iter().collect();
        let names: Vec<&str> =
            dataset.describe().unwrap().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec![
            "zone_1_power",
            "zone_2_power",
            "zone_3_power",
            "total_power",
            "temperature",
            "humidity",
            "wind_speed",
            "general_diffuse_flow",
            "diffuse_flow",
        ]);
    }

    #[test]
    fn test_summary_of_known_values() {
        let mut values = vec![4.0, 1.0, 3.0, 2.0];
        let summary = Summary::of(&mut values);
        assert_eq!(summary.count, 4);
        assert_abs_diff_eq!(summary.mean, 2.5);
        // Sample standard deviation of 1..=4.
        assert_abs_diff_eq!(summary.std.unwrap(), (5.0_f64 / 3.0).sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(summary.min, 1.0);
        assert_abs_diff_eq!(summary.q1, 1.75);
        assert_abs_diff_eq!(summary.median, 2.5);
        assert_abs_diff_eq!(summary.q3, 3.25);
        assert_abs_diff_eq!(summary.max, 4.0);
    }

    #[test]
    fn test_quantile_of_single_value() {
        let values = [7.0];
        assert_abs_diff_eq!(quantile(&values, 0.25), 7.0);
        assert_abs_diff_eq!(quantile(&values, 0.75), 7.0);
    }
}
