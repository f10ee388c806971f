use chrono::{DurationRound, NaiveDateTime, TimeDelta, Timelike};
use itertools::Itertools;
use serde::Serialize;

use crate::{
    dataset::{Dataset, DayType},
    series::Series,
    units::Watts,
};

/// Hour-of-day demand curves split by day type.
///
/// The partition is exhaustive and disjoint: every hourly bucket lands in exactly one
/// of the two curves.
#[derive(Debug, Serialize)]
pub struct DayTypeCurves {
    pub weekday: Series<u32, Watts>,
    pub weekend: Series<u32, Watts>,
}

impl Dataset {
    /// Mean total power per hour of the day, averaged over the hourly means across all
    /// days. Hours that never occur in the dataset are omitted.
    pub fn hourly_demand_curve(&self) -> Series<u32, Watts> {
        average_by_hour(self.hourly_means())
    }

    /// The hourly demand curve split into weekday and weekend buckets.
    ///
    /// Each hourly bucket inherits the day type of its first reading, which is the day
    /// type of the bucket start since an hourly bucket never crosses midnight.
    pub fn demand_curve_by_day_type(&self) -> DayTypeCurves {
        let (weekday, weekend): (Vec<_>, Vec<_>) = self
            .hourly_means()
            .into_iter()
            .partition(|(bucket_start, _)| DayType::of(*bucket_start) == DayType::Weekday);
        DayTypeCurves { weekday: average_by_hour(weekday), weekend: average_by_hour(weekend) }
    }

    /// Hourly means of the total power, keyed by ascending bucket start.
    fn hourly_means(&self) -> Series<NaiveDateTime, Watts> {
        self.readings()
            .iter()
            .into_group_map_by(|reading| {
                reading.timestamp.duration_trunc(TimeDelta::hours(1)).unwrap()
            })
            .into_iter()
            .sorted_unstable_by_key(|(bucket_start, _)| *bucket_start)
            .map(|(bucket_start, readings)| {
                let sum: f64 = readings.iter().map(|reading| reading.total_power().0).sum();
                (bucket_start, Watts(sum / readings.len() as f64))
            })
            .collect()
    }
}

fn average_by_hour(hourly_means: Series<NaiveDateTime, Watts>) -> Series<u32, Watts> {
    hourly_means
        .into_iter()
        .into_group_map_by(|(bucket_start, _)| bucket_start.hour())
        .into_iter()
        .sorted_unstable_by_key(|(hour, _)| *hour)
        .map(|(hour, means)| {
            let sum: f64 = means.iter().map(|(_, mean)| mean.0).sum();
            (hour, Watts(sum / means.len() as f64))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::testing::reading;

    // 2017-01-02 is a Monday.
    fn monday_dataset() -> Dataset {
        [
            reading("2017-01-02 00:00", [10.0, 20.0, 5.0]),
            reading("2017-01-02 01:00", [12.0, 18.0, 7.0]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_hourly_demand_curve() {
        let curve = monday_dataset().hourly_demand_curve();
        assert_eq!(curve, vec![(0, Watts(35.0)), (1, Watts(37.0))]);
    }

    #[test]
    fn test_weekday_curve_holds_monday_readings() {
        let curves = monday_dataset().demand_curve_by_day_type();
        assert_eq!(curves.weekday, vec![(0, Watts(35.0)), (1, Watts(37.0))]);
        assert!(curves.weekend.is_empty());
    }

    #[test]
    fn test_readings_within_an_hour_are_averaged_before_the_daily_average() {
        // Two readings in one hourly bucket on Monday, one in the same hour on Tuesday:
        // the Monday bucket must weigh as much as the Tuesday one.
        let dataset: Dataset = [
            reading("2017-01-02 00:00", [10.0, 0.0, 0.0]),
            reading("2017-01-02 00:30", [30.0, 0.0, 0.0]),
            reading("2017-01-03 00:00", [40.0, 0.0, 0.0]),
        ]
        .into_iter()
        .collect();
        assert_eq!(dataset.hourly_demand_curve(), vec![(0, Watts(30.0))]);
    }

    #[test]
    fn test_curve_shape() {
        let dataset: Dataset = (0..48)
            .map(|hour| {
                let timestamp = format!("2017-01-{:02} {:02}:00", 2 + hour / 24, hour % 24);
                reading(&timestamp, [100.0, 50.0, 25.0])
            })
            .collect();
        let curve = dataset.hourly_demand_curve();
        assert_eq!(curve.len(), 24);
        assert!(curve.iter().map(|(hour, _)| *hour).all_unique());
        assert!(curve.iter().tuple_windows().all(|((left, _), (right, _))| left < right));
        assert!(curve.iter().all(|(_, power)| *power >= Watts::ZERO));
    }

    #[test]
    fn test_day_type_partition_is_exhaustive_and_disjoint() {
        // Friday 2017-01-06 23:00 and Saturday 2017-01-07 00:00.
        let dataset: Dataset = [
            reading("2017-01-06 23:00", [10.0, 20.0, 5.0]),
            reading("2017-01-07 00:00", [12.0, 18.0, 7.0]),
        ]
        .into_iter()
        .collect();

        let curves = dataset.demand_curve_by_day_type();
        assert_eq!(curves.weekday, vec![(23, Watts(35.0))]);
        assert_eq!(curves.weekend, vec![(0, Watts(37.0))]);
    }
}
