pub mod cache;

use std::{fs::File, io::Read, path::Path};

use chrono::{Datelike, NaiveDateTime};
use csv::StringRecord;
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    error::{Error, ParseError, SchemaError},
    units::Watts,
};

pub const N_ZONES: usize = 3;

/// One timestamped observation of zonal power draw and the exogenous weather fields.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Reading {
    pub timestamp: NaiveDateTime,
    pub zone_powers: [Watts; N_ZONES],
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub general_diffuse_flow: f64,
    pub diffuse_flow: f64,
}

impl Reading {
    /// Row-wise sum of the zone columns.
    ///
    /// Recomputed on every call, so it can never drift from the zone fields.
    pub fn total_power(&self) -> Watts {
        self.zone_powers.into_iter().sum()
    }

    /// Weekday index, `0` is Monday.
    pub fn weekday(&self) -> u32 {
        self.timestamp.weekday().num_days_from_monday()
    }

    pub fn day_type(&self) -> DayType {
        if self.weekday() >= 5 { DayType::Weekend } else { DayType::Weekday }
    }
}

/// Calendar-day classification derived from the weekday index.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    pub fn of(timestamp: NaiveDateTime) -> Self {
        if timestamp.weekday().num_days_from_monday() >= 5 { Self::Weekend } else { Self::Weekday }
    }
}

/// The readings of one source file, ordered by timestamp.
///
/// Immutable once loaded. Every derived artifact is a pure function over the readings.
#[derive(Debug)]
pub struct Dataset {
    readings: Vec<Reading>,
}

impl Dataset {
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::from_reader(File::open(path)?)
    }

    #[instrument(skip_all)]
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let mut reader = csv::Reader::from_reader(reader);
        let columns = Columns::resolve(reader.headers()?)?;
        let mut readings = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, csv::Position::line);
            readings.push(columns.read(&record, line)?);
        }
        info!(n_readings = readings.len(), "loaded");
        Ok(readings.into_iter().collect())
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

impl FromIterator<Reading> for Dataset {
    /// Collect readings into a dataset, restoring the timestamp order.
    fn from_iter<T: IntoIterator<Item = Reading>>(readings: T) -> Self {
        let mut readings: Vec<Reading> = readings.into_iter().collect();
        readings.sort_unstable_by_key(|reading| reading.timestamp);
        Self { readings }
    }
}

/// Resolved indices of the required columns.
struct Columns {
    timestamp: usize,
    zones: [usize; N_ZONES],
    temperature: usize,
    humidity: usize,
    wind_speed: usize,
    general_diffuse_flow: usize,
    diffuse_flow: usize,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, SchemaError> {
        let canonical: Vec<String> = headers.iter().map(canonical).collect();
        let find = |aliases: &[&str], column: &'static str| {
            canonical
                .iter()
                .position(|name| aliases.contains(&name.as_str()))
                .ok_or(SchemaError { column })
        };
        Ok(Self {
            timestamp: find(&["datetime", "date_time", "timestamp"], "datetime")?,
            zones: [
                find(&["zone_1_power_consumption", "zone_1_power"], "zone_1_power_consumption")?,
                find(&["zone_2_power_consumption", "zone_2_power"], "zone_2_power_consumption")?,
                find(&["zone_3_power_consumption", "zone_3_power"], "zone_3_power_consumption")?,
            ],
            temperature: find(&["temperature"], "temperature")?,
            humidity: find(&["humidity"], "humidity")?,
            wind_speed: find(&["wind_speed"], "wind_speed")?,
            general_diffuse_flow: find(
                &["general_diffuse_flows", "general_diffuse_flow"],
                "general_diffuse_flows",
            )?,
            diffuse_flow: find(&["diffuse_flows", "diffuse_flow"], "diffuse_flows")?,
        })
    }

    fn read(&self, record: &StringRecord, line: u64) -> Result<Reading, ParseError> {
        let field = |index: usize| record.get(index).unwrap_or_default();
        Ok(Reading {
            timestamp: parse_timestamp(field(self.timestamp), line)?,
            zone_powers: [
                Watts(parse_f64(field(self.zones[0]), "zone_1_power", line)?),
                Watts(parse_f64(field(self.zones[1]), "zone_2_power", line)?),
                Watts(parse_f64(field(self.zones[2]), "zone_3_power", line)?),
            ],
            temperature: parse_f64(field(self.temperature), "temperature", line)?,
            humidity: parse_f64(field(self.humidity), "humidity", line)?,
            wind_speed: parse_f64(field(self.wind_speed), "wind_speed", line)?,
            general_diffuse_flow: parse_f64(
                field(self.general_diffuse_flow),
                "general_diffuse_flow",
                line,
            )?,
            diffuse_flow: parse_f64(field(self.diffuse_flow), "diffuse_flow", line)?,
        })
    }
}

/// Canonicalize a header name: trim, lowercase, collapse non-alphanumeric runs into
/// a single underscore.
fn canonical(header: &str) -> String {
    let mut name = String::with_capacity(header.len());
    for character in header.trim().chars() {
        if character.is_ascii_alphanumeric() {
            name.extend(character.to_lowercase());
        } else if !name.is_empty() && !name.ends_with('_') {
            name.push('_');
        }
    }
    name.trim_end_matches('_').to_owned()
}

const TIMESTAMP_FORMATS: [&str; 4] =
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%m/%d/%Y %H:%M", "%m/%d/%Y %H:%M:%S"];

fn parse_timestamp(value: &str, line: u64) -> Result<NaiveDateTime, ParseError> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| ParseError { field: "datetime", value: value.to_owned(), line })
}

fn parse_f64(value: &str, field: &'static str, line: u64) -> Result<f64, ParseError> {
    let value = value.trim();
    value.parse().map_err(|_| ParseError { field, value: value.to_owned(), line })
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Shorthand reading for the aggregation tests. The exogenous fields are filled
    /// with arbitrary constants.
    pub fn reading(timestamp: &str, zone_powers: [f64; N_ZONES]) -> Reading {
        Reading {
            timestamp: NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M").unwrap(),
            zone_powers: zone_powers.map(Watts),
            temperature: 14.0,
            humidity: 72.0,
            wind_speed: 0.08,
            general_diffuse_flow: 0.05,
            diffuse_flow: 0.1,
        }
    }
}
