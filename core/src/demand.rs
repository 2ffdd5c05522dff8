//! Demand ingestion — raw call records into an hour-of-day profile.
//!
//! The staffing core only ever sees two scalars per hour (average calls
//! per hour and the global average handle time). This module derives
//! them from call logs.
//!
//! Per-day averages divide by the calendar span of the data for the
//! all-days figure, and by the number of distinct weekday / weekend
//! dates (at least 1) for the split figures.

use crate::error::{CoreResult, StaffingError};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// One row of the call log: `id,user_id,call_date,duration`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    pub id:               String,
    pub user_id:          u64,
    #[serde(deserialize_with = "deserialize_call_date")]
    pub call_date:        NaiveDateTime,
    #[serde(rename = "duration")]
    pub duration_minutes: f64,
}

impl CallRecord {
    pub fn is_weekend(&self) -> bool {
        matches!(self.call_date.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

/// Accepts a full timestamp or a bare date. A bare date lands at midnight.
pub fn parse_call_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn deserialize_call_date<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_call_date(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "call_date '{raw}' is neither YYYY-MM-DD nor YYYY-MM-DDTHH:MM:SS"
        ))
    })
}

/// Load call records. `.json` files hold an array of records; anything
/// else is read as CSV with a header row.
pub fn load_records(path: &str) -> anyhow::Result<Vec<CallRecord>> {
    let is_json = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let records = if is_json {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        serde_json::from_str::<Vec<CallRecord>>(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?
    } else {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        reader
            .deserialize()
            .collect::<Result<Vec<CallRecord>, csv::Error>>()
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?
    };

    log::info!("loaded {} call records from {path}", records.len());
    Ok(records)
}

/// Aggregates for one hour of the day, across every date in the data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlyDemand {
    pub hour:                   u32,
    pub calls:                  u64,
    pub avg_duration_minutes:   f64,
    pub calls_weekday:          u64,
    pub avg_duration_weekday:   f64,
    pub calls_weekend:          u64,
    pub avg_duration_weekend:   f64,
    pub calls_per_hour_avg:     f64,
    pub calls_per_hour_weekday: f64,
    pub calls_per_hour_weekend: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandProfile {
    /// Only hours that saw at least one call, ascending.
    pub hours:            Vec<HourlyDemand>,
    /// Mean duration over every record.
    pub aht_minutes:      f64,
    pub total_calls:      u64,
    pub num_days:         u32,
    pub num_weekdays:     u32,
    pub num_weekend_days: u32,
}

#[derive(Default)]
struct Bucket {
    calls:            u64,
    duration:         f64,
    calls_weekday:    u64,
    duration_weekday: f64,
    calls_weekend:    u64,
    duration_weekend: f64,
}

fn mean(total: f64, count: u64) -> f64 {
    if count == 0 { 0.0 } else { total / count as f64 }
}

impl DemandProfile {
    pub fn from_records(records: &[CallRecord]) -> CoreResult<Self> {
        if records.is_empty() {
            return Err(StaffingError::invalid("records", "no call records to aggregate"));
        }
        if let Some(bad) = records
            .iter()
            .find(|r| !(r.duration_minutes.is_finite() && r.duration_minutes >= 0.0))
        {
            return Err(StaffingError::invalid(
                "duration_minutes",
                format!("record {} has duration {}", bad.id, bad.duration_minutes),
            ));
        }

        let mut buckets: BTreeMap<u32, Bucket> = BTreeMap::new();
        let mut weekdays: BTreeSet<NaiveDate> = BTreeSet::new();
        let mut weekend_days: BTreeSet<NaiveDate> = BTreeSet::new();
        let mut total_duration = 0.0;

        for record in records {
            let bucket = buckets.entry(record.call_date.hour()).or_default();
            bucket.calls += 1;
            bucket.duration += record.duration_minutes;
            if record.is_weekend() {
                bucket.calls_weekend += 1;
                bucket.duration_weekend += record.duration_minutes;
                weekend_days.insert(record.call_date.date());
            } else {
                bucket.calls_weekday += 1;
                bucket.duration_weekday += record.duration_minutes;
                weekdays.insert(record.call_date.date());
            }
            total_duration += record.duration_minutes;
        }

        let first = records.iter().map(|r| r.call_date).min();
        let last = records.iter().map(|r| r.call_date).max();
        let num_days = match (first, last) {
            (Some(first), Some(last)) => (last - first).num_days() as u32 + 1,
            _ => 1,
        };
        let num_weekdays = weekdays.len() as u32;
        let num_weekend_days = weekend_days.len() as u32;

        let hours = buckets
            .into_iter()
            .map(|(hour, b)| HourlyDemand {
                hour,
                calls: b.calls,
                avg_duration_minutes: mean(b.duration, b.calls),
                calls_weekday: b.calls_weekday,
                avg_duration_weekday: mean(b.duration_weekday, b.calls_weekday),
                calls_weekend: b.calls_weekend,
                avg_duration_weekend: mean(b.duration_weekend, b.calls_weekend),
                calls_per_hour_avg: b.calls as f64 / f64::from(num_days),
                calls_per_hour_weekday: b.calls_weekday as f64
                    / f64::from(num_weekdays.max(1)),
                calls_per_hour_weekend: b.calls_weekend as f64
                    / f64::from(num_weekend_days.max(1)),
            })
            .collect();

        let profile = Self {
            hours,
            aht_minutes: mean(total_duration, records.len() as u64),
            total_calls: records.len() as u64,
            num_days,
            num_weekdays,
            num_weekend_days,
        };

        log::debug!(
            "demand: {} calls over {} days ({} weekdays, {} weekend), aht={:.2}m",
            profile.total_calls,
            profile.num_days,
            profile.num_weekdays,
            profile.num_weekend_days,
            profile.aht_minutes
        );

        Ok(profile)
    }

    pub fn hour(&self, hour: u32) -> Option<&HourlyDemand> {
        self.hours.iter().find(|h| h.hour == hour)
    }

    /// Busiest hour by average calls per hour. Earliest hour wins ties.
    pub fn peak_hour(&self) -> Option<&HourlyDemand> {
        self.hours.iter().reduce(|best, h| {
            if h.calls_per_hour_avg > best.calls_per_hour_avg { h } else { best }
        })
    }

    /// Quietest hour that saw any calls. Earliest hour wins ties.
    pub fn low_hour(&self) -> Option<&HourlyDemand> {
        self.hours.iter().reduce(|best, h| {
            if h.calls_per_hour_avg < best.calls_per_hour_avg { h } else { best }
        })
    }
}
