// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use chrono_tz::Tz;

/// Stored form of every date-bearing column: midnight of the local
/// calendar day, expressed in UTC. Fixed-width so SQLite TEXT
/// comparisons order chronologically.
pub const INSTANT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Interpret `local` as a calendar day in `tz` and return the UTC
/// instant of that day's midnight. Where a DST gap swallows midnight,
/// the first representable instant of the day is used, which keeps
/// `from_storage_instant` an exact inverse.
pub fn to_storage_instant(local: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let mut wall = local.and_time(NaiveTime::MIN);
    loop {
        match tz.from_local_datetime(&wall) {
            LocalResult::Single(dt) => return dt.with_timezone(&Utc),
            LocalResult::Ambiguous(first, _) => return first.with_timezone(&Utc),
            LocalResult::None => wall += Duration::minutes(30),
        }
    }
}

/// Wall-clock calendar day of `instant` in `tz`. Exact inverse of
/// `to_storage_instant` for any instant that function produced.
pub fn from_storage_instant(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

pub fn encode_instant(instant: DateTime<Utc>) -> String {
    instant.format(INSTANT_FORMAT).to_string()
}

pub fn decode_instant(raw: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, INSTANT_FORMAT)
        .map(|n| n.and_utc())
        .with_context(|| format!("Invalid stored instant '{}'", raw))
}

/// Encode a local calendar day for storage.
pub fn store_day(local: NaiveDate, tz: Tz) -> String {
    encode_instant(to_storage_instant(local, tz))
}

/// Decode a stored instant back to the local calendar day.
pub fn load_day(raw: &str, tz: Tz) -> Result<NaiveDate> {
    Ok(from_storage_instant(decode_instant(raw)?, tz))
}

/// Half-open UTC interval covering the inclusive local-day range
/// `[start, end]`: everything from start's midnight up to but excluding
/// the midnight after `end`.
pub fn day_range_instants(start: NaiveDate, end: NaiveDate, tz: Tz) -> (String, String) {
    (
        encode_instant(to_storage_instant(start, tz)),
        encode_instant(to_storage_instant(end + Duration::days(1), tz)),
    )
}

/// Exclusive upper bound covering everything through the local day
/// `through` (i.e. the midnight instant of the following day).
pub fn end_of_day_instant(through: NaiveDate, tz: Tz) -> String {
    encode_instant(to_storage_instant(through + Duration::days(1), tz))
}

/// First day of `date`'s calendar month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// First day of the month `n` calendar months before `date`'s month.
pub fn months_back(date: NaiveDate, n: u32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 - n as i32;
    while month < 1 {
        month += 12;
        year -= 1;
    }
    NaiveDate::from_ymd_opt(year, month as u32, 1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tz(name: &str) -> Tz {
        name.parse().unwrap()
    }

    #[test]
    fn storage_instant_is_local_midnight_in_utc() {
        // El Salvador is UTC-6 year round.
        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let instant = to_storage_instant(day, tz("America/El_Salvador"));
        assert_eq!(encode_instant(instant), "2025-03-10T06:00:00Z");
    }

    #[test]
    fn round_trip_identity_across_zones() {
        let day = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        for name in [
            "America/El_Salvador",
            "America/New_York",
            "Asia/Tokyo",
            "Pacific/Auckland",
            "UTC",
        ] {
            let z = tz(name);
            assert_eq!(from_storage_instant(to_storage_instant(day, z), z), day, "{}", name);
        }
    }

    #[test]
    fn round_trip_survives_midnight_dst_gap() {
        // Santiago springs forward at midnight; 2024-09-08 00:00 does
        // not exist there and the day starts at 01:00.
        let z = tz("America/Santiago");
        let day = NaiveDate::from_ymd_opt(2024, 9, 8).unwrap();
        assert_eq!(from_storage_instant(to_storage_instant(day, z), z), day);
    }

    #[test]
    fn day_range_is_half_open() {
        let z = tz("UTC");
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let (lo, hi) = day_range_instants(start, end, z);
        assert_eq!(lo, "2025-01-01T00:00:00Z");
        assert_eq!(hi, "2025-02-01T00:00:00Z");
    }

    #[test]
    fn months_back_crosses_year_boundary() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(months_back(d, 2), NaiveDate::from_ymd_opt(2024, 11, 1).unwrap());
        assert_eq!(month_start(d), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }
}
