//! Selects the single-hour record out of a daily weather payload.

use serde_json::Value;

use crate::types::{HourlyRecord, WeatherPayload};

/// Extract the record for `hour` from today's (first) day of `payload`.
///
/// The payload is trusted only as far as `days[0].hours[*].datetime`:
/// anything structurally off degrades to the malformed marker, and a day
/// with no matching hour yields the no-data marker. Both are soft
/// outcomes; this function does not fail and does not look past day 0.
pub fn extract(payload: &WeatherPayload, hour: u8) -> HourlyRecord {
    let Some(hours) = payload
        .get("days")
        .and_then(Value::as_array)
        .and_then(|days| days.first())
        .and_then(|day| day.get("hours"))
        .and_then(Value::as_array)
    else {
        return HourlyRecord::malformed();
    };

    for entry in hours {
        let Some(record) = entry.as_object() else {
            return HourlyRecord::malformed();
        };

        // Hour digits before the first ':' of the time-of-day field.
        let Some(prefix) = record
            .get("datetime")
            .and_then(Value::as_str)
            .and_then(|datetime| datetime.split(':').next())
        else {
            return HourlyRecord::malformed();
        };
        let Ok(entry_hour) = prefix.parse::<u8>() else {
            return HourlyRecord::malformed();
        };

        if entry_hour == hour {
            return HourlyRecord::Observed(record.clone());
        }
    }

    HourlyRecord::no_data(hour)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use serde_json::json;

    fn payload_with_hours(hours: Value) -> WeatherPayload {
        json!({
            "resolvedAddress": "Paris, France",
            "days": [
                { "datetime": "2026-08-06", "hours": hours }
            ]
        })
    }

    #[test]
    fn test_extracts_matching_hour() {
        let payload = payload_with_hours(json!([
            { "datetime": "13:00:00", "temp": 17.0 },
            { "datetime": "14:00:00", "temp": 18.5 },
            { "datetime": "15:00:00", "temp": 19.0 },
        ]));

        let record = extract(&payload, 14);
        let json = serde_json::to_value(&record).unwrap();

        assert!(!record.is_marker());
        assert_eq!(json["temp"], 18.5);
        assert_eq!(json["datetime"], "14:00:00");
    }

    #[test]
    fn test_single_digit_hour_field_matches() {
        let payload = payload_with_hours(json!([
            { "datetime": "7:00", "temp": 11.0 },
        ]));

        let record = extract(&payload, 7);
        assert!(!record.is_marker());
    }

    #[test]
    fn test_first_match_wins() {
        let payload = payload_with_hours(json!([
            { "datetime": "14:00:00", "temp": 1.0 },
            { "datetime": "14:00:00", "temp": 2.0 },
        ]));

        let json = serde_json::to_value(extract(&payload, 14)).unwrap();
        assert_eq!(json["temp"], 1.0);
    }

    #[test]
    fn test_extract_is_idempotent() {
        let payload = payload_with_hours(json!([
            { "datetime": "14:00:00", "temp": 18.5 },
        ]));

        assert_eq!(extract(&payload, 14), extract(&payload, 14));
        assert_eq!(extract(&payload, 3), extract(&payload, 3));
    }

    #[test]
    fn test_every_present_hour_is_found() {
        let hours: Vec<Value> = (0..24)
            .map(|h| json!({ "datetime": format!("{h:02}:00:00"), "temp": h }))
            .collect();
        let payload = payload_with_hours(Value::Array(hours));

        for h in 0..24u8 {
            let json = serde_json::to_value(extract(&payload, h)).unwrap();
            assert_eq!(json["temp"], h);
        }
    }

    #[test]
    fn test_missing_hour_is_no_data_marker() {
        let payload = payload_with_hours(json!([
            { "datetime": "08:00:00", "temp": 12.0 },
        ]));

        let record = extract(&payload, 22);
        assert!(record.is_marker());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["error"], "No data available for hour 22");
    }

    #[test]
    fn test_missing_days_is_malformed() {
        assert_eq!(extract(&json!({}), 14), HourlyRecord::malformed());
        assert_eq!(
            extract(&json!({ "days": "not-an-array" }), 14),
            HourlyRecord::malformed()
        );
    }

    #[test]
    fn test_empty_days_is_malformed() {
        assert_eq!(extract(&json!({ "days": [] }), 14), HourlyRecord::malformed());
    }

    #[test]
    fn test_day_without_hours_is_malformed() {
        let payload = json!({ "days": [ { "datetime": "2026-08-06" } ] });
        assert_eq!(extract(&payload, 14), HourlyRecord::malformed());
    }

    #[test]
    fn test_hour_entry_without_datetime_is_malformed() {
        let payload = payload_with_hours(json!([
            { "temp": 18.5 },
        ]));
        assert_eq!(extract(&payload, 14), HourlyRecord::malformed());
    }

    #[test]
    fn test_non_numeric_hour_prefix_is_malformed() {
        let payload = payload_with_hours(json!([
            { "datetime": "noon:00", "temp": 18.5 },
        ]));
        assert_eq!(extract(&payload, 14), HourlyRecord::malformed());
    }
}
