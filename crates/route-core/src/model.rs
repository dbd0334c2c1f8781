// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Airport and flight records.
//!
//! The backend serves JSON arrays keyed by Japanese field names. Records are
//! coerced into typed structs at the ingest boundary: absent or `null` strings
//! become empty, numbers used as times or flight numbers become strings, and
//! coordinates may be numbers or numeric strings. Records that still fail to
//! convert are skipped with a warning instead of failing the whole payload.

use log::{info, warn};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::normalize::normalize_str;

/// Errors that can occur while ingesting a dataset.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array of {0} records")]
    NotAnArray(&'static str),
}

/// Airport record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    /// Display name, also the identity once normalized.
    #[serde(
        rename = "空港名",
        alias = "name",
        default,
        deserialize_with = "lenient_string"
    )]
    pub name: String,

    /// Airport code (e.g., "CTS"). May be empty or shared.
    #[serde(
        rename = "コード",
        alias = "code",
        default,
        deserialize_with = "lenient_string"
    )]
    pub code: String,

    /// Latitude in degrees.
    #[serde(
        rename = "緯度",
        alias = "latitude",
        alias = "lat",
        deserialize_with = "lenient_coordinate"
    )]
    pub latitude: f64,

    /// Longitude in degrees.
    #[serde(
        rename = "経度",
        alias = "longitude",
        alias = "lon",
        deserialize_with = "lenient_coordinate"
    )]
    pub longitude: f64,
}

impl Airport {
    /// Create a new airport record.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            latitude,
            longitude,
        }
    }

    /// Normalized matching key for this airport.
    #[must_use]
    pub fn key(&self) -> String {
        normalize_str(&self.name)
    }

    /// Position as (lat, lon).
    #[must_use]
    pub fn position(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// Scheduled flight between two airports, referenced by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    #[serde(
        rename = "出発空港",
        alias = "origin",
        default,
        deserialize_with = "lenient_string"
    )]
    pub origin: String,

    #[serde(
        rename = "到着空港",
        alias = "destination",
        default,
        deserialize_with = "lenient_string"
    )]
    pub destination: String,

    /// Departure time as published (e.g., "08:00"). Compared as text.
    #[serde(
        rename = "出発時刻",
        alias = "departure_time",
        default,
        deserialize_with = "lenient_string"
    )]
    pub departure_time: String,

    #[serde(
        rename = "到着時刻",
        alias = "arrival_time",
        default,
        deserialize_with = "lenient_string"
    )]
    pub arrival_time: String,

    #[serde(
        rename = "便名",
        alias = "flight_number",
        default,
        deserialize_with = "lenient_string"
    )]
    pub flight_number: String,
}

impl Flight {
    /// Create a new flight record.
    #[must_use]
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure_time: impl Into<String>,
        arrival_time: impl Into<String>,
        flight_number: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            departure_time: departure_time.into(),
            arrival_time: arrival_time.into(),
            flight_number: flight_number.into(),
        }
    }

    #[must_use]
    pub fn origin_key(&self) -> String {
        normalize_str(&self.origin)
    }

    #[must_use]
    pub fn destination_key(&self) -> String {
        normalize_str(&self.destination)
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(D::Error::custom(format!("expected a string, got {other}"))),
    }
}

fn lenient_coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom(format!("coordinate out of range: {n}"))),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| D::Error::custom(format!("invalid coordinate '{s}': {e}"))),
        other => Err(D::Error::custom(format!("expected a coordinate, got {other}"))),
    }
}

/// Parse a JSON array of airport records.
pub fn parse_airports(bytes: &[u8]) -> Result<Vec<Airport>, DataError> {
    parse_records(bytes, "airport")
}

/// Parse a JSON array of flight records.
pub fn parse_flights(bytes: &[u8]) -> Result<Vec<Flight>, DataError> {
    parse_records(bytes, "flight")
}

fn parse_records<T: DeserializeOwned>(
    bytes: &[u8],
    kind: &'static str,
) -> Result<Vec<T>, DataError> {
    let Value::Array(values) = serde_json::from_slice::<Value>(bytes)? else {
        return Err(DataError::NotAnArray(kind));
    };

    let total = values.len();
    let records: Vec<T> = values
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping {} record #{}: {}", kind, i, e);
                None
            }
        })
        .collect();

    info!("Parsed {} of {} {} records", records.len(), total, kind);
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_names() {
        let json = r#"[
            {"空港名": "新千歳空港", "コード": "CTS", "緯度": 42.7, "経度": 141.7}
        ]"#;
        let airports = parse_airports(json.as_bytes()).unwrap();
        assert_eq!(airports, vec![Airport::new("新千歳空港", "CTS", 42.7, 141.7)]);
        assert_eq!(airports[0].key(), "新千歳");
    }

    #[test]
    fn test_parse_english_aliases() {
        let json = r#"[
            {"origin": "Haneda", "destination": "Itami", "departure_time": "07:05",
             "arrival_time": "08:15", "flight_number": "NH15"}
        ]"#;
        let flights = parse_flights(json.as_bytes()).unwrap();
        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0].flight_number, "NH15");
        assert_eq!(flights[0].origin_key(), "haneda");
    }

    #[test]
    fn test_coerces_nulls_numbers_and_string_coordinates() {
        let json = r#"[
            {"空港名": null, "緯度": "35.5", "経度": " 139.7 "}
        ]"#;
        let airports = parse_airports(json.as_bytes()).unwrap();
        assert_eq!(airports[0].name, "");
        assert_eq!(airports[0].code, "");
        assert_eq!(airports[0].position(), (35.5, 139.7));

        let json = r#"[{"出発空港": "A", "便名": 100, "出発時刻": null}]"#;
        let flights = parse_flights(json.as_bytes()).unwrap();
        assert_eq!(flights[0].flight_number, "100");
        assert_eq!(flights[0].departure_time, "");
        assert_eq!(flights[0].destination, "");
    }

    #[test]
    fn test_bad_records_skipped() {
        let json = r#"[
            {"空港名": "A", "緯度": "north", "経度": 1.0},
            {"空港名": "B"},
            42,
            {"空港名": "C", "緯度": 1.0, "経度": 2.0}
        ]"#;
        let airports = parse_airports(json.as_bytes()).unwrap();
        assert_eq!(airports.len(), 1);
        assert_eq!(airports[0].name, "C");
    }

    #[test]
    fn test_non_array_payload_rejected() {
        let err = parse_flights(br#"{"flights": []}"#).unwrap_err();
        assert!(matches!(err, DataError::NotAnArray("flight")));

        let err = parse_flights(b"not json").unwrap_err();
        assert!(matches!(err, DataError::Json(_)));
    }
}
