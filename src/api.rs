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

//! Airport and flight data loading.
//!
//! Both lists are fetched once, concurrently, with no ordering between them
//! and no retry. A failed load is logged and leaves that list empty; the map
//! still renders whatever did arrive.

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};
use route_core::{parse_airports, parse_flights, Airport, DataError, Flight};
use thiserror::Error;

const AIRPORTS_RESOURCE: &str = "airports";
const FLIGHTS_RESOURCE: &str = "flights";

/// Errors that can occur while loading a dataset.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {resource} payload: {source}")]
    Payload {
        resource: &'static str,
        #[source]
        source: DataError,
    },
}

/// Where the two datasets come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Backend serving `GET {base}/airports` and `GET {base}/flights`.
    Http { base: String },
    /// Directory holding `airports.json` and `flights.json`.
    Files { dir: PathBuf },
}

impl DataSource {
    /// URL of a resource on an HTTP source.
    #[must_use]
    pub fn endpoint(base: &str, resource: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), resource)
    }

    fn describe(&self, resource: &str) -> String {
        match self {
            Self::Http { base } => Self::endpoint(base, resource),
            Self::Files { dir } => file_path(dir, resource).display().to_string(),
        }
    }
}

fn file_path(dir: &Path, resource: &str) -> PathBuf {
    dir.join(format!("{resource}.json"))
}

/// Result of loading both datasets.
#[derive(Debug, Default)]
pub struct LoadedData {
    pub airports: Vec<Airport>,
    pub flights: Vec<Flight>,
}

/// Loads datasets from a [`DataSource`].
#[derive(Debug, Clone)]
pub struct DataClient {
    source: DataSource,
    http: reqwest::Client,
}

impl DataClient {
    /// Create a client for `source`, with an optional per-request timeout.
    pub fn new(source: DataSource, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ApiError::Client)?;

        Ok(Self { source, http })
    }

    /// Fetch the airport list.
    pub async fn fetch_airports(&self) -> Result<Vec<Airport>, ApiError> {
        let bytes = self.fetch(AIRPORTS_RESOURCE).await?;
        parse_airports(&bytes).map_err(|source| ApiError::Payload {
            resource: AIRPORTS_RESOURCE,
            source,
        })
    }

    /// Fetch the flight list.
    pub async fn fetch_flights(&self) -> Result<Vec<Flight>, ApiError> {
        let bytes = self.fetch(FLIGHTS_RESOURCE).await?;
        parse_flights(&bytes).map_err(|source| ApiError::Payload {
            resource: FLIGHTS_RESOURCE,
            source,
        })
    }

    /// Fetch both lists concurrently.
    ///
    /// Failures are logged and yield an empty list for that dataset only.
    pub async fn load(&self) -> LoadedData {
        let (airports, flights) = tokio::join!(self.fetch_airports(), self.fetch_flights());

        LoadedData {
            airports: airports.unwrap_or_else(|e| {
                warn!("Failed to load airports: {}", e);
                Vec::new()
            }),
            flights: flights.unwrap_or_else(|e| {
                warn!("Failed to load flights: {}", e);
                Vec::new()
            }),
        }
    }

    async fn fetch(&self, resource: &'static str) -> Result<Vec<u8>, ApiError> {
        info!("Loading {} from {}", resource, self.source.describe(resource));

        match &self.source {
            DataSource::Http { base } => {
                let url = DataSource::endpoint(base, resource);
                let response = self
                    .http
                    .get(&url)
                    .send()
                    .await
                    .map_err(|source| ApiError::Transport {
                        url: url.clone(),
                        source,
                    })?;

                if !response.status().is_success() {
                    return Err(ApiError::Status {
                        url,
                        status: response.status(),
                    });
                }

                let bytes = response
                    .bytes()
                    .await
                    .map_err(|source| ApiError::Transport { url, source })?;
                Ok(bytes.to_vec())
            }
            DataSource::Files { dir } => {
                let path = file_path(dir, resource);
                tokio::fs::read(&path)
                    .await
                    .map_err(|source| ApiError::Io { path, source })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AIRPORTS_JSON: &str = r#"[
        {"空港名": "新千歳空港", "コード": "CTS", "緯度": 42.7, "経度": 141.7},
        {"空港名": "羽田空港", "コード": "HND", "緯度": 35.5, "経度": 139.7}
    ]"#;

    const FLIGHTS_JSON: &str = r#"[
        {"出発空港": "新千歳空港", "到着空港": "羽田空港", "出発時刻": "08:00",
         "到着時刻": "09:30", "便名": "AB100"}
    ]"#;

    fn file_client(dir: &Path) -> DataClient {
        DataClient::new(
            DataSource::Files {
                dir: dir.to_path_buf(),
            },
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        assert_eq!(
            DataSource::endpoint("http://localhost:8000/", "airports"),
            "http://localhost:8000/airports"
        );
        assert_eq!(
            DataSource::endpoint("http://localhost:8000", "flights"),
            "http://localhost:8000/flights"
        );
    }

    #[tokio::test]
    async fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("airports.json"), AIRPORTS_JSON).unwrap();
        std::fs::write(dir.path().join("flights.json"), FLIGHTS_JSON).unwrap();

        let data = file_client(dir.path()).load().await;
        assert_eq!(data.airports.len(), 2);
        assert_eq!(data.flights.len(), 1);
        assert_eq!(data.flights[0].flight_number, "AB100");
    }

    #[tokio::test]
    async fn test_one_failed_load_keeps_the_other() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("flights.json"), FLIGHTS_JSON).unwrap();

        let data = file_client(dir.path()).load().await;
        assert!(data.airports.is_empty());
        assert_eq!(data.flights.len(), 1);
    }

    #[tokio::test]
    async fn test_payload_error_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("airports.json"), "{}").unwrap();

        let err = file_client(dir.path()).fetch_airports().await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Payload {
                resource: "airports",
                ..
            }
        ));

        let err = file_client(dir.path()).fetch_flights().await.unwrap_err();
        assert!(matches!(err, ApiError::Io { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_backend_yields_empty_lists() {
        let client = DataClient::new(
            DataSource::Http {
                base: "http://127.0.0.1:9".to_string(),
            },
            Some(Duration::from_secs(2)),
        )
        .unwrap();

        let data = client.load().await;
        assert!(data.airports.is_empty());
        assert!(data.flights.is_empty());
    }
}
