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

//! In-memory airport and flight store.
//!
//! Both lists are replaced wholesale when a load completes; nothing is edited
//! in place. Airports are indexed by normalized key so that flight endpoints
//! can be resolved without a linear scan.

use std::collections::HashMap;

use log::{info, warn};

use crate::model::{Airport, Flight};
use crate::normalize::normalize_str;

/// Loaded airports and flights.
#[derive(Debug, Clone, Default)]
pub struct RouteStore {
    airports: Vec<Airport>,
    flights: Vec<Flight>,
    /// Normalized key -> index of the first airport with that key.
    airport_keys: HashMap<String, usize>,
}

impl RouteStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from both lists.
    #[must_use]
    pub fn with_data(airports: Vec<Airport>, flights: Vec<Flight>) -> Self {
        let mut store = Self::new();
        store.replace_airports(airports);
        store.replace_flights(flights);
        store
    }

    /// Replace the airport list and rebuild the key index.
    ///
    /// Airports whose names collide after normalization are indistinguishable
    /// to every query; the first one in load order wins and the rest are
    /// reported.
    pub fn replace_airports(&mut self, airports: Vec<Airport>) {
        let mut airport_keys = HashMap::with_capacity(airports.len());

        for (idx, airport) in airports.iter().enumerate() {
            let key = airport.key();
            if key.is_empty() {
                warn!("Airport #{} has no name and cannot be matched", idx);
                continue;
            }
            if let Some(&first) = airport_keys.get(&key) {
                let kept: &Airport = &airports[first];
                warn!(
                    "Airport '{}' normalizes to '{}', already used by '{}'; keeping the first",
                    airport.name, key, kept.name
                );
                continue;
            }
            airport_keys.insert(key, idx);
        }

        info!(
            "Loaded {} airports ({} distinct keys)",
            airports.len(),
            airport_keys.len()
        );
        self.airports = airports;
        self.airport_keys = airport_keys;
    }

    /// Replace the flight list.
    pub fn replace_flights(&mut self, flights: Vec<Flight>) {
        info!("Loaded {} flights", flights.len());
        self.flights = flights;
    }

    /// All airports in load order.
    #[must_use]
    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    /// All flights in load order.
    #[must_use]
    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    /// Look up an airport by an already-normalized key.
    #[must_use]
    pub fn airport_by_key(&self, key: &str) -> Option<&Airport> {
        self.airport_keys.get(key).map(|&idx| &self.airports[idx])
    }

    /// Look up an airport by any notation of its name.
    #[must_use]
    pub fn airport_by_name(&self, name: &str) -> Option<&Airport> {
        self.airport_by_key(&normalize_str(name))
    }

    /// Normalized keys shared by more than one loaded airport.
    #[must_use]
    pub fn duplicate_keys(&self) -> Vec<String> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for airport in &self.airports {
            *counts.entry(airport.key()).or_default() += 1;
        }

        let mut duplicates: Vec<String> = counts
            .into_iter()
            .filter(|(key, count)| !key.is_empty() && *count > 1)
            .map(|(key, _)| key)
            .collect();
        duplicates.sort();
        duplicates
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.airports.is_empty() && self.flights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_any_notation() {
        let store = RouteStore::with_data(
            vec![Airport::new("羽田空港", "HND", 35.5, 139.7)],
            Vec::new(),
        );

        assert_eq!(store.airport_by_name("羽田").map(|a| a.code.as_str()), Some("HND"));
        assert_eq!(store.airport_by_name(" 羽田 空港").map(|a| a.code.as_str()), Some("HND"));
        assert!(store.airport_by_name("伊丹").is_none());
        assert!(store.airport_by_key("").is_none());
    }

    #[test]
    fn test_unnamed_airport_never_matches() {
        let store = RouteStore::with_data(vec![Airport::new("", "ZZZ", 1.0, 1.0)], Vec::new());
        assert!(store.airport_by_key("").is_none());
        assert!(store.airport_by_name("  ").is_none());
    }

    #[test]
    fn test_duplicate_keys_first_wins() {
        let store = RouteStore::with_data(
            vec![
                Airport::new("Naha空港", "OKA", 26.2, 127.6),
                Airport::new("naha", "XXX", 0.0, 0.0),
                Airport::new("Ishigaki", "ISG", 24.4, 124.2),
            ],
            Vec::new(),
        );

        assert_eq!(store.airports().len(), 3);
        assert_eq!(store.airport_by_name("NAHA").map(|a| a.code.as_str()), Some("OKA"));
        assert_eq!(store.duplicate_keys(), vec!["naha".to_string()]);
    }

    #[test]
    fn test_replace_is_wholesale() {
        let mut store = RouteStore::with_data(
            vec![Airport::new("A", "", 0.0, 0.0)],
            vec![Flight::new("A", "B", "08:00", "09:00", "X1")],
        );

        store.replace_airports(vec![Airport::new("B", "", 1.0, 1.0)]);
        assert!(store.airport_by_name("A").is_none());
        assert!(store.airport_by_name("B").is_some());
        assert_eq!(store.flights().len(), 1);

        store.replace_flights(Vec::new());
        assert!(store.flights().is_empty());
        assert!(!store.is_empty());
    }
}
