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

//! Derived route views.
//!
//! Every query here is a pure function of the store contents and its
//! arguments. Nothing is cached; callers recompute after each state change.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::model::Flight;
use crate::normalize::normalize_str;
use crate::store::RouteStore;

/// Straight line between two airports, as (lat, lon) pairs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteSegment {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

/// Flights in both directions between two airports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BiDirectional<'a> {
    /// A → B, ascending by departure time.
    pub outbound: Vec<&'a Flight>,
    /// B → A, ascending by departure time.
    pub inbound: Vec<&'a Flight>,
}

/// Flights split by whether they depart from the selected airport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition<'a> {
    /// Flights departing elsewhere. Drawn first.
    pub other: Vec<&'a Flight>,
    /// Flights departing from the selection. Drawn on top.
    pub selected: Vec<&'a Flight>,
}

impl<'a> Partition<'a> {
    /// Both groups in drawing order.
    pub fn drawing_order(&self) -> impl Iterator<Item = (&'a Flight, bool)> + '_ {
        self.other
            .iter()
            .map(|f| (*f, false))
            .chain(self.selected.iter().map(|f| (*f, true)))
    }
}

/// Read-only query view over a [`RouteStore`].
#[derive(Debug, Clone, Copy)]
pub struct RouteIndex<'a> {
    store: &'a RouteStore,
}

impl<'a> RouteIndex<'a> {
    #[must_use]
    pub fn new(store: &'a RouteStore) -> Self {
        Self { store }
    }

    /// Flights departing from the named airport, in store order.
    #[must_use]
    pub fn routes_from(&self, airport_name: &str) -> Vec<&'a Flight> {
        let key = normalize_str(airport_name);
        self.store
            .flights()
            .iter()
            .filter(|f| f.origin_key() == key)
            .collect()
    }

    /// Flights A → B and B → A, each sorted by departure time.
    ///
    /// Times are compared as text, so they must be in a sortable notation
    /// such as zero-padded `HH:MM`.
    #[must_use]
    pub fn bi_directional(&self, a: &str, b: &str) -> BiDirectional<'a> {
        let a = normalize_str(a);
        let b = normalize_str(b);

        let mut result = BiDirectional::default();
        for flight in self.store.flights() {
            let origin = flight.origin_key();
            let destination = flight.destination_key();
            if origin == a && destination == b {
                result.outbound.push(flight);
            }
            // Not `else if`: a flight from an airport to itself belongs to both.
            if origin == b && destination == a {
                result.inbound.push(flight);
            }
        }

        result
            .outbound
            .sort_by(|x, y| x.departure_time.cmp(&y.departure_time));
        result
            .inbound
            .sort_by(|x, y| x.departure_time.cmp(&y.departure_time));
        result
    }

    /// The selected key plus every key one flight away in either direction.
    ///
    /// Returns an empty set when nothing is selected (empty key).
    #[must_use]
    pub fn connected_keys(&self, selected_key: &str) -> BTreeSet<String> {
        let mut keys = BTreeSet::new();
        if selected_key.is_empty() {
            return keys;
        }

        keys.insert(selected_key.to_string());
        for flight in self.store.flights() {
            let origin = flight.origin_key();
            let destination = flight.destination_key();
            if origin == selected_key {
                keys.insert(destination.clone());
            }
            if destination == selected_key {
                keys.insert(origin);
            }
        }

        keys
    }

    /// Split flights by whether their origin key equals `selected_key`.
    ///
    /// With nothing selected every named flight lands in `other`.
    #[must_use]
    pub fn partition(&self, selected_key: &str) -> Partition<'a> {
        let (selected, other): (Vec<&'a Flight>, Vec<&'a Flight>) = self
            .store
            .flights()
            .iter()
            .partition(|f| f.origin_key() == selected_key);
        Partition { other, selected }
    }

    /// Position of the airport matching `name`, if loaded.
    #[must_use]
    pub fn locate(&self, name: &str) -> Option<(f64, f64)> {
        self.store.airport_by_name(name).map(|a| a.position())
    }

    /// Line for a flight, or `None` when either endpoint is unknown.
    #[must_use]
    pub fn route_segment(&self, flight: &Flight) -> Option<RouteSegment> {
        Some(RouteSegment {
            from: self.locate(&flight.origin)?,
            to: self.locate(&flight.destination)?,
        })
    }
}
