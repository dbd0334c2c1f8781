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

//! Map state and its single update function.
//!
//! [`MapState`] owns the loaded data and the selection. Every change goes
//! through [`MapState::update`], which emits a [`StateEvent`] to subscribers
//! whenever something observable changed.

use tokio::sync::broadcast;

use crate::index::RouteIndex;
use crate::model::{Airport, Flight};
use crate::selection::{Selection, SelectionEvent};
use crate::store::RouteStore;

/// Inputs to the map state.
#[derive(Debug, Clone)]
pub enum MapEvent {
    /// Airport load completed.
    AirportsLoaded(Vec<Airport>),
    /// Flight load completed.
    FlightsLoaded(Vec<Flight>),
    /// User interaction.
    Selection(SelectionEvent),
}

impl From<SelectionEvent> for MapEvent {
    fn from(event: SelectionEvent) -> Self {
        Self::Selection(event)
    }
}

/// Events emitted when map state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateEvent {
    /// The airport list was replaced (new count).
    AirportsReplaced(usize),
    /// The flight list was replaced (new count).
    FlightsReplaced(usize),
    /// The selection changed (new airport name, if any).
    SelectionChanged(Option<String>),
}

/// Configuration for the map state.
#[derive(Debug, Clone)]
pub struct MapStateConfig {
    /// Broadcast channel capacity for events.
    pub event_channel_capacity: usize,
}

impl Default for MapStateConfig {
    fn default() -> Self {
        Self {
            event_channel_capacity: 64,
        }
    }
}

/// Loaded data plus the current selection.
pub struct MapState {
    store: RouteStore,
    selection: Selection,
    event_tx: broadcast::Sender<StateEvent>,
}

impl std::fmt::Debug for MapState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapState")
            .field("airport_count", &self.store.airports().len())
            .field("flight_count", &self.store.flights().len())
            .field("selection", &self.selection)
            .finish()
    }
}

impl Default for MapState {
    fn default() -> Self {
        Self::new(MapStateConfig::default())
    }
}

impl MapState {
    /// Create an empty, unselected map state.
    #[must_use]
    pub fn new(config: MapStateConfig) -> Self {
        let (event_tx, _) = broadcast::channel(config.event_channel_capacity.max(1));
        Self {
            store: RouteStore::new(),
            selection: Selection::Unselected,
            event_tx,
        }
    }

    /// Apply an event.
    pub fn update(&mut self, event: impl Into<MapEvent>) {
        match event.into() {
            MapEvent::AirportsLoaded(airports) => {
                let count = airports.len();
                self.store.replace_airports(airports);
                let _ = self.event_tx.send(StateEvent::AirportsReplaced(count));
            }
            MapEvent::FlightsLoaded(flights) => {
                let count = flights.len();
                self.store.replace_flights(flights);
                let _ = self.event_tx.send(StateEvent::FlightsReplaced(count));
            }
            MapEvent::Selection(event) => {
                let previous = std::mem::take(&mut self.selection);
                let changed_from = previous.clone();
                self.selection = previous.apply(event);
                if self.selection != changed_from {
                    let _ = self.event_tx.send(StateEvent::SelectionChanged(
                        self.selection.airport().map(str::to_string),
                    ));
                }
            }
        }
    }

    #[must_use]
    pub fn store(&self) -> &RouteStore {
        &self.store
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Query view over the current data.
    #[must_use]
    pub fn index(&self) -> RouteIndex<'_> {
        RouteIndex::new(&self.store)
    }

    /// Subscribe to state events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.event_tx.subscribe()
    }
}
