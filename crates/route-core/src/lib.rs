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

//! Route map core library.
//!
//! This library holds the logic behind an airport route map: matching airport
//! names across datasets, deriving which routes and airports relate to a
//! selected airport, and producing the scene a renderer draws. It is organized
//! in layers that can be used independently:
//!
//! - **Normalize**: canonical keys for airport names ([`normalize()`])
//! - **Model**: typed airport/flight records with lenient JSON ingest
//! - **Store / Index**: loaded lists and pure derived queries
//! - **Selection / State**: the selection state machine and the reducer that
//!   owns all mutable state
//! - **Scene**: styled lines, points, tooltips and the timetable panel
//!
//! # Quick Start
//!
//! ```
//! use route_core::{Airport, Flight, MapEvent, MapState, Scene, SceneOptions, SelectionEvent};
//!
//! let mut state = MapState::default();
//! state.update(MapEvent::AirportsLoaded(vec![
//!     Airport::new("新千歳空港", "CTS", 42.7, 141.7),
//!     Airport::new("羽田空港", "HND", 35.5, 139.7),
//! ]));
//! state.update(MapEvent::FlightsLoaded(vec![Flight::new(
//!     "新千歳空港", "羽田空港", "08:00", "09:30", "AB100",
//! )]));
//!
//! state.update(SelectionEvent::AirportActivated("新千歳".to_string()));
//!
//! let scene = Scene::build(&state, &SceneOptions::default());
//! assert!(scene.routes[0].highlighted);
//! assert_eq!(scene.panel.unwrap().entries.len(), 1);
//! ```
//!
//! # Using the Index Directly
//!
//! ```
//! use route_core::{normalize, Airport, Flight, RouteIndex, RouteStore};
//!
//! let store = RouteStore::with_data(
//!     vec![Airport::new("羽田空港", "HND", 35.5, 139.7)],
//!     vec![Flight::new("羽田空港", "伊丹空港", "07:00", "08:10", "NH15")],
//! );
//! let index = RouteIndex::new(&store);
//!
//! let connected = index.connected_keys(&normalize(Some("羽田 空港")));
//! assert!(connected.contains("伊丹"));
//! // Itami has no airport record, so the flight has no drawable line.
//! assert!(index.route_segment(&store.flights()[0]).is_none());
//! ```

pub mod index;
pub mod model;
pub mod normalize;
pub mod scene;
pub mod selection;
pub mod state;
pub mod store;

pub use index::{BiDirectional, Partition, RouteIndex, RouteSegment};
pub use model::{parse_airports, parse_flights, Airport, DataError, Flight};
pub use normalize::{normalize, normalize_str};
pub use scene::{
    AirportPoint, MapView, RouteLine, RouteStyle, RouteTooltip, Scene, SceneOptions,
    TimetablePanel,
};
pub use selection::{Selection, SelectionEvent};
pub use state::{MapEvent, MapState, MapStateConfig, StateEvent};
pub use store::RouteStore;
