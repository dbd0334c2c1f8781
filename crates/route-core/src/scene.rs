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

//! Renderer-facing scene model.
//!
//! A [`Scene`] is everything a map renderer needs to draw one frame: route
//! lines in drawing order with their styles and tooltips, airport points with
//! their highlight state, and the timetable panel for the selection. It is
//! rebuilt from [`MapState`] after every state change.

use serde::Serialize;

use crate::index::{RouteIndex, RouteSegment};
use crate::model::Flight;
use crate::state::MapState;

/// Color for routes not touching the selection.
pub const ROUTE_BASE_COLOR: &str = "#778899";
/// Color for routes departing from the selection.
pub const ROUTE_HIGHLIGHT_COLOR: &str = "#ff0000";
/// Tooltip text for a direction without flights ("none").
pub const NO_FLIGHTS: &str = "該当なし";

const POINT_RADIUS: f32 = 5.0;
const DIMMED_TILE_OPACITY: f32 = 0.5;

/// Map framing options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneOptions {
    /// Initial map center (lat, lon).
    pub center: (f64, f64),
    /// Initial zoom level.
    pub zoom: u8,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            center: (44.5, 142.0),
            zoom: 6,
        }
    }
}

/// Base map presentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub center: (f64, f64),
    pub zoom: u8,
    pub tile_opacity: f32,
    /// Tiles are drawn desaturated while an airport is selected.
    pub tiles_dimmed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: &'static str,
    pub weight: f32,
    pub opacity: f32,
}

/// Line style for each pointer state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteStyle {
    pub normal: LineStyle,
    /// Pointer over the line.
    pub hover: LineStyle,
    /// Pointer just left the line.
    pub leave: LineStyle,
}

impl RouteStyle {
    /// Style for a route departing from the selected airport.
    #[must_use]
    pub fn highlighted() -> Self {
        let line = |weight, opacity| LineStyle {
            color: ROUTE_HIGHLIGHT_COLOR,
            weight,
            opacity,
        };
        Self {
            normal: line(3.0, 1.0),
            hover: line(5.0, 1.0),
            leave: line(3.0, 0.95),
        }
    }

    /// Style for any other route; faded further while something is selected.
    #[must_use]
    pub fn base(selecting: bool) -> Self {
        let line = |opacity| LineStyle {
            color: ROUTE_BASE_COLOR,
            weight: 1.0,
            opacity,
        };
        if selecting {
            Self {
                normal: line(0.08),
                hover: line(0.35),
                leave: line(0.2),
            }
        } else {
            Self {
                normal: line(0.6),
                hover: line(0.8),
                leave: line(0.6),
            }
        }
    }
}

/// One direction of a route tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TooltipSection {
    /// "{from} → {to}"
    pub heading: String,
    /// "{dep} → {arr} [{number}]", ascending by departure.
    pub entries: Vec<String>,
}

impl TooltipSection {
    fn new(from: &str, to: &str, flights: &[&Flight]) -> Self {
        Self {
            heading: format!("{from} → {to}"),
            entries: flights
                .iter()
                .map(|f| {
                    format!(
                        "{} → {} [{}]",
                        f.departure_time, f.arrival_time, f.flight_number
                    )
                })
                .collect(),
        }
    }

    /// Entries, or the placeholder when there are none.
    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        if self.entries.is_empty() {
            vec![NO_FLIGHTS]
        } else {
            self.entries.iter().map(String::as_str).collect()
        }
    }
}

/// Timetable shown when hovering a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteTooltip {
    /// "{from} ⇄ {to}"
    pub title: String,
    pub outbound: TooltipSection,
    pub inbound: TooltipSection,
}

impl RouteTooltip {
    /// Build the tooltip for the pair `from`/`to` using the names as written.
    #[must_use]
    pub fn build(index: &RouteIndex<'_>, from: &str, to: &str) -> Self {
        let pair = index.bi_directional(from, to);
        Self {
            title: format!("{from} ⇄ {to}"),
            outbound: TooltipSection::new(from, to, &pair.outbound),
            inbound: TooltipSection::new(to, from, &pair.inbound),
        }
    }
}

/// A drawable route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLine {
    pub origin: String,
    pub destination: String,
    pub flight_number: String,
    pub segment: RouteSegment,
    /// Departs from the selected airport.
    pub highlighted: bool,
    pub style: RouteStyle,
    pub tooltip: RouteTooltip,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointStyle {
    pub stroke: &'static str,
    pub weight: f32,
    pub fill: &'static str,
    pub fill_opacity: f32,
}

impl PointStyle {
    const BRIGHT: Self = Self {
        stroke: "#000000",
        weight: 1.0,
        fill: "#ff0000",
        fill_opacity: 1.0,
    };

    const DIMMED: Self = Self {
        stroke: "#9aa4ad",
        weight: 1.0,
        fill: "#ff8888",
        fill_opacity: 0.25,
    };
}

/// A drawable airport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirportPoint {
    pub name: String,
    pub code: String,
    pub key: String,
    pub position: (f64, f64),
    pub radius: f32,
    /// Something is selected and this airport is not connected to it.
    pub dimmed: bool,
    pub style: PointStyle,
}

/// Departures panel for the selected airport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimetablePanel {
    /// "{name} 空港発の便" ("departures from {name}")
    pub title: String,
    /// "{dep} → {destination}（{arr}） [{number}]", in store order.
    pub entries: Vec<String>,
}

impl TimetablePanel {
    /// Build the departures panel for `airport_name`.
    #[must_use]
    pub fn build(index: &RouteIndex<'_>, airport_name: &str) -> Self {
        Self {
            title: format!("{airport_name} 空港発の便"),
            entries: index
                .routes_from(airport_name)
                .iter()
                .map(|f| {
                    format!(
                        "{} → {}（{}） [{}]",
                        f.departure_time, f.destination, f.arrival_time, f.flight_number
                    )
                })
                .collect(),
        }
    }
}

/// Everything needed to draw the map once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub view: MapView,
    /// Drawing order: unrelated routes first, selected routes on top.
    pub routes: Vec<RouteLine>,
    /// Drawn above all routes.
    pub points: Vec<AirportPoint>,
    pub panel: Option<TimetablePanel>,
}

impl Scene {
    /// Build the scene for the current state.
    ///
    /// Flights whose endpoints cannot be resolved to a loaded airport are left
    /// out without error.
    #[must_use]
    pub fn build(state: &MapState, options: &SceneOptions) -> Self {
        let index = state.index();
        let selection = state.selection();
        let selected_key = selection.key();
        let selecting = !selected_key.is_empty();

        let routes = index
            .partition(&selected_key)
            .drawing_order()
            .filter_map(|(flight, highlighted)| {
                let segment = index.route_segment(flight)?;
                Some(RouteLine {
                    origin: flight.origin.clone(),
                    destination: flight.destination.clone(),
                    flight_number: flight.flight_number.clone(),
                    segment,
                    highlighted,
                    style: if highlighted {
                        RouteStyle::highlighted()
                    } else {
                        RouteStyle::base(selecting)
                    },
                    tooltip: RouteTooltip::build(&index, &flight.origin, &flight.destination),
                })
            })
            .collect();

        let connected = index.connected_keys(&selected_key);
        let points = state
            .store()
            .airports()
            .iter()
            .map(|airport| {
                let key = airport.key();
                let dimmed = selecting && !connected.contains(&key);
                AirportPoint {
                    name: airport.name.clone(),
                    code: airport.code.clone(),
                    key,
                    position: airport.position(),
                    radius: POINT_RADIUS,
                    dimmed,
                    style: if dimmed {
                        PointStyle::DIMMED
                    } else {
                        PointStyle::BRIGHT
                    },
                }
            })
            .collect();

        let panel = selection
            .airport()
            .map(|name| TimetablePanel::build(&index, name));

        Self {
            view: MapView {
                center: options.center,
                zoom: options.zoom,
                tile_opacity: if selecting { DIMMED_TILE_OPACITY } else { 1.0 },
                tiles_dimmed: selecting,
            },
            routes,
            points,
            panel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Airport;
    use crate::selection::SelectionEvent;
    use crate::state::MapEvent;

    fn loaded_state() -> MapState {
        let mut state = MapState::default();
        state.update(MapEvent::AirportsLoaded(vec![
            Airport::new("新千歳空港", "CTS", 42.7, 141.7),
            Airport::new("羽田空港", "HND", 35.5, 139.7),
            Airport::new("女満別空港", "MMB", 43.9, 144.2),
        ]));
        state.update(MapEvent::FlightsLoaded(vec![
            Flight::new("羽田空港", "新千歳空港", "10:00", "11:35", "JL505"),
            Flight::new("新千歳空港", "羽田空港", "08:00", "09:30", "AB100"),
            Flight::new("羽田", "女満別", "09:10", "10:55", "JL563"),
            Flight::new("新千歳空港", "紋別空港", "12:00", "12:50", "XX1"),
        ]));
        state
    }

    #[test]
    fn test_unselected_scene() {
        let state = loaded_state();
        let scene = Scene::build(&state, &SceneOptions::default());

        assert_eq!(scene.view.center, (44.5, 142.0));
        assert!(!scene.view.tiles_dimmed);
        assert!((scene.view.tile_opacity - 1.0).abs() < f32::EPSILON);
        assert!(scene.panel.is_none());

        // The flight to an unknown airport has no line.
        assert_eq!(scene.routes.len(), 3);
        assert!(scene.routes.iter().all(|r| !r.highlighted));
        assert!(scene
            .routes
            .iter()
            .all(|r| r.style == RouteStyle::base(false)));
        assert!(scene.points.iter().all(|p| !p.dimmed));
    }

    #[test]
    fn test_selected_scene_layers_and_dims() {
        let mut state = loaded_state();
        state.update(SelectionEvent::AirportActivated("新千歳".to_string()));
        let scene = Scene::build(&state, &SceneOptions::default());

        assert!(scene.view.tiles_dimmed);
        let numbers: Vec<&str> = scene
            .routes
            .iter()
            .map(|r| r.flight_number.as_str())
            .collect();
        assert_eq!(numbers, vec!["JL505", "JL563", "AB100"]);
        assert!(scene.routes[2].highlighted);
        assert_eq!(scene.routes[2].style, RouteStyle::highlighted());
        assert_eq!(scene.routes[0].style, RouteStyle::base(true));

        let dimmed: Vec<&str> = scene
            .points
            .iter()
            .filter(|p| p.dimmed)
            .map(|p| p.code.as_str())
            .collect();
        assert_eq!(dimmed, vec!["MMB"]);

        let panel = scene.panel.unwrap();
        assert_eq!(panel.title, "新千歳 空港発の便");
        assert_eq!(
            panel.entries,
            vec![
                "08:00 → 羽田空港（09:30） [AB100]".to_string(),
                "12:00 → 紋別空港（12:50） [XX1]".to_string(),
            ]
        );
    }

    #[test]
    fn test_route_tooltip_both_directions() {
        let state = loaded_state();
        let index = state.index();

        let tooltip = RouteTooltip::build(&index, "新千歳空港", "羽田空港");
        assert_eq!(tooltip.title, "新千歳空港 ⇄ 羽田空港");
        assert_eq!(tooltip.outbound.heading, "新千歳空港 → 羽田空港");
        assert_eq!(tooltip.outbound.entries, vec!["08:00 → 09:30 [AB100]".to_string()]);
        assert_eq!(tooltip.inbound.entries, vec!["10:00 → 11:35 [JL505]".to_string()]);

        let tooltip = RouteTooltip::build(&index, "羽田", "女満別");
        assert!(tooltip.inbound.entries.is_empty());
        assert_eq!(tooltip.inbound.lines(), vec![NO_FLIGHTS]);
    }

    #[test]
    fn test_empty_state_renders_nothing() {
        let scene = Scene::build(&MapState::default(), &SceneOptions::default());
        assert!(scene.routes.is_empty());
        assert!(scene.points.is_empty());
        assert!(scene.panel.is_none());
    }
}
