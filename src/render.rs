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

//! Plain-text rendering of scene elements for the terminal.

use std::fmt::Write as _;

use route_core::{RouteTooltip, Scene, TimetablePanel};

/// Airport list with highlight markers.
///
/// `*` marks a bright point while something is selected, `.` a dimmed one.
#[must_use]
pub fn airport_list(scene: &Scene) -> String {
    let mut out = String::new();
    for point in &scene.points {
        let marker = match (scene.view.tiles_dimmed, point.dimmed) {
            (false, _) => ' ',
            (true, false) => '*',
            (true, true) => '.',
        };
        let _ = writeln!(
            out,
            "{} {:<4} {:<16} {:>8.3} {:>9.3}  [{}]",
            marker, point.code, point.name, point.position.0, point.position.1, point.key
        );
    }
    out
}

/// Departures panel.
#[must_use]
pub fn timetable(panel: &TimetablePanel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", panel.title);
    for entry in &panel.entries {
        let _ = writeln!(out, "  ✈ {entry}");
    }
    out
}

/// Two-way route tooltip.
#[must_use]
pub fn route_tooltip(tooltip: &RouteTooltip) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", tooltip.title);
    for section in [&tooltip.outbound, &tooltip.inbound] {
        let _ = writeln!(out, "  {}", section.heading);
        for line in section.lines() {
            let _ = writeln!(out, "    {line}");
        }
    }
    out
}

/// One-line summary of what the map would draw.
#[must_use]
pub fn summary(scene: &Scene) -> String {
    let highlighted = scene.routes.iter().filter(|r| r.highlighted).count();
    let bright = scene.points.iter().filter(|p| !p.dimmed).count();
    format!(
        "{} routes ({} highlighted), {} airports ({} bright)",
        scene.routes.len(),
        highlighted,
        scene.points.len(),
        bright
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_core::{
        Airport, Flight, MapEvent, MapState, RouteIndex, RouteStore, SceneOptions, SelectionEvent,
    };

    fn selected_scene() -> Scene {
        let mut state = MapState::default();
        state.update(MapEvent::AirportsLoaded(vec![
            Airport::new("新千歳空港", "CTS", 42.7, 141.7),
            Airport::new("羽田空港", "HND", 35.5, 139.7),
            Airport::new("福岡空港", "FUK", 33.6, 130.5),
        ]));
        state.update(MapEvent::FlightsLoaded(vec![Flight::new(
            "新千歳空港",
            "羽田空港",
            "08:00",
            "09:30",
            "AB100",
        )]));
        state.update(SelectionEvent::AirportActivated("新千歳空港".to_string()));
        Scene::build(&state, &SceneOptions::default())
    }

    #[test]
    fn test_airport_list_markers() {
        let text = airport_list(&selected_scene());
        let markers: Vec<char> = text.lines().filter_map(|l| l.chars().next()).collect();
        assert_eq!(markers, vec!['*', '*', '.']);
        assert!(text.contains("[新千歳]"));
    }

    #[test]
    fn test_timetable_text() {
        let scene = selected_scene();
        let text = timetable(scene.panel.as_ref().unwrap());
        assert_eq!(
            text,
            "新千歳空港 空港発の便\n  ✈ 08:00 → 羽田空港（09:30） [AB100]\n"
        );
    }

    #[test]
    fn test_tooltip_placeholder() {
        let store = RouteStore::with_data(
            Vec::new(),
            vec![Flight::new("A", "B", "08:00", "09:00", "X1")],
        );
        let tooltip = RouteTooltip::build(&RouteIndex::new(&store), "A", "B");
        let text = route_tooltip(&tooltip);
        assert!(text.contains("A → B\n    08:00 → 09:00 [X1]"));
        assert!(text.contains("B → A\n    該当なし"));
    }

    #[test]
    fn test_summary() {
        assert_eq!(
            summary(&selected_scene()),
            "1 routes (1 highlighted), 3 airports (2 bright)"
        );
    }
}
