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

//! Airport selection state machine.
//!
//! Activating an airport selects it, activating the selected airport again
//! (in any notation) clears it, and activating the map background always
//! clears. Only the latest interaction matters.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::normalize::normalize_str;

/// User interaction that drives selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionEvent {
    /// A point for the named airport was activated.
    AirportActivated(String),
    /// The map background was activated, or an external clear was requested.
    BackgroundActivated,
}

/// Currently selected airport, held by its original name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(String),
}

impl Selection {
    /// Apply an event and return the next state.
    #[must_use]
    pub fn apply(self, event: SelectionEvent) -> Self {
        let next = match (self, event) {
            (_, SelectionEvent::BackgroundActivated) => Self::Unselected,
            // An unnamed point can never be highlighted.
            (_, SelectionEvent::AirportActivated(name)) if normalize_str(&name).is_empty() => {
                Self::Unselected
            }
            (Self::Selected(current), SelectionEvent::AirportActivated(name))
                if normalize_str(&current) == normalize_str(&name) =>
            {
                Self::Unselected
            }
            (_, SelectionEvent::AirportActivated(name)) => Self::Selected(name),
        };

        debug!("Selection -> {:?}", next);
        next
    }

    /// Original name of the selected airport.
    #[must_use]
    pub fn airport(&self) -> Option<&str> {
        match self {
            Self::Selected(name) => Some(name),
            Self::Unselected => None,
        }
    }

    /// Normalized key of the selection; empty when nothing is selected.
    #[must_use]
    pub fn key(&self) -> String {
        self.airport().map(normalize_str).unwrap_or_default()
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected(_))
    }
}
