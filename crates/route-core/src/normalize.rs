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

//! Airport name normalization.
//!
//! Airport and flight records come from independently maintained datasets
//! that disagree on notation ("新千歳空港" vs "新千歳", stray spaces, case).
//! Every comparison between the two goes through [`normalize`].

/// Trailing token meaning "airport".
pub const AIRPORT_SUFFIX: &str = "空港";

/// Canonicalize an optional airport name into its matching key.
///
/// Absent names normalize to the empty string, which matches nothing that
/// was given a real name.
#[must_use]
pub fn normalize(name: Option<&str>) -> String {
    name.map(normalize_str).unwrap_or_default()
}

/// Canonicalize an airport name into its matching key.
///
/// Whitespace (including the ideographic space) is removed first so that a
/// suffix followed by padding is still recognized. The suffix is stripped
/// until none remains, which keeps the function idempotent.
#[must_use]
pub fn normalize_str(name: &str) -> String {
    let compact: String = name.chars().filter(|c| !c.is_whitespace()).collect();

    let mut key = compact.as_str();
    while let Some(stripped) = key.strip_suffix(AIRPORT_SUFFIX) {
        key = stripped;
    }

    key.to_lowercase()
}
