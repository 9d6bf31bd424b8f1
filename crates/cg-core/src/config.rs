//! Navigation configuration.
//!
//! The defaults reproduce the plain shortest-distance behaviour: composite
//! routes are ranked by the raw sum of their three legs and no penalties are
//! applied during search.

/// Building code of the outdoor graph.
pub const OUTDOOR_BUILDING: &str = "OUT";

/// Campus assigned to graphs without a `[CAMPUS]` section.
pub const DEFAULT_CAMPUS: &str = "main";

/// Tunables shared by the loader, search, composer and narrator.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavConfig {
    /// Building code whose graph connects the doors of every building.
    pub outdoor_building: String,

    /// Campus used when a graph does not name one.
    pub default_campus: String,

    /// Metres per indoor graph unit, used by weighted composition.
    pub inner_unit_to_m: f64,

    /// Metres per outdoor graph unit, used by weighted composition and when
    /// narrating walked distances.
    pub outer_unit_to_m: f64,

    /// Rank composite routes by unit-weighted cost instead of the raw sum.
    pub weighted_composition: bool,

    /// Extra cost added when a route would take a second stairway or
    /// elevator in the same building, or climb more than `max_stair_floors`
    /// by stairs.  Affects route choice only, never reported distances.
    pub floor_change_penalty: Option<u32>,

    /// Floors a stairway may span before `floor_change_penalty` applies.
    pub max_stair_floors: u32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            outdoor_building:     OUTDOOR_BUILDING.to_owned(),
            default_campus:       DEFAULT_CAMPUS.to_owned(),
            inner_unit_to_m:      0.29,
            outer_unit_to_m:      1.7,
            weighted_composition: false,
            floor_change_penalty: None,
            max_stair_floors:     2,
        }
    }
}

impl NavConfig {
    /// Enable the floor-change penalty with the given extra cost.
    pub fn with_floor_penalty(mut self, penalty: u32) -> Self {
        self.floor_change_penalty = Some(penalty);
        self
    }
}
