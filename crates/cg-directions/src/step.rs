//! Narration output types.

use crate::{Description, Language};

/// Icon category shown next to a step.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepIcon {
    Start,
    Target,
    Error,
    TurnLeft,
    TurnRight,
    Straight,
    Door,
    Room,
    Stairs,
    Elevator,
    Walk,
    Crossing,
}

impl StepIcon {
    /// Material icon name used by the clients.
    pub fn material_name(self) -> &'static str {
        match self {
            StepIcon::Start => "my_location",
            StepIcon::Target => "place",
            StepIcon::Error => "error",
            StepIcon::TurnLeft => "turn_left",
            StepIcon::TurnRight => "turn_right",
            StepIcon::Straight => "straight",
            StepIcon::Door => "door_front",
            StepIcon::Room => "meeting_room",
            StepIcon::Stairs => "stairs",
            StepIcon::Elevator => "elevator",
            StepIcon::Walk => "directions_walk",
            StepIcon::Crossing => "traffic",
        }
    }
}

/// One instruction of a route.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    /// Stable identifier, unique within one set of results.
    pub key:         String,
    pub description: Description,
    pub icon:        Option<StepIcon>,
}

impl Step {
    pub fn new(key: impl Into<String>, description: Description, icon: Option<StepIcon>) -> Self {
        Self { key: key.into(), description, icon }
    }

    pub fn text(&self, language: Language) -> &str {
        self.description.get(language)
    }
}

/// Everything returned for one navigation request.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectionResults {
    pub steps:       Vec<Step>,
    /// Set when no route was found, so clients can offer to report it.
    pub show_report: bool,
    /// Language the request asked for; every step carries both.
    pub language:    Language,
    /// Total distance of the route in graph units, if one was found.
    pub distance:    Option<u64>,
}

impl DirectionResults {
    /// Step texts in the requested language.
    pub fn lines(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.text(self.language)).collect()
    }

    /// Step texts in another language.
    pub fn lines_in(&self, language: Language) -> Vec<&str> {
        self.steps.iter().map(|s| s.text(language)).collect()
    }
}
