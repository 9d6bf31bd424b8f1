//! Bilingual sentence templates.
//!
//! Every builder returns a [`Description`] holding the English and French
//! rendering of one step.  Node type names are looked up through the
//! [`Translator`]; everything else is fixed per language here.

use cg_core::{Node, NodeType};
use cg_graph::StreetName;

use crate::{language, ordinal, Language, Translator, Turn};

// ── Description ───────────────────────────────────────────────────────────────

/// The text of one step in every supported language.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Description {
    pub en: String,
    pub fr: String,
}

impl Description {
    /// Render with `f` once per language.
    pub fn from_fn(mut f: impl FnMut(Language) -> String) -> Self {
        Self { en: f(Language::En), fr: f(Language::Fr) }
    }

    /// The same text in every language, e.g. a building code and room.
    pub fn same(text: impl Into<String>) -> Self {
        let text = text.into();
        Self { en: text.clone(), fr: text }
    }

    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::En => &self.en,
            Language::Fr => &self.fr,
        }
    }
}

// ── Way ───────────────────────────────────────────────────────────────────────

/// What the walker is currently following outdoors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Way<'g> {
    Street(&'g StreetName),
    Path,
}

impl Way<'_> {
    fn name(&self, language: Language) -> String {
        match (self, language) {
            (Way::Street(street), Language::En) => street.en.clone(),
            (Way::Street(street), Language::Fr) => street.fr.clone(),
            (Way::Path, Language::En) => "the path".to_owned(),
            (Way::Path, Language::Fr) => "la voie".to_owned(),
        }
    }
}

// ── Fragments ─────────────────────────────────────────────────────────────────

fn turn(turn: Turn, language: Language) -> &'static str {
    match (turn, language) {
        (Turn::Left, Language::En) => "turn left",
        (Turn::Right, Language::En) => "turn right",
        (Turn::Straight, Language::En) => "proceed straight",
        (Turn::Left, Language::Fr) => "tournez à gauche",
        (Turn::Right, Language::Fr) => "tournez à droite",
        (Turn::Straight, Language::Fr) => "continuez tout droit",
    }
}

fn turn_onto(turn: Turn, language: Language) -> &'static str {
    match (turn, language) {
        (Turn::Left, Language::En) => "turn left onto",
        (Turn::Right, Language::En) => "turn right onto",
        (Turn::Straight, Language::En) => "continue straight onto",
        (Turn::Left, Language::Fr) => "tournez à gauche sur",
        (Turn::Right, Language::Fr) => "tournez à droite sur",
        (Turn::Straight, Language::Fr) => "continuez tout droit sur",
    }
}

fn side(turn: Turn, language: Language) -> &'static str {
    match (turn, language) {
        (Turn::Left, Language::En) => "on your left",
        (Turn::Right, Language::En) => "on your right",
        (Turn::Straight, Language::En) => "directly ahead",
        (Turn::Left, Language::Fr) => "sur votre gauche",
        (Turn::Right, Language::Fr) => "sur votre droite",
        (Turn::Straight, Language::Fr) => "directement devant vous",
    }
}

/// Upper-case the first character.
fn sentence(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn type_name<T: Translator + ?Sized>(translator: &T, node_type: NodeType, language: Language) -> String {
    translator.translate(language::node_type_key(node_type), language)
}

/// `staircase B`, or just `elevator`: elevators are not told apart by name.
fn floor_changer<T: Translator + ?Sized>(translator: &T, node: &Node, language: Language) -> String {
    let name = type_name(translator, node.node_type(), language);
    if node.node_type() == NodeType::Elevator || node.name().is_empty() {
        name
    } else {
        format!("{name} {}", node.name())
    }
}

fn walked(way: Way<'_>, metres: u32, language: Language) -> String {
    match language {
        Language::En => format!("Walk approximately {metres}m along {}", way.name(language)),
        Language::Fr => format!("Marchez environ {metres}m le long de {}", way.name(language)),
    }
}

// ── Indoor steps ──────────────────────────────────────────────────────────────

/// `Exit GSD 101 and turn left`
pub fn exit_room(room: &Node, next: Turn) -> Description {
    Description::from_fn(|language| match language {
        Language::En => format!("Exit {} {} and {}", room.building(), room.name(), turn(next, language)),
        Language::Fr => format!("Sortez de {} {} et {}", room.building(), room.name(), turn(next, language)),
    })
}

/// `Room GSD 101 will be on your left`
pub fn enter_room<T: Translator + ?Sized>(translator: &T, room: &Node, at: Turn) -> Description {
    Description::from_fn(|language| {
        let kind = sentence(&type_name(translator, room.node_type(), language));
        match language {
            Language::En => format!("{kind} {} {} will be {}", room.building(), room.name(), side(at, language)),
            Language::Fr => format!("{kind} {} {} sera {}", room.building(), room.name(), side(at, language)),
        }
    })
}

/// `Turn down the 2nd hallway on your left`
pub fn nth_hallway(n: u32, at: Turn) -> Description {
    let n = i32::try_from(n).unwrap_or(i32::MAX);
    Description::from_fn(|language| match language {
        Language::En => format!("Turn down the {} hallway {}", ordinal(n, language), side(at, language)),
        Language::Fr => format!("Prenez le {} couloir {}", ordinal(n, language), side(at, language)),
    })
}

/// `Walk to the end of the hall and turn right`
pub fn end_of_hall(at: Turn) -> Description {
    Description::from_fn(|language| match language {
        Language::En => format!("Walk to the end of the hall and {}", turn(at, language)),
        Language::Fr => format!("Marchez jusqu'au bout du couloir et {}", turn(at, language)),
    })
}

/// `Turn left` where nothing more specific applies.
pub fn plain_turn(at: Turn) -> Description {
    Description::from_fn(|language| sentence(turn(at, language)))
}

/// `Enter the staircase B`
pub fn enter_floor_changer<T: Translator + ?Sized>(translator: &T, node: &Node) -> Description {
    Description::from_fn(|language| {
        let what = floor_changer(translator, node, language);
        match language {
            Language::En => format!("Enter the {what}"),
            Language::Fr => format!("Entrez dans l'{what}"),
        }
    })
}

/// `Take the elevator to the 3rd floor`, or `... to the basement`.
pub fn take_to_floor<T: Translator + ?Sized>(translator: &T, node: &Node, floor: i32) -> Description {
    Description::from_fn(|language| {
        let what = floor_changer(translator, node, language);
        match (language, floor) {
            (Language::En, ..0) => format!("Take the {what} to the basement"),
            (Language::En, _) => format!("Take the {what} to the {} floor", ordinal(floor, language)),
            (Language::Fr, ..0) => format!("Prenez l'{what} jusqu'au sous-sol"),
            (Language::Fr, _) => format!("Prenez l'{what} jusqu'au {} étage", ordinal(floor, language)),
        }
    })
}

/// `Exit the staircase B and turn right`
pub fn leave_floor_changer<T: Translator + ?Sized>(translator: &T, node: &Node, next: Turn) -> Description {
    Description::from_fn(|language| {
        let what = floor_changer(translator, node, language);
        match language {
            Language::En => format!("Exit the {what} and {}", turn(next, language)),
            Language::Fr => format!("Sortez de l'{what} et {}", turn(next, language)),
        }
    })
}

// ── Building doors ────────────────────────────────────────────────────────────

/// `Exit GSD through door 1 and turn left`
pub fn exit_building<T: Translator + ?Sized>(translator: &T, door: &Node, next: Turn) -> Description {
    Description::from_fn(|language| {
        let kind = type_name(translator, door.node_type(), language);
        match language {
            Language::En => format!(
                "Exit {} through {kind} {} and {}",
                door.building(),
                door.name(),
                turn(next, language)
            ),
            Language::Fr => format!(
                "Sortez de {} par la {kind} {} et {}",
                door.building(),
                door.name(),
                turn(next, language)
            ),
        }
    })
}

/// `Enter STE through door 1 and turn right`; without a next turn the
/// sentence ends at the door.
pub fn enter_building<T: Translator + ?Sized>(translator: &T, door: &Node, next: Option<Turn>) -> Description {
    Description::from_fn(|language| {
        let kind = type_name(translator, door.node_type(), language);
        let entered = match language {
            Language::En => format!("Enter {} through {kind} {}", door.building(), door.name()),
            Language::Fr => format!("Entrez dans {} par la {kind} {}", door.building(), door.name()),
        };
        match (next, language) {
            (None, _) => entered,
            (Some(next), Language::En) => format!("{entered} and {}", turn(next, language)),
            (Some(next), Language::Fr) => format!("{entered} et {}", turn(next, language)),
        }
    })
}

/// `STE will be on your left`
pub fn building_side(building: &str, at: Turn) -> Description {
    Description::from_fn(|language| match language {
        Language::En => format!("{building} will be {}", side(at, language)),
        Language::Fr => format!("{building} sera {}", side(at, language)),
    })
}

// ── Outdoor steps ─────────────────────────────────────────────────────────────

/// `Walk approximately 130m along King Edward Avenue`
pub fn walk_along(way: Way<'_>, metres: u32) -> Description {
    Description::from_fn(|language| walked(way, metres, language))
}

/// `Walk approximately 60m along the path, then turn left onto Laurier Avenue`
pub fn walk_then_turn(way: Way<'_>, metres: u32, at: Turn, next: Way<'_>) -> Description {
    Description::from_fn(|language| {
        let then = match language {
            Language::En => "then",
            Language::Fr => "puis",
        };
        format!("{}, {then} {} {}", walked(way, metres, language), turn_onto(at, language), next.name(language))
    })
}

/// `Walk approximately 20m along the path, then turn left`
pub fn walk_and_turn(way: Way<'_>, metres: u32, at: Turn) -> Description {
    Description::from_fn(|language| {
        let then = match language {
            Language::En => "then",
            Language::Fr => "puis",
        };
        format!("{}, {then} {}", walked(way, metres, language), turn(at, language))
    })
}

/// `Walk approximately 60m along the path, then continue straight when it
/// becomes King Edward Avenue`
pub fn walk_until_it_becomes(way: Way<'_>, metres: u32, next: Way<'_>) -> Description {
    Description::from_fn(|language| match language {
        Language::En => format!(
            "{}, then continue straight when it becomes {}",
            walked(way, metres, language),
            next.name(language)
        ),
        Language::Fr => format!(
            "{}, puis continuez tout droit quand elle devient {}",
            walked(way, metres, language),
            next.name(language)
        ),
    })
}

/// `Proceed straight and cross Laurier Avenue`
pub fn cross(at: Turn, street: &StreetName) -> Description {
    Description::from_fn(|language| match language {
        Language::En => format!("{} and cross {}", sentence(turn(at, language)), street.en),
        Language::Fr => format!("{} et traversez {}", sentence(turn(at, language)), street.fr),
    })
}

// ── Errors ────────────────────────────────────────────────────────────────────

/// Text of the single step returned when no route exists.
pub fn no_path<T: Translator + ?Sized>(translator: &T, accessible: bool) -> Description {
    let key = if accessible { language::NO_ACCESSIBLE_PATH_FOUND } else { language::NO_PATH_FOUND };
    Description::from_fn(|language| translator.translate(key, language))
}
