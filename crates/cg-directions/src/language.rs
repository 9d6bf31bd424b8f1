//! Output languages and the translation seam.
//!
//! Sentence templates live in [`phrases`](crate::phrases); the words that a
//! deployment may want to reword (node type names, error messages) are looked
//! up by key through a [`Translator`].  [`Catalog`] is the built-in
//! implementation and covers every key the narrator uses.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use cg_core::NodeType;

use crate::DirectionsError;

// ── Language ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Fr];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }
}

impl FromStr for Language {
    type Err = DirectionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "fr" | "french" | "français" => Ok(Language::Fr),
            _ => Err(DirectionsError::UnknownLanguage(s.to_owned())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ── Keys ──────────────────────────────────────────────────────────────────────

/// Step text when no route exists.
pub const NO_PATH_FOUND: &str = "no_path_found";

/// Step text when no wheelchair-accessible route exists.
pub const NO_ACCESSIBLE_PATH_FOUND: &str = "no_accessible_path_found";

/// Translation key of a node type's display name.
pub fn node_type_key(node_type: NodeType) -> &'static str {
    match node_type {
        NodeType::Door => "door",
        NodeType::Elevator => "elevator",
        NodeType::Hallway => "hallway",
        NodeType::Intersection => "intersection",
        NodeType::OutdoorSteps => "outdoor_steps",
        NodeType::Path => "path",
        NodeType::Room => "room",
        NodeType::Stairs => "staircase",
        NodeType::Street => "street",
    }
}

// ── Translator trait ──────────────────────────────────────────────────────────

/// Localized text lookup.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so a navigator can be shared by
/// concurrent requests.
pub trait Translator: Send + Sync {
    /// Text for `key` in `language`.  Unknown keys should come back as some
    /// readable fallback rather than an error.
    fn translate(&self, key: &str, language: Language) -> String;
}

// ── Catalog ───────────────────────────────────────────────────────────────────

const BUILTIN: &[(&str, &str, &str)] = &[
    ("door", "door", "porte"),
    ("elevator", "elevator", "ascenseur"),
    ("hallway", "hallway", "couloir"),
    ("intersection", "intersection", "intersection"),
    ("outdoor_steps", "steps", "marches"),
    ("path", "path", "voie"),
    ("room", "room", "salle"),
    ("staircase", "staircase", "escalier"),
    ("street", "street", "rue"),
    (NO_PATH_FOUND, "No path found", "Aucun chemin trouvé"),
    (NO_ACCESSIBLE_PATH_FOUND, "No accessible path found", "Aucun chemin accessible trouvé"),
];

/// In-memory translation table.
///
/// [`Catalog::default`] holds the built-in English and French entries;
/// entries can be replaced or added with [`insert`](Self::insert).  Missing
/// keys translate to the key itself.
#[derive(Clone, Debug)]
pub struct Catalog {
    entries: HashMap<(Language, String), String>,
}

impl Default for Catalog {
    fn default() -> Self {
        let mut catalog = Self::empty();
        for &(key, en, fr) in BUILTIN {
            catalog.insert(Language::En, key, en);
            catalog.insert(Language::Fr, key, fr);
        }
        catalog
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog without any entries.
    pub fn empty() -> Self {
        Self { entries: HashMap::new() }
    }

    pub fn insert(&mut self, language: Language, key: &str, text: impl Into<String>) {
        self.entries.insert((language, key.to_owned()), text.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, language: Language, key: &str, text: impl Into<String>) -> Self {
        self.insert(language, key, text);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str, language: Language) -> String {
        match self.entries.get(&(language, key.to_owned())) {
            Some(text) => text.clone(),
            None => {
                tracing::debug!(key, %language, "missing translation");
                key.to_owned()
            }
        }
    }
}

// ── Ordinals ──────────────────────────────────────────────────────────────────

/// `1st`, `2nd`, `11th`, `23rd` in English; `1er`, `2e` in French.
///
/// French forms agree with masculine nouns (`étage`, `couloir`).
pub fn ordinal(n: i32, language: Language) -> String {
    match language {
        Language::En => {
            let suffix = match (n.rem_euclid(10), n.rem_euclid(100)) {
                (_, 11..=13) => "th",
                (1, _) => "st",
                (2, _) => "nd",
                (3, _) => "rd",
                _ => "th",
            };
            format!("{n}{suffix}")
        }
        Language::Fr if n == 1 => "1er".to_owned(),
        Language::Fr => format!("{n}e"),
    }
}
