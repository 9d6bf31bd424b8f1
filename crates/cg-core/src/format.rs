//! Per-building formatting rules from a graph's `[FORMAT]` section.
//!
//! Rules are `key=value` pairs kept in insertion order.  Keys starting with
//! `floor` hold a regular expression whose first capture group is the floor
//! label of a room or hallway name.  The optional `basement` key holds a
//! pattern tested against floor labels; labels it matches are floor `-1`.
//! Without a `basement` rule, a label made only of two or more zeros (`00`)
//! is treated as the basement.

use regex::Regex;

use crate::{CoreError, CoreResult};

/// Key prefix of floor detection rules.
pub const FLOOR_RULE_PREFIX: &str = "floor";

/// Key of the optional basement rule.
pub const BASEMENT_RULE: &str = "basement";

/// Floor number assigned to basement labels.
pub const BASEMENT_FLOOR: i32 = -1;

/// Ordered formatting rules of one building, with floor patterns compiled.
#[derive(Clone, Debug, Default)]
pub struct FormattingRules {
    entries:     Vec<(String, String)>,
    floor_rules: Vec<(String, Regex)>,
    basement:    Option<Regex>,
}

impl FormattingRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a rule.  Replacing keeps the rule's original
    /// position in the evaluation order.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidFloorRule`] if a `floor*` or `basement` value is
    /// not a valid regular expression.  The table is left unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> CoreResult<()> {
        let compile = || {
            Regex::new(value).map_err(|source| CoreError::InvalidFloorRule {
                key:     key.to_owned(),
                pattern: value.to_owned(),
                source,
            })
        };

        if key.starts_with(FLOOR_RULE_PREFIX) {
            let regex = compile()?;
            match self.floor_rules.iter_mut().find(|(k, _)| k == key) {
                Some(slot) => slot.1 = regex,
                None => self.floor_rules.push((key.to_owned(), regex)),
            }
        } else if key == BASEMENT_RULE {
            self.basement = Some(compile()?);
        }

        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value.to_owned(),
            None => self.entries.push((key.to_owned(), value.to_owned())),
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Floor label of `name`: the first capture of the first matching floor
    /// rule, or the whole match when the rule has no capture group.
    pub fn floor_of(&self, name: &str) -> Option<String> {
        self.floor_rules.iter().find_map(|(_, rule)| {
            rule.captures(name).map(|caps| {
                caps.get(1)
                    .or_else(|| caps.get(0))
                    .map(|m| m.as_str().to_owned())
                    .unwrap_or_default()
            })
        })
    }

    /// Numeric floor of a label produced by [`floor_of`](Self::floor_of).
    ///
    /// Basement labels map to [`BASEMENT_FLOOR`]; otherwise the label's
    /// leading digits are the floor number.  `None` if there are none.
    pub fn floor_number(&self, label: &str) -> Option<i32> {
        let is_basement = match &self.basement {
            Some(rule) => rule.is_match(label),
            None => label.len() > 1 && label.chars().all(|c| c == '0'),
        };
        if is_basement {
            return Some(BASEMENT_FLOOR);
        }

        let digits: String = label.chars().take_while(char::is_ascii_digit).collect();
        digits.parse().ok()
    }
}
