#![forbid(unsafe_code)]
#![allow(clippy::must_use_candidate)]

//! # Roster
//!
//! The ordered participant list a prize wheel is built from. Order matters:
//! the name at position `i` owns sector `i` of the wheel.
//!
//! Names are validated on entry (non-blank, ASCII letters, digits and spaces
//! only) and the list is capped, [`MAX_PARTICIPANTS`] by default.
//!
//! ## Example
//!
//! ```rust
//! use roster::{Roster, RosterError};
//!
//! let mut roster = Roster::new();
//! roster.add("cat").unwrap();
//! roster.add("Ann").unwrap();
//! roster.add("bo").unwrap();
//! assert_eq!(roster.add("   "), Err(RosterError::Empty));
//! assert_eq!(roster.add("d@ve"), Err(RosterError::InvalidCharacters("d@ve".into())));
//!
//! roster.sort();
//! assert_eq!(roster.names(), ["Ann", "bo", "cat"]);
//!
//! assert_eq!(roster.remove(1), Some("bo".to_string()));
//! assert_eq!(roster.len(), 2);
//! ```

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::debug;

/// Default cap on the number of participants.
pub const MAX_PARTICIPANTS: usize = 18;

/// Why a name could not be added.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// The name is empty or only whitespace.
    #[error("name cannot be empty")]
    Empty,

    /// The name contains something other than ASCII letters, digits or spaces.
    #[error("name cannot contain special characters: '{0}'")]
    InvalidCharacters(String),

    /// The roster already holds its maximum number of names.
    #[error("max participants reached ({max})")]
    Full {
        /// The roster's cap.
        max: usize,
    },
}

/// Checks that `name` is usable as a participant name.
///
/// # Errors
///
/// Returns [`RosterError::Empty`] for blank input and
/// [`RosterError::InvalidCharacters`] for anything outside `[A-Za-z0-9 ]`.
pub fn validate_name(name: &str) -> Result<(), RosterError> {
    if name.trim().is_empty() {
        return Err(RosterError::Empty);
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == ' ') {
        return Err(RosterError::InvalidCharacters(name.to_string()));
    }
    Ok(())
}

/// Upper-cases the first character for display, leaving the rest untouched.
///
/// ```rust
/// assert_eq!(roster::capitalize("ann marie"), "Ann marie");
/// assert_eq!(roster::capitalize(""), "");
/// ```
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// An ordered, capped list of participant names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    names: Vec<String>,
    max: usize,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster {
    /// Creates an empty roster capped at [`MAX_PARTICIPANTS`].
    pub fn new() -> Self {
        Self::with_limit(MAX_PARTICIPANTS)
    }

    /// Creates an empty roster holding at most `max` names.
    pub fn with_limit(max: usize) -> Self {
        Self {
            names: Vec::new(),
            max,
        }
    }

    /// Builds a roster from `names`, stopping at the first rejected name.
    ///
    /// # Errors
    ///
    /// Returns the error for the first name that fails validation or does
    /// not fit.
    pub fn from_names<I, S>(max: usize, names: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roster = Self::with_limit(max);
        for name in names {
            roster.add(name.as_ref())?;
        }
        Ok(roster)
    }

    /// Appends a name after validating it. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// See [`validate_name`]; also [`RosterError::Full`] once the cap is hit.
    pub fn add(&mut self, name: &str) -> Result<(), RosterError> {
        if self.is_full() {
            return Err(RosterError::Full { max: self.max });
        }
        validate_name(name)?;
        let name = name.trim().to_string();
        debug!(name = %name, position = self.names.len(), "participant added");
        self.names.push(name);
        Ok(())
    }

    /// Removes and returns the name at `index`, or `None` if out of range.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index >= self.names.len() {
            return None;
        }
        let name = self.names.remove(index);
        debug!(name = %name, index, "participant removed");
        Some(name)
    }

    /// Puts the names in a uniformly random order.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.names.shuffle(rng);
        debug!(count = self.names.len(), "roster shuffled");
    }

    /// Sorts alphabetically, ignoring case. Names equal apart from case keep
    /// a fixed order (uppercase first).
    pub fn sort(&mut self) {
        self.names.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });
    }

    /// Removes every name.
    pub fn clear(&mut self) {
        self.names.clear();
    }

    /// The names in wheel order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the roster has no names.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether another name would be rejected for lack of room.
    pub fn is_full(&self) -> bool {
        self.names.len() >= self.max
    }

    /// The roster's cap.
    pub fn limit(&self) -> usize {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn validate_rejects_blank_and_symbols() {
        assert_eq!(validate_name(""), Err(RosterError::Empty));
        assert_eq!(validate_name(" \t "), Err(RosterError::Empty));
        assert!(matches!(
            validate_name("Zoë"),
            Err(RosterError::InvalidCharacters(_))
        ));
        assert!(matches!(
            validate_name("a-b"),
            Err(RosterError::InvalidCharacters(_))
        ));
        assert!(validate_name("Team 7").is_ok());
    }

    #[test]
    fn add_trims_whitespace() {
        let mut roster = Roster::new();
        roster.add("  Ann  ").unwrap();
        assert_eq!(roster.names(), ["Ann"]);
    }

    #[test]
    fn cap_is_enforced() {
        let mut roster = Roster::with_limit(2);
        roster.add("a").unwrap();
        roster.add("b").unwrap();
        assert!(roster.is_full());
        assert_eq!(roster.add("c"), Err(RosterError::Full { max: 2 }));
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn default_cap_is_eighteen() {
        let roster = Roster::default();
        assert_eq!(roster.limit(), 18);
    }

    #[test]
    fn remove_out_of_range() {
        let mut roster = Roster::from_names(5, ["a", "b"]).unwrap();
        assert_eq!(roster.remove(2), None);
        assert_eq!(roster.remove(0), Some("a".to_string()));
        assert_eq!(roster.names(), ["b"]);
    }

    #[test]
    fn from_names_stops_on_error() {
        assert_eq!(
            Roster::from_names(5, ["ok", "not ok!"]),
            Err(RosterError::InvalidCharacters("not ok!".into()))
        );
        assert_eq!(
            Roster::from_names(1, ["a", "b"]),
            Err(RosterError::Full { max: 1 })
        );
    }

    #[test]
    fn sort_ignores_case() {
        let mut roster = Roster::from_names(10, ["bob", "Alice", "carl", "alice"]).unwrap();
        roster.sort();
        assert_eq!(roster.names(), ["Alice", "alice", "bob", "carl"]);
    }

    #[test]
    fn shuffle_is_seeded() {
        let names = ["a", "b", "c", "d", "e", "f", "g", "h"];
        let mut first = Roster::from_names(18, names).unwrap();
        let mut second = first.clone();
        first.shuffle(&mut Pcg64::seed_from_u64(11));
        second.shuffle(&mut Pcg64::seed_from_u64(11));
        assert_eq!(first, second);

        let mut sorted = first.names().to_vec();
        sorted.sort();
        assert_eq!(sorted, names);
    }

    #[test]
    fn capitalize_only_first_letter() {
        assert_eq!(capitalize("bo"), "Bo");
        assert_eq!(capitalize("BO"), "BO");
        assert_eq!(capitalize("7up"), "7up");
    }

    #[test]
    fn clear_empties() {
        let mut roster = Roster::from_names(3, ["a"]).unwrap();
        roster.clear();
        assert!(roster.is_empty());
        assert!(!roster.is_full());
    }
}
