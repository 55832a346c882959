use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Hidden presentation order used when no roster is configured
pub const DEFAULT_TEAMS: [&str; 10] = [
    "Mission",
    "DDIL",
    "DevOps",
    "Core",
    "UI",
    "Effects",
    "Semantics",
    "Sensemaking",
    "AI",
    "Aggressor",
];

/// Stable key for a team on the board
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub String);

impl TeamId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TeamId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("Roster must contain at least one team")]
    Empty,
    #[error("Team '{0}' appears more than once in the roster")]
    Duplicate(String),
    #[error("Roster entry {position} has a blank team name")]
    BlankName { position: usize },
}

/// The fixed hidden ordering of team identities.
///
/// Order defines who gets picked first; it is never shown to the room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    ids: Vec<TeamId>,
}

impl Roster {
    pub fn new<I, S>(names: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut ids = Vec::new();

        for (position, name) in names.into_iter().enumerate() {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(RosterError::BlankName { position });
            }
            // Names are looked up case-insensitively, so "Core" and "core" collide.
            if !seen.insert(name.to_lowercase()) {
                return Err(RosterError::Duplicate(name.to_string()));
            }
            ids.push(TeamId::new(name));
        }

        if ids.is_empty() {
            return Err(RosterError::Empty);
        }

        Ok(Self { ids })
    }

    pub fn ids(&self) -> &[TeamId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &TeamId) -> bool {
        self.ids.contains(id)
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            ids: DEFAULT_TEAMS.iter().map(|name| TeamId::from(*name)).collect(),
        }
    }
}

/// Fisher-Yates shuffle into a new vector; `items` is left untouched.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.random_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}
