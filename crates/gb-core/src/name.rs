//! Case-normalized state identifiers.

use std::fmt;

/// The identifying token of a state.
///
/// Names are normalized to uppercase on construction, so every comparison,
/// hash and map lookup is case-insensitive with respect to the original
/// input: `StateName::new("Sleeping") == StateName::new("SLEEPING")`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub struct StateName(String);

impl StateName {
    pub fn new(name: impl AsRef<str>) -> Self {
        StateName(name.as_ref().to_uppercase())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for StateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateName {
    fn from(name: &str) -> Self {
        StateName::new(name)
    }
}

impl From<String> for StateName {
    fn from(name: String) -> Self {
        StateName::new(name)
    }
}

impl From<&StateName> for StateName {
    fn from(name: &StateName) -> Self {
        name.clone()
    }
}

impl From<StateName> for String {
    fn from(name: StateName) -> String {
        name.0
    }
}

impl AsRef<str> for StateName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for StateName {
    /// Compares against raw input, normalizing it the same way.
    fn eq(&self, other: &str) -> bool {
        self.0.chars().eq(other.chars().flat_map(char::to_uppercase))
    }
}

impl PartialEq<&str> for StateName {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}
