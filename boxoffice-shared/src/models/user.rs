use serde::{Deserialize, Serialize};
use std::fmt;

/// A person who can hold seats.
///
/// Two users are the same holder when their ids match; the display name is
/// presentation only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_display_name() {
        let a = User::new("u1", "Alice");
        let renamed = User::new("u1", "Alicia");
        let other = User::new("u2", "Alice");

        assert_eq!(a, renamed);
        assert_ne!(a, other);
        assert_eq!(a.to_string(), "Alice");
    }
}
