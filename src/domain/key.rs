//! Well-known storage keys used by the quiz admin.
//!
//! The store accepts any string as a key; these are the ones the admin panel
//! reads and writes.

use std::fmt;
use std::str::FromStr;

/// Key holding the question bank.
pub const QUESTIONS_KEY: &str = "mathMillionaireQuestions";

/// Key holding the topic list.
pub const TOPICS_KEY: &str = "mathMillionaireTopics";

/// Key holding the class-name list.
pub const CLASSES_KEY: &str = "mathMillionaireClasses";

/// One of the collections managed by the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Questions,
    Topics,
    Classes,
}

impl Collection {
    /// All collections in display order.
    pub const ALL: [Collection; 3] = [Self::Questions, Self::Topics, Self::Classes];

    /// Storage key for this collection.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Questions => QUESTIONS_KEY,
            Self::Topics => TOPICS_KEY,
            Self::Classes => CLASSES_KEY,
        }
    }

    /// Resolve a storage key back to its collection, if it is a well-known one.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Questions => "questions",
            Self::Topics => "topics",
            Self::Classes => "classes",
        };
        f.write_str(name)
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "questions" => Ok(Self::Questions),
            "topics" => Ok(Self::Topics),
            "classes" => Ok(Self::Classes),
            other => Err(format!("unknown collection '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_collection() {
        for collection in Collection::ALL {
            assert_eq!(Collection::from_key(collection.key()), Some(collection));
        }
        assert_eq!(Collection::from_key("somethingElse"), None);
    }

    #[test]
    fn parses_collection_names_case_insensitively() {
        assert_eq!("Classes".parse::<Collection>(), Ok(Collection::Classes));
        assert!("scores".parse::<Collection>().is_err());
    }
}
