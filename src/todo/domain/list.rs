//! List aggregate root and its validated title.

use super::{ListId, TodoDomainError, timestamp};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// List title between 1 and 100 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ListTitle(String);

impl ListTitle {
    /// Smallest accepted title length in characters.
    pub const MIN_LENGTH: usize = 1;
    /// Largest accepted title length in characters.
    pub const MAX_LENGTH: usize = 100;

    /// Creates a validated list title.
    ///
    /// Length is counted in Unicode scalar values, not bytes.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InvalidListTitle`] when the title is empty
    /// or longer than [`Self::MAX_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TodoDomainError> {
        let raw = value.into();
        let actual = raw.chars().count();
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&actual) {
            return Err(TodoDomainError::InvalidListTitle {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
                actual,
            });
        }
        Ok(Self(raw))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ListTitle {
    type Error = TodoDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ListTitle> for String {
    fn from(value: ListTitle) -> Self {
        value.0
    }
}

impl AsRef<str> for ListTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ListTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Todo list aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    id: ListId,
    title: ListTitle,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedListData {
    /// Persisted list identifier.
    pub id: ListId,
    /// Persisted title.
    pub title: ListTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl List {
    /// Creates a new list with a fresh identifier.
    ///
    /// An empty description is stored as no description.
    #[must_use]
    pub fn new(title: ListTitle, description: Option<String>, clock: &impl Clock) -> Self {
        Self {
            id: ListId::new(),
            title,
            description: normalize_description(description),
            created_at: timestamp::now(clock),
        }
    }

    /// Reconstructs a list from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedListData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            created_at: data.created_at,
        }
    }

    /// Returns the list identifier.
    #[must_use]
    pub const fn id(&self) -> ListId {
        self.id
    }

    /// Returns the list title.
    #[must_use]
    pub const fn title(&self) -> &ListTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Overwrites the title and description.
    pub fn update_details(&mut self, title: ListTitle, description: Option<String>) {
        self.title = title;
        self.description = normalize_description(description);
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|text| !text.is_empty())
}
