use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Prefix that marks a locally generated placeholder id. Store-issued ids
/// never start with this, so the two kinds cannot be confused after a
/// round-trip through the cache.
const OPTIMISTIC_PREFIX: &str = "optimistic-";

/// Identifier of a task, tagged by who issued it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TaskId {
    /// Assigned by the remote store; stable once issued.
    Persisted(String),
    /// Generated locally for a create that is still in flight.
    Temporary(Uuid),
}

impl TaskId {
    pub fn new_temporary() -> Self {
        Self::Temporary(Uuid::new_v4())
    }

    pub fn is_temporary(&self) -> bool {
        matches!(self, Self::Temporary(_))
    }

    /// The store-issued identifier, if this id has one.
    pub fn as_persisted(&self) -> Option<&str> {
        match self {
            Self::Persisted(id) => Some(id),
            Self::Temporary(_) => None,
        }
    }

    /// Inverse of `Display`. Anything that is not a well-formed temporary id
    /// is taken to be store-issued.
    pub fn parse(raw: &str) -> Self {
        if let Some(rest) = raw.strip_prefix(OPTIMISTIC_PREFIX)
            && let Ok(uuid) = Uuid::parse_str(rest)
        {
            return Self::Temporary(uuid);
        }
        Self::Persisted(raw.to_string())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Persisted(id) => write!(f, "{id}"),
            Self::Temporary(uuid) => write!(f, "{OPTIMISTIC_PREFIX}{uuid}"),
        }
    }
}

impl Serialize for TaskId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}
