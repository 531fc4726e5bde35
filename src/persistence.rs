use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PersistError;

/// Saved game: the move list and whether the computer plays Player 2.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    pub moves: Vec<usize>,
    #[serde(rename = "onePlayer")]
    pub one_player: bool,
}

impl PersistedState {
    /// Reads a stored blob. Anything unreadable degrades field by field:
    /// a bad `moves` becomes an empty list, a missing `onePlayer` becomes false.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };

        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(err) => {
                warn!("discarding unreadable saved game: {err}");
                return Self::default();
            }
        };

        let moves = match value.get("moves") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| item.as_u64().and_then(|n| usize::try_from(n).ok()))
                .collect::<Option<Vec<_>>>()
                .unwrap_or_else(|| {
                    warn!("saved moves contain non-column values, starting empty");
                    Vec::new()
                }),
            _ => Vec::new(),
        };

        let one_player = value.get("onePlayer").is_some_and(is_truthy);

        Self { moves, one_player }
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// JavaScript truthiness, which is how the browser reads `onePlayer`.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Load/save collaborator for the saved game.
pub trait Persistence: Send {
    fn load(&self) -> PersistedState;
    fn save(&mut self, state: &PersistedState) -> Result<(), PersistError>;
}

/// Keeps the serialized blob in memory. The browser copies it to
/// `localStorage` under [`crate::config::STORAGE_KEY`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl Persistence for MemoryStore {
    fn load(&self) -> PersistedState {
        PersistedState::parse(self.raw())
    }

    fn save(&mut self, state: &PersistedState) -> Result<(), PersistError> {
        self.raw = Some(state.to_json()?);
        Ok(())
    }
}
