//! Party chat record model.
//!
//! The wire shape mirrors the Habitica chat payload: combat details live in
//! a nested `info` object. Kind-specific numeric fields are kept as raw JSON
//! values and coerced at aggregation time, so one malformed field can never
//! abort deserialization of the record or of its siblings.

pub mod filter;

use serde::Deserialize;
use serde_json::Value;

/// Chat event kinds the pipeline consumes.
pub mod kind {
    /// Boss fight tick carrying damage dealt to the boss and damage taken
    /// back by the actor.
    pub const BOSS_DAMAGE: &str = "boss_damage";

    /// Party-wide skill cast.
    pub const PARTY_SKILL: &str = "spell_cast_party";
}

/// One timestamped party chat record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatMessage {
    /// Epoch milliseconds. Kept raw: the API has emitted both integers and
    /// floats here.
    #[serde(default)]
    pub timestamp: Option<Value>,

    #[serde(default)]
    pub info: MessageInfo,
}

/// Kind-specific payload of a chat record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageInfo {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    #[serde(rename = "user", default)]
    pub actor: Option<String>,

    /// Damage the actor dealt to the boss.
    #[serde(rename = "userDamage", default)]
    pub user_damage: Option<Value>,

    /// Damage the boss dealt back to the actor.
    #[serde(rename = "bossDamage", default)]
    pub boss_damage: Option<Value>,

    /// Cast count for skill events; the API omits it for single casts.
    #[serde(rename = "times", default)]
    pub times: Option<Value>,
}

impl ChatMessage {
    /// Event kind, when present.
    pub fn kind(&self) -> Option<&str> {
        self.info.kind.as_deref()
    }

    /// Actor name; `None` when absent or empty.
    pub fn actor(&self) -> Option<&str> {
        self.info.actor.as_deref().filter(|actor| !actor.is_empty())
    }

    /// Timestamp in epoch milliseconds; `None` when absent or non-numeric.
    pub fn timestamp_ms(&self) -> Option<i64> {
        let ts = self.timestamp.as_ref()?;
        ts.as_i64().or_else(|| ts.as_f64().map(|f| f as i64))
    }
}
