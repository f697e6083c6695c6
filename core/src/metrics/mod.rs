//! Per-actor stat accumulation over the filtered chat stream.

use serde_json::Value;

use crate::chat::{ChatMessage, kind};
use crate::error::PodiumError;

/// Mapping from actor name to an accumulated value.
///
/// Iteration yields entries in first-seen order. That order is what gives
/// the rendered rankings their tie-break: actors with equal totals keep the
/// order in which they first appeared in the filtered chat.
#[derive(Debug, Clone, Default)]
pub struct ActorMap<V> {
    index: hashbrown::HashMap<String, usize>,
    entries: Vec<(String, V)>,
}

impl<V: Default> ActorMap<V> {
    pub fn new() -> Self {
        Self {
            index: hashbrown::HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Value slot for `actor`, inserting a default entry on first sight.
    pub fn entry_mut(&mut self, actor: &str) -> &mut V {
        let idx = match self.index.get(actor) {
            Some(&idx) => idx,
            None => {
                let idx = self.entries.len();
                self.index.insert(actor.to_string(), idx);
                self.entries.push((actor.to_string(), V::default()));
                idx
            }
        };
        &mut self.entries[idx].1
    }

    pub fn get(&self, actor: &str) -> Option<&V> {
        self.index.get(actor).map(|&idx| &self.entries[idx].1)
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries
            .iter()
            .map(|(actor, value)| (actor.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Running damage totals for one actor.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DamageTotals {
    /// Damage dealt to the boss (`userDamage`).
    pub dealt: f64,
    /// Damage taken back from the boss (`bossDamage`).
    pub taken: f64,
}

/// Accumulate damage dealt/taken per actor from boss damage messages.
///
/// Records without an actor are skipped. Each damage field is coerced
/// independently; a field that fails coercion is skipped on its own and
/// never disturbs the other field or the actor's entry. The result depends
/// only on the multiset of messages, not their order.
pub fn aggregate_damage(messages: &[&ChatMessage]) -> ActorMap<DamageTotals> {
    let mut stats: ActorMap<DamageTotals> = ActorMap::new();

    for msg in messages {
        let Some(actor) = msg.actor() else {
            continue;
        };
        let totals = stats.entry_mut(actor);
        if let Some(dealt) = msg.info.user_damage.as_ref().and_then(coerce_damage) {
            totals.dealt += dealt;
        }
        if let Some(taken) = msg.info.boss_damage.as_ref().and_then(coerce_damage) {
            totals.taken += taken;
        }
    }

    stats
}

/// Accumulate skill cast counts per actor.
///
/// A missing `times` field counts as one cast. A present but non-coercible
/// count is a contract violation and fails the whole call; the damage-side
/// leniency does not apply here.
pub fn aggregate_skills(messages: &[&ChatMessage]) -> Result<ActorMap<i64>, PodiumError> {
    let mut casts: ActorMap<i64> = ActorMap::new();

    for msg in messages {
        // The caller filters by kind already; re-check so a stray record
        // can never inflate a total.
        if msg.kind() != Some(kind::PARTY_SKILL) {
            continue;
        }
        let Some(actor) = msg.actor() else {
            continue;
        };
        let count = match msg.info.times.as_ref() {
            None => 1,
            Some(value) => {
                coerce_cast_count(value).ok_or_else(|| PodiumError::InvalidCastCount {
                    actor: actor.to_string(),
                    value: value.to_string(),
                })?
            }
        };
        *casts.entry_mut(actor) += count;
    }

    Ok(casts)
}

/// Coerce a raw damage field to a usable contribution.
///
/// Accepts JSON numbers and numeric strings. NaN, infinities, and negative
/// values are malformed and contribute nothing.
fn coerce_damage(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    (n.is_finite() && n >= 0.0).then_some(n)
}

/// Coerce a raw cast count to an integer. Floats truncate; integer strings
/// parse; anything else is rejected.
fn coerce_cast_count(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::MessageInfo;
    use serde_json::json;

    fn damage_msg(actor: &str, dealt: Option<Value>, taken: Option<Value>) -> ChatMessage {
        ChatMessage {
            timestamp: Some(json!(1_735_000_000_000_i64)),
            info: MessageInfo {
                kind: Some(kind::BOSS_DAMAGE.to_string()),
                actor: Some(actor.to_string()),
                user_damage: dealt,
                boss_damage: taken,
                times: None,
            },
        }
    }

    fn skill_msg(actor: &str, times: Option<Value>) -> ChatMessage {
        ChatMessage {
            timestamp: Some(json!(1_735_000_000_000_i64)),
            info: MessageInfo {
                kind: Some(kind::PARTY_SKILL.to_string()),
                actor: Some(actor.to_string()),
                times,
                ..Default::default()
            },
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Damage aggregation
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn test_damage_sums_per_actor() {
        let messages = vec![
            damage_msg("Alice", Some(json!(10.0)), Some(json!(5.0))),
            damage_msg("Bob", Some(json!(20.0)), Some(json!(1.0))),
            damage_msg("Alice", Some(json!(2.5)), Some(json!(0.5))),
        ];
        let refs: Vec<_> = messages.iter().collect();
        let stats = aggregate_damage(&refs);

        assert_eq!(stats.len(), 2);
        let alice = stats.get("Alice").unwrap();
        assert_eq!(alice.dealt, 12.5);
        assert_eq!(alice.taken, 5.5);
        let bob = stats.get("Bob").unwrap();
        assert_eq!(bob.dealt, 20.0);
        assert_eq!(bob.taken, 1.0);
    }

    #[test]
    fn test_missing_actor_creates_no_entry() {
        let mut msg = damage_msg("", Some(json!(10.0)), None);
        msg.info.actor = None;
        let anonymous = damage_msg("", Some(json!(10.0)), None);

        let messages = vec![msg, anonymous];
        let refs: Vec<_> = messages.iter().collect();
        assert!(aggregate_damage(&refs).is_empty());
    }

    #[test]
    fn test_malformed_field_isolated_from_sibling_field() {
        // Valid dealt, garbage taken: dealt still accumulates, taken stays
        // zero, and the actor keeps their entry.
        let messages = vec![damage_msg(
            "Alice",
            Some(json!(10.0)),
            Some(json!({"nested": "junk"})),
        )];
        let refs: Vec<_> = messages.iter().collect();
        let stats = aggregate_damage(&refs);

        let alice = stats.get("Alice").unwrap();
        assert_eq!(alice.dealt, 10.0);
        assert_eq!(alice.taken, 0.0);
    }

    #[test]
    fn test_malformed_field_does_not_block_later_accumulation() {
        let messages = vec![
            damage_msg("Alice", Some(json!("not a number")), None),
            damage_msg("Alice", Some(json!(3.0)), Some(json!(1.0))),
        ];
        let refs: Vec<_> = messages.iter().collect();
        let alice = *aggregate_damage(&refs).get("Alice").unwrap();
        assert_eq!(alice, DamageTotals { dealt: 3.0, taken: 1.0 });
    }

    #[test]
    fn test_numeric_strings_coerce() {
        let messages = vec![damage_msg("Alice", Some(json!("12.5")), Some(json!("3")))];
        let refs: Vec<_> = messages.iter().collect();
        let alice = *aggregate_damage(&refs).get("Alice").unwrap();
        assert_eq!(alice, DamageTotals { dealt: 12.5, taken: 3.0 });
    }

    #[test]
    fn test_negative_and_nan_contribute_zero() {
        let messages = vec![damage_msg("Alice", Some(json!(-4.0)), Some(json!("NaN")))];
        let refs: Vec<_> = messages.iter().collect();
        let alice = *aggregate_damage(&refs).get("Alice").unwrap();
        assert_eq!(alice, DamageTotals::default());
    }

    #[test]
    fn test_damage_additivity_over_partitions() {
        let messages = vec![
            damage_msg("Alice", Some(json!(1.0)), Some(json!(2.0))),
            damage_msg("Bob", Some(json!(3.0)), None),
            damage_msg("Alice", Some(json!(4.0)), Some(json!(0.5))),
            damage_msg("Cara", None, Some(json!(7.0))),
        ];
        let refs: Vec<_> = messages.iter().collect();
        let whole = aggregate_damage(&refs);
        let left = aggregate_damage(&refs[..2]);
        let right = aggregate_damage(&refs[2..]);

        for (actor, totals) in whole.iter() {
            let combined_dealt = left.get(actor).map_or(0.0, |t| t.dealt)
                + right.get(actor).map_or(0.0, |t| t.dealt);
            let combined_taken = left.get(actor).map_or(0.0, |t| t.taken)
                + right.get(actor).map_or(0.0, |t| t.taken);
            assert_eq!(totals.dealt, combined_dealt);
            assert_eq!(totals.taken, combined_taken);
        }
    }

    #[test]
    fn test_insertion_order_is_first_seen_order() {
        let messages = vec![
            damage_msg("Cara", Some(json!(1.0)), None),
            damage_msg("Alice", Some(json!(1.0)), None),
            damage_msg("Cara", Some(json!(1.0)), None),
            damage_msg("Bob", Some(json!(1.0)), None),
        ];
        let refs: Vec<_> = messages.iter().collect();
        let order: Vec<_> = aggregate_damage(&refs)
            .iter()
            .map(|(actor, _)| actor.to_string())
            .collect();
        assert_eq!(order, ["Cara", "Alice", "Bob"]);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Skill aggregation
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn test_skills_default_to_one_cast() {
        let messages = vec![
            skill_msg("Alice", None),
            skill_msg("Alice", Some(json!(3))),
            skill_msg("Bob", None),
        ];
        let refs: Vec<_> = messages.iter().collect();
        let casts = aggregate_skills(&refs).unwrap();
        assert_eq!(casts.get("Alice"), Some(&4));
        assert_eq!(casts.get("Bob"), Some(&1));
    }

    #[test]
    fn test_skill_float_count_truncates() {
        let messages = vec![skill_msg("Alice", Some(json!(2.9)))];
        let refs: Vec<_> = messages.iter().collect();
        assert_eq!(aggregate_skills(&refs).unwrap().get("Alice"), Some(&2));
    }

    #[test]
    fn test_skill_non_numeric_count_is_fatal() {
        let messages = vec![skill_msg("Alice", Some(json!("twice")))];
        let refs: Vec<_> = messages.iter().collect();
        let err = aggregate_skills(&refs).unwrap_err();
        assert!(matches!(err, PodiumError::InvalidCastCount { .. }));
    }

    #[test]
    fn test_skill_wrong_kind_ignored() {
        let messages = vec![damage_msg("Alice", Some(json!(5.0)), None)];
        let refs: Vec<_> = messages.iter().collect();
        assert!(aggregate_skills(&refs).unwrap().is_empty());
    }
}
