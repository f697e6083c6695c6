//! Podium report rendering.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use podium_types::formatting::{format_cast_count, format_damage, format_ranked_line};

use crate::chat::filter::TimeWindow;
use crate::metrics::{ActorMap, DamageTotals};

/// Header line that anchors the podium section in the group description.
pub const PODIUM_HEADER: &str = "## 🏆 Podium";

/// Render the ranked podium report.
///
/// Each subsection is sorted descending by its own metric with a stable
/// sort, so actors with equal totals keep their first-seen order. The two
/// damage subsections are always rendered, even when empty; the skills
/// subsection is omitted entirely when `skills` is absent or empty.
///
/// Pure function of its inputs: no I/O, no clock reads.
pub fn render_podium(
    damage: &ActorMap<DamageTotals>,
    skills: Option<&ActorMap<i64>>,
    window: &TimeWindow,
    top_n: usize,
) -> String {
    let mut by_dealt: Vec<_> = damage.iter().collect();
    by_dealt.sort_by(|a, b| desc(a.1.dealt, b.1.dealt));
    let mut by_taken: Vec<_> = damage.iter().collect();
    by_taken.sort_by(|a, b| desc(a.1.taken, b.1.taken));

    let mut lines = vec![
        format!(
            "**Period:** {} → {}",
            window.start.format("%Y-%m-%d"),
            window.end.format("%Y-%m-%d"),
        ),
        String::new(),
        "### 💪 Top Damage Dealers".to_string(),
    ];
    for (rank, (actor, totals)) in by_dealt.iter().take(top_n).enumerate() {
        lines.push(format_ranked_line(
            rank + 1,
            actor,
            "Damage Dealt",
            &format_damage(totals.dealt),
        ));
    }

    lines.push(String::new());
    lines.push("### 💀 Top Damage Taken".to_string());
    for (rank, (actor, totals)) in by_taken.iter().take(top_n).enumerate() {
        lines.push(format_ranked_line(
            rank + 1,
            actor,
            "Damage Taken",
            &format_damage(totals.taken),
        ));
    }

    if let Some(skills) = skills.filter(|skills| !skills.is_empty()) {
        let mut by_casts: Vec<_> = skills.iter().collect();
        by_casts.sort_by(|a, b| b.1.cmp(a.1));

        lines.push(String::new());
        lines.push("### ✨ Most Team Skills Cast".to_string());
        for (rank, (actor, count)) in by_casts.iter().take(top_n).enumerate() {
            lines.push(format_ranked_line(
                rank + 1,
                actor,
                "Skills Cast",
                &format_cast_count(**count),
            ));
        }
    }

    lines.join("\n")
}

/// Full section body handed to the merger: the rendered report plus a
/// freshness stamp and a closing horizontal rule. The rule is deliberately
/// a top-level-header lookalike the merger must not trip over.
pub fn build_section_body(report: &str, updated_at: DateTime<Utc>) -> String {
    format!(
        "{report}\n\n_Last updated: {} UTC_\n\n---",
        updated_at.format("%Y-%m-%d %H:%M"),
    )
}

fn desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
