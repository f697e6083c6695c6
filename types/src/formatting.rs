//! Centralized number formatting for the podium report.
//!
//! All ranked-line values go through this module so the rendered markdown
//! and any console output agree on precision.

/// Format a damage total with one decimal place.
///
/// # Examples
/// ```
/// use podium_types::formatting::format_damage;
/// assert_eq!(format_damage(12.5), "12.5");
/// assert_eq!(format_damage(0.0), "0.0");
/// assert_eq!(format_damage(19.96), "20.0");
/// ```
pub fn format_damage(n: f64) -> String {
    format!("{n:.1}")
}

/// Format a skill cast total as `N times`.
///
/// # Examples
/// ```
/// use podium_types::formatting::format_cast_count;
/// assert_eq!(format_cast_count(1), "1 times");
/// assert_eq!(format_cast_count(12), "12 times");
/// ```
pub fn format_cast_count(n: i64) -> String {
    format!("{n} times")
}

/// Format a ranked report line: 1-indexed rank, actor name, labeled value.
///
/// The tab separator keeps the line readable in Habitica's mobile markdown
/// rendering, which collapses runs of spaces.
///
/// # Examples
/// ```
/// use podium_types::formatting::format_ranked_line;
/// assert_eq!(
///     format_ranked_line(1, "Alice", "Damage Dealt", "12.5"),
///     "1. Alice\tDamage Dealt: 12.5",
/// );
/// ```
pub fn format_ranked_line(rank: usize, actor: &str, label: &str, value: &str) -> String {
    format!("{rank}. {actor}\t{label}: {value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_damage() {
        assert_eq!(format_damage(0.0), "0.0");
        assert_eq!(format_damage(10.0), "10.0");
        assert_eq!(format_damage(12.34), "12.3");
        assert_eq!(format_damage(1234.56), "1234.6");
    }

    #[test]
    fn test_format_cast_count() {
        assert_eq!(format_cast_count(0), "0 times");
        assert_eq!(format_cast_count(7), "7 times");
    }

    #[test]
    fn test_format_ranked_line() {
        assert_eq!(
            format_ranked_line(2, "Bob", "Skills Cast", "4 times"),
            "2. Bob\tSkills Cast: 4 times",
        );
    }
}
