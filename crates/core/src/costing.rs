//! Cost estimation constants, types, and pure logic.
//!
//! Maps entity attributes (asset type, complexity, estimated time) to USD
//! cost estimates and aggregates them bottom-up (asset/shot -> sequence ->
//! story). All functions are deterministic and never error: unknown labels
//! fall back to documented defaults so a sloppy parse still prices out.

use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Complexity
// ---------------------------------------------------------------------------

/// Production complexity rating for assets and shots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    /// Parse a free-form label. Unknown or empty labels fall back to Medium.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Medium,
        }
    }

    /// Cost multiplier applied to an asset's base cost.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Low => 1.0,
            Self::Medium => 2.0,
            Self::High => 4.0,
        }
    }

    /// Daily labor cost for a shot of this complexity, in USD.
    pub fn daily_shot_cost(self) -> f64 {
        match self {
            Self::Low => 500.0,
            Self::Medium => 1500.0,
            Self::High => 4000.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

// ---------------------------------------------------------------------------
// Asset types
// ---------------------------------------------------------------------------

/// Category of a production asset, driving its base cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    Model,
    Prop,
    Environment,
    Effect,
}

impl AssetType {
    /// Parse a free-form label. Unknown or empty labels fall back to Model.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "prop" => Self::Prop,
            "environment" => Self::Environment,
            "effect" => Self::Effect,
            _ => Self::Model,
        }
    }

    /// Base cost in USD before the complexity multiplier.
    pub fn base_cost(self) -> f64 {
        match self {
            Self::Model => 500.0,
            Self::Prop => 100.0,
            Self::Environment => 2000.0,
            Self::Effect => 1500.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Prop => "prop",
            Self::Environment => "environment",
            Self::Effect => "effect",
        }
    }
}

// ---------------------------------------------------------------------------
// Time-string parsing
// ---------------------------------------------------------------------------

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.?\d*").expect("valid regex"));

/// Parse a free-form time estimate ("1-2 days", "1 week", "3 hours") into
/// fractional days.
///
/// Heuristics, in order:
/// - empty or unparseable input -> 1.0 day;
/// - a hyphenated range `A-B` -> arithmetic mean of A and B, unit ignored;
/// - otherwise the first numeric token, scaled by unit keyword:
///   "week" x7, "month" x30, "hour" /24, anything else taken as days.
pub fn parse_time_to_days(time_text: &str) -> f64 {
    let text = time_text.trim().to_lowercase();
    if text.is_empty() {
        return 1.0;
    }

    // Ranges like "1-2 days": mean of the two endpoints.
    if text.contains('-') {
        let parts: Vec<&str> = text.splitn(2, '-').collect();
        if parts.len() == 2 {
            let start = leading_number(parts[0]);
            let end = leading_number(parts[1]);
            if let (Some(start), Some(end)) = (start, end) {
                return (start + end) / 2.0;
            }
        }
    }

    if let Some(m) = NUMBER_RE.find(&text) {
        if let Ok(value) = m.as_str().parse::<f64>() {
            return if text.contains("week") {
                value * 7.0
            } else if text.contains("month") {
                value * 30.0
            } else if text.contains("hour") {
                value / 24.0
            } else {
                value
            };
        }
    }

    1.0
}

/// First whitespace-delimited token of `part` parsed as a number.
fn leading_number(part: &str) -> Option<f64> {
    part.trim().split_whitespace().next()?.parse::<f64>().ok()
}

// ---------------------------------------------------------------------------
// Per-entity costs
// ---------------------------------------------------------------------------

/// Estimated cost for an asset: base cost by type times complexity multiplier.
pub fn asset_cost(asset_type: AssetType, complexity: Complexity) -> f64 {
    asset_type.base_cost() * complexity.multiplier()
}

/// Estimated cost for a shot: estimated days times daily cost by complexity.
///
/// An empty `estimated_time` prices as one day.
pub fn shot_cost(complexity: Complexity, estimated_time: &str) -> f64 {
    parse_time_to_days(estimated_time) * complexity.daily_shot_cost()
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Cost of a sequence: the sum of its shots' costs (0 with no shots).
pub fn sequence_cost(shot_costs: &[f64]) -> f64 {
    shot_costs.iter().sum()
}

/// Total story cost: all asset costs plus all shot costs.
///
/// Sequences are not added separately; their cost is already counted
/// through their shots.
pub fn story_total_cost(asset_costs: &[f64], shot_costs: &[f64]) -> f64 {
    asset_costs.iter().sum::<f64>() + shot_costs.iter().sum::<f64>()
}

// ---------------------------------------------------------------------------
// Budget range
// ---------------------------------------------------------------------------

/// Bucket a total cost into a human-readable budget range string.
///
/// - zero or negative -> empty string
/// - under $1k   -> exact dollars ("$500")
/// - under $10k  -> one decimal of thousands ("$4.5k")
/// - under $100k -> 10k band ("$40k-$50k")
/// - under $1M   -> 50k band ("$100k-$150k")
/// - otherwise   -> 100k band ("$1500k-$1600k")
pub fn budget_range(total_cost: f64) -> String {
    if total_cost <= 0.0 {
        return String::new();
    }

    if total_cost < 1_000.0 {
        format!("${:.0}", total_cost)
    } else if total_cost < 10_000.0 {
        format!("${:.1}k", total_cost / 1_000.0)
    } else if total_cost < 100_000.0 {
        let lower = (total_cost / 10_000.0) as i64 * 10;
        format!("${}k-${}k", lower, lower + 10)
    } else if total_cost < 1_000_000.0 {
        let lower = (total_cost / 50_000.0) as i64 * 50;
        format!("${}k-${}k", lower, lower + 50)
    } else {
        let lower = (total_cost / 100_000.0) as i64 * 100;
        format!("${}k-${}k", lower, lower + 100)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- parse_time_to_days --

    #[test]
    fn time_range_averages_endpoints() {
        assert!((parse_time_to_days("1-2 days") - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn time_single_number_of_days() {
        assert!((parse_time_to_days("3 days") - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn time_weeks_scale_by_seven() {
        assert!((parse_time_to_days("1 week") - 7.0).abs() < f64::EPSILON);
        assert!((parse_time_to_days("2 weeks") - 14.0).abs() < f64::EPSILON);
    }

    #[test]
    fn time_months_scale_by_thirty() {
        assert!((parse_time_to_days("2 months") - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn time_hours_divide_by_twenty_four() {
        assert!((parse_time_to_days("3 hours") - 0.125).abs() < f64::EPSILON);
    }

    #[test]
    fn time_empty_defaults_to_one_day() {
        assert!((parse_time_to_days("") - 1.0).abs() < f64::EPSILON);
        assert!((parse_time_to_days("   ") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn time_unparseable_defaults_to_one_day() {
        assert!((parse_time_to_days("soon") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn time_range_ignores_unit() {
        // Range handling averages the endpoints without unit scaling.
        assert!((parse_time_to_days("1-3 weeks") - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn time_malformed_range_falls_through_to_number_scan() {
        // "day-long" has a hyphen but no numeric endpoints on both sides,
        // so the first-number heuristic applies.
        assert!((parse_time_to_days("about 2 days-ish") - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn time_decimal_number() {
        assert!((parse_time_to_days("1.5 days") - 1.5).abs() < f64::EPSILON);
    }

    // -- asset_cost --

    #[test]
    fn asset_cost_model_high() {
        let cost = asset_cost(AssetType::from_label("model"), Complexity::from_label("high"));
        assert!((cost - 2000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn asset_cost_unknown_type_falls_back_to_model() {
        let cost = asset_cost(
            AssetType::from_label("unknown_type"),
            Complexity::from_label("medium"),
        );
        assert!((cost - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn asset_cost_unknown_complexity_falls_back_to_medium() {
        let cost = asset_cost(
            AssetType::from_label("prop"),
            Complexity::from_label("extreme"),
        );
        assert!((cost - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn asset_cost_environment_low() {
        let cost = asset_cost(AssetType::Environment, Complexity::Low);
        assert!((cost - 2000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn asset_type_labels_case_insensitive() {
        assert_eq!(AssetType::from_label("EFFECT"), AssetType::Effect);
        assert_eq!(Complexity::from_label(" High "), Complexity::High);
    }

    // -- shot_cost --

    #[test]
    fn shot_cost_medium_two_days() {
        assert!((shot_cost(Complexity::Medium, "2 days") - 3000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn shot_cost_empty_time_prices_one_day() {
        assert!((shot_cost(Complexity::High, "") - 4000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn shot_cost_range() {
        // (1+2)/2 * 500
        assert!((shot_cost(Complexity::Low, "1-2 days") - 750.0).abs() < f64::EPSILON);
    }

    // -- aggregates --

    #[test]
    fn sequence_cost_sums_shots() {
        assert!((sequence_cost(&[1000.0, 2000.0]) - 3000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sequence_cost_empty_is_zero() {
        assert!((sequence_cost(&[]) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn story_total_sums_assets_and_shots_only() {
        let total = story_total_cost(&[500.0], &[1500.0, 1500.0]);
        assert!((total - 3500.0).abs() < f64::EPSILON);
    }

    // -- budget_range --

    #[test]
    fn budget_range_zero_is_empty() {
        assert_eq!(budget_range(0.0), "");
    }

    #[test]
    fn budget_range_under_one_thousand_exact() {
        assert_eq!(budget_range(500.0), "$500");
    }

    #[test]
    fn budget_range_thousands_one_decimal() {
        assert_eq!(budget_range(4500.0), "$4.5k");
    }

    #[test]
    fn budget_range_ten_k_band() {
        assert_eq!(budget_range(45_000.0), "$40k-$50k");
    }

    #[test]
    fn budget_range_fifty_k_band() {
        assert_eq!(budget_range(120_000.0), "$100k-$150k");
    }

    #[test]
    fn budget_range_hundred_k_band() {
        assert_eq!(budget_range(1_500_000.0), "$1500k-$1600k");
    }

    #[test]
    fn budget_range_band_boundary() {
        assert_eq!(budget_range(10_000.0), "$10k-$20k");
        assert_eq!(budget_range(100_000.0), "$100k-$150k");
    }
}
