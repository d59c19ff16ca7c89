//! Read-side cost breakdown report.
//!
//! Rolls already-persisted asset/shot/sequence costs plus live
//! talent-assignment rates into one report with per-category subtotals.
//! Nothing here recomputes entity costs; it only aggregates snapshots.

use std::collections::BTreeMap;

use crate::types::DbId;

/// Talent category buckets used in the breakdown report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TalentCategory {
    VoiceActor,
    Artist3d,
    Animator,
    Other,
}

impl TalentCategory {
    /// Bucket a talent type label into its reporting category.
    pub fn from_talent_type(talent_type: &str) -> Self {
        match talent_type {
            "voice_actor" => Self::VoiceActor,
            "3d_artist" | "modeler" | "rigger" | "texture_artist" => Self::Artist3d,
            "animator" | "lighting_artist" | "compositor" => Self::Animator,
            _ => Self::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VoiceActor => "voice_actors",
            Self::Artist3d => "3d_artists",
            Self::Animator => "animators",
            Self::Other => "other",
        }
    }
}

// ---------------------------------------------------------------------------
// Input snapshots
// ---------------------------------------------------------------------------

/// Asset row snapshot: classification plus its persisted cost.
#[derive(Debug, Clone)]
pub struct AssetCostRow {
    pub asset_type: String,
    pub estimated_cost: f64,
}

/// Shot row snapshot: complexity plus its persisted cost.
#[derive(Debug, Clone)]
pub struct ShotCostRow {
    pub complexity: String,
    pub estimated_cost: f64,
}

/// Sequence row snapshot with its persisted cost and shot count.
#[derive(Debug, Clone)]
pub struct SequenceCostRow {
    pub sequence_id: DbId,
    pub sequence_number: i32,
    pub title: String,
    pub estimated_cost: f64,
    pub shot_count: i64,
}

/// One talent assignment with the assigned talent's type and agreed terms.
#[derive(Debug, Clone)]
pub struct TalentCostRow {
    pub talent_type: String,
    pub rate_agreed: Option<f64>,
    pub estimated_hours: Option<f64>,
}

impl TalentCostRow {
    /// Cost contributed by this assignment.
    ///
    /// Hourly terms (`rate * hours`) when hours are present, otherwise the
    /// rate as a flat fee; no agreed rate contributes zero.
    pub fn cost(&self) -> f64 {
        match (self.rate_agreed, self.estimated_hours) {
            (Some(rate), Some(hours)) => rate * hours,
            (Some(rate), None) => rate,
            (None, _) => 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Report shape
// ---------------------------------------------------------------------------

/// Subtotal group: total plus per-key breakdown.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct CategoryTotals {
    pub total: f64,
    pub by_category: BTreeMap<String, f64>,
}

/// Per-sequence line in the report.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SequenceLine {
    pub sequence_id: DbId,
    pub sequence_number: i32,
    pub title: String,
    pub estimated_cost: f64,
    pub shot_count: i64,
}

/// The full cost breakdown report for one story.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CostBreakdown {
    pub story_id: DbId,
    pub assets: CategoryTotals,
    pub shots: CategoryTotals,
    pub sequences: Vec<SequenceLine>,
    pub talent: CategoryTotals,
    /// The story's persisted aggregate (assets + shots).
    pub total_estimated_cost: f64,
    /// Persisted aggregate plus the talent total.
    pub total_with_talent_cost: f64,
}

/// Build the breakdown report from row snapshots.
pub fn breakdown(
    story_id: DbId,
    story_total: f64,
    assets: &[AssetCostRow],
    shots: &[ShotCostRow],
    sequences: &[SequenceCostRow],
    talent: &[TalentCostRow],
) -> CostBreakdown {
    let mut asset_totals = CategoryTotals::default();
    for row in assets {
        asset_totals.total += row.estimated_cost;
        *asset_totals
            .by_category
            .entry(row.asset_type.clone())
            .or_default() += row.estimated_cost;
    }

    let mut shot_totals = CategoryTotals::default();
    for row in shots {
        shot_totals.total += row.estimated_cost;
        *shot_totals
            .by_category
            .entry(row.complexity.clone())
            .or_default() += row.estimated_cost;
    }

    let sequence_lines = sequences
        .iter()
        .map(|row| SequenceLine {
            sequence_id: row.sequence_id,
            sequence_number: row.sequence_number,
            title: row.title.clone(),
            estimated_cost: row.estimated_cost,
            shot_count: row.shot_count,
        })
        .collect();

    let mut talent_totals = CategoryTotals::default();
    for row in talent {
        let cost = row.cost();
        talent_totals.total += cost;
        let category = TalentCategory::from_talent_type(&row.talent_type);
        *talent_totals
            .by_category
            .entry(category.label().to_string())
            .or_default() += cost;
    }

    let talent_total = talent_totals.total;
    CostBreakdown {
        story_id,
        assets: asset_totals,
        shots: shot_totals,
        sequences: sequence_lines,
        talent: talent_totals,
        total_estimated_cost: story_total,
        total_with_talent_cost: story_total + talent_total,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn talent_hourly_terms() {
        let row = TalentCostRow {
            talent_type: "modeler".into(),
            rate_agreed: Some(75.0),
            estimated_hours: Some(40.0),
        };
        assert!((row.cost() - 3000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn talent_flat_fee_without_hours() {
        let row = TalentCostRow {
            talent_type: "voice_actor".into(),
            rate_agreed: Some(1200.0),
            estimated_hours: None,
        };
        assert!((row.cost() - 1200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn talent_no_rate_contributes_zero() {
        let row = TalentCostRow {
            talent_type: "animator".into(),
            rate_agreed: None,
            estimated_hours: Some(10.0),
        };
        assert!((row.cost() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn talent_category_buckets() {
        assert_eq!(
            TalentCategory::from_talent_type("voice_actor"),
            TalentCategory::VoiceActor
        );
        for t in ["3d_artist", "modeler", "rigger", "texture_artist"] {
            assert_eq!(TalentCategory::from_talent_type(t), TalentCategory::Artist3d);
        }
        for t in ["animator", "lighting_artist", "compositor"] {
            assert_eq!(TalentCategory::from_talent_type(t), TalentCategory::Animator);
        }
        assert_eq!(
            TalentCategory::from_talent_type("producer"),
            TalentCategory::Other
        );
    }

    #[test]
    fn breakdown_groups_and_totals() {
        let assets = vec![
            AssetCostRow {
                asset_type: "model".into(),
                estimated_cost: 1000.0,
            },
            AssetCostRow {
                asset_type: "prop".into(),
                estimated_cost: 200.0,
            },
            AssetCostRow {
                asset_type: "model".into(),
                estimated_cost: 500.0,
            },
        ];
        let shots = vec![
            ShotCostRow {
                complexity: "medium".into(),
                estimated_cost: 3000.0,
            },
            ShotCostRow {
                complexity: "high".into(),
                estimated_cost: 4000.0,
            },
        ];
        let sequences = vec![SequenceCostRow {
            sequence_id: 7,
            sequence_number: 1,
            title: "Discovery".into(),
            estimated_cost: 7000.0,
            shot_count: 2,
        }];
        let talent = vec![TalentCostRow {
            talent_type: "modeler".into(),
            rate_agreed: Some(75.0),
            estimated_hours: Some(40.0),
        }];

        let report = breakdown(1, 8700.0, &assets, &shots, &sequences, &talent);

        assert!((report.assets.total - 1700.0).abs() < f64::EPSILON);
        assert!((report.assets.by_category["model"] - 1500.0).abs() < f64::EPSILON);
        assert!((report.shots.total - 7000.0).abs() < f64::EPSILON);
        assert!((report.shots.by_category["high"] - 4000.0).abs() < f64::EPSILON);
        assert_eq!(report.sequences.len(), 1);
        assert_eq!(report.sequences[0].shot_count, 2);
        assert!((report.talent.total - 3000.0).abs() < f64::EPSILON);
        assert!((report.talent.by_category["3d_artists"] - 3000.0).abs() < f64::EPSILON);
        assert!((report.total_with_talent_cost - 11700.0).abs() < f64::EPSILON);
    }

    #[test]
    fn breakdown_empty_story() {
        let report = breakdown(1, 0.0, &[], &[], &[], &[]);
        assert!((report.total_with_talent_cost - 0.0).abs() < f64::EPSILON);
        assert!(report.assets.by_category.is_empty());
        assert!(report.sequences.is_empty());
    }
}
