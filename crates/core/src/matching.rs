//! Ranked identity matching between freshly parsed entities and existing
//! database rows.
//!
//! Regeneration re-parses a story from scratch, so nothing ties a new parse
//! entry to the row a caller already holds a reference to except its display
//! name. The strategy chain here degrades from exact matching down to a
//! positional fallback, and every hit carries a [`MatchConfidence`] tag so
//! callers can log or flag the weak ones instead of silently accepting them.

use crate::types::DbId;

/// How confident a match in the strategy chain is, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchConfidence {
    /// Names are byte-identical (for assets: name and type both match).
    Exact,
    /// Names match ignoring case.
    CaseInsensitive,
    /// One name contains the other (case-insensitive).
    Substring,
    /// Only the classification (asset type) matches.
    TypeOnly,
    /// Paired up by position among otherwise unmatched rows.
    Positional,
}

impl MatchConfidence {
    /// Whether this match is strong enough to accept without flagging.
    pub fn is_strong(self) -> bool {
        matches!(self, Self::Exact | Self::CaseInsensitive)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::CaseInsensitive => "case_insensitive",
            Self::Substring => "substring",
            Self::TypeOnly => "type_only",
            Self::Positional => "positional",
        }
    }
}

/// A minimal snapshot of an existing row for matching purposes.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub id: DbId,
    pub name: String,
    /// Classification field: asset_type for assets, empty otherwise.
    pub kind: String,
}

/// A resolved match: the row id plus how it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub id: DbId,
    pub confidence: MatchConfidence,
}

/// True when a name is usable as a matching key.
///
/// Entities with blank names are never created and never matched.
pub fn is_matchable_name(name: &str) -> bool {
    !name.trim().is_empty()
}

/// Match by display name: exact, then case-insensitive, then substring.
///
/// Used for characters and locations. Returns the first candidate each
/// strategy accepts, in candidate order.
pub fn match_by_name(name: &str, candidates: &[Candidate]) -> Option<Match> {
    if !is_matchable_name(name) {
        return None;
    }

    if let Some(c) = candidates.iter().find(|c| c.name == name) {
        return Some(Match {
            id: c.id,
            confidence: MatchConfidence::Exact,
        });
    }

    let lower = name.to_lowercase();
    if let Some(c) = candidates.iter().find(|c| c.name.to_lowercase() == lower) {
        return Some(Match {
            id: c.id,
            confidence: MatchConfidence::CaseInsensitive,
        });
    }

    if let Some(c) = candidates.iter().find(|c| {
        let other = c.name.to_lowercase();
        !other.is_empty() && (other.contains(&lower) || lower.contains(&other))
    }) {
        return Some(Match {
            id: c.id,
            confidence: MatchConfidence::Substring,
        });
    }

    None
}

/// Match an asset: exact name+type, then name ignoring type, then substring
/// name, then type-only.
pub fn match_asset(name: &str, asset_type: &str, candidates: &[Candidate]) -> Option<Match> {
    if !is_matchable_name(name) {
        return None;
    }

    let type_lower = asset_type.trim().to_lowercase();
    if let Some(c) = candidates
        .iter()
        .find(|c| c.name == name && c.kind.to_lowercase() == type_lower)
    {
        return Some(Match {
            id: c.id,
            confidence: MatchConfidence::Exact,
        });
    }

    if let Some(m) = match_by_name(name, candidates) {
        return Some(m);
    }

    if !type_lower.is_empty() {
        if let Some(c) = candidates.iter().find(|c| c.kind.to_lowercase() == type_lower) {
            return Some(Match {
                id: c.id,
                confidence: MatchConfidence::TypeOnly,
            });
        }
    }

    None
}

/// Pair up still-unclaimed candidates by position.
///
/// Used by read-time repair as the last resort: the `index`-th unmatched
/// parse entry is paired with the `index`-th unclaimed row.
pub fn positional_fallback(index: usize, unclaimed: &[Candidate]) -> Option<Match> {
    unclaimed.get(index).map(|c| Match {
        id: c.id,
        confidence: MatchConfidence::Positional,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
