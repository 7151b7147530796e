//! Field overlap between two standards.

use std::collections::BTreeSet;

use cinder_types::StandardId;
use serde::{Deserialize, Serialize};

use crate::registry::requirements;

/// Common required field count above which two standards can share data.
pub const SHARE_THRESHOLD: usize = 5;

/// Overlap between two standards' field sets.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StandardOverlap {
    pub standard_a: StandardId,
    pub standard_b: StandardId,
    /// `round(2 × |commonRequired ∪ commonOptional| / (|fieldsA| + |fieldsB|) × 100)`.
    /// Symmetric under swapping A and B.
    pub percentage: u32,
    pub common_required: Vec<String>,
    pub common_optional: Vec<String>,
    pub unique_to_a: Vec<String>,
    pub unique_to_b: Vec<String>,
    /// True when more than [`SHARE_THRESHOLD`] required fields are shared.
    pub can_share_data: bool,
}

/// Compute the overlap between two standards.
pub fn overlap(a: StandardId, b: StandardId) -> StandardOverlap {
    let req_a = requirements(a);
    let req_b = requirements(b);

    let parts = overlap_parts(
        req_a.required_fields,
        req_a.optional_fields,
        req_b.required_fields,
        req_b.optional_fields,
    );

    StandardOverlap {
        standard_a: a,
        standard_b: b,
        percentage: parts.percentage,
        can_share_data: parts.common_required.len() > SHARE_THRESHOLD,
        common_required: to_strings(&parts.common_required),
        common_optional: to_strings(&parts.common_optional),
        unique_to_a: to_strings(&parts.unique_to_a),
        unique_to_b: to_strings(&parts.unique_to_b),
    }
}

struct OverlapParts<'a> {
    percentage: u32,
    common_required: Vec<&'a str>,
    common_optional: Vec<&'a str>,
    unique_to_a: Vec<&'a str>,
    unique_to_b: Vec<&'a str>,
}

/// Set arithmetic behind [`overlap`], over raw field-name slices.
fn overlap_parts<'a>(
    required_a: &[&'a str],
    optional_a: &[&'a str],
    required_b: &[&'a str],
    optional_b: &[&'a str],
) -> OverlapParts<'a> {
    let req_a: BTreeSet<&str> = required_a.iter().copied().collect();
    let req_b: BTreeSet<&str> = required_b.iter().copied().collect();
    let opt_a: BTreeSet<&str> = optional_a.iter().copied().collect();
    let opt_b: BTreeSet<&str> = optional_b.iter().copied().collect();

    let fields_a: BTreeSet<&str> = req_a.union(&opt_a).copied().collect();
    let fields_b: BTreeSet<&str> = req_b.union(&opt_b).copied().collect();

    let common_required: Vec<&str> = req_a.intersection(&req_b).copied().collect();
    let common_optional: Vec<&str> = opt_a.intersection(&opt_b).copied().collect();

    let common_union: BTreeSet<&str> = common_required
        .iter()
        .chain(common_optional.iter())
        .copied()
        .collect();

    let denominator = fields_a.len() + fields_b.len();
    let percentage = if denominator == 0 {
        0
    } else {
        (2.0 * common_union.len() as f64 / denominator as f64 * 100.0).round() as u32
    };

    OverlapParts {
        percentage,
        common_required,
        common_optional,
        unique_to_a: fields_a.difference(&fields_b).copied().collect(),
        unique_to_b: fields_b.difference(&fields_a).copied().collect(),
    }
}

fn to_strings(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| (*f).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_symmetric_for_all_pairs() {
        for a in StandardId::ALL {
            for b in StandardId::ALL {
                let ab = overlap(a, b);
                let ba = overlap(b, a);
                assert_eq!(ab.percentage, ba.percentage, "{a} vs {b}");
                assert_eq!(ab.common_required, ba.common_required);
                assert_eq!(ab.unique_to_a, ba.unique_to_b);
                assert_eq!(ab.can_share_data, ba.can_share_data);
            }
        }
    }

    #[test]
    fn test_self_overlap_is_100() {
        for id in StandardId::ALL {
            let o = overlap(id, id);
            assert_eq!(o.percentage, 100, "{id} vs itself");
            assert!(o.unique_to_a.is_empty());
        }
    }

    #[test]
    fn test_xyz_yzw_scenario() {
        // required A {x,y,z}, required B {y,z,w}, no optionals:
        // commonRequired {y,z}; percentage = 2×2/(3+3)×100 = 67.
        let parts = overlap_parts(&["x", "y", "z"], &[], &["y", "z", "w"], &[]);
        assert_eq!(parts.common_required, vec!["y", "z"]);
        assert_eq!(parts.percentage, 67);
        assert_eq!(parts.unique_to_a, vec!["x"]);
        assert_eq!(parts.unique_to_b, vec!["w"]);
    }

    #[test]
    fn test_ghg_protocol_iso14064_share_data() {
        // Both require the six core inventory fields.
        let o = overlap(StandardId::GhgProtocol, StandardId::Iso14064);
        assert!(o.common_required.len() > SHARE_THRESHOLD);
        assert!(o.can_share_data);
    }

    #[test]
    fn test_cbam_iso14067_do_not_share() {
        let o = overlap(StandardId::Cbam, StandardId::Iso14067);
        assert!(o.common_required.len() <= SHARE_THRESHOLD);
        assert!(!o.can_share_data);
    }

    #[test]
    fn test_common_fields_sorted() {
        let o = overlap(StandardId::GhgProtocol, StandardId::CsrdEsrs);
        let mut sorted = o.common_required.clone();
        sorted.sort();
        assert_eq!(o.common_required, sorted);
    }
}
