//! Deterministic emission order for viewing angles.
//!
//! Angles are sorted by a primary axis (heading or pitch) and a synthetic
//! secondary key derived from the heading. The excluded headings define a gap
//! in the horizontal domain; views past the upper end of the gap are shifted
//! by a full turn so a scan starts right after the gap and wraps around
//! through 0 instead of jumping across it. The sort is stable, which keeps the
//! repeated zenith views from the grid generator in generation order.

use crate::angle::FULL_TURN_DEG;
use crate::types::ViewingAngle;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Which coordinate leads the sort key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortAxis {
    /// Primary key is the heading `h`.
    #[default]
    HorizontalFirst,
    /// Primary key is the pitch `v`.
    VerticalFirst,
}

/// Bounds of the excluded heading range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WrapCutoffs {
    pub low: f64,
    pub high: f64,
}

impl WrapCutoffs {
    /// `min`/`max` of the excluded headings, or `[0, 360]` when none are
    /// excluded.
    pub fn from_excluded(exclude_h: &[f64]) -> Self {
        if exclude_h.is_empty() {
            return Self {
                low: 0.0,
                high: FULL_TURN_DEG,
            };
        }
        let low = exclude_h.iter().copied().fold(f64::INFINITY, f64::min);
        let high = exclude_h.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self { low, high }
    }

    /// Synthetic secondary sort key for heading `h`.
    #[inline]
    pub fn secondary_key(&self, h: f64) -> f64 {
        if h > self.high {
            h - FULL_TURN_DEG
        } else if h < self.low {
            h
        } else {
            FULL_TURN_DEG
        }
    }
}

/// Viewing angles in emission order. Position `i` is tile number `i + 1`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct OrderedAngles {
    angles: Vec<ViewingAngle>,
}

impl OrderedAngles {
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    pub fn as_slice(&self) -> &[ViewingAngle] {
        &self.angles
    }

    /// `(tile_number, angle)` pairs with 1-based tile numbers.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, ViewingAngle)> + '_ {
        self.angles.iter().enumerate().map(|(i, &a)| (i + 1, a))
    }

    /// Listing lines in the `"{index}: h:{h} v:{v}"` format.
    pub fn listing(&self) -> Vec<String> {
        self.numbered()
            .map(|(index, a)| format!("{index}: h:{:?} v:{:?}", a.h, a.v))
            .collect()
    }
}

/// Sort `angles` into emission order.
pub fn order_angles(
    mut angles: Vec<ViewingAngle>,
    exclude_h: &[f64],
    axis: SortAxis,
) -> OrderedAngles {
    let cutoffs = WrapCutoffs::from_excluded(exclude_h);
    let key = |a: &ViewingAngle| -> (f64, f64) {
        let primary = match axis {
            SortAxis::HorizontalFirst => a.h,
            SortAxis::VerticalFirst => a.v,
        };
        (primary, cutoffs.secondary_key(a.h))
    };
    // slice::sort_by is stable
    angles.sort_by(|a, b| key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal));
    OrderedAngles { angles }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angle(h: f64, v: f64) -> ViewingAngle {
        ViewingAngle::new(h, v)
    }

    #[test]
    fn cutoffs_default_to_full_turn() {
        let c = WrapCutoffs::from_excluded(&[]);
        assert_eq!(c, WrapCutoffs { low: 0.0, high: 360.0 });
        assert_eq!(c.secondary_key(0.0), 360.0);
        assert_eq!(c.secondary_key(359.0), 360.0);
    }

    #[test]
    fn wrap_rule_matches_documented_keys() {
        let c = WrapCutoffs::from_excluded(&[90.0, 40.0]);
        assert_eq!(c.low, 40.0);
        assert_eq!(c.high, 90.0);
        assert_eq!(c.secondary_key(95.0), -265.0);
        assert_eq!(c.secondary_key(10.0), 10.0);
        assert_eq!(c.secondary_key(200.0), -160.0);
        assert_eq!(c.secondary_key(60.0), 360.0);
        assert_eq!(c.secondary_key(40.0), 360.0);
    }

    #[test]
    fn vertical_first_groups_rows() {
        let input = vec![
            angle(0.0, -50.0),
            angle(100.0, -50.0),
            angle(0.0, 50.0),
            angle(100.0, 50.0),
            angle(0.0, 90.0),
            angle(100.0, 90.0),
        ];
        let ordered = order_angles(input.clone(), &[], SortAxis::VerticalFirst);
        assert_eq!(ordered.as_slice(), input.as_slice());
    }

    #[test]
    fn horizontal_first_groups_columns() {
        let input = vec![
            angle(0.0, -50.0),
            angle(100.0, -50.0),
            angle(0.0, 50.0),
            angle(100.0, 50.0),
            angle(0.0, 90.0),
            angle(100.0, 90.0),
        ];
        let ordered = order_angles(input, &[], SortAxis::HorizontalFirst);
        let got: Vec<(f64, f64)> = ordered.as_slice().iter().map(|a| (a.h, a.v)).collect();
        assert_eq!(
            got,
            vec![
                (0.0, -50.0),
                (0.0, 50.0),
                (0.0, 90.0),
                (100.0, -50.0),
                (100.0, 50.0),
                (100.0, 90.0),
            ]
        );
    }

    #[test]
    fn row_scan_starts_after_excluded_gap() {
        let input = vec![
            angle(10.0, 0.0),
            angle(60.0, 0.0),
            angle(95.0, 0.0),
            angle(300.0, 0.0),
        ];
        let ordered = order_angles(input, &[40.0, 90.0], SortAxis::VerticalFirst);
        let headings: Vec<f64> = ordered.as_slice().iter().map(|a| a.h).collect();
        // keys: 10 -> 10, 60 -> 360, 95 -> -265, 300 -> -60
        assert_eq!(headings, vec![95.0, 300.0, 10.0, 60.0]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        // the zenith row repeated, as produced when the pitch progression hits 90
        let input = vec![
            angle(0.0, 90.0),
            angle(90.0, 90.0),
            angle(0.0, 90.0),
            angle(90.0, 90.0),
        ];
        let ordered = order_angles(input.clone(), &[], SortAxis::VerticalFirst);
        assert_eq!(ordered.as_slice(), input.as_slice());

        let tagged = vec![angle(0.0, 90.0), angle(0.0, -90.0), angle(0.0, 90.0)];
        let by_h = order_angles(tagged.clone(), &[], SortAxis::HorizontalFirst);
        assert_eq!(by_h.as_slice(), tagged.as_slice());
    }

    #[test]
    fn numbering_is_one_based() {
        let ordered = order_angles(
            vec![angle(0.0, -50.0), angle(0.0, 90.0)],
            &[],
            SortAxis::VerticalFirst,
        );
        let numbers: Vec<usize> = ordered.numbered().map(|(i, _)| i).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(ordered.listing(), vec!["1: h:0.0 v:-50.0", "2: h:0.0 v:90.0"]);
    }
}
