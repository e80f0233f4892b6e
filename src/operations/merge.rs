use crate::error::{OperationError, Result};
use crate::geometry::Segment;
use crate::math::{cross, lex_cmp, Point2};

use super::classify::{classify_segments, RelationKind};
use super::AnalysisParams;

/// Coalesces chains of collinear segments into maximal runs.
///
/// Two segments on the same line that meet end to end (classified as
/// [`RelationKind::CollinearDisjoint`]) are replaced by one segment spanning
/// both. Overlapping segments are left alone; the arrangement splitter deals
/// with them. The result does not depend on input order.
#[derive(Debug)]
pub struct MergeCollinear {
    segments: Vec<Segment>,
    params: AnalysisParams,
}

impl MergeCollinear {
    /// Creates a new `MergeCollinear` operation over `segments`.
    #[must_use]
    pub fn new(segments: &[Segment]) -> Self {
        Self {
            segments: segments.to_vec(),
            params: AnalysisParams::default(),
        }
    }

    /// Replaces the default tolerance.
    #[must_use]
    pub fn with_params(mut self, params: AnalysisParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the merge.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::EmptyInput` for an empty segment list, or
    /// `OperationError::InvalidParameters` if the parameters are invalid.
    pub fn execute(&self) -> Result<Vec<Segment>> {
        if self.segments.is_empty() {
            return Err(OperationError::EmptyInput("no segments to merge").into());
        }
        self.params.validate()?;
        let eps = self.params.epsilon;

        let mut sorted: Vec<Segment> = self.segments.iter().map(Segment::normalized).collect();
        sorted.sort_by(Segment::canonical_cmp);

        let mut merged = Vec::with_capacity(sorted.len());
        for group in group_by_line(&sorted, eps) {
            merged.extend(merge_group(group, eps));
        }
        merged.sort_by(Segment::canonical_cmp);

        tracing::debug!(
            input = self.segments.len(),
            output = merged.len(),
            "merged collinear segments"
        );
        Ok(merged)
    }
}

/// Distance from `p` to the infinite line through `seg`.
fn line_offset(seg: &Segment, p: &Point2) -> f64 {
    cross(&seg.direction(), &(p - seg.start())).abs() / seg.length()
}

/// Buckets segments by supporting line. Each bucket is keyed by its first
/// member; a segment joins it when both its endpoints lie on that line.
fn group_by_line(segments: &[Segment], eps: f64) -> Vec<Vec<Segment>> {
    let mut groups: Vec<Vec<Segment>> = Vec::new();
    for seg in segments {
        let target = groups.iter_mut().find(|g| {
            line_offset(&g[0], seg.start()) <= eps && line_offset(&g[0], seg.end()) <= eps
        });
        match target {
            Some(group) => group.push(*seg),
            None => groups.push(vec![*seg]),
        }
    }
    groups
}

/// Merges end-to-end pairs until none is left. The first qualifying pair in
/// canonical order is always merged first.
fn merge_group(mut group: Vec<Segment>, eps: f64) -> Vec<Segment> {
    while let Some((i, j)) = first_chained_pair(&group, eps) {
        let joined = span(&group[i], &group[j]);
        tracing::trace!(?joined, "joined collinear pair");
        group.remove(j);
        group[i] = joined;
        group.sort_by(Segment::canonical_cmp);
    }
    group
}

fn first_chained_pair(group: &[Segment], eps: f64) -> Option<(usize, usize)> {
    (0..group.len()).find_map(|i| {
        ((i + 1)..group.len())
            .find(|&j| {
                classify_segments(&group[i], &group[j], eps) == RelationKind::CollinearDisjoint
            })
            .map(|j| (i, j))
    })
}

/// The segment from the smallest to the largest of the four endpoints.
fn span(a: &Segment, b: &Segment) -> Segment {
    let pts = [*a.start(), *a.end(), *b.start(), *b.end()];
    let lo = pts.iter().min_by(|p, q| lex_cmp(p, q)).unwrap_or(a.start());
    let hi = pts.iter().max_by(|p, q| lex_cmp(p, q)).unwrap_or(a.end());
    Segment::new(*lo, *hi).unwrap_or(*a)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn seg(a: (f64, f64), b: (f64, f64)) -> Segment {
        Segment::from_coords(a, b).unwrap()
    }

    fn merge(segs: &[Segment]) -> Vec<Segment> {
        MergeCollinear::new(segs).execute().unwrap()
    }

    #[test]
    fn empty_input_fails() {
        assert!(MergeCollinear::new(&[]).execute().is_err());
    }

    #[test]
    fn chain_collapses_to_one() {
        let out = merge(&[
            seg((4.0, 0.0), (6.0, 0.0)),
            seg((0.0, 0.0), (2.0, 0.0)),
            seg((2.0, 0.0), (4.0, 0.0)),
        ]);
        assert_eq!(out, vec![seg((0.0, 0.0), (6.0, 0.0))]);
    }

    #[test]
    fn diagonal_chain_merges() {
        let out = merge(&[seg((2.0, 2.0), (1.0, 1.0)), seg((1.0, 1.0), (0.0, 0.0))]);
        assert_eq!(out, vec![seg((0.0, 0.0), (2.0, 2.0))]);
    }

    #[test]
    fn corner_is_not_merged() {
        let out = merge(&[seg((0.0, 0.0), (2.0, 0.0)), seg((2.0, 0.0), (2.0, 3.0))]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn gap_and_parallel_lines_stay_apart() {
        let out = merge(&[
            seg((0.0, 0.0), (1.0, 0.0)),
            seg((2.0, 0.0), (3.0, 0.0)),
            seg((1.0, 1.0), (2.0, 1.0)),
        ]);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn overlapping_pair_is_untouched() {
        let out = merge(&[seg((0.0, 0.0), (3.0, 0.0)), seg((2.0, 0.0), (5.0, 0.0))]);
        assert_eq!(
            out,
            vec![seg((0.0, 0.0), (3.0, 0.0)), seg((2.0, 0.0), (5.0, 0.0))]
        );
    }

    #[test]
    fn output_is_sorted_canonically() {
        let out = merge(&[seg((5.0, 5.0), (5.0, 9.0)), seg((1.0, 0.0), (0.0, 0.0))]);
        assert_eq!(out[0], seg((0.0, 0.0), (1.0, 0.0)));
        assert_eq!(out[0].start(), &Point2::new(0.0, 0.0));
    }

    proptest! {
        #[test]
        fn order_does_not_matter(
            cuts in proptest::collection::btree_set(1i32..20, 1..6),
            rotate in 0usize..8,
        ) {
            let mut xs: Vec<f64> = vec![0.0];
            xs.extend(cuts.iter().map(|&c| f64::from(c)));
            xs.push(20.0);
            let mut segs: Vec<Segment> = xs
                .windows(2)
                .map(|w| seg((w[0], 1.0), (w[1], 1.0)))
                .collect();
            let forward = merge(&segs);
            let len = segs.len();
            segs.rotate_left(rotate % len);
            segs.reverse();
            prop_assert_eq!(&merge(&segs), &forward);
            prop_assert_eq!(forward, vec![seg((0.0, 1.0), (20.0, 1.0))]);
        }
    }
}
