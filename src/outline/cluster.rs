//! Font-size clustering into heading tiers.
//!
//! Sizes are partitioned with an exact one-dimensional k-means: in 1-D the
//! optimal clusters are contiguous ranges of the sorted values, so a dynamic
//! program over the distinct sizes (weighted by how often each occurs)
//! finds the minimum within-cluster variance without random seeding. The
//! same input always produces the same tiers.

use std::collections::HashMap;

use crate::model::{Level, Span, SpanKey};

/// Result of [`kmeans_1d`].
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    /// Cluster index of each input value, in input order
    pub assignments: Vec<usize>,
    /// Cluster centers (weighted means), ascending
    pub centers: Vec<f64>,
}

/// Partition `values` into at most `k` clusters minimizing the sum of
/// squared distances to the cluster means.
///
/// `k` is clamped to the number of distinct values. Empty input or `k == 0`
/// yields no clusters.
pub fn kmeans_1d(values: &[f64], k: usize) -> Clustering {
    let mut distinct: Vec<(f64, f64)> = Vec::new();
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    for v in sorted {
        match distinct.last_mut() {
            Some((last, weight)) if *last == v => *weight += 1.0,
            _ => distinct.push((v, 1.0)),
        }
    }

    let m = distinct.len();
    let k = k.min(m);
    if k == 0 {
        return Clustering {
            assignments: Vec::new(),
            centers: Vec::new(),
        };
    }

    let prefix = Prefix::new(&distinct);

    // cost[c][j]: best cost of c+1 clusters over distinct[0..=j]
    // split[c][j]: first index of the last cluster in that solution
    let mut cost = vec![vec![f64::INFINITY; m]; k];
    let mut split = vec![vec![0usize; m]; k];
    for j in 0..m {
        cost[0][j] = prefix.sse(0, j);
    }
    for c in 1..k {
        for j in c..m {
            for i in c..=j {
                let candidate = cost[c - 1][i - 1] + prefix.sse(i, j);
                // Strict comparison keeps the earliest split on ties.
                if candidate < cost[c][j] {
                    cost[c][j] = candidate;
                    split[c][j] = i;
                }
            }
        }
    }

    // Walk the splits back to recover the ranges.
    let mut bounds = vec![(0usize, 0usize); k];
    let mut end = m - 1;
    for c in (0..k).rev() {
        let start = if c == 0 { 0 } else { split[c][end] };
        bounds[c] = (start, end);
        if c > 0 {
            end = start - 1;
        }
    }

    let centers: Vec<f64> = bounds.iter().map(|&(i, j)| prefix.mean(i, j)).collect();

    let assignments = values
        .iter()
        .map(|v| {
            let idx = distinct.partition_point(|(d, _)| d.total_cmp(v).is_lt());
            bounds
                .iter()
                .position(|&(i, j)| idx >= i && idx <= j)
                .unwrap_or(0)
        })
        .collect();

    Clustering {
        assignments,
        centers,
    }
}

/// Prefix sums of weight, weighted value and weighted square.
struct Prefix {
    w: Vec<f64>,
    wx: Vec<f64>,
    wxx: Vec<f64>,
}

impl Prefix {
    fn new(points: &[(f64, f64)]) -> Self {
        let mut prefix = Prefix {
            w: vec![0.0],
            wx: vec![0.0],
            wxx: vec![0.0],
        };
        for &(x, w) in points {
            prefix.w.push(prefix.w.last().copied().unwrap_or(0.0) + w);
            prefix.wx.push(prefix.wx.last().copied().unwrap_or(0.0) + w * x);
            prefix
                .wxx
                .push(prefix.wxx.last().copied().unwrap_or(0.0) + w * x * x);
        }
        prefix
    }

    fn sums(&self, i: usize, j: usize) -> (f64, f64, f64) {
        (
            self.w[j + 1] - self.w[i],
            self.wx[j + 1] - self.wx[i],
            self.wxx[j + 1] - self.wxx[i],
        )
    }

    fn mean(&self, i: usize, j: usize) -> f64 {
        let (w, wx, _) = self.sums(i, j);
        wx / w
    }

    fn sse(&self, i: usize, j: usize) -> f64 {
        if i == j {
            return 0.0;
        }
        let (w, wx, wxx) = self.sums(i, j);
        (wxx - wx * wx / w).max(0.0)
    }
}

/// Size rounded to one decimal, as an exact integer key.
pub(crate) fn size_key(size: f64) -> i64 {
    (size * 10.0).round() as i64
}

/// One heading tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    /// Heading level of the tier
    pub level: Level,
    /// Cluster center in points
    pub center: f64,
    /// Center rounded to one decimal
    pub rounded: f64,
}

/// Tier assignment for one document's spans.
///
/// A span gets a tier only when its own size, rounded to one decimal,
/// equals a rounded cluster center. Spans at other sizes are left out.
#[derive(Debug, Clone, Default)]
pub struct ClusterMap {
    tiers: Vec<Tier>,
    by_size: HashMap<i64, Level>,
    by_span: HashMap<SpanKey, Level>,
}

impl ClusterMap {
    /// Cluster span sizes into at most `max_tiers` tiers.
    pub fn build(spans: &[Span], max_tiers: usize) -> Self {
        let sizes: Vec<f64> = spans.iter().map(|s| f64::from(s.font_size)).collect();
        let clustering = kmeans_1d(&sizes, max_tiers);

        let tiers: Vec<Tier> = clustering
            .centers
            .iter()
            .rev()
            .enumerate()
            .map(|(i, &center)| Tier {
                level: Level::from_index(i),
                center,
                rounded: size_key(center) as f64 / 10.0,
            })
            .collect();

        // Centers sharing a rounded key resolve to the smaller tier
        let mut by_size = HashMap::new();
        for tier in &tiers {
            by_size.insert(size_key(tier.center), tier.level);
        }

        let mut by_span = HashMap::new();
        for span in spans {
            if let Some(level) = by_size.get(&size_key(f64::from(span.font_size))) {
                by_span.insert(span.key(), *level);
            }
        }

        log::debug!(
            "Clustered {} spans into {} tiers: {:?}",
            spans.len(),
            tiers.len(),
            tiers.iter().map(|t| t.rounded).collect::<Vec<_>>()
        );

        Self {
            tiers,
            by_size,
            by_span,
        }
    }

    /// Tier of a span identity, if any.
    pub fn level_of(&self, key: &SpanKey) -> Option<Level> {
        self.by_span.get(key).copied()
    }

    /// Tier of a raw font size, if its rounded value matches a center.
    pub fn level_for_size(&self, size: f32) -> Option<Level> {
        self.by_size.get(&size_key(f64::from(size))).copied()
    }

    /// Tiers, largest first.
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Number of span identities with a tier.
    pub fn len(&self) -> usize {
        self.by_span.len()
    }

    /// Whether no span received a tier.
    pub fn is_empty(&self) -> bool {
        self.by_span.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(sizes: &[(&str, f32)]) -> Vec<Span> {
        sizes.iter().map(|(t, s)| Span::new(*t, *s, 1)).collect()
    }

    #[test]
    fn test_kmeans_separates_obvious_groups() {
        let values = [10.0, 10.0, 11.0, 20.0, 21.0, 40.0];
        let c = kmeans_1d(&values, 3);
        assert_eq!(c.centers.len(), 3);
        assert!((c.centers[0] - 31.0 / 3.0).abs() < 1e-9);
        assert!((c.centers[1] - 20.5).abs() < 1e-9);
        assert!((c.centers[2] - 40.0).abs() < 1e-9);
        assert_eq!(c.assignments, vec![0, 0, 0, 1, 1, 2]);
    }

    #[test]
    fn test_kmeans_is_weighted_by_frequency() {
        // Many 12s pull the lower cluster; 14 joins whichever side is cheaper.
        let mut values = vec![12.0; 20];
        values.extend([14.0, 24.0]);
        let c = kmeans_1d(&values, 2);
        assert_eq!(c.centers.len(), 2);
        assert!((c.centers[1] - 24.0).abs() < 1e-9);
        assert!(c.centers[0] < 12.2);
    }

    #[test]
    fn test_kmeans_clamps_k() {
        let c = kmeans_1d(&[12.0, 12.0, 18.0], 3);
        assert_eq!(c.centers, vec![12.0, 18.0]);
        assert_eq!(c.assignments, vec![0, 0, 1]);

        let c = kmeans_1d(&[], 3);
        assert!(c.centers.is_empty());
        assert!(c.assignments.is_empty());
    }

    #[test]
    fn test_three_sizes_three_tiers() {
        let spans = spans(&[
            ("Report", 24.0),
            ("Scope", 18.0),
            ("body one", 12.0),
            ("Results", 24.0),
            ("Method", 18.0),
            ("body two", 12.0),
        ]);
        let map = ClusterMap::build(&spans, 3);

        let rounded: Vec<f64> = map.tiers().iter().map(|t| t.rounded).collect();
        assert_eq!(rounded, vec![24.0, 18.0, 12.0]);
        assert_eq!(map.level_for_size(24.0), Level::new(1));
        assert_eq!(map.level_for_size(18.0), Level::new(2));
        assert_eq!(map.level_for_size(12.0), Level::new(3));
        assert_eq!(map.level_of(&spans[1].key()), Level::new(2));
        assert_eq!(map.len(), 6);
    }

    #[test]
    fn test_sizes_off_center_get_no_tier() {
        // Four distinct sizes into three tiers: 11 and 12 share a center of 11.5.
        let spans = spans(&[
            ("Title", 24.0),
            ("Heading", 18.0),
            ("small", 11.0),
            ("body", 12.0),
        ]);
        let map = ClusterMap::build(&spans, 3);

        assert_eq!(map.tiers().len(), 3);
        assert_eq!(map.tiers()[2].rounded, 11.5);
        assert!(map.level_for_size(11.0).is_none());
        assert!(map.level_for_size(12.0).is_none());
        assert!(map.level_of(&spans[3].key()).is_none());
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_colliding_centers_resolve_to_smaller_tier() {
        // Centers 12.01 and 12.04 both round to 12.0.
        let map = ClusterMap::build(
            &spans(&[("alpha", 12.0), ("beta", 12.02), ("gamma", 12.03), ("delta", 12.05)]),
            2,
        );

        let rounded: Vec<f64> = map.tiers().iter().map(|t| t.rounded).collect();
        assert_eq!(rounded, vec![12.0, 12.0]);
        assert_eq!(map.level_for_size(12.0), Level::new(2));
        assert_eq!(map.level_for_size(12.05), None);
    }

    #[test]
    fn test_tier_centers_descend() {
        let spans = spans(&[("a", 9.0), ("b", 30.0), ("c", 16.0), ("d", 16.0), ("e", 9.5)]);
        let map = ClusterMap::build(&spans, 3);
        for pair in map.tiers().windows(2) {
            assert!(pair[0].center >= pair[1].center);
            assert!(pair[0].level < pair[1].level);
        }
    }

    #[test]
    fn test_empty_spans() {
        let map = ClusterMap::build(&[], 3);
        assert!(map.is_empty());
        assert!(map.tiers().is_empty());
    }
}
