use crate::graph::DenseIndex;

/// Out-degree extremes, computed once per load from the CSR offsets.
///
/// Per-node degree needs no table of its own: it is `offsets[i + 1] - offsets[i]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DegreeIndex {
    max: Option<(DenseIndex, usize)>,
    min: Option<(DenseIndex, usize)>,
    sinks: usize,
}

impl DegreeIndex {
    /// Single pass over the offsets. Dense indices follow first appearance,
    /// so strict comparisons keep the earliest node on ties.
    pub(crate) fn compute(offsets: &[usize]) -> Self {
        let mut index = DegreeIndex::default();

        for (i, w) in offsets.windows(2).enumerate() {
            let idx = i as DenseIndex;
            let degree = w[1] - w[0];

            if index.max.map_or(true, |(_, best)| degree > best) {
                index.max = Some((idx, degree));
            }
            if index.min.map_or(true, |(_, best)| degree < best) {
                index.min = Some((idx, degree));
            }
            if degree == 0 {
                index.sinks += 1;
            }
        }

        index
    }

    pub(crate) fn max(&self) -> Option<(DenseIndex, usize)> {
        self.max
    }

    pub(crate) fn min(&self) -> Option<(DenseIndex, usize)> {
        self.min
    }

    pub fn max_degree(&self) -> usize {
        self.max.map_or(0, |(_, d)| d)
    }

    pub fn min_degree(&self) -> usize {
        self.min.map_or(0, |(_, d)| d)
    }

    /// Nodes with out-degree 0.
    pub fn sink_count(&self) -> usize {
        self.sinks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    #[test]
    fn test_compute_from_offsets() {
        // degrees: 2, 0, 3, 3, 0
        let index = DegreeIndex::compute(&[0, 2, 2, 5, 8, 8]);
        assert_eq!(index.max(), Some((2, 3)));
        assert_eq!(index.min(), Some((1, 0)));
        assert_eq!(index.sink_count(), 2);
    }

    #[test]
    fn test_empty() {
        let index = DegreeIndex::compute(&[0]);
        assert_eq!(index.max(), None);
        assert_eq!(index.max_degree(), 0);
        assert_eq!(index.min_degree(), 0);
    }

    #[test]
    fn test_tie_goes_to_first_appearance() {
        // 5 appears before 1, both reach degree 2.
        let g = Graph::from_edges([(5, 6), (1, 2), (1, 3), (5, 7)]).unwrap();
        assert_eq!(g.max_degree_node(), Some((5, 2)));
    }

    #[test]
    fn test_tie_first_appearance_as_destination() {
        // 9 first appears as a destination, ahead of 4.
        let g = Graph::from_edges([(0, 9), (4, 1), (9, 1), (4, 2), (9, 2)]).unwrap();
        assert_eq!(g.max_degree_node(), Some((9, 2)));
    }

    #[test]
    fn test_star_hub() {
        let g = Graph::from_edges((1..=100).map(|i| (0, i))).unwrap();
        assert_eq!(g.max_degree_node(), Some((0, 100)));
        assert_eq!(g.min_degree_node(), Some((1, 0)));
        assert_eq!(g.degree_index().sink_count(), 100);
    }
}
