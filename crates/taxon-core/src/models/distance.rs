/// Square, symmetric matrix of pairwise distances, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Build from rows. Returns `None` unless every row has `rows.len()` entries.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let n = rows.len();
        if rows.iter().any(|r| r.len() != n) {
            return None;
        }
        Some(Self {
            n,
            values: rows.into_iter().flatten().collect(),
        })
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.n..(i + 1) * self.n]
    }

    /// Indices of the other points within `radius` of point `i`.
    pub fn neighbors_within(&self, i: usize, radius: f64) -> Vec<usize> {
        self.row(i)
            .iter()
            .enumerate()
            .filter(|&(j, &d)| j != i && d <= radius)
            .map(|(j, _)| j)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_ragged_rows() {
        assert!(DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]).is_none());
    }

    #[test]
    fn neighbors_exclude_self() {
        let m = DistanceMatrix::from_rows(vec![
            vec![0.0, 0.1, 0.9],
            vec![0.1, 0.0, 0.9],
            vec![0.9, 0.9, 0.0],
        ])
        .unwrap();
        assert_eq!(m.neighbors_within(0, 0.15), vec![1]);
        assert!(m.neighbors_within(2, 0.15).is_empty());
        assert_eq!(m.get(1, 2), 0.9);
    }
}
