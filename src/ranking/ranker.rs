//! Standard competition ranking over direction-normalized values.

use std::cmp::Ordering;

/// Assigns ranks to scalar values, larger first.
///
/// Values within `epsilon` of each other are equal on the primary key and
/// are passed to the tie-break comparator. Entries that remain tied share a
/// rank, and the next entry resumes at `shared_rank + tied_count`
/// (1, 1, 3 rather than 1, 1, 2). Entries that are fully tied keep their input
/// order, so callers get deterministic output by passing a deterministic
/// input order.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use u_standings::ranking::Ranker;
///
/// let totals = [9.0, 12.0, 9.0, 4.0];
/// let ranks = Ranker::new().rank(&totals, |v| *v, |_, _| Ordering::Equal);
/// assert_eq!(ranks, vec![2, 1, 2, 4]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranker {
    epsilon: f64,
}

impl Ranker {
    pub fn new() -> Self {
        Self { epsilon: 1e-9 }
    }

    /// Sets the tolerance under which two values count as equal.
    pub fn with_epsilon(mut self, eps: f64) -> Self {
        self.epsilon = eps;
        self
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Orders items best first and groups values within `epsilon` of their
    /// neighbor into one cluster. Returns `(index, cluster)` pairs.
    ///
    /// Clustering happens on the exact descending order so the final sort
    /// key (cluster, tie-break, index) stays a total order.
    fn ordered<T, V, B>(&self, items: &[T], value: &V, tie_break: &B) -> Vec<(usize, usize)>
    where
        V: Fn(&T) -> f64,
        B: Fn(&T, &T) -> Ordering,
    {
        let mut indices: Vec<usize> = (0..items.len()).collect();
        indices.sort_by(|&a, &b| {
            value(&items[b])
                .total_cmp(&value(&items[a]))
                .then(a.cmp(&b))
        });

        let mut clusters = vec![0usize; items.len()];
        let mut cluster = 0usize;
        for pos in 1..indices.len() {
            let prev = value(&items[indices[pos - 1]]);
            let cur = value(&items[indices[pos]]);
            if prev - cur > self.epsilon {
                cluster += 1;
            }
            clusters[indices[pos]] = cluster;
        }

        indices.sort_by(|&a, &b| {
            clusters[a]
                .cmp(&clusters[b])
                .then_with(|| tie_break(&items[a], &items[b]))
                .then(a.cmp(&b))
        });
        indices.into_iter().map(|i| (i, clusters[i])).collect()
    }

    /// Returns indices into `items`, best first.
    pub fn sort_indices<T, V, B>(&self, items: &[T], value: V, tie_break: B) -> Vec<usize>
    where
        V: Fn(&T) -> f64,
        B: Fn(&T, &T) -> Ordering,
    {
        self.ordered(items, &value, &tie_break)
            .into_iter()
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Returns the 1-based rank of every item, aligned with `items`.
    pub fn rank<T, V, B>(&self, items: &[T], value: V, tie_break: B) -> Vec<u32>
    where
        V: Fn(&T) -> f64,
        B: Fn(&T, &T) -> Ordering,
    {
        let order = self.ordered(items, &value, &tie_break);
        let mut ranks = vec![0u32; items.len()];

        let mut current_rank = 0u32;
        for (pos, &(idx, cluster)) in order.iter().enumerate() {
            let shares_previous = pos > 0 && {
                let (prev_idx, prev_cluster) = order[pos - 1];
                prev_cluster == cluster
                    && tie_break(&items[prev_idx], &items[idx]) == Ordering::Equal
            };
            if !shares_previous {
                current_rank = pos as u32 + 1;
            }
            ranks[idx] = current_rank;
        }
        ranks
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new()
    }
}
