// Restricted Damerau-Levenshtein (optimal string alignment) distance

/// Edit distance calculator with reusable row buffers.
///
/// Counts insertions, deletions, substitutions and transpositions of two
/// adjacent characters, each at cost 1. One instance is meant to be reused
/// across many comparisons so the rows are allocated once.
#[derive(Debug, Default)]
pub struct EditDistance {
    prev2: Vec<usize>,
    prev: Vec<usize>,
    cur: Vec<usize>,
}

impl EditDistance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distance between `a` and `b` if it is at most `max`, else `None`.
    ///
    /// Returns early when the length difference alone exceeds `max` or when
    /// every cell of a row is already over budget.
    pub fn distance_within(&mut self, a: &[char], b: &[char], max: usize) -> Option<usize> {
        if a.len().abs_diff(b.len()) > max {
            return None;
        }
        if a.is_empty() || b.is_empty() {
            return Some(a.len().max(b.len()));
        }

        let width = b.len() + 1;
        for row in [&mut self.prev2, &mut self.prev, &mut self.cur] {
            row.clear();
            row.resize(width, 0);
        }
        for (j, cell) in self.prev.iter_mut().enumerate() {
            *cell = j;
        }

        for i in 1..=a.len() {
            self.cur[0] = i;
            let mut row_min = i;
            for j in 1..=b.len() {
                let cost = usize::from(a[i - 1] != b[j - 1]);
                let mut value = (self.prev[j] + 1)
                    .min(self.cur[j - 1] + 1)
                    .min(self.prev[j - 1] + cost);
                if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                    value = value.min(self.prev2[j - 2] + 1);
                }
                self.cur[j] = value;
                row_min = row_min.min(value);
            }
            if row_min > max {
                return None;
            }
            std::mem::swap(&mut self.prev2, &mut self.prev);
            std::mem::swap(&mut self.prev, &mut self.cur);
        }

        let d = self.prev[b.len()];
        (d <= max).then_some(d)
    }

    /// Unbounded distance.
    pub fn distance(&mut self, a: &[char], b: &[char]) -> usize {
        self.distance_within(a, b, usize::MAX).unwrap_or(usize::MAX)
    }
}

/// Convenience wrapper over [`EditDistance::distance`] for string slices.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    EditDistance::new().distance(&a, &b)
}
