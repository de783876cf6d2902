use crate::ConfigSet;

/// A two-dimensional bitset: rows are creative indices, columns are
/// configuration indices. Each row is a [`ConfigSet`]; rows beyond the
/// stored count read from `default_row`, the same tail-default trick
/// `ConfigSet` uses for columns, applied one dimension up.
///
/// Built by `CreativeFilter` (one matrix per distinct impression format)
/// and consumed by `FilterState::creatives`, which narrows it against the
/// surviving config set for that impression.
#[derive(Debug, Clone)]
pub struct CreativeMatrix {
    rows: Vec<ConfigSet>,
    default_row: ConfigSet,
}

impl Default for CreativeMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl CreativeMatrix {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            default_row: ConfigSet::new(),
        }
    }

    /// A matrix with no explicit rows yet, whose every row (including
    /// unseen ones) starts out equal to `default_row` — used to seed a
    /// fresh impression's matrix with "every currently-eligible config is
    /// assumed biddable until a filter narrows it".
    pub fn with_default_row(default_row: ConfigSet) -> Self {
        Self {
            rows: Vec::new(),
            default_row,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    fn expand_rows(&mut self, rows: usize) {
        while self.rows.len() < rows {
            self.rows.push(self.default_row.clone());
        }
    }

    pub fn row(&self, creative: usize) -> &ConfigSet {
        if creative < self.rows.len() {
            &self.rows[creative]
        } else {
            &self.default_row
        }
    }

    pub fn set(&mut self, creative: usize, config: usize) {
        self.expand_rows(creative + 1);
        self.rows[creative].set(config);
    }

    pub fn reset(&mut self, creative: usize, config: usize) {
        self.expand_rows(creative + 1);
        self.rows[creative].reset(config);
    }

    pub fn test(&self, creative: usize, config: usize) -> bool {
        self.row(creative).test(config)
    }

    pub fn is_empty(&self) -> bool {
        self.default_row.is_empty() && self.rows.iter().all(ConfigSet::is_empty)
    }

    fn combine_assign(
        &mut self,
        other: &CreativeMatrix,
        op: impl Fn(&mut ConfigSet, &ConfigSet) + Copy,
    ) {
        self.expand_rows(other.rows.len());
        for (i, row) in self.rows.iter_mut().enumerate() {
            op(row, other.row(i));
        }
        op(&mut self.default_row, &other.default_row);
    }

    pub fn and(&mut self, other: &CreativeMatrix) -> &mut Self {
        self.combine_assign(other, |a, b| {
            a.and(b);
        });
        self
    }

    pub fn or(&mut self, other: &CreativeMatrix) -> &mut Self {
        self.combine_assign(other, |a, b| {
            a.or(b);
        });
        self
    }

    pub fn negate(&mut self) -> &mut Self {
        for row in &mut self.rows {
            row.negate();
        }
        self.default_row.negate();
        self
    }

    /// ANDs every row, including the default row, by `mask` — the
    /// column-wise counterpart to [`and`](Self::and)'s row-wise combine.
    /// Used to restrict a matrix to a set of still-eligible configs
    /// without touching which creative ids it tracks per row.
    pub fn and_columns(&mut self, mask: &ConfigSet) {
        for row in &mut self.rows {
            row.and(mask);
        }
        self.default_row.and(mask);
    }

    /// Unions every row (and the default row) into a single `ConfigSet`:
    /// the set of configs for which *some* creative survives.
    pub fn aggregate(&self) -> ConfigSet {
        let mut out = self.default_row.clone();
        for row in &self.rows {
            out.or(row);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_set_and_test() {
        let mut m = CreativeMatrix::new();
        m.set(0, 5);
        m.set(2, 5);
        assert!(m.test(0, 5));
        assert!(!m.test(1, 5));
        assert!(m.test(2, 5));
        assert!(!m.test(0, 6));
    }

    #[test]
    fn unseen_rows_fall_back_to_default() {
        let mut m = CreativeMatrix::new();
        m.set(0, 1);
        assert!(!m.test(50, 1));

        let mut all_row = CreativeMatrix::new();
        all_row.default_row.set(1);
        assert!(all_row.test(50, 1));
    }

    #[test]
    fn aggregate_unions_rows_and_default() {
        let mut m = CreativeMatrix::new();
        m.set(0, 1);
        m.set(1, 9);
        let agg = m.aggregate();
        assert!(agg.test(1));
        assert!(agg.test(9));
        assert!(!agg.test(2));
    }

    #[test]
    fn and_narrows_by_other_matrix() {
        let mut a = CreativeMatrix::new();
        a.set(0, 1);
        a.set(0, 2);
        let mut b = CreativeMatrix::new();
        b.set(0, 1);

        a.and(&b);
        assert!(a.test(0, 1));
        assert!(!a.test(0, 2));
    }
}
