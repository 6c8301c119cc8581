//! Core traits
//!
//! Candidate construction reads reconstruction output only through [`Bank`],
//! so the cut engine does not depend on any event-file decoder.

/// Row/column view of one reconstruction bank in one event
/// (e.g. `REC::Particle`, `REC::Calorimeter`).
///
/// Lookups return `None` for an unknown column or an out-of-range row, which
/// the candidate builder treats as a missing measurement.
pub trait Bank: Send + Sync {
    /// Number of rows in this event.
    fn rows(&self) -> usize;

    /// Floating-point value of `column` at `row`.
    fn float(&self, column: &str, row: usize) -> Option<f64>;

    /// Integer value of `column` at `row`.
    ///
    /// The default converts [`Bank::float`], rejecting non-integral values.
    fn int(&self, column: &str, row: usize) -> Option<i64> {
        let v = self.float(column, row)?;
        if v.is_finite() && v.fract() == 0.0 { Some(v as i64) } else { None }
    }

    /// Rows whose `pindex` equals `particle` and whose `detector` equals
    /// `detector`, in bank order.
    fn rows_for(&self, particle: usize, detector: i64) -> Vec<usize> {
        (0..self.rows())
            .filter(|&i| {
                self.int("pindex", i) == Some(particle as i64)
                    && self.int("detector", i) == Some(detector)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TwoRows;

    impl Bank for TwoRows {
        fn rows(&self) -> usize {
            2
        }

        fn float(&self, column: &str, row: usize) -> Option<f64> {
            match (column, row) {
                ("pindex", 0) => Some(0.0),
                ("pindex", 1) => Some(1.0),
                ("detector", 0 | 1) => Some(7.0),
                ("energy", 0) => Some(0.5),
                ("energy", 1) => Some(1.5),
                _ => None,
            }
        }
    }

    #[test]
    fn test_rows_for_filters_particle_and_detector() {
        let bank = TwoRows;
        assert_eq!(bank.rows_for(1, 7), vec![1]);
        assert!(bank.rows_for(1, 6).is_empty());
    }

    #[test]
    fn test_int_rejects_fractional() {
        let bank = TwoRows;
        assert_eq!(bank.int("pindex", 1), Some(1));
        assert_eq!(bank.int("energy", 0), None);
        assert_eq!(bank.int("missing", 0), None);
    }
}
