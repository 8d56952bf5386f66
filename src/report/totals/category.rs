// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.
use rayon::prelude::*;
use serde::Serialize;
use std::ops::Add;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct Totals {
    pub(crate) distinct: usize,
    pub(crate) observations: usize,
    pub(crate) duplicates: usize,
    pub(crate) duplicate_observations: usize,
}

impl Totals {
    /// Totals over the aggregated counts of each identity in a category.
    pub(crate) fn calculate(counts: &[usize]) -> Self {
        counts
            .par_iter()
            .fold(Totals::default, |mut totals, &count| {
                totals.distinct += 1;
                totals.observations += count;
                if count >= 2 {
                    totals.duplicates += 1;
                    totals.duplicate_observations += count;
                }
                totals
            })
            .reduce(Totals::default, |a, b| a + b)
    }
}

impl Add for Totals {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            distinct: self.distinct + other.distinct,
            observations: self.observations + other.observations,
            duplicates: self.duplicates + other.duplicates,
            duplicate_observations: self.duplicate_observations + other.duplicate_observations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate() {
        let totals = Totals::calculate(&[1, 2, 5, 1]);
        assert_eq!(
            totals,
            Totals {
                distinct: 4,
                observations: 9,
                duplicates: 2,
                duplicate_observations: 7,
            }
        );
    }

    #[test]
    fn test_calculate_empty() {
        assert_eq!(Totals::calculate(&[]), Totals::default());
    }
}
