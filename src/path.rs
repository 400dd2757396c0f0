//! Path records and the word selector.

use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{DubinsError, Result};
use crate::geometry::{Configuration, Intermediate};
use crate::word::{Candidate, Params, PathWord};

/// A solved Dubins path.
///
/// Immutable once built; every derived path is a fresh value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DubinsPath {
    /// Start configuration, heading wrapped into `[0, 2π)`.
    pub(crate) qi: Configuration,
    /// Normalized segment lengths, in word order.
    pub(crate) params: Params,
    /// Turning radius (forward velocity / angular velocity).
    pub(crate) rho: f64,
    pub(crate) word: PathWord,
}

impl DubinsPath {
    /// Shortest path over all six words. See [`shortest_path`].
    pub fn shortest(q0: Configuration, q1: Configuration, rho: f64) -> Result<Self> {
        shortest_path(q0, q1, rho)
    }

    /// Path restricted to one word. See [`path_for_word`].
    pub fn with_word(q0: Configuration, q1: Configuration, rho: f64, word: PathWord) -> Result<Self> {
        path_for_word(q0, q1, rho, word)
    }

    pub fn qi(&self) -> Configuration {
        self.qi
    }

    pub fn rho(&self) -> f64 {
        self.rho
    }

    pub fn params(&self) -> Params {
        self.params
    }

    pub fn word(&self) -> PathWord {
        self.word
    }

    /// Total length in real units.
    pub fn length(&self) -> f64 {
        (self.params[0] + self.params[1] + self.params[2]) * self.rho
    }

    /// Length of segment `i` in real units, or `+inf` for `i` outside `0..=2`.
    pub fn segment_length(&self, i: isize) -> f64 {
        self.segment_length_normalized(i) * self.rho
    }

    /// Normalized length of segment `i`, or `+inf` for `i` outside `0..=2`.
    pub fn segment_length_normalized(&self, i: isize) -> f64 {
        usize::try_from(i)
            .ok()
            .and_then(|i| self.params.get(i).copied())
            .unwrap_or(f64::INFINITY)
    }
}

/// Computes the shortest Dubins path between two configurations.
///
/// Ties go to the first word in [`PathWord::ALL`] order.
pub fn shortest_path(q0: Configuration, q1: Configuration, rho: f64) -> Result<DubinsPath> {
    shortest_path_in(q0, q1, rho, &PathWord::ALL)
}

/// Shortest path among `words`, first minimal word winning ties.
pub fn shortest_path_in(
    q0: Configuration,
    q1: Configuration,
    rho: f64,
    words: &[PathWord],
) -> Result<DubinsPath> {
    let geometry = Intermediate::new(q0, q1, rho)?;

    let mut best: Option<(Candidate, f64)> = None;
    for candidate in words.iter().filter_map(|word| word.solve(&geometry)) {
        let cost = candidate.normalized_length();
        if best.map_or(true, |(_, best_cost)| cost < best_cost) {
            best = Some((candidate, cost));
        }
    }

    match best {
        Some((candidate, cost)) => {
            debug!("selected {} with normalized length {cost}", candidate.word);
            Ok(candidate.into_path(q0, rho))
        }
        None => {
            debug!("no word in {words:?} connects {q0:?} to {q1:?}");
            Err(DubinsError::NoPath)
        }
    }
}

/// Computes the path for one specific word.
pub fn path_for_word(
    q0: Configuration,
    q1: Configuration,
    rho: f64,
    word: PathWord,
) -> Result<DubinsPath> {
    let geometry = Intermediate::new(q0, q1, rho)?;
    word.solve(&geometry)
        .map(|candidate| candidate.into_path(q0, rho))
        .ok_or(DubinsError::NoPath)
}

/// Computes every feasible Dubins path, in [`PathWord::ALL`] order.
pub fn all_paths(q0: Configuration, q1: Configuration, rho: f64) -> Result<Vec<DubinsPath>> {
    let geometry = Intermediate::new(q0, q1, rho)?;

    let paths: Vec<_> = PathWord::ALL
        .iter()
        .filter_map(|word| word.solve(&geometry))
        .map(|candidate| candidate.into_path(q0, rho))
        .collect();

    if paths.is_empty() {
        return Err(DubinsError::NoPath);
    }
    Ok(paths)
}

pub fn path_length(path: &DubinsPath) -> f64 {
    path.length()
}

pub fn segment_length(path: &DubinsPath, i: isize) -> f64 {
    path.segment_length(i)
}

pub fn segment_length_normalized(path: &DubinsPath, i: isize) -> f64 {
    path.segment_length_normalized(i)
}

pub fn path_word(path: &DubinsPath) -> PathWord {
    path.word
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::geometry::mod2pi;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    fn origin() -> Configuration {
        Configuration::new(0.0, 0.0, 0.0)
    }

    #[test]
    fn straight_line_path() {
        let end = Configuration::new(4.0, 0.0, 0.0);
        let path = shortest_path(origin(), end, 1.0).unwrap();
        assert_eq!(path.word(), PathWord::LSL);
        assert_eq!(path.length(), 4.0);
        assert_eq!(path.params(), [0.0, 4.0, 0.0]);
        assert_eq!(path.qi(), origin());
    }

    #[test]
    fn straight_line_length_is_exact_for_fractional_separation() {
        for d in [0.1, 0.3, 0.7, 1e-3, 2.5, 13.37] {
            let end = Configuration::new(d, 0.0, 0.0);
            let path = shortest_path(origin(), end, 1.0).unwrap();
            assert!(
                matches!(path.word(), PathWord::LSL | PathWord::RSR),
                "d = {d}: {}",
                path.word()
            );
            assert_eq!(path.length(), d);
        }
    }

    #[test]
    fn start_heading_is_wrapped() {
        let end = Configuration::new(5.0, 3.0, 1.0);
        for theta in [-FRAC_PI_2, 7.0, TAU] {
            let start = Configuration::new(1.0, 2.0, theta);
            let path = shortest_path(start, end, 1.0).unwrap();
            let qi = path.qi();
            assert_eq!((qi.x, qi.y), (1.0, 2.0));
            assert!((0.0..TAU).contains(&qi.theta));
            assert_relative_eq!(qi.theta, mod2pi(theta));
            assert_eq!(path.sample(0.0), Ok(qi));
        }
    }

    #[test]
    fn rho_scales_lengths() {
        let end = Configuration::new(10.0, 0.0, 0.0);
        let path = path_for_word(origin(), end, 2.5, PathWord::LSL).unwrap();
        assert_relative_eq!(path.segment_length_normalized(1), 4.0);
        assert_relative_eq!(path.segment_length(1), 10.0);
        assert_relative_eq!(path.length(), 10.0);
    }

    #[test]
    fn bad_rho_for_every_solver() {
        let end = Configuration::new(1.0, 0.0, 0.0);
        for rho in [0.0, -1.0] {
            assert_eq!(shortest_path(origin(), end, rho), Err(DubinsError::BadRho));
            assert_eq!(all_paths(origin(), end, rho), Err(DubinsError::BadRho));
            for word in PathWord::ALL {
                assert_eq!(path_for_word(origin(), end, rho, word), Err(DubinsError::BadRho));
            }
        }
    }

    #[test]
    fn rlr_unreachable_when_far() {
        let end = Configuration::new(10.0, 0.0, 0.0);
        assert_eq!(
            path_for_word(origin(), end, 1.0, PathWord::RLR),
            Err(DubinsError::NoPath)
        );
    }

    #[test]
    fn shortest_is_minimum_of_all() {
        let end = Configuration::new(3.0, 2.0, PI);
        let best = shortest_path(origin(), end, 1.5).unwrap();
        let all = all_paths(origin(), end, 1.5).unwrap();
        assert!(all.iter().all(|p| best.length() <= p.length()));
        assert!(all.iter().any(|p| p == &best));
    }

    #[test]
    fn restricted_selection() {
        let end = Configuration::new(0.5, 0.0, PI);
        let csc = shortest_path_in(origin(), end, 1.0, &PathWord::CSC).unwrap();
        assert!(PathWord::CSC.contains(&csc.word()));
        assert_eq!(
            shortest_path_in(origin(), end, 1.0, &[]),
            Err(DubinsError::NoPath)
        );
    }

    #[test]
    fn tight_turn_prefers_ccc() {
        // goal just beside the start, facing back: a CCC word is shortest
        let end = Configuration::new(0.0, 0.5, PI);
        let path = shortest_path(origin(), end, 1.0).unwrap();
        assert!(PathWord::CCC.contains(&path.word()), "{}", path.word());
    }

    #[test]
    fn segment_sentinels() {
        let end = Configuration::new(4.0, 0.0, 0.0);
        let path = path_for_word(origin(), end, 1.0, PathWord::LSL).unwrap();
        assert_eq!(segment_length(&path, -1), f64::INFINITY);
        assert_eq!(segment_length(&path, 0), 0.0);
        assert_eq!(segment_length(&path, 1), 4.0);
        assert_eq!(segment_length(&path, 2), 0.0);
        assert_eq!(segment_length(&path, 3), f64::INFINITY);
        assert_eq!(segment_length_normalized(&path, -1), f64::INFINITY);
        assert_eq!(segment_length_normalized(&path, 3), f64::INFINITY);
        assert_eq!(path_word(&path), PathWord::LSL);
    }

    #[test]
    fn length_is_sum_of_segments() {
        let end = Configuration::new(-2.0, 7.0, FRAC_PI_2);
        for path in all_paths(origin(), end, 1.3).unwrap() {
            let sum: f64 = (0..3).map(|i| path.segment_length(i)).sum();
            assert_relative_eq!(path_length(&path), sum, max_relative = 1e-12);
        }
    }
}
