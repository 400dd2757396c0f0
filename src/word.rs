//! Path words and their closed-form solvers.
//!
//! Each solver maps the normalized geometry of an [`Intermediate`] to the
//! three normalized segment lengths of its word, or `None` when the word
//! cannot connect the two configurations. Intermediates that miss their
//! domain by no more than [`EPSILON`] are treated as rounding and clamped.

use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use log::trace;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParseWordError;
use crate::geometry::{mod2pi, Configuration, Intermediate, EPSILON};
use crate::path::DubinsPath;

/// Normalized (radius-scaled) lengths of the three segments.
pub type Params = [f64; 3];

/// Normalized separation above which no CCC word exists.
///
/// The outer circles sit one radius off each endpoint, so their centres are
/// at least `d - 2` apart, and a middle circle can only bridge centres up to
/// four radii apart.
pub const CCC_MAX_SEPARATION: f64 = 6.0;

/// Segment type for a Dubins path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SegmentType {
    Left,
    Straight,
    Right,
}

/// Dubins path word.
///
/// Declaration order is the tie-break order used by the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PathWord {
    LSL,
    LSR,
    RSL,
    RSR,
    RLR,
    LRL,
}

impl PathWord {
    /// All six words, in tie-break order.
    pub const ALL: [Self; 6] = [Self::LSL, Self::LSR, Self::RSL, Self::RSR, Self::RLR, Self::LRL];
    /// Curve-straight-curve words.
    pub const CSC: [Self; 4] = [Self::LSL, Self::LSR, Self::RSL, Self::RSR];
    /// Curve-curve-curve words.
    pub const CCC: [Self; 2] = [Self::RLR, Self::LRL];

    /// Segment kinds of this word, in travel order.
    pub const fn segments(self) -> [SegmentType; 3] {
        use SegmentType::{Left as L, Right as R, Straight as S};
        match self {
            Self::LSL => [L, S, L],
            Self::LSR => [L, S, R],
            Self::RSL => [R, S, L],
            Self::RSR => [R, S, R],
            Self::RLR => [R, L, R],
            Self::LRL => [L, R, L],
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LSL => "LSL",
            Self::LSR => "LSR",
            Self::RSL => "RSL",
            Self::RSR => "RSR",
            Self::RLR => "RLR",
            Self::LRL => "LRL",
        }
    }

    /// Runs this word's solver.
    pub fn solve(self, geometry: &Intermediate) -> Option<Candidate> {
        let params = match self {
            Self::LSL => dubins_lsl(geometry),
            Self::LSR => dubins_lsr(geometry),
            Self::RSL => dubins_rsl(geometry),
            Self::RSR => dubins_rsr(geometry),
            Self::RLR => dubins_rlr(geometry),
            Self::LRL => dubins_lrl(geometry),
        }?;

        if params.iter().all(|p| p.is_finite() && *p >= 0.0) {
            Some(Candidate { word: self, params })
        } else {
            trace!("{}: non-finite parameters {:?}", self, params);
            None
        }
    }
}

impl fmt::Display for PathWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PathWord {
    type Err = ParseWordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|word| word.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseWordError(s.to_string()))
    }
}

/// A solved word, not yet attached to a start configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub word: PathWord,
    pub params: Params,
}

impl Candidate {
    /// Sum of the normalized segment lengths.
    pub fn normalized_length(&self) -> f64 {
        self.params.iter().sum()
    }

    pub(crate) fn into_path(self, qi: Configuration, rho: f64) -> DubinsPath {
        DubinsPath {
            qi: Configuration::new(qi.x, qi.y, mod2pi(qi.theta)),
            params: self.params,
            rho,
            word: self.word,
        }
    }
}

// The constant terms of p_sq are grouped with c_ab so they cancel before d_sq
// is added; a straight run then yields p_sq == d_sq exactly.

pub fn dubins_lsl(g: &Intermediate) -> Option<Params> {
    let tmp0 = g.d + g.sa - g.sb;
    let p_sq = g.d_sq + 2.0 * (1.0 - g.c_ab) + 2.0 * g.d * (g.sa - g.sb);
    if p_sq < -EPSILON {
        trace!("LSL: negative p_sq {p_sq}");
        return None;
    }
    let tmp1 = (g.cb - g.ca).atan2(tmp0);
    Some([mod2pi(tmp1 - g.alpha), p_sq.max(0.0).sqrt(), mod2pi(g.beta - tmp1)])
}

pub fn dubins_rsr(g: &Intermediate) -> Option<Params> {
    let tmp0 = g.d - g.sa + g.sb;
    let p_sq = g.d_sq + 2.0 * (1.0 - g.c_ab) + 2.0 * g.d * (g.sb - g.sa);
    if p_sq < -EPSILON {
        trace!("RSR: negative p_sq {p_sq}");
        return None;
    }
    let tmp1 = (g.ca - g.cb).atan2(tmp0);
    Some([mod2pi(g.alpha - tmp1), p_sq.max(0.0).sqrt(), mod2pi(tmp1 - g.beta)])
}

pub fn dubins_lsr(g: &Intermediate) -> Option<Params> {
    let p_sq = g.d_sq - 2.0 * (1.0 - g.c_ab) + 2.0 * g.d * (g.sa + g.sb);
    if p_sq < -EPSILON {
        trace!("LSR: negative p_sq {p_sq}");
        return None;
    }
    let p = p_sq.max(0.0).sqrt();
    let tmp0 = (-g.ca - g.cb).atan2(g.d + g.sa + g.sb) - (-2.0f64).atan2(p);
    Some([mod2pi(tmp0 - g.alpha), p, mod2pi(tmp0 - g.beta)])
}

pub fn dubins_rsl(g: &Intermediate) -> Option<Params> {
    let p_sq = g.d_sq - 2.0 * (1.0 - g.c_ab) - 2.0 * g.d * (g.sa + g.sb);
    if p_sq < -EPSILON {
        trace!("RSL: negative p_sq {p_sq}");
        return None;
    }
    let p = p_sq.max(0.0).sqrt();
    let tmp0 = (g.ca + g.cb).atan2(g.d - g.sa - g.sb) - 2.0f64.atan2(p);
    Some([mod2pi(g.alpha - tmp0), p, mod2pi(g.beta - tmp0)])
}

pub fn dubins_rlr(g: &Intermediate) -> Option<Params> {
    if g.d > CCC_MAX_SEPARATION {
        trace!("RLR: separation {} out of range", g.d);
        return None;
    }
    let tmp0 = (6.0 - g.d_sq + 2.0 * g.c_ab + 2.0 * g.d * (g.sa - g.sb)) / 8.0;
    if tmp0.abs() > 1.0 + EPSILON {
        trace!("RLR: acos argument {tmp0} out of domain");
        return None;
    }
    let phi = (g.ca - g.cb).atan2(g.d - g.sa + g.sb);
    let p = mod2pi(TAU - tmp0.clamp(-1.0, 1.0).acos());
    let t = mod2pi(g.alpha - phi + mod2pi(p / 2.0));
    Some([t, p, mod2pi(g.alpha - g.beta - t + mod2pi(p))])
}

pub fn dubins_lrl(g: &Intermediate) -> Option<Params> {
    if g.d > CCC_MAX_SEPARATION {
        trace!("LRL: separation {} out of range", g.d);
        return None;
    }
    let tmp0 = (6.0 - g.d_sq + 2.0 * g.c_ab + 2.0 * g.d * (g.sb - g.sa)) / 8.0;
    if tmp0.abs() > 1.0 + EPSILON {
        trace!("LRL: acos argument {tmp0} out of domain");
        return None;
    }
    let phi = (g.ca - g.cb).atan2(g.d + g.sa - g.sb);
    let p = mod2pi(TAU - tmp0.clamp(-1.0, 1.0).acos());
    let t = mod2pi(-g.alpha - phi + p / 2.0);
    Some([t, p, mod2pi(g.beta - g.alpha - t + mod2pi(p))])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn straight(d: f64) -> Intermediate {
        Intermediate::from_normalized(d, 0.0, 0.0)
    }

    #[test]
    fn straight_line_csc_words_are_exact_for_fractional_separation() {
        for d in [0.1, 0.3, 0.7, 1e-3, 2.9] {
            let g = straight(d);
            assert_eq!(dubins_lsl(&g), Some([0.0, d, 0.0]), "d = {d}");
            assert_eq!(dubins_rsr(&g), Some([0.0, d, 0.0]), "d = {d}");
            assert_eq!(dubins_lsr(&g), Some([0.0, d, 0.0]), "d = {d}");
            assert_eq!(dubins_rsl(&g), Some([0.0, d, 0.0]), "d = {d}");
        }
    }

    #[test]
    fn straight_line_csc_words() {
        let g = straight(4.0);
        assert_eq!(dubins_lsl(&g), Some([0.0, 4.0, 0.0]));
        assert_eq!(dubins_rsr(&g), Some([0.0, 4.0, 0.0]));
    }

    #[test]
    fn ccc_rejects_large_separation() {
        let g = straight(10.0);
        assert_eq!(dubins_rlr(&g), None);
        assert_eq!(dubins_lrl(&g), None);
        assert!(PathWord::RLR.solve(&g).is_none());
    }

    #[test]
    fn reversed_heading_in_place_has_ccc_solution() {
        // same position, facing the other way
        let g = Intermediate::from_normalized(0.0, 0.0, PI);
        let lrl = dubins_lrl(&g).unwrap();
        assert!(lrl.iter().all(|p| p.is_finite() && *p >= 0.0));
        let rlr = dubins_rlr(&g).unwrap();
        assert!(rlr.iter().all(|p| p.is_finite() && *p >= 0.0));
    }

    #[test]
    fn lsr_needs_room_for_the_crossing_tangent() {
        // circles overlap: start turns left, goal turns right, too close
        let g = Intermediate::from_normalized(0.5, PI / 2.0, 3.0 * PI / 2.0);
        assert_eq!(dubins_lsr(&g), None);
    }

    #[test]
    fn antipodal_headings_at_zero_separation_stay_finite() {
        let g = Intermediate::from_normalized(0.0, 0.0, PI);
        for word in PathWord::ALL {
            if let Some(c) = word.solve(&g) {
                assert!(c.params.iter().all(|p| p.is_finite()), "{word}");
            }
        }
    }

    #[test]
    fn word_segments() {
        assert_eq!(
            PathWord::RLR.segments(),
            [SegmentType::Right, SegmentType::Left, SegmentType::Right]
        );
        assert_eq!(PathWord::LSR.segments()[1], SegmentType::Straight);
    }

    #[test]
    fn parse_and_display() {
        for word in PathWord::ALL {
            assert_eq!(word.to_string().parse::<PathWord>(), Ok(word));
        }
        assert_eq!(" rsl ".parse::<PathWord>(), Ok(PathWord::RSL));
        assert!("LLL".parse::<PathWord>().is_err());
    }

    #[test]
    fn candidate_length() {
        let c = Candidate {
            word: PathWord::LSL,
            params: [0.5, 1.0, 0.25],
        };
        assert_abs_diff_eq!(c.normalized_length(), 1.75);
    }
}
