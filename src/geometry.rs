//! Configurations and the relative geometry shared by every word solver.

use std::f64::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{DubinsError, Result};

/// Floating tolerance used by degeneracy guards.
pub const EPSILON: f64 = 1e-10;

/// A pose in the plane: position plus heading.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Configuration {
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
    /// Heading in radians, counter-clockwise from the x-axis.
    pub theta: f64,
}

impl Configuration {
    pub const fn new(x: f64, y: f64, theta: f64) -> Self {
        Self { x, y, theta }
    }

    /// Euclidean distance between the two positions, ignoring heading.
    pub fn distance(&self, other: &Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.theta.is_finite()
    }
}

impl From<[f64; 3]> for Configuration {
    fn from(q: [f64; 3]) -> Self {
        Self::new(q[0], q[1], q[2])
    }
}

impl From<Configuration> for [f64; 3] {
    fn from(q: Configuration) -> Self {
        [q.x, q.y, q.theta]
    }
}

/// Wraps an angle into `[0, 2π)`.
pub fn mod2pi(theta: f64) -> f64 {
    let wrapped = theta.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Shortest signed difference `a - b`, in `(-π, π]`.
pub fn angle_diff(a: f64, b: f64) -> f64 {
    let d = mod2pi(a - b);
    if d > std::f64::consts::PI {
        d - TAU
    } else {
        d
    }
}

/// Relative geometry of a start/goal pair, normalized by the turning radius.
///
/// `d`, `alpha` and `beta` fully determine all six words. The sines and
/// cosines every solver needs are computed once here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intermediate {
    /// Normalized separation, `|q1 - q0| / rho`.
    pub d: f64,
    /// Start heading relative to the baseline, in `[0, 2π)`.
    pub alpha: f64,
    /// Goal heading relative to the baseline, in `[0, 2π)`.
    pub beta: f64,
    pub(crate) sa: f64,
    pub(crate) sb: f64,
    pub(crate) ca: f64,
    pub(crate) cb: f64,
    pub(crate) c_ab: f64,
    pub(crate) d_sq: f64,
}

impl Intermediate {
    /// Computes the normalized inputs, rejecting a non-positive radius first.
    pub fn new(q0: Configuration, q1: Configuration, rho: f64) -> Result<Self> {
        if !(rho > 0.0) || !rho.is_finite() {
            return Err(DubinsError::BadRho);
        }
        if !q0.is_finite() || !q1.is_finite() {
            return Err(DubinsError::NoPath);
        }

        let dx = q1.x - q0.x;
        let dy = q1.y - q0.y;
        let d = dx.hypot(dy) / rho;

        // atan2(0, 0) is 0, so coincident positions fall back to the x-axis
        let theta = mod2pi(dy.atan2(dx));
        let alpha = mod2pi(q0.theta - theta);
        let beta = mod2pi(q1.theta - theta);

        Ok(Self::from_normalized(d, alpha, beta))
    }

    /// Builds the intermediate directly from normalized values.
    pub fn from_normalized(d: f64, alpha: f64, beta: f64) -> Self {
        let (sa, ca) = alpha.sin_cos();
        let (sb, cb) = beta.sin_cos();
        Self {
            d,
            alpha,
            beta,
            sa,
            sb,
            ca,
            cb,
            c_ab: (alpha - beta).cos(),
            d_sq: d * d,
        }
    }
}
