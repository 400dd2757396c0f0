//! Arc-length sampling and sub-path extraction.
//!
//! A path is walked segment by segment from a frame anchored at the origin
//! with the start heading, in normalized units, then scaled by `rho` and
//! translated back onto the start position.

use crate::error::{DubinsError, Result};
use crate::geometry::{mod2pi, Configuration};
use crate::path::DubinsPath;
use crate::word::SegmentType;

impl DubinsPath {
    /// Configuration at arc-length `t`, for `0 <= t <= length()`.
    ///
    /// A `t` exactly on a breakpoint is evaluated at the end of the earlier
    /// segment. Returned headings are wrapped into `[0, 2π)`.
    pub fn sample(&self, t: f64) -> Result<Configuration> {
        self.check_param(t)?;
        Ok(self.walk(t / self.rho))
    }

    /// Walks the path at a fixed interval, reporting each sample to `callback`.
    ///
    /// Samples `t = 0, step, 2 * step, ...` while `t < length()`, then the
    /// exact endpoint. A non-zero callback result stops the walk and is
    /// returned as is; otherwise the result is `0`. The walk makes
    /// `length() / step` calls before the endpoint, so the caller bounds the
    /// work through `step`. A step that is not positive and finite, or so
    /// small that the call count does not fit in a `u64`, only reports the
    /// endpoint.
    pub fn sample_many<F>(&self, step: f64, mut callback: F) -> i32
    where
        F: FnMut(Configuration, f64) -> i32,
    {
        let length = self.length();

        if step > 0.0 && step.is_finite() && length / step < u64::MAX as f64 {
            let mut k = 0u64;
            loop {
                let t = k as f64 * step;
                if t >= length {
                    break;
                }
                let code = callback(self.walk(t / self.rho), t);
                if code != 0 {
                    return code;
                }
                k += 1;
            }
        }

        callback(self.walk(length / self.rho), length)
    }

    /// Every sample [`sample_many`](Self::sample_many) would report, with its distance.
    pub fn sample_points(&self, step: f64) -> Vec<(Configuration, f64)> {
        let mut points = Vec::new();
        self.sample_many(step, |q, t| {
            points.push((q, t));
            0
        });
        points
    }

    /// Final configuration of the path.
    pub fn endpoint(&self) -> Result<Configuration> {
        self.sample(self.length())
    }

    /// The leading part of the path, covering `[0, t]`.
    ///
    /// The start, radius and word are kept; segment lengths are clipped from
    /// the left so the result ends at `sample(t)`.
    pub fn extract_subpath(&self, t: f64) -> Result<Self> {
        self.check_param(t)?;

        let tprime = t / self.rho;
        let p0 = self.params[0].min(tprime);
        let p1 = self.params[1].min(tprime - p0);
        let p2 = self.params[2].min(tprime - p0 - p1).max(0.0);

        Ok(Self {
            params: [p0, p1, p2],
            ..*self
        })
    }

    /// The trailing part of the path, from `t` to the original endpoint.
    ///
    /// Starts at `sample(t)`. Segments before the one containing `t` become
    /// zero, that segment is trimmed and later ones are kept. A `t` on a
    /// breakpoint trims into the later segment.
    pub fn extract_remainder(&self, t: f64) -> Result<Self> {
        let qi = self.sample(t)?;

        let tprime = t / self.rho;
        let [p0, p1, p2] = self.params;
        let params = if tprime < p0 {
            [p0 - tprime, p1, p2]
        } else if tprime < p0 + p1 {
            [0.0, p1 - (tprime - p0), p2]
        } else {
            [0.0, 0.0, (p2 - (tprime - p0 - p1)).max(0.0)]
        };

        Ok(Self { qi, params, ..*self })
    }

    fn check_param(&self, t: f64) -> Result<()> {
        if t.is_finite() && (0.0..=self.length()).contains(&t) {
            Ok(())
        } else {
            Err(DubinsError::BadParam)
        }
    }

    /// Accumulates segments left to right up to normalized distance `tprime`.
    fn walk(&self, tprime: f64) -> Configuration {
        let kinds = self.word.segments();
        let mut q = Configuration::new(0.0, 0.0, self.qi.theta);
        let mut remaining = tprime;

        for (i, (kind, length)) in kinds.into_iter().zip(self.params).enumerate() {
            // the last segment absorbs any rounding overshoot
            let step = if i == 2 { remaining } else { remaining.min(length) };
            q = propagate_segment(q, kind, step);
            remaining -= step;
            if remaining <= 0.0 {
                break;
            }
        }

        Configuration::new(
            q.x * self.rho + self.qi.x,
            q.y * self.rho + self.qi.y,
            mod2pi(q.theta),
        )
    }
}

/// Advances `q` by normalized distance `t` along one segment of unit radius.
pub fn propagate_segment(q: Configuration, kind: SegmentType, t: f64) -> Configuration {
    let (st, ct) = q.theta.sin_cos();
    match kind {
        SegmentType::Straight => Configuration::new(q.x + ct * t, q.y + st * t, q.theta),
        SegmentType::Left => {
            let heading = q.theta + t;
            Configuration::new(q.x + heading.sin() - st, q.y - heading.cos() + ct, heading)
        }
        SegmentType::Right => {
            let heading = q.theta - t;
            Configuration::new(q.x - heading.sin() + st, q.y + heading.cos() - ct, heading)
        }
    }
}

pub fn sample(path: &DubinsPath, t: f64) -> Result<Configuration> {
    path.sample(t)
}

pub fn sample_many<F>(path: &DubinsPath, step: f64, callback: F) -> i32
where
    F: FnMut(Configuration, f64) -> i32,
{
    path.sample_many(step, callback)
}

pub fn endpoint(path: &DubinsPath) -> Result<Configuration> {
    path.endpoint()
}

pub fn extract_subpath(path: &DubinsPath, t: f64) -> Result<DubinsPath> {
    path.extract_subpath(t)
}

pub fn extract_remainder(path: &DubinsPath, t: f64) -> Result<DubinsPath> {
    path.extract_remainder(t)
}
