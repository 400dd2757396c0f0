#![forbid(unsafe_code)]

//! Dubins path planning for vehicles with a bounded turning radius.
//!
//! A configuration is `(x, y, theta)`, with `theta` in radians measured
//! counter-clockwise from the x-axis. A Dubins path joins two configurations
//! with three segments (left arc, straight, right arc) drawn from one of six
//! words, for a vehicle moving forward at constant speed that cannot turn
//! tighter than `rho`.
//!
//! # Units
//! - Positions and lengths are in the caller's units.
//! - Segment parameters are normalized: real length divided by `rho`.
//! - Headings returned by sampling are wrapped into `[0, 2π)`.
//!
//! ```
//! use dubins::{shortest_path, Configuration};
//!
//! let q0 = Configuration::new(0.0, 0.0, 0.0);
//! let q1 = Configuration::new(4.0, 0.0, 0.0);
//! let path = shortest_path(q0, q1, 1.0).unwrap();
//! assert_eq!(path.length(), 4.0);
//! assert_eq!(path.endpoint().unwrap(), q1);
//! ```

pub mod error;
pub mod geometry;
pub mod path;
pub mod sample;
pub mod word;

pub use error::{DubinsError, ParseWordError, Result, DUBINS_OK};
pub use geometry::{angle_diff, mod2pi, Configuration, Intermediate, EPSILON};
pub use path::{
    all_paths, path_for_word, path_length, path_word, segment_length, segment_length_normalized,
    shortest_path, shortest_path_in, DubinsPath,
};
pub use sample::{
    endpoint, extract_remainder, extract_subpath, propagate_segment, sample, sample_many,
};
pub use word::{Candidate, Params, PathWord, SegmentType, CCC_MAX_SEPARATION};
