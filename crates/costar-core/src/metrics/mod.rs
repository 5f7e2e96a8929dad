//! Separation metrics and rankings.
//!
//! - [`separation`]: depth-weighted sums and average separation over a
//!   shortest-path tree.
//! - [`rank`]: degree ranking, finite-separation ranking, and the
//!   all-vertices [`rank::SeparationIndex`] behind "best centers".

pub mod rank;
pub mod separation;

pub use rank::{SeparationIndex, rank_by_degree, rank_by_finite_separation};
pub use separation::{average_separation, depth_sum};
