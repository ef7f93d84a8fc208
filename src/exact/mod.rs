//! Exact solvers with a tractability ceiling.
//!
//! - [`BruteForce`] — permutation enumeration, O(n!)
//! - [`HeldKarp`] — bitmask dynamic programming (Held & Karp, 1962), O(2ⁿ·n²)
//!
//! Both refuse inputs above their configured city count with
//! [`SolveError::TooManyCities`](crate::error::SolveError::TooManyCities)
//! instead of running unbounded.

mod brute_force;
mod held_karp;

pub use brute_force::{BruteForce, BRUTE_FORCE_MAX_CITIES};
pub use held_karp::{HeldKarp, HELD_KARP_MAX_CITIES};
