//! 18 decimal fixed point arithmetic for weighted pool math.
//!
//! `MathSol` carries the rounding-aware WAD helpers (mul/div up and down, pow with error bounds, complement), and
//! `LogExpMath` the natural exponent and logarithm they are built on. Every fallible operation returns
//! [`MathError`], whose codes match the on-chain `BAL#` numbering.

pub mod error;
pub mod math;
pub mod version;

pub use error::{MathError, Result};
pub use math::fixedpoint::{MathSol, RAY, WAD};
pub use math::i256::I256;
pub use math::logexpmath::{
    LogExpMath, MAX_NATURAL_EXPONENT, MILD_EXPONENT_BOUND, MIN_NATURAL_EXPONENT, ONE_18, ONE_20, ONE_36,
};
pub use math::math::Math;
pub use version::PoolVersion;
