use thiserror::Error;

/// Errors raised by the fixed point and log/exp routines.
///
/// The numeric codes follow the on-chain library's error numbering so a failed
/// off-chain quote can be matched against the revert the contract would emit.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathError {
    #[error("BAL#000 ADD_OVERFLOW")]
    AddOverflow,
    #[error("BAL#001 SUB_OVERFLOW")]
    SubOverflow,
    #[error("BAL#003 MUL_OVERFLOW")]
    MulOverflow,
    #[error("BAL#004 ZERO_DIVISION")]
    ZeroDivision,
    #[error("BAL#005 DIV_INTERNAL")]
    DivInternal,
    #[error("BAL#006 X_OUT_OF_BOUNDS")]
    XOutOfBounds,
    #[error("BAL#007 Y_OUT_OF_BOUNDS")]
    YOutOfBounds,
    #[error("BAL#008 PRODUCT_OUT_OF_BOUNDS")]
    ProductOutOfBounds,
    #[error("BAL#009 INVALID_EXPONENT")]
    InvalidExponent,
    #[error("BAL#100 OUT_OF_BOUNDS")]
    OutOfBounds,
}

impl MathError {
    /// Numeric error code, as reported by the on-chain library.
    pub fn code(&self) -> u32 {
        match self {
            MathError::AddOverflow => 0,
            MathError::SubOverflow => 1,
            MathError::MulOverflow => 3,
            MathError::ZeroDivision => 4,
            MathError::DivInternal => 5,
            MathError::XOutOfBounds => 6,
            MathError::YOutOfBounds => 7,
            MathError::ProductOutOfBounds => 8,
            MathError::InvalidExponent => 9,
            MathError::OutOfBounds => 100,
        }
    }
}

pub type Result<T, E = MathError> = std::result::Result<T, E>;

/// Returns early with `$err` unless `$cond` holds.
macro_rules! require {
    ($cond:expr, $err:expr $(,)?) => {
        if !($cond) {
            return Err($err);
        }
    };
}

pub(crate) use require;
