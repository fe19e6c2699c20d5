use serde::{Deserialize, Serialize};

/// Pool-type version supplied by the caller's pool configuration.
///
/// Version 1 pools were deployed against a math library without the
/// `y = 1, 2, 4` shortcuts in the power functions, so quoting them requires the
/// general `exp(y * ln(x))` path for every exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum PoolVersion {
    /// Version 1: always takes the general power path.
    Legacy,
    /// Any later version: exact shortcuts for exponents 1, 2 and 4.
    #[default]
    Current,
}

impl PoolVersion {
    pub const LEGACY_NUMBER: u32 = 1;
    pub const CURRENT_NUMBER: u32 = 2;

    pub fn as_u32(&self) -> u32 {
        match self {
            PoolVersion::Legacy => Self::LEGACY_NUMBER,
            PoolVersion::Current => Self::CURRENT_NUMBER,
        }
    }

    /// Whether the closed-form shortcuts for `y = 1, 2, 4` may be taken.
    pub fn has_pow_shortcuts(&self) -> bool {
        matches!(self, PoolVersion::Current)
    }
}

impl From<u32> for PoolVersion {
    fn from(version: u32) -> Self {
        if version == Self::LEGACY_NUMBER {
            PoolVersion::Legacy
        } else {
            PoolVersion::Current
        }
    }
}

impl From<PoolVersion> for u32 {
    fn from(version: PoolVersion) -> Self {
        version.as_u32()
    }
}
