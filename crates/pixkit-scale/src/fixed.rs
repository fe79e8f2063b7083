//! Fixed-point arithmetic for the sampler
//!
//! Channel values are blended as `near * w_near + far * w_far` where the two
//! weights sum to exactly `2^P`, then normalized with a rounding right shift.
//! The integer type holding that sum is the layout's *work* integer: 16 bits
//! for layouts of at most 6 bits per channel, 32 bits for 8-bit channels.
//!
//! The precision budget is `(max_channel << P) + 2^(P-1) <= work::MAX`; it is
//! checked at compile time for every precision/work pairing in use.

use std::ops::{Add, Mul, Shr};

/// Fractional precision for layouts with channels of at most 6 bits
pub const PRECISION_NARROW: u32 = 10;

/// Fractional precision for layouts with 8-bit channels
pub const PRECISION_WIDE: u32 = 14;

/// Largest supported precision; weights must fit in `u16`
pub const MAX_PRECISION: u32 = 15;

/// Integer type used for the weighted sums
pub trait WorkInt:
    Copy + Add<Output = Self> + Mul<Output = Self> + Shr<u32, Output = Self> + From<u16> + Into<u32>
{
    /// Width of the type in bits
    const BITS: u32;
}

impl WorkInt for u16 {
    const BITS: u32 = u16::BITS;
}

impl WorkInt for u32 {
    const BITS: u32 = u32::BITS;
}

/// Whether a blend of `channel_bits`-wide values at `precision` fits in a
/// `work_bits`-wide integer, rounding offset included.
pub const fn fits_budget(channel_bits: u32, precision: u32, work_bits: u32) -> bool {
    if precision == 0 || precision > MAX_PRECISION || channel_bits == 0 {
        return false;
    }
    let max = ((1u64 << channel_bits) - 1) << precision;
    max + (1u64 << (precision - 1)) <= (1u64 << work_bits) - 1
}

const _: () = assert!(fits_budget(6, PRECISION_NARROW, u16::BITS));
const _: () = assert!(fits_budget(8, PRECISION_WIDE, u32::BITS));
const _: () = assert!(!fits_budget(8, PRECISION_NARROW, u16::BITS));

/// `(v + 2^(P-1)) >> P`
#[inline(always)]
pub fn round_shift<W: WorkInt>(v: W, precision: u32) -> W {
    (v + W::from(1u16 << (precision - 1))) >> precision
}

/// Bilinear weight pair for one axis position
///
/// `near + far == 2^P` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weights {
    /// Weight toward the lower-index sample
    pub near: u16,
    /// Weight toward the higher-index sample (the fractional part)
    pub far: u16,
}

impl Weights {
    /// Weights for fractional part `frac` at `precision`.
    #[inline(always)]
    pub fn from_fraction(frac: u32, precision: u32) -> Self {
        debug_assert!(frac < (1 << precision));
        Self {
            near: ((1u32 << precision) - frac) as u16,
            far: frac as u16,
        }
    }
}

/// Blend two samples along one axis.
#[inline(always)]
pub fn lerp<W: WorkInt>(near: W, far: W, weights: Weights, precision: u32) -> W {
    round_shift(
        near * W::from(weights.near) + far * W::from(weights.far),
        precision,
    )
}
