//! Format dispatch
//!
//! Maps a runtime [`PixelFormat`] to the sampler configuration that handles
//! it: the channel layout, the fractional precision and the work integer
//! width. Formats without a channel layout (chroma-subsampled, pure alpha,
//! palette indices) have no blend semantics and are rejected here.

use crate::fixed::{PRECISION_NARROW, PRECISION_WIDE, fits_budget};
use crate::{ScaleError, ScaleResult};
use pixkit_core::{PixelFormat, PixelLayout};

/// Widest channel that still fits the 16-bit work integer at
/// [`PRECISION_NARROW`]
const NARROW_CHANNEL_BITS: u32 = 6;

/// Integer width used for the weighted sums
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkWidth {
    /// `u16` sums
    U16,
    /// `u32` sums
    U32,
}

impl WorkWidth {
    pub fn bits(self) -> u32 {
        match self {
            Self::U16 => u16::BITS,
            Self::U32 => u32::BITS,
        }
    }
}

/// Per-format sampler configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerSpec {
    pub format: PixelFormat,
    pub layout: &'static PixelLayout,
    pub precision: u32,
    pub work: WorkWidth,
}

/// Look up the sampler configuration for `format`.
///
/// # Errors
///
/// Returns [`ScaleError::UnsupportedFormat`] for formats without a channel
/// layout.
pub fn sampler_for(format: PixelFormat) -> ScaleResult<SamplerSpec> {
    let layout = format
        .layout()
        .ok_or(ScaleError::UnsupportedFormat(format))?;
    let bits = layout.max_channel_bits();
    let (precision, work) = if bits <= NARROW_CHANNEL_BITS {
        (PRECISION_NARROW, WorkWidth::U16)
    } else {
        (PRECISION_WIDE, WorkWidth::U32)
    };
    debug_assert!(fits_budget(bits, precision, work.bits()));
    Ok(SamplerSpec {
        format,
        layout,
        precision,
        work,
    })
}

/// Whether `format` can be resampled.
pub fn is_supported(format: PixelFormat) -> bool {
    format.layout().is_some()
}
