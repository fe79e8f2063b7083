//! Fixed-point scan planning
//!
//! For each axis the planner derives a constant per-sample increment
//!
//! ```text
//! step = (source_extent << P) / destination_extent      (truncating)
//! ```
//!
//! and a starting accumulator `step / 2`, the centre of the first
//! destination pixel expressed in source units. The accumulator advances by
//! exactly one `step` per destination sample and is only re-seeded at the
//! start of an axis traversal (every row for the horizontal axis, once per
//! frame for the vertical one).
//!
//! # Sampling positions
//!
//! Bilinear sampling measures from source pixel centres, so a tap first
//! subtracts half a source pixel (saturating at the leading edge). The
//! integer part is the near index, the fractional part the far weight; the
//! far index is clamped to the last source sample. With this convention
//! identity scaling reproduces the source, a 2:1 reduction averages pixel
//! pairs, and the outermost samples of an enlargement land on the source
//! corners.
//!
//! Nearest-neighbor sampling takes the source pixel containing the
//! destination centre, `acc >> P`.

use crate::fixed::{MAX_PRECISION, Weights};
use crate::{ScaleError, ScaleResult};

/// Largest `source_extent << P` the `u32` accumulator may represent
const MAX_SCALED_EXTENT: u64 = 1 << 31;

/// Source sample pair and weights for one destination position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tap {
    /// Near source index
    pub index: u32,
    /// Far source index (`index + 1`, clamped to the last sample)
    pub next: u32,
    /// Blend weights between `index` and `next`
    pub weights: Weights,
}

/// Accumulator plan for one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanAxis {
    source_extent: u32,
    destination_extent: u32,
    precision: u32,
    step: u32,
    start: u32,
}

impl ScanAxis {
    /// Plan one axis.
    ///
    /// # Errors
    ///
    /// Returns [`ScaleError::FrameOutOfRange`] if either extent is zero, if
    /// `source_extent << precision` overflows the accumulator, or if the
    /// step truncates to zero.
    pub fn plan(source_extent: u32, destination_extent: u32, precision: u32) -> ScaleResult<Self> {
        if precision == 0 || precision > MAX_PRECISION {
            return Err(ScaleError::FrameOutOfRange(format!(
                "precision {precision} outside 1..={MAX_PRECISION}"
            )));
        }
        if source_extent == 0 || destination_extent == 0 {
            return Err(ScaleError::FrameOutOfRange(format!(
                "cannot map {source_extent} source samples to {destination_extent}"
            )));
        }
        let scaled = (source_extent as u64) << precision;
        if scaled > MAX_SCALED_EXTENT {
            return Err(ScaleError::FrameOutOfRange(format!(
                "source extent {source_extent} exceeds the {precision}-bit accumulator"
            )));
        }
        let step = (scaled / destination_extent as u64) as u32;
        if step == 0 {
            return Err(ScaleError::FrameOutOfRange(format!(
                "enlargement {source_extent} -> {destination_extent} below accumulator resolution"
            )));
        }
        Ok(Self {
            source_extent,
            destination_extent,
            precision,
            step,
            start: step / 2,
        })
    }

    pub fn source_extent(&self) -> u32 {
        self.source_extent
    }

    pub fn destination_extent(&self) -> u32 {
        self.destination_extent
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Per-sample increment.
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Initial accumulator value.
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Fresh accumulator for one traversal of this axis.
    pub fn accumulator(&self) -> Accumulator {
        Accumulator {
            acc: self.start,
            step: self.step,
            remaining: self.destination_extent,
        }
    }

    /// Bilinear tap for accumulator value `acc`.
    #[inline(always)]
    pub fn tap(&self, acc: u32) -> Tap {
        let p = self.precision;
        let pos = acc.saturating_sub(1 << (p - 1));
        let last = self.source_extent - 1;
        let index = (pos >> p).min(last);
        Tap {
            index,
            next: (index + 1).min(last),
            weights: Weights::from_fraction(pos & ((1 << p) - 1), p),
        }
    }

    /// Nearest-neighbor index for accumulator value `acc`.
    #[inline(always)]
    pub fn nearest(&self, acc: u32) -> u32 {
        (acc >> self.precision).min(self.source_extent - 1)
    }
}

/// Running accumulator of one axis traversal
///
/// Yields one accumulator value per destination sample.
#[derive(Debug, Clone)]
pub struct Accumulator {
    acc: u32,
    step: u32,
    remaining: u32,
}

impl Iterator for Accumulator {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<u32> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let acc = self.acc;
        // The value after the last sample is never used and may exceed the
        // scaled source extent.
        self.acc = self.acc.wrapping_add(self.step);
        Some(acc)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining as usize, Some(self.remaining as usize))
    }
}

impl ExactSizeIterator for Accumulator {}

/// Accumulator plans for both axes of one resize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanPlan {
    /// Horizontal axis
    pub x: ScanAxis,
    /// Vertical axis
    pub y: ScanAxis,
    /// Bilinear (`true`) or nearest-neighbor sampling
    pub interpolate: bool,
}

impl ScanPlan {
    /// Plan a `source -> destination` resize at `precision`.
    ///
    /// # Errors
    ///
    /// Returns [`ScaleError::FrameOutOfRange`] for any geometry
    /// [`ScanAxis::plan`] rejects, and for a single source row when
    /// interpolating (two rows are needed for the vertical blend).
    pub fn new(
        source: (u32, u32),
        destination: (u32, u32),
        precision: u32,
        interpolate: bool,
    ) -> ScaleResult<Self> {
        if interpolate && source.1 < 2 {
            return Err(ScaleError::FrameOutOfRange(format!(
                "source height {} cannot supply two interpolation rows",
                source.1
            )));
        }
        Ok(Self {
            x: ScanAxis::plan(source.0, destination.0, precision)?,
            y: ScanAxis::plan(source.1, destination.1, precision)?,
            interpolate,
        })
    }

    pub fn precision(&self) -> u32 {
        self.x.precision
    }
}
