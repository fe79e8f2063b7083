//! Lane-group sampler
//!
//! Data-parallel formulation of the scalar sampler. Each destination row is
//! processed in groups of [`LANES`] consecutive pixels: accumulators, taps,
//! per-channel gathers and the three blends are computed lane-wise on fixed
//! arrays that the compiler lowers to vector registers. A [`LaneMask`]
//! predicates the final partial group of a row so that inactive lanes are
//! never gathered from or scattered to.
//!
//! All lane arithmetic is `u32`. Because the blend of any supported layout
//! fits its own work integer, widening to `u32` changes no result: output is
//! bit-identical to [`crate::sampler`].

use crate::dispatch::SamplerSpec;
use crate::plan::{ScanAxis, ScanPlan};
use pixkit_core::{Channels, ImageMut, ImageRef, MAX_CHANNELS, PixelLayout};

/// Pixels per lane group
pub const LANES: usize = 8;

/// One `u32` per lane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lanes(pub [u32; LANES]);

impl Lanes {
    /// Every lane set to `v`.
    #[inline(always)]
    pub fn splat(v: u32) -> Self {
        Self([v; LANES])
    }

    /// Lane `i` set to `base + i * step`, wrapping.
    #[inline(always)]
    pub fn ramp(base: u32, step: u32) -> Self {
        Self(std::array::from_fn(|i| {
            base.wrapping_add(step.wrapping_mul(i as u32))
        }))
    }

    #[inline(always)]
    fn map(self, f: impl Fn(u32) -> u32) -> Self {
        Self(self.0.map(f))
    }

    #[inline(always)]
    fn zip(self, other: Self, f: impl Fn(u32, u32) -> u32) -> Self {
        Self(std::array::from_fn(|i| f(self.0[i], other.0[i])))
    }

    #[inline(always)]
    pub fn saturating_sub(self, v: u32) -> Self {
        self.map(|a| a.saturating_sub(v))
    }

    #[inline(always)]
    pub fn shr(self, n: u32) -> Self {
        self.map(|a| a >> n)
    }

    #[inline(always)]
    pub fn and(self, m: u32) -> Self {
        self.map(|a| a & m)
    }

    #[inline(always)]
    pub fn min(self, v: u32) -> Self {
        self.map(|a| a.min(v))
    }

    #[inline(always)]
    pub fn add(self, other: Self) -> Self {
        self.zip(other, |a, b| a.wrapping_add(b))
    }

    #[inline(always)]
    pub fn mul(self, other: Self) -> Self {
        self.zip(other, |a, b| a.wrapping_mul(b))
    }

    /// Lane-wise `round_shift(near * wn + far * wf, P)`.
    #[inline(always)]
    pub fn lerp(near: Self, far: Self, wn: Self, wf: Self, precision: u32) -> Self {
        near.mul(wn)
            .add(far.mul(wf))
            .add(Self::splat(1 << (precision - 1)))
            .shr(precision)
    }
}

/// Active-lane predicate for a lane group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneMask {
    active: usize,
}

impl LaneMask {
    /// Mask for the group starting at `x` in a row of `width` pixels.
    #[inline(always)]
    pub fn for_group(x: usize, width: usize) -> Self {
        Self {
            active: (width - x).min(LANES),
        }
    }

    /// Number of active lanes (leading lanes are active).
    pub fn count(&self) -> usize {
        self.active
    }

    pub fn is_full(&self) -> bool {
        self.active == LANES
    }

    pub fn is_active(&self, lane: usize) -> bool {
        lane < self.active
    }
}

/// Lane-wise horizontal taps for one group
struct GroupTaps {
    near: Lanes,
    far: Lanes,
    w_near: Lanes,
    w_far: Lanes,
}

impl GroupTaps {
    #[inline(always)]
    fn bilinear(axis: &ScanAxis, acc: Lanes) -> Self {
        let p = axis.precision();
        let last = axis.source_extent() - 1;
        let pos = acc.saturating_sub(1 << (p - 1));
        let near = pos.shr(p).min(last);
        let w_far = pos.and((1 << p) - 1);
        Self {
            near,
            far: near.add(Lanes::splat(1)).min(last),
            w_near: Lanes::splat(1 << p).zip(w_far, |one, f| one - f),
            w_far,
        }
    }
}

/// Gather channel `c` of the pixels at `indices` (active lanes only).
#[inline(always)]
fn gather(layout: &PixelLayout, row: &[u8], indices: Lanes, c: usize, mask: LaneMask) -> Lanes {
    let bpp = layout.bytes_per_pixel;
    let mut out = [0u32; LANES];
    for (lane, v) in out.iter_mut().enumerate().take(mask.count()) {
        let at = indices.0[lane] as usize * bpp;
        *v = layout.extract(&row[at..at + bpp], c) as u32;
    }
    Lanes(out)
}

/// Resample `source` into `destination` with the lane-group path.
///
/// Geometry, format and plan must already be validated against each other.
pub fn resample(
    source: &ImageRef<'_>,
    destination: &mut ImageMut<'_>,
    spec: &SamplerSpec,
    plan: &ScanPlan,
) {
    if plan.interpolate {
        bilinear(source, destination, spec.layout, plan);
    } else {
        nearest(source, destination, spec.layout, plan);
    }
}

fn bilinear(
    source: &ImageRef<'_>,
    destination: &mut ImageMut<'_>,
    layout: &PixelLayout,
    plan: &ScanPlan,
) {
    let bpp = layout.bytes_per_pixel;
    let p = plan.precision();
    let width = destination.width() as usize;
    let group_step = plan.x.step().wrapping_mul(LANES as u32);

    for (y, acc_y) in plan.y.accumulator().enumerate() {
        let ty = plan.y.tap(acc_y);
        let top_row = source.row(ty.index);
        let bottom_row = source.row(ty.next);
        let wn_y = Lanes::splat(ty.weights.near as u32);
        let wf_y = Lanes::splat(ty.weights.far as u32);
        let out_row = destination.row_mut(y as u32);

        let mut acc_x = plan.x.start();
        let mut x = 0;
        while x < width {
            let mask = LaneMask::for_group(x, width);
            let taps = GroupTaps::bilinear(&plan.x, Lanes::ramp(acc_x, plan.x.step()));

            let mut blended: [Channels; LANES] = [[0; MAX_CHANNELS]; LANES];
            for c in 0..layout.channel_count {
                let p00 = gather(layout, top_row, taps.near, c, mask);
                let p10 = gather(layout, top_row, taps.far, c, mask);
                let p01 = gather(layout, bottom_row, taps.near, c, mask);
                let p11 = gather(layout, bottom_row, taps.far, c, mask);

                let top = Lanes::lerp(p00, p10, taps.w_near, taps.w_far, p);
                let bottom = Lanes::lerp(p01, p11, taps.w_near, taps.w_far, p);
                let result = Lanes::lerp(top, bottom, wn_y, wf_y, p);
                for (lane, px) in blended.iter_mut().enumerate().take(mask.count()) {
                    px[c] = result.0[lane] as u16;
                }
            }

            for (lane, channels) in blended.iter().enumerate().take(mask.count()) {
                let base = taps.near.0[lane] as usize * bpp;
                let out = (x + lane) * bpp;
                layout.pack(
                    channels,
                    &top_row[base..base + bpp],
                    &mut out_row[out..out + bpp],
                );
            }

            acc_x = acc_x.wrapping_add(group_step);
            x += LANES;
        }
    }
}

fn nearest(
    source: &ImageRef<'_>,
    destination: &mut ImageMut<'_>,
    layout: &PixelLayout,
    plan: &ScanPlan,
) {
    let bpp = layout.bytes_per_pixel;
    let width = destination.width() as usize;
    let group_step = plan.x.step().wrapping_mul(LANES as u32);
    let p = plan.precision();
    let last = plan.x.source_extent() - 1;

    for (y, acc_y) in plan.y.accumulator().enumerate() {
        let src_row = source.row(plan.y.nearest(acc_y));
        let out_row = destination.row_mut(y as u32);

        let mut acc_x = plan.x.start();
        let mut x = 0;
        while x < width {
            let mask = LaneMask::for_group(x, width);
            let indices = Lanes::ramp(acc_x, plan.x.step()).shr(p).min(last);
            for lane in 0..mask.count() {
                let at = indices.0[lane] as usize * bpp;
                let out = (x + lane) * bpp;
                out_row[out..out + bpp].copy_from_slice(&src_row[at..at + bpp]);
            }
            acc_x = acc_x.wrapping_add(group_step);
            x += LANES;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::sampler_for;
    use crate::sampler;
    use pixkit_core::PixelFormat;

    fn both(
        src: &[u8],
        (sw, sh): (u32, u32),
        (dw, dh): (u32, u32),
        format: PixelFormat,
        interpolate: bool,
    ) -> (Vec<u8>, Vec<u8>) {
        let spec = sampler_for(format).unwrap();
        let plan = ScanPlan::new((sw, sh), (dw, dh), spec.precision, interpolate).unwrap();
        let source = ImageRef::packed(src, sw, sh, format).unwrap();
        let len = format.frame_bytes(dw, dh, dw);

        let mut scalar_out = vec![0u8; len];
        let mut dst = ImageMut::packed(&mut scalar_out, dw, dh, format).unwrap();
        sampler::resample(&source, &mut dst, &spec, &plan);

        let mut vector_out = vec![0u8; len];
        let mut dst = ImageMut::packed(&mut vector_out, dw, dh, format).unwrap();
        resample(&source, &mut dst, &spec, &plan);

        (scalar_out, vector_out)
    }

    #[test]
    fn test_lane_mask() {
        let mask = LaneMask::for_group(16, 19);
        assert_eq!(mask.count(), 3);
        assert!(mask.is_active(2));
        assert!(!mask.is_active(3));
        assert!(LaneMask::for_group(0, 19).is_full());
    }

    #[test]
    fn test_ramp_and_lerp() {
        let r = Lanes::ramp(5, 10);
        assert_eq!(r.0[0], 5);
        assert_eq!(r.0[7], 75);
        let out = Lanes::lerp(
            Lanes::splat(0),
            Lanes::splat(85),
            Lanes::splat(1 << 13),
            Lanes::splat(1 << 13),
            14,
        );
        assert_eq!(out, Lanes::splat(43));
    }

    #[test]
    fn test_ramp_wraps_past_last_lane() {
        // Inactive lanes may wrap; active ones are unaffected
        let r = Lanes::ramp(u32::MAX - 1, 1);
        assert_eq!(r.0[0], u32::MAX - 1);
        assert_eq!(r.0[2], 0);
    }

    #[test]
    fn test_gray_golden_matches_scalar() {
        let row = [0u8, 85, 170, 255];
        let src: Vec<u8> = row.iter().copied().cycle().take(16).collect();
        let (scalar_out, vector_out) = both(&src, (4, 4), (2, 2), PixelFormat::Gray8, true);
        assert_eq!(vector_out, vec![43, 213, 43, 213]);
        assert_eq!(scalar_out, vector_out);
    }

    #[test]
    fn test_partial_groups_match_scalar() {
        let src: Vec<u8> = (0..(13 * 5 * 2) as u32)
            .map(|v| (v * 89 % 251) as u8)
            .collect();
        for dw in [1, 7, 8, 9, 17, 23] {
            for interpolate in [true, false] {
                let (s, v) = both(&src, (13, 5), (dw, 3), PixelFormat::Argb1555, interpolate);
                assert_eq!(s, v, "width {dw} interpolate {interpolate}");
            }
        }
    }
}
