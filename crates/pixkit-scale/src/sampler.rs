//! Portable scalar sampler
//!
//! Reference implementation of separable bilinear and nearest-neighbor
//! resampling. One generic routine serves every layout; the layout
//! descriptor supplies extraction and packing, the [`WorkInt`] parameter
//! the width of the weighted sums.
//!
//! For destination row `y` and column `x` the bilinear result of channel
//! `c` is
//!
//! ```text
//! top    = round_shift(p00 * nx + p10 * fx, P)
//! bottom = round_shift(p01 * nx + p11 * fx, P)
//! out    = round_shift(top * ny + bottom * fy, P)
//! ```
//!
//! Bits of the destination word that belong to no channel are copied from
//! `p00`. Nothing is allocated and the source is never written.

use crate::dispatch::{SamplerSpec, WorkWidth};
use crate::fixed::{WorkInt, lerp};
use crate::plan::ScanPlan;
use pixkit_core::{Channels, ImageMut, ImageRef, MAX_CHANNELS, PixelLayout};

/// Resample `source` into `destination` with the scalar path.
///
/// Geometry, format and plan must already be validated against each other.
pub fn resample(
    source: &ImageRef<'_>,
    destination: &mut ImageMut<'_>,
    spec: &SamplerSpec,
    plan: &ScanPlan,
) {
    if !plan.interpolate {
        nearest(source, destination, spec.layout, plan);
        return;
    }
    match spec.work {
        WorkWidth::U16 => bilinear::<u16>(source, destination, spec.layout, plan),
        WorkWidth::U32 => bilinear::<u32>(source, destination, spec.layout, plan),
    }
}

fn bilinear<W: WorkInt>(
    source: &ImageRef<'_>,
    destination: &mut ImageMut<'_>,
    layout: &PixelLayout,
    plan: &ScanPlan,
) {
    let bpp = layout.bytes_per_pixel;
    let p = plan.precision();

    for (y, acc_y) in plan.y.accumulator().enumerate() {
        let ty = plan.y.tap(acc_y);
        let top_row = source.row(ty.index);
        let bottom_row = source.row(ty.next);
        let out_row = destination.row_mut(y as u32);

        for (out, acc_x) in out_row.chunks_exact_mut(bpp).zip(plan.x.accumulator()) {
            let tx = plan.x.tap(acc_x);
            let near = tx.index as usize * bpp;
            let far = tx.next as usize * bpp;
            let p00 = &top_row[near..near + bpp];

            let c00 = layout.unpack(p00);
            let c10 = layout.unpack(&top_row[far..far + bpp]);
            let c01 = layout.unpack(&bottom_row[near..near + bpp]);
            let c11 = layout.unpack(&bottom_row[far..far + bpp]);

            let mut blended: Channels = [0; MAX_CHANNELS];
            for c in 0..layout.channel_count {
                let top = lerp(W::from(c00[c]), W::from(c10[c]), tx.weights, p);
                let bottom = lerp(W::from(c01[c]), W::from(c11[c]), tx.weights, p);
                let value: u32 = lerp(top, bottom, ty.weights, p).into();
                blended[c] = value as u16;
            }
            layout.pack(&blended, p00, out);
        }
    }
}

/// Copy the source pixel containing each destination centre.
fn nearest(
    source: &ImageRef<'_>,
    destination: &mut ImageMut<'_>,
    layout: &PixelLayout,
    plan: &ScanPlan,
) {
    let bpp = layout.bytes_per_pixel;
    for (y, acc_y) in plan.y.accumulator().enumerate() {
        let src_row = source.row(plan.y.nearest(acc_y));
        let out_row = destination.row_mut(y as u32);
        for (out, acc_x) in out_row.chunks_exact_mut(bpp).zip(plan.x.accumulator()) {
            let at = plan.x.nearest(acc_x) as usize * bpp;
            out.copy_from_slice(&src_row[at..at + bpp]);
        }
    }
}
