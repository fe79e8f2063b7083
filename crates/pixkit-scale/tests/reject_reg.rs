//! Rejection regression test
//!
//! Every rejected request leaves the destination exactly as it was.

use pixkit_core::{ImageMut, ImageRef, PixelFormat};
use pixkit_scale::{
    ERR_FORMAT_MISMATCH, ERR_FRAME_OUT_OF_RANGE, ERR_NULL_ARGUMENT, ERR_UNSUPPORTED_FORMAT,
    ScaleError, is_supported, resize, resize_image,
};
use pixkit_test::{RegParams, gradient};

const SENTINEL: u8 = 0xE7;

#[test]
fn reject_reg() {
    let mut rp = RegParams::new("reject");
    let src = gradient(PixelFormat::Gray8, 8, 8).unwrap();
    let mut dst = vec![SENTINEL; 64];

    // --- Test 1: missing buffers ---
    let err = resize(&[], &mut dst, 8, 8, 8, PixelFormat::Gray8, 4, 4, true).unwrap_err();
    rp.compare_values(ERR_NULL_ARGUMENT as f64, err.code() as f64, 0.0);
    let err = resize(src.data(), &mut [], 8, 8, 8, PixelFormat::Gray8, 4, 4, true).unwrap_err();
    rp.compare_values(ERR_NULL_ARGUMENT as f64, err.code() as f64, 0.0);

    // --- Test 2: formats without a sampler, in both modes ---
    for format in PixelFormat::ALL.into_iter().filter(|f| !is_supported(*f)) {
        for interpolate in [true, false] {
            let err = resize(src.data(), &mut dst, 8, 8, 8, format, 4, 4, interpolate).unwrap_err();
            rp.check(
                matches!(err, ScaleError::UnsupportedFormat(f) if f == format),
                &format!("{format} unsupported"),
            );
            rp.compare_values(ERR_UNSUPPORTED_FORMAT as f64, err.code() as f64, 0.0);
        }
    }

    // --- Test 3: single source row cannot be interpolated ---
    let err = resize(&src.data()[..8], &mut dst, 8, 8, 1, PixelFormat::Gray8, 4, 4, true)
        .unwrap_err();
    rp.compare_values(ERR_FRAME_OUT_OF_RANGE as f64, err.code() as f64, 0.0);
    // but can be sampled
    resize(&src.data()[..8], &mut dst[..16], 8, 8, 1, PixelFormat::Gray8, 4, 4, false).unwrap();
    rp.compare_bytes(&[36, 109, 182, 255], &dst[..4]);
    dst.fill(SENTINEL);

    // --- Test 4: geometry beyond the accumulator ---
    let err = resize(src.data(), &mut dst, 8, (1 << 17) + 1, 8, PixelFormat::Gray8, 4, 4, true)
        .unwrap_err();
    rp.compare_values(ERR_FRAME_OUT_OF_RANGE as f64, err.code() as f64, 0.0);
    let err = resize(src.data(), &mut dst, 8, (1 << 21) + 1, 8, PixelFormat::Rgb565, 4, 4, true)
        .unwrap_err();
    rp.compare_values(ERR_FRAME_OUT_OF_RANGE as f64, err.code() as f64, 0.0);
    // The 16-bit path has headroom for a width the 8-bit path rejects
    let err = resize(src.data(), &mut dst, 8, (1 << 17) + 1, 8, PixelFormat::Rgb565, 4, 4, true)
        .unwrap_err();
    rp.check(
        matches!(err, ScaleError::Core(pixkit_core::Error::InvalidPitch { .. })),
        "rgb565 wide source fails only on its pitch",
    );
    // Enlargement finer than the accumulator resolution
    let err = resize(&[1, 2], &mut dst, 1, 1, 2, PixelFormat::Gray8, (1 << 14) + 1, 1, true)
        .unwrap_err();
    rp.compare_values(ERR_FRAME_OUT_OF_RANGE as f64, err.code() as f64, 0.0);
    // Zero destination
    let err = resize(src.data(), &mut dst, 8, 8, 8, PixelFormat::Gray8, 0, 4, true).unwrap_err();
    rp.compare_values(ERR_FRAME_OUT_OF_RANGE as f64, err.code() as f64, 0.0);

    // --- Test 5: differing formats ---
    let mut data = vec![SENTINEL; 32];
    let mut view = ImageMut::packed(&mut data, 4, 4, PixelFormat::Rgb565).unwrap();
    let source = ImageRef::packed(src.data(), 8, 8, PixelFormat::Gray8).unwrap();
    let err = resize_image(&source, &mut view, true).unwrap_err();
    rp.compare_values(ERR_FORMAT_MISMATCH as f64, err.code() as f64, 0.0);
    rp.check(data.iter().all(|&b| b == SENTINEL), "mismatch left destination");

    // --- Test 6: undersized destination ---
    let err = resize(src.data(), &mut dst[..15], 8, 8, 8, PixelFormat::Gray8, 4, 4, true)
        .unwrap_err();
    rp.check(
        matches!(
            err,
            ScaleError::Core(pixkit_core::Error::BufferTooSmall {
                needed: 16,
                actual: 15
            })
        ),
        "short destination",
    );

    rp.check(dst.iter().all(|&b| b == SENTINEL), "destination untouched");
    assert!(rp.cleanup(), "reject regression test failed");
}
