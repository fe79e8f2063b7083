//! Pitch regression test
//!
//! Row padding of the source never affects the result and row padding of
//! the destination is never written.

use pixkit_core::{ImageBuf, ImageMut, ImageRef, PixelFormat};
use pixkit_scale::{resize, resize_image, resize_to};
use pixkit_test::{RegParams, noise, with_pitch};

#[test]
fn pitch_reg() {
    let mut rp = RegParams::new("pitch");

    for format in [
        PixelFormat::Gray8,
        PixelFormat::Rgb565,
        PixelFormat::Rgb888,
        PixelFormat::Xrgb8888,
    ] {
        let bpp = format.bytes_per_pixel().unwrap();
        let src = noise(format, 21, 14, 8).unwrap();
        let expected = resize_to(&src.view(), 10, 9, true).unwrap();

        // --- Source padding is ignored ---
        for pad in [0x00, 0xAA, 0xFF] {
            let padded = with_pitch(&src, 29, pad).unwrap();
            let mut out = vec![0u8; expected.data().len()];
            resize(&padded, &mut out, 29, 21, 14, format, 10, 9, true).unwrap();
            rp.compare_bytes(expected.data(), &out);
        }

        // --- Destination padding is untouched ---
        let dst_pitch = 13u32;
        let mut dst = vec![0xC3u8; format.frame_bytes(10, 9, dst_pitch) + 3 * bpp];
        {
            let mut view = ImageMut::new(&mut dst, 10, 9, dst_pitch, format).unwrap();
            resize_image(&src.view(), &mut view, true).unwrap();
        }
        let view = ImageRef::new(&dst, 10, 9, dst_pitch, format).unwrap();
        rp.compare_images(&expected.view(), &view);
        let stride = dst_pitch as usize * bpp;
        let row_bytes = 10 * bpp;
        let untouched = dst
            .chunks(stride)
            .all(|row| row.len() <= row_bytes || row[row_bytes..].iter().all(|&b| b == 0xC3));
        rp.check(untouched, &format!("{format} destination padding"));
    }

    // --- Pixels beyond the frame inside an oversized source buffer ---
    let src = noise(PixelFormat::Argb4444, 6, 6, 1).unwrap();
    let mut oversized = src.data().to_vec();
    oversized.extend_from_slice(&[0x5A; 64]);
    let view = ImageRef::packed(&oversized, 6, 6, PixelFormat::Argb4444).unwrap();
    let a = resize_to(&view, 4, 11, true).unwrap();
    let b = resize_to(&src.view(), 4, 11, true).unwrap();
    rp.compare_images(&a.view(), &b.view());

    let trailing = ImageBuf::from_vec(oversized, 6, 6, PixelFormat::Argb4444);
    rp.check(trailing.is_ok(), "oversized buffers are accepted");

    assert!(rp.cleanup(), "pitch regression test failed");
}
