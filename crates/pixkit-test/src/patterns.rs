//! Deterministic input frames
//!
//! Every generator returns a tightly packed [`ImageBuf`]. Packed formats with
//! a channel layout get per-channel values that span the full field range;
//! formats without a layout are filled byte-wise.

use crate::error::{TestError, TestResult};
use pixkit_core::{Channels, ImageBuf, MAX_CHANNELS, PixelFormat};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn fill_with<F>(format: PixelFormat, width: u32, height: u32, mut value: F) -> TestResult<ImageBuf>
where
    F: FnMut(u32, u32, usize, u32) -> u32,
{
    let mut buf = ImageBuf::new(width, height, format)?;
    let Some(layout) = format.layout() else {
        return Err(TestError::Pattern {
            format: format.to_string(),
            message: "format has no channel layout".into(),
        });
    };
    let bpp = layout.bytes_per_pixel;
    let zero = [0u8; 4];
    let mut view = buf.view_mut();
    for y in 0..height {
        let row = view.row_mut(y);
        for (x, px) in row.chunks_exact_mut(bpp).enumerate() {
            let mut ch: Channels = [0; MAX_CHANNELS];
            for (c, field) in layout.channels().iter().enumerate() {
                ch[c] = value(x as u32, y, c, field.max_value()).min(field.max_value()) as u16;
            }
            layout.pack(&ch, &zero, px);
        }
    }
    Ok(buf)
}

/// Diagonal gradient; each channel runs in a different direction.
///
/// Channel 0 rises left to right, channel 1 top to bottom, channel 2 along
/// the diagonal and channel 3 falls left to right, so every channel is
/// monotonic along at least one axis.
pub fn gradient(format: PixelFormat, width: u32, height: u32) -> TestResult<ImageBuf> {
    let wd = (width.max(2) - 1) as u64;
    let hd = (height.max(2) - 1) as u64;
    fill_with(format, width, height, |x, y, c, max| {
        let max = max as u64;
        let v = match c {
            0 => x as u64 * max / wd,
            1 => y as u64 * max / hd,
            2 => (x as u64 + y as u64) * max / (wd + hd),
            _ => max - x as u64 * max / wd,
        };
        v as u32
    })
}

/// Checkerboard of `cell`-pixel squares alternating between 0 and full scale.
pub fn checker(format: PixelFormat, width: u32, height: u32, cell: u32) -> TestResult<ImageBuf> {
    let cell = cell.max(1);
    fill_with(format, width, height, |x, y, _, max| {
        if ((x / cell) + (y / cell)) % 2 == 0 {
            0
        } else {
            max
        }
    })
}

/// Seeded random bytes, including any unused bits of the pixel word.
///
/// Any format is accepted, since no channel structure is imposed.
pub fn noise(format: PixelFormat, width: u32, height: u32, seed: u64) -> TestResult<ImageBuf> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = vec![0u8; format.frame_bytes(width, height, width)];
    rng.fill(&mut data[..]);
    Ok(ImageBuf::from_vec(data, width, height, format)?)
}

/// Copy a packed frame into a buffer with `pitch` pixels per row.
///
/// Padding bytes are set to `pad`. Returns the new backing store.
pub fn with_pitch(image: &ImageBuf, pitch: u32, pad: u8) -> TestResult<Vec<u8>> {
    let format = image.format();
    let Some(bpp) = format.bytes_per_pixel() else {
        return Err(TestError::Pattern {
            format: format.to_string(),
            message: "planar frames cannot be re-pitched".into(),
        });
    };
    if pitch < image.width() {
        return Err(pixkit_core::Error::InvalidPitch {
            pitch,
            width: image.width(),
        }
        .into());
    }
    let stride = pitch as usize * bpp;
    let mut out = vec![pad; stride * image.height() as usize];
    let view = image.view();
    for y in 0..image.height() {
        let row = view.row(y);
        let start = y as usize * stride;
        out[start..start + row.len()].copy_from_slice(row);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_gray_spans_range() {
        let img = gradient(PixelFormat::Gray8, 4, 2).unwrap();
        assert_eq!(img.view().row(0), &[0, 85, 170, 255]);
        assert_eq!(img.view().row(1), &[0, 85, 170, 255]);
    }

    #[test]
    fn test_gradient_rejects_layoutless_format() {
        assert!(gradient(PixelFormat::Nv12, 4, 4).is_err());
    }

    #[test]
    fn test_checker() {
        let img = checker(PixelFormat::Gray8, 4, 1, 2).unwrap();
        assert_eq!(img.data(), &[0, 0, 255, 255]);
    }

    #[test]
    fn test_noise_is_seeded() {
        let a = noise(PixelFormat::Rgb565, 5, 3, 7).unwrap();
        let b = noise(PixelFormat::Rgb565, 5, 3, 7).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.data().len(), 30);
    }

    #[test]
    fn test_with_pitch() {
        let img = gradient(PixelFormat::Gray8, 2, 2).unwrap();
        let padded = with_pitch(&img, 3, 0xAA).unwrap();
        assert_eq!(padded, vec![0, 255, 0xAA, 0, 255, 0xAA]);
    }
}
