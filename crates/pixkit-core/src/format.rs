//! Pixel format tags
//!
//! A [`PixelFormat`] names the storage of one frame: channel count, channel
//! order, per-channel width and whether alpha is present. Packed formats map
//! to a [`PixelLayout`]; chroma-subsampled, pure-alpha and indexed formats
//! carry no layout because their samples cannot be blended channel by
//! channel.

use crate::error::{Error, Result};
use crate::layout::{self, PixelLayout};
use std::fmt;

/// Pixel format tag
///
/// Discriminants are the raw tags used by the C entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelFormat {
    /// 16-bit R5 G6 B5
    Rgb565 = 0,
    /// 16-bit B5 G6 R5
    Bgr565 = 1,
    /// 16-bit A1 R5 G5 B5
    Argb1555 = 2,
    /// 16-bit R5 G5 B5 A1
    Rgba5551 = 3,
    /// 16-bit A4 R4 G4 B4
    Argb4444 = 4,
    /// 16-bit R4 G4 B4 A4
    Rgba4444 = 5,
    /// 24-bit R8 G8 B8
    Rgb888 = 6,
    /// 24-bit B8 G8 R8
    Bgr888 = 7,
    /// 32-bit A8 R8 G8 B8
    Argb8888 = 8,
    /// 32-bit A8 B8 G8 R8
    Abgr8888 = 9,
    /// 32-bit R8 G8 B8 A8
    Rgba8888 = 10,
    /// 32-bit B8 G8 R8 A8
    Bgra8888 = 11,
    /// 32-bit X8 R8 G8 B8 (top byte unused)
    Xrgb8888 = 12,
    /// 32-bit X8 B8 G8 R8 (top byte unused)
    Xbgr8888 = 13,
    /// 8-bit luminance
    Gray8 = 14,
    /// 8-bit alpha only
    Alpha8 = 15,
    /// 8-bit palette index
    Index8 = 16,
    /// Packed 4:2:2, Y0 U Y1 V
    Yuyv = 17,
    /// Packed 4:2:2, U Y0 V Y1
    Uyvy = 18,
    /// Semi-planar 4:2:0, interleaved UV plane
    Nv12 = 19,
    /// Semi-planar 4:2:0, interleaved VU plane
    Nv21 = 20,
    /// Planar 4:2:0
    I420 = 21,
}

impl PixelFormat {
    /// Every format, in tag order.
    pub const ALL: [PixelFormat; 22] = [
        Self::Rgb565,
        Self::Bgr565,
        Self::Argb1555,
        Self::Rgba5551,
        Self::Argb4444,
        Self::Rgba4444,
        Self::Rgb888,
        Self::Bgr888,
        Self::Argb8888,
        Self::Abgr8888,
        Self::Rgba8888,
        Self::Bgra8888,
        Self::Xrgb8888,
        Self::Xbgr8888,
        Self::Gray8,
        Self::Alpha8,
        Self::Index8,
        Self::Yuyv,
        Self::Uyvy,
        Self::Nv12,
        Self::Nv21,
        Self::I420,
    ];

    /// Create a `PixelFormat` from its raw tag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFormat`] if `tag` names no format.
    pub fn from_raw(tag: u32) -> Result<Self> {
        Self::ALL
            .get(tag as usize)
            .copied()
            .ok_or(Error::UnknownFormat(tag))
    }

    /// Raw tag of this format.
    pub fn raw(self) -> u32 {
        self as u32
    }

    /// Average storage bits per pixel over a whole frame.
    pub fn bits_per_pixel(self) -> u32 {
        match self {
            Self::Gray8 | Self::Alpha8 | Self::Index8 => 8,
            Self::Nv12 | Self::Nv21 | Self::I420 => 12,
            Self::Rgb565
            | Self::Bgr565
            | Self::Argb1555
            | Self::Rgba5551
            | Self::Argb4444
            | Self::Rgba4444
            | Self::Yuyv
            | Self::Uyvy => 16,
            Self::Rgb888 | Self::Bgr888 => 24,
            Self::Argb8888
            | Self::Abgr8888
            | Self::Rgba8888
            | Self::Bgra8888
            | Self::Xrgb8888
            | Self::Xbgr8888 => 32,
        }
    }

    /// Bytes of one packed pixel, `None` for planar formats.
    pub fn bytes_per_pixel(self) -> Option<usize> {
        if self.is_planar() {
            None
        } else {
            Some((self.bits_per_pixel() / 8) as usize)
        }
    }

    /// Whether luma and chroma live in separate planes.
    pub fn is_planar(self) -> bool {
        matches!(self, Self::Nv12 | Self::Nv21 | Self::I420)
    }

    /// Whether chroma is stored at reduced resolution.
    pub fn is_chroma_subsampled(self) -> bool {
        matches!(
            self,
            Self::Yuyv | Self::Uyvy | Self::Nv12 | Self::Nv21 | Self::I420
        )
    }

    /// Whether the format carries an alpha channel.
    pub fn has_alpha(self) -> bool {
        match self {
            Self::Alpha8 => true,
            _ => self.layout().is_some_and(|l| l.has_alpha()),
        }
    }

    /// Bytes needed to hold a frame of `height` rows at `pitch` pixels.
    ///
    /// The last row only needs `width` pixels. Planar formats need the full
    /// luma plane plus both quarter-size chroma planes.
    pub fn frame_bytes(self, width: u32, height: u32, pitch: u32) -> usize {
        if height == 0 {
            return 0;
        }
        match self.bytes_per_pixel() {
            Some(bpp) => ((height as usize - 1) * pitch as usize + width as usize) * bpp,
            None => {
                let luma = pitch as usize * height as usize;
                luma + luma.div_ceil(2)
            }
        }
    }

    /// Channel layout of the format, `None` when samples are not
    /// independently addressable per channel.
    ///
    /// Channel order in the layout follows the format name: `Argb8888`
    /// yields A, R, G, B.
    pub fn layout(self) -> Option<&'static PixelLayout> {
        match self {
            Self::Rgb565 => Some(&layout::RGB565),
            Self::Bgr565 => Some(&layout::BGR565),
            Self::Argb1555 => Some(&layout::ARGB1555),
            Self::Rgba5551 => Some(&layout::RGBA5551),
            Self::Argb4444 => Some(&layout::ARGB4444),
            Self::Rgba4444 => Some(&layout::RGBA4444),
            Self::Rgb888 | Self::Bgr888 => Some(&layout::RGB888),
            Self::Argb8888 | Self::Abgr8888 => Some(&layout::ALPHA_FIRST_8888),
            Self::Rgba8888 | Self::Bgra8888 => Some(&layout::ALPHA_LAST_8888),
            Self::Xrgb8888 | Self::Xbgr8888 => Some(&layout::X888),
            Self::Gray8 => Some(&layout::GRAY8),
            Self::Alpha8
            | Self::Index8
            | Self::Yuyv
            | Self::Uyvy
            | Self::Nv12
            | Self::Nv21
            | Self::I420 => None,
        }
    }

    /// Short lowercase name of the format.
    pub fn name(self) -> &'static str {
        match self {
            Self::Rgb565 => "rgb565",
            Self::Bgr565 => "bgr565",
            Self::Argb1555 => "argb1555",
            Self::Rgba5551 => "rgba5551",
            Self::Argb4444 => "argb4444",
            Self::Rgba4444 => "rgba4444",
            Self::Rgb888 => "rgb888",
            Self::Bgr888 => "bgr888",
            Self::Argb8888 => "argb8888",
            Self::Abgr8888 => "abgr8888",
            Self::Rgba8888 => "rgba8888",
            Self::Bgra8888 => "bgra8888",
            Self::Xrgb8888 => "xrgb8888",
            Self::Xbgr8888 => "xbgr8888",
            Self::Gray8 => "gray8",
            Self::Alpha8 => "alpha8",
            Self::Index8 => "index8",
            Self::Yuyv => "yuyv",
            Self::Uyvy => "uyvy",
            Self::Nv12 => "nv12",
            Self::Nv21 => "nv21",
            Self::I420 => "i420",
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
