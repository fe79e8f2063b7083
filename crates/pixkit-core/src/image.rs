//! Image views over caller-owned pixel memory
//!
//! [`ImageRef`] and [`ImageMut`] describe a frame that lives in a borrowed
//! byte slice: logical size, row pitch in pixels and pixel format. They never
//! own or reallocate the memory. [`ImageBuf`] is the owned counterpart used
//! when an operation has to produce a fresh frame.
//!
//! Rows are `pitch` pixels apart; bytes between `width` and `pitch` are
//! padding and are neither read nor written by pixel accessors.

use crate::error::{Error, Result};
use crate::format::PixelFormat;

fn validate(format: PixelFormat, width: u32, height: u32, pitch: u32, len: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    if pitch < width {
        return Err(Error::InvalidPitch { pitch, width });
    }
    let needed = format.frame_bytes(width, height, pitch);
    if len < needed {
        return Err(Error::BufferTooSmall {
            needed,
            actual: len,
        });
    }
    Ok(())
}

/// Bytes per addressable sample; planar formats address the luma plane.
#[inline]
fn sample_bytes(format: PixelFormat) -> usize {
    format.bytes_per_pixel().unwrap_or(1)
}

#[inline]
fn offset(format: PixelFormat, pitch: u32, x: u32, y: u32) -> usize {
    (y as usize * pitch as usize + x as usize) * sample_bytes(format)
}

/// Read-only view of a frame
#[derive(Debug, Clone, Copy)]
pub struct ImageRef<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    pitch: u32,
    format: PixelFormat,
}

impl<'a> ImageRef<'a> {
    /// Describe `data` as a frame.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimension`] if `width` or `height` is zero
    /// - [`Error::InvalidPitch`] if `pitch < width`
    /// - [`Error::BufferTooSmall`] if `data` cannot hold the frame
    pub fn new(
        data: &'a [u8],
        width: u32,
        height: u32,
        pitch: u32,
        format: PixelFormat,
    ) -> Result<Self> {
        validate(format, width, height, pitch, data.len())?;
        Ok(Self {
            data,
            width,
            height,
            pitch,
            format,
        })
    }

    /// Describe a tightly packed frame (`pitch == width`).
    pub fn packed(data: &'a [u8], width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        Self::new(data, width, height, width, format)
    }

    /// Logical width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Logical height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row stride in pixels.
    pub fn pitch(&self) -> u32 {
        self.pitch
    }

    /// Pixel format of the frame.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Underlying bytes, padding included.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Bytes of row `y`, `width` pixels long.
    ///
    /// Planar formats expose the luma plane.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &'a [u8] {
        let bpp = sample_bytes(self.format);
        let start = offset(self.format, self.pitch, 0, y);
        &self.data[start..start + self.width as usize * bpp]
    }

    /// Bytes of pixel `(x, y)`, or `None` when out of bounds or planar.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&'a [u8]> {
        let bpp = self.format.bytes_per_pixel()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = offset(self.format, self.pitch, x, y);
        Some(&self.data[start..start + bpp])
    }
}

/// Writable view of a frame
#[derive(Debug)]
pub struct ImageMut<'a> {
    data: &'a mut [u8],
    width: u32,
    height: u32,
    pitch: u32,
    format: PixelFormat,
}

impl<'a> ImageMut<'a> {
    /// Describe `data` as a writable frame.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ImageRef::new`].
    pub fn new(
        data: &'a mut [u8],
        width: u32,
        height: u32,
        pitch: u32,
        format: PixelFormat,
    ) -> Result<Self> {
        validate(format, width, height, pitch, data.len())?;
        Ok(Self {
            data,
            width,
            height,
            pitch,
            format,
        })
    }

    /// Describe a tightly packed writable frame (`pitch == width`).
    pub fn packed(
        data: &'a mut [u8],
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<Self> {
        Self::new(data, width, height, width, format)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pitch(&self) -> u32 {
        self.pitch
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Read-only view of the same frame.
    pub fn view(&self) -> ImageRef<'_> {
        ImageRef {
            data: &*self.data,
            width: self.width,
            height: self.height,
            pitch: self.pitch,
            format: self.format,
        }
    }

    /// Writable view of the same frame for a shorter lifetime.
    pub fn reborrow(&mut self) -> ImageMut<'_> {
        ImageMut {
            data: &mut *self.data,
            width: self.width,
            height: self.height,
            pitch: self.pitch,
            format: self.format,
        }
    }

    /// Underlying bytes, padding included.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut *self.data
    }

    /// Mutable bytes of row `y`, `width` pixels long.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let bpp = sample_bytes(self.format);
        let start = offset(self.format, self.pitch, 0, y);
        &mut self.data[start..start + self.width as usize * bpp]
    }

    /// Mutable bytes of pixel `(x, y)`, or `None` when out of bounds or planar.
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8]> {
        let bpp = self.format.bytes_per_pixel()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = offset(self.format, self.pitch, x, y);
        Some(&mut self.data[start..start + bpp])
    }
}

/// Owned, tightly packed frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuf {
    data: Vec<u8>,
    width: u32,
    height: u32,
    format: PixelFormat,
}

impl ImageBuf {
    /// Allocate a zeroed frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if `width` or `height` is zero.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let data = vec![0u8; format.frame_bytes(width, height, width)];
        Ok(Self {
            data,
            width,
            height,
            format,
        })
    }

    /// Wrap existing packed bytes.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ImageRef::new`] with `pitch == width`.
    pub fn from_vec(data: Vec<u8>, width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        validate(format, width, height, width, data.len())?;
        Ok(Self {
            data,
            width,
            height,
            format,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Borrow as a read-only view.
    pub fn view(&self) -> ImageRef<'_> {
        ImageRef {
            data: &self.data,
            width: self.width,
            height: self.height,
            pitch: self.width,
            format: self.format,
        }
    }

    /// Borrow as a writable view.
    pub fn view_mut(&mut self) -> ImageMut<'_> {
        ImageMut {
            data: &mut self.data,
            width: self.width,
            height: self.height,
            pitch: self.width,
            format: self.format,
        }
    }
}
