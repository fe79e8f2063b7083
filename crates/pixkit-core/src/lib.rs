//! pixkit-core - Basic data structures for the pixkit toolkit
//!
//! This crate provides the pieces every pixkit operation shares:
//!
//! - [`PixelFormat`] - Enumerated pixel format tags
//! - [`PixelLayout`] / [`ChannelField`] - Bit-field descriptors that pack and
//!   unpack one pixel into per-channel integers
//! - [`ImageRef`] / [`ImageMut`] - Borrowed views over caller-owned frames
//! - [`ImageBuf`] - Owned, tightly packed frame
//!
//! # Example
//!
//! ```
//! use pixkit_core::{ImageRef, PixelFormat};
//!
//! let data = [0u8; 4 * 4 * 2];
//! let img = ImageRef::packed(&data, 4, 4, PixelFormat::Rgb565).unwrap();
//! assert_eq!(img.row(3).len(), 8);
//! ```

pub mod error;
pub mod format;
pub mod image;
pub mod layout;

pub use error::{Error, Result};
pub use format::PixelFormat;
pub use image::{ImageBuf, ImageMut, ImageRef};
pub use layout::{ChannelField, Channels, MAX_CHANNELS, PixelLayout};
