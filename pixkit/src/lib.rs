//! pixkit - Fixed-point pixel toolkit for Rust
//!
//! Integer-only image processing for packed-pixel frames in caller-owned
//! memory.
//!
//! # Overview
//!
//! - Pixel formats and bit-field channel layouts (16, 24 and 32-bit RGB,
//!   8-bit gray, and descriptors for YUV and palette formats)
//! - Borrowed image views with row pitch
//! - Bilinear and nearest-neighbor resizing with hardware offload hooks
//!
//! # Example
//!
//! ```
//! use pixkit::{ImageBuf, PixelFormat};
//!
//! // 4x4 gray ramp reduced to 2x2
//! let src = ImageBuf::from_vec([0u8, 85, 170, 255].repeat(4), 4, 4, PixelFormat::Gray8).unwrap();
//! let out = pixkit::scale::resize_to(&src.view(), 2, 2, true).unwrap();
//! assert_eq!(out.data(), &[43, 213, 43, 213]);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use pixkit_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use pixkit_scale as scale;
