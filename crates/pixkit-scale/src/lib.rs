//! pixkit-scale - Fixed-point image resampling for pixkit
//!
//! This crate resizes packed-pixel frames with separable bilinear or
//! nearest-neighbor sampling, using integer arithmetic only:
//!
//! - Scan planning (per-axis fixed-point accumulators)
//! - Fixed-point blending with a per-format precision budget
//! - Format dispatch for 16, 24 and 32-bit packed RGB and 8-bit gray
//! - Scalar and lane-group samplers with bit-identical output
//! - Backend chain with optional texture-accelerator offload and fallback
//! - C entry points with stable status codes
//!
//! # Example
//!
//! ```
//! use pixkit_core::PixelFormat;
//!
//! let src = [0u8, 85, 170, 255].repeat(4);
//! let mut dst = [0u8; 4];
//! pixkit_scale::resize(&src, &mut dst, 4, 4, 4, PixelFormat::Gray8, 2, 2, true).unwrap();
//! assert_eq!(dst, [43, 213, 43, 213]);
//! ```

pub mod backend;
pub mod dispatch;
mod error;
pub mod ffi;
pub mod fixed;
pub mod plan;
pub mod resize;
pub mod sampler;
pub mod vector;

pub use backend::{
    AccelError, AcceleratorBackend, Attempt, ResizeBackend, ResizeJob, ScalarBackend,
    TextureAccelerator, TextureFilter, VectorBackend,
};
pub use dispatch::{SamplerSpec, WorkWidth, is_supported, sampler_for};
pub use error::{
    ERR_BACKEND, ERR_FORMAT_MISMATCH, ERR_FRAME_OUT_OF_RANGE, ERR_INVALID_FRAME,
    ERR_NULL_ARGUMENT, ERR_UNSUPPORTED_FORMAT, OK, ScaleError, ScaleResult, error_cstr,
    error_string,
};
pub use ffi::{pixkit_error_string, pixkit_resize};
pub use plan::{ScanAxis, ScanPlan, Tap};
pub use resize::{Resizer, resize, resize_image, resize_to, target_size};
