//! C entry points
//!
//! Raw-buffer resize for C callers. Status codes are the `ERR_*` constants
//! of this crate; [`pixkit_error_string`] turns one into a static message.

use crate::error::{ERR_NULL_ARGUMENT, OK, error_cstr};
use crate::{ScaleResult, resize};
use pixkit_core::PixelFormat;
use std::ffi::c_char;

#[allow(clippy::too_many_arguments)]
fn resize_raw(
    src: &[u8],
    dst: &mut [u8],
    src_pitch: u32,
    src_width: u32,
    src_height: u32,
    format: u32,
    dst_width: u32,
    dst_height: u32,
    interpolate: bool,
) -> ScaleResult<()> {
    let format = PixelFormat::from_raw(format)?;
    resize(
        src,
        dst,
        src_pitch,
        src_width,
        src_height,
        format,
        dst_width,
        dst_height,
        interpolate,
    )
}

/// Resize a frame between two caller-owned buffers.
///
/// Returns `0` on success or a negative `ERR_*` code. On a backend failure
/// the driver's own code is stored through `driver_code` when it is not
/// null. The destination is untouched on any failure other than a backend
/// failure.
///
/// # Safety
///
/// - `src` must be null or valid for reads of `src_len` bytes
/// - `dst` must be null or valid for writes of `dst_len` bytes
/// - the two ranges must not overlap
/// - `driver_code` must be null or valid for a write of one `i32`
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pixkit_resize(
    src: *const u8,
    src_len: usize,
    dst: *mut u8,
    dst_len: usize,
    src_pitch: u32,
    src_width: u32,
    src_height: u32,
    format: u32,
    dst_width: u32,
    dst_height: u32,
    interpolate: bool,
    driver_code: *mut i32,
) -> i32 {
    if src.is_null() || dst.is_null() {
        return ERR_NULL_ARGUMENT;
    }
    // SAFETY: non-null, and the caller guarantees length and exclusivity.
    let (src, dst) = unsafe {
        (
            std::slice::from_raw_parts(src, src_len),
            std::slice::from_raw_parts_mut(dst, dst_len),
        )
    };
    match resize_raw(
        src,
        dst,
        src_pitch,
        src_width,
        src_height,
        format,
        dst_width,
        dst_height,
        interpolate,
    ) {
        Ok(()) => OK,
        Err(err) => {
            log::debug!("pixkit_resize failed: {err}");
            if let Some(code) = err.driver_code() {
                if !driver_code.is_null() {
                    // SAFETY: checked non-null; validity is the caller's contract.
                    unsafe { driver_code.write(code) };
                }
            }
            err.code()
        }
    }
}

/// Static, NUL-terminated message for a status code.
///
/// Unknown codes yield `"unknown error"`. The pointer is never null and must
/// not be freed.
#[unsafe(no_mangle)]
pub extern "C" fn pixkit_error_string(code: i32) -> *const c_char {
    error_cstr(code).as_ptr()
}
