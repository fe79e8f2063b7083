//! Resize entry points
//!
//! Every entry point validates the whole request before the destination is
//! touched, in this order:
//!
//! 1. Missing buffers ([`ScaleError::NullArgument`])
//! 2. Differing source and destination formats ([`ScaleError::FormatMismatch`])
//! 3. Formats without a sampler ([`ScaleError::UnsupportedFormat`])
//! 4. Geometry the accumulators cannot represent ([`ScaleError::FrameOutOfRange`])
//! 5. Buffers too small for their frames ([`ScaleError::Core`])
//!
//! The validated job is then offered to a chain of [`ResizeBackend`]s. The
//! free functions use the built-in software chain; a [`Resizer`] carries a
//! caller-configured chain, typically with an [`AcceleratorBackend`] in
//! front.

use crate::backend::{
    AcceleratorBackend, Attempt, ResizeBackend, ResizeJob, ScalarBackend, TextureAccelerator,
};
use crate::dispatch::{SamplerSpec, sampler_for};
use crate::plan::ScanPlan;
use crate::{ScaleError, ScaleResult};
use pixkit_core::{ImageBuf, ImageMut, ImageRef, PixelFormat};

#[cfg(feature = "simd")]
use crate::backend::VectorBackend;

#[cfg(feature = "simd")]
static DEFAULT_CHAIN: [&dyn ResizeBackend; 2] = [&VectorBackend, &ScalarBackend];

#[cfg(not(feature = "simd"))]
static DEFAULT_CHAIN: [&dyn ResizeBackend; 1] = [&ScalarBackend];

// ============================================================================
// Validation
// ============================================================================

fn plan_for(
    format: PixelFormat,
    source: (u32, u32),
    destination: (u32, u32),
    interpolate: bool,
) -> ScaleResult<(SamplerSpec, ScanPlan)> {
    let spec = sampler_for(format)?;
    let plan = ScanPlan::new(source, destination, spec.precision, interpolate)?;
    Ok((spec, plan))
}

fn prepare_views<'s, 'd>(
    source: ImageRef<'s>,
    destination: ImageMut<'d>,
    interpolate: bool,
) -> ScaleResult<ResizeJob<'s, 'd>> {
    if source.format() != destination.format() {
        return Err(ScaleError::FormatMismatch {
            source_format: source.format(),
            destination_format: destination.format(),
        });
    }
    let (spec, plan) = plan_for(
        source.format(),
        (source.width(), source.height()),
        (destination.width(), destination.height()),
        interpolate,
    )?;
    Ok(ResizeJob {
        source,
        destination,
        spec,
        plan,
    })
}

#[allow(clippy::too_many_arguments)]
fn prepare_raw<'s, 'd>(
    src: &'s [u8],
    dst: &'d mut [u8],
    src_pitch: u32,
    src_width: u32,
    src_height: u32,
    format: PixelFormat,
    dst_width: u32,
    dst_height: u32,
    interpolate: bool,
) -> ScaleResult<ResizeJob<'s, 'd>> {
    if src.is_empty() {
        return Err(ScaleError::NullArgument("source"));
    }
    if dst.is_empty() {
        return Err(ScaleError::NullArgument("destination"));
    }
    let (spec, plan) = plan_for(
        format,
        (src_width, src_height),
        (dst_width, dst_height),
        interpolate,
    )?;
    let source = ImageRef::new(src, src_width, src_height, src_pitch, format)?;
    let destination = ImageMut::packed(dst, dst_width, dst_height, format)?;
    Ok(ResizeJob {
        source,
        destination,
        spec,
        plan,
    })
}

// ============================================================================
// Backend chain
// ============================================================================

fn run_chain<'b, B>(
    backends: impl IntoIterator<Item = &'b B>,
    job: &mut ResizeJob<'_, '_>,
) -> ScaleResult<()>
where
    B: ResizeBackend + ?Sized + 'b,
{
    let format = job.format();
    let interpolate = job.interpolate();
    for backend in backends {
        if !backend.supports(format, interpolate) {
            continue;
        }
        match backend.resize(job)? {
            Attempt::Completed => {
                log::debug!(
                    "resized {}x{} -> {}x{} {} ({}) via {}",
                    job.source.width(),
                    job.source.height(),
                    job.destination.width(),
                    job.destination.height(),
                    format,
                    if interpolate { "bilinear" } else { "nearest" },
                    backend.name()
                );
                return Ok(());
            }
            Attempt::Declined => log::trace!("backend '{}' declined {}", backend.name(), format),
        }
    }
    Err(ScaleError::UnsupportedFormat(format))
}

/// Configured chain of resize backends
///
/// Backends are offered each job in order. The software backends never
/// decline, so a chain ending in one of them always completes supported
/// formats.
///
/// # Example
///
/// ```
/// use pixkit_core::{ImageBuf, PixelFormat};
/// use pixkit_scale::Resizer;
///
/// let src = ImageBuf::from_vec(vec![0, 85, 170, 255, 0, 85, 170, 255], 4, 2, PixelFormat::Gray8).unwrap();
/// let mut dst = ImageBuf::new(2, 2, PixelFormat::Gray8).unwrap();
/// Resizer::new().resize_image(&src.view(), &mut dst.view_mut(), true).unwrap();
/// assert_eq!(dst.data(), &[43, 213, 43, 213]);
/// ```
pub struct Resizer {
    backends: Vec<Box<dyn ResizeBackend>>,
}

impl Resizer {
    /// Software chain: lane-group sampler (with the `simd` feature) then the
    /// scalar sampler.
    pub fn new() -> Self {
        let mut backends: Vec<Box<dyn ResizeBackend>> = Vec::with_capacity(2);
        #[cfg(feature = "simd")]
        backends.push(Box::new(VectorBackend));
        backends.push(Box::new(ScalarBackend));
        Self { backends }
    }

    /// Chain holding only the scalar sampler.
    pub fn scalar_only() -> Self {
        Self {
            backends: vec![Box::new(ScalarBackend)],
        }
    }

    /// Chain holding exactly `backends`, in order.
    pub fn with_backends(backends: Vec<Box<dyn ResizeBackend>>) -> Self {
        Self { backends }
    }

    /// Open `device` and put it in front of the current chain.
    ///
    /// # Errors
    ///
    /// Returns [`ScaleError::Backend`] if the device fails its probe.
    pub fn with_accelerator<A>(mut self, device: A) -> ScaleResult<Self>
    where
        A: TextureAccelerator + 'static,
    {
        self.push_front(AcceleratorBackend::open(device)?);
        Ok(self)
    }

    /// Give `backend` the first chance at every job.
    pub fn push_front(&mut self, backend: impl ResizeBackend + 'static) {
        self.backends.insert(0, Box::new(backend));
    }

    /// Names of the configured backends, in order.
    pub fn backend_names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    /// Raw-buffer resize through this chain. See [`resize`].
    #[allow(clippy::too_many_arguments)]
    pub fn resize(
        &self,
        src: &[u8],
        dst: &mut [u8],
        src_pitch: u32,
        src_width: u32,
        src_height: u32,
        format: PixelFormat,
        dst_width: u32,
        dst_height: u32,
        interpolate: bool,
    ) -> ScaleResult<()> {
        let mut job = prepare_raw(
            src,
            dst,
            src_pitch,
            src_width,
            src_height,
            format,
            dst_width,
            dst_height,
            interpolate,
        )?;
        run_chain(self.backends.iter().map(|b| b.as_ref()), &mut job)
    }

    /// Described-image resize through this chain. See [`resize_image`].
    pub fn resize_image(
        &self,
        source: &ImageRef<'_>,
        destination: &mut ImageMut<'_>,
        interpolate: bool,
    ) -> ScaleResult<()> {
        let mut job = prepare_views(*source, destination.reborrow(), interpolate)?;
        run_chain(self.backends.iter().map(|b| b.as_ref()), &mut job)
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Resizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resizer")
            .field("backends", &self.backend_names())
            .finish()
    }
}

// ============================================================================
// Free functions
// ============================================================================

/// Resize a frame held in a raw byte buffer.
///
/// The destination is tightly packed (`pitch == dst_width`).
///
/// # Arguments
///
/// * `src` - Source bytes, `src_pitch` pixels per row
/// * `dst` - Destination bytes
/// * `src_pitch` - Source row stride in pixels
/// * `src_width`, `src_height` - Source logical size
/// * `format` - Pixel format of both frames
/// * `dst_width`, `dst_height` - Destination size
/// * `interpolate` - Bilinear when `true`, nearest-neighbor otherwise
///
/// # Errors
///
/// Fails without writing `dst` when any check in the module-level order
/// fails.
#[allow(clippy::too_many_arguments)]
pub fn resize(
    src: &[u8],
    dst: &mut [u8],
    src_pitch: u32,
    src_width: u32,
    src_height: u32,
    format: PixelFormat,
    dst_width: u32,
    dst_height: u32,
    interpolate: bool,
) -> ScaleResult<()> {
    let mut job = prepare_raw(
        src,
        dst,
        src_pitch,
        src_width,
        src_height,
        format,
        dst_width,
        dst_height,
        interpolate,
    )?;
    run_chain(DEFAULT_CHAIN, &mut job)
}

/// Resize `source` into `destination`.
///
/// Both views carry their own size, pitch and format; the formats must
/// match.
///
/// # Errors
///
/// Fails without writing `destination` when the formats differ, the format
/// is unsupported or the geometry is out of range.
pub fn resize_image(
    source: &ImageRef<'_>,
    destination: &mut ImageMut<'_>,
    interpolate: bool,
) -> ScaleResult<()> {
    let mut job = prepare_views(*source, destination.reborrow(), interpolate)?;
    run_chain(DEFAULT_CHAIN, &mut job)
}

/// Resize `source` into a newly allocated `width` x `height` frame.
///
/// # Errors
///
/// Same conditions as [`resize_image`]; nothing is allocated on failure.
pub fn resize_to(
    source: &ImageRef<'_>,
    width: u32,
    height: u32,
    interpolate: bool,
) -> ScaleResult<ImageBuf> {
    let format = source.format();
    plan_for(
        format,
        (source.width(), source.height()),
        (width, height),
        interpolate,
    )?;
    let mut out = ImageBuf::new(width, height, format)?;
    resize_image(source, &mut out.view_mut(), interpolate)?;
    Ok(out)
}

/// Destination size for a resize to `width` x `height`.
///
/// A zero target dimension is derived from the other one so that the aspect
/// ratio of `src_width` x `src_height` is kept (rounded, at least 1).
///
/// # Errors
///
/// - [`pixkit_core::Error::InvalidParameter`] if both targets are zero
/// - [`pixkit_core::Error::InvalidDimension`] if the source is empty
/// - [`ScaleError::FrameOutOfRange`] if the derived dimension overflows
pub fn target_size(
    src_width: u32,
    src_height: u32,
    width: u32,
    height: u32,
) -> ScaleResult<(u32, u32)> {
    if src_width == 0 || src_height == 0 {
        return Err(pixkit_core::Error::InvalidDimension {
            width: src_width,
            height: src_height,
        }
        .into());
    }
    let keep_aspect = |known: u32, num: u32, den: u32| -> ScaleResult<u32> {
        let scaled = (known as u64 * num as u64 + den as u64 / 2) / den as u64;
        u32::try_from(scaled.max(1)).map_err(|_| {
            ScaleError::FrameOutOfRange(format!("derived dimension {scaled} overflows"))
        })
    };
    match (width, height) {
        (0, 0) => Err(pixkit_core::Error::InvalidParameter(
            "at least one target dimension must be non-zero".into(),
        )
        .into()),
        (0, h) => Ok((keep_aspect(h, src_width, src_height)?, h)),
        (w, 0) => Ok((w, keep_aspect(w, src_height, src_width)?)),
        (w, h) => Ok((w, h)),
    }
}
