//! Resize backends
//!
//! A backend is one strategy for carrying out a validated resize. Backends
//! are tried in order by [`crate::Resizer`]; the first one that reports the
//! format as supported runs, and may either complete the job or decline it
//! (for example, a texture accelerator that is momentarily unavailable), in
//! which case the next backend is offered the job.
//!
//! | Backend | Supports | Declines |
//! |---|---|---|
//! | [`AcceleratorBackend`] | whatever the device reports | when the device is unavailable |
//! | [`VectorBackend`] | every dispatchable format | never |
//! | [`ScalarBackend`] | every dispatchable format | never |

use crate::dispatch::{self, SamplerSpec};
use crate::plan::ScanPlan;
use crate::{ScaleError, ScaleResult, sampler, vector};
use pixkit_core::{ImageMut, ImageRef, PixelFormat};
use thiserror::Error;

/// Outcome of offering a job to a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    /// The destination has been written
    Completed,
    /// Nothing was written; try the next backend
    Declined,
}

/// A fully validated resize
///
/// Constructed only after every check has passed, so a backend can write the
/// destination without further validation.
#[derive(Debug)]
pub struct ResizeJob<'s, 'd> {
    pub source: ImageRef<'s>,
    pub destination: ImageMut<'d>,
    pub spec: SamplerSpec,
    pub plan: ScanPlan,
}

impl ResizeJob<'_, '_> {
    pub fn format(&self) -> PixelFormat {
        self.spec.format
    }

    pub fn interpolate(&self) -> bool {
        self.plan.interpolate
    }
}

/// One resize strategy
pub trait ResizeBackend: Send + Sync {
    /// Short identifier used in logs and errors.
    fn name(&self) -> &'static str;

    /// Whether this backend can take jobs of `format` in the given mode.
    fn supports(&self, format: PixelFormat, interpolate: bool) -> bool;

    /// Run the job.
    ///
    /// Must not touch the destination when returning `Declined`.
    fn resize(&self, job: &mut ResizeJob<'_, '_>) -> ScaleResult<Attempt>;
}

/// Portable scalar sampler
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarBackend;

impl ResizeBackend for ScalarBackend {
    fn name(&self) -> &'static str {
        "scalar"
    }

    fn supports(&self, format: PixelFormat, _interpolate: bool) -> bool {
        dispatch::is_supported(format)
    }

    fn resize(&self, job: &mut ResizeJob<'_, '_>) -> ScaleResult<Attempt> {
        sampler::resample(&job.source, &mut job.destination, &job.spec, &job.plan);
        Ok(Attempt::Completed)
    }
}

/// Lane-group sampler
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorBackend;

impl ResizeBackend for VectorBackend {
    fn name(&self) -> &'static str {
        "vector"
    }

    fn supports(&self, format: PixelFormat, _interpolate: bool) -> bool {
        dispatch::is_supported(format)
    }

    fn resize(&self, job: &mut ResizeJob<'_, '_>) -> ScaleResult<Attempt> {
        vector::resample(&job.source, &mut job.destination, &job.spec, &job.plan);
        Ok(Attempt::Completed)
    }
}

/// Filtering requested from a texture accelerator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFilter {
    Nearest,
    Bilinear,
}

impl TextureFilter {
    pub fn from_interpolate(interpolate: bool) -> Self {
        if interpolate {
            Self::Bilinear
        } else {
            Self::Nearest
        }
    }
}

/// Error reported by a texture accelerator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccelError {
    /// Device busy, powered down or otherwise not accepting work
    #[error("accelerator unavailable")]
    Unavailable,

    /// Driver-level failure
    #[error("driver error {0}")]
    Driver(i32),
}

impl AccelError {
    /// Code reported when an unavailable device is opened
    pub const UNAVAILABLE_CODE: i32 = -1;

    pub fn code(self) -> i32 {
        match self {
            Self::Unavailable => Self::UNAVAILABLE_CODE,
            Self::Driver(code) => code,
        }
    }
}

/// Handle to a hardware texture-mapping unit
///
/// Implemented by platform glue; the handle's lifetime is managed by the
/// caller and it is passed to [`AcceleratorBackend::open`] explicitly.
pub trait TextureAccelerator: Send + Sync {
    /// Short identifier of the device.
    fn name(&self) -> &'static str {
        "accelerator"
    }

    /// Check that the device is initialized and reachable.
    fn probe(&self) -> Result<(), AccelError>;

    /// Whether the device can sample `format` with `filter`.
    fn supports(&self, format: PixelFormat, filter: TextureFilter) -> bool;

    /// Scale `source` into `destination`, blocking until the device is done.
    fn scale_blit(
        &self,
        source: &ImageRef<'_>,
        destination: &mut ImageMut<'_>,
        filter: TextureFilter,
    ) -> Result<(), AccelError>;
}

/// Backend that delegates the whole job to a [`TextureAccelerator`]
#[derive(Debug)]
pub struct AcceleratorBackend<A> {
    device: A,
}

impl<A: TextureAccelerator> AcceleratorBackend<A> {
    /// Wrap `device` after probing it.
    ///
    /// # Errors
    ///
    /// Returns [`ScaleError::Backend`] carrying the device's code if the
    /// probe fails.
    pub fn open(device: A) -> ScaleResult<Self> {
        device.probe().map_err(|e| ScaleError::Backend {
            backend: device.name(),
            code: e.code(),
        })?;
        log::debug!("texture accelerator '{}' opened", device.name());
        Ok(Self { device })
    }

    pub fn device(&self) -> &A {
        &self.device
    }

    pub fn into_inner(self) -> A {
        self.device
    }
}

impl<A: TextureAccelerator> ResizeBackend for AcceleratorBackend<A> {
    fn name(&self) -> &'static str {
        self.device.name()
    }

    fn supports(&self, format: PixelFormat, interpolate: bool) -> bool {
        self.device
            .supports(format, TextureFilter::from_interpolate(interpolate))
    }

    fn resize(&self, job: &mut ResizeJob<'_, '_>) -> ScaleResult<Attempt> {
        let filter = TextureFilter::from_interpolate(job.interpolate());
        match self
            .device
            .scale_blit(&job.source, &mut job.destination, filter)
        {
            Ok(()) => Ok(Attempt::Completed),
            Err(AccelError::Unavailable) => {
                log::warn!(
                    "texture accelerator '{}' unavailable, falling back to software",
                    self.device.name()
                );
                Ok(Attempt::Declined)
            }
            Err(AccelError::Driver(code)) => Err(ScaleError::Backend {
                backend: self.device.name(),
                code,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Dead;

    impl TextureAccelerator for Dead {
        fn probe(&self) -> Result<(), AccelError> {
            Err(AccelError::Driver(-19))
        }

        fn supports(&self, _: PixelFormat, _: TextureFilter) -> bool {
            true
        }

        fn scale_blit(
            &self,
            _: &ImageRef<'_>,
            _: &mut ImageMut<'_>,
            _: TextureFilter,
        ) -> Result<(), AccelError> {
            Ok(())
        }
    }

    #[test]
    fn test_open_failure_is_constructor_error() {
        let err = AcceleratorBackend::open(Dead).unwrap_err();
        assert!(matches!(
            err,
            ScaleError::Backend {
                backend: "accelerator",
                code: -19
            }
        ));
    }

    #[test]
    fn test_software_backends_support_dispatchable_formats() {
        for format in PixelFormat::ALL {
            let expected = format.layout().is_some();
            assert_eq!(ScalarBackend.supports(format, true), expected);
            assert_eq!(VectorBackend.supports(format, false), expected);
        }
    }

    #[test]
    fn test_accel_error_codes() {
        assert_eq!(AccelError::Unavailable.code(), AccelError::UNAVAILABLE_CODE);
        assert_eq!(AccelError::Driver(-5).code(), -5);
        assert_eq!(TextureFilter::from_interpolate(true), TextureFilter::Bilinear);
    }
}
