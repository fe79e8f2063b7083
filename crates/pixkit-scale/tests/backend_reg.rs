//! Backend chain regression test
//!
//! A texture accelerator that declines falls back to software with
//! identical output; a driver failure reaches the caller with its code.

use std::sync::Arc;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};

use pixkit_core::{ImageBuf, ImageMut, ImageRef, PixelFormat};
use pixkit_scale::{
    AccelError, ERR_BACKEND, Resizer, ScaleError, TextureAccelerator, TextureFilter,
    resize_image,
};
use pixkit_test::{RegParams, noise};

const READY: i32 = 0;
const BUSY: i32 = 1;

/// Scripted device: `state` is READY, BUSY or a negative driver code.
#[derive(Clone, Default)]
struct FakeUnit {
    state: Arc<AtomicI32>,
    blits: Arc<AtomicUsize>,
    probe_code: Option<i32>,
}

impl FakeUnit {
    fn set(&self, state: i32) {
        self.state.store(state, Ordering::SeqCst);
    }

    fn blits(&self) -> usize {
        self.blits.load(Ordering::SeqCst)
    }
}

impl TextureAccelerator for FakeUnit {
    fn name(&self) -> &'static str {
        "fake-tmu"
    }

    fn probe(&self) -> Result<(), AccelError> {
        match self.probe_code {
            Some(code) => Err(AccelError::Driver(code)),
            None => Ok(()),
        }
    }

    fn supports(&self, format: PixelFormat, _filter: TextureFilter) -> bool {
        matches!(format, PixelFormat::Rgb565 | PixelFormat::Argb8888)
    }

    fn scale_blit(
        &self,
        _source: &ImageRef<'_>,
        destination: &mut ImageMut<'_>,
        filter: TextureFilter,
    ) -> Result<(), AccelError> {
        self.blits.fetch_add(1, Ordering::SeqCst);
        match self.state.load(Ordering::SeqCst) {
            READY => {
                // Stand-in for the hardware: fill with a marker value
                let marker = if filter == TextureFilter::Bilinear { 0x11 } else { 0x22 };
                for y in 0..destination.height() {
                    destination.row_mut(y).fill(marker);
                }
                Ok(())
            }
            BUSY => Err(AccelError::Unavailable),
            code => Err(AccelError::Driver(code)),
        }
    }
}

fn scalar_reference(src: &ImageBuf, w: u32, h: u32) -> ImageBuf {
    let mut out = ImageBuf::new(w, h, src.format()).unwrap();
    Resizer::scalar_only()
        .resize_image(&src.view(), &mut out.view_mut(), true)
        .unwrap();
    out
}

#[test]
fn backend_reg() {
    let mut rp = RegParams::new("backend");
    let unit = FakeUnit::default();
    let resizer = Resizer::new().with_accelerator(unit.clone()).unwrap();
    rp.check(
        resizer.backend_names().first() == Some(&"fake-tmu"),
        "accelerator is tried first",
    );

    let src = noise(PixelFormat::Rgb565, 24, 18, 4).unwrap();

    // --- Test 1: ready device does the work ---
    let mut out = ImageBuf::new(12, 9, PixelFormat::Rgb565).unwrap();
    resizer
        .resize_image(&src.view(), &mut out.view_mut(), true)
        .unwrap();
    rp.compare_values(1.0, unit.blits() as f64, 0.0);
    rp.check(out.data().iter().all(|&b| b == 0x11), "device output kept");

    // --- Test 2: busy device falls back to software ---
    unit.set(BUSY);
    let mut out = ImageBuf::new(12, 9, PixelFormat::Rgb565).unwrap();
    resizer
        .resize_image(&src.view(), &mut out.view_mut(), true)
        .unwrap();
    rp.compare_values(2.0, unit.blits() as f64, 0.0);
    let expected = scalar_reference(&src, 12, 9);
    rp.compare_images(&expected.view(), &out.view());

    // --- Test 3: driver failure surfaces its code ---
    unit.set(-110);
    let mut out = ImageBuf::new(12, 9, PixelFormat::Rgb565).unwrap();
    let err = resizer
        .resize_image(&src.view(), &mut out.view_mut(), true)
        .unwrap_err();
    rp.check(
        matches!(
            err,
            ScaleError::Backend {
                backend: "fake-tmu",
                code: -110
            }
        ),
        "driver error kept",
    );
    rp.compare_values(ERR_BACKEND as f64, err.code() as f64, 0.0);
    rp.compare_values(-110.0, err.driver_code().unwrap_or(0) as f64, 0.0);

    // --- Test 4: formats the device lacks go straight to software ---
    let gray = noise(PixelFormat::Gray8, 10, 10, 6).unwrap();
    let mut out = ImageBuf::new(5, 5, PixelFormat::Gray8).unwrap();
    resizer
        .resize_image(&gray.view(), &mut out.view_mut(), true)
        .unwrap();
    rp.compare_values(3.0, unit.blits() as f64, 0.0);
    let expected = scalar_reference(&gray, 5, 5);
    rp.compare_images(&expected.view(), &out.view());

    // --- Test 5: validation runs before the device sees the job ---
    unit.set(READY);
    let mut out = ImageBuf::new(12, 9, PixelFormat::Argb8888).unwrap();
    let err = resizer
        .resize_image(&src.view(), &mut out.view_mut(), true)
        .unwrap_err();
    rp.check(
        matches!(err, ScaleError::FormatMismatch { .. }),
        "mismatch rejected",
    );
    rp.compare_values(3.0, unit.blits() as f64, 0.0);

    // --- Test 6: probe failure is a construction error ---
    let dead = FakeUnit {
        probe_code: Some(-19),
        ..FakeUnit::default()
    };
    match Resizer::new().with_accelerator(dead) {
        Err(err) => rp.compare_values(-19.0, err.driver_code().unwrap_or(0) as f64, 0.0),
        Ok(_) => rp.check(false, "dead device opened"),
    };

    // --- Test 7: the free functions never use a device ---
    let mut out = ImageBuf::new(12, 9, PixelFormat::Rgb565).unwrap();
    resize_image(&src.view(), &mut out.view_mut(), true).unwrap();
    let expected = scalar_reference(&src, 12, 9);
    rp.compare_images(&expected.view(), &out.view());
    rp.compare_values(3.0, unit.blits() as f64, 0.0);

    assert!(rp.cleanup(), "backend regression test failed");
}
