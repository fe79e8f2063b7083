//! Regression test parameters and operations

use pixkit_core::ImageRef;

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "scale_identity")
    pub test_name: String,
    /// Current test index (incremented before each comparison)
    index: usize,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "scale_identity")
    pub fn new(test_name: &str) -> Self {
        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    fn fail(&mut self, msg: String) -> bool {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
        false
    }

    /// Compare two numeric values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value (typically a golden constant)
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Compare two byte buffers for exact equality
    ///
    /// On mismatch the first differing offset is reported.
    pub fn compare_bytes(&mut self, expected: &[u8], actual: &[u8]) -> bool {
        self.index += 1;

        if expected.len() != actual.len() {
            let msg = format!(
                "Failure in {}_reg: byte comparison for index {}\n\
                 sizes: {} vs {}",
                self.test_name,
                self.index,
                expected.len(),
                actual.len()
            );
            return self.fail(msg);
        }

        match expected.iter().zip(actual).position(|(a, b)| a != b) {
            Some(pos) => {
                let msg = format!(
                    "Failure in {}_reg: byte comparison for index {}\n\
                     first difference at offset {}: expected {}, actual {}",
                    self.test_name, self.index, pos, expected[pos], actual[pos]
                );
                self.fail(msg)
            }
            None => true,
        }
    }

    /// Compare two frames pixel by pixel
    ///
    /// Geometry and format must match; row padding is ignored.
    pub fn compare_images(&mut self, expected: &ImageRef<'_>, actual: &ImageRef<'_>) -> bool {
        self.index += 1;

        if expected.width() != actual.width()
            || expected.height() != actual.height()
            || expected.format() != actual.format()
        {
            let msg = format!(
                "Failure in {}_reg: image comparison for index {} - geometry mismatch \
                 {}x{} {} vs {}x{} {}",
                self.test_name,
                self.index,
                expected.width(),
                expected.height(),
                expected.format(),
                actual.width(),
                actual.height(),
                actual.format()
            );
            return self.fail(msg);
        }

        for y in 0..expected.height() {
            if expected.row(y) != actual.row(y) {
                let msg = format!(
                    "Failure in {}_reg: image comparison for index {} - row {} differs",
                    self.test_name, self.index, y
                );
                return self.fail(msg);
            }
        }

        true
    }

    /// Record a boolean condition
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;
        if condition {
            true
        } else {
            let msg = format!(
                "Failure in {}_reg: check for index {} - {}",
                self.test_name, self.index, what
            );
            self.fail(msg)
        }
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all tests passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
