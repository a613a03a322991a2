/// A piecewise linear lookup table over ordered samples
///
/// The abscissae must be strictly increasing and both sequences must have the same
/// length; this is the caller's responsibility and is only checked in debug builds.
/// Queries outside of the sampled range return the nearest boundary value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InterpLUT {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl InterpLUT {
    /// Create a lookup table from parallel sample sequences
    #[must_use]
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Self {
        debug_assert_eq!(xs.len(), ys.len());
        debug_assert!(xs.windows(2).all(|pair| pair[0] < pair[1]));

        Self { xs, ys }
    }

    /// The sample abscissae
    #[inline]
    #[must_use]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// The sample values
    #[inline]
    #[must_use]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Interpolate the table at `x`
    ///
    /// An empty table returns 0, and a NaN query returns the first value.
    ///
    /// # Examples
    ///
    /// ```
    /// use quintic_paths::InterpLUT;
    ///
    /// let lut = InterpLUT::new(vec![0., 1., 3.], vec![0., 10., 30.]);
    ///
    /// assert_eq!(lut.lookup(2.), 20.);
    /// assert_eq!(lut.lookup(-5.), 0.);
    /// assert_eq!(lut.lookup(100.), 30.);
    /// ```
    #[must_use]
    pub fn lookup(&self, x: f64) -> f64 {
        let (Some(&first_x), Some(&last_x)) = (self.xs.first(), self.xs.last()) else {
            return 0.;
        };

        if x <= first_x || x.is_nan() {
            return self.ys[0];
        }

        let last = self.xs.len() - 1;
        if x >= last_x {
            return self.ys[last];
        }

        // first index with an abscissa of at least x; never 0 here
        let idx = self.xs.partition_point(|&sample| sample < x);
        if self.xs[idx] == x {
            return self.ys[idx];
        }

        let (x0, x1) = (self.xs[idx - 1], self.xs[idx]);
        let (y0, y1) = (self.ys[idx - 1], self.ys[idx]);

        y0 + (x - x0) * (y1 - y0) / (x1 - x0)
    }
}
