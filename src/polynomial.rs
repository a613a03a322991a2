use core::fmt;

/// Number of coefficients of a quintic
pub const COEFFS: usize = 6;

/// A single variable polynomial of degree at most five
///
/// Coefficients are stored highest degree first, so `[a, b, c, d, e, f]` is
/// `a·t⁵ + b·t⁴ + c·t³ + d·t² + e·t + f`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Polynomial {
    coeffs: [f64; COEFFS],
}

impl Polynomial {
    /// The zero polynomial
    pub const ZERO: Self = Self::new([0.; COEFFS]);

    /// Create a polynomial from its coefficients, highest degree first
    #[inline]
    #[must_use]
    pub const fn new(coeffs: [f64; COEFFS]) -> Self {
        Self { coeffs }
    }

    /// The coefficients, highest degree first
    #[inline]
    #[must_use]
    pub const fn coeffs(&self) -> [f64; COEFFS] {
        self.coeffs
    }

    /// Evaluate the polynomial at `t`
    ///
    /// # Examples
    ///
    /// ```
    /// use quintic_paths::Polynomial;
    ///
    /// // t⁵ + 2
    /// let p = Polynomial::new([1., 0., 0., 0., 0., 2.]);
    /// assert_eq!(p.evaluate(2.), 34.);
    /// ```
    #[must_use]
    pub fn evaluate(&self, t: f64) -> f64 {
        // Horner's scheme
        self.coeffs.iter().fold(0., |acc, &c| acc.mul_add(t, c))
    }

    /// The derivative of the polynomial, as a new polynomial
    #[must_use]
    pub fn first_derivative(&self) -> Self {
        let mut coeffs = [0.; COEFFS];

        // coefficient i multiplies t^(5 - i); shift every term one slot towards the end
        for i in 0..COEFFS - 1 {
            let exponent = (COEFFS - 1 - i) as f64;
            coeffs[i + 1] = self.coeffs[i] * exponent;
        }

        Self::new(coeffs)
    }

    /// The second derivative of the polynomial, as a new polynomial
    #[inline]
    #[must_use]
    pub fn second_derivative(&self) -> Self {
        self.first_derivative().first_derivative()
    }
}

impl From<[f64; COEFFS]> for Polynomial {
    #[inline]
    fn from(coeffs: [f64; COEFFS]) -> Self {
        Self::new(coeffs)
    }
}

impl fmt::Display for Polynomial {
    /// Writes the terms that are non-zero after rounding to 4 decimals, lowest degree first
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms: Vec<String> = self
            .coeffs
            .iter()
            .enumerate()
            .rev()
            .map(|(i, &c)| (i, (c * 1e4).round() / 1e4))
            .filter(|&(_, c)| c != 0.)
            .map(|(i, c)| {
                match COEFFS - 1 - i {
                    0 => format!("{c}"),
                    1 => format!("{c}t"),
                    exponent => format!("{c}t^{exponent}"),
                }
            })
            .collect();

        if terms.is_empty() {
            write!(f, "0")
        } else {
            write!(f, "{}", terms.join(" + "))
        }
    }
}
