//! Adaptive quadrature and bracketed root finding

use crate::{Error, Result};

/// Relative tolerance used for arc length integrals
pub const INTEGRATION_TOLERANCE: f64 = 1e-12;

/// Absolute tolerance on the root returned by [`brent`]
pub const ROOT_TOLERANCE: f64 = 1e-12;

const MAX_DEPTH: u32 = 30;
const MAX_ITERATIONS: usize = 100;

// Positive Kronrod abscissae on [-1, 1]; odd indices are shared with the 7-point Gauss rule
const XGK: [f64; 8] = [
    0.991_455_371_120_812_639_206_854_697_526_329,
    0.949_107_912_342_758_524_526_189_684_047_851,
    0.864_864_423_359_769_072_789_712_788_640_926,
    0.741_531_185_599_394_439_863_864_773_280_788,
    0.586_087_235_467_691_130_294_144_845_693_013,
    0.405_845_151_377_397_166_906_606_412_076_961,
    0.207_784_955_007_898_467_600_689_403_773_245,
    0.,
];

const WGK: [f64; 8] = [
    0.022_935_322_010_529_224_963_732_008_058_970,
    0.063_092_092_629_978_553_290_700_663_189_204,
    0.104_790_010_322_250_183_839_876_322_541_518,
    0.140_653_259_715_525_918_745_189_590_510_238,
    0.169_004_726_639_267_902_826_583_426_598_550,
    0.190_350_578_064_785_409_913_256_402_421_014,
    0.204_432_940_075_298_892_414_161_999_234_649,
    0.209_482_141_084_727_828_012_999_174_891_714,
];

const WG: [f64; 4] = [
    0.129_484_966_168_869_693_270_611_432_679_082,
    0.279_705_391_489_276_667_901_467_771_423_780,
    0.381_830_050_505_118_944_950_369_775_488_975,
    0.417_959_183_673_469_387_755_102_040_816_327,
];

/// One 15-point Kronrod estimate over `[a, b]` with the embedded 7-point Gauss error
fn gauss_kronrod<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64) -> (f64, f64) {
    let center = 0.5 * (a + b);
    let half = 0.5 * (b - a);

    let fc = f(center);
    let mut kronrod = fc * WGK[7];
    let mut gauss = fc * WG[3];

    for (i, (&x, &wk)) in XGK.iter().zip(&WGK).take(7).enumerate() {
        let dx = half * x;
        let sum = f(center - dx) + f(center + dx);
        kronrod += wk * sum;

        if i % 2 == 1 {
            gauss += WG[i / 2] * sum;
        }
    }

    (kronrod * half, ((kronrod - gauss) * half).abs())
}

fn integrate_recursive<F: Fn(f64) -> f64>(
    f: &F,
    a: f64,
    b: f64,
    estimate: f64,
    error: f64,
    tolerance: f64,
    depth: u32,
) -> Result<f64> {
    if error <= tolerance || error <= 50. * f64::EPSILON * estimate.abs() {
        return Ok(estimate);
    }

    if depth >= MAX_DEPTH {
        return Err(Error::numerical(format!(
            "adaptive quadrature did not converge on [{a}, {b}] (error estimate {error:e})"
        )));
    }

    let mid = 0.5 * (a + b);
    let (left, left_err) = gauss_kronrod(f, a, mid);
    let (right, right_err) = gauss_kronrod(f, mid, b);

    Ok(integrate_recursive(f, a, mid, left, left_err, 0.5 * tolerance, depth + 1)?
        + integrate_recursive(f, mid, b, right, right_err, 0.5 * tolerance, depth + 1)?)
}

/// Integrate `f` over `[a, b]` to the given relative tolerance
///
/// The interval is bisected until the Gauss/Kronrod difference on every piece is small
/// enough. Fails with [`Error::NumericalFailure`] if that needs more than a fixed number
/// of bisections, or if the integrand is not finite.
///
/// # Examples
///
/// ```
/// use quintic_paths::numeric::integrate;
///
/// let area = integrate(|x| x.sin(), 0., core::f64::consts::PI, 1e-12).unwrap();
/// assert!((area - 2.).abs() < 1e-10);
/// ```
pub fn integrate<F: Fn(f64) -> f64>(f: F, a: f64, b: f64, rel_tolerance: f64) -> Result<f64> {
    if a == b {
        return Ok(0.);
    }

    let (estimate, error) = gauss_kronrod(&f, a, b);
    if !estimate.is_finite() {
        return Err(Error::numerical(format!("integrand is not finite on [{a}, {b}]")));
    }

    let tolerance = (rel_tolerance * estimate.abs()).max(f64::MIN_POSITIVE);
    integrate_recursive(&f, a, b, estimate, error, tolerance, 0)
}

/// Find a root of `f` inside `[a, b]` with Brent's method
///
/// `f(a)` and `f(b)` must not share a sign. Fails with [`Error::NumericalFailure`] if the
/// root is not bracketed or the iteration limit is reached.
///
/// # Examples
///
/// ```
/// use quintic_paths::numeric::brent;
///
/// let root = brent(|x| x * x - 2., 0., 2., 1e-12).unwrap();
/// assert!((root - 2f64.sqrt()).abs() < 1e-10);
/// ```
pub fn brent<F: FnMut(f64) -> f64>(mut f: F, a: f64, b: f64, tolerance: f64) -> Result<f64> {
    let (mut a, mut b) = (a, b);
    let mut fa = f(a);
    let mut fb = f(b);

    if fa == 0. {
        return Ok(a);
    }
    if fb == 0. {
        return Ok(b);
    }
    if fa.signum() == fb.signum() || !fa.is_finite() || !fb.is_finite() {
        return Err(Error::numerical(format!(
            "root is not bracketed by [{a}, {b}] (f(a) = {fa}, f(b) = {fb})"
        )));
    }

    let (mut c, mut fc) = (a, fa);
    let mut d = b - a;
    let mut e = d;

    for _ in 0..MAX_ITERATIONS {
        if fb.signum() == fc.signum() {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }

        // keep b as the best estimate
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol = 2. * f64::EPSILON * b.abs() + 0.5 * tolerance;
        let m = 0.5 * (c - b);

        if m.abs() <= tol || fb == 0. {
            return Ok(b);
        }

        if e.abs() >= tol && fa.abs() > fb.abs() {
            // attempt inverse quadratic interpolation, or secant when only two points differ
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                (2. * m * s, 1. - s)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2. * m * q * (q - r) - (b - a) * (r - 1.)),
                    (q - 1.) * (r - 1.) * (s - 1.),
                )
            };

            if p > 0. {
                q = -q;
            } else {
                p = -p;
            }

            if 2. * p < (3. * m * q - (tol * q).abs()).min((e * q).abs()) {
                e = d;
                d = p / q;
            } else {
                d = m;
                e = m;
            }
        } else {
            d = m;
            e = m;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol { d } else { tol.copysign(m) };
        fb = f(b);
    }

    Err(Error::numerical(format!(
        "root finding did not converge within {MAX_ITERATIONS} iterations"
    )))
}
