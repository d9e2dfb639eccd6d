//! Root-finding iteration and basin classification.

use fractalforge_core::FractalType;

use crate::complex::Complex;

/// Root-finding kernel variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RootKind {
    /// Newton's method on z³ − e^{iφ}.
    NewtonZ3,
    /// Halley's method on z³ − e^{iφ}.
    HalleyZ3,
    /// Newton's method on sin(z + φ).
    NewtonSin,
}

impl RootKind {
    pub fn from_type(fractal_type: FractalType) -> Option<Self> {
        match fractal_type {
            FractalType::NewtonZ3 => Some(RootKind::NewtonZ3),
            FractalType::HalleyZ3 => Some(RootKind::HalleyZ3),
            FractalType::NewtonSin => Some(RootKind::NewtonSin),
            _ => None,
        }
    }
}

/// Result of iterating one point: the winning basin, or `None` when the
/// iteration did not converge within the cap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootSample {
    pub iterations: u32,
    pub root: Option<u8>,
}

const SQRT_3_OVER_2: f64 = 0.866_025_4;

/// Iterate the chosen method from `z0` until `|f(z)| < tolerance` or the
/// cap is reached.
///
/// Basin classification on convergence: the cubic members pick the nearest
/// of the three φ/3-rotated cube roots of unity, ties broken in root order
/// 0, 1, 2; the sine member takes `round(Re z / π)`, absolute value, mod 3.
pub fn root_find(
    kind: RootKind,
    z0: Complex,
    parameter: f64,
    max_iter: u32,
    tolerance: f64,
) -> RootSample {
    let phase = parameter.to_radians();
    let root_phase = phase / 3.0;
    let roots = [
        Complex::new(1.0, 0.0).rotate(root_phase),
        Complex::new(-0.5, SQRT_3_OVER_2).rotate(root_phase),
        Complex::new(-0.5, -SQRT_3_OVER_2).rotate(root_phase),
    ];

    let mut z = z0;

    for i in 0..max_iter {
        let (f, f_prime, f_second) = match kind {
            RootKind::NewtonSin => {
                let shifted = z.add(Complex::new(phase, 0.0));
                (shifted.sin(), shifted.cos(), Complex::ZERO)
            }
            RootKind::NewtonZ3 | RootKind::HalleyZ3 => {
                let z_sq = z.mul(z);
                let z_cu = z_sq.mul(z);
                (
                    z_cu.sub(Complex::from_angle(phase)),
                    z_sq.scale(3.0),
                    z.scale(6.0),
                )
            }
        };

        if f.abs() < tolerance {
            let root = match kind {
                RootKind::NewtonSin => {
                    let n = (z.re / std::f64::consts::PI).round();
                    (n.abs() % 3.0) as u8
                }
                _ => {
                    let d0 = z.sub(roots[0]).abs();
                    let d1 = z.sub(roots[1]).abs();
                    let d2 = z.sub(roots[2]).abs();
                    if d0 <= d1 && d0 <= d2 {
                        0
                    } else if d1 <= d2 {
                        1
                    } else {
                        2
                    }
                }
            };
            return RootSample {
                iterations: i,
                root: Some(root),
            };
        }

        z = match kind {
            RootKind::HalleyZ3 => {
                let numerator = f.mul(f_prime).scale(2.0);
                let denominator = f_prime.mul(f_prime).scale(2.0).sub(f.mul(f_second));
                z.sub(numerator.div(denominator))
            }
            _ => z.sub(f.div(f_prime)),
        };
    }

    RootSample {
        iterations: max_iter,
        root: None,
    }
}
