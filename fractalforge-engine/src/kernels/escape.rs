//! Escape-time iteration for the plane-distortion family.

use fractalforge_core::FractalType;

use crate::complex::Complex;

/// Escape-time kernel variant. The Julia members fix the additive constant
/// and start the orbit at the pixel's world coordinate; the others start at
/// zero with the pixel supplying the constant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EscapeKind {
    Mandelbrot,
    Multibrot3,
    Tricorn,
    BurningShip,
    Julia,
    TricornJulia,
    BurningShipJulia,
}

impl EscapeKind {
    pub fn from_type(fractal_type: FractalType) -> Option<Self> {
        match fractal_type {
            FractalType::Mandelbrot => Some(EscapeKind::Mandelbrot),
            FractalType::Multibrot3 => Some(EscapeKind::Multibrot3),
            FractalType::Tricorn => Some(EscapeKind::Tricorn),
            FractalType::BurningShip => Some(EscapeKind::BurningShip),
            FractalType::Julia => Some(EscapeKind::Julia),
            FractalType::TricornJulia => Some(EscapeKind::TricornJulia),
            FractalType::BurningShipJulia => Some(EscapeKind::BurningShipJulia),
            _ => None,
        }
    }

    pub fn is_julia(&self) -> bool {
        matches!(
            self,
            EscapeKind::Julia | EscapeKind::TricornJulia | EscapeKind::BurningShipJulia
        )
    }
}

/// Result of iterating one point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EscapeSample {
    /// Integer iteration count at escape; `max_iter` for interior points.
    pub iterations: u32,
    /// Smoothed fractional count; equals `iterations` for interior points.
    pub smooth: f64,
    pub escaped: bool,
}

fn lerp2(a: Complex, b: Complex, t: f64) -> Complex {
    Complex::new(a.re + (b.re - a.re) * t, a.im + (b.im - a.im) * t)
}

fn square(z: Complex) -> Complex {
    Complex::new(z.re * z.re - z.im * z.im, 2.0 * z.re * z.im)
}

/// Iterate the escape-time map for one point.
///
/// `parameter` is a phase angle in degrees for the rotated quadratic/cubic
/// members and a [0, 1] conjugation/fold blend for tricorn and burning-ship
/// (fixed at full strength for their Julia members). `julia_c` is read only
/// by Julia members, rotated by the phase.
pub fn escape_time(
    kind: EscapeKind,
    world: Complex,
    julia_c: Complex,
    parameter: f64,
    max_iter: u32,
    escape_radius: f64,
) -> EscapeSample {
    let phase = parameter.to_radians();
    let c = if kind.is_julia() {
        julia_c.rotate(phase)
    } else {
        world
    };
    let mut z = if kind.is_julia() {
        world
    } else {
        Complex::ZERO
    };
    let escape_r_sq = escape_radius * escape_radius;

    for i in 0..max_iter {
        let next = match kind {
            EscapeKind::Mandelbrot => square(z.rotate(phase)).add(c),
            EscapeKind::Multibrot3 => {
                let zp = z.rotate(phase);
                let x_sq = zp.re * zp.re;
                let y_sq = zp.im * zp.im;
                Complex::new(
                    zp.re * (x_sq - 3.0 * y_sq),
                    zp.im * (3.0 * x_sq - y_sq),
                )
                .add(c)
            }
            EscapeKind::Tricorn | EscapeKind::TricornJulia => {
                let blend = if kind == EscapeKind::Tricorn {
                    parameter.clamp(0.0, 1.0)
                } else {
                    1.0
                };
                let base = lerp2(z, Complex::new(z.re, -z.im), blend);
                square(base).add(c)
            }
            EscapeKind::BurningShip | EscapeKind::BurningShipJulia => {
                let blend = if kind == EscapeKind::BurningShip {
                    parameter.clamp(0.0, 1.0)
                } else {
                    1.0
                };
                let base = lerp2(z, Complex::new(z.re.abs(), z.im.abs()), blend);
                square(base).add(c)
            }
            EscapeKind::Julia => square(z).add(c),
        };
        z = next;

        let z_norm_sq = z.norm_sq();
        if z_norm_sq > escape_r_sq {
            let log_zn = z_norm_sq.ln() / 2.0;
            let nu = (log_zn / std::f64::consts::LN_2).ln() / std::f64::consts::LN_2;
            return EscapeSample {
                iterations: i,
                smooth: i as f64 + 1.0 - nu,
                escaped: true,
            };
        }
    }

    EscapeSample {
        iterations: max_iter,
        smooth: max_iter as f64,
        escaped: false,
    }
}
