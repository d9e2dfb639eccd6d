//! Parameter marshaling shared by the per-pixel kernel renderers.
//!
//! Scene params are validated and flattened once per renderer invocation,
//! the same role the uniform upload plays on a GPU path. A params shape
//! that does not match the scene's fractal type is a fatal configuration
//! error, never silently substituted.

use fractalforge_core::{ConfigError, FractalParams, QualityHint, Scene, Viewport};

use crate::complex::Complex;
use crate::kernels::{EscapeKind, RootKind};

/// Flattened escape-time kernel parameters.
#[derive(Clone, Copy, Debug)]
pub struct EscapeUniforms {
    pub kind: EscapeKind,
    pub max_iter: u32,
    pub escape_radius: f64,
    pub parameter: f64,
    pub julia_c: Complex,
}

impl EscapeUniforms {
    pub fn from_scene(scene: &Scene) -> Result<Self, ConfigError> {
        let kind = EscapeKind::from_type(scene.fractal_type).ok_or_else(|| mismatch(scene))?;
        match (&scene.params, kind.is_julia()) {
            (FractalParams::EscapeTime(p), false) => Ok(Self {
                kind,
                max_iter: p.max_iter,
                escape_radius: p.escape_radius,
                parameter: p.parameter,
                julia_c: Complex::ZERO,
            }),
            (FractalParams::Julia(p), true) => Ok(Self {
                kind,
                max_iter: p.max_iter,
                escape_radius: p.escape_radius,
                parameter: p.parameter,
                julia_c: Complex::new(p.c_re, p.c_im),
            }),
            _ => Err(mismatch(scene)),
        }
    }

    /// Iteration cap for a pass: interactive passes run at 60% of the
    /// configured cap, floored at 40, to bound per-pixel cost.
    pub fn iter_cap(&self, quality: QualityHint) -> u32 {
        match quality {
            QualityHint::Interactive => ((self.max_iter as f64 * 0.6) as u32).max(40),
            QualityHint::Final => self.max_iter,
        }
    }
}

/// Flattened root-finding kernel parameters.
#[derive(Clone, Copy, Debug)]
pub struct RootUniforms {
    pub kind: RootKind,
    pub max_iter: u32,
    pub tolerance: f64,
    pub parameter: f64,
}

impl RootUniforms {
    pub fn from_scene(scene: &Scene) -> Result<Self, ConfigError> {
        let kind = RootKind::from_type(scene.fractal_type).ok_or_else(|| mismatch(scene))?;
        match &scene.params {
            FractalParams::RootFinding(p) => Ok(Self {
                kind,
                max_iter: p.max_iter,
                tolerance: p.tolerance,
                parameter: p.parameter,
            }),
            _ => Err(mismatch(scene)),
        }
    }

    /// Same policy as the escape-time cap, with a lower floor of 20.
    pub fn iter_cap(&self, quality: QualityHint) -> u32 {
        match quality {
            QualityHint::Interactive => ((self.max_iter as f64 * 0.6) as u32).max(20),
            QualityHint::Final => self.max_iter,
        }
    }
}

fn mismatch(scene: &Scene) -> ConfigError {
    use fractalforge_core::KernelFamily;
    ConfigError::ParamsMismatch {
        fractal_type: scene.fractal_type.tag().to_string(),
        expected: match scene.fractal_type.family() {
            KernelFamily::EscapeTime if scene.fractal_type.is_julia() => "julia",
            KernelFamily::EscapeTime => "escape-time",
            KernelFamily::RootFinding => "root-finding",
            KernelFamily::Curve => "koch",
            KernelFamily::Triangle => "sierpinski",
        },
    }
}

/// Pixel-to-world transform for one pass, including viewport rotation and
/// the pass's resolution scale.
#[derive(Clone, Copy, Debug)]
pub struct FrameTransform {
    center: Complex,
    scale: f64,
    sin_rotation: f64,
    cos_rotation: f64,
    half_width: f64,
    half_height: f64,
}

impl FrameTransform {
    pub fn new(viewport: &Viewport, width: u32, height: u32, resolution_scale: f64) -> Self {
        let (sin_rotation, cos_rotation) = viewport.rotation.sin_cos();
        Self {
            center: Complex::new(viewport.center_x, viewport.center_y),
            scale: viewport.scale * resolution_scale,
            sin_rotation,
            cos_rotation,
            half_width: width as f64 / 2.0,
            half_height: height as f64 / 2.0,
        }
    }

    /// World coordinate of a pixel center. Buffer row 0 is the top of the
    /// image; world y grows upward.
    pub fn world_at(&self, px: u32, py: u32) -> Complex {
        let dx = px as f64 + 0.5 - self.half_width;
        let dy = self.half_height - (py as f64 + 0.5);
        Complex::new(
            self.center.re + (dx * self.cos_rotation - dy * self.sin_rotation) * self.scale,
            self.center.im + (dx * self.sin_rotation + dy * self.cos_rotation) * self.scale,
        )
    }
}
