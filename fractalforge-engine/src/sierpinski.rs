//! Sierpinski gasket renderer (recursive triangle subdivision).

use fractalforge_core::{grade, sample_gradient, ConfigError, FractalParams, QualityHint, Rgba,
    Scene};

use crate::cancellation::CancelToken;
use crate::canvas::{resize_to_scale, RenderTarget};
use crate::renderer::{FractalRenderer, RenderError, RenderPass};

const BACKGROUND: Rgba = Rgba {
    r: 0.043,
    g: 0.059,
    b: 0.071,
    a: 1.0,
};

#[derive(Clone, Copy)]
struct Triangle {
    a: (f64, f64),
    b: (f64, f64),
    c: (f64, f64),
}

/// Renders the gasket by midpoint subdivision, one depth level per tick
/// with a cancellation check in between, like the Koch renderer.
pub struct SierpinskiRenderer;

impl SierpinskiRenderer {
    pub fn new() -> Self {
        Self
    }

    fn render_scene(
        &mut self,
        scene: &Scene,
        canvas: &mut dyn RenderTarget,
        pass: Option<&RenderPass>,
        quality: QualityHint,
        cancel: Option<&CancelToken>,
    ) -> Result<(), RenderError> {
        let cancelled = || cancel.is_some_and(CancelToken::is_cancelled);
        if cancelled() {
            return Ok(());
        }

        let resolution_scale = pass
            .map(|p| p.resolution_scale)
            .unwrap_or(scene.render.resolution_scale)
            .max(1.0);
        let (width, height) = resize_to_scale(canvas, resolution_scale);

        let depth_configured = match &scene.params {
            FractalParams::Sierpinski(p) => p.depth,
            _ => {
                return Err(RenderError::Config(ConfigError::ParamsMismatch {
                    fractal_type: scene.fractal_type.tag().to_string(),
                    expected: "sierpinski",
                }))
            }
        };

        let max_depth = match quality {
            QualityHint::Interactive => ((depth_configured as f64 * 0.6).round() as u32).max(1),
            QualityHint::Final => depth_configured,
        };
        let depth = match pass {
            Some(p) => {
                let fraction = (p.index + 1) as f64 / p.count as f64;
                ((max_depth as f64 * fraction).round() as u32).max(1)
            }
            None => max_depth,
        };

        let padding = width as f64 * 0.08;
        let base = Triangle {
            a: (width as f64 / 2.0, padding),
            b: (padding, height as f64 - padding),
            c: (width as f64 - padding, height as f64 - padding),
        };

        let mut triangles = vec![base];
        for _ in 0..depth {
            triangles = subdivide(&triangles);
            if cancelled() {
                return Ok(());
            }
        }

        canvas.clear(BACKGROUND);

        let min_y = base.a.1;
        let max_y = base.b.1;
        let mut profile = scene.color.clone();
        profile.normalize_stops();

        for triangle in &triangles {
            let centroid_y = (triangle.a.1 + triangle.b.1 + triangle.c.1) / 3.0;
            let t = (centroid_y - min_y) / (max_y - min_y).max(1.0);
            let color = grade(sample_gradient(&profile.gradient_stops, t), &profile);
            canvas.fill_triangle(triangle.a, triangle.b, triangle.c, color);
        }

        Ok(())
    }
}

impl Default for SierpinskiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl FractalRenderer for SierpinskiRenderer {
    fn render(
        &mut self,
        scene: &Scene,
        canvas: &mut dyn RenderTarget,
        pass: &RenderPass,
        _job_id: u64,
        quality: QualityHint,
        cancel: &CancelToken,
    ) -> Result<(), RenderError> {
        self.render_scene(scene, canvas, Some(pass), quality, Some(cancel))
    }

    fn render_still(
        &mut self,
        scene: &Scene,
        canvas: &mut dyn RenderTarget,
        quality: QualityHint,
    ) -> Result<(), RenderError> {
        self.render_scene(scene, canvas, None, quality, None)
    }
}

/// One gasket step: keep the three corner triangles at half scale, discard
/// the center.
fn subdivide(triangles: &[Triangle]) -> Vec<Triangle> {
    let midpoint = |p: (f64, f64), q: (f64, f64)| ((p.0 + q.0) / 2.0, (p.1 + q.1) / 2.0);
    let mut next = Vec::with_capacity(triangles.len() * 3);

    for triangle in triangles {
        let ab = midpoint(triangle.a, triangle.b);
        let bc = midpoint(triangle.b, triangle.c);
        let ca = midpoint(triangle.c, triangle.a);
        next.push(Triangle {
            a: triangle.a,
            b: ab,
            c: ca,
        });
        next.push(Triangle {
            a: ab,
            b: triangle.b,
            c: bc,
        });
        next.push(Triangle {
            a: ca,
            b: bc,
            c: triangle.c,
        });
    }

    next
}
