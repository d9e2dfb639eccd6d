//! Koch curve/snowflake renderer (recursive segment subdivision).

use fractalforge_core::{grade, sample_gradient, ConfigError, FractalParams, KochVariant,
    QualityHint, Rgba, Scene};

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
struct Segment {
    a: (f64, f64),
    b: (f64, f64),
}

/// Renders the Koch family by expanding segments one depth level at a
/// time. The cancellation check between levels is the yield point, so deep
/// snowflakes cannot block the host.
pub struct KochRenderer;

impl KochRenderer {
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

        let params = match &scene.params {
            FractalParams::Koch(p) => *p,
            _ => {
                return Err(RenderError::Config(ConfigError::ParamsMismatch {
                    fractal_type: scene.fractal_type.tag().to_string(),
                    expected: "koch",
                }))
            }
        };

        let depth = pass_depth(params.depth, quality, pass);
        let mut segments = base_segments(width as f64, height as f64, params.variant);

        for _ in 0..depth {
            segments = subdivide(&segments);
            if cancelled() {
                return Ok(());
            }
        }

        canvas.clear(BACKGROUND);

        let min_y = segments
            .iter()
            .map(|s| s.a.1.min(s.b.1))
            .fold(f64::INFINITY, f64::min);
        let max_y = segments
            .iter()
            .map(|s| s.a.1.max(s.b.1))
            .fold(f64::NEG_INFINITY, f64::max);
        let line_width = (width as f64 * 0.0018).max(1.0);

        let mut profile = scene.color.clone();
        profile.normalize_stops();

        for segment in &segments {
            let midpoint_y = (segment.a.1 + segment.b.1) / 2.0;
            let t = (midpoint_y - min_y) / (max_y - min_y).max(1.0);
            let color = grade(sample_gradient(&profile.gradient_stops, t), &profile);
            canvas.stroke_segment(segment.a, segment.b, line_width, color);
        }

        Ok(())
    }
}

impl Default for KochRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl FractalRenderer for KochRenderer {
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

/// Effective depth for a pass: interactive quality runs at 60% of the
/// configured depth (floor 1), and progressive passes ramp up to it.
fn pass_depth(configured: u32, quality: QualityHint, pass: Option<&RenderPass>) -> u32 {
    let max_depth = match quality {
        QualityHint::Interactive => ((configured as f64 * 0.6).round() as u32).max(1),
        QualityHint::Final => configured,
    };
    match pass {
        Some(p) => {
            let fraction = (p.index + 1) as f64 / p.count as f64;
            ((max_depth as f64 * fraction).round() as u32).max(1)
        }
        None => max_depth,
    }
}

fn base_segments(width: f64, height: f64, variant: KochVariant) -> Vec<Segment> {
    match variant {
        KochVariant::Snowflake => {
            let size = width.min(height) * 0.5;
            let center_x = width / 2.0;
            let center_y = height / 2.0 + size * 0.2;
            let mut corners = [(0.0, 0.0); 3];
            for (i, corner) in corners.iter_mut().enumerate() {
                let angle = -std::f64::consts::FRAC_PI_2
                    + i as f64 * 2.0 * std::f64::consts::PI / 3.0;
                *corner = (
                    center_x + angle.cos() * size,
                    center_y + angle.sin() * size,
                );
            }
            vec![
                Segment {
                    a: corners[0],
                    b: corners[1],
                },
                Segment {
                    a: corners[1],
                    b: corners[2],
                },
                Segment {
                    a: corners[2],
                    b: corners[0],
                },
            ]
        }
        KochVariant::Curve => {
            let padding = width * 0.1;
            vec![Segment {
                a: (padding, height / 2.0),
                b: (width - padding, height / 2.0),
            }]
        }
    }
}

/// One Koch step: each segment splits at 1/3 and 2/3 with a 60° bump at
/// the midpoint.
fn subdivide(segments: &[Segment]) -> Vec<Segment> {
    let sqrt_3 = 3f64.sqrt();
    let mut next = Vec::with_capacity(segments.len() * 4);

    for segment in segments {
        let dx = segment.b.0 - segment.a.0;
        let dy = segment.b.1 - segment.a.1;
        let p1 = segment.a;
        let p2 = (segment.a.0 + dx / 3.0, segment.a.1 + dy / 3.0);
        let p3 = (
            segment.a.0 + dx / 2.0 - sqrt_3 * dy / 6.0,
            segment.a.1 + dy / 2.0 + sqrt_3 * dx / 6.0,
        );
        let p4 = (segment.a.0 + 2.0 * dx / 3.0, segment.a.1 + 2.0 * dy / 3.0);
        let p5 = segment.b;
        next.push(Segment { a: p1, b: p2 });
        next.push(Segment { a: p2, b: p3 });
        next.push(Segment { a: p3, b: p4 });
        next.push(Segment { a: p4, b: p5 });
    }

    next
}
