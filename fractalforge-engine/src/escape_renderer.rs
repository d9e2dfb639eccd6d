//! Per-pixel escape-time renderer.

use fractalforge_core::{dither_offset, grade, sample_gradient, ColorProfile, QualityHint, Scene};

use crate::cancellation::CancelToken;
use crate::canvas::{resize_to_scale, RenderTarget};
use crate::kernels::escape_time;
use crate::renderer::{FractalRenderer, RenderError, RenderPass};
use crate::tiles::{generate_tiles, PixelRect};
use crate::uniforms::{EscapeUniforms, FrameTransform};

/// Renders the seven escape-time variants by evaluating the iteration
/// kernel for every pixel of the backing buffer.
///
/// Final-quality passes with a tile size ≥ 4 are dispatched block by
/// block; the cancellation/job check between blocks lets a superseding
/// request interrupt a long render mid-sweep. Everything else is a single
/// dispatch over the whole buffer.
pub struct EscapeTimeRenderer {
    active_job: u64,
}

impl EscapeTimeRenderer {
    pub fn new() -> Self {
        Self { active_job: 0 }
    }

    fn is_stale(&self, guard: Option<(&CancelToken, u64)>) -> bool {
        guard.is_some_and(|(cancel, job_id)| cancel.is_cancelled() || job_id != self.active_job)
    }

    fn render_internal(
        &mut self,
        scene: &Scene,
        canvas: &mut dyn RenderTarget,
        pass: Option<&RenderPass>,
        quality: QualityHint,
        guard: Option<(&CancelToken, u64)>,
    ) -> Result<(), RenderError> {
        if self.is_stale(guard) {
            return Ok(());
        }

        let resolution_scale = pass
            .map(|p| p.resolution_scale)
            .unwrap_or(scene.render.resolution_scale)
            .max(1.0);
        let (width, height) = resize_to_scale(canvas, resolution_scale);

        if self.is_stale(guard) {
            return Ok(());
        }

        let uniforms = EscapeUniforms::from_scene(scene)?;
        let iter_cap = uniforms.iter_cap(quality);
        let frame = FrameTransform::new(&scene.viewport, width, height, resolution_scale);
        let mut profile = scene.color.clone();
        profile.normalize_stops();

        let tile_size = pass.map(|p| p.tile_size).unwrap_or(1).max(1);
        let use_tiling = quality == QualityHint::Final && tile_size >= 4;

        if !use_tiling {
            let rect = PixelRect::new(0, 0, width, height);
            let pixels = shade_block(rect, &frame, &uniforms, iter_cap, &profile);
            canvas.blit_tile(rect, &pixels);
            return Ok(());
        }

        for rect in generate_tiles(width, height, tile_size) {
            if self.is_stale(guard) {
                return Ok(());
            }
            let pixels = shade_block(rect, &frame, &uniforms, iter_cap, &profile);
            canvas.blit_tile(rect, &pixels);
        }

        Ok(())
    }
}

impl Default for EscapeTimeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl FractalRenderer for EscapeTimeRenderer {
    fn render(
        &mut self,
        scene: &Scene,
        canvas: &mut dyn RenderTarget,
        pass: &RenderPass,
        job_id: u64,
        quality: QualityHint,
        cancel: &CancelToken,
    ) -> Result<(), RenderError> {
        self.active_job = job_id;
        self.render_internal(scene, canvas, Some(pass), quality, Some((cancel, job_id)))
    }

    fn render_still(
        &mut self,
        scene: &Scene,
        canvas: &mut dyn RenderTarget,
        quality: QualityHint,
    ) -> Result<(), RenderError> {
        self.render_internal(scene, canvas, None, quality, None)
    }
}

fn shade_block(
    rect: PixelRect,
    frame: &FrameTransform,
    uniforms: &EscapeUniforms,
    iter_cap: u32,
    profile: &ColorProfile,
) -> Vec<[u8; 4]> {
    let mut pixels = Vec::with_capacity(rect.area() as usize);

    for row in 0..rect.height {
        for col in 0..rect.width {
            let px = rect.x + col;
            let py = rect.y + row;
            let world = frame.world_at(px, py);
            let sample = escape_time(
                uniforms.kind,
                world,
                uniforms.julia_c,
                uniforms.parameter,
                iter_cap,
                uniforms.escape_radius,
            );

            let count = if profile.smooth_coloring {
                sample.smooth
            } else {
                sample.iterations as f64
            };
            let t = count / iter_cap as f64;

            let mut color = grade(sample_gradient(&profile.gradient_stops, t), profile);
            if profile.dither {
                let offset = dither_offset(px, py);
                color.r += offset;
                color.g += offset;
                color.b += offset;
            }
            pixels.push(color.to_rgba8());
        }
    }

    pixels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::PixelCanvas;
    use fractalforge_core::{
        EscapeTimeParams, FractalParams, FractalType, GradientStop, Levels, RenderSettings, Rgba,
        RootFindingParams, Viewport,
    };

    fn mandelbrot_scene() -> Scene {
        Scene {
            id: "scene_escape_test".to_string(),
            fractal_type: FractalType::Mandelbrot,
            params: FractalParams::EscapeTime(EscapeTimeParams {
                max_iter: 120,
                escape_radius: 4.0,
                parameter: 0.0,
            }),
            viewport: Viewport::new(-0.5, 0.0, 0.05),
            color: ColorProfile {
                gradient_stops: vec![
                    GradientStop {
                        t: 0.0,
                        color: Rgba::opaque(0.0, 0.0, 0.0),
                    },
                    GradientStop {
                        t: 1.0,
                        color: Rgba::opaque(1.0, 1.0, 1.0),
                    },
                ],
                smooth_coloring: true,
                gamma: 1.0,
                levels: Levels {
                    black: 0.0,
                    white: 1.0,
                },
                hue_shift: 0.0,
                saturation: 1.0,
                exposure: 0.0,
                dither: false,
            },
            render: RenderSettings::default(),
        }
    }

    #[test]
    fn render_still_sizes_buffer_and_paints_set_white() {
        let mut renderer = EscapeTimeRenderer::new();
        let mut canvas = PixelCanvas::new(64.0, 48.0, 1.0);
        let scene = mandelbrot_scene();

        renderer
            .render_still(&scene, &mut canvas, QualityHint::Final)
            .unwrap();

        assert_eq!(canvas.backing_width(), 64);
        assert_eq!(canvas.backing_height(), 48);

        // The viewport center (-0.5, 0) is interior: t = 1 maps to white.
        assert_eq!(canvas.pixel(32, 24), [255, 255, 255, 255]);
        // A corner pixel is far outside and escapes almost immediately.
        let corner = canvas.pixel(0, 0);
        assert!(corner[0] < 64, "corner was {corner:?}");
    }

    #[test]
    fn render_still_honors_resolution_scale() {
        let mut renderer = EscapeTimeRenderer::new();
        let mut canvas = PixelCanvas::new(64.0, 48.0, 1.0);
        let mut scene = mandelbrot_scene();
        scene.render.resolution_scale = 2.0;

        renderer
            .render_still(&scene, &mut canvas, QualityHint::Final)
            .unwrap();

        assert_eq!(canvas.backing_width(), 32);
        assert_eq!(canvas.backing_height(), 24);
    }

    #[test]
    fn mismatched_params_are_a_fatal_config_error() {
        let mut renderer = EscapeTimeRenderer::new();
        let mut canvas = PixelCanvas::new(16.0, 16.0, 1.0);
        let mut scene = mandelbrot_scene();
        scene.params = FractalParams::RootFinding(RootFindingParams {
            max_iter: 50,
            tolerance: 1e-6,
            parameter: 0.0,
        });

        let result = renderer.render_still(&scene, &mut canvas, QualityHint::Final);
        assert!(matches!(result, Err(RenderError::Config(_))));
    }

    #[test]
    fn cancelled_token_prevents_any_drawing() {
        let mut renderer = EscapeTimeRenderer::new();
        let mut canvas = PixelCanvas::new(32.0, 32.0, 1.0);
        let scene = mandelbrot_scene();
        let cancel = CancelToken::new();
        cancel.cancel();

        let pass = RenderPass {
            index: 0,
            count: 1,
            tile_size: 1,
            resolution_scale: 1.0,
        };
        renderer
            .render(&scene, &mut canvas, &pass, 1, QualityHint::Final, &cancel)
            .unwrap();

        // Buffer was never even allocated.
        assert_eq!(canvas.backing_width(), 0);
    }

    #[test]
    fn dither_perturbs_but_stays_within_one_step() {
        let mut renderer = EscapeTimeRenderer::new();
        let mut plain_canvas = PixelCanvas::new(24.0, 24.0, 1.0);
        let mut dithered_canvas = PixelCanvas::new(24.0, 24.0, 1.0);

        let scene = mandelbrot_scene();
        let mut dithered_scene = scene.clone();
        dithered_scene.color.dither = true;

        renderer
            .render_still(&scene, &mut plain_canvas, QualityHint::Final)
            .unwrap();
        renderer
            .render_still(&dithered_scene, &mut dithered_canvas, QualityHint::Final)
            .unwrap();

        for (a, b) in plain_canvas.pixels().iter().zip(dithered_canvas.pixels()) {
            for channel in 0..3 {
                let delta = (a[channel] as i32 - b[channel] as i32).abs();
                assert!(delta <= 1, "dither moved a channel by {delta}");
            }
        }
    }
}
