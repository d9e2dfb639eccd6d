//! Per-pixel root-finding (basin of attraction) renderer.

use fractalforge_core::{dither_offset, grade, sample_gradient, ColorProfile, QualityHint, Rgba, Scene};

use crate::cancellation::CancelToken;
use crate::canvas::{resize_to_scale, RenderTarget};
use crate::kernels::root_find;
use crate::renderer::{FractalRenderer, RenderError, RenderPass};
use crate::tiles::{generate_tiles, PixelRect};
use crate::uniforms::{FrameTransform, RootUniforms};

/// Fixed accent colors for the three basins, in root order.
const ROOT_ACCENTS: [Rgba; 3] = [
    Rgba {
        r: 0.95,
        g: 0.33,
        b: 0.2,
        a: 1.0,
    },
    Rgba {
        r: 0.2,
        g: 0.75,
        b: 0.7,
        a: 1.0,
    },
    Rgba {
        r: 0.95,
        g: 0.82,
        b: 0.3,
        a: 1.0,
    },
];

/// Weight of the gradient sample when blending into a basin accent.
const GRADIENT_WEIGHT: f64 = 0.35;

/// Brightness of the gradient sample for pixels that never converge.
const UNCONVERGED_DIM: f64 = 0.08;

/// Renders the Newton/Halley basin images. Tiling and quality policy
/// mirror the escape-time renderer.
pub struct RootFindingRenderer {
    active_job: u64,
}

impl RootFindingRenderer {
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

        let uniforms = RootUniforms::from_scene(scene)?;
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

impl Default for RootFindingRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl FractalRenderer for RootFindingRenderer {
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
    uniforms: &RootUniforms,
    iter_cap: u32,
    profile: &ColorProfile,
) -> Vec<[u8; 4]> {
    let mut pixels = Vec::with_capacity(rect.area() as usize);

    for row in 0..rect.height {
        for col in 0..rect.width {
            let px = rect.x + col;
            let py = rect.y + row;
            let world = frame.world_at(px, py);
            let sample = root_find(
                uniforms.kind,
                world,
                uniforms.parameter,
                iter_cap,
                uniforms.tolerance,
            );

            let t = sample.iterations as f64 / iter_cap as f64;
            let gradient = sample_gradient(&profile.gradient_stops, t);

            let mut color = match sample.root {
                // Non-basins are painted near-black so they stand apart.
                None => grade(
                    Rgba {
                        r: gradient.r * UNCONVERGED_DIM,
                        g: gradient.g * UNCONVERGED_DIM,
                        b: gradient.b * UNCONVERGED_DIM,
                        a: 1.0,
                    },
                    profile,
                ),
                Some(root) => {
                    let accent = ROOT_ACCENTS[root as usize % ROOT_ACCENTS.len()];
                    grade(
                        Rgba {
                            r: accent.r + (gradient.r - accent.r) * GRADIENT_WEIGHT,
                            g: accent.g + (gradient.g - accent.g) * GRADIENT_WEIGHT,
                            b: accent.b + (gradient.b - accent.b) * GRADIENT_WEIGHT,
                            a: 1.0,
                        },
                        profile,
                    )
                }
            };

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
