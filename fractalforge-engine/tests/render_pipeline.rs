//! End-to-end pipeline coverage: registry → renderer → canvas, plus
//! mid-sweep cancellation through a cooperating render target.

use fractalforge_core::{QualityHint, Rgba};
use fractalforge_engine::{
    default_registry, CancelToken, EscapeTimeRenderer, FractalRenderer, PixelCanvas, PixelRect,
    RenderPass, RenderScheduler, RenderTarget,
};

#[test]
fn every_registered_type_renders_a_non_uniform_image() {
    let registry = default_registry();

    for def in registry.list() {
        let mut scene = def.default_scene.clone();
        // Widen the view so the 60x45 buffer spans the set boundary.
        scene.viewport.scale = 0.06;

        let mut renderer = (def.make_renderer)();
        let mut canvas = PixelCanvas::new(60.0, 45.0, 1.0);
        renderer
            .render_still(&scene, &mut canvas, QualityHint::Final)
            .unwrap();

        assert_eq!(canvas.backing_width(), 60, "{}", def.label);
        assert_eq!(canvas.backing_height(), 45, "{}", def.label);

        let first = canvas.pixel(0, 0);
        let distinct = canvas.pixels().iter().any(|p| *p != first);
        assert!(distinct, "{} rendered a uniform image", def.label);
    }
}

#[test]
fn scheduler_final_job_ends_at_full_resolution() {
    let registry = default_registry();
    let def = registry.get(fractalforge_core::FractalType::Mandelbrot).unwrap();

    let mut scheduler = RenderScheduler::new();
    let mut renderer = (def.make_renderer)();
    let mut canvas = PixelCanvas::new(48.0, 36.0, 1.0);

    scheduler.render(
        &def.default_scene,
        Some(&mut canvas),
        Some(&mut *renderer),
        QualityHint::Final,
        false,
        0.0,
    );

    // The last pass (tile size 1) renders at the scene's base scale.
    assert_eq!(canvas.backing_width(), 48);
    assert_eq!(canvas.backing_height(), 36);
}

#[test]
fn scheduler_interactive_job_renders_a_coarse_buffer() {
    let registry = default_registry();
    let def = registry.get(fractalforge_core::FractalType::Mandelbrot).unwrap();

    let mut scheduler = RenderScheduler::new();
    let mut renderer = (def.make_renderer)();
    let mut canvas = PixelCanvas::new(48.0, 36.0, 1.0);

    scheduler.render(
        &def.default_scene,
        Some(&mut canvas),
        Some(&mut *renderer),
        QualityHint::Interactive,
        true,
        0.0,
    );

    // Coarsest tile (16) × interactive factor (1.5) = 24× downscale.
    assert_eq!(canvas.backing_width(), 2);
    assert_eq!(canvas.backing_height(), 1);
}

/// Render target that cancels a shared token after a fixed number of tile
/// blits, emulating a superseding request arriving mid-sweep.
struct CancellingCanvas {
    inner: PixelCanvas,
    token: CancelToken,
    blits: usize,
    cancel_after: usize,
}

impl CancellingCanvas {
    fn new(inner: PixelCanvas, token: CancelToken, cancel_after: usize) -> Self {
        Self {
            inner,
            token,
            blits: 0,
            cancel_after,
        }
    }
}

impl RenderTarget for CancellingCanvas {
    fn backing_width(&self) -> u32 {
        self.inner.backing_width()
    }

    fn backing_height(&self) -> u32 {
        self.inner.backing_height()
    }

    fn display_size(&self) -> (f64, f64) {
        self.inner.display_size()
    }

    fn pixel_ratio(&self) -> f64 {
        self.inner.pixel_ratio()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.inner.resize(width, height);
    }

    fn clear(&mut self, color: Rgba) {
        self.inner.clear(color);
    }

    fn blit_tile(&mut self, rect: PixelRect, pixels: &[[u8; 4]]) {
        self.inner.blit_tile(rect, pixels);
        self.blits += 1;
        if self.blits == self.cancel_after {
            self.token.cancel();
        }
    }

    fn stroke_segment(&mut self, a: (f64, f64), b: (f64, f64), line_width: f64, color: Rgba) {
        self.inner.stroke_segment(a, b, line_width, color);
    }

    fn fill_triangle(&mut self, a: (f64, f64), b: (f64, f64), c: (f64, f64), color: Rgba) {
        self.inner.fill_triangle(a, b, c, color);
    }
}

#[test]
fn cancellation_mid_sweep_stops_further_tiles() {
    let registry = default_registry();
    let def = registry.get(fractalforge_core::FractalType::Mandelbrot).unwrap();

    let token = CancelToken::new();
    let mut canvas = CancellingCanvas::new(PixelCanvas::new(64.0, 64.0, 1.0), token.clone(), 3);
    let mut renderer = EscapeTimeRenderer::new();

    // Full-resolution final pass with 8px tiles: 8×8 = 64 tiles total.
    let pass = RenderPass {
        index: 0,
        count: 1,
        tile_size: 8,
        resolution_scale: 1.0,
    };
    renderer
        .render(
            &def.default_scene,
            &mut canvas,
            &pass,
            1,
            QualityHint::Final,
            &token,
        )
        .unwrap();

    assert_eq!(
        canvas.blits, 3,
        "tile sweep continued after cancellation fired"
    );
}

#[test]
fn small_final_tiles_dispatch_once_over_full_buffer() {
    let registry = default_registry();
    let def = registry.get(fractalforge_core::FractalType::Mandelbrot).unwrap();

    let token = CancelToken::new();
    // cancel_after = 2 would stop a tiled sweep, but a tile size below 4
    // must dispatch exactly once over the whole buffer.
    let mut canvas = CancellingCanvas::new(PixelCanvas::new(32.0, 32.0, 1.0), token.clone(), 2);
    let mut renderer = EscapeTimeRenderer::new();

    let pass = RenderPass {
        index: 0,
        count: 1,
        tile_size: 2,
        resolution_scale: 1.0,
    };
    renderer
        .render(
            &def.default_scene,
            &mut canvas,
            &pass,
            1,
            QualityHint::Final,
            &token,
        )
        .unwrap();

    assert_eq!(canvas.blits, 1);
}
