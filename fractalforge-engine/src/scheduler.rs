//! Render scheduler: job identity, cancellation, debounced refinement, and
//! progressive pass planning.

use fractalforge_core::{QualityHint, Scene};

use crate::cancellation::CancelToken;
use crate::canvas::RenderTarget;
use crate::renderer::{FractalRenderer, RenderError, RenderPass};

/// Quiet period after the last interactive request before the high-quality
/// refinement job starts.
pub const FINAL_DEBOUNCE_MS: f64 = 200.0;

/// Extra coarsening applied to the single interactive pass.
const INTERACTIVE_QUALITY_FACTOR: f64 = 1.5;

struct PendingFinal {
    due_at: f64,
    scene: Scene,
}

/// One scheduler per canvas. Owns the monotonically increasing job id and
/// guarantees that only the most recent request's work reaches the canvas:
/// starting a job cancels the previous token, and every pass re-checks
/// token and job id before running.
///
/// Time is an explicit `now_ms` argument supplied by the host, which keeps
/// the debounce machinery deterministic; the host drives `tick` from its
/// frame loop or timer.
pub struct RenderScheduler {
    active_job: u64,
    cancel: Option<CancelToken>,
    pending_final: Option<PendingFinal>,
}

impl Default for RenderScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self {
            active_job: 0,
            cancel: None,
            pending_final: None,
        }
    }

    /// Handle a render request.
    ///
    /// No-op when canvas or renderer is absent. Always clears a pending
    /// debounce. An interactive hint starts a single coarse pass now and
    /// arms the refinement debounce (unless suppressed); a final hint
    /// starts the full progressive job immediately.
    pub fn render(
        &mut self,
        scene: &Scene,
        canvas: Option<&mut dyn RenderTarget>,
        renderer: Option<&mut dyn FractalRenderer>,
        hint: QualityHint,
        suppress_final: bool,
        now_ms: f64,
    ) {
        let (Some(canvas), Some(renderer)) = (canvas, renderer) else {
            return;
        };

        self.pending_final = None;

        match hint {
            QualityHint::Interactive => {
                self.start_job(scene, canvas, renderer, QualityHint::Interactive);
                if !suppress_final {
                    self.pending_final = Some(PendingFinal {
                        due_at: now_ms + FINAL_DEBOUNCE_MS,
                        scene: scene.clone(),
                    });
                }
            }
            QualityHint::Final => {
                self.start_job(scene, canvas, renderer, QualityHint::Final);
            }
        }
    }

    /// Fire the debounced refinement job if its quiet period has elapsed.
    pub fn tick(
        &mut self,
        now_ms: f64,
        canvas: Option<&mut dyn RenderTarget>,
        renderer: Option<&mut dyn FractalRenderer>,
    ) {
        match &self.pending_final {
            Some(pending) if now_ms >= pending.due_at => {}
            _ => return,
        }
        let (Some(canvas), Some(renderer)) = (canvas, renderer) else {
            return;
        };

        if let Some(pending) = self.pending_final.take() {
            self.start_job(&pending.scene, canvas, renderer, QualityHint::Final);
        }
    }

    /// True while a debounced refinement is armed.
    pub fn has_pending_refinement(&self) -> bool {
        self.pending_final.is_some()
    }

    fn start_job(
        &mut self,
        scene: &Scene,
        canvas: &mut dyn RenderTarget,
        renderer: &mut dyn FractalRenderer,
        hint: QualityHint,
    ) {
        self.active_job += 1;
        let job_id = self.active_job;

        let cancel = CancelToken::new();
        if let Some(previous) = self.cancel.replace(cancel.clone()) {
            previous.cancel();
        }

        let passes = plan_passes(scene, hint);

        for pass in &passes {
            if cancel.is_cancelled() || job_id != self.active_job {
                return;
            }
            if let Err(error) = renderer.render(scene, canvas, pass, job_id, hint, &cancel) {
                // Fatal to this job only; the next edit retries naturally.
                log::warn!("render pass {}/{} failed: {error}", pass.index + 1, pass.count);
                return;
            }
        }
    }
}

/// Compute the pass plan for a job.
///
/// A final job runs one pass per configured tile size, coarsest first,
/// ending at full resolution; interactive jobs run only the coarsest pass.
/// The pass resolution scale is the scene's base scale multiplied by the
/// pass tile size (interactive passes coarsen a further 1.5×), so early
/// passes render genuinely smaller buffers that refine toward tile size 1.
fn plan_passes(scene: &Scene, hint: QualityHint) -> Vec<RenderPass> {
    let mut tile_sizes: Vec<u32> = if scene.render.progressive.enabled {
        scene.render.progressive.tile_sizes.clone()
    } else {
        vec![1]
    };
    if tile_sizes.is_empty() {
        tile_sizes.push(1);
    }
    tile_sizes.sort_unstable_by(|a, b| b.cmp(a));

    if hint == QualityHint::Interactive {
        tile_sizes.truncate(1);
    }

    let base_scale = scene.render.resolution_scale.max(1.0);
    let quality_factor = if hint == QualityHint::Interactive {
        INTERACTIVE_QUALITY_FACTOR
    } else {
        1.0
    };

    let count = tile_sizes.len();
    tile_sizes
        .into_iter()
        .enumerate()
        .map(|(index, tile_size)| RenderPass {
            index,
            count,
            tile_size,
            resolution_scale: base_scale * tile_size.max(1) as f64 * quality_factor,
        })
        .collect()
}

/// One-shot full-resolution render for off-screen export.
///
/// Bypasses job identity and debounce entirely: the render happens at the
/// scene's own resolution scale with a fresh, never-cancelled token.
pub fn render_still(
    scene: &Scene,
    canvas: &mut dyn RenderTarget,
    renderer: &mut dyn FractalRenderer,
    quality: QualityHint,
) -> Result<(), RenderError> {
    renderer.render_still(scene, canvas, quality)
}
