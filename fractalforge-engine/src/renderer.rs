//! Renderer capability interface shared by the kernel and geometric
//! renderers.

use fractalforge_core::{ConfigError, QualityHint, Scene};
use thiserror::Error;

use crate::cancellation::CancelToken;
use crate::canvas::RenderTarget;

/// One scheduler-issued pass of a render job.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderPass {
    pub index: usize,
    pub count: usize,
    pub tile_size: u32,
    pub resolution_scale: f64,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The drawing surface could not be acquired. The renderer goes inert
    /// for this job; the next request constructs a fresh one.
    #[error("render surface unavailable: {0}")]
    SurfaceUnavailable(String),
}

/// A renderer bound to one canvas at a time.
///
/// `render` is one pass of a scheduler job: the renderer adopts the job id
/// and must abort when the id it sees no longer matches, or when the
/// cancellation token fires, checking at every suspension point.
/// `render_still` is the one-shot export path with no job machinery.
pub trait FractalRenderer {
    fn render(
        &mut self,
        scene: &Scene,
        canvas: &mut dyn RenderTarget,
        pass: &RenderPass,
        job_id: u64,
        quality: QualityHint,
        cancel: &CancelToken,
    ) -> Result<(), RenderError>;

    fn render_still(
        &mut self,
        scene: &Scene,
        canvas: &mut dyn RenderTarget,
        quality: QualityHint,
    ) -> Result<(), RenderError>;

    /// Release renderer-held resources. Default is a no-op; only renderer
    /// kinds holding external resources need it.
    fn destroy(&mut self) {}
}
