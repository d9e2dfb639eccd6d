pub mod cancellation;
pub mod canvas;
pub mod complex;
pub mod escape_renderer;
pub mod kernels;
pub mod koch;
pub mod newton_renderer;
pub mod presets;
pub mod registry;
pub mod renderer;
pub mod scheduler;
pub mod sierpinski;
pub mod tiles;
pub mod uniforms;

pub use cancellation::CancelToken;
pub use canvas::{PixelCanvas, RenderTarget};
pub use complex::Complex;
pub use escape_renderer::EscapeTimeRenderer;
pub use koch::KochRenderer;
pub use newton_renderer::RootFindingRenderer;
pub use presets::builtin_presets;
pub use registry::{default_registry, FractalDefinition, FractalRegistry};
pub use renderer::{FractalRenderer, RenderError, RenderPass};
pub use scheduler::{render_still, RenderScheduler, FINAL_DEBOUNCE_MS};
pub use sierpinski::SierpinskiRenderer;
pub use tiles::{generate_tiles, PixelRect};
