pub mod canvas_size;
pub mod color;
pub mod error;
pub mod gradients;
pub mod ids;
pub mod scene;
pub mod timeline;
pub mod viewport;

pub use canvas_size::backing_dimensions;
pub use color::{dither_offset, grade, sample_gradient, ColorProfile, GradientStop, Levels, Rgba};
pub use error::ConfigError;
pub use scene::{
    EscapeTimeParams, FractalParams, FractalType, JuliaParams, KernelFamily, KochParams,
    KochVariant, Preset, PresetCollection, PresetKind, ProgressiveSettings, QualityHint,
    RenderSettings, RootFindingParams, Scene, SceneDocument, SierpinskiParams,
};
pub use timeline::{Journey, Keyframe, Timeline};
pub use viewport::{interpolate_viewport, pan_viewport, screen_to_world, zoom_viewport, Viewport};
