//! Scene data model and its JSON document wrappers.
//!
//! Field names serialize in the interchange schema (camelCase keys,
//! kebab-case fractal-type tags) so exported documents round-trip exactly.

use serde::{Deserialize, Serialize};

use crate::color::ColorProfile;
use crate::error::ConfigError;
use crate::viewport::Viewport;

/// Every renderable fractal, tagged as it appears in scene documents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FractalType {
    Mandelbrot,
    Multibrot3,
    Tricorn,
    BurningShip,
    Julia,
    TricornJulia,
    BurningShipJulia,
    NewtonZ3,
    HalleyZ3,
    NewtonSin,
    Koch,
    Sierpinski,
}

/// Which kernel family a fractal type dispatches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KernelFamily {
    EscapeTime,
    RootFinding,
    Curve,
    Triangle,
}

impl FractalType {
    pub fn family(&self) -> KernelFamily {
        match self {
            FractalType::Mandelbrot
            | FractalType::Multibrot3
            | FractalType::Tricorn
            | FractalType::BurningShip
            | FractalType::Julia
            | FractalType::TricornJulia
            | FractalType::BurningShipJulia => KernelFamily::EscapeTime,
            FractalType::NewtonZ3 | FractalType::HalleyZ3 | FractalType::NewtonSin => {
                KernelFamily::RootFinding
            }
            FractalType::Koch => KernelFamily::Curve,
            FractalType::Sierpinski => KernelFamily::Triangle,
        }
    }

    /// Julia members read the complex constant from the scene and start the
    /// orbit at the pixel coordinate.
    pub fn is_julia(&self) -> bool {
        matches!(
            self,
            FractalType::Julia | FractalType::TricornJulia | FractalType::BurningShipJulia
        )
    }

    /// The serialized tag, used in error messages.
    pub fn tag(&self) -> &'static str {
        match self {
            FractalType::Mandelbrot => "mandelbrot",
            FractalType::Multibrot3 => "multibrot3",
            FractalType::Tricorn => "tricorn",
            FractalType::BurningShip => "burning-ship",
            FractalType::Julia => "julia",
            FractalType::TricornJulia => "tricorn-julia",
            FractalType::BurningShipJulia => "burning-ship-julia",
            FractalType::NewtonZ3 => "newton-z3",
            FractalType::HalleyZ3 => "halley-z3",
            FractalType::NewtonSin => "newton-sin",
            FractalType::Koch => "koch",
            FractalType::Sierpinski => "sierpinski",
        }
    }
}

impl std::fmt::Display for FractalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Escape-time iteration parameters.
///
/// `parameter` doubles as a phase angle in degrees for the rotated
/// quadratic/cubic members and as a [0, 1] blend for tricorn/burning-ship.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscapeTimeParams {
    pub max_iter: u32,
    pub escape_radius: f64,
    #[serde(default)]
    pub parameter: f64,
}

/// Escape-time parameters plus the fixed complex constant of a Julia set.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JuliaParams {
    pub max_iter: u32,
    pub escape_radius: f64,
    #[serde(default)]
    pub parameter: f64,
    pub c_re: f64,
    pub c_im: f64,
}

/// Newton/Halley iteration parameters. `parameter` is the phase angle in
/// degrees rotating the polynomial's roots (or shifting the sine map).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootFindingParams {
    pub max_iter: u32,
    pub tolerance: f64,
    #[serde(default)]
    pub parameter: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KochVariant {
    Curve,
    Snowflake,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KochParams {
    pub depth: u32,
    pub variant: KochVariant,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SierpinskiParams {
    pub depth: u32,
}

/// Parameter payload of a scene. Serialized untagged: the field shape alone
/// identifies the family, matching the interchange schema. Julia must stay
/// ahead of EscapeTime (its fields are a superset), and Koch ahead of
/// Sierpinski, so the most specific shape wins.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FractalParams {
    Julia(JuliaParams),
    EscapeTime(EscapeTimeParams),
    RootFinding(RootFindingParams),
    Koch(KochParams),
    Sierpinski(SierpinskiParams),
}

impl FractalParams {
    /// The family this parameter shape belongs to.
    pub fn family(&self) -> KernelFamily {
        match self {
            FractalParams::Julia(_) | FractalParams::EscapeTime(_) => KernelFamily::EscapeTime,
            FractalParams::RootFinding(_) => KernelFamily::RootFinding,
            FractalParams::Koch(_) => KernelFamily::Curve,
            FractalParams::Sierpinski(_) => KernelFamily::Triangle,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityHint {
    Interactive,
    Final,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressiveSettings {
    pub enabled: bool,
    pub tile_sizes: Vec<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSettings {
    pub resolution_scale: f64,
    pub progressive: ProgressiveSettings,
    pub quality_hint: QualityHint,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            resolution_scale: 1.0,
            progressive: ProgressiveSettings {
                enabled: true,
                tile_sizes: vec![16, 8, 4, 2, 1],
            },
            quality_hint: QualityHint::Final,
        }
    }
}

/// A complete description of one rendered image.
///
/// Treated as immutable: edits replace the whole scene or a named sub-field
/// wholesale, never mutate nested values in place, so change detection can
/// compare by value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: String,
    pub fractal_type: FractalType,
    pub params: FractalParams,
    pub viewport: Viewport,
    pub color: ColorProfile,
    pub render: RenderSettings,
}

impl Scene {
    /// Check that the parameter shape matches the fractal type's kernel
    /// family and the viewport invariant holds. Mismatches are fatal
    /// configuration errors, never silently substituted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.viewport.scale > 0.0) {
            return Err(ConfigError::InvalidViewportScale(self.viewport.scale));
        }

        let ok = match (self.fractal_type, &self.params) {
            (t, FractalParams::EscapeTime(_)) => {
                t.family() == KernelFamily::EscapeTime && !t.is_julia()
            }
            (t, FractalParams::Julia(_)) => t.is_julia(),
            (t, FractalParams::RootFinding(_)) => t.family() == KernelFamily::RootFinding,
            (FractalType::Koch, FractalParams::Koch(_)) => true,
            (FractalType::Sierpinski, FractalParams::Sierpinski(_)) => true,
            _ => false,
        };

        if ok {
            Ok(())
        } else {
            Err(ConfigError::ParamsMismatch {
                fractal_type: self.fractal_type.tag().to_string(),
                expected: match self.fractal_type.family() {
                    KernelFamily::EscapeTime if self.fractal_type.is_julia() => "julia",
                    KernelFamily::EscapeTime => "escape-time",
                    KernelFamily::RootFinding => "root-finding",
                    KernelFamily::Curve => "koch",
                    KernelFamily::Triangle => "sierpinski",
                },
            })
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetKind {
    Builtin,
    User,
}

/// A named, shareable scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    pub name: String,
    pub kind: PresetKind,
    pub scene: Scene,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Scene export document: `{version: 1, scene}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    pub version: u32,
    pub scene: Scene,
}

impl SceneDocument {
    pub fn new(scene: Scene) -> Self {
        Self { version: 1, scene }
    }
}

/// Preset collection export document: `{version: 1, presets}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PresetCollection {
    pub version: u32,
    pub presets: Vec<Preset>,
}

impl PresetCollection {
    pub fn new(presets: Vec<Preset>) -> Self {
        Self {
            version: 1,
            presets,
        }
    }
}
