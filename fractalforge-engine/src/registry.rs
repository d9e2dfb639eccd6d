//! Static fractal registry: type tag → renderer factory, default scene,
//! and bundled presets.

use fractalforge_core::{ConfigError, FractalType, KernelFamily, Preset, Scene};

use crate::escape_renderer::EscapeTimeRenderer;
use crate::koch::KochRenderer;
use crate::newton_renderer::RootFindingRenderer;
use crate::presets::builtin_presets;
use crate::renderer::FractalRenderer;
use crate::sierpinski::SierpinskiRenderer;

/// Everything the application needs to drive one fractal type.
pub struct FractalDefinition {
    pub fractal_type: FractalType,
    pub label: &'static str,
    pub make_renderer: fn() -> Box<dyn FractalRenderer>,
    pub default_scene: Scene,
    pub presets: Vec<Preset>,
}

/// Registration-ordered collection of fractal definitions.
///
/// The set of types is fixed at build time, so an unknown type on lookup
/// is a programming error; `get` surfaces it as a fatal `ConfigError`
/// rather than substituting a fallback.
#[derive(Default)]
pub struct FractalRegistry {
    defs: Vec<FractalDefinition>,
}

impl FractalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, replacing any existing entry for the type in
    /// place so registration order stays stable.
    pub fn register(&mut self, definition: FractalDefinition) {
        match self
            .defs
            .iter_mut()
            .find(|d| d.fractal_type == definition.fractal_type)
        {
            Some(existing) => *existing = definition,
            None => self.defs.push(definition),
        }
    }

    pub fn get(&self, fractal_type: FractalType) -> Result<&FractalDefinition, ConfigError> {
        self.defs
            .iter()
            .find(|d| d.fractal_type == fractal_type)
            .ok_or_else(|| ConfigError::UnknownFractalType(fractal_type.tag().to_string()))
    }

    /// All definitions, in registration order.
    pub fn list(&self) -> &[FractalDefinition] {
        &self.defs
    }
}

fn renderer_factory(fractal_type: FractalType) -> fn() -> Box<dyn FractalRenderer> {
    match fractal_type.family() {
        KernelFamily::EscapeTime => || Box::new(EscapeTimeRenderer::new()),
        KernelFamily::RootFinding => || Box::new(RootFindingRenderer::new()),
        KernelFamily::Curve => || Box::new(KochRenderer::new()),
        KernelFamily::Triangle => || Box::new(SierpinskiRenderer::new()),
    }
}

fn label(fractal_type: FractalType) -> &'static str {
    match fractal_type {
        FractalType::Mandelbrot => "Mandelbrot",
        FractalType::Multibrot3 => "Multibrot",
        FractalType::Tricorn => "Tricorn",
        FractalType::BurningShip => "Burning Ship",
        FractalType::Julia => "Julia",
        FractalType::TricornJulia => "Tricorn Julia",
        FractalType::BurningShipJulia => "Burning Ship Julia",
        FractalType::NewtonZ3 => "Newton",
        FractalType::HalleyZ3 => "Halley",
        FractalType::NewtonSin => "Newton Sine",
        FractalType::Koch => "Koch",
        FractalType::Sierpinski => "Sierpinski",
    }
}

/// Build the registry with every shipped fractal type.
///
/// The default scene for a type is its first bundled preset's scene.
pub fn default_registry() -> FractalRegistry {
    let presets = builtin_presets();
    let mut registry = FractalRegistry::new();

    for fractal_type in [
        FractalType::Mandelbrot,
        FractalType::Multibrot3,
        FractalType::Tricorn,
        FractalType::BurningShip,
        FractalType::Julia,
        FractalType::TricornJulia,
        FractalType::BurningShipJulia,
        FractalType::NewtonZ3,
        FractalType::HalleyZ3,
        FractalType::NewtonSin,
        FractalType::Koch,
        FractalType::Sierpinski,
    ] {
        let type_presets: Vec<Preset> = presets
            .iter()
            .filter(|p| p.scene.fractal_type == fractal_type)
            .cloned()
            .collect();
        let default_scene = type_presets
            .first()
            .map(|p| p.scene.clone())
            .unwrap_or_else(|| {
                // builtin_presets carries at least one entry per type.
                unreachable!("missing builtin preset for {fractal_type}")
            });

        registry.register(FractalDefinition {
            fractal_type,
            label: label(fractal_type),
            make_renderer: renderer_factory(fractal_type),
            default_scene,
            presets: type_presets,
        });
    }

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_lists_all_types_in_registration_order() {
        let registry = default_registry();
        let types: Vec<FractalType> = registry.list().iter().map(|d| d.fractal_type).collect();
        assert_eq!(types.len(), 12);
        assert_eq!(types[0], FractalType::Mandelbrot);
        assert_eq!(types[11], FractalType::Sierpinski);
    }

    #[test]
    fn get_returns_definition_with_valid_default_scene() {
        let registry = default_registry();
        let def = registry.get(FractalType::BurningShip).unwrap();
        assert_eq!(def.label, "Burning Ship");
        assert_eq!(def.default_scene.fractal_type, FractalType::BurningShip);
        assert!(def.default_scene.validate().is_ok());
        assert!(!def.presets.is_empty());
    }

    #[test]
    fn get_on_empty_registry_is_an_unknown_type_error() {
        let registry = FractalRegistry::new();
        assert!(matches!(
            registry.get(FractalType::Mandelbrot),
            Err(ConfigError::UnknownFractalType(_))
        ));
    }

    #[test]
    fn register_replaces_in_place() {
        let mut registry = default_registry();
        let replacement = FractalDefinition {
            fractal_type: FractalType::Mandelbrot,
            label: "Mandelbrot II",
            make_renderer: || Box::new(EscapeTimeRenderer::new()),
            default_scene: registry
                .get(FractalType::Mandelbrot)
                .unwrap()
                .default_scene
                .clone(),
            presets: vec![],
        };
        registry.register(replacement);

        assert_eq!(registry.list().len(), 12);
        assert_eq!(registry.list()[0].label, "Mandelbrot II");
    }

    #[test]
    fn factories_produce_renderers_for_each_family() {
        let registry = default_registry();
        for fractal_type in [
            FractalType::Mandelbrot,
            FractalType::NewtonZ3,
            FractalType::Koch,
            FractalType::Sierpinski,
        ] {
            let def = registry.get(fractal_type).unwrap();
            let mut renderer = (def.make_renderer)();
            renderer.destroy();
        }
    }
}
