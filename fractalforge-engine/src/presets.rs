//! Builtin preset library: one or more curated scenes per fractal type.

use fractalforge_core::gradients::builtin_gradients;
use fractalforge_core::ids::next_id;
use fractalforge_core::{
    ColorProfile, EscapeTimeParams, FractalParams, FractalType, JuliaParams, KochParams,
    KochVariant, Levels, Preset, PresetKind, RenderSettings, RootFindingParams, Scene,
    SierpinskiParams, Viewport,
};

fn profile_with_gradient(gradient_id: &str) -> ColorProfile {
    let stops = builtin_gradients()
        .into_iter()
        .find(|g| g.id == gradient_id)
        .map(|g| g.stops)
        .unwrap_or_else(|| builtin_gradients().remove(0).stops);

    ColorProfile {
        gradient_stops: stops,
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
    }
}

fn make_scene(
    fractal_type: FractalType,
    params: FractalParams,
    viewport: Viewport,
    gradient_id: &str,
) -> Scene {
    Scene {
        id: next_id("scene"),
        fractal_type,
        params,
        viewport,
        color: profile_with_gradient(gradient_id),
        render: RenderSettings::default(),
    }
}

fn preset(name: &str, tags: &[&str], scene: Scene) -> Preset {
    Preset {
        id: next_id("preset"),
        name: name.to_string(),
        kind: PresetKind::Builtin,
        scene,
        tags: Some(tags.iter().map(|t| t.to_string()).collect()),
        thumbnail: None,
    }
}

fn escape(max_iter: u32, parameter: f64) -> FractalParams {
    FractalParams::EscapeTime(EscapeTimeParams {
        max_iter,
        escape_radius: 4.0,
        parameter,
    })
}

fn julia(max_iter: u32, c_re: f64, c_im: f64) -> FractalParams {
    FractalParams::Julia(JuliaParams {
        max_iter,
        escape_radius: 4.0,
        parameter: 0.0,
        c_re,
        c_im,
    })
}

fn newton(max_iter: u32, parameter: f64) -> FractalParams {
    FractalParams::RootFinding(RootFindingParams {
        max_iter,
        tolerance: 1e-6,
        parameter,
    })
}

/// The bundled presets, in gallery order. Every fractal type has at least
/// one entry; the registry takes the first per type as its default scene.
pub fn builtin_presets() -> Vec<Preset> {
    vec![
        preset(
            "Mandelbrot Classic",
            &["mandelbrot"],
            make_scene(
                FractalType::Mandelbrot,
                escape(320, 0.0),
                Viewport::new(-0.5, 0.0, 0.005),
                "ember",
            ),
        ),
        preset(
            "Seahorse Valley",
            &["mandelbrot"],
            make_scene(
                FractalType::Mandelbrot,
                escape(480, 0.0),
                Viewport::new(-0.75, 0.1, 0.0009),
                "nocturne",
            ),
        ),
        preset(
            "Cubic Bloom",
            &["multibrot"],
            make_scene(
                FractalType::Multibrot3,
                escape(280, 0.0),
                Viewport::new(0.0, 0.0, 0.005),
                "solar",
            ),
        ),
        preset(
            "Tricorn Mirror",
            &["tricorn"],
            make_scene(
                FractalType::Tricorn,
                escape(300, 1.0),
                Viewport::new(-0.3, 0.0, 0.005),
                "nocturne",
            ),
        ),
        preset(
            "Burning Ship Dawn",
            &["burning-ship"],
            make_scene(
                FractalType::BurningShip,
                escape(340, 1.0),
                Viewport::new(-1.75, 0.035, 0.0012),
                "solar",
            ),
        ),
        preset(
            "Julia Bloom",
            &["julia"],
            make_scene(
                FractalType::Julia,
                julia(320, -0.70176, -0.3842),
                Viewport::new(0.0, 0.0, 0.004),
                "sage",
            ),
        ),
        preset(
            "Julia Spiral",
            &["julia"],
            make_scene(
                FractalType::Julia,
                julia(340, 0.285, 0.01),
                Viewport::new(0.0, 0.0, 0.0038),
                "solar",
            ),
        ),
        preset(
            "Tricorn Julia Veil",
            &["tricorn", "julia"],
            make_scene(
                FractalType::TricornJulia,
                julia(300, -0.6, 0.42),
                Viewport::new(0.0, 0.0, 0.0045),
                "nocturne",
            ),
        ),
        preset(
            "Ship Julia Ember",
            &["burning-ship", "julia"],
            make_scene(
                FractalType::BurningShipJulia,
                julia(300, -0.598, -0.9225),
                Viewport::new(0.0, 0.0, 0.0045),
                "ember",
            ),
        ),
        preset(
            "Newton Triptych",
            &["newton"],
            make_scene(
                FractalType::NewtonZ3,
                newton(120, 0.0),
                Viewport::new(0.0, 0.0, 0.006),
                "ember",
            ),
        ),
        preset(
            "Halley Bloom",
            &["newton", "halley"],
            make_scene(
                FractalType::HalleyZ3,
                newton(100, 0.0),
                Viewport::new(0.0, 0.0, 0.006),
                "sage",
            ),
        ),
        preset(
            "Sine Lattice",
            &["newton", "sine"],
            make_scene(
                FractalType::NewtonSin,
                newton(140, 0.0),
                Viewport::new(0.0, 0.0, 0.012),
                "nocturne",
            ),
        ),
        preset(
            "Koch Curve",
            &["koch"],
            make_scene(
                FractalType::Koch,
                FractalParams::Koch(KochParams {
                    depth: 5,
                    variant: KochVariant::Curve,
                }),
                Viewport::new(0.0, 0.0, 0.005),
                "ember",
            ),
        ),
        preset(
            "Koch Snowflake",
            &["koch"],
            make_scene(
                FractalType::Koch,
                FractalParams::Koch(KochParams {
                    depth: 4,
                    variant: KochVariant::Snowflake,
                }),
                Viewport::new(0.0, 0.0, 0.005),
                "nocturne",
            ),
        ),
        preset(
            "Sierpinski Light",
            &["sierpinski"],
            make_scene(
                FractalType::Sierpinski,
                FractalParams::Sierpinski(SierpinskiParams { depth: 6 }),
                Viewport::new(0.0, 0.0, 0.005),
                "sage",
            ),
        ),
    ]
}
