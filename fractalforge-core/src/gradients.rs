//! Builtin gradient library.

use crate::color::{GradientStop, Rgba};

/// A named, reusable gradient.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedGradient {
    pub id: &'static str,
    pub name: &'static str,
    pub stops: Vec<GradientStop>,
}

fn stop(t: f64, r: f64, g: f64, b: f64) -> GradientStop {
    GradientStop {
        t,
        color: Rgba::opaque(r, g, b),
    }
}

/// The bundled gradients, in menu order.
pub fn builtin_gradients() -> Vec<NamedGradient> {
    vec![
        NamedGradient {
            id: "ember",
            name: "Ember",
            stops: vec![
                stop(0.0, 0.02, 0.03, 0.05),
                stop(0.35, 0.12, 0.4, 0.48),
                stop(0.7, 0.96, 0.82, 0.52),
                stop(1.0, 0.92, 0.28, 0.12),
            ],
        },
        NamedGradient {
            id: "nocturne",
            name: "Nocturne",
            stops: vec![
                stop(0.0, 0.03, 0.05, 0.12),
                stop(0.4, 0.2, 0.27, 0.5),
                stop(0.7, 0.62, 0.5, 0.86),
                stop(1.0, 0.9, 0.85, 0.98),
            ],
        },
        NamedGradient {
            id: "sage",
            name: "Sage",
            stops: vec![
                stop(0.0, 0.02, 0.06, 0.08),
                stop(0.5, 0.2, 0.5, 0.42),
                stop(1.0, 0.9, 0.92, 0.78),
            ],
        },
        NamedGradient {
            id: "solar",
            name: "Solar",
            stops: vec![
                stop(0.0, 0.04, 0.02, 0.04),
                stop(0.4, 0.35, 0.1, 0.12),
                stop(0.75, 0.98, 0.58, 0.08),
                stop(1.0, 0.98, 0.9, 0.62),
            ],
        },
    ]
}

/// Look up a builtin gradient by id.
pub fn gradient_by_id(id: &str) -> Option<NamedGradient> {
    builtin_gradients().into_iter().find(|g| g.id == id)
}
