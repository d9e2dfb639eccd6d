//! Camera journey timelines: keyframed viewport paths sampled with
//! log-scale interpolation.

use serde::{Deserialize, Serialize};

use crate::scene::Scene;
use crate::viewport::{interpolate_viewport, Viewport};

/// A viewport keyframe at normalized time `t` in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub t: f64,
    pub viewport: Viewport,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub duration_ms: f64,
    pub keyframes: Vec<Keyframe>,
}

/// A saved camera path over a base scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Journey {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub scene: Scene,
    pub timeline: Timeline,
}

impl Timeline {
    /// Sample the camera path at normalized time `t`.
    ///
    /// Keyframes are treated as sorted by `t`; the bracketing pair is
    /// interpolated in log-scale space. Returns `None` for an empty
    /// timeline.
    pub fn viewport_at(&self, t: f64) -> Option<Viewport> {
        let first = self.keyframes.first()?;
        let clamped = t.clamp(0.0, 1.0);

        if clamped <= first.t {
            return Some(first.viewport);
        }
        let last = self.keyframes.last()?;
        if clamped >= last.t {
            return Some(last.viewport);
        }

        for pair in self.keyframes.windows(2) {
            let (left, right) = (pair[0], pair[1]);
            if clamped >= left.t && clamped <= right.t {
                let span = right.t - left.t;
                let local = if span == 0.0 {
                    0.0
                } else {
                    (clamped - left.t) / span
                };
                return Some(interpolate_viewport(&left.viewport, &right.viewport, local));
            }
        }

        Some(last.viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline() -> Timeline {
        Timeline {
            duration_ms: 8000.0,
            keyframes: vec![
                Keyframe {
                    t: 0.0,
                    viewport: Viewport::new(0.0, 0.0, 1.0),
                },
                Keyframe {
                    t: 0.5,
                    viewport: Viewport::new(-0.5, 0.1, 0.01),
                },
                Keyframe {
                    t: 1.0,
                    viewport: Viewport::new(-0.74, 0.13, 0.0001),
                },
            ],
        }
    }

    #[test]
    fn endpoints_return_keyframe_viewports() {
        let tl = timeline();
        assert_eq!(tl.viewport_at(0.0).unwrap(), tl.keyframes[0].viewport);
        assert_eq!(tl.viewport_at(1.0).unwrap(), tl.keyframes[2].viewport);
    }

    #[test]
    fn out_of_range_times_clamp() {
        let tl = timeline();
        assert_eq!(tl.viewport_at(-1.0).unwrap(), tl.keyframes[0].viewport);
        assert_eq!(tl.viewport_at(2.0).unwrap(), tl.keyframes[2].viewport);
    }

    #[test]
    fn midpoint_of_segment_uses_log_scale() {
        let tl = Timeline {
            duration_ms: 1000.0,
            keyframes: vec![
                Keyframe {
                    t: 0.0,
                    viewport: Viewport::new(0.0, 0.0, 1.0),
                },
                Keyframe {
                    t: 1.0,
                    viewport: Viewport::new(0.0, 0.0, 100.0),
                },
            ],
        };
        let mid = tl.viewport_at(0.5).unwrap();
        assert!((mid.scale - 10.0).abs() < 1e-6);
    }

    #[test]
    fn journey_round_trips_through_json() {
        use crate::color::{GradientStop, Levels, Rgba};
        use crate::scene::{
            EscapeTimeParams, FractalParams, FractalType, RenderSettings, Scene,
        };

        let journey = Journey {
            id: "journey_1".to_string(),
            name: "Seahorse Dive".to_string(),
            kind: "builtin".to_string(),
            scene: Scene {
                id: "scene_1".to_string(),
                fractal_type: FractalType::Mandelbrot,
                params: FractalParams::EscapeTime(EscapeTimeParams {
                    max_iter: 320,
                    escape_radius: 4.0,
                    parameter: 0.0,
                }),
                viewport: Viewport::new(-0.5, 0.0, 0.005),
                color: crate::color::ColorProfile {
                    gradient_stops: vec![
                        GradientStop {
                            t: 0.0,
                            color: Rgba::opaque(0.0, 0.0, 0.0),
                        },
                        GradientStop {
                            t: 1.0,
                            color: Rgba::opaque(1.0, 1.0, 1.0),
                        },
                    ],
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
                },
                render: RenderSettings::default(),
            },
            timeline: timeline(),
        };

        let json = serde_json::to_string(&journey).unwrap();
        assert!(json.contains("\"durationMs\""));
        let restored: Journey = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, journey);
    }

    #[test]
    fn empty_timeline_yields_none() {
        let tl = Timeline {
            duration_ms: 0.0,
            keyframes: vec![],
        };
        assert!(tl.viewport_at(0.5).is_none());
    }
}
