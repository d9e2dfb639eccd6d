//! Gradient sampling and the shared grading transform.
//!
//! Every renderer colors through this module, so the CPU geometric path and
//! the per-pixel kernel path stay bit-identical by construction.

use serde::{Deserialize, Serialize};

/// Color with components in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn opaque(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Quantize to 8-bit RGBA for a backing buffer.
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }
}

/// A gradient stop at position `t` in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub t: f64,
    pub color: Rgba,
}

/// Black/white input levels for the grading transform.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Levels {
    pub black: f64,
    pub white: f64,
}

/// Color grading profile applied after gradient sampling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorProfile {
    pub gradient_stops: Vec<GradientStop>,
    pub smooth_coloring: bool,
    pub gamma: f64,
    pub levels: Levels,
    pub hue_shift: f64,
    pub saturation: f64,
    #[serde(default)]
    pub exposure: f64,
    #[serde(default)]
    pub dither: bool,
}

impl ColorProfile {
    /// Re-establish the stop-list invariant after an edit: stops sorted by
    /// `t`, positions clamped to [0, 1], and at least two stops spanning
    /// t=0 and t=1.
    pub fn normalize_stops(&mut self) {
        for stop in &mut self.gradient_stops {
            stop.t = stop.t.clamp(0.0, 1.0);
        }
        self.gradient_stops
            .sort_by(|a, b| a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal));

        if self.gradient_stops.is_empty() {
            self.gradient_stops = vec![
                GradientStop {
                    t: 0.0,
                    color: Rgba::opaque(0.0, 0.0, 0.0),
                },
                GradientStop {
                    t: 1.0,
                    color: Rgba::opaque(1.0, 1.0, 1.0),
                },
            ];
            return;
        }

        let first = self.gradient_stops[0];
        if first.t > 0.0 {
            self.gradient_stops.insert(
                0,
                GradientStop {
                    t: 0.0,
                    color: first.color,
                },
            );
        }
        let last = self.gradient_stops[self.gradient_stops.len() - 1];
        if last.t < 1.0 {
            self.gradient_stops.push(GradientStop {
                t: 1.0,
                color: last.color,
            });
        }
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Sample a piecewise-linear gradient at `t`.
///
/// The query is clamped to [0, 1]; queries outside the stop span return the
/// boundary color. An empty stop list falls back to grayscale.
pub fn sample_gradient(stops: &[GradientStop], t: f64) -> Rgba {
    if stops.is_empty() {
        return Rgba::new(t, t, t, 1.0);
    }

    // Callers keep stops sorted via normalize_stops; only re-sort stray
    // input, so the per-pixel hot path never allocates.
    let scratch: Vec<GradientStop>;
    let sorted: &[GradientStop] = if stops.windows(2).all(|w| w[0].t <= w[1].t) {
        stops
    } else {
        let mut owned = stops.to_vec();
        owned.sort_by(|a, b| a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal));
        scratch = owned;
        &scratch
    };
    let clamped = t.clamp(0.0, 1.0);

    if clamped <= sorted[0].t {
        return sorted[0].color;
    }
    let last = sorted[sorted.len() - 1];
    if clamped >= last.t {
        return last.color;
    }

    for pair in sorted.windows(2) {
        let (left, right) = (pair[0], pair[1]);
        if clamped >= left.t && clamped <= right.t {
            let span = right.t - left.t;
            let local = (clamped - left.t) / if span == 0.0 { 1.0 } else { span };
            return Rgba {
                r: lerp(left.color.r, right.color.r, local),
                g: lerp(left.color.g, right.color.g, local),
                b: lerp(left.color.b, right.color.b, local),
                a: lerp(left.color.a, right.color.a, local),
            };
        }
    }

    last.color
}

/// Apply the grading transform in its fixed order: exposure, levels, gamma,
/// saturation, hue rotation. Dither is a per-pixel concern and lives in
/// [`dither_offset`].
pub fn grade(color: Rgba, profile: &ColorProfile) -> Rgba {
    let exposure_scale = 2f64.powf(profile.exposure);
    let mut r = color.r * exposure_scale;
    let mut g = color.g * exposure_scale;
    let mut b = color.b * exposure_scale;

    let white = profile.levels.white.max(1e-4);
    let black = profile.levels.black;
    r = ((r - black) / (white - black)).clamp(0.0, 1.0);
    g = ((g - black) / (white - black)).clamp(0.0, 1.0);
    b = ((b - black) / (white - black)).clamp(0.0, 1.0);

    let gamma = profile.gamma.max(1e-2);
    r = r.powf(1.0 / gamma);
    g = g.powf(1.0 / gamma);
    b = b.powf(1.0 / gamma);

    let luma = 0.2126 * r + 0.7152 * g + 0.0722 * b;
    r = luma + (r - luma) * profile.saturation;
    g = luma + (g - luma) * profile.saturation;
    b = luma + (b - luma) * profile.saturation;

    let (h, s, l) = rgb_to_hsl(r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0));
    let shifted_h = (h + profile.hue_shift / 360.0).rem_euclid(1.0);
    let (r, g, b) = hsl_to_rgb(shifted_h, s.clamp(0.0, 1.0), l.clamp(0.0, 1.0));

    Rgba {
        r,
        g,
        b,
        a: color.a,
    }
}

/// Pseudo-random dither offset for a pixel position, magnitude ≤ 1/255.
///
/// Same hash on every path that dithers, so repeated renders of the same
/// scene produce identical pixels.
pub fn dither_offset(px: u32, py: u32) -> f64 {
    let dot = px as f64 * 12.9898 + py as f64 * 78.233;
    let noise = (dot.sin() * 43758.5453).fract().abs();
    (noise - 0.5) / 255.0
}

fn rgb_to_hsl(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h / 6.0, s, l)
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    (
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    )
}

fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let mut tt = t;
    if tt < 0.0 {
        tt += 1.0;
    }
    if tt > 1.0 {
        tt -= 1.0;
    }
    if tt < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * tt;
    }
    if tt < 1.0 / 2.0 {
        return q;
    }
    if tt < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - tt) * 6.0;
    }
    p
}
