use serde::{Deserialize, Serialize};

/// Viewport over the fractal plane.
///
/// `scale` is world-units-per-pixel and must stay positive; `rotation` is in
/// radians around the viewport center (0 = axis-aligned).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub center_x: f64,
    pub center_y: f64,
    pub scale: f64,
    #[serde(default)]
    pub rotation: f64,
}

impl Viewport {
    pub fn new(center_x: f64, center_y: f64, scale: f64) -> Self {
        Self {
            center_x,
            center_y,
            scale,
            rotation: 0.0,
        }
    }
}

/// Map a screen coordinate to a world coordinate.
///
/// Screen origin is top-left with y growing downward; world y grows upward,
/// so the vertical axis is flipped around the canvas center before rotation.
pub fn screen_to_world(viewport: &Viewport, x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
    let dx = x - width / 2.0;
    let dy = height / 2.0 - y;
    let (sin_r, cos_r) = viewport.rotation.sin_cos();
    let rotated_x = dx * cos_r - dy * sin_r;
    let rotated_y = dx * sin_r + dy * cos_r;
    (
        viewport.center_x + rotated_x * viewport.scale,
        viewport.center_y + rotated_y * viewport.scale,
    )
}

/// Pan by a screen-space drag delta. Dragging right moves the view left.
pub fn pan_viewport(viewport: &Viewport, dx: f64, dy: f64) -> Viewport {
    let (sin_r, cos_r) = viewport.rotation.sin_cos();
    let flipped_y = -dy;
    let rotated_x = dx * cos_r - flipped_y * sin_r;
    let rotated_y = dx * sin_r + flipped_y * cos_r;
    Viewport {
        center_x: viewport.center_x - rotated_x * viewport.scale,
        center_y: viewport.center_y - rotated_y * viewport.scale,
        ..*viewport
    }
}

/// Zoom by `factor` about a screen point, keeping the world point under that
/// screen coordinate fixed.
pub fn zoom_viewport(
    viewport: &Viewport,
    factor: f64,
    origin_x: f64,
    origin_y: f64,
    width: f64,
    height: f64,
) -> Viewport {
    let before = screen_to_world(viewport, origin_x, origin_y, width, height);
    let new_scale = viewport.scale * factor;
    let zoomed = Viewport {
        scale: new_scale,
        ..*viewport
    };
    let after = screen_to_world(&zoomed, origin_x, origin_y, width, height);
    Viewport {
        center_x: viewport.center_x + (before.0 - after.0),
        center_y: viewport.center_y + (before.1 - after.1),
        scale: new_scale,
        rotation: viewport.rotation,
    }
}

/// Interpolate between two viewports. Centers and rotation are linear;
/// scale is interpolated in log space so zoom animations feel uniform.
pub fn interpolate_viewport(a: &Viewport, b: &Viewport, t: f64) -> Viewport {
    let clamped = t.clamp(0.0, 1.0);
    let log_a = a.scale.ln();
    let log_b = b.scale.ln();
    Viewport {
        center_x: a.center_x + (b.center_x - a.center_x) * clamped,
        center_y: a.center_y + (b.center_y - a.center_y) * clamped,
        scale: (log_a + (log_b - log_a) * clamped).exp(),
        rotation: a.rotation + (b.rotation - a.rotation) * clamped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_to_screen(viewport: &Viewport, wx: f64, wy: f64, width: f64, height: f64) -> (f64, f64) {
        // Inverse of screen_to_world, used only to verify anchor invariance.
        let dx = (wx - viewport.center_x) / viewport.scale;
        let dy = (wy - viewport.center_y) / viewport.scale;
        let (sin_r, cos_r) = viewport.rotation.sin_cos();
        let unrotated_x = dx * cos_r + dy * sin_r;
        let unrotated_y = -dx * sin_r + dy * cos_r;
        (unrotated_x + width / 2.0, height / 2.0 - unrotated_y)
    }

    #[test]
    fn screen_center_maps_to_viewport_center() {
        let vp = Viewport::new(-0.5, 0.25, 0.01);
        let (x, y) = screen_to_world(&vp, 400.0, 300.0, 800.0, 600.0);
        assert!((x - -0.5).abs() < 1e-12);
        assert!((y - 0.25).abs() < 1e-12);
    }

    #[test]
    fn screen_y_axis_is_flipped() {
        let vp = Viewport::new(0.0, 0.0, 1.0);
        // A point above the canvas center has larger world y.
        let (_, y) = screen_to_world(&vp, 400.0, 200.0, 800.0, 600.0);
        assert!(y > 0.0);
    }

    #[test]
    fn pan_without_rotation_is_exact() {
        let vp = Viewport::new(1.0, 2.0, 0.01);
        let panned = pan_viewport(&vp, 30.0, -20.0);
        assert!((panned.center_x - (1.0 - 30.0 * 0.01)).abs() < 1e-12);
        assert!((panned.center_y - (2.0 + -20.0 * 0.01)).abs() < 1e-12);
        assert_eq!(panned.scale, vp.scale);
    }

    #[test]
    fn zoom_keeps_anchor_point_fixed() {
        let mut vp = Viewport::new(-0.74, 0.13, 0.003);
        vp.rotation = 0.4;
        let (width, height) = (1024.0, 768.0);
        let (anchor_x, anchor_y) = (700.0, 150.0);
        let world_before = screen_to_world(&vp, anchor_x, anchor_y, width, height);

        for factor in [0.5, 0.9, 1.1, 4.0] {
            let zoomed = zoom_viewport(&vp, factor, anchor_x, anchor_y, width, height);
            let screen_after =
                world_to_screen(&zoomed, world_before.0, world_before.1, width, height);
            assert!(
                (screen_after.0 - anchor_x).abs() < 1e-6,
                "x drift {} at factor {}",
                screen_after.0 - anchor_x,
                factor
            );
            assert!(
                (screen_after.1 - anchor_y).abs() < 1e-6,
                "y drift {} at factor {}",
                screen_after.1 - anchor_y,
                factor
            );
        }
    }

    #[test]
    fn interpolate_endpoints_reproduce_sources() {
        let a = Viewport::new(-1.0, 0.5, 1.0);
        let b = Viewport {
            center_x: 2.0,
            center_y: -0.5,
            scale: 100.0,
            rotation: 1.2,
        };
        assert_eq!(interpolate_viewport(&a, &b, 0.0), a);
        assert_eq!(interpolate_viewport(&a, &b, 1.0), b);
    }

    #[test]
    fn interpolate_scale_is_logarithmic() {
        let a = Viewport::new(0.0, 0.0, 1.0);
        let b = Viewport::new(0.0, 0.0, 100.0);
        let mid = interpolate_viewport(&a, &b, 0.5);
        assert!((mid.scale - 10.0).abs() < 1e-6);
    }

    #[test]
    fn interpolate_clamps_t() {
        let a = Viewport::new(0.0, 0.0, 1.0);
        let b = Viewport::new(4.0, 0.0, 16.0);
        assert_eq!(interpolate_viewport(&a, &b, -2.0), a);
        assert_eq!(interpolate_viewport(&a, &b, 3.0), b);
    }

    #[test]
    fn serialization_defaults_rotation_to_zero() {
        let json = r#"{"centerX":-0.5,"centerY":0.0,"scale":0.005}"#;
        let vp: Viewport = serde_json::from_str(json).unwrap();
        assert_eq!(vp.rotation, 0.0);
    }
}
