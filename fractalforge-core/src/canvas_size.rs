//! DPI- and resolution-scale-aware backing buffer sizing, shared by every
//! renderer so all canvases agree on pixel dimensions.

/// Compute backing buffer dimensions for a display size.
///
/// `resolution_scale` ≥ 1 trades pixels for speed (higher = coarser); values
/// below 1 are clamped. Each dimension is floored to at least 1.
pub fn backing_dimensions(
    display_width: f64,
    display_height: f64,
    pixel_ratio: f64,
    resolution_scale: f64,
) -> (u32, u32) {
    let ratio = if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
    let scale = resolution_scale.max(1.0);
    let width = (display_width * ratio / scale).floor().max(1.0);
    let height = (display_height * ratio / scale).floor().max(1.0);
    (width as u32, height as u32)
}
