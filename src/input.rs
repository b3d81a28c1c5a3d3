use glam::Vec2;

/// Latest pointer position in normalized device coordinates.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub ndc: Vec2,
}

/// Window-space pixel position to NDC, x right and y up, both in [-1, 1].
#[inline]
pub fn client_to_ndc(client_x: f32, client_y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        ((client_x / width) * 2.0 - 1.0).clamp(-1.0, 1.0),
        (-(client_y / height) * 2.0 + 1.0).clamp(-1.0, 1.0),
    )
}

/// Backing-store size for a CSS box, with the device pixel ratio capped at 2.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> (u32, u32) {
    let dpr = device_pixel_ratio.clamp(1.0, 2.0);
    (
        ((css_width * dpr) as u32).max(1),
        ((css_height * dpr) as u32).max(1),
    )
}

/// Whether the control panel should start collapsed.
#[inline]
pub fn is_narrow_viewport(css_width: f64) -> bool {
    css_width < 768.0
}
