//! Filled-shape rasterization on top of the surface's pixel-set primitive.
//! Clipping of out-of-bounds pixels is the surface's job.

use egui::{Color32, Pos2};

use crate::surface::DisplaySurface;

/// Paint a filled rectangle; `center` is its geometric center.
///
/// Rows are filled in the outer loop so the pixel writes walk the
/// framebuffer in row-major order.
pub fn draw_rectangle<S: DisplaySurface>(
    surface: &mut S,
    center: Pos2,
    width: f32,
    height: f32,
    color: Color32,
) {
    let start_x = (center.x - width / 2.0) as i32;
    let start_y = (center.y - height / 2.0) as i32;
    surface.set_draw_color(color);

    for y in 0..height as i32 {
        for x in 0..width as i32 {
            surface.draw_point(start_x + x, start_y + y);
        }
    }
}

/// Paint a filled circle around `center`.
///
/// Scans the bounding box and keeps the pixels with `dx² + dy² ≤ r²`;
/// the squared-distance test avoids the square root and is exact on
/// integer offsets.
pub fn draw_circle<S: DisplaySurface>(surface: &mut S, center: Pos2, radius: i32, color: Color32) {
    surface.set_draw_color(color);

    for dy in -radius..radius {
        for dx in -radius..radius {
            if dx * dx + dy * dy <= radius * radius {
                surface.draw_point(center.x as i32 + dx, center.y as i32 + dy);
            }
        }
    }
}
