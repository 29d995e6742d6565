pub mod egui_backend;

use egui::Color32;

/// Platform event relevant to the game loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Quit,
}

/// Per-frame snapshot of the scan codes the game reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyboardState {
    pub up: bool,
    pub down: bool,
    pub escape: bool,
}

/// Pointer position plus button bitmask (bit 0 = primary, bit 1 = secondary).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub buttons: u32,
}

/// Contract the host windowing/graphics facility has to provide: a pixel-set
/// draw target plus event, keyboard, mouse and timing primitives.
///
/// Pixels outside the drawable area are clipped silently by the
/// implementation; drawing itself is infallible.
pub trait DisplaySurface {
    fn set_draw_color(&mut self, color: Color32);
    /// fill the whole surface with the current draw color
    fn clear(&mut self);
    fn draw_point(&mut self, x: i32, y: i32);
    /// make the finished frame visible
    fn present(&mut self);
    /// non-blocking; `None` once the queue is drained
    fn poll_event(&mut self) -> Option<Event>;
    fn keyboard_state(&self) -> KeyboardState;
    fn mouse_state(&self) -> MouseState;
    /// monotonic millisecond counter
    fn ticks(&self) -> u64;
    fn delay(&self, ms: u64);
}
