use std::collections::VecDeque;
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, Instant};

use egui::{Color32, ColorImage};

use crate::surface::{DisplaySurface, Event, KeyboardState, MouseState};

/// Input side of the UI thread boundary: the egui app refreshes the
/// keyboard/mouse snapshots every repaint and queues window events.
#[derive(Debug, Default)]
pub struct SharedInput {
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
    pub events: VecDeque<Event>,
}

/// [`DisplaySurface`] backed by a software canvas and an egui frontend.
///
/// Drawing goes into a private back canvas; `present` publishes a snapshot
/// of it for the UI thread to blit and requests a repaint. Out-of-bounds
/// points are dropped silently.
pub struct EguiSurface {
    canvas: ColorImage,
    draw_color: Color32,
    shared_frame: Arc<RwLock<ColorImage>>,
    shared_input: Arc<RwLock<SharedInput>>,
    egui_ctx: egui::Context,
    epoch: Instant,
}

impl EguiSurface {
    pub fn new(
        width: usize,
        height: usize,
        shared_frame: Arc<RwLock<ColorImage>>,
        shared_input: Arc<RwLock<SharedInput>>,
        egui_ctx: egui::Context,
    ) -> Self {
        Self {
            canvas: ColorImage::new([width, height], Color32::BLACK),
            draw_color: Color32::BLACK,
            shared_frame,
            shared_input,
            egui_ctx,
            epoch: Instant::now(),
        }
    }
}

impl DisplaySurface for EguiSurface {
    fn set_draw_color(&mut self, color: Color32) {
        self.draw_color = color;
    }

    fn clear(&mut self) {
        self.canvas.pixels.fill(self.draw_color);
    }

    fn draw_point(&mut self, x: i32, y: i32) {
        let [width, height] = self.canvas.size;
        if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
            return;
        }
        self.canvas.pixels[y as usize * width + x as usize] = self.draw_color;
    }

    fn present(&mut self) {
        *self.shared_frame.write().unwrap() = self.canvas.clone();
        self.egui_ctx.request_repaint();
    }

    fn poll_event(&mut self) -> Option<Event> {
        self.shared_input.write().unwrap().events.pop_front()
    }

    fn keyboard_state(&self) -> KeyboardState {
        self.shared_input.read().unwrap().keyboard
    }

    fn mouse_state(&self) -> MouseState {
        self.shared_input.read().unwrap().mouse
    }

    fn ticks(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    fn delay(&self, ms: u64) {
        thread::sleep(Duration::from_millis(ms));
    }
}
