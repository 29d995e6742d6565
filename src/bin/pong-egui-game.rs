use std::sync::{Arc, RwLock};
use std::thread;
use std::thread::JoinHandle;

use anyhow::anyhow;
use eframe::glow;
use egui::{
    Color32, ColorImage, Context, Id, LayerId, Order, Pos2, Rect, TextureHandle, TextureOptions,
    Vec2,
};

use pixel_pong::game::mechanics::{PongMechanics, SCREEN_LEN_X, SCREEN_LEN_Y};
use pixel_pong::game::scheduler::FrameScheduler;
use pixel_pong::surface::egui_backend::{EguiSurface, SharedInput};
use pixel_pong::surface::{Event, KeyboardState, MouseState};
use pixel_pong::util::init_logging;

pub const WINDOW_TITLE: &str = "Pixel Pong";

pub struct PongApp {
    shared_frame: Arc<RwLock<ColorImage>>,
    shared_input: Arc<RwLock<SharedInput>>,
    frame_texture: Option<TextureHandle>,
    scheduler_join_handle: JoinHandle<()>,
}

impl PongApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        shared_frame: Arc<RwLock<ColorImage>>,
        shared_input: Arc<RwLock<SharedInput>>,
        scheduler_join_handle: JoinHandle<()>,
    ) -> Self {
        Self {
            shared_frame,
            shared_input,
            frame_texture: None,
            scheduler_join_handle,
        }
    }

    fn write_ui_input(
        &self,
        ctx: &Context,
    ) {
        let keyboard = ctx.input(|i| KeyboardState {
            up: i.key_down(egui::Key::ArrowUp),
            down: i.key_down(egui::Key::ArrowDown),
            escape: i.key_down(egui::Key::Escape),
        });
        let mouse = ctx.input(|i| {
            let pos = i.pointer.hover_pos().unwrap_or(Pos2::ZERO);
            let mut buttons = 0;
            if i.pointer.primary_down() {
                buttons |= 1;
            }
            if i.pointer.secondary_down() {
                buttons |= 1 << 1;
            }
            MouseState {
                x: pos.x,
                y: pos.y,
                buttons,
            }
        });

        let mut write_handle = self.shared_input.write().unwrap();
        write_handle.keyboard = keyboard;
        write_handle.mouse = mouse;
    }

    /// blit the most recently presented frame
    fn draw_frame_content(
        &mut self,
        ctx: &Context,
    ) {
        let frame_image = self.read_shared_frame();
        let texture = self.frame_texture.get_or_insert_with(|| {
            ctx.load_texture("frame", frame_image.clone(), TextureOptions::NEAREST)
        });
        texture.set(frame_image, TextureOptions::NEAREST);

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("frame")));
        let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
        painter.image(texture.id(), painter.clip_rect(), uv, Color32::WHITE);
    }

    fn read_shared_frame(&self) -> ColorImage {
        let read_handle = self.shared_frame.read().unwrap();
        let frame_image = read_handle.clone();
        drop(read_handle);
        frame_image
    }
}

impl eframe::App for PongApp {
    fn update(
        &mut self,
        ctx: &Context,
        frame: &mut eframe::Frame,
    ) {
        if self.scheduler_join_handle.is_finished() {
            frame.close()
        }
        frame.set_window_size(Vec2::new(SCREEN_LEN_X as f32, SCREEN_LEN_Y as f32));

        self.write_ui_input(ctx);
        self.draw_frame_content(ctx);
    }

    fn on_exit(
        &mut self,
        _: Option<&glow::Context>,
    ) {
        self.shared_input.write().unwrap().events.push_back(Event::Quit);
    }
}

fn scheduler_thread(
    shared_frame: Arc<RwLock<ColorImage>>,
    shared_input: Arc<RwLock<SharedInput>>,
    egui_ctx: Context,
) {
    let mut surface = EguiSurface::new(
        SCREEN_LEN_X as usize,
        SCREEN_LEN_Y as usize,
        shared_frame,
        shared_input,
        egui_ctx,
    );
    let mut scheduler = FrameScheduler::new(PongMechanics::new());
    scheduler.run(&mut surface);
}

fn pong_user_game() -> eframe::Result<()> {
    let shared_frame = Arc::new(RwLock::new(ColorImage::new(
        [SCREEN_LEN_X as usize, SCREEN_LEN_Y as usize],
        Color32::BLACK,
    )));
    let shared_input = Arc::new(RwLock::new(SharedInput::default()));

    let s_shared_frame = Arc::clone(&shared_frame);
    let s_shared_input = Arc::clone(&shared_input);

    let mut native_options = eframe::NativeOptions::default();
    native_options.initial_window_size =
        Some(Vec2::new(SCREEN_LEN_X as f32, SCREEN_LEN_Y as f32));
    native_options.resizable = false;
    native_options.default_theme = eframe::Theme::Dark;
    eframe::run_native(WINDOW_TITLE, native_options, Box::new(|cc| {
        let egui_ctx = cc.egui_ctx.clone();
        let scheduler_join_handle =
            thread::spawn(move || scheduler_thread(s_shared_frame, s_shared_input, egui_ctx));
        Box::new(PongApp::new(cc, shared_frame, shared_input, scheduler_join_handle))
    }))
}

fn main() -> anyhow::Result<()> {
    init_logging();
    pong_user_game().map_err(|err| anyhow!("graphics subsystem startup failed: {err}"))?;
    Ok(())
}
