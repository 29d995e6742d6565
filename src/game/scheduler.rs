use crate::game::mechanics::{PongMechanics, BACKGROUND_COLOR, TARGET_FPS};
use crate::surface::{DisplaySurface, Event, KeyboardState, MouseState};

/// window for one FPS sample
const FPS_SAMPLE_MS: u64 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    /// terminal
    Stopped,
}

/// Drives the game at a fixed target frame rate against a [`DisplaySurface`].
///
/// Every frame runs the same fixed sequence: input/timing sample, clear and
/// pace, draw, present, quit check, mechanics update. A stop signal (quit
/// event or escape) never aborts a frame mid-phase; the running iteration
/// always completes before the loop exits.
pub struct FrameScheduler {
    mechanics: PongMechanics,
    state: LoopState,
    target_fps: u64,
    /// tick sample taken at the start of the current frame
    last_frame: u64,
    last_fps_sample: u64,
    frame_count: u64,
    fps: u64,
    keys: KeyboardState,
    mouse: MouseState,
}

impl FrameScheduler {
    pub fn new(mechanics: PongMechanics) -> Self {
        Self {
            mechanics,
            state: LoopState::Running,
            target_fps: TARGET_FPS,
            last_frame: 0,
            last_fps_sample: 0,
            frame_count: 0,
            fps: 0,
            keys: KeyboardState::default(),
            mouse: MouseState::default(),
        }
    }

    pub fn run<S: DisplaySurface>(&mut self, surface: &mut S) {
        while self.state == LoopState::Running {
            self.frame(surface);
        }
        log::info!(
            "final score: {} : {}",
            self.mechanics.score.left,
            self.mechanics.score.right
        );
    }

    /// One full frame. Public so a frame can be single-stepped in tests.
    pub fn frame<S: DisplaySurface>(&mut self, surface: &mut S) {
        self.sample_input(surface);
        self.begin_render(surface);
        self.mechanics.draw(surface);
        surface.present();
        if self.keys.escape {
            self.state = LoopState::Stopped;
        }
        self.mechanics.update(&self.keys);
    }

    /// Timing sample, FPS bookkeeping and a full drain of the event queue,
    /// followed by fresh keyboard and mouse snapshots. The mouse snapshot
    /// has no consumer in the game logic; it is polled once per frame
    /// anyway so the backend's pointer queue never backs up.
    fn sample_input<S: DisplaySurface>(&mut self, surface: &mut S) {
        self.last_frame = surface.ticks();
        if self.last_frame >= self.last_fps_sample + FPS_SAMPLE_MS {
            self.last_fps_sample = self.last_frame;
            self.fps = self.frame_count;
            self.frame_count = 0;
            log::trace!("fps: {}", self.fps);
        }

        while let Some(event) = surface.poll_event() {
            match event {
                Event::Quit => self.state = LoopState::Stopped,
            }
        }

        self.keys = surface.keyboard_state();
        self.mouse = surface.mouse_state();
    }

    /// Clear to the background color and burn off the rest of the frame
    /// budget. This is a plain frame-rate cap, not a fixed-timestep
    /// accumulator: slow frames are not caught up.
    fn begin_render<S: DisplaySurface>(&mut self, surface: &mut S) {
        surface.set_draw_color(BACKGROUND_COLOR);
        surface.clear();
        self.frame_count += 1;

        let frame_budget = 1000 / self.target_fps;
        let elapsed = surface.ticks() - self.last_frame;
        if elapsed < frame_budget {
            surface.delay(frame_budget - elapsed);
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn mechanics(&self) -> &PongMechanics {
        &self.mechanics
    }

    /// most recent completed FPS sample
    pub fn fps(&self) -> u64 {
        self.fps
    }

    /// most recent mouse snapshot (polled, unused by game logic)
    pub fn mouse(&self) -> MouseState {
        self.mouse
    }
}
