use egui::{Color32, Pos2, Vec2};

use crate::raster;
use crate::surface::{DisplaySurface, KeyboardState};

/// TOP / LEFT corner is 0/0
pub const SCREEN_LEN_X: i32 = 800;
pub const SCREEN_LEN_Y: i32 = 800;

pub const PADDLE_LEN_X: f32 = 20.0;
pub const PADDLE_LEN_Y: f32 = 100.0;
/// keyboard-driven paddle movement per frame
const PADDLE_STEP: f32 = 10.0;
/// fallback y-position after a paddle edge left the playfield (snap, not clamp)
const PADDLE_SNAP_BACK_Y: f32 = (SCREEN_LEN_Y - 50) as f32;

const BALL_RADIUS: i32 = 20;
const BALL_START_X: f32 = 300.0;
const BALL_START_Y: f32 = 300.0;
const BALL_START_XV: f32 = 7.0;
const BALL_START_YV: f32 = 10.0;

const ENTITY_COLOR: Color32 = Color32::from_rgb(255, 0, 255);
pub const BACKGROUND_COLOR: Color32 = Color32::BLACK;

pub const TARGET_FPS: u64 = 60;

/// Side of the playfield the ball left through on a scoring event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

/// A paddle is a filled rectangle; `pos` is its geometric center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paddle {
    pub pos: Pos2,
    pub width: f32,
    pub height: f32,
    pub color: Color32,
}

impl Paddle {
    pub fn draw<S: DisplaySurface>(&self, surface: &mut S) {
        raster::draw_rectangle(surface, self.pos, self.width, self.height, self.color);
    }

    /// Keyboard-driven movement. A paddle edge beyond the top or bottom
    /// border snaps the paddle back to a fixed fallback position.
    pub fn update(&mut self, keys: &KeyboardState) {
        if keys.up {
            self.pos.y -= PADDLE_STEP;
        }
        if keys.down {
            self.pos.y += PADDLE_STEP;
        }

        if self.pos.y - self.height / 2.0 < 0.0
            || self.pos.y + self.height / 2.0 > SCREEN_LEN_Y as f32
        {
            self.pos.y = PADDLE_SNAP_BACK_Y;
        }
    }

    /// Opponent control: perfect vertical tracking, no speed cap.
    pub fn ai_update(&mut self, ball: &Ball) {
        self.pos.y = ball.pos.y;
    }
}

/// A ball is a filled circle; `pos` is the circle center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ball {
    pub pos: Pos2,
    pub radius: i32,
    pub velocity: Vec2,
    pub color: Color32,
}

impl Ball {
    pub fn draw<S: DisplaySurface>(&self, surface: &mut S) {
        raster::draw_circle(surface, self.pos, self.radius, self.color);
    }

    /// Move one frame forward and resolve collisions.
    ///
    /// When the ball leaves the field through a side border it respawns at
    /// the horizontal center (y and velocity untouched) and no further
    /// collision checks run this frame; the crossed side is reported so the
    /// caller can keep score.
    pub fn update(&mut self, paddle1: &Paddle, paddle2: &Paddle) -> Option<Side> {
        self.pos += self.velocity;
        let radius = self.radius as f32;

        if self.pos.x - radius <= 0.0 {
            self.pos.x = SCREEN_LEN_X as f32 / 2.0;
            return Some(Side::Left);
        }
        if self.pos.x + radius >= SCREEN_LEN_X as f32 {
            self.pos.x = SCREEN_LEN_X as f32 / 2.0;
            return Some(Side::Right);
        }

        // border bounces, evaluated on truncated pixel coordinates
        if (self.pos.y as i32) - self.radius < 0 || (self.pos.y as i32) + self.radius > SCREEN_LEN_Y
        {
            self.velocity.y = -self.velocity.y;
        }
        if (self.pos.x as i32) - self.radius < 0 || (self.pos.x as i32) + self.radius > SCREEN_LEN_X
        {
            self.velocity.x = -self.velocity.x;
        }

        // paddle bounces; the vertical overlap test uses the ball's bottom
        // edge only, and there is no debounce: any frame satisfying the
        // condition inverts the horizontal velocity again
        if self.pos.x - radius < paddle1.pos.x + PADDLE_LEN_X / 2.0
            && self.pos.y + radius > paddle1.pos.y - PADDLE_LEN_Y / 2.0
            && self.pos.y + radius < paddle1.pos.y + PADDLE_LEN_Y / 2.0
        {
            self.velocity.x = -self.velocity.x;
        }
        if self.pos.x + radius > paddle2.pos.x - PADDLE_LEN_X / 2.0
            && self.pos.y + radius > paddle2.pos.y - PADDLE_LEN_Y / 2.0
            && self.pos.y + radius < paddle2.pos.y + PADDLE_LEN_Y / 2.0
        {
            self.velocity.x = -self.velocity.x;
        }

        None
    }
}

/// Complete game state: both paddles, the ball and the score tally.
/// Owned by the frame scheduler; nothing here is process-global.
#[derive(Clone, Debug)]
pub struct PongMechanics {
    pub paddle1: Paddle,
    pub paddle2: Paddle,
    pub ball: Ball,
    pub score: Score,
}

impl PongMechanics {
    pub fn new() -> Self {
        Self {
            paddle1: Self::initial_left_paddle(),
            paddle2: Self::initial_right_paddle(),
            ball: Self::initial_ball(),
            score: Score::default(),
        }
    }

    pub fn initial_left_paddle() -> Paddle {
        Paddle {
            pos: Pos2::new(PADDLE_LEN_X, SCREEN_LEN_Y as f32 / 2.0),
            width: PADDLE_LEN_X,
            height: PADDLE_LEN_Y,
            color: ENTITY_COLOR,
        }
    }

    pub fn initial_right_paddle() -> Paddle {
        Paddle {
            pos: Pos2::new(SCREEN_LEN_X as f32 - PADDLE_LEN_X, SCREEN_LEN_Y as f32 / 2.0),
            width: PADDLE_LEN_X,
            height: PADDLE_LEN_Y,
            color: ENTITY_COLOR,
        }
    }

    pub fn initial_ball() -> Ball {
        Ball {
            pos: Pos2::new(BALL_START_X, BALL_START_Y),
            radius: BALL_RADIUS,
            velocity: Vec2::new(BALL_START_XV, BALL_START_YV),
            color: ENTITY_COLOR,
        }
    }

    pub fn draw<S: DisplaySurface>(&self, surface: &mut S) {
        self.paddle1.draw(surface);
        self.paddle2.draw(surface);
        self.ball.draw(surface);
    }

    /// One update phase: ball physics first (consuming the paddles' current
    /// state), then the keyboard paddle, then the tracking opponent.
    pub fn update(&mut self, keys: &KeyboardState) {
        if let Some(side) = self.ball.update(&self.paddle1, &self.paddle2) {
            match side {
                Side::Left => self.score.right += 1,
                Side::Right => self.score.left += 1,
            }
            log::debug!("score: {} : {}", self.score.left, self.score.right);
        }
        self.paddle1.update(keys);
        self.paddle2.ai_update(&self.ball);
    }
}

impl Default for PongMechanics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use egui::{Pos2, Vec2};
    use rstest::rstest;

    use super::*;

    fn test_ball(pos: Pos2, velocity: Vec2) -> Ball {
        Ball {
            pos,
            radius: BALL_RADIUS,
            velocity,
            color: ENTITY_COLOR,
        }
    }

    fn test_paddle(pos: Pos2) -> Paddle {
        Paddle {
            pos,
            width: PADDLE_LEN_X,
            height: PADDLE_LEN_Y,
            color: ENTITY_COLOR,
        }
    }

    fn paddles_out_of_reach() -> (Paddle, Paddle) {
        // vertically far away from any test ball trajectory
        (
            test_paddle(Pos2::new(PADDLE_LEN_X, 700.0)),
            test_paddle(Pos2::new(SCREEN_LEN_X as f32 - PADDLE_LEN_X, 700.0)),
        )
    }

    #[rstest]
    #[case(Pos2::new(5.0, 300.0), Vec2::new(- 7.0, 0.0), Side::Left)]
    #[case(Pos2::new(795.0, 300.0), Vec2::new(7.0, 0.0), Side::Right)]
    #[case(Pos2::new(25.0, 300.0), Vec2::new(- 7.0, 0.0), Side::Left)]
    fn ball_respawns_at_horizontal_center_on_scoring(
        #[case] pos: Pos2,
        #[case] velocity: Vec2,
        #[case] expected_side: Side,
    ) {
        let (paddle1, paddle2) = paddles_out_of_reach();
        let mut ball = test_ball(pos, velocity);

        let side = ball.update(&paddle1, &paddle2);

        assert_eq!(side, Some(expected_side));
        assert_eq!(ball.pos.x, SCREEN_LEN_X as f32 / 2.0);
        assert_eq!(ball.pos.y, pos.y);
        assert_eq!(ball.velocity, velocity);
    }

    #[test]
    fn scoring_skips_all_collision_checks_that_frame() {
        let (paddle1, paddle2) = paddles_out_of_reach();
        // lands in scoring range; the border bounce would invert yv if reached
        let mut ball = test_ball(Pos2::new(10.0, 15.0), Vec2::new(-7.0, 0.0));

        let side = ball.update(&paddle1, &paddle2);

        assert_eq!(side, Some(Side::Left));
        assert_eq!(ball.velocity, Vec2::new(-7.0, 0.0));
    }

    #[rstest]
    #[case(Pos2::new(400.0, 25.0), Vec2::new(0.0, - 10.0), 15.0)] // top border
    #[case(Pos2::new(400.0, 775.0), Vec2::new(0.0, 10.0), 785.0)] // bottom border
    fn ball_bounces_off_horizontal_borders(
        #[case] pos: Pos2,
        #[case] velocity: Vec2,
        #[case] expected_y: f32,
    ) {
        let (paddle1, paddle2) = paddles_out_of_reach();
        let mut ball = test_ball(pos, velocity);

        let side = ball.update(&paddle1, &paddle2);

        assert_eq!(side, None);
        // position integrates with the pre-bounce velocity
        assert_eq!(ball.pos.y, expected_y);
        assert_eq!(ball.velocity.y, -velocity.y);
        assert_eq!(ball.velocity.x, velocity.x);
    }

    #[test]
    fn ball_bounces_off_left_paddle() {
        let paddle1 = test_paddle(Pos2::new(PADDLE_LEN_X, 400.0));
        let paddle2 = test_paddle(Pos2::new(SCREEN_LEN_X as f32 - PADDLE_LEN_X, 700.0));
        let mut ball = test_ball(Pos2::new(45.0, 400.0), Vec2::new(-7.0, 0.0));

        let side = ball.update(&paddle1, &paddle2);

        assert_eq!(side, None);
        assert_eq!(ball.velocity.x, 7.0);
    }

    #[test]
    fn ball_bounces_off_right_paddle() {
        let paddle1 = test_paddle(Pos2::new(PADDLE_LEN_X, 700.0));
        let paddle2 = test_paddle(Pos2::new(SCREEN_LEN_X as f32 - PADDLE_LEN_X, 400.0));
        let mut ball = test_ball(Pos2::new(755.0, 400.0), Vec2::new(7.0, 0.0));

        let side = ball.update(&paddle1, &paddle2);

        assert_eq!(side, None);
        assert_eq!(ball.velocity.x, -7.0);
    }

    /// the vertical overlap test uses the ball's bottom edge only: a ball
    /// whose bottom edge sits below the paddle does not bounce even though
    /// its body overlaps the paddle
    #[test]
    fn paddle_bounce_tests_ball_bottom_edge_only() {
        let paddle1 = test_paddle(Pos2::new(PADDLE_LEN_X, 400.0));
        let paddle2 = test_paddle(Pos2::new(SCREEN_LEN_X as f32 - PADDLE_LEN_X, 700.0));
        // after integration: y = 440, bottom edge 460 > paddle bottom 450
        let mut ball = test_ball(Pos2::new(45.0, 440.0), Vec2::new(-7.0, 0.0));

        ball.update(&paddle1, &paddle2);

        assert_eq!(ball.velocity.x, -7.0);
    }

    /// no debounce: the condition holds on consecutive frames and inverts
    /// the velocity each time
    #[test]
    fn paddle_bounce_repeats_while_condition_holds() {
        let paddle1 = test_paddle(Pos2::new(PADDLE_LEN_X, 400.0));
        let paddle2 = test_paddle(Pos2::new(SCREEN_LEN_X as f32 - PADDLE_LEN_X, 700.0));
        let mut ball = test_ball(Pos2::new(28.0, 400.0), Vec2::new(1.0, 0.0));

        ball.update(&paddle1, &paddle2);
        assert_eq!(ball.velocity.x, -1.0);
        ball.update(&paddle1, &paddle2);
        assert_eq!(ball.velocity.x, 1.0);
    }

    #[rstest]
    #[case(KeyboardState { up: true, ..Default::default() }, 390.0)]
    #[case(KeyboardState { down: true, ..Default::default() }, 410.0)]
    #[case(KeyboardState::default(), 400.0)]
    fn paddle_moves_by_fixed_step(#[case] keys: KeyboardState, #[case] expected_y: f32) {
        let mut paddle = test_paddle(Pos2::new(PADDLE_LEN_X, 400.0));
        paddle.update(&keys);
        assert_eq!(paddle.pos.y, expected_y);
    }

    #[rstest]
    #[case(0.0)] // top edge above the border
    #[case(45.0)]
    #[case(790.0)] // bottom edge below the border
    fn paddle_snaps_to_fallback_position_outside_playfield(#[case] start_y: f32) {
        let mut paddle = test_paddle(Pos2::new(PADDLE_LEN_X, start_y));
        paddle.update(&KeyboardState::default());
        assert_eq!(paddle.pos.y, (SCREEN_LEN_Y - 50) as f32);
    }

    #[test]
    fn ai_paddle_tracks_ball_exactly() {
        let ball = test_ball(Pos2::new(400.0, 437.5), Vec2::new(7.0, 10.0));
        let mut paddle = test_paddle(Pos2::new(SCREEN_LEN_X as f32 - PADDLE_LEN_X, 123.0));

        paddle.ai_update(&ball);

        assert_eq!(paddle.pos.y, 437.5);
    }

    #[rstest]
    #[case(Pos2::new(5.0, 300.0), Vec2::new(- 7.0, 0.0), Score { left: 0, right: 1 })]
    #[case(Pos2::new(795.0, 300.0), Vec2::new(7.0, 0.0), Score { left: 1, right: 0 })]
    fn score_goes_to_opposite_player(
        #[case] ball_pos: Pos2,
        #[case] ball_velocity: Vec2,
        #[case] expected_score: Score,
    ) {
        let mut mechanics = PongMechanics::new();
        mechanics.paddle1.pos.y = 700.0;
        mechanics.paddle2.pos.y = 700.0;
        mechanics.ball = test_ball(ball_pos, ball_velocity);

        mechanics.update(&KeyboardState::default());

        assert_eq!(mechanics.score, expected_score);
    }

    #[test]
    fn update_order_lets_ai_track_current_frame_ball() {
        let mut mechanics = PongMechanics::new();
        mechanics.update(&KeyboardState::default());
        // ball moved first, then the opponent copied the new y
        assert_eq!(mechanics.paddle2.pos.y, mechanics.ball.pos.y);
    }
}
