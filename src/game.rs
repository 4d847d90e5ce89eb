//! Game controller
//!
//! Owns the arena, the active motion policy and the collaborators, and runs
//! the state machine:
//!
//! ```text
//! Ready ──start──▶ Running ◀──resume── Paused
//!                     │ └────pause─────▶ │
//!                     └──stop / loss──▶ Ended ◀──stop──┘
//! Ended ──setup / restart──▶ Ready
//! ```
//!
//! The host calls `frame(now)` once per display refresh while
//! `needs_frame()` is true. Transitions change the phase at once, but any
//! drawing they cause is queued and done at the start of the next frame so it
//! can't interleave with a frame already in flight.

use crate::input::InputSource;
use crate::renderer::{Layer, Renderer, circle_dirty_rect, score_dirty_rect};
use crate::settings::Settings;
use crate::sim::{
    Arena, Difficulty, Edges, GameEvent, GamePhase, MotionPolicy, Rect, TickInput, make_policy,
    score_for, tick,
};
use crate::stats::ScoreStore;
use crate::tuning::Tuning;

/// Keyboard commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Start,
    Restart,
    Stop,
    TogglePause,
}

impl Shortcut {
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            's' => Some(Shortcut::Start),
            'r' => Some(Shortcut::Restart),
            'q' => Some(Shortcut::Stop),
            'p' | ' ' => Some(Shortcut::TogglePause),
            _ => None,
        }
    }
}

/// Drawing queued by a transition for the next frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    PauseScreen,
    ClearPauseScreen,
    Clear,
    Redraw,
}

pub type Listener = Box<dyn FnMut(GameEvent)>;

pub struct Game<R: Renderer, I: InputSource, S: ScoreStore> {
    arena: Arena,
    policy: Option<Box<dyn MotionPolicy>>,
    /// Broad-phase scratch, reused every frame
    candidates: Vec<usize>,
    /// Obstacle rectangles before the current tick
    prev_rects: Vec<Rect>,
    phase: GamePhase,
    elapsed_ms: f64,
    /// Timestamp of the previous frame; `None` until the first frame after
    /// start/resume
    last_timestamp: Option<f64>,
    last_score: u64,
    /// Score text currently on screen
    shown_score: Option<String>,
    shortcuts_active: bool,
    paused_by_blur: bool,
    deferred: Vec<Deferred>,
    listeners: Vec<Listener>,
    renderer: R,
    input: I,
    store: S,
    tuning: Tuning,
    settings: Settings,
    seed: u64,
}

impl<R: Renderer, I: InputSource, S: ScoreStore> Game<R, I, S> {
    pub fn new(arena: Arena, renderer: R, input: I, store: S) -> Self {
        Self {
            arena,
            policy: None,
            candidates: Vec::new(),
            prev_rects: Vec::new(),
            phase: GamePhase::Ready,
            elapsed_ms: 0.0,
            last_timestamp: None,
            last_score: 0,
            shown_score: None,
            shortcuts_active: false,
            paused_by_blur: false,
            deferred: Vec::new(),
            listeners: Vec::new(),
            renderer,
            input,
            store,
            tuning: Tuning::default(),
            settings: Settings::default(),
            seed: 0,
        }
    }

    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Seed for the oscillating policies
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Register a transition listener
    pub fn on_event(&mut self, listener: impl FnMut(GameEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // === Accessors ===

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Points earned so far this run
    pub fn score(&self) -> u64 {
        score_for(self.elapsed_ms, self.tuning.points_per_second)
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.policy.as_ref().map(|p| p.difficulty())
    }

    pub fn policy(&self) -> Option<&dyn MotionPolicy> {
        self.policy.as_deref()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether the host should keep scheduling frames
    pub fn needs_frame(&self) -> bool {
        self.phase == GamePhase::Running || !self.deferred.is_empty()
    }

    // === Transitions ===

    fn emit(&mut self, event: GameEvent) {
        log::info!("Game event: {}", event.as_str());
        for listener in &mut self.listeners {
            listener(event);
        }
    }

    fn build_policy(&self, difficulty: Difficulty) -> Box<dyn MotionPolicy> {
        make_policy(
            difficulty,
            self.arena.bounds,
            &self.arena.obstacles,
            &self.tuning,
            self.seed,
        )
    }

    /// Prepare a new run
    ///
    /// Without a policy, a fresh one is built for the previous difficulty
    /// (Normal on first use). No-op while a run is in progress.
    pub fn setup(&mut self, policy: Option<Box<dyn MotionPolicy>>) -> bool {
        if matches!(self.phase, GamePhase::Running | GamePhase::Paused) {
            return false;
        }
        self.phase = GamePhase::Ready;
        self.elapsed_ms = 0.0;
        self.last_timestamp = None;
        self.last_score = 0;
        self.paused_by_blur = false;

        let policy = match policy {
            Some(policy) => policy,
            None => self.build_policy(self.difficulty().unwrap_or_default()),
        };
        self.policy = Some(policy);

        self.shortcuts_active = self.settings.shortcuts;
        self.input.arm();
        self.emit(GameEvent::Setup);
        true
    }

    /// Set up for a difficulty and optionally start
    ///
    /// `None` uses the stored difficulty, then the settings default.
    pub fn play(&mut self, difficulty: Option<Difficulty>, autostart: bool) -> bool {
        let difficulty = difficulty
            .or_else(|| self.store.difficulty())
            .unwrap_or(self.settings.difficulty);
        let policy = self.build_policy(difficulty);
        if !self.setup(Some(policy)) {
            return false;
        }
        if autostart {
            self.start();
        }
        true
    }

    /// Begin a run. Has no effect unless the game is set up and not started.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Ready || self.policy.is_none() {
            return false;
        }
        self.phase = GamePhase::Running;
        self.last_timestamp = None;
        self.input.start();
        self.emit(GameEvent::Start);
        true
    }

    /// End the run in progress, recording the score and the play
    pub fn stop(&mut self) -> bool {
        if !matches!(self.phase, GamePhase::Running | GamePhase::Paused) {
            return false;
        }
        if self.phase == GamePhase::Paused {
            self.deferred.push(Deferred::ClearPauseScreen);
        }
        self.input.stop();
        self.save_stats();
        self.phase = GamePhase::Ended;
        log::info!("Game over with score {}", self.score());
        self.emit(GameEvent::Stop);
        true
    }

    /// Freeze a running game
    pub fn pause(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        self.phase = GamePhase::Paused;
        self.deferred.push(Deferred::PauseScreen);
        // The session may end while paused, keep the score safe
        self.save_score();
        self.emit(GameEvent::Pause);
        true
    }

    /// Continue a paused game
    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::Paused {
            return false;
        }
        self.phase = GamePhase::Running;
        self.paused_by_blur = false;
        self.deferred.push(Deferred::ClearPauseScreen);
        // Paused time must not count toward the next dt
        self.last_timestamp = None;
        self.emit(GameEvent::Resume);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.phase == GamePhase::Paused {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// Stop, put everything back where it spawned and set up again
    ///
    /// The motion policy is rebuilt for the same difficulty, so obstacle
    /// velocities start over too.
    pub fn restart(&mut self, autostart: bool) -> bool {
        self.stop();
        self.emit(GameEvent::Restart);
        self.shortcuts_active = false;

        self.arena.reposition();
        self.deferred.push(Deferred::Clear);
        self.draw();

        if !self.setup(None) {
            return false;
        }
        if autostart {
            self.start();
        }
        true
    }

    /// Queue a full redraw for the next frame
    pub fn draw(&mut self) {
        self.deferred.push(Deferred::Redraw);
    }

    // === Host hooks ===

    pub fn handle_shortcut(&mut self, shortcut: Shortcut) -> bool {
        if !self.shortcuts_active {
            return false;
        }
        match shortcut {
            Shortcut::Start => self.start(),
            Shortcut::Restart => self.restart(true),
            Shortcut::Stop => self.stop(),
            Shortcut::TogglePause => self.toggle_pause(),
        }
    }

    pub fn handle_key(&mut self, key: char) -> bool {
        Shortcut::from_key(key).is_some_and(|s| self.handle_shortcut(s))
    }

    /// Window lost focus
    pub fn focus_lost(&mut self) -> bool {
        if !self.settings.pause_on_blur || !self.pause() {
            return false;
        }
        self.paused_by_blur = true;
        true
    }

    /// Window regained focus; only undoes a pause caused by `focus_lost`
    pub fn focus_gained(&mut self) -> bool {
        if !self.settings.pause_on_blur || !self.paused_by_blur {
            return false;
        }
        self.resume()
    }

    // === Persistence ===

    fn save_score(&mut self) {
        let score = self.score();
        if let Err(e) = self.store.update_current_score(score as f64) {
            log::warn!("Could not save score {score}: {e}");
        }
    }

    fn save_stats(&mut self) {
        self.save_score();
        let played = self.store.inc_times_played();
        log::debug!("Games played this session: {played}");
    }

    // === Drawing ===

    fn flush_deferred(&mut self) {
        for effect in std::mem::take(&mut self.deferred) {
            match effect {
                Deferred::PauseScreen => self.renderer.draw_pause_screen(),
                Deferred::ClearPauseScreen => self.renderer.clear_pause_screen(),
                Deferred::Clear => {
                    self.renderer.clear();
                    self.shown_score = None;
                }
                Deferred::Redraw => self.redraw(),
            }
        }
    }

    fn redraw(&mut self) {
        self.renderer.draw_background(self.arena.bounds);
        self.renderer.draw_shapes(&self.arena.obstacles);
        self.renderer.draw_circle(&self.arena.circle);
        self.draw_score(self.score());
    }

    /// Replace the score on screen, clearing only the old text's box
    fn draw_score(&mut self, score: u64) {
        let anchor = self.arena.score_anchor();
        if let Some(shown) = self.shown_score.take() {
            let width = self.renderer.text_width(&shown);
            let rect = score_dirty_rect(anchor, width, self.tuning.score_text_aspect);
            self.renderer.clear_rect(Layer::Bottom, &rect);
        }
        let text = score.to_string();
        self.renderer.draw_score(&text, anchor);
        self.shown_score = Some(text);
        self.last_score = score;
    }

    // === Frame ===

    /// Run one frame at host timestamp `now` (ms)
    ///
    /// Returns whether another frame is needed.
    pub fn frame(&mut self, now: f64) -> bool {
        self.flush_deferred();
        if self.phase != GamePhase::Running {
            return self.needs_frame();
        }

        let dt = match self.last_timestamp {
            Some(prev) => (now - prev).max(0.0),
            None => 0.0,
        };
        self.last_timestamp = Some(now);
        self.elapsed_ms += dt;

        let input = TickInput {
            circle_target: self.input.moved().then(|| self.input.circle_pos()),
        };
        let prev_circle = self.arena.circle;
        self.prev_rects.clear();
        self.prev_rects
            .extend(self.arena.obstacles.iter().map(|o| o.bounding_box()));

        let Some(policy) = self.policy.as_mut() else {
            return false;
        };
        let outcome = tick(
            &mut self.arena,
            policy.as_mut(),
            &mut self.candidates,
            &input,
            dt,
        );
        log::trace!("frame dt={dt:.1} elapsed={:.0} {outcome:?}", self.elapsed_ms);

        if outcome.circle_moved {
            self.renderer
                .clear_rect(Layer::Top, &circle_dirty_rect(&prev_circle));
            self.renderer.draw_circle(&self.arena.circle);
        }
        // Shapes after the circle so they stay on top
        for rect in &self.prev_rects {
            self.renderer.clear_rect(Layer::Top, rect);
        }
        self.renderer.draw_shapes(&self.arena.obstacles);

        if outcome.is_loss() {
            self.stop();
            return false;
        }

        let score = self.score();
        if score != self.last_score {
            self.draw_score(score);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::DVec2;

    use crate::input::PointerInput;
    use crate::persistence::MemoryStorage;
    use crate::renderer::{DrawCall, RecordingRenderer};
    use crate::sim::{Bounds, Circle, Obstacle, Reflect, Wrap};
    use crate::stats::GameStats;

    type TestGame = Game<RecordingRenderer, Rc<RefCell<PointerInput>>, GameStats<MemoryStorage, MemoryStorage>>;

    fn test_arena() -> Arena {
        Arena::new(
            Bounds::new(200.0, 100.0),
            Circle::new(100.0, 50.0, 10.0),
            vec![Obstacle::square(0.0, 0.0, 20.0)],
        )
    }

    fn test_game() -> (TestGame, Rc<RefCell<PointerInput>>, Rc<RefCell<Vec<GameEvent>>>) {
        let pointer = Rc::new(RefCell::new(PointerInput::new()));
        let stats = GameStats::new(MemoryStorage::new(), MemoryStorage::new());
        let mut game = Game::new(
            test_arena(),
            RecordingRenderer::new(),
            Rc::clone(&pointer),
            stats,
        );
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        game.on_event(move |e| sink.borrow_mut().push(e));
        (game, pointer, events)
    }

    /// Obstacles that never move
    fn still(game: &TestGame) -> Box<dyn MotionPolicy> {
        let count = game.arena().obstacles.len();
        Box::new(Wrap::with_velocities(
            game.arena().bounds,
            vec![DVec2::ZERO; count],
        ))
    }

    fn drag_to(pointer: &Rc<RefCell<PointerInput>>, circle: &Circle, target: DVec2) {
        let mut p = pointer.borrow_mut();
        p.press(circle.center, circle);
        p.pointer_moved(target);
    }

    #[test]
    fn test_pause_while_ready_is_noop() {
        let (mut game, _, events) = test_game();
        let policy = still(&game);
        game.setup(Some(policy));
        events.borrow_mut().clear();

        assert!(!game.pause());
        assert_eq!(game.phase(), GamePhase::Ready);
        assert!(events.borrow().is_empty());
        assert!(!game.needs_frame());
        game.frame(0.0);
        assert!(game.renderer().calls.is_empty());
        assert_eq!(game.store().current_score(), 0.0);
    }

    #[test]
    fn test_start_requires_setup() {
        let (mut game, _, _) = test_game();
        assert!(!game.start());
        assert_eq!(game.phase(), GamePhase::Ready);
    }

    #[test]
    fn test_start_twice_only_once() {
        let (mut game, _, events) = test_game();
        let policy = still(&game);
        game.setup(Some(policy));

        assert!(game.start());
        assert!(!game.start());
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(
            *events.borrow(),
            vec![GameEvent::Setup, GameEvent::Start]
        );
    }

    #[test]
    fn test_setup_refused_while_running() {
        let (mut game, _, _) = test_game();
        let policy = still(&game);
        game.setup(Some(policy));
        game.start();
        assert!(!game.setup(None));
        assert!(!game.play(Some(Difficulty::Easy), true));
        assert_eq!(game.phase(), GamePhase::Running);
    }

    #[test]
    fn test_score_follows_elapsed_time() {
        let (mut game, _, _) = test_game();
        let policy = still(&game);
        game.setup(Some(policy));
        game.start();

        assert!(game.frame(1000.0));
        assert_eq!(game.elapsed_ms(), 0.0);
        game.frame(1500.0);
        assert_eq!(game.score(), 1);
        assert_eq!(game.renderer().last_score(), Some("1"));

        game.renderer_mut().take();
        game.frame(2000.0);
        assert_eq!(game.score(), 2);
        let calls = game.renderer().calls.clone();
        // "1" is 40 wide → 60 high around (100, 50)
        assert!(calls.contains(&DrawCall::ClearRect(
            Layer::Bottom,
            Rect::new(80.0, 20.0, 40.0, 60.0)
        )));
        assert_eq!(game.renderer().last_score(), Some("2"));

        // No score change, no score redraw
        game.renderer_mut().take();
        game.frame(2100.0);
        assert!(game.renderer().last_score().is_none());
    }

    #[test]
    fn test_obstacles_redrawn_every_frame() {
        let (mut game, _, _) = test_game();
        let bounds = game.arena().bounds;
        game.setup(Some(Box::new(Reflect::with_velocities(
            Difficulty::Easy,
            bounds,
            vec![DVec2::splat(0.1)],
        ))));
        game.start();
        game.frame(0.0);
        game.renderer_mut().take();

        game.frame(100.0);
        let calls = game.renderer().calls.clone();
        assert_eq!(
            calls[0],
            DrawCall::ClearRect(Layer::Top, Rect::new(0.0, 0.0, 20.0, 20.0))
        );
        assert_eq!(
            calls[1],
            DrawCall::Shapes(vec![Obstacle::square(10.0, 10.0, 20.0)])
        );
        // The circle didn't move, so it isn't touched
        assert_eq!(game.renderer().count(|c| matches!(c, DrawCall::Circle(_))), 0);
    }

    #[test]
    fn test_collision_ends_game() {
        let (mut game, pointer, events) = test_game();
        let policy = still(&game);
        game.setup(Some(policy));
        game.start();
        game.frame(0.0);
        game.frame(1000.0);

        let circle = game.arena().circle;
        drag_to(&pointer, &circle, DVec2::new(25.0, 25.0));
        assert!(!game.frame(1100.0));

        assert_eq!(game.phase(), GamePhase::Ended);
        assert!(!game.needs_frame());
        assert_eq!(events.borrow().last(), Some(&GameEvent::Stop));
        assert_eq!(game.store().times_played(), 1);
        assert_eq!(game.store().total_times_played(), 1);
        assert_eq!(game.store().high_score(), 2.0);
        assert!(!pointer.borrow().is_tracking());

        // Frames after the end change nothing
        game.renderer_mut().take();
        game.frame(5000.0);
        assert!(game.renderer().calls.is_empty());
        assert_eq!(game.score(), 2);
    }

    #[test]
    fn test_circle_moves_with_dirty_rect() {
        let (mut game, pointer, _) = test_game();
        let policy = still(&game);
        game.setup(Some(policy));
        game.start();
        game.frame(0.0);
        game.renderer_mut().take();

        let circle = game.arena().circle;
        drag_to(&pointer, &circle, DVec2::new(120.0, 60.0));
        game.frame(16.0);

        let calls = game.renderer().calls.clone();
        assert_eq!(
            calls[0],
            DrawCall::ClearRect(Layer::Top, Rect::new(90.0, 40.0, 20.0, 20.0))
        );
        assert_eq!(calls[1], DrawCall::Circle(Circle::new(120.0, 60.0, 10.0)));
        assert_eq!(game.phase(), GamePhase::Running);
    }

    #[test]
    fn test_leaving_arena_ends_game() {
        let (mut game, pointer, _) = test_game();
        game.play(Some(Difficulty::Easy), true);
        game.frame(0.0);

        let circle = game.arena().circle;
        drag_to(&pointer, &circle, DVec2::new(195.0, 50.0));
        game.frame(16.0);
        assert_eq!(game.phase(), GamePhase::Ended);
    }

    #[test]
    fn test_pause_excludes_paused_time() {
        let (mut game, _, events) = test_game();
        let policy = still(&game);
        game.setup(Some(policy));
        game.start();
        game.frame(0.0);
        game.frame(1000.0);

        assert!(game.pause());
        assert!(!game.pause());
        assert_eq!(game.store().current_score(), 2.0);
        assert!(game.needs_frame());

        game.renderer_mut().take();
        game.frame(5000.0);
        assert_eq!(game.renderer().calls, vec![DrawCall::PauseScreen]);
        assert!(game.renderer().pause_visible);
        assert_eq!(game.elapsed_ms(), 1000.0);

        assert!(game.resume());
        game.frame(9000.0);
        assert!(!game.renderer().pause_visible);
        game.frame(9500.0);
        assert_eq!(game.elapsed_ms(), 1500.0);
        assert_eq!(game.score(), 3);

        assert_eq!(
            *events.borrow(),
            vec![
                GameEvent::Setup,
                GameEvent::Start,
                GameEvent::Pause,
                GameEvent::Resume
            ]
        );
    }

    #[test]
    fn test_stop_while_paused_clears_overlay() {
        let (mut game, _, _) = test_game();
        let policy = still(&game);
        game.setup(Some(policy));
        game.start();
        game.pause();
        game.frame(0.0);
        assert!(game.renderer().pause_visible);

        assert!(game.stop());
        assert!(!game.stop());
        game.frame(10.0);
        assert!(!game.renderer().pause_visible);
        assert_eq!(game.phase(), GamePhase::Ended);
    }

    #[test]
    fn test_restart_restores_spawn_and_velocities() {
        let (mut game, pointer, events) = test_game();
        game.play(Some(Difficulty::Easy), true);
        game.frame(0.0);
        let circle = game.arena().circle;
        drag_to(&pointer, &circle, DVec2::new(150.0, 70.0));
        game.frame(200.0);
        game.frame(400.0);
        assert_ne!(game.arena().obstacles[0].pos(), DVec2::ZERO);
        events.borrow_mut().clear();

        assert!(game.restart(true));

        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.elapsed_ms(), 0.0);
        assert_eq!(game.difficulty(), Some(Difficulty::Easy));
        assert_eq!(game.arena().obstacles[0].pos(), DVec2::ZERO);
        assert_eq!(game.arena().circle.center, DVec2::new(100.0, 50.0));
        assert_eq!(
            *events.borrow(),
            vec![
                GameEvent::Stop,
                GameEvent::Restart,
                GameEvent::Setup,
                GameEvent::Start
            ]
        );

        // Deferred clear + full redraw happen on the next frame
        game.renderer_mut().take();
        game.frame(1000.0);
        let calls = game.renderer().calls.clone();
        assert_eq!(calls[0], DrawCall::Clear);
        assert_eq!(calls[1], DrawCall::Background(Bounds::new(200.0, 100.0)));
        assert_eq!(game.renderer().last_score(), Some("0"));
    }

    #[test]
    fn test_restart_without_autostart_waits() {
        let (mut game, _, _) = test_game();
        game.play(Some(Difficulty::Normal), true);
        game.restart(false);
        assert_eq!(game.phase(), GamePhase::Ready);
        assert!(game.start());
    }

    #[test]
    fn test_keyboard_shortcuts() {
        let (mut game, _, _) = test_game();
        assert!(!game.handle_key('s'));

        let policy = still(&game);
        game.setup(Some(policy));
        assert!(game.handle_key('S'));
        assert!(game.handle_key('p'));
        assert_eq!(game.phase(), GamePhase::Paused);
        assert!(game.handle_key(' '));
        assert_eq!(game.phase(), GamePhase::Running);
        assert!(!game.handle_key('x'));
        assert!(game.handle_key('q'));
        assert_eq!(game.phase(), GamePhase::Ended);
        assert!(game.handle_key('r'));
        assert_eq!(game.phase(), GamePhase::Running);
    }

    #[test]
    fn test_shortcuts_can_be_disabled() {
        let (game, _, _) = test_game();
        let mut game = game.with_settings(Settings {
            shortcuts: false,
            ..Settings::default()
        });
        game.play(None, false);
        assert!(!game.handle_key('s'));
        assert_eq!(game.phase(), GamePhase::Ready);
    }

    #[test]
    fn test_focus_pauses_and_resumes() {
        let (mut game, _, _) = test_game();
        let policy = still(&game);
        game.setup(Some(policy));
        assert!(!game.focus_lost());

        game.start();
        assert!(game.focus_lost());
        assert_eq!(game.phase(), GamePhase::Paused);
        assert!(game.focus_gained());
        assert_eq!(game.phase(), GamePhase::Running);

        // A manual pause survives a focus round trip
        game.pause();
        assert!(!game.focus_lost());
        assert!(!game.focus_gained());
        assert_eq!(game.phase(), GamePhase::Paused);
    }

    #[test]
    fn test_play_uses_stored_difficulty() {
        let (mut game, _, _) = test_game();
        game.store_mut().set_difficulty(Difficulty::Tough);
        assert!(game.play(None, false));
        assert_eq!(game.difficulty(), Some(Difficulty::Tough));

        let (mut fresh, _, _) = test_game();
        fresh.play(None, false);
        assert_eq!(fresh.difficulty(), Some(Difficulty::Normal));
    }
}
