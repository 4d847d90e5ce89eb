//! Bounce entry point
//!
//! In the browser this hooks the game up to the page's canvases and storage.
//! Natively it plays a headless game with a scripted pointer and prints how
//! it went.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;

    use bounce::input::PointerInput;
    use bounce::persistence::WebStorage;
    use bounce::platform::web::{CanvasRenderer, Host, attach_listeners};
    use bounce::sim::Arena;
    use bounce::{Game, GameStats, Settings};

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Bounce starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let local = WebStorage::local()
            .ok_or_else(|| JsValue::from_str("localStorage unavailable"))?;
        let session = WebStorage::session()
            .ok_or_else(|| JsValue::from_str("sessionStorage unavailable"))?;

        let settings = Settings::load(&local);
        let autostart = settings.autostart;
        let stats = GameStats::new(local, session);

        let width = window.inner_width()?.as_f64().unwrap_or(800.0).floor();
        let height = window.inner_height()?.as_f64().unwrap_or(600.0).floor();
        let arena = Arena::for_canvas(width, height);
        let renderer = CanvasRenderer::new(arena.bounds)?;

        let pointer = Rc::new(RefCell::new(PointerInput::new()));
        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(arena, renderer, Rc::clone(&pointer), stats)
            .with_settings(settings)
            .with_seed(seed);
        game.draw();
        game.play(None, autostart);

        let host = Host::new(game, pointer);
        attach_listeners(&host)?;
        host.schedule();

        log::info!("Bounce running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::RefCell;
    use std::error::Error;
    use std::fs;
    use std::path::PathBuf;
    use std::rc::Rc;

    use clap::Parser;
    use glam::DVec2;

    use bounce::consts::FRAME_INTERVAL_MS;
    use bounce::input::PointerInput;
    use bounce::persistence::MemoryStorage;
    use bounce::platform::{FixedStepClock, run_until_idle};
    use bounce::renderer::{DrawCall, RecordingRenderer};
    use bounce::sim::{Arena, Difficulty};
    use bounce::{Game, GameStats, ScoreStore, Tuning};

    #[derive(Parser, Debug)]
    #[command(name = "bounce")]
    #[command(about = "Play a headless Bounce game with a scripted pointer")]
    struct Args {
        /// Canvas width in pixels
        #[arg(long, default_value_t = 800.0)]
        width: f64,

        /// Canvas height in pixels (the arena is the top half)
        #[arg(long, default_value_t = 600.0)]
        height: f64,

        /// dumb, easy, normal, tough or insane (or 1-5)
        #[arg(short, long, value_parser = parse_difficulty, default_value = "normal")]
        difficulty: Difficulty,

        /// Seed for the oscillating difficulties
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Stop after this many frames even if the game is still running
        #[arg(long, default_value_t = 3600)]
        frames: usize,

        /// Milliseconds between frames
        #[arg(long, default_value_t = FRAME_INTERVAL_MS)]
        frame_interval: f64,

        /// JSON file overriding the default tuning
        #[arg(long)]
        tuning: Option<PathBuf>,

        /// Radius of the circle's scripted orbit, as a fraction of the arena height
        #[arg(long, default_value_t = 0.2)]
        orbit: f64,
    }

    fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
        Difficulty::parse(s).ok_or_else(|| {
            format!("unknown difficulty '{s}' (expected dumb, easy, normal, tough or insane)")
        })
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        env_logger::init();
        let args = Args::parse();

        let tuning = match &args.tuning {
            Some(path) => Tuning::from_json(&fs::read_to_string(path)?)?,
            None => Tuning::default(),
        };

        let arena = Arena::for_canvas(args.width, args.height);
        let bounds = arena.bounds;
        let home = arena.circle.center;
        let orbit = DVec2::new(bounds.height, bounds.height) * args.orbit;

        let pointer = Rc::new(RefCell::new(PointerInput::new()));
        let stats = GameStats::new(MemoryStorage::new(), MemoryStorage::new());
        let mut game = Game::new(arena, RecordingRenderer::new(), Rc::clone(&pointer), stats)
            .with_tuning(tuning)
            .with_seed(args.seed);
        game.draw();
        game.play(Some(args.difficulty), true);

        log::info!(
            "Playing {} in a {}x{} arena",
            args.difficulty.as_str(),
            bounds.width,
            bounds.height
        );

        // The pointer grabs the circle, then circles around the spawn point
        let mut clock = FixedStepClock::new(args.frame_interval);
        let frames = run_until_idle(&mut game, &mut clock, args.frames, |frame, game| {
            let circle = game.arena().circle;
            let mut p = pointer.borrow_mut();
            if frame == 0 {
                p.press(circle.center, &circle);
                return;
            }
            let t = frame as f64 * args.frame_interval / 1000.0;
            p.pointer_moved(home + orbit * DVec2::new(t.sin(), (t * 0.7).cos() - 1.0));
        });
        if game.stop() {
            log::info!("Frame budget reached, game stopped");
        }

        let shape_draws = game
            .renderer()
            .count(|c| matches!(c, DrawCall::Shapes(_)));

        println!();
        println!("=== BOUNCE ===");
        println!("  Difficulty: {}", args.difficulty.as_str());
        println!("  Frames:     {frames}");
        println!("  Survived:   {:.2}s", game.elapsed_ms() / 1000.0);
        println!("  Score:      {}", game.score());
        println!("  Phase:      {:?}", game.phase());
        println!("  High score: {}", game.store().high_score());
        println!("  Redraws:    {shape_draws}");
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
