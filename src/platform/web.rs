//! Browser host
//!
//! Four stacked 2D canvases (`bounce-back`, `bounce-top`, `bounce-pause`
//! over the arena, `bounce-score` below it) and the DOM event wiring. Frames
//! are scheduled with `requestAnimationFrame` only while the game asks for
//! them; any input event re-arms the loop.

use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::Rc;

use glam::DVec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

use crate::game::Game;
use crate::input::PointerInput;
use crate::persistence::WebStorage;
use crate::renderer::{Layer, Renderer};
use crate::sim::{Bounds, Circle, Edges, Obstacle, Rect};
use crate::stats::GameStats;

const BACKGROUND: &str = "#1d1f21";
const CIRCLE: &str = "#f0c674";
const SHAPES: &str = "#81a2be";
const SCORE: &str = "#c5c8c6";
const PAUSE_VEIL: &str = "rgba(0, 0, 0, 0.6)";

pub type WebGame = Game<CanvasRenderer, Rc<RefCell<PointerInput>>, GameStats<WebStorage, WebStorage>>;

fn canvas(id: &str) -> Result<HtmlCanvasElement, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str(&format!("#{id} is not a canvas")))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("not a 2d context"))
}

pub struct CanvasRenderer {
    back: CanvasRenderingContext2d,
    top: CanvasRenderingContext2d,
    score: CanvasRenderingContext2d,
    pause: CanvasRenderingContext2d,
    bounds: Bounds,
}

impl CanvasRenderer {
    /// Size every layer to the arena and grab its context
    pub fn new(bounds: Bounds) -> Result<Self, JsValue> {
        let layer = |id: &str| -> Result<CanvasRenderingContext2d, JsValue> {
            let canvas = canvas(id)?;
            canvas.set_width(bounds.width as u32);
            canvas.set_height(bounds.height as u32);
            context_2d(&canvas)
        };
        Ok(Self {
            back: layer("bounce-back")?,
            top: layer("bounce-top")?,
            score: layer("bounce-score")?,
            pause: layer("bounce-pause")?,
            bounds,
        })
    }

    fn layer(&self, layer: Layer) -> &CanvasRenderingContext2d {
        match layer {
            Layer::Back => &self.back,
            Layer::Top => &self.top,
            Layer::Bottom => &self.score,
            Layer::Pause => &self.pause,
        }
    }

    fn score_font(&self) -> String {
        format!("{}px monospace", (self.bounds.height / 3.0).floor())
    }
}

impl Renderer for CanvasRenderer {
    fn clear(&mut self) {
        let Bounds { width, height } = self.bounds;
        self.top.clear_rect(0.0, 0.0, width, height);
        self.score.clear_rect(0.0, 0.0, width, height);
    }

    fn draw_background(&mut self, bounds: Bounds) {
        self.back.set_fill_style_str(BACKGROUND);
        self.back.fill_rect(0.0, 0.0, bounds.width, bounds.height);
    }

    fn draw_circle(&mut self, circle: &Circle) {
        self.top.set_fill_style_str(CIRCLE);
        self.top.begin_path();
        let _ = self
            .top
            .arc(circle.center.x, circle.center.y, circle.radius, 0.0, TAU);
        self.top.fill();
    }

    fn draw_shapes(&mut self, obstacles: &[Obstacle]) {
        self.top.set_fill_style_str(SHAPES);
        for obstacle in obstacles {
            self.top.fill_rect(
                obstacle.left(),
                obstacle.top(),
                obstacle.width(),
                obstacle.height(),
            );
        }
    }

    fn clear_rect(&mut self, layer: Layer, rect: &Rect) {
        self.layer(layer)
            .clear_rect(rect.left(), rect.top(), rect.width, rect.height);
    }

    fn draw_score(&mut self, text: &str, anchor: DVec2) {
        self.score.set_font(&self.score_font());
        self.score.set_text_align("center");
        self.score.set_text_baseline("middle");
        self.score.set_fill_style_str(SCORE);
        let _ = self.score.fill_text(text, anchor.x, anchor.y);
    }

    fn text_width(&self, text: &str) -> f64 {
        self.score.set_font(&self.score_font());
        self.score
            .measure_text(text)
            .map(|m| m.width())
            .unwrap_or(0.0)
    }

    fn draw_pause_screen(&mut self) {
        let Bounds { width, height } = self.bounds;
        self.pause.set_fill_style_str(PAUSE_VEIL);
        self.pause.fill_rect(0.0, 0.0, width, height);
        self.pause.set_font(&self.score_font());
        self.pause.set_text_align("center");
        self.pause.set_text_baseline("middle");
        self.pause.set_fill_style_str(SCORE);
        let _ = self
            .pause
            .fill_text("paused", (width / 2.0).floor(), (height / 2.0).floor());
    }

    fn clear_pause_screen(&mut self) {
        let Bounds { width, height } = self.bounds;
        self.pause.clear_rect(0.0, 0.0, width, height);
    }
}

/// Game plus the pieces the event handlers share
pub struct Host {
    game: RefCell<WebGame>,
    pointer: Rc<RefCell<PointerInput>>,
    scheduled: Cell<bool>,
}

impl Host {
    pub fn new(game: WebGame, pointer: Rc<RefCell<PointerInput>>) -> Rc<Self> {
        Rc::new(Self {
            game: RefCell::new(game),
            pointer,
            scheduled: Cell::new(false),
        })
    }

    /// Request a frame unless one is already pending
    pub fn schedule(self: &Rc<Self>) {
        if self.scheduled.replace(true) {
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        let host = Rc::clone(self);
        let closure = Closure::once(move |now: f64| {
            host.scheduled.set(false);
            let more = host.game.borrow_mut().frame(now);
            if more {
                host.schedule();
            }
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Run `f` on the game and keep frames coming if it needs them
    fn with_game(self: &Rc<Self>, f: impl FnOnce(&mut WebGame)) {
        let needs_frame = {
            let mut game = self.game.borrow_mut();
            f(&mut *game);
            game.needs_frame()
        };
        if needs_frame {
            self.schedule();
        }
    }
}

fn pointer_pos(event: &MouseEvent) -> DVec2 {
    DVec2::new(event.offset_x() as f64, event.offset_y() as f64)
}

/// Hook pointer, keyboard and focus events up to the game
///
/// The score canvas is the input surface: presses there drag the circle.
pub fn attach_listeners(host: &Rc<Host>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let surface = canvas("bounce-score")?;

    // Press: start if waiting, then grab the circle
    {
        let host = Rc::clone(host);
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            if event.button() != 0 {
                return;
            }
            host.with_game(|game| {
                game.start();
                let circle = game.arena().circle;
                host.pointer.borrow_mut().press(pointer_pos(&event), &circle);
            });
        });
        surface.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let host = Rc::clone(host);
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            host.pointer.borrow_mut().pointer_moved(pointer_pos(&event));
        });
        surface.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let host = Rc::clone(host);
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            if event.button() == 0 {
                host.pointer.borrow_mut().release();
            }
        });
        window.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let host = Rc::clone(host);
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let circle = host.game.borrow().arena().circle;
            let button_down = event.buttons() & 1 != 0;
            host.pointer
                .borrow_mut()
                .pointer_entered(pointer_pos(&event), &circle, button_down);
        });
        surface.add_event_listener_with_callback("mouseenter", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let host = Rc::clone(host);
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let key = event.key();
            let mut chars = key.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                host.with_game(|game| {
                    game.handle_key(c);
                });
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let host = Rc::clone(host);
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            host.with_game(|game| {
                if game.focus_lost() {
                    log::info!("Auto-paused (window blur)");
                }
            });
        });
        window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let host = Rc::clone(host);
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            host.with_game(|game| {
                game.focus_gained();
            });
        });
        window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}
