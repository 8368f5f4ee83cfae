//! Sling Puck entry point
//!
//! Handles platform-specific initialization and runs the frame loop. One
//! `request_animation_frame` callback drives both the simulation tick and the
//! redraw; pointer handlers only record gestures, the tick consumes them.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, PointerEvent};

    use glam::Vec2;
    use sling_puck::sim::{GameState, Snapshot, TargetKind, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        ctx: CanvasRenderingContext2d,
    }

    impl Game {
        /// Apply pending gestures, advance one tick, draw the snapshot
        fn frame(&mut self) {
            let input = std::mem::take(&mut self.input);
            tick(&mut self.state, &input);
            draw(&self.ctx, &Snapshot::capture(&self.state));
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Sling Puck starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let width = canvas.client_width().max(1) as u32;
        let height = canvas.client_height().max(1) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("context request failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(seed, width as f32, height as f32);
        log::info!("Game initialized with seed {seed}, canvas {width}x{height}");

        let game = Rc::new(RefCell::new(Game {
            state,
            input: TickInput::default(),
            ctx,
        }));

        setup_pointer_handlers(&canvas, game.clone());
        setup_resize_handler(&canvas, game.clone());
        request_animation_frame(game);

        log::info!("Sling Puck running!");
    }

    fn event_pos(event: &PointerEvent) -> Vec2 {
        Vec2::new(event.offset_x() as f32, event.offset_y() as f32)
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer down starts aiming
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                game.borrow_mut().input.press = Some(event_pos(&event));
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer move updates the live drag (ignored by the sim unless aiming)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                game.borrow_mut().input.move_to = Some(event_pos(&event));
            });
            let _ = canvas
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer up and pointer leave both commit the shot
        for event_name in ["pointerup", "pointerleave"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                game.borrow_mut().input.release = true;
            });
            let _ = canvas
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let width = canvas.client_width().max(1) as u32;
            let height = canvas.client_height().max(1) as u32;
            canvas.set_width(width);
            canvas.set_height(height);
            // Arena/holes regenerate; puck, score, and scroll stay put
            game.borrow_mut()
                .state
                .resize(width as f32, height as f32);
            log::info!("Canvas resized to {width}x{height}");
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game.borrow_mut().frame();
            request_animation_frame(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn draw(ctx: &CanvasRenderingContext2d, snap: &Snapshot) {
        let (w, h) = (snap.width as f64, snap.height as f64);

        // Table felt and cushions
        ctx.set_fill_style_str("#11301c");
        ctx.fill_rect(0.0, 0.0, w, h);
        ctx.set_fill_style_str("#5b3a1e");
        ctx.fill_rect(0.0, 0.0, snap.border_width as f64, h);
        ctx.fill_rect(w - snap.border_width as f64, 0.0, snap.border_width as f64, h);

        // Holes
        ctx.set_fill_style_str("#05090c");
        for hole in &snap.holes {
            ctx.begin_path();
            let _ = ctx.arc(hole.pos.x as f64, hole.pos.y as f64, hole.radius as f64, 0.0, TAU);
            ctx.fill();
        }

        // Targets, colored by point value
        for target in &snap.targets {
            ctx.set_fill_style_str(match target.kind {
                TargetKind::Low => "#c7d0d8",
                TargetKind::High => "#e8b544",
            });
            ctx.begin_path();
            let _ = ctx.arc(
                target.pos.x as f64,
                target.pos.y as f64,
                target.radius as f64,
                0.0,
                TAU,
            );
            ctx.fill();
        }

        // Puck, shrunk mid-sink
        ctx.set_fill_style_str("#d94f30");
        ctx.begin_path();
        let _ = ctx.arc(
            snap.puck.pos.x as f64,
            snap.puck.pos.y as f64,
            (snap.puck.radius * snap.puck.scale) as f64,
            0.0,
            TAU,
        );
        ctx.fill();

        // Drag preview arrow (visually capped, launch itself is not)
        if let Some(aim) = &snap.aim {
            ctx.set_stroke_style_str("#f5e9c8");
            ctx.set_line_width(3.0);
            ctx.begin_path();
            ctx.move_to(aim.from.x as f64, aim.from.y as f64);
            ctx.line_to(aim.to.x as f64, aim.to.y as f64);
            ctx.stroke();
        }

        // Score
        ctx.set_fill_style_str("#f5e9c8");
        ctx.set_font("20px sans-serif");
        let _ = ctx.fill_text(&format!("Score: {}", snap.score), 36.0, 28.0);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use sling_puck::sim::{GameState, Phase, TickInput, tick};

    env_logger::init();
    log::info!("Sling Puck (native) starting...");

    // Headless demo shot: aim, launch, run until everything settles.
    let mut state = GameState::new(0xC0FFEE, 1000.0, 800.0);
    let anchor = Vec2::new(500.0, 620.0);
    let current = Vec2::new(470.0, 760.0);
    tick(&mut state, &TickInput { press: Some(anchor), ..Default::default() });
    tick(&mut state, &TickInput { move_to: Some(current), ..Default::default() });
    tick(&mut state, &TickInput { release: true, ..Default::default() });

    let quiet = TickInput::default();
    for _ in 0..10_000 {
        tick(&mut state, &quiet);
        if matches!(state.phase, Phase::Settled | Phase::Idle) {
            break;
        }
    }

    log::info!(
        "demo shot done: phase {:?}, score {}, offset {:.1}, {} ticks",
        state.phase,
        state.score,
        state.viewport_offset,
        state.time_ticks
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
