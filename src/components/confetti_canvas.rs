use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use crate::error::GameError;
use crate::state::Confetti;
use crate::util::{self, now_ms, rand_unit};

#[derive(Properties, PartialEq, Clone)]
pub struct ConfettiCanvasProps {
    pub round_id: u32,
    /// True from the win until the round ends.
    pub celebrating: bool,
}

/// Full-window overlay canvas, only ever drawn on during a win celebration.
#[function_component(ConfettiCanvas)]
pub fn confetti_canvas(props: &ConfettiCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    // Keep the canvas sized to the window
    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with((), move |_| {
            let resize_cb = {
                let canvas_ref = canvas_ref.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    size_to_window(&canvas_ref);
                }) as Box<dyn FnMut(web_sys::Event)>)
            };
            size_to_window(&canvas_ref);
            let window = web_sys::window();
            if let Some(win) = &window {
                let _ = win.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());
            }
            move || {
                if let Some(win) = &window {
                    let _ = win.remove_event_listener_with_callback(
                        "resize",
                        resize_cb.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    // One burst per win; torn down when the round ends or resets
    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with((props.round_id, props.celebrating), move |&(round_id, celebrating)| {
            let burst = if celebrating {
                match canvas_ref
                    .cast::<HtmlCanvasElement>()
                    .ok_or(GameError::NoCanvasContext)
                    .and_then(BurstLoop::start)
                {
                    Ok(b) => {
                        log::debug!("confetti started for round {}", round_id);
                        Some(b)
                    }
                    Err(e) => {
                        log::warn!("confetti disabled: {}", e);
                        None
                    }
                }
            } else {
                None
            };
            move || {
                if let Some(b) = burst {
                    b.stop();
                }
            }
        });
    }

    html! {
        <canvas id="confetti" ref={canvas_ref} style="position:fixed; inset:0; pointer-events:none; z-index:40;" />
    }
}

fn size_to_window(canvas_ref: &NodeRef) {
    let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else { return };
    let Some(window) = web_sys::window() else { return };
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
    canvas.set_width(width.max(0.0) as u32);
    canvas.set_height(height.max(0.0) as u32);
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, GameError> {
    canvas
        .get_context("2d")?
        .ok_or(GameError::NoCanvasContext)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| GameError::NoCanvasContext)
}

fn draw(ctx: &CanvasRenderingContext2d, confetti: &Confetti, w: f64, h: f64) {
    ctx.clear_rect(0.0, 0.0, w, h);
    for p in &confetti.particles {
        ctx.save();
        ctx.translate(p.x, p.y).ok();
        ctx.rotate(p.rot).ok();
        ctx.set_fill_style_str(p.color);
        ctx.fill_rect(-p.size / 2.0, -p.size / 2.0, p.size, p.size);
        ctx.restore();
    }
}

/// A running requestAnimationFrame loop for one burst.
struct BurstLoop {
    window: web_sys::Window,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    raf_id: Rc<Cell<Option<i32>>>,
    frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl BurstLoop {
    fn start(canvas: HtmlCanvasElement) -> Result<Self, GameError> {
        let window = util::window()?;
        let ctx = context_2d(&canvas)?;
        let mut confetti = Confetti::burst(canvas.width() as f64, now_ms(), rand_unit);
        let raf_id = Rc::new(Cell::new(None));
        let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        {
            let raf_id = raf_id.clone();
            let frame_next = frame.clone();
            let window = window.clone();
            let canvas = canvas.clone();
            let ctx = ctx.clone();
            *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                let w = canvas.width() as f64;
                let h = canvas.height() as f64;
                confetti.step(h);
                draw(&ctx, &confetti, w, h);
                if confetti.is_finished(now_ms()) {
                    confetti.clear();
                    ctx.clear_rect(0.0, 0.0, w, h);
                    raf_id.set(None);
                    log::debug!("confetti finished");
                    return;
                }
                if let Some(cb) = frame_next.borrow().as_ref() {
                    if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        raf_id.set(Some(id));
                    }
                }
            }) as Box<dyn FnMut()>));
        }
        let first = match frame.borrow().as_ref() {
            Some(cb) => Some(window.request_animation_frame(cb.as_ref().unchecked_ref())?),
            None => None,
        };
        raf_id.set(first);
        Ok(Self { window, canvas, ctx, raf_id, frame })
    }

    fn stop(self) {
        if let Some(id) = self.raf_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        // breaks the closure <-> cell cycle
        self.frame.borrow_mut().take();
        self.ctx
            .clear_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);
    }
}
