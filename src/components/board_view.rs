use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};
use yew::prelude::*;

use super::{status_panel::StatusPanel, view_controls::ViewControls, win_banner::WinBanner};
use crate::canvas::CanvasSurface;
use crate::game::{Game, GameSummary, TapOutcome};
use crate::render::replay;
use crate::settings::Settings;
use crate::state::TouchState;
use crate::util::{clog, device_pixel_ratio};
use crate::viewport::PixelPoint;

#[derive(Properties, PartialEq, Clone)]
pub struct BoardViewProps {
    pub settings: Settings,
    pub on_open_settings: Callback<()>,
}

/// Client coordinates to physical canvas pixels.
fn canvas_point(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32, dpr: f64) -> PixelPoint {
    let rect = canvas.get_bounding_client_rect();
    PixelPoint::new(
        (client_x as f64 - rect.left()) * dpr,
        (client_y as f64 - rect.top()) * dpr,
    )
}

fn announce(outcome: &TapOutcome) {
    let Some(winner) = outcome.winner else {
        return;
    };
    clog(&format!(
        "player {} wins ({} new line(s) through {},{})",
        winner,
        outcome.new_lines.len(),
        outcome.cell.x,
        outcome.cell.y
    ));
    if let Some(win) = web_sys::window() {
        let _ = win.alert_with_message(&format!("player {} wins", winner));
    }
}

#[function_component(BoardView)]
pub fn board_view(props: &BoardViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let initial_settings = props.settings;
    let game = use_mut_ref(move || Game::new(&initial_settings));
    let summary = use_state(GameSummary::default);
    let touch_state = use_mut_ref(TouchState::default);

    // Settings changes apply to the live game; the next frame picks them up.
    {
        let game = game.clone();
        use_effect_with(props.settings, move |s| {
            game.borrow_mut().apply_settings(s);
            || ()
        });
    }

    {
        let canvas_ref = canvas_ref.clone();
        let game = game.clone();
        let summary = summary.clone();
        let touch_state = touch_state.clone();

        use_effect_with((), move |_| {
            let window = web_sys::window().expect("no global `window` exists");
            let canvas: HtmlCanvasElement = canvas_ref
                .cast::<HtmlCanvasElement>()
                .expect("canvas_ref not attached to a canvas element");

            // Backing store in physical pixels, CSS size untouched.
            let fit_canvas = {
                let canvas = canvas.clone();
                let game = game.clone();
                move || {
                    let dpr = device_pixel_ratio();
                    let w = (canvas.client_width().max(0) as f64 * dpr).round();
                    let h = (canvas.client_height().max(0) as f64 * dpr).round();
                    canvas.set_width(w as u32);
                    canvas.set_height(h as u32);
                    game.borrow_mut().resize(w, h);
                }
            };
            fit_canvas();

            let draw: Rc<dyn Fn()> = {
                let canvas = canvas.clone();
                let game = game.clone();
                Rc::new(move || {
                    let ops = game.borrow().frame(device_pixel_ratio());
                    if let Err(e) = CanvasSurface::attach(&canvas).and_then(|mut s| replay(&ops, &mut s)) {
                        clog(&format!("frame skipped: {e}"));
                    }
                })
            };

            let after_tap = {
                let game = game.clone();
                let summary = summary.clone();
                move |outcome: Option<TapOutcome>| {
                    let Some(outcome) = outcome else { return };
                    if !outcome.placement.is_accepted() {
                        return;
                    }
                    summary.set(game.borrow().summary());
                    announce(&outcome);
                }
            };

            // Redraw every animation frame.
            let raf_id = Rc::new(RefCell::new(None));
            let raf_cell: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
            {
                let raf_id_loop = raf_id.clone();
                let raf_cell_loop = raf_cell.clone();
                let draw = draw.clone();
                let window_loop = window.clone();
                *raf_cell.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                    draw();
                    if let Some(cb) = raf_cell_loop.borrow().as_ref() {
                        if let Ok(id) = window_loop.request_animation_frame(cb.as_ref().unchecked_ref()) {
                            *raf_id_loop.borrow_mut() = Some(id);
                        }
                    }
                }) as Box<dyn FnMut()>));
                if let Some(cb) = raf_cell.borrow().as_ref() {
                    if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        *raf_id.borrow_mut() = Some(id);
                    }
                }
            }

            // Mouse down (primary button only)
            let mousedown_cb = {
                let canvas = canvas.clone();
                let game = game.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    if e.button() != 0 {
                        return;
                    }
                    let dpr = device_pixel_ratio();
                    game.borrow_mut()
                        .pointer_down(canvas_point(&canvas, e.client_x(), e.client_y(), dpr));
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("mousedown", mousedown_cb.as_ref().unchecked_ref())
                .ok();

            // Mouse move
            let mousemove_cb = {
                let canvas = canvas.clone();
                let game = game.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    let dpr = device_pixel_ratio();
                    let at = canvas_point(&canvas, e.client_x(), e.client_y(), dpr);
                    let movement = PixelPoint::new(e.movement_x() as f64 * dpr, e.movement_y() as f64 * dpr);
                    game.borrow_mut().pointer_move(at, movement, dpr);
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("mousemove", mousemove_cb.as_ref().unchecked_ref())
                .ok();

            // Mouse up: on window so a drag released off the canvas still ends.
            let mouseup_cb = {
                let canvas = canvas.clone();
                let game = game.clone();
                let after_tap = after_tap.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    if e.button() != 0 {
                        return;
                    }
                    let dpr = device_pixel_ratio();
                    let at = canvas_point(&canvas, e.client_x(), e.client_y(), dpr);
                    let on_canvas = e
                        .target()
                        .and_then(|t| t.dyn_into::<HtmlCanvasElement>().ok())
                        .is_some_and(|t| t == canvas);
                    let outcome = {
                        let mut g = game.borrow_mut();
                        if on_canvas {
                            g.pointer_up(at, dpr)
                        } else {
                            g.pointer_cancel();
                            None
                        }
                    };
                    after_tap(outcome);
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("mouseup", mouseup_cb.as_ref().unchecked_ref())
                .ok();

            // Resize
            let resize_cb = {
                let fit_canvas = fit_canvas.clone();
                let draw = draw.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    fit_canvas();
                    draw();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .ok();

            // TOUCH EVENTS: one finger taps or pans, a second finger aborts the gesture.
            let touch_start_cb = {
                let canvas = canvas.clone();
                let game = game.clone();
                let touch_state = touch_state.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let touches = e.touches();
                    if touches.length() == 1 {
                        if let Some(t0) = touches.item(0) {
                            let at = canvas_point(&canvas, t0.client_x(), t0.client_y(), device_pixel_ratio());
                            touch_state.borrow_mut().start(at);
                            game.borrow_mut().pointer_down(at);
                        }
                    } else {
                        touch_state.borrow_mut().end();
                        game.borrow_mut().pointer_cancel();
                    }
                    e.prevent_default();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("touchstart", touch_start_cb.as_ref().unchecked_ref())
                .ok();

            let touch_move_cb = {
                let canvas = canvas.clone();
                let game = game.clone();
                let touch_state = touch_state.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let touches = e.touches();
                    if touches.length() == 1 {
                        if let Some(t0) = touches.item(0) {
                            let dpr = device_pixel_ratio();
                            let at = canvas_point(&canvas, t0.client_x(), t0.client_y(), dpr);
                            let delta = touch_state.borrow_mut().advance(at);
                            if let Some(movement) = delta {
                                game.borrow_mut().pointer_move(at, movement, dpr);
                            }
                        }
                    }
                    e.prevent_default();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("touchmove", touch_move_cb.as_ref().unchecked_ref())
                .ok();

            let touch_end_cb = {
                let game = game.clone();
                let touch_state = touch_state.clone();
                let after_tap = after_tap.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    if e.touches().length() == 0 {
                        let last = touch_state.borrow_mut().end();
                        if let Some(at) = last {
                            let outcome = game.borrow_mut().pointer_up(at, device_pixel_ratio());
                            after_tap(outcome);
                        }
                    }
                    e.prevent_default();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("touchend", touch_end_cb.as_ref().unchecked_ref())
                .ok();

            let touch_cancel_cb = {
                let game = game.clone();
                let touch_state = touch_state.clone();
                Closure::wrap(Box::new(move |_e: TouchEvent| {
                    touch_state.borrow_mut().end();
                    game.borrow_mut().pointer_cancel();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("touchcancel", touch_cancel_cb.as_ref().unchecked_ref())
                .ok();

            let window_clone = window.clone();
            move || {
                let _ = canvas.remove_event_listener_with_callback("mousedown", mousedown_cb.as_ref().unchecked_ref());
                let _ = window_clone.remove_event_listener_with_callback("mousemove", mousemove_cb.as_ref().unchecked_ref());
                let _ = window_clone.remove_event_listener_with_callback("mouseup", mouseup_cb.as_ref().unchecked_ref());
                let _ = window_clone.remove_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());
                let _ = canvas.remove_event_listener_with_callback("touchstart", touch_start_cb.as_ref().unchecked_ref());
                let _ = canvas.remove_event_listener_with_callback("touchmove", touch_move_cb.as_ref().unchecked_ref());
                let _ = canvas.remove_event_listener_with_callback("touchend", touch_end_cb.as_ref().unchecked_ref());
                let _ = canvas.remove_event_listener_with_callback("touchcancel", touch_cancel_cb.as_ref().unchecked_ref());
                if let Some(id) = *raf_id.borrow() {
                    let _ = window_clone.cancel_animation_frame(id);
                }
                // Break the frame closure's self-reference.
                raf_cell.borrow_mut().take();
            }
        });
    }

    let reset_view = {
        let game = game.clone();
        Callback::from(move |_| {
            game.borrow_mut().reset_view();
            clog("view reset to origin");
        })
    };
    let new_game = {
        let game = game.clone();
        let summary = summary.clone();
        Callback::from(move |_| {
            let mut g = game.borrow_mut();
            g.new_game();
            summary.set(g.summary());
            clog("new game");
        })
    };

    html! {
        <div style="position:relative; width:100vw; height:100vh; overflow:hidden; background:#ffffff;">
            <canvas ref={canvas_ref} style="display:block; width:100%; height:100%; cursor:pointer; touch-action:none;" />
            <StatusPanel summary={*summary} />
            <WinBanner winner={summary.last_winner} on_new_game={new_game.clone()} />
            <ViewControls
                on_reset_view={reset_view}
                on_new_game={new_game}
                on_open_settings={props.on_open_settings.clone()}
            />
        </div>
    }
}
