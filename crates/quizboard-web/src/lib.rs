//! wasm-bindgen surface for the gameboard. The host page calls
//! [`gameboard_start`] with element ids, a socket URL and the game file
//! JSON; the crate then owns the animation-frame loop and the socket
//! until [`gameboard_kill`] or a dead session ends it.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, ErrorEvent, HtmlCanvasElement, HtmlElement, MessageEvent, WebSocket};

use quizboard_engine::GameData;

pub mod painter;
pub mod runner;

pub use painter::CanvasPainter;
pub use runner::BoardRunner;

thread_local! {
    static RUNNER: RefCell<Option<BoardRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut BoardRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Build the runner, connect the socket, and start the frame loop.
/// Replaces any session already running.
#[wasm_bindgen]
pub fn gameboard_start(
    canvas_id: &str,
    container_id: &str,
    ws_url: &str,
    game_id: &str,
    game_data_json: &str,
) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let window = window()?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str("canvas element not found"))?
        .dyn_into()?;
    let container: HtmlElement = document
        .get_element_by_id(container_id)
        .ok_or_else(|| JsValue::from_str("container element not found"))?
        .dyn_into()?;
    let data =
        GameData::from_json(game_data_json).map_err(|err| JsValue::from_str(&err.to_string()))?;

    let socket = WebSocket::new(ws_url)?;
    install_socket_handlers(&socket);

    let was_running = RUNNER.with(|cell| cell.borrow().is_some());
    if was_running {
        log::warn!("gameboard: replacing a running session");
        let _ = with_runner(|runner| runner.kill());
    }

    let mut runner = BoardRunner::new(canvas, container, socket, game_id.to_string(), data)?;
    runner.init(now_ms());
    RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
    log::info!("gameboard: started game {game_id}");

    // A replaced session's loop is still scheduled and will pick up the
    // new runner; only start a loop for a fresh session.
    if !was_running {
        schedule_frames()?;
    }
    Ok(())
}

/// Request shutdown. The loop observes the flag at the top of the next
/// frame, drops the runner, and stops rescheduling.
#[wasm_bindgen]
pub fn gameboard_kill() {
    if with_runner(|runner| runner.kill()).is_none() {
        log::debug!("gameboard: kill with no running session");
    }
}

fn install_socket_handlers(socket: &WebSocket) {
    let on_message = Closure::wrap(Box::new(move |event: MessageEvent| {
        let Some(text) = event.data().as_string() else {
            log::warn!("dropping non-text socket frame");
            return;
        };
        if with_runner(|runner| runner.on_message(&text)).is_none() {
            log::debug!("socket frame before session start, dropped");
        }
    }) as Box<dyn FnMut(MessageEvent)>);
    socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
    on_message.forget();

    let on_error = Closure::wrap(Box::new(move |event: ErrorEvent| {
        log::error!("socket error: {}", event.message());
    }) as Box<dyn FnMut(ErrorEvent)>);
    socket.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    on_error.forget();

    let on_close = Closure::wrap(Box::new(move |event: CloseEvent| {
        log::info!("socket closed: code {}", event.code());
    }) as Box<dyn FnMut(CloseEvent)>);
    socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));
    on_close.forget();
}

/// Self-rescheduling requestAnimationFrame loop. The closure holds an
/// `Rc` to itself and drops it when the session stops, which ends the
/// loop and frees the closure.
fn schedule_frames() -> Result<(), JsValue> {
    let slot = Rc::new(RefCell::new(None::<Closure<dyn FnMut(f64)>>));
    let inner = slot.clone();

    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        let stopped = with_runner(|runner| runner.is_stopped()).unwrap_or(true);
        if stopped {
            RUNNER.with(|cell| drop(cell.borrow_mut().take()));
            let _ = inner.borrow_mut().take();
            log::info!("gameboard: stopped");
            return;
        }

        let _ = with_runner(|runner| runner.frame(timestamp));

        if let Some(closure) = inner.borrow().as_ref() {
            if let Err(err) = request_animation_frame(closure) {
                log::error!("failed to schedule next frame: {err:?}");
            }
        }
    }) as Box<dyn FnMut(f64)>));

    let handle = slot.borrow();
    match handle.as_ref() {
        Some(closure) => {
            request_animation_frame(closure)?;
            Ok(())
        }
        None => Err(JsValue::from_str("frame closure missing")),
    }
}

fn request_animation_frame(closure: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
    window()?.request_animation_frame(closure.as_ref().unchecked_ref())
}
