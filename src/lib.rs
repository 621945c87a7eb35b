mod engine;
mod game;

pub use crate::engine::surface::{Color, Surface};
pub use crate::game::config::{ConfigError, GameConfig};
pub use crate::game::{FrameInput, Game, Phase};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlCanvasElement, KeyboardEvent, Request, RequestInit, RequestMode, Response, Window};
use std::cell::RefCell;
use std::rc::Rc;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use crate::engine::input::InputState;
use crate::engine::logger;
use crate::engine::renderer::CanvasRenderer;

const CONFIG_URL: &str = "/assets/config.json";

#[wasm_bindgen]
pub async fn init_game() -> Result<(), JsValue> {
    logger::init(log::Level::Info);

    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;
    let canvas = document.get_element_by_id("canvas")
        .ok_or("No canvas")?
        .dyn_into::<HtmlCanvasElement>()?;

    let config = load_config(&window).await;
    let mut renderer = CanvasRenderer::new(&canvas, config.viewport.width, config.viewport.height)?;
    let mut game = Game::new(config, SmallRng::from_entropy())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    log::info!("circuit ready: {} segments", game.circuit.len());

    let input = Rc::new(RefCell::new(InputState::default()));

    // Keyboard: arrows steer, Enter pauses / resumes / restarts
    let keys = input.clone();
    let keydown = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        if keys.borrow_mut().handle_keydown(&event.key(), event.repeat()) {
            event.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);
    window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
    keydown.forget();

    let keys = input.clone();
    let keyup = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        keys.borrow_mut().handle_keyup(&event.key());
    }) as Box<dyn FnMut(_)>);
    window.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())?;
    keyup.forget();

    // Clicks and taps act like Enter
    let pointer = input.clone();
    let pointerdown = Closure::wrap(Box::new(move || {
        pointer.borrow_mut().press_action();
    }) as Box<dyn FnMut()>);
    canvas.add_event_listener_with_callback("pointerdown", pointerdown.as_ref().unchecked_ref())?;
    pointerdown.forget();

    // Game loop
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        let frame = input.borrow_mut().sample(now);
        renderer.clear(Color::BLACK);
        game.frame(frame, &mut renderer);

        if let Some(callback) = f.borrow().as_ref() {
            request_animation_frame(callback);
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(callback) = g.borrow().as_ref() {
        request_animation_frame(callback);
    }

    Ok(())
}

fn request_animation_frame(f: &Closure<dyn FnMut(f64)>) {
    let scheduled = web_sys::window()
        .map(|w| w.request_animation_frame(f.as_ref().unchecked_ref()));
    if !matches!(scheduled, Some(Ok(_))) {
        log::error!("could not schedule the next frame");
    }
}

/// Fetches the optional JSON config. Any failure falls back to the defaults.
async fn load_config(window: &Window) -> GameConfig {
    match fetch_config(window).await {
        Ok(Some(config)) => match config.validate() {
            Ok(()) => {
                log::info!("loaded config from {}", CONFIG_URL);
                config
            }
            Err(e) => {
                log::warn!("ignoring {}: {}", CONFIG_URL, e);
                GameConfig::default()
            }
        },
        Ok(None) => {
            log::info!("no config at {}, using defaults", CONFIG_URL);
            GameConfig::default()
        }
        Err(e) => {
            log::warn!("failed to load {}: {:?}", CONFIG_URL, e);
            GameConfig::default()
        }
    }
}

async fn fetch_config(window: &Window) -> Result<Option<GameConfig>, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(CONFIG_URL, &opts)?;
    let resp: Response = JsFuture::from(window.fetch_with_request(&request)).await?.dyn_into()?;
    if !resp.ok() {
        return Ok(None);
    }

    let json = JsFuture::from(resp.json()?).await?;
    let config = serde_wasm_bindgen::from_value(json)?;
    Ok(Some(config))
}
