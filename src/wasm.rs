use std::sync::Mutex;

use once_cell::sync::Lazy;
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;
use web_time::Instant;

use crate::ai::{HeuristicSelector, SessionRng, pick_column};
use crate::config::{GameConfig, SessionConfig};
use crate::game::derive_state;
use crate::persistence::{MemoryStore, PersistedState};
use crate::replay::validate;
use crate::session::{GameSession, SessionEvent};
use crate::types::SessionView;

static SESSION: Lazy<Mutex<Option<GameSession>>> = Lazy::new(|| Mutex::new(None));

#[derive(Serialize)]
struct TickResult {
    events: Vec<SessionEvent>,
    state: SessionView,
    /// Milliseconds until `tick` should be called again, absent when idle.
    next_tick_ms: Option<u64>,
}

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Starts (or replaces) the browser session.
///
/// `config` may be `undefined` for the 6x7 default, `persisted` is the raw
/// `localStorage` blob and `seed` drives the AI's random fallback.
#[wasm_bindgen]
pub fn init_game(
    config: JsValue,
    persisted: Option<String>,
    seed: f64,
) -> Result<JsValue, JsValue> {
    let config = parse_config(config)?;
    let store = match persisted {
        Some(raw) => MemoryStore::with_raw(raw),
        None => MemoryStore::new(),
    };
    let selector = HeuristicSelector::new(SessionRng::new(seed as u64));
    let session = GameSession::new(config, Box::new(store), Box::new(selector), Instant::now())
        .map_err(to_js_error)?;

    let view = session.view();
    *SESSION.lock().map_err(to_js_error)? = Some(session);
    to_js(&view)
}

#[wasm_bindgen]
pub fn get_state() -> Result<JsValue, JsValue> {
    with_session(|session| to_js(&session.view()))
}

#[wasm_bindgen]
pub fn drop_disc(column: u32) -> Result<JsValue, JsValue> {
    with_session(|session| {
        session
            .drop_disc(column as usize, Instant::now())
            .map_err(to_js_error)?;
        to_js(&session.view())
    })
}

#[wasm_bindgen]
pub fn undo() -> Result<JsValue, JsValue> {
    with_session(|session| {
        session.undo(Instant::now()).map_err(to_js_error)?;
        to_js(&session.view())
    })
}

#[wasm_bindgen]
pub fn restart() -> Result<JsValue, JsValue> {
    with_session(|session| {
        session.restart(Instant::now());
        to_js(&session.view())
    })
}

#[wasm_bindgen]
pub fn toggle_one_player() -> Result<JsValue, JsValue> {
    with_session(|session| {
        session.toggle_one_player(Instant::now());
        to_js(&session.view())
    })
}

#[wasm_bindgen]
pub fn close_draw_modal() -> Result<JsValue, JsValue> {
    with_session(|session| {
        session.close_draw_modal();
        to_js(&session.view())
    })
}

/// Fires due timers. The page calls this again after `next_tick_ms`.
#[wasm_bindgen]
pub fn tick() -> Result<JsValue, JsValue> {
    with_session(|session| {
        let now = Instant::now();
        let events = session.tick(now);
        let result = TickResult {
            events,
            state: session.view(),
            next_tick_ms: session
                .next_deadline(now)
                .map(|left| left.as_millis() as u64),
        };
        to_js(&result)
    })
}

/// The `{moves, onePlayer}` JSON the page writes to `localStorage`.
#[wasm_bindgen]
pub fn export_persisted() -> Result<String, JsValue> {
    with_session(|session| session.persisted().to_json().map_err(to_js_error))
}

/// Normalizes a raw saved blob, degrading bad input to an empty game.
#[wasm_bindgen]
pub fn sanitize_persisted(raw: Option<String>) -> Result<String, JsValue> {
    PersistedState::parse(raw.as_deref())
        .to_json()
        .map_err(to_js_error)
}

#[wasm_bindgen]
pub fn derive_moves(moves: Vec<u32>, config: JsValue) -> Result<JsValue, JsValue> {
    let config = parse_game_config(config)?;
    to_js(&derive_state(&config, &to_columns(&moves)).to_game_state())
}

#[wasm_bindgen]
pub fn validate_moves(moves: Vec<u32>, config: JsValue) -> Result<JsValue, JsValue> {
    let config = parse_game_config(config)?;
    to_js(&validate(&config, &to_columns(&moves)))
}

/// AI choice for the side to move after `moves`, `undefined` on a full board.
#[wasm_bindgen]
pub fn pick_ai_column(
    moves: Vec<u32>,
    seed: f64,
    config: JsValue,
) -> Result<Option<u32>, JsValue> {
    let config = parse_game_config(config)?;
    let state = derive_state(&config, &to_columns(&moves));
    let mut rng = SessionRng::new(seed as u64);
    Ok(pick_column(&state.board, state.current_player, &mut rng).map(|column| column as u32))
}

fn with_session<T>(
    f: impl FnOnce(&mut GameSession) -> Result<T, JsValue>,
) -> Result<T, JsValue> {
    let mut guard = SESSION.lock().map_err(to_js_error)?;
    let session = guard
        .as_mut()
        .ok_or_else(|| JsValue::from_str("game is not initialized"))?;
    f(session)
}

fn parse_config(value: JsValue) -> Result<SessionConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(SessionConfig::default());
    }
    let config: SessionConfig = serde_wasm_bindgen::from_value(value)?;
    config.validate().map_err(to_js_error)?;
    Ok(config)
}

fn parse_game_config(value: JsValue) -> Result<GameConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(GameConfig::default());
    }
    let config: GameConfig = serde_wasm_bindgen::from_value(value)?;
    config.validate().map_err(to_js_error)?;
    Ok(config)
}

fn to_columns(moves: &[u32]) -> Vec<usize> {
    moves.iter().map(|&column| column as usize).collect()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    Ok(value.serialize(&Serializer::json_compatible())?)
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
