//! WebAssembly game core for Cyber Grid.
//!
//! A 4x4 grid flashes a sequence, the player repeats it, and the sequence
//! grows over five stages under a per-stage countdown and a small pool of
//! lives. The host page owns rendering and real time: it forwards clicks,
//! calls `advance(ms)` from its frame loop, and redraws from the view
//! models after each call.

pub mod config;
pub mod error;
pub mod game;
pub mod notify;
pub mod rng;
pub mod scheduler;
pub mod sequence;
pub mod types;
pub mod view;

pub use config::GameConfig;
pub use error::{ConfigError, GameError};
pub use game::GameController;
pub use notify::{Notice, NoticeQueue, Notifier};
pub use types::{ClickOutcome, GameSession, GameStatus, LifeLoss};

// ─── WASM Exports (only compiled for wasm32 target) ─────────────────────────

#[cfg(target_arch = "wasm32")]
mod wasm_exports {
    use wasm_bindgen::prelude::*;

    use crate::config::GameConfig;
    use crate::game::GameController;
    use crate::notify::NoticeQueue;

    #[wasm_bindgen(start)]
    pub fn wasm_start() {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();
    }

    /// `undefined`/`null` selects the defaults.
    fn parse_config(config: JsValue) -> Result<GameConfig, JsValue> {
        if config.is_undefined() || config.is_null() {
            return Ok(GameConfig::default());
        }
        serde_wasm_bindgen::from_value(config).map_err(JsValue::from)
    }

    fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
    }

    fn err_to_js(err: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&err.to_string())
    }

    /// One game instance. Drop it (`free()`) on unmount; pending timers go with it.
    #[wasm_bindgen]
    pub struct CyberGrid {
        inner: GameController<NoticeQueue>,
    }

    #[wasm_bindgen]
    impl CyberGrid {
        #[wasm_bindgen(constructor)]
        pub fn new(config: JsValue) -> Result<CyberGrid, JsValue> {
            let config = parse_config(config)?;
            let inner = GameController::new(config, NoticeQueue::new()).map_err(err_to_js)?;
            Ok(CyberGrid { inner })
        }

        /// Deterministic sequences, for replays and end-to-end tests.
        #[wasm_bindgen(js_name = "withSeed")]
        pub fn with_seed(seed: u32, config: JsValue) -> Result<CyberGrid, JsValue> {
            let config = parse_config(config)?;
            let inner = GameController::with_seed(config, seed as u64, NoticeQueue::new())
                .map_err(err_to_js)?;
            Ok(CyberGrid { inner })
        }

        pub fn start(&mut self) {
            self.inner.start_game();
        }

        pub fn reset(&mut self) {
            self.inner.reset_game();
        }

        /// Returns the outcome, e.g. `{ kind: "mistake", livesLeft: 2 }`.
        pub fn click(&mut self, cell: u32) -> Result<JsValue, JsValue> {
            let outcome = self
                .inner
                .handle_button_click(cell as usize)
                .map_err(err_to_js)?;
            to_js(&outcome)
        }

        /// Feed elapsed milliseconds; returns how many timer events fired.
        pub fn advance(&mut self, ms: f64) -> u32 {
            let ms = if ms.is_finite() && ms > 0.0 { ms as u64 } else { 0 };
            self.inner.advance(ms) as u32
        }

        pub fn state(&self) -> Result<JsValue, JsValue> {
            to_js(self.inner.session())
        }

        #[wasm_bindgen(js_name = "gridView")]
        pub fn grid_view(&self) -> Result<JsValue, JsValue> {
            to_js(&self.inner.grid_view())
        }

        #[wasm_bindgen(js_name = "progressView")]
        pub fn progress_view(&self) -> Result<JsValue, JsValue> {
            to_js(&self.inner.progress_view())
        }

        pub fn hud(&self) -> Result<JsValue, JsValue> {
            to_js(&self.inner.hud_view())
        }

        /// `{ action, label }` for the control button, label `null` while playing.
        pub fn action(&self) -> Result<JsValue, JsValue> {
            let action = self.inner.available_action();
            let obj = js_sys::Object::new();
            js_sys::Reflect::set(&obj, &"action".into(), &to_js(&action)?)?;
            let label = action.label().map(JsValue::from_str).unwrap_or(JsValue::NULL);
            js_sys::Reflect::set(&obj, &"label".into(), &label)?;
            Ok(obj.into())
        }

        /// Toast messages queued since the last call, oldest first.
        #[wasm_bindgen(js_name = "takeNotices")]
        pub fn take_notices(&mut self) -> js_sys::Array {
            self.inner
                .notifier_mut()
                .drain()
                .iter()
                .map(|notice| JsValue::from_str(&notice.to_string()))
                .collect()
        }
    }

    /// Ping function to verify WASM is loaded.
    #[wasm_bindgen(js_name = "ping")]
    pub fn wasm_ping() -> String {
        "Cyber Grid core ready".to_string()
    }
}
