//! Browser binding
//!
//! The page owns the render loop and keyboard. Each animation frame it sets
//! the held keys, calls [`WebRun::tick`] with the frame time and gets back the
//! frame's events as JSON.

use wasm_bindgen::prelude::*;

use crate::sim::{RunController, RunPhase, TickInput};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    log::info!("Lane Runner starting...");
}

#[wasm_bindgen]
pub struct WebRun {
    controller: RunController,
    input: TickInput,
}

#[wasm_bindgen]
impl WebRun {
    /// Build a run; `tuning_json` overrides the default balance
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64, tuning_json: Option<String>) -> Result<WebRun, JsError> {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json)?,
            None => Tuning::default(),
        };
        Ok(Self {
            controller: RunController::new(tuning, seed)?,
            input: TickInput::default(),
        })
    }

    pub fn start(&mut self) {
        self.controller.start();
    }

    pub fn restart(&mut self) {
        self.controller.restart();
    }

    #[wasm_bindgen(js_name = backToMenu)]
    pub fn back_to_menu(&mut self) {
        self.input = TickInput::default();
        self.controller.back_to_menu();
    }

    /// Held-key state, kept until changed
    #[wasm_bindgen(js_name = setKeys)]
    pub fn set_keys(&mut self, left: bool, right: bool, jump: bool) {
        self.input = TickInput {
            move_left: left,
            move_right: right,
            jump,
        };
    }

    /// Advance by `dt` seconds; returns the frame's events as a JSON array
    pub fn tick(&mut self, dt: f32) -> Result<String, JsError> {
        self.controller.tick(&self.input, dt);
        Ok(serde_json::to_string(&self.controller.drain_events())?)
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.controller.phase() == RunPhase::Running
    }

    pub fn distance(&self) -> f32 {
        self.controller.session().progress.traveled()
    }

    pub fn tier(&self) -> u8 {
        self.controller.tier().level()
    }

    #[wasm_bindgen(js_name = finalScore)]
    pub fn final_score(&self) -> Option<u32> {
        self.controller.session().final_score()
    }

    /// Player anchor as `[x, y, z]`
    #[wasm_bindgen(js_name = playerPosition)]
    pub fn player_position(&self) -> Vec<f32> {
        self.controller.session().player.position().to_array().to_vec()
    }
}
