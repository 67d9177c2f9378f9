//! Browser binding
//!
//! A page script owns the `requestAnimationFrame` loop and the DOM. It feeds
//! raw key/pointer events and frame timestamps into `WebRound`, then reads
//! positions back for rendering.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::assets::{Level, SpriteIndex, Spriteset, Tileset};
use crate::platform::input::{DragInput, KeyboardInput};
use crate::settings::Settings;
use crate::sim::{InputSignal, Round, RoundResult};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Worm Gate module loaded");
}

#[wasm_bindgen]
pub struct WebRound {
    round: Round,
    settings: Settings,
    keys: KeyboardInput,
    drag: DragInput,
}

#[wasm_bindgen]
impl WebRound {
    /// `spritesets_json` holds the contents of every spriteset file the
    /// tileset lists; each sprite the tileset references must resolve.
    #[wasm_bindgen(constructor)]
    pub fn new(
        level_json: &str,
        tileset_json: &str,
        spritesets_json: Vec<String>,
        seed: u64,
    ) -> Result<WebRound, JsError> {
        let settings = Settings::load();
        let level = Level::from_json(level_json)?;
        let tileset = Tileset::from_json(tileset_json)?;
        let spritesets = spritesets_json
            .iter()
            .map(|json| Spriteset::from_json(json))
            .collect::<Result<Vec<_>, _>>()?;
        tileset.check_sprites(&SpriteIndex::new(&spritesets))?;

        let round = Round::new(&level, &tileset, settings.tuning.clone(), seed)?;
        Ok(Self {
            round,
            keys: KeyboardInput::new(settings.controls.wasd),
            drag: DragInput::new(settings.controls.drag_threshold),
            settings,
        })
    }

    /// Change control preferences and persist them
    pub fn set_controls(&mut self, wasd: bool, drag_threshold: f32) {
        self.settings.controls.wasd = wasd;
        self.settings.controls.drag_threshold = drag_threshold;
        self.keys = KeyboardInput::new(wasd);
        self.drag = DragInput::new(drag_threshold);
        self.settings.save();
    }

    pub fn begin(&mut self) -> Result<(), JsError> {
        Ok(self.round.begin()?)
    }

    /// Advance to `now_ms` (a rAF timestamp); defaults to `Date.now()`.
    /// Returns "running", "won" or "lost".
    pub fn tick(&mut self, now_ms: Option<f64>) -> Result<String, JsError> {
        let now_ms = now_ms.unwrap_or_else(js_sys::Date::now);
        let status = match self.round.tick(now_ms)?.result() {
            None => "running",
            Some(RoundResult::Won) => "won",
            Some(RoundResult::Lost) => "lost",
        };
        Ok(status.to_string())
    }

    pub fn key_down(&mut self, key: &str, repeat: bool) -> Result<(), JsError> {
        let signal = self.keys.key_down(key, repeat);
        self.apply(signal)
    }

    pub fn key_up(&mut self, key: &str) -> Result<(), JsError> {
        let signal = self.keys.key_up(key);
        self.apply(signal)
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.drag.pointer_down(Vec2::new(x, y));
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> Result<(), JsError> {
        for signal in self.drag.pointer_move(Vec2::new(x, y)) {
            self.round.apply(signal)?;
        }
        Ok(())
    }

    pub fn pointer_up(&mut self) -> Result<(), JsError> {
        let signal = self.drag.pointer_up();
        self.apply(signal)
    }

    /// `[x, y]` of the head
    pub fn head(&self) -> Result<Vec<f32>, JsError> {
        let head = self.round.worm()?.head()?;
        Ok(vec![head.x, head.y])
    }

    /// Body segments flattened as `[x0, y0, x1, y1, ...]`
    pub fn segments(&self) -> Result<Vec<f32>, JsError> {
        Ok(self
            .round
            .worm()?
            .segments()?
            .iter()
            .flat_map(|s| [s.x, s.y])
            .collect())
    }

    /// `[x, y, size]` of the current target, empty when there is none
    pub fn target(&self) -> Result<Vec<f32>, JsError> {
        match self.round.target()? {
            Some(target) => {
                let pos = target.pos()?;
                Ok(vec![pos.x, pos.y, target.size()?.x])
            }
            None => Ok(Vec::new()),
        }
    }

    pub fn targets_left(&self) -> Result<u32, JsError> {
        Ok(self.round.targets_left()?)
    }

    pub fn is_start_open(&self) -> Result<bool, JsError> {
        Ok(self.round.grid()?.is_start_open())
    }

    pub fn are_exits_open(&self) -> Result<bool, JsError> {
        Ok(self.round.grid()?.are_exits_open())
    }

    pub fn dispose(&mut self) -> Result<(), JsError> {
        Ok(self.round.dispose()?)
    }
}

impl WebRound {
    fn apply(&mut self, signal: Option<InputSignal>) -> Result<(), JsError> {
        if let Some(signal) = signal {
            self.round.apply(signal)?;
        }
        Ok(())
    }
}
