//! Browser bindings for the simulation controller.
//!
//! Structured results cross the boundary as JSON strings; triangle soups cross
//! as flat `Float64Array`s of `x, y` pairs.

use crate::drive::{CycloidalConfig, DriveConfig, HarmonicConfig, Part, PlanetaryConfig, TopologyKind};
use crate::float_types::Real;
use crate::i18n::{self, Language, MemoryStore, PreferenceStore};
use crate::sim::{SimulationController, SimulationSettings, TorqueUnit};
use wasm_bindgen::prelude::*;

fn to_js<E: std::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct SimulationJs {
    inner: SimulationController,
    preferences: MemoryStore,
}

#[wasm_bindgen]
impl SimulationJs {
    /// `settings` is a JSON object; an empty string uses the defaults.
    ///
    /// `stored_language` is the host's saved `gearSimLang` value, empty when
    /// nothing was saved. Read [`languageCode`](Self::language_code) back after
    /// `setLanguage` to persist the choice.
    #[wasm_bindgen(constructor)]
    pub fn new(settings: &str, stored_language: &str) -> Result<SimulationJs, JsValue> {
        let settings = if settings.trim().is_empty() {
            SimulationSettings::default()
        } else {
            SimulationSettings::from_json_str(settings).map_err(to_js)?
        };
        let mut preferences = MemoryStore::default();
        if !stored_language.trim().is_empty() {
            preferences
                .set(i18n::LANGUAGE_KEY, stored_language)
                .map_err(to_js)?;
        }
        let inner = SimulationController::with_preferences(settings, &preferences).map_err(to_js)?;
        Ok(Self { inner, preferences })
    }

    #[wasm_bindgen(js_name = switchTopology)]
    pub fn switch_topology(&mut self, kind: &str) -> Result<(), JsValue> {
        let kind: TopologyKind = kind.parse().map_err(to_js)?;
        self.inner.switch_topology(kind).map_err(to_js)
    }

    #[wasm_bindgen(js_name = applyPlanetary)]
    pub fn apply_planetary(&mut self, sun_teeth: u32, ring_teeth: u32) -> Result<(), JsValue> {
        self.apply(PlanetaryConfig::new(sun_teeth, ring_teeth).into())
    }

    #[wasm_bindgen(js_name = applyHarmonic)]
    pub fn apply_harmonic(&mut self, flex_teeth: u32, circular_teeth: u32) -> Result<(), JsValue> {
        self.apply(HarmonicConfig::new(flex_teeth, circular_teeth).into())
    }

    #[wasm_bindgen(js_name = applyCycloidal)]
    pub fn apply_cycloidal(&mut self, lobes: u32, pins: u32) -> Result<(), JsValue> {
        self.apply(CycloidalConfig::new(lobes, pins).into())
    }

    pub fn tick(&mut self) {
        self.inner.tick();
    }

    #[wasm_bindgen(js_name = tickWith)]
    pub fn tick_with(&mut self, dt: f64) {
        self.inner.tick_with(dt as Real);
    }

    #[wasm_bindgen(js_name = setSpeed)]
    pub fn set_speed(&mut self, text: &str) {
        self.inner.set_input_speed_text(text);
    }

    #[wasm_bindgen(js_name = setTorque)]
    pub fn set_torque(&mut self, text: &str) {
        self.inner.set_input_torque_text(text);
    }

    #[wasm_bindgen(js_name = setUnit)]
    pub fn set_unit(&mut self, unit: &str) -> Result<(), JsValue> {
        let unit: TorqueUnit = unit.parse().map_err(to_js)?;
        self.inner.set_unit(unit);
        Ok(())
    }

    #[wasm_bindgen(js_name = setLanguage)]
    pub fn set_language(&mut self, code: &str) -> Result<(), JsValue> {
        let language: Language = code.parse().map_err(to_js)?;
        self.inner
            .set_language(language, &mut self.preferences)
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = languageCode)]
    pub fn language_code(&self) -> String {
        self.inner.language().code().to_owned()
    }

    pub fn label(&self, key: &str) -> String {
        self.inner.label(key).to_owned()
    }

    #[wasm_bindgen(js_name = ratioSummary)]
    pub fn ratio_summary(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.inner.ratio_summary()).map_err(to_js)
    }

    #[wasm_bindgen(js_name = portsJson)]
    pub fn ports_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.inner.port_values()).map_err(to_js)
    }

    #[wasm_bindgen(js_name = posesJson)]
    pub fn poses_json(&self) -> Result<String, JsValue> {
        let poses: Vec<(String, _)> = self
            .inner
            .poses()
            .into_iter()
            .map(|(part, pose)| (part.to_string(), pose))
            .collect();
        serde_json::to_string(&poses).map_err(to_js)
    }

    /// Names of the active parts, in drawing order, as a JSON array.
    #[wasm_bindgen(js_name = partsJson)]
    pub fn parts_json(&self) -> Result<String, JsValue> {
        let parts: Vec<String> = self.inner.profiles().keys().map(Part::to_string).collect();
        serde_json::to_string(&parts).map_err(to_js)
    }

    /// Part-local triangles of `part` as `[ax, ay, bx, by, cx, cy, ...]`.
    pub fn triangles(&self, part: &str) -> Vec<f64> {
        self.inner
            .profiles()
            .iter()
            .find(|(p, _)| p.to_string() == part)
            .map(|(_, profile)| {
                profile
                    .triangulate()
                    .iter()
                    .flatten()
                    .flat_map(|p| [p.x as f64, p.y as f64])
                    .collect()
            })
            .unwrap_or_default()
    }

    #[cfg(feature = "svg-io")]
    #[wasm_bindgen(js_name = toSVG)]
    pub fn to_svg(&self) -> String {
        use crate::io::ToSVG;
        self.inner.to_svg()
    }
}

impl SimulationJs {
    /// Rejections come back as the localized alert text.
    fn apply(&mut self, config: DriveConfig) -> Result<(), JsValue> {
        self.inner
            .apply_config(config)
            .map_err(|err| JsValue::from_str(self.inner.error_message(&err)))
    }
}
