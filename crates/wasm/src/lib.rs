//! Browser entry point for the gl-quad bootstrap.
//!
//! On load, finds `<canvas id="canvas">`, acquires a WebGL2 context, and
//! draws the quad once. `renderCanvas(id, configJson)` repeats that for any
//! canvas with an optional JSON scene config. Diagnostics go to the browser
//! console through [`console::ConsoleLogger`].

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod console;
pub mod error;

pub use error::WebError;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use gl_quad_core::SceneConfig;
use log::LevelFilter;
use wasm_bindgen::prelude::*;

/// Id of the canvas drawn on module start.
pub const DEFAULT_CANVAS_ID: &str = "canvas";

/// Parses an optional JSON scene config; `None` means the stock scene.
pub fn scene_config(config_json: Option<&str>) -> Result<SceneConfig, WebError> {
    match config_json {
        Some(json) => Ok(SceneConfig::from_json(json)?),
        None => Ok(SceneConfig::default()),
    }
}

/// Runs the bootstrap on the canvas with id `canvas_id`.
#[cfg(target_arch = "wasm32")]
pub fn render(canvas_id: &str, config: &SceneConfig) -> Result<(), WebError> {
    let surface = CanvasSurface::find(canvas_id).inspect_err(|e| log::error!("{e}"))?;
    gl_quad_core::run(&surface, config)?;
    Ok(())
}

/// Module start: draw the default canvas once. Failures are logged only.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console::init_logging(LevelFilter::Info);
    // Already logged by `render`.
    let _ = render(DEFAULT_CANVAS_ID, &SceneConfig::default());
}

/// Draws the quad on `canvas_id`, optionally overriding scene constants
/// with a JSON object. Throws the error message on failure.
#[wasm_bindgen(js_name = renderCanvas)]
pub fn render_canvas(canvas_id: &str, config_json: Option<String>) -> Result<(), JsValue> {
    console::init_logging(LevelFilter::Info);
    let config = scene_config(config_json.as_deref()).map_err(to_js)?;
    render_on(canvas_id, &config).map_err(to_js)
}

#[cfg(target_arch = "wasm32")]
fn render_on(canvas_id: &str, config: &SceneConfig) -> Result<(), WebError> {
    render(canvas_id, config)
}

#[cfg(not(target_arch = "wasm32"))]
fn render_on(_canvas_id: &str, _config: &SceneConfig) -> Result<(), WebError> {
    Err(WebError::NoDocument)
}

fn to_js(err: WebError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
