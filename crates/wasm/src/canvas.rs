//! `<canvas>` lookup and WebGL2 context acquisition.

use crate::error::WebError;
use gl_quad_core::render::GpuContext;
use gl_quad_core::{Surface, SurfaceSize};
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext};

/// A canvas element in the current document.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
}

impl CanvasSurface {
    /// Finds the `<canvas>` with the given id.
    pub fn find(id: &str) -> Result<Self, WebError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(WebError::NoDocument)?;
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| WebError::CanvasNotFound(id.to_string()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| WebError::NotACanvas(id.to_string()))?;
        Ok(Self { canvas })
    }
}

impl Surface for CanvasSurface {
    type Context = GpuContext;

    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.canvas.width(), self.canvas.height())
    }

    fn context(&self) -> Result<GpuContext, String> {
        let gl = self
            .canvas
            .get_context("webgl2")
            .map_err(|e| format!("getContext(\"webgl2\") threw: {e:?}"))?
            .ok_or_else(|| "webgl2 is not supported".to_string())?
            .dyn_into::<WebGl2RenderingContext>()
            .map_err(|_| "context is not a WebGl2RenderingContext".to_string())?;
        Ok(GpuContext::new(glow::Context::from_webgl2_context(gl)))
    }
}
