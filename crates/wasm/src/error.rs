//! Errors raised by the browser entry point.

use gl_quad_core::QuadError;
use thiserror::Error;

/// Failures before or during the bootstrap in a browser page.
#[derive(Debug, Error)]
pub enum WebError {
    /// No `window` or `document` (e.g. running in a worker).
    #[error("no document available")]
    NoDocument,

    /// The document has no element with this id.
    #[error("no element with id '{0}' in document")]
    CanvasNotFound(String),

    /// The element exists but is not a `<canvas>`.
    #[error("element '{0}' is not a canvas")]
    NotACanvas(String),

    /// The bootstrap itself failed.
    #[error(transparent)]
    Quad(#[from] QuadError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_not_found_names_the_id() {
        let msg = WebError::CanvasNotFound("canvas".into()).to_string();
        assert!(msg.contains("'canvas'"), "got: {msg}");
    }

    #[test]
    fn not_a_canvas_names_the_id() {
        let msg = WebError::NotACanvas("app".into()).to_string();
        assert!(msg.contains("'app'"), "got: {msg}");
    }

    #[test]
    fn quad_error_passes_through() {
        let err: WebError = QuadError::ContextUnavailable("webgl2 is not supported".into()).into();
        assert!(err.to_string().contains("webgl2 is not supported"));
    }

    #[test]
    fn web_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<WebError>();
    }
}
