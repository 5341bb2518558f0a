//! The fixed shader pair drawn by the bootstrap.
//!
//! Both sources are GLSL ES 1.00 so they compile under WebGL1 and WebGL2
//! alike. The vertex shader reads a 2D position into a `vec4` attribute
//! (`z` and `w` default to 0 and 1) and applies projection * model-view.

/// Name of the position attribute in [`VERTEX_SHADER_SOURCE`].
pub const VERTEX_POSITION_ATTRIB: &str = "aVertexPosition";
/// Name of the projection uniform in [`VERTEX_SHADER_SOURCE`].
pub const PROJECTION_MATRIX_UNIFORM: &str = "uProjectionMatrix";
/// Name of the model-view uniform in [`VERTEX_SHADER_SOURCE`].
pub const MODEL_VIEW_MATRIX_UNIFORM: &str = "uModelViewMatrix";

/// Vertex shader: transforms each quad corner into clip space.
pub const VERTEX_SHADER_SOURCE: &str = r#"
attribute vec4 aVertexPosition;
uniform mat4 uModelViewMatrix;
uniform mat4 uProjectionMatrix;
void main() {
    gl_Position = uProjectionMatrix * uModelViewMatrix * aVertexPosition;
}
"#;

/// Fragment shader: solid opaque white.
pub const FRAGMENT_SHADER_SOURCE: &str = r#"
void main() {
    gl_FragColor = vec4(1.0, 1.0, 1.0, 1.0);
}
"#;
