//! Shader compilation and linking.
//!
//! Provides the error type, source formatting for debugging, and functions
//! to compile individual shader stages and link them into programs. The
//! GL-facing functions are generic over [`Gl`], so they run against a live
//! glow context or a [`RecordingGl`](crate::recording::RecordingGl) alike;
//! the formatting utility is pure string processing.

use crate::gl::{Gl, ShaderStage};
use thiserror::Error;

/// Errors that can occur while building the shader program.
#[derive(Debug, Clone, Error)]
pub enum ShaderError {
    /// The driver returned no shader object.
    #[error("cannot create {stage} shader: {reason}")]
    Create { stage: ShaderStage, reason: String },

    /// A shader stage failed to compile.
    #[error("shader compile error ({stage}):\n{log}")]
    Compile {
        /// The shader stage that failed.
        stage: ShaderStage,
        /// Numbered source followed by the driver's info log.
        log: String,
    },

    /// The driver returned no program object.
    #[error("failed to create program: {0}")]
    ProgramCreate(String),

    /// A program failed to link.
    #[error("unable to initialize shader program:\n{0}")]
    Link(String),

    /// The linked program has no active attribute with this name.
    #[error("attribute '{0}' not found in linked program")]
    MissingAttribute(String),

    /// The linked program has no active uniform with this name.
    #[error("uniform '{0}' not found in linked program")]
    MissingUniform(String),
}

/// Formats a shader compilation error for human-readable debugging.
///
/// Prepends right-aligned line numbers to each line of `source`, then
/// appends the driver's error `log`. Both may be empty.
pub fn format_shader_error(source: &str, log: &str) -> String {
    let source_lines: Vec<&str> = source.lines().collect();
    let width = source_lines.len().max(1).to_string().len();

    let numbered = source_lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>width$}: {line}", i + 1, width = width))
        .collect::<Vec<_>>()
        .join("\n");

    match (numbered.is_empty(), log.is_empty()) {
        (true, true) => String::new(),
        (true, false) => log.to_string(),
        (false, true) => numbered,
        (false, false) => format!("{numbered}\n\n{log}"),
    }
}

/// Compiles a single shader stage.
///
/// On failure the partial shader object is deleted and the diagnostic is
/// logged before it is returned.
///
/// # Errors
///
/// `ShaderError::Create` if no shader object could be allocated,
/// `ShaderError::Compile` if the GLSL source fails to compile.
pub fn compile_shader<G: Gl>(
    gl: &G,
    stage: ShaderStage,
    source: &str,
) -> Result<G::Shader, ShaderError> {
    let shader = gl.create_shader(stage).map_err(|reason| {
        log::error!("cannot create {stage} shader: {reason}");
        ShaderError::Create { stage, reason }
    })?;

    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if gl.shader_compile_status(shader) {
        return Ok(shader);
    }

    let info_log = gl.shader_info_log(shader);
    log::error!("error occurred while compiling {stage} shader: {info_log}");
    gl.delete_shader(shader);
    Err(ShaderError::Compile {
        stage,
        log: format_shader_error(source, &info_log),
    })
}

/// Links a vertex and fragment shader into a program.
///
/// Attaches both shaders, links, and detaches them afterward (the program
/// keeps its own copies). A program that fails to link is deleted.
///
/// # Errors
///
/// `ShaderError::ProgramCreate` if no program object could be allocated,
/// `ShaderError::Link` if linking fails.
pub fn link_program<G: Gl>(
    gl: &G,
    vertex: G::Shader,
    fragment: G::Shader,
) -> Result<G::Program, ShaderError> {
    let program = gl.create_program().map_err(|reason| {
        log::error!("failed to create program: {reason}");
        ShaderError::ProgramCreate(reason)
    })?;

    gl.attach_shader(program, vertex);
    gl.attach_shader(program, fragment);
    gl.link_program(program);
    gl.detach_shader(program, vertex);
    gl.detach_shader(program, fragment);

    if gl.program_link_status(program) {
        return Ok(program);
    }

    let info_log = gl.program_info_log(program);
    log::error!("unable to initialize shader program: {info_log}");
    gl.delete_program(program);
    Err(ShaderError::Link(info_log))
}

/// Compiles vertex and fragment sources and links them into a program.
///
/// Both stages are compiled before either result is checked, so a broken
/// pair reports every diagnostic. No program object is created unless both
/// stages compiled. Shader objects never outlive this call.
///
/// # Errors
///
/// The vertex stage's error if it failed, else the fragment stage's, else
/// whatever [`link_program`] returns.
pub fn compile_program<G: Gl>(
    gl: &G,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<G::Program, ShaderError> {
    let vertex = compile_shader(gl, ShaderStage::Vertex, vertex_src);
    let fragment = compile_shader(gl, ShaderStage::Fragment, fragment_src);

    let err = match (vertex, fragment) {
        (Ok(vert), Ok(frag)) => {
            let result = link_program(gl, vert, frag);
            gl.delete_shader(vert);
            gl.delete_shader(frag);
            return result;
        }
        (Err(e), Ok(frag)) => {
            gl.delete_shader(frag);
            e
        }
        (Ok(vert), Err(e)) => {
            gl.delete_shader(vert);
            e
        }
        (Err(e), Err(_)) => e,
    };

    log::error!("failed to load shader");
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{GlCall, RecordingGl};
    use crate::shaders::{FRAGMENT_SHADER_SOURCE, VERTEX_SHADER_SOURCE};

    // --- format_shader_error tests ---

    #[test]
    fn format_shader_error_prepends_line_numbers() {
        let source = "attribute vec4 a;\nvoid main() {\n}\n";
        let log = "ERROR: 0:2: syntax error";
        let formatted = format_shader_error(source, log);

        assert!(
            formatted.contains("1: attribute vec4 a;"),
            "expected line 1 with content, got:\n{formatted}"
        );
        assert!(
            formatted.contains("2: void main() {"),
            "expected line 2 with content, got:\n{formatted}"
        );
        assert!(
            formatted.contains(log),
            "expected original log in output, got:\n{formatted}"
        );
    }

    #[test]
    fn format_shader_error_handles_empty_inputs() {
        assert_eq!(format_shader_error("", "some error"), "some error");
        assert_eq!(format_shader_error("void main() {}", ""), "1: void main() {}");
        assert!(format_shader_error("", "").is_empty());
    }

    #[test]
    fn format_shader_error_right_aligns_line_numbers() {
        let source = (1..=12)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let formatted = format_shader_error(&source, "err");
        let lines: Vec<&str> = formatted.lines().collect();

        assert!(
            lines[0].starts_with(" 1: "),
            "expected right-aligned single digit, got: '{}'",
            lines[0]
        );
        assert!(
            lines[9].starts_with("10: "),
            "expected no padding for double digit, got: '{}'",
            lines[9]
        );
    }

    // --- ShaderError Display tests ---

    #[test]
    fn compile_error_display_includes_stage_and_log() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: "undeclared identifier".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("fragment"), "missing stage in: {msg}");
        assert!(msg.contains("undeclared identifier"), "missing log in: {msg}");
    }

    #[test]
    fn missing_location_errors_name_the_symbol() {
        let attr = format!("{}", ShaderError::MissingAttribute("aVertexPosition".into()));
        let uni = format!("{}", ShaderError::MissingUniform("uModelViewMatrix".into()));
        assert!(attr.contains("aVertexPosition"), "got: {attr}");
        assert!(uni.contains("uModelViewMatrix"), "got: {uni}");
    }

    #[test]
    fn shader_error_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ShaderError>();
    }

    // --- compile / link against the recording backend ---

    #[test]
    fn compile_program_links_valid_pair_and_releases_shaders() {
        let gl = RecordingGl::new();
        let program = compile_program(&gl, VERTEX_SHADER_SOURCE, FRAGMENT_SHADER_SOURCE).unwrap();

        assert_eq!(gl.count(|c| matches!(c, GlCall::LinkProgram(p) if *p == program)), 1);
        assert_eq!(gl.live_shaders(), 0, "shader objects should be deleted after link");
        assert_eq!(gl.live_programs(), 1);
    }

    #[test]
    fn compile_failure_deletes_partial_shader() {
        let gl = RecordingGl::new();
        gl.fail_compile(ShaderStage::Vertex, "ERROR: 0:3: syntax error");

        let err = compile_shader(&gl, ShaderStage::Vertex, "void main() {").unwrap_err();

        match err {
            ShaderError::Compile { stage, log } => {
                assert_eq!(stage, ShaderStage::Vertex);
                assert!(log.contains("1: void main() {"), "got: {log}");
                assert!(log.contains("syntax error"), "got: {log}");
            }
            other => panic!("expected compile error, got {other:?}"),
        }
        assert_eq!(gl.count(|c| matches!(c, GlCall::DeleteShader(_))), 1);
        assert_eq!(gl.live_shaders(), 0);
    }

    #[test]
    fn shader_create_failure_skips_source_upload() {
        let gl = RecordingGl::new();
        gl.fail_shader_create(ShaderStage::Fragment);

        let err = compile_shader(&gl, ShaderStage::Fragment, FRAGMENT_SHADER_SOURCE).unwrap_err();

        assert!(matches!(err, ShaderError::Create { stage: ShaderStage::Fragment, .. }));
        assert_eq!(gl.count(|c| matches!(c, GlCall::ShaderSource(_))), 0);
    }

    #[test]
    fn fragment_compile_failure_never_creates_program() {
        let gl = RecordingGl::new();
        gl.fail_compile(ShaderStage::Fragment, "missing ';'");

        let err = compile_program(&gl, VERTEX_SHADER_SOURCE, "void main() { x }").unwrap_err();

        assert!(matches!(err, ShaderError::Compile { stage: ShaderStage::Fragment, .. }));
        assert_eq!(gl.count(|c| matches!(c, GlCall::CreateProgram)), 0);
        assert_eq!(gl.count(|c| matches!(c, GlCall::LinkProgram(_))), 0);
        assert_eq!(gl.live_shaders(), 0, "compiled vertex shader should be released");
    }

    #[test]
    fn both_stages_are_compiled_even_when_vertex_fails() {
        let gl = RecordingGl::new();
        gl.fail_compile(ShaderStage::Vertex, "bad vertex");
        gl.fail_compile(ShaderStage::Fragment, "bad fragment");

        let err = compile_program(&gl, "x", "y").unwrap_err();

        assert!(matches!(err, ShaderError::Compile { stage: ShaderStage::Vertex, .. }));
        assert_eq!(gl.count(|c| matches!(c, GlCall::CompileShader(_))), 2);
        assert_eq!(gl.live_shaders(), 0);
    }

    #[test]
    fn link_failure_deletes_program() {
        let gl = RecordingGl::new();
        gl.fail_link("varying mismatch");

        let err = compile_program(&gl, VERTEX_SHADER_SOURCE, FRAGMENT_SHADER_SOURCE).unwrap_err();

        match err {
            ShaderError::Link(log) => assert!(log.contains("varying mismatch")),
            other => panic!("expected link error, got {other:?}"),
        }
        assert_eq!(gl.count(|c| matches!(c, GlCall::DeleteProgram(_))), 1);
        assert_eq!(gl.live_programs(), 0);
        assert_eq!(gl.live_shaders(), 0);
    }

    #[test]
    fn program_create_failure_is_reported() {
        let gl = RecordingGl::new();
        gl.fail_program_create();

        let err = compile_program(&gl, VERTEX_SHADER_SOURCE, FRAGMENT_SHADER_SOURCE).unwrap_err();

        assert!(matches!(err, ShaderError::ProgramCreate(_)));
        assert_eq!(gl.count(|c| matches!(c, GlCall::AttachShader { .. })), 0);
        assert_eq!(gl.live_shaders(), 0);
    }

    #[test]
    fn link_detaches_both_shaders() {
        let gl = RecordingGl::new();
        compile_program(&gl, VERTEX_SHADER_SOURCE, FRAGMENT_SHADER_SOURCE).unwrap();
        assert_eq!(gl.count(|c| matches!(c, GlCall::AttachShader { .. })), 2);
        assert_eq!(gl.count(|c| matches!(c, GlCall::DetachShader { .. })), 2);
    }
}
