//! Startup sequence: context, program, buffer, one frame.

use crate::buffers::init_buffers;
use crate::config::SceneConfig;
use crate::error::QuadError;
use crate::program::init_shader_program;
use crate::scene::draw_scene;
use crate::shaders::{FRAGMENT_SHADER_SOURCE, VERTEX_SHADER_SOURCE};
use crate::surface::Surface;

/// Runs the whole bootstrap once against `surface`.
///
/// Every failure is logged and returned; nothing is retried and nothing is
/// drawn after a failure. On success exactly one frame has been drawn.
pub fn run<S: Surface>(surface: &S, config: &SceneConfig) -> Result<(), QuadError> {
    config.validate().inspect_err(|e| log::error!("{e}"))?;

    let gl = surface.context().map_err(|reason| {
        log::error!("unable to initialize WebGL, your browser may not support it: {reason}");
        QuadError::ContextUnavailable(reason)
    })?;

    let program = init_shader_program(&gl, VERTEX_SHADER_SOURCE, FRAGMENT_SHADER_SOURCE)?;
    let buffers = init_buffers(&gl)?;

    let size = surface.size();
    draw_scene(&gl, config, size, &program, &buffers).inspect_err(|e| log::error!("{e}"))?;
    log::info!("rendered quad on {}x{} surface", size.width, size.height);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl::{ClearMask, Primitive, ShaderStage};
    use crate::recording::{GlCall, RecordingSurface};
    use crate::shader::ShaderError;

    #[test]
    fn valid_800_by_600_draws_one_strip_after_one_full_clear() {
        let surface = RecordingSurface::new(800, 600);
        run(&surface, &SceneConfig::default()).unwrap();

        let gl = surface.gl();
        let draws: Vec<GlCall> = gl
            .calls()
            .into_iter()
            .filter(|c| matches!(c, GlCall::DrawArrays { .. }))
            .collect();
        assert_eq!(
            draws,
            vec![GlCall::DrawArrays {
                mode: Primitive::TriangleStrip,
                first: 0,
                count: 4
            }]
        );

        let clears: Vec<GlCall> = gl
            .calls()
            .into_iter()
            .filter(|c| matches!(c, GlCall::Clear(_)))
            .collect();
        assert_eq!(clears, vec![GlCall::Clear(ClearMask::COLOR | ClearMask::DEPTH)]);
    }

    #[test]
    fn valid_run_leaves_one_program_and_one_buffer() {
        let surface = RecordingSurface::new(800, 600);
        run(&surface, &SceneConfig::default()).unwrap();

        let gl = surface.gl();
        assert_eq!(gl.live_programs(), 1);
        assert_eq!(gl.live_buffers(), 1);
        assert_eq!(gl.live_shaders(), 0);
    }

    #[test]
    fn missing_context_aborts_before_any_gl_call() {
        let surface = RecordingSurface::without_context(800, 600);
        let err = run(&surface, &SceneConfig::default()).unwrap_err();
        assert!(matches!(err, QuadError::ContextUnavailable(_)));
        assert!(surface.gl().calls().is_empty());
    }

    #[test]
    fn broken_fragment_shader_never_draws() {
        let surface = RecordingSurface::new(800, 600);
        let gl = surface.gl();
        gl.fail_compile(ShaderStage::Fragment, "ERROR: 0:2: missing ';'");

        let err = run(&surface, &SceneConfig::default()).unwrap_err();

        assert!(matches!(err, QuadError::Shader(ShaderError::Compile { .. })));
        assert_eq!(gl.count(|c| matches!(c, GlCall::DrawArrays { .. })), 0);
        assert_eq!(gl.count(|c| matches!(c, GlCall::CreateBuffer)), 0);
    }

    #[test]
    fn link_failure_never_draws_and_frees_program() {
        let surface = RecordingSurface::new(800, 600);
        let gl = surface.gl();
        gl.fail_link("link failed");

        let err = run(&surface, &SceneConfig::default()).unwrap_err();

        assert!(matches!(err, QuadError::Shader(ShaderError::Link(_))));
        assert_eq!(gl.count(|c| matches!(c, GlCall::DrawArrays { .. })), 0);
        assert_eq!(gl.live_programs(), 0);
    }

    #[test]
    fn buffer_failure_never_draws() {
        let surface = RecordingSurface::new(800, 600);
        let gl = surface.gl();
        gl.fail_buffer_create();

        let err = run(&surface, &SceneConfig::default()).unwrap_err();

        assert!(matches!(err, QuadError::BufferCreate(_)));
        assert_eq!(gl.count(|c| matches!(c, GlCall::DrawArrays { .. })), 0);
    }

    #[test]
    fn zero_height_surface_never_draws() {
        let surface = RecordingSurface::new(800, 0);
        let err = run(&surface, &SceneConfig::default()).unwrap_err();

        assert!(matches!(err, QuadError::InvalidDimensions { .. }));
        let gl = surface.gl();
        assert_eq!(gl.count(|c| matches!(c, GlCall::Clear(_))), 0);
        assert_eq!(gl.count(|c| matches!(c, GlCall::DrawArrays { .. })), 0);
    }

    #[test]
    fn invalid_config_is_rejected_before_context_use() {
        let surface = RecordingSurface::new(800, 600);
        let config = SceneConfig {
            z_far: 0.01,
            ..SceneConfig::default()
        };

        let err = run(&surface, &config).unwrap_err();

        assert!(matches!(err, QuadError::InvalidConfig(_)));
        assert!(surface.gl().calls().is_empty());
    }
}
