//! Headless [`Gl`] backend that records every call.
//!
//! `RecordingGl` keeps a trace of [`GlCall`]s, the data uploaded to each
//! buffer, and the set of live GL objects. Linking resolves attribute and
//! uniform names from the declarations in the attached GLSL sources, so a
//! name the shaders never declare comes back as `None` the way a real
//! driver reports it. Failures can be scripted per stage.
//!
//! Clones share one trace, so a [`RecordingSurface`] can hand out its
//! context while the caller keeps a handle for inspection.

use crate::gl::{ClearMask, DepthFunc, FloatAttribLayout, Gl, Primitive, ShaderStage};
use crate::surface::{Surface, SurfaceSize};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// A uniform location handed out by [`RecordingGl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordedUniform {
    pub program: u32,
    pub index: u32,
}

/// One recorded GL call. Status and info-log queries are not recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    CreateShader(ShaderStage),
    ShaderSource(u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram,
    AttachShader { program: u32, shader: u32 },
    DetachShader { program: u32, shader: u32 },
    LinkProgram(u32),
    DeleteProgram(u32),
    UseProgram(u32),
    GetAttribLocation(String),
    GetUniformLocation(String),
    CreateBuffer,
    BindArrayBuffer(Option<u32>),
    BufferData(Vec<f32>),
    DeleteBuffer(u32),
    ClearColor([f32; 4]),
    ClearDepth(f32),
    EnableDepthTest,
    DepthFunc(DepthFunc),
    Clear(ClearMask),
    VertexAttribPointer { index: u32, layout: FloatAttribLayout },
    EnableVertexAttribArray(u32),
    UniformMatrix4 {
        location: RecordedUniform,
        transpose: bool,
        value: [f32; 16],
    },
    DrawArrays { mode: Primitive, first: i32, count: i32 },
}

struct ShaderObject {
    stage: ShaderStage,
    source: String,
    compiled: bool,
    log: String,
}

#[derive(Default)]
struct ProgramObject {
    attached: Vec<u32>,
    linked: bool,
    log: String,
    attributes: Vec<String>,
    uniforms: Vec<String>,
}

#[derive(Default)]
struct State {
    calls: Vec<GlCall>,
    next_id: u32,
    shaders: HashMap<u32, ShaderObject>,
    programs: HashMap<u32, ProgramObject>,
    buffers: HashMap<u32, Vec<f32>>,
    array_buffer: Option<u32>,

    failing_shader_create: HashSet<ShaderStage>,
    compile_failures: HashMap<ShaderStage, String>,
    failing_program_create: bool,
    link_failure: Option<String>,
    failing_buffer_create: bool,
}

impl State {
    fn alloc(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Recording [`Gl`] implementation. See the module docs.
#[derive(Clone, Default)]
pub struct RecordingGl {
    state: Rc<RefCell<State>>,
}

impl RecordingGl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `create_shader` fail for `stage`.
    pub fn fail_shader_create(&self, stage: ShaderStage) {
        self.state.borrow_mut().failing_shader_create.insert(stage);
    }

    /// Makes every `stage` shader fail to compile with `log`.
    pub fn fail_compile(&self, stage: ShaderStage, log: &str) {
        self.state
            .borrow_mut()
            .compile_failures
            .insert(stage, log.to_string());
    }

    /// Makes `create_program` fail.
    pub fn fail_program_create(&self) {
        self.state.borrow_mut().failing_program_create = true;
    }

    /// Makes every link fail with `log`.
    pub fn fail_link(&self, log: &str) {
        self.state.borrow_mut().link_failure = Some(log.to_string());
    }

    /// Makes `create_buffer` fail.
    pub fn fail_buffer_create(&self) {
        self.state.borrow_mut().failing_buffer_create = true;
    }

    /// Snapshot of the call trace so far.
    pub fn calls(&self) -> Vec<GlCall> {
        self.state.borrow().calls.clone()
    }

    /// Number of recorded calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&GlCall) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|c| pred(c)).count()
    }

    /// Reads back the data last uploaded to `buffer`.
    pub fn buffer_data(&self, buffer: u32) -> Option<Vec<f32>> {
        self.state.borrow().buffers.get(&buffer).cloned()
    }

    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    pub fn live_buffers(&self) -> usize {
        self.state.borrow().buffers.len()
    }

    fn record(&self, call: GlCall) {
        self.state.borrow_mut().calls.push(call);
    }
}

/// Names declared with `qualifier` (e.g. `uniform`) in a GLSL source.
///
/// Handles precision qualifiers and array suffixes:
/// `uniform highp mat4 uBones[4];` yields `uBones`. Commented-out
/// declarations are skipped.
fn declared_names(source: &str, qualifier: &str) -> Vec<String> {
    strip_comments(source)
        .split(|c: char| c == ';' || c == '{' || c == '}')
        .filter_map(|statement| {
            let tokens: Vec<&str> = statement.split_whitespace().collect();
            if tokens.len() < 3 || tokens[0] != qualifier {
                return None;
            }
            let last = tokens[tokens.len() - 1];
            let name = last.split('[').next().unwrap_or(last);
            Some(name.to_string())
        })
        .collect()
}

/// Replaces `//` and `/* */` comments with whitespace, keeping line breaks.
fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('/', Some('/')) => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && skipped == '/' {
                        break;
                    }
                    prev = skipped;
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }
    out
}

impl Gl for RecordingGl {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type UniformLocation = RecordedUniform;

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        self.record(GlCall::CreateShader(stage));
        let mut state = self.state.borrow_mut();
        if state.failing_shader_create.contains(&stage) {
            return Err(format!("no {stage} shader object available"));
        }
        let id = state.alloc();
        state.shaders.insert(
            id,
            ShaderObject {
                stage,
                source: String::new(),
                compiled: false,
                log: String::new(),
            },
        );
        Ok(id)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        self.record(GlCall::ShaderSource(shader));
        if let Some(obj) = self.state.borrow_mut().shaders.get_mut(&shader) {
            obj.source = source.to_string();
        }
    }

    fn compile_shader(&self, shader: u32) {
        self.record(GlCall::CompileShader(shader));
        let mut state = self.state.borrow_mut();
        let State {
            shaders,
            compile_failures,
            ..
        } = &mut *state;
        if let Some(obj) = shaders.get_mut(&shader) {
            match compile_failures.get(&obj.stage) {
                Some(log) => {
                    obj.compiled = false;
                    obj.log = log.clone();
                }
                None => {
                    obj.compiled = true;
                    obj.log.clear();
                }
            }
        }
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .is_some_and(|obj| obj.compiled)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .map(|obj| obj.log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: u32) {
        self.record(GlCall::DeleteShader(shader));
        self.state.borrow_mut().shaders.remove(&shader);
    }

    fn create_program(&self) -> Result<u32, String> {
        self.record(GlCall::CreateProgram);
        let mut state = self.state.borrow_mut();
        if state.failing_program_create {
            return Err("no program object available".to_string());
        }
        let id = state.alloc();
        state.programs.insert(id, ProgramObject::default());
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(GlCall::AttachShader { program, shader });
        if let Some(obj) = self.state.borrow_mut().programs.get_mut(&program) {
            obj.attached.push(shader);
        }
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        self.record(GlCall::DetachShader { program, shader });
        if let Some(obj) = self.state.borrow_mut().programs.get_mut(&program) {
            obj.attached.retain(|&s| s != shader);
        }
    }

    fn link_program(&self, program: u32) {
        self.record(GlCall::LinkProgram(program));
        let mut state = self.state.borrow_mut();
        let State {
            shaders,
            programs,
            link_failure,
            ..
        } = &mut *state;
        let Some(obj) = programs.get_mut(&program) else {
            return;
        };

        let attached: Vec<&ShaderObject> = obj
            .attached
            .iter()
            .filter_map(|id| shaders.get(id))
            .collect();
        let has_both_stages = [ShaderStage::Vertex, ShaderStage::Fragment]
            .iter()
            .all(|stage| attached.iter().any(|s| s.stage == *stage && s.compiled));

        if let Some(log) = link_failure {
            obj.linked = false;
            obj.log = log.clone();
            return;
        }
        if !has_both_stages {
            obj.linked = false;
            obj.log = "program needs a compiled vertex and fragment shader".to_string();
            return;
        }

        obj.attributes = attached
            .iter()
            .filter(|s| s.stage == ShaderStage::Vertex)
            .flat_map(|s| declared_names(&s.source, "attribute"))
            .collect();
        let mut uniforms = Vec::new();
        for name in attached
            .iter()
            .flat_map(|s| declared_names(&s.source, "uniform"))
        {
            if !uniforms.contains(&name) {
                uniforms.push(name);
            }
        }
        obj.uniforms = uniforms;
        obj.linked = true;
        obj.log.clear();
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.state
            .borrow()
            .programs
            .get(&program)
            .is_some_and(|obj| obj.linked)
    }

    fn program_info_log(&self, program: u32) -> String {
        self.state
            .borrow()
            .programs
            .get(&program)
            .map(|obj| obj.log.clone())
            .unwrap_or_default()
    }

    fn delete_program(&self, program: u32) {
        self.record(GlCall::DeleteProgram(program));
        self.state.borrow_mut().programs.remove(&program);
    }

    fn use_program(&self, program: u32) {
        self.record(GlCall::UseProgram(program));
    }

    fn attrib_location(&self, program: u32, name: &str) -> Option<u32> {
        self.record(GlCall::GetAttribLocation(name.to_string()));
        let state = self.state.borrow();
        let obj = state.programs.get(&program).filter(|obj| obj.linked)?;
        let index = obj.attributes.iter().position(|a| a == name)?;
        u32::try_from(index).ok()
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<RecordedUniform> {
        self.record(GlCall::GetUniformLocation(name.to_string()));
        let state = self.state.borrow();
        let obj = state.programs.get(&program).filter(|obj| obj.linked)?;
        let index = obj.uniforms.iter().position(|u| u == name)?;
        Some(RecordedUniform {
            program,
            index: u32::try_from(index).ok()?,
        })
    }

    fn create_buffer(&self) -> Result<u32, String> {
        self.record(GlCall::CreateBuffer);
        let mut state = self.state.borrow_mut();
        if state.failing_buffer_create {
            return Err("no buffer object available".to_string());
        }
        let id = state.alloc();
        state.buffers.insert(id, Vec::new());
        Ok(id)
    }

    fn bind_array_buffer(&self, buffer: Option<u32>) {
        self.record(GlCall::BindArrayBuffer(buffer));
        self.state.borrow_mut().array_buffer = buffer;
    }

    fn array_buffer_data_f32(&self, data: &[f32]) {
        self.record(GlCall::BufferData(data.to_vec()));
        let mut state = self.state.borrow_mut();
        if let Some(bound) = state.array_buffer {
            if let Some(contents) = state.buffers.get_mut(&bound) {
                *contents = data.to_vec();
            }
        }
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(GlCall::DeleteBuffer(buffer));
        let mut state = self.state.borrow_mut();
        state.buffers.remove(&buffer);
        if state.array_buffer == Some(buffer) {
            state.array_buffer = None;
        }
    }

    fn clear_color(&self, rgba: [f32; 4]) {
        self.record(GlCall::ClearColor(rgba));
    }

    fn clear_depth(&self, depth: f32) {
        self.record(GlCall::ClearDepth(depth));
    }

    fn enable_depth_test(&self) {
        self.record(GlCall::EnableDepthTest);
    }

    fn depth_func(&self, func: DepthFunc) {
        self.record(GlCall::DepthFunc(func));
    }

    fn clear(&self, mask: ClearMask) {
        self.record(GlCall::Clear(mask));
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, layout: FloatAttribLayout) {
        self.record(GlCall::VertexAttribPointer { index, layout });
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(GlCall::EnableVertexAttribArray(index));
    }

    fn uniform_matrix4(&self, location: &RecordedUniform, transpose: bool, value: &[f32; 16]) {
        self.record(GlCall::UniformMatrix4 {
            location: *location,
            transpose,
            value: *value,
        });
    }

    fn draw_arrays(&self, mode: Primitive, first: i32, count: i32) {
        self.record(GlCall::DrawArrays { mode, first, count });
    }
}

/// A [`Surface`] backed by [`RecordingGl`].
///
/// Built with [`RecordingSurface::without_context`] it behaves like a canvas
/// whose `getContext("webgl2")` returned null; its recorder is still
/// reachable through [`RecordingSurface::gl`] so callers can check that
/// nothing was issued.
pub struct RecordingSurface {
    size: SurfaceSize,
    gl: RecordingGl,
    context_available: bool,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: SurfaceSize::new(width, height),
            gl: RecordingGl::new(),
            context_available: true,
        }
    }

    pub fn without_context(width: u32, height: u32) -> Self {
        Self {
            context_available: false,
            ..Self::new(width, height)
        }
    }

    /// The recorder shared with every context this surface hands out.
    pub fn gl(&self) -> &RecordingGl {
        &self.gl
    }
}

impl Surface for RecordingSurface {
    type Context = RecordingGl;

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn context(&self) -> Result<RecordingGl, String> {
        if !self.context_available {
            return Err("surface has no webgl2 context".to_string());
        }
        Ok(self.gl.clone())
    }
}
