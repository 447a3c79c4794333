use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::ffi::{CStr, c_void};
use std::num::NonZero;
use std::ops::ControlFlow;

use gles::{Adapter, GLbitfield, GLboolean, GLenum, GLfloat, GLint, GLsizei, GLuint};

use crate::render::Presenter;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    AttachShader(GLuint, GLuint),
    BindAttribLocation(GLuint, GLuint, String),
    Clear(GLbitfield),
    ClearColor([GLfloat; 4]),
    CompileShader(GLuint),
    CreateProgram(GLuint),
    CreateShader(GLenum, GLuint),
    DeleteProgram(GLuint),
    DeleteShader(GLuint),
    DetachShader(GLuint, GLuint),
    DrawArrays(GLenum, GLint, GLsizei),
    EnableVertexAttribArray(GLuint),
    LinkProgram(GLuint),
    ShaderSource(GLuint, String),
    UseProgram(GLuint),
    VertexAttribPointer {
        index: GLuint,
        size: GLint,
        r#type: GLenum,
        normalized: GLboolean,
        stride: GLsizei,
        pointer: usize,
    },
    Viewport(GLint, GLint, GLsizei, GLsizei),
}

/// records every call, hands out sequential object ids and fails where it's told to.
#[derive(Default)]
pub struct RecordingGl {
    calls: RefCell<Vec<Call>>,
    next_id: Cell<GLuint>,
    shader_types: RefCell<HashMap<GLuint, GLenum>>,

    fail_create_shader: Option<GLenum>,
    fail_create_program: bool,
    fail_compile: Option<GLenum>,
    fail_link: bool,
    info_log: String,
}

impl RecordingGl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failing_create_shader(mut self, r#type: GLenum) -> Self {
        self.fail_create_shader = Some(r#type);
        self
    }

    pub fn with_failing_create_program(mut self) -> Self {
        self.fail_create_program = true;
        self
    }

    pub fn with_failing_compile(mut self, r#type: GLenum) -> Self {
        self.fail_compile = Some(r#type);
        self
    }

    pub fn with_failing_link(mut self) -> Self {
        self.fail_link = true;
        self
    }

    /// what both info log queries return.
    pub fn with_info_log(mut self, info_log: &str) -> Self {
        self.info_log = info_log.to_string();
        self
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn next_id(&self) -> NonZero<GLuint> {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        NonZero::new(id).unwrap()
    }

    pub fn take_calls(&self) -> Vec<Call> {
        self.calls.take()
    }
}

impl Adapter for RecordingGl {
    type Program = NonZero<GLuint>;
    type Shader = NonZero<GLuint>;

    unsafe fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        self.record(Call::AttachShader(program.get(), shader.get()));
    }

    unsafe fn bind_attrib_location(&self, program: Self::Program, index: GLuint, name: &CStr) {
        self.record(Call::BindAttribLocation(
            program.get(),
            index,
            name.to_string_lossy().into_owned(),
        ));
    }

    unsafe fn clear(&self, mask: GLbitfield) {
        self.record(Call::Clear(mask));
    }

    unsafe fn clear_color(&self, red: GLfloat, green: GLfloat, blue: GLfloat, alpha: GLfloat) {
        self.record(Call::ClearColor([red, green, blue, alpha]));
    }

    unsafe fn compile_shader(&self, shader: Self::Shader) {
        self.record(Call::CompileShader(shader.get()));
    }

    unsafe fn create_program(&self) -> anyhow::Result<Self::Program> {
        if self.fail_create_program {
            anyhow::bail!("could not create program");
        }
        let id = self.next_id();
        self.record(Call::CreateProgram(id.get()));
        Ok(id)
    }

    unsafe fn create_shader(&self, r#type: GLenum) -> anyhow::Result<Self::Shader> {
        if self.fail_create_shader == Some(r#type) {
            anyhow::bail!("could not create shader");
        }
        let id = self.next_id();
        self.shader_types.borrow_mut().insert(id.get(), r#type);
        self.record(Call::CreateShader(r#type, id.get()));
        Ok(id)
    }

    unsafe fn delete_program(&self, program: Self::Program) {
        self.record(Call::DeleteProgram(program.get()));
    }

    unsafe fn delete_shader(&self, shader: Self::Shader) {
        self.record(Call::DeleteShader(shader.get()));
    }

    unsafe fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
        self.record(Call::DetachShader(program.get(), shader.get()));
    }

    unsafe fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei) {
        self.record(Call::DrawArrays(mode, first, count));
    }

    unsafe fn enable_vertex_attrib_array(&self, index: GLuint) {
        self.record(Call::EnableVertexAttribArray(index));
    }

    unsafe fn get_error(&self) -> Option<GLenum> {
        None
    }

    unsafe fn get_program_info_log(&self, _program: Self::Program) -> String {
        self.info_log.clone()
    }

    unsafe fn get_programiv(&self, _program: Self::Program, pname: GLenum) -> GLint {
        match pname {
            gles::LINK_STATUS => (!self.fail_link) as GLint,
            _ => 0,
        }
    }

    unsafe fn get_shader_info_log(&self, _shader: Self::Shader) -> String {
        self.info_log.clone()
    }

    unsafe fn get_shaderiv(&self, shader: Self::Shader, pname: GLenum) -> GLint {
        let r#type = self.shader_types.borrow().get(&shader.get()).copied();
        match pname {
            gles::COMPILE_STATUS => (self.fail_compile != r#type) as GLint,
            _ => 0,
        }
    }

    unsafe fn get_string(&self, name: GLenum) -> anyhow::Result<String> {
        Ok(format!("recording 0x{name:x}"))
    }

    unsafe fn link_program(&self, program: Self::Program) {
        self.record(Call::LinkProgram(program.get()));
    }

    unsafe fn shader_source(&self, shader: Self::Shader, source: &str) -> anyhow::Result<()> {
        self.record(Call::ShaderSource(shader.get(), source.to_string()));
        Ok(())
    }

    unsafe fn use_program(&self, program: Option<Self::Program>) {
        self.record(Call::UseProgram(program.map_or(0, |p| p.get())));
    }

    unsafe fn vertex_attrib_pointer(
        &self,
        index: GLuint,
        size: GLint,
        r#type: GLenum,
        normalized: GLboolean,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        self.record(Call::VertexAttribPointer {
            index,
            size,
            r#type,
            normalized,
            stride,
            pointer: pointer as usize,
        });
    }

    unsafe fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        self.record(Call::Viewport(x, y, width, height));
    }
}

/// counts presented frames, optionally asks to stop after `stop_after` of them.
#[derive(Default)]
pub struct CountingPresenter {
    pub presented: u32,
    pub stop_after: Option<u32>,
}

impl Presenter for CountingPresenter {
    fn present(&mut self) -> anyhow::Result<ControlFlow<()>> {
        self.presented += 1;
        if self.stop_after == Some(self.presented) {
            Ok(ControlFlow::Break(()))
        } else {
            Ok(ControlFlow::Continue(()))
        }
    }
}
