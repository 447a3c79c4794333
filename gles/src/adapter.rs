use std::ffi::{CStr, CString, c_void};
use std::num::NonZero;
use std::ptr::null;

use anyhow::{Context as _, anyhow};

use crate::libgles::*;

// NOTE: methods mirror gl entry points 1:1 with the exception of things that can be rustified
// (strings, object ids that can't be zero).
pub trait Adapter {
    type Program: Copy;
    type Shader: Copy;

    unsafe fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    unsafe fn bind_attrib_location(&self, program: Self::Program, index: GLuint, name: &CStr);
    unsafe fn clear(&self, mask: GLbitfield);
    unsafe fn clear_color(&self, red: GLfloat, green: GLfloat, blue: GLfloat, alpha: GLfloat);
    unsafe fn compile_shader(&self, shader: Self::Shader);
    unsafe fn create_program(&self) -> anyhow::Result<Self::Program>;
    unsafe fn create_shader(&self, r#type: GLenum) -> anyhow::Result<Self::Shader>;
    unsafe fn delete_program(&self, program: Self::Program);
    unsafe fn delete_shader(&self, shader: Self::Shader);
    unsafe fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    unsafe fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei);
    unsafe fn enable_vertex_attrib_array(&self, index: GLuint);
    unsafe fn get_error(&self) -> Option<GLenum>;
    /// empty when the driver has nothing to say (info log length <= 1).
    unsafe fn get_program_info_log(&self, program: Self::Program) -> String;
    unsafe fn get_programiv(&self, program: Self::Program, pname: GLenum) -> GLint;
    /// empty when the driver has nothing to say (info log length <= 1).
    unsafe fn get_shader_info_log(&self, shader: Self::Shader) -> String;
    unsafe fn get_shaderiv(&self, shader: Self::Shader, pname: GLenum) -> GLint;
    unsafe fn get_string(&self, name: GLenum) -> anyhow::Result<String>;
    unsafe fn link_program(&self, program: Self::Program);
    unsafe fn shader_source(&self, shader: Self::Shader, source: &str) -> anyhow::Result<()>;
    unsafe fn use_program(&self, program: Option<Self::Program>);
    /// `pointer` is a client-side array, it must stay alive for as long as draws read it.
    unsafe fn vertex_attrib_pointer(
        &self,
        index: GLuint,
        size: GLint,
        r#type: GLenum,
        normalized: GLboolean,
        stride: GLsizei,
        pointer: *const c_void,
    );
    unsafe fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei);
}

fn info_log_to_string(mut buf: Vec<u8>, written: GLsizei) -> String {
    buf.truncate(written.max(0) as usize);
    while buf.last() == Some(&0) {
        buf.pop();
    }
    String::from_utf8_lossy(&buf).into_owned()
}

impl Adapter for Api {
    type Program = NonZero<GLuint>;
    type Shader = NonZero<GLuint>;

    #[inline]
    unsafe fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { (self.glAttachShader)(program.get(), shader.get()) };
    }

    #[inline]
    unsafe fn bind_attrib_location(&self, program: Self::Program, index: GLuint, name: &CStr) {
        unsafe { (self.glBindAttribLocation)(program.get(), index, name.as_ptr()) };
    }

    #[inline]
    unsafe fn clear(&self, mask: GLbitfield) {
        unsafe { (self.glClear)(mask) };
    }

    #[inline]
    unsafe fn clear_color(&self, red: GLfloat, green: GLfloat, blue: GLfloat, alpha: GLfloat) {
        unsafe { (self.glClearColor)(red, green, blue, alpha) };
    }

    #[inline]
    unsafe fn compile_shader(&self, shader: Self::Shader) {
        unsafe { (self.glCompileShader)(shader.get()) };
    }

    #[inline]
    unsafe fn create_program(&self) -> anyhow::Result<Self::Program> {
        let program = unsafe { (self.glCreateProgram)() };
        NonZero::new(program).context("could not create program")
    }

    #[inline]
    unsafe fn create_shader(&self, r#type: GLenum) -> anyhow::Result<Self::Shader> {
        let shader = unsafe { (self.glCreateShader)(r#type) };
        NonZero::new(shader).context("could not create shader")
    }

    #[inline]
    unsafe fn delete_program(&self, program: Self::Program) {
        unsafe { (self.glDeleteProgram)(program.get()) };
    }

    #[inline]
    unsafe fn delete_shader(&self, shader: Self::Shader) {
        unsafe { (self.glDeleteShader)(shader.get()) };
    }

    #[inline]
    unsafe fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { (self.glDetachShader)(program.get(), shader.get()) };
    }

    #[inline]
    unsafe fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei) {
        unsafe { (self.glDrawArrays)(mode, first, count) };
    }

    #[inline]
    unsafe fn enable_vertex_attrib_array(&self, index: GLuint) {
        unsafe { (self.glEnableVertexAttribArray)(index) };
    }

    #[inline]
    unsafe fn get_error(&self) -> Option<GLenum> {
        let ret = unsafe { (self.glGetError)() };
        (ret != NO_ERROR).then_some(ret)
    }

    unsafe fn get_program_info_log(&self, program: Self::Program) -> String {
        let len = unsafe { self.get_programiv(program, INFO_LOG_LENGTH) };
        if len <= 1 {
            return String::new();
        }
        let mut buf = vec![0_u8; len as usize];
        let mut written: GLsizei = 0;
        unsafe {
            (self.glGetProgramInfoLog)(program.get(), len, &mut written, buf.as_mut_ptr().cast())
        };
        info_log_to_string(buf, written)
    }

    #[inline]
    unsafe fn get_programiv(&self, program: Self::Program, pname: GLenum) -> GLint {
        let mut param: GLint = 0;
        unsafe { (self.glGetProgramiv)(program.get(), pname, &mut param) };
        param
    }

    unsafe fn get_shader_info_log(&self, shader: Self::Shader) -> String {
        let len = unsafe { self.get_shaderiv(shader, INFO_LOG_LENGTH) };
        if len <= 1 {
            return String::new();
        }
        let mut buf = vec![0_u8; len as usize];
        let mut written: GLsizei = 0;
        unsafe {
            (self.glGetShaderInfoLog)(shader.get(), len, &mut written, buf.as_mut_ptr().cast())
        };
        info_log_to_string(buf, written)
    }

    #[inline]
    unsafe fn get_shaderiv(&self, shader: Self::Shader, pname: GLenum) -> GLint {
        let mut param: GLint = 0;
        unsafe { (self.glGetShaderiv)(shader.get(), pname, &mut param) };
        param
    }

    unsafe fn get_string(&self, name: GLenum) -> anyhow::Result<String> {
        let ptr = unsafe { (self.glGetString)(name) };
        if ptr.is_null() {
            return Err(anyhow!("could not get string (name 0x{name:x})"));
        }
        Ok(unsafe { CStr::from_ptr(ptr.cast()) }
            .to_string_lossy()
            .into_owned())
    }

    #[inline]
    unsafe fn link_program(&self, program: Self::Program) {
        unsafe { (self.glLinkProgram)(program.get()) };
    }

    unsafe fn shader_source(&self, shader: Self::Shader, source: &str) -> anyhow::Result<()> {
        let source = CString::new(source).context("shader source contains a nul byte")?;
        let ptr = source.as_ptr();
        unsafe { (self.glShaderSource)(shader.get(), 1, &ptr, null()) };
        Ok(())
    }

    #[inline]
    unsafe fn use_program(&self, program: Option<Self::Program>) {
        unsafe { (self.glUseProgram)(program.map_or(0, |v| v.get())) };
    }

    #[inline]
    unsafe fn vertex_attrib_pointer(
        &self,
        index: GLuint,
        size: GLint,
        r#type: GLenum,
        normalized: GLboolean,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        unsafe { (self.glVertexAttribPointer)(index, size, r#type, normalized, stride, pointer) };
    }

    #[inline]
    unsafe fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        unsafe { (self.glViewport)(x, y, width, height) };
    }
}

#[test]
fn test_info_log_to_string() {
    assert_eq!(info_log_to_string(b"0:1: error\0".to_vec(), 10), "0:1: error");
    // some drivers count the terminator in `length`.
    assert_eq!(info_log_to_string(b"oops\0".to_vec(), 5), "oops");
    assert_eq!(info_log_to_string(vec![0; 8], 0), "");
    assert_eq!(info_log_to_string(b"abc".to_vec(), -1), "");
}
