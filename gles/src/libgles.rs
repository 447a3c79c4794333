#![allow(non_snake_case)]

use std::ffi::{CStr, c_char, c_float, c_int, c_uchar, c_uint, c_void};
use std::mem::transmute_copy;
use std::ops::Deref;

use anyhow::anyhow;
use dynlib::DynLib;

// https://registry.khronos.org/OpenGL/api/GLES2/gl2.h

pub type GLboolean = c_uchar;
pub type GLbitfield = c_uint;
pub type GLchar = c_char;
pub type GLenum = c_uint;
pub type GLfloat = c_float;
pub type GLint = c_int;
pub type GLsizei = c_int;
pub type GLubyte = c_uchar;
pub type GLuint = c_uint;

pub const FALSE: GLboolean = 0;

pub const NO_ERROR: GLenum = 0;
pub const COLOR_BUFFER_BIT: GLbitfield = 0x00004000;
pub const TRIANGLES: GLenum = 0x0004;
pub const FLOAT: GLenum = 0x1406;

pub const VENDOR: GLenum = 0x1F00;
pub const RENDERER: GLenum = 0x1F01;
pub const VERSION: GLenum = 0x1F02;
pub const SHADING_LANGUAGE_VERSION: GLenum = 0x8B8C;

pub const FRAGMENT_SHADER: GLenum = 0x8B30;
pub const VERTEX_SHADER: GLenum = 0x8B31;
pub const COMPILE_STATUS: GLenum = 0x8B81;
pub const LINK_STATUS: GLenum = 0x8B82;
pub const INFO_LOG_LENGTH: GLenum = 0x8B84;

pub struct Api {
    pub glAttachShader: unsafe extern "C" fn(program: GLuint, shader: GLuint),
    pub glBindAttribLocation:
        unsafe extern "C" fn(program: GLuint, index: GLuint, name: *const GLchar),
    pub glClear: unsafe extern "C" fn(mask: GLbitfield),
    pub glClearColor:
        unsafe extern "C" fn(red: GLfloat, green: GLfloat, blue: GLfloat, alpha: GLfloat),
    pub glCompileShader: unsafe extern "C" fn(shader: GLuint),
    pub glCreateProgram: unsafe extern "C" fn() -> GLuint,
    pub glCreateShader: unsafe extern "C" fn(r#type: GLenum) -> GLuint,
    pub glDeleteProgram: unsafe extern "C" fn(program: GLuint),
    pub glDeleteShader: unsafe extern "C" fn(shader: GLuint),
    pub glDetachShader: unsafe extern "C" fn(program: GLuint, shader: GLuint),
    pub glDrawArrays: unsafe extern "C" fn(mode: GLenum, first: GLint, count: GLsizei),
    pub glEnableVertexAttribArray: unsafe extern "C" fn(index: GLuint),
    pub glGetError: unsafe extern "C" fn() -> GLenum,
    pub glGetProgramInfoLog: unsafe extern "C" fn(
        program: GLuint,
        buf_size: GLsizei,
        length: *mut GLsizei,
        info_log: *mut GLchar,
    ),
    pub glGetProgramiv: unsafe extern "C" fn(program: GLuint, pname: GLenum, params: *mut GLint),
    pub glGetShaderInfoLog: unsafe extern "C" fn(
        shader: GLuint,
        buf_size: GLsizei,
        length: *mut GLsizei,
        info_log: *mut GLchar,
    ),
    pub glGetShaderiv: unsafe extern "C" fn(shader: GLuint, pname: GLenum, params: *mut GLint),
    pub glGetString: unsafe extern "C" fn(name: GLenum) -> *const GLubyte,
    pub glLinkProgram: unsafe extern "C" fn(program: GLuint),
    pub glShaderSource: unsafe extern "C" fn(
        shader: GLuint,
        count: GLsizei,
        string: *const *const GLchar,
        length: *const GLint,
    ),
    pub glUseProgram: unsafe extern "C" fn(program: GLuint),
    pub glVertexAttribPointer: unsafe extern "C" fn(
        index: GLuint,
        size: GLint,
        r#type: GLenum,
        normalized: GLboolean,
        stride: GLsizei,
        pointer: *const c_void,
    ),
    pub glViewport: unsafe extern "C" fn(x: GLint, y: GLint, width: GLsizei, height: GLsizei),
}

unsafe fn load_fn<F>(
    get_proc_address: &mut impl FnMut(&CStr) -> *mut c_void,
    name: &CStr,
) -> anyhow::Result<F> {
    assert_eq!(size_of::<F>(), size_of::<*mut c_void>());

    let addr = get_proc_address(name);
    if addr.is_null() {
        Err(anyhow!("could not load {name:?}"))
    } else {
        Ok(unsafe { transmute_copy(&addr) })
    }
}

impl Api {
    /// # Safety
    ///
    /// every non-null pointer `get_proc_address` returns must be the address of the gles 2.0
    /// function with that name.
    pub unsafe fn load_with<F>(mut get_proc_address: F) -> anyhow::Result<Self>
    where
        F: FnMut(&CStr) -> *mut c_void,
    {
        let f = &mut get_proc_address;
        unsafe {
            Ok(Self {
                glAttachShader: load_fn(f, c"glAttachShader")?,
                glBindAttribLocation: load_fn(f, c"glBindAttribLocation")?,
                glClear: load_fn(f, c"glClear")?,
                glClearColor: load_fn(f, c"glClearColor")?,
                glCompileShader: load_fn(f, c"glCompileShader")?,
                glCreateProgram: load_fn(f, c"glCreateProgram")?,
                glCreateShader: load_fn(f, c"glCreateShader")?,
                glDeleteProgram: load_fn(f, c"glDeleteProgram")?,
                glDeleteShader: load_fn(f, c"glDeleteShader")?,
                glDetachShader: load_fn(f, c"glDetachShader")?,
                glDrawArrays: load_fn(f, c"glDrawArrays")?,
                glEnableVertexAttribArray: load_fn(f, c"glEnableVertexAttribArray")?,
                glGetError: load_fn(f, c"glGetError")?,
                glGetProgramInfoLog: load_fn(f, c"glGetProgramInfoLog")?,
                glGetProgramiv: load_fn(f, c"glGetProgramiv")?,
                glGetShaderInfoLog: load_fn(f, c"glGetShaderInfoLog")?,
                glGetShaderiv: load_fn(f, c"glGetShaderiv")?,
                glGetString: load_fn(f, c"glGetString")?,
                glLinkProgram: load_fn(f, c"glLinkProgram")?,
                glShaderSource: load_fn(f, c"glShaderSource")?,
                glUseProgram: load_fn(f, c"glUseProgram")?,
                glVertexAttribPointer: load_fn(f, c"glVertexAttribPointer")?,
                glViewport: load_fn(f, c"glViewport")?,
            })
        }
    }
}

/// gles api plus the library it was loaded from.
pub struct Lib {
    api: Api,
    _dynlib: Option<DynLib>,
}

impl Deref for Lib {
    type Target = Api;

    fn deref(&self) -> &Self::Target {
        &self.api
    }
}

impl Lib {
    /// resolves symbols from libGLESv2 first and asks `get_proc_address` (eglGetProcAddress) for
    /// whatever is missing.
    ///
    /// NOTE: egl 1.4 implementations are allowed to return null from eglGetProcAddress for core
    /// functions (mali does), that is why dlsym goes first.
    pub fn load<F>(mut get_proc_address: F) -> anyhow::Result<Self>
    where
        F: FnMut(&CStr) -> *mut c_void,
    {
        let dynlib = DynLib::open_first(&[c"libGLESv2.so.2", c"libGLESv2.so"])
            .inspect_err(|err| log::warn!("{err:#}, relying on eglGetProcAddress"))
            .ok();

        let api = unsafe {
            Api::load_with(|name| match dynlib.as_ref().and_then(|dl| dl.lookup_ptr(name)) {
                Some(addr) => addr.as_ptr(),
                None => get_proc_address(name),
            })
        }?;

        Ok(Self {
            api,
            _dynlib: dynlib,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    extern "C" fn fake_clear(_mask: GLbitfield) {}

    #[test]
    fn load_with_reports_missing_function() {
        let mut asked = Vec::new();
        let err = unsafe {
            Api::load_with(|name| {
                asked.push(name.to_owned());
                if name == c"glAttachShader" {
                    std::ptr::null_mut()
                } else {
                    fake_clear as *mut c_void
                }
            })
        }
        .err()
        .unwrap();
        assert!(err.to_string().contains("glAttachShader"));
        assert_eq!(asked, vec![c"glAttachShader".to_owned()]);
    }
}
