#![allow(non_camel_case_types)]
#![allow(non_snake_case)]

use std::ffi::{c_char, c_uint, c_void};
use std::ptr::null_mut;

use dynlib::DynLib;

pub type khronos_int32_t = i32;

// https://registry.khronos.org/EGL/api/EGL/eglplatform.h

pub type EGLNativeDisplayType = *mut c_void;
pub type EGLNativePixmapType = *mut c_void;
pub type EGLNativeWindowType = *mut c_void;

pub type EGLint = khronos_int32_t;

// https://registry.khronos.org/EGL/api/EGL/egl.h

pub type EGLBoolean = c_uint;
pub type EGLenum = c_uint;
pub type EGLDisplay = *mut c_void;
pub type EGLConfig = *mut c_void;
pub type EGLSurface = *mut c_void;
pub type EGLContext = *mut c_void;
pub type __eglMustCastToProperFunctionPointerType = *mut c_void;

pub const FALSE: EGLBoolean = 0;

pub const DEFAULT_DISPLAY: EGLNativeDisplayType = null_mut();
pub const NO_CONTEXT: EGLContext = null_mut();
pub const NO_DISPLAY: EGLDisplay = null_mut();
pub const NO_SURFACE: EGLSurface = null_mut();

// errors

pub const SUCCESS: EGLint = 0x3000;
pub const NOT_INITIALIZED: EGLint = 0x3001;
pub const BAD_ACCESS: EGLint = 0x3002;
pub const BAD_ALLOC: EGLint = 0x3003;
pub const BAD_ATTRIBUTE: EGLint = 0x3004;
pub const BAD_CONFIG: EGLint = 0x3005;
pub const BAD_CONTEXT: EGLint = 0x3006;
pub const BAD_CURRENT_SURFACE: EGLint = 0x3007;
pub const BAD_DISPLAY: EGLint = 0x3008;
pub const BAD_MATCH: EGLint = 0x3009;
pub const BAD_NATIVE_PIXMAP: EGLint = 0x300A;
pub const BAD_NATIVE_WINDOW: EGLint = 0x300B;
pub const BAD_PARAMETER: EGLint = 0x300C;
pub const BAD_SURFACE: EGLint = 0x300D;
pub const CONTEXT_LOST: EGLint = 0x300E;

// config attributes

pub const BUFFER_SIZE: EGLint = 0x3020;
pub const ALPHA_SIZE: EGLint = 0x3021;
pub const BLUE_SIZE: EGLint = 0x3022;
pub const GREEN_SIZE: EGLint = 0x3023;
pub const RED_SIZE: EGLint = 0x3024;
pub const DEPTH_SIZE: EGLint = 0x3025;
pub const STENCIL_SIZE: EGLint = 0x3026;
pub const CONFIG_ID: EGLint = 0x3028;
pub const SAMPLES: EGLint = 0x3031;
pub const SURFACE_TYPE: EGLint = 0x3033;
pub const NONE: EGLint = 0x3038;
pub const RENDERABLE_TYPE: EGLint = 0x3040;

pub const PBUFFER_BIT: EGLint = 0x0001;
pub const PIXMAP_BIT: EGLint = 0x0002;
pub const WINDOW_BIT: EGLint = 0x0004;
pub const OPENGL_ES2_BIT: EGLint = 0x0004;

// strings

pub const VENDOR: EGLint = 0x3053;
pub const VERSION: EGLint = 0x3054;
pub const EXTENSIONS: EGLint = 0x3055;
pub const CLIENT_APIS: EGLint = 0x308D;

// surface attributes

pub const HEIGHT: EGLint = 0x3056;
pub const WIDTH: EGLint = 0x3057;

// context

pub const CONTEXT_CLIENT_VERSION: EGLint = 0x3098;
pub const OPENGL_ES_API: EGLenum = 0x30A0;

pub struct Lib {
    pub eglBindAPI: unsafe extern "C" fn(api: EGLenum) -> EGLBoolean,
    pub eglChooseConfig: unsafe extern "C" fn(
        dpy: EGLDisplay,
        attrib_list: *const EGLint,
        configs: *mut EGLConfig,
        config_size: EGLint,
        num_config: *mut EGLint,
    ) -> EGLBoolean,
    pub eglCreateContext: unsafe extern "C" fn(
        dpy: EGLDisplay,
        config: EGLConfig,
        share_context: EGLContext,
        attrib_list: *const EGLint,
    ) -> EGLContext,
    pub eglCreatePbufferSurface: unsafe extern "C" fn(
        dpy: EGLDisplay,
        config: EGLConfig,
        attrib_list: *const EGLint,
    ) -> EGLSurface,
    pub eglCreateWindowSurface: unsafe extern "C" fn(
        dpy: EGLDisplay,
        config: EGLConfig,
        win: EGLNativeWindowType,
        attrib_list: *const EGLint,
    ) -> EGLSurface,
    pub eglDestroyContext: unsafe extern "C" fn(dpy: EGLDisplay, ctx: EGLContext) -> EGLBoolean,
    pub eglDestroySurface: unsafe extern "C" fn(dpy: EGLDisplay, surface: EGLSurface) -> EGLBoolean,
    pub eglGetConfigAttrib: unsafe extern "C" fn(
        dpy: EGLDisplay,
        config: EGLConfig,
        attribute: EGLint,
        value: *mut EGLint,
    ) -> EGLBoolean,
    pub eglGetDisplay: unsafe extern "C" fn(display_id: EGLNativeDisplayType) -> EGLDisplay,
    pub eglGetError: unsafe extern "C" fn() -> EGLint,
    pub eglGetProcAddress:
        unsafe extern "C" fn(procname: *const c_char) -> __eglMustCastToProperFunctionPointerType,
    pub eglInitialize:
        unsafe extern "C" fn(dpy: EGLDisplay, major: *mut EGLint, minor: *mut EGLint) -> EGLBoolean,
    pub eglMakeCurrent: unsafe extern "C" fn(
        dpy: EGLDisplay,
        draw: EGLSurface,
        read: EGLSurface,
        ctx: EGLContext,
    ) -> EGLBoolean,
    pub eglQueryString: unsafe extern "C" fn(dpy: EGLDisplay, name: EGLint) -> *const c_char,
    pub eglQuerySurface: unsafe extern "C" fn(
        dpy: EGLDisplay,
        surface: EGLSurface,
        attribute: EGLint,
        value: *mut EGLint,
    ) -> EGLBoolean,
    pub eglSwapBuffers: unsafe extern "C" fn(dpy: EGLDisplay, surface: EGLSurface) -> EGLBoolean,
    pub eglTerminate: unsafe extern "C" fn(dpy: EGLDisplay) -> EGLBoolean,

    // NOTE: none when the entry points come from somewhere other than libEGL (tests).
    pub(crate) _dynlib: Option<DynLib>,
}

impl Lib {
    pub fn load() -> anyhow::Result<Self> {
        let dl = DynLib::open_first(&[c"libEGL.so.1", c"libEGL.so"])?;

        Ok(Self {
            eglBindAPI: dl.lookup(c"eglBindAPI")?,
            eglChooseConfig: dl.lookup(c"eglChooseConfig")?,
            eglCreateContext: dl.lookup(c"eglCreateContext")?,
            eglCreatePbufferSurface: dl.lookup(c"eglCreatePbufferSurface")?,
            eglCreateWindowSurface: dl.lookup(c"eglCreateWindowSurface")?,
            eglDestroyContext: dl.lookup(c"eglDestroyContext")?,
            eglDestroySurface: dl.lookup(c"eglDestroySurface")?,
            eglGetConfigAttrib: dl.lookup(c"eglGetConfigAttrib")?,
            eglGetDisplay: dl.lookup(c"eglGetDisplay")?,
            eglGetError: dl.lookup(c"eglGetError")?,
            eglGetProcAddress: dl.lookup(c"eglGetProcAddress")?,
            eglInitialize: dl.lookup(c"eglInitialize")?,
            eglMakeCurrent: dl.lookup(c"eglMakeCurrent")?,
            eglQueryString: dl.lookup(c"eglQueryString")?,
            eglQuerySurface: dl.lookup(c"eglQuerySurface")?,
            eglSwapBuffers: dl.lookup(c"eglSwapBuffers")?,
            eglTerminate: dl.lookup(c"eglTerminate")?,

            _dynlib: Some(dl),
        })
    }
}
