use std::ffi::{CStr, c_void};
use std::ptr::null_mut;

mod error;
pub mod libegl;
mod libwayland_egl;
mod wsi;

pub use error::{Error, ErrorCode};
pub use libegl::*;
pub use wsi::{FbdevWindow, WaylandWsi, Wsi};

// ----
// attribs

/// `NONE`-terminated attribute list.
#[derive(Debug, Clone, Default)]
pub struct Attribs {
    items: Vec<EGLint>,
}

impl Attribs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, attr: EGLint, value: EGLint) -> &mut Self {
        self.items.push(attr);
        self.items.push(value);
        self
    }

    pub fn to_vec(&self) -> Vec<EGLint> {
        let mut ret = Vec::with_capacity(self.items.len() + 1);
        ret.extend_from_slice(&self.items);
        ret.push(NONE);
        ret
    }
}

// ----
// context

pub struct Context<'conn> {
    conn: &'conn Connection,
    pub context: EGLContext,
}

impl Drop for Context<'_> {
    fn drop(&mut self) {
        let lib = &self.conn.lib;
        unsafe {
            (lib.eglMakeCurrent)(self.conn.display, NO_SURFACE, NO_SURFACE, NO_CONTEXT);
            (lib.eglDestroyContext)(self.conn.display, self.context);
        }
        log::debug!("destroyed egl context");
    }
}

// ----
// surface

pub struct Surface<'conn> {
    conn: &'conn Connection,
    pub surface: EGLSurface,
    // NOTE: fields are dropped after Drop::drop, the native window outlives the egl surface.
    _wsi: Option<Wsi>,
}

impl Drop for Surface<'_> {
    fn drop(&mut self) {
        unsafe { (self.conn.lib.eglDestroySurface)(self.conn.display, self.surface) };
        log::debug!("destroyed egl surface");
    }
}

// ----
// connection

pub struct Connection {
    lib: Lib,
    display: EGLDisplay,
}

impl Drop for Connection {
    fn drop(&mut self) {
        unsafe { (self.lib.eglTerminate)(self.display) };
        log::debug!("terminated egl display");
    }
}

impl Connection {
    /// loads libEGL, gets the display for `native_display` (`DEFAULT_DISPLAY` is fine) and
    /// initializes it.
    pub fn open(native_display: EGLNativeDisplayType) -> Result<Self, Error> {
        let lib = Lib::load().map_err(Error::CouldNotLoadEgl)?;
        Self::from_lib(lib, native_display)
    }

    /// same as [`Connection::open`], but with entry points that are already loaded.
    pub fn from_lib(lib: Lib, native_display: EGLNativeDisplayType) -> Result<Self, Error> {
        let display = unsafe { (lib.eglGetDisplay)(native_display) };
        if display == NO_DISPLAY {
            return Err(Self::call_failed(&lib, "eglGetDisplay"));
        }

        let (mut major, mut minor) = (0, 0);
        if unsafe { (lib.eglInitialize)(display, &mut major, &mut minor) } == FALSE {
            return Err(Self::call_failed(&lib, "eglInitialize"));
        }
        log::info!("initialized egl version {major}.{minor}");

        Ok(Self { lib, display })
    }

    fn call_failed(lib: &Lib, call: &'static str) -> Error {
        let code = ErrorCode(unsafe { (lib.eglGetError)() });
        log::error!("{call} failed with {}", code.name());
        Error::CallFailed { call, code }
    }

    pub fn query_string(&self, name: EGLint) -> Result<String, Error> {
        let ptr = unsafe { (self.lib.eglQueryString)(self.display, name) };
        if ptr.is_null() {
            return Err(Self::call_failed(&self.lib, "eglQueryString"));
        }
        Ok(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
    }

    pub fn choose_config(&self, attribs: &Attribs) -> Result<EGLConfig, Error> {
        let attribs = attribs.to_vec();
        let mut config: EGLConfig = null_mut();
        let mut num_config = 0;
        if unsafe {
            (self.lib.eglChooseConfig)(
                self.display,
                attribs.as_ptr(),
                &mut config,
                1,
                &mut num_config,
            )
        } == FALSE
        {
            return Err(Self::call_failed(&self.lib, "eglChooseConfig"));
        }
        if num_config < 1 || config.is_null() {
            return Err(Error::NoMatchingConfig);
        }

        if log::log_enabled!(log::Level::Debug) {
            let attr = |attr| self.config_attrib(config, attr).unwrap_or(-1);
            log::debug!(
                "chose config {id}: r{r} g{g} b{b} a{a} buffer {buffer} samples {samples}",
                id = attr(CONFIG_ID),
                r = attr(RED_SIZE),
                g = attr(GREEN_SIZE),
                b = attr(BLUE_SIZE),
                a = attr(ALPHA_SIZE),
                buffer = attr(BUFFER_SIZE),
                samples = attr(SAMPLES),
            );
        }

        Ok(config)
    }

    pub fn config_attrib(&self, config: EGLConfig, attribute: EGLint) -> Result<EGLint, Error> {
        let mut value = 0;
        if unsafe { (self.lib.eglGetConfigAttrib)(self.display, config, attribute, &mut value) }
            == FALSE
        {
            return Err(Self::call_failed(&self.lib, "eglGetConfigAttrib"));
        }
        Ok(value)
    }

    /// NOTE: EGLConfig does not need clean up, the context does and will do it on drop.
    pub fn create_context(
        &self,
        config: EGLConfig,
        attribs: &Attribs,
    ) -> Result<Context<'_>, Error> {
        if unsafe { (self.lib.eglBindAPI)(OPENGL_ES_API) } == FALSE {
            return Err(Self::call_failed(&self.lib, "eglBindAPI"));
        }

        let attribs = attribs.to_vec();
        let context =
            unsafe { (self.lib.eglCreateContext)(self.display, config, NO_CONTEXT, attribs.as_ptr()) };
        if context == NO_CONTEXT {
            return Err(Self::call_failed(&self.lib, "eglCreateContext"));
        }
        log::debug!("created egl context");

        Ok(Context {
            conn: self,
            context,
        })
    }

    pub fn create_window_surface(
        &self,
        config: EGLConfig,
        wsi: Wsi,
        attribs: &Attribs,
    ) -> Result<Surface<'_>, Error> {
        let attribs = attribs.to_vec();
        let surface = unsafe {
            (self.lib.eglCreateWindowSurface)(
                self.display,
                config,
                wsi.as_native_window(),
                attribs.as_ptr(),
            )
        };
        if surface == NO_SURFACE {
            return Err(Self::call_failed(&self.lib, "eglCreateWindowSurface"));
        }
        log::debug!("created egl window surface");

        Ok(Surface {
            conn: self,
            surface,
            _wsi: Some(wsi),
        })
    }

    pub fn create_pbuffer_surface(
        &self,
        config: EGLConfig,
        width: EGLint,
        height: EGLint,
    ) -> Result<Surface<'_>, Error> {
        let mut attribs = Attribs::new();
        attribs.push(WIDTH, width).push(HEIGHT, height);
        let attribs = attribs.to_vec();
        let surface =
            unsafe { (self.lib.eglCreatePbufferSurface)(self.display, config, attribs.as_ptr()) };
        if surface == NO_SURFACE {
            return Err(Self::call_failed(&self.lib, "eglCreatePbufferSurface"));
        }
        log::debug!("created egl pbuffer surface");

        Ok(Surface {
            conn: self,
            surface,
            _wsi: None,
        })
    }

    pub fn query_surface(&self, surface: &Surface, attribute: EGLint) -> Result<EGLint, Error> {
        let mut value = 0;
        if unsafe {
            (self.lib.eglQuerySurface)(self.display, surface.surface, attribute, &mut value)
        } == FALSE
        {
            return Err(Self::call_failed(&self.lib, "eglQuerySurface"));
        }
        Ok(value)
    }

    pub fn make_current(&self, surface: &Surface, context: &Context) -> Result<(), Error> {
        if unsafe {
            (self.lib.eglMakeCurrent)(
                self.display,
                surface.surface,
                surface.surface,
                context.context,
            )
        } == FALSE
        {
            return Err(Self::call_failed(&self.lib, "eglMakeCurrent"));
        }
        Ok(())
    }

    pub fn swap_buffers(&self, surface: &Surface) -> Result<(), Error> {
        if unsafe { (self.lib.eglSwapBuffers)(self.display, surface.surface) } == FALSE {
            return Err(Self::call_failed(&self.lib, "eglSwapBuffers"));
        }
        Ok(())
    }

    pub fn get_proc_address(&self, procname: &CStr) -> *mut c_void {
        unsafe { (self.lib.eglGetProcAddress)(procname.as_ptr()) }
    }
}
