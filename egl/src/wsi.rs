use std::ffi::{c_int, c_ulong, c_void};

use anyhow::anyhow;

use crate::libegl::EGLNativeWindowType;
use crate::libwayland_egl;

// NOTE: wsi stands for window system integration; it is somewhat modelled after
// https://registry.khronos.org/vulkan/specs/latest/html/vkspec.html#wsi

/// native window of the mali fbdev egl driver (`fbdev_window` in its headers). the driver reads
/// it through the pointer handed to eglCreateWindowSurface, it must outlive the surface.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FbdevWindow {
    pub width: u16,
    pub height: u16,
}

pub struct WaylandWsi {
    lib: libwayland_egl::Lib,
    wl_egl_window: *mut libwayland_egl::wl_egl_window,
}

impl WaylandWsi {
    fn new(wl_surface: *mut c_void, width: u32, height: u32) -> anyhow::Result<Self> {
        let lib = libwayland_egl::Lib::load()?;
        let wl_egl_window =
            unsafe { (lib.wl_egl_window_create)(wl_surface, width as c_int, height as c_int) };
        if wl_egl_window.is_null() {
            return Err(anyhow!("could not create wl egl window"));
        }
        Ok(Self { lib, wl_egl_window })
    }
}

impl Drop for WaylandWsi {
    fn drop(&mut self) {
        unsafe { (self.lib.wl_egl_window_destroy)(self.wl_egl_window) };
    }
}

pub enum Wsi {
    Fbdev(Box<FbdevWindow>),
    Wayland(WaylandWsi),
    /// xlib `Window` id; the x connection is owned by whoever created the window.
    Xlib(c_ulong),
}

impl Wsi {
    pub fn fbdev(width: u16, height: u16) -> Self {
        Self::Fbdev(Box::new(FbdevWindow { width, height }))
    }

    pub fn from_wayland_surface(
        wl_surface: *mut c_void,
        width: u32,
        height: u32,
    ) -> anyhow::Result<Self> {
        assert!(width > 0);
        assert!(height > 0);
        WaylandWsi::new(wl_surface, width, height).map(Self::Wayland)
    }

    pub fn from_xlib_window(window: c_ulong) -> Self {
        Self::Xlib(window)
    }

    pub fn as_native_window(&self) -> EGLNativeWindowType {
        match self {
            Self::Fbdev(window) => {
                let ptr: *const FbdevWindow = &**window;
                ptr.cast_mut().cast()
            }
            Self::Wayland(wayland) => wayland.wl_egl_window.cast(),
            Self::Xlib(window) => *window as usize as EGLNativeWindowType,
        }
    }
}
