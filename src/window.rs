use std::ops::ControlFlow;
use std::time::Duration;

use anyhow::{Context as _, anyhow};
use raw_window_handle::{self as rwh, HasDisplayHandle as _, HasWindowHandle as _};
use winit::platform::pump_events::{EventLoopExtPumpEvents as _, PumpStatus};

struct App {
    logical_size: (u16, u16),

    window: Option<winit::window::Window>,
    window_create_error: Option<winit::error::OsError>,
    close_requested: bool,
}

impl winit::application::ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = winit::window::Window::default_attributes()
            .with_title("trifade")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.logical_size.0 as f64,
                self.logical_size.1 as f64,
            ))
            .with_resizable(false);
        match event_loop.create_window(window_attrs) {
            Ok(window) => {
                log::info!("created winit window");
                self.window = Some(window);
            }
            Err(err) => self.window_create_error = Some(err),
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: winit::window::WindowId,
        window_event: winit::event::WindowEvent,
    ) {
        use winit::event::WindowEvent::*;
        match window_event {
            CloseRequested => self.close_requested = true,
            Resized(physical_size) => {
                log::debug!(
                    "window resized to {}x{}",
                    physical_size.width,
                    physical_size.height
                );
            }
            other => log::trace!("unused window event: {other:?}"),
        }
    }
}

/// desktop window driven by winit's pump-events api, so that the fixed frame loop stays in charge.
pub struct DemoWindow {
    event_loop: winit::event_loop::EventLoop<()>,
    app: App,
}

/// native handles egl needs to put a surface on the window.
pub enum NativeHandles {
    Wayland {
        wl_display: *mut std::ffi::c_void,
        wl_surface: *mut std::ffi::c_void,
    },
    Xlib {
        display: *mut std::ffi::c_void,
        window: std::ffi::c_ulong,
    },
}

impl DemoWindow {
    pub fn new(width: u16, height: u16) -> anyhow::Result<Self> {
        let mut this = Self {
            event_loop: winit::event_loop::EventLoop::new()?,
            app: App {
                logical_size: (width, height),

                window: None,
                window_create_error: None,
                close_requested: false,
            },
        };

        // NOTE: the window gets created once the event loop delivers `resumed`.
        this.pump(None)?;
        if let Some(err) = this.app.window_create_error.take() {
            return Err(err).context("could not create window");
        }
        if this.app.window.is_none() {
            return Err(anyhow!("event loop did not resume"));
        }

        Ok(this)
    }

    fn pump(&mut self, timeout: Option<Duration>) -> anyhow::Result<()> {
        match self.event_loop.pump_app_events(timeout, &mut self.app) {
            PumpStatus::Exit(code) => Err(anyhow!("unexpected exit (code {code})")),
            PumpStatus::Continue => Ok(()),
        }
    }

    /// dispatches pending events without blocking.
    pub fn pump_events(&mut self) -> anyhow::Result<ControlFlow<()>> {
        self.pump(Some(Duration::ZERO))?;
        if self.app.close_requested {
            Ok(ControlFlow::Break(()))
        } else {
            Ok(ControlFlow::Continue(()))
        }
    }

    fn window(&self) -> anyhow::Result<&winit::window::Window> {
        self.app.window.as_ref().context("window is unavailable")
    }

    pub fn physical_size(&self) -> anyhow::Result<(u32, u32)> {
        let inner_size = self.window()?.inner_size();
        Ok((inner_size.width.max(1), inner_size.height.max(1)))
    }

    pub fn native_handles(&self) -> anyhow::Result<NativeHandles> {
        let window = self.window()?;
        let display_handle = window
            .display_handle()
            .context("display handle is unavailable")?;
        let window_handle = window
            .window_handle()
            .context("window handle is unavailable")?;

        match (display_handle.as_raw(), window_handle.as_raw()) {
            (rwh::RawDisplayHandle::Wayland(display), rwh::RawWindowHandle::Wayland(window)) => {
                Ok(NativeHandles::Wayland {
                    wl_display: display.display.as_ptr(),
                    wl_surface: window.surface.as_ptr(),
                })
            }
            (rwh::RawDisplayHandle::Xlib(display), rwh::RawWindowHandle::Xlib(window)) => {
                let display = display
                    .display
                    .context("xlib display handle carries no display")?;
                Ok(NativeHandles::Xlib {
                    display: display.as_ptr(),
                    window: window.window,
                })
            }
            (display, window) => Err(anyhow!(
                "unsupported window system (display handle: {display:?}, window handle: {window:?})"
            )),
        }
    }
}
