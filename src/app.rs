use std::ops::ControlFlow;

use anyhow::Context as _;
use gles::Adapter as _;

use crate::config::{Config, Platform};
use crate::fade::Fade;
use crate::render::{FrameLoop, Presenter, Summary, Viewport};
use crate::scene::Triangle;
use crate::window::{DemoWindow, NativeHandles};

/// what the egl surface is created on.
enum Target {
    Window(egl::Wsi),
    Pbuffer { width: egl::EGLint, height: egl::EGLint },
}

impl Target {
    fn surface_type(&self, platform: Platform) -> egl::EGLint {
        match (self, platform) {
            (Self::Pbuffer { .. }, _) => egl::PBUFFER_BIT,
            (Self::Window(_), Platform::Fbdev) => egl::WINDOW_BIT | egl::PIXMAP_BIT,
            // NOTE: wayland has no pixmaps, asking for them leaves no configs to choose from.
            (Self::Window(_), _) => egl::WINDOW_BIT,
        }
    }
}

fn config_attribs(config: &Config, surface_type: egl::EGLint) -> egl::Attribs {
    let mut attribs = egl::Attribs::new();
    attribs
        .push(egl::RED_SIZE, 5)
        .push(egl::GREEN_SIZE, 6)
        .push(egl::BLUE_SIZE, 5)
        .push(egl::ALPHA_SIZE, 0)
        .push(egl::BUFFER_SIZE, 16)
        .push(egl::STENCIL_SIZE, 0)
        .push(egl::DEPTH_SIZE, 0)
        .push(egl::SAMPLES, config.samples)
        .push(egl::RENDERABLE_TYPE, egl::OPENGL_ES2_BIT)
        .push(egl::SURFACE_TYPE, surface_type);
    attribs
}

fn context_attribs() -> egl::Attribs {
    let mut attribs = egl::Attribs::new();
    attribs.push(egl::CONTEXT_CLIENT_VERSION, 2);
    attribs
}

struct EglPresenter<'a, 'conn> {
    conn: &'a egl::Connection,
    surface: &'a egl::Surface<'conn>,
    window: Option<&'a mut DemoWindow>,
}

impl Presenter for EglPresenter<'_, '_> {
    fn present(&mut self) -> anyhow::Result<ControlFlow<()>> {
        self.conn.swap_buffers(self.surface)?;
        match self.window {
            Some(ref mut window) => window.pump_events(),
            None => Ok(ControlFlow::Continue(())),
        }
    }
}

/// initializes egl on the configured platform, renders the fade and tears everything down.
pub fn run(config: &Config) -> anyhow::Result<Summary> {
    match config.platform {
        Platform::Fbdev => {
            let target = Target::Window(egl::Wsi::fbdev(config.width, config.height));
            render(config, egl::DEFAULT_DISPLAY, target, None)
        }
        Platform::Pbuffer => {
            let target = Target::Pbuffer {
                width: config.width.into(),
                height: config.height.into(),
            };
            render(config, egl::DEFAULT_DISPLAY, target, None)
        }
        Platform::Window => {
            let mut window = DemoWindow::new(config.width, config.height)?;
            let (native_display, wsi) = match window.native_handles()? {
                NativeHandles::Wayland {
                    wl_display,
                    wl_surface,
                } => {
                    let (width, height) = window.physical_size()?;
                    let wsi = egl::Wsi::from_wayland_surface(wl_surface, width, height)
                        .map_err(egl::Error::CouldNotCreateWsi)?;
                    (wl_display, wsi)
                }
                NativeHandles::Xlib { display, window } => {
                    (display, egl::Wsi::from_xlib_window(window))
                }
            };
            render(config, native_display, Target::Window(wsi), Some(&mut window))
        }
    }
}

fn render(
    config: &Config,
    native_display: egl::EGLNativeDisplayType,
    target: Target,
    window: Option<&mut DemoWindow>,
) -> anyhow::Result<Summary> {
    let conn = egl::Connection::open(native_display).context("could not open egl display")?;

    println!("EGL Version: \"{}\"", conn.query_string(egl::VERSION)?);
    println!("EGL Vendor: \"{}\"", conn.query_string(egl::VENDOR)?);
    log::debug!("egl client apis: {}", conn.query_string(egl::CLIENT_APIS)?);
    log::trace!("egl extensions: {}", conn.query_string(egl::EXTENSIONS)?);

    let egl_config = conn
        .choose_config(&config_attribs(config, target.surface_type(config.platform)))
        .context("could not choose egl config")?;

    let context = conn
        .create_context(egl_config, &context_attribs())
        .context("could not create egl context")?;

    let surface = match target {
        Target::Window(wsi) => {
            conn.create_window_surface(egl_config, wsi, &egl::Attribs::new())
        }
        Target::Pbuffer { width, height } => {
            conn.create_pbuffer_surface(egl_config, width, height)
        }
    }
    .context("could not create egl surface")?;

    let width = conn.query_surface(&surface, egl::WIDTH)?;
    let height = conn.query_surface(&surface, egl::HEIGHT)?;
    println!("Surface size: {width}x{height}");

    conn.make_current(&surface, &context)
        .context("could not make egl context current")?;

    let gl = gles::Lib::load(|name| conn.get_proc_address(name))
        .context("could not load gles")?;
    unsafe {
        println!("GL Vendor: \"{}\"", gl.get_string(gles::VENDOR)?);
        println!("GL Renderer: \"{}\"", gl.get_string(gles::RENDERER)?);
        println!("GL Version: \"{}\"", gl.get_string(gles::VERSION)?);
        log::debug!(
            "glsl version: {}",
            gl.get_string(gles::SHADING_LANGUAGE_VERSION)?
        );
    }

    let triangle = unsafe { Triangle::new(&*gl) }.context("could not build triangle")?;

    let frame_loop = FrameLoop {
        fade: Fade::new(config.step, config.cycles),
        viewport: Viewport { width, height },
        frame_interval: config.frame_interval,
    };
    let mut presenter = EglPresenter {
        conn: &conn,
        surface: &surface,
        window,
    };
    let summary = unsafe { frame_loop.run(&*gl, &triangle, &mut presenter) };

    unsafe {
        if let Some(err) = gl.get_error() {
            log::warn!("gl error 0x{err:x} pending at exit");
        }
        triangle.destroy(&*gl);
    }

    summary
}
