use std::ops::ControlFlow;
use std::thread;
use std::time::Duration;

use gles::{Adapter, GLsizei};

use crate::fade::Fade;
use crate::scene::Triangle;

/// puts a finished frame on screen.
pub trait Presenter {
    /// `Break` means the target went away (e.g. the window was closed) and no more frames should
    /// be rendered.
    fn present(&mut self) -> anyhow::Result<ControlFlow<()>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: GLsizei,
    pub height: GLsizei,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub frames: u32,
    pub cycles: u32,
    pub interrupted: bool,
}

pub struct FrameLoop {
    pub fade: Fade,
    pub viewport: Viewport,
    pub frame_interval: Duration,
}

impl FrameLoop {
    /// renders until the fade runs out of cycles, then clears to black.
    pub unsafe fn run<A: Adapter, P: Presenter>(
        self,
        gl: &A,
        triangle: &Triangle<A>,
        presenter: &mut P,
    ) -> anyhow::Result<Summary> {
        let Self {
            mut fade,
            viewport,
            frame_interval,
        } = self;
        let total_cycles = fade.remaining_cycles();
        let mut summary = Summary::default();

        while let Some(intensity) = fade.next() {
            unsafe {
                gl.clear_color(intensity, intensity, intensity, 1.0);
                gl.viewport(0, 0, viewport.width, viewport.height);
                gl.clear(gles::COLOR_BUFFER_BIT);
                triangle.draw(gl);
            }
            summary.frames += 1;

            let flow = presenter.present()?;

            let cycles = total_cycles - fade.remaining_cycles();
            if cycles != summary.cycles {
                summary.cycles = cycles;
                log::debug!("completed fade cycle {cycles}/{total_cycles}");
            }

            if flow.is_break() {
                log::info!("presentation target closed after {} frames", summary.frames);
                summary.interrupted = true;
                break;
            }

            if !frame_interval.is_zero() {
                thread::sleep(frame_interval);
            }
        }

        unsafe {
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.clear(gles::COLOR_BUFFER_BIT);
        }

        Ok(summary)
    }
}
