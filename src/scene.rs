use std::{error, fmt};

use gles::{Adapter, GLenum, GLfloat, GLuint};

pub const VERTEX_SHADER_SOURCE: &str = "\
attribute vec4 aPosition;
attribute vec4 aColor;
varying vec4 vColor;
void main() {
    vColor = aColor;
    gl_Position = aPosition;
}
";

pub const FRAGMENT_SHADER_SOURCE: &str = "\
precision mediump float;
varying vec4 vColor;
void main() {
    gl_FragColor = vColor;
}
";

pub const POSITION_LOCATION: GLuint = 0;
pub const COLOR_LOCATION: GLuint = 1;

#[rustfmt::skip]
pub static POSITIONS: [GLfloat; 9] = [
     0.0,  0.5, 0.0,
    -0.5, -0.5, 0.0,
     0.5, -0.5, 0.0,
];

// NOTE: attribute 1 reads these as three rgba colors: (1 0 0 1) (0 1 0 1) (0 0 1 1).
#[rustfmt::skip]
pub static COLORS: [GLfloat; 12] = [
    1.0, 0.0, 0.0,
    1.0, 0.0, 1.0,
    0.0, 1.0, 0.0,
    0.0, 1.0, 1.0,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_type(self) -> GLenum {
        match self {
            Self::Vertex => gles::VERTEX_SHADER,
            Self::Fragment => gles::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        })
    }
}

#[derive(Debug)]
pub enum Error {
    CouldNotCreateShader(ShaderStage),
    InvalidShaderSource(ShaderStage),
    CouldNotCompileShader {
        stage: ShaderStage,
        info_log: String,
    },
    CouldNotCreateProgram,
    CouldNotLinkProgram {
        info_log: String,
    },
}

impl Error {
    pub fn info_log(&self) -> Option<&str> {
        match self {
            Self::CouldNotCompileShader { info_log, .. } | Self::CouldNotLinkProgram { info_log } => {
                (!info_log.is_empty()).then_some(info_log.as_str())
            }
            _ => None,
        }
    }
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CouldNotCreateShader(stage) => write!(f, "could not create {stage} shader"),
            Self::InvalidShaderSource(stage) => write!(f, "invalid {stage} shader source"),
            Self::CouldNotCompileShader { stage, .. } => {
                write!(f, "{stage} shader compilation failed")
            }
            Self::CouldNotCreateProgram => f.write_str("could not create program"),
            Self::CouldNotLinkProgram { .. } => f.write_str("program linking failed"),
        }?;
        if let Some(info_log) = self.info_log() {
            write!(f, ": {}", info_log.trim_end())?;
        }
        Ok(())
    }
}

unsafe fn create_shader<A: Adapter>(
    gl: &A,
    stage: ShaderStage,
    source: &str,
) -> Result<A::Shader, Error> {
    unsafe {
        let shader = gl
            .create_shader(stage.gl_type())
            .map_err(|_| Error::CouldNotCreateShader(stage))?;
        if gl.shader_source(shader, source).is_err() {
            gl.delete_shader(shader);
            return Err(Error::InvalidShaderSource(stage));
        }
        gl.compile_shader(shader);

        if gl.get_shaderiv(shader, gles::COMPILE_STATUS) == gles::FALSE as gles::GLint {
            let info_log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(Error::CouldNotCompileShader { stage, info_log });
        }
        log::debug!("compiled {stage} shader");
        Ok(shader)
    }
}

unsafe fn create_program<A: Adapter>(gl: &A) -> Result<A::Program, Error> {
    unsafe {
        let vert_shader = create_shader(gl, ShaderStage::Vertex, VERTEX_SHADER_SOURCE)?;
        let frag_shader = match create_shader(gl, ShaderStage::Fragment, FRAGMENT_SHADER_SOURCE) {
            Ok(shader) => shader,
            Err(err) => {
                gl.delete_shader(vert_shader);
                return Err(err);
            }
        };

        let Ok(program) = gl.create_program() else {
            gl.delete_shader(vert_shader);
            gl.delete_shader(frag_shader);
            return Err(Error::CouldNotCreateProgram);
        };

        gl.attach_shader(program, vert_shader);
        gl.attach_shader(program, frag_shader);

        gl.bind_attrib_location(program, POSITION_LOCATION, c"aPosition");
        gl.bind_attrib_location(program, COLOR_LOCATION, c"aColor");

        gl.link_program(program);

        gl.detach_shader(program, vert_shader);
        gl.detach_shader(program, frag_shader);

        gl.delete_shader(vert_shader);
        gl.delete_shader(frag_shader);

        if gl.get_programiv(program, gles::LINK_STATUS) == gles::FALSE as gles::GLint {
            let info_log = gl.get_program_info_log(program);
            gl.delete_program(program);
            return Err(Error::CouldNotLinkProgram { info_log });
        }
        log::debug!("linked program");
        Ok(program)
    }
}

/// the linked program and its two client-side attribute arrays.
pub struct Triangle<A: Adapter> {
    program: A::Program,
}

impl<A: Adapter> Triangle<A> {
    /// compiles and links the program, makes it current and points the attributes at the static
    /// vertex data.
    pub unsafe fn new(gl: &A) -> Result<Self, Error> {
        unsafe {
            let program = create_program(gl)?;

            gl.use_program(Some(program));

            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.clear(gles::COLOR_BUFFER_BIT);

            gl.vertex_attrib_pointer(
                POSITION_LOCATION,
                3,
                gles::FLOAT,
                gles::FALSE,
                0,
                POSITIONS.as_ptr().cast(),
            );
            gl.enable_vertex_attrib_array(POSITION_LOCATION);
            gl.vertex_attrib_pointer(
                COLOR_LOCATION,
                4,
                gles::FLOAT,
                gles::FALSE,
                0,
                COLORS.as_ptr().cast(),
            );
            gl.enable_vertex_attrib_array(COLOR_LOCATION);

            Ok(Self { program })
        }
    }

    pub unsafe fn draw(&self, gl: &A) {
        unsafe { gl.draw_arrays(gles::TRIANGLES, 0, 3) };
    }

    pub unsafe fn destroy(self, gl: &A) {
        unsafe {
            gl.use_program(None);
            gl.delete_program(self.program);
        }
    }
}
