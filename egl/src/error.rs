use std::{error, fmt};

use crate::libegl::*;

/// value returned by `eglGetError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode(pub EGLint);

impl ErrorCode {
    pub fn name(self) -> &'static str {
        match self.0 {
            SUCCESS => "EGL_SUCCESS",
            NOT_INITIALIZED => "EGL_NOT_INITIALIZED",
            BAD_ACCESS => "EGL_BAD_ACCESS",
            BAD_ALLOC => "EGL_BAD_ALLOC",
            BAD_ATTRIBUTE => "EGL_BAD_ATTRIBUTE",
            BAD_CONFIG => "EGL_BAD_CONFIG",
            BAD_CONTEXT => "EGL_BAD_CONTEXT",
            BAD_CURRENT_SURFACE => "EGL_BAD_CURRENT_SURFACE",
            BAD_DISPLAY => "EGL_BAD_DISPLAY",
            BAD_MATCH => "EGL_BAD_MATCH",
            BAD_NATIVE_PIXMAP => "EGL_BAD_NATIVE_PIXMAP",
            BAD_NATIVE_WINDOW => "EGL_BAD_NATIVE_WINDOW",
            BAD_PARAMETER => "EGL_BAD_PARAMETER",
            BAD_SURFACE => "EGL_BAD_SURFACE",
            CONTEXT_LOST => "EGL_CONTEXT_LOST",
            _ => "unknown EGL error",
        }
    }

    // - https://registry.khronos.org/EGL/sdk/docs/man/html/eglGetError.xhtml
    pub fn description(self) -> &'static str {
        match self.0 {
            SUCCESS => "the last function succeeded without error",
            NOT_INITIALIZED => {
                "EGL is not initialized, or could not be initialized, for the specified display"
            }
            BAD_ACCESS => "EGL cannot access a requested resource",
            BAD_ALLOC => "EGL failed to allocate resources for the requested operation",
            BAD_ATTRIBUTE => "an unrecognized attribute or attribute value was passed",
            BAD_CONFIG => "an EGLConfig argument does not name a valid EGL frame buffer config",
            BAD_CONTEXT => "an EGLContext argument does not name a valid EGL rendering context",
            BAD_CURRENT_SURFACE => "the current surface of the calling thread is no longer valid",
            BAD_DISPLAY => "an EGLDisplay argument does not name a valid EGL display connection",
            BAD_MATCH => "arguments are inconsistent",
            BAD_NATIVE_PIXMAP => "a native pixmap argument does not refer to a valid native pixmap",
            BAD_NATIVE_WINDOW => "a native window argument does not refer to a valid native window",
            BAD_PARAMETER => "one or more argument values are invalid",
            BAD_SURFACE => "an EGLSurface argument does not name a valid surface",
            CONTEXT_LOST => "a power management event has occurred, the context must be recreated",
            _ => "the error code is not defined by EGL 1.4",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} (0x{:04x})",
            self.name(),
            self.description(),
            self.0
        )
    }
}

#[derive(Debug)]
pub enum Error {
    CouldNotLoadEgl(anyhow::Error),
    /// the named call returned its failure sentinel; `code` is what `eglGetError` reported right
    /// after.
    CallFailed {
        call: &'static str,
        code: ErrorCode,
    },
    NoMatchingConfig,
    CouldNotCreateWsi(anyhow::Error),
}

impl Error {
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::CallFailed { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::CouldNotLoadEgl(err) | Self::CouldNotCreateWsi(err) => {
                Some(AsRef::<dyn error::Error>::as_ref(err))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CouldNotLoadEgl(_) => f.write_str("could not load egl"),
            Self::CallFailed { call, code } => write!(f, "{call} failed: {code}"),
            Self::NoMatchingConfig => f.write_str("could not choose config (no compatible ones)"),
            Self::CouldNotCreateWsi(_) => f.write_str("could not create native window"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_egl_14_code_has_a_name() {
        for code in SUCCESS..=CONTEXT_LOST {
            let code = ErrorCode(code);
            assert!(code.name().starts_with("EGL_"), "{code:?}");
            assert!(!code.description().is_empty());
        }
    }

    #[test]
    fn unknown_code() {
        let code = ErrorCode(0x1234);
        assert_eq!(code.name(), "unknown EGL error");
        assert_eq!(
            code.to_string(),
            "unknown EGL error, the error code is not defined by EGL 1.4 (0x1234)"
        );
    }

    #[test]
    fn call_failed_display() {
        let err = Error::CallFailed {
            call: "eglInitialize",
            code: ErrorCode(NOT_INITIALIZED),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("eglInitialize failed: EGL_NOT_INITIALIZED"));
        assert!(msg.ends_with("(0x3001)"));
        assert_eq!(err.code(), Some(ErrorCode(NOT_INITIALIZED)));
        assert_eq!(Error::NoMatchingConfig.code(), None);
    }
}
