use crate::scene;

/// one-line diagnostic printed to stdout when the run fails.
///
/// egl failures print the error string and code `eglGetError` reported at the failing call,
/// anything else prints the error chain.
pub fn failure_line(err: &anyhow::Error) -> String {
    let egl_code = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<egl::Error>())
        .and_then(egl::Error::code);
    match egl_code {
        Some(code) => code.to_string(),
        None => format!("{err:#}"),
    }
}

/// compiler/linker output belongs on stderr, next to the failure message.
pub fn info_log(err: &anyhow::Error) -> Option<&str> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<scene::Error>())
        .and_then(scene::Error::info_log)
}
