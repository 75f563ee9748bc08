use tracing::debug;

/// Display error in a user-friendly format without stack traces.
///
/// The context chain is joined on one line, e.g.
/// `render failed: failed to read config.toml: No such file or directory`.
pub fn display_user_error(prefix: &str, err: &anyhow::Error) {
    debug!("{prefix}: {err:?}");
    eprintln!("{}", user_message(prefix, err));
}

/// Format an error the way [`display_user_error`] prints it
pub fn user_message(prefix: &str, err: &anyhow::Error) -> String {
    format!("{prefix}: {err:#}")
}
