//! Logger bootstrap for the command line front end.
//!
//! The library only emits through the `log` facade; a binary calls
//! [`init_logging`] once to route records to stderr. `RUST_LOG` overrides the
//! configured level when set.

use flexi_logger::{Logger, LoggerHandle};
use log::debug;
use once_cell::sync::OnceCell;

use crate::error::KalimbaError;

static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

/// Start stderr logging at `level`. Repeated calls are no-ops.
pub fn init_logging(level: &str) -> Result<(), KalimbaError> {
    let level = normalize_level(level)?;

    LOGGER.get_or_try_init(|| {
        Logger::try_with_env_or_str(level)
            .map_err(|e| KalimbaError::Logging(format!("invalid log level `{}`: {}", level, e)))?
            .log_to_stderr()
            .format(flexi_logger::default_format)
            .start()
            .map_err(|e| KalimbaError::Logging(e.to_string()))
    })?;

    debug!(
        "event=logging_init module=logging status=ok level={} version={}",
        level,
        env!("CARGO_PKG_VERSION")
    );
    Ok(())
}

fn normalize_level(level: &str) -> Result<&'static str, KalimbaError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => Err(KalimbaError::Logging(format!(
            "unsupported log level `{}`; expected trace|debug|info|warn|error|off",
            other
        ))),
    }
}
