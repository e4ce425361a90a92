//! Global log stream instance.

use crate::logging::LogStream;

/// Status log for the whole firmware.
///
/// Producer: the trigger loop (and startup code before it).
/// Consumer: the serial drain task.
pub static STATUS_LOG: LogStream = LogStream::new();
