//! Serial console output for the status log.
//!
//! The collar has no display: status lines go to the USB serial console
//! at 115200 baud. On ESP-IDF, stdout is that console.
//!
//! Format: `[timestamp_us] LEVEL: message`

use std::io::{self, Write};
use std::time::Duration;

use crate::logging::{BufWriter, LogEntry, LogStream};

/// Interval between dropped-message reports.
const DROPPED_REPORT_INTERVAL_US: i64 = 10_000_000;

/// Sleep when the log is empty.
const IDLE_SLEEP: Duration = Duration::from_millis(10);

/// Format log entry into `buf`, newline-terminated.
///
/// Returns the number of bytes written.
pub fn format_log_entry(entry: &LogEntry, buf: &mut [u8]) -> usize {
    use core::fmt::Write as _;

    let mut writer = BufWriter { buf, pos: 0 };

    let _ = writeln!(
        writer,
        "[{:10}] {}: {}",
        entry.timestamp_us,
        entry.level.as_str(),
        entry.message()
    );

    writer.pos
}

/// Write every pending entry to `out`.
///
/// Returns the number of entries written.
pub fn drain_to<const N: usize, W: Write>(stream: &LogStream<N>, out: &mut W) -> io::Result<usize> {
    let mut format_buf = [0u8; 160];
    let mut count = 0;

    while let Some(entry) = stream.drain() {
        let len = format_log_entry(&entry, &mut format_buf);
        out.write_all(&format_buf[..len])?;
        count += 1;
    }

    if count > 0 {
        out.flush()?;
    }
    Ok(count)
}

/// Report and reset the dropped counter, if non-zero.
pub fn report_dropped<const N: usize, W: Write>(
    stream: &LogStream<N>,
    out: &mut W,
) -> io::Result<()> {
    let dropped = stream.dropped();
    if dropped > 0 {
        writeln!(out, "[WARN] Dropped: {}", dropped)?;
        stream.reset_dropped();
    }
    Ok(())
}

/// Log drain task. Runs on its own thread, never returns.
///
/// Console write errors are ignored: there is nowhere else to report them.
pub fn drain_task<const N: usize, W: Write>(
    stream: &LogStream<N>,
    mut out: W,
    clock: fn() -> i64,
) -> ! {
    let mut last_dropped_report = clock();

    loop {
        let written = drain_to(stream, &mut out).unwrap_or(0);

        let now = clock();
        if now - last_dropped_report > DROPPED_REPORT_INTERVAL_US {
            let _ = report_dropped(stream, &mut out);
            last_dropped_report = now;
        }

        if written == 0 {
            std::thread::sleep(IDLE_SLEEP);
        }
    }
}
