//! Route `tracing` output to the browser console.

use std::io;

use tracing_subscriber::filter::LevelFilter;

/// Buffers one formatted event and hands it to `console.log` when dropped.
#[derive(Default)]
struct ConsoleWriter {
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim_end();
        if !line.is_empty() {
            web_sys::console::log_1(&line.into());
        }
    }
}

fn default_level() -> LevelFilter {
    if cfg!(debug_assertions) { LevelFilter::DEBUG } else { LevelFilter::INFO }
}

/// Install the console subscriber. Calling it twice is harmless.
pub fn init() {
    let result = tracing_subscriber::fmt()
        .with_writer(ConsoleWriter::default)
        .with_max_level(default_level())
        .without_time()
        .with_target(false)
        .try_init();
    if result.is_ok() {
        tracing::debug!("console logging ready");
    }
}
