// Console logging and small display helpers.
use std::io::{self, Write};

use tracing::level_filters::LevelFilter;
use wasm_bindgen::JsValue;

pub fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

/// Collects one formatted tracing event and prints it to the browser
/// console when the subscriber drops it.
#[derive(Default)]
pub struct ConsoleWriter {
    buf: Vec<u8>,
}

impl Write for ConsoleWriter {
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
        if self.buf.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buf);
        clog(line.trim_end());
    }
}

pub fn init_logging(level: LevelFilter) {
    // try_init: a second call (hot reload) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_writer(ConsoleWriter::default)
        .with_max_level(level)
        .without_time()
        .with_target(false)
        .try_init();
}

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

pub fn format_zoom(zoom: f64) -> String {
    format!("{:.0}%", zoom * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_label_is_whole_percent() {
        assert_eq!(format_zoom(1.0), "100%");
        assert_eq!(format_zoom(1.0 / 1.1), "91%");
        assert_eq!(format_zoom(0.1), "10%");
    }
}
