//! 日志输出
//!
//! 通过 `log` 门面记录日志；在浏览器中转发到 `console.*`，
//! 其他目标（测试）不安装 logger，日志被丢弃。

use log::LevelFilter;

#[cfg(target_arch = "wasm32")]
mod console {
    use log::{Level, Log, Metadata, Record};

    pub struct ConsoleLogger;

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let line = format!("[{}] {}", record.target(), record.args());
            let msg = wasm_bindgen::JsValue::from_str(&line);
            match record.level() {
                Level::Error => web_sys::console::error_1(&msg),
                Level::Warn => web_sys::console::warn_1(&msg),
                Level::Info => web_sys::console::log_1(&msg),
                Level::Debug | Level::Trace => web_sys::console::debug_1(&msg),
            }
        }

        fn flush(&self) {}
    }

    pub static LOGGER: ConsoleLogger = ConsoleLogger;
}

/// 安装浏览器控制台 logger，重复调用无副作用
pub fn init(level: LevelFilter) {
    #[cfg(target_arch = "wasm32")]
    {
        if log::set_logger(&console::LOGGER).is_ok() {
            log::set_max_level(level);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = level;
    }
}
