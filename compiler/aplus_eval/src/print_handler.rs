//! Destination of the `print` primitive.
//!
//! Hosts choose where printed values go: the process stdout, an in-memory
//! buffer (embedding and tests), or nowhere.

use std::sync::Arc;

use parking_lot::Mutex;

/// Where printed text goes.
pub enum PrintHandler {
    Stdout,
    /// Accumulates text for later retrieval.
    Buffer(Mutex<String>),
    Silent,
}

impl PrintHandler {
    /// Emit one line of output.
    pub fn println(&self, line: &str) {
        match self {
            Self::Stdout => println!("{line}"),
            Self::Buffer(buffer) => {
                let mut buffer = buffer.lock();
                buffer.push_str(line);
                buffer.push('\n');
            }
            Self::Silent => {}
        }
    }

    /// Everything captured so far; empty unless buffering.
    pub fn output(&self) -> String {
        match self {
            Self::Buffer(buffer) => buffer.lock().clone(),
            Self::Stdout | Self::Silent => String::new(),
        }
    }

    /// Discard captured output.
    pub fn clear(&self) {
        if let Self::Buffer(buffer) = self {
            buffer.lock().clear();
        }
    }
}

/// Print handler shared between a runtime and its host, which reads the
/// buffer while the runtime holds a handle.
pub type SharedPrintHandler = Arc<PrintHandler>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Stdout)
}

/// A handler that captures output for later inspection.
pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Buffer(Mutex::new(String::new())))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Silent)
}
