/// # Logger
/// Sink for the interpreter's diagnostic messages.
///
/// The interpreter never logs through process-wide state of its own; it is handed a `Logger`
/// at construction and the host decides where messages end up.
pub trait Logger {
    fn info(&self, message: &str);
    fn debug(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Forwards messages to `tracing` under the `emu8` target.
///
/// Nothing is emitted unless the host installs a subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(target: "emu8", "{}", message);
    }

    fn debug(&self, message: &str) {
        tracing::debug!(target: "emu8", "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "emu8", "{}", message);
    }
}
