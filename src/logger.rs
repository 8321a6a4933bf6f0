use std::fmt::Debug;

/// The logging capability used by [`Upgrader`](crate::Upgrader).
///
/// This is an injected dependency rather than a process-wide default: every
/// upgrader carries its own sink, and the default is [`NopLogger`]. Hosts
/// that already log through the `log` facade can pass [`StdLogger`].
pub trait Logger: Debug + Send + Sync {
    fn debug(&self, msg: &str);
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
}

/// A [`Logger`] that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NopLogger;

impl Logger for NopLogger {
    fn debug(&self, _: &str) {}
    fn info(&self, _: &str) {}
    fn warn(&self, _: &str) {}
    fn error(&self, _: &str) {}
}

/// A [`Logger`] that forwards to the `log` crate macros.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdLogger;

impl Logger for StdLogger {
    fn debug(&self, msg: &str) {
        log::debug!("{msg}");
    }

    fn info(&self, msg: &str) {
        log::info!("{msg}");
    }

    fn warn(&self, msg: &str) {
        log::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        log::error!("{msg}");
    }
}
