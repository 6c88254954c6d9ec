use tracing::warn;

/// Surfaces a failed route cycle to the user.
///
/// Implementations must not touch the map.
pub trait ErrorReporter {
    fn report(&mut self, message: &str);
}

/// Reporter for hosts without a UI: the message only goes to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&mut self, message: &str) {
        warn!("{message}");
    }
}

impl<F> ErrorReporter for F
where
    F: FnMut(&str),
{
    fn report(&mut self, message: &str) {
        self(message)
    }
}
