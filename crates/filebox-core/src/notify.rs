//! User-facing notifications (toast-style success/error messages).

use std::io::Write;

pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn success(&self, message: &str) {
        (**self).success(message)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }
}

/// Prints successes to stdout and errors to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        let _ = writeln!(std::io::stdout().lock(), "{}", message);
    }

    fn error(&self, message: &str) {
        let _ = writeln!(std::io::stderr().lock(), "{}", message);
    }
}
