//! System clipboard via `arboard`.

use super::{ClipboardError, ClipboardWriter};

/// Opens the platform clipboard for each write.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard {
    /// On Linux, block until another client takes clipboard ownership so the
    /// text survives process exit. Ignored elsewhere.
    ///
    /// X11 and Wayland clipboards are served by the owning process. Without
    /// `wait` the text disappears when the process exits unless a clipboard
    /// manager has taken a copy.
    pub wait: bool,
}

impl SystemClipboard {
    pub fn new(wait: bool) -> Self {
        Self { wait }
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = arboard::Clipboard::new().map_err(ClipboardError::Unavailable)?;
        set_text(&mut clipboard, text, self.wait).map_err(ClipboardError::Write)
    }
}

#[cfg(target_os = "linux")]
fn set_text(clipboard: &mut arboard::Clipboard, text: &str, wait: bool) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    if wait {
        clipboard.set().wait().text(text.to_string())
    } else {
        clipboard.set_text(text.to_string())
    }
}

#[cfg(not(target_os = "linux"))]
fn set_text(clipboard: &mut arboard::Clipboard, text: &str, _wait: bool) -> Result<(), arboard::Error> {
    clipboard.set_text(text.to_string())
}
