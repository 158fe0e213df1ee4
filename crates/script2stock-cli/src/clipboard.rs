//! Best-effort clipboard access

use anyhow::Context;

/// Destination for copied keyword phrases
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> anyhow::Result<()>;
}

/// The system clipboard
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> anyhow::Result<()> {
        // Opened lazily and kept alive: on X11 the selection is lost when the
        // owning handle is dropped.
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().context("Clipboard is not available")?,
        };
        let clipboard = self.inner.insert(clipboard);
        clipboard
            .set_text(text)
            .context("Failed to copy to clipboard")
    }
}
