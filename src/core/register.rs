//! Single-slot yank register.
//!
//! Every yank and every delete overwrites the slot (deletes yank too).
//! Unlike a kill ring there is no rotation and no append.

/// Maximum size of a single register entry (10 MB)
const MAX_REGISTER_SIZE: usize = 10 * 1024 * 1024;

/// Last yanked or deleted text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YankRegister {
    text: String,
    linewise: bool,
}

impl YankRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the register.
    /// Oversized text is dropped and the previous contents kept.
    pub fn store(&mut self, text: impl Into<String>, linewise: bool) {
        let text = text.into();
        if text.len() > MAX_REGISTER_SIZE {
            log::warn!("register: dropping {} byte yank", text.len());
            return;
        }
        self.text = text;
        self.linewise = linewise;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_linewise(&self) -> bool {
        self.linewise
    }

    /// A characterwise empty register counts as empty; an empty linewise yank
    /// (from `yy` on a blank line) still pastes a line.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && !self.linewise
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_overwrites() {
        let mut reg = YankRegister::new();
        assert!(reg.is_empty());

        reg.store("hello", false);
        assert_eq!(reg.text(), "hello");
        assert!(!reg.is_linewise());

        reg.store("line2", true);
        assert_eq!(reg.text(), "line2");
        assert!(reg.is_linewise());
    }

    #[test]
    fn test_empty_linewise_is_not_empty() {
        let mut reg = YankRegister::new();
        reg.store("", true);
        assert!(!reg.is_empty());
    }
}
