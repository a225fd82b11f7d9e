//! Memory of the last announcement, used to drop repeats

use log::debug;

/// Remembers the last text handed to the speech backend
///
/// Games tend to announce the same label every frame while it stays
/// selected; only a change (or an explicit force) should reach the backend.
#[derive(Debug, Default)]
pub struct SpokenText {
    last: String,
}

impl SpokenText {
    /// Create an empty memory
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether `text` should be spoken and remember it if so
    ///
    /// Returns false when `force` is unset and `text` equals the last
    /// spoken text. Otherwise the memory is overwritten and true returned.
    pub fn admit(&mut self, text: &str, force: bool) -> bool {
        if !force && self.last == text {
            debug!("Suppressing repeated announcement: {}", text);
            return false;
        }

        self.last.clear();
        self.last.push_str(text);
        true
    }

    /// The last admitted text
    pub fn last(&self) -> &str {
        &self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_memory() {
        let memory = SpokenText::new();
        assert_eq!(memory.last(), "");
    }

    #[test]
    fn test_repeat_suppressed() {
        let mut memory = SpokenText::new();
        assert!(memory.admit("Inventory", false));
        assert!(!memory.admit("Inventory", false));
        assert_eq!(memory.last(), "Inventory");
    }

    #[test]
    fn test_force_always_admits() {
        let mut memory = SpokenText::new();
        assert!(memory.admit("Gold: 50", true));
        assert!(memory.admit("Gold: 50", true));
        assert!(memory.admit("Gold: 50", true));
    }

    #[test]
    fn test_change_admits() {
        let mut memory = SpokenText::new();
        assert!(memory.admit("Sword", false));
        assert!(memory.admit("Shield", false));
        assert!(memory.admit("Sword", false));
        assert_eq!(memory.last(), "Sword");
    }

    #[test]
    fn test_empty_text_initially_suppressed() {
        let mut memory = SpokenText::new();
        assert!(!memory.admit("", false));
        assert!(memory.admit("", true));
    }
}
