/// Text typed so far, matched against displayed prompts.
///
/// Matching compares the trimmed buffer with each prompt exactly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypingBuffer {
    buffer: String,
}

impl TypingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn append(&mut self, ch: char) {
        self.buffer.push(ch);
    }

    pub fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Entry whose prompt equals the trimmed buffer.
    pub fn find<'a, T, F>(&self, entries: &'a [T], prompt_of: F) -> Option<&'a T>
    where
        F: Fn(&T) -> &str,
    {
        let typed = self.buffer.trim();
        entries.iter().find(|entry| prompt_of(*entry) == typed)
    }

    /// Like [`Self::find`], but clears the buffer when an entry matches. On a
    /// miss the buffer is kept so the player can correct it.
    pub fn activate<'a, T, F>(&mut self, entries: &'a [T], prompt_of: F) -> Option<&'a T>
    where
        F: Fn(&T) -> &str,
    {
        let matched = self.find(entries, prompt_of)?;
        self.clear();
        Some(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Entry {
        id: &'static str,
        prompt: &'static str,
    }

    const ENTRIES: [Entry; 2] = [
        Entry {
            id: "go",
            prompt: "cat",
        },
        Entry {
            id: "wait",
            prompt: "sun",
        },
    ];

    #[test]
    fn activates_matching_entry_and_clears() {
        let mut buffer = TypingBuffer::new();
        for ch in " sun".chars() {
            buffer.append(ch);
        }
        let matched = buffer.activate(&ENTRIES, |entry| entry.prompt);
        assert_eq!(matched.map(|entry| entry.id), Some("wait"));
        assert_eq!(buffer.as_str(), "");
    }

    #[test]
    fn miss_keeps_the_buffer() {
        let mut buffer = TypingBuffer::new();
        buffer.push_str("xy");
        assert!(buffer.activate(&ENTRIES, |entry| entry.prompt).is_none());
        assert_eq!(buffer.as_str(), "xy");

        buffer.backspace();
        assert_eq!(buffer.as_str(), "x");
    }
}
