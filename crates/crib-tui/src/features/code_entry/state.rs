//! Fixed-length code buffer.
//!
//! Format checking is left to the backend; the buffer only enforces length
//! and ignores whitespace and control characters.

/// Number of characters in an OTP.
pub const CODE_LENGTH: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeEntry {
    code: String,
}

impl CodeEntry {
    /// Appends one character. Returns false when full or not accepted.
    pub fn insert_char(&mut self, c: char) -> bool {
        if c.is_control() || c.is_whitespace() || self.len() >= CODE_LENGTH {
            return false;
        }
        self.code.push(c);
        true
    }

    /// Removes the last character. Returns false when already empty.
    pub fn backspace(&mut self) -> bool {
        self.code.pop().is_some()
    }

    /// Appends pasted text, stopping when the buffer is full.
    pub fn paste(&mut self, text: &str) -> bool {
        let mut changed = false;
        for c in text.chars() {
            if self.len() >= CODE_LENGTH {
                break;
            }
            changed |= self.insert_char(c);
        }
        changed
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn len(&self) -> usize {
        self.code.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// True only when every position is filled.
    pub fn is_complete(&self) -> bool {
        self.len() == CODE_LENGTH
    }

    /// Per-position view for rendering.
    pub fn slots(&self) -> [Option<char>; CODE_LENGTH] {
        let mut slots = [None; CODE_LENGTH];
        for (slot, c) in slots.iter_mut().zip(self.code.chars()) {
            *slot = Some(c);
        }
        slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy)]
    enum Edit {
        Type(char),
        Delete,
    }

    #[test]
    fn test_complete_iff_four_characters_for_all_edit_sequences() {
        let alphabet = [Edit::Type('1'), Edit::Type('9'), Edit::Delete];
        // Every edit sequence up to length 7 over {type, type, delete}.
        for len in 0..=7u32 {
            for n in 0..3usize.pow(len) {
                let mut entry = CodeEntry::default();
                let mut expected = 0usize;
                let mut k = n;
                for _ in 0..len {
                    match alphabet[k % 3] {
                        Edit::Type(c) => {
                            entry.insert_char(c);
                            expected = (expected + 1).min(CODE_LENGTH);
                        }
                        Edit::Delete => {
                            entry.backspace();
                            expected = expected.saturating_sub(1);
                        }
                    }
                    k /= 3;
                    assert_eq!(entry.len(), expected);
                    assert_eq!(entry.is_complete(), expected == CODE_LENGTH);
                }
            }
        }
    }

    #[test]
    fn test_fifth_character_is_rejected() {
        let mut entry = CodeEntry::default();
        assert!(entry.paste("1234"));
        assert!(!entry.insert_char('5'));
        assert_eq!(entry.code(), "1234");
    }

    #[test]
    fn test_whitespace_and_control_are_ignored() {
        let mut entry = CodeEntry::default();
        assert!(!entry.insert_char(' '));
        assert!(!entry.insert_char('\t'));
        entry.paste(" 12\n3 456");
        assert_eq!(entry.code(), "1234");
    }

    #[test]
    fn test_deleting_from_full_code_flips_completion() {
        let mut entry = CodeEntry::default();
        entry.paste("0000");
        assert!(entry.is_complete());
        assert!(entry.backspace());
        assert!(!entry.is_complete());
        assert_eq!(entry.slots(), [Some('0'), Some('0'), Some('0'), None]);
    }

    #[test]
    fn test_no_digit_validation() {
        let mut entry = CodeEntry::default();
        entry.paste("ab1ç");
        assert!(entry.is_complete());
    }
}
