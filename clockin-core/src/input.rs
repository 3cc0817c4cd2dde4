use unicode_segmentation::UnicodeSegmentation;

/// Single-line text field with a byte cursor that always sits on a grapheme boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
    cursor: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn boundaries(&self) -> Vec<usize> {
        let mut boundaries: Vec<usize> = self.text.grapheme_indices(true).map(|(i, _)| i).collect();
        boundaries.push(self.text.len());
        boundaries
    }

    /// Index into `boundaries` of the cursor, snapping a stray cursor back onto one.
    fn snap(&mut self, boundaries: &[usize]) -> usize {
        let idx = match boundaries.binary_search(&self.cursor.min(self.text.len())) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };
        self.cursor = boundaries.get(idx).copied().unwrap_or(0);
        idx
    }

    pub fn insert(&mut self, c: char) {
        let boundaries = self.boundaries();
        self.snap(&boundaries);
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Remove the grapheme before the cursor. Returns false at the start of the field.
    pub fn backspace(&mut self) -> bool {
        let boundaries = self.boundaries();
        let idx = self.snap(&boundaries);
        if idx == 0 {
            return false;
        }
        let prev = boundaries[idx - 1];
        self.text.drain(prev..self.cursor);
        self.cursor = prev;
        true
    }

    /// Delete back to the start of the previous whitespace-separated word.
    pub fn delete_word(&mut self) {
        let boundaries = self.boundaries();
        self.snap(&boundaries);
        let head = &self.text[..self.cursor];
        let trimmed = head.trim_end();
        let start = trimmed
            .grapheme_indices(true)
            .rev()
            .find(|(_, g)| g.chars().all(char::is_whitespace))
            .map_or(0, |(i, g)| i + g.len());
        self.text.drain(start..self.cursor);
        self.cursor = start;
    }

    pub fn cursor_left(&mut self) {
        let boundaries = self.boundaries();
        let idx = self.snap(&boundaries);
        if idx > 0 {
            self.cursor = boundaries[idx - 1];
        }
    }

    pub fn cursor_right(&mut self) {
        let boundaries = self.boundaries();
        let idx = self.snap(&boundaries);
        if let Some(&next) = boundaries.get(idx + 1) {
            self.cursor = next;
        }
    }

    pub fn cursor_start(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.text.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> InputBuffer {
        let mut input = InputBuffer::new();
        for c in s.chars() {
            input.insert(c);
        }
        input
    }

    #[test]
    fn insert_appends_at_cursor() {
        let mut input = typed("1245");
        input.cursor_left();
        input.cursor_left();
        input.insert('3');
        assert_eq!(input.as_str(), "12345");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut input = typed("12");
        input.cursor_start();
        assert!(!input.backspace());
        assert_eq!(input.as_str(), "12");
    }

    #[test]
    fn backspace_removes_whole_grapheme() {
        let mut input = typed("ae\u{0301}");
        assert!(input.backspace());
        assert_eq!(input.as_str(), "a");
    }

    #[test]
    fn cursor_moves_by_grapheme() {
        let mut input = typed("e\u{0301}x");
        input.cursor_start();
        input.cursor_right();
        assert_eq!(input.cursor(), "e\u{0301}".len());
        input.cursor_right();
        input.cursor_right();
        assert_eq!(input.cursor(), input.as_str().len());
    }

    #[test]
    fn delete_word_removes_previous_word_and_spaces() {
        let mut input = typed("ID 1234  ");
        input.delete_word();
        assert_eq!(input.as_str(), "ID ");
        input.delete_word();
        assert_eq!(input.as_str(), "");
        input.delete_word();
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn clear_resets_cursor() {
        let mut input = typed("123");
        input.clear();
        assert_eq!(input, InputBuffer::new());
    }
}
