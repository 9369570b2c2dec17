//! Text input field handling.

/// State for an editable text field.
///
/// Field text is ASCII (the form only accepts decimal characters), so
/// the byte cursor always lands on a character boundary.
#[derive(Clone, Debug, Default)]
pub struct TextInput {
    /// The current text content.
    pub content: String,
    /// Cursor position (byte index).
    pub cursor: usize,
}

impl TextInput {
    /// Creates a new empty text input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.content.remove(self.cursor);
        }
    }

    /// Deletes the character at the cursor position (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.content.len() {
            self.content.remove(self.cursor);
        }
    }

    /// Moves the cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.content.len() {
            self.cursor += 1;
        }
    }

    /// Moves the cursor to the beginning.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Moves the cursor to the end.
    pub fn move_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Replaces the content, placing the cursor at the end. Used when
    /// the reconciliation engine rewrites a field.
    pub fn set(&mut self, text: &str) {
        self.content.clear();
        self.content.push_str(text);
        self.cursor = self.content.len();
    }

    /// Returns the current content as a string slice.
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Returns whether the input is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_backspace_track_cursor() {
        let mut input = TextInput::new();
        for c in "20000".chars() {
            input.insert(c);
        }
        assert_eq!(input.as_str(), "20000");
        input.backspace();
        assert_eq!(input.as_str(), "2000");
        assert_eq!(input.cursor, 4);
    }

    #[test]
    fn set_moves_cursor_to_end() {
        let mut input = TextInput::new();
        input.insert('1');
        input.move_home();
        input.set("0.05");
        assert_eq!(input.as_str(), "0.05");
        assert_eq!(input.cursor, 4);
    }

    #[test]
    fn delete_at_cursor() {
        let mut input = TextInput::new();
        input.set("1.5");
        input.move_home();
        input.delete();
        assert_eq!(input.as_str(), ".5");
    }
}
