use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Line buffer behind one edit pane. `cursor_col` is a byte index that always
/// sits on a char boundary; `horizontal_scroll` is in display columns.
pub struct PaneBuffer {
    pub lines: Vec<String>,
    pub cursor_row: usize,
    pub cursor_col: usize,
    pub scroll_offset: usize,
    pub horizontal_scroll: usize,
}

impl PaneBuffer {
    pub fn from_text(content: &str) -> Self {
        let lines = if content.is_empty() {
            vec![String::new()]
        } else {
            content.split('\n').map(|s| s.to_string()).collect()
        };
        Self {
            lines,
            cursor_row: 0,
            cursor_col: 0,
            scroll_offset: 0,
            horizontal_scroll: 0,
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn set_text(&mut self, content: &str) {
        *self = Self::from_text(content);
    }

    fn current_line(&self) -> &str {
        &self.lines[self.cursor_row]
    }

    pub fn insert_char(&mut self, c: char) {
        let col = self.cursor_col.min(self.lines[self.cursor_row].len());
        self.lines[self.cursor_row].insert(col, c);
        self.cursor_col = col + c.len_utf8();
    }

    pub fn insert_newline(&mut self) {
        let col = self.cursor_col.min(self.lines[self.cursor_row].len());
        let remainder = self.lines[self.cursor_row][col..].to_string();
        self.lines[self.cursor_row].truncate(col);
        self.lines.insert(self.cursor_row + 1, remainder);
        self.cursor_row += 1;
        self.cursor_col = 0;
    }

    /// Backspace: removes the char before the cursor, joining with the
    /// previous line at column zero.
    pub fn delete_char(&mut self) {
        if self.cursor_col > 0 {
            let line = &mut self.lines[self.cursor_row];
            if let Some((start, _)) = line[..self.cursor_col].char_indices().next_back() {
                line.remove(start);
                self.cursor_col = start;
            }
        } else if self.cursor_row > 0 {
            let current = self.lines.remove(self.cursor_row);
            self.cursor_row -= 1;
            let prev_len = self.lines[self.cursor_row].len();
            self.lines[self.cursor_row].push_str(&current);
            self.cursor_col = prev_len;
        }
    }

    /// Delete: removes the char under the cursor, joining with the next line
    /// at end of line.
    pub fn delete_char_forward(&mut self) {
        let line_len = self.lines[self.cursor_row].len();
        if self.cursor_col < line_len {
            self.lines[self.cursor_row].remove(self.cursor_col);
        } else if self.cursor_row + 1 < self.lines.len() {
            let next = self.lines.remove(self.cursor_row + 1);
            self.lines[self.cursor_row].push_str(&next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor_col > 0 {
            if let Some((start, _)) =
                self.current_line()[..self.cursor_col].char_indices().next_back()
            {
                self.cursor_col = start;
            }
        } else if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.current_line().len();
        }
    }

    pub fn move_right(&mut self) {
        let line = self.current_line();
        if self.cursor_col < line.len() {
            let ch = line[self.cursor_col..]
                .chars()
                .next()
                .unwrap_or('\0');
            self.cursor_col += ch.len_utf8();
        } else if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor_row == 0 {
            return;
        }
        let target = self.char_column();
        self.cursor_row -= 1;
        self.cursor_col = Self::byte_at_char(self.current_line(), target);
    }

    pub fn move_down(&mut self) {
        if self.cursor_row + 1 >= self.lines.len() {
            return;
        }
        let target = self.char_column();
        self.cursor_row += 1;
        self.cursor_col = Self::byte_at_char(self.current_line(), target);
    }

    pub fn move_to_line_start(&mut self) {
        self.cursor_col = 0;
        self.horizontal_scroll = 0;
    }

    pub fn move_to_line_end(&mut self) {
        self.cursor_col = self.current_line().len();
    }

    fn char_column(&self) -> usize {
        let line = self.current_line();
        line[..self.cursor_col.min(line.len())].chars().count()
    }

    fn byte_at_char(line: &str, char_pos: usize) -> usize {
        line.char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(line.len())
    }

    /// Display column of the cursor, in terminal cells.
    pub fn cursor_display_col(&self) -> usize {
        let line = self.current_line();
        line[..self.cursor_col.min(line.len())].width()
    }

    pub fn ensure_cursor_visible(&mut self, width: usize, height: usize) {
        if self.cursor_row < self.scroll_offset {
            self.scroll_offset = self.cursor_row;
        } else if height > 0 && self.cursor_row >= self.scroll_offset + height {
            self.scroll_offset = self.cursor_row + 1 - height;
        }

        let cursor_col = self.cursor_display_col();
        if cursor_col < self.horizontal_scroll {
            self.horizontal_scroll = cursor_col;
        } else if width > 0 && cursor_col >= self.horizontal_scroll + width {
            self.horizontal_scroll = cursor_col + 1 - width;
        }
    }

    /// The slice of a line visible under the current horizontal scroll,
    /// truncated to `width` display columns.
    pub fn visible_slice<'a>(&self, line: &'a str, width: usize) -> &'a str {
        let mut skipped = 0;
        let mut start = 0;
        for (idx, ch) in line.char_indices() {
            if skipped >= self.horizontal_scroll {
                start = idx;
                break;
            }
            skipped += UnicodeWidthChar::width(ch).unwrap_or(1);
            start = idx + ch.len_utf8();
        }
        let rest = &line[start..];
        let mut taken = 0;
        let mut end = rest.len();
        for (idx, ch) in rest.char_indices() {
            let w = UnicodeWidthChar::width(ch).unwrap_or(1);
            if taken + w > width {
                end = idx;
                break;
            }
            taken += w;
        }
        &rest[..end]
    }
}

impl Default for PaneBuffer {
    fn default() -> Self {
        Self::from_text("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_round_trips_through_lines() {
        let pane = PaneBuffer::from_text("a\nb\n\nc");
        assert_eq!(pane.lines.len(), 4);
        assert_eq!(pane.text(), "a\nb\n\nc");
    }

    #[test]
    fn test_insert_and_backspace_multibyte() {
        let mut pane = PaneBuffer::default();
        pane.insert_char('é');
        pane.insert_char('x');
        assert_eq!(pane.text(), "éx");
        pane.delete_char();
        pane.delete_char();
        assert_eq!(pane.text(), "");
        assert_eq!(pane.cursor_col, 0);
    }

    #[test]
    fn test_move_left_lands_on_char_boundary() {
        let mut pane = PaneBuffer::from_text("aé");
        pane.move_to_line_end();
        pane.move_left();
        assert_eq!(pane.cursor_col, 1, "should sit before the two-byte char");
        pane.move_left();
        assert_eq!(pane.cursor_col, 0);
    }

    #[test]
    fn test_backspace_at_line_start_joins_lines() {
        let mut pane = PaneBuffer::from_text("ab\ncd");
        pane.cursor_row = 1;
        pane.cursor_col = 0;
        pane.delete_char();
        assert_eq!(pane.text(), "abcd");
        assert_eq!(pane.cursor_row, 0);
        assert_eq!(pane.cursor_col, 2);
    }

    #[test]
    fn test_newline_splits_line_at_cursor() {
        let mut pane = PaneBuffer::from_text("abcd");
        pane.cursor_col = 2;
        pane.insert_newline();
        assert_eq!(pane.text(), "ab\ncd");
        assert_eq!((pane.cursor_row, pane.cursor_col), (1, 0));
    }

    #[test]
    fn test_vertical_move_preserves_char_column() {
        let mut pane = PaneBuffer::from_text("ééé\nab");
        pane.cursor_col = 4; // after two 'é'
        pane.move_down();
        assert_eq!(pane.cursor_col, 2, "char column 2 maps to byte 2 in ascii line");
        pane.move_up();
        assert_eq!(pane.cursor_col, 4);
    }

    #[test]
    fn test_ensure_cursor_visible_scrolls_both_axes() {
        let mut pane = PaneBuffer::from_text(&vec!["0123456789"; 30].join("\n"));
        pane.cursor_row = 25;
        pane.cursor_col = 9;
        pane.ensure_cursor_visible(5, 10);
        assert!(pane.scroll_offset <= 25 && 25 < pane.scroll_offset + 10);
        let col = pane.cursor_display_col();
        assert!(pane.horizontal_scroll <= col && col < pane.horizontal_scroll + 5);
    }

    #[test]
    fn test_visible_slice_respects_scroll_and_width() {
        let mut pane = PaneBuffer::from_text("abcdefgh");
        pane.horizontal_scroll = 2;
        assert_eq!(pane.visible_slice("abcdefgh", 3), "cde");
    }
}
