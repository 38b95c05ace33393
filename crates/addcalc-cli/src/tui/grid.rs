//! Character grid the keypad screen is drawn into.
//!
//! Rows are flushed to the terminal line by line, so tests can compare the
//! rendered screen as plain strings.

/// Row-major grid of characters
#[derive(Debug, Clone)]
pub struct TextGrid {
    cells: Vec<char>,
    width: u16,
    height: u16,
}

impl TextGrid {
    /// Create a grid filled with spaces
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![' '; usize::from(width) * usize::from(height)],
            width,
            height,
        }
    }

    /// Grid width
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Grid height
    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Character at (x, y)
    pub fn get(&self, x: u16, y: u16) -> Option<char> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set the character at (x, y); out of range is ignored
    pub fn set(&mut self, x: u16, y: u16, ch: char) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = ch;
        }
    }

    /// Write a string starting at (x, y), truncated at the right edge
    pub fn write_str(&mut self, x: u16, y: u16, s: &str) {
        for (offset, ch) in s.chars().enumerate() {
            let Ok(offset) = u16::try_from(offset) else {
                break;
            };
            let pos = x.saturating_add(offset);
            if pos >= self.width {
                break;
            }
            self.set(pos, y, ch);
        }
    }

    /// Write a string so that it ends at column `right` (inclusive).
    /// Text wider than the space keeps its rightmost characters.
    pub fn write_right(&mut self, right: u16, y: u16, s: &str) {
        let chars: Vec<char> = s.chars().collect();
        let room = usize::from(right) + 1;
        let visible = &chars[chars.len().saturating_sub(room)..];
        let start = room - visible.len();
        for (offset, ch) in visible.iter().enumerate() {
            if let Ok(x) = u16::try_from(start + offset) {
                self.set(x, y, *ch);
            }
        }
    }

    /// Draw a single-line box with corners at (x0, y0) and (x1, y1)
    pub fn draw_box(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) {
        for x in x0 + 1..x1 {
            self.set(x, y0, '─');
            self.set(x, y1, '─');
        }
        for y in y0 + 1..y1 {
            self.set(x0, y, '│');
            self.set(x1, y, '│');
        }
        self.set(x0, y0, '┌');
        self.set(x1, y0, '┐');
        self.set(x0, y1, '└');
        self.set(x1, y1, '┘');
    }

    /// Draw a horizontal divider joining a box's sides at row `y`
    pub fn draw_divider(&mut self, x0: u16, x1: u16, y: u16) {
        for x in x0 + 1..x1 {
            self.set(x, y, '─');
        }
        self.set(x0, y, '├');
        self.set(x1, y, '┤');
    }

    /// Rows as strings, trailing spaces trimmed
    pub fn to_lines(&self) -> Vec<String> {
        self.cells
            .chunks(usize::from(self.width).max(1))
            .take(usize::from(self.height))
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .collect()
    }
}
