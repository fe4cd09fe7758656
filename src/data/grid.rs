//! Editable two-column entry grid.

/// Grid column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Column {
    /// X values.
    #[default]
    X,
    /// Y values.
    Y,
}

impl Column {
    /// The other column.
    pub fn toggle(self) -> Self {
        match self {
            Column::X => Column::Y,
            Column::Y => Column::X,
        }
    }

    /// Header text.
    pub fn name(self) -> &'static str {
        match self {
            Column::X => "X",
            Column::Y => "Y",
        }
    }
}

/// Rows of free text the user typed or imported.
#[derive(Debug, Clone, Default)]
pub struct EntryGrid {
    rows: Vec<(String, String)>,
    cursor_row: usize,
    cursor_col: Column,
    scroll_offset: usize,
}

impl EntryGrid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grid from existing rows.
    pub fn from_rows(rows: Vec<(String, String)>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    /// All rows.
    pub fn rows(&self) -> &[(String, String)] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replace every row, resetting the cursor.
    pub fn replace(&mut self, rows: Vec<(String, String)>) {
        self.rows = rows;
        self.cursor_row = 0;
        self.scroll_offset = 0;
    }

    /// Append an empty row and move the cursor onto it.
    pub fn add_row(&mut self) {
        self.rows.push((String::new(), String::new()));
        self.cursor_row = self.rows.len() - 1;
        self.cursor_col = Column::X;
    }

    /// Delete the row under the cursor.
    pub fn delete_row(&mut self) -> bool {
        if self.cursor_row >= self.rows.len() {
            return false;
        }
        self.rows.remove(self.cursor_row);
        if self.cursor_row >= self.rows.len() {
            self.cursor_row = self.rows.len().saturating_sub(1);
        }
        true
    }

    /// Current cursor position.
    pub fn cursor(&self) -> (usize, Column) {
        (self.cursor_row, self.cursor_col)
    }

    /// Text of the cell under the cursor.
    pub fn current_cell(&self) -> Option<&str> {
        let (x, y) = self.rows.get(self.cursor_row)?;
        Some(match self.cursor_col {
            Column::X => x,
            Column::Y => y,
        })
    }

    /// Overwrite the cell under the cursor. Adds a row if the grid is empty.
    pub fn set_current_cell(&mut self, text: impl Into<String>) {
        if self.rows.is_empty() {
            self.add_row();
        }
        if let Some(row) = self.rows.get_mut(self.cursor_row) {
            match self.cursor_col {
                Column::X => row.0 = text.into(),
                Column::Y => row.1 = text.into(),
            }
        }
    }

    /// Move the cursor up.
    pub fn cursor_up(&mut self) {
        self.cursor_row = self.cursor_row.saturating_sub(1);
    }

    /// Move the cursor down.
    pub fn cursor_down(&mut self) {
        if self.cursor_row + 1 < self.rows.len() {
            self.cursor_row += 1;
        }
    }

    /// Switch between the X and Y columns.
    pub fn toggle_column(&mut self) {
        self.cursor_col = self.cursor_col.toggle();
    }

    /// Scroll offset that keeps the cursor inside `visible` rows.
    pub fn scroll_for(&mut self, visible: usize) -> usize {
        if visible == 0 {
            return self.scroll_offset;
        }
        if self.cursor_row < self.scroll_offset {
            self.scroll_offset = self.cursor_row;
        } else if self.cursor_row >= self.scroll_offset + visible {
            self.scroll_offset = self.cursor_row + 1 - visible;
        }
        self.scroll_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_edit_delete() {
        let mut grid = EntryGrid::new();
        grid.set_current_cell("1.5");
        assert_eq!(grid.len(), 1);
        grid.toggle_column();
        grid.set_current_cell("2");
        assert_eq!(grid.rows()[0], ("1.5".to_string(), "2".to_string()));

        grid.add_row();
        assert_eq!(grid.cursor(), (1, Column::X));
        assert!(grid.delete_row());
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.cursor().0, 0);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut grid = EntryGrid::from_rows(vec![
            ("1".into(), "1".into()),
            ("2".into(), "2".into()),
        ]);
        grid.cursor_up();
        assert_eq!(grid.cursor().0, 0);
        grid.cursor_down();
        grid.cursor_down();
        assert_eq!(grid.cursor().0, 1);
    }

    #[test]
    fn scroll_follows_cursor() {
        let rows = (0..10).map(|i| (i.to_string(), i.to_string())).collect();
        let mut grid = EntryGrid::from_rows(rows);
        for _ in 0..6 {
            grid.cursor_down();
        }
        assert_eq!(grid.scroll_for(4), 3);
        for _ in 0..6 {
            grid.cursor_up();
        }
        assert_eq!(grid.scroll_for(4), 0);
    }
}
