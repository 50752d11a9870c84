//! Row cursor for sequential browsing

use serde::{Deserialize, Serialize};

/// Cursor over the active row set.
///
/// The view layer moves this in response to input; the cursor itself only
/// knows the row count and keeps the position inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowCursor {
    position: usize,
    total: usize,
}

impl RowCursor {
    /// Create a cursor at the first row of a set of `total` rows.
    pub fn new(total: usize) -> Self {
        Self { position: 0, total }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Point the cursor at a new row set, back at the first row.
    pub fn reset(&mut self, total: usize) {
        self.total = total;
        self.position = 0;
    }

    /// Jump to a specific row.
    pub fn seek_to(&mut self, position: usize) -> Result<(), String> {
        if position >= self.total {
            return Err(format!(
                "Position {} out of bounds (max: {})",
                position,
                self.total.saturating_sub(1)
            ));
        }
        self.position = position;
        Ok(())
    }

    /// Move down by one row.
    pub fn next(&mut self) -> Result<(), String> {
        if self.position + 1 >= self.total {
            return Err("Already at end".to_string());
        }
        self.position += 1;
        Ok(())
    }

    /// Move up by one row.
    pub fn previous(&mut self) -> Result<(), String> {
        if self.position == 0 {
            return Err("Already at beginning".to_string());
        }
        self.position -= 1;
        Ok(())
    }

    /// Move down by `steps` rows, clamped to the last row.
    pub fn advance(&mut self, steps: usize) {
        self.position = (self.position + steps).min(self.total.saturating_sub(1));
    }

    /// Move up by `steps` rows, clamped to the first row.
    pub fn retreat(&mut self, steps: usize) {
        self.position = self.position.saturating_sub(steps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seek_bounds() {
        let mut cursor = RowCursor::new(3);
        assert!(cursor.seek_to(2).is_ok());
        assert!(cursor.seek_to(3).is_err());
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_step_at_edges() {
        let mut cursor = RowCursor::new(2);
        assert!(cursor.previous().is_err());
        assert!(cursor.next().is_ok());
        assert!(cursor.next().is_err());
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_page_movement_clamps() {
        let mut cursor = RowCursor::new(10);
        cursor.advance(25);
        assert_eq!(cursor.position(), 9);
        cursor.retreat(4);
        assert_eq!(cursor.position(), 5);
        cursor.retreat(100);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_empty_row_set() {
        let mut cursor = RowCursor::new(0);
        assert!(cursor.seek_to(0).is_err());
        assert!(cursor.next().is_err());
        cursor.advance(5);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_reset_returns_to_first_row() {
        let mut cursor = RowCursor::new(10);
        cursor.advance(7);
        cursor.reset(3);
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.total(), 3);
    }
}
