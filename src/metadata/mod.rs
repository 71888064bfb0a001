crate::reexport!(column);
crate::reexport!(table);

use crate::{Point, Rect};

/// Live, case-insensitive membership test against the labels of the table
/// currently on display.
///
/// Implementations may change their label set at any time; callers must not
/// cache answers. A lookup that is temporarily unable to answer reports
/// `false`.
pub trait ColumnLookup {
    fn is_column_label(&self, candidate: &str) -> bool;
}

/// Lookup used when no table is on display.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoColumns;

impl ColumnLookup for NoColumns {
    fn is_column_label(&self, _candidate: &str) -> bool {
        false
    }
}

/// A column lookup that is also drawn on the canvas. The query panel sits
/// below its footprint.
pub trait TableLayout: ColumnLookup {
    /// Bounds of the drawn table in root coordinates, `None` if not drawn.
    fn footprint(&self) -> Option<Rect>;

    /// Label of the column drawn under `point` (root coordinates).
    fn column_at(&self, point: Point) -> Option<String>;
}

impl TableLayout for NoColumns {
    fn footprint(&self) -> Option<Rect> {
        None
    }

    fn column_at(&self, _point: Point) -> Option<String> {
        None
    }
}
