use crate::{
    CanvasHandle, ColumnLookup, NodeId, Point, Rect, Size, Table, TableLayout, TextStyle, debug,
    info, warn,
};
use itertools::Itertools;
use std::cell::{Cell, RefCell};

#[derive(Debug, Clone, Default, PartialEq)]
struct CardLayout {
    column_offsets: Vec<f32>,
    column_widths: Vec<f32>,
    row_height: f32,
    label_height: f32,
}

impl CardLayout {
    fn width(&self) -> f32 {
        self.column_widths.iter().sum()
    }
}

/// A table drawn on the canvas: a `Table <name>` caption above a grid of
/// bold headers and data cells.
///
/// Column width is the widest cell of the column, row height the tallest
/// cell of the whole table, and every cell is centred in its column. The
/// card doubles as the live column lookup of the query panel.
pub struct TableCard {
    canvas: CanvasHandle,
    group: Cell<NodeId>,
    table: RefCell<Table>,
    layout: RefCell<CardLayout>,
    position: Cell<Point>,
}

impl TableCard {
    /// Draw `table` with its top-left corner at `position`.
    pub fn add(canvas: CanvasHandle, table: Table, position: Point) -> Self {
        let group = {
            let mut c = canvas.borrow_mut();
            let root = c.root();
            c.add_group(root)
        };
        let card = Self {
            canvas,
            group: Cell::new(group),
            table: RefCell::new(table),
            layout: RefCell::default(),
            position: Cell::new(position),
        };
        card.draw();
        card
    }

    fn draw(&self) {
        let table = self.table.borrow();
        let mut canvas = self.canvas.borrow_mut();
        let root = canvas.root();
        canvas.destroy(self.group.get());
        let group = canvas.add_group(root);
        self.group.set(group);
        canvas.translate(group, self.position.get());

        let caption = format!("Table {}", table.name);
        let label = canvas.add_text(group, &caption);
        let label_size = canvas
            .measure(label)
            .unwrap_or_else(|| canvas.measure_text(&caption, &TextStyle::default()));

        let header = TextStyle::bold();
        let plain = TextStyle::default();
        let n_columns = table.column_count().max(1);
        let cells = table
            .columns
            .iter()
            .map(|c| (c.name.as_str(), &header))
            .chain(table.rows.iter().flatten().map(|cell| (cell.as_str(), &plain)))
            .map(|(text, style)| {
                let node = canvas.add_text(group, text);
                canvas.set_text_style(node, style);
                let size = canvas
                    .measure(node)
                    .unwrap_or_else(|| canvas.measure_text(text, style));
                (node, size)
            })
            .collect_vec();

        let mut column_widths = vec![0.0f32; n_columns];
        for (i, (_, size)) in cells.iter().enumerate() {
            let w = &mut column_widths[i % n_columns];
            *w = w.max(size.width);
        }
        let column_offsets = column_widths
            .iter()
            .scan(0.0, |offset, width| {
                let current = *offset;
                *offset += width;
                Some(current)
            })
            .collect_vec();
        let row_height = cells.iter().map(|(_, s)| s.height).fold(0.0, f32::max);

        for (i, (node, size)) in cells.iter().enumerate() {
            let column = i % n_columns;
            let row = i / n_columns;
            let x = column_offsets[column] + (column_widths[column] - size.width) / 2.0;
            let y = label_size.height + row as f32 * row_height + row_height / 2.0;
            canvas.place(*node, Point::new(x, y));
        }

        let layout = CardLayout {
            column_offsets,
            column_widths,
            row_height,
            label_height: label_size.height,
        };
        canvas.place(
            label,
            Point::new((layout.width() - label_size.width) / 2.0, label_size.height / 2.0),
        );
        debug!(
            "Drew table {} with {} columns, {} px wide",
            table.name,
            table.column_count(),
            layout.width()
        );
        *self.layout.borrow_mut() = layout;
    }

    /// Replace the displayed table and redraw it in place.
    pub fn load(&self, table: Table) {
        info!(
            "Loading table {} ({} columns, {} rows)",
            table.name,
            table.column_count(),
            table.row_count()
        );
        *self.table.borrow_mut() = table;
        self.draw();
    }

    pub fn move_to(&self, position: Point) {
        self.position.set(position);
        self.canvas
            .borrow_mut()
            .translate(self.group.get(), position);
    }

    pub fn position(&self) -> Point {
        self.position.get()
    }

    pub fn group(&self) -> NodeId {
        self.group.get()
    }

    /// Name of the displayed table.
    pub fn name(&self) -> String {
        self.table.borrow().name.clone()
    }

    /// Header label of the column under `point` (root coordinates). The
    /// caption and everything outside the grid hit nothing.
    pub fn column_at(&self, point: Point) -> Option<String> {
        let layout = self.layout.borrow();
        let table = self.table.borrow();
        let local = point - self.position.get();
        let grid = Rect::new(
            Point::new(0.0, layout.label_height),
            Size::new(
                layout.width(),
                (table.row_count() + 1) as f32 * layout.row_height,
            ),
        );
        if !grid.contains(local) {
            return None;
        }
        let column = layout
            .column_offsets
            .iter()
            .zip(&layout.column_widths)
            .position(|(offset, width)| local.x >= *offset && local.x < offset + width)?;
        table.columns.get(column).map(|c| c.name.clone())
    }

    /// Bounds of the drawn card in root coordinates.
    pub fn bounds(&self) -> Option<Rect> {
        self.canvas.borrow().bounds(self.group.get())
    }

    /// Size of the grid below the caption.
    pub fn grid_size(&self) -> Size {
        let layout = self.layout.borrow();
        let rows = self.table.borrow().row_count() + 1;
        Size::new(layout.width(), rows as f32 * layout.row_height)
    }
}

impl ColumnLookup for TableCard {
    fn is_column_label(&self, candidate: &str) -> bool {
        match self.table.try_borrow() {
            Ok(table) => table.is_column_label(candidate),
            Err(_) => {
                warn!("Column lookup of {candidate:?} while the table is being replaced");
                false
            }
        }
    }
}

impl TableLayout for TableCard {
    fn footprint(&self) -> Option<Rect> {
        self.bounds()
    }

    fn column_at(&self, point: Point) -> Option<String> {
        TableCard::column_at(self, point)
    }
}
