use crate::{InputId, SelectionRange};

/// Narrow view of a native text control.
///
/// Offsets are character offsets into `value`. Implementations clamp
/// selections to the current value.
pub trait InputSurface {
    fn id(&self) -> InputId;

    fn value(&self) -> String;

    /// Replace the value. Like a native control, this collapses the caret to
    /// the end of the new value.
    fn set_value(&mut self, value: &str);

    fn selection(&self) -> SelectionRange;

    fn set_selection(&mut self, selection: SelectionRange);

    fn focus(&mut self);

    fn is_focused(&self) -> bool;

    /// Caret offset, the end of the selection.
    fn caret(&self) -> usize {
        self.selection().end
    }

    fn set_caret(&mut self, offset: usize) {
        self.set_selection(SelectionRange::caret(offset));
    }
}

/// Factory for the hidden inputs backing each clause.
pub trait InputHost {
    fn create_input(&mut self) -> Box<dyn InputSurface>;
}
