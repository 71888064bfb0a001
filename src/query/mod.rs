//! The editable part of the canvas.
//!
//! A [`QueryInput`] stacks one [`Clause`] per keyword (`SELECT`, `FROM`)
//! below the table card. Each clause draws the text of its hidden input as
//! styled tokens; the panel owns the shared caret, moves it between clauses
//! by pixel position and keeps it from blinking while the user types.

crate::reexport!(clause);
crate::reexport!(timer);
crate::reexport!(panel);
