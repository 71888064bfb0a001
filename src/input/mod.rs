//! Authoritative text and selection state of the query clauses.
//!
//! Each clause owns one off-screen native text control, abstracted here as an
//! [`InputSurface`]. The surface is the single source of truth for the
//! clause's text and caret; the panel reads it on demand and never keeps a
//! parallel copy. Hosts create surfaces through [`InputHost`] and report
//! native notifications as [`InputEvent`]s.
//!
//! [`Document`] is an in-memory host whose inputs behave like hidden
//! `<input>` elements: exactly one of them holds focus, focusing another one
//! blurs the previous, and typing queues the notifications a browser would
//! fire.

crate::reexport!(id);
crate::reexport!(selection);
crate::reexport!(event);
crate::reexport!(surface);
crate::reexport!(shadow);
