/// Notifications a host reports for one of its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The value changed through native editing.
    Input,
    /// The caret or selection moved.
    SelectionChange,
    /// The input lost focus.
    Blur,
    KeyDown(Key),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    Other,
}

/// Answer to a key press: whether the host must suppress its native effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// The panel consumed the key; skip the native default.
    Handled,
    /// Let the native control apply its default behaviour.
    PassThrough,
}

/// Pointer activity over a clause's input region. `x` is in root coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Move { x: f32 },
    Leave,
}
