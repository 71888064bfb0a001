use crate::{
    InputEvent, InputHost, InputId, InputSurface, Key, KeyDisposition, QueryInput, Result,
    SelectionRange, trace, warn,
};
use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
    rc::Rc,
};

#[derive(Debug, Default)]
struct InputState {
    value: String,
    selection: SelectionRange,
}

#[derive(Debug, Default)]
struct DocumentState {
    inputs: HashMap<InputId, InputState>,
    focused: Option<InputId>,
    events: VecDeque<(InputId, InputEvent)>,
    next_id: u64,
}

impl DocumentState {
    fn queue(&mut self, id: InputId, event: InputEvent) {
        trace!("Queued {event:?} for {id}");
        self.events.push_back((id, event));
    }

    fn focus(&mut self, id: InputId) {
        if self.focused == Some(id) {
            return;
        }
        if let Some(previous) = self.focused.replace(id) {
            self.queue(previous, InputEvent::Blur);
        }
    }

    fn focused_mut(&mut self) -> Option<(InputId, &mut InputState)> {
        let id = self.focused?;
        self.inputs.get_mut(&id).map(|state| (id, state))
    }
}

/// Byte index of the `chars`-th character, or the string length past the end.
fn byte_index(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map(|(b, _)| b).unwrap_or(s.len())
}

/// In-memory host of hidden inputs.
///
/// Cloning yields another handle to the same document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    state: Rc<RefCell<DocumentState>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<InputId> {
        self.state.borrow().focused
    }

    /// Insert `text` into the focused input, replacing its selection.
    pub fn type_text(&self, text: &str) {
        let mut state = self.state.borrow_mut();
        let Some((id, input)) = state.focused_mut() else {
            warn!("Typed {text:?} with no focused input");
            return;
        };
        let start = byte_index(&input.value, input.selection.start);
        let end = byte_index(&input.value, input.selection.end);
        input.value.replace_range(start..end, text);
        let caret = input.selection.start + text.chars().count();
        input.selection = SelectionRange::caret(caret);
        state.queue(id, InputEvent::Input);
    }

    /// Delete the selection, or the character before the caret.
    pub fn backspace(&self) {
        let mut state = self.state.borrow_mut();
        let Some((id, input)) = state.focused_mut() else {
            return;
        };
        let SelectionRange { start, end } = input.selection;
        let (from, to) = if start == end {
            if start == 0 {
                return;
            }
            (start - 1, start)
        } else {
            (start, end)
        };
        let (b_from, b_to) = (byte_index(&input.value, from), byte_index(&input.value, to));
        input.value.replace_range(b_from..b_to, "");
        input.selection = SelectionRange::caret(from);
        state.queue(id, InputEvent::Input);
    }

    /// Report a key press on the focused input.
    pub fn press(&self, key: Key) {
        let mut state = self.state.borrow_mut();
        if let Some(id) = state.focused {
            state.queue(id, InputEvent::KeyDown(key));
        }
    }

    /// Native default of a key the panel let through.
    pub fn apply_default(&self, id: InputId, key: Key) {
        let mut state = self.state.borrow_mut();
        let Some(input) = state.inputs.get_mut(&id) else {
            return;
        };
        let len = input.value.chars().count();
        let caret = input.selection.end;
        let target = match key {
            Key::ArrowLeft if !input.selection.is_empty() => input.selection.start,
            Key::ArrowLeft => caret.saturating_sub(1),
            Key::ArrowRight => (caret + 1).min(len),
            Key::Home | Key::ArrowUp => 0,
            Key::End | Key::ArrowDown => len,
            Key::Other => return,
        };
        input.selection = SelectionRange::caret(target);
        state.queue(id, InputEvent::SelectionChange);
    }

    /// Focus leaves every input, e.g. after a click on the page background.
    pub fn blur_all(&self) {
        let mut state = self.state.borrow_mut();
        if let Some(previous) = state.focused.take() {
            state.queue(previous, InputEvent::Blur);
        }
    }

    pub fn drain_events(&self) -> Vec<(InputId, InputEvent)> {
        self.state.borrow_mut().events.drain(..).collect()
    }

    pub fn has_pending_events(&self) -> bool {
        !self.state.borrow().events.is_empty()
    }

    /// Deliver queued notifications to `panel` until the queue stays empty,
    /// applying native key defaults the panel did not consume. Timers that
    /// came due since the last pump fire first, even when nothing is queued.
    pub async fn pump(&self, panel: &mut QueryInput) -> Result {
        loop {
            panel.fire_due_timers();
            let batch = self.drain_events();
            if batch.is_empty() {
                return Ok(());
            }
            for (id, event) in batch {
                let disposition = panel.handle_input(id, event).await?;
                if let InputEvent::KeyDown(key) = event
                    && disposition == KeyDisposition::PassThrough
                {
                    self.apply_default(id, key);
                }
            }
        }
    }
}

impl InputHost for Document {
    fn create_input(&mut self) -> Box<dyn InputSurface> {
        let mut state = self.state.borrow_mut();
        let id = InputId::from_raw(state.next_id);
        state.next_id += 1;
        state.inputs.insert(id, InputState::default());
        Box::new(ShadowInput {
            id,
            document: self.clone(),
        })
    }
}

/// Handle to one hidden input of a [`Document`].
///
/// Programmatic changes do not queue notifications; only host-side editing
/// does.
#[derive(Debug)]
pub struct ShadowInput {
    id: InputId,
    document: Document,
}

impl ShadowInput {
    fn with_state<R>(&self, f: impl FnOnce(&mut InputState) -> R) -> Option<R> {
        self.document
            .state
            .borrow_mut()
            .inputs
            .get_mut(&self.id)
            .map(f)
    }
}

impl InputSurface for ShadowInput {
    fn id(&self) -> InputId {
        self.id
    }

    fn value(&self) -> String {
        self.with_state(|s| s.value.clone()).unwrap_or_default()
    }

    fn set_value(&mut self, value: &str) {
        self.with_state(|s| {
            s.value = value.to_string();
            s.selection = SelectionRange::caret(value.chars().count());
        });
    }

    fn selection(&self) -> SelectionRange {
        self.with_state(|s| s.selection).unwrap_or_default()
    }

    fn set_selection(&mut self, selection: SelectionRange) {
        self.with_state(|s| s.selection = selection.clamped(s.value.chars().count()));
    }

    fn focus(&mut self) {
        self.document.state.borrow_mut().focus(self.id);
    }

    fn is_focused(&self) -> bool {
        self.document.focused() == Some(self.id)
    }
}
