use crate::{
    Animation, Attribute, Begin, CanvasHandle, Clause, ColumnLookup, Config, Error, Fill,
    InputEvent, InputHost, InputId, Key, KeyDisposition, Keyword, NodeId, Paint, Point,
    PointerEvent, Rect, Repeat, Result, Size, TableLayout, TimerTask, Timers, TimingConfig, debug,
    info, trace,
};
use itertools::Itertools;
use std::rc::Rc;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::ArrowUp => Some(Direction::Up),
            Key::ArrowDown => Some(Direction::Down),
            _ => None,
        }
    }

    /// Index of the neighbouring clause in this direction, if there is one.
    pub fn step(self, from: usize, count: usize) -> Option<usize> {
        match self {
            Direction::Up => from.checked_sub(1),
            Direction::Down => (from + 1 < count).then_some(from + 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Idle,
    /// Focus is moving between the inputs of two clauses. Blurs are not
    /// answered with a refocus meanwhile. A move dropped half way stays here
    /// until the next vertical move.
    Transitioning { from: usize, to: usize },
}

fn blink_animation(timing: &TimingConfig) -> Animation {
    Animation::new(
        Attribute::StrokeOpacity,
        [1.0, 1.0, 1.0, 0.0, 0.0, 0.0],
        timing.blink_period(),
    )
    .repeat(Repeat::Indefinite)
}

fn hover_fade(timing: &TimingConfig) -> Animation {
    Animation::new(Attribute::StrokeOpacity, [1.0, 0.0], timing.hover_fade())
        .repeat(Repeat::Count(1))
        .begin(Begin::OnDemand)
        .fill(Fill::Freeze)
}

/// The query panel: clauses stacked vertically under the table card, one
/// shared blinking caret and one shared hover caret.
///
/// Exactly one clause is active at any time. The caret is always a child of
/// the active clause's group, drawn at the caret offset of that clause's
/// hidden input.
pub struct QueryInput {
    canvas: CanvasHandle,
    table: Rc<dyn TableLayout>,
    config: Config,
    group: NodeId,
    clauses: Vec<Clause>,
    active: usize,
    state: PanelState,
    caret: NodeId,
    hover_caret: NodeId,
    blink_token: Option<u64>,
    timers: Timers,
    origin: Point,
}

impl QueryInput {
    /// Build the default `SELECT` / `FROM` panel.
    pub fn create(
        canvas: CanvasHandle,
        table: Rc<dyn TableLayout>,
        host: &mut dyn InputHost,
        config: &Config,
    ) -> Result<Self> {
        let labels = Keyword::ALL.map(Keyword::label);
        Self::create_with_labels(canvas, table, host, config, &labels)
    }

    pub fn create_with_labels(
        canvas: CanvasHandle,
        table: Rc<dyn TableLayout>,
        host: &mut dyn InputHost,
        config: &Config,
        labels: &[&str],
    ) -> Result<Self> {
        if labels.is_empty() {
            return Err(Error::Internal(
                "a query panel needs at least one clause".to_string(),
            ));
        }

        let (group, clauses, caret, hover_caret) = {
            let mut c = canvas.borrow_mut();
            let root = c.root();
            let group = c.add_group(root);
            let clauses = labels
                .iter()
                .enumerate()
                .map(|(i, label)| Clause::new(&mut *c, group, *label, i, host.create_input(), config))
                .collect_vec();

            let caret = c.add_line(group);
            c.set_paint(caret, &Paint::stroke(&config.palette.caret));
            c.animate(caret, blink_animation(&config.timing));

            let hover_caret = c.add_line(group);
            c.set_paint(hover_caret, &Paint::stroke(&config.palette.caret));
            c.animate(hover_caret, hover_fade(&config.timing));
            c.detach(hover_caret);

            (group, clauses, caret, hover_caret)
        };

        let mut panel = Self {
            canvas,
            table,
            config: config.clone(),
            group,
            clauses,
            active: 0,
            state: PanelState::Idle,
            caret,
            hover_caret,
            blink_token: None,
            timers: Timers::default(),
            origin: Point::ZERO,
        };
        panel.translate();
        panel.clauses[0].input_mut().focus();
        panel.update_caret();
        info!("Query panel created with {} clauses", panel.clauses.len());
        Ok(panel)
    }

    pub fn group(&self) -> NodeId {
        self.group
    }

    pub fn caret_node(&self) -> NodeId {
        self.caret
    }

    pub fn hover_caret_node(&self) -> NodeId {
        self.hover_caret
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn clause(&self, index: usize) -> Option<&Clause> {
        self.clauses.get(index)
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_clause(&self) -> &Clause {
        &self.clauses[self.active]
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_navigating(&self) -> bool {
        matches!(self.state, PanelState::Transitioning { .. })
    }

    /// Translation of the whole panel in root coordinates.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Text of the active clause.
    pub fn value(&self) -> String {
        self.active_clause().value()
    }

    /// Stacked height: every clause plus the gaps between them.
    pub fn height(&self) -> f32 {
        let layout = &self.config.layout;
        let n = self.clauses.len() as f32;
        n * layout.clause_height + layout.clause_gap * (n - 1.0)
    }

    /// Right edge of the widest clause frame.
    pub fn width(&self) -> f32 {
        self.clauses
            .iter()
            .map(|c| c.frame_bounds().right())
            .fold(0.0, f32::max)
    }

    /// Centre of the caret in root coordinates.
    pub fn caret_position(&self) -> Point {
        let canvas = self.canvas.borrow();
        let columns: &dyn ColumnLookup = &*self.table;
        let clause = self.active_clause();
        let x = clause.caret_pixel_x(&*canvas, columns, clause.caret());
        self.origin + clause.origin() + Point::new(x, clause.height() / 2.0)
    }

    /// Give input focus to the active clause's hidden input on the next
    /// scheduler tick, letting a pending blur settle first.
    pub async fn focus_active(&mut self) {
        tokio::task::yield_now().await;
        let clause = &mut self.clauses[self.active];
        if !clause.input().is_focused() {
            trace!("Focusing {} of clause {}", clause.input().id(), clause.index());
            clause.input_mut().focus();
        }
    }

    /// Move the caret to the neighbouring clause, keeping its horizontal
    /// pixel position rather than its character index. No-op at the ends.
    pub async fn move_caret_vertically(&mut self, direction: Direction) {
        let from = self.active;
        let Some(to) = direction.step(from, self.clauses.len()) else {
            trace!("No clause {direction:?} of clause {from}");
            self.state = PanelState::Idle;
            return;
        };

        let x = {
            let canvas = self.canvas.borrow();
            let columns: &dyn ColumnLookup = &*self.table;
            let clause = &self.clauses[from];
            clause.origin().x + clause.caret_pixel_x(&*canvas, columns, clause.caret())
        };

        self.state = PanelState::Transitioning { from, to };
        self.active = to;
        self.focus_active().await;

        let offset = {
            let canvas = self.canvas.borrow();
            let columns: &dyn ColumnLookup = &*self.table;
            let clause = &self.clauses[to];
            clause.character_index_at_pixel(&*canvas, columns, x - clause.origin().x)
        };
        self.clauses[to].set_caret(offset);
        self.state = PanelState::Idle;
        debug!("Caret moved {direction:?} from clause {from} to {to} at x={x}, offset {offset}");
        self.update_caret();
    }

    /// Put the shared caret into the active clause at its caret offset.
    pub fn update_caret(&mut self) {
        let mut canvas = self.canvas.borrow_mut();
        let columns: &dyn ColumnLookup = &*self.table;
        let clause = &self.clauses[self.active];
        let (from, to) = clause.caret_line(&*canvas, columns, clause.caret());
        canvas.append(clause.group(), self.caret);
        canvas.set_line(self.caret, from, to);
    }

    /// Show the hover caret in clause `index` at the offset nearest to the
    /// pointer (`pointer_x` in root coordinates) and replay its fade-out.
    pub fn show_hover_caret(&mut self, index: usize, pointer_x: f32) -> Result {
        let clause = self.clauses.get(index).ok_or(Error::UnknownClause(index))?;
        let mut canvas = self.canvas.borrow_mut();
        let columns: &dyn ColumnLookup = &*self.table;
        let local_x = pointer_x - self.origin.x - clause.origin().x;
        let offset = clause.character_index_at_pixel(&*canvas, columns, local_x);
        let (from, to) = clause.caret_line(&*canvas, columns, offset);
        canvas.append(clause.group(), self.hover_caret);
        canvas.set_line(self.hover_caret, from, to);
        canvas.begin_animation(self.hover_caret, Attribute::StrokeOpacity);
        trace!("Hover caret in clause {index} at offset {offset}");
        Ok(())
    }

    pub fn hide_hover_caret(&mut self) {
        self.canvas.borrow_mut().detach(self.hover_caret);
    }

    /// Keep the caret solid while the user is typing.
    ///
    /// Stops the blink and schedules its restart. Only the most recent
    /// suspension may restart it: earlier restarts still fire, but find a
    /// different token and do nothing.
    pub fn suspend_blink(&mut self) {
        self.canvas
            .borrow_mut()
            .stop_animation(self.caret, Attribute::StrokeOpacity);
        let token = rand::random::<u64>();
        self.blink_token = Some(token);
        let deadline = Instant::now() + self.config.timing.blink_resume();
        self.timers.schedule(deadline, TimerTask::ResumeBlink(token));
        trace!("Blink suspended, token {token:016x}");
    }

    /// Run every timer task that is due. Returns how many blink restarts
    /// actually happened.
    pub fn fire_due_timers(&mut self) -> usize {
        let mut resumed = 0;
        for task in self.timers.take_due(Instant::now()) {
            match task {
                TimerTask::ResumeBlink(token) if self.blink_token == Some(token) => {
                    self.blink_token = None;
                    self.canvas
                        .borrow_mut()
                        .begin_animation(self.caret, Attribute::StrokeOpacity);
                    resumed += 1;
                    trace!("Blink resumed");
                }
                TimerTask::ResumeBlink(token) => trace!("Ignoring stale blink token {token:016x}"),
            }
        }
        resumed
    }

    /// Wait for and fire every pending timer.
    pub async fn settle(&mut self) {
        while let Some(deadline) = self.timers.next_deadline() {
            tokio::time::sleep_until(deadline).await;
            self.fire_due_timers();
        }
    }

    pub fn has_pending_timers(&self) -> bool {
        !self.timers.is_empty()
    }

    /// Stack the clauses with their labels right-aligned and centre the panel
    /// in the space below the table card.
    pub fn translate(&mut self) {
        let footprint = self.table.footprint();
        let mut canvas = self.canvas.borrow_mut();
        let layout = &self.config.layout;

        let label_widths = self
            .clauses
            .iter()
            .map(|c| c.label_width(&*canvas))
            .collect_vec();
        let widest = label_widths.iter().copied().fold(0.0, f32::max);
        let step = layout.clause_height + layout.clause_gap;
        for (i, (clause, label_width)) in self.clauses.iter_mut().zip(label_widths).enumerate() {
            clause.set_origin(&mut *canvas, Point::new(widest - label_width, i as f32 * step));
        }

        let viewport = canvas.viewport();
        let top = footprint.map_or(0.0, |r| r.bottom() + layout.panel_margin);
        let container = Rect::new(
            Point::new(0.0, top),
            Size::new(viewport.width, (viewport.height - top).max(0.0)),
        );
        let (width, height) = (self.width(), self.height());
        let origin = Point::new(
            container.x() + (container.size.width - width) / 2.0,
            (container.y() + (container.size.height - height) / 2.0).max(top),
        );
        self.origin = origin;
        canvas.translate(self.group, origin);
        trace!("Panel {width}x{height} placed at {origin}");
    }

    /// Re-centre after the viewport changed size.
    pub fn on_resize(&mut self) {
        self.translate();
        self.update_caret();
    }

    /// Replace the text of clause `index` as if the user had typed it.
    pub fn set_text(&mut self, index: usize, text: &str) -> Result {
        self.clauses
            .get_mut(index)
            .ok_or(Error::UnknownClause(index))?
            .input_mut()
            .set_value(text);
        self.on_input(index);
        Ok(())
    }

    /// Append a column label to the `SELECT` clause, separated by `", "`
    /// unless the clause is empty or already ends in a separator.
    pub fn append_column(&mut self, label: &str) -> Result {
        let index = self
            .clauses
            .iter()
            .position(|c| Keyword::parse(c.label()) == Some(Keyword::Select))
            .unwrap_or(0);
        let clause = &self.clauses[index];
        let current = clause.input().value();
        let text = match clause.last_token() {
            None => label.to_string(),
            Some(token) if token.is_separator() => format!("{current}{label}"),
            Some(_) => format!("{current}, {label}"),
        };
        debug!("Appending column {label} to clause {index}");
        self.set_text(index, &text)
    }

    /// A click on the table card appends the clicked column, if any.
    pub fn click_table(&mut self, point: Point) -> Result<Option<String>> {
        let Some(label) = self.table.column_at(point) else {
            return Ok(None);
        };
        self.append_column(&label)?;
        Ok(Some(label))
    }

    fn on_input(&mut self, index: usize) {
        self.suspend_blink();
        {
            let mut canvas = self.canvas.borrow_mut();
            let columns: &dyn ColumnLookup = &*self.table;
            self.clauses[index].render(&mut *canvas, columns);
        }
        self.update_caret();
        self.translate();
    }

    fn clause_index(&self, id: InputId) -> Option<usize> {
        self.clauses.iter().position(|c| c.input().id() == id)
    }

    /// React to a notification from one of the hidden inputs.
    ///
    /// Vertical arrow keys are consumed and answered with
    /// [`KeyDisposition::Handled`]; the host must then skip their native
    /// effect.
    pub async fn handle_input(&mut self, id: InputId, event: InputEvent) -> Result<KeyDisposition> {
        let index = self.clause_index(id).ok_or(Error::UnknownInput(id))?;
        self.fire_due_timers();
        match event {
            InputEvent::Input => self.on_input(index),
            InputEvent::SelectionChange => {
                self.suspend_blink();
                if index == self.active {
                    self.update_caret();
                }
            }
            InputEvent::Blur if self.is_navigating() => {
                trace!("Ignoring blur of {id} during navigation");
            }
            InputEvent::Blur => self.focus_active().await,
            InputEvent::KeyDown(key) => {
                if let Some(direction) = Direction::from_key(key) {
                    self.suspend_blink();
                    self.move_caret_vertically(direction).await;
                    return Ok(KeyDisposition::Handled);
                }
            }
        }
        Ok(KeyDisposition::PassThrough)
    }

    pub fn handle_pointer(&mut self, index: usize, event: PointerEvent) -> Result {
        if index >= self.clauses.len() {
            return Err(Error::UnknownClause(index));
        }
        match event {
            PointerEvent::Move { x } => self.show_hover_caret(index, x),
            PointerEvent::Leave => {
                self.hide_hover_caret();
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Document, FixedAdvanceMeasurer, NoColumns, PanelFixture, Scene, config};
    use std::{cell::RefCell, time::Duration};

    fn opacity(fx: &PanelFixture, node: NodeId) -> Option<f32> {
        fx.scene
            .borrow()
            .attribute_at(node, Attribute::StrokeOpacity, Instant::now())
    }

    fn blinking(fx: &PanelFixture) -> bool {
        fx.scene
            .borrow()
            .animation(fx.panel.caret_node(), Attribute::StrokeOpacity)
            .is_some_and(|a| a.started_at().is_some())
    }

    #[test]
    fn direction_steps_stop_at_the_ends() {
        assert_eq!(Direction::Up.step(0, 2), None);
        assert_eq!(Direction::Up.step(1, 2), Some(0));
        assert_eq!(Direction::Down.step(0, 2), Some(1));
        assert_eq!(Direction::Down.step(1, 2), None);
        assert_eq!(Direction::from_key(Key::ArrowLeft), None);
    }

    #[tokio::test]
    async fn creates_select_and_from_clauses_centred_below_the_card() {
        let fx = PanelFixture::new();
        let labels = fx.panel.clauses().iter().map(|c| c.label()).collect_vec();
        assert_eq!(labels, ["SELECT", "FROM"]);
        assert_eq!(fx.panel.active_index(), 0);
        assert_eq!(fx.panel.state(), PanelState::Idle);
        assert_eq!(fx.document.focused(), Some(fx.input_id(0)));

        // labels right-aligned: FROM is 24 px narrower than SELECT
        assert_eq!(fx.panel.clauses()[1].origin(), Point::new(24.0, 44.0));
        assert_eq!(fx.panel.height(), 78.0);
        assert_eq!(fx.panel.width(), 228.0);
        // card bottom at 108, plus 20 margin; remaining 472 px tall
        assert_eq!(fx.panel.origin(), Point::new(286.0, 325.0));
        assert_eq!(fx.panel.caret_position(), Point::new(368.0, 342.0));
    }

    #[tokio::test]
    async fn panel_without_a_table_fills_the_viewport() {
        let scene = Rc::new(RefCell::new(Scene::new(
            Size::new(400.0, 200.0),
            FixedAdvanceMeasurer::default(),
        )));
        let mut doc = Document::new();
        let panel =
            QueryInput::create_with_labels(scene, Rc::new(NoColumns), &mut doc, config(), &["FROM"])
                .unwrap();
        assert_eq!(panel.height(), 34.0);
        assert_eq!(panel.origin(), Point::new(98.0, 83.0));
    }

    #[tokio::test]
    async fn empty_label_list_is_rejected() {
        let scene = Rc::new(RefCell::new(Scene::new(
            Size::new(400.0, 200.0),
            FixedAdvanceMeasurer::default(),
        )));
        let result = QueryInput::create_with_labels(
            scene,
            Rc::new(NoColumns),
            &mut Document::new(),
            config(),
            &[],
        );
        assert!(matches!(result, Err(Error::Internal(_))));
    }

    #[tokio::test]
    async fn resize_recentres_the_panel() {
        let mut fx = PanelFixture::new();
        fx.scene.borrow_mut().set_viewport(Size::new(1000.0, 800.0));
        fx.panel.on_resize();
        assert_eq!(fx.panel.origin(), Point::new(386.0, 425.0));
    }

    #[tokio::test(start_paused = true)]
    async fn typing_rebuilds_tokens_and_moves_the_caret() {
        let mut fx = PanelFixture::new();
        fx.type_text("SELECT *").await;
        let clause = &fx.panel.clauses()[0];
        let old_tokens = clause.tokens_group();
        assert_eq!(clause.caret(), 8);

        fx.document.backspace();
        fx.document.pump(&mut fx.panel).await.unwrap();

        let clause = &fx.panel.clauses()[0];
        let scene = fx.scene.borrow();
        assert!(!scene.contains(old_tokens));
        assert_eq!(scene.texts_under(clause.tokens_group()), ["SELECT", "\u{a0}"]);
        // caret after "SELECT " at 82 + 72 + 10
        let (from, to) = scene.line(fx.panel.caret_node()).unwrap();
        assert_eq!((from.x, from.y, to.y), (164.0, 5.0, 29.0));
        assert_eq!(scene.parent(fx.panel.caret_node()), Some(clause.group()));
    }

    #[tokio::test(start_paused = true)]
    async fn arrow_down_keeps_the_horizontal_position() {
        let mut fx = PanelFixture::new();
        fx.panel.set_text(1, "FROM Corporations").unwrap();
        fx.type_text("SELECT Revenue").await;

        fx.press(Key::ArrowDown).await;
        assert_eq!(fx.panel.active_index(), 1);
        assert_eq!(fx.panel.state(), PanelState::Idle);
        assert_eq!(fx.document.focused(), Some(fx.input_id(1)));
        // 248 px in the SELECT clause is 224 px in FROM, nearest offset 16
        assert_eq!(fx.panel.active_clause().caret(), 16);
        assert_eq!(
            fx.scene.borrow().parent(fx.panel.caret_node()),
            Some(fx.panel.clauses()[1].group())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn arrow_down_past_a_shorter_line_lands_at_its_end() {
        let mut fx = PanelFixture::new();
        fx.panel.set_text(1, "FROM").unwrap();
        fx.type_text("SELECT a, b").await;
        for _ in 0..3 {
            fx.press(Key::ArrowLeft).await;
        }
        assert_eq!(fx.panel.active_clause().caret(), 8);

        fx.press(Key::ArrowDown).await;
        assert_eq!(fx.panel.active_clause().caret(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn vertical_keys_at_the_ends_are_consumed_without_moving() {
        let mut fx = PanelFixture::new();
        fx.type_text("SELECT a").await;
        fx.press(Key::ArrowUp).await;
        assert_eq!(fx.panel.active_index(), 0);
        assert_eq!(fx.panel.active_clause().caret(), 8);

        fx.press(Key::ArrowDown).await;
        fx.press(Key::ArrowDown).await;
        assert_eq!(fx.panel.active_index(), 1);
        assert_eq!(fx.panel.active_clause().caret(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn typing_bursts_restart_the_blink_only_once() {
        let mut fx = PanelFixture::new();
        assert!(blinking(&fx));

        fx.type_text("a").await;
        assert!(!blinking(&fx));
        tokio::time::advance(Duration::from_millis(200)).await;
        fx.type_text("b").await;

        tokio::time::advance(Duration::from_millis(250)).await;
        assert_eq!(fx.panel.fire_due_timers(), 0);
        assert!(!blinking(&fx));

        tokio::time::advance(Duration::from_millis(200)).await;
        assert_eq!(fx.panel.fire_due_timers(), 1);
        assert!(blinking(&fx));
        assert!(!fx.panel.has_pending_timers());
    }

    #[tokio::test(start_paused = true)]
    async fn event_loop_restarts_the_blink_on_its_own() {
        let mut fx = PanelFixture::new();
        fx.type_text("a").await;
        tokio::time::advance(Duration::from_secs(5)).await;
        fx.press(Key::ArrowLeft).await;
        assert!(!blinking(&fx));

        tokio::time::advance(Duration::from_secs(5)).await;
        fx.document.pump(&mut fx.panel).await.unwrap();
        assert!(blinking(&fx));
        assert!(!fx.panel.has_pending_timers());
    }

    #[tokio::test(start_paused = true)]
    async fn blur_is_not_answered_while_navigating() {
        let mut fx = PanelFixture::new();
        tokio::select! {
            biased;
            _ = fx.panel.move_caret_vertically(Direction::Down) => {}
            _ = std::future::ready(()) => {}
        }
        assert_eq!(fx.panel.state(), PanelState::Transitioning { from: 0, to: 1 });
        assert!(fx.panel.is_navigating());

        fx.document.blur_all();
        fx.document.pump(&mut fx.panel).await.unwrap();
        assert_eq!(fx.document.focused(), None);

        fx.panel.move_caret_vertically(Direction::Up).await;
        assert_eq!(fx.panel.state(), PanelState::Idle);
        assert_eq!(fx.panel.active_index(), 0);
        assert_eq!(fx.document.focused(), Some(fx.input_id(0)));
    }

    #[tokio::test(start_paused = true)]
    async fn settle_drains_every_timer() {
        let mut fx = PanelFixture::new();
        fx.type_text("a").await;
        fx.type_text("b").await;
        fx.panel.settle().await;
        assert!(blinking(&fx));
        assert!(!fx.panel.has_pending_timers());
    }

    #[tokio::test(start_paused = true)]
    async fn hover_caret_follows_the_pointer_and_fades() {
        let mut fx = PanelFixture::new();
        fx.type_text("SELECT").await;
        let hover = fx.panel.hover_caret_node();
        assert_eq!(fx.scene.borrow().parent(hover), None);

        let x = fx.panel.origin().x + 82.0 + 37.0;
        fx.panel.handle_pointer(0, PointerEvent::Move { x }).unwrap();
        {
            let scene = fx.scene.borrow();
            assert_eq!(scene.parent(hover), Some(fx.panel.clauses()[0].group()));
            assert_eq!(scene.line(hover).map(|(from, _)| from.x), Some(118.0));
        }
        assert_eq!(opacity(&fx, hover), Some(1.0));

        tokio::time::advance(Duration::from_millis(1500)).await;
        assert_eq!(opacity(&fx, hover), Some(0.0));

        fx.panel.handle_pointer(0, PointerEvent::Move { x }).unwrap();
        assert_eq!(opacity(&fx, hover), Some(1.0));
        assert_eq!(
            fx.scene
                .borrow()
                .animation(hover, Attribute::StrokeOpacity)
                .map(|a| a.begin_count()),
            Some(2)
        );

        fx.panel.handle_pointer(0, PointerEvent::Leave).unwrap();
        assert_eq!(fx.scene.borrow().parent(hover), None);
        assert!(matches!(
            fx.panel.handle_pointer(7, PointerEvent::Leave),
            Err(Error::UnknownClause(7))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn blur_hands_focus_back_to_the_active_input() {
        let mut fx = PanelFixture::new();
        fx.document.blur_all();
        assert_eq!(fx.document.focused(), None);
        fx.document.pump(&mut fx.panel).await.unwrap();
        assert_eq!(fx.document.focused(), Some(fx.input_id(0)));
    }

    #[tokio::test(start_paused = true)]
    async fn clicking_columns_appends_them_to_select() {
        let mut fx = PanelFixture::new();
        // columns at 0, 48 and 132 px of the card at (20, 20)
        let company = fx.panel.click_table(Point::new(80.0, 50.0)).unwrap();
        assert_eq!(company.as_deref(), Some("Company"));
        fx.panel.click_table(Point::new(160.0, 50.0)).unwrap();
        assert_eq!(fx.panel.clauses()[0].input().value(), "Company, Revenue");

        fx.panel.set_text(0, "SELECT a,").unwrap();
        fx.panel.append_column("Rank").unwrap();
        assert_eq!(fx.panel.clauses()[0].input().value(), "SELECT a,Rank");

        assert_eq!(fx.panel.click_table(Point::new(5.0, 5.0)).unwrap(), None);
    }

    #[tokio::test]
    async fn unknown_inputs_are_reported() {
        let mut fx = PanelFixture::new();
        let stranger = InputId::from_raw(99);
        let result = fx.panel.handle_input(stranger, InputEvent::Input).await;
        assert!(matches!(result, Err(Error::UnknownInput(id)) if id == stranger));
        assert!(matches!(fx.panel.set_text(5, "x"), Err(Error::UnknownClause(5))));
    }
}
