use crate::{
    Canvas, ColumnLookup, Config, InputSurface, LayoutConfig, NBSP, NodeId, Paint, PaletteConfig,
    Point, Rect, Size, TextStyle, Token, debug, style_of, tokenize,
};

/// Layout of the most recent render, in clause coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClauseGeometry {
    /// Left edge of every token relative to the text origin.
    pub token_offsets: Vec<f32>,
    /// Summed token widths and tallest token.
    pub text_size: Size,
    pub frame: Rect,
}

/// One labeled, editable line of the query panel (e.g. `SELECT ...`).
///
/// Text and caret live in the clause's hidden input; everything drawn is
/// derived from it and rebuilt from scratch on every change.
pub struct Clause {
    label: String,
    index: usize,
    input: Box<dyn InputSurface>,
    layout: LayoutConfig,
    palette: PaletteConfig,
    group: NodeId,
    label_node: NodeId,
    frame: NodeId,
    tokens_group: NodeId,
    origin: Point,
    geometry: ClauseGeometry,
}

impl Clause {
    pub fn new(
        canvas: &mut dyn Canvas,
        parent: NodeId,
        label: impl Into<String>,
        index: usize,
        input: Box<dyn InputSurface>,
        config: &Config,
    ) -> Self {
        let label = label.into();
        let layout = config.layout.clone();
        let palette = config.palette.clone();

        let group = canvas.add_group(parent);
        let label_node = canvas.add_text(group, &label);
        canvas.set_text_style(label_node, &Self::label_style(&palette));
        canvas.place(label_node, Point::new(0.0, layout.clause_height / 2.0));

        let frame = canvas.add_rect(group);
        canvas.set_paint(
            frame,
            &Paint::stroke(&palette.frame_stroke)
                .with_fill("white")
                .with_corner_radius(3.0),
        );
        let tokens_group = canvas.add_group(group);

        let mut clause = Self {
            label,
            index,
            input,
            layout,
            palette,
            group,
            label_node,
            frame,
            tokens_group,
            origin: Point::ZERO,
            geometry: ClauseGeometry::default(),
        };
        clause.frame_text(canvas, Size::ZERO);
        clause
    }

    fn label_style(palette: &PaletteConfig) -> TextStyle {
        TextStyle::bold().with_fill(&palette.label)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn group(&self) -> NodeId {
        self.group
    }

    pub fn tokens_group(&self) -> NodeId {
        self.tokens_group
    }

    pub fn input(&self) -> &dyn InputSurface {
        self.input.as_ref()
    }

    pub fn input_mut(&mut self) -> &mut dyn InputSurface {
        self.input.as_mut()
    }

    /// Translation of this clause inside the panel.
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn geometry(&self) -> &ClauseGeometry {
        &self.geometry
    }

    pub fn height(&self) -> f32 {
        self.layout.clause_height
    }

    /// Size of the input frame after the last render.
    pub fn rendered_size(&self) -> Size {
        self.geometry.frame.size
    }

    /// Frame bounds in panel coordinates.
    pub fn frame_bounds(&self) -> Rect {
        self.geometry.frame.translated(self.origin)
    }

    pub(crate) fn set_origin(&mut self, canvas: &mut dyn Canvas, origin: Point) {
        self.origin = origin;
        canvas.translate(self.group, origin);
    }

    /// Current text with spaces in their canonical non-breaking form.
    pub fn value(&self) -> String {
        self.input.value().replace(' ', &NBSP.to_string())
    }

    pub fn len(&self) -> usize {
        self.input.value().chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn caret(&self) -> usize {
        self.input.caret().min(self.len())
    }

    pub fn set_caret(&mut self, offset: usize) {
        let offset = offset.min(self.len());
        self.input.set_caret(offset);
    }

    pub fn label_width(&self, canvas: &dyn Canvas) -> f32 {
        canvas
            .measure(self.label_node)
            .unwrap_or_else(|| canvas.measure_text(&self.label, &Self::label_style(&self.palette)))
            .width
    }

    /// X of the first character: the label plus its gap.
    pub fn text_origin_x(&self, canvas: &dyn Canvas) -> f32 {
        self.label_width(canvas) + self.layout.label_margin
    }

    fn token_style(&self, token: &Token, columns: &dyn ColumnLookup) -> TextStyle {
        style_of(&token.text, columns).text_style(&self.palette)
    }

    /// Replace the text and redraw.
    pub fn set_text(&mut self, canvas: &mut dyn Canvas, columns: &dyn ColumnLookup, text: &str) {
        self.input.set_value(text);
        self.render(canvas, columns);
    }

    /// Throw away the drawn tokens and rebuild them from the current text.
    pub fn render(&mut self, canvas: &mut dyn Canvas, columns: &dyn ColumnLookup) {
        canvas.destroy(self.tokens_group);
        self.tokens_group = canvas.add_group(self.group);
        let text_x = self.text_origin_x(canvas);
        canvas.translate(self.tokens_group, Point::new(text_x, 0.0));

        let middle = self.layout.clause_height / 2.0;
        let tokens = tokenize(&self.value());
        let mut offsets = Vec::with_capacity(tokens.len());
        let mut x = 0.0f32;
        let mut height = 0.0f32;
        for token in &tokens {
            let style = self.token_style(token, columns);
            let node = canvas.add_text(self.tokens_group, &token.text);
            canvas.set_text_style(node, &style);
            canvas.place(node, Point::new(x, middle));
            let size = canvas
                .measure(node)
                .unwrap_or_else(|| canvas.measure_text(&token.text, &style));
            offsets.push(x);
            x += size.width;
            height = height.max(size.height);
        }

        self.geometry.token_offsets = offsets;
        self.frame_text(canvas, Size::new(x, height));
        debug!(
            "Rendered clause {} ({}): {} tokens, {x} px",
            self.index,
            self.label,
            tokens.len()
        );
    }

    fn frame_text(&mut self, canvas: &mut dyn Canvas, text_size: Size) {
        let margin = self.layout.frame_margin;
        let size = Size::new(
            self.layout.min_clause_width.max(text_size.width + 2.0 * margin),
            self.layout.clause_height,
        );
        let origin = Point::new(self.text_origin_x(canvas) - margin, 0.0);
        canvas.resize(self.frame, size);
        canvas.place(self.frame, origin);
        self.geometry.text_size = text_size;
        self.geometry.frame = Rect::new(origin, size);
    }

    /// Width of the text before `offset`, each token measured in its own style.
    ///
    /// A token split by `offset` contributes the measured width of its prefix
    /// drawn in the style of the whole token, so the caret lands where the
    /// rendered glyphs are.
    pub fn width_before(&self, canvas: &dyn Canvas, columns: &dyn ColumnLookup, offset: usize) -> f32 {
        let offset = offset.min(self.len());
        let mut width = 0.0;
        for token in tokenize(&self.value()) {
            if token.start >= offset {
                break;
            }
            let style = self.token_style(&token, columns);
            let text = if token.contains(offset) {
                token.prefix(offset - token.start)
            } else {
                token.text.as_str()
            };
            width += canvas.measure_text(text, &style).width;
        }
        width
    }

    /// Caret x for `offset` in clause coordinates. Offsets past the end are
    /// clamped.
    pub fn caret_pixel_x(&self, canvas: &dyn Canvas, columns: &dyn ColumnLookup, offset: usize) -> f32 {
        self.text_origin_x(canvas) + self.width_before(canvas, columns, offset)
    }

    /// Character offset whose caret position is nearest to `x` (clause
    /// coordinates).
    ///
    /// Scans for the first offset `i` whose caret reaches `x`, then keeps `i`
    /// if it is at least as close as `i - 1`. An exact hit is its own answer.
    pub fn character_index_at_pixel(
        &self,
        canvas: &dyn Canvas,
        columns: &dyn ColumnLookup,
        x: f32,
    ) -> usize {
        let len = self.len();
        let at = |i: usize| self.caret_pixel_x(canvas, columns, i);

        let mut i = 0;
        while i < len && at(i) < x {
            i += 1;
        }
        if i == 0 {
            return 0;
        }
        let delta = (x - at(i)).abs();
        let delta_previous = (x - at(i - 1)).abs();
        if delta <= delta_previous { i } else { i - 1 }
    }

    /// Endpoints of a caret drawn at `offset`, in clause coordinates.
    pub fn caret_line(
        &self,
        canvas: &dyn Canvas,
        columns: &dyn ColumnLookup,
        offset: usize,
    ) -> (Point, Point) {
        let x = self.caret_pixel_x(canvas, columns, offset);
        let middle = self.layout.clause_height / 2.0;
        let half = self.layout.caret_height / 2.0;
        (Point::new(x, middle - half), Point::new(x, middle + half))
    }

    /// Final token of the current text, `None` when the clause is empty.
    pub fn last_token(&self) -> Option<Token> {
        tokenize(&self.value()).pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Document, FixedAdvanceMeasurer, InputHost, NoColumns, Scene, Table, TokenKind, config,
    };
    use itertools::Itertools;

    struct Setup {
        scene: Scene,
        doc: Document,
        columns: Table,
    }

    fn setup() -> Setup {
        Setup {
            scene: Scene::new(Size::new(800.0, 600.0), FixedAdvanceMeasurer::default()),
            doc: Document::new(),
            columns: Table::from_cells("Corporations", ["Rank", "Revenue"], 2).unwrap(),
        }
    }

    fn clause(s: &mut Setup, label: &str) -> Clause {
        let root = s.scene.root();
        let input = s.doc.create_input();
        Clause::new(&mut s.scene, root, label, 0, input, config())
    }

    #[test]
    fn text_starts_after_label_and_margin() {
        let mut s = setup();
        let c = clause(&mut s, "SELECT");
        // bold label: 6 * 12 px, plus 10 px margin
        assert_eq!(c.text_origin_x(&s.scene), 82.0);
        assert_eq!(c.caret_pixel_x(&s.scene, &s.columns, 0), 82.0);
    }

    #[test]
    fn render_lays_tokens_side_by_side_in_their_styles() {
        let mut s = setup();
        let mut c = clause(&mut s, "SELECT");
        c.set_text(&mut s.scene, &s.columns, "select Revenue, x");

        let texts = s.scene.texts_under(c.tokens_group());
        assert_eq!(texts, ["select", "\u{a0}", "Revenue", ",", "\u{a0}", "x"]);
        // keyword 72, space 10, column 84, comma 10, space 10, plain 10
        assert_eq!(c.geometry().token_offsets, [0.0, 72.0, 82.0, 166.0, 176.0, 186.0]);
        assert_eq!(c.geometry().text_size.width, 196.0);

        let styles = s
            .scene
            .children(c.tokens_group())
            .iter()
            .map(|n| s.scene.style(*n).unwrap().is_bold())
            .collect_vec();
        assert_eq!(styles, [true, false, true, false, false, false]);
    }

    #[test]
    fn rerender_leaves_no_stale_tokens() {
        let mut s = setup();
        let mut c = clause(&mut s, "SELECT");
        c.set_text(&mut s.scene, &NoColumns, "SELECT *");
        let old_group = c.tokens_group();
        c.set_text(&mut s.scene, &NoColumns, "SELECT");

        assert!(!s.scene.contains(old_group));
        assert_eq!(s.scene.texts_under(c.tokens_group()), ["SELECT"]);
        assert_eq!(s.scene.texts_under(c.group()), ["SELECT", "SELECT"]);
    }

    #[test]
    fn frame_respects_minimum_width() {
        let mut s = setup();
        let mut c = clause(&mut s, "FROM");
        assert_eq!(c.rendered_size(), Size::new(150.0, 34.0));

        c.set_text(&mut s.scene, &NoColumns, &"x".repeat(30));
        assert_eq!(c.rendered_size().width, 308.0);
        // frame starts one margin left of the text
        assert_eq!(c.geometry().frame.x(), c.text_origin_x(&s.scene) - 4.0);
    }

    #[test]
    fn caret_positions_are_monotonic() {
        let mut s = setup();
        let mut c = clause(&mut s, "SELECT");
        c.set_text(&mut s.scene, &s.columns, "SELECT Rank,  revenue, foo *");
        let xs = (0..=c.len())
            .map(|i| c.caret_pixel_x(&s.scene, &s.columns, i))
            .collect_vec();
        assert!(xs.iter().tuple_windows().all(|(a, b)| a <= b), "{xs:?}");
    }

    #[test]
    fn pixel_round_trip_hits_every_offset() {
        let mut s = setup();
        let mut c = clause(&mut s, "SELECT");
        c.set_text(&mut s.scene, &s.columns, "SELECT Revenue, a  b");
        for i in 0..=c.len() {
            let x = c.caret_pixel_x(&s.scene, &s.columns, i);
            assert_eq!(c.character_index_at_pixel(&s.scene, &s.columns, x), i);
        }
    }

    #[test]
    fn nearest_offset_prefers_the_scanned_boundary_on_ties() {
        let mut s = setup();
        let mut c = clause(&mut s, "FROM");
        c.set_text(&mut s.scene, &NoColumns, "abc");
        let origin = c.text_origin_x(&s.scene);
        // boundaries at origin + 0, 10, 20, 30
        assert_eq!(c.character_index_at_pixel(&s.scene, &NoColumns, origin + 14.0), 1);
        assert_eq!(c.character_index_at_pixel(&s.scene, &NoColumns, origin + 15.0), 2);
        assert_eq!(c.character_index_at_pixel(&s.scene, &NoColumns, origin + 16.0), 2);
        assert_eq!(c.character_index_at_pixel(&s.scene, &NoColumns, -50.0), 0);
        assert_eq!(c.character_index_at_pixel(&s.scene, &NoColumns, 9_999.0), 3);
    }

    #[test]
    fn out_of_range_offsets_are_clamped() {
        let mut s = setup();
        let mut c = clause(&mut s, "FROM");
        c.set_text(&mut s.scene, &NoColumns, "ab");
        let end = c.caret_pixel_x(&s.scene, &NoColumns, 2);
        assert_eq!(c.caret_pixel_x(&s.scene, &NoColumns, 50), end);
        c.set_caret(50);
        assert_eq!(c.caret(), 2);
    }

    #[test]
    fn partial_tokens_keep_the_style_of_the_whole_token() {
        let mut s = setup();
        let mut c = clause(&mut s, "SELECT");
        c.set_text(&mut s.scene, &s.columns, "SELECT");
        // three bold characters of the keyword
        assert_eq!(c.width_before(&s.scene, &s.columns, 3), 36.0);
    }

    #[test]
    fn spaces_are_canonicalized() {
        let mut s = setup();
        let mut c = clause(&mut s, "FROM");
        c.set_text(&mut s.scene, &NoColumns, "a  b");
        assert_eq!(c.value(), "a\u{a0}\u{a0}b");
        assert_eq!(c.input().value(), "a  b");
    }

    #[test]
    fn last_token_of_text() {
        let mut s = setup();
        let mut c = clause(&mut s, "SELECT");
        assert_eq!(c.last_token(), None);
        c.set_text(&mut s.scene, &NoColumns, "a, b");
        assert_eq!(c.last_token().map(|t| t.text), Some("b".to_string()));
        c.set_text(&mut s.scene, &NoColumns, "a,");
        assert_eq!(c.last_token().map(|t| t.kind), Some(TokenKind::Comma));
    }
}
