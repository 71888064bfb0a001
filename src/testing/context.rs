use crate::{
    Document, FixedAdvanceMeasurer, InputId, Point, QueryInput, Scene, Size, Table, TableCard,
    config,
};
use std::{cell::RefCell, rc::Rc};
use test_context::AsyncTestContext;
pub use test_context::test_context;

/// A scene with a table card and a query panel below it, driven by an
/// in-memory document.
pub struct PanelFixture {
    pub scene: Rc<RefCell<Scene>>,
    pub document: Document,
    pub card: Rc<TableCard>,
    pub panel: QueryInput,
}

impl PanelFixture {
    pub fn corporations() -> Table {
        Table::from_cells(
            "Corporations",
            [
                "Rank", "Company", "Revenue", //
                "1", "Walmart", "573", //
                "2", "Amazon", "470",
            ],
            3,
        )
        .expect("valid table")
    }

    pub fn new() -> Self {
        let scene = Rc::new(RefCell::new(Scene::new(
            Size::new(800.0, 600.0),
            FixedAdvanceMeasurer::default(),
        )));
        let card = Rc::new(TableCard::add(
            scene.clone(),
            Self::corporations(),
            Point::new(20.0, 20.0),
        ));
        let mut document = Document::new();
        let panel = QueryInput::create(scene.clone(), card.clone(), &mut document, config())
            .expect("panel");
        Self {
            scene,
            document,
            card,
            panel,
        }
    }

    pub fn input_id(&self, clause: usize) -> InputId {
        self.panel.clauses()[clause].input().id()
    }

    /// Type into the focused input and let the panel react.
    pub async fn type_text(&mut self, text: &str) {
        self.document.type_text(text);
        self.document.pump(&mut self.panel).await.expect("pump");
    }

    pub async fn press(&mut self, key: crate::Key) {
        self.document.press(key);
        self.document.pump(&mut self.panel).await.expect("pump");
    }
}

impl AsyncTestContext for PanelFixture {
    async fn setup() -> Self {
        crate::testing::common_init();
        Self::new()
    }
}
