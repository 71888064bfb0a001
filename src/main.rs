use qcanvas::{
    Config, Document, FixedAdvanceMeasurer, Key, Point, QueryInput, Result, Scene, Size, Table,
    TableCard,
};
use std::{cell::RefCell, rc::Rc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn corporations() -> Result<Table> {
    Table::from_cells(
        "Corporations",
        [
            "Rank", "Company", "Country", "Industry", "Revenue", //
            "1", "Walmart", "United States", "Retail", "573", //
            "2", "Amazon", "United States", "E-commerce", "470", //
            "3", "State Grid", "China", "Energy", "461", //
            "4", "China Petroleum", "China", "Petroleum", "412", //
            "5", "Sinopec Group", "China", "Petroleum", "401", //
            "6", "Saudi Aramco", "Saudi Arabia", "Energy", "400", //
            "7", "Apple", "United States", "Technology", "366", //
            "8", "Volkswagen", "Germany", "Automobiles", "296", //
            "9", "China Construction", "China", "Engineering", "294", //
            "10", "CVS Health", "United States", "Health care", "292",
        ],
        5,
    )
}

/// Scripted session against the in-memory scene: type a query, click a
/// column, hop between clauses and report where the caret ends up.
async fn run(config: &Config) -> Result {
    let scene = Rc::new(RefCell::new(Scene::new(
        Size::new(1280.0, 720.0),
        FixedAdvanceMeasurer::default(),
    )));
    let card = Rc::new(TableCard::add(
        scene.clone(),
        corporations()?,
        Point::new(40.0, 40.0),
    ));
    let mut document = Document::new();
    let mut panel = QueryInput::create(scene.clone(), card.clone(), &mut document, config)?;

    document.type_text("SELECT Company, ");
    document.pump(&mut panel).await?;
    let bounds = card.bounds().unwrap_or_default();
    let revenue = Point::new(bounds.right() - 5.0, bounds.bottom() - 5.0);
    if let Some(label) = panel.click_table(revenue)? {
        info!("Clicked column {label}");
    }
    info!("SELECT clause: {:?}", panel.value());

    document.press(Key::ArrowDown);
    document.pump(&mut panel).await?;
    document.type_text("FROM Corporations");
    document.pump(&mut panel).await?;
    info!("Caret at {} in clause {}", panel.caret_position(), panel.active_index());

    document.press(Key::Home);
    document.press(Key::ArrowUp);
    document.pump(&mut panel).await?;
    info!(
        "Caret at {} in clause {} (offset {})",
        panel.caret_position(),
        panel.active_index(),
        panel.active_clause().caret()
    );

    // a click elsewhere on the page takes focus away; the panel takes it back
    document.blur_all();
    document.pump(&mut panel).await?;

    scene.borrow_mut().set_viewport(Size::new(800.0, 600.0));
    panel.on_resize();
    panel.settle().await;
    info!(
        "Panel at {} after resize, {} scene nodes",
        panel.origin(),
        scene.borrow().node_count()
    );
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = run(&config).await {
        error!("{e}");
        std::process::exit(1);
    }
}
