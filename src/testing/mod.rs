#![cfg(test)]
crate::reexport!(context);
pub use rstest::*;

pub(in crate::testing) fn common_init() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}

mod fixture_tests {
    use super::{super::*, *};

    #[test_context(PanelFixture)]
    #[tokio::test]
    async fn panel_sits_below_the_card(ctx: &mut PanelFixture) {
        let card = ctx.card.bounds().unwrap();
        assert!(ctx.panel.origin().y >= card.bottom());
        assert_eq!(ctx.document.focused(), Some(ctx.input_id(0)));
    }

    #[test_context(PanelFixture)]
    #[rstest]
    #[case("Rank", true)]
    #[case("revenue", true)]
    #[case("select", false)]
    #[tokio::test]
    async fn card_answers_column_lookups(
        ctx: &mut PanelFixture,
        #[case] label: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(ctx.card.is_column_label(label), expected);
    }
}
