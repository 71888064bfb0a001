use crate::Result;
use confique::Config as _;
use std::{sync::OnceLock, time::Duration};

#[derive(confique::Config, Clone, Debug)]
pub struct Config {
    #[config(nested)]
    pub layout: LayoutConfig,
    #[config(nested)]
    pub timing: TimingConfig,
    #[config(nested)]
    pub palette: PaletteConfig,
}

/// Logical pixel sizes of the query panel.
#[derive(confique::Config, Clone, Debug)]
pub struct LayoutConfig {
    #[config(env = "QCANVAS_MIN_CLAUSE_WIDTH", default = 150.0)]
    pub min_clause_width: f32,
    #[config(env = "QCANVAS_CLAUSE_HEIGHT", default = 34.0)]
    pub clause_height: f32,
    #[config(env = "QCANVAS_CLAUSE_GAP", default = 10.0)]
    pub clause_gap: f32,
    /// Gap between a clause label and its text.
    #[config(env = "QCANVAS_LABEL_MARGIN", default = 10.0)]
    pub label_margin: f32,
    /// Padding between the input frame and the text it surrounds.
    #[config(env = "QCANVAS_FRAME_MARGIN", default = 4.0)]
    pub frame_margin: f32,
    #[config(env = "QCANVAS_CARET_HEIGHT", default = 24.0)]
    pub caret_height: f32,
    /// Vertical space kept between the table card and the panel area.
    #[config(env = "QCANVAS_PANEL_MARGIN", default = 20.0)]
    pub panel_margin: f32,
}

#[derive(confique::Config, Clone, Debug)]
pub struct TimingConfig {
    #[config(env = "QCANVAS_BLINK_PERIOD_MS", default = 1000)]
    pub blink_period_ms: u64,
    #[config(env = "QCANVAS_BLINK_RESUME_MS", default = 400)]
    pub blink_resume_ms: u64,
    #[config(env = "QCANVAS_HOVER_FADE_MS", default = 1000)]
    pub hover_fade_ms: u64,
}

impl TimingConfig {
    pub fn blink_period(&self) -> Duration {
        Duration::from_millis(self.blink_period_ms)
    }

    pub fn blink_resume(&self) -> Duration {
        Duration::from_millis(self.blink_resume_ms)
    }

    pub fn hover_fade(&self) -> Duration {
        Duration::from_millis(self.hover_fade_ms)
    }
}

#[derive(confique::Config, Clone, Debug)]
pub struct PaletteConfig {
    #[config(env = "QCANVAS_KEYWORD_COLOR", default = "#0077a9")]
    pub keyword: String,
    #[config(env = "QCANVAS_LABEL_COLOR", default = "#3491dc")]
    pub label: String,
    #[config(env = "QCANVAS_FRAME_STROKE", default = "#c0c0c0")]
    pub frame_stroke: String,
    #[config(env = "QCANVAS_CARET_COLOR", default = "black")]
    pub caret: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config::builder().env().load()?)
    }
}

pub fn config() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(|| {
        Config::from_env()
            .expect("Failed to load one or more value configuration from the current environment")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_loaded_without_environment() {
        let config = config();
        assert_eq!(config.layout.min_clause_width, 150.0);
        assert_eq!(config.layout.clause_height, 34.0);
        assert_eq!(config.palette.keyword, "#0077a9");
        assert_eq!(config.timing.hover_fade(), Duration::from_secs(1));
    }
}
