use crate::{Size, TextStyle};

/// Text measurement oracle.
///
/// Widths are whatever the host's font machinery reports; callers must not
/// assume anything beyond non-negative sizes.
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> Size;
}

/// Deterministic measurer: every character advances by a fixed amount,
/// bold characters by a larger one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceMeasurer {
    pub advance: f32,
    pub bold_advance: f32,
    pub line_height: f32,
}

impl Default for FixedAdvanceMeasurer {
    fn default() -> Self {
        Self {
            advance: 10.0,
            bold_advance: 12.0,
            line_height: 22.0,
        }
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> Size {
        let count = text.chars().count();
        if count == 0 {
            return Size::ZERO;
        }
        let advance = if style.is_bold() {
            self.bold_advance
        } else {
            self.advance
        };
        Size::new(advance * count as f32, self.line_height)
    }
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, &TextStyle) -> Size,
{
    fn measure(&self, text: &str, style: &TextStyle) -> Size {
        self(text, style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_is_wider_than_regular() {
        let m = FixedAdvanceMeasurer::default();
        let plain = m.measure("select", &TextStyle::default());
        let bold = m.measure("select", &TextStyle::bold());
        assert_eq!(plain.width, 60.0);
        assert_eq!(bold.width, 72.0);
        assert_eq!(plain.height, bold.height);
    }

    #[test]
    fn empty_text_has_no_extent() {
        let m = FixedAdvanceMeasurer::default();
        assert_eq!(m.measure("", &TextStyle::bold()), Size::ZERO);
    }

    #[test]
    fn closures_measure_too() {
        let m = |text: &str, _: &TextStyle| Size::new(text.len() as f32, 1.0);
        assert_eq!(m.measure("abc", &TextStyle::default()).width, 3.0);
    }
}
