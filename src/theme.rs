use gpui::*;

#[derive(Clone, Debug)]
pub struct ChartTheme {
    pub background: Hsla,
    pub tooltip_background: Hsla,
    pub tooltip_border: Hsla,
    pub tooltip_text: Hsla,
    pub tooltip_text_size: Pixels,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: gpui::transparent_black(),
            tooltip_background: gpui::black().alpha(0.8),
            tooltip_border: gpui::white().alpha(0.2),
            tooltip_text: gpui::white(),
            tooltip_text_size: px(11.0),
        }
    }
}
