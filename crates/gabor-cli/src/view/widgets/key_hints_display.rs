use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use super::color;

/// Keys that trigger an action, and what the action does.
pub type KeyHint = (&'static [&'static str], &'static str);

/// One centered line such as `←/→ Move · Enter Select · Esc Menu`.
#[derive(Debug)]
pub struct KeyHintsDisplay<'a> {
    hints: &'a [KeyHint],
}

impl<'a> KeyHintsDisplay<'a> {
    pub fn new(hints: &'a [KeyHint]) -> Self {
        Self { hints }
    }
}

impl Widget for KeyHintsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let key_style = Style::new().fg(color::ACCENT);
        let dim_style = Style::new().fg(color::DIM);
        let text_style = Style::new().fg(color::TEXT);

        let mut spans = vec![];
        for (n, (keys, action)) in self.hints.iter().enumerate() {
            if n > 0 {
                spans.push(Span::styled(" · ", dim_style));
            }
            let keys = keys.join("/");
            spans.push(Span::styled(keys, key_style));
            spans.push(Span::styled(format!(" {action}"), text_style));
        }
        Line::from(spans).centered().render(area, buf);
    }
}
