use std::iter;

use gabor_engine::{GameMode, GameSession};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::color;

type Value = &'static dyn Fn(&GameSession) -> String;

const TARGET_ROWS: &[(&str, Value)] = &[
    ("ROUND:", &|session| session.stats().round().to_string()),
    ("SCORE:", &|session| session.stats().score().to_string()),
    ("FOUND:", &|session| session.stats().correct_picks().to_string()),
    ("MISSES:", &|session| session.stats().mistakes().to_string()),
];

const PAIR_ROWS: &[(&str, Value)] = &[
    ("ROUND:", &|session| session.stats().round().to_string()),
    ("PAIRS:", &|session| {
        let board = session.board();
        let found = board.as_pair().map_or(0, |board| board.matched_count() / 2);
        format!("{found}/{}", board.slot_count() / 2)
    }),
    ("MATCHED:", &|session| session.stats().matched_pairs().to_string()),
    ("MISSES:", &|session| session.stats().mistakes().to_string()),
];

/// Round number, score and counters of a session.
pub struct SessionStatsDisplay<'a> {
    session: &'a GameSession,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SessionStatsDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn rows(&self) -> &'static [(&'static str, Value)] {
        match self.session.mode() {
            GameMode::TargetSelection => TARGET_ROWS,
            GameMode::PairMatching => PAIR_ROWS,
        }
    }

    pub fn width(&self) -> u16 {
        18 + super::block_margin(self.block.as_ref()).0
    }

    pub fn height(&self) -> u16 {
        super::saturating_u16(self.rows().len()) + super::block_margin(self.block.as_ref()).1
    }
}

impl Widget for SessionStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = Style::new().fg(color::TEXT);
        let rows = self.rows();
        let row_areas = Layout::vertical(rows.iter().map(|_| Constraint::Length(1))).split(area);

        for ((label, value), row_area) in iter::zip(rows, row_areas.iter()) {
            let [label_area, value_area] =
                row_area.layout(&Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]));
            Line::styled(*label, style)
                .left_aligned()
                .render(label_area, buf);
            Line::styled(value(self.session), style)
                .right_aligned()
                .render(value_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use gabor_engine::{GameConfig, RoundSeed};

    use super::*;

    fn render_to_string(session: &GameSession) -> String {
        let display = SessionStatsDisplay::new(session);
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_owned())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_rows_follow_mode() {
        let seed = RoundSeed::from_bytes([3; 16]);
        let config = GameConfig {
            target_patch_size: 4,
            pair_patch_size: 4,
            ..GameConfig::default()
        };

        let target = GameSession::with_seed(GameMode::TargetSelection, config, 30, seed).unwrap();
        let text = render_to_string(&target);
        assert!(text.contains("SCORE:"));
        assert!(!text.contains("PAIRS:"));

        let pair = GameSession::with_seed(GameMode::PairMatching, config, 30, seed).unwrap();
        let text = render_to_string(&pair);
        assert!(text.contains("PAIRS:"));
        assert!(text.contains("0/2"));
    }
}
