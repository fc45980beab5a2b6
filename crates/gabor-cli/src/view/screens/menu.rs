use crossterm::event::{Event, KeyCode, KeyEventKind};
use gabor_engine::{GameConfig, GameMode, GameSession, RoundSeed};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block as BlockWidget, Padding},
};

use crate::{
    tui::{Runtime, Screen, ScreenTransition},
    view::{
        screens::GameScreen,
        widgets::{KeyHint, KeyHintsDisplay, color},
    },
};

const HINTS: &[KeyHint] = &[
    (&["1"], "Find the same pattern"),
    (&["2"], "Pair matching"),
    (&["q", "Esc"], "Quit"),
];

/// Settings every game started from the menu shares.
#[derive(Debug, Clone, Copy)]
pub struct PlaySettings {
    pub config: GameConfig,
    pub fps: u64,
    pub seed: Option<RoundSeed>,
}

/// Main menu: pick a game mode or quit.
#[derive(Debug)]
pub struct MenuScreen {
    settings: PlaySettings,
    error: Option<String>,
}

impl MenuScreen {
    pub fn new(settings: PlaySettings) -> Self {
        Self {
            settings,
            error: None,
        }
    }

    fn start(&mut self, mode: GameMode) -> ScreenTransition {
        let PlaySettings { config, fps, seed } = self.settings;
        let session = match seed {
            Some(seed) => GameSession::with_seed(mode, config, fps, seed),
            None => GameSession::new(mode, config, fps),
        };
        match session {
            Ok(session) => {
                self.error = None;
                ScreenTransition::Push(Box::new(GameScreen::new(session)))
            }
            Err(err) => {
                tracing::warn!(%mode, %err, "cannot start game");
                self.error = Some(format!("Cannot start {mode}: {err}"));
                ScreenTransition::Stay
            }
        }
    }
}

impl Screen for MenuScreen {
    fn on_active(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(None);
        runtime.set_frame_rate(self.settings.fps);
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: &Event) -> ScreenTransition {
        let Event::Key(key) = event else {
            return ScreenTransition::Stay;
        };
        if key.kind != KeyEventKind::Press {
            return ScreenTransition::Stay;
        }
        match key.code {
            KeyCode::Char('1') => self.start(GameMode::TargetSelection),
            KeyCode::Char('2') => self.start(GameMode::PairMatching),
            KeyCode::Char('q') | KeyCode::Esc => ScreenTransition::Exit,
            _ => ScreenTransition::Stay,
        }
    }

    fn update(&mut self, _runtime: &mut Runtime) {}

    fn draw(&self, frame: &mut Frame) {
        let title = Style::new().fg(color::ACCENT).add_modifier(Modifier::BOLD);
        let key = Style::new().fg(color::ACCENT);
        let text = Style::new().fg(color::TEXT);

        let mut lines = vec![
            Line::styled("GABOR PATCH GAMES", title),
            Line::default(),
            Line::from(vec![
                Span::styled("1", key),
                Span::styled("  Find the same pattern", text),
            ]),
            Line::from(vec![
                Span::styled("2", key),
                Span::styled("  Pair matching", text),
            ]),
            Line::from(vec![Span::styled("q", key), Span::styled("  Quit", text)]),
        ];
        if let Some(error) = &self.error {
            lines.push(Line::default());
            lines.push(Line::styled(error.as_str(), Style::new().fg(color::WRONG)));
        }
        let menu = Text::from(lines).centered();

        let viewport = frame
            .area()
            .centered(Constraint::Max(60), Constraint::Max(14));
        let outer = BlockWidget::bordered()
            .border_style(Style::new().fg(color::DIM))
            .padding(Padding::uniform(1));
        let [menu_area, hint_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
                .areas(outer.inner(viewport));

        frame.render_widget(outer, viewport);
        frame.render_widget(menu, menu_area);
        frame.render_widget(KeyHintsDisplay::new(HINTS), hint_area);
    }
}
