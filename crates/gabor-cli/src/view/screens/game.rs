use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use gabor_engine::{
    GameMode, GameSession, RenderedRound, RoundBoard, RoundToken, SlotState, TargetMark,
};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block as BlockWidget, Padding},
};

use crate::{
    tui::{Runtime, Screen, ScreenTransition},
    view::{
        CellRenderer, PatchCells,
        widgets::{
            KeyHint, KeyHintsDisplay, PatchDisplay, PatchGridDisplay, SessionStatsDisplay,
            SlotLook, color,
        },
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Cursor after one step on a grid of `len` slots, staying put at the
    /// edges.
    fn step(self, cursor: usize, len: usize, columns: usize) -> usize {
        let columns = columns.max(1);
        let (row, col) = (cursor / columns, cursor % columns);
        let next = match self {
            Self::Left if col > 0 => cursor - 1,
            Self::Right if col + 1 < columns => cursor + 1,
            Self::Up if row > 0 => cursor - columns,
            Self::Down => cursor + columns,
            _ => cursor,
        };
        if next < len { next } else { cursor }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Move(Direction),
    SelectCursor,
    SelectSlot(usize),
    Restart,
    Back,
}

impl Action {
    fn from_key_event(event: &KeyEvent) -> Option<Self> {
        match event.code {
            KeyCode::Char('k') | KeyCode::Up => Some(Self::Move(Direction::Up)),
            KeyCode::Char('j') | KeyCode::Down => Some(Self::Move(Direction::Down)),
            KeyCode::Char('h') | KeyCode::Left => Some(Self::Move(Direction::Left)),
            KeyCode::Char('l') | KeyCode::Right => Some(Self::Move(Direction::Right)),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Self::SelectCursor),
            KeyCode::Char(c @ '1'..='9') => c
                .to_digit(10)
                .and_then(|digit| usize::try_from(digit - 1).ok())
                .map(Self::SelectSlot),
            KeyCode::Char('r') => Some(Self::Restart),
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Back),
            _ => None,
        }
    }

    fn bindings() -> &'static [KeyHint] {
        &[
            (&["←", "↓", "↑", "→"], "Move"),
            (&["Enter", "Space"], "Select"),
            (&["1-9"], "Pick"),
            (&["r"], "New board"),
            (&["q", "Esc"], "Menu"),
        ]
    }
}

/// One running game, either mode.
#[derive(Debug)]
pub struct GameScreen {
    session: GameSession,
    cursor: usize,
    rendered: RenderedRound<PatchCells>,
    rendered_token: RoundToken,
}

impl GameScreen {
    pub fn new(session: GameSession) -> Self {
        let rendered = session.render_round(&mut CellRenderer);
        let rendered_token = session.token();
        Self {
            session,
            cursor: 0,
            rendered,
            rendered_token,
        }
    }

    /// Re-synthesizes the patches once the session moved to another round.
    fn refresh(&mut self) {
        if self.rendered_token == self.session.token() {
            return;
        }
        self.rendered = self.session.render_round(&mut CellRenderer);
        self.rendered_token = self.session.token();
        self.cursor = 0;
    }

    fn select(&mut self, slot: usize) {
        let outcome = self.session.select(slot);
        tracing::debug!(slot, ?outcome, "slot picked");
    }

    fn slot_looks(&self) -> Vec<SlotLook> {
        let slots = 0..self.session.board().slot_count();
        match self.session.board() {
            RoundBoard::Target(board) => slots
                .map(|slot| match board.mark(slot) {
                    Some(TargetMark::Wrong) => SlotLook::Wrong,
                    Some(TargetMark::Correct) => SlotLook::Correct,
                    Some(TargetMark::Unmarked) | None => SlotLook::Normal,
                })
                .collect(),
            RoundBoard::Pair(board) => slots
                .map(|slot| match board.state(slot) {
                    Some(SlotState::Selected) => SlotLook::Selected,
                    Some(SlotState::Matched) => SlotLook::Hidden,
                    Some(SlotState::Unselected) | None => SlotLook::Normal,
                })
                .collect(),
        }
    }
}

impl Screen for GameScreen {
    fn on_active(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(Some(self.session.fps()));
        runtime.set_frame_rate(self.session.fps());
    }

    fn on_close(&mut self, _runtime: &mut Runtime) {
        let stats = self.session.stats();
        tracing::info!(
            mode = %self.session.mode(),
            seed = %self.session.seed(),
            round = stats.round(),
            score = stats.score(),
            matched_pairs = stats.matched_pairs(),
            mistakes = stats.mistakes(),
            "game closed"
        );
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: &Event) -> ScreenTransition {
        let Event::Key(key) = event else {
            return ScreenTransition::Stay;
        };
        if key.kind != KeyEventKind::Press {
            return ScreenTransition::Stay;
        }
        let Some(action) = Action::from_key_event(key) else {
            return ScreenTransition::Stay;
        };

        let board = self.session.board();
        let (len, columns) = (board.slot_count(), board.columns());
        match action {
            Action::Move(direction) => self.cursor = direction.step(self.cursor, len, columns),
            Action::SelectCursor => self.select(self.cursor),
            Action::SelectSlot(slot) => {
                if slot < len {
                    self.cursor = slot;
                    self.select(slot);
                }
            }
            Action::Restart => {
                self.session.restart_round();
                self.refresh();
            }
            Action::Back => return ScreenTransition::Pop,
        }
        ScreenTransition::Stay
    }

    fn update(&mut self, _runtime: &mut Runtime) {
        self.session.increment_frame();
        self.refresh();
    }

    fn draw(&self, frame: &mut Frame) {
        let title = self.session.mode().to_string().to_uppercase();
        let viewport = frame
            .area()
            .centered(Constraint::Max(120), Constraint::Max(60));
        let outer = BlockWidget::bordered()
            .title(Line::from(format!(" {title} ")).centered())
            .border_style(Style::new().fg(color::DIM))
            .padding(Padding::horizontal(1));
        let [body_area, feedback_area, hint_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(outer.inner(viewport));
        frame.render_widget(outer, viewport);

        let prompt = match self.session.mode() {
            GameMode::TargetSelection => "Find the target",
            GameMode::PairMatching => "Find the pairs",
        };
        let grid = PatchGridDisplay::new(&self.rendered.slots, self.session.board().columns())
            .looks(self.slot_looks())
            .cursor(self.cursor)
            .block(BlockWidget::new().title(Line::from(prompt).centered()));
        let stats = SessionStatsDisplay::new(&self.session)
            .block(BlockWidget::bordered().title(Line::from("STATS").centered()));
        let target = self.rendered.target.as_ref().map(|patch| {
            PatchDisplay::new(patch)
                .block(BlockWidget::bordered().title(Line::from("TARGET").centered()))
        });

        let (grid_width, grid_height) = (grid.width(), grid.height());
        let (stats_width, stats_height) = (stats.width(), stats.height());
        let (target_width, target_height) = target
            .as_ref()
            .map_or((0, 0), |target| (target.width(), target.height()));

        let [grid_area, side_area] = Layout::horizontal([
            Constraint::Length(grid_width),
            Constraint::Length(stats_width.max(target_width)),
        ])
        .flex(Flex::Center)
        .spacing(2)
        .areas(body_area);
        let [target_area, stats_area] = Layout::vertical([
            Constraint::Length(target_height),
            Constraint::Length(stats_height),
        ])
        .spacing(1)
        .areas(side_area);

        frame.render_widget(
            grid,
            grid_area.centered(
                Constraint::Length(grid_width),
                Constraint::Length(grid_height),
            ),
        );
        if let Some(target) = target {
            frame.render_widget(
                target,
                target_area.centered(
                    Constraint::Length(target_width),
                    Constraint::Length(target_height),
                ),
            );
        }
        frame.render_widget(stats, stats_area);

        if let Some(feedback) = self.session.feedback() {
            let color = if feedback.is_positive() {
                color::CORRECT
            } else {
                color::WRONG
            };
            let style = Style::new().fg(color).add_modifier(Modifier::BOLD);
            frame.render_widget(
                Line::styled(feedback.to_string(), style).centered(),
                feedback_area,
            );
        }
        frame.render_widget(KeyHintsDisplay::new(Action::bindings()), hint_area);
    }
}

#[cfg(test)]
mod tests {
    use gabor_engine::{Feedback, GameConfig, GameMode, RoundSeed};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    const FPS: u64 = 30;

    fn screen(mode: GameMode) -> GameScreen {
        let config = GameConfig {
            target_patch_size: 6,
            pair_patch_size: 6,
            ..GameConfig::default()
        };
        let seed = RoundSeed::from_bytes([3; 16]);
        GameScreen::new(GameSession::with_seed(mode, config, FPS, seed).unwrap())
    }

    fn press(screen: &mut GameScreen, runtime: &mut Runtime, code: KeyCode) -> ScreenTransition {
        screen.handle_event(runtime, &Event::Key(KeyEvent::from(code)))
    }

    fn screen_text(screen: &GameScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 50)).unwrap();
        terminal.draw(|frame| screen.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_direction_step() {
        // 3x3 grid
        assert_eq!(Direction::Right.step(0, 9, 3), 1);
        assert_eq!(Direction::Right.step(2, 9, 3), 2);
        assert_eq!(Direction::Left.step(3, 9, 3), 3);
        assert_eq!(Direction::Down.step(1, 9, 3), 4);
        assert_eq!(Direction::Down.step(7, 9, 3), 7);
        assert_eq!(Direction::Up.step(1, 9, 3), 1);
        assert_eq!(Direction::Up.step(8, 9, 3), 5);
    }

    #[test]
    fn test_digit_keys_map_to_slots() {
        let key = |c| KeyEvent::from(KeyCode::Char(c));
        assert_eq!(Action::from_key_event(&key('1')), Some(Action::SelectSlot(0)));
        assert_eq!(Action::from_key_event(&key('9')), Some(Action::SelectSlot(8)));
        assert_eq!(Action::from_key_event(&key('0')), None);
    }

    #[test]
    fn test_correct_pick_deals_next_round_after_delay() {
        let mut runtime = Runtime::new();
        let mut screen = screen(GameMode::TargetSelection);
        let target_slot = screen
            .session
            .board()
            .as_target()
            .unwrap()
            .round()
            .target_slot();
        let first_round = screen.rendered.clone();

        screen.cursor = target_slot;
        press(&mut screen, &mut runtime, KeyCode::Enter);
        assert_eq!(screen.session.feedback(), Some(Feedback::Correct));
        assert_eq!(screen.slot_looks()[target_slot], SlotLook::Correct);

        for _ in 0..FPS {
            screen.update(&mut runtime);
        }
        assert_eq!(screen.session.board().round(), 2);
        assert_eq!(screen.session.feedback(), None);
        assert_eq!(screen.cursor, 0);
        assert_ne!(screen.rendered, first_round);
    }

    #[test]
    fn test_wrong_pick_marks_slot() {
        let mut runtime = Runtime::new();
        let mut screen = screen(GameMode::TargetSelection);
        let target_slot = screen
            .session
            .board()
            .as_target()
            .unwrap()
            .round()
            .target_slot();
        let wrong = (target_slot + 1) % 9;
        let digit = char::from_digit(u32::try_from(wrong + 1).unwrap(), 10).unwrap();

        press(&mut screen, &mut runtime, KeyCode::Char(digit));
        assert_eq!(screen.cursor, wrong);
        assert_eq!(screen.session.feedback(), Some(Feedback::TryAgain));
        assert_eq!(screen.slot_looks()[wrong], SlotLook::Wrong);
        assert_eq!(screen.session.stats().mistakes(), 1);
    }

    #[test]
    fn test_pair_selection_looks() {
        let mut runtime = Runtime::new();
        let mut screen = screen(GameMode::PairMatching);
        press(&mut screen, &mut runtime, KeyCode::Char('1'));
        assert_eq!(screen.slot_looks()[0], SlotLook::Selected);
        assert_eq!(screen.rendered.target, None);
        assert_eq!(screen.rendered.slots.len(), 4);
    }

    #[test]
    fn test_restart_and_back() {
        let mut runtime = Runtime::new();
        let mut screen = screen(GameMode::TargetSelection);
        let token = screen.rendered_token;
        screen.cursor = 4;

        press(&mut screen, &mut runtime, KeyCode::Char('r'));
        assert_ne!(screen.rendered_token, token);
        assert_eq!(screen.rendered_token, screen.session.token());
        assert_eq!(screen.cursor, 0);

        assert!(matches!(
            press(&mut screen, &mut runtime, KeyCode::Esc),
            ScreenTransition::Pop
        ));
    }

    #[test]
    fn test_draw_shows_panels() {
        let mut runtime = Runtime::new();
        let mut screen = screen(GameMode::TargetSelection);
        let text = screen_text(&screen);
        assert!(text.contains("FIND THE SAME PATTERN"));
        assert!(text.contains("TARGET"));
        assert!(text.contains("STATS"));

        let target_slot = screen
            .session
            .board()
            .as_target()
            .unwrap()
            .round()
            .target_slot();
        screen.cursor = target_slot;
        press(&mut screen, &mut runtime, KeyCode::Char(' '));
        assert!(screen_text(&screen).contains("Correct!"));

        let screen = self::screen(GameMode::PairMatching);
        let text = screen_text(&screen);
        assert!(text.contains("PAIR MATCHING"));
        assert!(!text.contains("TARGET"));
    }
}
