//! Screen flow
//!
//! Which screen is showing and how UI events move between them. Transitions
//! are a pure function of the current screen and one event; the simulation
//! never sees this state.

use serde::{Deserialize, Serialize};

use crate::sim::ClimbMode;

/// Main menu entries, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuOption {
    NormalClimb,
    HarderClimb,
    HighScores,
    Music,
    Credits,
    Collectibles,
}

impl MenuOption {
    pub const ALL: [MenuOption; 6] = [
        MenuOption::NormalClimb,
        MenuOption::HarderClimb,
        MenuOption::HighScores,
        MenuOption::Music,
        MenuOption::Credits,
        MenuOption::Collectibles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MenuOption::NormalClimb => ClimbMode::Normal.as_str(),
            MenuOption::HarderClimb => ClimbMode::Harder.as_str(),
            MenuOption::HighScores => "High Scores",
            MenuOption::Music => "Music",
            MenuOption::Credits => "Credits",
            MenuOption::Collectibles => "Collectibles",
        }
    }
}

/// Pause menu entries, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PauseOption {
    Resume,
    Music,
    HighScores,
    Quit,
}

impl PauseOption {
    pub const ALL: [PauseOption; 4] = [
        PauseOption::Resume,
        PauseOption::Music,
        PauseOption::HighScores,
        PauseOption::Quit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PauseOption::Resume => "Resume",
            PauseOption::Music => "Music Options",
            PauseOption::HighScores => "High Scores",
            PauseOption::Quit => "Quit to Menu",
        }
    }
}

/// Wrapping selection cursor over a fixed list of options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    index: usize,
}

impl Cursor {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn up(&mut self, len: usize) {
        if len > 0 {
            self.index = (self.index + len - 1) % len;
        }
    }

    pub fn down(&mut self, len: usize) {
        if len > 0 {
            self.index = (self.index + 1) % len;
        }
    }

    /// The highlighted entry of `options`
    pub fn selected<T: Copy>(&self, options: &[T]) -> Option<T> {
        options.get(self.index).copied()
    }
}

/// UI-level events fed to `Screen::next`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    /// A main menu entry was confirmed
    Menu(MenuOption),
    /// A pause menu entry was confirmed
    Pause(PauseOption),
    /// Escape / back
    Back,
    /// Any other key press
    AnyKey,
    /// The running session reported a death
    PlayerDied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Main menu over the demo climb
    #[default]
    Menu,
    /// Normal climb start height: bottom or a saved checkpoint
    CheckpointSelect,
    /// Blank "press any key" card before a run
    Narrative(ClimbMode),
    /// A run is ticking
    Gameplay(ClimbMode),
    /// Run suspended; simulation does not tick
    Paused(ClimbMode),
    GameOver(ClimbMode),
    /// Leaderboard; `resume` is set when opened from the pause menu
    HighScores { resume: Option<ClimbMode> },
    /// Track and volume picker; `resume` is set when opened from the pause menu
    Music { resume: Option<ClimbMode> },
    Credits,
    Collectibles,
}

impl Screen {
    /// Screen after `event`; unhandled events leave the screen unchanged
    pub fn next(self, event: ScreenEvent) -> Screen {
        use ScreenEvent as E;
        match (self, event) {
            (Screen::Menu, E::Menu(option)) => match option {
                MenuOption::NormalClimb => Screen::CheckpointSelect,
                MenuOption::HarderClimb => Screen::Narrative(ClimbMode::Harder),
                MenuOption::HighScores => Screen::HighScores { resume: None },
                MenuOption::Music => Screen::Music { resume: None },
                MenuOption::Credits => Screen::Credits,
                MenuOption::Collectibles => Screen::Collectibles,
            },

            (Screen::CheckpointSelect, E::AnyKey) => Screen::Narrative(ClimbMode::Normal),
            (Screen::CheckpointSelect, E::Back) => Screen::Menu,

            (Screen::Narrative(mode), E::AnyKey | E::Back) => Screen::Gameplay(mode),

            (Screen::Gameplay(mode), E::Back) => Screen::Paused(mode),
            (Screen::Gameplay(mode), E::PlayerDied) => Screen::GameOver(mode),

            (Screen::Paused(mode), E::Back | E::Pause(PauseOption::Resume)) => Screen::Gameplay(mode),
            (Screen::Paused(mode), E::Pause(PauseOption::Music)) => Screen::Music { resume: Some(mode) },
            (Screen::Paused(mode), E::Pause(PauseOption::HighScores)) => Screen::HighScores { resume: Some(mode) },
            (Screen::Paused(_), E::Pause(PauseOption::Quit)) => Screen::Menu,

            (Screen::GameOver(_), E::AnyKey | E::Back) => Screen::Menu,

            (Screen::HighScores { resume }, E::AnyKey | E::Back) => match resume {
                Some(mode) => Screen::Paused(mode),
                None => Screen::Menu,
            },

            (Screen::Music { resume }, E::Back) => match resume {
                Some(mode) => Screen::Paused(mode),
                None => Screen::Menu,
            },

            (Screen::Credits | Screen::Collectibles, E::Back) => Screen::Menu,

            (screen, _) => screen,
        }
    }

    /// Whether the gameplay session should tick on this screen
    #[inline]
    pub fn runs_session(&self) -> bool {
        matches!(self, Screen::Gameplay(_))
    }

    /// Whether the demo climb plays behind this screen
    #[inline]
    pub fn shows_demo(&self) -> bool {
        matches!(self, Screen::Menu)
    }

    /// Climb mode of the run this screen belongs to, if any
    pub fn mode(&self) -> Option<ClimbMode> {
        match *self {
            Screen::Narrative(mode) | Screen::Gameplay(mode) | Screen::Paused(mode) | Screen::GameOver(mode) => {
                Some(mode)
            }
            Screen::CheckpointSelect => Some(ClimbMode::Normal),
            Screen::HighScores { resume } | Screen::Music { resume } => resume,
            _ => None,
        }
    }
}
