//! Application state and page navigation
//!
//! The game is a small set of pages. [`AppState::handle`] applies a
//! [`PageEvent`] to the current page; events that make no sense on the
//! current page are ignored.

use stackplus_core::{LevelTable, ScoreStore};

use crate::config::{SettingsConfig, MAX_VOLUME};

/// A screen of the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// Assets are being prepared
    Loading,
    Menu,
    /// Level select
    Levels,
    /// Playing the named shape
    Game(String),
    Settings,
    Tutorial,
    Credits,
}

/// Navigation and settings requests from the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// Loading finished
    Loaded,
    OpenLevels,
    OpenSettings,
    OpenTutorial,
    OpenCredits,
    /// Start a round on a shape
    Play(String),
    /// Leave the current page (also ends a round)
    Back,
    /// Step the music volume, wrapping to off
    CycleMusic,
    /// Step the sound effect volume, wrapping to off
    CycleSfx,
    ToggleInvertX,
    /// Close the application from any page
    Quit,
}

/// Top-level application state
#[derive(Debug, Clone)]
pub struct AppState {
    page: Page,
    running: bool,
    settings: SettingsConfig,
}

impl AppState {
    pub fn new(settings: SettingsConfig) -> Self {
        Self {
            page: Page::Loading,
            running: true,
            settings: settings.clamped(),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn settings(&self) -> &SettingsConfig {
        &self.settings
    }

    /// Apply an event; returns whether anything changed
    ///
    /// `Play` only succeeds for a level that is unlocked with the given scores.
    pub fn handle(&mut self, event: PageEvent, levels: &LevelTable, scores: &dyn ScoreStore) -> bool {
        if event == PageEvent::Quit {
            self.running = false;
            return true;
        }

        let next = match (&self.page, event) {
            (Page::Loading, PageEvent::Loaded) => Page::Menu,

            (Page::Menu, PageEvent::OpenLevels) => Page::Levels,
            (Page::Menu, PageEvent::OpenSettings) => Page::Settings,
            (Page::Menu, PageEvent::OpenTutorial) => Page::Tutorial,
            (Page::Menu, PageEvent::OpenCredits) => Page::Credits,

            (Page::Levels, PageEvent::Play(shape)) => {
                if !levels.is_unlocked(&shape, scores) {
                    log::warn!("Level '{}' is locked", shape);
                    return false;
                }
                Page::Game(shape)
            }
            (Page::Levels, PageEvent::Back) => Page::Menu,

            (Page::Game(_), PageEvent::Back) => Page::Levels,

            (Page::Settings, PageEvent::CycleMusic) => {
                self.settings.music = cycle_volume(self.settings.music);
                return true;
            }
            (Page::Settings, PageEvent::CycleSfx) => {
                self.settings.sfx = cycle_volume(self.settings.sfx);
                return true;
            }
            (Page::Settings, PageEvent::ToggleInvertX) => {
                self.settings.invert_x_axis = !self.settings.invert_x_axis;
                return true;
            }

            (Page::Settings | Page::Tutorial | Page::Credits, PageEvent::Back) => Page::Menu,

            (page, event) => {
                log::debug!("Ignoring {:?} on {:?}", event, page);
                return false;
            }
        };

        log::debug!("Page {:?} -> {:?}", self.page, next);
        self.page = next;
        true
    }
}

fn cycle_volume(level: u8) -> u8 {
    (level + 1) % (MAX_VOLUME + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackplus_core::MemoryScoreStore;

    fn state_on(page: Page) -> AppState {
        let mut state = AppState::new(SettingsConfig::default());
        state.page = page;
        state
    }

    #[test]
    fn test_starts_loading() {
        let state = AppState::new(SettingsConfig::default());
        assert_eq!(state.page(), &Page::Loading);
        assert!(state.is_running());
    }

    #[test]
    fn test_menu_navigation() {
        let levels = LevelTable::builtin();
        let scores = MemoryScoreStore::new();
        let mut state = AppState::new(SettingsConfig::default());
        assert!(state.handle(PageEvent::Loaded, &levels, &scores));
        assert_eq!(state.page(), &Page::Menu);
        assert!(state.handle(PageEvent::OpenCredits, &levels, &scores));
        assert_eq!(state.page(), &Page::Credits);
        assert!(state.handle(PageEvent::Back, &levels, &scores));
        assert_eq!(state.page(), &Page::Menu);
    }

    #[test]
    fn test_play_requires_unlock() {
        let levels = LevelTable::builtin();
        let mut scores = MemoryScoreStore::new();
        let mut state = state_on(Page::Levels);

        assert!(!state.handle(PageEvent::Play("rectangle".into()), &levels, &scores));
        assert_eq!(state.page(), &Page::Levels);

        scores.submit("square", 5).unwrap();
        assert!(state.handle(PageEvent::Play("rectangle".into()), &levels, &scores));
        assert_eq!(state.page(), &Page::Game("rectangle".into()));

        assert!(state.handle(PageEvent::Back, &levels, &scores));
        assert_eq!(state.page(), &Page::Levels);
    }

    #[test]
    fn test_settings_cycle() {
        let levels = LevelTable::builtin();
        let scores = MemoryScoreStore::new();
        let mut state = state_on(Page::Settings);
        assert_eq!(state.settings().music, 3);
        state.handle(PageEvent::CycleMusic, &levels, &scores);
        assert_eq!(state.settings().music, 0);
        state.handle(PageEvent::CycleMusic, &levels, &scores);
        assert_eq!(state.settings().music, 1);
        state.handle(PageEvent::ToggleInvertX, &levels, &scores);
        assert!(state.settings().invert_x_axis);
    }

    #[test]
    fn test_settings_only_change_on_settings_page() {
        let levels = LevelTable::builtin();
        let scores = MemoryScoreStore::new();
        let mut state = state_on(Page::Menu);
        assert!(!state.handle(PageEvent::CycleSfx, &levels, &scores));
        assert_eq!(state.settings().sfx, 3);
    }

    #[test]
    fn test_quit_from_game() {
        let levels = LevelTable::builtin();
        let scores = MemoryScoreStore::new();
        let mut state = state_on(Page::Game("square".into()));
        assert!(state.handle(PageEvent::Quit, &levels, &scores));
        assert!(!state.is_running());
    }
}
