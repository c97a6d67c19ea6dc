//! Terminal front-end
//!
//! Owns the navigator and routes key presses to the active screen. The game
//! itself only sees `start`, `move_catcher`, `frame` and `exit`.

mod draw;
mod effects;

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use math_catcher::consts::{SCREEN_ADVANCE_MS, SELECT_DELAY_MS};
use math_catcher::heroes::{
    Accessory, Character, CharacterId, HeroDraft, HeroId, HeroRoster, all_characters,
};
use math_catcher::navigation::{Navigator, Screen};
use math_catcher::persistence::SharedStore;
use math_catcher::sim::{Direction, Game, GamePhase, StartMode};
use math_catcher::view::RenderSnapshot;
use math_catcher::{GameConfig, Settings};

use self::effects::Effects;

/// Longest hero name the builder accepts
const MAX_NAME_LEN: usize = 20;

/// Entries on the main menu
const MENU: [(&str, &str); 3] = [
    (
        "Math Ball Catcher",
        "Catch the falling numbers and solve equations to win!",
    ),
    (
        "Word Wizard",
        "Cast spells by forming words and defeat the vocabulary villains!",
    ),
    (
        "Science Quest",
        "Explore the world of science through exciting experiments and challenges!",
    ),
];

/// Character selection input mode
#[derive(Debug, Clone, PartialEq, Eq)]
enum Picking {
    Character,
    /// Next number picks a custom hero to delete
    Delete,
    Confirm(HeroId),
}

pub struct App {
    store: SharedStore,
    settings: Settings,
    roster: HeroRoster,
    nav: Navigator,
    game: Game,
    rng: Pcg32,
    /// Screen the app last set up
    shown: Screen,
    picking: Picking,
    draft: HeroDraft,
    notice: Option<String>,
    /// Next game entry resumes the saved progress
    resume_next: bool,
    effects: Effects,
    snapshot: Option<RenderSnapshot>,
    quit: bool,
}

impl App {
    pub fn new(config: GameConfig, store: SharedStore, seed: u64) -> Self {
        let settings = Settings::load(&*store);
        let roster = HeroRoster::load(&*store);
        let game = Game::new(config, store.clone(), seed);
        Self {
            store,
            settings,
            roster,
            nav: Navigator::new(Screen::Splash),
            game,
            rng: Pcg32::seed_from_u64(seed.wrapping_add(1)),
            shown: Screen::Splash,
            picking: Picking::Character,
            draft: HeroDraft::default(),
            notice: None,
            resume_next: false,
            effects: Effects::default(),
            snapshot: None,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Show the splash, then the menu
    pub fn enter(&mut self, now: f64) {
        self.nav.replace_after(Screen::Menu, SCREEN_ADVANCE_MS, now);
    }

    pub fn shutdown(&mut self) {
        self.game.teardown();
    }

    pub fn update(&mut self, now: f64) {
        self.nav.poll(now);
        self.sync_screen(now);

        if matches!(self.nav.current(), Screen::Game { .. }) {
            let snapshot = self.game.frame(now);
            self.effects.absorb(&snapshot.feedback, now);
            self.snapshot = Some(snapshot);
        }
        self.effects.prune(now);
    }

    pub fn handle_event(&mut self, event: Event, now: f64) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return;
        }

        let screen = self.nav.current().clone();
        match screen {
            Screen::Splash => self.nav.replace(Screen::Menu),
            Screen::Menu => self.on_menu_key(key.code),
            Screen::CharacterSelection => self.on_selection_key(key.code, now),
            Screen::CreateHero => self.on_builder_key(key.code),
            Screen::SelectedCharacter { .. } | Screen::HeroPreview { .. } => {
                if key.code == KeyCode::Esc {
                    self.nav.back();
                }
            }
            Screen::Game { .. } => self.on_game_key(key.code, now),
        }
        self.sync_screen(now);
    }

    /// Run one-time setup when the navigator lands on a new screen
    fn sync_screen(&mut self, now: f64) {
        if self.nav.current() == &self.shown {
            return;
        }
        if matches!(self.shown, Screen::Game { .. }) && self.game.phase() != GamePhase::NotStarted {
            self.game.exit();
        }
        self.shown = self.nav.current().clone();
        log::debug!("Screen: {}", self.shown.name());

        match &self.shown {
            Screen::SelectedCharacter { character } => {
                let next = Screen::Game {
                    character: character.clone(),
                };
                self.nav.replace_after(next, SCREEN_ADVANCE_MS, now);
            }
            Screen::HeroPreview { hero } => {
                let next = Screen::Game {
                    character: Character::from(hero),
                };
                self.nav.replace_after(next, SCREEN_ADVANCE_MS, now);
            }
            Screen::Game { character } => {
                let mode = if std::mem::take(&mut self.resume_next) {
                    StartMode::Resume
                } else {
                    StartMode::Fresh
                };
                log::info!("Playing as {} ({mode:?})", character.name);
                self.effects.clear();
                self.snapshot = None;
                self.game.start(mode, now);
            }
            Screen::CharacterSelection => self.picking = Picking::Character,
            Screen::CreateHero => {
                self.draft = HeroDraft::default();
                self.notice = None;
            }
            Screen::Splash | Screen::Menu => {}
        }
    }

    fn on_menu_key(&mut self, code: KeyCode) {
        self.notice = None;
        match code {
            KeyCode::Enter | KeyCode::Char('1') => {
                self.resume_next = false;
                self.nav.navigate(Screen::CharacterSelection);
            }
            KeyCode::Char('c') => {
                self.resume_next = true;
                self.nav.navigate(Screen::CharacterSelection);
            }
            KeyCode::Char(ch @ ('2' | '3')) => {
                let idx = ch as usize - '1' as usize;
                self.notice = Some(format!("{} coming soon!", MENU[idx].0));
            }
            KeyCode::Char('t') => self.settings.toggle_theme(&*self.store),
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    fn on_selection_key(&mut self, code: KeyCode, now: f64) {
        let characters = all_characters(&self.roster);
        let picked = match code {
            KeyCode::Char(ch) => ch
                .to_digit(10)
                .and_then(|d| (d as usize).checked_sub(1))
                .and_then(|idx| characters.get(idx)),
            _ => None,
        };

        match self.picking.clone() {
            Picking::Confirm(id) => {
                if code == KeyCode::Char('y') {
                    self.notice = match self.roster.remove(&*self.store, &id) {
                        Some(_) => None,
                        None => Some("Failed to delete hero. Please try again.".to_string()),
                    };
                }
                self.picking = Picking::Character;
            }
            Picking::Delete => {
                self.picking = Picking::Character;
                if let Some(CharacterId::Custom(id)) = picked.map(|c| c.id.clone()) {
                    self.picking = Picking::Confirm(id);
                }
            }
            Picking::Character => match code {
                KeyCode::Char('n') => self.nav.navigate(Screen::CreateHero),
                KeyCode::Char('d') if !self.roster.is_empty() => self.picking = Picking::Delete,
                KeyCode::Esc => {
                    self.resume_next = false;
                    self.nav.back();
                }
                _ => {
                    if let Some(character) = picked {
                        let next = Screen::SelectedCharacter {
                            character: character.clone(),
                        };
                        self.nav.navigate_after(next, SELECT_DELAY_MS, now);
                    }
                }
            },
        }
    }

    fn on_builder_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => {
                let hero = self.draft.build(HeroId::generate(&mut self.rng));
                if !self.roster.add(&*self.store, hero.clone()) {
                    self.notice = Some("Your hero could not be saved.".to_string());
                }
                self.nav.navigate(Screen::HeroPreview { hero });
            }
            KeyCode::Esc => {
                self.nav.back();
            }
            KeyCode::Tab => self.draft.cycle_body_type(),
            KeyCode::Right | KeyCode::Left => self.draft.cycle_color(),
            KeyCode::Backspace => {
                self.draft.name.pop();
            }
            KeyCode::Char(ch @ '1'..='3') => {
                let idx = ch as usize - '1' as usize;
                self.draft.toggle_accessory(Accessory::ALL[idx]);
            }
            KeyCode::Char(ch) if !ch.is_control() && self.draft.name.chars().count() < MAX_NAME_LEN => {
                self.draft.name.push(ch);
            }
            _ => {}
        }
    }

    fn on_game_key(&mut self, code: KeyCode, now: f64) {
        match (self.game.phase(), code) {
            (GamePhase::Running, KeyCode::Left | KeyCode::Char('a')) => {
                self.game.move_catcher(Direction::Left, now)
            }
            (GamePhase::Running, KeyCode::Right | KeyCode::Char('d')) => {
                self.game.move_catcher(Direction::Right, now)
            }
            (GamePhase::GameOver, KeyCode::Char('r')) => {
                self.effects.clear();
                self.game.retry(now);
            }
            (GamePhase::GameOver, KeyCode::Char('x')) | (_, KeyCode::Esc) => self.leave_game(),
            _ => {}
        }
    }

    fn leave_game(&mut self) {
        self.game.exit();
        self.effects.clear();
        self.snapshot = None;
        if !self.nav.back_to(|s| *s == Screen::CharacterSelection) {
            self.nav.reset_to_menu();
        }
    }
}
