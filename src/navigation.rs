//! Screen stack
//!
//! Screens carry their own payload. Some screens move on by themselves after
//! a delay; that pending replacement is dropped if the user navigates first.

use crate::heroes::{Character, HeroRecord};

/// App screens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Splash,
    Menu,
    CharacterSelection,
    CreateHero,
    /// Shows the new hero while it is saved
    HeroPreview { hero: HeroRecord },
    /// "Get ready" with the chosen character
    SelectedCharacter { character: Character },
    Game { character: Character },
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Splash => "Splash",
            Screen::Menu => "Menu",
            Screen::CharacterSelection => "CharacterSelection",
            Screen::CreateHero => "CreateYourHero",
            Screen::HeroPreview { .. } => "HeroPreview",
            Screen::SelectedCharacter { .. } => "SelectedCharacter",
            Screen::Game { .. } => "MathBallCatcherGame",
        }
    }
}

/// How a deferred navigation applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Push,
    Replace,
}

#[derive(Debug, Clone)]
struct Pending {
    due: f64,
    screen: Screen,
    transition: Transition,
}

/// Stack navigator
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Screen>,
    pending: Option<Pending>,
}

impl Navigator {
    pub fn new(initial: Screen) -> Self {
        Self {
            stack: vec![initial],
            pending: None,
        }
    }

    pub fn current(&self) -> &Screen {
        // The stack is never emptied: `back` keeps the root
        &self.stack[self.stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Push a screen now
    pub fn navigate(&mut self, screen: Screen) {
        self.pending = None;
        log::debug!("navigate -> {}", screen.name());
        self.stack.push(screen);
    }

    /// Swap the current screen now
    pub fn replace(&mut self, screen: Screen) {
        self.pending = None;
        log::debug!("replace {} -> {}", self.current().name(), screen.name());
        if let Some(top) = self.stack.last_mut() {
            *top = screen;
        }
    }

    /// Push a screen once `delay` ms have passed
    pub fn navigate_after(&mut self, screen: Screen, delay: f64, now: f64) {
        self.pending = Some(Pending {
            due: now + delay,
            screen,
            transition: Transition::Push,
        });
    }

    /// Swap the current screen once `delay` ms have passed
    pub fn replace_after(&mut self, screen: Screen, delay: f64, now: f64) {
        self.pending = Some(Pending {
            due: now + delay,
            screen,
            transition: Transition::Replace,
        });
    }

    /// Drop a deferred navigation
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    /// Apply a deferred navigation if due; returns true if the screen changed
    pub fn poll(&mut self, now: f64) -> bool {
        match self.pending.take() {
            Some(p) if p.due <= now => {
                match p.transition {
                    Transition::Push => self.navigate(p.screen),
                    Transition::Replace => self.replace(p.screen),
                }
                true
            }
            other => {
                self.pending = other;
                false
            }
        }
    }

    /// Pop one screen; the root stays
    pub fn back(&mut self) -> bool {
        self.pending = None;
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    /// Pop back to the nearest screen matching `pred`, if any
    pub fn back_to(&mut self, pred: impl Fn(&Screen) -> bool) -> bool {
        match self.stack.iter().rposition(|s| pred(s)) {
            Some(idx) => {
                self.pending = None;
                self.stack.truncate(idx + 1);
                true
            }
            None => false,
        }
    }

    /// Back to the menu, dropping everything above it
    pub fn reset_to_menu(&mut self) {
        self.pending = None;
        self.stack.clear();
        self.stack.push(Screen::Menu);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heroes::builtin_characters;

    #[test]
    fn test_delayed_replace() {
        let mut nav = Navigator::new(Screen::Splash);
        nav.replace_after(Screen::Menu, 2000.0, 0.0);
        assert!(!nav.poll(1999.0));
        assert_eq!(nav.current(), &Screen::Splash);
        assert!(nav.poll(2000.0));
        assert_eq!(nav.current(), &Screen::Menu);
        assert_eq!(nav.depth(), 1);
        assert!(!nav.has_pending());
    }

    #[test]
    fn test_user_navigation_cancels_pending() {
        let character = builtin_characters().remove(0);
        let mut nav = Navigator::new(Screen::Menu);
        nav.navigate(Screen::CharacterSelection);
        nav.navigate(Screen::SelectedCharacter {
            character: character.clone(),
        });
        nav.replace_after(Screen::Game { character }, 2000.0, 0.0);
        assert!(nav.back());
        assert!(!nav.poll(5000.0));
        assert_eq!(nav.current(), &Screen::CharacterSelection);
    }

    #[test]
    fn test_payload_flows_to_game() {
        let character = builtin_characters().remove(1);
        let mut nav = Navigator::new(Screen::Menu);
        nav.navigate(Screen::CharacterSelection);
        nav.navigate_after(
            Screen::SelectedCharacter {
                character: character.clone(),
            },
            200.0,
            0.0,
        );
        assert!(nav.poll(200.0));
        nav.replace_after(
            Screen::Game {
                character: character.clone(),
            },
            2000.0,
            200.0,
        );
        assert!(nav.poll(2200.0));
        assert_eq!(nav.current(), &Screen::Game { character });
        assert_eq!(nav.depth(), 3);

        assert!(nav.back_to(|s| *s == Screen::CharacterSelection));
        assert_eq!(nav.depth(), 2);
    }

    #[test]
    fn test_root_is_kept() {
        let mut nav = Navigator::new(Screen::Menu);
        assert!(!nav.back());
        nav.navigate(Screen::CreateHero);
        nav.reset_to_menu();
        assert_eq!(nav.current(), &Screen::Menu);
        assert_eq!(nav.depth(), 1);
        assert!(!nav.back_to(|s| *s == Screen::Splash));
    }
}
