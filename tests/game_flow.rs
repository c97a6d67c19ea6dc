//! Integration tests: whole sessions over the on-disk store

use std::rc::Rc;

use proptest::prelude::*;

use math_catcher::GameConfig;
use math_catcher::heroes::{Accessory, Character, HeroDraft, HeroId, HeroRoster, all_characters};
use math_catcher::navigation::{Navigator, Screen};
use math_catcher::persistence::{FileStore, MemoryStore, ProgressSnapshot, SharedStore};
use math_catcher::settings::{Settings, ThemeMode};
use math_catcher::sim::{Direction, Feedback, Game, GamePhase, StartMode};

fn file_store(dir: &tempfile::TempDir) -> Rc<FileStore> {
    Rc::new(FileStore::open(dir.path()).expect("open store"))
}

/// Play with a parked catcher until the game ends (or give up after `limit` ms)
fn play_until_over(game: &mut Game, start: f64, limit: f64) -> f64 {
    let mut now = start;
    while game.phase() == GamePhase::Running && now < start + limit {
        now += 50.0;
        game.advance(now);
    }
    now
}

#[test]
fn test_resume_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    ProgressSnapshot::new(5, 2).save(&*file_store(&dir));

    let mut game = Game::new(GameConfig::default(), file_store(&dir), 7);
    game.start(StartMode::Resume, 0.0);
    assert_eq!((game.score(), game.lives()), (5, 2));
    assert_eq!(game.phase(), GamePhase::Running);
    game.exit();

    // A second process sees the same progress
    let reopened = file_store(&dir);
    let saved = ProgressSnapshot::load(&*reopened).unwrap();
    assert_eq!(saved, Some(ProgressSnapshot::new(5, 2)));

    let mut fresh = Game::new(GameConfig::default(), reopened.clone(), 8);
    fresh.start(StartMode::Fresh, 0.0);
    assert_eq!((fresh.score(), fresh.lives()), (0, 3));
    assert_eq!(
        ProgressSnapshot::load(&*reopened).unwrap(),
        Some(ProgressSnapshot::new(0, 3))
    );
}

#[test]
fn test_session_runs_to_game_over_and_retries() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(&dir);
    let mut game = Game::new(GameConfig::default(), store.clone(), 42);
    game.start(StartMode::Fresh, 0.0);

    let end = play_until_over(&mut game, 0.0, 3_600_000.0);
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert_eq!(game.lives(), 0);
    assert_eq!(game.pending_timers(), 0);

    let overs = game
        .drain_feedback()
        .into_iter()
        .filter(|f| matches!(f, Feedback::GameOver { .. }))
        .count();
    assert_eq!(overs, 1);

    // Nothing moves after the end
    let frozen: Vec<_> = game.objects().iter().map(|o| o.id).collect();
    game.advance(end + 60_000.0);
    assert_eq!(game.objects().iter().map(|o| o.id).collect::<Vec<_>>(), frozen);
    assert!(game.drain_feedback().is_empty());

    // The zero-life snapshot can't be resumed
    let saved = ProgressSnapshot::load(&*store).unwrap().unwrap();
    assert_eq!(saved.saved_lives, 0);
    let mut next = Game::new(GameConfig::default(), store.clone(), 43);
    next.start(StartMode::Resume, 0.0);
    assert_eq!((next.score(), next.lives()), (0, 3));

    game.retry(end + 1.0);
    assert_eq!(game.phase(), GamePhase::Running);
    assert_eq!((game.score(), game.lives()), (0, 3));
    assert!(game.objects().is_empty());
}

#[test]
fn test_custom_hero_reaches_game() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(&dir);
    let mut roster = HeroRoster::load(&*store);

    let mut nav = Navigator::new(Screen::Menu);
    nav.navigate(Screen::CharacterSelection);
    nav.navigate(Screen::CreateHero);

    let mut draft = HeroDraft {
        name: "Zip".to_string(),
        ..HeroDraft::default()
    };
    draft.cycle_color();
    draft.toggle_accessory(Accessory::Glasses);
    let hero = draft.build(HeroId("hero-zip".to_string()));
    roster.add(&*store, hero.clone());

    nav.navigate(Screen::HeroPreview { hero: hero.clone() });
    let character = Character::from(&hero);
    nav.replace_after(
        Screen::Game {
            character: character.clone(),
        },
        2000.0,
        100.0,
    );
    assert!(!nav.poll(2000.0));
    assert!(nav.poll(2100.0));
    assert_eq!(nav.current(), &Screen::Game { character });

    // Exit goes back to character selection
    assert!(nav.back_to(|s| *s == Screen::CharacterSelection));
    assert_eq!(nav.current(), &Screen::CharacterSelection);

    let reloaded = HeroRoster::load(&*file_store(&dir));
    let characters = all_characters(&reloaded);
    assert_eq!(characters.len(), 4);
    assert_eq!(characters[3].name, "Zip");
    assert_eq!(characters[3].accessories, vec![Accessory::Glasses]);
}

#[test]
fn test_theme_preference_persists() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = Settings::load(&*file_store(&dir));
    assert_eq!(settings.theme, ThemeMode::Light);
    settings.toggle_theme(&*file_store(&dir));
    assert_eq!(Settings::load(&*file_store(&dir)).theme, ThemeMode::Dark);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_score_and_lives_are_monotone(
        seed in any::<u64>(),
        steps in prop::collection::vec((0u16..400, 0u8..3), 1..150),
    ) {
        let store: SharedStore = Rc::new(MemoryStore::new());
        let mut game = Game::new(GameConfig::default(), store, seed);
        game.start(StartMode::Fresh, 0.0);

        let mut now = 0.0;
        let mut score = game.score();
        let mut lives = game.lives();
        let mut overs = 0;
        for (delay, input) in steps {
            now += delay as f64;
            match input {
                0 => game.move_catcher(Direction::Left, now),
                1 => game.move_catcher(Direction::Right, now),
                _ => {}
            }
            let snapshot = game.frame(now);
            overs += snapshot
                .feedback
                .iter()
                .filter(|f| matches!(f, Feedback::GameOver { .. }))
                .count();

            prop_assert!(snapshot.score >= score);
            prop_assert!(snapshot.lives <= lives);
            prop_assert!(snapshot.catcher_position >= 0.0);
            prop_assert!(snapshot.catcher_position <= game.config().max_catcher_x());
            score = snapshot.score;
            lives = snapshot.lives;

            if lives == 0 {
                prop_assert_eq!(snapshot.phase, GamePhase::GameOver);
                prop_assert_eq!(game.pending_timers(), 0);
            } else {
                prop_assert_eq!(snapshot.phase, GamePhase::Running);
            }
        }
        prop_assert!(overs <= 1);
    }
}
