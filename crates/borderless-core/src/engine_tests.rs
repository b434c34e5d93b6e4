use super::*;
use crate::FavoriteRule;
use crate::fake::{ARROW, FakeDesktop, primary_monitor};
use crate::transform::SkipReason;

fn engine(desktop: &FakeDesktop, rules: Vec<FavoriteRule>) -> Engine<FakeDesktop> {
    Engine::new(
        desktop.clone(),
        FavoriteStore::detached(rules),
        &EngineConfig::default(),
        None,
    )
}

fn hiding_rule(name: &str) -> FavoriteRule {
    let mut rule = FavoriteRule::by_binary_name(name);
    rule.hide_taskbar = true;
    rule.hide_cursor = true;
    rule
}

#[test]
fn tick_applies_matching_favorites() {
    // Arrange
    let desktop = FakeDesktop::new();
    desktop.add_window(1, 100, "game", "Game");
    desktop.add_window(2, 200, "editor", "Editor");
    let mut engine = engine(&desktop, vec![FavoriteRule::by_binary_name("game")]);

    // Act
    let report = engine.tick();

    // Assert
    assert_eq!(
        report,
        TickReport {
            tracked: 2,
            pruned: 0,
            applied: 1,
            skipped: 0,
        }
    );
    assert!(!desktop.window(1).styles.has_decorations());
    assert!(desktop.window(2).styles.has_decorations());
}

#[test]
fn later_ticks_skip_already_borderless_windows() {
    let desktop = FakeDesktop::new();
    desktop.add_window(1, 100, "game", "Game");
    let mut engine = engine(&desktop, vec![FavoriteRule::by_binary_name("game")]);

    engine.tick();
    let report = engine.tick();

    assert_eq!(report.applied, 0);
    assert_eq!(report.skipped, 1);
}

#[test]
fn paused_engine_only_scans() {
    let desktop = FakeDesktop::new();
    desktop.add_window(1, 100, "game", "Game");
    let mut engine = engine(&desktop, vec![FavoriteRule::by_binary_name("game")]);
    engine.set_paused(true);

    let report = engine.tick();

    assert_eq!(report.tracked, 1);
    assert_eq!(report.applied, 0);
    assert!(desktop.window(1).styles.has_decorations());
}

#[test]
fn blocked_processes_are_never_touched() {
    let desktop = FakeDesktop::new();
    desktop.add_window(1, 100, "explorer", "Desktop");
    let mut engine = engine(&desktop, vec![FavoriteRule::by_binary_name("explorer")]);

    let report = engine.tick();

    assert_eq!(report.tracked, 0);
    assert!(desktop.window(1).styles.has_decorations());
}

#[test]
fn exited_window_releases_taskbar_and_cursor() {
    // Arrange
    let desktop = FakeDesktop::new();
    desktop.add_window(1, 100, "game", "Game");
    let mut engine = engine(&desktop, vec![hiding_rule("game")]);
    engine.tick();
    assert!(!desktop.is_taskbar_visible());
    assert_ne!(desktop.installed_cursor(), ARROW);

    // Act
    desktop.kill_process(100);
    desktop.close_window(1);
    let report = engine.tick();

    // Assert
    assert_eq!(report.pruned, 1);
    assert!(desktop.is_taskbar_visible());
    assert_eq!(desktop.installed_cursor(), ARROW);
}

#[test]
fn taskbar_stays_hidden_while_another_window_needs_it() {
    // Arrange
    let desktop = FakeDesktop::new();
    desktop.add_window(1, 100, "game", "Game");
    desktop.add_window(2, 200, "other", "Other Game");
    let mut engine = engine(&desktop, vec![hiding_rule("game"), hiding_rule("other")]);
    engine.tick();

    // Act
    desktop.close_window(1);
    engine.tick();

    // Assert
    assert!(!desktop.is_taskbar_visible());
}

#[test]
fn hidden_window_is_pruned_and_releases_taskbar() {
    // Arrange
    let desktop = FakeDesktop::new();
    desktop.add_window(1, 100, "game", "Game");
    let mut engine = engine(&desktop, vec![hiding_rule("game")]);
    engine.tick();

    // Act
    desktop.hide_window(1);
    let report = engine.tick();

    // Assert
    assert_eq!(report.pruned, 1);
    assert_eq!(report.tracked, 0);
    assert!(desktop.is_taskbar_visible());
    assert_eq!(desktop.installed_cursor(), ARROW);
}

#[test]
fn removing_the_favorite_does_not_strand_a_hidden_taskbar() {
    // Arrange
    let desktop = FakeDesktop::new();
    desktop.add_window(1, 100, "game", "Game");
    let mut engine = engine(&desktop, vec![hiding_rule("game")]);
    engine.tick();
    engine.favorites_mut().remove("game").unwrap();

    // Act
    desktop.close_window(1);
    engine.tick();

    // Assert
    assert!(desktop.is_taskbar_visible());
    assert_eq!(desktop.installed_cursor(), ARROW);
}

#[test]
fn restore_after_favorite_removed_shows_taskbar() {
    let desktop = FakeDesktop::new();
    desktop.add_window(1, 100, "game", "Game");
    let mut engine = engine(&desktop, vec![hiding_rule("game")]);
    engine.tick();
    engine.favorites_mut().remove("game").unwrap();

    let result = engine.restore(1);

    assert_eq!(result, Some(TransformResult::Restored));
    assert!(desktop.is_taskbar_visible());
}

#[test]
fn hotkey_toggle_applies_then_restores() {
    // Arrange
    let desktop = FakeDesktop::new();
    desktop.add_window(1, 100, "notepad", "Untitled");
    let before = desktop.window(1);
    let mut engine = engine(&desktop, Vec::new());

    // Act
    let applied = engine.toggle_borderless(1);
    let restored = engine.toggle_borderless(1);

    // Assert
    assert_eq!(applied, Some(TransformResult::Applied { attempt: 1 }));
    assert_eq!(restored, Some(TransformResult::Restored));
    assert_eq!(desktop.window(1).styles, before.styles);
    assert_eq!(desktop.window(1).bounds, before.bounds);
    assert!(engine.favorites().is_empty());
}

#[test]
fn hotkey_restore_shows_taskbar_again() {
    let desktop = FakeDesktop::new();
    desktop.add_window(1, 100, "game", "Game");
    let mut engine = engine(&desktop, vec![hiding_rule("game")]);

    engine.toggle_borderless(1);
    engine.toggle_borderless(1);

    assert!(desktop.is_taskbar_visible());
    assert_eq!(desktop.installed_cursor(), ARROW);
}

#[test]
fn unknown_window_is_ignored() {
    let desktop = FakeDesktop::new();
    let mut engine = engine(&desktop, Vec::new());

    assert_eq!(engine.toggle_borderless(42), None);
}

#[test]
fn apply_with_span_fills_all_monitors() {
    // Arrange
    let desktop = FakeDesktop::new();
    desktop.add_window(1, 100, "game", "Game");
    let mut engine = engine(&desktop, Vec::new());
    let span = engine.spanning_frame();

    // Act
    engine.apply(1, span);

    // Assert
    assert_eq!(span, Some(Rect::new(0, 0, 4480, 1440)));
    assert_eq!(desktop.window(1).bounds, Rect::new(0, 0, 4480, 1440));
}

#[test]
fn apply_to_named_monitor_fills_that_monitor() {
    // Arrange
    let desktop = FakeDesktop::new();
    let side = Monitor {
        device: r"\\.\DISPLAY3".into(),
        bounds: Rect::new(-1280, 0, 1280, 1024),
        work_area: Rect::new(-1280, 0, 1280, 984),
    };
    desktop.set_monitors(vec![primary_monitor(), side]);
    desktop.add_window(1, 100, "game", "Game");
    let mut engine = engine(&desktop, Vec::new());

    // Act
    let frame = engine.monitor_frame("display3");
    engine.apply(1, frame);

    // Assert
    assert_eq!(frame, Some(Rect::new(-1280, 0, 1280, 1024)));
    assert_eq!(desktop.window(1).bounds, Rect::new(-1280, 0, 1280, 1024));
    assert_eq!(engine.monitor_frame(r"\\.\DISPLAY1"), Some(primary_monitor().bounds));
    assert_eq!(engine.monitor_frame("DISPLAY9"), None);
}

#[test]
fn second_apply_on_stripped_window_is_skipped() {
    let desktop = FakeDesktop::new();
    desktop.add_window(1, 100, "game", "Game");
    let mut engine = engine(&desktop, Vec::new());

    engine.apply(1, None);
    let again = engine.apply(1, None);

    assert_eq!(again, Some(TransformResult::Skipped(SkipReason::NotTargetable)));
}

#[test]
fn mouse_lock_toggles_clip() {
    // Arrange
    let desktop = FakeDesktop::new();
    desktop.add_window(1, 100, "game", "Game");
    let engine = engine(&desktop, Vec::new());

    // Act
    let locked = engine.toggle_mouse_lock(1).unwrap();
    let clip = desktop.current_clip();
    let unlocked = !engine.toggle_mouse_lock(1).unwrap();

    // Assert
    assert!(locked);
    assert_eq!(clip, Some(Rect::new(108, 131, 784, 561)));
    assert!(unlocked);
    assert_eq!(desktop.current_clip(), None);
}

#[test]
fn shutdown_restores_desktop_but_not_windows() {
    // Arrange
    let desktop = FakeDesktop::new();
    desktop.add_window(1, 100, "game", "Game");
    let mut engine = engine(&desktop, vec![hiding_rule("game")]);
    engine.tick();
    engine.toggle_mouse_lock(1).unwrap();

    // Act
    engine.shutdown();

    // Assert
    assert!(desktop.is_taskbar_visible());
    assert_eq!(desktop.installed_cursor(), ARROW);
    assert_eq!(desktop.current_clip(), None);
    assert!(!desktop.window(1).styles.has_decorations());
}

#[test]
fn favorites_added_at_runtime_apply_on_next_tick() {
    let desktop = FakeDesktop::new();
    desktop.add_window(1, 100, "game", "Game");
    let mut engine = engine(&desktop, Vec::new());
    engine.tick();

    engine
        .favorites_mut()
        .add(FavoriteRule::by_title("Game"))
        .unwrap();
    let report = engine.tick();

    assert_eq!(report.applied, 1);
}

#[test]
fn recover_restores_leftover_taskbar_hide() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let journal = dir.path().join("taskbar.json");
    let desktop = FakeDesktop::new();
    desktop.add_window(1, 100, "game", "Game");
    let mut crashed = Engine::new(
        desktop.clone(),
        FavoriteStore::detached([hiding_rule("game")]),
        &EngineConfig::default(),
        Some(journal.clone()),
    );
    crashed.tick();
    std::mem::forget(crashed);

    // Act
    let mut engine = Engine::new(
        desktop.clone(),
        FavoriteStore::detached([]),
        &EngineConfig::default(),
        Some(journal),
    );

    // Assert
    assert!(engine.recover());
    assert!(desktop.is_taskbar_visible());
}
