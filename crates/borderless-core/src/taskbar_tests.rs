use super::*;
use crate::fake::{FakeDesktop, primary_monitor, secondary_monitor};

fn work_areas(desktop: &FakeDesktop) -> Vec<Rect> {
    desktop.current_monitors().iter().map(|m| m.work_area).collect()
}

#[test]
fn hide_saves_workareas_and_widens_them() {
    // Arrange
    let desktop = FakeDesktop::new();
    let mut manager = DisplayEnvironmentManager::new(desktop.clone());

    // Act
    let visible = manager.toggle(VisibilityRequest::Hide);

    // Assert
    assert!(!visible);
    assert!(!desktop.is_taskbar_visible());
    assert_eq!(
        manager.snapshots(),
        [
            WorkareaSnapshot {
                device: primary_monitor().device,
                work_area: primary_monitor().work_area,
            },
            WorkareaSnapshot {
                device: secondary_monitor().device,
                work_area: secondary_monitor().work_area,
            },
        ]
    );
    assert_eq!(
        work_areas(&desktop),
        [primary_monitor().bounds, secondary_monitor().bounds]
    );
}

#[test]
fn forced_hide_twice_keeps_one_snapshot_set() {
    // Arrange
    let desktop = FakeDesktop::new();
    let mut manager = DisplayEnvironmentManager::new(desktop.clone());

    // Act
    manager.toggle(VisibilityRequest::Hide);
    desktop.clear_calls();
    manager.toggle(VisibilityRequest::Hide);

    // Assert
    assert!(desktop.calls().is_empty());
    assert_eq!(manager.snapshots().len(), 2);
    assert_eq!(manager.snapshots()[0].work_area, primary_monitor().work_area);
}

#[test]
fn show_restores_every_workarea_and_clears_snapshots() {
    // Arrange
    let desktop = FakeDesktop::new();
    let before = work_areas(&desktop);
    let mut manager = DisplayEnvironmentManager::new(desktop.clone());
    manager.toggle(VisibilityRequest::Hide);

    // Act
    let visible = manager.toggle(VisibilityRequest::Show);

    // Assert
    assert!(visible);
    assert!(desktop.is_taskbar_visible());
    assert!(manager.snapshots().is_empty());
    assert_eq!(work_areas(&desktop), before);
}

#[test]
fn hide_orders_snapshot_hide_then_widen() {
    let desktop = FakeDesktop::new();
    let mut manager = DisplayEnvironmentManager::new(desktop.clone());

    manager.toggle(VisibilityRequest::Hide);

    assert_eq!(
        desktop.calls(),
        ["taskbar false", "work_area 0,0", "work_area 1920,0"]
    );
}

#[test]
fn show_repaints_notification_area() {
    // Arrange: a 20x10 area swept every 5 px is a 4x2 grid
    let desktop = FakeDesktop::new();
    let mut manager = DisplayEnvironmentManager::new(desktop.clone());
    manager.toggle(VisibilityRequest::Hide);

    // Act
    manager.toggle(VisibilityRequest::Toggle);

    // Assert
    assert_eq!(desktop.nudges(), 8);
    assert_eq!(desktop.sweeps(), 1);
}

#[test]
fn show_when_visible_is_a_no_op() {
    let desktop = FakeDesktop::new();
    let mut manager = DisplayEnvironmentManager::new(desktop.clone());

    let visible = manager.toggle(VisibilityRequest::Show);

    assert!(visible);
    assert!(desktop.calls().is_empty());
    assert_eq!(desktop.nudges(), 0);
}

#[test]
fn failed_hide_leaves_no_snapshot() {
    let desktop = FakeDesktop::new();
    desktop.fail_call("set_taskbar_visible");
    let mut manager = DisplayEnvironmentManager::new(desktop.clone());

    let visible = manager.toggle(VisibilityRequest::Hide);

    assert!(visible);
    assert!(manager.snapshots().is_empty());
    assert_eq!(work_areas(&desktop), [primary_monitor().work_area, secondary_monitor().work_area]);
}

#[test]
fn unknown_taskbar_state_does_nothing() {
    let desktop = FakeDesktop::new();
    desktop.fail_call("taskbar_visible");
    let mut manager = DisplayEnvironmentManager::new(desktop.clone());

    manager.toggle(VisibilityRequest::Toggle);

    assert!(desktop.calls().is_empty());
}

#[test]
fn journal_exists_only_while_hidden() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let journal = dir.path().join("taskbar.json");
    let desktop = FakeDesktop::new();
    let mut manager = DisplayEnvironmentManager::new(desktop.clone()).with_journal(&journal);

    // Act / Assert
    manager.toggle(VisibilityRequest::Hide);
    let saved: Vec<WorkareaSnapshot> =
        serde_json::from_str(&std::fs::read_to_string(&journal).unwrap()).unwrap();
    assert_eq!(saved, manager.snapshots());

    manager.toggle(VisibilityRequest::Show);
    assert!(!journal.exists());
}

#[test]
fn journal_write_replaces_the_file_whole() {
    // Arrange: a torn journal from an interrupted write
    let dir = tempfile::tempdir().unwrap();
    let journal = dir.path().join("taskbar.json");
    std::fs::write(&journal, "[{\"device\":").unwrap();
    let desktop = FakeDesktop::new();
    let mut manager = DisplayEnvironmentManager::new(desktop.clone()).with_journal(&journal);

    // Act
    manager.toggle(VisibilityRequest::Hide);

    // Assert: valid content and no temporary files left beside it
    let saved: Vec<WorkareaSnapshot> =
        serde_json::from_str(&std::fs::read_to_string(&journal).unwrap()).unwrap();
    assert_eq!(saved, manager.snapshots());
    let entries = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn recover_replays_a_leftover_journal() {
    // Arrange: a previous process hid the taskbar and died
    let dir = tempfile::tempdir().unwrap();
    let journal = dir.path().join("taskbar.json");
    let desktop = FakeDesktop::new();
    let before = work_areas(&desktop);
    let mut crashed = DisplayEnvironmentManager::new(desktop.clone()).with_journal(&journal);
    crashed.toggle(VisibilityRequest::Hide);
    drop(crashed);

    // Act
    let mut manager = DisplayEnvironmentManager::new(desktop.clone()).with_journal(&journal);
    let recovered = manager.recover();

    // Assert
    assert!(recovered);
    assert!(desktop.is_taskbar_visible());
    assert_eq!(work_areas(&desktop), before);
    assert!(!journal.exists());
    assert!(!manager.recover());
}

#[test]
fn corrupt_journal_is_discarded() {
    let dir = tempfile::tempdir().unwrap();
    let journal = dir.path().join("taskbar.json");
    std::fs::write(&journal, "not json").unwrap();
    let desktop = FakeDesktop::new();
    let mut manager = DisplayEnvironmentManager::new(desktop.clone()).with_journal(&journal);

    assert!(!manager.recover());
    assert!(!journal.exists());
    assert!(desktop.calls().is_empty());
}

#[test]
fn sweep_covers_area_at_stride() {
    let points: Vec<_> = sweep_points(Rect::new(0, 0, 10, 6), 5).collect();

    assert_eq!(points, [(0, 0), (0, 5), (5, 0), (5, 5)]);
}

#[test]
fn sweep_of_empty_area_is_empty() {
    assert_eq!(sweep_points(Rect::new(0, 0, 0, 30), 5).count(), 0);
}
