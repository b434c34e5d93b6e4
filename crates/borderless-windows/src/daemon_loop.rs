use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::time::Duration;

use borderless_core::config::{self, ConfigPaths};
use borderless_core::hotkey::{HotkeyCommand, HotkeyDispatcher};
use borderless_core::ipc::{self, Command};
use borderless_core::{Engine, FavoriteStore, Result, TransformResult, WindowHandle};
use tracing::{debug, info, warn};

use crate::window::Win32Desktop;
use crate::{ctrl_c, event_loop};

use super::{daemon_ipc, daemon_threads};
use super::daemon_types::DaemonMsg;

/// The inner daemon loop: set up, pump messages until `Stop`, tear down.
pub(super) fn daemon_loop(paths: &ConfigPaths) -> Result<()> {
    let config = config::load(&paths.config_file());
    borderless_core::log::init(&config.logging, &paths.log_dir());

    info!("Daemon started (PID: {})", std::process::id());
    info!(
        "Config: poll_interval={}s, paused={}, blocked={}, log_level={}",
        config.engine.poll_interval_secs,
        config.engine.paused,
        config.engine.blocked_processes.len(),
        config.logging.level
    );

    let favorites = FavoriteStore::open(paths.favorites_file());
    info!("Loaded {} favorites", favorites.len());

    let mut engine = Engine::new(
        Win32Desktop,
        favorites,
        &config.engine,
        Some(paths.taskbar_journal()),
    );
    if engine.recover() {
        info!("restored a taskbar left hidden by a previous run");
    }

    let (tx, rx) = mpsc::channel::<DaemonMsg>();
    ctrl_c::set_handler(tx.clone())?;

    // Hotkeys live on the message-pump thread; presses are bridged in.
    let (hotkey_tx, hotkey_rx) = mpsc::channel();
    let dispatcher = HotkeyDispatcher::from_config(&config.hotkeys);
    let event_loop = event_loop::start(dispatcher, hotkey_tx)?;
    let hotkey_bridge = daemon_threads::spawn_hotkey_bridge(hotkey_rx, tx.clone());

    // Not joined: it sits in ConnectNamedPipe until a client arrives.
    let ipc_tx = tx.clone();
    std::thread::spawn(move || daemon_ipc::ipc_loop(ipc_tx));

    let stop = Arc::new(AtomicBool::new(false));
    let tick_thread = daemon_threads::spawn_tick_thread(
        tx.clone(),
        Duration::from_secs(config.engine.poll_interval_secs),
        stop.clone(),
    );
    drop(tx);

    // First pass right away rather than one interval in.
    engine.tick();

    // Main processing loop, blocks until a message arrives.
    while let Ok(msg) = rx.recv() {
        match msg {
            DaemonMsg::Tick => {
                engine.tick();
            }
            DaemonMsg::Hotkey(command, handle) => handle_hotkey(&mut engine, command, handle),
            DaemonMsg::Command(command, reply) => {
                info!("IPC command: {command:?}");
                let response = ipc::handle_command(&mut engine, &command);
                let _ = reply.send(response);
                if command == Command::Stop {
                    break;
                }
            }
            DaemonMsg::Stop => {
                info!("stop requested");
                break;
            }
        }
    }

    engine.shutdown();

    stop.store(true, Ordering::Relaxed);
    event_loop.stop();
    let _ = hotkey_bridge.join();
    let _ = tick_thread.join();

    info!("Daemon stopped");
    Ok(())
}

fn handle_hotkey(engine: &mut Engine<Win32Desktop>, command: HotkeyCommand, handle: WindowHandle) {
    debug!("hotkey {command:?} on 0x{handle:X}");
    match command {
        HotkeyCommand::ToggleBorderless => match engine.toggle_borderless(handle) {
            Some(TransformResult::Skipped(reason)) => {
                info!("0x{handle:X} left unchanged: {reason:?}")
            }
            Some(result) => info!("0x{handle:X}: {result:?}"),
            None => debug!("0x{handle:X} is not a candidate window"),
        },
        HotkeyCommand::ToggleCursor => {
            let visible = engine.toggle_cursor();
            info!("cursor {}", if visible { "shown" } else { "hidden" });
        }
        HotkeyCommand::ToggleMouseLock => match engine.toggle_mouse_lock(handle) {
            Ok(true) => info!("pointer locked to 0x{handle:X}"),
            Ok(false) => info!("pointer released"),
            Err(e) => warn!("mouse lock failed: {e}"),
        },
    }
}
