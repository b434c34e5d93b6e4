use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use borderless_core::WindowHandle;
use borderless_core::hotkey::HotkeyCommand;

use super::daemon_types::DaemonMsg;

/// Bridges hotkey presses into the daemon message channel.
pub(super) fn spawn_hotkey_bridge(
    hotkey_rx: mpsc::Receiver<(HotkeyCommand, WindowHandle)>,
    tx: mpsc::Sender<DaemonMsg>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for (command, handle) in hotkey_rx {
            if tx.send(DaemonMsg::Hotkey(command, handle)).is_err() {
                break;
            }
        }
    })
}

/// Spawns the ticker that paces favorites passes.
///
/// The stop flag is checked once per second so shutdown does not wait
/// out a long poll interval.
pub(super) fn spawn_tick_thread(
    tx: mpsc::Sender<DaemonMsg>,
    interval: Duration,
    stop: Arc<AtomicBool>,
) -> thread::JoinHandle<()> {
    const SLICE: Duration = Duration::from_secs(1);

    thread::spawn(move || {
        let mut waited = Duration::ZERO;
        while !stop.load(Ordering::Relaxed) {
            thread::sleep(SLICE);
            waited += SLICE;
            if waited < interval {
                continue;
            }
            waited = Duration::ZERO;
            if tx.send(DaemonMsg::Tick).is_err() {
                break;
            }
        }
    })
}
