use std::sync::mpsc;

use borderless_core::ipc::Command;
use tracing::{error, warn};

use crate::ipc::PipeServer;

use super::daemon_types::{DaemonMsg, ResponseSender};

/// Accepts CLI connections one at a time and forwards each command to
/// the main daemon thread. Runs on a dedicated thread.
pub(super) fn ipc_loop(tx: mpsc::Sender<DaemonMsg>) {
    loop {
        let server = match PipeServer::create() {
            Ok(s) => s,
            Err(e) => {
                error!("IPC disabled: {e}");
                return;
            }
        };

        let command = match server.accept_command() {
            Ok(cmd) => cmd,
            Err(e) => {
                warn!("bad IPC request: {e}");
                continue;
            }
        };

        let (reply_tx, reply_rx): (ResponseSender, _) = mpsc::channel();
        let is_stop = matches!(command, Command::Stop);

        if tx.send(DaemonMsg::Command(command, reply_tx)).is_err() {
            return;
        }

        if let Ok(response) = reply_rx.recv()
            && let Err(e) = server.send_response(&response)
        {
            warn!("IPC reply not delivered: {e}");
        }

        if is_stop {
            return;
        }
    }
}
