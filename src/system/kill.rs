use sysinfo::{Pid, Signal, System};
use tracing::info;

#[derive(Debug, PartialEq, Eq)]
pub enum KillResult {
    Success(u32),
    Failed(String),
    NotFound(u32),
}

pub fn kill_process(sys: &System, pid: u32, signal: Signal) -> KillResult {
    let Some(process) = sys.process(Pid::from_u32(pid)) else {
        return KillResult::NotFound(pid);
    };
    let result = match process.kill_with(signal) {
        Some(true) => KillResult::Success(pid),
        Some(false) => KillResult::Failed(format!("failed to send {signal:?} to PID {pid}")),
        None => {
            // Signal not supported on this platform, fall back to kill()
            if process.kill() {
                KillResult::Success(pid)
            } else {
                KillResult::Failed(format!("failed to terminate PID {pid} (access denied?)"))
            }
        }
    };
    info!(pid, ?result, "kill requested");
    result
}

impl KillResult {
    /// Text for the terminal: stdout on success, stderr otherwise.
    pub fn message(&self) -> String {
        match self {
            KillResult::Success(pid) => format!("Killed PID {pid}"),
            KillResult::Failed(reason) => reason.clone(),
            KillResult::NotFound(pid) => format!("no process with PID {pid}"),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, KillResult::Success(_))
    }
}
