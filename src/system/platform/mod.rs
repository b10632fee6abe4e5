use std::collections::HashMap;

/// Per-OS counters that sysinfo does not expose in a usable form.
pub trait PlatformExtensions {
    /// Machine-wide non-idle CPU time since boot, in milliseconds.
    fn system_busy_ms() -> Option<u64>;

    /// Thread count per pid, for as many of `pids` as the OS reports.
    fn thread_counts(pids: &[u32]) -> HashMap<u32, u32>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(target_os = "macos")]
use macos as platform_impl;
#[cfg(target_os = "windows")]
use windows as platform_impl;

pub fn system_busy_ms() -> Option<u64> {
    platform_impl::Platform::system_busy_ms()
}

pub fn thread_counts(pids: &[u32]) -> HashMap<u32, u32> {
    platform_impl::Platform::thread_counts(pids)
}
