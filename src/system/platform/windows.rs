use std::collections::HashMap;
#[cfg(target_os = "windows")]
use std::collections::HashSet;

use super::PlatformExtensions;

pub struct Platform;

#[cfg(target_os = "windows")]
use windows_sys::Win32::{
    Foundation::{CloseHandle, FILETIME, INVALID_HANDLE_VALUE},
    System::Diagnostics::ToolHelp::{
        CreateToolhelp32Snapshot, PROCESSENTRY32W, Process32FirstW, Process32NextW,
        TH32CS_SNAPPROCESS,
    },
    System::Threading::GetSystemTimes,
};

#[cfg(target_os = "windows")]
fn filetime_to_u64(ft: &FILETIME) -> u64 {
    u64::from(ft.dwLowDateTime) | (u64::from(ft.dwHighDateTime) << 32)
}

impl PlatformExtensions for Platform {
    #[cfg(target_os = "windows")]
    fn system_busy_ms() -> Option<u64> {
        let mut idle = unsafe { std::mem::zeroed::<FILETIME>() };
        let mut kernel = unsafe { std::mem::zeroed::<FILETIME>() };
        let mut user = unsafe { std::mem::zeroed::<FILETIME>() };
        let ok = unsafe { GetSystemTimes(&mut idle, &mut kernel, &mut user) };
        if ok == 0 {
            return None;
        }
        // Kernel time includes idle time. Units are 100ns.
        let busy = (filetime_to_u64(&kernel) + filetime_to_u64(&user))
            .checked_sub(filetime_to_u64(&idle))?;
        Some(busy / 10_000)
    }

    #[cfg(not(target_os = "windows"))]
    fn system_busy_ms() -> Option<u64> {
        None
    }

    #[cfg(target_os = "windows")]
    fn thread_counts(pids: &[u32]) -> HashMap<u32, u32> {
        let mut counts = HashMap::with_capacity(pids.len());
        unsafe {
            let snapshot = CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0);
            if snapshot == INVALID_HANDLE_VALUE {
                return counts;
            }
            let mut entry = std::mem::zeroed::<PROCESSENTRY32W>();
            entry.dwSize = std::mem::size_of::<PROCESSENTRY32W>() as u32;
            let mut has_entry = Process32FirstW(snapshot, &mut entry) != 0;
            while has_entry {
                counts.insert(entry.th32ProcessID, entry.cntThreads);
                has_entry = Process32NextW(snapshot, &mut entry) != 0;
            }
            CloseHandle(snapshot);
        }
        let wanted: HashSet<u32> = pids.iter().copied().collect();
        counts.retain(|pid, _| wanted.contains(pid));
        counts
    }

    #[cfg(not(target_os = "windows"))]
    fn thread_counts(_pids: &[u32]) -> HashMap<u32, u32> {
        HashMap::new()
    }
}
