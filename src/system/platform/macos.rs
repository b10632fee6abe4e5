use std::collections::HashMap;

use super::PlatformExtensions;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn system_busy_ms() -> Option<u64> {
        // No cheap aggregate counter; the collector derives one from sysinfo.
        None
    }

    fn thread_counts(_pids: &[u32]) -> HashMap<u32, u32> {
        HashMap::new()
    }
}
