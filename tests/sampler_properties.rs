use std::collections::{BTreeMap, HashMap, VecDeque};

use color_eyre::Result;
use color_eyre::eyre::eyre;
use proptest::prelude::*;
use tasktop::system::sampler::{ProcessRow, Sampler};
use tasktop::system::source::{ProcessDetail, ProcessEntry, ProcessSource};

/// Replays fixed (system ticks, [(pid, proc ticks)]) readings, one per cycle.
struct ReplaySource {
    cycles: VecDeque<(u64, Vec<(u32, u64)>)>,
    current: HashMap<u32, u64>,
}

impl ReplaySource {
    fn new(cycles: Vec<(u64, Vec<(u32, u64)>)>) -> Self {
        ReplaySource {
            cycles: cycles.into(),
            current: HashMap::new(),
        }
    }
}

impl ProcessSource for ReplaySource {
    fn system_busy_ticks(&mut self) -> u64 {
        self.cycles.front().map(|c| c.0).unwrap_or(0)
    }

    fn enumerate(&mut self) -> Result<Vec<ProcessEntry>> {
        let (_, procs) = self.cycles.pop_front().ok_or_else(|| eyre!("no more cycles"))?;
        self.current = procs.iter().copied().collect();
        Ok(procs
            .into_iter()
            .map(|(pid, _)| ProcessEntry {
                pid,
                ppid: 0,
                threads: 1,
                name: format!("p{pid}"),
            })
            .collect())
    }

    fn detail(&mut self, pid: u32) -> Option<ProcessDetail> {
        self.current.get(&pid).map(|&busy_ticks| ProcessDetail {
            busy_ticks,
            working_set_bytes: 0,
        })
    }
}

fn assert_ranked(rows: &[ProcessRow]) -> std::result::Result<(), TestCaseError> {
    for pair in rows.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        prop_assert!(
            a.cpu_percent > b.cpu_percent || (a.cpu_percent == b.cpu_percent && a.pid < b.pid),
            "out of order: {:?} before {:?}",
            (a.pid, a.cpu_percent),
            (b.pid, b.cpu_percent)
        );
    }
    Ok(())
}

/// Unique pids mapped to (baseline ticks, increment).
fn procs_strategy() -> impl Strategy<Value = BTreeMap<u32, (u64, u64)>> {
    prop::collection::btree_map(any::<u32>(), (0u64..1_000_000, 0u64..10_000), 0..64)
}

proptest! {
    #[test]
    fn output_is_totally_ordered(
        procs in procs_strategy(),
        base in 1u64..1_000_000,
        delta in 1u64..100_000,
        reverse in any::<bool>(),
    ) {
        let first: Vec<(u32, u64)> = procs.iter().map(|(&pid, &(b, _))| (pid, b)).collect();
        let mut second: Vec<(u32, u64)> =
            procs.iter().map(|(&pid, &(b, inc))| (pid, b + inc)).collect();
        if reverse {
            second.reverse();
        }

        let mut sampler = Sampler::new(ReplaySource::new(vec![
            (base, first),
            (base + delta, second),
        ]));
        let warmup = sampler.sample();
        assert_ranked(&warmup)?;
        let rows = sampler.sample();
        prop_assert_eq!(rows.len(), procs.len());
        prop_assert_eq!(sampler.last_process_count(), procs.len());
        assert_ranked(&rows)?;
    }

    #[test]
    fn equal_percentages_sort_by_pid(
        pids in prop::collection::btree_set(any::<u32>(), 0..64),
        inc in 0u64..50,
    ) {
        let first: Vec<(u32, u64)> = pids.iter().rev().map(|&pid| (pid, 10)).collect();
        let second: Vec<(u32, u64)> = pids.iter().rev().map(|&pid| (pid, 10 + inc)).collect();
        let mut sampler = Sampler::new(ReplaySource::new(vec![(100, first), (200, second)]));
        sampler.sample();
        let rows = sampler.sample();
        let got: Vec<u32> = rows.iter().map(|r| r.pid).collect();
        let want: Vec<u32> = pids.iter().copied().collect();
        prop_assert_eq!(got, want);
    }

    #[test]
    fn first_sample_is_always_zero(
        procs in procs_strategy(),
        system in any::<u64>(),
    ) {
        let readings: Vec<(u32, u64)> = procs.iter().map(|(&pid, &(b, _))| (pid, b)).collect();
        let mut sampler = Sampler::new(ReplaySource::new(vec![(system, readings)]));
        let rows = sampler.sample();
        prop_assert!(rows.iter().all(|r| r.cpu_percent == 0.0));
    }

    #[test]
    fn system_regression_zeroes_every_row(
        first in prop::collection::btree_map(any::<u32>(), any::<u64>(), 0..32),
        second_ticks in prop::collection::vec(any::<u64>(), 32),
        prev_system in 1u64..=u64::MAX,
        drop_by in any::<u64>(),
    ) {
        let next_system = prev_system.saturating_sub(drop_by);
        let before: Vec<(u32, u64)> = first.iter().map(|(&pid, &t)| (pid, t)).collect();
        let after: Vec<(u32, u64)> = first
            .keys()
            .zip(second_ticks.iter())
            .map(|(&pid, &t)| (pid, t))
            .collect();

        let mut sampler = Sampler::new(ReplaySource::new(vec![
            (prev_system, before),
            (next_system, after),
        ]));
        sampler.sample();
        let rows = sampler.sample();
        prop_assert!(rows.iter().all(|r| r.cpu_percent == 0.0));
    }

    #[test]
    fn percent_matches_delta_formula(
        prev_proc in 0u64..1_000_000,
        proc_inc in 0u64..1_000_000,
        prev_system in 1u64..1_000_000,
        system_inc in 1u64..1_000_000,
    ) {
        let pid = 77;
        let mut sampler = Sampler::new(ReplaySource::new(vec![
            (prev_system, vec![(pid, prev_proc)]),
            (prev_system + system_inc, vec![(pid, prev_proc + proc_inc)]),
        ]));
        sampler.sample();
        let rows = sampler.sample();
        let expected = 100.0 * proc_inc as f64 / system_inc as f64;
        prop_assert_eq!(rows[0].cpu_percent, expected);
        prop_assert!(rows[0].cpu_percent >= 0.0);
    }
}
