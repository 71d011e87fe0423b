//! Non-preemptive toy scheduler and its animation state.
//!
//! The schedule is derived data: a pure function of the fixed process set,
//! the active ordering policy, and (for HRRN) the simulated clock.  The
//! Gantt view re-reads it every frame.

/// One synthetic process.  Fixed and immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Process {
    pub id: u32,
    pub name: &'static str,
    /// Tick at which the process becomes runnable.
    pub arrival: u32,
    /// Total CPU time the process needs to run to completion.
    pub burst: u32,
}

/// The fixed four-process workload.
pub static PROCESSES: &[Process] = &[
    Process { id: 1, name: "P1", arrival: 0, burst: 5 },
    Process { id: 2, name: "P2", arrival: 1, burst: 3 },
    Process { id: 3, name: "P3", arrival: 2, burst: 8 },
    Process { id: 4, name: "P4", arrival: 3, burst: 2 },
];

/// How far the simulated clock advances per tick while playing.
pub const CLOCK_STEP: f64 = 0.25;

// ───────────────────────────────────────── policies ──────────

/// Ordering policy for the single-pass non-preemptive schedule.
///
/// The original advertised preemptive and round-robin variants too, but only
/// these three comparators were ever realized; the rest stay unimplemented
/// rather than guessed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    /// First-come-first-served: by arrival time.
    #[default]
    Fcfs,
    /// Shortest burst first.
    Sjf,
    /// Highest response ratio next, ranked against the current clock.
    Hrrn,
}

impl Policy {
    pub const ALL: &[Policy] = &[Policy::Fcfs, Policy::Sjf, Policy::Hrrn];

    pub fn label(self) -> &'static str {
        match self {
            Policy::Fcfs => "FCFS (first come, first served)",
            Policy::Sjf => "SJF (shortest job first)",
            Policy::Hrrn => "HRRN (highest response ratio)",
        }
    }

    pub fn next(self) -> Policy {
        let idx = Self::ALL.iter().position(|&p| p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// `true` when the ordering depends on the simulated clock.
    pub fn is_clock_sensitive(self) -> bool {
        matches!(self, Policy::Hrrn)
    }
}

/// `(waiting + burst) / burst` against the simulated time `now`.
pub fn response_ratio(p: &Process, now: f64) -> f64 {
    let waiting = (now - p.arrival as f64).max(0.0);
    (waiting + p.burst as f64) / p.burst as f64
}

// ───────────────────────────────────────── schedule ──────────

/// One CPU slot in the computed schedule.  Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub pid: u32,
    pub start: u32,
    pub end: u32,
}

/// Sort by the policy comparator, then greedily assign each process
/// `start = max(running_clock, arrival)` and `end = start + burst`.
/// Entries come out non-overlapping with non-decreasing starts.
pub fn compute_schedule(procs: &[Process], policy: Policy, now: f64) -> Vec<ScheduleEntry> {
    let mut order: Vec<&Process> = procs.iter().collect();
    match policy {
        Policy::Fcfs => order.sort_by_key(|p| (p.arrival, p.id)),
        Policy::Sjf => order.sort_by_key(|p| (p.burst, p.arrival, p.id)),
        Policy::Hrrn => order.sort_by(|a, b| {
            response_ratio(b, now)
                .partial_cmp(&response_ratio(a, now))
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.arrival.cmp(&b.arrival))
                .then(a.id.cmp(&b.id))
        }),
    }

    let mut clock = 0u32;
    order
        .into_iter()
        .map(|p| {
            let start = clock.max(p.arrival);
            let end = start + p.burst;
            clock = end;
            ScheduleEntry {
                pid: p.id,
                start,
                end,
            }
        })
        .collect()
}

/// End of the last CPU slot.
pub fn total_span(entries: &[ScheduleEntry]) -> u32 {
    entries.iter().map(|e| e.end).max().unwrap_or(0)
}

/// Mean of `start - arrival` over all processes.
pub fn avg_waiting(procs: &[Process], entries: &[ScheduleEntry]) -> f64 {
    mean(procs, entries, |p, e| (e.start - p.arrival) as f64)
}

/// Mean of `end - arrival` over all processes.
pub fn avg_turnaround(procs: &[Process], entries: &[ScheduleEntry]) -> f64 {
    mean(procs, entries, |p, e| (e.end - p.arrival) as f64)
}

fn mean(
    procs: &[Process],
    entries: &[ScheduleEntry],
    f: impl Fn(&Process, &ScheduleEntry) -> f64,
) -> f64 {
    if procs.is_empty() {
        return 0.0;
    }
    let sum: f64 = procs
        .iter()
        .filter_map(|p| entries.iter().find(|e| e.pid == p.id).map(|e| f(p, e)))
        .sum();
    sum / procs.len() as f64
}

// ───────────────────────────────────────── animation state ───

/// Tick-driven state for the scheduler visualizer.
pub struct SchedState {
    pub policy: Policy,
    /// Simulated clock, `0.0..span`.  Wraps at the schedule's total span.
    pub clock: f64,
    pub playing: bool,
    pub schedule: Vec<ScheduleEntry>,
}

impl SchedState {
    pub fn new() -> Self {
        let policy = Policy::default();
        Self {
            policy,
            clock: 0.0,
            playing: false,
            schedule: compute_schedule(PROCESSES, policy, 0.0),
        }
    }

    /// Advance the clock by one step, wrapping at the schedule span.
    /// Under a clock-sensitive policy the schedule is recomputed against the
    /// live clock.
    pub fn tick(&mut self) {
        if !self.playing {
            return;
        }
        let span = total_span(&self.schedule) as f64;
        self.clock += CLOCK_STEP;
        if span > 0.0 && self.clock >= span {
            self.clock = 0.0;
        }
        if self.policy.is_clock_sensitive() {
            self.schedule = compute_schedule(PROCESSES, self.policy, self.clock);
        }
    }

    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
    }

    /// Switch to the next policy: recompute the schedule, zero the clock.
    pub fn cycle_policy(&mut self) {
        self.policy = self.policy.next();
        self.clock = 0.0;
        self.schedule = compute_schedule(PROCESSES, self.policy, 0.0);
    }

    pub fn reset(&mut self) {
        self.clock = 0.0;
        self.playing = false;
        self.schedule = compute_schedule(PROCESSES, self.policy, 0.0);
    }
}

impl Default for SchedState {
    fn default() -> Self {
        Self::new()
    }
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fcfs_is_contiguous_and_deterministic() {
        let entries = compute_schedule(PROCESSES, Policy::Fcfs, 0.0);
        assert_eq!(
            entries,
            vec![
                ScheduleEntry { pid: 1, start: 0, end: 5 },
                ScheduleEntry { pid: 2, start: 5, end: 8 },
                ScheduleEntry { pid: 3, start: 8, end: 16 },
                ScheduleEntry { pid: 4, start: 16, end: 18 },
            ]
        );
        // Contiguous, non-overlapping, non-decreasing starts.
        for pair in entries.windows(2) {
            assert!(pair[0].end <= pair[1].start);
            assert!(pair[0].start <= pair[1].start);
        }
        // Precomputed metrics for the fixed workload.
        assert_eq!(avg_waiting(PROCESSES, &entries), 5.75);
        assert_eq!(avg_turnaround(PROCESSES, &entries), 10.25);
        assert_eq!(total_span(&entries), 18);
    }

    #[test]
    fn sjf_orders_by_burst_and_respects_arrival() {
        let entries = compute_schedule(PROCESSES, Policy::Sjf, 0.0);
        let order: Vec<u32> = entries.iter().map(|e| e.pid).collect();
        assert_eq!(order, vec![4, 2, 1, 3]);
        // P4 arrives at t=3, so the CPU idles until then.
        assert_eq!(entries[0].start, 3);
        assert_eq!(entries[0].end, 5);
        for pair in entries.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn hrrn_ordering_shifts_with_the_clock() {
        // At t=0 no one has waited: every ratio is 1.0 and the arrival
        // tie-break yields FCFS order.
        let at_zero = compute_schedule(PROCESSES, Policy::Hrrn, 0.0);
        let order: Vec<u32> = at_zero.iter().map(|e| e.pid).collect();
        assert_eq!(order, vec![1, 2, 3, 4]);

        // Far into the run every ratio is dominated by waiting time, and
        // short-burst processes with old arrivals win big: ratios at t=40
        // are P1=9, P2=14, P3=5.75, P4=19.5.
        let late = compute_schedule(PROCESSES, Policy::Hrrn, 40.0);
        let order: Vec<u32> = late.iter().map(|e| e.pid).collect();
        assert_eq!(order, vec![4, 2, 1, 3]);
    }

    #[test]
    fn response_ratio_matches_definition() {
        let p = Process { id: 9, name: "P9", arrival: 2, burst: 4 };
        // No waiting before arrival.
        assert_eq!(response_ratio(&p, 0.0), 1.0);
        // (waiting 6 + burst 4) / 4 = 2.5 at t=8.
        assert_eq!(response_ratio(&p, 8.0), 2.5);
    }

    #[test]
    fn clock_wraps_at_span() {
        let mut s = SchedState::new();
        s.playing = true;
        s.clock = total_span(&s.schedule) as f64 - CLOCK_STEP;
        s.tick();
        assert_eq!(s.clock, 0.0);
    }

    #[test]
    fn pause_freezes_the_clock() {
        let mut s = SchedState::new();
        s.playing = true;
        s.tick();
        assert_eq!(s.clock, CLOCK_STEP);
        s.toggle_play();
        s.tick();
        assert_eq!(s.clock, CLOCK_STEP);
    }

    #[test]
    fn policy_switch_recomputes_and_zeroes_clock() {
        let mut s = SchedState::new();
        s.clock = 7.5;
        s.cycle_policy();
        assert_eq!(s.policy, Policy::Sjf);
        assert_eq!(s.clock, 0.0);
        assert_eq!(s.schedule, compute_schedule(PROCESSES, Policy::Sjf, 0.0));
        s.cycle_policy();
        assert_eq!(s.policy, Policy::Hrrn);
        s.cycle_policy();
        assert_eq!(s.policy, Policy::Fcfs);
    }
}
