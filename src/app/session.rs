//! Simulated system session — the single owner of the online/offline flag.
//!
//! Initialized online.  Exactly two transition edges exist: a manual
//! offline toggle and a manual restore.  Widgets that care receive a
//! `&Session`; nothing else reads or writes the flag.

use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Online,
    Offline,
}

#[derive(Debug, Clone)]
pub struct Session {
    status: SessionStatus,
    /// When the current status was entered.
    pub since: DateTime<Local>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            status: SessionStatus::Online,
            since: Local::now(),
        }
    }

    pub fn is_online(&self) -> bool {
        self.status == SessionStatus::Online
    }

    /// Manual offline edge.  No-op if already offline.
    pub fn set_offline(&mut self) {
        if self.status != SessionStatus::Offline {
            self.status = SessionStatus::Offline;
            self.since = Local::now();
        }
    }

    /// Manual restore edge.  No-op if already online.
    pub fn restore(&mut self) {
        if self.status != SessionStatus::Online {
            self.status = SessionStatus::Online;
            self.since = Local::now();
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_online_and_round_trips() {
        let mut s = Session::new();
        assert!(s.is_online());
        s.set_offline();
        assert!(!s.is_online());
        s.restore();
        assert!(s.is_online());
    }

    #[test]
    fn transitions_update_the_timestamp() {
        let mut s = Session::new();
        let created = s.since;
        std::thread::sleep(std::time::Duration::from_millis(5));
        s.set_offline();
        assert!(s.since > created);

        // A redundant edge leaves the timestamp alone.
        let went_offline = s.since;
        s.set_offline();
        assert_eq!(s.since, went_offline);
    }
}
