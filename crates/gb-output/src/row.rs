//! Plain data row types written by output backends.

use gb_machine::StateStats;

/// One executed tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitRow {
    pub tick:       u64,
    /// `day D - HH:MM` at the start of the tick.
    pub day_time:   String,
    pub state:      String,
    pub next_state: String,
}

/// One registered state's share of the run.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsRow {
    pub state:           String,
    pub count:           u64,
    pub percentage:      f64,
    /// `HH:MM` average per simulated day.
    pub average_per_day: String,
}

impl From<&StateStats> for StatsRow {
    fn from(s: &StateStats) -> Self {
        Self {
            state:           s.name.to_string(),
            count:           s.count,
            percentage:      s.percentage,
            average_per_day: s.average_time(),
        }
    }
}
