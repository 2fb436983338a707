//! End-of-run statistics.
//!
//! For every registered state:
//!
//!   percentage              = count / total_ticks * 100
//!   average_minutes_per_day = count * interval_minutes / duration_days
//!
//! The average uses integer division and is rendered as `HH:MM`.

use std::fmt;

use gb_core::{StateName, format_time};

/// `count / total * 100`, or `None` when nothing ran.
pub fn percentage(count: u64, total: u64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(count as f64 / total as f64 * 100.0)
}

/// Render a percentage with two decimals, e.g. `25.00%` or `5.00%`.
pub fn format_percentage(value: f64) -> String {
    format!("{value:04.2}%")
}

/// Average simulated minutes per day spent in a state.
///
/// `duration_days` must be positive; configs with zero days never validate.
#[inline]
pub fn average_minutes_per_day(count: u64, interval_minutes: u32, duration_days: u32) -> u64 {
    count * interval_minutes as u64 / duration_days.max(1) as u64
}

#[derive(Clone, Debug, PartialEq)]
pub struct StateStats {
    pub name: StateName,
    pub count: u64,
    pub percentage: f64,
    pub average_minutes_per_day: u64,
}

impl StateStats {
    /// Average time per day as `HH:MM`.
    pub fn average_time(&self) -> String {
        format_time(self.average_minutes_per_day)
    }
}

impl fmt::Display for StateStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<9} : {} - {}",
            self.name.as_str(),
            format_percentage(self.percentage),
            self.average_time()
        )
    }
}

/// Summary of one finished run, one entry per registered state in name order.
#[derive(Clone, Debug, PartialEq)]
pub struct Stats {
    pub total_ticks: u64,
    pub interval_minutes: u32,
    pub duration_days: u32,
    pub entries: Vec<StateStats>,
}

impl Stats {
    /// Build from visit counts.  Returns `None` when `total_ticks` is zero.
    pub fn from_counts<'a, I>(
        counts: I,
        total_ticks: u64,
        interval_minutes: u32,
        duration_days: u32,
    ) -> Option<Self>
    where
        I: IntoIterator<Item = (&'a StateName, &'a u64)>,
    {
        let entries = counts
            .into_iter()
            .map(|(name, &count)| {
                Some(StateStats {
                    name: name.clone(),
                    count,
                    percentage: percentage(count, total_ticks)?,
                    average_minutes_per_day: average_minutes_per_day(
                        count,
                        interval_minutes,
                        duration_days,
                    ),
                })
            })
            .collect::<Option<Vec<_>>>()?;

        // An empty registry yields no entries, so check the total explicitly.
        if total_ticks == 0 {
            return None;
        }

        Some(Self { total_ticks, interval_minutes, duration_days, entries })
    }

    pub fn get(&self, name: &StateName) -> Option<&StateStats> {
        self.entries.iter().find(|e| &e.name == name)
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Days: {}, Interval: {} mins, Ticks: {}",
            self.duration_days, self.interval_minutes, self.total_ticks
        )?;
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}
