//! guineapig: a virtual guinea pig living out its lifespan.
//!
//! Runs the pet through the state machine in terminal-state mode: the pet's
//! own age tracker decides when it dies, and the `END` state stops the run.
//! Prints the end-of-life statistics and writes `visits.csv` / `stats.csv`
//! to `output/guineapig`.

mod pet;
mod states;

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use gb_core::{MachineConfig, init_logging};
use gb_output::{CsvWriter, TraceObserver, write_stats};

use pet::{AgeTracker, GuineaPig};
use states::{END, SLEEPING, build_machine};

// ── Constants ─────────────────────────────────────────────────────────────────

const NAME:             &str = "Hazel";
const LIFESPAN_DAYS:    u32  = 9;
const INTERVAL_MINUTES: u32  = 15;
const SEED:             u64  = 42;
/// Set to `false` to pace each tick in real time (15 real minutes per tick).
const ACCELERATED:      bool = true;
const LOG_LEVEL:        &str = "info";

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_logging(LOG_LEVEL)?;

    let config = MachineConfig::until_terminal(LIFESPAN_DAYS, INTERVAL_MINUTES, END)
        .accelerated(ACCELERATED);
    let mut machine = build_machine::<GuineaPig>(config.clone(), SEED)?;

    let mut pig = GuineaPig::new(NAME, AgeTracker::for_run(&config), SLEEPING, 20, 10, 10);

    let out_dir = Path::new("output/guineapig");
    std::fs::create_dir_all(out_dir)?;
    let mut obs = TraceObserver::new(CsvWriter::new(out_dir)?, &config);

    let t0 = Instant::now();
    machine.run_with(SLEEPING, &mut pig, &mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    let stats = machine.stats()?;
    let mut writer = obs.into_writer();
    write_stats(&mut writer, &stats)?;

    println!("{pig}");
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!();
    print!("{stats}");

    Ok(())
}
