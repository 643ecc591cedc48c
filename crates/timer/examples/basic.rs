//! Times a fake analysis run and prints the measures through `tracing`.

use std::{thread, time::Duration};

use perf_timer::{Config, PerformanceTimer};

fn main() -> anyhow::Result<()> {
    perf_timer::init_with(Config::development())?;

    let mut timer = PerformanceTimer::default();

    // Used too early: logs the warning once.
    timer.mark("too_early");

    timer.start();
    timer.audit_start();

    for rule in ["color-contrast", "image-alt", "label"] {
        timer.time(rule, || thread::sleep(Duration::from_millis(15)))?;
    }

    timer.mark("report_start");
    thread::sleep(Duration::from_millis(5));
    timer.mark("report_end");
    timer.measure("report", "report_start", "report_end")?;

    timer.log_measures(None);
    tracing::info!(elapsed_ms = timer.time_elapsed()?, "analysis finished");

    println!("{}", timer.report().to_json()?);

    timer.audit_end()?;
    timer.end()?;
    Ok(())
}
