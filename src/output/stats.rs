//! Statistics reporting.

use console::style;

use crate::download::RunStats;

/// Print the final counters of a run.
pub fn print_run_stats(stats: &RunStats) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Run Statistics:").bold());
    println!("  Discovered:        {}", stats.discovered);
    println!("  Rejected:          {}", stats.rejected);
    println!("  Already on disk:   {}", stats.skipped_existing);
    println!("  Queued:            {}", stats.registered);
    println!("  Downloaded:        {}", style(stats.downloaded).green());
    println!("  Duplicate content: {}", style(stats.skipped_duplicate).yellow());
    if stats.failed > 0 {
        println!("  Failed:            {}", style(stats.failed).red());
    } else {
        println!("  Failed:            0");
    }
    println!("{}", style("═".repeat(50)).dim());
}

/// Print a summary line for quick viewing.
pub fn print_summary(stats: &RunStats) {
    println!(
        "Downloaded: {} files ({} duplicates, {} existing, {} failed)",
        style(stats.downloaded).green(),
        style(stats.skipped_duplicate).yellow(),
        style(stats.skipped_existing).yellow(),
        style(stats.failed).red()
    );
}
