//! Console output utilities.

use console::style;

use crate::config::{OptionsConfig, Target};
use crate::fs::OutputRoots;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     reddit-media-grabber                              ║
║     Deduplicated media downloads from reddit feeds    ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print the resolved target, output folders and download knobs.
pub fn print_config_summary(target: &Target, roots: &OutputRoots, options: &OptionsConfig) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Target:      {}", style(target).cyan());
    println!("  Images:      {}", roots.image_root.display());
    println!("  Videos:      {}", roots.video_root.display());
    println!("  Concurrency: {}", options.concurrency);
    println!("  Retries:     {}", options.max_request_retries);
    if options.only_videos {
        println!("  Filter:      {}", style("videos only").yellow());
    }
    if let Some(max_files) = options.max_files {
        println!("  Max links:   {}", max_files);
    }
    println!();
}
