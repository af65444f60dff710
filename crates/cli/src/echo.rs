use owo_colors::OwoColorize;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "Colligo".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Import media collections as content channels\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print an error message
#[allow(dead_code)]
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}

/// Print the per-kind node counts of an imported channel
pub fn print_channel_summary(summary: &colligo_core::ChannelSummary) {
    eprintln!("\n{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Channel Summary".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());
    eprintln!("  {} {}", "Topics:".dimmed(), summary.topics.to_string().bright_white());
    eprintln!(
        "  {} {}",
        "Slideshows:".dimmed(),
        summary.slideshows.to_string().bright_white()
    );
    eprintln!("  {} {}", "Documents:".dimmed(), summary.documents.to_string().bright_white());
    eprintln!("  {} {}", "Videos:".dimmed(), summary.videos.to_string().bright_white());
    eprintln!("  {} {}\n", "Total:".bold().dimmed(), summary.total().to_string().bright_white());
}
