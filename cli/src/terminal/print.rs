use std::time::Duration;

use colored::*;

use tethr_common::outcome::AddReport;
use tethr_core::nettest::{NetTestReport, NetTestVerdict};

pub const TOTAL_WIDTH: usize = 64;

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    println!(
        "{}{}{}",
        "─".repeat(left).bright_black(),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right).bright_black()
    );
}

/// One line per processed input, with the corrective hint indented
/// under failures.
pub fn report_line(report: &AddReport) {
    let success: bool = report.outcome.is_success();
    let symbol: ColoredString = if success {
        "[+]".green().bold()
    } else {
        "[-]".red().bold()
    };
    let summary: ColoredString = if success {
        report.outcome.summary().green()
    } else {
        report.outcome.summary().red()
    };

    println!("{} {} {}", symbol, report.input.bold(), summary);

    let hint: &str = report.outcome.hint();
    if !hint.is_empty() {
        println!("    {}", hint.dimmed());
    }
}

pub fn net_test_report(report: &NetTestReport) {
    match &report.verdict {
        NetTestVerdict::Passed => {
            println!(
                "{} {}",
                "[+]".green().bold(),
                "Network test passed. This network appears ready for streaming.".green()
            );
        }
        NetTestVerdict::Inconclusive => {
            let message: String = format!(
                "Could not reach {}. Network test inconclusive.",
                report.server
            );
            println!("{} {}", "[*]".yellow().bold(), message.yellow());
        }
        NetTestVerdict::Blocked(flags) => {
            println!(
                "{} {}",
                "[-]".red().bold(),
                "Network test failed. This network blocks:".red()
            );

            let entries: Vec<String> = flags.describe("\n").lines().map(str::to_string).collect();
            for (i, entry) in entries.iter().enumerate() {
                let last: bool = i + 1 == entries.len();
                let branch: ColoredString = if last {
                    "└─".bright_black()
                } else {
                    "├─".bright_black()
                };
                println!(" {} {}", branch, entry.red());
            }
        }
    }
}

pub fn add_summary(added: usize, total: usize, total_time: Duration) {
    let unit: &str = if total == 1 { "host" } else { "hosts" };
    let count: ColoredString = if added == total {
        format!("{added} of {total} {unit}").bold().green()
    } else {
        format!("{added} of {total} {unit}").bold().red()
    };
    let elapsed: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: String = format!("Added {count} in {elapsed}");

    fat_separator();
    centerln(&output);
}

pub fn fat_separator() {
    println!("{}", "═".repeat(TOTAL_WIDTH).bright_black());
}

pub fn centerln(msg: &str) {
    let width: usize = console::measure_text_width(msg);
    let space: String = " ".repeat(TOTAL_WIDTH.saturating_sub(width) / 2);
    println!("{space}{msg}");
}
