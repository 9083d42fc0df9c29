use console::{measure_text_width, Style};
use std::path::Path;

use crate::scoring::{ScoreReport, StructureCue};

pub const TREE_BRANCH: char = '\u{251C}';
pub const TREE_END: char = '\u{2514}';
pub const TREE_HORIZ: char = '\u{2500}';

pub const BAR_FULL: char = '\u{2588}';
pub const BAR_EMPTY: char = '\u{00B7}';
pub const CELLS_PER_POINT: usize = 2;
pub const CHART_MAX: f32 = 10.0;

const TREE_PREFIX_WIDTH: usize = 4;
const VALUE_COLUMN: usize = 25;

fn tree_branch() -> String {
    dim()
        .apply_to(format!("{}{}{} ", TREE_BRANCH, TREE_HORIZ, TREE_HORIZ))
        .to_string()
}

fn tree_end() -> String {
    dim()
        .apply_to(format!("{}{}{} ", TREE_END, TREE_HORIZ, TREE_HORIZ))
        .to_string()
}

fn tree_prefix(i: usize, count: usize) -> String {
    if i + 1 == count {
        tree_end()
    } else {
        tree_branch()
    }
}

pub fn dim() -> Style {
    Style::new().dim()
}

fn blue() -> Style {
    Style::new().blue()
}

fn magenta() -> Style {
    Style::new().magenta()
}

fn cyan() -> Style {
    Style::new().cyan()
}

fn green() -> Style {
    Style::new().green()
}

fn red() -> Style {
    Style::new().red()
}

fn yellow() -> Style {
    Style::new().yellow()
}

fn bold() -> Style {
    Style::new().bold()
}

fn init_prefix() -> String {
    blue().apply_to("[INIT]").to_string()
}

fn grammar_prefix() -> String {
    yellow().apply_to("[GRAMMAR]").to_string()
}

fn export_prefix() -> String {
    magenta().apply_to("[EXPORT]").to_string()
}

fn error_prefix() -> String {
    red().apply_to("[ERROR]").to_string()
}

fn score_style(score: f32) -> Style {
    if score >= 8.0 {
        green()
    } else if score >= 6.0 {
        yellow()
    } else {
        red()
    }
}

pub fn pad_label(label: &str, depth: usize) -> String {
    let prefix_width = depth * TREE_PREFIX_WIDTH;
    let target_width = VALUE_COLUMN.saturating_sub(prefix_width);
    let current_width = measure_text_width(label);
    if current_width < target_width {
        format!("{}{}", label, " ".repeat(target_width - current_width))
    } else {
        format!("{} ", label)
    }
}

pub fn format_signed(value: f32) -> String {
    let sign = if value >= 0.0 { "+" } else { "-" };
    format!("{}{:.2}", dim().apply_to(sign), value.abs())
}

pub fn log_init(api_url: &str, report_path: &Path) {
    println!(
        "{} grammar checks via {}",
        init_prefix(),
        cyan().apply_to(api_url),
    );
    println!(
        "{} reports go to {}",
        init_prefix(),
        cyan().apply_to(report_path.display()),
    );
}

pub fn log_grammar_unavailable(error: &str) {
    eprintln!(
        "{} {} {}",
        grammar_prefix(),
        red().apply_to("server not available:"),
        dim().apply_to(error)
    );
}

pub fn log_settings_invalid(reason: &str) {
    eprintln!(
        "{} {} {}",
        error_prefix(),
        red().apply_to("invalid settings, using defaults:"),
        dim().apply_to(reason)
    );
}

pub fn log_empty_input() {
    eprintln!("{} no email content provided.", error_prefix());
}

pub fn log_skipped_input(source: &str) {
    eprintln!(
        "{} skipped {} {}",
        error_prefix(),
        cyan().apply_to(source),
        dim().apply_to("(empty)")
    );
}

pub fn log_generic_error(message: &str) {
    eprintln!("{} {}", error_prefix(), red().apply_to(message));
}

pub fn log_export_done(path: &Path, count: usize) {
    println!(
        "{} wrote {} report(s) to {}",
        export_prefix(),
        bold().apply_to(count),
        cyan().apply_to(path.display())
    );
}

pub fn log_newline() {
    println!();
}

/// Number of filled cells for a score on the fixed 0-10 axis.
pub fn bar_cells(score: f32) -> usize {
    let clamped = score.clamp(0.0, CHART_MAX);
    (clamped * CELLS_PER_POINT as f32).round() as usize
}

pub fn render_score_chart(report: &ScoreReport) -> Vec<String> {
    let width = CHART_MAX as usize * CELLS_PER_POINT;
    let mut lines = vec![format!(
        "{} {}",
        magenta().apply_to(bold().apply_to("Email Quality Report for")),
        bold().apply_to(&report.agent_name)
    )];

    for (dimension, score) in report.dimension_scores() {
        let filled = bar_cells(score);
        let bar = BAR_FULL.to_string().repeat(filled);
        let rest = BAR_EMPTY.to_string().repeat(width - filled);
        lines.push(format!(
            "{}{}{} {}",
            pad_label(&dimension.to_string(), 0),
            score_style(score).apply_to(bar),
            dim().apply_to(rest),
            bold().apply_to(format!("{:>5.2}", score))
        ));
    }

    lines.push(format!(
        "{}{}",
        pad_label("", 0),
        dim().apply_to(format!("0{:>width$}", "10", width = width + 1))
    ));

    lines
}

pub fn print_score_chart(report: &ScoreReport) {
    println!("{}\n", render_score_chart(report).join("\n"));
}

pub fn print_report(report: &ScoreReport, missing_cues: &[StructureCue]) {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!(
        "{} {}",
        magenta().apply_to(bold().apply_to("[EMAIL REPORT]")),
        bold().apply_to(&report.agent_name)
    ));

    lines.push(String::new());
    lines.push(format!("{}", bold().apply_to("SCORES")));
    let scores = report.dimension_scores();
    for (i, (dimension, score)) in scores.iter().enumerate() {
        lines.push(format!(
            "{}{} {}",
            tree_prefix(i, scores.len()),
            pad_label(&dimension.to_string(), 1),
            score_style(*score).apply_to(score)
        ));
    }

    lines.push(String::new());
    lines.push(format!("{}", bold().apply_to("SIGNALS")));
    lines.push(format!(
        "{}{}{}",
        tree_branch(),
        pad_label("sentiment", 1),
        format_signed(report.sentiment_polarity)
    ));
    lines.push(format!(
        "{}{} {:.2}",
        tree_branch(),
        pad_label("readability", 1),
        report.readability_raw
    ));

    lines.push(format!("{}{}", tree_end(), pad_label("missing structure", 1)));
    if missing_cues.is_empty() {
        lines.push(format!("    {}{}", tree_end(), dim().apply_to("none")));
    } else {
        for (i, cue) in missing_cues.iter().enumerate() {
            lines.push(format!(
                "    {}{}",
                tree_prefix(i, missing_cues.len()),
                yellow().apply_to(cue)
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!("{}", bold().apply_to("GRAMMAR ISSUES")));
    if report.grammar_issues.is_empty() {
        lines.push(format!("{}{}", tree_end(), dim().apply_to("None")));
    } else {
        let count = report.grammar_issues.len();
        for (i, issue) in report.grammar_issues.iter().enumerate() {
            lines.push(format!("{}{}", tree_prefix(i, count), issue));
        }
    }

    println!("{}\n", lines.join("\n"));
}
