use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::scoring::ScoreReport;

pub const CSV_HEADER: &[&str] = &[
    "Agent Name",
    "Spelling & Grammar Score",
    "Tone & Empathy Score",
    "Clarity Score",
    "Structure Score",
    "Overall Score",
    "Grammar Issues",
    "Sentiment Score",
    "Readability Score",
];

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn report_row(report: &ScoreReport) -> String {
    let fields = [
        escape_field(&report.agent_name),
        report.spelling_grammar_score.to_string(),
        report.tone_score.to_string(),
        report.clarity_score.to_string(),
        report.structure_score.to_string(),
        format!("{:.2}", report.overall_score),
        escape_field(&report.grammar_issues_summary()),
        format!("{:.2}", report.sentiment_polarity),
        format!("{:.2}", report.readability_raw),
    ];
    fields.join(",")
}

pub fn render_csv(reports: &[ScoreReport]) -> String {
    let mut csv = String::new();
    csv.push_str(&CSV_HEADER.join(","));
    csv.push('\n');
    for report in reports {
        csv.push_str(&report_row(report));
        csv.push('\n');
    }
    csv
}

pub fn export_reports(reports: &[ScoreReport], path: &Path) -> Result<()> {
    fs::write(path, render_csv(reports))
        .with_context(|| format!("Failed to write report to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(agent: &str, issues: Vec<&str>) -> ScoreReport {
        ScoreReport {
            agent_name: agent.to_string(),
            spelling_grammar_score: 9,
            tone_score: 8,
            clarity_score: 7,
            structure_score: 10,
            overall_score: 8.5,
            grammar_issues: issues.into_iter().map(String::from).collect(),
            sentiment_polarity: -0.1,
            readability_raw: 72.0,
        }
    }

    #[test]
    fn test_render_csv_header_and_row() {
        let csv = render_csv(&[report("Agent A", vec![])]);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Agent Name,Spelling & Grammar Score,"));
        assert_eq!(lines[1], "Agent A,9,8,7,10,8.50,None,-0.10,72.00");
    }

    #[test]
    fn test_issues_with_commas_are_quoted() {
        let csv = render_csv(&[report(
            "Agent B",
            vec!["Possible typo, check it.", "Say \"please\"."],
        )]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "Agent B,9,8,7,10,8.50,\"Possible typo, check it., Say \"\"please\"\".\",-0.10,72.00"
        );
    }

    #[test]
    fn test_one_row_per_report() {
        let csv = render_csv(&[report("A", vec![]), report("B", vec![]), report("C", vec![])]);
        assert_eq!(csv.lines().count(), 4);
    }

    #[test]
    fn test_export_writes_file() {
        let path = std::env::temp_dir().join(format!("email_qc_export_{}.csv", std::process::id()));
        export_reports(&[report("Agent A", vec!["x"])], &path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();
        assert!(written.contains("Agent A,9,8,7,10,8.50,x,-0.10,72.00"));
    }
}
