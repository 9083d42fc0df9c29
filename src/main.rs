use anyhow::{Context, Result};
use console::Term;
use email_qc::export::export_reports;
use email_qc::scoring::{structure_cues, EmailScorer, EvaluationError};
use email_qc::settings::settings;
use email_qc::utils::{
    log_empty_input, log_export_done, log_init, log_newline, print_report, print_score_chart,
};
use std::io::{self, BufRead};
use std::path::Path;

fn prompt(term: &Term, label: &str) -> Result<()> {
    term.write_str(label).context("Failed to write prompt")?;
    term.flush().context("Failed to flush prompt")
}

fn read_agent_name(stdin: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    stdin
        .read_line(&mut line)
        .context("Failed to read agent name")?;
    Ok(line.trim().to_string())
}

const END_OF_EMAIL: &str = ".";

/// Reads lines until a line holding only `.` or end of input. Blank lines are kept.
fn read_email_text(stdin: &mut impl BufRead) -> Result<String> {
    let mut lines = Vec::new();
    for line in stdin.lines() {
        let line = line.context("Failed to read email text")?;
        if line.trim() == END_OF_EMAIL {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n").trim_end().to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let s = settings();
    let report_path = Path::new(&s.export.report_path);
    let scorer = EmailScorer::from_settings()?;
    log_init(scorer.grammar().api_url(), report_path);
    log_newline();

    let term = Term::stdout();
    let mut stdin = io::stdin().lock();

    prompt(&term, "Enter Agent Name: ")?;
    let agent_name = read_agent_name(&mut stdin)?;

    prompt(
        &term,
        "Enter email text (finish with a line containing only '.' or Ctrl-D):\n",
    )?;
    let email_text = read_email_text(&mut stdin)?;
    log_newline();

    let report = match scorer.evaluate_email(&agent_name, &email_text).await {
        Ok(report) => report,
        Err(EvaluationError::EmptyInput) => {
            log_empty_input();
            return Ok(());
        }
    };

    export_reports(std::slice::from_ref(&report), report_path)?;
    log_export_done(report_path, 1);
    log_newline();

    print_score_chart(&report);
    print_report(&report, &structure_cues(&email_text).missing());

    Ok(())
}
