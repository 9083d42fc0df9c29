use anyhow::{Context, Result};
use email_qc::export::export_reports;
use email_qc::scoring::{
    structure_cues, EmailScorer, EmailSubmission, GrammarService, ReadabilityFormula,
    ScoreReport, SentimentAnalyzer,
};
use email_qc::settings::settings;
use email_qc::utils::{
    log_export_done, log_generic_error, log_init, log_newline, log_skipped_input, print_report,
    print_score_chart,
};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

fn print_usage() {
    eprintln!("Usage: score-email [--agent NAME] [--out PATH] [--json] <file|text>...");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <file>         Path to a file holding one email");
    eprintln!("  <text>         Raw email text to score");
    eprintln!("  --agent NAME   Agent name recorded in each report (default: unknown)");
    eprintln!("  --out PATH     CSV file for the exported reports");
    eprintln!("  --json         Print reports as JSON instead of the console view");
}

#[derive(Debug, Default, PartialEq)]
struct Args {
    agent: Option<String>,
    out: Option<PathBuf>,
    json: bool,
    inputs: Vec<String>,
}

fn parse_args(args: &[String]) -> std::result::Result<Args, String> {
    let mut parsed = Args::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--agent" | "-a" => {
                let name = iter.next().ok_or("--agent needs a value")?;
                parsed.agent = Some(name.clone());
            }
            "--out" | "-o" => {
                let path = iter.next().ok_or("--out needs a value")?;
                parsed.out = Some(PathBuf::from(path));
            }
            "--json" => parsed.json = true,
            _ => parsed.inputs.push(arg.clone()),
        }
    }

    if parsed.inputs.is_empty() {
        return Err("no email given".to_string());
    }

    Ok(parsed)
}

fn load_input(input: &str) -> (String, String) {
    let path = Path::new(input);
    if path.is_file() {
        if let Ok(text) = fs::read_to_string(path) {
            return (path.display().to_string(), text);
        }
    }
    ("inline text".to_string(), input.to_string())
}

async fn score_inputs<G, S, R>(
    scorer: &EmailScorer<G, S, R>,
    inputs: &[String],
    agent: &str,
    json: bool,
) -> Vec<ScoreReport>
where
    G: GrammarService,
    S: SentimentAnalyzer,
    R: ReadabilityFormula,
{
    let mut reports = Vec::new();

    for input in inputs {
        let (source, text) = load_input(input);
        let submission = EmailSubmission::new(agent, text);

        match scorer.evaluate(&submission).await {
            Ok(report) => {
                if !json {
                    print_score_chart(&report);
                    print_report(&report, &structure_cues(&submission.email_text).missing());
                }
                reports.push(report);
            }
            Err(_) => log_skipped_input(&source),
        }
    }

    reports
}

/// Stdout carries nothing but the JSON array in `--json` mode.
fn write_json(out: &mut impl Write, reports: &[ScoreReport]) -> Result<()> {
    let json = serde_json::to_string_pretty(reports).context("Failed to encode reports")?;
    writeln!(out, "{json}").context("Failed to write reports")
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let raw: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(e) => {
            log_generic_error(&e);
            print_usage();
            process::exit(1);
        }
    };

    let s = settings();
    let out = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(&s.export.report_path));

    let scorer = match EmailScorer::from_settings() {
        Ok(scorer) => scorer,
        Err(e) => {
            log_generic_error(&format!("{e:#}"));
            process::exit(1);
        }
    };

    if !args.json {
        log_init(scorer.grammar().api_url(), &out);
        log_newline();
    }

    let agent = args.agent.as_deref().unwrap_or("unknown");
    let reports = score_inputs(&scorer, &args.inputs, agent, args.json).await;

    if args.json {
        let mut stdout = io::stdout().lock();
        if let Err(e) = write_json(&mut stdout, &reports) {
            log_generic_error(&format!("{e:#}"));
            process::exit(1);
        }
    }

    if reports.is_empty() {
        process::exit(1);
    }

    match export_reports(&reports, &out) {
        Ok(()) => {
            if !args.json {
                log_export_done(&out, reports.len());
            }
        }
        Err(e) => {
            log_generic_error(&format!("{e:#}"));
            process::exit(1);
        }
    }
}
