use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;
use ctc_beam_rs::{remove_blank, CtcDecoderBuilder, DecoderConfig, Hypothesis};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Parser)]
#[command(name = "beam_report")]
#[command(about = "Decode CTC score matrices with prefix beam search and report ranked hypotheses")]
struct Args {
    /// JSON file holding either one score matrix ([[..], ..]) or a list of
    /// named cases ([{"id": .., "scores": [[..], ..]}, ..]). Omit to decode
    /// seeded random demonstration matrices instead.
    #[arg(long, env = "CTC_BEAM_REPORT_INPUT")]
    input: Option<PathBuf>,
    #[arg(long, env = "CTC_BEAM_REPORT_CASES", default_value_t = 1)]
    random_cases: usize,
    #[arg(long, env = "CTC_BEAM_REPORT_STEPS", default_value_t = 20)]
    steps: usize,
    #[arg(long, env = "CTC_BEAM_REPORT_VOCAB", default_value_t = 6)]
    vocab_size: usize,
    #[arg(long, env = "CTC_BEAM_REPORT_SEED", default_value_t = 1111)]
    seed: u64,
    #[arg(long, env = "CTC_BEAM_REPORT_BEAM_SIZE", default_value_t = 100)]
    beam_size: usize,
    #[arg(long, env = "CTC_BEAM_REPORT_BLANK", default_value_t = 0)]
    blank: usize,
    /// Number of hypotheses to report per case.
    #[arg(long, env = "CTC_BEAM_REPORT_TOP", default_value_t = 20)]
    top: usize,
    /// Write a JSON report here instead of printing to stdout.
    #[arg(long, env = "CTC_BEAM_REPORT_OUT")]
    out: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InputFile {
    Matrix(Vec<Vec<f32>>),
    Cases(Vec<InputCase>),
}

#[derive(Debug, Deserialize)]
struct InputCase {
    id: String,
    scores: Vec<Vec<f32>>,
}

#[derive(Debug, Serialize)]
struct Report {
    generated_at: String,
    beam_size: usize,
    blank: usize,
    cases: Vec<CaseReport>,
}

#[derive(Debug, Serialize)]
struct CaseReport {
    id: String,
    num_steps: usize,
    vocab_size: usize,
    hypotheses: Vec<HypothesisReport>,
}

#[derive(Debug, Serialize)]
struct HypothesisReport {
    labels: Vec<usize>,
    collapsed: Vec<usize>,
    log_prob_blank: f32,
    log_prob_label: f32,
    score: f32,
}

fn main() {
    tracing_subscriber::fmt::init();
    if let Err(err) = run() {
        eprintln!("beam_report: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();

    let cases = load_cases(&args)?;
    if cases.is_empty() {
        return Err("no cases to decode".to_string());
    }

    let decoder = CtcDecoderBuilder::new(DecoderConfig {
        beam_size: args.beam_size,
        blank: args.blank,
        ..DecoderConfig::default()
    })
    .build()
    .map_err(|e| format!("decoder setup failed: {e}"))?;

    let progress = ProgressBar::new(cases.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            .map_err(|e| format!("progress style: {e}"))?,
    );

    let mut case_reports = Vec::with_capacity(cases.len());
    for case in &cases {
        progress.set_message(case.id.clone());
        let output = decoder
            .decode_scores(&case.scores)
            .map_err(|e| format!("{}: decode failed: {e}", case.id))?;
        case_reports.push(CaseReport {
            id: case.id.clone(),
            num_steps: case.scores.len(),
            vocab_size: case.scores.first().map(Vec::len).unwrap_or(0),
            hypotheses: output
                .hypotheses
                .iter()
                .take(args.top)
                .map(|hyp| hypothesis_report(hyp, args.blank))
                .collect(),
        });
        progress.inc(1);
    }
    progress.finish_and_clear();

    let report = Report {
        generated_at: Utc::now().to_rfc3339(),
        beam_size: args.beam_size,
        blank: args.blank,
        cases: case_reports,
    };

    match &args.out {
        Some(path) => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| format!("serialize report: {e}"))?;
            fs::write(path, json).map_err(|e| format!("write {}: {e}", path.display()))?;
        }
        None => print_report(&report),
    }

    Ok(())
}

fn hypothesis_report(hyp: &Hypothesis, blank: usize) -> HypothesisReport {
    HypothesisReport {
        labels: hyp.labels.clone(),
        collapsed: remove_blank(&hyp.labels, blank),
        log_prob_blank: hyp.log_prob_blank,
        log_prob_label: hyp.log_prob_label,
        score: hyp.score(),
    }
}

fn load_cases(args: &Args) -> Result<Vec<InputCase>, String> {
    match &args.input {
        Some(path) => {
            let data =
                fs::read_to_string(path).map_err(|e| format!("read {}: {e}", path.display()))?;
            let parsed: InputFile = serde_json::from_str(&data)
                .map_err(|e| format!("parse {}: {e}", path.display()))?;
            Ok(match parsed {
                InputFile::Matrix(scores) => vec![InputCase {
                    id: "matrix".to_string(),
                    scores,
                }],
                InputFile::Cases(cases) => cases,
            })
        }
        None => {
            if args.steps == 0 || args.vocab_size < 2 {
                return Err(
                    "random demonstration input needs --steps >= 1 and --vocab-size >= 2"
                        .to_string(),
                );
            }
            let mut rng = StdRng::seed_from_u64(args.seed);
            Ok((0..args.random_cases)
                .map(|case_index| InputCase {
                    id: format!("random-{case_index}"),
                    scores: (0..args.steps)
                        .map(|_| (0..args.vocab_size).map(|_| rng.random::<f32>()).collect())
                        .collect(),
                })
                .collect())
        }
    }
}

fn print_report(report: &Report) {
    for case in &report.cases {
        println!(
            "{} ({} steps, vocab {}):",
            case.id, case.num_steps, case.vocab_size
        );
        for hyp in &case.hypotheses {
            println!(
                "  {:?} (blank={:.6}, label={:.6}) score {:.6}",
                hyp.collapsed, hyp.log_prob_blank, hyp.log_prob_label, hyp.score
            );
        }
    }
}
