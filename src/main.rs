use std::process::ExitCode;

use log::error;
use nn_walkthrough::{run, WalkthroughConfig, WalkthroughReport};

// Usage: nn-walkthrough [CONFIG.json]
// Without a config file the built-in defaults are used. Set RUST_LOG=debug
// to follow training progress.
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => match WalkthroughConfig::load_json(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("could not load {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => WalkthroughConfig::default(),
    };

    match run(&config) {
        Ok(report) => {
            print_report(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("walkthrough failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_report(report: &WalkthroughReport) {
    println!("Dataset: {} samples", report.dataset.len());
    println!("  x  {}", report.exploration.x);
    println!("  y  {}", report.exploration.y);
    println!("  corr(x, y) = {:.4}", report.exploration.correlation);
    println!(
        "Split: {} training / {} evaluation",
        report.split.training.len(),
        report.split.evaluation.len()
    );

    for run in &report.runs {
        println!();
        println!(
            "== {} ({} epochs{})",
            run.model.label(),
            run.fit.epochs,
            if run.fit.converged { ", converged" } else { "" }
        );
        print!("{}", run.predictions);
        println!("{}", run.summary);
    }
}
