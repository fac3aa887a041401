//! smokescreen-plan: score or optimize a smoke-decoy deployment.
//!
//! Usage:
//!   smokescreen-plan evaluate --config plan.json --params 120,1.5,3.6,180
//!   smokescreen-plan optimize --config plan.json --seed 7 --parallel --output best.json

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use smokescreen_core::config::SmokescreenConfig;
use smokescreen_core::types::Deployment;
use smokescreen_optim::{HybridOptimizer, OptimizationOutcome};
use smokescreen_sim::{CoverageEvaluator, CoverageReport};

#[derive(Parser, Debug)]
#[command(name = "smokescreen-plan")]
#[command(about = "Plan a smoke-decoy deployment that hides a target from an incoming missile")]
struct Cli {
    /// JSON run configuration. Fields it omits keep their defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report the coverage of one parameter vector
    Evaluate {
        /// Comma-separated coordinates in the configured layout
        #[arg(long)]
        params: String,
    },
    /// Search for the deployment with the longest coverage
    Optimize {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        iterations: Option<usize>,
        #[arg(long)]
        particles: Option<usize>,
        /// Evaluate the swarm across threads
        #[arg(long)]
        parallel: bool,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
struct Evaluation {
    params: Vec<f64>,
    deployment: Deployment,
    report: CoverageReport,
}

#[derive(Debug, Serialize)]
struct Plan {
    outcome: OptimizationOutcome,
    deployment: Deployment,
    report: CoverageReport,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("smokescreen=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    let json = match cli.command {
        Commands::Evaluate { params } => {
            let params = parse_params(&params)?;
            serde_json::to_string_pretty(&evaluate(&config, params)?)?
        }
        Commands::Optimize {
            seed,
            iterations,
            particles,
            parallel,
            output,
        } => {
            let mut config = config;
            if let Some(seed) = seed {
                config.optimizer.seed = seed;
            }
            if let Some(iterations) = iterations {
                config.optimizer.max_iterations = iterations;
            }
            if let Some(particles) = particles {
                config.optimizer.swarm_size = particles;
            }
            config.optimizer.parallel |= parallel;
            config.validate().context("invalid optimizer overrides")?;

            let json = serde_json::to_string_pretty(&optimize(&config)?)?;
            if let Some(path) = output {
                fs::write(&path, &json)
                    .with_context(|| format!("failed to write plan: {}", path.display()))?;
                info!(path = %path.display(), "plan written");
            }
            json
        }
    };
    println!("{json}");
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<SmokescreenConfig> {
    match path {
        Some(path) => SmokescreenConfig::load(path)
            .with_context(|| format!("failed to load config: {}", path.display())),
        None => Ok(SmokescreenConfig::default()),
    }
}

fn parse_params(raw: &str) -> Result<Vec<f64>> {
    let params = raw
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<f64>()
                .with_context(|| format!("invalid parameter value: {part:?}"))
        })
        .collect::<Result<Vec<_>>>()?;
    if params.is_empty() {
        bail!("--params needs at least one value");
    }
    Ok(params)
}

fn evaluate(config: &SmokescreenConfig, params: Vec<f64>) -> Result<Evaluation> {
    let evaluator = CoverageEvaluator::from_config(config)?;
    let deployment = Deployment::from_coordinates(evaluator.layout(), &params)
        .context("parameters do not describe a deployment")?;
    let report = evaluator.try_coverage_report(&deployment)?;
    let window = evaluator.window();
    info!(
        duration = report.duration,
        window_start = window.start,
        window_end = window.end,
        smoke_lifetime = evaluator.scenario().smoke_lifetime,
        "coverage evaluated"
    );
    Ok(Evaluation {
        params,
        deployment,
        report,
    })
}

fn optimize(config: &SmokescreenConfig) -> Result<Plan> {
    let evaluator = CoverageEvaluator::from_config(config)?;
    let optimizer = HybridOptimizer::new(config.optimizer)?;
    info!(
        seed = optimizer.config().seed,
        window_samples = evaluator.window().samples,
        "optimizing deployment"
    );
    let outcome = optimizer.optimize(&evaluator, &config.bounds, &config.seeds)?;

    let deployment = Deployment::from_coordinates(evaluator.layout(), &outcome.best_params)
        .context("best parameters do not describe a deployment")?;
    let report = evaluator.coverage_report(&deployment);
    Ok(Plan {
        outcome,
        deployment,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHORT_WINDOW: &str = r#"{
        "window": { "start": 5.0, "end": 13.0, "samples": 200 },
        "optimizer": { "swarm_size": 4, "max_iterations": 2 }
    }"#;

    #[test]
    fn test_parse_params() {
        assert_eq!(
            parse_params("120, 1.5,3.6 ,180").unwrap(),
            vec![120.0, 1.5, 3.6, 180.0]
        );
        assert!(parse_params("120,fast").is_err());
        assert!(parse_params("").is_err());
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.seeds.len(), 3);
    }

    #[test]
    fn test_evaluate_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        fs::write(&path, SHORT_WINDOW).unwrap();

        let config = load_config(Some(path.as_path())).unwrap();
        let evaluation = evaluate(&config, vec![120.0, 1.5, 3.6, 180.0]).unwrap();
        assert!(evaluation.report.duration > 0.0);
        assert!(evaluate(&config, vec![120.0, 1.5]).is_err());
    }

    #[test]
    fn test_optimize_produces_consistent_plan() {
        let config = SmokescreenConfig::from_json_str(SHORT_WINDOW).unwrap();
        let plan = optimize(&config).unwrap();
        assert_eq!(plan.outcome.iterations, 2);
        assert_eq!(plan.report.duration, plan.outcome.best_fitness);
        let json = serde_json::to_value(&plan).unwrap();
        assert!(json["outcome"]["leaderboard"].is_array());
    }
}
