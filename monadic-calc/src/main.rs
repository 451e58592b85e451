use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod eval;

#[derive(clap::Parser, Debug)]
struct Cli {
    #[clap(help = "The config TOML file")]
    config_path: PathBuf,

    #[clap(long = "set", value_name = "NAME=VALUE", help = "Override an input")]
    overrides: Vec<String>,

    #[clap(long, help = "Fail on the first step that produced no value")]
    strict: bool,

    #[clap(long, help = "Pretty-print the JSON report")]
    pretty: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let output = run_main(Cli::parse())?;
    println!("{}", output);
    Ok(())
}

fn run_main(cli: Cli) -> Result<String> {
    let mut config = Config::load(&cli.config_path)?;
    for assignment in &cli.overrides {
        config.set_input(assignment)?;
    }
    info!(
        path = %cli.config_path.display(),
        inputs = config.inputs.len(),
        steps = config.steps.len(),
        "evaluating"
    );

    let report = eval::evaluate(&config);
    if cli.strict {
        report.ensure_all_ok()?;
    }
    report.to_json(cli.pretty)
}

#[cfg(test)]
use std::io::Write;

#[cfg(test)]
use serde_json::{json, Value};

#[cfg(test)]
const SAMPLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../samples/calc.toml");

#[cfg(test)]
fn run(args: &[&str]) -> Result<Value> {
    let argv = std::iter::once("monadic-calc").chain(args.iter().copied());
    let output = run_main(Cli::parse_from(argv))?;
    Ok(serde_json::from_str(&output)?)
}

#[test]
fn test_sample() -> Result<()> {
    let report = run(&[SAMPLE])?;
    assert_eq!(
        report,
        json!([
            {"name": "area", "result": {"ok": 60}},
            {"name": "ratio", "result": {"error": "division by zero"}},
            {"name": "ratio_or_area", "result": {"ok": 60}},
            {"name": "depth", "result": {"error": "unknown operand \"missing\""}},
            {"name": "flipped", "result": {"ok": -60}},
        ])
    );
    Ok(())
}

#[test]
fn test_sample_strict() {
    let err = run(&[SAMPLE, "--strict"]).unwrap_err();
    assert_eq!(err.to_string(), "step \"ratio\"");
    assert_eq!(format!("{:#}", err), "step \"ratio\": division by zero");
}

#[test]
fn test_overrides() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        r#"
        [[steps]]
        name = "ratio"
        op = "div"
        lhs = "num"
        rhs = "den"
        "#
    )?;
    let path = file.path().to_str().unwrap_or_default();

    let report = run(&[path, "--set", "num=12", "--set", "den=4", "--strict"])?;
    assert_eq!(report, json!([{"name": "ratio", "result": {"ok": 3}}]));

    let err = run(&[path, "--set", "num"]).unwrap_err();
    assert_eq!(err.to_string(), "\"num\": expected NAME=VALUE");
    Ok(())
}

#[test]
fn test_missing_config() {
    let err = run(&["/nonexistent/calc.toml"]).unwrap_err();
    assert!(err.to_string().starts_with("reading /nonexistent/calc.toml"));
}
