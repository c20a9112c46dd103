use std::path::Path;
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the Divine Flow workspace",
    long_about = "A unified CLI for running the headless crowd demo, benchmarks,\n\
                  and CI checks in the Divine Flow workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the headless demo with info logging
    Run {
        /// RNG seed passed through to the demo
        #[arg(long)]
        seed: Option<u64>,
        /// Demo run length in seconds
        #[arg(long, default_value_t = 30)]
        duration_secs: u64,
        /// Optional JSON config file
        #[arg(long)]
        config: Option<String>,
    },
    /// Run Criterion benchmarks
    Bench,
    /// Compare benchmarks: stash changes, create baseline, restore, compare
    BenchCompare,
    /// Run CI checks (fmt, clippy, tests, demo smoke run, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Short seeded demo run
    Demo,
    /// Run benchmarks
    Bench,
    /// Run check + demo + bench
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn spawn(program: &str, args: &[&str], envs: &[(&str, &str)]) -> ExitStatus {
    eprintln!("+ {program} {}", args.join(" "));
    match Command::new(program)
        .args(args)
        .envs(envs.iter().copied())
        .status()
    {
        Ok(status) => status,
        Err(err) => {
            eprintln!("failed to execute {program}: {err}");
            exit(1);
        }
    }
}

fn exit_on_failure(status: ExitStatus) {
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_cargo(args: &[&str]) {
    exit_on_failure(spawn("cargo", args, &[]));
}

fn run_git(args: &[&str]) {
    exit_on_failure(spawn("git", args, &[]));
}

fn run_demo(seed: Option<u64>, duration_secs: u64, config: Option<&str>) {
    let seed = seed.map(|s| s.to_string());
    let duration = duration_secs.to_string();

    let mut args = vec!["run", "-p", "flow_demo", "--", "--duration-secs", &duration];
    if let Some(seed) = seed.as_deref() {
        args.extend(["--seed", seed]);
    }
    if let Some(config) = config {
        args.extend(["--config", config]);
    }

    let log_level = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info".to_string());
    exit_on_failure(spawn("cargo", &args, &[("RUST_LOG", &log_level)]));
}

fn bench(extra: &[&str]) {
    let mut args = vec!["bench", "--package", "flow_core", "--bench", "performance"];
    if !extra.is_empty() {
        args.push("--");
        args.extend_from_slice(extra);
    }
    run_cargo(&args);
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test flow_core");
    run_cargo(&["test", "-p", "flow_core"]);

    step("Build flow_demo");
    run_cargo(&["build", "-p", "flow_demo"]);
}

fn ci_demo() {
    step("Run flow_demo (seed 7, 12 seconds)");
    run_demo(Some(7), 12, None);
}

fn ci_bench() {
    step("Run benchmarks");
    bench(&[]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            seed,
            duration_secs,
            config,
        } => run_demo(seed, duration_secs, config.as_deref()),
        Commands::Bench => bench(&[]),
        Commands::BenchCompare => {
            let baseline_dir = Path::new("target/criterion");
            if baseline_dir.exists() {
                step("Removing existing benchmark data");
                if let Err(err) = std::fs::remove_dir_all(baseline_dir) {
                    eprintln!("failed to remove {}: {err}", baseline_dir.display());
                    exit(1);
                }
            }

            step("Stashing current changes");
            run_git(&[
                "stash",
                "push",
                "-m",
                "Temporary stash for benchmark comparison",
            ]);

            step("Running benchmark to create baseline");
            bench(&["--save-baseline", "main"]);

            step("Reapplying changes");
            run_git(&["stash", "pop"]);

            step("Running benchmark comparing against baseline");
            bench(&["--baseline", "main"]);

            eprintln!("\nDone! Check the output above to see performance comparison.");
        }
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Demo => ci_demo(),
                CiJob::Bench => ci_bench(),
                CiJob::All => {
                    ci_check();
                    ci_demo();
                    ci_bench();
                }
            }
            eprintln!("\nCI job passed.");
        }
    }
}
