use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::kuhn::KuhnSolver;
use crate::leduc::{BestResponse, LeducSolver};
use crate::report;

#[derive(Parser)]
#[command(name = "leduc-cfr", version = "0.1.0", about = "CFR+ solver for Kuhn and Leduc poker.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the Leduc CFR+ solver and write strategy + exploitability reports
    Train {
        /// Number of full iterations (each a player-0 half then a player-1 half)
        #[arg(short, long, default_value = "100000")]
        iterations: u64,
        /// Compute and log exploitability every N iterations (0 disables)
        #[arg(short = 's', long = "sample-interval", default_value = "10000")]
        sample_interval: u64,
        /// Directory to write strategy.csv / strategy_report.txt / exploitability.csv into
        #[arg(short, long = "output-dir", default_value = "output")]
        output_dir: PathBuf,
        /// Resume from a snapshot previously written with `--save-to`
        #[arg(long = "resume-from")]
        resume_from: Option<PathBuf>,
        /// Write a resumable JSON snapshot after training completes
        #[arg(long = "save-to")]
        save_to: Option<PathBuf>,
    },
    /// Train the vanilla-CFR Kuhn solver and print the solved strategy
    KuhnTrain {
        /// Number of full iterations (each over all 6 ordered card deals)
        #[arg(short, long, default_value = "25000")]
        iterations: u64,
    },
    /// Load a Leduc strategy CSV and compute the exact best response to it
    BestResponse {
        /// Path to a strategy CSV previously written by `train`
        #[arg(short, long = "strategy")]
        strategy_path: PathBuf,
        /// Directory to write best_response_report.txt into
        #[arg(short, long = "output-dir", default_value = "output")]
        output_dir: PathBuf,
    },
}

pub fn run() {
    let cli = Cli::parse();
    dispatch(cli);
}

pub fn run_with_args(args: Vec<String>) {
    let cli = Cli::parse_from(args);
    dispatch(cli);
}

fn dispatch(cli: Cli) {
    match cli.command {
        Commands::Train {
            iterations,
            sample_interval,
            output_dir,
            resume_from,
            save_to,
        } => cmd_train(iterations, sample_interval, output_dir, resume_from, save_to),
        Commands::KuhnTrain { iterations } => cmd_kuhn_train(iterations),
        Commands::BestResponse {
            strategy_path,
            output_dir,
        } => cmd_best_response(strategy_path, output_dir),
    }
}

fn cmd_train(
    iterations: u64,
    sample_interval: u64,
    output_dir: PathBuf,
    resume_from: Option<PathBuf>,
    save_to: Option<PathBuf>,
) {
    println!("Training Leduc CFR+ for {} iterations...", iterations.to_string().bold());

    let mut solver = match resume_from {
        Some(path) => match LeducSolver::load(&path) {
            Ok(solver) => {
                println!("  resumed from {} at iteration {}", path.display(), solver.iteration());
                solver
            }
            Err(e) => {
                eprintln!("{} {e}", "error:".red().bold());
                return;
            }
        },
        None => LeducSolver::new(),
    };
    let mut samples: Vec<(u64, f64)> = Vec::new();
    let mut br = BestResponse::new();

    let mut done = 0u64;
    while done < iterations {
        let step = if sample_interval > 0 { sample_interval.min(iterations - done) } else { iterations - done };
        solver.train(step);
        done += step;

        if sample_interval > 0 {
            br.load_strategy(solver.get_all_strategies());
            let ev0 = br.compute(0);
            let ev1 = br.compute(1);
            let exploit_mbb = (ev0 + ev1) * 1000.0 / 2.0;
            println!("  iteration {done}/{iterations} complete (exploitability: {exploit_mbb:.3} mbb/hand)");
            samples.push((done, exploit_mbb));
        } else {
            println!("  iteration {done}/{iterations} complete");
        }
    }

    let strategies = solver.get_all_strategies();
    if let Err(e) = report::write_leduc_strategy_csv(&output_dir.join("strategy.csv"), &strategies) {
        eprintln!("{} {e}", "error:".red().bold());
        return;
    }
    if let Err(e) = report::write_leduc_strategy_report(&output_dir.join("strategy_report.txt"), &strategies) {
        eprintln!("{} {e}", "error:".red().bold());
        return;
    }
    if !samples.is_empty() {
        if let Err(e) = report::write_exploitability_csv(&output_dir.join("exploitability.csv"), &samples) {
            eprintln!("{} {e}", "error:".red().bold());
            return;
        }
    }

    if let Some(path) = save_to {
        if let Err(e) = solver.save(&path) {
            eprintln!("{} {e}", "error:".red().bold());
            return;
        }
        println!("  snapshot written to {}", path.display());
    }

    println!("{}", "Training complete.".green().bold());
    println!("  strategy written to {}", output_dir.join("strategy.csv").display());
}

fn cmd_kuhn_train(iterations: u64) {
    println!("Training Kuhn vanilla CFR for {} iterations...", iterations.to_string().bold());
    let mut solver = KuhnSolver::new();
    solver.train(iterations);
    println!("{}", "Training complete.".green().bold());
    for (key, strat) in solver.print_all() {
        let rounded: Vec<String> = strat.iter().map(|s| format!("{s:.3}")).collect();
        println!("{key}: [{}]", rounded.join(", "));
    }
}

fn cmd_best_response(strategy_path: PathBuf, output_dir: PathBuf) {
    let sigma = match load_strategy_csv(&strategy_path) {
        Ok(sigma) => sigma,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            return;
        }
    };

    let mut br = BestResponse::new();
    br.load_strategy(sigma);
    let ev0 = br.compute(0);
    let full0 = br.get_full_br_strategy(0);
    let ev1 = br.compute(1);
    let _full1 = br.get_full_br_strategy(1);

    println!("player 0 best-response EV: {ev0:.6} bb");
    println!("player 1 best-response EV: {ev1:.6} bb");
    println!("exploitability: {:.6} bb", (ev0 + ev1) / 2.0);

    if let Err(e) = report::write_best_response_report(&output_dir.join("best_response_report.txt"), ev0, ev1, &full0) {
        eprintln!("{} {e}", "error:".red().bold());
    }
}

fn load_strategy_csv(path: &PathBuf) -> crate::error::SolverResult<Vec<[f64; 3]>> {
    use crate::error::SolverError;
    use crate::node::LEDUC_NODES;

    let contents = std::fs::read_to_string(path).map_err(|_| SolverError::StrategyFileNotFound(path.display().to_string()))?;
    let mut rows = vec![[0.0; 3]; LEDUC_NODES];
    for line in contents.lines().skip(1) {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 4 {
            return Err(SolverError::MalformedStrategyRow(line.to_string()));
        }
        let hash: usize = fields[0].parse().map_err(|_| SolverError::MalformedStrategyRow(line.to_string()))?;
        let mut row = [0.0; 3];
        for i in 0..3 {
            row[i] = fields[i + 1].parse().map_err(|_| SolverError::MalformedStrategyRow(line.to_string()))?;
        }
        if hash >= LEDUC_NODES {
            return Err(SolverError::HashOutOfRange(hash as u16));
        }
        rows[hash] = row;
    }
    Ok(rows)
}
