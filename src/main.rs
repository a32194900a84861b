//! Command line interface for the puzzle SAT compiler

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use puzzle_sat::{
    amazons::{AmazonsOutcome, AmazonsProblem, Board, Instance, SolutionVerifier},
    coloring::{ColoringProblem, Graph},
    config::{CliOverrides, OutputFormat, Settings, SolverBackend, ThreatEncoding},
    utils::{create_example_files, ColorOutput, SolutionFormatter},
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "puzzle_sat")]
#[command(about = "Compile placement and coloring puzzles to SAT, solve and verify them")]
#[command(version = "0.1.0")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that runs the solver
#[derive(Args, Debug, Default)]
struct SolverArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Solver backend (overrides config)
    #[arg(long, value_enum)]
    backend: Option<SolverBackend>,

    /// External solver binary, implies the external backend
    #[arg(long)]
    binary: Option<PathBuf>,

    /// Solver time limit in seconds, 0 for none (overrides config)
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Leap threat encoding (overrides config)
    #[arg(short, long, value_enum)]
    encoding: Option<ThreatEncoding>,

    /// Output format for saved results (overrides config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Save results into this directory (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve an amazons placement instance
    Amazons {
        /// Instance file: `<size> <count>` then `<column> <row>` lines
        instance: PathBuf,

        #[command(flatten)]
        solver: SolverArgs,

        /// Show per-family clause counts
        #[arg(long)]
        stats: bool,
    },

    /// Color a graph with a fixed number of colors
    Color {
        /// Graph YAML file; the built-in sample graph when omitted
        #[arg(short, long)]
        graph: Option<PathBuf>,

        /// Number of colors (overrides the graph file)
        #[arg(short = 'k', long)]
        colors: Option<usize>,

        #[command(flatten)]
        solver: SolverArgs,
    },

    /// Verify a board against an amazons instance
    Verify {
        /// Instance file holding the pre-placed amazons
        #[arg(short, long)]
        instance: PathBuf,

        /// Board file: one row of 0/1 per line
        #[arg(short, long)]
        board: PathBuf,
    },

    /// Write the CNF formula of an instance without solving it
    Compile {
        /// Amazons instance file
        #[arg(short, long, required_unless_present = "graph", conflicts_with = "graph")]
        instance: Option<PathBuf>,

        /// Graph YAML file
        #[arg(short, long)]
        graph: Option<PathBuf>,

        /// Number of colors (overrides the graph file)
        #[arg(short = 'k', long)]
        colors: Option<usize>,

        /// Leap threat encoding
        #[arg(short, long, value_enum, default_value_t = ThreatEncoding::FixedPieces)]
        encoding: ThreatEncoding,

        /// Write readable clauses instead of DIMACS
        #[arg(long)]
        rendered: bool,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Solve several amazons instances in parallel
    Batch {
        /// Instance files
        #[arg(required = true)]
        instances: Vec<PathBuf>,

        #[command(flatten)]
        solver: SolverArgs,
    },

    /// Create example configuration and input files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Amazons {
            instance,
            solver,
            stats,
        } => amazons_command(instance, solver, stats),
        Commands::Color {
            graph,
            colors,
            solver,
        } => color_command(graph, colors, solver),
        Commands::Verify { instance, board } => verify_command(instance, board),
        Commands::Compile {
            instance,
            graph,
            colors,
            encoding,
            rendered,
            output,
        } => compile_command(instance, graph, colors, encoding, rendered, output),
        Commands::Batch { instances, solver } => batch_command(instances, solver),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

/// Load the config file and apply command line overrides
fn load_settings(args: &SolverArgs) -> Result<Settings> {
    let mut settings = Settings::load_or_default(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    settings.merge_with_cli(&CliOverrides {
        backend: args.backend,
        binary: args.binary.clone(),
        timeout_seconds: args.timeout,
        threat_encoding: args.encoding,
        format: args.format,
        output_dir: args.output.clone(),
    });

    settings
        .validate()
        .context("Configuration validation failed")?;
    Ok(settings)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "solution".to_string())
}

fn amazons_command(instance_path: PathBuf, args: SolverArgs, stats: bool) -> Result<()> {
    let settings = load_settings(&args)?;
    let problem = AmazonsProblem::from_file(settings.clone(), &instance_path)?;

    println!(
        "{}",
        ColorOutput::info(&format!(
            "Solving {}x{} amazons instance with {} pre-placed",
            problem.instance().size,
            problem.instance().size,
            problem.instance().placed.len()
        ))
    );

    let outcome = problem.solve()?;
    println!("{}", SolutionFormatter::format_amazons(&outcome, stats));

    match &outcome {
        AmazonsOutcome::Satisfiable { report, .. } if report.is_valid => {
            println!("{}", ColorOutput::success("Solution verified"));
        }
        AmazonsOutcome::Satisfiable { .. } => {
            println!("{}", ColorOutput::error("Solver model failed verification"));
        }
        AmazonsOutcome::Unsatisfiable { .. } => {
            println!("{}", ColorOutput::warning("No placement exists"));
        }
    }

    if settings.output.save {
        let path = SolutionFormatter::save_amazons(
            &outcome,
            &settings.output.output_directory,
            &file_stem(&instance_path),
            &settings.output.format,
        )
        .context("Failed to save solution")?;
        println!("Saved: {}", path.display());
    }

    Ok(())
}

fn load_graph(path: Option<&Path>, colors: Option<usize>) -> Result<Graph> {
    let graph = match path {
        Some(path) => Graph::from_file(path)
            .with_context(|| format!("Failed to load graph from {}", path.display()))?,
        None => Graph::sample(),
    };
    Ok(match colors {
        Some(colors) => graph.with_colors(colors),
        None => graph,
    })
}

fn color_command(graph_path: Option<PathBuf>, colors: Option<usize>, args: SolverArgs) -> Result<()> {
    let settings = load_settings(&args)?;
    let graph = load_graph(graph_path.as_deref(), colors)?;

    println!(
        "{}",
        ColorOutput::info(&format!(
            "Coloring {} nodes and {} edges with {} colors",
            graph.node_count(),
            graph.edges.len(),
            graph.colors
        ))
    );

    let problem = ColoringProblem::new(settings.clone(), graph);
    let outcome = problem.solve()?;
    println!("{}", SolutionFormatter::format_coloring(problem.graph(), &outcome));

    if settings.output.save {
        let name = graph_path
            .as_deref()
            .map_or_else(|| "sample_graph".to_string(), file_stem);
        let path = SolutionFormatter::save_coloring(
            &outcome,
            &settings.output.output_directory,
            &name,
            &settings.output.format,
        )
        .context("Failed to save coloring")?;
        println!("Saved: {}", path.display());
    }

    Ok(())
}

fn verify_command(instance_path: PathBuf, board_path: PathBuf) -> Result<()> {
    let instance = Instance::from_file(&instance_path)
        .with_context(|| format!("Failed to load instance from {}", instance_path.display()))?;
    let board = Board::from_file(&board_path)
        .with_context(|| format!("Failed to load board from {}", board_path.display()))?;

    if board.size != instance.size {
        anyhow::bail!(
            "Board is {}x{} but the instance is {}x{}",
            board.size,
            board.size,
            instance.size,
            instance.size
        );
    }

    println!("{}", SolutionFormatter::format_board_with_coords(&board));
    let report = SolutionVerifier::new().verify(&board, &instance.placed);
    println!("{}", report);

    if report.is_valid {
        println!("{}", ColorOutput::success("Board is valid"));
    } else {
        println!("{}", ColorOutput::error("Board is invalid"));
    }

    Ok(())
}

fn compile_command(
    instance: Option<PathBuf>,
    graph: Option<PathBuf>,
    colors: Option<usize>,
    encoding: ThreatEncoding,
    rendered: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut settings = Settings::default();
    settings.encoding.threat_encoding = encoding;

    let formula = match instance {
        Some(path) => AmazonsProblem::from_file(settings, &path)?.compile()?.0,
        None => ColoringProblem::new(settings, load_graph(graph.as_deref(), colors)?).compile()?,
    };

    let content = if rendered {
        formula.render()
    } else {
        formula.to_dimacs()
    };

    match output {
        Some(path) => {
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "Wrote {} variables and {} clauses to {}",
                formula.variable_count(),
                formula.clause_count(),
                path.display()
            );
        }
        None => print!("{}", content),
    }

    Ok(())
}

fn batch_command(instances: Vec<PathBuf>, args: SolverArgs) -> Result<()> {
    let settings = load_settings(&args)?;
    let start_time = Instant::now();

    println!(
        "{}",
        ColorOutput::info(&format!("Solving {} instances...", instances.len()))
    );

    let results: Vec<(PathBuf, Result<AmazonsOutcome>)> = instances
        .into_par_iter()
        .map(|path| {
            let outcome = AmazonsProblem::from_file(settings.clone(), &path)
                .and_then(|problem| problem.solve());
            (path, outcome)
        })
        .collect();

    println!("Instance                 | Verdict | Valid");
    println!("-------------------------|---------|------");

    let mut failures = 0;
    for (path, result) in &results {
        let name = file_stem(path);
        match result {
            Ok(outcome) => {
                let (verdict, valid) = match outcome {
                    AmazonsOutcome::Satisfiable { report, .. } => {
                        ("SAT", if report.is_valid { "yes" } else { "no" })
                    }
                    AmazonsOutcome::Unsatisfiable { .. } => ("UNSAT", "-"),
                };
                println!("{:24} | {:7} | {}", name, verdict, valid);

                if settings.output.save {
                    SolutionFormatter::save_amazons(
                        outcome,
                        &settings.output.output_directory,
                        &name,
                        &settings.output.format,
                    )
                    .with_context(|| format!("Failed to save result for {}", path.display()))?;
                }
            }
            Err(err) => {
                failures += 1;
                println!("{:24} | ERROR   | {:#}", name, err);
            }
        }
    }

    let summary = format!(
        "Finished {} instances in {:.3}s",
        results.len(),
        start_time.elapsed().as_secs_f64()
    );
    if failures == 0 {
        println!("\n{}", ColorOutput::success(&summary));
    } else {
        println!(
            "\n{}",
            ColorOutput::warning(&format!("{}, {} failed", summary, failures))
        );
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input");
    let output_dir = directory.join("output/solutions");

    for dir in [&config_dir, &input_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    let mut pairwise = Settings::default();
    pairwise.encoding.threat_encoding = ThreatEncoding::Pairwise;
    pairwise.to_file(&config_dir.join("pairwise.yaml"))?;

    let mut external = Settings::default();
    external.solver.backend = SolverBackend::External;
    external.to_file(&config_dir.join("external.yaml"))?;

    create_example_files(&input_dir).context("Failed to create example files")?;
    println!("Created example inputs in: {}", input_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: puzzle_sat amazons input/amazons_5.txt --config config/pairwise.yaml");
    println!("3. Run: puzzle_sat color --graph input/sample_graph.yaml");

    Ok(())
}
