use std::fs::File;
use std::io::stdout;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use log::info;

use omega_automata::Alphabet;
use omega_automata::BuchiAutomaton;
use omega_automata::Lasso;
use omega_automata::OmegaAutomaton;
use omega_automata::accepts_lasso;
use omega_automata::make_total;
use omega_automata::read_ba;
use omega_automata::write_ba;
use omega_inclusion::SimulationType;
use omega_inclusion::check_inclusion;
use omega_utilities::OmegaError;
use omega_utilities::Timing;

use verbosity::VerbosityFlag;
use version::Version;
use version::VersionFlag;

mod verbosity;
mod version;

#[derive(clap::Parser, Debug)]
#[command(
    about = "A command line tool for language inclusion between Büchi automata",
    arg_required_else_help = true
)]
struct Cli {
    #[command(flatten)]
    version: VersionFlag,

    #[command(flatten)]
    verbosity: VerbosityFlag,

    #[command(subcommand)]
    commands: Option<Commands>,

    #[arg(long, global = true)]
    timings: bool,
}

/// Defines the subcommands for this tool.
#[derive(Debug, Subcommand)]
enum Commands {
    Check(CheckArgs),
    Info(InfoArgs),
    Accepts(AcceptsArgs),
    Complete(CompleteArgs),
}

#[derive(clap::Args, Debug)]
#[command(about = "Checks whether the language of A is included in the language of B")]
struct CheckArgs {
    /// The automaton A in the .ba format.
    left_filename: PathBuf,

    /// The automaton B in the .ba format.
    right_filename: PathBuf,

    #[arg(long, value_enum, default_value_t, help = "The simulation used to prune the search")]
    simulation: SimulationType,

    #[arg(long, help = "Do not check the counterexample against both automata")]
    no_verify: bool,
}

#[derive(clap::Args, Debug)]
#[command(about = "Prints information related to the given automaton")]
struct InfoArgs {
    filename: PathBuf,
}

#[derive(clap::Args, Debug)]
#[command(about = "Checks whether the automaton accepts the lasso prefix (period)^ω")]
struct AcceptsArgs {
    filename: PathBuf,

    /// Letters separated by spaces, may be empty.
    prefix: String,

    /// Letters separated by spaces.
    period: String,
}

#[derive(clap::Args, Debug)]
#[command(about = "Adds a non-accepting sink state for every missing transition")]
struct CompleteArgs {
    filename: PathBuf,

    /// Specify the output file, the automaton is printed when omitted.
    output: Option<PathBuf>,
}

fn main() -> Result<ExitCode, OmegaError> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbosity.log_level_filter())
        .parse_default_env()
        .init();

    if cli.version.into() {
        eprintln!("{}", Version);
        return Ok(ExitCode::SUCCESS);
    }

    let mut timing = Timing::new();

    if let Some(command) = &cli.commands {
        match command {
            Commands::Check(args) => {
                handle_check(args, &mut timing)?;
            }
            Commands::Info(args) => {
                handle_info(args, &mut timing)?;
            }
            Commands::Accepts(args) => {
                handle_accepts(args, &mut timing)?;
            }
            Commands::Complete(args) => {
                handle_complete(args, &mut timing)?;
            }
        }
    }

    if cli.timings {
        timing.print();
    }

    Ok(ExitCode::SUCCESS)
}

/// Reads an automaton from the given path, extending the shared alphabet.
fn read_automaton(path: &Path, alphabet: &mut Alphabet, timing: &mut Timing) -> Result<BuchiAutomaton, OmegaError> {
    let file = File::open(path).map_err(|error| format!("Cannot open {}: {error}", path.display()))?;

    let mut timer = timing.start("read");
    let automaton = read_ba(file, alphabet)?;
    timer.finish();

    Ok(automaton)
}

/// Decides the inclusion and prints the counterexample when there is one.
fn handle_check(args: &CheckArgs, timing: &mut Timing) -> Result<(), OmegaError> {
    let mut alphabet = Alphabet::new();
    let mut a = read_automaton(&args.left_filename, &mut alphabet, timing)?;
    let b = read_automaton(&args.right_filename, &mut alphabet, timing)?;
    a.widen_alphabet(&alphabet);

    info!(
        "A has {} states and {} transitions.",
        a.num_of_states(),
        a.num_of_transitions()
    );
    info!(
        "B has {} states and {} transitions.",
        b.num_of_states(),
        b.num_of_transitions()
    );

    match check_inclusion(&a, &b, args.simulation, timing) {
        None => println!("true"),
        Some(lasso) => {
            println!("false");
            println!("prefix: {}", alphabet.format_word(&lasso.prefix));
            println!("period: {}", alphabet.format_word(&lasso.period));

            if !args.no_verify {
                verify_counterexample(&a, &b, &lasso, &alphabet)?;
            }
        }
    }

    Ok(())
}

fn verify_counterexample(
    a: &BuchiAutomaton,
    b: &BuchiAutomaton,
    lasso: &Lasso,
    alphabet: &Alphabet,
) -> Result<(), OmegaError> {
    if !accepts_lasso(a, lasso) {
        return Err(format!("A does not accept the counterexample {}", lasso.display(alphabet)).into());
    }

    if accepts_lasso(b, lasso) {
        return Err(format!("B accepts the counterexample {}", lasso.display(alphabet)).into());
    }

    info!("Verified that A accepts and B rejects the counterexample.");
    Ok(())
}

/// Display information about the given automaton.
fn handle_info(args: &InfoArgs, timing: &mut Timing) -> Result<(), OmegaError> {
    let mut alphabet = Alphabet::new();
    let automaton = read_automaton(&args.filename, &mut alphabet, timing)?;

    println!(
        "Automaton has {} states, {} transitions and {} accepting states.",
        automaton.num_of_states(),
        automaton.num_of_transitions(),
        automaton.final_states().count()
    );
    println!("Initial state: {}", automaton.initial_state());
    println!("Total: {}", automaton.is_total());

    println!("Letters:");
    for letter in alphabet.iter() {
        println!("  {}", alphabet.letter(letter));
    }

    Ok(())
}

/// Checks membership of a single lasso.
fn handle_accepts(args: &AcceptsArgs, timing: &mut Timing) -> Result<(), OmegaError> {
    let mut alphabet = Alphabet::new();
    let automaton = read_automaton(&args.filename, &mut alphabet, timing)?;

    let lasso = Lasso::new(alphabet.parse_word(&args.prefix)?, alphabet.parse_word(&args.period)?);
    if lasso.period.is_empty() {
        return Err("The period of a lasso cannot be empty".into());
    }

    if accepts_lasso(&automaton, &lasso) {
        println!("true");
    } else {
        println!("false");
    }

    Ok(())
}

/// Writes the total version of the given automaton.
fn handle_complete(args: &CompleteArgs, timing: &mut Timing) -> Result<(), OmegaError> {
    let mut alphabet = Alphabet::new();
    let automaton = read_automaton(&args.filename, &mut alphabet, timing)?;

    let mut timer = timing.start("complete");
    let total = make_total(&automaton);
    timer.finish();

    info!(
        "Total automaton has {} states and {} transitions.",
        total.num_of_states(),
        total.num_of_transitions()
    );

    if let Some(file) = &args.output {
        let mut writer = File::create(file)?;
        write_ba(&mut writer, &total)?;
    } else {
        write_ba(&mut stdout(), &total)?;
    }

    Ok(())
}
