use clap::Args;
use log::LevelFilter;

#[derive(Args, Debug)]
pub struct VerbosityFlag {
    #[arg(short, long, global = true, default_value_t = false, help = "Only print the answer")]
    quiet: bool,

    #[arg(
        short,
        long,
        global = true,
        default_value_t = false,
        help = "Print progress information (default)"
    )]
    verbose: bool,

    #[arg(
        short,
        long,
        global = true,
        default_value_t = false,
        help = "Print antichain statistics and other debug information"
    )]
    debug: bool,

    #[arg(long, global = true, default_value_t = false, help = "Print every step of the fixpoints")]
    trace: bool,
}

impl VerbosityFlag {
    /// Returns the log level filter selected by the flags, the quietest flag wins.
    pub fn log_level_filter(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Off
        } else if self.trace {
            LevelFilter::Trace
        } else if self.debug {
            LevelFilter::Debug
        } else if self.verbose {
            LevelFilter::Info
        } else {
            // Default verbosity level
            LevelFilter::Info
        }
    }
}
