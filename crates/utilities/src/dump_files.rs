use std::fs::File;
use std::path::Path;
use std::path::PathBuf;

use log::info;

use crate::OmegaError;

/// Writes intermediate inputs of (random) tests to disk, so that a failing
/// case can be inspected or replayed with the command line tool.
///
/// Dumping is enabled by setting `OMEGA_DUMP` to an absolute directory, every
/// test gets its own subdirectory named after `name`. Combined with
/// `OMEGA_SEED` this reproduces the exact automata of a failing run.
pub struct DumpFiles {
    directory: Option<PathBuf>,
}

impl DumpFiles {
    pub fn new(name: &str) -> Self {
        let directory = std::env::var("OMEGA_DUMP").ok().map(|dump_dir| {
            let dump_dir = PathBuf::from(dump_dir);
            assert!(
                dump_dir.is_absolute(),
                "OMEGA_DUMP must be an absolute path, tests run relative to their own crate."
            );
            dump_dir.join(name)
        });

        Self { directory }
    }

    /// Creates `filename` in the dump directory and fills it using `write`. Does
    /// nothing when dumping is disabled.
    pub fn dump<F>(&mut self, filename: &str, mut write: F) -> Result<(), OmegaError>
    where
        F: FnMut(&mut File) -> Result<(), OmegaError>,
    {
        let Some(directory) = &self.directory else {
            return Ok(());
        };

        std::fs::create_dir_all(directory)?;
        let path = Path::new(directory).join(filename);
        write(&mut File::create(&path)?)?;

        info!("Dumped file: {}", path.display());
        Ok(())
    }
}
