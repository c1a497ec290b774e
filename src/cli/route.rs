//! CLI route: run context dispatching to builder and verifier.

use crate::build::Builder;
use crate::cli::output::format_report;
use crate::cli::parse::Commands;
use crate::config::Layout;
use crate::error::IntegrityError;
use crate::verify::{resolve_reference, Verifier};
use std::path::PathBuf;
use tracing::info;

/// Runtime context for CLI execution: resolved installation root and layout.
pub struct RunContext {
    root: PathBuf,
    layout: Layout,
}

impl RunContext {
    pub fn new(root: PathBuf) -> Result<Self, IntegrityError> {
        let root = dunce::canonicalize(&root).map_err(|e| {
            IntegrityError::InvalidPath(format!(
                "Cannot resolve installation root {}: {}",
                root.display(),
                e
            ))
        })?;
        let layout = Layout::load(&root)?;
        Ok(Self { root, layout })
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Execute a command. Returns whether the run passed; build always
    /// passes when it completes.
    pub fn execute(&self, command: Commands) -> Result<bool, IntegrityError> {
        match command {
            Commands::Build => {
                let store = Builder::new(&self.root, &self.layout).run()?;
                println!(
                    "Wrote {} with {} entries",
                    self.layout.manifest_path(&self.root).display(),
                    store.len()
                );
                Ok(true)
            }
            Commands::Verify => {
                let reference = resolve_reference(&self.root, &self.layout)?;
                info!(entries = reference.len(), "Reference manifest loaded");
                let report = Verifier::new(&self.root, &self.layout).run(&reference)?;
                println!("{}", format_report(&report));
                Ok(report.passed())
            }
        }
    }
}
