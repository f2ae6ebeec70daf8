use crate::config::Config;
use crate::error::{Error, Result};
use crate::extension::{ExtensionLoader, NativeLoader};
use crate::interpreter::{interpret, Context, Environment};

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use tracing::{error, info, warn};

pub const DEFAULT_SOURCE: &str = "source.tb";
pub const DEFAULT_DESTINATION: &str = "output.bin";

/// Outcome of one compilation.
#[derive(Debug)]
pub struct Report {
    /// Statement-local errors, in the order they were reported.
    pub diagnostics: Vec<Error>,
    /// The error that ended the run early, if any.
    pub fatal: Option<Error>,
    pub bytes_written: usize,
    pub env: Environment,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.fatal.is_none()
    }

    pub fn summary(&self) -> String {
        if self.diagnostics.is_empty() {
            return "no errors".to_string();
        }

        format!(
            "{} error(s): {}",
            self.diagnostics.len(),
            self.diagnostics.iter().join("; ")
        )
    }
}

#[derive(Debug, Clone)]
pub struct Compiler {
    source: PathBuf,
    destination: PathBuf,
    config: Config,
}

impl Compiler {
    pub fn new<S, D>(source: S, destination: D, config: Config) -> Compiler
    where
        S: Into<PathBuf>,
        D: Into<PathBuf>,
    {
        Compiler {
            source: source.into(),
            destination: destination.into(),
            config,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Compiles with extensions resolved through the platform's dynamic loader.
    pub fn compile(&self) -> Result<Report> {
        let mut loader = NativeLoader::new(self.config.extension_paths.clone());

        self.compile_with(&mut loader)
    }

    /// Reads the source bytes, interprets them and writes the output, truncating
    /// the destination. Output emitted before a fatal error is still written.
    pub fn compile_with<L>(&self, loader: &mut L) -> Result<Report>
    where
        L: ExtensionLoader + ?Sized,
    {
        let source = fs::read(&self.source).map_err(|err| Error::io(&self.source, err))?;
        let file =
            File::create(&self.destination).map_err(|err| Error::io(&self.destination, err))?;

        info!(
            "compiling `{}` into `{}`",
            self.source.display(),
            self.destination.display()
        );

        let mut context = Context::new();
        let fatal = interpret(&source, &self.config, &mut context, loader).err();

        let bytes_written = context
            .output
            .flush_to(BufWriter::new(file))
            .map_err(|err| Error::io(&self.destination, err))?;

        match &fatal {
            None => info!("compilation finished ({} bytes written)", bytes_written),
            Some(err) => {
                error!("{}", err);
                warn!("compilation aborted ({} bytes written)", bytes_written);
            }
        }

        Ok(Report {
            diagnostics: context.diagnostics,
            fatal,
            bytes_written,
            env: context.env,
        })
    }
}
