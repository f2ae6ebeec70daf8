use crate::extension::{ExtensionError, Result};

use std::any::Any;
use std::env::consts::DLL_SUFFIX;
use std::iter;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use libloading::{Library, Symbol};
use tracing::{debug, info};

/// Symbol every extension module exports.
pub const ENTRY_POINT: &str = "some_function";

type EntryFn = unsafe extern "C-unwind" fn();

pub trait ExtensionLoader {
    /// Loads the extension `name`, runs its entry point once and releases it.
    fn load(&mut self, name: &str) -> Result<()>;
}

pub fn module_file_name(name: &str) -> String {
    format!("{}{}", name, DLL_SUFFIX)
}

fn candidates(module: &str, search_paths: &[PathBuf]) -> Vec<PathBuf> {
    search_paths
        .iter()
        .map(|dir| dir.join(module))
        .chain(iter::once(PathBuf::from(module)))
        .collect()
}

/// An open extension module. The library is released when this is dropped.
#[derive(Debug)]
pub struct Extension {
    module: String,
    library: Library,
}

impl Extension {
    pub fn open(name: &str, search_paths: &[PathBuf]) -> Result<Extension> {
        let module = module_file_name(name);
        let mut reason = String::from("no candidate paths");

        for candidate in candidates(&module, search_paths) {
            // SAFETY: running the module's initialisers is what importing it means.
            match unsafe { Library::new(&candidate) } {
                Ok(library) => {
                    debug!(path = %candidate.display(), "opened extension module");
                    return Ok(Extension { module, library });
                }
                Err(error) => {
                    debug!(path = %candidate.display(), %error, "extension candidate rejected");
                    reason = error.to_string();
                }
            }
        }

        Err(ExtensionError::NotFound { module, reason })
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn entry_point(&self) -> Result<EntryPoint<'_>> {
        // SAFETY: the plugin contract fixes the entry point to `void some_function(void)`.
        let symbol = unsafe { self.library.get::<EntryFn>(ENTRY_POINT.as_bytes()) }.map_err(
            |_| ExtensionError::EntryPointMissing {
                module: self.module.clone(),
                symbol: ENTRY_POINT.to_string(),
            },
        )?;

        Ok(EntryPoint {
            module: &self.module,
            symbol,
        })
    }
}

/// A resolved entry point; invoking it consumes it.
pub struct EntryPoint<'lib> {
    module: &'lib str,
    symbol: Symbol<'lib, EntryFn>,
}

impl<'lib> EntryPoint<'lib> {
    pub fn invoke(self) -> Result<()> {
        let EntryPoint { module, symbol } = self;

        // SAFETY: see `Extension::entry_point`; the library outlives `symbol`.
        panic::catch_unwind(AssertUnwindSafe(|| unsafe { (*symbol)() })).map_err(|payload| {
            ExtensionError::Panicked {
                module: module.to_string(),
                message: panic_message(payload.as_ref()),
            }
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Loads extensions through the platform's dynamic loader.
#[derive(Debug, Default, Clone)]
pub struct NativeLoader {
    search_paths: Vec<PathBuf>,
}

impl NativeLoader {
    pub fn new(search_paths: Vec<PathBuf>) -> NativeLoader {
        NativeLoader { search_paths }
    }
}

impl ExtensionLoader for NativeLoader {
    fn load(&mut self, name: &str) -> Result<()> {
        let extension = Extension::open(name, &self.search_paths)?;
        info!("loaded extension `{}`", extension.module());

        let entry = extension.entry_point()?;
        info!("resolved entry point `{}` in `{}`", ENTRY_POINT, extension.module());

        entry.invoke()
    }
}

/// Rejects every import.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoExtensions;

impl ExtensionLoader for NoExtensions {
    fn load(&mut self, name: &str) -> Result<()> {
        Err(ExtensionError::NotFound {
            module: module_file_name(name),
            reason: "extensions are disabled".to_string(),
        })
    }
}
