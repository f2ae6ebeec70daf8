//! Native extension modules.
//!
//! An extension is a dynamic library named `<name>` plus the platform's
//! library suffix that exports one function:
//!
//! ```c
//! void some_function(void);
//! ```
//!
//! `import <name>` opens the library, resolves that symbol, calls it exactly
//! once and releases the library again.

mod error;
mod loader;

pub use error::{ExtensionError, Result};
pub use loader::{
    module_file_name, EntryPoint, Extension, ExtensionLoader, NativeLoader, NoExtensions,
    ENTRY_POINT,
};
