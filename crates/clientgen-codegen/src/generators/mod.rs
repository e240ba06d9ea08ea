//! Built-in artifact generators.
//!
//! One module per artifact group. Each generator renders declaration-sized
//! fragments with the template engine and assembles files through
//! [`crate::render::SourceFile`].

mod api;
mod client;
mod root;
mod stores;
mod types;

pub use api::ApiGenerator;
pub use client::ClientGenerator;
pub use root::RootIndexGenerator;
pub use stores::StoresGenerator;
pub use types::TypesGenerator;

use crate::generator::GenerationContext;
use crate::render::SourceFile;

/// Import specifier of a module, seen from a file inside any group folder.
fn from_group(module: &str) -> String {
    format!("../{module}")
}

/// Adds `import type { ... } from '../types'` for declared schema types.
fn import_schema_types<'n>(
    file: &mut SourceFile,
    ctx: &GenerationContext<'_>,
    names: impl IntoIterator<Item = &'n str>,
) {
    let module = from_group(&ctx.config.folders.types);
    for name in names {
        file.import_type(&module, ctx.types.type_name(name));
    }
}

/// Body of an index file with no exports.
const EMPTY_MODULE: &str = "export {};";
