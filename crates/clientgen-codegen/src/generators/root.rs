//! Root index generator.

use crate::generator::{ArtifactGenerator, GenerationContext};
use crate::render::SourceFile;
use crate::types::GeneratedCode;
use clientgen_core::Result;

/// Emits `index.ts` at the output root, re-exporting every group folder.
#[derive(Debug, Clone, Copy, Default)]
pub struct RootIndexGenerator;

impl ArtifactGenerator for RootIndexGenerator {
    fn group(&self) -> &'static str {
        "root"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<GeneratedCode> {
        let folders = &ctx.config.folders;
        let mut modules = vec![&folders.types, &folders.api, &folders.client];
        if ctx.config.state_management.is_enabled() {
            modules.push(&folders.stores);
        }

        let mut file = SourceFile::new();
        file.push(
            modules
                .iter()
                .map(|module| format!("export * from './{module}';"))
                .collect::<Vec<_>>()
                .join("\n"),
        );

        let mut code = GeneratedCode::new(self.group());
        code.add_file(ctx.file(format!("index.{}", ctx.config.language.extension()), &file));
        Ok(code)
    }
}
