//! Types generator: one interface file per schema type plus an index.

use super::EMPTY_MODULE;
use crate::generator::{ArtifactGenerator, GenerationContext};
use crate::naming::to_kebab_case;
use crate::render::SourceFile;
use crate::typescript::property_key;
use crate::types::GeneratedCode;
use clientgen_core::Result;
use serde::Serialize;

/// Context of the `types/interface` template.
#[derive(Debug, Clone, Serialize)]
struct InterfaceContext {
    name: String,
    doc: String,
    fields: Vec<FieldContext>,
}

#[derive(Debug, Clone, Serialize)]
struct FieldContext {
    key: String,
    type_expr: String,
}

/// Emits `types/<type>.ts` for every declared type and `types/index.ts`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypesGenerator;

impl ArtifactGenerator for TypesGenerator {
    fn group(&self) -> &'static str {
        "types"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<GeneratedCode> {
        let folder = &ctx.config.folders.types;
        let mut code = GeneratedCode::new(self.group());
        let mut index = Vec::with_capacity(ctx.schema.types.len());

        for (type_name, fields) in &ctx.schema.types {
            let stem = to_kebab_case(type_name);
            let mut file = SourceFile::new();

            for expr in fields.values() {
                for referenced in ctx.types.declared_references(expr) {
                    if referenced != type_name {
                        file.import_type(
                            &format!("./{}", to_kebab_case(referenced)),
                            ctx.types.type_name(referenced),
                        );
                    }
                }
            }

            let context = InterfaceContext {
                name: ctx.types.type_name(type_name),
                doc: if ctx.doc_comments() {
                    format!("`{type_name}` record of the API schema.")
                } else {
                    String::new()
                },
                fields: fields
                    .iter()
                    .map(|(field, expr)| FieldContext {
                        key: property_key(field),
                        type_expr: ctx.types.map(expr),
                    })
                    .collect(),
            };
            file.push(ctx.engine.render("types/interface", &context)?);

            code.add_file(ctx.file(ctx.path_in(folder, &stem), &file));
            index.push(format!("export * from './{stem}';"));
            tracing::debug!(type_name = %type_name, file = %stem, "Generated type");
        }

        let mut file = SourceFile::new();
        if index.is_empty() {
            file.push(EMPTY_MODULE);
        } else {
            file.push(index.join("\n"));
        }
        code.add_file(ctx.file(ctx.path_in(folder, "index"), &file));

        Ok(code)
    }
}
