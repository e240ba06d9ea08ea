//! Stores generator: per-endpoint request state for zustand or redux.

use super::{from_group, import_schema_types};
use crate::generator::{ArtifactGenerator, GenerationContext};
use crate::model::OperationModel;
use crate::naming::to_pascal_case;
use crate::render::SourceFile;
use crate::types::GeneratedCode;
use clientgen_core::config::StateManagement;
use clientgen_core::Result;
use serde::Serialize;

const REDUX_TOOLKIT: &str = "@reduxjs/toolkit";
const GLOBAL_STEM: &str = "global";
const ROOT_STORE_STEM: &str = "store";

#[derive(Debug, Clone, Serialize)]
struct ZustandContext<'a> {
    state_name: String,
    response_type: &'a str,
    fetch_params: String,
    doc_comments: bool,
    function_name: &'a str,
    hook_name: String,
    call_params: &'static str,
    global_hook: String,
    result_pattern: bool,
}

#[derive(Debug, Clone, Serialize)]
struct ReduxSliceContext<'a> {
    state_name: String,
    response_type: &'a str,
    doc_comments: bool,
    function_name: &'a str,
    thunk_name: String,
    thunk_arg: String,
    slice_key: &'a str,
    thunk_param: &'static str,
    result_pattern: bool,
    call_params: &'static str,
    slice_name: String,
    reset_action: String,
    reducer_name: String,
}

#[derive(Debug, Clone, Serialize)]
struct GlobalContext {
    doc_comments: bool,
    hook_name: String,
}

#[derive(Debug, Clone, Serialize)]
struct RootContext {
    slices: Vec<SliceEntry>,
}

#[derive(Debug, Clone, Serialize)]
struct SliceEntry {
    key: String,
    reducer: String,
}

/// Emits the `stores` folder, or nothing when state management is off.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoresGenerator;

impl StoresGenerator {
    fn hook_name(ctx: &GenerationContext<'_>, base: &str) -> String {
        format!(
            "{}{base}{}",
            ctx.config.naming.store_prefix, ctx.config.naming.store_suffix
        )
    }

    fn call_params(op: &OperationModel) -> &'static str {
        if op.has_params() { "params" } else { "" }
    }

    /// Imports shared by every per-endpoint store: the api function and
    /// the schema types it mentions.
    fn operation_file(ctx: &GenerationContext<'_>, op: &OperationModel) -> SourceFile {
        let mut file = SourceFile::new();
        file.import_named(&from_group(&op.module), op.function_name.clone());
        import_schema_types(&mut file, ctx, op.referenced_types.iter().map(String::as_str));
        file
    }

    fn zustand(ctx: &GenerationContext<'_>, op: &OperationModel) -> Result<SourceFile> {
        let global_hook = Self::hook_name(ctx, "Global");
        let mut file = Self::operation_file(ctx, op);
        file.import_named("zustand", "create")
            .import_named(&format!("./{GLOBAL_STEM}"), global_hook.clone());

        let pascal = to_pascal_case(&op.function_name);
        let fetch_params = match (op.has_params(), op.all_optional) {
            (false, _) => String::new(),
            (true, true) => format!("params?: {}", op.params_type),
            (true, false) => format!("params: {}", op.params_type),
        };

        let context = ZustandContext {
            state_name: format!("{pascal}State"),
            response_type: &op.response_type,
            fetch_params,
            doc_comments: ctx.doc_comments(),
            function_name: &op.function_name,
            hook_name: Self::hook_name(ctx, &pascal),
            call_params: Self::call_params(op),
            global_hook,
            result_pattern: ctx.config.response.is_result(),
        };
        file.push(ctx.engine.render("stores/zustand", &context)?);
        Ok(file)
    }

    fn redux(ctx: &GenerationContext<'_>, op: &OperationModel) -> Result<SourceFile> {
        let mut file = Self::operation_file(ctx, op);
        file.import_named(REDUX_TOOLKIT, "createAsyncThunk")
            .import_named(REDUX_TOOLKIT, "createSlice");

        let name = &op.function_name;
        let pascal = to_pascal_case(name);
        let thunk_arg = match (op.has_params(), op.all_optional) {
            (false, _) => "void".to_string(),
            (true, true) => format!("{} | undefined", op.params_type),
            (true, false) => op.params_type.clone(),
        };

        let context = ReduxSliceContext {
            state_name: format!("{pascal}State"),
            response_type: &op.response_type,
            doc_comments: ctx.doc_comments(),
            function_name: name,
            thunk_name: format!("{name}Thunk"),
            thunk_arg,
            slice_key: name,
            thunk_param: if op.has_params() { "params" } else { "_arg" },
            result_pattern: ctx.config.response.is_result(),
            call_params: Self::call_params(op),
            slice_name: format!("{name}Slice"),
            reset_action: format!("reset{pascal}"),
            reducer_name: format!("{name}Reducer"),
        };
        file.push(ctx.engine.render("stores/redux-slice", &context)?);
        Ok(file)
    }

    fn global(ctx: &GenerationContext<'_>) -> Result<SourceFile> {
        let mut file = SourceFile::new();
        let context = GlobalContext {
            doc_comments: ctx.doc_comments(),
            hook_name: Self::hook_name(ctx, "Global"),
        };
        if ctx.config.state_management == StateManagement::Redux {
            for name in ["createSlice", "isFulfilled", "isPending", "isRejected"] {
                file.import_named(REDUX_TOOLKIT, name);
            }
            file.import_type(REDUX_TOOLKIT, "PayloadAction");
            file.push(ctx.engine.render("stores/redux-global", &context)?);
        } else {
            file.import_named("zustand", "create");
            file.push(ctx.engine.render("stores/zustand-global", &context)?);
        }
        Ok(file)
    }

    fn redux_root(ctx: &GenerationContext<'_>) -> Result<SourceFile> {
        let mut file = SourceFile::new();
        file.import_named(REDUX_TOOLKIT, "configureStore")
            .import_named(&format!("./{GLOBAL_STEM}"), "globalReducer");

        let mut slices = Vec::new();
        for op in ctx.model.operations() {
            let reducer = format!("{}Reducer", op.function_name);
            file.import_named(&format!("./{}", op.store_stem), reducer.clone());
            slices.push(SliceEntry {
                key: op.function_name.clone(),
                reducer,
            });
        }

        file.push(ctx.engine.render("stores/redux-root", &RootContext { slices })?);
        Ok(file)
    }
}

impl ArtifactGenerator for StoresGenerator {
    fn group(&self) -> &'static str {
        "stores"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<GeneratedCode> {
        let mut code = GeneratedCode::new(self.group());
        let management = ctx.config.state_management;
        if !management.is_enabled() {
            return Ok(code);
        }

        let folder = &ctx.config.folders.stores;
        let mut index = vec![format!("export * from './{GLOBAL_STEM}';")];
        code.add_file(ctx.file(ctx.path_in(folder, GLOBAL_STEM), &Self::global(ctx)?));

        for op in ctx.model.operations() {
            let file = match management {
                StateManagement::Redux => Self::redux(ctx, op)?,
                _ => Self::zustand(ctx, op)?,
            };
            code.add_file(ctx.file(ctx.path_in(folder, &op.store_stem), &file));
            index.push(format!("export * from './{}';", op.store_stem));
        }

        if management == StateManagement::Redux {
            code.add_file(ctx.file(ctx.path_in(folder, ROOT_STORE_STEM), &Self::redux_root(ctx)?));
            index.push(format!("export * from './{ROOT_STORE_STEM}';"));
        }

        let mut file = SourceFile::new();
        file.push(index.join("\n"));
        code.add_file(ctx.file(ctx.path_in(folder, "index"), &file));

        tracing::debug!(
            state_management = %management,
            stores = ctx.model.operation_count(),
            "Generated stores"
        );
        Ok(code)
    }
}
