//! User and resolved configuration.
//!
//! [`UserConfig`] mirrors the JSON configuration file: every field is
//! optional and nested groups may be partially filled in. [`ResolvedConfig`]
//! is the fully populated result of [`crate::resolver::resolve`] that
//! generators read from.
//!
//! # Examples
//!
//! ```
//! use clientgen_core::config::{ResolvedConfig, UserConfig};
//!
//! let user: UserConfig = serde_json::from_str(r#"{
//!     "apiKey": "${API_KEY}",
//!     "client": { "className": "Acme" }
//! }"#).unwrap();
//! assert_eq!(user.api_key.as_deref(), Some("${API_KEY}"));
//!
//! let defaults = ResolvedConfig::default();
//! assert!(defaults.client.enabled);
//! assert_eq!(defaults.client.class_name, "ApiClient");
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default base URL of the generated client.
pub const DEFAULT_BASE_URL: &str = "https://api.example.com";

/// Default API version segment.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Default output directory, relative to the workspace root.
pub const DEFAULT_OUTPUT_DIR: &str = "src/api-client";

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "clientgen.config.json";

/// Output language. TypeScript is the only emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// TypeScript sources (`.ts`)
    #[default]
    #[serde(alias = "ts")]
    TypeScript,
}

impl Language {
    /// File extension without the leading dot.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::TypeScript => "ts",
        }
    }
}

/// Target state-management library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateManagement {
    /// Zustand hooks
    #[default]
    Zustand,
    /// Redux Toolkit slices
    Redux,
    /// No stores are generated
    None,
}

impl StateManagement {
    /// Returns `true` unless stores are disabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Returns the config string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Zustand => "zustand",
            Self::Redux => "redux",
            Self::None => "none",
        }
    }
}

impl fmt::Display for StateManagement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target HTTP transport of the generated helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpClient {
    /// `axios`
    #[default]
    Axios,
    /// Global `fetch`
    Fetch,
    /// User-supplied transport registered at runtime
    Custom,
}

impl HttpClient {
    /// Returns the config string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Axios => "axios",
            Self::Fetch => "fetch",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Project framework the output is tuned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// Detect from the workspace
    #[default]
    Auto,
    /// Next.js
    #[serde(alias = "next")]
    NextJs,
    /// React (CRA and similar)
    React,
    /// Vite
    Vite,
    /// Vue
    Vue,
    /// Nuxt
    Nuxt,
    /// Svelte / `SvelteKit`
    Svelte,
    /// Node.js server
    Node,
    /// No framework
    Vanilla,
}

impl ProjectType {
    /// Returns the config string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::NextJs => "nextjs",
            Self::React => "react",
            Self::Vite => "vite",
            Self::Vue => "vue",
            Self::Nuxt => "nuxt",
            Self::Svelte => "svelte",
            Self::Node => "node",
            Self::Vanilla => "vanilla",
        }
    }

    /// Preferred HTTP client and state management for this project type.
    ///
    /// `Auto` has no preferences of its own.
    #[must_use]
    pub const fn preferences(&self) -> Option<(HttpClient, StateManagement)> {
        match self {
            Self::Auto => None,
            Self::NextJs => Some((HttpClient::Fetch, StateManagement::Zustand)),
            Self::React | Self::Vite => Some((HttpClient::Axios, StateManagement::Zustand)),
            Self::Vue | Self::Nuxt | Self::Svelte | Self::Vanilla => {
                Some((HttpClient::Fetch, StateManagement::None))
            }
            Self::Node => Some((HttpClient::Axios, StateManagement::None)),
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response shape of generated functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponsePattern {
    /// Throw on failure, resolve to the bare payload
    #[default]
    Promise,
    /// Always resolve to `{ data, error }`
    Result,
}

/// User-declared error class emitted next to the built-in ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomErrorClass {
    /// Class name
    pub name: String,
    /// Base class, `ApiError` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    /// Extra constructor properties
    #[serde(default)]
    pub properties: Vec<CustomErrorProperty>,
}

/// One property of a [`CustomErrorClass`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomErrorProperty {
    /// Property name
    pub name: String,
    /// Type expression
    #[serde(rename = "type")]
    pub type_expr: String,
}

// Sparse user configuration

/// Configuration as written by the user. Every field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    /// Credential sent to the schema endpoint and embedded in the client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// API base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Environment tag embedded in the generated client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// Output language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    /// State-management target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_management: Option<StateManagement>,
    /// HTTP transport target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_client: Option<HttpClient>,
    /// Output directory, relative paths resolve against the workspace root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// API version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// Project type, `auto` triggers detection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<ProjectType>,
    /// Naming overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub naming: Option<NamingOverrides>,
    /// Folder name overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folders: Option<FolderOverrides>,
    /// Client class overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientOverrides>,
    /// API module overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiOverrides>,
    /// Response shape overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseOverrides>,
    /// Plugin system overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins: Option<PluginOverrides>,
    /// Error class overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<ErrorOverrides>,
    /// HTTP transport overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpOverrides>,
    /// Generation toggles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<GenerationOverrides>,
    /// Service selection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<ServiceSelection>,
    /// Per-environment overrides keyed by environment name
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub environments: IndexMap<String, EnvironmentOverride>,
}

/// Scalar overrides applied for one runtime environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentOverride {
    /// Credential
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// API version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// Output directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// HTTP transport
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_client: Option<HttpClient>,
    /// State management
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_management: Option<StateManagement>,
}

/// Allow-list of resources to generate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSelection {
    /// Resource names; absent means every resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
}

/// Sparse `naming` group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamingOverrides {
    /// Prepended to every emitted type name
    pub type_prefix: Option<String>,
    /// Appended to every emitted type name
    pub type_suffix: Option<String>,
    /// Prepended to every API function name
    pub function_prefix: Option<String>,
    /// Store hook prefix, `use` by default
    pub store_prefix: Option<String>,
    /// Store hook suffix, `Store` by default
    pub store_suffix: Option<String>,
}

/// Sparse `folders` group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderOverrides {
    /// Folder of the type declarations
    pub types: Option<String>,
    /// Folder of the API functions
    pub api: Option<String>,
    /// Folder of the HTTP client
    pub client: Option<String>,
    /// Folder of the state stores
    pub stores: Option<String>,
}

/// Sparse `client` group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientOverrides {
    /// Emit the client class
    pub enabled: Option<bool>,
    /// Client class name
    pub class_name: Option<String>,
    /// Also export the client as the module default
    pub default_export: Option<bool>,
}

/// Sparse `api` group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiOverrides {
    /// Re-export each resource as a namespace
    pub namespace: Option<bool>,
    /// One file per resource instead of one flat file
    pub group_by_resource: Option<bool>,
    /// Call the shared HTTP helper instead of emitting stubs
    pub use_http_helper: Option<bool>,
}

/// Sparse `response` group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseOverrides {
    /// Shape API functions resolve to
    pub pattern: Option<ResponsePattern>,
}

/// Sparse `plugins` group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginOverrides {
    /// Emit the plugin registry
    pub enabled: Option<bool>,
    /// Emit the built-in logger plugin
    pub logger: Option<bool>,
}

/// Sparse `errors` group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOverrides {
    /// Emit the error classes
    pub enabled: Option<bool>,
    /// Emit `ValidationError`
    pub validation_error: Option<bool>,
    /// Emit `NetworkError`
    pub network_error: Option<bool>,
    /// Extra error classes
    pub custom: Option<Vec<CustomErrorClass>>,
}

/// Sparse `http` group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpOverrides {
    /// Request timeout in milliseconds
    pub timeout_ms: Option<u64>,
    /// Headers sent with every request
    pub headers: Option<IndexMap<String, String>>,
    /// Retry policy
    pub retry: Option<RetryOverrides>,
}

/// Sparse `http.retry` group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryOverrides {
    /// Retry failed requests
    pub enabled: Option<bool>,
    /// Attempts after the first request
    pub attempts: Option<u32>,
    /// Delay between attempts in milliseconds
    pub delay_ms: Option<u64>,
}

/// Sparse `generation` group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOverrides {
    /// Emit the banner and section comments
    pub comments: Option<bool>,
    /// Emit JSDoc on generated declarations
    pub doc_comments: Option<bool>,
    /// Strip comments and blank lines
    pub minify: Option<bool>,
    /// Allow writing into a non-empty output directory
    pub overwrite: Option<bool>,
    /// Generate without writing
    pub dry_run: Option<bool>,
    /// Run `tsc --noEmit` over the written tree
    pub validate_output: Option<bool>,
}

// Fully populated configuration

/// Fully populated configuration consumed by generators.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    /// Credential, presence is enforced by the orchestrator
    pub api_key: Option<String>,
    /// API base URL
    pub base_url: String,
    /// Environment tag
    pub environment: String,
    /// Output language
    pub language: Language,
    /// State-management target
    pub state_management: StateManagement,
    /// HTTP transport target
    pub http_client: HttpClient,
    /// Output root
    pub output_dir: PathBuf,
    /// API version
    pub api_version: String,
    /// Project type after detection
    pub project_type: ProjectType,
    /// Naming prefixes and suffixes
    pub naming: NamingConfig,
    /// Folder names per artifact group
    pub folders: FolderConfig,
    /// Client class behavior
    pub client: ClientConfig,
    /// API module behavior
    pub api: ApiConfig,
    /// Response shape
    pub response: ResponseConfig,
    /// Plugin system
    pub plugins: PluginConfig,
    /// Error classes
    pub errors: ErrorConfig,
    /// HTTP transport settings
    pub http: HttpConfig,
    /// Generation toggles
    pub generation: GenerationConfig,
    /// Resource allow-list, `None` selects every resource
    pub services: Option<Vec<String>>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            environment: crate::EnvironmentName::DEFAULT.to_string(),
            language: Language::default(),
            state_management: StateManagement::default(),
            http_client: HttpClient::default(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            api_version: DEFAULT_API_VERSION.to_string(),
            project_type: ProjectType::Vanilla,
            naming: NamingConfig::default(),
            folders: FolderConfig::default(),
            client: ClientConfig::default(),
            api: ApiConfig::default(),
            response: ResponseConfig::default(),
            plugins: PluginConfig::default(),
            errors: ErrorConfig::default(),
            http: HttpConfig::default(),
            generation: GenerationConfig::default(),
            services: None,
        }
    }
}

/// Copies every `Some` field of an overrides struct onto a resolved group.
macro_rules! merge_fields {
    ($target:expr, $overrides:expr; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = &$overrides.$field {
                $target.$field = value.clone();
            }
        )+
    };
}

/// Naming prefixes and suffixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamingConfig {
    /// Prepended to every emitted type name
    pub type_prefix: String,
    /// Appended to every emitted type name
    pub type_suffix: String,
    /// Prepended to every API function name
    pub function_prefix: String,
    /// Store hook prefix, `use` by default
    pub store_prefix: String,
    /// Store hook suffix, `Store` by default
    pub store_suffix: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            type_prefix: String::new(),
            type_suffix: String::new(),
            function_prefix: String::new(),
            store_prefix: "use".to_string(),
            store_suffix: "Store".to_string(),
        }
    }
}

impl NamingConfig {
    /// Applies user overrides key by key.
    pub fn merge(&mut self, overrides: &NamingOverrides) {
        merge_fields!(self, overrides; type_prefix, type_suffix, function_prefix, store_prefix, store_suffix);
    }
}

/// Folder names of the artifact groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderConfig {
    /// Folder of the type declarations
    pub types: String,
    /// Folder of the API functions
    pub api: String,
    /// Folder of the HTTP client
    pub client: String,
    /// Folder of the state stores
    pub stores: String,
}

impl Default for FolderConfig {
    fn default() -> Self {
        Self {
            types: "types".to_string(),
            api: "api".to_string(),
            client: "client".to_string(),
            stores: "stores".to_string(),
        }
    }
}

impl FolderConfig {
    /// Applies user overrides key by key.
    pub fn merge(&mut self, overrides: &FolderOverrides) {
        merge_fields!(self, overrides; types, api, client, stores);
    }
}

/// Client class behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Emit the client class
    pub enabled: bool,
    /// Name of the client class
    pub class_name: String,
    /// Add `export default` for the class
    pub default_export: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            class_name: "ApiClient".to_string(),
            default_export: true,
        }
    }
}

impl ClientConfig {
    /// Applies user overrides key by key.
    pub fn merge(&mut self, overrides: &ClientOverrides) {
        merge_fields!(self, overrides; enabled, class_name, default_export);
    }
}

/// API module behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    /// Re-export each resource as a namespace
    pub namespace: bool,
    /// One file per resource instead of a single file
    pub group_by_resource: bool,
    /// Delegate to the shared HTTP helper
    pub use_http_helper: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            namespace: false,
            group_by_resource: true,
            use_http_helper: true,
        }
    }
}

impl ApiConfig {
    /// Applies user overrides key by key.
    pub fn merge(&mut self, overrides: &ApiOverrides) {
        merge_fields!(self, overrides; namespace, group_by_resource, use_http_helper);
    }
}

/// Response shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResponseConfig {
    /// Promise or result pattern
    pub pattern: ResponsePattern,
}

impl ResponseConfig {
    /// Applies user overrides key by key.
    pub fn merge(&mut self, overrides: &ResponseOverrides) {
        merge_fields!(self, overrides; pattern);
    }

    /// Returns `true` for the `{ data, error }` shape.
    #[must_use]
    pub const fn is_result(&self) -> bool {
        matches!(self.pattern, ResponsePattern::Result)
    }
}

/// Plugin system toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginConfig {
    /// Emit the plugin registry and route requests through it
    pub enabled: bool,
    /// Emit the built-in logger plugin
    pub logger: bool,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            logger: false,
        }
    }
}

impl PluginConfig {
    /// Applies user overrides key by key.
    pub fn merge(&mut self, overrides: &PluginOverrides) {
        merge_fields!(self, overrides; enabled, logger);
    }
}

/// Error class toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorConfig {
    /// Emit `errors.ts` at all
    pub enabled: bool,
    /// Emit `ValidationError`
    pub validation_error: bool,
    /// Emit `NetworkError`
    pub network_error: bool,
    /// User-declared classes
    pub custom: Vec<CustomErrorClass>,
}

impl Default for ErrorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            validation_error: true,
            network_error: true,
            custom: Vec::new(),
        }
    }
}

impl ErrorConfig {
    /// Applies user overrides key by key.
    pub fn merge(&mut self, overrides: &ErrorOverrides) {
        merge_fields!(self, overrides; enabled, validation_error, network_error, custom);
    }
}

/// HTTP transport settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpConfig {
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// Extra headers sent with every request
    pub headers: IndexMap<String, String>,
    /// Retry policy
    pub retry: RetryConfig,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            headers: IndexMap::new(),
            retry: RetryConfig::default(),
        }
    }
}

impl HttpConfig {
    /// Applies user overrides; headers and retry merge key by key.
    pub fn merge(&mut self, overrides: &HttpOverrides) {
        merge_fields!(self, overrides; timeout_ms);
        if let Some(headers) = &overrides.headers {
            self.headers
                .extend(headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        if let Some(retry) = &overrides.retry {
            self.retry.merge(retry);
        }
    }
}

/// Retry policy for network failures and 5xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryConfig {
    /// Whether retries happen at all
    pub enabled: bool,
    /// Total attempts including the first one
    pub attempts: u32,
    /// Delay between attempts in milliseconds
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            attempts: 3,
            delay_ms: 1000,
        }
    }
}

impl RetryConfig {
    /// Applies user overrides key by key.
    pub fn merge(&mut self, overrides: &RetryOverrides) {
        merge_fields!(self, overrides; enabled, attempts, delay_ms);
    }
}

/// Generation toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Banner and section comments
    pub comments: bool,
    /// Doc comments on declarations
    pub doc_comments: bool,
    /// Strip comments and blank lines
    pub minify: bool,
    /// Allow writing into a non-empty output root
    pub overwrite: bool,
    /// Run everything except disk writes
    pub dry_run: bool,
    /// Type-check the written tree afterwards
    pub validate_output: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            comments: true,
            doc_comments: true,
            minify: false,
            overwrite: false,
            dry_run: false,
            validate_output: false,
        }
    }
}

impl GenerationConfig {
    /// Applies user overrides key by key.
    pub fn merge(&mut self, overrides: &GenerationOverrides) {
        merge_fields!(self, overrides; comments, doc_comments, minify, overwrite, dry_run, validate_output);
    }
}
