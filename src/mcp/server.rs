use std::{fmt::Display, path::Path};

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::Serialize;

use super::types::{
    CheckBundlesParams, CheckResult, ConfigDto, GetConfigParams, IssueItem, KeyItem, KeysResult,
    ListKeysParams, ResolveMessageParams, ResolveResult, locale_overrides, paginate,
};
use crate::{
    config::ConfigOverrides,
    core::ProjectContext,
    issues::{Rule, Severity},
};

#[derive(Clone)]
pub struct RestextMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for RestextMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

fn open_project(path: &str, overrides: &ConfigOverrides) -> Result<ProjectContext, McpError> {
    ProjectContext::new(Path::new(path), overrides)
        .map_err(|e| McpError::internal_error(format!("Failed to load project: {:#}", e), None))
}

fn to_tool_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

#[tool_router]
impl RestextMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Get project configuration
    #[tool(
        description = "Get the bundle configuration (.restextrc.json merged with defaults) and the locale lookups use."
    )]
    pub async fn get_config(
        &self,
        params: Parameters<GetConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let ctx = open_project(&params.0.project_root_path, &ConfigOverrides::default())?;
        let effective_locale = ctx
            .locale()
            .map_err(|e| McpError::internal_error(format!("Invalid locale: {:#}", e), None))?;

        let dto = ConfigDto {
            from_file: ctx.from_file,
            project_root: ctx.root_dir.to_string_lossy().to_string(),
            effective_locale: effective_locale.to_string(),
            config: ctx.config.into(),
        };
        to_tool_result(&dto)
    }

    /// Resolve one key through the specific and common bundles
    #[tool(
        description = "Resolve a message key: the specific bundle is consulted first, then the common bundle. Pass args to substitute {0}, {1}, ... placeholders. A missing key returns found=false."
    )]
    pub async fn resolve_message(
        &self,
        params: Parameters<ResolveMessageParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let ctx = open_project(
            &params.project_root_path,
            &locale_overrides(params.locale.as_deref()),
        )?;
        let resolver = ctx
            .resolver()
            .map_err(|e| McpError::internal_error(format!("Failed to initialize: {:#}", e), None))?;

        let result = match resolver.lookup(&params.key) {
            Ok(resolved) => {
                let value = match &params.args {
                    Some(args) => {
                        let args: Vec<&dyn Display> =
                            args.iter().map(|a| a as &dyn Display).collect();
                        resolved.format(&args)
                    }
                    None => resolved.value.clone(),
                };
                ResolveResult {
                    key: resolved.key,
                    found: true,
                    value: Some(value),
                    template: Some(resolved.value),
                    bundle: Some(resolved.bundle),
                    locale: Some(resolved.locale.to_string()),
                    error: None,
                }
            }
            Err(err) if err.is_not_found() => ResolveResult {
                key: params.key,
                found: false,
                value: None,
                template: None,
                bundle: None,
                locale: None,
                error: Some(err.to_string()),
            },
            Err(err) => {
                return Err(McpError::internal_error(
                    format!("Lookup failed: {}", err),
                    None,
                ));
            }
        };
        to_tool_result(&result)
    }

    /// List resolvable keys
    #[tool(
        description = "List every key the resolver can answer, with its value and the bundle that supplies it. Keys in the specific bundle shadow the common bundle. Returns a paginated list."
    )]
    pub async fn list_keys(
        &self,
        params: Parameters<ListKeysParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let limit = params.limit.map(|v| v as usize).unwrap_or(50).min(200);
        let offset = params.offset.map(|v| v as usize).unwrap_or(0);

        let ctx = open_project(
            &params.project_root_path,
            &locale_overrides(params.locale.as_deref()),
        )?;
        let resolver = ctx
            .resolver()
            .map_err(|e| McpError::internal_error(format!("Failed to initialize: {:#}", e), None))?;

        let mut keys = resolver
            .keys()
            .map_err(|e| McpError::internal_error(format!("Failed to load bundles: {}", e), None))?;
        if let Some(prefix) = &params.prefix {
            keys.retain(|k| k.key.starts_with(prefix.as_str()));
        }

        let total_count = keys.len();
        let items: Vec<KeyItem> = keys.into_iter().map(KeyItem::from).collect();
        let (items, pagination) = paginate(items, offset, limit);

        let result = KeysResult {
            locale: resolver.locale().unwrap_or_default().to_string(),
            tiers: resolver.tiers().to_vec(),
            total_count,
            items,
            pagination,
        };
        to_tool_result(&result)
    }

    /// Check bundle files for problems
    #[tool(
        description = "Check every bundle table under the bundles root: parse errors, missing root tables, orphan keys, malformed {n} patterns and placeholder mismatches. Returns counts and a paginated issue list."
    )]
    pub async fn check_bundles(
        &self,
        params: Parameters<CheckBundlesParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let limit = params.limit.map(|v| v as usize).unwrap_or(20).min(100);
        let offset = params.offset.map(|v| v as usize).unwrap_or(0);

        let ctx = open_project(&params.project_root_path, &ConfigOverrides::default())?;
        let issues = ctx
            .check(&Rule::all())
            .map_err(|e| McpError::internal_error(format!("Check failed: {:#}", e), None))?;

        let error_count = issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
            .count();
        let warning_count = issues.len() - error_count;
        let total_count = issues.len();

        let items: Vec<IssueItem> = issues.iter().map(IssueItem::from).collect();
        let (items, pagination) = paginate(items, offset, limit);

        let result = CheckResult {
            error_count,
            warning_count,
            total_count,
            items,
            pagination,
        };
        to_tool_result(&result)
    }
}

#[tool_handler]
impl ServerHandler for RestextMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Restext MCP gives AI agents read access to tiered message bundles.\n\n\
                 A project has a specific bundle and a common bundle (JSON files under the bundles root, \
                 one per locale: <bundle>.json for root, <bundle>_<locale>.json for translations). \
                 Lookups try the specific bundle first, then the common bundle.\n\n\
                 Available tools:\n\
                 1. get_config - Get bundle names, bundles root and the effective locale\n\
                 2. resolve_message - Resolve one key, optionally formatting {n} placeholders\n\
                 3. list_keys - List resolvable keys with the bundle supplying each (paginated)\n\
                 4. check_bundles - Report parse errors, orphan keys and broken patterns (paginated)"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = RestextMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
