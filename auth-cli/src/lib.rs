//! Commands of the `spa-auth` CLI
//!
//! Each command renders its output to a string so it can be tested without
//! capturing stdout.

use anyhow::{Result, bail};
use spa_auth::app_config::AppConfig;
use spa_auth::authorize::authorization_url;
use spa_auth::diagnostics::check_config;
use spa_auth::options::AuthOptions;
use spa_auth::provider::ProviderKind;
use spa_auth::providers::build_providers;
use spa_auth::redirect::PageOrigin;
use tracing::info;

/// Inputs shared by all commands
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: AppConfig,
    pub origin: PageOrigin,
    /// Build-time base URL used when the config has no base path
    pub default_base_path: Option<String>,
}

impl CommandContext {
    fn effective_config(&self) -> AppConfig {
        self.config
            .clone()
            .with_default_base_path(self.default_base_path.as_deref())
    }
}

/// Provider map as pretty JSON
pub fn providers_json(ctx: &CommandContext) -> Result<String> {
    let providers = build_providers(&ctx.effective_config(), &ctx.origin);
    Ok(serde_json::to_string_pretty(&providers)?)
}

/// Full flow options as pretty JSON
pub fn options_json(ctx: &CommandContext) -> Result<String> {
    let options = AuthOptions::from_config(
        &ctx.config,
        &ctx.origin,
        ctx.default_base_path.as_deref(),
    );
    Ok(serde_json::to_string_pretty(&options)?)
}

/// Authorization URL of `provider`, followed by its state when it has one
pub fn authorize_url(ctx: &CommandContext, provider: &str) -> Result<String> {
    let kind: ProviderKind = provider.parse()?;
    let providers = build_providers(&ctx.effective_config(), &ctx.origin);
    let Some(config) = providers.get(&kind) else {
        bail!("provider {kind} missing from provider map");
    };
    let request = authorization_url(kind, config)?;
    let mut out = request.url.to_string();
    if let Some(state) = request.state {
        out.push_str(&format!("\nstate: {state}"));
    }
    Ok(out)
}

/// Diagnostics report; fails when the config has issues
pub fn check(ctx: &CommandContext) -> Result<String> {
    let issues = check_config(&ctx.effective_config());
    if issues.is_empty() {
        info!("no issues found");
        return Ok("ok".to_string());
    }
    let report = issues
        .iter()
        .map(|issue| format!("- {issue}"))
        .collect::<Vec<_>>()
        .join("\n");
    bail!("{} issue(s) found:\n{report}", issues.len())
}
