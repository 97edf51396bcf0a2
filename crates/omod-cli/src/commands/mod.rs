//! Command dispatch and handler modules.

mod fetch;
mod resolve;

use std::path::Path;

use miette::Result;
use omod_core::config::{RepositoryConfig, ResolverConfig};
use omod_util::errors::OmodError;

use crate::cli::{Cli, Command, SourceArgs};

/// Route a parsed CLI invocation to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Resolve {
            module,
            source,
            strict,
        } => {
            let config = load_config(&source)?;
            resolve::exec(&module, config, strict).await
        }
        Command::Fetch {
            module,
            source,
            file_type,
            dest,
        } => {
            let config = load_config(&source)?;
            fetch::exec(&module, config, file_type, dest.as_deref()).await
        }
    }
}

/// Load the configuration, letting `--repo` flags replace its repositories.
fn load_config(source: &SourceArgs) -> Result<ResolverConfig> {
    let cwd = std::env::current_dir().map_err(OmodError::Io)?;
    let mut config = ResolverConfig::load(source.config.as_deref(), &cwd)?;
    if !source.repos.is_empty() {
        config.repositories = cli_repositories(&source.repos);
    }
    tracing::debug!(
        "Using {} repositories: {}",
        config.repositories.len(),
        config
            .repositories
            .iter()
            .map(|r| r.url.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(config)
}

fn cli_repositories(urls: &[String]) -> Vec<RepositoryConfig> {
    urls.iter()
        .enumerate()
        .map(|(i, url)| RepositoryConfig {
            name: format!("repo-{}", i + 1),
            url: url.trim_end_matches('/').to_string(),
            username: None,
            password: None,
        })
        .collect()
}

fn display_path(path: &Path) -> String {
    path.canonicalize()
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
