//! Handler for `omod fetch`.

use std::path::Path;

use miette::Result;
use omod_core::config::ResolverConfig;
use omod_core::coordinate::{module_artifact_id, Coordinate, FileType};
use omod_maven::fetcher::{ArtifactFetcher, FetchError, MavenFetcher};
use omod_util::errors::OmodError;
use omod_util::progress::{spinner, status};

use super::display_path;
use crate::cli::ModuleArgs;

pub async fn exec(
    module: &ModuleArgs,
    config: ResolverConfig,
    file_type: FileType,
    dest: Option<&Path>,
) -> Result<()> {
    let dest = match dest {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().map_err(OmodError::Io)?,
    };
    omod_util::fs::ensure_dir(&dest).map_err(OmodError::Io)?;

    let fetcher = MavenFetcher::from_config(&config)?;
    let coordinate = Coordinate::new(
        module.group.as_str(),
        module_artifact_id(&module.artifact),
        module.version.as_str(),
    )
    .with_file_type(file_type);

    let sp = spinner(&format!("Downloading {coordinate}..."));
    let fetched = fetcher.fetch(&coordinate, &dest).await;
    sp.finish_and_clear();

    let fetched = fetched.map_err(|e| match e {
        FetchError::Io(io) => OmodError::Io(io),
        FetchError::NotFound { .. } => OmodError::Generic {
            message: format!("{e} (searched {} repositories)", fetcher.repositories().len()),
        },
        FetchError::Transport { .. } => OmodError::Network {
            message: e.to_string(),
        },
    })?;

    status("Downloaded", &coordinate.to_string());
    println!("{}", display_path(&fetched.path));
    Ok(())
}
