//! Transitive module resolution: depth-first, higher-version-wins, with
//! failures recorded per module instead of aborting the run.

use std::cmp::Ordering;
use std::path::Path;

use omod_core::config::ResolverConfig;
use omod_core::coordinate::{module_artifact_id, Coordinate, ModuleId};
use omod_maven::fetcher::{ArtifactFetcher, FetchedArtifact};
use omod_util::errors::OmodError;
use tempfile::TempDir;

use crate::error::ResolveError;
use crate::manifest;
use crate::report::ResolutionReport;
use crate::state::{ResolutionState, ResolvedEntry, UnresolvedEntry};
use crate::version;
use crate::visited::VisitedSet;

const WORK_DIR_PREFIX: &str = "omod-";

/// Resolves the module closure of a root coordinate through an
/// [`ArtifactFetcher`].
pub struct ModuleResolver<F> {
    fetcher: F,
    config: ResolverConfig,
    state: ResolutionState,
}

/// Per-run bookkeeping for one top-level `resolve` call.
struct Run<'a> {
    work_dir: &'a Path,
    /// Module requests fetched successfully in this run.
    visited: VisitedSet,
}

impl<F: ArtifactFetcher> ModuleResolver<F> {
    pub fn new(fetcher: F, config: ResolverConfig) -> Self {
        Self {
            fetcher,
            config,
            state: ResolutionState::new(),
        }
    }

    pub fn state(&self) -> &ResolutionState {
        &self.state
    }

    pub fn report(&self) -> ResolutionReport {
        ResolutionReport::from_state(&self.state)
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Resolve `identifier` and everything it transitively requires.
    ///
    /// Per-module failures end up in the unresolved set. Only failures to
    /// create or remove the working directory are returned as errors.
    pub async fn resolve(
        &mut self,
        namespace: &str,
        identifier: &str,
        version: &str,
    ) -> miette::Result<()> {
        let work_dir = self.create_work_dir()?;
        tracing::debug!("Working directory {}", work_dir.path().display());

        let mut run = Run {
            work_dir: work_dir.path(),
            visited: VisitedSet::new(),
        };

        // Children are pushed in reverse so they pop in manifest order,
        // matching a recursive preorder walk.
        let mut stack = vec![Coordinate::new(namespace, identifier, version)];
        while let Some(request) = stack.pop() {
            let dependencies = self.resolve_one(&request, &mut run).await;
            stack.extend(dependencies.into_iter().rev());
        }

        self.state.reconcile();
        tracing::info!(
            "Resolved {} modules, {} unresolved, {} fetched",
            self.state.resolved_count(),
            self.state.unresolved_count(),
            run.visited.len()
        );

        work_dir.close().map_err(OmodError::Io)?;
        Ok(())
    }

    fn create_work_dir(&self) -> miette::Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(WORK_DIR_PREFIX);
        let dir = match &self.config.work_dir {
            Some(parent) => {
                omod_util::fs::ensure_dir(parent).map_err(OmodError::Io)?;
                builder.tempdir_in(parent)
            }
            None => builder.tempdir(),
        };
        dir.map_err(|e| OmodError::Io(e).into())
    }

    /// Handle one request, returning the dependencies to expand next.
    async fn resolve_one(&mut self, request: &Coordinate, run: &mut Run<'_>) -> Vec<Coordinate> {
        let artifact_id = module_artifact_id(&request.identifier);
        let module_id = ModuleId::from_artifact(&artifact_id);
        tracing::info!(
            "Resolving {}:{artifact_id}:{}",
            request.namespace,
            request.version
        );

        match self
            .expand(&request.namespace, &module_id, &artifact_id, &request.version, run)
            .await
        {
            Ok(dependencies) => dependencies,
            Err(err) => {
                tracing::warn!(
                    "Failed to resolve {}:{artifact_id}:{}: {err}",
                    request.namespace,
                    request.version
                );
                self.state.record_unresolved(UnresolvedEntry {
                    module_id,
                    namespace: request.namespace.clone(),
                    version: request.version.clone(),
                    reason: err.to_string(),
                });
                Vec::new()
            }
        }
    }

    async fn expand(
        &mut self,
        namespace: &str,
        module_id: &ModuleId,
        artifact_id: &str,
        version: &str,
        run: &mut Run<'_>,
    ) -> Result<Vec<Coordinate>, ResolveError> {
        match self.state.resolved(module_id) {
            Some(current) => {
                if version::compare(&current.version, version)? != Ordering::Less {
                    tracing::debug!(
                        "Already resolved {module_id} at same or higher version ({} >= {version})",
                        current.version
                    );
                    return Ok(Vec::new());
                }
            }
            None => version::validate(version)?,
        }

        // Only successful fetches are remembered, so a repeated failing request
        // is retried and overwrites the unresolved record.
        if run.visited.contains(module_id, version) {
            tracing::debug!("Already expanded {module_id} {version} in this run");
            return Ok(Vec::new());
        }
        if run.visited.len() >= self.config.max_expansions {
            return Err(ResolveError::ExpansionLimit {
                limit: self.config.max_expansions,
            });
        }

        let fetched = self.fetch(artifact_id, version, run.work_dir).await?;
        run.visited.visit(module_id, version);

        // Recorded before expanding so a cycle back to this module short-circuits.
        // A manifest failure below leaves it resolved at the fetched version.
        self.state.record_resolved(ResolvedEntry {
            module_id: module_id.clone(),
            namespace: namespace.to_string(),
            version: fetched.version.clone(),
        });

        let dependencies =
            manifest::required_modules(&fetched.path, &self.config.known_namespaces)
                .map_err(|err| ResolveError::from_manifest(module_id, err))?;
        tracing::debug!("{module_id} requires {} modules", dependencies.len());
        Ok(dependencies)
    }

    /// Try every candidate namespace × file type in order; first success wins.
    async fn fetch(
        &self,
        artifact_id: &str,
        version: &str,
        work_dir: &Path,
    ) -> Result<FetchedArtifact, ResolveError> {
        let mut attempts = 0;
        for namespace in &self.config.candidate_namespaces {
            for file_type in &self.config.file_types {
                attempts += 1;
                let coordinate = Coordinate::new(namespace.as_str(), artifact_id, version)
                    .with_file_type(*file_type);
                match self.fetcher.fetch(&coordinate, work_dir).await {
                    Ok(fetched) => {
                        tracing::debug!("Fetched {coordinate}");
                        return Ok(fetched);
                    }
                    Err(err) => tracing::debug!("{err}"),
                }
            }
        }
        Err(ResolveError::ArtifactNotFound {
            identifier: artifact_id.to_string(),
            version: version.to_string(),
            attempts,
        })
    }
}
