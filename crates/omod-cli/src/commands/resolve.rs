//! Handler for `omod resolve`.

use miette::Result;
use omod_core::config::ResolverConfig;
use omod_maven::fetcher::MavenFetcher;
use omod_resolver::resolver::ModuleResolver;
use omod_util::errors::OmodError;
use omod_util::progress::{spinner, status, status_warn};

use crate::cli::ModuleArgs;

pub async fn exec(module: &ModuleArgs, config: ResolverConfig, strict: bool) -> Result<()> {
    let fetcher = MavenFetcher::from_config(&config)?;
    let mut resolver = ModuleResolver::new(fetcher, config);

    status(
        "Resolving",
        &format!("{}:{}:{}", module.group, module.artifact, module.version),
    );
    let sp = spinner("Resolving required modules...");
    let outcome = resolver
        .resolve(&module.group, &module.artifact, &module.version)
        .await;
    sp.finish_and_clear();
    outcome?;

    let report = resolver.report();
    println!("{report}");

    if report.is_complete() {
        status(
            "Finished",
            &format!("{} modules resolved", report.resolved.len()),
        );
        return Ok(());
    }

    status_warn(
        "Unresolved",
        &format!(
            "{} of {} modules",
            report.unresolved.len(),
            report.resolved.len() + report.unresolved.len()
        ),
    );
    if strict {
        let names: Vec<&str> = report
            .unresolved
            .iter()
            .map(|row| row.module_id.as_str())
            .collect();
        return Err(OmodError::Resolution {
            message: format!("unresolved modules: {}", names.join(", ")),
        }
        .into());
    }
    Ok(())
}
