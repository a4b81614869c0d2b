//! The `sy` flow: resolve each path's remote, plan everything, then run.

use anyhow::{bail, Context, Result};

use crate::cli::SyArgs;
use crate::config::ConfigStore;
use crate::exec::Executor;
use crate::paths;
use crate::plan::PlanBuilder;

/// Plan and execute a synchronization for each requested path.
///
/// All paths are planned before anything runs, so a planning error on a
/// later path aborts cleanly. Bindings are saved once at the end: a path
/// synced (or previewed) against a remote is remembered for next time.
pub fn cmd_sync(args: SyArgs) -> Result<()> {
    let store = ConfigStore::open_default()?;
    let registry = store.load_remotes()?;
    let mut bindings = store.load_bindings()?;

    if args.list {
        for (path, remote) in bindings.iter() {
            println!("{path:50} {remote}");
        }
        return Ok(());
    }

    let mut requested = args.paths.clone();
    if requested.is_empty() {
        requested.push(".".to_string());
    }

    let builder = PlanBuilder::new(args.sync_options());
    let mut plans = Vec::with_capacity(requested.len());
    for raw in &requested {
        let local = paths::absolutize(raw).with_context(|| format!("resolving path '{raw}'"))?;

        let name = match args.remote.as_deref() {
            Some(name) => name.to_string(),
            None => match bindings.get(&local) {
                Some(name) => {
                    tracing::debug!(path = %local, remote = %name, "reusing bound remote");
                    name.to_string()
                }
                None => bail!(
                    "Please specify a destination for '{local}': \
                     no remote given and the path has never been synced"
                ),
            },
        };

        let mut remote = registry.resolve(&name)?;
        if let Some(port) = args.port {
            remote.port = Some(port);
        }

        plans.push(builder.plan(&local, &remote, &mut bindings)?);
    }

    let executor = Executor::new(args.show_plan, args.verbose);
    for plan in &plans {
        executor.run(plan)?;
    }

    store.save_bindings(&bindings)?;
    Ok(())
}
