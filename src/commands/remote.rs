//! The `sy-remote` flow: inspect and mutate the registry documents.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Editor};

use crate::cli::{PathCommand, RemoteCommand};
use crate::config::ConfigStore;
use crate::ignore;
use crate::remotes::{RemoteError, RemoteRegistry};

pub fn cmd_remote(command: RemoteCommand) -> Result<()> {
    let store = ConfigStore::open_default()?;

    match command {
        RemoteCommand::Add { name, url, port } => {
            let mut registry = store.load_remotes()?;
            registry.add(&name, &url, port)?;
            save(&store, &registry)
        }

        RemoteCommand::View { name } => {
            let registry = store.load_remotes()?;
            match name {
                Some(name) => {
                    let remote = registry
                        .get(&name)
                        .ok_or_else(|| RemoteError::NotDefined(name.clone()))?;
                    println!("{}", serde_json::to_string_pretty(remote)?);
                }
                None => println!("{}", serde_json::to_string_pretty(&registry)?),
            }
            Ok(())
        }

        RemoteCommand::List => {
            let registry = store.load_remotes()?;
            for (name, remote) in registry.iter() {
                let port = remote
                    .effective_port()
                    .map(|p| format!(":{p}"))
                    .unwrap_or_default();
                println!("{} {}{}", format!("{name:30}").bold(), remote.url, port);
                for (source, dest) in remote.sorted_paths() {
                    println!("    {source:30} -> :{dest}");
                }
            }
            Ok(())
        }

        RemoteCommand::Edit => {
            let path = store.remotes_path();
            let current = if path.exists() {
                std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?
            } else {
                "{}".to_string()
            };

            let Some(edited) = Editor::new().extension(".json").edit(&current)? else {
                println!("Aborted; registry unchanged.");
                return Ok(());
            };

            let mut registry: RemoteRegistry = serde_json::from_str(&edited)
                .context("edited registry is not valid JSON; nothing was saved")?;
            registry.hydrate();
            registry
                .validate()
                .context("edited registry failed validation; nothing was saved")?;
            save(&store, &registry)
        }

        RemoteCommand::Remove { name, yes } => {
            let mut registry = store.load_remotes()?;
            if registry.get(&name).is_none() {
                bail!("remote '{name}' is not defined; nothing to remove");
            }

            let confirmed = yes
                || Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(format!("Remove remote '{name}'?"))
                    .default(false)
                    .interact()?;
            if !confirmed {
                println!("Aborted.");
                return Ok(());
            }

            registry.remove(&name)?;
            save(&store, &registry)
        }

        RemoteCommand::Path(command) => match command {
            PathCommand::Add { name, source, dest } => {
                let mut registry = store.load_remotes()?;
                registry.add_path(&name, &source, &dest)?;
                save(&store, &registry)
            }
            PathCommand::List { name } => {
                let registry = store.load_remotes()?;
                let remote = registry
                    .get(&name)
                    .ok_or_else(|| RemoteError::NotDefined(name.clone()))?;
                for (source, dest) in remote.sorted_paths() {
                    println!("{source:30}:{dest}");
                }
                Ok(())
            }
            PathCommand::Remove { name, source } => {
                let mut registry = store.load_remotes()?;
                registry.remove_path(&name, &source)?;
                save(&store, &registry)
            }
        },

        RemoteCommand::Ignore => {
            let path = store.ignore_path();
            if ignore::edit_patterns(&path)? {
                println!("Written config at: {}", path.display());
            } else {
                println!("Aborted; ignore patterns unchanged.");
            }
            Ok(())
        }
    }
}

fn save(store: &ConfigStore, registry: &RemoteRegistry) -> Result<()> {
    store.save_remotes(registry)?;
    println!("Written config at: {}", store.remotes_path().display());
    Ok(())
}
