//! `overcast cluster` handlers

use crate::{ClusterCommands, Context};
use colored::Colorize;
use overcast_registry::sanitize_opt;

pub async fn handle(context: &Context, command: ClusterCommands) -> anyhow::Result<()> {
    match command {
        ClusterCommands::Create { name } => {
            let name = sanitize_opt(name.as_deref())
                .ok_or_else(|| anyhow::anyhow!("Missing [name] parameter."))?;

            context
                .store
                .update(|clusters| {
                    if clusters.create_cluster(name.as_str()) {
                        Ok(())
                    } else {
                        Err(anyhow::anyhow!("Cluster \"{}\" already exists.", name))
                    }
                })
                .await?;

            tracing::info!(cluster = %name, "Created cluster");
            println!(
                "{} {}",
                "✓".green().bold(),
                format!("Cluster \"{}\" has been created.", name).green()
            );
        }
    }

    Ok(())
}
