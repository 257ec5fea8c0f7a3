//! `overcast instance` handlers

use crate::InstanceCommands;
use colored::Colorize;
use overcast_core::{CreateOptions, ImportOptions, InstanceController, RemoveOptions};

pub async fn handle(
    controller: &InstanceController,
    command: InstanceCommands,
) -> anyhow::Result<()> {
    match command {
        InstanceCommands::Create {
            name,
            cluster,
            provider,
            region,
            image,
            size,
        } => {
            let created = controller
                .create(CreateOptions {
                    name,
                    cluster,
                    provider,
                    region,
                    size,
                    image,
                })
                .await?;
            println!("{} {}", "✓".green().bold(), created.to_string().green());
        }
        InstanceCommands::Import {
            name,
            cluster,
            ip,
            user,
            ssh_port,
            ssh_key,
        } => {
            let imported = controller
                .import(ImportOptions {
                    name,
                    cluster,
                    ip,
                    user,
                    ssh_port,
                    ssh_key,
                })
                .await?;
            println!("{} {}", "✓".green().bold(), imported.to_string().green());
        }
        InstanceCommands::Remove { name } => {
            let removed = controller.remove(RemoveOptions { name }).await?;
            println!("{} {}", "✓".green().bold(), removed.to_string().green());
        }
    }

    Ok(())
}
