use crate::cli::{Cli, Commands, ListCommands};
use crate::config::Config;
use crate::core::access::{AccessList, AccessLists};
use crate::llm::BackendCredentials;
use crate::relay;
use crate::ui::style;
use anyhow::{Context, Result, bail};
use dialoguer::Password;
use std::io::IsTerminal;
use std::sync::Arc;

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    let config = Arc::new(config);
    match cli.command {
        Commands::Start => relay::start_relay(config).await,
        Commands::Login { cookie } => login(&config, cookie),
        Commands::Users { command } => manage_list(&config, AccessList::Allowed, command).await,
        Commands::Admins { command } => manage_list(&config, AccessList::Admins, command).await,
        Commands::Doctor => relay::doctor(config).await,
    }
}

fn login(config: &Config, cookie: Option<String>) -> Result<()> {
    let cookie = if let Some(cookie) = cookie {
        cookie
    } else {
        if !std::io::stdin().is_terminal() {
            bail!("--cookie is required in non-interactive mode");
        }
        Password::new()
            .with_prompt("HuggingChat `hf-chat` cookie (input hidden)")
            .allow_empty_password(false)
            .interact()
            .context("Failed to read cookie from terminal")?
    };

    let credentials = BackendCredentials::new(cookie);
    if credentials.cookie.is_empty() {
        bail!("cookie must not be empty");
    }
    let path = BackendCredentials::path_in(&config.workspace_dir);
    credentials.save(&path)?;
    println!("{}", style::ok(format!("Saved backend login to {}", path.display())));
    Ok(())
}

async fn manage_list(config: &Config, list: AccessList, command: ListCommands) -> Result<()> {
    let lists = AccessLists::new(&config.workspace_dir);
    match command {
        ListCommands::Add { user } => {
            if lists.add(list, &user).await? {
                println!("{}", style::ok(format!("Added \"{user}\" to the {list}")));
            } else {
                println!("{}", style::warn(format!("\"{user}\" is already on the {list}")));
            }
        }
        ListCommands::Remove { user } => {
            if lists.remove(list, &user).await? {
                println!("{}", style::ok(format!("Removed \"{user}\" from the {list}")));
            } else {
                println!("{}", style::warn(format!("\"{user}\" is not on the {list}")));
            }
        }
        ListCommands::List => {
            let entries = lists.list(list).await?;
            println!("{}", style::header(format!("{} ({})", list, entries.len())));
            if entries.is_empty() {
                println!("  {}", style::dim("<empty>"));
            }
            for entry in entries {
                println!("  {entry}");
            }
        }
    }
    Ok(())
}
