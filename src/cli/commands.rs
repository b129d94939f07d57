//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::TypeTreeService;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::infrastructure::{SchemaContext, SchemaType};
use crate::tree_traits::TreeNodeConvert;
use crate::util::path::normalize_path_separator;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Tree { schema, root }) => cmd_tree(cli, schema, root.as_deref()),
        Some(Commands::Lenses { schema, root }) => cmd_lenses(cli, schema, root.as_deref()),
        Some(Commands::Types { schema }) => cmd_types(schema),
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see --help".to_string(),
        )),
    }
}

fn service(cli: &Cli) -> CliResult<TypeTreeService> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);
    Ok(TypeTreeService::new(settings))
}

#[instrument(skip(cli))]
fn cmd_tree(cli: &Cli, schema: &Path, root: Option<&str>) -> CliResult<()> {
    let service = service(cli)?;
    let ctx = SchemaContext::load(schema)?;
    let root = service.resolve_root(root, ctx.root())?;
    let built = service.build(&ctx, &root)?;
    output::info(&built.tree().to_tree_string());
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_lenses(cli: &Cli, schema: &Path, root: Option<&str>) -> CliResult<()> {
    let service = service(cli)?;
    let ctx = SchemaContext::load(schema)?;
    let root = service.resolve_root(root, ctx.root())?;
    let built = service.build(&ctx, &root)?;
    print!("{}", service.lenses(built.tree()));
    Ok(())
}

#[instrument]
fn cmd_types(schema: &Path) -> CliResult<()> {
    let ctx = SchemaContext::load(schema)?;
    output::header(&format!("Types in {}", normalize_path_separator(&schema.display().to_string())));
    for name in ctx.type_names() {
        let marker = if ctx.root() == Some(name) { " (root)" } else { "" };
        match ctx.get(name) {
            Some(SchemaType::Struct(members)) => {
                output::detail(&format!("{name}{marker}: {} members", members.len()))
            }
            Some(SchemaType::Union(variants)) => {
                output::detail(&format!("{name}{marker}: {}", variants.join(" | ")))
            }
            None => {}
        }
    }
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(cli.config.as_deref())?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => {
                let shown = normalize_path_separator(&path.display().to_string());
                if path.exists() {
                    output::info(&shown);
                } else {
                    output::warning(&format!("{shown} (does not exist)"));
                }
            }
            None => {
                return Err(CliError::Usage(
                    "cannot determine config directory".to_string(),
                ))
            }
        },
    }
    Ok(())
}
