use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::sample::sample_tree;
use crate::config::Settings;
use crate::domain::{Deserialized, DomainError};
use crate::infrastructure::{load_relations, relations_to_toml, InfraError, IoResultExt};
use crate::render::{write_dot_with, RenderResult, TreeOutline};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let config = cli.config.as_deref();
    match &cli.command {
        Some(Commands::Dot { relations, output }) => _dot(config, relations, output.as_deref()),
        Some(Commands::Tree { relations }) => _tree(config, relations),
        Some(Commands::Sample { output, relations }) => {
            _sample(config, output.as_deref(), *relations)
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => _config_show(config),
            ConfigCommands::Template => {
                output::info(&Settings::template());
                Ok(())
            }
        },
        None => Ok(()),
    }
}

#[instrument]
fn _dot(config: Option<&Path>, relations: &Path, out: Option<&Path>) -> CliResult<()> {
    if out == Some(relations) {
        return Err(CliError::InvalidArgs(format!(
            "output would overwrite relation file: {}",
            relations.display()
        )));
    }
    let settings = Settings::load(config)?;
    let built = build(&settings, relations)?;

    with_output(out, |w| write_dot_with(&built.root, &settings.style, w))?;
    if let Some(path) = out {
        output::success(&format!("written: {}", path.display()));
    }
    finish(built)
}

#[instrument]
fn _tree(config: Option<&Path>, relations: &Path) -> CliResult<()> {
    let settings = Settings::load(config)?;
    let built = build(&settings, relations)?;

    output::info(&built.root.to_tree_string());
    output::detail(&format!("depth: {}", built.root.depth()));
    output::detail(&format!("leaves: {}", built.root.leaf_ids().join(", ")));
    finish(built)
}

#[instrument]
fn _sample(config: Option<&Path>, out: Option<&Path>, as_relations: bool) -> CliResult<()> {
    let tree = sample_tree();
    debug!("sample: {}", tree);

    if as_relations {
        let text = relations_to_toml(&tree.to_relations())?;
        return with_output(out, |w| Ok(w.write_all(text.as_bytes())?));
    }

    let settings = Settings::load(config)?;
    with_output(out, |w| write_dot_with(&tree, &settings.style, w))
}

fn _config_show(config: Option<&Path>) -> CliResult<()> {
    let settings = Settings::load(config)?;
    output::info(&settings.to_toml()?);
    Ok(())
}

fn build(settings: &Settings, relations: &Path) -> CliResult<Deserialized> {
    let relations = load_relations(relations)?;
    Ok(settings.tree_builder().build(&relations)?)
}

/// Partial trees are still shown, but the run fails.
fn finish(built: Deserialized) -> CliResult<()> {
    match built.error {
        Some(e @ DomainError::UnresolvedNodes { .. }) => {
            output::warning(&format!("tree is incomplete: {}", e));
            Err(e.into())
        }
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

/// Runs `render` against the output file or stdout and flushes the result.
fn with_output<F>(out: Option<&Path>, render: F) -> CliResult<()>
where
    F: FnOnce(&mut dyn Write) -> RenderResult<()>,
{
    match out {
        Some(path) => {
            let file = File::create(path).with_path_context("create output", path)?;
            let mut writer = BufWriter::new(file);
            render(&mut writer).map_err(InfraError::from)?;
            writer.flush().with_path_context("write output", path)?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            render(&mut writer).map_err(InfraError::from)?;
            writer
                .flush()
                .map_err(|e| InfraError::io("write stdout", e))?;
        }
    }
    Ok(())
}
