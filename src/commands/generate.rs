//! `generate` subcommand.
use anyhow::{Context, Result};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Render man pages for `cmd` and each of its (nested) subcommands into
/// `output_dir`, or the current directory if none is given.
///
/// Subcommand pages are named `<parent>-<sub>.1`, e.g. `jt-generate-man.1`.
///
/// # Errors
///
/// Returns an [`anyhow::Error`] if the output directory cannot be created or
/// a page cannot be written.
pub fn generate_man_pages(
    cmd: &clap::Command,
    output_dir: Option<PathBuf>,
) -> Result<Vec<PathBuf>> {
    let output_dir = match output_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Opening current directory")?,
    };
    std::fs::create_dir_all(&output_dir)
        .context("create output Man directories")?;

    let mut generated = vec![];
    let main_path = output_dir.join(format!("{}.1", cmd.get_name()));
    render_page(cmd.clone(), &main_path)?;
    generated.push(main_path);

    collect_subcommand_pages(cmd, &output_dir, cmd.get_name(), &mut generated)?;
    Ok(generated)
}

fn collect_subcommand_pages(
    cmd: &clap::Command,
    output_dir: &Path,
    prefix: &str,
    generated: &mut Vec<PathBuf>,
) -> Result<()> {
    for subcmd in cmd.get_subcommands() {
        let prefixed_name = format!("{prefix}-{}", subcmd.get_name());

        // clap_mangen takes NAME and SYNOPSIS from the command name, which
        // must be 'static. Man page generation runs once per process.
        let leaked_name: &'static str =
            Box::leak(prefixed_name.clone().into_boxed_str());
        let renamed = subcmd
            .clone()
            .name(leaked_name)
            .disable_help_subcommand(true);

        let path = output_dir.join(format!("{prefixed_name}.1"));
        render_page(renamed, &path)?;
        generated.push(path);

        if subcmd.has_subcommands() {
            collect_subcommand_pages(subcmd, output_dir, &prefixed_name, generated)?;
        }
    }
    Ok(())
}

fn render_page(cmd: clap::Command, path: &Path) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    clap_mangen::Man::new(cmd)
        .render(&mut file)
        .with_context(|| format!("failed to write {}", path.display()))
}
