use std::path::PathBuf;

use courtside::config::ConfigManager;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ShowConfigArg {
    /// Also write the effective configuration to this TOML file
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(manager: &ConfigManager, arg: &ShowConfigArg) -> anyhow::Result<()> {
    println!("{}", toml::to_string_pretty(manager.get())?);
    if let Some(path) = &arg.output {
        manager.save_to_file(path)?;
        log::info!("Configuration written to {}", path.display());
    }
    Ok(())
}
