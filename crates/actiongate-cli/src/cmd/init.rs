use actiongate_core::config::Config;
use anyhow::Context;
use std::path::Path;

pub fn run(root: &Path) -> anyhow::Result<()> {
    let created = Config::init(root).context("failed to initialize project")?;
    if created {
        println!("Initialized actiongate in {}", root.display());
    } else {
        println!("Already initialized: {}", root.display());
    }
    Ok(())
}
