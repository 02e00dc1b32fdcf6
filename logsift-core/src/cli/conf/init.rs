use anyhow::{Context, Result, bail};
use rust_embed::RustEmbed;
use std::fs;
use std::path::PathBuf;

#[derive(RustEmbed)]
#[folder = "config-templates/"]
pub struct ConfigTemplates;

/// Embedded template written by `logsift config init`.
pub const CONFIG_TEMPLATE: &str = "logsift.hcl";

pub fn init(path: PathBuf) -> Result<()> {
    // Refuse to overwrite an existing config
    if path.exists() {
        bail!("{} already exists", path.display());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let contents = template(CONFIG_TEMPLATE)?;
    fs::write(&path, contents.trim_start())
        .with_context(|| format!("failed to write {}", path.display()))?;

    println!("✔ Wrote {}", path.display());
    println!();
    println!("Next steps:");
    println!("  logsift config check {}", path.display());
    println!("  logsift analyze --config {} <INPUT>", path.display());

    Ok(())
}

/// Fetch an embedded config template as UTF-8 text
pub fn template(path: &str) -> Result<String> {
    let file = ConfigTemplates::get(path)
        .with_context(|| format!("missing embedded config template: {path}"))?;

    let s =
        std::str::from_utf8(file.data.as_ref()).context("config template is not valid UTF-8")?;

    Ok(s.to_owned())
}
