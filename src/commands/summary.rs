use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Result};
use arboard::Clipboard;
use log::info;

use crate::commands::{load_config, load_records};
use crate::summary::build_whatsapp_text;

pub struct SummaryConfig {
    pub input: PathBuf,
    pub id: Option<String>,
    pub copy: bool,
    pub config_file: Option<PathBuf>,
}

pub fn handle_summary(config: SummaryConfig) -> Result<()> {
    let app_config = load_config(config.config_file.as_deref())?;
    let records = load_records(&config.input, &app_config)?;

    // Records arrive newest first, so the default is the latest record.
    let record = match &config.id {
        Some(id) => records
            .iter()
            .find(|r| r.id.as_deref() == Some(id.as_str())),
        None => records.first(),
    };
    let Some(record) = record else {
        match &config.id {
            Some(id) => bail!("no record with id {id}"),
            None => bail!("no records in {}", config.input.display()),
        }
    };

    let text = build_whatsapp_text(record, &app_config);
    writeln!(std::io::stdout(), "{text}")?;

    if config.copy {
        Clipboard::new()?.set_text(text)?;
        info!("summary copied to clipboard");
    }
    Ok(())
}
