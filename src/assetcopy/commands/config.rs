use crate::commands::{CmdMessage, CmdResult};
use crate::config::{parse_flag_value, AssetLibrary, CopyConfig};
use crate::error::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
    AddLibrary { name: String, path: PathBuf },
    RemoveLibrary(String),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = CopyConfig::load(config_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => return Ok(result.with_config(config)),
        ConfigAction::ShowKey(key) => match config.flag(&key) {
            Some(value) => result.add_message(CmdMessage::info(format!("{} = {}", key, value))),
            None => result.add_message(CmdMessage::error(format!("Unknown config key: {}", key))),
        },
        ConfigAction::Set(key, value) => {
            let parsed = parse_flag_value(&value).and_then(|v| {
                config.set_flag(&key, v)?;
                Ok(v)
            });
            match parsed {
                Ok(v) => {
                    config.save(config_dir)?;
                    result.add_message(CmdMessage::success(format!("{} set to {}", key, v)));
                }
                Err(e) => result.add_message(CmdMessage::error(e.to_string())),
            }
        }
        ConfigAction::AddLibrary { name, path } => {
            result.add_message(CmdMessage::success(format!(
                "Library {} -> {}",
                name,
                path.display()
            )));
            config.add_library(AssetLibrary::new(name, path));
            config.save(config_dir)?;
        }
        ConfigAction::RemoveLibrary(name) => match config.remove_library(&name) {
            Some(_) => {
                config.save(config_dir)?;
                result.add_message(CmdMessage::success(format!("Removed library {}", name)));
            }
            None => result.add_message(CmdMessage::error(format!("No library named {}", name))),
        },
    }

    Ok(result.with_config(config))
}
