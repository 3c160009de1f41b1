use crate::error::{Result, ScanJsonError};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// One flag picked by the wizard frontend, or listed in the default-flags
/// config. `value` is present only for flags that take an argument.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectedFlag {
    pub flag: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// Load the wizard's selected-flags JSON.
///
/// The wizard writes an array of `{flag, value?}` objects, or a bare `"{}"`
/// placeholder when the user skipped every category; the placeholder (and
/// any other non-array payload) reads as an empty selection.
pub fn load_selected_flags<P: AsRef<Path>>(path: P) -> Result<Vec<SelectedFlag>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ScanJsonError::InputNotFound {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path)?;
    match serde_json::from_str::<Vec<SelectedFlag>>(&content) {
        Ok(flags) => Ok(flags),
        Err(_) => match serde_json::from_str::<Value>(&content) {
            Ok(_) => Ok(Vec::new()),
            Err(e) => Err(ScanJsonError::Config {
                message: format!("invalid selected-flags file: {}", e),
            }),
        },
    }
}

/// Load the `nmap_flags` list from a default-flags config file.
pub fn load_default_flags<P: AsRef<Path>>(path: P) -> Result<Vec<SelectedFlag>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ScanJsonError::InputNotFound {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path)?;
    let configs: Vec<Value> = match serde_json::from_str::<Vec<Value>>(&content) {
        Ok(configs) => configs,
        Err(_) => vec![serde_json::from_str::<Value>(&content).map_err(|e| {
            ScanJsonError::Config {
                message: format!("invalid flags config: {}", e),
            }
        })?],
    };

    let flags = configs
        .first()
        .and_then(|config| config.get("nmap_flags"))
        .ok_or_else(|| ScanJsonError::Config {
            message: "'nmap_flags' key is missing or malformed".to_string(),
        })?;

    serde_json::from_value(flags.clone()).map_err(|e| ScanJsonError::Config {
        message: format!("'nmap_flags' entries are malformed: {}", e),
    })
}

/// Render wizard selections as command-line arguments.
///
/// Valued flags collapse to a single `flag=value` token, matching what the
/// wizard consumer passed to nmap.
pub fn wizard_args(flags: &[SelectedFlag]) -> Vec<String> {
    flags
        .iter()
        .map(|f| match &f.value {
            Some(value) => format!("{}={}", f.flag, value),
            None => f.flag.clone(),
        })
        .collect()
}

/// Render default-config flags as command-line arguments.
///
/// Here a valued flag becomes two tokens, flag then value.
pub fn default_args(flags: &[SelectedFlag]) -> Vec<String> {
    let mut args = Vec::new();
    for f in flags {
        args.push(f.flag.clone());
        if let Some(value) = &f.value {
            if !value.is_empty() {
                args.push(value.clone());
            }
        }
    }
    args
}
