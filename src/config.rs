//! Map configuration loading for the driver.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use terramesh_terrain::MapConfig;
use tracing::warn;

const DEFAULT_MAP_PATH: &str = "config/map.toml";

/// Load the map configuration, falling back to defaults on errors.
///
/// A missing file at the default path is normal (first run); anything
/// else is logged before the defaults take over. Validation happens
/// later, when the generator is constructed.
pub fn load_map_config(path: Option<&Path>) -> MapConfig {
    let default_path = Path::new(DEFAULT_MAP_PATH);
    let path = path.unwrap_or(default_path);

    match fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<MapConfig>(&contents) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!("Failed to parse {}: {err}. Using defaults", path.display());
                MapConfig::default()
            }
        },
        Err(err) => {
            if path != default_path || err.kind() != ErrorKind::NotFound {
                warn!("Failed to read {}: {err}. Using defaults", path.display());
            } else {
                warn!("Map config not found at {}. Using defaults", path.display());
            }
            MapConfig::default()
        }
    }
}
