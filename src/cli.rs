//! Command-line options for the generation driver.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use terramesh_terrain::MapConfig;

const USAGE: &str = "\
Usage: terramesh [OPTIONS]

Options:
  --config <PATH>        Map configuration TOML (default: config/map.toml)
  --seed <N>             Fixed world seed instead of OS entropy
  --map-chunks <XxY>     Override the chunk grid size, e.g. 4x4
  -h, --help             Print this help
";

/// Parsed command-line options.
#[derive(Debug, Default)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
    pub map_chunks: Option<(u32, u32)>,
}

impl CliOptions {
    /// Parse options from an argument iterator (without the program name).
    pub fn parse<I: Iterator<Item = String>>(mut args: I) -> Result<Self> {
        let mut options = Self::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let Some(value) = args.next() else {
                        bail!("--config requires a path");
                    };
                    options.config = Some(PathBuf::from(value));
                }
                "--seed" => {
                    let Some(value) = args.next() else {
                        bail!("--seed requires a value");
                    };
                    options.seed =
                        Some(value.parse().context("--seed requires an unsigned integer")?);
                }
                "--map-chunks" => {
                    let Some(value) = args.next() else {
                        bail!("--map-chunks requires a value like 4x4");
                    };
                    options.map_chunks = Some(parse_grid(&value)?);
                }
                "-h" | "--help" => {
                    print!("{USAGE}");
                    std::process::exit(0);
                }
                other => bail!("unknown argument: {other}\n{USAGE}"),
            }
        }

        Ok(options)
    }

    /// Apply CLI overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut MapConfig) {
        if let Some((x, y)) = self.map_chunks {
            config.x_map_chunks = x;
            config.y_map_chunks = y;
        }
    }
}

fn parse_grid(value: &str) -> Result<(u32, u32)> {
    let Some((x, y)) = value.split_once('x') else {
        bail!("--map-chunks expects WIDTHxHEIGHT, got {value}");
    };
    let x = x.parse().with_context(|| format!("bad grid width {x:?}"))?;
    let y = y.parse().with_context(|| format!("bad grid height {y:?}"))?;
    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliOptions> {
        CliOptions::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_empty_args_use_defaults() {
        let options = parse(&[]).expect("empty args parse");
        assert!(options.config.is_none());
        assert!(options.seed.is_none());
        assert!(options.map_chunks.is_none());
    }

    #[test]
    fn test_parses_all_flags() {
        let options =
            parse(&["--config", "maps/alpine.toml", "--seed", "42", "--map-chunks", "4x3"])
                .expect("full args parse");
        assert_eq!(options.config, Some(PathBuf::from("maps/alpine.toml")));
        assert_eq!(options.seed, Some(42));
        assert_eq!(options.map_chunks, Some((4, 3)));
    }

    #[test]
    fn test_rejects_missing_values_and_unknown_flags() {
        assert!(parse(&["--seed"]).is_err());
        assert!(parse(&["--seed", "not-a-number"]).is_err());
        assert!(parse(&["--map-chunks", "4"]).is_err());
        assert!(parse(&["--frobnicate"]).is_err());
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let options = parse(&["--map-chunks", "5x7"]).expect("grid parses");
        let mut config = MapConfig::default();
        options.apply_overrides(&mut config);
        assert_eq!(config.x_map_chunks, 5);
        assert_eq!(config.y_map_chunks, 7);
    }
}
