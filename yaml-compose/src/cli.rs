//! Command-line interface definitions for `yaml-compose`.

use camino::Utf8PathBuf;
use clap::Parser;

/// Parsed CLI arguments for `yaml-compose`.
#[derive(Debug, Clone, Parser)]
#[command(name = "yaml-compose")]
#[command(about = "Compose a base YAML file with the layers in its BASE.d/ directory")]
#[command(version)]
pub struct Args {
    /// Base YAML file; layers are read from the sibling `<YAML-FILE>.d/`.
    #[arg(value_name = "YAML-FILE")]
    pub base: Utf8PathBuf,
    /// Write the composed document to this file instead of stdout.
    #[arg(short, long, value_name = "PATH", env = "YAML_COMPOSE_OUTPUT")]
    pub output: Option<Utf8PathBuf>,
    /// Only merge the sub-tree at this dot-path from each layer.
    #[arg(
        short = 'e',
        long = "extract-layer",
        value_name = "DOT-PATH",
        env = "YAML_COMPOSE_EXTRACT_LAYER",
        default_value = ""
    )]
    pub extract_layer: String,
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;
    use rstest::rstest;

    #[rstest]
    fn parses_positional_base_only() -> anyhow::Result<()> {
        let args = Args::try_parse_from(["yaml-compose", "conf.yaml"])?;
        assert_eq!(args.base, "conf.yaml");
        assert!(args.output.is_none());
        assert!(args.extract_layer.is_empty());
        Ok(())
    }

    #[rstest]
    #[case::short(&["yaml-compose", "b.yaml", "-o", "out.yaml", "-e", "app.db"])]
    #[case::long(&["yaml-compose", "b.yaml", "--output", "out.yaml", "--extract-layer", "app.db"])]
    fn parses_output_and_extract_flags(#[case] argv: &[&str]) -> anyhow::Result<()> {
        let args = Args::try_parse_from(argv.iter().copied())?;
        assert_eq!(args.output.as_deref().map(camino::Utf8Path::as_str), Some("out.yaml"));
        assert_eq!(args.extract_layer, "app.db");
        Ok(())
    }

    #[rstest]
    fn base_is_required() {
        assert!(Args::try_parse_from(["yaml-compose"]).is_err());
    }
}
