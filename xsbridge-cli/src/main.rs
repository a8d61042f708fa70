#![doc = include_str!("../README.md")]

use std::io::{self, Write};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use log::{debug, info};
use serde::Serialize;
use serde_json::json;
use xsbridge::{
    display_token, mapping_table, token_to_wire, wire_to_internal, ChecksumAlgorithm,
    MappingEntry, ResourceChecksumType,
};

mod config;

use crate::config::{Config, ConfigError, OutputFormat};

#[derive(Debug, Subcommand)]
enum CliSubcommand {
    #[command(about = "Converts a checksum algorithm name to its wire checksum type")]
    ToWire {
        #[arg(help = "Checksum Algorithm Name")]
        token: String,
    },

    #[command(about = "Converts a wire checksum type to its checksum algorithm name")]
    FromWire {
        #[arg(
            allow_negative_numbers = true,
            help = "Wire Checksum Type, as a name or an integer"
        )]
        wire: ResourceChecksumType,
    },

    #[command(about = "Shows the display name of a checksum algorithm name")]
    Display {
        #[arg(help = "Checksum Algorithm Name")]
        token: String,
    },

    #[command(about = "Shows the whole translation table")]
    Table,
}

#[derive(Debug, Parser)]
#[command(version, about = "CS3 Checksum Type Translation Utility")]
struct Cli {
    #[arg(short, long, help = "Output Format")]
    format: Option<OutputFormat>,

    #[clap(subcommand)]
    command: CliSubcommand,
}

fn write_json<W, T>(out: &mut W, value: &T) -> Result<(), anyhow::Error>
where
    W: Write,
    T: ?Sized + Serialize,
{
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;

    Ok(())
}

fn write_table_text<W, I>(out: &mut W, entries: I) -> Result<(), anyhow::Error>
where
    W: Write,
    I: IntoIterator<Item = MappingEntry>,
{
    for entry in entries {
        writeln!(
            out,
            "{:<8} {:<8} {}",
            entry.name,
            entry.display_name,
            entry.wire
        )?;
    }

    Ok(())
}

fn config_for<F>(flag: Option<OutputFormat>, load: F) -> Result<Config, ConfigError>
where
    F: FnOnce() -> Result<Config, ConfigError>,
{
    if flag.is_some() {
        debug!("Output format set on the command line, skipping configuration file.");
        return Ok(Config::default());
    }

    load()
}

fn resolve_format(flag: Option<OutputFormat>, config: &Config) -> OutputFormat {
    flag.or(config.format).unwrap_or_default()
}

fn log_fallbacks(command: &CliSubcommand) {
    match command {
        CliSubcommand::ToWire { token } => {
            if let Ok(algo) = token.parse::<ChecksumAlgorithm>() {
                if algo != ChecksumAlgorithm::Invalid
                    && algo.to_wire() == ResourceChecksumType::INVALID
                {
                    debug!("No wire checksum type for {algo}, using invalid.");
                }
            } else {
                debug!("Unknown checksum algorithm {token}, using invalid.");
            }
        }
        CliSubcommand::FromWire { wire } if !wire.is_known() => {
            debug!("Unknown wire checksum type {}, using invalid.", wire.value());
        }
        CliSubcommand::Display { token } if token.parse::<ChecksumAlgorithm>().is_err() => {
            debug!("Unknown checksum algorithm {token}, using as-is.");
        }
        CliSubcommand::FromWire { .. } | CliSubcommand::Display { .. } | CliSubcommand::Table => {}
    }
}

fn run<W>(command: &CliSubcommand, format: OutputFormat, out: &mut W) -> Result<(), anyhow::Error>
where
    W: Write,
{
    log_fallbacks(command);

    match (command, format) {
        (CliSubcommand::ToWire { token }, OutputFormat::Text) => {
            writeln!(out, "{}", token_to_wire(token))?;
        }
        (CliSubcommand::ToWire { token }, OutputFormat::Json) => {
            let wire = token_to_wire(token);

            write_json(
                out,
                &json!({
                    "token": token,
                    "wire": wire,
                    "wire_name": wire.as_str_name(),
                }),
            )?;
        }
        (CliSubcommand::FromWire { wire }, OutputFormat::Text) => {
            writeln!(out, "{}", wire_to_internal(*wire))?;
        }
        (CliSubcommand::FromWire { wire }, OutputFormat::Json) => {
            write_json(
                out,
                &json!({
                    "wire": wire,
                    "algorithm": wire_to_internal(*wire),
                }),
            )?;
        }
        (CliSubcommand::Display { token }, OutputFormat::Text) => {
            writeln!(out, "{}", display_token(token))?;
        }
        (CliSubcommand::Display { token }, OutputFormat::Json) => {
            write_json(
                out,
                &json!({
                    "token": token,
                    "display_name": display_token(token),
                }),
            )?;
        }
        (CliSubcommand::Table, OutputFormat::Text) => {
            write_table_text(out, mapping_table())?;
        }
        (CliSubcommand::Table, OutputFormat::Json) => {
            let table: Vec<_> = mapping_table().collect();

            write_json(out, &table)?;
        }
    }

    Ok(())
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let cli = Cli::parse();

    info!(
        "Running {} {}",
        env!("CARGO_CRATE_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let config =
        config_for(cli.format, Config::load).context("Couldn't load the configuration")?;
    debug!("Configuration: {config:#?}");

    let format = resolve_format(cli.format, &config);
    debug!("Output format is {format:#?}");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    run(&cli.command, format, &mut out)?;
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod cli_test {
    use clap::Parser as _;
    use serde_json::Value;
    use test_log::test;

    use crate::{config_for, resolve_format, run, Cli, Config, OutputFormat};

    fn run_args(args: &[&str]) -> String {
        let cli = Cli::try_parse_from(core::iter::once("xsbridge").chain(args.iter().copied()))
            .unwrap();
        let mut out = Vec::new();

        run(
            &cli.command,
            cli.format.unwrap_or_default(),
            &mut out,
        )
        .unwrap();

        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_to_wire() {
        assert_eq!(run_args(&["to-wire", "sha1"]), "RESOURCE_CHECKSUM_TYPE_SHA1\n");
    }

    #[test]
    fn test_to_wire_sha256() {
        assert_eq!(
            run_args(&["to-wire", "sha256"]),
            "RESOURCE_CHECKSUM_TYPE_INVALID\n"
        );
    }

    #[test]
    fn test_to_wire_unknown() {
        assert_eq!(
            run_args(&["to-wire", "crc32"]),
            "RESOURCE_CHECKSUM_TYPE_INVALID\n"
        );
    }

    #[test]
    fn test_to_wire_json() {
        let value: Value =
            serde_json::from_str(&run_args(&["--format", "json", "to-wire", "md5"])).unwrap();

        assert_eq!(value["wire"], 3);
        assert_eq!(value["wire_name"], "RESOURCE_CHECKSUM_TYPE_MD5");
    }

    #[test]
    fn test_from_wire_integer() {
        assert_eq!(run_args(&["from-wire", "2"]), "adler32\n");
    }

    #[test]
    fn test_from_wire_name() {
        assert_eq!(
            run_args(&["from-wire", "RESOURCE_CHECKSUM_TYPE_UNSET"]),
            "unset\n"
        );
        assert_eq!(run_args(&["from-wire", "SHA1"]), "sha1\n");
    }

    #[test]
    fn test_from_wire_unknown() {
        assert_eq!(run_args(&["from-wire", "42"]), "invalid\n");
        assert_eq!(run_args(&["from-wire", "-1"]), "invalid\n");
    }

    #[test]
    fn test_from_wire_bad_input() {
        Cli::try_parse_from(["xsbridge", "from-wire", "SHA256"]).unwrap_err();
    }

    #[test]
    fn test_display() {
        assert_eq!(run_args(&["display", "adler32"]), "Adler32\n");
        assert_eq!(run_args(&["display", "unset"]), "unset\n");
        assert_eq!(run_args(&["display", "whatever"]), "whatever\n");
    }

    #[test]
    fn test_table_text() {
        let output = run_args(&["table"]);
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(
            lines[2].split_whitespace().collect::<Vec<_>>(),
            ["adler32", "Adler32", "RESOURCE_CHECKSUM_TYPE_ADLER32"]
        );
    }

    #[test]
    fn test_table_json() {
        let value: Value =
            serde_json::from_str(&run_args(&["-f", "json", "table"])).unwrap();
        let entries = value.as_array().unwrap();

        assert_eq!(entries.len(), 6);
        assert_eq!(entries[5]["algorithm"], "sha256");
        assert_eq!(entries[5]["display_name"], "SHA256");
        assert_eq!(entries[5]["wire"], 0);
    }

    #[test]
    fn test_format_flag() {
        let cli = Cli::try_parse_from(["xsbridge", "--format", "json", "table"]).unwrap();

        assert_eq!(cli.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_format_flag_overrides_file() {
        let config = Config {
            format: Some(OutputFormat::Json),
        };

        assert_eq!(
            resolve_format(Some(OutputFormat::Text), &config),
            OutputFormat::Text
        );
    }

    #[test]
    fn test_format_from_file() {
        let config = Config {
            format: Some(OutputFormat::Json),
        };

        assert_eq!(resolve_format(None, &config), OutputFormat::Json);
    }

    #[test]
    fn test_format_from_flag() {
        assert_eq!(
            resolve_format(Some(OutputFormat::Json), &Config::default()),
            OutputFormat::Json
        );
    }

    #[test]
    fn test_format_default() {
        assert_eq!(
            resolve_format(None, &Config::default()),
            OutputFormat::Text
        );
    }

    #[test]
    fn test_broken_config_ignored_with_flag() {
        let config =
            config_for(Some(OutputFormat::Json), || Config::from_toml("format = ")).unwrap();

        assert_eq!(config.format, None);
    }

    #[test]
    fn test_broken_config_without_flag() {
        config_for(None, || Config::from_toml("format = ")).unwrap_err();
    }

    #[test]
    fn test_config_loaded_without_flag() {
        let config = config_for(None, || Config::from_toml(r#"format = "json""#)).unwrap();

        assert_eq!(config.format, Some(OutputFormat::Json));
    }
}
