// src/engine.rs
use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use crate::bencode::canonical::{canonicalize, is_canonical};
use crate::bencode::{decode_from_bytes, destroy, encode_bvalue};
use crate::config::{Config, DEFAULT_CONFIG_PATH};
use crate::file_io::{decode_file, read_file, write_file};
use crate::infohash::info_hash;
use crate::inspect::{bvalue_to_json, pretty};

/// Decode, inspect and re-encode bencoded data
#[derive(Parser, Debug)]
#[command(name = "bencodec", version)]
pub struct Cli {
    /// Config file (defaults apply when it does not exist)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a bencoded string given on the command line and print it as JSON
    Decode {
        /// The bencoded text, e.g. d3:fooi42ee
        input: String,
    },

    /// Print a bencoded file as an indented tree
    Show { file: PathBuf },

    /// Print a bencoded file as pretty JSON
    Json { file: PathBuf },

    /// Print the SHA-1 of a torrent's info dictionary
    InfoHash { file: PathBuf },

    /// Report whether a file decodes, round-trips byte for byte, and is canonical
    Check { file: PathBuf },

    /// Write the canonical encoding of a file
    Canonicalize {
        file: PathBuf,

        /// Output path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Write the default configuration to the config path
    InitConfig,
}

pub fn use_command(cli: Cli, out: &mut dyn Write) -> Result<()> {
    // init-config overwrites whatever is there, so it must not depend on loading it
    let config = match cli.command {
        Command::InitConfig => Config::default(),
        _ => Config::load(&cli.config)?,
    };
    let options = config.decode_options();

    match cli.command {
        Command::InitConfig => {
            config.save(&cli.config)?;
            writeln!(out, "Wrote default config to {}", cli.config.display())?;
        }
        Command::Decode { input } => {
            let value = decode_from_bytes(input.as_bytes(), &options)
                .with_context(|| format!("decoding {:?}", input))?;
            writeln!(out, "{}", serde_json::to_string(&bvalue_to_json(&value))?)?;
        }
        Command::Show { file } => {
            let value = decode_file(&file, &options)
                .with_context(|| format!("decoding {}", file.display()))?;
            writeln!(out, "{}", pretty(&value, config.indent))?;
        }
        Command::Json { file } => {
            let value = decode_file(&file, &options)
                .with_context(|| format!("decoding {}", file.display()))?;
            writeln!(out, "{}", serde_json::to_string_pretty(&bvalue_to_json(&value))?)?;
        }
        Command::InfoHash { file } => {
            let value = decode_file(&file, &options)
                .with_context(|| format!("decoding {}", file.display()))?;
            let hash = info_hash(&value)
                .ok_or_else(|| anyhow!("{} has no 'info' dictionary", file.display()))?;
            writeln!(out, "{}", hex::encode(hash))?;
        }
        Command::Check { file } => {
            let data = read_file(&file).with_context(|| format!("reading {}", file.display()))?;
            let value = decode_from_bytes(&data, &options)
                .with_context(|| format!("decoding {}", file.display()))?;
            let exact = encode_bvalue(&value) == data;
            writeln!(out, "well-formed: yes ({}, {} nodes, depth {})",
                value.kind(), value.node_count(), value.nesting_depth())?;
            writeln!(out, "round-trip: {}", if exact { "exact" } else { "differs" })?;
            writeln!(out, "canonical: {}", if is_canonical(&value) { "yes" } else { "no" })?;
            let released = destroy(Some(value));
            info!("Released {} nodes", released);
        }
        Command::Canonicalize { file, output } => {
            let value = decode_file(&file, &options)
                .with_context(|| format!("decoding {}", file.display()))?;
            let canonical = canonicalize(value)
                .with_context(|| format!("canonicalizing {}", file.display()))?;
            let encoded = encode_bvalue(&canonical);
            write_file(&output, &encoded)
                .with_context(|| format!("writing {}", output.display()))?;
            writeln!(out, "Wrote {} bytes to {}", encoded.len(), output.display())?;
        }
    }

    Ok(())
}
