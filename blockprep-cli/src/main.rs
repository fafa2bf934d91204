#![deny(missing_docs)]
//! A command-line interface for generating block-cipher key material and applying PKCS#7 padding.

use blockprep_core::{key_material, padding};
use clap::{Parser, Subcommand};
use log::{error, info};
use serde::Serialize;
use std::error::Error;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "EXAMPLES:\n  \n# Generate an AES-256 key\nblockprep key aes --size 256\n\n# Generate a two-key 3DES key\nblockprep key 3des --option 2\n\n# Generate a 16-byte IV for AES\nblockprep iv --block-size 16\n\n# Pad a message to an 8-byte block\nblockprep pad HOLA --block-size 8\n\n# Remove padding from a hex message\nblockprep unpad 484f4c4104040404\n\n# Run every operation once\nblockprep demo --json"
)]
struct Cli {
    /// Print results as JSON instead of plain text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random key
    Key {
        #[command(subcommand)]
        command: KeyCommands,
    },
    /// Generate a random initialization vector
    Iv {
        /// IV length in bytes: 8 for DES/3DES, 16 for AES
        #[arg(short, long, default_value_t = key_material::DEFAULT_IV_SIZE)]
        block_size: usize,
    },
    /// Apply PKCS#7 padding
    Pad {
        /// The message to pad, as text (or hex with --hex)
        #[arg()]
        data: String,

        /// Block size in bytes (1-255)
        #[arg(short, long, default_value_t = padding::DEFAULT_BLOCK_SIZE)]
        block_size: usize,

        /// Treat DATA as hexadecimal instead of text
        #[arg(long)]
        hex: bool,
    },
    /// Remove PKCS#7 padding from a hex-encoded message
    Unpad {
        /// The padded message in hexadecimal
        #[arg()]
        data: String,

        /// Also require the message to be aligned to this block size
        #[arg(short, long)]
        block_size: Option<usize>,
    },
    /// Generate every kind of key and IV and run the padding test vectors
    Demo,
}

#[derive(Subcommand)]
enum KeyCommands {
    /// Single DES key (8 bytes)
    Des,
    /// Triple DES key (16 or 24 bytes)
    #[command(name = "3des")]
    TripleDes {
        /// Keying option: 2 for K1,K2,K1 or 3 for K1,K2,K3
        #[arg(short, long, default_value_t = 2)]
        option: u8,
    },
    /// AES key
    Aes {
        /// Key size in bits: 128, 192 or 256
        #[arg(short, long, default_value_t = 256)]
        size: u16,
    },
}

/// A generated key or IV.
#[derive(Serialize)]
struct MaterialReport {
    label: String,
    len: usize,
    hex: String,
}

impl MaterialReport {
    fn new(label: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            label: label.into(),
            len: bytes.len(),
            hex: hex::encode(bytes),
        }
    }

    fn line(&self) -> String {
        format!("{:<9} ({} bytes): {}", self.label, self.len, self.hex)
    }
}

/// The result of padding or unpadding one message.
#[derive(Serialize)]
struct PaddingReport {
    input_hex: String,
    block_size: Option<usize>,
    output_hex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl PaddingReport {
    fn new(input: &[u8], block_size: Option<usize>, output: &[u8]) -> Self {
        Self {
            input_hex: hex::encode(input),
            block_size,
            output_hex: hex::encode(output),
            text: std::str::from_utf8(output).ok().map(str::to_owned),
        }
    }
}

/// A padding test vector and the value it must produce.
#[derive(Serialize)]
struct PaddingVector {
    input: String,
    block_size: usize,
    output_hex: String,
    expected_hex: String,
    matches: bool,
}

#[derive(Serialize)]
struct DemoReport {
    material: Vec<MaterialReport>,
    padding: Vec<PaddingVector>,
    unpadded: PaddingReport,
}

/// Writes `value` as JSON, or as the text produced by `text`.
fn emit<T: Serialize>(
    json: bool,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text(value));
    }
    Ok(())
}

fn key_report(command: &KeyCommands) -> blockprep_core::Result<MaterialReport> {
    let report = match command {
        KeyCommands::Des => {
            MaterialReport::new("DES key", key_material::generate_des_key()?.as_bytes())
        }
        KeyCommands::TripleDes { option } => MaterialReport::new(
            format!("3DES key{option}"),
            key_material::generate_3des_key(*option)?.as_bytes(),
        ),
        KeyCommands::Aes { size } => MaterialReport::new(
            format!("AES-{size}"),
            key_material::generate_aes_key(*size)?.as_bytes(),
        ),
    };
    Ok(report)
}

fn padding_vector(
    input: &str,
    block_size: usize,
    expected_hex: &str,
) -> blockprep_core::Result<PaddingVector> {
    let output_hex = hex::encode(padding::pkcs7_pad(input.as_bytes(), block_size)?);
    Ok(PaddingVector {
        input: input.to_owned(),
        block_size,
        matches: output_hex == expected_hex,
        expected_hex: expected_hex.to_owned(),
        output_hex,
    })
}

fn demo() -> blockprep_core::Result<DemoReport> {
    let material = vec![
        MaterialReport::new("DES key", key_material::generate_des_key()?.as_bytes()),
        MaterialReport::new("3DES key2", key_material::generate_3des_key(2)?.as_bytes()),
        MaterialReport::new("3DES key3", key_material::generate_3des_key(3)?.as_bytes()),
        MaterialReport::new("AES-128", key_material::generate_aes_key(128)?.as_bytes()),
        MaterialReport::new("AES-192", key_material::generate_aes_key(192)?.as_bytes()),
        MaterialReport::new("AES-256", key_material::generate_aes_key(256)?.as_bytes()),
        MaterialReport::new(
            "IV DES",
            key_material::generate_iv(key_material::DES_BLOCK_SIZE)?.as_bytes(),
        ),
        MaterialReport::new(
            "IV AES",
            key_material::generate_iv(key_material::AES_BLOCK_SIZE)?.as_bytes(),
        ),
    ];

    let padding = vec![
        padding_vector("HOLA", 8, "484f4c4104040404")?,
        padding_vector("HOLA BUENAS", 8, "484f4c41204255454e41530505050505")?,
        padding_vector("12345678", 8, "31323334353637380808080808080808")?,
    ];

    let padded = padding::pkcs7_pad(b"HOLA BUENAS", 8)?;
    let stripped = padding::pkcs7_unpad(&padded)?;
    let unpadded = PaddingReport::new(&padded, None, stripped);

    Ok(DemoReport {
        material,
        padding,
        unpadded,
    })
}

fn demo_text(report: &DemoReport) -> String {
    let mut lines: Vec<String> = report.material.iter().map(MaterialReport::line).collect();
    for vector in &report.padding {
        lines.push(String::new());
        lines.push(format!(
            "pkcs7_pad(b'{}', {}) = {}",
            vector.input, vector.block_size, vector.output_hex
        ));
        lines.push(format!("  Expected: {}", vector.expected_hex));
    }
    lines.push(String::new());
    lines.push(format!(
        "pkcs7_unpad({}) = {}",
        report.unpadded.input_hex,
        report.unpadded.text.as_deref().unwrap_or(&report.unpadded.output_hex)
    ));
    lines.join("\n")
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    match &cli.command {
        Commands::Key { command } => {
            let report = key_report(command)?;
            info!("Generated {} ({} bytes).", report.label, report.len);
            emit(cli.json, &report, |r| r.hex.clone())?;
        }
        Commands::Iv { block_size } => {
            let iv = key_material::generate_iv(*block_size)?;
            let report = MaterialReport::new(format!("IV {block_size}"), iv.as_bytes());
            info!("Generated {}-byte IV.", report.len);
            emit(cli.json, &report, |r| r.hex.clone())?;
        }
        Commands::Pad {
            data,
            block_size,
            hex: is_hex,
        } => {
            let input = if *is_hex {
                hex::decode(data)?
            } else {
                data.as_bytes().to_vec()
            };
            let padded = padding::pkcs7_pad(&input, *block_size)?;
            info!(
                "Padded {} bytes to {} with block size {block_size}.",
                input.len(),
                padded.len()
            );
            let report = PaddingReport {
                text: None,
                ..PaddingReport::new(&input, Some(*block_size), &padded)
            };
            emit(cli.json, &report, |r| r.output_hex.clone())?;
        }
        Commands::Unpad { data, block_size } => {
            let input = hex::decode(data)?;
            let stripped = match block_size {
                Some(size) => padding::pkcs7_unpad_block(&input, *size)?,
                None => padding::pkcs7_unpad(&input)?,
            };
            info!("Removed {} padding bytes.", input.len() - stripped.len());
            let report = PaddingReport::new(&input, *block_size, stripped);
            emit(cli.json, &report, |r| match &r.text {
                Some(text) => format!("{}\n{text}", r.output_hex),
                None => r.output_hex.clone(),
            })?;
        }
        Commands::Demo => {
            let report = demo()?;
            emit(cli.json, &report, demo_text)?;
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        error!("{e}");
        std::process::exit(1);
    }
}
