use std::fs;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use dechain::decoder::Decoder;
use der::Chain;
use pem::Pem;

use crate::error::{Error, Result};
use crate::utils::{read_input, write_file};

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the DER certificate chain. If not specified, reads from stdin
    file: Option<PathBuf>,

    /// Directory the certificates are written to, created if missing
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// File name prefix of the written certificates
    #[arg(short, long, default_value = "cert-")]
    prefix: String,

    /// Number given to the first certificate in the chain
    #[arg(short, long, default_value_t = 0)]
    start_index: usize,

    /// Encoding of the written certificates
    #[arg(short, long, value_enum, default_value_t = Encoding::Der)]
    format: Encoding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Encoding {
    /// `<name>.der`
    Der,
    /// `<name>.pem`
    Pem,
    /// both `<name>.der` and `<name>.pem`
    Both,
}

impl Encoding {
    fn der(self) -> bool {
        matches!(self, Encoding::Der | Encoding::Both)
    }

    fn pem(self) -> bool {
        matches!(self, Encoding::Pem | Encoding::Both)
    }
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let input = read_input(config.file.as_deref())?;

    // Nothing is written unless the whole chain splits cleanly.
    let chain: Chain = input.as_slice().decode()?;

    // Number of the last certificate must fit; a split chain is never empty.
    config
        .start_index
        .checked_add(chain.len() - 1)
        .ok_or(Error::IndexOverflow {
            start: config.start_index,
            count: chain.len(),
        })?;

    fs::create_dir_all(&config.output_dir).map_err(|source| Error::CreateDir {
        path: config.output_dir.clone(),
        source,
    })?;

    for (i, cert) in chain.iter().enumerate() {
        let name = format!("{}{}", config.prefix, config.start_index + i);

        if config.format.der() {
            let path = config.output_dir.join(format!("{name}.der"));
            write_file(&path, cert)?;
            println!(
                "extracted certificate {} ({} bytes) to {}",
                i + 1,
                cert.len(),
                path.display()
            );
        }

        if config.format.pem() {
            let path = config.output_dir.join(format!("{name}.pem"));
            write_file(&path, format!("{}\n", Pem::certificate(cert)))?;
            println!("converted certificate {} to {}", i + 1, path.display());
        }
    }

    println!("extracted {} certificates", chain.len());

    Ok(())
}
