use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use der::Chain;
use pem::Pem;

use crate::error::{Error, Result};
use crate::utils::{format_hex_dump, read_input};

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the DER certificate chain. If not specified, reads from stdin
    file: Option<PathBuf>,

    /// Position of the certificate in the chain, starting at 0
    #[arg(short, long)]
    index: usize,

    /// Output as hexadecimal dump instead of binary
    #[arg(long, conflicts_with = "pem")]
    hex: bool,

    /// Output as PEM instead of binary
    #[arg(long)]
    pem: bool,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let input = read_input(config.file.as_deref())?;
    let chain = Chain::split(&input)?;

    let (segment, cert) = chain
        .segments()
        .get(config.index)
        .zip(chain.get(config.index))
        .ok_or(Error::IndexOutOfRange {
            index: config.index,
            count: chain.len(),
        })?;

    if config.hex {
        print!("{}", format_hex_dump(cert, segment.offset()));
    } else if config.pem {
        println!("{}", Pem::certificate(cert));
    } else {
        io::stdout().write_all(cert)?;
    }

    Ok(())
}
