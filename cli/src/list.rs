use std::path::PathBuf;

use clap::Args;
use der::{Chain, LengthForm, Segment};
use serde::Serialize;

use crate::error::Result;
use crate::output::OutputFormat;
use crate::utils::read_input;

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the DER certificate chain. If not specified, reads from stdin
    file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

#[derive(Debug, Serialize)]
struct Listing {
    bytes: usize,
    certificates: Vec<Entry>,
}

#[derive(Debug, Serialize)]
struct Entry {
    index: usize,
    offset: usize,
    length: usize,
    header_length: usize,
    form: &'static str,
    content_length: usize,
}

impl Entry {
    fn new(index: usize, segment: &Segment) -> Self {
        let header = segment.header();
        Entry {
            index,
            offset: segment.offset(),
            length: segment.len(),
            header_length: header.header_len(),
            form: match header.form() {
                LengthForm::Short => "short",
                LengthForm::Long => "long",
            },
            content_length: header.content_length(),
        }
    }
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let input = read_input(config.file.as_deref())?;
    let chain = Chain::split(&input)?;

    let listing = Listing {
        bytes: chain.consumed(),
        certificates: chain
            .segments()
            .iter()
            .enumerate()
            .map(|(i, s)| Entry::new(i, s))
            .collect(),
    };

    match config.output {
        OutputFormat::Text => print!("{}", format_text(&listing)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&listing)?),
    }

    Ok(())
}

fn format_text(listing: &Listing) -> String {
    let mut out = format!(
        "{:>5}  {:>8}  {:>8}  {:>6}  {:<5}  {:>8}\n",
        "INDEX", "OFFSET", "LENGTH", "HEADER", "FORM", "CONTENT"
    );
    for e in &listing.certificates {
        out.push_str(&format!(
            "{:>5}  {:>8}  {:>8}  {:>6}  {:<5}  {:>8}\n",
            e.index, e.offset, e.length, e.header_length, e.form, e.content_length
        ));
    }
    out.push_str(&format!(
        "{} certificates, {} bytes\n",
        listing.certificates.len(),
        listing.bytes
    ));
    out
}
