//! PEM armor for extracted certificates.
//!
//! ref: <https://www.rfc-editor.org/rfc/rfc7468.html>

pub mod error;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
    sync::LazyLock,
};

use base64::{Engine, engine::general_purpose::STANDARD};
use dechain::decoder::{DecodableFrom, Decoder};
use error::Error;
use regex::Regex;

const CERTIFICATE_LABEL: &str = "CERTIFICATE";
const TRUSTED_CERTIFICATE_LABEL: &str = "TRUSTED CERTIFICATE";
// RFC 7468 section 5.3: legacy labels parsers should accept.
const LEGACY_CERTIFICATE_LABELS: [&str; 2] = ["X509 CERTIFICATE", "X.509 CERTIFICATE"];

const LINE_WIDTH: usize = 64;

static BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-----(BEGIN|END) ([A-Z0-9. ]+)-----\s*$").expect("boundary pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    /// X.509 Certificate
    Certificate,
    /// OpenSSL certificate with trust settings appended
    TrustedCertificate,
}

impl Display for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Certificate => write!(f, "{}", CERTIFICATE_LABEL),
            Label::TrustedCertificate => write!(f, "{}", TRUSTED_CERTIFICATE_LABEL),
        }
    }
}

impl FromStr for Label {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            CERTIFICATE_LABEL => Ok(Label::Certificate),
            TRUSTED_CERTIFICATE_LABEL => Ok(Label::TrustedCertificate),
            _ if LEGACY_CERTIFICATE_LABELS.contains(&s) => Ok(Label::Certificate),
            _ => Err(Error::InvalidLabel(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Begin(Label),
    End(Label),
}

impl Boundary {
    /// Returns `None` for lines that are not a boundary at all.
    fn parse(line: &str) -> Option<Result<Boundary, Error>> {
        let captured = BOUNDARY.captures(line)?;
        let label = match Label::from_str(&captured[2]) {
            Ok(label) => label,
            Err(e) => return Some(Err(e)),
        };
        match &captured[1] {
            "BEGIN" => Some(Ok(Boundary::Begin(label))),
            _ => Some(Ok(Boundary::End(label))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pem {
    label: Label,
    base64_data: String, // base64 encoded data
}

impl Pem {
    pub fn from_bytes(label: Label, data: &[u8]) -> Self {
        let base64_data = STANDARD.encode(data);
        Pem { label, base64_data }
    }

    /// Armors one DER certificate.
    pub fn certificate(der: &[u8]) -> Self {
        Self::from_bytes(Label::Certificate, der)
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn data(&self) -> &str {
        &self.base64_data
    }
}

impl Display for Pem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "-----BEGIN {}-----", self.label)?;
        for chunk in self.base64_data.as_bytes().chunks(LINE_WIDTH) {
            let line = std::str::from_utf8(chunk).map_err(|_| std::fmt::Error)?;
            writeln!(f, "{}", line)?;
        }
        write!(f, "-----END {}-----", self.label)
    }
}

/*
* init --BEGIN--> body --END--> done
*  |_|            |_|
* explanatory    base64 lines
 */
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum State {
    Init,
    Body(Label),
}

impl FromStr for Pem {
    type Err = Error;

    /// Parses the first PEM block in `s`. Text before the block is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut state = State::Init;
        let mut body = String::new();

        for line in s.lines() {
            state = match state {
                State::Init => match Boundary::parse(line) {
                    None => State::Init,
                    Some(Ok(Boundary::Begin(label))) => State::Body(label),
                    Some(Ok(Boundary::End(_))) => {
                        return Err(Error::MissingPreEncapsulationBoundary);
                    }
                    Some(Err(e)) => return Err(e),
                },
                State::Body(label) => match Boundary::parse(line) {
                    None => {
                        let line = line.trim();
                        if line.is_empty() || !line.bytes().all(is_base64_char) {
                            return Err(Error::InvalidBase64Line);
                        }
                        body.push_str(line);
                        State::Body(label)
                    }
                    Some(Ok(Boundary::End(end))) if end == label => {
                        if body.is_empty() {
                            return Err(Error::MissingData);
                        }
                        return Ok(Pem {
                            label,
                            base64_data: body,
                        });
                    }
                    Some(Ok(Boundary::End(_))) => return Err(Error::LabelMismatch),
                    Some(Ok(Boundary::Begin(_))) => {
                        return Err(Error::MissingPostEncapsulationBoundary);
                    }
                    Some(Err(e)) => return Err(e),
                },
            };
        }

        match state {
            State::Init => Err(Error::MissingPreEncapsulationBoundary),
            State::Body(_) => Err(Error::MissingPostEncapsulationBoundary),
        }
    }
}

fn is_base64_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'+' || b == b'/' || b == b'='
}

impl DecodableFrom<Pem> for Vec<u8> {}

impl Decoder<Pem, Vec<u8>> for Pem {
    type Error = Error;

    fn decode(&self) -> Result<Vec<u8>, Self::Error> {
        // This discards label information from Pem format.
        let decoded = STANDARD.decode(self.data()).map_err(Error::Base64Decode)?;
        Ok(decoded)
    }
}

impl DecodableFrom<&str> for Pem {}

impl Decoder<&str, Pem> for &str {
    type Error = Error;

    fn decode(&self) -> Result<Pem, Self::Error> {
        Pem::from_str(self)
    }
}
