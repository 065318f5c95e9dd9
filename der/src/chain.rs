use std::convert::Infallible;

use dechain::decoder::{DecodableFrom, Decoder};
use dechain::encoder::{EncodableTo, Encoder};

use crate::{Error, Segment, split};

/// A split certificate chain.
///
/// Holds the scanned buffer and the segment boundaries found in it.
/// Certificates are handed out as sub-slices of that buffer; bytes are only
/// copied by [`Chain::to_vec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain<'a> {
    buffer: &'a [u8],
    segments: Vec<Segment>,
}

impl<'a> Chain<'a> {
    /// Splits `buffer` into certificates. See [`split`](crate::split).
    pub fn split(buffer: &'a [u8]) -> Result<Self, Error> {
        let segments = split(buffer)?;
        Ok(Chain { buffer, segments })
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Pairs with `len`. Always false for a chain built by [`Chain::split`],
    /// which rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// DER bytes of the `index`-th certificate in scan order.
    pub fn get(&self, index: usize) -> Option<&'a [u8]> {
        let buffer = self.buffer;
        self.segments.get(index).and_then(|s| s.bytes(buffer))
    }

    /// Iterates the DER bytes of each certificate in scan order.
    pub fn iter(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        let buffer = self.buffer;
        self.segments.iter().filter_map(move |s| s.bytes(buffer))
    }

    /// Bytes covered by the segments. Equals the buffer length for any
    /// successfully split chain.
    pub fn consumed(&self) -> usize {
        self.segments.last().map(Segment::end).unwrap_or(0)
    }

    /// Copies every certificate out into its own buffer.
    pub fn to_vec(&self) -> Vec<Vec<u8>> {
        self.iter().map(<[u8]>::to_vec).collect()
    }
}

impl<'a> DecodableFrom<&'a [u8]> for Chain<'a> {}

impl<'a> Decoder<&'a [u8], Chain<'a>> for &'a [u8] {
    type Error = Error;

    fn decode(&self) -> Result<Chain<'a>, Self::Error> {
        Chain::split(*self)
    }
}

impl<'a> EncodableTo<Chain<'a>> for Vec<u8> {}

impl<'a> Encoder<Chain<'a>, Vec<u8>> for Chain<'a> {
    type Error = Infallible;

    /// Concatenates the certificates back into one chain buffer.
    fn encode(&self) -> Result<Vec<u8>, Self::Error> {
        let mut out = Vec::with_capacity(self.consumed());
        for cert in self.iter() {
            out.extend_from_slice(cert);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use dechain::decoder::Decoder;
    use dechain::encoder::Encoder;
    use pem::Pem;
    use rstest::rstest;

    use crate::segment::tests::cert;
    use crate::{Chain, Error, LengthForm};

    const TEST_PEM_CERT1: &str = r"-----BEGIN CERTIFICATE-----
MIICLDCCAdKgAwIBAgIBADAKBggqhkjOPQQDAjB9MQswCQYDVQQGEwJCRTEPMA0G
A1UEChMGR251VExTMSUwIwYDVQQLExxHbnVUTFMgY2VydGlmaWNhdGUgYXV0aG9y
aXR5MQ8wDQYDVQQIEwZMZXV2ZW4xJTAjBgNVBAMTHEdudVRMUyBjZXJ0aWZpY2F0
ZSBhdXRob3JpdHkwHhcNMTEwNTIzMjAzODIxWhcNMTIxMjIyMDc0MTUxWjB9MQsw
CQYDVQQGEwJCRTEPMA0GA1UEChMGR251VExTMSUwIwYDVQQLExxHbnVUTFMgY2Vy
dGlmaWNhdGUgYXV0aG9yaXR5MQ8wDQYDVQQIEwZMZXV2ZW4xJTAjBgNVBAMTHEdu
dVRMUyBjZXJ0aWZpY2F0ZSBhdXRob3JpdHkwWTATBgcqhkjOPQIBBggqhkjOPQMB
BwNCAARS2I0jiuNn14Y2sSALCX3IybqiIJUvxUpj+oNfzngvj/Niyv2394BWnW4X
uQ4RTEiywK87WRcWMGgJB5kX/t2no0MwQTAPBgNVHRMBAf8EBTADAQH/MA8GA1Ud
DwEB/wQFAwMHBgAwHQYDVR0OBBYEFPC0gf6YEr+1KLlkQAPLzB9mTigDMAoGCCqG
SM49BAMCA0gAMEUCIDGuwD1KPyG+hRf88MeyMQcqOFZD0TbVleF+UsAGQ4enAiEA
l4wOuDwKQa+upc8GftXE2C//4mKANBC6It01gUaTIpo=
-----END CERTIFICATE-----";

    const TEST_PEM_CERT2: &str = r"-----BEGIN CERTIFICATE-----
MIIDXTCCAkWgAwIBAgIJAKL0UG+mRkmSMA0GCSqGSIb3DQEBCwUAMEUxCzAJBgNV
BAYTAkFVMRMwEQYDVQQIDApTb21lLVN0YXRlMSEwHwYDVQQKDBhJbnRlcm5ldCBX
aWRnaXRzIFB0eSBMdGQwHhcNMTYxMjIxMTYzMDA1WhcNMjYxMjE5MTYzMDA1WjBF
MQswCQYDVQQGEwJBVTETMBEGA1UECAwKU29tZS1TdGF0ZTEhMB8GA1UECgwYSW50
ZXJuZXQgV2lkZ2l0cyBQdHkgTHRkMIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIB
CgKCAQEAw3khLOKBaKp0I+rkfpJH6i1KBmfEpuCrzK5LMZaFZiVgW/SxXU31N1ee
4WMrNkfxbI4UlGhPmvlTjP7bvC5V0U28kCZ5s9PQb1FvkPvEJhw9aJVf3zr5wZRb
8PyBwP3qUfYYWdJmHAHSKb3wDTl4m9wW0i3BNJxW2FLCQU0hRGiCBnW3hEMCH8m2
P+kQhUITjy9VfNJmKi5dL3RDXZHN+9gYvwHAabMh8qdWKaJCxAiLN4AO9dVXqOJd
e1TuZ/Vl6qJ3hYT3T3DdVCJ7vHXLqXBnGMxbFhD8rJ4f5V7QRQVbKl1fWZRGtqzB
YaKyMMoHCMLa3qJvGDEJGTCKB1LEawIDAQABo1AwTjAdBgNVHQ4EFgQUo2hUXWzw
BI1kxA1WFCLKjWHHwdQwHwYDVR0jBBgwFoAUo2hUXWzwBI1kxA1WFCLKjWHHwdQw
DAYDVR0TBAUwAwEB/zANBgkqhkiG9w0BAQsFAAOCAQEAaDQl2e0vqOCqGNzYqZyY
S7RJVYW6WIoq7KdQ0m2Bz2NKRvh2KCqCLZvOuDWoOqMHIQM3FnOFv2FIzTT6sqLv
njRKYAx9Vd4NeMkPq3QHJU7RMkr3EGqFPB8/Zr/p8lZL5DsHKAQv0P9fxbLPxEqw
Db4tBf4sFjflSF5g3yD4UwmQvSvYGDW8LqhpSL0FZ8thCR4Ii9L9vGBr5fqB3pFM
uS6eN4Ck5fC4VaZuPKpCj6c7L5i8BDvPbZV4h6FJZFGpd7qPrCJUvYJH0u5MiLJh
H6Z2F5qzxFr3dVOYlTUQPYJGBZBpXgXL5fBnPWnPPuLFBNLNNqCpM5cY+c5dS9YE
pg==
-----END CERTIFICATE-----";

    fn der(pem: &str) -> Vec<u8> {
        let pem = Pem::from_str(pem).unwrap();
        pem.decode().unwrap()
    }

    #[test]
    fn test_chain_of_real_certificates() {
        let leaf = der(TEST_PEM_CERT1);
        let issuer = der(TEST_PEM_CERT2);
        let buffer = [leaf.clone(), issuer.clone(), leaf.clone()].concat();

        let chain = Chain::split(&buffer).unwrap();

        assert_eq!(3, chain.len());
        assert_eq!(Some(leaf.as_slice()), chain.get(0));
        assert_eq!(Some(issuer.as_slice()), chain.get(1));
        assert_eq!(Some(leaf.as_slice()), chain.get(2));
        assert_eq!(None, chain.get(3));
        assert_eq!(
            vec![560, 865, 560],
            chain.segments().iter().map(|s| s.len()).collect::<Vec<_>>()
        );
        assert!(
            chain
                .segments()
                .iter()
                .all(|s| s.header().form() == LengthForm::Long)
        );
        assert_eq!(buffer.len(), chain.consumed());
    }

    #[rstest(contents,
        case(vec![0]),
        case(vec![127, 128]),
        case(vec![796, 646]),
        case(vec![10, 20000, 10]),
    )]
    fn test_chain_decode_encode(contents: Vec<usize>) {
        let buffer = contents.iter().flat_map(|&n| cert(n)).collect::<Vec<u8>>();
        let input: &[u8] = &buffer;

        let chain: Chain = input.decode().unwrap();
        let joined: Vec<u8> = chain.encode().unwrap();

        assert_eq!(contents.len(), chain.len());
        assert!(!chain.is_empty());
        assert_eq!(buffer, joined);
        assert_eq!(chain.to_vec().concat(), buffer);
    }

    #[test]
    fn test_chain_copies_are_independent() {
        let buffer = [cert(3), cert(4)].concat();
        let owned = {
            let chain = Chain::split(&buffer).unwrap();
            chain.to_vec()
        };

        assert_eq!(vec![cert(3), cert(4)], owned);
    }

    #[test]
    fn test_chain_empty() {
        let input: &[u8] = &[];
        let result: Result<Chain, Error> = input.decode();

        assert_eq!(Err(Error::EmptyInput), result);
    }
}
