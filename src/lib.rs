//! Builds a DER-encoded X.509 Name Constraints extension ([RFC 5280 #4.2.1.10](https://tools.ietf.org/html/rfc5280#section-4.2.1.10))
//! from permitted and excluded DNS/URI subtree lists and wraps the base64 of
//! the encoded value into the JSON "API passthrough" document understood by a
//! certificate issuance API.
//!
//! The `constraints` module validates raw comma-separated subtree lists into a
//! typed set, the `name` module holds the serde-based ASN.1 types, and the
//! `passthrough` module turns the set into the final JSON document.

macro_rules! serde_invalid_value {
    ($typ:ident, $unexp:literal, $exp:literal) => {{
        serde::de::Error::invalid_value(
            serde::de::Unexpected::Other(concat!("[", stringify!($typ), "] ", $unexp)),
            &$exp,
        )
    }};
}

macro_rules! seq_next_element {
    ($seq:ident, $typ:ident, $missing_elem:literal) => {{
        $seq.next_element()?.ok_or_else(|| {
            serde::de::Error::invalid_value(
                serde::de::Unexpected::Other(concat!(
                    "[",
                    stringify!($typ),
                    "] ",
                    $missing_elem,
                    " is missing"
                )),
                &concat!("a valid ", $missing_elem),
            )
        })?
    }};
    ($seq:ident, $typ:ty, $typ_hint:ident, $missing_elem:literal) => {{
        $seq.next_element::<$typ>()?
            .ok_or_else(|| {
                serde::de::Error::invalid_value(
                    serde::de::Unexpected::Other(concat!(
                        "[",
                        stringify!($typ_hint),
                        "] ",
                        $missing_elem,
                        " is missing"
                    )),
                    &concat!("a valid ", $missing_elem),
                )
            })?
    }};
}

pub mod config;
pub mod constraints;
pub mod logging;
pub mod name;
pub mod passthrough;
