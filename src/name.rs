//! Serde-based ASN.1 types for the Name Constraints extension.

use picky_asn1::tag::{Tag, TagClass, TagPeeker};
use picky_asn1::wrapper::{IA5StringAsn1, ImplicitContextTag2, ImplicitContextTag6};
use picky_asn1_der::Asn1RawDer;
use serde::{de, ser, Deserialize, Serialize};
use std::fmt;

/// [RFC 5280 #4.2.1.6](https://tools.ietf.org/html/rfc5280#section-4.2.1.6)
///
/// ```not_rust
/// GeneralName ::= CHOICE {
///       otherName                       [0]     OtherName,
///       rfc822Name                      [1]     IA5String,
///       dNSName                         [2]     IA5String,
///       x400Address                     [3]     ORAddress,
///       directoryName                   [4]     Name,
///       ediPartyName                    [5]     EDIPartyName,
///       uniformResourceIdentifier       [6]     IA5String,
///       iPAddress                       [7]     OCTET STRING,
///       registeredID                    [8]     OBJECT IDENTIFIER }
/// ```
///
/// Only the dNSName and uniformResourceIdentifier choices are supported, the
/// two name forms a subtree constraint may carry in this tool.
#[derive(Debug, PartialEq, Clone)]
pub enum GeneralName {
    DNSName(IA5StringAsn1),
    URI(IA5StringAsn1),
}

impl ser::Serialize for GeneralName {
    fn serialize<S>(&self, serializer: S) -> Result<<S as ser::Serializer>::Ok, <S as ser::Serializer>::Error>
    where
        S: ser::Serializer,
    {
        match &self {
            GeneralName::DNSName(name) => ImplicitContextTag2(name).serialize(serializer),
            GeneralName::URI(name) => ImplicitContextTag6(name).serialize(serializer),
        }
    }
}

impl<'de> de::Deserialize<'de> for GeneralName {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as de::Deserializer<'de>>::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = GeneralName;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid DER-encoded GeneralName")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let tag_peeker: TagPeeker = seq_next_element!(seq, GeneralName, "choice tag");
                match (tag_peeker.next_tag.class(), tag_peeker.next_tag.number()) {
                    (TagClass::ContextSpecific, 2) => Ok(GeneralName::DNSName(
                        seq_next_element!(seq, ImplicitContextTag2<IA5StringAsn1>, GeneralName, "DNSName").0,
                    )),
                    (TagClass::ContextSpecific, 6) => Ok(GeneralName::URI(
                        seq_next_element!(seq, ImplicitContextTag6<IA5StringAsn1>, GeneralName, "URI").0,
                    )),
                    _ => Err(serde_invalid_value!(
                        GeneralName,
                        "unsupported choice value",
                        "a dNSName or uniformResourceIdentifier choice"
                    )),
                }
            }
        }

        deserializer.deserialize_enum("GeneralName", &["DNSName", "URI"], Visitor)
    }
}

/// [RFC 5280 #4.2.1.10](https://tools.ietf.org/html/rfc5280#section-4.2.1.10)
///
/// ```not_rust
/// GeneralSubtree ::= SEQUENCE {
///      base                    GeneralName,
///      minimum         [0]     BaseDistance DEFAULT 0,
///      maximum         [1]     BaseDistance OPTIONAL }
/// ```
///
/// minimum and maximum are never emitted; the defaults apply.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct GeneralSubtree {
    pub base: GeneralName,
}

impl From<GeneralName> for GeneralSubtree {
    fn from(base: GeneralName) -> Self {
        Self { base }
    }
}

/// permittedSubtrees, encoded as `[0] IMPLICIT SEQUENCE SIZE (1..MAX) OF GeneralSubtree`.
///
/// The SEQUENCE OF is serialized on its own and the outer tag is patched to
/// the constructed context-specific form, the same workaround picky uses for
/// implicitly tagged constructed fields.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct PermittedSubtrees(pub Vec<GeneralSubtree>);

impl ser::Serialize for PermittedSubtrees {
    fn serialize<S>(&self, serializer: S) -> Result<<S as ser::Serializer>::Ok, <S as ser::Serializer>::Error>
    where
        S: ser::Serializer,
    {
        let mut raw_der = picky_asn1_der::to_vec(&self.0).map_err(ser::Error::custom)?;
        raw_der[0] = Tag::context_specific_constructed(0).inner();
        Asn1RawDer(raw_der).serialize(serializer)
    }
}

impl<'de> de::Deserialize<'de> for PermittedSubtrees {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as de::Deserializer<'de>>::Error>
    where
        D: de::Deserializer<'de>,
    {
        let mut raw_der = Asn1RawDer::deserialize(deserializer)?.0;
        raw_der[0] = Tag::SEQUENCE.inner();
        let subtrees = picky_asn1_der::from_bytes(&raw_der).map_err(de::Error::custom)?;
        Ok(PermittedSubtrees(subtrees))
    }
}

/// excludedSubtrees, encoded as `[1] IMPLICIT SEQUENCE SIZE (1..MAX) OF GeneralSubtree`.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct ExcludedSubtrees(pub Vec<GeneralSubtree>);

impl ser::Serialize for ExcludedSubtrees {
    fn serialize<S>(&self, serializer: S) -> Result<<S as ser::Serializer>::Ok, <S as ser::Serializer>::Error>
    where
        S: ser::Serializer,
    {
        let mut raw_der = picky_asn1_der::to_vec(&self.0).map_err(ser::Error::custom)?;
        raw_der[0] = Tag::context_specific_constructed(1).inner();
        Asn1RawDer(raw_der).serialize(serializer)
    }
}

impl<'de> de::Deserialize<'de> for ExcludedSubtrees {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as de::Deserializer<'de>>::Error>
    where
        D: de::Deserializer<'de>,
    {
        let mut raw_der = Asn1RawDer::deserialize(deserializer)?.0;
        raw_der[0] = Tag::SEQUENCE.inner();
        let subtrees = picky_asn1_der::from_bytes(&raw_der).map_err(de::Error::custom)?;
        Ok(ExcludedSubtrees(subtrees))
    }
}

/// [RFC 5280 #4.2.1.10](https://tools.ietf.org/html/rfc5280#section-4.2.1.10)
///
/// ```not_rust
/// NameConstraints ::= SEQUENCE {
///      permittedSubtrees       [0]     GeneralSubtrees OPTIONAL,
///      excludedSubtrees        [1]     GeneralSubtrees OPTIONAL }
/// ```
///
/// An absent subtree list is omitted from the SEQUENCE entirely; an empty
/// SEQUENCE OF is never emitted.
#[derive(Serialize, Debug, PartialEq, Clone)]
pub struct NameConstraints {
    pub permitted_subtrees: Option<PermittedSubtrees>,
    pub excluded_subtrees: Option<ExcludedSubtrees>,
}

impl<'de> de::Deserialize<'de> for NameConstraints {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as de::Deserializer<'de>>::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = NameConstraints;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid DER-encoded NameConstraints")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut permitted_subtrees = None;
                let mut excluded_subtrees = None;

                while let Some(tag_peeker) = seq.next_element::<TagPeeker>()? {
                    match (tag_peeker.next_tag.class(), tag_peeker.next_tag.number()) {
                        (TagClass::ContextSpecific, 0) => {
                            permitted_subtrees =
                                Some(seq_next_element!(seq, PermittedSubtrees, "permittedSubtrees"));
                        }
                        (TagClass::ContextSpecific, 1) => {
                            excluded_subtrees =
                                Some(seq_next_element!(seq, ExcludedSubtrees, "excludedSubtrees"));
                        }
                        _ => {
                            return Err(serde_invalid_value!(
                                NameConstraints,
                                "unknown subtree field tag",
                                "a permittedSubtrees or excludedSubtrees field"
                            ))
                        }
                    }
                }

                Ok(NameConstraints {
                    permitted_subtrees,
                    excluded_subtrees,
                })
            }
        }

        deserializer.deserialize_seq(Visitor)
    }
}
