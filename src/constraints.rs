//! High-level subtree constraint model built from raw CLI input.

use crate::name::{self, ExcludedSubtrees, GeneralSubtree, PermittedSubtrees};
use picky_asn1::restricted_string::{CharSetError, IA5String};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConstraintsError {
    #[error(
        "no permitted or excluded name constraints were provided; \
         run again with at least one permitted or excluded subtree argument"
    )]
    NoConstraints,
    #[error("invalid DNS name `{name}`: {reason}")]
    InvalidDnsName { name: String, reason: &'static str },
    #[error("invalid URI `{uri}`: {reason}")]
    InvalidUri { uri: String, reason: String },
    #[error("subtree pattern is not a valid IA5 string")]
    CharSet(#[from] CharSetError),
}

/// A single subtree pattern, either a DNS name constraint or a URI constraint.
///
/// The variant is fixed at construction and the constructors reject patterns
/// the underlying name grammar cannot carry. Whitespace inside an entry is an
/// error rather than something to trim away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneralName {
    DNSName(String),
    URI(String),
}

impl GeneralName {
    pub fn new_dns_name<S: Into<String>>(name: S) -> Result<Self, ConstraintsError> {
        let name = name.into();
        let reason = if name.is_empty() {
            Some("empty entry")
        } else if name.chars().any(char::is_whitespace) {
            Some("contains whitespace")
        } else if !name.is_ascii() {
            Some("contains non-IA5 characters")
        } else if name.contains(':') || name.contains('/') {
            Some("contains URI scheme syntax")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ConstraintsError::InvalidDnsName { name, reason }),
            None => Ok(Self::DNSName(name)),
        }
    }

    pub fn new_uri<S: Into<String>>(uri: S) -> Result<Self, ConstraintsError> {
        let uri = uri.into();
        if uri.is_empty() {
            return Err(ConstraintsError::InvalidUri {
                uri,
                reason: "empty entry".to_owned(),
            });
        }
        if uri.chars().any(char::is_whitespace) {
            return Err(ConstraintsError::InvalidUri {
                uri,
                reason: "contains whitespace".to_owned(),
            });
        }
        if !uri.is_ascii() {
            return Err(ConstraintsError::InvalidUri {
                uri,
                reason: "contains non-IA5 characters".to_owned(),
            });
        }
        if let Err(e) = url::Url::parse(&uri) {
            return Err(ConstraintsError::InvalidUri {
                uri,
                reason: e.to_string(),
            });
        }
        Ok(Self::URI(uri))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::DNSName(name) => name,
            Self::URI(uri) => uri,
        }
    }

    fn to_asn1(&self) -> Result<name::GeneralName, CharSetError> {
        match self {
            Self::DNSName(name) => Ok(name::GeneralName::DNSName(
                IA5String::from_string(name.clone())?.into(),
            )),
            Self::URI(uri) => Ok(name::GeneralName::URI(
                IA5String::from_string(uri.clone())?.into(),
            )),
        }
    }
}

impl fmt::Display for GeneralName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DNSName(name) => write!(f, "DNS:{}", name),
            Self::URI(uri) => write!(f, "URI:{}", uri),
        }
    }
}

/// Ordered permitted and excluded subtree sequences.
///
/// Built once from the raw CLI flag values and handed to the extension
/// serializer; at least one of the two sequences is always non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameConstraintsSet {
    permitted: Vec<GeneralName>,
    excluded: Vec<GeneralName>,
}

impl NameConstraintsSet {
    /// Builds the constraint set from comma-separated subtree lists.
    ///
    /// Entries are split on `,` without trimming. DNS entries come before URI
    /// entries within each sequence, matching the order the flags are
    /// processed. The permitted and excluded sequences are initialized
    /// independently of each other.
    pub fn build(
        dns_permitted: Option<&str>,
        dns_excluded: Option<&str>,
        uri_permitted: Option<&str>,
        uri_excluded: Option<&str>,
    ) -> Result<Self, ConstraintsError> {
        // An empty flag value counts as "not supplied".
        let dns_permitted = dns_permitted.filter(|list| !list.is_empty());
        let dns_excluded = dns_excluded.filter(|list| !list.is_empty());
        let uri_permitted = uri_permitted.filter(|list| !list.is_empty());
        let uri_excluded = uri_excluded.filter(|list| !list.is_empty());

        if dns_permitted.is_none()
            && dns_excluded.is_none()
            && uri_permitted.is_none()
            && uri_excluded.is_none()
        {
            return Err(ConstraintsError::NoConstraints);
        }

        let mut permitted = Vec::new();
        let mut excluded = Vec::new();

        if let Some(list) = dns_permitted {
            for entry in list.split(',') {
                permitted.push(GeneralName::new_dns_name(entry)?);
            }
        }

        if let Some(list) = dns_excluded {
            for entry in list.split(',') {
                excluded.push(GeneralName::new_dns_name(entry)?);
            }
        }

        if let Some(list) = uri_permitted {
            for entry in list.split(',') {
                permitted.push(GeneralName::new_uri(entry)?);
            }
        }

        if let Some(list) = uri_excluded {
            for entry in list.split(',') {
                excluded.push(GeneralName::new_uri(entry)?);
            }
        }

        Ok(Self { permitted, excluded })
    }

    pub fn permitted(&self) -> &[GeneralName] {
        &self.permitted
    }

    pub fn excluded(&self) -> &[GeneralName] {
        &self.excluded
    }

    /// Converts to the ASN.1 value, omitting empty subtree fields entirely.
    pub fn to_asn1(&self) -> Result<name::NameConstraints, ConstraintsError> {
        let permitted_subtrees = if self.permitted.is_empty() {
            None
        } else {
            Some(PermittedSubtrees(
                self.permitted
                    .iter()
                    .map(|name| name.to_asn1().map(GeneralSubtree::from))
                    .collect::<Result<_, _>>()?,
            ))
        };

        let excluded_subtrees = if self.excluded.is_empty() {
            None
        } else {
            Some(ExcludedSubtrees(
                self.excluded
                    .iter()
                    .map(|name| name.to_asn1().map(GeneralSubtree::from))
                    .collect::<Result<_, _>>()?,
            ))
        };

        Ok(name::NameConstraints {
            permitted_subtrees,
            excluded_subtrees,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_flags_at_all() {
        assert!(matches!(
            NameConstraintsSet::build(None, None, None, None),
            Err(ConstraintsError::NoConstraints)
        ));
    }

    #[test]
    fn empty_flag_values_count_as_absent() {
        assert!(matches!(
            NameConstraintsSet::build(Some(""), Some(""), None, Some("")),
            Err(ConstraintsError::NoConstraints)
        ));
    }

    #[test]
    fn permitted_list_preserves_input_order() {
        let set = NameConstraintsSet::build(Some(".a.com,.b.com"), None, None, None).unwrap();
        assert_eq!(
            set.permitted(),
            &[
                GeneralName::DNSName(".a.com".to_owned()),
                GeneralName::DNSName(".b.com".to_owned()),
            ]
        );
        assert!(set.excluded().is_empty());
    }

    #[test]
    fn excluded_accumulates_dns_before_uri() {
        let set =
            NameConstraintsSet::build(None, Some(".x.com"), None, Some("http://y.com")).unwrap();
        assert_eq!(
            set.excluded(),
            &[
                GeneralName::DNSName(".x.com".to_owned()),
                GeneralName::URI("http://y.com".to_owned()),
            ]
        );
        assert!(set.permitted().is_empty());
    }

    #[test]
    fn permitted_and_excluded_are_independent() {
        let set = NameConstraintsSet::build(
            Some(".dev.example.com"),
            Some(".prod.dev.example.com"),
            None,
            None,
        )
        .unwrap();
        assert_eq!(set.permitted().len(), 1);
        assert_eq!(set.excluded().len(), 1);
        assert_eq!(set.permitted()[0].as_str(), ".dev.example.com");
        assert_eq!(set.excluded()[0].as_str(), ".prod.dev.example.com");
    }

    #[test]
    fn dns_name_with_embedded_space_is_rejected() {
        assert!(matches!(
            NameConstraintsSet::build(Some(".a .com"), None, None, None),
            Err(ConstraintsError::InvalidDnsName { reason: "contains whitespace", .. })
        ));
    }

    #[test]
    fn dns_name_with_scheme_syntax_is_rejected() {
        assert!(matches!(
            GeneralName::new_dns_name("http://a.com"),
            Err(ConstraintsError::InvalidDnsName { reason: "contains URI scheme syntax", .. })
        ));
    }

    #[test]
    fn empty_dns_entry_between_commas_is_rejected() {
        assert!(matches!(
            NameConstraintsSet::build(Some(".a.com,,.b.com"), None, None, None),
            Err(ConstraintsError::InvalidDnsName { reason: "empty entry", .. })
        ));
    }

    #[test]
    fn non_ascii_dns_name_is_rejected() {
        assert!(matches!(
            GeneralName::new_dns_name(".exämple.com"),
            Err(ConstraintsError::InvalidDnsName { reason: "contains non-IA5 characters", .. })
        ));
    }

    #[test]
    fn uri_without_scheme_is_rejected() {
        assert!(matches!(
            GeneralName::new_uri("y.com"),
            Err(ConstraintsError::InvalidUri { .. })
        ));
    }

    #[test]
    fn uri_with_whitespace_is_rejected() {
        let err = GeneralName::new_uri("http://y.com/a b").unwrap_err();
        assert!(matches!(err, ConstraintsError::InvalidUri { .. }));
    }

    #[test]
    fn scheme_qualified_uri_is_accepted() {
        let name = GeneralName::new_uri("https://api.example.com").unwrap();
        assert_eq!(name.as_str(), "https://api.example.com");
        assert_eq!(name.to_string(), "URI:https://api.example.com");
    }

    #[test]
    fn to_asn1_omits_empty_sequences() {
        let set = NameConstraintsSet::build(Some(".a.com"), None, None, None).unwrap();
        let asn1 = set.to_asn1().unwrap();
        assert!(asn1.permitted_subtrees.is_some());
        assert!(asn1.excluded_subtrees.is_none());
    }
}
