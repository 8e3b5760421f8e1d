//! API passthrough envelope for the encoded extension.
//!
//! The issuance API accepts a pre-encoded extension as a "custom extension":
//! an object identifier, a criticality flag and the base64 of the DER value,
//! wrapped in a fixed JSON document shape.

use crate::constraints::{ConstraintsError, NameConstraintsSet};
use base64::engine::general_purpose::STANDARD as BASE64_ENGINE;
use base64::Engine as _;
use picky_asn1_der::Asn1DerError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::path::Path;
use thiserror::Error;

/// id-ce-nameConstraints
pub const NAME_CONSTRAINTS_OID: &str = "2.5.29.30";

pub const DEFAULT_OUTPUT_FILE: &str = "api_passthrough_config.json";

#[derive(Debug, Error)]
pub enum PassthroughError {
    #[error("couldn't serialize name constraints: {source}")]
    Asn1Serialization { source: Asn1DerError },
    #[error(transparent)]
    Constraints(#[from] ConstraintsError),
    #[error("couldn't serialize the API passthrough document: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct ApiPassthrough {
    #[serde(rename = "Extensions")]
    pub extensions: Extensions,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct Extensions {
    #[serde(rename = "CustomExtensions")]
    pub custom_extensions: Vec<CustomExtension>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct CustomExtension {
    #[serde(rename = "ObjectIdentifier")]
    pub object_identifier: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "Critical")]
    pub critical: bool,
}

/// The Name Constraints extension ready for the issuance API: a fixed object
/// identifier, always critical, and the base64 of the DER-encoded value.
#[derive(Debug, PartialEq, Clone)]
pub struct EncodedExtension {
    value: String,
}

impl EncodedExtension {
    /// DER-serializes the constraint set and base64-encodes the bytes with the
    /// standard alphabet, padded.
    pub fn encode(constraints: &NameConstraintsSet) -> Result<Self, PassthroughError> {
        let name_constraints = constraints.to_asn1()?;
        let der = picky_asn1_der::to_vec(&name_constraints)
            .map_err(|source| PassthroughError::Asn1Serialization { source })?;
        Ok(Self {
            value: BASE64_ENGINE.encode(der),
        })
    }

    pub fn object_identifier(&self) -> &'static str {
        NAME_CONSTRAINTS_OID
    }

    pub fn critical(&self) -> bool {
        true
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn to_api_passthrough(&self) -> ApiPassthrough {
        ApiPassthrough {
            extensions: Extensions {
                custom_extensions: vec![CustomExtension {
                    object_identifier: NAME_CONSTRAINTS_OID.to_owned(),
                    value: self.value.clone(),
                    critical: true,
                }],
            },
        }
    }

    /// Writes the passthrough document with 4-space indentation, overwriting
    /// any existing file at `path` without warning.
    pub fn write_to_file(&self, path: &Path) -> Result<(), PassthroughError> {
        let file = File::create(path)?;
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(file, formatter);
        self.to_api_passthrough().serialize(&mut serializer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn encoded(dns_permitted: Option<&str>, dns_excluded: Option<&str>) -> EncodedExtension {
        let constraints =
            NameConstraintsSet::build(dns_permitted, dns_excluded, None, None).unwrap();
        EncodedExtension::encode(&constraints).unwrap()
    }

    #[test]
    fn known_base64_value() {
        // NameConstraints([DNSName(".a.com")], None) per the cryptography library
        let extension = encoded(Some(".a.com"), None);
        assert_eq!(extension.value(), "MAygCjAIggYuYS5jb20=");
    }

    #[test]
    fn oid_and_criticality_are_fixed() {
        let extension = encoded(None, Some(".x.com"));
        assert_eq!(extension.object_identifier(), "2.5.29.30");
        assert!(extension.critical());

        let doc = extension.to_api_passthrough();
        assert_eq!(doc.extensions.custom_extensions.len(), 1);
        assert_eq!(doc.extensions.custom_extensions[0].object_identifier, "2.5.29.30");
        assert!(doc.extensions.custom_extensions[0].critical);
    }

    #[test]
    fn document_shape() {
        let extension = encoded(Some(".a.com"), None);
        let value = serde_json::to_value(extension.to_api_passthrough()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "Extensions": {
                    "CustomExtensions": [
                        {
                            "ObjectIdentifier": "2.5.29.30",
                            "Value": "MAygCjAIggYuYS5jb20=",
                            "Critical": true
                        }
                    ]
                }
            })
        );
    }

    #[test]
    fn written_file_uses_four_space_indentation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_OUTPUT_FILE);

        encoded(Some(".a.com"), None).write_to_file(&path).unwrap();

        let expected = concat!(
            "{\n",
            "    \"Extensions\": {\n",
            "        \"CustomExtensions\": [\n",
            "            {\n",
            "                \"ObjectIdentifier\": \"2.5.29.30\",\n",
            "                \"Value\": \"MAygCjAIggYuYS5jb20=\",\n",
            "                \"Critical\": true\n",
            "            }\n",
            "        ]\n",
            "    }\n",
            "}",
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap(), expected);
    }

    #[test]
    fn write_to_missing_directory_fails_with_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(DEFAULT_OUTPUT_FILE);
        let err = encoded(Some(".a.com"), None).write_to_file(&path).unwrap_err();
        assert!(matches!(err, PassthroughError::Io(_)));
    }
}
