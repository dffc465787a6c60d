//! Caller identity resolution.
//!
//! The platform hands the chaincode the raw identity of the transaction
//! creator: a serialized envelope (membership provider id plus the X.509
//! certificate in PEM form). The organization is the first `O` attribute
//! of the certificate's **issuer**, i.e. the CA that enrolled the caller.
//!
//! Every failure is surfaced as [`RelationshipError::IdentityParse`]. There
//! is no fallback organization.

use relationship_types::{Organization, RelationshipError, Result};
use x509_parser::prelude::{FromDer, X509Certificate};

/// PEM label of an X.509 certificate block.
const CERTIFICATE_TAG: &str = "CERTIFICATE";

/// Maps a creator identity blob to the organization it acts for.
pub trait IdentityResolver {
    fn resolve_organization(&self, creator: &[u8]) -> Result<Organization>;
}

/// Resolver reading the issuer organization of the PEM certificate
/// embedded in the creator blob.
#[derive(Debug, Clone, Copy, Default)]
pub struct X509IssuerResolver;

impl IdentityResolver for X509IssuerResolver {
    fn resolve_organization(&self, creator: &[u8]) -> Result<Organization> {
        // `pem::parse` skips everything before the first BEGIN line, so the
        // envelope bytes around the PEM block need no manual slicing.
        let block = pem::parse(creator)
            .map_err(|e| RelationshipError::identity(format!("no PEM block in creator: {e}")))?;
        if block.tag() != CERTIFICATE_TAG {
            return Err(RelationshipError::identity(format!(
                "expected a {CERTIFICATE_TAG} PEM block, found {:?}",
                block.tag()
            )));
        }

        let (_, cert) = X509Certificate::from_der(block.contents())
            .map_err(|e| RelationshipError::identity(format!("invalid X.509 certificate: {e}")))?;

        let attr = cert
            .issuer()
            .iter_organization()
            .next()
            .ok_or_else(|| RelationshipError::identity("certificate issuer has no organization"))?;
        let name = attr.as_str().map_err(|e| {
            RelationshipError::identity(format!("issuer organization is not a string: {e}"))
        })?;
        if name.is_empty() {
            return Err(RelationshipError::identity("issuer organization is empty"));
        }

        tracing::debug!(organization = name, "Resolved caller organization");
        Organization::new(name)
    }
}

/// Test fixtures: certificates and creator envelopes.
#[cfg(any(test, feature = "test-helpers"))]
pub mod fixtures {
    /// Client certificate issued by `ca.org1.example.com` (O = `org1.example.com`).
    pub const ORG1_USER_PEM: &str = include_str!("../tests/fixtures/user_org1.pem");
    /// Client certificate issued by `ca.org2.example.com` (O = `org2.example.com`).
    pub const ORG2_USER_PEM: &str = include_str!("../tests/fixtures/user_org2.pem");
    /// Self-signed certificate whose issuer has only a common name.
    pub const NO_ORG_PEM: &str = include_str!("../tests/fixtures/no_org.pem");
    /// CA certificate of org1; issuer and subject are both org1.
    pub const ORG1_CA_PEM: &str = include_str!("../tests/fixtures/ca_org1.pem");

    pub const ORG1: &str = "org1.example.com";
    pub const ORG2: &str = "org2.example.com";

    /// Wrap a PEM certificate the way the platform serializes a creator:
    /// protobuf field 1 is the MSP id, field 2 the PEM bytes.
    #[must_use]
    pub fn creator(msp_id: &str, pem: &str) -> Vec<u8> {
        let mut out = Vec::with_capacity(msp_id.len() + pem.len() + 8);
        out.push(0x0a);
        push_varint(&mut out, msp_id.len());
        out.extend_from_slice(msp_id.as_bytes());
        out.push(0x12);
        push_varint(&mut out, pem.len());
        out.extend_from_slice(pem.as_bytes());
        out
    }

    #[must_use]
    pub fn org1_creator() -> Vec<u8> {
        creator("Org1MSP", ORG1_USER_PEM)
    }

    #[must_use]
    pub fn org2_creator() -> Vec<u8> {
        creator("Org2MSP", ORG2_USER_PEM)
    }

    fn push_varint(out: &mut Vec<u8>, mut n: usize) {
        while n >= 0x80 {
            // Low seven bits with the continuation flag.
            out.push(u8::try_from(n & 0x7f).unwrap_or_default() | 0x80);
            n >>= 7;
        }
        out.push(u8::try_from(n).unwrap_or_default());
    }
}
