//! License scheme to signing algorithm resolution.
//!
//! The mapping is a table so a new scheme is one more row. Schemes that are
//! absent from the table (or not configured at all) resolve to the signer's
//! own default.

use licensor_crypto::{AlgorithmChoice, SigningAlgorithm};
use licensor_types::LicenseScheme;

/// Default signing algorithm per license scheme.
pub const SCHEME_ALGORITHMS: &[(LicenseScheme, SigningAlgorithm)] = &[
    (LicenseScheme::RsaPkcs1PssSignV2, SigningAlgorithm::RsaPssSha256),
    (LicenseScheme::RsaPkcs1PssSign, SigningAlgorithm::RsaPssSha256),
    (LicenseScheme::RsaPkcs1SignV2, SigningAlgorithm::RsaSha256),
    (LicenseScheme::RsaPkcs1Sign, SigningAlgorithm::RsaSha256),
    (LicenseScheme::RsaPkcs1Encrypt, SigningAlgorithm::RsaSha256),
    (LicenseScheme::RsaJwtRs256, SigningAlgorithm::RsaSha256),
    (LicenseScheme::Ed25519Sign, SigningAlgorithm::Ed25519),
];

/// Looks up the default signing algorithm for a scheme.
#[must_use]
pub fn scheme_default(scheme: &LicenseScheme) -> Option<SigningAlgorithm> {
    SCHEME_ALGORITHMS
        .iter()
        .find(|(s, _)| s == scheme)
        .map(|(_, alg)| *alg)
}

/// Resolves the signing algorithm for a checkout.
///
/// An explicit algorithm always wins. Otherwise the license scheme picks one,
/// and with no usable scheme the choice is left to the signer.
#[must_use]
pub fn resolve_algorithm(
    scheme: Option<&LicenseScheme>,
    explicit: Option<SigningAlgorithm>,
) -> AlgorithmChoice {
    explicit
        .or_else(|| scheme.and_then(scheme_default))
        .map_or(AlgorithmChoice::SignerDefault, AlgorithmChoice::Explicit)
}
