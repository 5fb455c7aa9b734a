//! Machine file issuance.
//!
//! A machine file is a signed, optionally encrypted snapshot of a machine and
//! its license that a verifier can check offline. Issuance is a single linear
//! pass:
//!
//! 1. [`Checkout::new`] validates the request (machine, license, includes,
//!    TTL) and resolves the signing algorithm from the license scheme
//! 2. the issuance instant is read once from the injected [`Clock`] and the
//!    expiry derived from the TTL
//! 3. the [`PayloadRenderer`] turns the machine graph into JSON
//! 4. the payload is encrypted (or strictly encoded), then signed under the
//!    `machine` context prefix
//! 5. the [`Envelope`] `{enc, sig, alg}` is encoded and armored
//! 6. a [`MachineFile`] record is returned for the caller to persist
//!
//! Any failure aborts the whole issuance. Nothing is cached or retried.
//!
//! # Armor
//!
//! ```text
//! -----BEGIN MACHINE FILE-----
//! <base64 of {"enc":...,"sig":...,"alg":...}>
//! -----END MACHINE FILE-----
//! ```

mod certificate;
mod checkout;
mod clock;
mod config;
mod envelope;
mod error;
mod expiry;
mod include;
mod render;
mod scheme;

pub use certificate::MachineFile;
pub use checkout::{Checkout, CheckoutRequest, MachineCheckout, MACHINE_CONTEXT};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{CheckoutConfig, TtlBounds};
pub use envelope::{armor, Envelope, MACHINE_FILE_BEGIN, MACHINE_FILE_END};
pub use error::{CheckoutError, CheckoutResult};
pub use expiry::expires_at;
pub use include::{Include, IncludeSet};
pub use render::{IssuanceMeta, JsonApiRenderer, PayloadRenderer, RenderContext, RenderError};
pub use scheme::{resolve_algorithm, scheme_default, SCHEME_ALGORITHMS};
