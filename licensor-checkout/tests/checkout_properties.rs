//! Property tests for request resolution.

mod common;

use std::sync::Arc;

use common::{machine, FakeSigner};
use licensor_checkout::{CheckoutRequest, FixedClock, Include, IncludeSet, MachineCheckout};
use licensor_crypto::SigningAlgorithm;
use licensor_types::{Ttl, SECONDS_PER_HOUR, SECONDS_PER_YEAR};
use proptest::prelude::*;
use proptest::sample::subsequence;

fn include_names() -> impl Strategy<Value = Vec<&'static str>> {
    subsequence(Include::ALL.map(|i| i.as_str()).to_vec(), 0..=Include::ALL.len())
        .prop_shuffle()
}

fn issuer(at: i64) -> MachineCheckout {
    use chrono::TimeZone;
    let now = chrono::Utc.timestamp_opt(at, 0).unwrap();
    MachineCheckout::new(Arc::new(FakeSigner {
        default: SigningAlgorithm::Ed25519,
    }))
    .with_clock(Arc::new(FixedClock(now)))
}

proptest! {
    /// Valid requests resolve to exactly the requested names, in request order.
    #[test]
    fn resolved_includes_follow_request_order(
        requested in include_names(),
        repeat in any::<prop::sample::Index>(),
    ) {
        let mut names = requested.clone();
        if !requested.is_empty() {
            names.push(requested[repeat.index(requested.len())]);
        }
        let set = IncludeSet::resolve(names.as_slice(), &Include::ALL).unwrap();
        prop_assert_eq!(set.names(), requested);
    }

    /// One unknown name poisons any request.
    #[test]
    fn unknown_name_rejects_request(
        requested in include_names(),
        bogus in "[a-z]{1,8}\\.(key|tokens|secret)",
        at in any::<prop::sample::Index>(),
    ) {
        let mut names: Vec<String> = requested.iter().map(|s| s.to_string()).collect();
        names.insert(at.index(names.len() + 1), bogus);
        prop_assert!(IncludeSet::resolve(names.as_slice(), &Include::ALL).is_err());
    }

    /// Within bounds, expiry is issuance plus the TTL for sub-month durations.
    #[test]
    fn expiry_is_issuance_plus_ttl(
        secs in SECONDS_PER_HOUR..(28 * 24 * SECONDS_PER_HOUR),
        at in 946_684_800i64..4_102_444_800i64,
    ) {
        let file = issuer(at)
            .checkout(CheckoutRequest::new(machine(None)).ttl(Ttl::from_secs(secs)))
            .unwrap();
        let expires = file.expires_at().unwrap();
        prop_assert_eq!((expires - file.issued_at()).num_seconds(), secs as i64);
        prop_assert_eq!(file.ttl(), Some(secs));
    }

    /// TTLs outside the default bounds are always rejected.
    #[test]
    fn out_of_bounds_ttl_rejected(
        secs in prop_oneof![
            1u64..SECONDS_PER_HOUR,
            (SECONDS_PER_YEAR + 1)..(10 * SECONDS_PER_YEAR),
        ],
    ) {
        let result = issuer(1_700_000_000)
            .checkout(CheckoutRequest::new(machine(None)).ttl(Ttl::from_secs(secs)));
        prop_assert!(result.is_err());
    }
}
