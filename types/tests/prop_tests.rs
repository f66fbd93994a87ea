use proptest::prelude::*;

use tenure_types::{BlockId, CertificateId, Timestamp, TokenAmount, SECONDS_PER_DAY};

proptest! {
    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// Timestamp elapsed_since: elapsed_since(now) = now - self (saturating).
    #[test]
    fn timestamp_elapsed_since(base in 0u64..1_000_000, offset in 0u64..1_000_000) {
        let t = Timestamp::new(base);
        let now = Timestamp::new(base + offset);
        prop_assert_eq!(t.elapsed_since(now), offset);
        prop_assert_eq!(now.elapsed_since(t), 0);
    }

    /// plus_days never wraps.
    #[test]
    fn plus_days_saturates(base in 0u64..u64::MAX, days in 0u64..u64::MAX) {
        let shifted = Timestamp::new(base).plus_days(days);
        prop_assert!(shifted.as_secs() >= base);
        if let Some(exact) = days.checked_mul(SECONDS_PER_DAY).and_then(|s| base.checked_add(s)) {
            prop_assert_eq!(shifted.as_secs(), exact);
        } else {
            prop_assert_eq!(shifted.as_secs(), u64::MAX);
        }
    }

    /// has_expired agrees with manual arithmetic.
    #[test]
    fn timestamp_has_expired(start in 0u64..1_000_000, duration in 0u64..1_000_000, now in 0u64..3_000_000) {
        let t = Timestamp::new(start);
        prop_assert_eq!(t.has_expired(duration, Timestamp::new(now)), now >= start + duration);
    }

    /// Certificate ids survive the big-endian key encoding used by the stores.
    #[test]
    fn certificate_id_key_roundtrip(raw in any::<u64>()) {
        let id = CertificateId::new(raw);
        prop_assert_eq!(CertificateId::from_be_bytes(id.to_be_bytes()), id);
    }

    /// Big-endian keys sort in id order.
    #[test]
    fn certificate_id_keys_sort_like_ids(a in any::<u64>(), b in any::<u64>()) {
        let ka = CertificateId::new(a).to_be_bytes();
        let kb = CertificateId::new(b).to_be_bytes();
        prop_assert_eq!(ka.cmp(&kb), a.cmp(&b));
    }

    /// TokenAmount checked arithmetic matches u128 checked arithmetic.
    #[test]
    fn token_amount_checked_ops(a in any::<u128>(), b in any::<u128>()) {
        let x = TokenAmount::new(a);
        let y = TokenAmount::new(b);
        prop_assert_eq!(x.checked_add(y).map(|v| v.raw()), a.checked_add(b));
        prop_assert_eq!(x.checked_sub(y).map(|v| v.raw()), a.checked_sub(b));
    }

    /// Block ids bincode round-trip.
    #[test]
    fn block_id_bincode_roundtrip(h in any::<u64>()) {
        let id = BlockId::new(h);
        let encoded = bincode::serialize(&id).unwrap();
        let decoded: BlockId = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, id);
    }
}
