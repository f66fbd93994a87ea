use proptest::prelude::*;

use tenure_record::{decode_stake_info, encode_stake_info, StakeInfo, StakeWord};

fn clamp(v: u128, max: u128) -> u128 {
    v.min(max)
}

proptest! {
    /// decode(encode(x)) == x for every in-range record.
    #[test]
    fn in_range_roundtrip(
        term in any::<u16>(),
        maturity_ts in any::<u64>(),
        amount in any::<u128>(),
        apy in any::<u16>(),
        rarity_score in any::<u16>(),
        rarity_bits in any::<u16>(),
    ) {
        let info = StakeInfo { term, maturity_ts, amount, apy, rarity_score, rarity_bits };
        prop_assert_eq!(StakeInfo::decode(&info.encode()), info);
    }

    /// Every field decodes to min(input, field max), independent of the others.
    #[test]
    fn out_of_range_fields_saturate_independently(
        term in any::<u128>(),
        maturity_ts in any::<u128>(),
        amount in any::<u128>(),
        apy in any::<u128>(),
        rarity_score in any::<u128>(),
        rarity_bits in any::<u128>(),
    ) {
        let info = decode_stake_info(&encode_stake_info(
            term, maturity_ts, amount, apy, rarity_score, rarity_bits,
        ));
        prop_assert_eq!(u128::from(info.term), clamp(term, u16::MAX as u128));
        prop_assert_eq!(u128::from(info.maturity_ts), clamp(maturity_ts, u64::MAX as u128));
        prop_assert_eq!(info.amount, amount);
        prop_assert_eq!(u128::from(info.apy), clamp(apy, u16::MAX as u128));
        prop_assert_eq!(u128::from(info.rarity_score), clamp(rarity_score, u16::MAX as u128));
        prop_assert_eq!(u128::from(info.rarity_bits), clamp(rarity_bits, u16::MAX as u128));
    }

    /// decode is total and encode(decode(w)) == w for every word.
    #[test]
    fn every_word_roundtrips_through_decode(bytes in prop::array::uniform32(any::<u8>())) {
        let word = StakeWord::from_be_bytes(bytes);
        prop_assert_eq!(StakeInfo::decode(&word).encode(), word);
    }

    /// Only the empty record encodes to the zero sentinel.
    #[test]
    fn zero_word_iff_empty_record(
        term in 0u16..3,
        amount in 0u128..3,
        maturity_ts in 0u64..3,
    ) {
        let info = StakeInfo { term, amount, maturity_ts, ..Default::default() };
        prop_assert_eq!(info.encode().is_zero(), info.is_empty());
    }
}
