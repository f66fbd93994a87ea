use proptest::prelude::*;
use tenure_token::{DecayingApy, MemoryTokenLedger, TokenLedger, YieldSchedule};
use tenure_types::{AccountId, Timestamp};

proptest! {
    #[test]
    fn decaying_apy_is_bounded_and_non_increasing(
        genesis in 0u64..1_000_000_000,
        a in 0u64..100_000_000,
        b in 0u64..100_000_000,
    ) {
        let s = DecayingApy::new(Timestamp::new(genesis));
        let (early, late) = if a <= b { (a, b) } else { (b, a) };
        let apy_early = s.apy(365, Timestamp::new(genesis + early));
        let apy_late = s.apy(365, Timestamp::new(genesis + late));
        prop_assert!(apy_late <= apy_early);
        prop_assert!((2..=20).contains(&apy_late));
    }

    #[test]
    fn transfers_conserve_supply(
        minted in 1u128..1_000_000,
        moves in proptest::collection::vec(0u128..2_000, 0..20),
    ) {
        let alice = AccountId::new("tnr_alice");
        let vault = AccountId::new("tnr_vault");
        let mut l = MemoryTokenLedger::new(Timestamp::EPOCH);
        l.mint(&alice, minted).unwrap();
        l.approve(&alice, &vault, u128::MAX).unwrap();
        for amount in moves {
            let _ = l.transfer_from(&vault, &alice, &vault, amount);
            prop_assert_eq!(l.balance_of(&alice) + l.balance_of(&vault), minted);
        }
        prop_assert_eq!(l.total_supply(), minted);
    }
}
