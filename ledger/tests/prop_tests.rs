use std::collections::BTreeSet;

use proptest::prelude::*;
use tenure_ledger::{StakeLedger, CUSTODY_ACCOUNT};
use tenure_nullables::{Burner, NullClock};
use tenure_record::StakeWord;
use tenure_token::{FixedApy, MemoryTokenLedger, TokenLedger};
use tenure_types::{AccountId, CertificateId, LedgerParams, Timestamp};

const ACCOUNTS: [&str; 3] = ["tnr_alice", "tnr_bob", "tnr_carol"];
const BURNER: &str = "tnr_burner";

#[derive(Clone, Debug)]
enum Op {
    Create { who: usize, amount: u128, term: u32 },
    End { who: usize, pick: usize },
    Transfer { who: usize, to: usize, pick: usize },
    Approve { who: usize, pick: usize },
    Burn { who: usize, pick: usize },
    Operator { who: usize, to: usize, approved: bool },
    Advance { days: u64 },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..3usize, 0u128..2_000, 0u32..40).prop_map(|(who, amount, term)| Op::Create { who, amount, term }),
        (0..3usize, 0..8usize).prop_map(|(who, pick)| Op::End { who, pick }),
        (0..3usize, 0..3usize, 0..8usize).prop_map(|(who, to, pick)| Op::Transfer { who, to, pick }),
        (0..3usize, 0..8usize).prop_map(|(who, pick)| Op::Approve { who, pick }),
        (0..3usize, 0..8usize).prop_map(|(who, pick)| Op::Burn { who, pick }),
        (0..3usize, 0..3usize, any::<bool>()).prop_map(|(who, to, approved)| Op::Operator { who, to, approved }),
        (0u64..15).prop_map(|days| Op::Advance { days }),
    ]
}

fn account(i: usize) -> AccountId {
    AccountId::new(ACCOUNTS[i])
}

fn setup() -> StakeLedger<MemoryTokenLedger> {
    let mut token = MemoryTokenLedger::new(Timestamp::EPOCH);
    for i in 0..ACCOUNTS.len() {
        token.mint(&account(i), 20_000).unwrap();
        token
            .approve(&account(i), &AccountId::new(CUSTODY_ACCOUNT), 15_000)
            .unwrap();
    }
    StakeLedger::new(LedgerParams::default(), token, Box::new(FixedApy(10))).unwrap()
}

/// Everything observable about the ledger.
#[derive(Debug, PartialEq, Eq)]
struct Observed {
    records: Vec<StakeWord>,
    owned: Vec<Vec<CertificateId>>,
    counter: u64,
    events: usize,
    balances: Vec<u128>,
}

fn observe(l: &StakeLedger<MemoryTokenLedger>) -> Observed {
    let mut holders: Vec<AccountId> = (0..ACCOUNTS.len()).map(account).collect();
    holders.push(AccountId::new(CUSTODY_ACCOUNT));
    Observed {
        records: (0..=l.token_id_counter() + 1)
            .map(|raw| l.stake_info(CertificateId::new(raw)))
            .collect(),
        owned: (0..ACCOUNTS.len())
            .map(|i| l.owned_tokens(&account(i)).to_vec())
            .collect(),
        counter: l.token_id_counter(),
        events: l.events().len(),
        balances: holders.iter().map(|a| l.token().balance_of(a)).collect(),
    }
}

fn pick(l: &StakeLedger<MemoryTokenLedger>, n: usize) -> CertificateId {
    CertificateId::new(n as u64 % (l.token_id_counter() + 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn index_matches_live_records_and_failures_change_nothing(ops in proptest::collection::vec(op(), 1..60)) {
        let clock = NullClock::new(0);
        let mut ledger = setup();
        let mut burner = Burner::new(AccountId::new(BURNER));

        for op in ops {
            let before = observe(&ledger);
            let ctx = clock.ctx();
            let result = match op {
                Op::Create { who, amount, term } => ledger.create_stake(&account(who), amount, term, ctx).map(|_| ()),
                Op::End { who, pick: n } => {
                    let id = pick(&ledger, n);
                    ledger.end_stake(&account(who), id, ctx).map(|_| ())
                }
                Op::Transfer { who, to, pick: n } => {
                    let id = pick(&ledger, n);
                    ledger.transfer_from(&account(who), &account(who), &account(to), id, ctx)
                }
                Op::Approve { who, pick: n } => {
                    let id = pick(&ledger, n);
                    ledger.approve(&account(who), Some(&AccountId::new(BURNER)), id)
                }
                Op::Burn { who, pick: n } => {
                    let id = pick(&ledger, n);
                    burner.exchange_tokens(&mut ledger, &account(who), id, ctx)
                }
                Op::Operator { who, to, approved } => {
                    ledger.set_approval_for_all(&account(who), &account(to), approved)
                }
                Op::Advance { days } => {
                    clock.advance_days(days);
                    Ok(())
                }
            };
            if result.is_err() {
                prop_assert_eq!(observe(&ledger), before);
            }

            // union of owned sets == ids with a non-zero record, no id twice
            let mut indexed = BTreeSet::new();
            let mut total = 0;
            for i in 0..ACCOUNTS.len() {
                for id in ledger.owned_tokens(&account(i)) {
                    prop_assert!(indexed.insert(*id), "id {} indexed twice", id);
                    prop_assert_eq!(ledger.owner_of(*id).unwrap(), &account(i));
                }
                total += ledger.balance_of(&account(i));
            }
            let live: BTreeSet<CertificateId> = (1..=ledger.token_id_counter())
                .map(CertificateId::new)
                .filter(|id| !ledger.stake_info(*id).is_zero())
                .collect();
            prop_assert_eq!(&indexed, &live);
            prop_assert_eq!(total, ledger.total_supply());
        }
    }
}
