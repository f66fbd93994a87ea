#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use tenure_ledger::{StakeLedger, CUSTODY_ACCOUNT};
use tenure_nullables::{BadBurner, Burner, NullClock};
use tenure_token::{DecayingApy, MemoryTokenLedger, TokenLedger};
use tenure_types::{AccountId, CertificateId, LedgerParams, Timestamp};

const GENESIS: u64 = 1_700_000_000;

#[derive(Arbitrary, Debug)]
enum Op {
    Create { who: u8, amount: u16, term: u16 },
    End { who: u8, id: u8 },
    Transfer { operator: u8, from: u8, to: u8, id: u8 },
    Approve { who: u8, spender: Option<u8>, id: u8 },
    ApproveAll { owner: u8, operator: u8, approved: bool },
    Burn { who: u8, id: u8, bad: bool },
    Advance { days: u16 },
}

fn account(i: u8) -> AccountId {
    match i % 4 {
        0 => AccountId::new("tnr_a"),
        1 => AccountId::new("tnr_b"),
        2 => AccountId::new("tnr_c"),
        _ => AccountId::new("tnr_burner"),
    }
}

fn id(raw: u8) -> CertificateId {
    CertificateId::new(u64::from(raw))
}

// Arbitrary operation sequences never panic, and the ownership index always
// agrees with owner_of and the supply.
fuzz_target!(|ops: Vec<Op>| {
    let clock = NullClock::new(GENESIS);
    let mut token = MemoryTokenLedger::new(Timestamp::new(GENESIS));
    let custody = AccountId::new(CUSTODY_ACCOUNT);
    for i in 0..3 {
        let _ = token.mint(&account(i), 1 << 40);
        let _ = token.approve(&account(i), &custody, u128::MAX);
    }
    let Ok(mut ledger) = StakeLedger::new(
        LedgerParams::default(),
        token,
        Box::new(DecayingApy::new(Timestamp::new(GENESIS))),
    ) else {
        return;
    };
    let mut burner = Burner::new(account(3));
    let mut bad = BadBurner::new(account(3));
    let supply = ledger.token().total_supply();

    for op in ops {
        let ctx = clock.ctx();
        let _ = match op {
            Op::Create { who, amount, term } => ledger
                .create_stake(&account(who), u128::from(amount), u32::from(term), ctx)
                .map(|_| ()),
            Op::End { who, id: raw } => ledger.end_stake(&account(who), id(raw), ctx).map(|_| ()),
            Op::Transfer { operator, from, to, id: raw } => ledger.transfer_from(
                &account(operator),
                &account(from),
                &account(to),
                id(raw),
                ctx,
            ),
            Op::Approve { who, spender, id: raw } => {
                let spender = spender.map(account);
                ledger.approve(&account(who), spender.as_ref(), id(raw))
            }
            Op::ApproveAll { owner, operator, approved } => {
                ledger.set_approval_for_all(&account(owner), &account(operator), approved)
            }
            Op::Burn { who, id: raw, bad: false } => {
                burner.exchange_tokens(&mut ledger, &account(who), id(raw), ctx)
            }
            Op::Burn { who, id: raw, bad: true } => {
                bad.exchange_tokens(&mut ledger, &account(who), id(raw), ctx)
            }
            Op::Advance { days } => {
                clock.advance_days(u64::from(days));
                Ok(())
            }
        };

        let mut owned = 0;
        for i in 0..4 {
            let who = account(i);
            for held in ledger.owned_tokens(&who) {
                assert_eq!(ledger.owner_of(*held).ok(), Some(&who));
                assert!(!ledger.stake_info(*held).is_zero());
            }
            owned += ledger.balance_of(&who);
        }
        assert_eq!(owned, ledger.total_supply());
        // Rewards mint new tokens; nothing ever destroys them.
        assert!(ledger.token().total_supply() >= supply);
    }
});
