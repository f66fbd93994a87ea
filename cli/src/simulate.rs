//! Scripted stake lifecycle against in-memory collaborators.

use std::path::Path;
use std::sync::Arc;

use anyhow::{ensure, Context};
use serde::Serialize;
use tracing::info;

use tenure_ledger::{LedgerMetrics, StakeLedger, CUSTODY_ACCOUNT};
use tenure_nullables::{Burner, NullClock};
use tenure_store_lmdb::LmdbEnvironment;
use tenure_token::{DecayingApy, MemoryTokenLedger, TokenLedger};
use tenure_types::{AccountId, LedgerParams, Timestamp, SECONDS_PER_DAY, TOKEN_UNIT};
use tenure_utils::format_duration;

use crate::config::SimulationConfig;

#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub redeemed_id: u64,
    pub burned_id: u64,
    pub apy: u16,
    pub principal: u128,
    pub reward: u128,
    pub staker_balance: u128,
    pub recipient_balance: u128,
    pub burner_credit: u64,
    pub active_certificates: usize,
    pub token_id_counter: u64,
    pub persisted: bool,
}

/// Run: two stakes by one account; the second is burned through a delegate,
/// the first is transferred after maturity and redeemed by its new owner.
pub fn run(
    params: &LedgerParams,
    sim: &SimulationConfig,
    metrics: Arc<LedgerMetrics>,
    data_dir: Option<&Path>,
) -> anyhow::Result<SimulationReport> {
    let genesis = Timestamp::new(sim.genesis_secs);
    let clock = NullClock::new(
        sim.genesis_secs
            .saturating_add(sim.start_after_days.saturating_mul(SECONDS_PER_DAY)),
    );
    let alice = AccountId::new("tnr_alice");
    let bob = AccountId::new("tnr_bob");
    let mut burner = Burner::new(AccountId::new("tnr_burner"));

    let principal = sim
        .principal_tokens
        .checked_mul(TOKEN_UNIT)
        .context("principal_tokens too large")?;
    let funding = principal.checked_mul(2).context("principal_tokens too large")?;

    let mut token = MemoryTokenLedger::new(genesis);
    token.mint(&alice, funding)?;
    token.approve(&alice, &AccountId::new(CUSTODY_ACCOUNT), funding)?;
    let mut ledger = StakeLedger::new(
        params.clone(),
        token,
        Box::new(DecayingApy::new(genesis)),
    )?
    .with_metrics(metrics);

    let redeemed = ledger.create_stake(&alice, principal, sim.term_days, clock.ctx())?;
    clock.mine(1);
    let burned = ledger.create_stake(&alice, principal, sim.term_days, clock.ctx())?;
    let apy = tenure_record::StakeInfo::decode(&ledger.stake_info(redeemed)).apy;
    info!(%redeemed, %burned, apy, "stakes created");

    ledger.approve(&alice, Some(&AccountId::new("tnr_burner")), burned)?;
    burner.exchange_tokens(&mut ledger, &alice, burned, clock.ctx())?;
    info!(id = %burned, credit = burner.balance_of(&alice), "certificate burned");

    let wait = params.blackout_secs.div_ceil(SECONDS_PER_DAY) + 1;
    let days = u64::from(sim.term_days) + wait;
    info!(skip = %format_duration(days * SECONDS_PER_DAY), "advancing past maturity blackout");
    clock.advance_days(days);
    ledger.transfer_from(&alice, &alice, &bob, redeemed, clock.ctx())?;
    let paid = ledger.end_stake(&bob, redeemed, clock.ctx())?;
    info!(id = %redeemed, paid, "stake redeemed");

    let persisted = match data_dir {
        Some(dir) => {
            persist(&ledger, params, genesis, dir)?;
            true
        }
        None => false,
    };

    Ok(SimulationReport {
        redeemed_id: redeemed.as_u64(),
        burned_id: burned.as_u64(),
        apy,
        principal,
        reward: paid.saturating_sub(principal),
        staker_balance: ledger.token().balance_of(&alice),
        recipient_balance: ledger.token().balance_of(&bob),
        burner_credit: burner.balance_of(&alice),
        active_certificates: ledger.total_supply(),
        token_id_counter: ledger.token_id_counter(),
        persisted,
    })
}

/// Save to LMDB under `dir` and read it back.
fn persist(
    ledger: &StakeLedger<MemoryTokenLedger>,
    params: &LedgerParams,
    genesis: Timestamp,
    dir: &Path,
) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating data directory {}", dir.display()))?;
    let env = LmdbEnvironment::open_default(dir)?;
    ledger.save_to_store(&env)?;
    let restored = StakeLedger::load_from_store(
        &env,
        params.clone(),
        MemoryTokenLedger::new(genesis),
        Box::new(DecayingApy::new(genesis)),
    )?;
    ensure!(
        restored.token_id_counter() == ledger.token_id_counter()
            && restored.total_supply() == ledger.total_supply(),
        "ledger read back from {} does not match what was saved",
        dir.display()
    );
    info!(dir = %dir.display(), "ledger persisted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_run_pays_nineteen_percent() {
        let metrics = Arc::new(LedgerMetrics::new());
        let report = run(
            &LedgerParams::default(),
            &SimulationConfig::default(),
            metrics.clone(),
            None,
        )
        .unwrap();
        let principal = 1_000 * TOKEN_UNIT;
        assert_eq!(report.apy, 19);
        assert_eq!(report.reward, principal * 19 / 100);
        assert_eq!(report.recipient_balance, principal + principal * 19 / 100);
        // The burned stake's principal stays in custody.
        assert_eq!(report.staker_balance, 0);
        assert_eq!(report.burner_credit, 2);
        assert_eq!(report.active_certificates, 0);
        assert_eq!(report.token_id_counter, 2);
        assert!(metrics.encode_text().contains("stakes_created"));
    }

    #[test]
    fn run_persists_to_lmdb() {
        let dir = tempfile::tempdir().unwrap();
        let report = run(
            &LedgerParams::default(),
            &SimulationConfig::default(),
            Arc::new(LedgerMetrics::new()),
            Some(&dir.path().join("ledger")),
        )
        .unwrap();
        assert!(report.persisted);
    }

    #[test]
    fn overlong_term_is_rejected() {
        let sim = SimulationConfig {
            term_days: 1_001,
            ..SimulationConfig::default()
        };
        let err = run(
            &LedgerParams::default(),
            &sim,
            Arc::new(LedgerMetrics::new()),
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("term"));
    }
}
