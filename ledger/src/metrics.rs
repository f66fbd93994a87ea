//! Prometheus metrics for the stake ledger.
//!
//! [`LedgerMetrics`] owns a dedicated [`Registry`]. The ledger feeds it only
//! from committed events, so rolled-back calls never show up as activity.

use prometheus::{
    register_gauge_with_registry, register_int_counter_with_registry,
    register_int_gauge_with_registry, Encoder, Gauge, IntCounter, IntGauge, Opts, Registry,
    TextEncoder,
};

use crate::LedgerEvent;

pub struct LedgerMetrics {
    /// The Prometheus registry that owns every metric below.
    pub registry: Registry,

    // ── Counters ────────────────────────────────────────────────────────
    pub stakes_created: IntCounter,
    pub stakes_ended: IntCounter,
    pub certificates_burned: IntCounter,
    /// Owner-to-owner transfers only; mints and burns are not counted.
    pub transfers: IntCounter,
    /// Outermost calls that failed and were undone.
    pub calls_rolled_back: IntCounter,

    // ── Gauges ──────────────────────────────────────────────────────────
    pub active_certificates: IntGauge,
    /// Raw token units currently locked by live stakes.
    pub principal_in_custody: Gauge,
}

impl LedgerMetrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let stakes_created = register_int_counter_with_registry!(
            Opts::new("tenure_stakes_created_total", "Total stakes created"),
            registry
        )
        .expect("failed to register stakes_created counter");

        let stakes_ended = register_int_counter_with_registry!(
            Opts::new(
                "tenure_stakes_ended_total",
                "Total stakes ended and paid out"
            ),
            registry
        )
        .expect("failed to register stakes_ended counter");

        let certificates_burned = register_int_counter_with_registry!(
            Opts::new(
                "tenure_certificates_burned_total",
                "Total certificates burned by delegates"
            ),
            registry
        )
        .expect("failed to register certificates_burned counter");

        let transfers = register_int_counter_with_registry!(
            Opts::new("tenure_transfers_total", "Total certificate transfers"),
            registry
        )
        .expect("failed to register transfers counter");

        let calls_rolled_back = register_int_counter_with_registry!(
            Opts::new(
                "tenure_calls_rolled_back_total",
                "Total ledger calls that failed and were rolled back"
            ),
            registry
        )
        .expect("failed to register calls_rolled_back counter");

        let active_certificates = register_int_gauge_with_registry!(
            Opts::new(
                "tenure_active_certificates",
                "Current number of live certificates"
            ),
            registry
        )
        .expect("failed to register active_certificates gauge");

        let principal_in_custody = register_gauge_with_registry!(
            Opts::new(
                "tenure_principal_in_custody",
                "Raw token units locked by live stakes"
            ),
            registry
        )
        .expect("failed to register principal_in_custody gauge");

        Self {
            registry,
            stakes_created,
            stakes_ended,
            certificates_burned,
            transfers,
            calls_rolled_back,
            active_certificates,
            principal_in_custody,
        }
    }

    /// Count one committed event.
    pub fn observe(&self, event: &LedgerEvent) {
        match event {
            LedgerEvent::StakeCreated { .. } => self.stakes_created.inc(),
            LedgerEvent::StakeEnded { .. } => self.stakes_ended.inc(),
            LedgerEvent::Burned { .. } => self.certificates_burned.inc(),
            LedgerEvent::Transfer {
                from: Some(_),
                to: Some(_),
                ..
            } => self.transfers.inc(),
            _ => {}
        }
    }

    pub fn set_totals(&self, active: usize, principal: u128) {
        self.active_certificates
            .set(i64::try_from(active).unwrap_or(i64::MAX));
        self.principal_in_custody.set(principal as f64);
    }

    /// Render the registry in the Prometheus text exposition format.
    pub fn encode_text(&self) -> String {
        let mut buf = Vec::new();
        if TextEncoder::new()
            .encode(&self.registry.gather(), &mut buf)
            .is_err()
        {
            return String::new();
        }
        String::from_utf8(buf).unwrap_or_default()
    }
}

impl Default for LedgerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
