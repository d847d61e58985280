// =============================================================================
// Score Store — per-symbol state and history behind per-key locks
// =============================================================================
//
// The single owner of all scanner state. Symbols are keyed by their
// upper-cased identifier. The outer map lock is held only long enough to
// fetch or insert an entry handle; the entry's own mutex serialises updates
// for that symbol, so concurrent webhook deliveries for different symbols
// never contend and same-symbol updates are last-write-wins.
//
// Thread safety:
//   - parking_lot::RwLock over the symbol map.
//   - parking_lot::Mutex per symbol entry (state + score history).
// =============================================================================

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::scoring::{classify, clamp, composite_score, ScoreHistory};
use crate::types::{IndicatorPayload, Strength, SymbolState};

/// State plus rolling score history for a single symbol.
#[derive(Debug, Default)]
struct SymbolEntry {
    state: Option<SymbolState>,
    history: ScoreHistory,
}

/// In-memory store of the latest state per symbol.
#[derive(Default)]
pub struct ScoreStore {
    entries: RwLock<HashMap<String, Arc<Mutex<SymbolEntry>>>>,
}

impl ScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the entry handle for `symbol`, creating it on first sight.
    fn entry(&self, symbol: &str) -> Arc<Mutex<SymbolEntry>> {
        if let Some(entry) = self.entries.read().get(symbol) {
            return entry.clone();
        }
        self.entries
            .write()
            .entry(symbol.to_string())
            .or_default()
            .clone()
    }

    /// Run the full score pipeline for one inbound update and replace that
    /// symbol's state wholesale. Returns a clone of what was stored.
    pub fn apply(&self, payload: &IndicatorPayload) -> SymbolState {
        let symbol = payload.symbol.to_uppercase();

        let trend = clamp(payload.trend);
        let momentum = clamp(payload.momentum);
        let vola = clamp(payload.vola);
        let flow = clamp(payload.corr);

        let score = composite_score(trend, momentum, vola, flow);
        let (tag, strength) = classify(score);

        let entry = self.entry(&symbol);
        let mut entry = entry.lock();
        let velocity = entry.history.push(score);

        let state = SymbolState {
            symbol,
            price: payload.price,
            time: payload.time.clone(),
            trend,
            momentum,
            vola,
            flow,
            score,
            tag,
            strength,
            velocity,
        };
        entry.state = Some(state.clone());
        state
    }

    /// Number of tracked symbols.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Clone every current state out of the store.
    pub fn snapshot(&self) -> Vec<SymbolState> {
        self.collect(|_| true)
    }

    /// States at EXTREME strength or with |velocity| above `velocity_min`,
    /// sorted by |score| descending.
    pub fn hot_movers(&self, velocity_min: f64) -> Vec<SymbolState> {
        let mut hot =
            self.collect(|s| s.strength == Strength::Extreme || s.velocity.abs() > velocity_min);
        sort_by_score_magnitude(&mut hot);
        hot
    }

    /// States with |score|, |velocity| and |flow| all above their thresholds,
    /// sorted by |score| descending.
    pub fn scalp_setups(
        &self,
        score_min: f64,
        velocity_min: f64,
        flow_min: f64,
    ) -> Vec<SymbolState> {
        let mut setups = self.collect(|s| {
            s.score.abs() > score_min && s.velocity.abs() > velocity_min && s.flow.abs() > flow_min
        });
        sort_by_score_magnitude(&mut setups);
        setups
    }

    fn collect(&self, keep: impl Fn(&SymbolState) -> bool) -> Vec<SymbolState> {
        let entries = self.entries.read();
        entries
            .values()
            .filter_map(|entry| entry.lock().state.clone())
            .filter(|state| keep(state))
            .collect()
    }
}

fn sort_by_score_magnitude(states: &mut [SymbolState]) {
    states.sort_by(|a, b| {
        b.score
            .abs()
            .partial_cmp(&a.score.abs())
            .unwrap_or(Ordering::Equal)
    });
}
