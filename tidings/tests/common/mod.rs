#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicI64, Ordering},
};
use tidings::{BoxError, DispatchContext, Handler};

// ============================================================================
// Test State
// ============================================================================

/// Stand-in for state owned by the call site, e.g. a row it just saved.
#[derive(Clone, Default)]
pub struct Ledger {
    balance: Arc<AtomicI64>,
}

impl Ledger {
    pub fn deposit(&self, amount: i64) {
        self.balance.fetch_add(amount, Ordering::SeqCst);
    }

    pub fn withdraw(&self, amount: i64) {
        self.balance.fetch_sub(amount, Ordering::SeqCst);
    }

    pub fn balance(&self) -> i64 {
        self.balance.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Test Handlers
// ============================================================================

/// Fails after `after` successful invocations.
pub struct FlakyHandler {
    pub calls: Arc<AtomicI64>,
    pub after: i64,
}

impl Handler for FlakyHandler {
    fn handle(&self, _ctx: &DispatchContext) -> Result<(), BoxError> {
        let calls = self.calls.fetch_add(1, Ordering::SeqCst);
        if calls >= self.after {
            return Err(format!("flaky handler gave up on call {}", calls + 1).into());
        }
        Ok(())
    }
}

/// Copies the unit-of-work flag of every context it sees.
#[derive(Clone, Default)]
pub struct UnitOfWorkObserver {
    pub seen: Arc<std::sync::Mutex<Vec<bool>>>,
}

impl Handler for UnitOfWorkObserver {
    fn handle(&self, ctx: &DispatchContext) -> Result<(), BoxError> {
        self.seen.lock().unwrap().push(ctx.in_unit_of_work());
        Ok(())
    }
}
