//! Failure propagation tests.
//!
//! The dispatcher has no transactional authority: a failing handler stops the
//! dispatch, but nothing that already happened is undone.

use std::{error::Error as _, sync::Arc, sync::atomic::AtomicI64};
use tidings::{
    Dispatcher, Payload, SourceFilter, TidingsError,
    handlers::named,
    testing::{CountingHandler, FailingHandler, Journal},
};

mod common;
use common::{FlakyHandler, Ledger};

#[test]
fn test_failure_halts_remaining_handlers() {
    let counters: Vec<CountingHandler> = (0..5).map(|_| CountingHandler::new()).collect();
    let failing = FailingHandler::new("constraint violated");
    let dispatcher = Dispatcher::new();

    let mut registrations = Vec::new();
    for (i, counter) in counters.iter().enumerate() {
        if i == 2 {
            registrations.push(
                dispatcher
                    .register_handler("after-save", SourceFilter::Any, failing.clone())
                    .unwrap(),
            );
        }
        registrations.push(
            dispatcher
                .register_handler("after-save", SourceFilter::Any, counter.clone())
                .unwrap(),
        );
    }

    let err = dispatcher
        .dispatch("after-save", "Widget", Payload::new(), false)
        .unwrap_err();

    // handler k = 3 failed: 1..2 ran, 4..6 did not
    assert_eq!(err.handler(), registrations[2].id());
    assert_eq!(err.completed_count(), 2);
    assert_eq!(
        err.completed(),
        &[registrations[0].id(), registrations[1].id()]
    );
    assert_eq!(err.handler_name(), Some("failing"));
    assert_eq!(err.source_id(), "Widget");
    assert_eq!(err.kind().as_str(), "after-save");
    assert_eq!(err.source().unwrap().to_string(), "constraint violated");

    let counts: Vec<usize> = counters.iter().map(CountingHandler::count).collect();
    assert_eq!(counts, vec![1, 1, 0, 0, 0]);
    assert_eq!(failing.attempts(), 1);
}

#[test]
fn test_failure_names_handler() {
    let dispatcher = Dispatcher::new();
    dispatcher
        .register_handler(
            "after-save",
            SourceFilter::Any,
            named("send-receipt", FailingHandler::new("smtp down")),
        )
        .unwrap();

    let err = dispatcher
        .dispatch("after-save", "Order", Payload::new(), true)
        .unwrap_err();

    assert_eq!(err.handler_name(), Some("send-receipt"));
    assert!(err.to_string().contains("(send-receipt)"));
    assert!(err.to_string().contains("after 0 handler(s) completed"));
}

#[test]
fn test_each_dispatch_starts_from_the_first_handler() {
    let journal = Journal::new();
    let dispatcher = Dispatcher::new();
    dispatcher
        .register_handler("after-save", SourceFilter::Any, journal.recorder("audit"))
        .unwrap();
    dispatcher
        .register_handler(
            "after-save",
            SourceFilter::Any,
            FlakyHandler {
                calls: Arc::new(AtomicI64::new(0)),
                after: 1,
            },
        )
        .unwrap();

    assert!(dispatcher.dispatch("after-save", "Widget", Payload::new(), false).is_ok());
    assert!(dispatcher.dispatch("after-save", "Widget", Payload::new(), false).is_err());
    assert_eq!(journal.entries(), vec!["audit", "audit"]);
}

/// Simulates a call site that saves, dispatches, and owns any compensation.
fn save_and_notify(
    dispatcher: &Dispatcher,
    ledger: &Ledger,
    compensate: bool,
) -> Result<(), TidingsError> {
    ledger.deposit(100);
    if let Err(failure) = dispatcher.dispatch("after-save", "Account", Payload::new(), true) {
        if compensate {
            ledger.withdraw(100);
        }
        return Err(failure.into());
    }
    Ok(())
}

#[test]
fn test_dispatcher_never_rolls_back_call_site() {
    let handler_effects = Journal::new();
    let dispatcher = Dispatcher::new();
    dispatcher
        .register_handler("after-save", SourceFilter::Any, handler_effects.recorder("index"))
        .unwrap();
    dispatcher
        .register_handler("after-save", SourceFilter::Any, FailingHandler::new("boom"))
        .unwrap();

    let ledger = Ledger::default();
    let err = save_and_notify(&dispatcher, &ledger, false).unwrap_err();
    assert!(matches!(err, TidingsError::Dispatch(_)));
    assert_eq!(ledger.balance(), 100, "no compensation: the deposit stands");

    let ledger = Ledger::default();
    assert!(save_and_notify(&dispatcher, &ledger, true).is_err());
    assert_eq!(ledger.balance(), 0, "call site compensated on its own");

    // Handler effects from both attempts remain either way.
    assert_eq!(handler_effects.entries(), vec!["index", "index"]);
}

#[test]
fn test_question_mark_converts_into_top_level_error() {
    fn run() -> Result<(), TidingsError> {
        let dispatcher = Dispatcher::new();
        dispatcher.register("", SourceFilter::Any, |_| Ok(()))?;
        Ok(())
    }

    assert!(matches!(run(), Err(TidingsError::Registration(_))));
}
