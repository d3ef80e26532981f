use std::cell::RefCell;
use std::rc::Rc;

use futures::executor::block_on;

use super::*;

fn no_sleep(_d: Duration) -> futures::future::Ready<()> {
    futures::future::ready(())
}

// =============================================================
// Retry (P6)
// =============================================================

#[test]
fn succeeds_after_k_failures_with_k_plus_one_calls() {
    let calls = Rc::new(RefCell::new(0_u32));
    let counter = Rc::clone(&calls);

    let result = block_on(retry_with_sleep(
        3,
        Duration::from_millis(100),
        move || {
            let counter = Rc::clone(&counter);
            async move {
                *counter.borrow_mut() += 1;
                if *counter.borrow() < 3 { Err(ApiError::Connectivity) } else { Ok(42) }
            }
        },
        no_sleep,
    ));

    assert_eq!(result, Ok(42));
    assert_eq!(*calls.borrow(), 3);
}

#[test]
fn first_success_short_circuits() {
    let calls = Rc::new(RefCell::new(0_u32));
    let counter = Rc::clone(&calls);

    let result = block_on(retry_with_sleep(
        3,
        Duration::from_millis(100),
        move || {
            let counter = Rc::clone(&counter);
            async move {
                *counter.borrow_mut() += 1;
                Ok("ok")
            }
        },
        no_sleep,
    ));

    assert_eq!(result, Ok("ok"));
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn exhausted_attempts_reraise_last_error() {
    let calls = Rc::new(RefCell::new(0_u32));
    let counter = Rc::clone(&calls);

    let result: Result<(), _> = block_on(retry_with_sleep(
        3,
        Duration::from_millis(100),
        move || {
            let counter = Rc::clone(&counter);
            async move {
                *counter.borrow_mut() += 1;
                let attempt = *counter.borrow();
                Err(ApiError::Http {
                    status: 500,
                    message: format!("boom {attempt}"),
                    errors: None,
                    timestamp: None,
                })
            }
        },
        no_sleep,
    ));

    assert_eq!(*calls.borrow(), 3);
    match result {
        Err(ApiError::Http { message, .. }) => assert_eq!(message, "boom 3"),
        other => panic!("expected last error, got {other:?}"),
    }
}

#[test]
fn delays_grow_linearly_between_attempts() {
    let delays = Rc::new(RefCell::new(Vec::new()));
    let record = Rc::clone(&delays);

    let _: Result<(), _> = block_on(retry_with_sleep(
        3,
        Duration::from_millis(200),
        || async { Err(ApiError::Connectivity) },
        move |d| {
            record.borrow_mut().push(d);
            futures::future::ready(())
        },
    ));

    // No sleep after the final attempt.
    assert_eq!(
        *delays.borrow(),
        vec![Duration::from_millis(200), Duration::from_millis(400)]
    );
}

#[test]
fn zero_attempts_still_runs_once() {
    let calls = Rc::new(RefCell::new(0_u32));
    let counter = Rc::clone(&calls);

    let _: Result<(), _> = block_on(retry_with_sleep(
        0,
        Duration::from_millis(1),
        move || {
            let counter = Rc::clone(&counter);
            async move {
                *counter.borrow_mut() += 1;
                Err(ApiError::Connectivity)
            }
        },
        no_sleep,
    ));

    assert_eq!(*calls.borrow(), 1);
}

// =============================================================
// Batch (P7)
// =============================================================

#[test]
fn batch_returns_all_outcomes_in_submission_order() {
    let requests: Vec<futures::future::LocalBoxFuture<'_, Result<u32, ApiError>>> = vec![
        Box::pin(async { Ok(1) }),
        Box::pin(async { Err(ApiError::Connectivity) }),
        Box::pin(async { Ok(3) }),
    ];

    let outcomes = block_on(batch(requests));

    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0], Ok(1));
    assert_eq!(outcomes[1], Err(ApiError::Connectivity));
    assert_eq!(outcomes[2], Ok(3));
}

#[test]
fn batch_of_nothing_resolves_empty() {
    let outcomes: Vec<Result<u32, ApiError>> = block_on(batch(vec![]));
    assert!(outcomes.is_empty());
}
