use crate::helpers::TestContext;
use portfolio_feedback::domain::feedback::{Draft, FeedState, FeedbackStore, FeedbackView};
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

const PUSH_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::test]
#[serial]
async fn it_should_deliver_insert_events_to_subscribers() {
    let ctx = TestContext::new().await.unwrap();
    let mut subscription = ctx.repository.subscribe_inserts().await.unwrap();

    let inserted = ctx
        .fixtures
        .create_feedback(Some("Grace"), "Lovely work", Some(4))
        .await
        .unwrap();

    let pushed = timeout(PUSH_TIMEOUT, subscription.next())
        .await
        .expect("push event not delivered in time")
        .expect("push channel closed");

    assert_eq!(pushed, inserted);

    subscription.cancel();
}

#[tokio::test]
#[serial]
async fn it_should_not_duplicate_the_submitters_own_entry() {
    let ctx = TestContext::new().await.unwrap();
    let store: Arc<dyn FeedbackStore> = ctx.repository.clone();
    let mut view = FeedbackView::new(store, 20);

    view.load().await;
    assert_eq!(view.feed_state(), &FeedState::Loaded);

    let mut subscription = ctx.repository.subscribe_inserts().await.unwrap();

    view.draft = Draft {
        name: "Ada".to_string(),
        email: String::new(),
        message: "Great site".to_string(),
        rating: 5,
    };
    view.submit().await;

    // The locally submitted entry is visible before its push echo arrives.
    assert_eq!(view.feed().len(), 1);
    let local = view.feed().entries()[0].clone();

    let pushed = timeout(PUSH_TIMEOUT, subscription.next())
        .await
        .expect("push event not delivered in time")
        .expect("push channel closed");
    assert_eq!(pushed.id, local.id);

    assert!(!view.apply_push(pushed), "push echo must be discarded");
    assert_eq!(view.feed().len(), 1);
    assert_eq!(view.feed().entries()[0], local);

    subscription.cancel();
}

#[tokio::test]
#[serial]
async fn it_should_stop_delivering_after_cancellation() {
    let ctx = TestContext::new().await.unwrap();
    let subscription = ctx.repository.subscribe_inserts().await.unwrap();
    subscription.cancel();

    // Inserting after teardown must not panic or leak the listener; there is
    // simply nobody left to receive the event.
    ctx.fixtures
        .create_feedback(None, "after teardown", None)
        .await
        .unwrap();
}
