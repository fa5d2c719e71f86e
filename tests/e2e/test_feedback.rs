use crate::helpers::TestContext;
use chrono::{Duration, Utc};
use portfolio_feedback::domain::feedback::{Draft, NewFeedback};
use pretty_assertions::assert_eq;
use serial_test::serial;
use uuid::Uuid;

#[tokio::test]
#[serial]
async fn it_should_return_an_empty_feed_when_no_feedback_exists() {
    let ctx = TestContext::new().await.unwrap();

    let feed = ctx.repository.list_recent(20).await.unwrap();

    assert!(feed.is_empty());
}

#[tokio::test]
#[serial]
async fn it_should_round_trip_a_submission() {
    let ctx = TestContext::new().await.unwrap();
    let draft = Draft {
        name: "Ada".to_string(),
        email: String::new(),
        message: "Great site".to_string(),
        rating: 5,
    };
    let feedback = NewFeedback::from_draft(&draft).unwrap();

    let inserted = ctx.repository.insert(&feedback).await.unwrap();
    let feed = ctx.repository.list_recent(20).await.unwrap();

    let front = &feed[0];
    assert_eq!(front, &inserted);
    assert_eq!(front.display_name(), "Ada");
    assert_eq!(front.message, "Great site");
    assert_eq!(front.rating, Some(5));
    assert_ne!(front.id, Uuid::nil());
    assert!(front.created_at <= Utc::now());
    assert!(front.created_at > Utc::now() - Duration::minutes(1));
}

#[tokio::test]
#[serial]
async fn it_should_list_newest_first_and_honor_the_limit() {
    let ctx = TestContext::new().await.unwrap();
    let base = Utc::now() - Duration::hours(3);
    ctx.fixtures.create_feedback_at("oldest", base).await.unwrap();
    let middle = ctx
        .fixtures
        .create_feedback_at("middle", base + Duration::hours(1))
        .await
        .unwrap();
    let newest = ctx
        .fixtures
        .create_feedback_at("newest", base + Duration::hours(2))
        .await
        .unwrap();

    let feed = ctx.repository.list_recent(2).await.unwrap();

    assert_eq!(feed, vec![newest, middle]);
}

#[tokio::test]
#[serial]
async fn it_should_store_blank_email_as_null() {
    let ctx = TestContext::new().await.unwrap();
    let draft = Draft {
        name: "Ada".to_string(),
        email: "   ".to_string(),
        message: "Great site".to_string(),
        rating: 4,
    };
    let feedback = NewFeedback::from_draft(&draft).unwrap();

    let inserted = ctx.repository.insert(&feedback).await.unwrap();

    let email = ctx.fixtures.email_of(inserted.id).await.unwrap();
    assert_eq!(email, None);
}

#[tokio::test]
#[serial]
async fn it_should_keep_a_supplied_email() {
    let ctx = TestContext::new().await.unwrap();
    let draft = Draft {
        name: "Ada".to_string(),
        email: " ada@example.com ".to_string(),
        message: "Great site".to_string(),
        rating: 4,
    };
    let feedback = NewFeedback::from_draft(&draft).unwrap();

    let inserted = ctx.repository.insert(&feedback).await.unwrap();

    let email = ctx.fixtures.email_of(inserted.id).await.unwrap();
    assert_eq!(email, Some("ada@example.com".to_string()));
}

#[tokio::test]
#[serial]
async fn it_should_enforce_the_rating_range_at_the_storage_layer() {
    let ctx = TestContext::new().await.unwrap();

    let result = ctx.fixtures.create_feedback(Some("Eve"), "out of range", Some(9)).await;

    assert!(result.is_err(), "rating 9 must violate the check constraint");
}
