mod test_db;

pub use fixtures::TestFixtures;
pub use test_db::TestDb;

use anyhow::Result;
use portfolio_feedback::infrastructure::repositories::FeedbackRepository;
use std::sync::Arc;

pub struct TestContext {
    pub db: TestDb,
    pub repository: Arc<FeedbackRepository>,
    pub fixtures: TestFixtures,
}

impl TestContext {
    pub async fn new() -> Result<Self> {
        let db = TestDb::new().await?;
        let repository = Arc::new(FeedbackRepository::new(db.pool.clone()));
        let fixtures = TestFixtures::new(db.pool.clone());

        Ok(Self {
            db,
            repository,
            fixtures,
        })
    }
}
