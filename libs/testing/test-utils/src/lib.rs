//! Shared test utilities for domain testing
//!
//! This crate provides reusable test infrastructure for all domain crates:
//! - `TestDatabase`: PostgreSQL container with the schema migrated (feature: "postgres")
//! - `TestDataBuilder`: Deterministic test data generation (always available)
//! - `assertions`: Custom assertion helpers (always available)
//!
//! # Features
//!
//! - `postgres` (default): Enables PostgreSQL test infrastructure
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let user_id = builder.user_id();
//!     let community_name = builder.name("community", "main");
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by using seeded data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_join_community");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A positive user id derived from the seed
    pub fn user_id(&self) -> i32 {
        self.user_id_at(0)
    }

    /// The `n`-th distinct user id for this seed
    pub fn user_id_at(&self, n: u32) -> i32 {
        // Small positive ids keep failure messages readable
        let base = (self.seed % 900_000) as i32 + 1;
        base + n as i32 * 100_000
    }

    /// Generate a unique name for testing
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(12345);
    /// assert_eq!(builder.name("community", "main"), "test-community-12345-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Generate a unique email address for testing
    pub fn email(&self, local: &str) -> String {
        format!("{}-{}@example.com", local, self.seed)
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that two ids are equal with a nice error message
    pub fn assert_id_eq(actual: i32, expected: i32, context: &str) {
        assert_eq!(
            actual, expected,
            "{}: expected id {}, got {}",
            context, expected, actual
        );
    }

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that `items` are ordered by `key`, newest/highest first when
    /// `descending` is set
    pub fn assert_ordered_by<T, K, F>(items: &[T], key: F, descending: bool, context: &str)
    where
        K: PartialOrd + std::fmt::Debug,
        F: Fn(&T) -> K,
    {
        for pair in items.windows(2) {
            let (a, b) = (key(&pair[0]), key(&pair[1]));
            let ordered = if descending { a >= b } else { a <= b };
            assert!(ordered, "{}: {:?} and {:?} are out of order", context, a, b);
        }
    }
}
