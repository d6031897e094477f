//! Property-based tests for secret search.
//!
//! Search returns exactly the secrets whose title or content contains the
//! query case-insensitively, in collection order, and never mutates state.

use std::sync::Arc;

use proptest::prelude::*;
use securevault::database::{Database, SqliteVaultStore, VaultStoreTrait};
use securevault::services::crypto_service::CryptoService;
use securevault::services::vault_session::{VaultPolicy, VaultSession};

fn unlocked_with(items: &[(String, String)]) -> (Arc<Database>, VaultSession) {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let mut session = VaultSession::open(
        Box::new(SqliteVaultStore::new(db.clone())),
        CryptoService::with_iterations(1).unwrap(),
        VaultPolicy::default(),
    )
    .unwrap();
    session.setup("abcd", "abcd").unwrap();
    session.login("abcd").unwrap();
    for (title, content) in items {
        session.add_secret(title, content).unwrap();
    }
    (db, session)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn search_matches_filter_definition(
        items in proptest::collection::vec(("[a-zA-Z]{1,8}", "[a-zA-Z0-9]{1,8}"), 0..6),
        query in "[a-zA-Z]{0,3}",
    ) {
        let (db, session) = unlocked_with(&items);
        let blob_before = SqliteVaultStore::new(db.clone()).load().unwrap().unwrap().blob;

        let needle = query.to_lowercase();
        let expected: Vec<String> = session
            .secrets()
            .unwrap()
            .iter()
            .filter(|s| {
                query.is_empty()
                    || s.title.to_lowercase().contains(&needle)
                    || s.content.to_lowercase().contains(&needle)
            })
            .map(|s| s.id.clone())
            .collect();

        let found: Vec<String> = session.search(&query).unwrap().iter().map(|s| s.id.clone()).collect();
        prop_assert_eq!(found, expected);

        let blob_after = SqliteVaultStore::new(db).load().unwrap().unwrap().blob;
        prop_assert_eq!(blob_before, blob_after);
    }
}
