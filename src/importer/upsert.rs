// ==========================================
// Safety Operations Platform - Upsert reconciliation
// ==========================================
// Decide insert vs update by natural key. Matching is exact: no
// fuzzy comparison, no surrogate ids, no field-level merge.
// ==========================================

use crate::domain::types::NaturalKey;
use crate::repository::error::RepositoryResult;
use crate::repository::store::RecordStore;

// ==========================================
// UpsertOutcome
// ==========================================
/// What the reconciliation did with one mapped record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No record existed under the key; a new one was inserted
    Imported,
    /// A record existed and was fully replaced (last-write-wins)
    Updated,
}

/// Reconcile one mapped record against the store.
///
/// Looks up the record's natural key first so that a second row with
/// the same key in one file observes the first row's write.
pub async fn reconcile<S>(store: &S, record: S::Record) -> RepositoryResult<UpsertOutcome>
where
    S: RecordStore,
{
    let key = record.natural_key();
    match store.find_by_key(&key).await? {
        Some(_) => {
            store.update_by_key(&key, record).await?;
            Ok(UpsertOutcome::Updated)
        }
        None => {
            store.insert(record).await?;
            Ok(UpsertOutcome::Imported)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::store::InMemoryStore;

    #[derive(Debug, Clone, PartialEq)]
    struct Widget {
        id: String,
        value: i64,
    }

    impl NaturalKey for Widget {
        type Key = String;

        fn natural_key(&self) -> String {
            self.id.clone()
        }
    }

    #[tokio::test]
    async fn test_first_write_is_imported() {
        let store: InMemoryStore<Widget> = InMemoryStore::new();
        let outcome = reconcile(
            &store,
            Widget {
                id: "w-1".into(),
                value: 1,
            },
        )
        .await
        .unwrap();
        assert_eq!(outcome, UpsertOutcome::Imported);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_second_write_same_key_is_updated() {
        let store: InMemoryStore<Widget> = InMemoryStore::new();
        reconcile(
            &store,
            Widget {
                id: "w-1".into(),
                value: 1,
            },
        )
        .await
        .unwrap();
        let outcome = reconcile(
            &store,
            Widget {
                id: "w-1".into(),
                value: 2,
            },
        )
        .await
        .unwrap();
        assert_eq!(outcome, UpsertOutcome::Updated);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&"w-1".to_string()).unwrap().value, 2);
    }

    #[tokio::test]
    async fn test_distinct_keys_both_imported() {
        let store: InMemoryStore<Widget> = InMemoryStore::new();
        for id in ["w-1", "w-2"] {
            let outcome = reconcile(
                &store,
                Widget {
                    id: id.into(),
                    value: 0,
                },
            )
            .await
            .unwrap();
            assert_eq!(outcome, UpsertOutcome::Imported);
        }
        assert_eq!(store.len(), 2);
    }
}
