use crate::database::accounts::AccountStore;
use crate::models::{Account, AccountStatus};
use crate::utils::error::AppError;
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

// Request/Response structures
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct BulkIdsRequest {
    #[serde(rename = "userIds")]
    pub user_ids: Vec<String>,
}

/// Reduced projection returned on login. Never carries the password or
/// any other stored field.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AccountSummary {
    pub name: Option<String>,
    pub email: String,
    pub id: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct InsertAck {
    pub acknowledged: bool,
    #[serde(rename = "insertedId")]
    pub inserted_id: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UpdateSummary {
    pub acknowledged: bool,
    #[serde(rename = "matchedCount")]
    pub matched_count: u64,
    #[serde(rename = "modifiedCount")]
    pub modified_count: u64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DeleteSummary {
    pub acknowledged: bool,
    #[serde(rename = "deletedCount")]
    pub deleted_count: u64,
}

/// Creates a new account if the email is not taken yet.
///
/// The lookup and the insert are two separate store operations, so two
/// concurrent registrations for the same email can both pass the check.
/// Uniqueness is best-effort; there is no unique index on email.
pub async fn register(store: &AccountStore, account: Account) -> Result<InsertAck, AppError> {
    if store.find_by_email(&account.email).await?.is_some() {
        return Err(AppError::DuplicateEmail);
    }

    let inserted_id = store.insert(account).await?;

    Ok(InsertAck {
        acknowledged: true,
        inserted_id: inserted_id.to_hex(),
    })
}

/// Verifies credentials and stamps `lastLogin` on success.
///
/// A blocked account fails before the stamp, so `lastLogin` never moves
/// while an account is blocked.
pub async fn login(
    store: &AccountStore,
    request: &LoginRequest,
) -> Result<AccountSummary, AppError> {
    let account = store
        .find_by_email(&request.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if account.password.as_deref() != Some(request.password.as_str()) {
        return Err(AppError::InvalidCredentials);
    }

    if account.is_blocked() {
        return Err(AppError::AccountBlocked);
    }

    let id = account
        .id
        .ok_or_else(|| AppError::Database("stored account has no _id".to_string()))?;

    store
        .update_by_id(id, doc! { "lastLogin": BsonDateTime::now() })
        .await?;

    Ok(AccountSummary {
        name: account.name,
        email: account.email,
        id: id.to_hex(),
    })
}

/// Every persisted account, verbatim. Empty vector when the store is empty.
pub async fn list_accounts(store: &AccountStore) -> Result<Vec<Account>, AppError> {
    Ok(store.list_all().await?)
}

/// Transitions every account in `user_ids` to `status` with one bulk
/// update. Ids that match no account are silently ignored.
pub async fn set_status(
    store: &AccountStore,
    user_ids: &[String],
    status: AccountStatus,
) -> Result<UpdateSummary, AppError> {
    let ids = parse_object_ids(user_ids)?;

    let (matched, modified) = store
        .update_many_by_ids(&ids, doc! { "status": status.as_str() })
        .await?;

    Ok(UpdateSummary {
        acknowledged: true,
        matched_count: matched,
        modified_count: modified,
    })
}

/// Physically removes every account in `user_ids` with one bulk delete.
/// Repeating the call yields a zero count without error.
pub async fn delete_accounts(
    store: &AccountStore,
    user_ids: &[String],
) -> Result<DeleteSummary, AppError> {
    let ids = parse_object_ids(user_ids)?;

    let deleted = store.delete_many_by_ids(&ids).await?;

    Ok(DeleteSummary {
        acknowledged: true,
        deleted_count: deleted,
    })
}

/// Converts external id strings to ObjectIds. The first malformed id
/// aborts the whole batch before any store call is issued.
fn parse_object_ids(user_ids: &[String]) -> Result<Vec<ObjectId>, AppError> {
    user_ids
        .iter()
        .map(|id| ObjectId::parse_str(id).map_err(|_| AppError::InvalidId(id.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MongoDB;
    use mongodb::bson::Document;

    fn account(email: &str, password: &str, name: &str) -> Account {
        Account {
            id: None,
            email: email.to_string(),
            password: Some(password.to_string()),
            name: Some(name.to_string()),
            status: None,
            last_login: None,
            extra: Document::new(),
        }
    }

    #[test]
    fn parse_accepts_well_formed_ids() {
        let ids = vec![
            "507f1f77bcf86cd799439011".to_string(),
            "507f191e810c19729de860ea".to_string(),
        ];
        let parsed = parse_object_ids(&ids).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].to_hex(), ids[0]);
    }

    #[test]
    fn parse_aborts_the_batch_on_the_first_malformed_id() {
        let ids = vec![
            "507f1f77bcf86cd799439011".to_string(),
            "not-an-object-id".to_string(),
            "507f191e810c19729de860ea".to_string(),
        ];
        match parse_object_ids(&ids) {
            Err(AppError::InvalidId(id)) => assert_eq!(id, "not-an-object-id"),
            other => panic!("expected InvalidId, got {:?}", other),
        }
    }

    #[test]
    fn summary_never_carries_a_password() {
        let summary = AccountSummary {
            name: Some("A".to_string()),
            email: "a@x.com".to_string(),
            id: ObjectId::new().to_hex(),
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["email"], "a@x.com");
        assert_eq!(value["name"], "A");
    }

    async fn test_store() -> AccountStore {
        dotenv::dotenv().ok();
        let db = MongoDB::new("mongodb://localhost:27017/usersDB_test")
            .await
            .expect("MongoDB must be running for this test");
        AccountStore::new(&db)
    }

    // Unique per run so the flow tests do not step on each other's data
    fn fresh_email(tag: &str) -> String {
        format!("{}-{}@service.test", tag, ObjectId::new().to_hex())
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn register_then_login_roundtrip() {
        let store = test_store().await;
        let email = fresh_email("roundtrip");

        let ack = register(&store, account(&email, "p", "A")).await.unwrap();
        assert!(ack.acknowledged);

        let summary = login(
            &store,
            &LoginRequest {
                email: email.clone(),
                password: "p".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(summary.email, email);
        assert_eq!(summary.name.as_deref(), Some("A"));
        assert_eq!(summary.id, ack.inserted_id);

        // lastLogin is stamped once the login succeeds
        let id = ObjectId::parse_str(&ack.inserted_id).unwrap();
        let stored = store.find_by_ids(&[id]).await.unwrap();
        assert!(stored[0].last_login.is_some());
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn wrong_password_and_unknown_email_are_indistinguishable() {
        let store = test_store().await;
        let email = fresh_email("creds");

        register(&store, account(&email, "p", "A")).await.unwrap();

        let wrong = login(
            &store,
            &LoginRequest {
                email: email.clone(),
                password: "wrong".to_string(),
            },
        )
        .await;
        assert!(matches!(wrong, Err(AppError::InvalidCredentials)));

        let unknown = login(
            &store,
            &LoginRequest {
                email: fresh_email("never-registered"),
                password: "p".to_string(),
            },
        )
        .await;
        assert!(matches!(unknown, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn duplicate_email_is_rejected() {
        let store = test_store().await;
        let email = fresh_email("dup");

        register(&store, account(&email, "p", "A")).await.unwrap();

        let second = register(&store, account(&email, "q", "B")).await;
        assert!(matches!(second, Err(AppError::DuplicateEmail)));

        let all = list_accounts(&store).await.unwrap();
        assert_eq!(all.iter().filter(|a| a.email == email).count(), 1);
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn block_unblock_delete_lifecycle() {
        let store = test_store().await;
        let email = fresh_email("lifecycle");

        let ack = register(&store, account(&email, "p", "A")).await.unwrap();
        let ids = vec![ack.inserted_id.clone()];
        let oid = ObjectId::parse_str(&ack.inserted_id).unwrap();

        let blocked = set_status(&store, &ids, AccountStatus::Blocked).await.unwrap();
        assert_eq!(blocked.matched_count, 1);
        assert_eq!(blocked.modified_count, 1);

        // A blocked login fails without stamping lastLogin
        let login_blocked = login(
            &store,
            &LoginRequest {
                email: email.clone(),
                password: "p".to_string(),
            },
        )
        .await;
        assert!(matches!(login_blocked, Err(AppError::AccountBlocked)));

        let stored = store.find_by_ids(&[oid]).await.unwrap();
        assert!(stored[0].is_blocked());
        assert!(stored[0].last_login.is_none());

        // Unblocking restores normal login
        set_status(&store, &ids, AccountStatus::Active).await.unwrap();
        login(
            &store,
            &LoginRequest {
                email: email.clone(),
                password: "p".to_string(),
            },
        )
        .await
        .unwrap();

        // Delete removes exactly the matching account and is idempotent
        let deleted = delete_accounts(&store, &ids).await.unwrap();
        assert_eq!(deleted.deleted_count, 1);

        let all = list_accounts(&store).await.unwrap();
        assert!(all.iter().all(|a| a.email != email));

        let again = delete_accounts(&store, &ids).await.unwrap();
        assert_eq!(again.deleted_count, 0);
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn unmatched_ids_are_silently_ignored() {
        let store = test_store().await;

        let phantom = vec![ObjectId::new().to_hex()];
        let result = set_status(&store, &phantom, AccountStatus::Blocked).await.unwrap();
        assert_eq!(result.matched_count, 0);
        assert_eq!(result.modified_count, 0);
    }
}
