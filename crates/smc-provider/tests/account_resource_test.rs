use resource_framework::mock::MockTransport;
use resource_framework::{CancellationToken, Method, Operation};
use serde_json::{json, Value};
use smc_provider::account_resource::{
    AccountError, AccountResource, ErrorKind, Failure, LifecycleState, ManagedAccount,
};
use smc_provider::lifecycle::SmcProvider;
use smc_provider::model::{Account, AccountKind};
use std::time::Duration;

const UUID: &str = "75532250-c878-42f1-8871-bafa68e944d4";
const HASH: &str = "$2a$10$HM7zy3pUuoyKwnaFk4A4W.9gLQZ3BGWeJqwdlPiOJN6TayLbSQ1Na";

fn account_json() -> Value {
    json!({
        "uuid": UUID,
        "identifier": "jdoe",
        "kind": "user",
        "folders": ["folder-uuid"],
        "permissions": ["smc"],
        "localAuth": true,
        "name": "Some Account name",
        "description": "some user description",
        "dn": "CN=bob,DC=company,DC=world",
        "email": "user@email.com"
    })
}

fn envelope(result: Value) -> Value {
    json!({ "result": result, "success": true })
}

fn desired() -> Account {
    Account {
        name: Some("Some Account name".into()),
        description: Some("some user description".into()),
        dn: Some("CN=bob,DC=company,DC=world".into()),
        email: Some("user@email.com".into()),
        local_auth: Some(true),
        folders: Some(vec!["folder-uuid".into()]),
        permissions: Some(vec!["smc".into()]),
        password: Some(HASH.into()),
        ..Account::new("jdoe", AccountKind::User)
    }
}

fn setup() -> (MockTransport, AccountResource) {
    let mock = MockTransport::new();
    let provider = SmcProvider::with_transport(mock.transport());
    (mock, provider.accounts)
}

#[tokio::test]
async fn test_create_projects_result_and_keeps_password() {
    let (mock, accounts) = setup();
    mock.expect(Method::Post, "/accounts")
        .respond_json(201, envelope(account_json()));

    let created = accounts
        .create(&desired(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(created.uuid.as_deref(), Some(UUID));
    assert_eq!(created.identifier.as_deref(), Some("jdoe"));
    assert_eq!(created.kind.as_deref(), Some("user"));
    assert_eq!(created.folders, Some(vec!["folder-uuid".to_string()]));
    assert_eq!(created.permissions, Some(vec!["smc".to_string()]));
    assert_eq!(created.local_auth, Some(true));
    assert_eq!(created.name.as_deref(), Some("Some Account name"));
    assert_eq!(created.description.as_deref(), Some("some user description"));
    assert_eq!(created.dn.as_deref(), Some("CN=bob,DC=company,DC=world"));
    assert_eq!(created.email.as_deref(), Some("user@email.com"));
    assert_eq!(created.password.as_deref(), Some(HASH));
    assert!(created.last_updated.is_some());

    // The request carried the password but no identity.
    let requests = mock.requests();
    let body = requests[0].body.as_ref().unwrap();
    assert_eq!(body["password"], json!(HASH));
    assert!(body.get("uuid").is_none());
    mock.verify();
}

#[tokio::test]
async fn test_create_requires_created_status_and_result() {
    let (mock, accounts) = setup();
    mock.expect(Method::Post, "/accounts")
        .respond_json(200, envelope(account_json()));
    mock.expect(Method::Post, "/accounts")
        .respond_json(201, json!({ "result": null, "success": true }));

    let cancel = CancellationToken::new();
    let wrong_status = accounts.create(&desired(), &cancel).await.unwrap_err();
    assert_eq!(
        wrong_status,
        AccountError::Create {
            id: Some("jdoe".into()),
            cause: Failure::Status(200)
        }
    );
    assert_eq!(wrong_status.diagnostic().id.as_deref(), Some("jdoe"));

    let no_result = accounts.create(&desired(), &cancel).await.unwrap_err();
    assert_eq!(no_result.kind(), ErrorKind::Create);
    assert_eq!(
        no_result.diagnostic().summary,
        "No results Reading response after creating the SMC Account"
    );
}

#[tokio::test]
async fn test_create_failure_leaves_instance_absent() {
    let (mock, accounts) = setup();
    mock.expect(Method::Post, "/accounts").respond_status(500);

    let mut instance = ManagedAccount::new(desired());
    let err = instance
        .create(&accounts, &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(instance.state(), LifecycleState::Absent);
    assert_eq!(instance.record(), &desired());
    assert!(instance.record().uuid.is_none());
    assert!(instance.record().last_updated.is_none());
}

#[tokio::test]
async fn test_create_without_identity_taints_instance() {
    let (mock, accounts) = setup();
    let mut without_uuid = account_json();
    without_uuid.as_object_mut().unwrap().remove("uuid");
    mock.expect(Method::Post, "/accounts")
        .respond_json(201, envelope(without_uuid));
    mock.expect(Method::Post, "/accounts")
        .respond_json(201, envelope(account_json()));

    let cancel = CancellationToken::new();
    let mut instance = ManagedAccount::new(desired());

    let err = instance.create(&accounts, &cancel).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Mapping);
    assert_eq!(instance.state(), LifecycleState::Tainted);

    instance.create(&accounts, &cancel).await.unwrap();
    assert_eq!(instance.state(), LifecycleState::Present);
    assert_eq!(instance.record().uuid.as_deref(), Some(UUID));
}

#[tokio::test]
async fn test_unknown_kind_is_rejected_before_any_request() {
    let (mock, accounts) = setup();
    let invalid = Account {
        kind: Some("admin".into()),
        ..desired()
    };

    let err = accounts
        .create(&invalid, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, AccountError::Validation { field: "kind", .. }));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_update_404_leaves_planned_record_untouched() {
    let (mock, accounts) = setup();
    mock.expect(Method::Put, &format!("/accounts/{UUID}"))
        .respond_status(404);

    let planned = Account {
        uuid: Some(UUID.into()),
        name: Some("Renamed".into()),
        ..desired()
    };
    let snapshot = planned.clone();

    let err = accounts
        .update(&planned, &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        AccountError::Update {
            id: Some(UUID.into()),
            cause: Failure::Status(404)
        }
    );
    assert_eq!(planned, snapshot);
    assert_eq!(planned.last_updated, snapshot.last_updated);
    assert_eq!(err.diagnostic().summary, "HTTP Error Updating the SMC Account");
}

#[tokio::test]
async fn test_update_reprojects_and_restamps() {
    let (mock, accounts) = setup();
    let mut renamed = account_json();
    renamed["name"] = json!("Renamed");
    mock.expect(Method::Put, &format!("/accounts/{UUID}"))
        .respond_json(200, envelope(renamed));

    let planned = Account {
        uuid: Some(UUID.into()),
        name: Some("Renamed".into()),
        last_updated: Some("2000-01-01T00:00:00Z".into()),
        ..desired()
    };
    let updated = accounts
        .update(&planned, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(updated.name.as_deref(), Some("Renamed"));
    assert_eq!(updated.password.as_deref(), Some(HASH));
    assert_ne!(updated.last_updated, planned.last_updated);

    let sent = mock.requests()[0].body.clone().unwrap();
    assert_eq!(sent["name"], json!("Renamed"));
}

#[tokio::test]
async fn test_update_rejects_changed_identity() {
    let (mock, accounts) = setup();
    let mut other = account_json();
    other["uuid"] = json!("00000000-0000-0000-0000-000000000000");
    mock.expect(Method::Put, &format!("/accounts/{UUID}"))
        .respond_json(200, envelope(other));

    let planned = Account {
        uuid: Some(UUID.into()),
        ..desired()
    };
    let err = accounts
        .update(&planned, &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Mapping);
    assert_eq!(err.id(), Some(UUID));
}

#[tokio::test]
async fn test_update_without_uuid_sends_nothing() {
    let (mock, accounts) = setup();
    let err = accounts
        .update(&desired(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, AccountError::Validation { field: "uuid", .. }));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_read_twice_is_idempotent() {
    let (mock, accounts) = setup();
    let path = format!("/accounts/{UUID}");
    mock.expect(Method::Get, &path).respond_json(200, account_json());
    mock.expect(Method::Get, &path).respond_json(200, account_json());

    let cancel = CancellationToken::new();
    let prior = Account {
        uuid: Some(UUID.into()),
        password: Some(HASH.into()),
        last_updated: Some("2024-05-01T10:00:00Z".into()),
        ..Default::default()
    };

    let first = accounts.read(&prior, &cancel).await.unwrap();
    let second = accounts.read(&first, &cancel).await.unwrap();

    assert_eq!(first, second);
    assert!(first.drift(&second).is_empty());
    assert_eq!(first.password.as_deref(), Some(HASH));
    assert_eq!(second.last_updated, prior.last_updated);
    mock.verify();
}

#[tokio::test]
async fn test_read_reflects_remote_drift() {
    let (mock, accounts) = setup();
    let mut drifted = account_json();
    drifted["email"] = json!("new@email.com");
    drifted.as_object_mut().unwrap().remove("folders");
    mock.expect(Method::Get, &format!("/accounts/{UUID}"))
        .respond_json(200, drifted);

    let prior = Account {
        uuid: Some(UUID.into()),
        ..desired()
    };
    let current = accounts
        .read(&prior, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(current.drift(&prior), vec!["email", "folders"]);
    assert_eq!(current.folders, None);
}

#[tokio::test]
async fn test_read_null_body_reports_vanished() {
    let (mock, accounts) = setup();
    mock.expect(Method::Get, &format!("/accounts/{UUID}"))
        .respond_null(200);

    let err = accounts
        .read(&AccountResource::import(UUID), &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err, AccountError::Vanished { uuid: UUID.into() });
    assert_eq!(err.kind(), ErrorKind::Read);
}

#[tokio::test]
async fn test_read_non_200_is_read_error_with_identifier() {
    let (mock, accounts) = setup();
    mock.expect(Method::Get, &format!("/accounts/{UUID}"))
        .respond_status(403);

    let err = accounts
        .read(&AccountResource::import(UUID), &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Read);
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.id(), Some(UUID));
}

#[tokio::test]
async fn test_import_then_read_completes_the_record() {
    let (mock, accounts) = setup();
    mock.expect(Method::Get, &format!("/accounts/{UUID}"))
        .respond_json(200, account_json());

    let mut instance = ManagedAccount::imported(UUID);
    assert_eq!(instance.state(), LifecycleState::Planned);
    assert_eq!(instance.record().identifier, None);

    instance
        .read(&accounts, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(instance.state(), LifecycleState::Present);
    assert_eq!(instance.record().identifier.as_deref(), Some("jdoe"));
    assert_eq!(instance.record().password, None);
}

#[tokio::test]
async fn test_delete_voids_record() {
    let (mock, accounts) = setup();
    mock.expect(Method::Post, "/accounts")
        .respond_json(201, envelope(account_json()));
    mock.expect(Method::Delete, &format!("/accounts/{UUID}"))
        .respond_json(200, envelope(account_json()));

    let cancel = CancellationToken::new();
    let mut instance = ManagedAccount::new(desired());
    instance.create(&accounts, &cancel).await.unwrap();
    instance.delete(&accounts, &cancel).await.unwrap();

    assert_eq!(instance.state(), LifecycleState::Absent);
    assert_eq!(instance.record(), &Account::default());
    mock.verify();
}

#[tokio::test]
async fn test_delete_failures_keep_instance_present() {
    let (mock, accounts) = setup();
    let path = format!("/accounts/{UUID}");
    mock.expect(Method::Get, &path).respond_json(200, account_json());
    mock.expect(Method::Delete, &path).respond_status(500);
    mock.expect(Method::Delete, &path)
        .respond_json(200, json!({ "result": null, "success": true }));
    mock.expect(Method::Delete, &path).fail("connection reset");

    let cancel = CancellationToken::new();
    let mut instance = ManagedAccount::imported(UUID);
    instance.read(&accounts, &cancel).await.unwrap();
    let before = instance.record().clone();

    let status = instance.delete(&accounts, &cancel).await.unwrap_err();
    assert_eq!(status.diagnostic().summary, "HTTP Error Deleting the SMC Account");

    let no_result = instance.delete(&accounts, &cancel).await.unwrap_err();
    assert_eq!(
        no_result,
        AccountError::Delete {
            id: Some(UUID.into()),
            cause: Failure::NoResult
        }
    );

    let transport = instance.delete(&accounts, &cancel).await.unwrap_err();
    assert!(matches!(
        transport,
        AccountError::Delete {
            cause: Failure::Transport(_),
            ..
        }
    ));

    assert_eq!(instance.state(), LifecycleState::Present);
    assert_eq!(instance.record(), &before);
}

#[tokio::test]
async fn test_invalid_transitions_send_nothing() {
    let (mock, accounts) = setup();
    let cancel = CancellationToken::new();

    let mut absent = ManagedAccount::new(desired());
    let err = absent.read(&accounts, &cancel).await.unwrap_err();
    assert_eq!(
        err,
        AccountError::InvalidTransition {
            operation: Operation::Read,
            state: LifecycleState::Absent
        }
    );
    assert!(absent.delete(&accounts, &cancel).await.is_err());
    assert!(absent.update(&accounts, desired(), &cancel).await.is_err());

    let mut planned = ManagedAccount::imported(UUID);
    let err = planned.create(&accounts, &cancel).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidTransition);

    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_managed_update_fills_uuid_from_current_record() {
    let (mock, accounts) = setup();
    let path = format!("/accounts/{UUID}");
    mock.expect(Method::Get, &path).respond_json(200, account_json());
    let mut renamed = account_json();
    renamed["name"] = json!("Renamed");
    mock.expect(Method::Put, &path).respond_json(200, envelope(renamed));

    let cancel = CancellationToken::new();
    let mut instance = ManagedAccount::imported(UUID);
    instance.read(&accounts, &cancel).await.unwrap();

    let change = Account {
        name: Some("Renamed".into()),
        ..desired()
    };
    instance.update(&accounts, change, &cancel).await.unwrap();

    assert_eq!(instance.state(), LifecycleState::Present);
    assert_eq!(instance.record().name.as_deref(), Some("Renamed"));
    assert_eq!(instance.record().uuid.as_deref(), Some(UUID));
    mock.verify();
}

#[tokio::test]
async fn test_managed_update_refuses_to_change_uuid() {
    let (mock, accounts) = setup();
    mock.expect(Method::Get, "/accounts/u-1")
        .respond_json(200, json!({ "uuid": "u-1", "identifier": "jdoe", "kind": "user" }));

    let cancel = CancellationToken::new();
    let mut instance = ManagedAccount::imported("u-1");
    instance.read(&accounts, &cancel).await.unwrap();
    let before = instance.record().clone();

    let err = instance
        .update(&accounts, Account::with_uuid("u-2"), &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, AccountError::Validation { field: "uuid", .. }));
    assert_eq!(instance.state(), LifecycleState::Present);
    assert_eq!(instance.record(), &before);
    assert_eq!(instance.record().uuid.as_deref(), Some("u-1"));
    // Only the read reached the API.
    assert_eq!(mock.request_count(), 1);
    mock.verify();
}

#[tokio::test]
async fn test_cancelled_token_short_circuits() {
    let (mock, accounts) = setup();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = accounts.create(&desired(), &cancel).await.unwrap_err();

    assert_eq!(
        err,
        AccountError::Cancelled {
            operation: Operation::Create,
            id: Some("jdoe".into())
        }
    );
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_cancel_during_request_leaves_record_unchanged() {
    let (mock, accounts) = setup();
    mock.expect(Method::Put, &format!("/accounts/{UUID}")).hang();

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let planned = Account {
        uuid: Some(UUID.into()),
        ..desired()
    };
    let snapshot = planned.clone();

    let err = accounts.update(&planned, &cancel).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert_eq!(err.id(), Some(UUID));
    assert_eq!(planned, snapshot);
    assert_eq!(mock.request_count(), 1);
    mock.verify();
}
