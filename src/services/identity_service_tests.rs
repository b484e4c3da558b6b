#[cfg(test)]
mod tests {
    use super::super::IdentityService;
    use crate::errors::internal::{CredentialError, InternalError, ValidationError};
    use crate::test::utils::{
        create_account, new_account, new_owner, setup_test_app_data_over, setup_test_db, setup_test_services,
        test_ctx, TEST_PASSWORD,
    };
    use sea_orm::ConnectionTrait;
    use std::sync::Arc;
    use crate::types::internal::{BusinessDocument, CustomerStatus, OwnerStatus, Role};

    fn pdf(name: &str) -> BusinessDocument {
        BusinessDocument {
            file_name: Some(name.to_string()),
            bytes: b"%PDF-1.7 business registration".to_vec(),
        }
    }

    fn expect_credential_error<T: std::fmt::Debug>(result: Result<T, InternalError>) -> CredentialError {
        match result {
            Err(InternalError::Credential(err)) => err,
            other => panic!("Expected credential error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_customer_forces_active() {
        let (_app, identity, _res, _dir) = setup_test_services().await;

        let customer = identity
            .register_customer(&test_ctx(), new_account("cust@example.com", Some("01012340001")))
            .await
            .unwrap();

        assert_eq!(customer.role, "CUSTOMER");
        assert_eq!(customer.customer_status, "ACTIVE");
        assert_ne!(customer.password_hash, TEST_PASSWORD);
        assert_eq!(customer.nickname.as_deref(), Some("seoyeon"));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected_for_any_role() {
        let (_app, identity, _res, _dir) = setup_test_services().await;
        create_account(&identity, Role::Customer, "taken@example.com", "01012340002").await;

        let err = expect_credential_error(
            identity
                .register_admin(&test_ctx(), new_account("taken@example.com", None))
                .await,
        );

        match err {
            CredentialError::DuplicateIdentity { field, value } => {
                assert_eq!(field, "email");
                assert_eq!(value, "taken@example.com");
            }
            other => panic!("Expected DuplicateIdentity, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_duplicate_phone_is_rejected() {
        let (_app, identity, _res, _dir) = setup_test_services().await;
        create_account(&identity, Role::Customer, "first@example.com", "01012340003").await;

        let err = expect_credential_error(
            identity
                .register_customer(&test_ctx(), new_account("second@example.com", Some("01012340003")))
                .await,
        );

        assert!(matches!(err, CredentialError::DuplicateIdentity { ref field, .. } if field == "phone"));
    }

    #[tokio::test]
    async fn test_signup_validation_runs_before_store() {
        let (_app, identity, _res, _dir) = setup_test_services().await;
        let mut account = new_account("weak@example.com", Some("01012340004"));
        account.password = "weakpass".to_string();

        match identity.register_customer(&test_ctx(), account).await {
            Err(InternalError::Validation(ValidationError::InvalidField { field, .. })) => {
                assert_eq!(field, "password");
            }
            other => panic!("Expected InvalidField, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_owner_uploads_document_and_starts_pending() {
        let (_app, identity, _res, dir) = setup_test_services().await;

        let owner = identity
            .register_owner(&test_ctx(), new_owner("owner@example.com", "01012340005"), pdf("License.PDF"))
            .await
            .unwrap();

        assert_eq!(owner.role, "OWNER");
        assert_eq!(owner.owner_status, "PENDING");
        assert_eq!(owner.store_name.as_deref(), Some("Choplan Bistro"));

        let url = owner.business_registration_doc.expect("document url");
        assert!(url.starts_with("http://localhost:3000/files/business-docs/"));
        assert!(url.ends_with("-License.PDF"));

        let key = url.trim_start_matches("http://localhost:3000/files/");
        assert!(dir.path().join(key).exists());
    }

    #[tokio::test]
    async fn test_register_owner_rejects_non_pdf_and_empty_documents() {
        let (_app, identity, _res, _dir) = setup_test_services().await;

        let err = expect_credential_error(
            identity
                .register_owner(&test_ctx(), new_owner("o1@example.com", "01012340006"), pdf("license.png"))
                .await,
        );
        assert!(matches!(err, CredentialError::InvalidDocument(_)));

        let empty = BusinessDocument {
            file_name: Some("license.pdf".to_string()),
            bytes: Vec::new(),
        };
        let err = expect_credential_error(
            identity
                .register_owner(&test_ctx(), new_owner("o2@example.com", "01012340007"), empty)
                .await,
        );
        assert!(matches!(err, CredentialError::InvalidDocument(_)));
    }

    #[tokio::test]
    async fn test_register_owner_rejects_document_without_file_name() {
        let (_app, identity, _res, dir) = setup_test_services().await;

        let unnamed = BusinessDocument {
            file_name: None,
            bytes: b"MZ this is an exe".to_vec(),
        };
        let err = expect_credential_error(
            identity
                .register_owner(&test_ctx(), new_owner("o3@example.com", "01012340008"), unnamed)
                .await,
        );
        assert!(matches!(err, CredentialError::InvalidDocument(_)));

        assert!(!dir.path().join("business-docs").exists());
        assert!(identity.list_by_role_and_status(Role::Owner, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_owner_insert_removes_uploaded_document() {
        let db = setup_test_db().await;
        db.execute_unprepared(
            "CREATE TRIGGER block_owner_insert BEFORE INSERT ON users WHEN NEW.role = 'OWNER' \
             BEGIN SELECT RAISE(ABORT, 'owner inserts disabled'); END;",
        )
        .await
        .unwrap();
        let (app, dir) = setup_test_app_data_over(db);
        let identity = Arc::new(IdentityService::new(app));

        let result = identity
            .register_owner(&test_ctx(), new_owner("o4@example.com", "01012340009"), pdf("license.pdf"))
            .await;
        assert!(result.is_err());

        let docs = dir.path().join("business-docs");
        let leftover = match std::fs::read_dir(&docs) {
            Ok(entries) => entries.count(),
            Err(_) => 0,
        };
        assert_eq!(leftover, 0, "upload should be removed when the insert fails");
    }

    #[tokio::test]
    async fn test_login_round_trip_token_subject_is_email() {
        let (_app, identity, _res, _dir) = setup_test_services().await;
        create_account(&identity, Role::Customer, "login@example.com", "01012340008").await;

        let session = identity
            .login(&test_ctx(), "login@example.com", TEST_PASSWORD, Role::Customer)
            .await
            .unwrap();

        let tokens = identity.token_service();
        assert!(tokens.validate(&session.token));
        assert_eq!(tokens.extract_subject(&session.token).unwrap(), "login@example.com");
        assert_eq!(tokens.claims(&session.token).unwrap().role, "CUSTOMER");
        assert_eq!(session.user.email, "login@example.com");
    }

    #[tokio::test]
    async fn test_login_unknown_email_and_bad_password() {
        let (_app, identity, _res, _dir) = setup_test_services().await;
        create_account(&identity, Role::Admin, "admin@example.com", "01012340009").await;

        let err = expect_credential_error(identity.login(&test_ctx(), "nobody@example.com", TEST_PASSWORD, Role::Admin).await);
        assert!(matches!(err, CredentialError::UserNotFound(_)));

        let err = expect_credential_error(identity.login(&test_ctx(), "admin@example.com", "Wrong12345", Role::Admin).await);
        assert!(matches!(err, CredentialError::BadCredential));
    }

    #[tokio::test]
    async fn test_login_through_another_roles_endpoint_is_refused() {
        let (_app, identity, _res, _dir) = setup_test_services().await;
        create_account(&identity, Role::Customer, "cust2@example.com", "01012340010").await;

        let err = expect_credential_error(identity.login(&test_ctx(), "cust2@example.com", TEST_PASSWORD, Role::Admin).await);

        assert!(matches!(err, CredentialError::WrongRole { .. }));
    }

    #[tokio::test]
    async fn test_customer_login_requires_active() {
        let (_app, identity, _res, _dir) = setup_test_services().await;
        let customer = create_account(&identity, Role::Customer, "susp@example.com", "01012340011").await;
        identity
            .set_customer_status(&test_ctx(), customer.id, CustomerStatus::Suspended)
            .await
            .unwrap();

        let err = expect_credential_error(identity.login(&test_ctx(), "susp@example.com", TEST_PASSWORD, Role::Customer).await);

        match err {
            CredentialError::AccountNotActive { status } => assert_eq!(status, "SUSPENDED"),
            other => panic!("Expected AccountNotActive, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_owner_login_requires_approval() {
        let (_app, identity, _res, _dir) = setup_test_services().await;
        let owner = create_account(&identity, Role::Owner, "pending@example.com", "01012340012").await;

        let err = expect_credential_error(identity.login(&test_ctx(), "pending@example.com", TEST_PASSWORD, Role::Owner).await);
        assert!(matches!(err, CredentialError::AccountNotApproved { ref status } if status == "PENDING"));

        identity.approve_owner(&test_ctx(), owner.id).await.unwrap();
        let session = identity
            .login(&test_ctx(), "pending@example.com", TEST_PASSWORD, Role::Owner)
            .await
            .unwrap();
        assert!(!session.token.is_empty());
    }

    #[tokio::test]
    async fn test_admin_login_is_never_status_gated() {
        let (_app, identity, _res, _dir) = setup_test_services().await;
        create_account(&identity, Role::Admin, "root@example.com", "01012340013").await;

        assert!(identity
            .login(&test_ctx(), "root@example.com", TEST_PASSWORD, Role::Admin)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_approve_owner_is_idempotent() {
        let (_app, identity, _res, _dir) = setup_test_services().await;
        let owner = create_account(&identity, Role::Owner, "twice@example.com", "01012340014").await;

        let first = identity.approve_owner(&test_ctx(), owner.id).await.unwrap();
        let second = identity.approve_owner(&test_ctx(), owner.id).await.unwrap();

        assert_eq!(first.owner_status, "APPROVED");
        assert_eq!(second.owner_status, "APPROVED");
    }

    #[tokio::test]
    async fn test_approve_owner_checks_existence_and_role() {
        let (_app, identity, _res, _dir) = setup_test_services().await;
        let customer = create_account(&identity, Role::Customer, "notowner@example.com", "01012340015").await;

        let err = expect_credential_error(identity.approve_owner(&test_ctx(), 9999).await);
        assert!(matches!(err, CredentialError::UserNotFound(_)));

        let err = expect_credential_error(identity.approve_owner(&test_ctx(), customer.id).await);
        assert!(matches!(err, CredentialError::WrongRole { .. }));
    }

    #[tokio::test]
    async fn test_set_owner_status_is_unchecked_overwrite() {
        let (_app, identity, _res, _dir) = setup_test_services().await;
        let owner = create_account(&identity, Role::Owner, "flip@example.com", "01012340016").await;

        let rejected = identity
            .set_owner_status(&test_ctx(), owner.id, OwnerStatus::Rejected)
            .await
            .unwrap();
        assert_eq!(rejected.owner_status, "REJECTED");

        // REJECTED -> PENDING has no guard
        let pending = identity
            .set_owner_status(&test_ctx(), owner.id, OwnerStatus::Pending)
            .await
            .unwrap();
        assert_eq!(pending.owner_status, "PENDING");
    }

    #[tokio::test]
    async fn test_list_by_role_and_status() {
        let (_app, identity, _res, _dir) = setup_test_services().await;
        let first = create_account(&identity, Role::Owner, "lo1@example.com", "01012340017").await;
        let second = create_account(&identity, Role::Owner, "lo2@example.com", "01012340018").await;
        create_account(&identity, Role::Customer, "lc1@example.com", "01012340019").await;
        identity.approve_owner(&test_ctx(), second.id).await.unwrap();

        let owners = identity.list_by_role_and_status(Role::Owner, None).await.unwrap();
        assert_eq!(owners.iter().map(|u| u.id).collect::<Vec<_>>(), vec![first.id, second.id]);

        let approved = identity
            .list_by_role_and_status(Role::Owner, Some("approved"))
            .await
            .unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id, second.id);

        match identity.list_by_role_and_status(Role::Customer, Some("APPROVED")).await {
            Err(InternalError::Validation(ValidationError::InvalidStatusName { .. })) => {}
            other => panic!("Expected InvalidStatusName, got {:?}", other),
        }
    }

    #[test]
    fn test_identity_service_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<IdentityService>();
    }
}
