//! In-memory integration tests for the session record.

use std::sync::Arc;

use corpflow::board::{
    adapters::memory::InMemoryKeyValueStore,
    config::StorageKeys,
    domain::Role,
    ports::KeyValueStore,
    services::{Session, SessionError, SessionService},
};
use eyre::{bail, ensure};

type Sessions = SessionService<InMemoryKeyValueStore>;

fn service(records: &[(&str, &str)]) -> (Arc<InMemoryKeyValueStore>, Sessions) {
    let store = Arc::new(InMemoryKeyValueStore::with_records(records.iter().copied()));
    let sessions = SessionService::new(Arc::clone(&store), &StorageKeys::default());
    (store, sessions)
}

#[tokio::test(flavor = "multi_thread")]
async fn reads_signed_in_manager() -> Result<(), eyre::Report> {
    let (_, sessions) = service(&[(
        "userLogado",
        r#"{"name": "Ana Gerente", "username": "ana", "role": "gerente"}"#,
    )]);

    let session = sessions.current().await?;

    ensure!(session == Session::new("Ana Gerente", "ana", Role::Manager));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn role_labels_are_read_case_insensitively() -> Result<(), eyre::Report> {
    let (_, sessions) = service(&[(
        "userLogado",
        r#"{"name": "Rui", "username": "rui", "role": "Funcionário"}"#,
    )]);

    ensure!(sessions.current().await?.role == Role::Employee);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_record_means_not_signed_in() -> Result<(), eyre::Report> {
    let (_, sessions) = service(&[]);

    let Err(SessionError::NotSignedIn) = sessions.current().await else {
        bail!("expected NotSignedIn");
    };
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_role_is_malformed() -> Result<(), eyre::Report> {
    let (_, sessions) = service(&[(
        "userLogado",
        r#"{"name": "Rui", "username": "rui", "role": "estagiario"}"#,
    )]);

    let Err(SessionError::Malformed(_)) = sessions.current().await else {
        bail!("expected Malformed");
    };
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn sign_out_clears_the_record() -> Result<(), eyre::Report> {
    let (store, sessions) = service(&[(
        "userLogado",
        r#"{"name": "Rui", "username": "rui", "role": "funcionario"}"#,
    )]);
    ensure!(sessions.current().await?.role == Role::Employee);

    sessions.sign_out().await?;

    ensure!(store.get("userLogado").await?.is_none());
    let Err(SessionError::NotSignedIn) = sessions.current().await else {
        bail!("expected NotSignedIn after sign out");
    };
    Ok(())
}
