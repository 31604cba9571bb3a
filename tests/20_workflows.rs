mod common;

use std::sync::Arc;

use anyhow::Result;
use mxadmin::admin::DEFAULT_SHUTDOWN_MESSAGE;
use mxadmin::events::{EventLevel, MemorySink};
use mxadmin::{AdminApi, AdminSession, MatrixSession, ReqwestTransport};

fn admin(hs: &common::MockHomeserver) -> (AdminSession<ReqwestTransport>, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let session = MatrixSession::from_token(&hs.base_url, "@admin:matrix.org", "tok");
    (AdminSession::new(session, AdminApi::default(), sink.clone()), sink)
}

#[tokio::test]
async fn deactivate_user_sends_bearer_post() -> Result<()> {
    let hs = common::MockHomeserver::start().await?;
    let (admin, sink) = admin(&hs);

    admin.deactivate_user("@bad:matrix.org", "spam").await?;

    let recorded = hs.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].method, "POST");
    assert_eq!(recorded[0].path, "/_matrix/client/r0/admin/deactivate/%40bad%3Amatrix.org");
    assert_eq!(recorded[0].authorization.as_deref(), Some("Bearer tok"));

    let infos = sink.at_level(EventLevel::Info);
    assert_eq!(infos.len(), 1);
    assert!(infos[0].message.contains("SUCCESS"));
    Ok(())
}

#[tokio::test]
async fn alias_calls_use_query_token() -> Result<()> {
    let hs = common::MockHomeserver::start().await?;
    hs.respond(
        "GET",
        "/_matrix/client/r0/directory/room/%23spam%3Amatrix.org",
        200,
        r#"{"room_id":"!abc:matrix.org"}"#,
    );
    let (admin, sink) = admin(&hs);

    let report = admin.delete_alias("#spam:matrix.org", "spam").await?;
    assert_eq!(report.room_id.as_deref(), Some("!abc:matrix.org"));

    let lookups = hs.calls("GET", "/_matrix/client/r0/directory/room/%23spam%3Amatrix.org");
    assert_eq!(lookups.len(), 1);
    assert_eq!(lookups[0].query, None);
    assert_eq!(lookups[0].authorization, None);

    let deletes = hs.calls("DELETE", "/_matrix/client/r0/directory/room/%23spam%3Amatrix.org");
    assert_eq!(deletes.len(), 1);
    assert_eq!(deletes[0].query.as_deref(), Some("access_token=tok"));

    let line = &sink.at_level(EventLevel::Info)[0].message;
    assert!(line.contains("#spam:matrix.org") && line.contains("!abc:matrix.org"));
    Ok(())
}

#[tokio::test]
async fn rejected_alias_assignment_logs_body() -> Result<()> {
    let hs = common::MockHomeserver::start().await?;
    hs.respond(
        "PUT",
        "/_matrix/client/r0/directory/room/%23new%3Amatrix.org",
        400,
        r#"{"error":"M_INVALID"}"#,
    );
    let (admin, sink) = admin(&hs);

    let report = admin.assign_alias("!room:matrix.org", "#new:matrix.org", "rename").await?;

    assert!(!report.succeeded());
    let put = &hs.calls("PUT", "/_matrix/client/r0/directory/room/%23new%3Amatrix.org")[0];
    assert_eq!(put.json()["room_id"], "!room:matrix.org");

    let errors = sink.at_level(EventLevel::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, r#"{"error":"M_INVALID"}"#);
    Ok(())
}

#[tokio::test]
async fn shutdown_then_quarantine_regardless_of_outcome() -> Result<()> {
    let hs = common::MockHomeserver::start().await?;
    hs.respond(
        "POST",
        "/_matrix/client/r0/admin/shutdown_room/%21abc%3Amatrix.org",
        500,
        r#"{"errcode":"M_UNKNOWN"}"#,
    );
    hs.respond(
        "POST",
        "/_matrix/client/r0/admin/quarantine_media/%21abc%3Amatrix.org",
        200,
        r#"{"num_quarantined":12}"#,
    );
    let (admin, sink) = admin(&hs);

    let report = admin
        .shutdown_room_and_quarantine_media("!abc:matrix.org", "terms of use", None, None)
        .await?;

    let shutdown = &hs.calls("POST", "/_matrix/client/r0/admin/shutdown_room/%21abc%3Amatrix.org")[0];
    let body = shutdown.json();
    assert_eq!(body["message"], DEFAULT_SHUTDOWN_MESSAGE);
    assert_eq!(body["room_name"], "Room unavailable");
    assert_eq!(body["new_room_user_id"], "@admin:matrix.org");
    assert_eq!(shutdown.query.as_deref(), Some("access_token=tok"));

    assert_eq!(
        hs.calls("POST", "/_matrix/client/r0/admin/quarantine_media/%21abc%3Amatrix.org").len(),
        1
    );
    assert_eq!(report.num_quarantined, Some(12));
    assert!(sink.at_level(EventLevel::Info)[1].message.contains("quarantining 12 items: SUCCESS"));
    Ok(())
}

#[tokio::test]
async fn delist_room_sends_bearer_delete() -> Result<()> {
    let hs = common::MockHomeserver::start().await?;
    let (admin, _sink) = admin(&hs);

    admin.delist_room("!abc:matrix.org", "spam").await?;

    let calls = hs.calls("DELETE", "/_matrix/client/r0/directory/list/room/%21abc%3Amatrix.org");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].authorization.as_deref(), Some("Bearer tok"));
    Ok(())
}
