// Integration tests for the ticket workflow through the public coordinators

mod common;

use common::{bootstrap_and_login, register_and_login, setup_app, PASSWORD};
use ticketdesk_backend::config::AppEnvironment;
use ticketdesk_backend::coordinators::{
    AssignmentCoordinator, AuthCoordinator, CommentCoordinator, CreateTicketInput, TicketCoordinator,
};
use ticketdesk_backend::errors::internal::{CredentialError, TicketError};
use ticketdesk_backend::errors::InternalError;
use ticketdesk_backend::stores::TicketChanges;
use ticketdesk_backend::types::internal::{DenyReason, RequestId};

fn new_ticket(title: &str, assigned_user_ids: Vec<i32>) -> CreateTicketInput {
    CreateTicketInput {
        title: title.to_string(),
        description: Some("printer on floor 3 is jammed".to_string()),
        status: None,
        assigned_user_ids,
    }
}

#[tokio::test]
async fn test_register_twice_then_login_sees_no_tickets() {
    let app_data = setup_app(AppEnvironment::Development).await;
    let auth = AuthCoordinator::new(app_data.clone());
    let tickets = TicketCoordinator::new(app_data);

    let (alice, _) = register_and_login(&auth, "alice").await;

    let again = auth.register(&RequestId::new(), "alice", PASSWORD).await;
    assert!(matches!(
        again,
        Err(InternalError::Credential(CredentialError::DuplicateUsername(_)))
    ));

    let listed = tickets.list(&alice).await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_assigned_user_reads_ticket_outsider_is_denied() {
    let app_data = setup_app(AppEnvironment::Development).await;
    let auth = AuthCoordinator::new(app_data.clone());
    let tickets = TicketCoordinator::new(app_data.clone());
    let comments = CommentCoordinator::new(app_data);

    let (admin, _) = bootstrap_and_login(&auth, "root").await;
    let (alice, _) = register_and_login(&auth, "alice").await;
    let (bob, _) = register_and_login(&auth, "bob").await;

    let created = tickets
        .create(&admin, new_ticket("T1", vec![alice.actor_id()]))
        .await
        .unwrap();
    let ticket_id = created.ticket.id;
    assert_eq!(created.ticket.status, "Open");
    assert_eq!(created.assigned_users.len(), 1);
    assert_eq!(created.assigned_users[0].username, "alice");

    let seen = tickets.get(&alice, ticket_id).await.unwrap();
    assert_eq!(seen.ticket.title, "T1");
    assert_eq!(tickets.list(&alice).await.unwrap().len(), 1);

    let denied = tickets.get(&bob, ticket_id).await;
    assert!(matches!(
        denied,
        Err(InternalError::AccessDenied(DenyReason::NotAssigned))
    ));
    assert!(tickets.list(&bob).await.unwrap().is_empty());

    let comment_denied = comments.create(&bob, ticket_id, "me too".to_string()).await;
    assert!(matches!(comment_denied, Err(InternalError::AccessDenied(_))));

    // Admins see everything
    assert_eq!(tickets.list(&admin).await.unwrap().len(), 1);
    assert!(tickets.get(&admin, ticket_id).await.is_ok());
}

#[tokio::test]
async fn test_invalid_assignee_persists_nothing() {
    let app_data = setup_app(AppEnvironment::Development).await;
    let auth = AuthCoordinator::new(app_data.clone());
    let tickets = TicketCoordinator::new(app_data);

    let (admin, _) = bootstrap_and_login(&auth, "root").await;
    let (alice, _) = register_and_login(&auth, "alice").await;

    let result = tickets
        .create(&admin, new_ticket("Broken", vec![alice.actor_id(), 9999]))
        .await;
    assert!(matches!(
        result,
        Err(InternalError::Ticket(TicketError::UserNotFound(9999)))
    ));

    assert!(tickets.list(&admin).await.unwrap().is_empty());
    assert!(tickets.list(&alice).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_assignment_conflicts() {
    let app_data = setup_app(AppEnvironment::Development).await;
    let auth = AuthCoordinator::new(app_data.clone());
    let tickets = TicketCoordinator::new(app_data.clone());
    let assignments = AssignmentCoordinator::new(app_data);

    let (admin, _) = bootstrap_and_login(&auth, "root").await;
    let (alice, _) = register_and_login(&auth, "alice").await;
    let (bob, _) = register_and_login(&auth, "bob").await;

    let ticket_id = tickets
        .create(&admin, new_ticket("T1", vec![alice.actor_id()]))
        .await
        .unwrap()
        .ticket
        .id;

    assignments
        .create(&admin, ticket_id, bob.actor_id(), Some("backup".to_string()))
        .await
        .unwrap();

    let again = assignments.create(&admin, ticket_id, bob.actor_id(), None).await;
    assert!(matches!(
        again,
        Err(InternalError::Ticket(TicketError::DuplicateAssignment { .. }))
    ));

    // Standard users only see their own assignment row
    let own = assignments.list(&bob, ticket_id).await.unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].user_id, bob.actor_id());
    assert_eq!(assignments.list(&admin, ticket_id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_delete_ticket_removes_assignments_and_comments() {
    let app_data = setup_app(AppEnvironment::Development).await;
    let auth = AuthCoordinator::new(app_data.clone());
    let tickets = TicketCoordinator::new(app_data.clone());
    let assignments = AssignmentCoordinator::new(app_data.clone());
    let comments = CommentCoordinator::new(app_data);

    let (admin, _) = bootstrap_and_login(&auth, "root").await;
    let (alice, _) = register_and_login(&auth, "alice").await;

    let ticket_id = tickets
        .create(&admin, new_ticket("T1", vec![alice.actor_id()]))
        .await
        .unwrap()
        .ticket
        .id;
    let comment = comments
        .create(&alice, ticket_id, "on it".to_string())
        .await
        .unwrap();

    tickets.delete(&admin, ticket_id).await.unwrap();

    assert!(matches!(
        tickets.get(&admin, ticket_id).await,
        Err(InternalError::Ticket(TicketError::TicketNotFound(_)))
    ));
    assert!(matches!(
        assignments.list(&admin, ticket_id).await,
        Err(InternalError::Ticket(TicketError::TicketNotFound(_)))
    ));
    assert!(matches!(
        comments.delete(&alice, comment.id).await,
        Err(InternalError::Ticket(TicketError::CommentNotFound(_)))
    ));
}

#[tokio::test]
async fn test_non_owning_admin_and_standard_user_get_distinct_denials() {
    let app_data = setup_app(AppEnvironment::Development).await;
    let auth = AuthCoordinator::new(app_data.clone());
    let tickets = TicketCoordinator::new(app_data);

    let (owner, _) = bootstrap_and_login(&auth, "owner").await;
    let (other_admin, _) = bootstrap_and_login(&auth, "other").await;
    let (alice, _) = register_and_login(&auth, "alice").await;

    let ticket_id = tickets
        .create(&owner, new_ticket("T1", vec![alice.actor_id()]))
        .await
        .unwrap()
        .ticket
        .id;

    let rename = TicketChanges {
        title: Some("Renamed".to_string()),
        ..Default::default()
    };

    let admin_denial = match tickets.update(&other_admin, ticket_id, rename.clone()).await {
        Err(InternalError::AccessDenied(reason)) => reason,
        other => panic!("expected denial, got {:?}", other),
    };
    let standard_denial = match tickets.update(&alice, ticket_id, rename.clone()).await {
        Err(InternalError::AccessDenied(reason)) => reason,
        other => panic!("expected denial, got {:?}", other),
    };

    assert_eq!(admin_denial, DenyReason::NotTicketCreator);
    assert_eq!(standard_denial, DenyReason::AdminRequired);
    assert_ne!(admin_denial.code(), standard_denial.code());

    assert!(matches!(
        tickets.delete(&other_admin, ticket_id).await,
        Err(InternalError::AccessDenied(DenyReason::NotTicketCreator))
    ));

    let updated = tickets.update(&owner, ticket_id, rename).await.unwrap();
    assert_eq!(updated.title, "Renamed");
}

#[tokio::test]
async fn test_comment_author_or_ticket_creator_may_delete() {
    let app_data = setup_app(AppEnvironment::Development).await;
    let auth = AuthCoordinator::new(app_data.clone());
    let tickets = TicketCoordinator::new(app_data.clone());
    let comments = CommentCoordinator::new(app_data);

    let (owner, _) = bootstrap_and_login(&auth, "owner").await;
    let (alice, _) = register_and_login(&auth, "alice").await;
    let (bob, _) = register_and_login(&auth, "bob").await;

    let ticket_id = tickets
        .create(&owner, new_ticket("T1", vec![alice.actor_id(), bob.actor_id()]))
        .await
        .unwrap()
        .ticket
        .id;

    let first = comments.create(&alice, ticket_id, "first".to_string()).await.unwrap();
    let second = comments.create(&alice, ticket_id, "second".to_string()).await.unwrap();

    assert!(matches!(
        comments.delete(&bob, first.id).await,
        Err(InternalError::AccessDenied(_))
    ));

    comments.delete(&alice, first.id).await.unwrap();
    comments.delete(&owner, second.id).await.unwrap();
    assert!(comments.list(&bob, ticket_id).await.unwrap().is_empty());
}
