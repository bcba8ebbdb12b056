//! API Integration Tests
//!
//! Runs against the in-memory store by default. `test_postgres_like_flow`
//! additionally needs DATABASE_URL and JWT_SECRET.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, check_postgres_env, fixtures::*, postgres_config,
    TestServer, TestUser,
};
use reqwest::StatusCode;
use serde_json::json;

async fn upload(server: &TestServer, owner: &TestUser) -> VideoBody {
    let response = server
        .post_auth("/videos", &owner.token, &VideoRequest::unique())
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn inbox(server: &TestServer, user: &TestUser) -> Vec<NotificationBody> {
    let response = server.get_auth("/notifications", &user.token).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

async fn react(
    server: &TestServer,
    user: &TestUser,
    subject: &str,
    request: &ReactionRequest,
) -> ReactionBody {
    let response = server
        .post_auth(&format!("/reactions/{subject}"), &user.token, request)
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get_root("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get_root("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Account Tests
// ============================================================================

#[tokio::test]
async fn test_account_hook_is_idempotent() {
    let server = TestServer::start().await.unwrap();
    let user = server.create_user("hook").await.unwrap();

    let response = server
        .post_auth(
            "/users/@me",
            &user.token,
            &AccountRequest {
                username: "someone-else".to_string(),
            },
        )
        .await
        .unwrap();
    let again: UserBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(again.id, user.id);
    assert_eq!(again.username, user.username);
}

#[tokio::test]
async fn test_account_hook_requires_token() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .post(
            "/users/@me",
            &AccountRequest {
                username: "nobody".to_string(),
            },
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_AUTHORIZATION");
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_video_like_scenario() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").await.unwrap();
    let fan = server.create_user("fan").await.unwrap();
    let video = upload(&server, &owner).await;
    let subject = format!("video/{}", video.id);

    // Owner likes their own video: counted, not notified
    let r = react(&server, &owner, &subject, &ReactionRequest::like()).await;
    assert_eq!(r.outcome, "created");
    assert_eq!(r.likes, 1);
    assert!(inbox(&server, &owner).await.is_empty());

    // Someone else likes it: one notification for the owner
    let r = react(&server, &fan, &subject, &ReactionRequest::like()).await;
    assert_eq!(r.outcome, "created");
    assert_eq!(r.likes, 2);
    let notifications = inbox(&server, &owner).await;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, "like");
    assert_eq!(notifications[0].sender_id.as_deref(), Some(fan.id.as_str()));
    assert_eq!(notifications[0].title, format!("{} liked your video", fan.username));
    assert_eq!(notifications[0].target_link, format!("/videos/{}", video.id));

    // Toggling the same like removes it and stays silent
    let r = react(&server, &fan, &subject, &ReactionRequest::like()).await;
    assert_eq!(r.outcome, "removed");
    assert_eq!(r.reaction, None);
    assert_eq!(r.likes, 1);
    assert_eq!(inbox(&server, &owner).await.len(), 1);
}

#[tokio::test]
async fn test_reaction_switch_and_counts() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").await.unwrap();
    let viewer = server.create_user("viewer").await.unwrap();
    let video = upload(&server, &owner).await;
    let subject = format!("video/{}", video.id);

    react(&server, &viewer, &subject, &ReactionRequest::like()).await;
    let r = react(&server, &viewer, &subject, &ReactionRequest::dislike()).await;
    assert_eq!(r.outcome, "changed");
    assert_eq!(r.reaction.as_deref(), Some("dislike"));
    assert_eq!((r.likes, r.dislikes), (0, 1));

    // A switch is never a new like, so no second notification
    assert_eq!(inbox(&server, &owner).await.len(), 1);

    let response = server.get(&format!("/videos/{}", video.id)).await.unwrap();
    let viewed: VideoBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(viewed.views, 1);
    assert_eq!((viewed.likes, viewed.dislikes), (0, 1));
}

#[tokio::test]
async fn test_reaction_rejections() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").await.unwrap();
    let video = upload(&server, &owner).await;

    let response = server
        .post(&format!("/reactions/video/{}", video.id), &ReactionRequest::like())
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "UNAUTHORIZED");

    let response = server
        .post_auth(
            &format!("/reactions/video/{}", video.id),
            &owner.token,
            &ReactionRequest {
                kind: "love".to_string(),
            },
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_REACTION_KIND");

    let response = server
        .post_auth("/reactions/video/123", &owner.token, &ReactionRequest::like())
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_SUBJECT");
}

#[tokio::test]
async fn test_anonymous_caller_is_rejected_before_body_checks() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").await.unwrap();
    let video = upload(&server, &owner).await;

    let bad_bodies = [
        (format!("/reactions/video/{}", video.id), json!({ "kind": "" })),
        (format!("/videos/{}/comments", video.id), json!({ "content": "" })),
        ("/videos".to_string(), json!({ "title": "" })),
    ];
    for (path, body) in &bad_bodies {
        let response = server.post(path, body).await.unwrap();
        let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
        assert_eq!(code, "UNAUTHORIZED", "{path}");
    }

    let response = server
        .patch("/users/@me", &json!({ "bio": "x".repeat(501) }))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "UNAUTHORIZED");

    // Signed in, the same body is a validation failure
    let response = server
        .post_auth(
            &format!("/videos/{}/comments", video.id),
            &owner.token,
            &json!({ "content": "" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_reply_notifies_parent_author_only() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").await.unwrap();
    let commenter = server.create_user("commenter").await.unwrap();
    let replier = server.create_user("replier").await.unwrap();
    let video = upload(&server, &owner).await;

    let response = server
        .post_auth(
            &format!("/videos/{}/comments", video.id),
            &commenter.token,
            &CommentRequest::new("first!"),
        )
        .await
        .unwrap();
    let top: CommentBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(top.video_id, video.id);
    assert_eq!(inbox(&server, &owner).await.len(), 1);

    let response = server
        .post_auth(
            &format!("/comments/{}/replies", top.id),
            &replier.token,
            &CommentRequest::new("second"),
        )
        .await
        .unwrap();
    let reply: CommentBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(reply.parent_id.as_deref(), Some(top.id.as_str()));

    let commenter_inbox = inbox(&server, &commenter).await;
    assert_eq!(commenter_inbox.len(), 1);
    assert_eq!(commenter_inbox[0].kind, "comment");
    assert_eq!(
        commenter_inbox[0].target_link,
        format!("/videos/{}#comment-{}", video.id, reply.id)
    );
    assert_eq!(
        commenter_inbox[0].body,
        format!("{} replied: second", replier.username)
    );

    // The owner only heard about the top-level comment
    assert_eq!(inbox(&server, &owner).await.len(), 1);
}

#[tokio::test]
async fn test_comment_thread_and_delete() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("owner").await.unwrap();
    let viewer = server.create_user("viewer").await.unwrap();
    let video = upload(&server, &owner).await;

    let response = server
        .post_auth(
            &format!("/videos/{}/comments", video.id),
            &viewer.token,
            &CommentRequest::new("parent"),
        )
        .await
        .unwrap();
    let parent: CommentBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &format!("/videos/{}/comments", video.id),
            &owner.token,
            &CommentRequest {
                content: "child".to_string(),
                parent_id: Some(parent.id.clone()),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    react(
        &server,
        &owner,
        &format!("comment/{}", parent.id),
        &ReactionRequest::like(),
    )
    .await;

    // Only the author or the uploader may delete
    let stranger = server.create_user("stranger").await.unwrap();
    let response = server
        .delete_auth(&format!("/comments/{}", parent.id), &stranger.token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_COMMENT_AUTHOR");

    let response = server
        .delete_auth(&format!("/comments/{}", parent.id), &viewer.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .delete_auth(&format!("/comments/{}", parent.id), &viewer.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .get(&format!("/videos/{}/comments", video.id))
        .await
        .unwrap();
    let thread: ThreadBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(thread.comments.len(), 1);
    let root = &thread.comments[0];
    assert!(root.is_deleted);
    assert!(root.content.is_empty());
    assert_eq!(root.likes, 1);
    assert_eq!(root.replies.len(), 1);
    assert_eq!(root.replies[0].content, "child");

    // Deleted comments accept neither reactions nor replies
    let response = server
        .post_auth(
            &format!("/reactions/comment/{}", parent.id),
            &viewer.token,
            &ReactionRequest::like(),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .post_auth(
            &format!("/comments/{}/replies", parent.id),
            &viewer.token,
            &CommentRequest::new("too late"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_comment_on_missing_video() {
    let server = TestServer::start().await.unwrap();
    let viewer = server.create_user("viewer").await.unwrap();

    let response = server
        .post_auth("/videos/77/comments", &viewer.token, &CommentRequest::new("hello"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_VIDEO");

    let response = server
        .post_auth(
            "/videos/not-an-id/comments",
            &viewer.token,
            &CommentRequest::new("hello"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Follow Tests
// ============================================================================

#[tokio::test]
async fn test_follow_then_unfollow() {
    let server = TestServer::start().await.unwrap();
    let a = server.create_user("a").await.unwrap();
    let b = server.create_user("b").await.unwrap();

    let response = server
        .post_empty(&format!("/users/{}/follow", b.id), &a.token)
        .await
        .unwrap();
    let follow: FollowBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(follow.following);
    assert_eq!(follow.follower_count, 1);

    let notifications = inbox(&server, &b).await;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, "follow");
    assert_eq!(notifications[0].body, format!("{} started following you!", a.username));
    assert_eq!(notifications[0].target_link, format!("/users/{}", a.id));

    let response = server.get(&format!("/users/{}", b.id)).await.unwrap();
    let profile: ProfileBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.username, b.username);
    assert_eq!((profile.follower_count, profile.following_count), (1, 0));
    assert_eq!(profile.video_count, 0);

    let response = server
        .post_empty(&format!("/users/{}/follow", b.id), &a.token)
        .await
        .unwrap();
    let follow: FollowBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!follow.following);
    assert!(inbox(&server, &b).await.is_empty());
}

#[tokio::test]
async fn test_cannot_follow_self() {
    let server = TestServer::start().await.unwrap();
    let a = server.create_user("a").await.unwrap();

    let response = server
        .post_empty(&format!("/users/{}/follow", a.id), &a.token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "CANNOT_FOLLOW_SELF");
}

// ============================================================================
// Notification Tests
// ============================================================================

#[tokio::test]
async fn test_mark_read_flow() {
    let server = TestServer::start().await.unwrap();
    let a = server.create_user("a").await.unwrap();
    let b = server.create_user("b").await.unwrap();
    let c = server.create_user("c").await.unwrap();

    for follower in [&a, &c] {
        let response = server
            .post_empty(&format!("/users/{}/follow", b.id), &follower.token)
            .await
            .unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let response = server
        .get_auth("/notifications/unread-count", &b.token)
        .await
        .unwrap();
    let unread: UnreadBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(unread.unread, 2);

    let notifications = inbox(&server, &b).await;
    assert_eq!(notifications[0].sender_id.as_deref(), Some(c.id.as_str()));
    let id = &notifications[0].id;

    // Someone else's notification reads as missing
    let response = server
        .post_empty(&format!("/notifications/{id}/read"), &a.token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_NOTIFICATION");

    let response = server
        .post_empty(&format!("/notifications/{id}/read"), &b.token)
        .await
        .unwrap();
    let marked: UpdatedBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(marked.updated);

    let response = server
        .post_empty(&format!("/notifications/{id}/read"), &b.token)
        .await
        .unwrap();
    let marked: UpdatedBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!marked.updated);

    let response = server
        .post_empty("/notifications/read-all", &b.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    assert!(inbox(&server, &b).await.iter().all(|n| n.is_read));
}

#[tokio::test]
async fn test_notification_paging() {
    let server = TestServer::start().await.unwrap();
    let star = server.create_user("star").await.unwrap();
    for _ in 0..3 {
        let fan = server.create_user("fan").await.unwrap();
        server
            .post_empty(&format!("/users/{}/follow", star.id), &fan.token)
            .await
            .unwrap();
    }

    let response = server
        .get_auth("/notifications?limit=2", &star.token)
        .await
        .unwrap();
    let page: Vec<NotificationBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.len(), 2);

    let response = server
        .get_auth(&format!("/notifications?limit=2&before={}", page[1].id), &star.token)
        .await
        .unwrap();
    let rest: Vec<NotificationBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(rest.len(), 1);

    let response = server
        .get_auth("/notifications?before=soon", &star.token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_QUERY_PARAMETER");
}

#[tokio::test]
async fn test_malformed_token_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .get_auth("/notifications", "eyJhbGciOiJIUzI1NiJ9.e30.invalid")
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Video Listing And Profile Tests
// ============================================================================

#[tokio::test]
async fn test_video_listing_pages_newest_first() {
    let server = TestServer::start().await.unwrap();
    let owner = server.create_user("lister").await.unwrap();
    let first = upload(&server, &owner).await;
    let second = upload(&server, &owner).await;
    let third = upload(&server, &owner).await;

    let response = server.get("/videos?limit=2").await.unwrap();
    let page: Vec<VideoBody> = assert_json(response, StatusCode::OK).await.unwrap();
    let ids: Vec<&str> = page.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, [third.id.as_str(), second.id.as_str()]);

    let response = server
        .get(&format!("/videos?limit=2&before={}", second.id))
        .await
        .unwrap();
    let rest: Vec<VideoBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].id, first.id);

    let response = server.get("/videos?before=later").await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_QUERY_PARAMETER");
}

#[tokio::test]
async fn test_profile_edit() {
    let server = TestServer::start().await.unwrap();
    let user = server.create_user("editor").await.unwrap();

    let response = server
        .patch_auth(
            "/users/@me",
            &user.token,
            &json!({ "bio": "  slow cinema  ", "location": "Ghent", "birth_date": "1991-03-14" }),
        )
        .await
        .unwrap();
    let profile: ProfileBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.bio, "slow cinema");
    assert_eq!(profile.location, "Ghent");
    assert_eq!(profile.birth_date.as_deref(), Some("1991-03-14"));

    let response = server
        .patch_auth("/users/@me", &user.token, &json!({ "birth_date": null }))
        .await
        .unwrap();
    let profile: ProfileBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.bio, "slow cinema");
    assert_eq!(profile.birth_date, None);

    let response = server.get(&format!("/users/{}", user.id)).await.unwrap();
    let public: ProfileBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(public.location, "Ghent");

    let response = server
        .patch_auth("/users/@me", &user.token, &json!({ "location": "l".repeat(31) }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// PostgreSQL
// ============================================================================

#[tokio::test]
async fn test_postgres_like_flow() {
    if !check_postgres_env() {
        return;
    }

    let server = TestServer::start_with_config(postgres_config().unwrap())
        .await
        .expect("Failed to start server");
    let owner = server.create_user("pgowner").await.unwrap();
    let fan = server.create_user("pgfan").await.unwrap();
    let video = upload(&server, &owner).await;
    let subject = format!("video/{}", video.id);

    assert_eq!(react(&server, &fan, &subject, &ReactionRequest::like()).await.likes, 1);
    assert_eq!(inbox(&server, &owner).await.len(), 1);
    assert_eq!(react(&server, &fan, &subject, &ReactionRequest::like()).await.likes, 0);
    assert_eq!(inbox(&server, &owner).await.len(), 1);
}
