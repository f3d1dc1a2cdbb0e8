//! # Integration Tests for Content Gating
//!
//! Exercises the tier gates on the video and image endpoints: videos degrade
//! to previews for under-tier callers, images deny outright.

mod common;

use auth::{CallerIdentity, VipLevel};
use common::{create_image, create_user, create_video, test_state};
use http::StatusCode;
use server::{
    dto::{images::ImageQuery, videos::VideoQuery},
    handlers::{images, videos},
};
use uuid::Uuid;

fn member(vip_level: u8) -> CallerIdentity {
    CallerIdentity::Identified {
        id:        Uuid::new_v4(),
        username:  "tester".to_string(),
        vip_level: VipLevel::new(vip_level).unwrap(),
        is_admin:  false,
    }
}

fn admin() -> CallerIdentity {
    CallerIdentity::Identified {
        id:        Uuid::new_v4(),
        username:  "admin".to_string(),
        vip_level: VipLevel::DIAMOND,
        is_admin:  true,
    }
}

#[tokio::test]
async fn test_anonymous_viewer_gets_previews_only() {
    let state = test_state().await;
    create_video(&state.db, "intro", 1, 600, 60).await;

    let response = videos::list_videos_inner(
        &state,
        &CallerIdentity::Anonymous,
        VideoQuery::default(),
    )
    .await
    .expect("Public listing should succeed");

    let video = &response.0.items[0];
    assert!(!video.can_watch);
    assert!(video.is_preview_only);
    assert_eq!(video.effective_duration, 60);
}

#[tokio::test]
async fn test_silver_member_sees_full_and_preview_by_tier() {
    let state = test_state().await;
    create_video(&state.db, "bronze-tier", 1, 600, 60).await;
    create_video(&state.db, "platinum-tier", 5, 1200, 90).await;

    let response = videos::list_videos_inner(&state, &member(3), VideoQuery::default())
        .await
        .expect("Listing should succeed");

    let items = &response.0.items;
    assert_eq!(items.len(), 2);

    let open = items.iter().find(|v| v.title == "bronze-tier").unwrap();
    assert!(open.can_watch);
    assert!(!open.is_preview_only);
    assert_eq!(open.effective_duration, 600);

    let gated = items.iter().find(|v| v.title == "platinum-tier").unwrap();
    assert!(!gated.can_watch);
    assert!(gated.is_preview_only);
    assert_eq!(gated.effective_duration, 90);
    assert_eq!(gated.required_level_name, "白金會員");
}

#[tokio::test]
async fn test_get_video_increments_view_count() {
    let state = test_state().await;
    let video = create_video(&state.db, "clip", 1, 300, 30).await;

    let first = videos::get_video_inner(&state, &member(1), video.id)
        .await
        .expect("Fetch should succeed");
    assert_eq!(first.0.view_count, 1);

    let second = videos::get_video_inner(&state, &member(1), video.id)
        .await
        .expect("Fetch should succeed");
    assert_eq!(second.0.view_count, 2);
}

#[tokio::test]
async fn test_missing_video_is_not_found() {
    let state = test_state().await;

    let err = videos::get_video_inner(&state, &member(1), Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_image_gallery_requires_platinum() {
    let state = test_state().await;
    create_image(&state.db, "backstage", 5).await;

    let anonymous = images::list_images_inner(
        &state,
        &CallerIdentity::Anonymous,
        ImageQuery::default(),
    )
    .await
    .unwrap_err();
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let gold = images::list_images_inner(&state, &member(4), ImageQuery::default())
        .await
        .unwrap_err();
    assert_eq!(gold.status(), StatusCode::FORBIDDEN);
    assert!(gold.message().contains("白金會員"));

    let platinum = images::list_images_inner(&state, &member(5), ImageQuery::default())
        .await
        .expect("Platinum member should pass the gallery gate");
    assert_eq!(platinum.0.items.len(), 1);
}

#[tokio::test]
async fn test_image_listing_omits_images_above_caller_tier() {
    let state = test_state().await;
    create_image(&state.db, "platinum-only", 5).await;
    create_image(&state.db, "diamond-only", 6).await;

    let platinum = images::list_images_inner(&state, &member(5), ImageQuery::default())
        .await
        .expect("Listing should succeed");
    assert_eq!(platinum.0.items.len(), 1);
    assert_eq!(platinum.0.items[0].title, "platinum-only");

    let diamond = images::list_images_inner(&state, &member(6), ImageQuery::default())
        .await
        .expect("Listing should succeed");
    assert_eq!(diamond.0.items.len(), 2);
}

#[tokio::test]
async fn test_image_detail_hard_denies_under_tier() {
    let state = test_state().await;
    let image = create_image(&state.db, "diamond-only", 6).await;

    let err = images::get_image_inner(&state, &member(5), image.id)
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);

    let ok = images::get_image_inner(&state, &member(6), image.id)
        .await
        .expect("Diamond member should see the image");
    assert_eq!(ok.0.title, "diamond-only");
}

#[tokio::test]
async fn test_admin_endpoints_reject_regular_members() {
    let state = test_state().await;
    create_video(&state.db, "clip", 1, 300, 30).await;

    let err = videos::admin_list_videos_inner(&state, &member(6), VideoQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);

    let err = images::admin_list_images_inner(&state, &member(6), ImageQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_sees_inactive_videos_without_preview_overlay() {
    let state = test_state().await;
    let video = create_video(&state.db, "draft", 6, 900, 60).await;

    // Deactivate it; the public listing should no longer return it
    let mut active: entity::videos::ActiveModel = video.into();
    active.is_active = sea_orm::Set(false);
    sea_orm::ActiveModelTrait::update(active, &state.db)
        .await
        .expect("Update should succeed");

    let public = videos::list_videos_inner(&state, &member(1), VideoQuery::default())
        .await
        .expect("Listing should succeed");
    assert!(public.0.items.is_empty());

    let admin_view = videos::admin_list_videos_inner(&state, &admin(), VideoQuery::default())
        .await
        .expect("Admin listing should succeed");
    assert_eq!(admin_view.0.items.len(), 1);
    let draft = &admin_view.0.items[0];
    assert!(draft.can_watch);
    assert_eq!(draft.effective_duration, 900);
}
