//! # Common Test Utilities
//!
//! Shared infrastructure for integration tests: in-memory database setup,
//! token configuration, and fixture helpers.

use std::sync::Once;

use auth::{hash_password, secrecy::SecretString, TokenConfig};
use chrono::Utc;
use migration::{Migrator, MigratorTrait as _};
use sea_orm::{ActiveModelTrait, Database, DbConn, Set};
use server::AppState;
use uuid::Uuid;

/// Initialize test logging (run once per test session)
static INIT: Once = Once::new();

/// Initialize test environment including structured logging
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Token configuration with deterministic test secrets
pub fn test_token_config() -> TokenConfig {
    TokenConfig::new(
        "test-access-secret-not-for-production",
        "7d",
        "test-refresh-secret-not-for-production",
        "30d",
    )
}

/// Fresh application state backed by an in-memory SQLite database with the
/// full schema applied.
pub async fn test_state() -> AppState {
    init_test_env();

    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    AppState::new(db, test_token_config())
}

/// Inserts a user with the given credentials and tier.
pub async fn create_user(
    db: &DbConn,
    username: &str,
    password: &str,
    vip_level: i32,
    is_admin: bool,
) -> entity::users::Model {
    use auth::secrecy::ExposeSecret as _;

    let password_hash = hash_password(&SecretString::from(password.to_string()), None)
        .expect("Failed to hash password");

    let now = Utc::now();
    entity::users::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        password_hash: Set(password_hash.expose_secret().to_string()),
        email: Set(None),
        vip_level: Set(vip_level),
        is_admin: Set(is_admin),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("Failed to insert user")
}

/// Inserts an active video gated at the given tier.
pub async fn create_video(
    db: &DbConn,
    title: &str,
    required_vip_level: i32,
    duration: i32,
    preview_duration: i32,
) -> entity::videos::Model {
    let now = Utc::now();
    entity::videos::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title.to_string()),
        description: Set(None),
        video_url: Set(format!("https://cdn.example.com/videos/{}.mp4", title)),
        thumbnail_url: Set(Some(format!("https://cdn.example.com/thumbs/{}.jpg", title))),
        duration: Set(duration),
        preview_duration: Set(preview_duration),
        required_vip_level: Set(required_vip_level),
        view_count: Set(0),
        category_id: Set(None),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("Failed to insert video")
}

/// Inserts a tag.
pub async fn create_tag(db: &DbConn, name: &str) -> entity::tags::Model {
    entity::tags::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .expect("Failed to insert tag")
}

/// Links a video to a tag.
pub async fn link_video_tag(db: &DbConn, video_id: Uuid, tag_id: Uuid) {
    entity::video_tags::ActiveModel {
        video_id: Set(video_id),
        tag_id:   Set(tag_id),
    }
    .insert(db)
    .await
    .expect("Failed to link video and tag");
}

/// Inserts an active image gated at the given tier.
pub async fn create_image(
    db: &DbConn,
    title: &str,
    required_vip_level: i32,
) -> entity::images::Model {
    let now = Utc::now();
    entity::images::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title.to_string()),
        description: Set(None),
        image_url: Set(format!("https://cdn.example.com/images/{}.jpg", title)),
        required_vip_level: Set(required_vip_level),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("Failed to insert image")
}
