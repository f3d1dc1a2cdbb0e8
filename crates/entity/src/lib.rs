//! Entity definitions for Velvet
//!
//! This crate contains Sea-ORM entity definitions for the database models.

pub mod categories;
pub use categories::Entity as Categories;
pub mod images;
pub use images::Entity as Images;
pub mod refresh_tokens;
pub use refresh_tokens::Entity as RefreshTokens;
pub mod tags;
pub use tags::Entity as Tags;
pub mod users;
pub use users::Entity as Users;
pub mod video_tags;
pub use video_tags::Entity as VideoTags;
pub mod videos;
pub use videos::Entity as Videos;
