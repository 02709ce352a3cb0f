//! SeaORM entity definitions for the bellhop database schema.

pub mod link;
pub mod photo;
pub mod post;
pub mod post_status;
pub mod post_tag;
pub mod post_type;
pub mod prelude;
pub mod subscription;
pub mod tag;
pub mod text;
pub mod video;
