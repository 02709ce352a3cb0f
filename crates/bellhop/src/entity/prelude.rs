//! Common re-exports for convenient entity usage.

pub use super::link::{
    ActiveModel as LinkActiveModel, Column as LinkColumn, Entity as Link, Model as LinkModel,
};
pub use super::photo::{
    ActiveModel as PhotoActiveModel, Column as PhotoColumn, Entity as Photo, Model as PhotoModel,
};
pub use super::post::{
    ActiveModel as PostActiveModel, Column as PostColumn, Entity as Post, Model as PostModel,
};
pub use super::post_status::PostStatus;
pub use super::post_tag::{
    ActiveModel as PostTagActiveModel, Column as PostTagColumn, Entity as PostTag,
    Model as PostTagModel,
};
pub use super::post_type::PostType;
pub use super::subscription::{
    ActiveModel as SubscriptionActiveModel, Column as SubscriptionColumn, Entity as Subscription,
    Model as SubscriptionModel,
};
pub use super::tag::{
    ActiveModel as TagActiveModel, Column as TagColumn, Entity as Tag, Model as TagModel,
};
pub use super::text::{
    ActiveModel as TextActiveModel, Column as TextColumn, Entity as Text, Model as TextModel,
};
pub use super::video::{
    ActiveModel as VideoActiveModel, Column as VideoColumn, Entity as Video, Model as VideoModel,
};
