//! Initial migration to create the bellhop database schema.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        self.create_posts(manager).await?;
        self.create_attachments(manager).await?;
        self.create_tags(manager).await?;
        self.create_subscriptions(manager).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subscriptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PostsTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Videos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Photos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Texts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Links::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await?;
        Ok(())
    }
}

/// `id INTEGER PRIMARY KEY AUTOINCREMENT`.
fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

/// Stamped by the writer; no storage default.
fn timestamp_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

fn owner_fk<T: IntoIden + 'static>(name: &str, child: T, column: impl IntoIden) -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .name(name)
        .from(child, column)
        .to(Posts::Table, Posts::Id)
        .on_delete(ForeignKeyAction::Cascade)
        .to_owned()
}

impl Migration {
    async fn create_posts(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(id_col(Posts::Id))
                    .col(timestamp_col(Posts::CreatedAt))
                    .col(timestamp_col(Posts::UpdatedAt))
                    // Classification
                    .col(
                        ColumnDef::new(Posts::Status)
                            .string()
                            .not_null()
                            .default("queued"),
                    )
                    .col(
                        ColumnDef::new(Posts::Sfw)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Posts::Source).string().not_null())
                    .col(ColumnDef::new(Posts::Type).string().not_null())
                    .col(
                        ColumnDef::new(Posts::ReleasedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    // Provenance
                    .col(ColumnDef::new(Posts::Category).string().not_null())
                    .col(ColumnDef::new(Posts::ExternalId).string().not_null())
                    .col(ColumnDef::new(Posts::ExternalUrl).text().not_null())
                    .col(
                        ColumnDef::new(Posts::SourceUrl)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Posts::SourceCategory)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    // Engagement
                    .col(
                        ColumnDef::new(Posts::Likes)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Posts::Summary)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .to_owned(),
            )
            .await?;

        // One row per remote post
        manager
            .create_index(
                Index::create()
                    .name("idx_posts_source_external_id")
                    .table(Posts::Table)
                    .col(Posts::Source)
                    .col(Posts::ExternalId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_posts_status")
                    .table(Posts::Table)
                    .col(Posts::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_attachments(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Links::Table)
                    .if_not_exists()
                    .col(id_col(Links::Id))
                    .col(timestamp_col(Links::CreatedAt))
                    .col(timestamp_col(Links::UpdatedAt))
                    .col(ColumnDef::new(Links::PostId).integer().not_null())
                    .col(ColumnDef::new(Links::Url).text().not_null())
                    .foreign_key(&mut owner_fk("fk_links_post", Links::Table, Links::PostId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Texts::Table)
                    .if_not_exists()
                    .col(id_col(Texts::Id))
                    .col(timestamp_col(Texts::CreatedAt))
                    .col(timestamp_col(Texts::UpdatedAt))
                    .col(ColumnDef::new(Texts::PostId).integer().not_null())
                    .col(
                        ColumnDef::new(Texts::Title)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Texts::Body).text().not_null().default(""))
                    .foreign_key(&mut owner_fk("fk_texts_post", Texts::Table, Texts::PostId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Photos::Table)
                    .if_not_exists()
                    .col(id_col(Photos::Id))
                    .col(timestamp_col(Photos::CreatedAt))
                    .col(timestamp_col(Photos::UpdatedAt))
                    .col(ColumnDef::new(Photos::PostId).integer().not_null())
                    .col(
                        ColumnDef::new(Photos::Caption)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Photos::ExternalUrl).text().not_null())
                    .col(
                        ColumnDef::new(Photos::Sfw)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(&mut owner_fk(
                        "fk_photos_post",
                        Photos::Table,
                        Photos::PostId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Videos::Table)
                    .if_not_exists()
                    .col(id_col(Videos::Id))
                    .col(timestamp_col(Videos::CreatedAt))
                    .col(timestamp_col(Videos::UpdatedAt))
                    .col(ColumnDef::new(Videos::PostId).integer().not_null())
                    .col(ColumnDef::new(Videos::ExternalUrl).text().not_null())
                    .col(ColumnDef::new(Videos::ThumbnailUrl).text().not_null())
                    .foreign_key(&mut owner_fk(
                        "fk_videos_post",
                        Videos::Table,
                        Videos::PostId,
                    ))
                    .to_owned(),
            )
            .await?;

        // Index on post_id for each child table
        for (name, table, column) in [
            ("idx_links_post_id", Links::Table.into_iden(), Links::PostId.into_iden()),
            ("idx_texts_post_id", Texts::Table.into_iden(), Texts::PostId.into_iden()),
            ("idx_photos_post_id", Photos::Table.into_iden(), Photos::PostId.into_iden()),
            ("idx_videos_post_id", Videos::Table.into_iden(), Videos::PostId.into_iden()),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn create_tags(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(id_col(Tags::Id))
                    .col(timestamp_col(Tags::CreatedAt))
                    .col(timestamp_col(Tags::UpdatedAt))
                    .col(ColumnDef::new(Tags::Name).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PostsTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PostsTags::PostId).integer().not_null())
                    .col(ColumnDef::new(PostsTags::TagId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(PostsTags::PostId)
                            .col(PostsTags::TagId),
                    )
                    .foreign_key(&mut owner_fk(
                        "fk_posts_tags_post",
                        PostsTags::Table,
                        PostsTags::PostId,
                    ))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_tags_tag")
                            .from(PostsTags::Table, PostsTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_subscriptions(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subscriptions::Table)
                    .if_not_exists()
                    .col(id_col(Subscriptions::Id))
                    .col(timestamp_col(Subscriptions::CreatedAt))
                    .col(timestamp_col(Subscriptions::UpdatedAt))
                    .col(ColumnDef::new(Subscriptions::BlogName).string().not_null())
                    .col(ColumnDef::new(Subscriptions::Source).string().not_null())
                    .col(ColumnDef::new(Subscriptions::Url).text().not_null())
                    .col(
                        ColumnDef::new(Subscriptions::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Subscriptions::Title)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    CreatedAt,
    UpdatedAt,
    Status,
    Sfw,
    Source,
    Type,
    ReleasedAt,
    Category,
    ExternalId,
    ExternalUrl,
    SourceUrl,
    SourceCategory,
    Likes,
    Summary,
}

#[derive(DeriveIden)]
enum Links {
    Table,
    Id,
    CreatedAt,
    UpdatedAt,
    PostId,
    Url,
}

#[derive(DeriveIden)]
enum Texts {
    Table,
    Id,
    CreatedAt,
    UpdatedAt,
    PostId,
    Title,
    Body,
}

#[derive(DeriveIden)]
enum Photos {
    Table,
    Id,
    CreatedAt,
    UpdatedAt,
    PostId,
    Caption,
    ExternalUrl,
    Sfw,
}

#[derive(DeriveIden)]
enum Videos {
    Table,
    Id,
    CreatedAt,
    UpdatedAt,
    PostId,
    ExternalUrl,
    ThumbnailUrl,
}

#[derive(DeriveIden)]
enum Tags {
    Table,
    Id,
    CreatedAt,
    UpdatedAt,
    Name,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "posts_tags")]
enum PostsTags {
    Table,
    PostId,
    TagId,
}

#[derive(DeriveIden)]
enum Subscriptions {
    Table,
    Id,
    CreatedAt,
    UpdatedAt,
    BlogName,
    Source,
    Url,
    Description,
    Title,
}
