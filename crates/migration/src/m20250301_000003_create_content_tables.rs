use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(uuid(Categories::Id).primary_key())
                    .col(string(Categories::Name).not_null().unique_key())
                    .col(text_null(Categories::Description))
                    .col(
                        timestamp_with_time_zone(Categories::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(uuid(Tags::Id).primary_key())
                    .col(string(Tags::Name).not_null().unique_key())
                    .col(
                        timestamp_with_time_zone(Tags::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Videos::Table)
                    .if_not_exists()
                    .col(uuid(Videos::Id).primary_key())
                    .col(string_len(Videos::Title, 200).not_null())
                    .col(text_null(Videos::Description))
                    .col(string(Videos::VideoUrl).not_null())
                    .col(string_null(Videos::ThumbnailUrl))
                    .col(integer(Videos::Duration).not_null().default(0))
                    .col(integer(Videos::PreviewDuration).not_null().default(60))
                    .col(integer(Videos::RequiredVipLevel).not_null().default(1))
                    .col(integer(Videos::ViewCount).not_null().default(0))
                    .col(uuid_null(Videos::CategoryId))
                    .col(boolean(Videos::IsActive).not_null().default(true))
                    .col(
                        timestamp_with_time_zone(Videos::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Videos::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_videos_category_id")
                            .from(Videos::Table, Videos::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VideoTags::Table)
                    .if_not_exists()
                    .col(uuid(VideoTags::VideoId).not_null())
                    .col(uuid(VideoTags::TagId).not_null())
                    .primary_key(
                        Index::create()
                            .col(VideoTags::VideoId)
                            .col(VideoTags::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_video_tags_video_id")
                            .from(VideoTags::Table, VideoTags::VideoId)
                            .to(Videos::Table, Videos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_video_tags_tag_id")
                            .from(VideoTags::Table, VideoTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Images::Table)
                    .if_not_exists()
                    .col(uuid(Images::Id).primary_key())
                    .col(string_len(Images::Title, 200).not_null())
                    .col(text_null(Images::Description))
                    .col(string(Images::ImageUrl).not_null())
                    .col(integer(Images::RequiredVipLevel).not_null().default(5))
                    .col(boolean(Images::IsActive).not_null().default(true))
                    .col(
                        timestamp_with_time_zone(Images::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Images::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Images::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VideoTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Videos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Tags {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Videos {
    Table,
    Id,
    Title,
    Description,
    VideoUrl,
    ThumbnailUrl,
    Duration,
    PreviewDuration,
    RequiredVipLevel,
    ViewCount,
    CategoryId,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum VideoTags {
    Table,
    VideoId,
    TagId,
}

#[derive(DeriveIden)]
enum Images {
    Table,
    Id,
    Title,
    Description,
    ImageUrl,
    RequiredVipLevel,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
