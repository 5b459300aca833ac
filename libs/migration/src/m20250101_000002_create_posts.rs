use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250101_000001_create_communities::Communities;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn post_types() -> [PostType; 4] {
    [
        PostType::Notice,
        PostType::General,
        PostType::Question,
        PostType::Share,
    ]
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(PostType::Enum)
                    .values(post_types())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(pk_auto(Posts::Id))
                    .col(string(Posts::Title))
                    .col(text(Posts::Content))
                    .col(
                        ColumnDef::new(Posts::PostType)
                            .enumeration(PostType::Enum, post_types())
                            .not_null(),
                    )
                    .col(integer(Posts::CommunityId))
                    .col(
                        timestamp_with_time_zone(Posts::RegisteredTime)
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer(Posts::Registrant))
                    .col(
                        timestamp_with_time_zone(Posts::ModifiedTime)
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer(Posts::Modifier))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_community_id")
                            .from(Posts::Table, Posts::CommunityId)
                            .to(Communities::Table, Communities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_posts_community_registered")
                    .table(Posts::Table)
                    .col(Posts::CommunityId)
                    .col(Posts::RegisteredTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Comments::Table)
                    .if_not_exists()
                    .col(pk_auto(Comments::Id))
                    .col(text(Comments::Content))
                    .col(integer(Comments::PostId))
                    .col(
                        timestamp_with_time_zone(Comments::RegisteredTime)
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer(Comments::Registrant))
                    .col(
                        timestamp_with_time_zone(Comments::ModifiedTime)
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer(Comments::Modifier))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_post_id")
                            .from(Comments::Table, Comments::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comments_post_registered")
                    .table(Comments::Table)
                    .col(Comments::PostId)
                    .col(Comments::RegisteredTime)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(PostType::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    Title,
    Content,
    PostType,
    CommunityId,
    RegisteredTime,
    Registrant,
    ModifiedTime,
    Modifier,
}

#[derive(DeriveIden)]
enum Comments {
    Table,
    Id,
    Content,
    PostId,
    RegisteredTime,
    Registrant,
    ModifiedTime,
    Modifier,
}

#[derive(DeriveIden)]
enum PostType {
    #[sea_orm(iden = "post_type")]
    Enum,
    #[sea_orm(iden = "notice")]
    Notice,
    #[sea_orm(iden = "general")]
    General,
    #[sea_orm(iden = "question")]
    Question,
    #[sea_orm(iden = "share")]
    Share,
}
