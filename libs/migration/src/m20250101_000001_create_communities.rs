use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

fn community_types() -> [CommunityType; 5] {
    [
        CommunityType::Study,
        CommunityType::Hobby,
        CommunityType::Project,
        CommunityType::Official,
        CommunityType::Etc,
    ]
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(CommunityType::Enum)
                    .values(community_types())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Communities::Table)
                    .if_not_exists()
                    .col(pk_auto(Communities::Id))
                    .col(
                        ColumnDef::new(Communities::Type)
                            .enumeration(CommunityType::Enum, community_types())
                            .not_null(),
                    )
                    .col(text_null(Communities::Thumbnail))
                    .col(string(Communities::Name))
                    .col(text_null(Communities::Description))
                    .col(string(Communities::ManagerId))
                    .col(string(Communities::ManagerName))
                    .col(string(Communities::ManagerEmail))
                    .col(big_integer(Communities::MemberCount).default(0))
                    .col(
                        timestamp_with_time_zone(Communities::RegisteredTime)
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer(Communities::Registrant))
                    .col(
                        timestamp_with_time_zone(Communities::ModifiedTime)
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer(Communities::Modifier))
                    .col(string_null(Communities::SecretNumber))
                    .col(boolean(Communities::AllowSelfJoin).default(false))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Members::Table)
                    .if_not_exists()
                    .col(pk_auto(Members::Id))
                    .col(integer(Members::CommunityId))
                    .col(integer(Members::UserId))
                    .col(
                        timestamp_with_time_zone(Members::JoinedTime)
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer_null(Members::Registrant))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_members_community_id")
                            .from(Members::Table, Members::CommunityId)
                            .to(Communities::Table, Communities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One membership per (community, user); joins racing past the
        // service-level check fail here
        manager
            .create_index(
                Index::create()
                    .name("uq_members_community_user")
                    .table(Members::Table)
                    .col(Members::CommunityId)
                    .col(Members::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Members::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Communities::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(CommunityType::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Communities {
    Table,
    Id,
    Type,
    Thumbnail,
    Name,
    Description,
    ManagerId,
    ManagerName,
    ManagerEmail,
    MemberCount,
    RegisteredTime,
    Registrant,
    ModifiedTime,
    Modifier,
    SecretNumber,
    AllowSelfJoin,
}

#[derive(DeriveIden)]
enum Members {
    Table,
    Id,
    CommunityId,
    UserId,
    JoinedTime,
    Registrant,
}

#[derive(DeriveIden)]
enum CommunityType {
    #[sea_orm(iden = "community_type")]
    Enum,
    #[sea_orm(iden = "study")]
    Study,
    #[sea_orm(iden = "hobby")]
    Hobby,
    #[sea_orm(iden = "project")]
    Project,
    #[sea_orm(iden = "official")]
    Official,
    #[sea_orm(iden = "etc")]
    Etc,
}
