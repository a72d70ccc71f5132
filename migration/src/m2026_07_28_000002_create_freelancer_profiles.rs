use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum FreelancerProfiles {
    Table,
    UserId,
    SubscriptionTier,
    HourlyRate,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // the profile shares its primary key with the owning user row
        manager
            .create_table(
                Table::create()
                    .table(FreelancerProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FreelancerProfiles::UserId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FreelancerProfiles::SubscriptionTier)
                            .string_len(10)
                            .not_null()
                            .default("FREE"),
                    )
                    .col(
                        ColumnDef::new(FreelancerProfiles::HourlyRate)
                            .decimal_len(6, 2)
                            .not_null()
                            .default(50.00),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_freelancer_profile_user")
                            .from(FreelancerProfiles::Table, FreelancerProfiles::UserId)
                            .to(Alias::new("users"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FreelancerProfiles::Table).to_owned())
            .await
    }
}
