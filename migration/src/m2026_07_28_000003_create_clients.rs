use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Clients {
    Table,
    Id,
    FreelancerId,
    Name,
    ContactEmail,
    Phone,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Clients::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Clients::FreelancerId).big_integer().not_null())
                    .col(ColumnDef::new(Clients::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Clients::ContactEmail).string_len(254).not_null())
                    .col(ColumnDef::new(Clients::Phone).string_len(20).null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_client_freelancer")
                            .from(Clients::Table, Clients::FreelancerId)
                            .to(Alias::new("freelancer_profiles"), Alias::new("user_id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // a freelancer cannot carry two clients under the same name
        manager
            .create_index(
                Index::create()
                    .name("idx_clients_freelancer_name")
                    .table(Clients::Table)
                    .col(Clients::FreelancerId)
                    .col(Clients::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Clients::Table).to_owned())
            .await
    }
}
