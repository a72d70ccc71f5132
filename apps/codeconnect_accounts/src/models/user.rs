use sea_orm::entity::prelude::*;

/// Authentication principal. Email doubles as the login identifier, so it is
/// unique alongside the username. The `is_freelancer`/`is_client` pair is
/// deliberately unconstrained; a role enum would change observable behavior.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub id: i64,

    #[sea_orm(unique)]
    pub username: String,

    #[sea_orm(unique)]
    pub email: String,

    pub password_hash: String,

    pub is_freelancer: bool,
    pub is_client: bool,
    pub is_active: bool,

    pub last_login: Option<ChronoDateTimeUtc>,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::freelancer_profile::Entity")]
    FreelancerProfile,
}

impl Related<super::freelancer_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FreelancerProfile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
