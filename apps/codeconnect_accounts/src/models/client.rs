use sea_orm::entity::prelude::*;
use sea_orm::{QueryFilter, QueryOrder};

/// A customer record owned by one freelancer. (freelancer_id, name) is
/// unique, so a freelancer cannot file the same client twice.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub id: i64,

    pub freelancer_id: i64,

    pub name: String,
    pub contact_email: String,
    pub phone: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::freelancer_profile::Entity",
        from = "Column::FreelancerId",
        to = "super::freelancer_profile::Column::UserId",
        on_delete = "Cascade"
    )]
    Freelancer,
}

impl Related<super::freelancer_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Freelancer.def()
    }
}

impl Entity {
    /// Roster of one freelancer, in the default name ordering.
    pub fn for_freelancer(freelancer_id: i64) -> Select<Entity> {
        Self::find()
            .filter(Column::FreelancerId.eq(freelancer_id))
            .order_by_asc(Column::Name)
    }
}

impl ActiveModelBehavior for ActiveModel {}
