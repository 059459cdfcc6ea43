use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "actors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub full_name: String,
    /// `YYYY-MM-DD`
    pub birthday: String,
    pub screen_actors_guild_member: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::role::Entity")]
    Role,
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl Model {
    pub fn birthday_date(&self) -> Option<jiff::civil::Date> {
        self.birthday.parse().ok()
    }
}

impl ActiveModelBehavior for ActiveModel {}
