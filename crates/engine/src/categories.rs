//! Category registry shared across receipts.
//!
//! Categories are created lazily on first reference by name and never
//! deleted. The `name` column carries a unique index, which is what makes
//! [`resolve`] safe under concurrent uploads mentioning the same name.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue, ConnectionTrait, DbErr, QueryFilter, entity::prelude::*};
use uuid::Uuid;

use crate::EngineError;

/// A named grouping of receipt items.
#[derive(Clone, Debug, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::receipt_items::Entity")]
    ReceiptItems,
}

impl Related<super::receipt_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReceiptItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Category {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("category not exists".to_string()))?,
            name: model.name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Find-or-create a category by name, returning the stored row.
///
/// Implemented as an insert with `ON CONFLICT (name) DO NOTHING` followed
/// by a select, so two concurrent resolutions of the same name both land
/// on the same row and no duplicate can be created. The found path is a
/// no-op update; `updated_at` is left untouched.
pub(crate) async fn resolve<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    now: DateTime<Utc>,
) -> Result<Category, EngineError> {
    let insert = ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4().to_string()),
        name: ActiveValue::Set(name.to_string()),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
    };

    let inserted = Entity::insert(insert)
        .on_conflict(OnConflict::column(Column::Name).do_nothing().to_owned())
        .exec(conn)
        .await;
    match inserted {
        Ok(_) | Err(DbErr::RecordNotInserted) => {}
        Err(err) => return Err(err.into()),
    }

    let model = Entity::find()
        .filter(Column::Name.eq(name))
        .one(conn)
        .await?
        .ok_or_else(|| EngineError::KeyNotFound(name.to_string()))?;

    Category::try_from(model)
}
