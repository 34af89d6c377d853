//! Quiz question entity - The trivia question pool.
//!
//! Seeded with a stock set on first startup; the quiz manager draws a
//! random row when a session starts. Answers are stored in canonical
//! lowercase form.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Quiz question database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quiz_questions")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// The question text shown to the guild
    pub question: String,
    /// Canonical accepted answer, lowercase
    pub answer: String,
}

/// Quiz questions have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
