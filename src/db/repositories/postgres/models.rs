use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{program_types, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = program_types)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProgramTypeRow {
    pub program_type_id: i64,
    pub course_id: Option<i64>,
    pub type_name: String,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub physical_location: Option<String>,
    pub virtual_link: Option<String>,
    pub auto_approve_appointments: Option<bool>,
    pub max_daily_meetings: Option<i32>,
    pub max_weekly_meetings: Option<i32>,
    pub max_monthly_meetings: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = program_types)]
pub struct NewProgramTypeRow {
    pub type_name: String,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
}

/// Partial update changeset. `None` fields are skipped by diesel, which is
/// exactly the "absent field keeps its stored value" update semantics.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = program_types)]
pub struct ProgramTypeChangeset {
    pub type_name: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub user_id: i64,
    pub username: String,
    pub account_type: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    pub username: String,
    pub account_type: String,
}
