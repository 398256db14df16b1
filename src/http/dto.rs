//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! The wire format keeps the field names of the surrounding application:
//! program type name travels as `type`, duration is minutes.

use serde::{Deserialize, Serialize};

use crate::api::{NewProgramType, ProgramDetails, ProgramType, ProgramTypeChanges};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// One element of the program type listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramSummary {
    pub id: i64,
    #[serde(rename = "type")]
    pub type_name: String,
    pub description: Option<String>,
    pub duration: Option<i32>,
}

impl From<ProgramType> for ProgramSummary {
    fn from(program: ProgramType) -> Self {
        Self {
            id: program.id.value(),
            type_name: program.type_name,
            description: program.description,
            duration: program.duration,
        }
    }
}

/// Single program type response (no id; the caller addressed it by id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramResponse {
    #[serde(rename = "type")]
    pub type_name: String,
    pub description: Option<String>,
    pub duration: Option<i32>,
}

impl From<ProgramType> for ProgramResponse {
    fn from(program: ProgramType) -> Self {
        Self {
            type_name: program.type_name,
            description: program.description,
            duration: program.duration,
        }
    }
}

/// Request body for creating a program type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProgramRequest {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration: Option<i32>,
}

impl From<CreateProgramRequest> for NewProgramType {
    fn from(request: CreateProgramRequest) -> Self {
        Self {
            type_name: request.type_name,
            description: request.description,
            duration: request.duration,
        }
    }
}

/// Response for program type creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProgramResponse {
    pub msg: String,
    /// Id of the created program type
    pub program: i64,
}

/// Request body for a partial update. Absent fields keep their stored
/// values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProgramRequest {
    #[serde(rename = "type", default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration: Option<i32>,
}

impl From<UpdateProgramRequest> for ProgramTypeChanges {
    fn from(request: UpdateProgramRequest) -> Self {
        Self {
            type_name: request.type_name,
            description: request.description,
            duration: request.duration,
        }
    }
}

/// Simple `{"msg": ...}` response used by update and delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MsgResponse {
    pub msg: String,
}

impl MsgResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// Request body for the bulk set-details operation.
///
/// The payload nests the detail fields under `data` and carries the course
/// link separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetDetailsRequest {
    pub data: SetDetailsData,
    #[serde(default)]
    pub course_id: Option<i64>,
}

/// Detail fields of a set-details request. Absent fields clear the stored
/// values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetDetailsData {
    /// Program type to update
    pub id: i64,
    #[serde(rename = "type", default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration: Option<i32>,
    #[serde(default)]
    pub physical_location: Option<String>,
    #[serde(default)]
    pub virtual_link: Option<String>,
    #[serde(default)]
    pub auto_approve_appointments: Option<bool>,
    #[serde(default)]
    pub max_daily_meetings: Option<i32>,
    #[serde(default)]
    pub max_weekly_meetings: Option<i32>,
    #[serde(default)]
    pub max_monthly_meetings: Option<i32>,
}

impl SetDetailsRequest {
    /// Flatten the request into the repository-level detail set.
    pub fn into_details(self) -> ProgramDetails {
        ProgramDetails {
            course_id: self.course_id,
            type_name: self.data.type_name,
            description: self.data.description,
            duration: self.data.duration,
            physical_location: self.data.physical_location,
            virtual_link: self.data.virtual_link,
            auto_approve_appointments: self.data.auto_approve_appointments,
            max_daily_meetings: self.data.max_daily_meetings,
            max_weekly_meetings: self.data.max_weekly_meetings,
            max_monthly_meetings: self.data.max_monthly_meetings,
        }
    }
}

/// Success response for set-details (`message`, not `msg`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetDetailsResponse {
    pub message: String,
}

/// Error response for set-details (`error` key).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailsErrorResponse {
    pub error: String,
}
