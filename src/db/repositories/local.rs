//! In-memory repository for unit testing and local development.
//!
//! Data lives in `RwLock`-guarded maps and is lost when the process exits.
//! Mutations take the write lock for their full duration, so a failed
//! operation never publishes a partial record.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::api::{
    NewProgramType, NewUser, ProgramDetails, ProgramType, ProgramTypeChanges, ProgramTypeId, User,
    UserId,
};
use crate::db::repository::{
    ErrorContext, ProgramTypeRepository, RepositoryError, RepositoryResult, UserRepository,
};

/// In-memory repository backed by hash maps.
#[derive(Debug)]
pub struct LocalRepository {
    programs: RwLock<HashMap<i64, ProgramType>>,
    users: RwLock<HashMap<i64, User>>,
    next_program_id: RwLock<i64>,
    next_user_id: RwLock<i64>,
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            programs: RwLock::new(HashMap::new()),
            users: RwLock::new(HashMap::new()),
            next_program_id: RwLock::new(1),
            next_user_id: RwLock::new(1),
        }
    }

    fn allocate_program_id(&self) -> i64 {
        let mut next = self.next_program_id.write();
        let id = *next;
        *next += 1;
        id
    }

    fn allocate_user_id(&self) -> i64 {
        let mut next = self.next_user_id.write();
        let id = *next;
        *next += 1;
        id
    }

    fn missing_program(id: ProgramTypeId) -> RepositoryError {
        RepositoryError::not_found(format!("Program type {} not found", id)).with_context(
            ErrorContext::new("get_program_type")
                .with_entity("program_type")
                .with_entity_id(id),
        )
    }
}

#[async_trait]
impl ProgramTypeRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }

    async fn list_program_types(&self) -> RepositoryResult<Vec<ProgramType>> {
        let programs = self.programs.read();
        let mut all: Vec<ProgramType> = programs.values().cloned().collect();
        all.sort_by_key(|p| p.id);
        Ok(all)
    }

    async fn get_program_type(&self, id: ProgramTypeId) -> RepositoryResult<ProgramType> {
        self.programs
            .read()
            .get(&id.value())
            .cloned()
            .ok_or_else(|| Self::missing_program(id))
    }

    async fn find_program_type_by_name(
        &self,
        type_name: &str,
    ) -> RepositoryResult<Option<ProgramType>> {
        Ok(self
            .programs
            .read()
            .values()
            .find(|p| p.type_name == type_name)
            .cloned())
    }

    async fn create_program_type(&self, new: &NewProgramType) -> RepositoryResult<ProgramType> {
        let mut programs = self.programs.write();

        if programs.values().any(|p| p.type_name == new.type_name) {
            return Err(RepositoryError::conflict(format!(
                "Program type '{}' already exists",
                new.type_name
            ))
            .with_context(ErrorContext::new("create_program_type").with_entity("program_type")));
        }

        let id = self.allocate_program_id();
        let program = ProgramType {
            id: ProgramTypeId::new(id),
            course_id: None,
            type_name: new.type_name.clone(),
            description: new.description.clone(),
            duration: new.duration,
            physical_location: None,
            virtual_link: None,
            auto_approve_appointments: None,
            max_daily_meetings: None,
            max_weekly_meetings: None,
            max_monthly_meetings: None,
            created_at: Utc::now(),
        };
        programs.insert(id, program.clone());
        Ok(program)
    }

    async fn update_program_type(
        &self,
        id: ProgramTypeId,
        changes: &ProgramTypeChanges,
    ) -> RepositoryResult<ProgramType> {
        let mut programs = self.programs.write();
        let program = programs
            .get_mut(&id.value())
            .ok_or_else(|| Self::missing_program(id))?;

        if let Some(ref type_name) = changes.type_name {
            program.type_name = type_name.clone();
        }
        if let Some(ref description) = changes.description {
            program.description = Some(description.clone());
        }
        if let Some(duration) = changes.duration {
            program.duration = Some(duration);
        }

        Ok(program.clone())
    }

    async fn delete_program_type(&self, id: ProgramTypeId) -> RepositoryResult<()> {
        let mut programs = self.programs.write();
        programs
            .remove(&id.value())
            .map(|_| ())
            .ok_or_else(|| Self::missing_program(id))
    }

    async fn set_program_details(
        &self,
        id: ProgramTypeId,
        details: &ProgramDetails,
    ) -> RepositoryResult<ProgramType> {
        let mut programs = self.programs.write();
        let program = programs
            .get_mut(&id.value())
            .ok_or_else(|| Self::missing_program(id))?;

        // Full overwrite: absent fields clear the stored value.
        program.course_id = details.course_id;
        if let Some(ref type_name) = details.type_name {
            program.type_name = type_name.clone();
        }
        program.description = details.description.clone();
        program.duration = details.duration;
        program.physical_location = details.physical_location.clone();
        program.virtual_link = details.virtual_link.clone();
        program.auto_approve_appointments = details.auto_approve_appointments;
        program.max_daily_meetings = details.max_daily_meetings;
        program.max_weekly_meetings = details.max_weekly_meetings;
        program.max_monthly_meetings = details.max_monthly_meetings;

        Ok(program.clone())
    }
}

#[async_trait]
impl UserRepository for LocalRepository {
    async fn get_user(&self, id: UserId) -> RepositoryResult<User> {
        self.users.read().get(&id.value()).cloned().ok_or_else(|| {
            RepositoryError::not_found(format!("User {} not found", id)).with_context(
                ErrorContext::new("get_user")
                    .with_entity("user")
                    .with_entity_id(id),
            )
        })
    }

    async fn create_user(&self, new: &NewUser) -> RepositoryResult<User> {
        let mut users = self.users.write();

        if users.values().any(|u| u.username == new.username) {
            return Err(RepositoryError::conflict(format!(
                "Username '{}' already exists",
                new.username
            ))
            .with_context(ErrorContext::new("create_user").with_entity("user")));
        }

        let id = self.allocate_user_id();
        let user = User {
            id: UserId::new(id),
            username: new.username.clone(),
            account_type: new.account_type,
            created_at: Utc::now(),
        };
        users.insert(id, user.clone());
        Ok(user)
    }
}
