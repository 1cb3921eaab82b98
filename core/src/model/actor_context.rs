use serde::{Deserialize, Serialize};

use super::Department;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    DepartmentAdmin,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActorContextError {
    #[error("role {0} requires a department")]
    MissingDepartment(Role),
}

/// Who is operating the session. Decides whether the department scope of a collection
/// can be chosen or is pinned to the operator's own department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorContext {
    role: Role,
    department: Option<Department>,
}

impl ActorContext {
    pub fn new(
        role: Role,
        department: Option<Department>,
    ) -> Result<ActorContext, ActorContextError> {
        if role == Role::DepartmentAdmin && department.is_none() {
            return Err(ActorContextError::MissingDepartment(role));
        }
        Ok(ActorContext { role, department })
    }

    pub fn unrestricted(role: Role) -> Result<ActorContext, ActorContextError> {
        ActorContext::new(role, None)
    }

    pub fn department_admin(department: impl Into<Department>) -> ActorContext {
        ActorContext {
            role: Role::DepartmentAdmin,
            department: Some(department.into()),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn department(&self) -> Option<&Department> {
        self.department.as_ref()
    }

    /// The department every collection written by this actor is pinned to, if any.
    pub fn restricted_department(&self) -> Option<&Department> {
        match self.role {
            Role::DepartmentAdmin => self.department.as_ref(),
            Role::SuperAdmin | Role::Admin => None,
        }
    }

    pub fn scope_department(&self, requested: Option<Department>) -> Option<Department> {
        match self.restricted_department() {
            Some(own) => Some(own.clone()),
            None => requested,
        }
    }
}

#[cfg(test)]
mod test {
    use claims::{assert_err, assert_ok};

    use super::*;

    #[test]
    fn department_admin_needs_department() {
        assert_err!(ActorContext::new(Role::DepartmentAdmin, None));
        assert_ok!(ActorContext::new(Role::Admin, None));
    }

    #[test]
    fn restricted_scope_ignores_requested_department() {
        let actor = ActorContext::department_admin("CSE");
        assert_eq!(
            actor.scope_department(Some(Department::from("ECE"))),
            Some(Department::from("CSE"))
        );
        assert_eq!(actor.scope_department(None), Some(Department::from("CSE")));
    }

    #[test]
    fn unrestricted_scope_is_free() {
        let actor = ActorContext::new(Role::Admin, Some(Department::from("CSE"))).unwrap();
        assert_eq!(actor.restricted_department(), None);
        assert_eq!(actor.scope_department(None), None);
        assert_eq!(
            actor.scope_department(Some(Department::from("ECE"))),
            Some(Department::from("ECE"))
        );
    }

    #[test]
    fn parse_role() {
        assert_eq!("department_admin".parse::<Role>().unwrap(), Role::DepartmentAdmin);
    }
}
