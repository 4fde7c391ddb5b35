//! Account data model: one record per registered user, with a role-specific payload.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::RecoveryCode;
use crate::error::{RegistrationError, TaskError};
use crate::tasks::{CompletedTask, Task, TaskStatus};
use crate::wizard::{Field, FormSnapshot, RadioGroup};

use super::role::{Answer, Diagnostic, Goal, Role};

/// Institution recorded for facilitators who leave the field blank.
pub const DEFAULT_INSTITUTION: &str = "Independent";

/// A registered account.
///
/// The role payload is private so the role cannot change after creation;
/// use the typed accessors to read or edit it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Stored as entered. There is no security model.
    pub credential: String,
    profile: RoleProfile,
    pub created_at: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
    /// Outstanding password recovery code, cleared once redeemed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery: Option<RecoveryCode>,
}

/// Role-specific payload. Exactly one per account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum RoleProfile {
    Entrepreneur(EntrepreneurProfile),
    Facilitator(FacilitatorProfile),
    Client(ClientProfile),
}

impl RoleProfile {
    pub fn role(&self) -> Role {
        match self {
            Self::Entrepreneur(_) => Role::Entrepreneur,
            Self::Facilitator(_) => Role::Facilitator,
            Self::Client(_) => Role::Client,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntrepreneurProfile {
    pub business_name: String,
    pub business_sector: String,
    pub goal: Goal,
    pub connectivity: String,
    pub diagnostic: Diagnostic,
    /// Generated once at registration and never regenerated.
    pub personalized_path: Vec<Task>,
    /// Authoritative completion history; task statuses are derived from it.
    pub completed_tasks: Vec<CompletedTask>,
    pub badges: Vec<String>,
    pub streak: u32,
}

impl EntrepreneurProfile {
    /// Record a task as completed at `at` and refresh the derived statuses.
    pub fn complete_task(&mut self, task_id: u32, at: DateTime<Utc>) -> Result<&Task, TaskError> {
        if !self.personalized_path.iter().any(|t| t.id == task_id) {
            return Err(TaskError::NotFound(task_id));
        }
        if self.is_completed(task_id) {
            return Err(TaskError::AlreadyCompleted(task_id));
        }

        self.completed_tasks.push(CompletedTask {
            id: task_id,
            completed_at: at,
        });
        self.refresh_task_status();

        self.personalized_path
            .iter()
            .find(|t| t.id == task_id)
            .ok_or(TaskError::NotFound(task_id))
    }

    pub fn is_completed(&self, task_id: u32) -> bool {
        self.completed_tasks.iter().any(|c| c.id == task_id)
    }

    /// Re-derive every task's status from the completion log.
    pub fn refresh_task_status(&mut self) {
        let done: BTreeSet<u32> = self.completed_tasks.iter().map(|c| c.id).collect();
        for task in &mut self.personalized_path {
            task.status = if done.contains(&task.id) {
                TaskStatus::Completed
            } else {
                TaskStatus::Pending
            };
        }
    }

    /// Tasks still waiting to be done, in path order.
    pub fn pending_tasks(&self) -> impl Iterator<Item = &Task> {
        self.personalized_path
            .iter()
            .filter(|t| !self.is_completed(t.id))
    }

    /// Number of distinct path tasks found in the completion log.
    pub fn completed_count(&self) -> usize {
        self.personalized_path
            .iter()
            .filter(|t| self.is_completed(t.id))
            .count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilitatorProfile {
    pub institution: String,
    pub specialization: String,
    pub experience: String,
    pub motivation: String,
    pub students: Vec<String>,
    pub courses_created: Vec<String>,
    pub rating: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientProfile {
    pub location: String,
    pub discovery_method: String,
    pub interests: BTreeSet<String>,
    pub favorite_businesses: Vec<u64>,
    pub reviews: Vec<Review>,
}

impl ClientProfile {
    /// Add the business to favourites, or remove it if already there.
    /// Returns `true` when the business is a favourite afterwards.
    pub fn toggle_favorite(&mut self, business_id: u64) -> bool {
        match self
            .favorite_businesses
            .iter()
            .position(|id| *id == business_id)
        {
            Some(idx) => {
                self.favorite_businesses.remove(idx);
                false
            }
            None => {
                self.favorite_businesses.push(business_id);
                true
            }
        }
    }
}

/// A client's review of a business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub business_id: u64,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Build a new account from a submitted registration form.
    ///
    /// The entrepreneur task path is left empty; the registration flow fills
    /// it in before the account is stored.
    pub fn from_form(form: &FormSnapshot, now: DateTime<Utc>) -> Result<Self, RegistrationError> {
        let role = match form.checked(RadioGroup::Role) {
            None => return Err(RegistrationError::InvalidRole("none selected".to_string())),
            Some(raw) => raw
                .parse::<Role>()
                .map_err(RegistrationError::InvalidRole)?,
        };

        let text = |field: Field| form.value(field).trim().to_string();
        let radio = |group: RadioGroup| form.checked(group).unwrap_or_default().to_string();
        let answer = |group: RadioGroup| form.checked(group).map(Answer::from);

        let profile = match role {
            Role::Entrepreneur => RoleProfile::Entrepreneur(EntrepreneurProfile {
                business_name: text(Field::BusinessName),
                business_sector: text(Field::BusinessSector),
                goal: Goal::from(radio(RadioGroup::Goal)),
                connectivity: radio(RadioGroup::Connectivity),
                diagnostic: Diagnostic {
                    q1: answer(RadioGroup::Q1),
                    q2: answer(RadioGroup::Q2),
                    q3: answer(RadioGroup::Q3),
                    q4: answer(RadioGroup::Q4),
                    q5: answer(RadioGroup::Q5),
                },
                personalized_path: Vec::new(),
                completed_tasks: Vec::new(),
                badges: Vec::new(),
                streak: 0,
            }),
            Role::Facilitator => {
                let institution = text(Field::Institution);
                RoleProfile::Facilitator(FacilitatorProfile {
                    institution: if institution.is_empty() {
                        DEFAULT_INSTITUTION.to_string()
                    } else {
                        institution
                    },
                    specialization: text(Field::Specialization),
                    experience: text(Field::Experience),
                    motivation: text(Field::Motivation),
                    students: Vec::new(),
                    courses_created: Vec::new(),
                    rating: 0.0,
                })
            }
            Role::Client => RoleProfile::Client(ClientProfile {
                location: text(Field::Location),
                discovery_method: radio(RadioGroup::DiscoveryMethod),
                interests: form.interests.clone(),
                favorite_businesses: Vec::new(),
                reviews: Vec::new(),
            }),
        };

        Ok(Self {
            id: Uuid::new_v4(),
            name: text(Field::Name),
            email: text(Field::Email),
            phone: text(Field::Phone),
            credential: form.value(Field::Password).to_string(),
            profile,
            created_at: now,
            last_login: now,
            recovery: None,
        })
    }

    pub fn role(&self) -> Role {
        self.profile.role()
    }

    pub fn profile(&self) -> &RoleProfile {
        &self.profile
    }

    pub fn entrepreneur(&self) -> Option<&EntrepreneurProfile> {
        match &self.profile {
            RoleProfile::Entrepreneur(p) => Some(p),
            _ => None,
        }
    }

    pub fn entrepreneur_mut(&mut self) -> Option<&mut EntrepreneurProfile> {
        match &mut self.profile {
            RoleProfile::Entrepreneur(p) => Some(p),
            _ => None,
        }
    }

    pub fn facilitator(&self) -> Option<&FacilitatorProfile> {
        match &self.profile {
            RoleProfile::Facilitator(p) => Some(p),
            _ => None,
        }
    }

    pub fn client(&self) -> Option<&ClientProfile> {
        match &self.profile {
            RoleProfile::Client(p) => Some(p),
            _ => None,
        }
    }

    pub fn client_mut(&mut self) -> Option<&mut ClientProfile> {
        match &mut self.profile {
            RoleProfile::Client(p) => Some(p),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::{Priority, TaskCategory};

    fn base_form(role: &str) -> FormSnapshot {
        let mut form = FormSnapshot::default();
        form.check(RadioGroup::Role, role);
        form.set(Field::Name, "  Rosa Quispe ");
        form.set(Field::Email, "rosa@sumak.pe");
        form.set(Field::Phone, "987 654 321");
        form.set(Field::Password, "secreto");
        form
    }

    fn task(id: u32) -> Task {
        Task {
            id,
            title: format!("task {id}"),
            description: String::new(),
            category: TaskCategory::Finance,
            priority: Priority::High,
            time_estimate: "5 minutes".into(),
            difficulty: "Easy".into(),
            status: TaskStatus::Pending,
        }
    }

    #[test]
    fn entrepreneur_from_form() {
        let mut form = base_form("emprendedor");
        form.set(Field::BusinessName, "Bodega Rosa");
        form.set(Field::BusinessSector, "retail");
        form.check(RadioGroup::Goal, "ventas");
        form.check(RadioGroup::Connectivity, "high");
        form.check(RadioGroup::Q1, "no");
        form.check(RadioGroup::Q2, "aveces");

        let now = Utc::now();
        let account = Account::from_form(&form, now).unwrap();
        assert_eq!(account.role(), Role::Entrepreneur);
        assert_eq!(account.name, "Rosa Quispe");
        assert_eq!(account.created_at, now);
        assert_eq!(account.last_login, now);

        let p = account.entrepreneur().unwrap();
        assert_eq!(p.goal, Goal::Sales);
        assert_eq!(p.diagnostic.q1, Some(Answer::No));
        assert_eq!(p.diagnostic.q2, Some(Answer::Sometimes));
        assert_eq!(p.diagnostic.q3, None);
        assert!(p.personalized_path.is_empty());
        assert_eq!(p.streak, 0);
        assert!(account.client().is_none());
    }

    #[test]
    fn facilitator_institution_defaults() {
        let mut form = base_form("facilitator");
        form.set(Field::Institution, "   ");
        form.set(Field::Specialization, "finance");
        let account = Account::from_form(&form, Utc::now()).unwrap();
        let p = account.facilitator().unwrap();
        assert_eq!(p.institution, DEFAULT_INSTITUTION);
        assert_eq!(p.rating, 0.0);
    }

    #[test]
    fn client_keeps_interests() {
        let mut form = base_form("cliente");
        form.set(Field::Location, "Cusco");
        form.check(RadioGroup::DiscoveryMethod, "friend");
        form.interests.insert("food".into());
        form.interests.insert("textiles".into());
        let account = Account::from_form(&form, Utc::now()).unwrap();
        let p = account.client().unwrap();
        assert_eq!(p.location, "Cusco");
        assert_eq!(p.interests.len(), 2);
    }

    #[test]
    fn missing_or_unknown_role_is_refused() {
        let mut form = base_form("client");
        form.radios.remove(&RadioGroup::Role);
        assert!(matches!(
            Account::from_form(&form, Utc::now()),
            Err(RegistrationError::InvalidRole(_))
        ));

        let form = base_form("admin");
        match Account::from_form(&form, Utc::now()) {
            Err(RegistrationError::InvalidRole(raw)) => assert_eq!(raw, "admin"),
            other => panic!("expected InvalidRole, got {other:?}"),
        }
    }

    #[test]
    fn completion_log_drives_status() {
        let mut form = base_form("entrepreneur");
        form.check(RadioGroup::Goal, "finance");
        let mut account = Account::from_form(&form, Utc::now()).unwrap();
        let p = account.entrepreneur_mut().unwrap();
        p.personalized_path = vec![task(1), task(2)];

        let done = p.complete_task(2, Utc::now()).unwrap();
        assert_eq!(done.status, TaskStatus::Completed);
        assert_eq!(p.personalized_path[0].status, TaskStatus::Pending);
        assert_eq!(p.completed_count(), 1);
        assert_eq!(p.pending_tasks().map(|t| t.id).collect::<Vec<_>>(), vec![1]);

        assert!(matches!(p.complete_task(2, Utc::now()), Err(TaskError::AlreadyCompleted(2))));
        assert!(matches!(p.complete_task(9, Utc::now()), Err(TaskError::NotFound(9))));
        assert_eq!(p.completed_tasks.len(), 1);
    }

    #[test]
    fn refresh_repairs_stale_status() {
        let mut form = base_form("entrepreneur");
        form.check(RadioGroup::Goal, "finance");
        let mut account = Account::from_form(&form, Utc::now()).unwrap();
        let p = account.entrepreneur_mut().unwrap();
        let mut stale = task(1);
        stale.status = TaskStatus::Completed;
        p.personalized_path = vec![stale];
        p.refresh_task_status();
        assert_eq!(p.personalized_path[0].status, TaskStatus::Pending);
    }

    #[test]
    fn toggle_favorite_adds_then_removes() {
        let mut form = base_form("client");
        form.set(Field::Location, "Lima");
        let mut account = Account::from_form(&form, Utc::now()).unwrap();
        let p = account.client_mut().unwrap();
        assert!(p.toggle_favorite(3));
        assert!(p.toggle_favorite(1));
        assert_eq!(p.favorite_businesses, vec![3, 1]);
        assert!(!p.toggle_favorite(3));
        assert_eq!(p.favorite_businesses, vec![1]);
    }

    #[test]
    fn account_serde_roundtrip_keeps_role_tag() {
        let mut form = base_form("facilitator");
        form.set(Field::Specialization, "marketing");
        let account = Account::from_form(&form, Utc::now()).unwrap();

        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["profile"]["role"], "facilitator");

        let parsed: Account = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.role(), Role::Facilitator);
        assert_eq!(parsed.id, account.id);
    }
}
