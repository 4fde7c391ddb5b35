//! Dashboard figures derived from an account: progress, initials, task cards.

use serde::Serialize;

use crate::account::{Account, EntrepreneurProfile};
use crate::tasks::Task;

/// Whole-number completion percentage, 0 when there is nothing to do.
pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (completed.min(total) as f64 / total as f64 * 100.0).round();
    pct as u8
}

/// Avatar initials: first letter of the first two words, uppercased.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Task card as shown on the entrepreneur dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct TaskCard {
    pub id: u32,
    pub title: String,
    pub category: String,
    pub priority_label: &'static str,
    pub time_estimate: String,
    pub difficulty: String,
    pub completed: bool,
}

impl TaskCard {
    fn from_task(task: &Task, completed: bool) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            category: task.category.to_string(),
            priority_label: task.priority.label(),
            time_estimate: task.time_estimate.clone(),
            difficulty: task.difficulty.clone(),
            completed,
        }
    }
}

/// Everything the entrepreneur dashboard renders.
#[derive(Debug, Clone, Serialize)]
pub struct EntrepreneurDashboard {
    pub business_name: String,
    pub initials: String,
    pub cards: Vec<TaskCard>,
    pub completed: usize,
    pub total: usize,
    pub progress: u8,
    pub streak: u32,
    pub badges: usize,
}

impl EntrepreneurDashboard {
    pub fn build(account: &Account, profile: &EntrepreneurProfile) -> Self {
        let total = profile.personalized_path.len();
        let completed = profile.completed_count();
        Self {
            business_name: profile.business_name.clone(),
            initials: initials(&account.name),
            cards: profile
                .personalized_path
                .iter()
                .map(|t| TaskCard::from_task(t, profile.is_completed(t.id)))
                .collect(),
            completed,
            total,
            progress: progress_percent(completed, total),
            streak: profile.streak,
            badges: profile.badges.len(),
        }
    }

    /// Dashboard for an account, `None` unless it is an entrepreneur.
    pub fn for_account(account: &Account) -> Option<Self> {
        account.entrepreneur().map(|p| Self::build(account, p))
    }
}
