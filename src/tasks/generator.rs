//! Personalized task path: turns the registration diagnostic into an ordered task list.
//!
//! The rule table is fixed and evaluated top to bottom:
//! - always: welcome task
//! - q1 = no: income/expense tracking
//! - q2 = no | sometimes: separate personal and business expenses
//! - q3 = no | sometimes: first social media post
//! - q4 = no | roughly: most profitable product
//! - one task for the stated goal, none for an unrecognized goal
//!
//! Ids are assigned in emission order starting at 1.

use tracing::debug;

use crate::account::{Account, Answer, EntrepreneurProfile, Goal, RoleProfile};
use crate::error::RegistrationError;

use super::model::{Priority, Task, TaskCategory, TaskStatus};

/// Static description of a task before it gets an id.
struct Template {
    title: &'static str,
    description: &'static str,
    category: TaskCategory,
    priority: Priority,
    time_estimate: &'static str,
    difficulty: &'static str,
}

const WELCOME: Template = Template {
    title: "Welcome to SUMAK!",
    description: "Complete your profile and explore your dashboard",
    category: TaskCategory::Introduction,
    priority: Priority::High,
    time_estimate: "5 minutes",
    difficulty: "Very easy",
};

const TRACK_INCOME: Template = Template {
    title: "Create your first income and expense record",
    description: "Learn to record every sale and expense of the day with a simple template",
    category: TaskCategory::Finance,
    priority: Priority::High,
    time_estimate: "15 minutes",
    difficulty: "Easy",
};

const SEPARATE_EXPENSES: Template = Template {
    title: "Separate personal and business expenses",
    description: "Identify which expenses belong to the business and which are personal",
    category: TaskCategory::Finance,
    priority: Priority::High,
    time_estimate: "10 minutes",
    difficulty: "Easy",
};

const FIRST_POST: Template = Template {
    title: "Create your first social media post",
    description: "Take a photo of your best-selling product and post it on Facebook/Instagram",
    category: TaskCategory::Marketing,
    priority: Priority::Medium,
    time_estimate: "10 minutes",
    difficulty: "Easy",
};

const PROFITABLE_PRODUCT: Template = Template {
    title: "Identify your most profitable product",
    description: "Work out how much you really earn on each product you sell",
    category: TaskCategory::Finance,
    priority: Priority::Medium,
    time_estimate: "20 minutes",
    difficulty: "Medium",
};

const PROFIT_MARGIN: Template = Template {
    title: "Calculate your profit margin",
    description: "Learn how much you keep from every 100 soles you sell",
    category: TaskCategory::Finance,
    priority: Priority::Medium,
    time_estimate: "15 minutes",
    difficulty: "Medium",
};

const PROMOTION: Template = Template {
    title: "Create an effective promotion",
    description: "Design an offer that attracts more customers without losing money",
    category: TaskCategory::Sales,
    priority: Priority::Medium,
    time_estimate: "15 minutes",
    difficulty: "Medium",
};

const MESSAGING: Template = Template {
    title: "Optimize your WhatsApp Business profile",
    description: "Set up a catalog and automatic replies",
    category: TaskCategory::Marketing,
    priority: Priority::Medium,
    time_estimate: "20 minutes",
    difficulty: "Medium",
};

const CUSTOMER_DATABASE: Template = Template {
    title: "Build a customer database",
    description: "Write down the names and preferences of your regular customers",
    category: TaskCategory::Sales,
    priority: Priority::Medium,
    time_estimate: "15 minutes",
    difficulty: "Easy",
};

/// Collects templates and hands out sequential ids.
struct PathBuilder {
    tasks: Vec<Task>,
}

impl PathBuilder {
    fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    fn push(&mut self, t: &Template) {
        let id = self.tasks.len() as u32 + 1;
        self.tasks.push(Task {
            id,
            title: t.title.to_string(),
            description: t.description.to_string(),
            category: t.category,
            priority: t.priority,
            time_estimate: t.time_estimate.to_string(),
            difficulty: t.difficulty.to_string(),
            status: TaskStatus::Pending,
        });
    }

    fn push_if(&mut self, condition: bool, t: &Template) {
        if condition {
            self.push(t);
        }
    }
}

fn is_any(answer: &Option<Answer>, triggers: &[Answer]) -> bool {
    answer.as_ref().is_some_and(|a| triggers.contains(a))
}

/// Generate the task path for an entrepreneur profile.
pub fn generate(profile: &EntrepreneurProfile) -> Vec<Task> {
    let d = &profile.diagnostic;
    let mut path = PathBuilder::new();

    path.push(&WELCOME);
    path.push_if(is_any(&d.q1, &[Answer::No]), &TRACK_INCOME);
    path.push_if(is_any(&d.q2, &[Answer::No, Answer::Sometimes]), &SEPARATE_EXPENSES);
    path.push_if(is_any(&d.q3, &[Answer::No, Answer::Sometimes]), &FIRST_POST);
    path.push_if(is_any(&d.q4, &[Answer::No, Answer::Roughly]), &PROFITABLE_PRODUCT);

    match &profile.goal {
        Goal::Finance => path.push(&PROFIT_MARGIN),
        Goal::Sales => path.push(&PROMOTION),
        Goal::Marketing => path.push(&MESSAGING),
        Goal::Clients => path.push(&CUSTOMER_DATABASE),
        Goal::Other(raw) => debug!(goal = %raw, "Unrecognized goal, no goal task added"),
    }

    path.tasks
}

/// Generate the task path for an account. Only entrepreneurs have one.
pub fn generate_for(account: &Account) -> Result<Vec<Task>, RegistrationError> {
    match account.profile() {
        RoleProfile::Entrepreneur(profile) => Ok(generate(profile)),
        RoleProfile::Facilitator(_) | RoleProfile::Client(_) => {
            Err(RegistrationError::InvalidRole(account.role().to_string()))
        }
    }
}
