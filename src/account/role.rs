//! Account roles and the small closed vocabularies used by the registration form.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The three kinds of SUMAK account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Entrepreneur,
    Facilitator,
    Client,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Entrepreneur, Role::Facilitator, Role::Client];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entrepreneur => "entrepreneur",
            Self::Facilitator => "facilitator",
            Self::Client => "client",
        }
    }

    /// Page a freshly logged-in account lands on.
    pub fn dashboard_route(&self) -> &'static str {
        match self {
            Self::Entrepreneur => "dashboard-entrepreneur",
            Self::Facilitator => "dashboard-facilitator",
            Self::Client => "dashboard-client",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    /// Accepts the English names and the Spanish form values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "entrepreneur" | "emprendedor" => Ok(Self::Entrepreneur),
            "facilitator" | "facilitador" => Ok(Self::Facilitator),
            "client" | "cliente" => Ok(Self::Client),
            other => Err(other.to_string()),
        }
    }
}

/// What an entrepreneur wants to improve first.
///
/// Values outside the known four are kept verbatim so the account records
/// what was submitted; they simply select no goal task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Goal {
    Finance,
    Sales,
    Marketing,
    Clients,
    Other(String),
}

impl From<String> for Goal {
    fn from(raw: String) -> Self {
        match raw.trim() {
            "finance" | "finanzas" => Self::Finance,
            "sales" | "ventas" => Self::Sales,
            "marketing" => Self::Marketing,
            "clients" | "clientes" => Self::Clients,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for Goal {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<Goal> for String {
    fn from(goal: Goal) -> Self {
        match goal {
            Goal::Finance => "finance".to_string(),
            Goal::Sales => "sales".to_string(),
            Goal::Marketing => "marketing".to_string(),
            Goal::Clients => "clients".to_string(),
            Goal::Other(raw) => raw,
        }
    }
}

/// An answer to one diagnostic question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Answer {
    Yes,
    No,
    Sometimes,
    Roughly,
    Other(String),
}

impl From<String> for Answer {
    fn from(raw: String) -> Self {
        match raw.trim() {
            "yes" | "si" | "sí" => Self::Yes,
            "no" => Self::No,
            "sometimes" | "aveces" => Self::Sometimes,
            "roughly" | "mas-o-menos" => Self::Roughly,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for Answer {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<Answer> for String {
    fn from(answer: Answer) -> Self {
        match answer {
            Answer::Yes => "yes".to_string(),
            Answer::No => "no".to_string(),
            Answer::Sometimes => "sometimes".to_string(),
            Answer::Roughly => "roughly".to_string(),
            Answer::Other(raw) => raw,
        }
    }
}

/// Answers to the five fixed diagnostic questions. Unanswered questions are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q1: Option<Answer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q2: Option<Answer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q3: Option<Answer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q4: Option<Answer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q5: Option<Answer>,
}
