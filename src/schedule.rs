use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a schedule: the (client, session) pair it books.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleKey {
    pub client_email: String,
    pub session_id: i32,
}

impl fmt::Display for ScheduleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "client '{}' in session {}",
            self.client_email, self.session_id
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Unpaid => "unpaid",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "paid" => Some(PaymentStatus::Paid),
            "unpaid" => Some(PaymentStatus::Unpaid),
            _ => None,
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, PaymentStatus::Paid)
    }
}

/// Books one client into one session. References are by identity key, so a
/// schedule stays valid only while both referenced entities are in the
/// store; the store enforces that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub client_email: String,
    pub session_id: i32,
    pub payment: PaymentStatus,
    pub remark: String,
    pub weight_kg: Option<f64>,
}

impl Schedule {
    pub fn new(client_email: impl Into<String>, session_id: i32) -> Self {
        Self {
            client_email: client_email.into(),
            session_id,
            payment: PaymentStatus::Unpaid,
            remark: String::new(),
            weight_kg: None,
        }
    }

    pub fn key(&self) -> ScheduleKey {
        ScheduleKey {
            client_email: self.client_email.clone(),
            session_id: self.session_id,
        }
    }
}
