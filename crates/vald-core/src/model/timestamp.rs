use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Eq,
    Ne,
    Ge,
    Gt,
    Le,
    Lt,
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operator::Eq => write!(f, "eq"),
            Operator::Ne => write!(f, "ne"),
            Operator::Ge => write!(f, "ge"),
            Operator::Gt => write!(f, "gt"),
            Operator::Le => write!(f, "le"),
            Operator::Lt => write!(f, "lt"),
        }
    }
}

/// A condition of the form `object timestamp <operator> timestamp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampCondition {
    pub timestamp: i64,
    pub operator: Operator,
}

impl TimestampCondition {
    pub fn new(operator: Operator, timestamp: i64) -> Self {
        Self {
            timestamp,
            operator,
        }
    }

    pub fn matches(&self, value: i64) -> bool {
        match self.operator {
            Operator::Eq => value == self.timestamp,
            Operator::Ne => value != self.timestamp,
            Operator::Ge => value >= self.timestamp,
            Operator::Gt => value > self.timestamp,
            Operator::Le => value <= self.timestamp,
            Operator::Lt => value < self.timestamp,
        }
    }
}

/// True when `value` satisfies every condition.
pub fn matches_all(conditions: &[TimestampCondition], value: i64) -> bool {
    conditions.iter().all(|c| c.matches(value))
}
