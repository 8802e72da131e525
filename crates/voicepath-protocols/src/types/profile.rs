//! User profile used to synthesize input values.

use serde::{Deserialize, Serialize};

/// Personal details the executor may fill in without asking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Birth date in any separator style (`1990-01-02`, `1990.01.02`, `19900102`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl UserProfile {
    /// Returns the named field if it holds non-blank text.
    pub fn name(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }

    pub fn birth_date(&self) -> Option<&str> {
        non_blank(self.birth_date.as_deref())
    }

    pub fn phone_number(&self) -> Option<&str> {
        non_blank(self.phone_number.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
