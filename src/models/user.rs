use serde::{Deserialize, Serialize};

/// Response from `authenticate.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: u64,
    pub school_id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub api_token: String,
}

impl UserInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One entry from `my_subjects.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: u64,
    pub school_id: u64,
    pub classroom_id: u64,
    pub name: String,
    #[serde(default)]
    pub school_name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Subject {
    pub const CHILD: &'static str = "Child";

    pub fn is_child(&self) -> bool {
        self.kind == Self::CHILD
    }
}
