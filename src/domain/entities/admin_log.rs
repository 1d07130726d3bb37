use chrono::{DateTime, Utc};

/// One entry in the admin audit trail. Entries are never edited.
#[derive(Debug, Clone)]
pub struct AdminLog {
    pub id: i64,
    pub action: String,
    pub admin_name: String,
    pub timestamp: DateTime<Utc>,
}

/// The timestamp is stamped at insert time.
#[derive(Debug, Clone)]
pub struct NewAdminLog {
    pub action: String,
    pub admin_name: String,
}

impl NewAdminLog {
    pub fn new(action: impl Into<String>, admin_name: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            admin_name: admin_name.into(),
        }
    }
}
