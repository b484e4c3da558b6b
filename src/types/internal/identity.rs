use std::fmt;

use crate::types::db::user;

/// Fields common to every signup
#[derive(Clone)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub real_name: String,
    pub phone: Option<String>,
    pub nickname: Option<String>,
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("real_name", &self.real_name)
            .field("phone", &self.phone)
            .field("nickname", &self.nickname)
            .finish()
    }
}

/// Owner signup: account fields plus the store profile
#[derive(Debug, Clone)]
pub struct NewOwner {
    pub account: NewAccount,
    pub store_name: String,
    pub store_phone: String,
    pub road_address: String,
    pub detail_address: Option<String>,
    pub business_number: Option<String>,
}

/// Business registration document uploaded with an owner signup
pub struct BusinessDocument {
    /// Client-supplied name; a part without one is never a PDF
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

impl BusinessDocument {
    pub fn is_pdf(&self) -> bool {
        self.file_name
            .as_deref()
            .is_some_and(|name| name.to_ascii_lowercase().ends_with(".pdf"))
    }
}

impl fmt::Debug for BusinessDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BusinessDocument")
            .field("file_name", &self.file_name)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Result of a successful login
pub struct Session {
    pub token: String,
    pub user: user::Model,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user_id", &self.user.id)
            .field("email", &self.user.email)
            .finish()
    }
}
