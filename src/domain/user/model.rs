use chrono::{DateTime, Utc};

/// Account holder. The plaintext password never reaches this type.
#[derive(Clone, Debug)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub date_joined: DateTime<Utc>,
    /// `None` only for accounts that predate profiles.
    pub profile: Option<Profile>,
}

impl User {
    /// Stored avatar reference, if the user has a profile with an avatar.
    pub fn avatar(&self) -> Option<&str> {
        self.profile.as_ref().and_then(|p| p.avatar.as_deref())
    }
}

/// One-to-one companion of [`User`] holding the avatar file reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub id: i32,
    pub user_id: i32,
    pub avatar: Option<String>,
}
