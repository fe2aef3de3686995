//! Session state shared by the pages.

/// Who is signed in and which users the list shows.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: Option<String>,
    pub users: Vec<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            username: None,
            users: vec!["alice".into(), "bob".into(), "carol".into()],
        }
    }
}

impl Session {
    /// Record `name` as the signed-in user, adding it to the list once.
    pub fn select_username(&mut self, name: &str) {
        self.add_user(name);
        self.username = Some(name.to_string());
    }

    /// Add `name` to the list without signing in. Returns false if it was
    /// already there.
    pub fn add_user(&mut self, name: &str) -> bool {
        if self.users.iter().any(|u| u == name) {
            return false;
        }
        self.users.push(name.to_string());
        true
    }
}
