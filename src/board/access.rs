use serde::{Deserialize, Serialize};

/// The two access modes of the board. `Edit` allows all mutations; `View`
/// blocks assignment and roster changes but still permits break toggling and
/// export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    #[default]
    Edit,
    View,
}

impl AccessMode {
    pub fn can_edit(self) -> bool {
        self == AccessMode::Edit
    }
}

/// Guards the two privileged actions (clear board, leave view mode) with a
/// single shared passphrase. Deliberately a single static secret: there is
/// no per-user identity, and repeated wrong attempts are not rate limited.
#[derive(Debug, Clone)]
pub struct AccessController {
    passphrase: String,
}

impl AccessController {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
        }
    }

    /// Exact-equality check against the shared secret.
    pub fn verify(&self, attempt: &str) -> bool {
        attempt == self.passphrase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_edit_mode() {
        assert_eq!(AccessMode::default(), AccessMode::Edit);
        assert!(AccessMode::Edit.can_edit());
        assert!(!AccessMode::View.can_edit());
    }

    #[test]
    fn verify_is_exact_match() {
        let access = AccessController::new("admin");
        assert!(access.verify("admin"));
        assert!(!access.verify("Admin"));
        assert!(!access.verify("admin "));
        assert!(!access.verify(""));
    }
}
