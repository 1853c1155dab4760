//! Localized interaction replies.
//!
//! Discord reports the invoking user's client locale on every interaction. German
//! clients (`de`) get German text, everyone else English.

/// Reply text shown to the user after a command or component interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    SomethingWentWrong,
    RolePrivileged,
    RoleAlreadyAssigned,
    /// The role was added. Holds the role mention (`<@&id>`).
    RoleAssigned(String),
}

impl Reply {
    pub fn render(&self, locale: &str) -> String {
        let german = is_german(locale);

        match self {
            Self::SomethingWentWrong if german => "Etwas ist schiefgelaufen".to_string(),
            Self::SomethingWentWrong => "Something went wrong".to_string(),
            Self::RolePrivileged if german => {
                "Diese Rolle kannst du dir nicht selber zuweisen".to_string()
            }
            Self::RolePrivileged => "You can't assign this role to yourself".to_string(),
            Self::RoleAlreadyAssigned if german => {
                "Dieser Rolle bist du bereits zugewiesen".to_string()
            }
            Self::RoleAlreadyAssigned => "You've already been assigned to this role".to_string(),
            Self::RoleAssigned(mention) if german => {
                format!("Du wurdest der Rolle {} zugewiesen", mention)
            }
            Self::RoleAssigned(mention) => format!("You've been assigned to the role {}", mention),
        }
    }
}

fn is_german(locale: &str) -> bool {
    locale == "de" || locale.starts_with("de-")
}
