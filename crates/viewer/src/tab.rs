//! Record viewer tabs

use std::fmt;
use std::str::FromStr;

use crate::error::ParseOptionError;

/// Category tab of the record viewer, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Overview,
    Vitals,
    Labs,
    History,
    Allergies,
    Immunizations,
    Contacts,
}

impl Tab {
    pub const ALL: [Tab; 7] = [
        Tab::Overview,
        Tab::Vitals,
        Tab::Labs,
        Tab::History,
        Tab::Allergies,
        Tab::Immunizations,
        Tab::Contacts,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Tab::Overview => "overview",
            Tab::Vitals => "vitals",
            Tab::Labs => "labs",
            Tab::History => "history",
            Tab::Allergies => "allergies",
            Tab::Immunizations => "immunizations",
            Tab::Contacts => "contacts",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Vitals => "Vitals",
            Tab::Labs => "Lab Results",
            Tab::History => "History",
            Tab::Allergies => "Allergies",
            Tab::Immunizations => "Immunizations",
            Tab::Contacts => "Emergency Contacts",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Tab {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let ids: Vec<&str> = Tab::ALL.iter().map(|t| t.id()).collect();
                ParseOptionError::new("tab", s, &ids)
            })
    }
}
