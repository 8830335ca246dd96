// src/models/navigation.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Abas da aplicação, na ordem do menu lateral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Dashboard,
    Projects,
    Reports,
    Documents,
    Guidelines,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Dashboard,
        Tab::Projects,
        Tab::Reports,
        Tab::Documents,
        Tab::Guidelines,
        Tab::Settings,
    ];

    pub fn label(self, lang: &str) -> &'static str {
        match (self, lang) {
            (Tab::Dashboard, "en") => "Overview",
            (Tab::Projects, "en") => "My Projects",
            (Tab::Reports, "en") => "Reports",
            (Tab::Documents, "en") => "Documents",
            (Tab::Guidelines, "en") => "Guidelines & Manuals",
            (Tab::Settings, "en") => "Settings",
            (Tab::Dashboard, _) => "Visão Geral",
            (Tab::Projects, _) => "Minhas Obras",
            (Tab::Reports, _) => "Relatórios",
            (Tab::Documents, _) => "Documentação",
            (Tab::Guidelines, _) => "Normas & Manuais",
            (Tab::Settings, _) => "Configurações",
        }
    }

    // Documentos e normas ainda são telas de "em desenvolvimento"
    pub fn available(self) -> bool {
        match self {
            Tab::Dashboard | Tab::Projects | Tab::Reports | Tab::Settings => true,
            Tab::Documents | Tab::Guidelines => false,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavigationEntry {
    pub id: Tab,
    #[schema(example = "Visão Geral")]
    pub label: String,
    pub available: bool,
}

pub fn navigation(lang: &str) -> Vec<NavigationEntry> {
    Tab::ALL
        .into_iter()
        .map(|tab| NavigationEntry {
            id: tab,
            label: tab.label(lang).to_string(),
            available: tab.available(),
        })
        .collect()
}
