use serde::{Deserialize, Serialize};

pub const DEFAULT_REPORT_TITLE: &str = "LAPORAN PERTANGGUNGJAWABAN";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportMode {
    #[default]
    #[serde(rename = "Cepat")]
    Quick,
    #[serde(rename = "Lengkap")]
    Full,
}

impl ReportMode {
    pub fn label(&self) -> &'static str {
        match self {
            ReportMode::Quick => "Cepat",
            ReportMode::Full => "Lengkap",
        }
    }

    pub fn parse_label(value: &str) -> Option<Self> {
        match value.trim() {
            "Cepat" => Some(ReportMode::Quick),
            "Lengkap" => Some(ReportMode::Full),
            _ => None,
        }
    }
}

/// One of the four signature slots at the foot of the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerSlot {
    pub name: String,
    pub title: String,
}

/// Everything about the report other than the transaction rows. Narrative
/// fields start empty and are filled by hand or by applying an AI response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub mode: ReportMode,
    pub title: String,
    pub event_name: String,
    pub organization_name: String,
    pub report_date: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub signers: [SignerSlot; 4],
    pub background: String,
    pub conclusion: String,
    pub objective: String,
    pub audience: String,
    pub time_place: String,
    pub participants: String,
    pub mechanism: String,
    pub outcome: String,
    pub obstacles: String,
    pub recommendations: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            mode: ReportMode::Quick,
            title: DEFAULT_REPORT_TITLE.to_string(),
            event_name: String::new(),
            organization_name: String::new(),
            report_date: String::new(),
            location: String::new(),
            logo: None,
            signers: [
                SignerSlot {
                    name: String::new(),
                    title: "Ketua Panitia".to_string(),
                },
                SignerSlot {
                    name: String::new(),
                    title: "Bendahara".to_string(),
                },
                SignerSlot::default(),
                SignerSlot::default(),
            ],
            background: String::new(),
            conclusion: String::new(),
            objective: String::new(),
            audience: String::new(),
            time_place: String::new(),
            participants: String::new(),
            mechanism: String::new(),
            outcome: String::new(),
            obstacles: String::new(),
            recommendations: String::new(),
        }
    }
}

impl ReportConfig {
    /// Clears every AI-fillable narrative field. Identity fields (title,
    /// event, organization, signers) are untouched.
    pub fn clear_narrative(&mut self) {
        self.background.clear();
        self.conclusion.clear();
        self.objective.clear();
        self.audience.clear();
        self.time_place.clear();
        self.participants.clear();
        self.mechanism.clear();
        self.outcome.clear();
        self.obstacles.clear();
        self.recommendations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_standard_title_and_signer_roles() {
        let config = ReportConfig::default();
        assert_eq!(config.title, "LAPORAN PERTANGGUNGJAWABAN");
        assert_eq!(config.mode, ReportMode::Quick);
        assert_eq!(config.signers[0].title, "Ketua Panitia");
        assert_eq!(config.signers[1].title, "Bendahara");
        assert!(config.signers[2].title.is_empty());
    }

    #[test]
    fn clear_narrative_keeps_identity_fields() {
        let mut config = ReportConfig {
            event_name: "Pentas Seni".to_string(),
            background: "Latar belakang kegiatan.".to_string(),
            outcome: "Hasil kegiatan.".to_string(),
            ..ReportConfig::default()
        };
        config.clear_narrative();
        assert_eq!(config.event_name, "Pentas Seni");
        assert!(config.background.is_empty());
        assert!(config.outcome.is_empty());
    }

    #[test]
    fn mode_labels_round_trip() {
        for mode in [ReportMode::Quick, ReportMode::Full] {
            assert_eq!(ReportMode::parse_label(mode.label()), Some(mode));
        }
    }
}
