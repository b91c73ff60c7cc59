use serde::Serialize;

use crate::model::SignerSlot;

const TITLE_FALLBACKS: [&str; 4] = ["Ketua Panitia", "Bendahara", "Jabatan 3", "Jabatan 4"];

/// A signature block entry. `name: None` renders as a dotted blank line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSigner {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub title: String,
}

/// Slots with a name render; if no slot is named, the first two render with
/// blank lines so the document always closes with a signature block.
pub fn resolve(slots: &[SignerSlot; 4]) -> Vec<ResolvedSigner> {
    let candidates: Vec<ResolvedSigner> = slots
        .iter()
        .zip(TITLE_FALLBACKS)
        .map(|(slot, fallback)| {
            let name = slot.name.trim();
            let title = slot.title.trim();
            ResolvedSigner {
                name: (!name.is_empty()).then(|| name.to_string()),
                title: if title.is_empty() {
                    fallback.to_string()
                } else {
                    title.to_string()
                },
            }
        })
        .collect();

    let named: Vec<ResolvedSigner> = candidates
        .iter()
        .filter(|signer| signer.name.is_some())
        .cloned()
        .collect();
    if named.is_empty() {
        candidates[..2].to_vec()
    } else {
        named
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(name: &str, title: &str) -> SignerSlot {
        SignerSlot {
            name: name.to_string(),
            title: title.to_string(),
        }
    }

    #[test]
    fn unnamed_slots_fall_back_to_the_first_two_roles() {
        let slots = [slot("", ""), slot("", ""), slot("", ""), slot("", "")];
        let signers = resolve(&slots);
        assert_eq!(signers.len(), 2);
        assert_eq!(signers[0].title, "Ketua Panitia");
        assert_eq!(signers[1].title, "Bendahara");
        assert!(signers.iter().all(|signer| signer.name.is_none()));
    }

    #[test]
    fn only_named_slots_render_once_any_name_is_set() {
        let slots = [
            slot("", "Ketua RT"),
            slot("Budi", ""),
            slot("  ", ""),
            slot("Sari", "Sekretaris"),
        ];
        let signers = resolve(&slots);
        assert_eq!(signers.len(), 2);
        assert_eq!(signers[0].name.as_deref(), Some("Budi"));
        assert_eq!(signers[0].title, "Bendahara");
        assert_eq!(signers[1].title, "Sekretaris");
    }

    #[test]
    fn custom_titles_survive_the_fallback() {
        let slots = [slot("", "Pembina"), slot("", ""), slot("", ""), slot("", "")];
        let signers = resolve(&slots);
        assert_eq!(signers[0].title, "Pembina");
    }
}
