use serde::{Deserialize, Serialize};

/// A named grouping of sites shown together on the board.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub sites: &'static [&'static str],
}

/// The fixed board layout. Sections and their site order never change at
/// runtime; a site's position in the flattened list is its stable index.
pub const SECTIONS: &[Section] = &[
    Section {
        title: "MOR",
        sites: &[
            "OR1", "OR2", "OR3", "OR4", "OR5", "OR6", "OR7", "OR8", "OR9", "OR10", "OR11", "OR12",
            "OR14", "OR15", "OR16", "OR17", "OR18", "OR19", "OR21", "OR23",
        ],
    },
    Section {
        title: "Endoscopy",
        sites: &["ENDO1", "ENDO2", "ENDO3"],
    },
    Section {
        title: "Radiology",
        sites: &["MRI", "TEE/DH", "IR1", "IR2"],
    },
    Section {
        title: "Heart Institute",
        sites: &["CV1", "CV2", "CV3", "CV9", "EP4", "EP5", "EP10", "CCL6"],
    },
    Section {
        title: "Same Day Surgery",
        sites: &["SDS1", "SDS2", "SDS3", "SDS4", "SDS5", "SDS6"],
    },
    Section {
        title: "Women's Hospital",
        sites: &["WH1", "WH2", "WH3", "WH4", "WH5", "WH6", "WH7", "WH8", "WH9", "WH10"],
    },
];

/// Iterates all sites in board order (sections concatenated in declaration
/// order, sites in declaration order within each section).
pub fn all_sites() -> impl Iterator<Item = &'static str> {
    SECTIONS.iter().flat_map(|section| section.sites.iter().copied())
}

/// Total number of sites on the board.
pub fn site_count() -> usize {
    SECTIONS.iter().map(|section| section.sites.len()).sum()
}

/// Resolves a flattened site index to its label.
pub fn site_label(index: usize) -> Option<&'static str> {
    all_sites().nth(index)
}

/// The three assignable staff columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Anesthesiologist,
    #[serde(rename = "AHP")]
    Ahp,
    Relief,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Anesthesiologist, Role::Ahp, Role::Relief];

    /// Column label as it appears on the board and in the export.
    pub fn label(self) -> &'static str {
        match self {
            Role::Anesthesiologist => "Anesthesiologist",
            Role::Ahp => "AHP",
            Role::Relief => "Relief",
        }
    }
}
