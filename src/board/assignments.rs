use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::sites::Role;

/// The three role cells of a single board row. All three cells are always
/// present in the record; an unoccupied cell is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowAssignments {
    pub anesthesiologist: Option<String>,
    pub ahp: Option<String>,
    pub relief: Option<String>,
}

impl RowAssignments {
    /// Name occupying the given role cell, if any.
    pub fn get(&self, role: Role) -> Option<&str> {
        self.cell(role).as_deref()
    }

    fn cell(&self, role: Role) -> &Option<String> {
        match role {
            Role::Anesthesiologist => &self.anesthesiologist,
            Role::Ahp => &self.ahp,
            Role::Relief => &self.relief,
        }
    }

    fn cell_mut(&mut self, role: Role) -> &mut Option<String> {
        match role {
            Role::Anesthesiologist => &mut self.anesthesiologist,
            Role::Ahp => &mut self.ahp,
            Role::Relief => &mut self.relief,
        }
    }

    fn is_empty(&self) -> bool {
        Role::ALL.iter().all(|&role| self.cell(role).is_none())
    }
}

/// Sparse mapping from site index to its row of role assignments.
///
/// Invariant: a staff name occupies at most one (site, role) cell across the
/// whole store. `place` re-establishes this on every call by first removing
/// the name from wherever it currently sits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentStore {
    rows: HashMap<usize, RowAssignments>,
}

impl AssignmentStore {
    /// Places `name` into the target cell, unassigning it from any cell it
    /// previously occupied. A name already in the target cell overwrites the
    /// occupant, which becomes unassigned rather than displaced elsewhere.
    pub fn place(&mut self, name: &str, site: usize, role: Role) {
        self.remove_name(name);
        *self.rows.entry(site).or_default().cell_mut(role) = Some(name.to_string());
    }

    /// Clears the given cell if it is occupied.
    pub fn remove(&mut self, site: usize, role: Role) {
        if let Some(row) = self.rows.get_mut(&site) {
            *row.cell_mut(role) = None;
            if row.is_empty() {
                self.rows.remove(&site);
            }
        }
    }

    /// Removes `name` from every cell it occupies.
    fn remove_name(&mut self, name: &str) {
        for row in self.rows.values_mut() {
            for &role in Role::ALL.iter() {
                let cell = row.cell_mut(role);
                if cell.as_deref() == Some(name) {
                    *cell = None;
                }
            }
        }
        self.rows.retain(|_, row| !row.is_empty());
    }

    /// Name occupying the given cell, if any.
    pub fn get(&self, site: usize, role: Role) -> Option<&str> {
        self.rows.get(&site).and_then(|row| row.get(role))
    }

    /// The row record for a site, if any cell in it is occupied.
    pub fn row(&self, site: usize) -> Option<&RowAssignments> {
        self.rows.get(&site)
    }

    /// Every name currently placed anywhere on the board. Used for roster
    /// highlighting; pure read.
    pub fn assigned_names(&self) -> HashSet<String> {
        let mut assigned = HashSet::new();
        for row in self.rows.values() {
            for &role in Role::ALL.iter() {
                if let Some(name) = row.get(role) {
                    assigned.insert(name.to_string());
                }
            }
        }
        assigned
    }

    /// Empties the whole store.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Number of occupied cells across the board.
    pub fn len(&self) -> usize {
        self.rows
            .values()
            .map(|row| Role::ALL.iter().filter(|&&role| row.get(role).is_some()).count())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
