pub mod access;
pub mod assignments;
pub mod breaks;
pub mod roster;
pub mod sites;

pub use access::{AccessController, AccessMode};
pub use assignments::{AssignmentStore, RowAssignments};
pub use breaks::BreakTracker;
pub use roster::StaffRoster;
pub use sites::{Role, Section, SECTIONS};

use std::collections::HashSet;

use crate::error::{Error, Result};

/// The whole mutable state of one day's board: assignments, breaks, the
/// staff roster and the current access mode. Every mutation goes through
/// here so edit-mode gating and site bounds checks live in one place.
#[derive(Debug, Clone, Default)]
pub struct Board {
    pub assignments: AssignmentStore,
    pub breaks: BreakTracker,
    pub roster: StaffRoster,
    mode: AccessMode,
}

impl Board {
    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    /// Switches to view-only mode. Unconditional.
    pub fn enter_view(&mut self) {
        self.mode = AccessMode::View;
    }

    /// Returns to edit mode. The passphrase check happens at the caller; the
    /// board itself only tracks the mode.
    pub fn enter_edit(&mut self) {
        self.mode = AccessMode::Edit;
    }

    fn require_edit(&self) -> Result<()> {
        if self.mode.can_edit() {
            Ok(())
        } else {
            Err(Error::ViewOnly)
        }
    }

    fn check_site(site: usize) -> Result<()> {
        if site < sites::site_count() {
            Ok(())
        } else {
            Err(Error::UnknownSite(site))
        }
    }

    /// Places a staff name into a cell. Edit mode only.
    pub fn place(&mut self, name: &str, site: usize, role: Role) -> Result<()> {
        self.require_edit()?;
        Self::check_site(site)?;
        self.assignments.place(name, site, role);
        Ok(())
    }

    /// Clears a cell. Edit mode only.
    pub fn remove(&mut self, site: usize, role: Role) -> Result<()> {
        self.require_edit()?;
        Self::check_site(site)?;
        self.assignments.remove(site, role);
        Ok(())
    }

    /// Toggles a break flag. Permitted in both modes.
    pub fn toggle_break(&mut self, site: usize, break_index: usize) -> Result<bool> {
        Self::check_site(site)?;
        self.breaks.toggle(site, break_index)
    }

    /// Adds pasted names to a roster list. Edit mode only; returns the count
    /// of new entries.
    pub fn add_staff(&mut self, role: Role, raw: &str) -> Result<usize> {
        self.require_edit()?;
        Ok(self.roster.bulk_add(role, raw))
    }

    /// Removes one name from a roster list. Edit mode only. Assignments
    /// holding the name stay on the board.
    pub fn remove_staff(&mut self, role: Role, name: &str) -> Result<bool> {
        self.require_edit()?;
        Ok(self.roster.remove_one(role, name))
    }

    /// Empties one roster list. Edit mode only.
    pub fn clear_staff(&mut self, role: Role) -> Result<()> {
        self.require_edit()?;
        self.roster.clear_role(role);
        Ok(())
    }

    /// Names currently placed anywhere on the board.
    pub fn assigned_names(&self) -> HashSet<String> {
        self.assignments.assigned_names()
    }

    /// Empties assignments, breaks and all roster lists. Callers must have
    /// passed the passphrase check first; the mode is left untouched.
    pub fn clear_all(&mut self) {
        self.assignments.clear();
        self.breaks.clear();
        self.roster.clear();
    }
}
