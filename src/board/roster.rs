use std::collections::HashSet;

use super::sites::Role;

/// The pool of draggable staff names, one ordered list per role.
///
/// The roster is only a source pool: removing a name here never touches an
/// assignment already holding that name on the board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffRoster {
    anesthesiologists: Vec<String>,
    ahps: Vec<String>,
    relief: Vec<String>,
}

impl StaffRoster {
    /// Names in one role's list, in insertion order.
    pub fn names(&self, role: Role) -> &[String] {
        match role {
            Role::Anesthesiologist => &self.anesthesiologists,
            Role::Ahp => &self.ahps,
            Role::Relief => &self.relief,
        }
    }

    fn names_mut(&mut self, role: Role) -> &mut Vec<String> {
        match role {
            Role::Anesthesiologist => &mut self.anesthesiologists,
            Role::Ahp => &mut self.ahps,
            Role::Relief => &mut self.relief,
        }
    }

    /// Adds one name per line of `raw` to a role's list: lines are trimmed,
    /// blanks dropped, and names already present (case-sensitive, including
    /// duplicates within the pasted batch) skipped. New entries keep their
    /// input order and append after existing ones. Returns the count added.
    pub fn bulk_add(&mut self, role: Role, raw: &str) -> usize {
        let list = self.names_mut(role);
        let mut seen: HashSet<String> = list.iter().cloned().collect();
        let mut added = 0;
        for line in raw.lines() {
            let name = line.trim();
            if name.is_empty() || seen.contains(name) {
                continue;
            }
            seen.insert(name.to_string());
            list.push(name.to_string());
            added += 1;
        }
        added
    }

    /// Removes the single occurrence of `name` from a role's list. Returns
    /// whether anything was removed.
    pub fn remove_one(&mut self, role: Role, name: &str) -> bool {
        let list = self.names_mut(role);
        match list.iter().position(|n| n == name) {
            Some(index) => {
                list.remove(index);
                true
            }
            None => false,
        }
    }

    /// Empties one role's list.
    pub fn clear_role(&mut self, role: Role) {
        self.names_mut(role).clear();
    }

    /// Empties all three lists.
    pub fn clear(&mut self) {
        for role in Role::ALL {
            self.names_mut(role).clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_add_trims_dedups_and_keeps_order() {
        let mut roster = StaffRoster::default();
        let added = roster.bulk_add(Role::Anesthesiologist, "Dr. X\nDr. X\n  Dr. Y  \n\n");
        assert_eq!(added, 2);
        assert_eq!(roster.names(Role::Anesthesiologist), ["Dr. X", "Dr. Y"]);
    }

    #[test]
    fn bulk_add_appends_after_existing_entries() {
        let mut roster = StaffRoster::default();
        roster.bulk_add(Role::Ahp, "Jane");
        let added = roster.bulk_add(Role::Ahp, "Jane\nAlex");
        assert_eq!(added, 1);
        assert_eq!(roster.names(Role::Ahp), ["Jane", "Alex"]);
    }

    #[test]
    fn dedup_is_case_sensitive() {
        let mut roster = StaffRoster::default();
        roster.bulk_add(Role::Relief, "dr. x\nDr. X");
        assert_eq!(roster.names(Role::Relief), ["dr. x", "Dr. X"]);
    }

    #[test]
    fn lists_are_independent_per_role() {
        let mut roster = StaffRoster::default();
        roster.bulk_add(Role::Anesthesiologist, "Dr. X");
        roster.bulk_add(Role::Relief, "Dr. X");
        roster.clear_role(Role::Anesthesiologist);
        assert!(roster.names(Role::Anesthesiologist).is_empty());
        assert_eq!(roster.names(Role::Relief), ["Dr. X"]);
    }

    #[test]
    fn remove_one_takes_out_the_single_occurrence() {
        let mut roster = StaffRoster::default();
        roster.bulk_add(Role::Ahp, "Jane\nAlex");
        assert!(roster.remove_one(Role::Ahp, "Jane"));
        assert!(!roster.remove_one(Role::Ahp, "Jane"));
        assert_eq!(roster.names(Role::Ahp), ["Alex"]);
    }

    #[test]
    fn crlf_input_is_handled() {
        let mut roster = StaffRoster::default();
        roster.bulk_add(Role::Anesthesiologist, "Dr. X\r\nDr. Y\r\n");
        assert_eq!(roster.names(Role::Anesthesiologist), ["Dr. X", "Dr. Y"]);
    }
}
