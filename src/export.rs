use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};

use crate::board::{sites, AssignmentStore, BreakTracker, Role};
use crate::error::Result;

/// Encodes the board as CSV: the header row, then one row per site in
/// registry order (section headers are not emitted). Every field is quoted;
/// unoccupied cells are empty strings and break flags render as Yes/No. The
/// output is a one-way export for spreadsheet tools, nothing reads it back.
pub fn encode_board(assignments: &AssignmentStore, breaks: &BreakTracker) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record([
        "OR",
        Role::Anesthesiologist.label(),
        Role::Ahp.label(),
        Role::Relief.label(),
        "Break 1",
        "Break 2",
    ])?;
    for (index, site) in sites::all_sites().enumerate() {
        let row = assignments.row(index);
        let flags = breaks.flags(index);
        writer.write_record([
            site,
            row.and_then(|r| r.get(Role::Anesthesiologist)).unwrap_or(""),
            row.and_then(|r| r.get(Role::Ahp)).unwrap_or(""),
            row.and_then(|r| r.get(Role::Relief)).unwrap_or(""),
            if flags[0] { "Yes" } else { "No" },
            if flags[1] { "Yes" } else { "No" },
        ])?;
    }

    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    let text = String::from_utf8(bytes)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
    Ok(text)
}

/// Download name for an export taken on `date`, e.g. `OR_Schedule_2024-03-01.csv`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("OR_Schedule_{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_row_comes_first() {
        let csv = encode_board(&AssignmentStore::default(), &BreakTracker::default()).unwrap();
        let first = csv.lines().next().unwrap();
        assert_eq!(first, "\"OR\",\"Anesthesiologist\",\"AHP\",\"Relief\",\"Break 1\",\"Break 2\"");
    }

    #[test]
    fn one_row_per_site_in_registry_order() {
        let csv = encode_board(&AssignmentStore::default(), &BreakTracker::default()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 1 + sites::site_count());

        // Flattened section order, no section header rows in between
        assert!(lines[1].starts_with("\"OR1\","));
        assert!(lines[20].starts_with("\"OR23\","));
        assert!(lines[21].starts_with("\"ENDO1\","));
        assert!(lines[lines.len() - 1].starts_with("\"WH10\","));
    }

    #[test]
    fn assignments_and_breaks_land_in_their_columns() {
        let mut assignments = AssignmentStore::default();
        let mut breaks = BreakTracker::default();
        assignments.place("Bob", 0, Role::Anesthesiologist);
        breaks.toggle(0, 1).unwrap();

        let csv = encode_board(&assignments, &breaks).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "\"OR1\",\"Bob\",\"\",\"\",\"No\",\"Yes\"");
    }

    #[test]
    fn unassigned_sites_export_empty_quoted_fields() {
        let csv = encode_board(&AssignmentStore::default(), &BreakTracker::default()).unwrap();
        let row = csv.lines().nth(2).unwrap();
        assert_eq!(row, "\"OR2\",\"\",\"\",\"\",\"No\",\"No\"");
    }

    #[test]
    fn names_with_commas_stay_in_one_field() {
        let mut assignments = AssignmentStore::default();
        assignments.place("Doe, Jane", 0, Role::Ahp);
        let csv = encode_board(&assignments, &BreakTracker::default()).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "\"OR1\",\"\",\"Doe, Jane\",\"\",\"No\",\"No\"");
    }

    #[test]
    fn file_name_embeds_the_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(export_file_name(date), "OR_Schedule_2024-03-01.csv");
    }
}
