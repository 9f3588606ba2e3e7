//! Display formatting for CLI output

use crate::models::{DateOperation, StatusCategory};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

/// A planned operation with the line offset it is applied at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedOperation {
    pub operation: DateOperation,
    /// Byte offset of an insertion, in the line as left by earlier operations
    pub offset: Option<usize>,
}

/// Operation row for table display
#[derive(Tabled)]
struct OperationRow {
    #[tabled(rename = "#")]
    index: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Date")]
    kind: String,
    #[tabled(rename = "Format")]
    format: String,
    #[tabled(rename = "Offset")]
    offset: String,
}

impl OperationRow {
    fn new(index: usize, planned: &PlannedOperation) -> Self {
        let (action, format) = match &planned.operation {
            DateOperation::Add { format, .. } => ("add", format.clone()),
            DateOperation::Remove { .. } => ("remove", String::new()),
        };

        OperationRow {
            index: (index + 1).to_string(),
            action: action.to_string(),
            kind: planned.operation.kind().to_string(),
            format,
            offset: planned.offset.map(|o| o.to_string()).unwrap_or_default(),
        }
    }
}

/// Display the operations planned for a status transition as a table,
/// followed by the line they produce
pub fn display_plan(
    from: StatusCategory,
    to: StatusCategory,
    planned: &[PlannedOperation],
    preview: &str,
) {
    println!("{} -> {}", from, to);

    if planned.is_empty() {
        log::info!("No date changes planned.");
        return;
    }

    let rows: Vec<OperationRow> = planned
        .iter()
        .enumerate()
        .map(|(i, p)| OperationRow::new(i, p))
        .collect();
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::single(0)).with(Alignment::right()))
        .with(Modify::new(Columns::single(4)).with(Alignment::right()))
        .to_string();

    println!("{}", table);
    println!("{}", preview);
}

/// Format for success messages
pub fn success(msg: &str) {
    println!("{}", msg);
}

/// Format for error messages
pub fn error(msg: &str) {
    eprintln!("Error: {}", msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DateKind;

    #[test]
    fn test_operation_rows() {
        let add = PlannedOperation {
            operation: DateOperation::Add {
                kind: DateKind::Start,
                format: "YYYY-MM-DD".to_string(),
            },
            offset: Some(14),
        };
        let row = OperationRow::new(0, &add);
        assert_eq!(row.index, "1");
        assert_eq!(row.action, "add");
        assert_eq!(row.kind, "start");
        assert_eq!(row.format, "YYYY-MM-DD");
        assert_eq!(row.offset, "14");

        let remove = PlannedOperation {
            operation: DateOperation::Remove {
                kind: DateKind::Completed,
            },
            offset: None,
        };
        let row = OperationRow::new(1, &remove);
        assert_eq!(row.action, "remove");
        assert_eq!(row.kind, "completed");
        assert_eq!(row.index, "2");
        assert!(row.format.is_empty());
        assert!(row.offset.is_empty());
    }
}
