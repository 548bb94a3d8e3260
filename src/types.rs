//! Shared record kinds, table naming, and row/cell primitives.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Zero-based position of a row within its table. The header row is 0.
pub type RowIndex = usize;

/// One table row: an ordered sequence of cells.
pub type Row = Vec<Cell>;

/// A single spreadsheet-style cell value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    /// Free-form text. Blank cells hold an empty string.
    Text(String),
    /// Numeric value with decimal precision.
    Number(Decimal),
}

impl Cell {
    /// Builds a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Builds a numeric cell.
    pub fn number(value: Decimal) -> Self {
        Self::Number(value)
    }

    /// Returns the text content when this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }

    /// Returns the numeric value when this is a number cell.
    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            Self::Text(_) => None,
            Self::Number(n) => Some(*n),
        }
    }
}

/// The three record kinds, each backed by one named table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// A financial obligation to be paid out.
    Payable,
    /// A financial obligation to be collected.
    Receivable,
    /// An employee vacation entry.
    Vacation,
}

impl RecordKind {
    /// All record kinds, in table-provisioning order.
    pub const ALL: [RecordKind; 3] = [Self::Payable, Self::Receivable, Self::Vacation];

    /// Lowercase kind identifier.
    pub fn ident(self) -> &'static str {
        match self {
            Self::Payable => "payable",
            Self::Receivable => "receivable",
            Self::Vacation => "vacation",
        }
    }

    /// Backing table name: the capitalized plural of [`Self::ident`].
    pub fn table_name(self) -> &'static str {
        match self {
            Self::Payable => "Payables",
            Self::Receivable => "Receivables",
            Self::Vacation => "Vacations",
        }
    }

    /// Header row written at position 0 when a table is provisioned.
    pub fn header_row(self) -> Row {
        let labels: &[&str] = match self {
            Self::Payable | Self::Receivable => &[
                "id",
                "alert",
                "due_date",
                "payment_control",
                "amount",
                "date",
                "bank",
                "type",
            ],
            Self::Vacation => &["id", "name", "start_date", "end_date", "type"],
        };
        labels.iter().map(|label| Cell::text(*label)).collect()
    }
}

/// Which of the two obligation tables a payable/receivable record targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObligationKind {
    /// Money going out.
    Payable,
    /// Money coming in.
    Receivable,
}

impl From<ObligationKind> for RecordKind {
    fn from(value: ObligationKind) -> Self {
        match value {
            ObligationKind::Payable => Self::Payable,
            ObligationKind::Receivable => Self::Receivable,
        }
    }
}
