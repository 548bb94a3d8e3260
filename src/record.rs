//! Record drafts, field validation, and fixed row column orders.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Cell, ObligationKind, RecordKind, Row};

/// A draft field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    /// A required field was missing or empty.
    #[error("required field '{0}' is missing")]
    MissingField(&'static str),
    /// The amount did not parse as a decimal number.
    #[error("amount '{0}' is not a number")]
    InvalidAmount(String),
}

/// Caller-supplied payable/receivable fields, unvalidated.
///
/// Field values arrive as text (typically straight from a form); validation
/// happens in [`ObligationDraft::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ObligationDraft {
    /// Unique key within the target table.
    pub id: String,
    /// Obligation category, e.g. fixed or variable.
    #[serde(rename = "type")]
    pub category: String,
    /// Bank or account the obligation settles through.
    pub bank: String,
    /// Booking date string.
    pub date: String,
    /// Amount text; must parse as a decimal number.
    pub amount: String,
    /// Payment-control marker.
    pub payment_control: String,
    /// Due date string.
    pub due_date: String,
    /// Optional alert note.
    pub alert: Option<String>,
}

impl ObligationDraft {
    /// Checks that every required field is non-empty and that the amount
    /// parses, producing the validated record.
    pub fn validate(self) -> Result<ObligationRecord, DraftError> {
        require("id", &self.id)?;
        require("type", &self.category)?;
        require("bank", &self.bank)?;
        require("date", &self.date)?;
        require("amount", &self.amount)?;
        require("payment_control", &self.payment_control)?;
        require("due_date", &self.due_date)?;

        let amount: Decimal = self
            .amount
            .trim()
            .parse()
            .map_err(|_| DraftError::InvalidAmount(self.amount.clone()))?;

        Ok(ObligationRecord {
            id: self.id,
            category: self.category,
            bank: self.bank,
            date: self.date,
            amount,
            payment_control: self.payment_control,
            due_date: self.due_date,
            alert: self.alert,
        })
    }
}

/// Caller-supplied vacation fields, unvalidated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VacationDraft {
    /// Unique key within the vacations table.
    pub id: String,
    /// Employee name.
    pub name: String,
    /// First day of the vacation.
    pub start_date: String,
    /// Last day of the vacation.
    pub end_date: String,
    /// Vacation category.
    #[serde(rename = "type")]
    pub category: String,
}

impl VacationDraft {
    /// Checks that every required field is non-empty, producing the
    /// validated record.
    pub fn validate(self) -> Result<VacationRecord, DraftError> {
        require("id", &self.id)?;
        require("name", &self.name)?;
        require("start_date", &self.start_date)?;
        require("end_date", &self.end_date)?;
        require("type", &self.category)?;

        Ok(VacationRecord {
            id: self.id,
            name: self.name,
            start_date: self.start_date,
            end_date: self.end_date,
            category: self.category,
        })
    }
}

/// Validated payable/receivable record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObligationRecord {
    /// Unique key within its table.
    pub id: String,
    /// Obligation category.
    #[serde(rename = "type")]
    pub category: String,
    /// Bank or account.
    pub bank: String,
    /// Booking date string.
    pub date: String,
    /// Parsed amount.
    pub amount: Decimal,
    /// Payment-control marker.
    pub payment_control: String,
    /// Due date string.
    pub due_date: String,
    /// Optional alert note.
    pub alert: Option<String>,
}

impl ObligationRecord {
    /// Full row in the fixed obligation column order:
    /// id, alert, due_date, payment_control, amount, date, bank, type.
    pub fn to_row(&self) -> Row {
        vec![
            Cell::text(self.id.as_str()),
            Cell::text(self.alert.as_deref().unwrap_or("")),
            Cell::text(self.due_date.as_str()),
            Cell::text(self.payment_control.as_str()),
            Cell::number(self.amount),
            Cell::text(self.date.as_str()),
            Cell::text(self.bank.as_str()),
            Cell::text(self.category.as_str()),
        ]
    }
}

/// Validated vacation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationRecord {
    /// Unique key within the vacations table.
    pub id: String,
    /// Employee name.
    pub name: String,
    /// First day of the vacation.
    pub start_date: String,
    /// Last day of the vacation.
    pub end_date: String,
    /// Vacation category.
    #[serde(rename = "type")]
    pub category: String,
}

impl VacationRecord {
    /// Full row in the fixed vacation column order:
    /// id, name, start_date, end_date, type.
    pub fn to_row(&self) -> Row {
        vec![
            Cell::text(self.id.as_str()),
            Cell::text(self.name.as_str()),
            Cell::text(self.start_date.as_str()),
            Cell::text(self.end_date.as_str()),
            Cell::text(self.category.as_str()),
        ]
    }
}

/// Kind-dispatched insert/update payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RecordDraft {
    /// Draft for the payables table.
    Payable(ObligationDraft),
    /// Draft for the receivables table.
    Receivable(ObligationDraft),
    /// Draft for the vacations table.
    Vacation(VacationDraft),
}

impl RecordDraft {
    /// Wraps an obligation draft for the given obligation table.
    pub fn obligation(kind: ObligationKind, draft: ObligationDraft) -> Self {
        match kind {
            ObligationKind::Payable => Self::Payable(draft),
            ObligationKind::Receivable => Self::Receivable(draft),
        }
    }

    /// The record kind this draft targets.
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Payable(_) => RecordKind::Payable,
            Self::Receivable(_) => RecordKind::Receivable,
            Self::Vacation(_) => RecordKind::Vacation,
        }
    }

    /// The draft's key field, possibly empty before validation.
    pub fn id(&self) -> &str {
        match self {
            Self::Payable(d) | Self::Receivable(d) => &d.id,
            Self::Vacation(d) => &d.id,
        }
    }

    /// Validates the draft into a [`Record`] of the same kind.
    pub fn validate(self) -> Result<Record, DraftError> {
        match self {
            Self::Payable(d) => Ok(Record::Payable(d.validate()?)),
            Self::Receivable(d) => Ok(Record::Receivable(d.validate()?)),
            Self::Vacation(d) => Ok(Record::Vacation(d.validate()?)),
        }
    }
}

/// A validated record plus the kind it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// Record for the payables table.
    Payable(ObligationRecord),
    /// Record for the receivables table.
    Receivable(ObligationRecord),
    /// Record for the vacations table.
    Vacation(VacationRecord),
}

impl Record {
    /// The record kind this record belongs to.
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Payable(_) => RecordKind::Payable,
            Self::Receivable(_) => RecordKind::Receivable,
            Self::Vacation(_) => RecordKind::Vacation,
        }
    }

    /// The record's key.
    pub fn id(&self) -> &str {
        match self {
            Self::Payable(r) | Self::Receivable(r) => &r.id,
            Self::Vacation(r) => &r.id,
        }
    }

    /// Full row in the kind's fixed column order.
    pub fn to_row(&self) -> Row {
        match self {
            Self::Payable(r) | Self::Receivable(r) => r.to_row(),
            Self::Vacation(r) => r.to_row(),
        }
    }
}

fn require(field: &'static str, value: &str) -> Result<(), DraftError> {
    if value.trim().is_empty() {
        Err(DraftError::MissingField(field))
    } else {
        Ok(())
    }
}
