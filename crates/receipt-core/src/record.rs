//! Receipt records
//!
//! A receipt is exactly seven free-form string fields. No date or amount
//! parsing happens here; values are stored and drawn as submitted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The seven fields of a receipt, in draw order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceiptField {
    Date,
    ReceiptNumber,
    ReceivedFrom,
    Amount,
    PaymentMethod,
    Concept,
    Saldo,
}

impl ReceiptField {
    /// Every field, in the order they are drawn onto the template
    pub const ALL: [ReceiptField; 7] = [
        ReceiptField::Date,
        ReceiptField::ReceiptNumber,
        ReceiptField::ReceivedFrom,
        ReceiptField::Amount,
        ReceiptField::PaymentMethod,
        ReceiptField::Concept,
        ReceiptField::Saldo,
    ];

    /// Name used in form submissions, the layout config and the store file
    pub fn name(self) -> &'static str {
        match self {
            ReceiptField::Date => "date",
            ReceiptField::ReceiptNumber => "receipt_number",
            ReceiptField::ReceivedFrom => "received_from",
            ReceiptField::Amount => "amount",
            ReceiptField::PaymentMethod => "payment_method",
            ReceiptField::Concept => "concept",
            ReceiptField::Saldo => "saldo",
        }
    }
}

impl fmt::Display for ReceiptField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReceiptField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReceiptField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| format!("Unknown receipt field: {}", s))
    }
}

/// One submitted receipt
///
/// Field declaration order is the serialized key order in the store file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    pub date: String,
    pub receipt_number: String,
    pub received_from: String,
    pub amount: String,
    pub payment_method: String,
    pub concept: String,
    pub saldo: String,
}

impl ReceiptRecord {
    pub fn value(&self, field: ReceiptField) -> &str {
        match field {
            ReceiptField::Date => &self.date,
            ReceiptField::ReceiptNumber => &self.receipt_number,
            ReceiptField::ReceivedFrom => &self.received_from,
            ReceiptField::Amount => &self.amount,
            ReceiptField::PaymentMethod => &self.payment_method,
            ReceiptField::Concept => &self.concept,
            ReceiptField::Saldo => &self.saldo,
        }
    }

    /// Iterate `(field, value)` pairs in draw order
    pub fn fields(&self) -> impl Iterator<Item = (ReceiptField, &str)> + '_ {
        ReceiptField::ALL
            .into_iter()
            .map(move |field| (field, self.value(field)))
    }

    /// Case-insensitive substring match against any field.
    ///
    /// An empty query matches every record.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.fields()
            .any(|(_, value)| value.to_lowercase().contains(&needle))
    }
}
