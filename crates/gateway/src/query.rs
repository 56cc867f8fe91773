//! Date-range query construction for `sale.order/search_read`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::{Value, json};

use salesbridge_core::error::ISO_DATE_MESSAGE;
use salesbridge_core::{SalesError, SalesResult, ValueObject};
use salesbridge_sales::order::ODOO_DATETIME_FORMAT;

pub const SALE_ORDER_MODEL: &str = "sale.order";
pub const ORDER_DATE_FIELD: &str = "date_order";

/// Fields requested when the caller does not pick their own.
pub const DEFAULT_FIELDS: &[&str] = &[
    "id",
    "name",
    "date_order",
    "amount_total",
    "partner_id",
    "currency_id",
    // channel detection
    "lazada_order_id",
    "woocommerce_order_id",
    "shopee_order_id",
    "origin",
];

/// A caller-supplied range endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// Used as-is.
    Timestamp(NaiveDateTime),
    /// Widened to the start or end of the day.
    Date(NaiveDate),
    /// `YYYY-MM-DD`, widened like [`DateInput::Date`].
    Text(String),
}

impl From<NaiveDateTime> for DateInput {
    fn from(value: NaiveDateTime) -> Self {
        DateInput::Timestamp(value)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        DateInput::Date(value)
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        DateInput::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        DateInput::Text(value)
    }
}

impl From<&String> for DateInput {
    fn from(value: &String) -> Self {
        DateInput::Text(value.clone())
    }
}

/// Which end of a range a date is widened to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

impl Bound {
    fn time(self) -> NaiveTime {
        let (h, m, s, micro) = match self {
            Bound::Start => (0, 0, 0, 0),
            Bound::End => (23, 59, 59, 999_999),
        };
        NaiveTime::from_hms_micro_opt(h, m, s, micro).unwrap_or_default()
    }
}

impl DateInput {
    pub fn resolve(&self, bound: Bound) -> SalesResult<NaiveDateTime> {
        match self {
            DateInput::Timestamp(ts) => Ok(*ts),
            DateInput::Date(date) => Ok(date.and_time(bound.time())),
            DateInput::Text(text) => Ok(parse_iso_date(text)?.and_time(bound.time())),
        }
    }
}

/// Strict `YYYY-MM-DD`; anything else is a validation failure.
pub fn parse_iso_date(value: &str) -> SalesResult<NaiveDate> {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return Err(SalesError::validation(ISO_DATE_MESSAGE));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| SalesError::validation(ISO_DATE_MESSAGE))
}

/// Remote wall-clock rendering. No offset is attached: the server reads it in
/// its own configured timezone.
pub fn format_remote_datetime(value: NaiveDateTime) -> String {
    value.format(ODOO_DATETIME_FORMAT).to_string()
}

/// Normalized `[from, to]` bounds. An inverted range is kept as given.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl ValueObject for DateRange {}

impl DateRange {
    pub fn new(from: impl Into<DateInput>, to: impl Into<DateInput>) -> SalesResult<Self> {
        Ok(Self {
            from: from.into().resolve(Bound::Start)?,
            to: to.into().resolve(Bound::End)?,
        })
    }
}

/// A fully built `search_read` request, minus the session.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderQuery {
    range: DateRange,
    fields: Vec<String>,
    limit: Option<u32>,
}

impl OrderQuery {
    pub fn new(range: DateRange, fields: &[&str], limit: Option<u32>) -> Self {
        Self {
            range,
            fields: fields.iter().map(|f| f.to_string()).collect(),
            limit,
        }
    }

    pub fn lower_bound(&self) -> String {
        format_remote_datetime(self.range.from)
    }

    pub fn upper_bound(&self) -> String {
        format_remote_datetime(self.range.to)
    }

    /// Conjunctive domain filter on `date_order`.
    pub fn domain(&self) -> Value {
        json!([
            [ORDER_DATE_FIELD, ">=", self.lower_bound()],
            [ORDER_DATE_FIELD, "<=", self.upper_bound()],
        ])
    }

    /// Keyword options; results are always ascending by order date.
    pub fn options(&self) -> Value {
        let mut options = json!({
            "fields": self.fields,
            "order": format!("{ORDER_DATE_FIELD} asc"),
        });
        if let Some(limit) = self.limit {
            options["limit"] = json!(limit);
        }
        options
    }
}
