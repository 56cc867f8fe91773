//! Sales channel inference from the marketplace connector fields.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::record::{RawRecord, as_integer, is_truthy};

pub const LAZADA_FIELD: &str = "lazada_order_id";
pub const WEBSITE_FIELD: &str = "woocommerce_order_id";
pub const SHOPEE_FIELD: &str = "shopee_order_id";
pub const ORIGIN_FIELD: &str = "origin";

/// Where an order came from.
///
/// Serialized as its plain label; orders that match no marketplace carry the
/// customer name instead, or `"Direct"` when there is none.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Channel {
    Lazada,
    Website,
    Shopee,
    Amazon,
    Party(String),
    Direct,
}

impl Channel {
    pub fn label(&self) -> &str {
        match self {
            Channel::Lazada => "Lazada",
            Channel::Website => "Website",
            Channel::Shopee => "Shopee",
            Channel::Amazon => "Amazon",
            Channel::Party(name) => name,
            Channel::Direct => "Direct",
        }
    }

    /// Inverse of [`Channel::label`]. Unknown labels are party names.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Lazada" => Channel::Lazada,
            "Website" => Channel::Website,
            "Shopee" => Channel::Shopee,
            "Amazon" => Channel::Amazon,
            "Direct" => Channel::Direct,
            other => Channel::Party(other.to_string()),
        }
    }
}

impl core::fmt::Display for Channel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Channel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Channel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Channel::from_label(&label))
    }
}

/// Classify a raw record. First matching rule wins:
///
/// 1. truthy Lazada id
/// 2. WooCommerce id coercing to a nonzero integer
/// 3. truthy Shopee id
/// 4. `origin` starting with "amazon", case-insensitive
/// 5. the customer name, else `Direct` (an empty name counts as none)
pub fn detect_channel(record: &RawRecord, party_name: Option<&str>) -> Channel {
    if is_truthy(record.get(LAZADA_FIELD)) {
        return Channel::Lazada;
    }

    let website_id = record
        .get(WEBSITE_FIELD)
        .filter(|v| is_truthy(Some(*v)))
        .and_then(as_integer);
    if website_id.is_some_and(|id| id != 0) {
        return Channel::Website;
    }

    if is_truthy(record.get(SHOPEE_FIELD)) {
        return Channel::Shopee;
    }

    let from_amazon = record
        .get(ORIGIN_FIELD)
        .and_then(|v| v.as_str())
        .is_some_and(|origin| origin.to_lowercase().starts_with("amazon"));
    if from_amazon {
        return Channel::Amazon;
    }

    match party_name {
        Some(name) if !name.is_empty() => Channel::Party(name.to_string()),
        _ => Channel::Direct,
    }
}
