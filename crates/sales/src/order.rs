use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use salesbridge_core::{Entity, SalesError, SalesResult};

use crate::channel::{Channel, detect_channel};
use crate::record::{RawRecord, RelationalRef, as_float, display_string};

/// Wall-clock format used by the remote service for datetime fields.
pub const ODOO_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Remote `sale.order` identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleOrderId(pub i64);

impl core::fmt::Display for SaleOrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Placeholder timestamp for orders whose `date_order` could not be read.
pub fn unknown_order_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// A normalized sale order.
///
/// Built once per retrieval from a raw record and never mutated. Serializes to
/// a flat JSON object keyed by the remote field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleOrder {
    pub id: SaleOrderId,
    #[serde(rename = "name")]
    pub reference: String,
    #[serde(rename = "date_order", with = "odoo_datetime")]
    pub ordered_at: NaiveDateTime,
    #[serde(rename = "amount_total")]
    pub total_amount: f64,
    #[serde(rename = "partner_name")]
    pub party_name: Option<String>,
    pub currency_name: Option<String>,
    pub channel: Channel,
}

impl Entity for SaleOrder {
    type Id = SaleOrderId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl SaleOrder {
    /// Map one `search_read` record.
    ///
    /// Only `date_order` and `amount_total` have fallbacks; a missing or
    /// non-integer `id` means the response is malformed.
    pub fn from_record(record: &RawRecord) -> SalesResult<Self> {
        let id = record
            .get("id")
            .and_then(Value::as_i64)
            .ok_or_else(|| SalesError::remote("sale.order record without an integer id"))?;

        let reference = record.get("name").map(display_string).unwrap_or_default();
        let ordered_at = parse_order_time(id, record.get("date_order"));

        let total_amount = match record.get("amount_total") {
            None | Some(Value::Null) => 0.0,
            Some(raw) => as_float(raw).ok_or_else(|| {
                SalesError::remote(format!("sale.order {id}: amount_total is not numeric: {raw}"))
            })?,
        };

        let party_name = RelationalRef::from_value(record.get("partner_id")).into_name();
        let currency_name = RelationalRef::from_value(record.get("currency_id")).into_name();
        let channel = detect_channel(record, party_name.as_deref());

        Ok(Self {
            id: SaleOrderId(id),
            reference,
            ordered_at,
            total_amount,
            party_name,
            currency_name,
            channel,
        })
    }

    /// Flat JSON rendering handed to the CLI and HTTP shells.
    pub fn to_serializable(&self) -> Value {
        serde_json::json!({
            "id": self.id.0,
            "name": self.reference,
            "date_order": self.ordered_at.format(ODOO_DATETIME_FORMAT).to_string(),
            "amount_total": self.total_amount,
            "partner_name": self.party_name,
            "currency_name": self.currency_name,
            "channel": self.channel.label(),
        })
    }
}

fn parse_order_time(id: i64, raw: Option<&Value>) -> NaiveDateTime {
    match raw.and_then(Value::as_str) {
        Some(text) => {
            NaiveDateTime::parse_from_str(text, ODOO_DATETIME_FORMAT).unwrap_or_else(|e| {
                tracing::warn!(
                    order_id = id,
                    date_order = text,
                    error = %e,
                    "unparseable date_order"
                );
                unknown_order_time()
            })
        }
        None => unknown_order_time(),
    }
}

mod odoo_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::ODOO_DATETIME_FORMAT;

    pub fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(ODOO_DATETIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&text, ODOO_DATETIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    fn website_order() -> RawRecord {
        record(json!({
            "id": 1042,
            "name": "S01042",
            "date_order": "2024-03-05 14:22:09",
            "amount_total": 1499.5,
            "partner_id": [42, "Acme Co"],
            "currency_id": [2, "USD"],
            "lazada_order_id": false,
            "woocommerce_order_id": 8812,
            "shopee_order_id": false,
            "origin": false,
        }))
    }

    #[test]
    fn maps_every_field_of_a_complete_record() {
        let order = SaleOrder::from_record(&website_order()).unwrap();

        assert_eq!(order.id(), SaleOrderId(1042));
        assert_eq!(order.reference, "S01042");
        assert_eq!(
            order.ordered_at,
            NaiveDate::from_ymd_opt(2024, 3, 5)
                .unwrap()
                .and_hms_opt(14, 22, 9)
                .unwrap()
        );
        assert_eq!(order.total_amount, 1499.5);
        assert_eq!(order.party_name.as_deref(), Some("Acme Co"));
        assert_eq!(order.currency_name.as_deref(), Some("USD"));
        assert_eq!(order.channel, Channel::Website);
        assert_ne!(order.ordered_at, unknown_order_time());
    }

    #[test]
    fn party_reference_becomes_channel_when_no_marketplace_matches() {
        let rec = record(json!({ "id": 7, "name": "S7", "partner_id": [42, "Acme Co"] }));
        let order = SaleOrder::from_record(&rec).unwrap();
        assert_eq!(order.channel, Channel::Party("Acme Co".into()));
    }

    #[test]
    fn no_party_and_no_signals_is_direct() {
        let rec = record(json!({
            "id": 8,
            "name": "S8",
            "partner_id": false,
            "currency_id": false,
        }));
        let order = SaleOrder::from_record(&rec).unwrap();
        assert_eq!(order.party_name, None);
        assert_eq!(order.currency_name, None);
        assert_eq!(order.channel, Channel::Direct);
    }

    #[test]
    fn blank_partner_name_classifies_as_direct() {
        let rec = record(json!({ "id": 14, "name": "S14", "partner_id": [42, ""] }));
        let order = SaleOrder::from_record(&rec).unwrap();

        assert_eq!(order.channel, Channel::Direct);
        assert_eq!(order.to_serializable()["channel"], "Direct");
    }

    #[test]
    fn missing_or_bad_date_falls_back_to_sentinel() {
        for raw in [json!(null), json!(false), json!("05/03/2024"), json!(20240305)] {
            let rec = record(json!({ "id": 9, "name": "S9", "date_order": raw }));
            let order = SaleOrder::from_record(&rec).unwrap();
            assert_eq!(order.ordered_at, unknown_order_time());
        }

        let rec = record(json!({ "id": 9, "name": "S9" }));
        assert_eq!(SaleOrder::from_record(&rec).unwrap().ordered_at, unknown_order_time());
    }

    #[test]
    fn missing_amount_defaults_to_zero() {
        let rec = record(json!({ "id": 10, "name": "S10" }));
        assert_eq!(SaleOrder::from_record(&rec).unwrap().total_amount, 0.0);

        let rec = record(json!({ "id": 10, "name": "S10", "amount_total": 12 }));
        assert_eq!(SaleOrder::from_record(&rec).unwrap().total_amount, 12.0);
    }

    #[test]
    fn missing_id_is_a_remote_defect() {
        let rec = record(json!({ "name": "S11", "amount_total": 3.0 }));
        let err = SaleOrder::from_record(&rec).unwrap_err();
        assert!(matches!(err, SalesError::RemoteService(_)));
    }

    #[test]
    fn non_numeric_amount_is_a_remote_defect() {
        let rec = record(json!({ "id": 12, "name": "S12", "amount_total": [1, 2] }));
        let err = SaleOrder::from_record(&rec).unwrap_err();
        assert!(matches!(err, SalesError::RemoteService(msg) if msg.contains("amount_total")));
    }

    #[test]
    fn serializable_form_is_flat_and_uses_remote_keys() {
        let order = SaleOrder::from_record(&website_order()).unwrap();
        let flat = order.to_serializable();

        assert_eq!(
            flat,
            json!({
                "id": 1042,
                "name": "S01042",
                "date_order": "2024-03-05 14:22:09",
                "amount_total": 1499.5,
                "partner_name": "Acme Co",
                "currency_name": "USD",
                "channel": "Website",
            })
        );
        assert_eq!(serde_json::to_value(&order).unwrap(), flat);
    }

    #[test]
    fn sentinel_time_survives_serialization() {
        let rec = record(json!({ "id": 13, "name": "S13" }));
        let order = SaleOrder::from_record(&rec).unwrap();
        let flat = order.to_serializable();
        assert_eq!(flat["date_order"], "0001-01-01 00:00:00");

        let back: SaleOrder = serde_json::from_value(flat).unwrap();
        assert_eq!(back, order);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Serializing and re-parsing `date_order` reproduces the timestamp to the second.
        #[test]
        fn serialized_timestamp_round_trips(
            secs in 0i64..4_102_444_800i64,
            amount in 0.0f64..1_000_000.0,
        ) {
            let ordered_at = chrono::DateTime::from_timestamp(secs, 0)
                .unwrap()
                .naive_utc();
            let order = SaleOrder {
                id: SaleOrderId(1),
                reference: "S1".into(),
                ordered_at,
                total_amount: amount,
                party_name: None,
                currency_name: Some("EUR".into()),
                channel: Channel::Direct,
            };

            let flat = order.to_serializable();
            let text = flat["date_order"].as_str().unwrap();
            let reparsed = NaiveDateTime::parse_from_str(text, ODOO_DATETIME_FORMAT).unwrap();
            prop_assert_eq!(reparsed, ordered_at);

            let decoded: SaleOrder = serde_json::from_value(flat).unwrap();
            prop_assert_eq!(decoded, order);
        }
    }
}
