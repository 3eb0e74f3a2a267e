use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A bid placed by a bidder on an auction.
///
/// `bid_value` travels as decimal text (`"123.45"`) so amounts survive
/// a JSON round trip without floating-point drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    pub bidder_name: String,
    pub auction_id: i64,
    pub bid_value: Decimal,
}

impl Bid {
    #[cfg(test)]
    pub fn new(bidder_name: impl Into<String>, auction_id: i64, bid_value: Decimal) -> Self {
        Self {
            bidder_name: bidder_name.into(),
            auction_id,
            bid_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Bid;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn bid_value_is_sent_as_text() {
        let bid = Bid::new("YD", 100, Decimal::from_str("123.45").unwrap());
        let json = serde_json::to_value(&bid).unwrap();
        assert_eq!(json["bid_value"], "123.45");
        assert_eq!(json["bidder_name"], "YD");
        assert_eq!(json["auction_id"], 100);
    }

    #[test]
    fn decodes_text_and_numeric_amounts() {
        let from_text: Bid =
            serde_json::from_str(r#"{"bidder_name":"a","auction_id":1,"bid_value":"10.50"}"#)
                .unwrap();
        assert_eq!(from_text.bid_value, Decimal::from_str("10.50").unwrap());

        let from_number: Bid =
            serde_json::from_str(r#"{"bidder_name":"a","auction_id":1,"bid_value":7}"#).unwrap();
        assert_eq!(from_number.bid_value, Decimal::from(7));
    }

    #[test]
    fn rejects_missing_fields() {
        let res = serde_json::from_str::<Bid>(r#"{"bidder_name":"a"}"#);
        assert!(res.is_err());
    }
}
