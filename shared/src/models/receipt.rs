//! Receipt Model

use serde::{Deserialize, Serialize};

/// Receipt approval status
///
/// `Pending` is the only non-terminal state. A receipt moves to
/// `Approved` or `Rejected` exactly once and never back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ReceiptStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReceiptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Whether an admin decision has already been recorded
    pub fn is_decided(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Receipt entity (member payment proof)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Receipt {
    pub id: i64,
    pub name: String,
    pub rh_no: String,
    pub amount_paise: i64,
    pub description: Option<String>,
    pub attachment_path: Option<String>,
    pub status: ReceiptStatus,
    /// Payment date, `YYYY-MM-DD`
    pub date: String,
    pub member_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create receipt payload (amount already in minor units)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptCreate {
    pub name: String,
    pub rh_no: String,
    pub amount_paise: i64,
    pub description: Option<String>,
    pub attachment_path: Option<String>,
    pub date: String,
    pub member_id: Option<i64>,
}

/// Receipt as returned by the API: row plus major-unit amount and a
/// short-lived attachment link
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptView {
    #[serde(flatten)]
    pub receipt: Receipt,
    pub amount: f64,
    pub attachment_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&ReceiptStatus::Approved).unwrap(),
            "\"APPROVED\""
        );
        let status: ReceiptStatus = serde_json::from_str("\"REJECTED\"").unwrap();
        assert_eq!(status, ReceiptStatus::Rejected);
        assert_eq!(ReceiptStatus::Pending.as_str(), "PENDING");
    }

    #[test]
    fn test_is_decided() {
        assert!(!ReceiptStatus::Pending.is_decided());
        assert!(ReceiptStatus::Approved.is_decided());
        assert!(ReceiptStatus::Rejected.is_decided());
    }

    #[test]
    fn test_view_flattens_camel_case() {
        let view = ReceiptView {
            receipt: Receipt {
                id: 1,
                name: "Asha".into(),
                rh_no: "B-204".into(),
                amount_paise: 150_050,
                description: None,
                attachment_path: Some("receipts/x.pdf".into()),
                status: ReceiptStatus::Pending,
                date: "2024-04-01".into(),
                member_id: Some(7),
                created_at: 1,
                updated_at: 1,
            },
            amount: 1500.5,
            attachment_url: None,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["rhNo"], "B-204");
        assert_eq!(json["amountPaise"], 150_050);
        assert_eq!(json["amount"], 1500.5);
        assert_eq!(json["status"], "PENDING");
        assert_eq!(json["memberId"], 7);
    }
}
