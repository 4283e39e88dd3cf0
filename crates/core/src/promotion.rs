//! Display-only promotion and discount-code payloads.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::{CURRENCY_SIGN, DiscountId, PromotionId};

/// Entry of `GET /promotions/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Promotion {
    pub id: PromotionId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Entry of `GET /promotions/discounts`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Discount {
    pub id: DiscountId,
    pub code: String,
    #[serde(default)]
    pub percentage: Option<Decimal>,
    #[serde(default)]
    pub value: Option<Decimal>,
    #[serde(default)]
    pub valid_from: Option<NaiveDate>,
    #[serde(default)]
    pub valid_to: Option<NaiveDate>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub used_count: u32,
}

const fn default_active() -> bool {
    true
}

impl Discount {
    /// Short label: `"10%"` for percentage codes, `"50 ₽"` for fixed ones.
    #[must_use]
    pub fn label(&self) -> String {
        match (self.percentage, self.value) {
            (Some(pct), _) if !pct.is_zero() => format!("{}%", pct.normalize()),
            (_, Some(value)) => format!("{} {CURRENCY_SIGN}", value.normalize()),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn discount(percentage: Option<Decimal>, value: Option<Decimal>) -> Discount {
        Discount {
            id: DiscountId::new(1),
            code: "TEA10".to_string(),
            percentage,
            value,
            valid_from: None,
            valid_to: None,
            is_active: true,
            used_count: 0,
        }
    }

    #[test]
    fn test_discount_label() {
        assert_eq!(discount(Some(Decimal::new(1000, 2)), None).label(), "10%");
        assert_eq!(discount(None, Some(Decimal::new(5000, 2))).label(), "50 ₽");
        assert_eq!(discount(None, None).label(), "");
    }

    #[test]
    fn test_promotion_deserialize() {
        let promo: Promotion = serde_json::from_str(
            r#"{"id": 1, "title": "Happy hour", "description": "2 for 1",
                "image_url": null, "start_date": "2026-10-01", "end_date": "2026-10-31",
                "is_active": true}"#,
        )
        .unwrap();
        assert_eq!(promo.title, "Happy hour");
        assert_eq!(promo.end_date, NaiveDate::from_ymd_opt(2026, 10, 31));
    }
}
