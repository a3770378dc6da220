use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Count, Money, safe_float, safe_int};

/// The six raw form values, kept verbatim as text.
///
/// Stored as a JSON object of strings. Empty strings (and missing keys) read
/// back as unset, so a blank field never overwrites a prefill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    #[serde(default, serialize_with = "blank_if_unset", deserialize_with = "set_if_present")]
    pub refill_price: Option<String>,
    #[serde(default, serialize_with = "blank_if_unset", deserialize_with = "set_if_present")]
    pub brand_new_price: Option<String>,
    #[serde(default, serialize_with = "blank_if_unset", deserialize_with = "set_if_present")]
    pub stocks_out: Option<String>,
    #[serde(default, serialize_with = "blank_if_unset", deserialize_with = "set_if_present")]
    pub back_out: Option<String>,
    #[serde(default, serialize_with = "blank_if_unset", deserialize_with = "set_if_present")]
    pub remaining_items: Option<String>,
    #[serde(default, serialize_with = "blank_if_unset", deserialize_with = "set_if_present")]
    pub empty_cans: Option<String>,
}

impl InputSnapshot {
    /// Fill every unset field from `saved`, keeping fields already set here.
    pub fn prefill_from(mut self, saved: &InputSnapshot) -> Self {
        fn fill(field: &mut Option<String>, saved: &Option<String>) {
            if field.as_deref().is_none_or(str::is_empty) {
                field.clone_from(saved);
            }
        }
        fill(&mut self.refill_price, &saved.refill_price);
        fill(&mut self.brand_new_price, &saved.brand_new_price);
        fill(&mut self.stocks_out, &saved.stocks_out);
        fill(&mut self.back_out, &saved.back_out);
        fill(&mut self.remaining_items, &saved.remaining_items);
        fill(&mut self.empty_cans, &saved.empty_cans);
        self
    }

    /// Coerce the raw text into calculator inputs. Never fails.
    pub fn to_inputs(&self) -> SalesInputs {
        SalesInputs {
            refill_price: safe_float(self.refill_price.as_deref()),
            brand_new_price: safe_float(self.brand_new_price.as_deref()),
            stocks_out: safe_int(self.stocks_out.as_deref()),
            back_out: safe_int(self.back_out.as_deref()),
            remaining_items: safe_int(self.remaining_items.as_deref()),
            empty_cans: safe_int(self.empty_cans.as_deref()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.refill_price.is_none()
            && self.brand_new_price.is_none()
            && self.stocks_out.is_none()
            && self.back_out.is_none()
            && self.remaining_items.is_none()
            && self.empty_cans.is_none()
    }
}

fn blank_if_unset<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_deref().unwrap_or(""))
}

fn set_if_present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Coerced calculator inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SalesInputs {
    pub refill_price: Money,
    pub brand_new_price: Money,
    pub stocks_out: Count,
    pub back_out: Count,
    pub remaining_items: Count,
    pub empty_cans: Count,
}

/// Everything derived from one sales calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SalesFigures {
    pub total_sold: Count,
    pub refills_sold: Count,
    pub brand_new_sold: Count,
    pub refill_money: Money,
    pub brand_new_money: Money,
    pub total_money_to_remit: Money,
}

/// Derive sales totals from inventory counts.
///
/// `total_sold` is left as computed, even when negative; only the brand-new
/// count is clamped at zero.
pub fn calculate_sales(inputs: &SalesInputs) -> SalesFigures {
    let total_sold = inputs
        .stocks_out
        .saturating_sub(inputs.back_out)
        .saturating_sub(inputs.remaining_items);
    let refills_sold = inputs.empty_cans;
    let brand_new_sold = total_sold.saturating_sub(refills_sold).max(0);

    let refill_money = refills_sold as Money * inputs.refill_price;
    let brand_new_money = brand_new_sold as Money * inputs.brand_new_price;

    SalesFigures {
        total_sold,
        refills_sold,
        brand_new_sold,
        refill_money,
        brand_new_money,
        total_money_to_remit: refill_money + brand_new_money,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_inputs() -> SalesInputs {
        SalesInputs {
            refill_price: 2.5,
            brand_new_price: 5.0,
            stocks_out: 100,
            back_out: 5,
            remaining_items: 20,
            empty_cans: 30,
        }
    }

    #[test]
    fn test_reference_day() {
        let figures = calculate_sales(&sample_inputs());
        assert_eq!(figures.total_sold, 75);
        assert_eq!(figures.refills_sold, 30);
        assert_eq!(figures.brand_new_sold, 45);
        assert_eq!(figures.refill_money, 75.0);
        assert_eq!(figures.brand_new_money, 225.0);
        assert_eq!(figures.total_money_to_remit, 300.0);
    }

    #[test]
    fn test_brand_new_sold_never_negative() {
        let inputs = SalesInputs {
            empty_cans: 90,
            ..sample_inputs()
        };
        let figures = calculate_sales(&inputs);
        assert_eq!(figures.total_sold, 75);
        assert_eq!(figures.brand_new_sold, 0);
        assert_eq!(figures.brand_new_money, 0.0);
        assert_eq!(figures.refill_money, 225.0);
    }

    #[test]
    fn test_total_sold_is_not_clamped() {
        let inputs = SalesInputs {
            stocks_out: 10,
            back_out: 5,
            remaining_items: 20,
            empty_cans: 0,
            ..sample_inputs()
        };
        let figures = calculate_sales(&inputs);
        assert_eq!(figures.total_sold, -15);
        assert_eq!(figures.brand_new_sold, 0);
    }

    #[test]
    fn test_clamp_holds_across_grid() {
        for stocks_out in [0, 10, 50] {
            for empty_cans in [0, 25, 60] {
                let inputs = SalesInputs {
                    stocks_out,
                    empty_cans,
                    ..sample_inputs()
                };
                assert!(calculate_sales(&inputs).brand_new_sold >= 0);
            }
        }
    }

    #[test]
    fn test_extreme_counts_saturate() {
        let inputs = SalesInputs {
            stocks_out: Count::MIN,
            back_out: Count::MAX,
            ..sample_inputs()
        };
        let figures = calculate_sales(&inputs);
        assert_eq!(figures.total_sold, Count::MIN);
        assert_eq!(figures.brand_new_sold, 0);
    }

    #[test]
    fn test_snapshot_coercion() {
        let snapshot = InputSnapshot {
            refill_price: Some("2.50".into()),
            brand_new_price: Some("5".into()),
            stocks_out: Some("1,000".into()),
            back_out: Some("oops".into()),
            remaining_items: None,
            empty_cans: Some("".into()),
        };
        let inputs = snapshot.to_inputs();
        assert_eq!(inputs.refill_price, 2.5);
        assert_eq!(inputs.brand_new_price, 5.0);
        assert_eq!(inputs.stocks_out, 1000);
        assert_eq!(inputs.back_out, 0);
        assert_eq!(inputs.remaining_items, 0);
        assert_eq!(inputs.empty_cans, 0);
    }

    #[test]
    fn test_snapshot_serializes_all_six_fields() {
        let snapshot = InputSnapshot {
            refill_price: Some("2.5".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["refill_price"], "2.5");
        assert_eq!(json["empty_cans"], "");
        assert_eq!(json.as_object().unwrap().len(), 6);
    }

    #[test]
    fn test_snapshot_blank_and_missing_fields_are_unset() {
        let snapshot: InputSnapshot =
            serde_json::from_str(r#"{"refill_price":"","stocks_out":"40","back_out":null}"#)
                .unwrap();
        assert_eq!(snapshot.refill_price, None);
        assert_eq!(snapshot.stocks_out.as_deref(), Some("40"));
        assert_eq!(snapshot.back_out, None);
        assert_eq!(snapshot.empty_cans, None);
    }

    #[test]
    fn test_prefill_keeps_explicit_values() {
        let saved = InputSnapshot {
            refill_price: Some("2.5".into()),
            stocks_out: Some("100".into()),
            ..Default::default()
        };
        let entered = InputSnapshot {
            stocks_out: Some("120".into()),
            back_out: Some("".into()),
            ..Default::default()
        };
        let merged = entered.prefill_from(&saved);
        assert_eq!(merged.refill_price.as_deref(), Some("2.5"));
        assert_eq!(merged.stocks_out.as_deref(), Some("120"));
        assert_eq!(merged.back_out, None);
        assert!(!merged.is_empty());
    }
}
