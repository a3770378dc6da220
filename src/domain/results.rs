use serde::Serialize;

use super::{Count, Money, SalesFigures, format_count, format_money};

/// The eight labelled figures shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultLabel {
    TotalSold,
    RefillsSold,
    BrandNewSold,
    RefillMoney,
    BrandNewMoney,
    TotalMoneyToRemit,
    TotalExpenses,
    FinalMoneyToRemit,
}

impl ResultLabel {
    /// Sales figures, in display order.
    pub const SALES: [ResultLabel; 6] = [
        ResultLabel::TotalSold,
        ResultLabel::RefillsSold,
        ResultLabel::BrandNewSold,
        ResultLabel::RefillMoney,
        ResultLabel::BrandNewMoney,
        ResultLabel::TotalMoneyToRemit,
    ];

    /// Final remit figures, in display order.
    pub const FINAL: [ResultLabel; 3] = [
        ResultLabel::TotalMoneyToRemit,
        ResultLabel::TotalExpenses,
        ResultLabel::FinalMoneyToRemit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResultLabel::TotalSold => "Total sold",
            ResultLabel::RefillsSold => "Refills sold",
            ResultLabel::BrandNewSold => "Brand New Butane sold",
            ResultLabel::RefillMoney => "Refill Money to Remit",
            ResultLabel::BrandNewMoney => "Brand New Money to Remit",
            ResultLabel::TotalMoneyToRemit => "Total Money to Remit",
            ResultLabel::TotalExpenses => "Total Expenses",
            ResultLabel::FinalMoneyToRemit => "Final Money to Remit",
        }
    }

    pub fn is_count(&self) -> bool {
        matches!(
            self,
            ResultLabel::TotalSold | ResultLabel::RefillsSold | ResultLabel::BrandNewSold
        )
    }
}

impl std::fmt::Display for ResultLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Current figures for the session. Every field starts at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ResultsRecord {
    #[serde(rename = "Total sold")]
    pub total_sold: Count,
    #[serde(rename = "Refills sold")]
    pub refills_sold: Count,
    #[serde(rename = "Brand New Butane sold")]
    pub brand_new_sold: Count,
    #[serde(rename = "Refill Money to Remit")]
    pub refill_money: Money,
    #[serde(rename = "Brand New Money to Remit")]
    pub brand_new_money: Money,
    #[serde(rename = "Total Money to Remit")]
    pub total_money_to_remit: Money,
    #[serde(rename = "Total Expenses")]
    pub total_expenses: Money,
    #[serde(rename = "Final Money to Remit")]
    pub final_money_to_remit: Money,
}

impl ResultsRecord {
    /// Overwrite the six sales fields. Expense fields are left alone.
    pub fn apply_sales(&mut self, figures: &SalesFigures) {
        self.total_sold = figures.total_sold;
        self.refills_sold = figures.refills_sold;
        self.brand_new_sold = figures.brand_new_sold;
        self.refill_money = figures.refill_money;
        self.brand_new_money = figures.brand_new_money;
        self.total_money_to_remit = figures.total_money_to_remit;
    }

    /// Deduct expenses from the sales total and record both figures.
    /// The result is not clamped: expenses may exceed the remit.
    pub fn apply_final(&mut self, total_expenses: Money) -> Money {
        self.total_expenses = total_expenses;
        self.final_money_to_remit = final_remit(self.total_money_to_remit, total_expenses);
        self.final_money_to_remit
    }

    pub fn value(&self, label: ResultLabel) -> Money {
        match label {
            ResultLabel::TotalSold => self.total_sold as Money,
            ResultLabel::RefillsSold => self.refills_sold as Money,
            ResultLabel::BrandNewSold => self.brand_new_sold as Money,
            ResultLabel::RefillMoney => self.refill_money,
            ResultLabel::BrandNewMoney => self.brand_new_money,
            ResultLabel::TotalMoneyToRemit => self.total_money_to_remit,
            ResultLabel::TotalExpenses => self.total_expenses,
            ResultLabel::FinalMoneyToRemit => self.final_money_to_remit,
        }
    }

    /// Display text for a figure: counts as integers, money with two decimals.
    pub fn display(&self, label: ResultLabel) -> String {
        match label {
            ResultLabel::TotalSold => format_count(self.total_sold),
            ResultLabel::RefillsSold => format_count(self.refills_sold),
            ResultLabel::BrandNewSold => format_count(self.brand_new_sold),
            other => format_money(self.value(other)),
        }
    }
}

/// Cash left to hand over once expenses are paid out of it.
pub fn final_remit(total_money_to_remit: Money, total_expenses: Money) -> Money {
    total_money_to_remit - total_expenses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SalesInputs, calculate_sales};

    #[test]
    fn test_new_record_is_zeroed() {
        let record = ResultsRecord::default();
        for label in ResultLabel::SALES.iter().chain(ResultLabel::FINAL.iter()) {
            assert_eq!(record.value(*label), 0.0);
        }
    }

    #[test]
    fn test_apply_sales_keeps_expense_fields() {
        let mut record = ResultsRecord {
            total_expenses: 80.0,
            final_money_to_remit: 20.0,
            ..Default::default()
        };
        let figures = calculate_sales(&SalesInputs {
            refill_price: 2.5,
            brand_new_price: 5.0,
            stocks_out: 100,
            back_out: 5,
            remaining_items: 20,
            empty_cans: 30,
        });
        record.apply_sales(&figures);
        assert_eq!(record.total_money_to_remit, 300.0);
        assert_eq!(record.total_expenses, 80.0);
        assert_eq!(record.final_money_to_remit, 20.0);
    }

    #[test]
    fn test_final_remit_allows_negative() {
        let mut record = ResultsRecord {
            total_money_to_remit: 300.0,
            ..Default::default()
        };
        assert_eq!(record.apply_final(80.0), 220.0);
        assert_eq!(record.apply_final(350.0), -50.0);
        assert_eq!(record.total_expenses, 350.0);
        assert_eq!(record.final_money_to_remit, -50.0);
    }

    #[test]
    fn test_display_formats_by_kind() {
        let record = ResultsRecord {
            total_sold: 1200,
            refill_money: 75.0,
            ..Default::default()
        };
        assert_eq!(record.display(ResultLabel::TotalSold), "1,200");
        assert_eq!(record.display(ResultLabel::RefillMoney), "75.00");
        assert!(ResultLabel::BrandNewSold.is_count());
        assert!(!ResultLabel::FinalMoneyToRemit.is_count());
    }

    #[test]
    fn test_serializes_with_display_labels() {
        let json = serde_json::to_value(ResultsRecord::default()).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 8);
        assert!(object.contains_key("Brand New Butane sold"));
        assert!(object.contains_key("Final Money to Remit"));
    }
}
