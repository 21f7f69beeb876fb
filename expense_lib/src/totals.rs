use crate::expenses::Expense;
use itertools::Itertools;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// A sum of amounts that may be expressed in several currencies.
///
/// Amounts in different currencies are never converted nor added together,
/// we just keep one sum per currency code.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrencyTotals {
    values: BTreeMap<String, Decimal>,
}

impl CurrencyTotals {
    pub fn is_zero(&self) -> bool {
        self.values.values().all(|v| v.is_zero())
    }

    pub fn get(&self, currency: &str) -> Decimal {
        self.values.get(currency).copied().unwrap_or(Decimal::ZERO)
    }

    /// Iterate over (currency, total), sorted by currency code
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> + '_ {
        self.values.iter().map(|(c, v)| (c.as_str(), *v))
    }

    pub fn display(&self) -> String {
        self.values
            .iter()
            .map(|(c, v)| format!("{} {}", v, c))
            .join(" + ")
    }
}

impl core::ops::AddAssign<&Expense> for CurrencyTotals {
    fn add_assign(&mut self, rhs: &Expense) {
        self.values
            .entry(rhs.currency().to_string())
            .and_modify(|v| *v += rhs.amount())
            .or_insert(rhs.amount());
    }
}

impl core::ops::AddAssign<&CurrencyTotals> for CurrencyTotals {
    fn add_assign(&mut self, rhs: &CurrencyTotals) {
        for (c, value) in &rhs.values {
            self.values
                .entry(c.clone())
                .and_modify(|v| *v += *value)
                .or_insert(*value);
        }
    }
}

impl core::ops::Add<&CurrencyTotals> for CurrencyTotals {
    type Output = Self;

    fn add(mut self, rhs: &CurrencyTotals) -> Self::Output {
        self += rhs;
        self
    }
}

impl<'a> FromIterator<&'a Expense> for CurrencyTotals {
    fn from_iter<T: IntoIterator<Item = &'a Expense>>(iter: T) -> Self {
        let mut result = CurrencyTotals::default();
        for e in iter {
            result += e;
        }
        result
    }
}

#[cfg(test)]
mod test {
    use crate::categories::Category;
    use crate::expenses::Expense;
    use crate::totals::CurrencyTotals;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_totals() {
        let expenses = [
            Expense::new("Coffee", Category::Personal, dec!(3.50), "GBP"),
            Expense::new("Train", Category::Personal, dec!(1.25), "GBP"),
            Expense::new("Hotel", Category::Business, dec!(120), "EUR"),
        ];
        let totals: CurrencyTotals = expenses.iter().collect();
        assert_eq!(totals.get("GBP"), dec!(4.75));
        assert_eq!(totals.get("EUR"), dec!(120));
        assert_eq!(totals.get("USD"), Decimal::ZERO);
        assert_eq!(totals.display(), "120 EUR + 4.75 GBP");
        assert!(!totals.is_zero());

        let refund = [Expense::new("Refund", Category::Personal, dec!(-4.75), "GBP")];
        let net = CurrencyTotals::default()
            + &expenses.iter().take(2).collect::<CurrencyTotals>()
            + &refund.iter().collect::<CurrencyTotals>();
        assert!(net.is_zero());
        assert_eq!(net.iter().count(), 1);
    }

    #[test]
    fn test_empty() {
        let totals = CurrencyTotals::default();
        assert!(totals.is_zero());
        assert_eq!(totals.display(), "");
    }
}
