use crate::categories::Category;
use crate::errors::Error;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(Uuid);

impl ExpenseId {
    fn generate() -> Self {
        ExpenseId(Uuid::new_v4())
    }

    /// A short prefix, enough to tell expenses apart on screen.
    pub fn short(&self) -> String {
        self.0.simple().to_string().chars().take(8).collect()
    }
}

impl std::fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How much an expense weighs, used to highlight rows when listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpendLevel {
    Low,    // below 10
    Medium, // between 10 and 100, inclusive
    High,   // above 100
}

impl SpendLevel {
    pub fn from_amount(amount: Decimal) -> Self {
        if amount < Decimal::TEN {
            SpendLevel::Low
        } else if amount > Decimal::ONE_HUNDRED {
            SpendLevel::High
        } else {
            SpendLevel::Medium
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpendLevel::Low => "low",
            SpendLevel::Medium => "medium",
            SpendLevel::High => "high",
        }
    }
}

/// One logged expenditure.
///
/// Records are never modified once created.  To change an expense, remove
/// it from the store and add a new one.
///
/// Two records are the same expense only if they share the same id, even
/// when name, category, amount and currency are all identical.  The id is
/// generated at creation time.
///
/// Neither the amount nor the currency are validated: negative amounts are
/// kept as is (a refund for instance), and the currency is expected but not
/// required to be a three-letter ISO code.
///
/// Records cannot be cloned.  A record read back from JSON still carries its
/// id, the store renews it when that id is already taken.

#[derive(Debug, Serialize, Deserialize)]
pub struct Expense {
    id: ExpenseId,
    name: String,
    category: Category,
    amount: Decimal,
    currency: String,
}

impl Expense {
    pub fn new(
        name: &str,
        category: Category,
        amount: Decimal,
        currency: &str,
    ) -> Self {
        Expense {
            id: ExpenseId::generate(),
            name: name.into(),
            category,
            amount,
            currency: currency.into(),
        }
    }

    pub fn id(&self) -> ExpenseId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn level(&self) -> SpendLevel {
        SpendLevel::from_amount(self.amount)
    }

    pub fn display_amount(&self) -> String {
        format!("{} {}", self.amount, self.currency)
    }

    /// The same record under a freshly generated id.
    pub(crate) fn with_new_id(mut self) -> Self {
        self.id = ExpenseId::generate();
        self
    }
}

impl PartialEq for Expense {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Expense {}

/// Parse an amount as typed by the user, e.g. "3.50" or "-12".
pub fn parse_amount(text: &str) -> Result<Decimal, Error> {
    Ok(Decimal::from_str(text.trim())?)
}

/// The state of the "new expense" form, before it is saved.
///
/// The currency is not chosen in the form itself: it is the currency
/// currently selected in the settings.

#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    pub name: String,
    pub category: Category,
    pub amount: Decimal,
    pub currency: String,
}

impl ExpenseDraft {
    pub fn new(currency: &str) -> Self {
        ExpenseDraft {
            name: String::new(),
            category: Category::default(),
            amount: Decimal::ZERO,
            currency: currency.into(),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    pub fn into_expense(self) -> Expense {
        Expense {
            id: ExpenseId::generate(),
            name: self.name,
            category: self.category,
            amount: self.amount,
            currency: self.currency,
        }
    }
}
