use crate::categories::Category;
use crate::errors::Error;
use crate::expenses::{Expense, ExpenseId};
use crate::totals::CurrencyTotals;
use std::collections::{BTreeSet, HashSet};

/// What changed in the store, as reported to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Added(ExpenseId),

    // In the order the expenses were stored
    Removed(Vec<ExpenseId>),
}

#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
pub struct SubscriptionId(u32);

type Observer = Box<dyn FnMut(&Change)>;

/// The list of expenses for one session.
///
/// Expenses are kept in the order they were added, which is also the order
/// used for positions in `remove_at`.  Nothing is saved to disk: the
/// expenses are lost when the store is dropped.
///
/// Observers registered with `subscribe` are called synchronously, in the
/// order they were registered, once after each successful mutation.  They
/// do not get access to the store, so they cannot modify it while it is
/// being modified.  If the store is shared via `Rc<RefCell<_>>`, an observer
/// that tries to borrow it will panic.
///
/// Ids are never reused within a store: an expense whose id was already
/// seen (for instance one that was removed and is added back) is given a
/// fresh id by `add`.
///
/// The store is meant to be used from a single thread.  Callers that share
/// it across threads must serialize calls to `add` and `remove_at`
/// themselves.

#[derive(Default)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    observers: Vec<(SubscriptionId, Observer)>,
    last_subscription: u32,

    // Every id ever added, including removed expenses
    used_ids: HashSet<ExpenseId>,
}

impl ExpenseStore {
    /// Returns the id of the expense as stored, which differs from
    /// `expense.id()` when that id was already used in this store.
    pub fn add(&mut self, mut expense: Expense) -> ExpenseId {
        while !self.used_ids.insert(expense.id()) {
            log::debug!("id {} already used, renewing", expense.id());
            expense = expense.with_new_id();
        }
        let id = expense.id();
        log::debug!(
            "adding expense {} ({}, {})",
            id,
            expense.name(),
            expense.category()
        );
        self.expenses.push(expense);
        self.notify(&Change::Added(id));
        id
    }

    /// Remove the expenses at the given positions in the full list (not in
    /// a list filtered by category, see `remove_in_category`).
    /// If any of the positions is out of range, nothing is removed.
    pub fn remove_at(
        &mut self,
        positions: &BTreeSet<usize>,
    ) -> Result<Vec<Expense>, Error> {
        if let Some(&index) = positions.last() {
            if index >= self.expenses.len() {
                return Err(Error::InvalidIndex {
                    index,
                    len: self.expenses.len(),
                });
            }
        }

        // Remove from the end, so that the remaining positions stay valid
        let mut removed: Vec<Expense> = positions
            .iter()
            .rev()
            .map(|&idx| self.expenses.remove(idx))
            .collect();
        removed.reverse();

        log::debug!("removed {} expenses", removed.len());
        self.notify(&Change::Removed(
            removed.iter().map(Expense::id).collect(),
        ));
        Ok(removed)
    }

    /// Remove expenses given their position in the list filtered by
    /// `category`, as it is displayed to the user.  Positions are first
    /// converted to expense ids, so that the right expenses are removed even
    /// when other categories are interleaved in the full list.
    pub fn remove_in_category(
        &mut self,
        category: &Category,
        view_positions: &BTreeSet<usize>,
    ) -> Result<Vec<Expense>, Error> {
        let in_view: Vec<usize> = self
            .expenses
            .iter()
            .enumerate()
            .filter(|(_, e)| e.category() == category)
            .map(|(idx, _)| idx)
            .collect();
        let positions = view_positions
            .iter()
            .map(|&index| {
                in_view.get(index).copied().ok_or(Error::InvalidIndex {
                    index,
                    len: in_view.len(),
                })
            })
            .collect::<Result<BTreeSet<usize>, Error>>()?;
        self.remove_at(&positions)
    }

    /// Remove the given expenses.  If any of them is not in the store,
    /// nothing is removed.
    pub fn remove_ids(
        &mut self,
        ids: &[ExpenseId],
    ) -> Result<Vec<Expense>, Error> {
        let positions = ids
            .iter()
            .map(|id| self.position(*id).ok_or(Error::UnknownExpense(*id)))
            .collect::<Result<BTreeSet<usize>, Error>>()?;
        self.remove_at(&positions)
    }

    pub fn all(&self) -> &[Expense] {
        &self.expenses
    }

    /// The expenses in one category, in the order they were added.
    pub fn filtered_by(&self, category: &Category) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|e| e.category() == category)
            .collect()
    }

    /// The categories used in the store: the standard ones always come
    /// first, then other labels in order of first use.
    pub fn categories(&self) -> Vec<Category> {
        let mut result = Category::STANDARD.to_vec();
        for e in &self.expenses {
            if !result.contains(e.category()) {
                result.push(e.category().clone());
            }
        }
        result
    }

    pub fn get(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id() == id)
    }

    pub fn position(&self, id: ExpenseId) -> Option<usize> {
        self.expenses.iter().position(|e| e.id() == id)
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Total spent in one category, per currency
    pub fn totals(&self, category: &Category) -> CurrencyTotals {
        self.expenses
            .iter()
            .filter(|e| e.category() == category)
            .collect()
    }

    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&Change) + 'static,
    ) -> SubscriptionId {
        self.last_subscription += 1;
        let id = SubscriptionId(self.last_subscription);
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if the subscription was already cancelled.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let count = self.observers.len();
        self.observers.retain(|(s, _)| *s != id);
        self.observers.len() != count
    }

    fn notify(&mut self, change: &Change) {
        for (_, observer) in self.observers.iter_mut() {
            observer(change);
        }
    }
}

impl std::fmt::Debug for ExpenseStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpenseStore")
            .field("expenses", &self.expenses)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use crate::categories::Category;
    use crate::errors::Error;
    use crate::expenses::{Expense, ExpenseId};
    use crate::store::{Change, ExpenseStore};
    use rust_decimal_macros::dec;
    use std::cell::RefCell;
    use std::collections::BTreeSet;
    use std::rc::Rc;

    fn names(expenses: &[&Expense]) -> Vec<String> {
        expenses.iter().map(|e| e.name().to_string()).collect()
    }

    fn all_names(store: &ExpenseStore) -> Vec<String> {
        store.all().iter().map(|e| e.name().to_string()).collect()
    }

    fn add(store: &mut ExpenseStore, name: &str, category: Category) -> ExpenseId {
        store.add(Expense::new(name, category, dec!(1), "GBP"))
    }

    fn set(positions: &[usize]) -> BTreeSet<usize> {
        positions.iter().copied().collect()
    }

    fn record_changes(store: &mut ExpenseStore) -> Rc<RefCell<Vec<Change>>> {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let c = changes.clone();
        store.subscribe(move |change| c.borrow_mut().push(change.clone()));
        changes
    }

    #[test]
    fn test_scenario() {
        let mut store = ExpenseStore::default();
        assert!(store.is_empty());

        store.add(Expense::new(
            "Coffee",
            Category::from("Personal"),
            dec!(3.50),
            "GBP",
        ));
        store.add(Expense::new(
            "Laptop",
            Category::from("Business"),
            dec!(999.00),
            "GBP",
        ));
        assert_eq!(store.len(), 2);
        assert_eq!(all_names(&store), ["Coffee", "Laptop"]);
        assert_eq!(names(&store.filtered_by(&Category::Personal)), ["Coffee"]);

        let removed = store.remove_at(&set(&[0])).unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].name(), "Coffee");
        assert_eq!(all_names(&store), ["Laptop"]);
    }

    #[test]
    fn test_insertion_order() {
        let mut store = ExpenseStore::default();
        let names: Vec<String> = (0..20).map(|i| format!("e{}", i)).collect();
        for (i, n) in names.iter().enumerate() {
            let cat = if i % 3 == 0 { Category::Business } else { Category::Personal };
            add(&mut store, n, cat);
        }
        assert_eq!(store.len(), 20);
        assert_eq!(all_names(&store), names);
    }

    #[test]
    fn test_add_then_remove_last() {
        let mut store = ExpenseStore::default();
        add(&mut store, "a", Category::Personal);
        add(&mut store, "b", Category::Business);
        let before: Vec<ExpenseId> = store.all().iter().map(Expense::id).collect();

        let id = add(&mut store, "c", Category::Personal);
        let removed = store.remove_at(&set(&[store.len() - 1])).unwrap();
        assert_eq!(removed[0].id(), id);
        let after: Vec<ExpenseId> = store.all().iter().map(Expense::id).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_filtered_by() {
        let mut store = ExpenseStore::default();
        add(&mut store, "p1", Category::Personal);
        add(&mut store, "b1", Category::Business);
        add(&mut store, "p2", Category::Personal);
        add(&mut store, "t1", Category::from("Travel"));
        add(&mut store, "b2", Category::Business);
        add(&mut store, "b3", Category::Other("Business".into()));

        assert_eq!(names(&store.filtered_by(&Category::Personal)), ["p1", "p2"]);
        assert_eq!(
            names(&store.filtered_by(&Category::Business)),
            ["b1", "b2", "b3"]
        );
        assert_eq!(names(&store.filtered_by(&Category::from("travel"))), [] as [&str; 0]);
        assert_eq!(names(&store.filtered_by(&Category::from("Travel"))), ["t1"]);
        assert_eq!(
            store.categories(),
            vec![
                Category::Personal,
                Category::Business,
                Category::Other("Travel".into())
            ]
        );
    }

    #[test]
    fn test_remove_empty_set() {
        let mut store = ExpenseStore::default();
        add(&mut store, "a", Category::Personal);
        add(&mut store, "b", Category::Business);
        let changes = record_changes(&mut store);

        let removed = store.remove_at(&BTreeSet::new()).unwrap();
        assert!(removed.is_empty());
        assert_eq!(all_names(&store), ["a", "b"]);
        assert_eq!(*changes.borrow(), vec![Change::Removed(vec![])]);
    }

    #[test]
    fn test_ids_never_reused() {
        let mut store = ExpenseStore::default();
        let a = add(&mut store, "a", Category::Personal);
        add(&mut store, "b", Category::Personal);

        // Adding back a removed expense gives it a new id
        let mut removed = store.remove_ids(&[a]).unwrap();
        let back = store.add(removed.remove(0));
        assert_ne!(back, a);
        assert_eq!(store.get(a), None);
        assert_eq!(store.get(back).map(Expense::name), Some("a"));

        // Two copies of the same serialized expense get distinct ids
        let json = serde_json::to_string(store.get(back).unwrap()).unwrap();
        let first = store.add(serde_json::from_str(&json).unwrap());
        let second = store.add(serde_json::from_str(&json).unwrap());
        assert_ne!(first, back);
        assert_ne!(first, second);
        assert_eq!(store.len(), 4);

        store.remove_ids(&[first]).unwrap();
        assert_eq!(store.get(first), None);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_remove_several() {
        let mut store = ExpenseStore::default();
        for n in ["a", "b", "c", "d", "e"] {
            add(&mut store, n, Category::Personal);
        }
        let removed = store.remove_at(&set(&[3, 0, 1])).unwrap();
        assert_eq!(
            removed.iter().map(Expense::name).collect::<Vec<_>>(),
            ["a", "b", "d"]
        );
        assert_eq!(all_names(&store), ["c", "e"]);
    }

    #[test]
    fn test_invalid_index() {
        let mut store = ExpenseStore::default();
        add(&mut store, "a", Category::Personal);
        add(&mut store, "b", Category::Business);
        let changes = record_changes(&mut store);

        let err = store.remove_at(&set(&[0, 2])).unwrap_err();
        assert!(matches!(err, Error::InvalidIndex { index: 2, len: 2 }));
        assert_eq!(all_names(&store), ["a", "b"]);
        assert!(changes.borrow().is_empty());

        let mut empty = ExpenseStore::default();
        assert!(matches!(
            empty.remove_at(&set(&[0])),
            Err(Error::InvalidIndex { index: 0, len: 0 })
        ));
    }

    #[test]
    fn test_notifications() {
        let mut store = ExpenseStore::default();
        let changes = record_changes(&mut store);

        let a = add(&mut store, "a", Category::Personal);
        let b = add(&mut store, "b", Category::Personal);
        let c = add(&mut store, "c", Category::Business);
        assert_eq!(changes.borrow().len(), 3);

        store.remove_at(&set(&[0, 2])).unwrap();
        assert!(store.remove_at(&set(&[5])).is_err());
        assert_eq!(
            *changes.borrow(),
            vec![
                Change::Added(a),
                Change::Added(b),
                Change::Added(c),
                Change::Removed(vec![a, c]),
            ]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = ExpenseStore::default();
        let count = Rc::new(RefCell::new(0));
        let c1 = count.clone();
        let first = store.subscribe(move |_| *c1.borrow_mut() += 1);
        let c2 = count.clone();
        store.subscribe(move |_| *c2.borrow_mut() += 10);

        add(&mut store, "a", Category::Personal);
        assert_eq!(*count.borrow(), 11);

        assert!(store.unsubscribe(first));
        assert!(!store.unsubscribe(first));
        add(&mut store, "b", Category::Personal);
        assert_eq!(*count.borrow(), 21);
    }

    #[test]
    fn test_remove_in_category() {
        let mut store = ExpenseStore::default();
        add(&mut store, "coffee", Category::Personal);
        add(&mut store, "laptop", Category::Business);
        add(&mut store, "lunch", Category::Personal);
        add(&mut store, "phone", Category::Business);
        let changes = record_changes(&mut store);

        // First row of the business list is the laptop, not the coffee
        let removed = store
            .remove_in_category(&Category::Business, &set(&[0]))
            .unwrap();
        assert_eq!(removed[0].name(), "laptop");
        assert_eq!(all_names(&store), ["coffee", "lunch", "phone"]);

        let err = store
            .remove_in_category(&Category::Business, &set(&[1]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidIndex { index: 1, len: 1 }));
        assert_eq!(store.len(), 3);
        assert_eq!(changes.borrow().len(), 1);
    }

    #[test]
    fn test_remove_ids() {
        let mut store = ExpenseStore::default();
        let a = add(&mut store, "a", Category::Personal);
        let b = add(&mut store, "b", Category::Personal);
        assert_eq!(store.position(b), Some(1));
        assert_eq!(store.get(a).map(Expense::name), Some("a"));

        store.remove_ids(&[a]).unwrap();
        assert_eq!(store.get(a), None);
        assert_eq!(store.position(b), Some(0));

        let err = store.remove_ids(&[b, a]).unwrap_err();
        assert!(matches!(err, Error::UnknownExpense(id) if id == a));
        assert_eq!(all_names(&store), ["b"]);
    }

    #[test]
    fn test_totals() {
        let mut store = ExpenseStore::default();
        store.add(Expense::new("Coffee", Category::Personal, dec!(3.50), "GBP"));
        store.add(Expense::new("Taxi", Category::Business, dec!(20), "EUR"));
        store.add(Expense::new("Cake", Category::Personal, dec!(2.25), "GBP"));
        assert_eq!(store.totals(&Category::Personal).display(), "5.75 GBP");
        assert_eq!(store.totals(&Category::Business).display(), "20 EUR");
        assert!(store.totals(&Category::from("Travel")).is_zero());
    }
}
