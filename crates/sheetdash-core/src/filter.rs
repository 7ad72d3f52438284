//! Filter reducer
//!
//! Two filter dimensions compose into one view: transaction type and
//! category. At most one of them is active at a time.

use serde::{Deserialize, Serialize};
use sheetdash_parser::TransactionRecord;

/// Transaction type dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => record.is_income(),
            TypeFilter::Expense => record.is_expense(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Income => "income",
            TypeFilter::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            "income" => Ok(TypeFilter::Income),
            "expense" | "expenses" => Ok(TypeFilter::Expense),
            other => Err(format!("Unknown transaction type: {}", other)),
        }
    }
}

impl std::fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Current filter selection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub type_filter: TypeFilter,
    pub category_filter: Option<String>,
}

impl FilterState {
    /// Select a transaction type. Clears any category filter.
    pub fn set_type_filter(&mut self, kind: TypeFilter) {
        self.type_filter = kind;
        self.category_filter = None;
    }

    /// Stat-card click: selecting the active type goes back to `All`
    pub fn toggle_type_filter(&mut self, kind: TypeFilter) {
        if self.type_filter == kind {
            self.set_type_filter(TypeFilter::All);
        } else {
            self.set_type_filter(kind);
        }
    }

    /// Select a category, or deselect it when already active.
    ///
    /// `None` clears the category. The type filter always resets to `All`.
    pub fn set_category_filter(&mut self, name: Option<&str>) {
        self.type_filter = TypeFilter::All;
        self.category_filter = match name.map(str::trim) {
            Some(name) if self.category_filter.as_deref() == Some(name) => None,
            Some(name) if !name.is_empty() => Some(name.to_string()),
            _ => None,
        };
    }

    pub fn clear(&mut self) {
        *self = FilterState::default();
    }

    pub fn is_active(&self) -> bool {
        self.type_filter != TypeFilter::All || self.category_filter.is_some()
    }

    pub fn matches(&self, record: &TransactionRecord) -> bool {
        if !self.type_filter.matches(record) {
            return false;
        }
        match &self.category_filter {
            Some(category) => record.category_name() == Some(category.as_str()),
            None => true,
        }
    }

    /// Phrase for the empty-view message, e.g. `"Food" category`
    pub fn describe(&self) -> String {
        if let Some(category) = &self.category_filter {
            return format!("\"{}\" category", category);
        }
        match self.type_filter {
            TypeFilter::Income => "income".to_string(),
            TypeFilter::Expense => "expense".to_string(),
            TypeFilter::All => String::new(),
        }
    }

    /// Suffix appended to the transactions heading
    pub fn title_suffix(&self) -> Option<String> {
        if let Some(category) = &self.category_filter {
            return Some(category.clone());
        }
        match self.type_filter {
            TypeFilter::Income => Some("Income Only".to_string()),
            TypeFilter::Expense => Some("Expenses Only".to_string()),
            TypeFilter::All => None,
        }
    }
}

/// Records passing `state`, newest first.
///
/// Input is in parse order (oldest first); the result is reversed before
/// filtering.
pub fn visible_records(records: &[TransactionRecord], state: &FilterState) -> Vec<TransactionRecord> {
    records
        .iter()
        .rev()
        .filter(|r| state.matches(r))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, credit: &str, debit: &str, category: &str) -> TransactionRecord {
        TransactionRecord {
            date_time: date.to_string(),
            credit_label: credit.to_string(),
            debit_label: debit.to_string(),
            category: category.to_string(),
            amount: 10.0,
            purpose: String::new(),
        }
    }

    fn sample() -> Vec<TransactionRecord> {
        vec![
            record("1", "", "Card", "Food"),
            record("2", "Salary", "", ""),
            record("3", "", "Cash", "Rent"),
            record("4", "", "Card", " Food "),
            record("5", "Refund", "", "Food"),
        ]
    }

    fn dates(records: &[TransactionRecord]) -> Vec<&str> {
        records.iter().map(|r| r.date_time.as_str()).collect()
    }

    #[test]
    fn test_default_is_unfiltered() {
        let state = FilterState::default();
        assert!(!state.is_active());
        assert_eq!(dates(&visible_records(&sample(), &state)), vec!["5", "4", "3", "2", "1"]);
    }

    #[test]
    fn test_category_twice_clears() {
        let mut state = FilterState::default();
        state.set_category_filter(Some("Food"));
        assert_eq!(state.category_filter.as_deref(), Some("Food"));

        state.set_category_filter(Some("Food"));
        assert_eq!(state.category_filter, None);
        assert_eq!(state.type_filter, TypeFilter::All);
    }

    #[test]
    fn test_category_switches_between_names() {
        let mut state = FilterState::default();
        state.set_category_filter(Some("Food"));
        state.set_category_filter(Some("Rent"));
        assert_eq!(state.category_filter.as_deref(), Some("Rent"));
    }

    #[test]
    fn test_category_none_clears() {
        let mut state = FilterState::default();
        state.set_category_filter(Some("Food"));
        state.set_category_filter(None);
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn test_type_filter_clears_category() {
        let mut state = FilterState::default();
        state.set_category_filter(Some("Food"));
        state.set_type_filter(TypeFilter::Income);

        assert_eq!(state.type_filter, TypeFilter::Income);
        assert_eq!(state.category_filter, None);
    }

    #[test]
    fn test_category_resets_type() {
        let mut state = FilterState::default();
        state.set_type_filter(TypeFilter::Expense);
        state.set_category_filter(Some("Food"));

        assert_eq!(state.type_filter, TypeFilter::All);
        assert_eq!(state.category_filter.as_deref(), Some("Food"));
    }

    #[test]
    fn test_set_type_is_idempotent() {
        let mut state = FilterState::default();
        state.set_type_filter(TypeFilter::Expense);
        let once = state.clone();
        state.set_type_filter(TypeFilter::Expense);
        assert_eq!(state, once);
    }

    #[test]
    fn test_toggle_type_filter() {
        let mut state = FilterState::default();
        state.toggle_type_filter(TypeFilter::Income);
        assert_eq!(state.type_filter, TypeFilter::Income);

        state.toggle_type_filter(TypeFilter::Expense);
        assert_eq!(state.type_filter, TypeFilter::Expense);

        state.toggle_type_filter(TypeFilter::Expense);
        assert_eq!(state.type_filter, TypeFilter::All);
    }

    #[test]
    fn test_expense_filter_excludes_empty_debit() {
        let mut state = FilterState::default();
        state.set_type_filter(TypeFilter::Expense);
        let visible = visible_records(&sample(), &state);

        assert_eq!(dates(&visible), vec!["4", "3", "1"]);
        assert!(visible.iter().all(|r| !r.debit_label.trim().is_empty()));
    }

    #[test]
    fn test_income_filter() {
        let mut state = FilterState::default();
        state.set_type_filter(TypeFilter::Income);
        assert_eq!(dates(&visible_records(&sample(), &state)), vec!["5", "2"]);
    }

    #[test]
    fn test_category_filter_matches_trimmed_name_on_any_side() {
        let mut state = FilterState::default();
        state.set_category_filter(Some("Food"));
        assert_eq!(dates(&visible_records(&sample(), &state)), vec!["5", "4", "1"]);
    }

    #[test]
    fn test_category_filter_is_case_sensitive() {
        let mut state = FilterState::default();
        state.set_category_filter(Some("food"));
        assert!(visible_records(&sample(), &state).is_empty());
    }

    #[test]
    fn test_describe_and_title_suffix() {
        let mut state = FilterState::default();
        assert_eq!(state.describe(), "");
        assert_eq!(state.title_suffix(), None);

        state.set_type_filter(TypeFilter::Income);
        assert_eq!(state.describe(), "income");
        assert_eq!(state.title_suffix().as_deref(), Some("Income Only"));

        state.set_type_filter(TypeFilter::Expense);
        assert_eq!(state.describe(), "expense");
        assert_eq!(state.title_suffix().as_deref(), Some("Expenses Only"));

        state.set_category_filter(Some("Food"));
        assert_eq!(state.describe(), "\"Food\" category");
        assert_eq!(state.title_suffix().as_deref(), Some("Food"));
    }

    #[test]
    fn test_type_filter_from_str() {
        assert_eq!("income".parse::<TypeFilter>(), Ok(TypeFilter::Income));
        assert_eq!("Expense".parse::<TypeFilter>(), Ok(TypeFilter::Expense));
        assert_eq!("all".parse::<TypeFilter>(), Ok(TypeFilter::All));
        assert!("transfers".parse::<TypeFilter>().is_err());
    }
}
