use std::fmt;
use std::str::FromStr;

use crate::error::ComputeError;

/// The four ledger tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
    Saving,
    Investment,
}

/// The three goal tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalKind {
    Expense,
    Saving,
    Investment,
}

impl GoalKind {
    /// The transaction kind a goal of this kind is measured against.
    pub fn actual_kind(self) -> TransactionKind {
        match self {
            GoalKind::Expense => TransactionKind::Expense,
            GoalKind::Saving => TransactionKind::Saving,
            GoalKind::Investment => TransactionKind::Investment,
        }
    }
}

impl fmt::Display for GoalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GoalKind::Expense => "expense",
            GoalKind::Saving => "saving",
            GoalKind::Investment => "investment",
        };
        write!(f, "{name}")
    }
}

/// Discriminator accepted by the history and CSV-import endpoints. Parsed
/// once at the boundary; everything past this point dispatches on the enum,
/// never on the raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Transactions(TransactionKind),
    Goals(GoalKind),
}

impl DataType {
    /// Human-readable label used in import summaries.
    pub fn label(self) -> &'static str {
        match self {
            DataType::Transactions(TransactionKind::Income) => "Income",
            DataType::Transactions(TransactionKind::Expense) => "Expenses",
            DataType::Transactions(TransactionKind::Saving) => "Savings",
            DataType::Transactions(TransactionKind::Investment) => "Investments",
            DataType::Goals(GoalKind::Expense) => "Expense goals",
            DataType::Goals(GoalKind::Saving) => "Saving goals",
            DataType::Goals(GoalKind::Investment) => "Investment goals",
        }
    }
}

impl FromStr for DataType {
    type Err = ComputeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(DataType::Transactions(TransactionKind::Income)),
            "expenses" => Ok(DataType::Transactions(TransactionKind::Expense)),
            "savings" => Ok(DataType::Transactions(TransactionKind::Saving)),
            "investments" => Ok(DataType::Transactions(TransactionKind::Investment)),
            "expense_goals" => Ok(DataType::Goals(GoalKind::Expense)),
            "saving_goals" => Ok(DataType::Goals(GoalKind::Saving)),
            "investment_goals" => Ok(DataType::Goals(GoalKind::Investment)),
            other => Err(ComputeError::Validation(format!(
                "Invalid data type: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_data_type() {
        assert_eq!(
            "income".parse::<DataType>().unwrap(),
            DataType::Transactions(TransactionKind::Income)
        );
        assert_eq!(
            "expenses".parse::<DataType>().unwrap(),
            DataType::Transactions(TransactionKind::Expense)
        );
        assert_eq!(
            "saving_goals".parse::<DataType>().unwrap(),
            DataType::Goals(GoalKind::Saving)
        );
    }

    #[test]
    fn rejects_unknown_data_type() {
        let err = "debts".parse::<DataType>().unwrap_err();
        assert!(matches!(err, ComputeError::Validation(_)));
    }

    #[test]
    fn goal_kinds_map_to_their_ledger_kind() {
        assert_eq!(GoalKind::Expense.actual_kind(), TransactionKind::Expense);
        assert_eq!(GoalKind::Saving.actual_kind(), TransactionKind::Saving);
        assert_eq!(
            GoalKind::Investment.actual_kind(),
            TransactionKind::Investment
        );
    }
}
