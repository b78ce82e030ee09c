//! Strategy registry
//!
//! Maps symbolic names (and the numbered interactive menu) onto packing
//! strategies, and dispatches a run by name.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use super::{
    BestFit, FirstFitDecreasing, PackError, PackingStrategy, SubsetSum, WorstFitHeap,
    WorstFitLinear,
};
use crate::core::{AudioItem, Partition};

/// The fixed set of selectable strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    OptimizedFirstFit,
    WorstFitHeap,
    DynamicProgramming,
    WorstFitDecreasingLinear,
    WorstFitLinearSearch,
    BestFit,
}

impl StrategyKind {
    /// All strategies, in menu order
    pub const ALL: [StrategyKind; 6] = [
        StrategyKind::OptimizedFirstFit,
        StrategyKind::WorstFitHeap,
        StrategyKind::DynamicProgramming,
        StrategyKind::WorstFitDecreasingLinear,
        StrategyKind::WorstFitLinearSearch,
        StrategyKind::BestFit,
    ];

    /// Symbolic name used on the command line and in settings
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::OptimizedFirstFit => "optimized_first_fit",
            StrategyKind::WorstFitHeap => "worst_fit_heap",
            StrategyKind::DynamicProgramming => "dynamic_programming",
            StrategyKind::WorstFitDecreasingLinear => "worst_fit_decreasing_linear",
            StrategyKind::WorstFitLinearSearch => "worst_fit_linear_search",
            StrategyKind::BestFit => "best_fit",
        }
    }

    /// Label shown in the interactive menu
    pub fn label(&self) -> &'static str {
        match self {
            StrategyKind::OptimizedFirstFit => "Optimized First Fit Decreasing",
            StrategyKind::WorstFitHeap => "Worst Fit Heap",
            StrategyKind::DynamicProgramming => "Dynamic Programming Folder Filling",
            StrategyKind::WorstFitDecreasingLinear => "Worst Fit Decreasing Linear",
            StrategyKind::WorstFitLinearSearch => "Worst Fit Linear Search",
            StrategyKind::BestFit => "Best Fit",
        }
    }

    /// Map a menu entry ("1" through "6") to a strategy
    pub fn from_menu_choice(choice: &str) -> Option<Self> {
        let n: usize = choice.trim().parse().ok()?;
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// Comma-separated list of valid names, for error messages
    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|k| k.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The strategy implementation behind this name
    pub fn strategy(&self) -> Box<dyn PackingStrategy> {
        match self {
            StrategyKind::OptimizedFirstFit => Box::new(FirstFitDecreasing),
            StrategyKind::WorstFitHeap => Box::new(WorstFitHeap),
            StrategyKind::DynamicProgramming => Box::new(SubsetSum),
            StrategyKind::WorstFitDecreasingLinear => Box::new(WorstFitLinear::decreasing()),
            StrategyKind::WorstFitLinearSearch => Box::new(WorstFitLinear::input_order()),
            StrategyKind::BestFit => Box::new(BestFit),
        }
    }

    pub fn pack(&self, items: &[AudioItem], capacity: u64) -> Result<Partition, PackError> {
        self.strategy().pack(items, capacity)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = PackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name() == s)
            .ok_or_else(|| PackError::UnknownStrategy {
                name: s.to_string(),
                valid: Self::valid_names(),
            })
    }
}

/// Look up a strategy by name and run it
///
/// Unknown names fail before any packing work is done.
pub fn dispatch(name: &str, items: &[AudioItem], capacity: u64) -> Result<Partition, PackError> {
    let kind: StrategyKind = name.parse()?;
    log::debug!(
        "dispatching {} items to {} (capacity {})",
        items.len(),
        kind,
        capacity
    );
    kind.pack(items, capacity)
}

/// Result of running one strategy during a comparison
#[derive(Debug, Clone)]
pub struct StrategyOutcome {
    pub kind: StrategyKind,
    pub result: Result<Partition, PackError>,
    pub elapsed: Duration,
}

impl StrategyOutcome {
    /// Folder count, if the run succeeded
    pub fn folder_count(&self) -> Option<usize> {
        self.result.as_ref().ok().map(Partition::len)
    }
}

/// Run every strategy on the same input
pub fn compare(items: &[AudioItem], capacity: u64) -> Vec<StrategyOutcome> {
    StrategyKind::ALL
        .iter()
        .map(|&kind| {
            let start = Instant::now();
            let result = kind.pack(items, capacity);
            StrategyOutcome {
                kind,
                result,
                elapsed: start.elapsed(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.name().parse::<StrategyKind>().unwrap(), kind);
            assert_eq!(kind.strategy().name(), kind.name());
            assert_eq!(kind.to_string(), kind.name());
        }
    }

    #[test]
    fn test_unknown_strategy_lists_valid_names() {
        let items = vec![AudioItem::new("a", 10)];
        let err = dispatch("no_such_strategy", &items, 100).unwrap_err();

        match err {
            PackError::UnknownStrategy { name, valid } => {
                assert_eq!(name, "no_such_strategy");
                for kind in StrategyKind::ALL {
                    assert!(valid.contains(kind.name()));
                }
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_strategy_wins_over_bad_input() {
        // The name is checked before items or capacity are looked at
        let items = vec![AudioItem::new("huge", 1000)];
        let err = dispatch("nope", &items, 0).unwrap_err();
        assert!(matches!(err, PackError::UnknownStrategy { .. }));
    }

    #[test]
    fn test_dispatch_propagates_strategy_errors() {
        let items = vec![AudioItem::new("huge", 101)];
        let err = dispatch("best_fit", &items, 100).unwrap_err();
        assert!(matches!(err, PackError::ItemTooLarge { .. }));
    }

    #[test]
    fn test_menu_choices() {
        assert_eq!(
            StrategyKind::from_menu_choice("1"),
            Some(StrategyKind::OptimizedFirstFit)
        );
        assert_eq!(
            StrategyKind::from_menu_choice("3"),
            Some(StrategyKind::DynamicProgramming)
        );
        assert_eq!(
            StrategyKind::from_menu_choice(" 6\n"),
            Some(StrategyKind::BestFit)
        );
        assert_eq!(StrategyKind::from_menu_choice("0"), None);
        assert_eq!(StrategyKind::from_menu_choice("7"), None);
        assert_eq!(StrategyKind::from_menu_choice("best_fit"), None);
    }

    #[test]
    fn test_compare_runs_every_strategy() {
        let items = vec![
            AudioItem::new("a", 60),
            AudioItem::new("b", 50),
            AudioItem::new("c", 40),
            AudioItem::new("d", 10),
        ];
        let outcomes = compare(&items, 100);

        assert_eq!(outcomes.len(), StrategyKind::ALL.len());
        for outcome in &outcomes {
            assert_eq!(outcome.folder_count(), Some(2), "{}", outcome.kind);
        }
    }

    #[test]
    fn test_compare_keeps_failures() {
        let items = vec![AudioItem::new("a", 500)];
        let outcomes = compare(&items, 100);
        assert!(outcomes.iter().all(|o| o.folder_count().is_none()));
    }
}
