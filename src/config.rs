use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Knobs for a single search. The default searches until it either finds
/// a solution or proves there is none.
#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    /// Stop after expanding this many states.
    pub max_expanded: Option<u64>,
    /// Stop when the open frontier grows beyond this many nodes.
    pub max_frontier: Option<usize>,
    /// Checked once per iteration, set it from another thread to stop the search.
    pub cancel: Option<Arc<AtomicBool>>,
    pub print_status: bool,
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_expanded(mut self, max: u64) -> Self {
        self.max_expanded = Some(max);
        self
    }

    pub fn max_frontier(mut self, max: usize) -> Self {
        self.max_frontier = Some(max);
        self
    }

    pub fn cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn print_status(mut self, print_status: bool) -> Self {
        self.print_status = print_status;
        self
    }

    pub(crate) fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map_or(false, |flag| flag.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unbounded() {
        let config = SearchConfig::default();
        assert_eq!(config.max_expanded, None);
        assert_eq!(config.max_frontier, None);
        assert!(!config.print_status);
        assert!(!config.cancelled());
    }

    #[test]
    fn cancelling() {
        let flag = Arc::new(AtomicBool::new(false));
        let config = SearchConfig::new()
            .max_expanded(10)
            .max_frontier(20)
            .cancel_flag(flag.clone());
        assert_eq!(config.max_expanded, Some(10));
        assert_eq!(config.max_frontier, Some(20));
        assert!(!config.cancelled());
        flag.store(true, Ordering::Relaxed);
        assert!(config.cancelled());
    }
}
