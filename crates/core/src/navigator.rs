use thiserror::Error;
use uclad_search::SearchMatch;

/// Errors raised by [`ResultNavigator::select`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigatorError {
    #[error("result index {index} is out of range for {len} results")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Ordered results of the last workspace search plus the focused entry.
///
/// Navigation always wraps around; an unset cursor (`None`) means nothing has been
/// focused since the results were replaced.
#[derive(Debug, Clone, Default)]
pub struct ResultNavigator {
    results: Vec<SearchMatch>,
    current: Option<usize>,
}

impl ResultNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the result set and clears the focus.
    pub fn set_results(&mut self, results: Vec<SearchMatch>) {
        self.results = results;
        self.current = None;
    }

    pub fn results(&self) -> &[SearchMatch] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<&SearchMatch> {
        self.current.and_then(|idx| self.results.get(idx))
    }

    /// Focuses the following result, wrapping to the first after the last.
    pub fn next(&mut self) -> Option<&SearchMatch> {
        self.advance(Direction::Forward)
    }

    /// Focuses the preceding result, wrapping to the last from the first or from unset.
    pub fn previous(&mut self) -> Option<&SearchMatch> {
        self.advance(Direction::Backward)
    }

    /// Focuses the result at `index`.
    pub fn select(&mut self, index: usize) -> Result<&SearchMatch, NavigatorError> {
        self.result(index)?;
        self.current = Some(index);
        Ok(&self.results[index])
    }

    /// Looks up the result at `index` without focusing it.
    pub fn result(&self, index: usize) -> Result<&SearchMatch, NavigatorError> {
        let len = self.results.len();
        self.results
            .get(index)
            .ok_or(NavigatorError::IndexOutOfRange { index, len })
    }

    /// Index [`ResultNavigator::next`] would focus, leaving the focus unchanged.
    pub fn peek_next(&self) -> Option<usize> {
        self.step(Direction::Forward)
    }

    /// Index [`ResultNavigator::previous`] would focus, leaving the focus unchanged.
    pub fn peek_previous(&self) -> Option<usize> {
        self.step(Direction::Backward)
    }

    fn advance(&mut self, direction: Direction) -> Option<&SearchMatch> {
        let next = self.step(direction)?;
        self.current = Some(next);
        Some(&self.results[next])
    }

    fn step(&self, direction: Direction) -> Option<usize> {
        let len = self.results.len();
        if len == 0 {
            return None;
        }
        Some(match (self.current, direction) {
            (None, Direction::Forward) => 0,
            (None, Direction::Backward) => len - 1,
            (Some(i), Direction::Forward) => (i + 1) % len,
            (Some(0), Direction::Backward) => len - 1,
            (Some(i), Direction::Backward) => i - 1,
        })
    }
}
