//! Cycle-detection context.
//!
//! A [`ResolutionChain`] holds the references whose formulas are being
//! evaluated right now, outermost first. It is owned by the caller of a
//! top-level evaluation and lent by `&mut` to each nested evaluation, so it
//! always mirrors the open stack of reference resolutions.

use gridcalc_core::FormulaError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionChain {
    open: Vec<String>,
}

impl ResolutionChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// A chain starting at the cell whose formula is being evaluated, so a
    /// formula referencing its own cell is caught on first resolution.
    pub fn seeded(origin: Option<&str>) -> Self {
        let mut chain = Self::new();
        if let Some(origin) = origin.filter(|o| !o.is_empty()) {
            chain.open.push(origin.to_string());
        }
        chain
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.open.iter().any(|r| r == reference)
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn references(&self) -> &[String] {
        &self.open
    }

    /// Fails with `Cyclic` if `reference` is already open.
    pub fn check(&self, reference: &str, position: usize) -> Result<(), FormulaError> {
        if !self.contains(reference) {
            return Ok(());
        }
        let mut chain = self.open.clone();
        chain.push(reference.to_string());
        log::debug!("cycle detected: {}", chain.join(" → "));
        Err(FormulaError::Cyclic { chain, position })
    }

    /// Open `reference`. Must be paired with [`ResolutionChain::leave`].
    pub fn enter(&mut self, reference: &str, position: usize) -> Result<(), FormulaError> {
        self.check(reference, position)?;
        self.open.push(reference.to_string());
        Ok(())
    }

    /// Close the most recently entered reference.
    pub fn leave(&mut self, reference: &str) {
        debug_assert_eq!(self.open.last().map(String::as_str), Some(reference));
        if self.open.last().map(String::as_str) == Some(reference) {
            self.open.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_with_origin() {
        let chain = ResolutionChain::seeded(Some("A1"));
        assert_eq!(chain.references(), ["A1".to_string()]);
        assert!(ResolutionChain::seeded(None).is_empty());
        assert!(ResolutionChain::seeded(Some("")).is_empty());
    }

    #[test]
    fn enter_and_leave_track_open_stack() {
        let mut chain = ResolutionChain::new();
        chain.enter("A1", 0).unwrap();
        chain.enter("B1", 0).unwrap();
        assert_eq!(chain.len(), 2);
        chain.leave("B1");
        assert!(!chain.contains("B1"));
        // B1 is closed, so it may be opened again on another branch.
        chain.enter("B1", 0).unwrap();
        chain.leave("B1");
        chain.leave("A1");
        assert!(chain.is_empty());
    }

    #[test]
    fn repeat_is_cyclic_with_full_chain() {
        let mut chain = ResolutionChain::seeded(Some("A1"));
        chain.enter("B1", 0).unwrap();
        let err = chain.enter("A1", 5).unwrap_err();
        assert_eq!(
            err,
            FormulaError::Cyclic {
                chain: vec!["A1".into(), "B1".into(), "A1".into()],
                position: 5
            }
        );
        assert_eq!(chain.len(), 2);
    }
}
