use super::bond::BondRecord;
use nalgebra::DVector;

/// An ordered sequence of `(BondRecord, measured coupling)` pairs.
///
/// Order is preserved from the input file and must match the row order of
/// every geometry matrix built later in the pipeline; the experimental and
/// back-calculated coupling arrays are index-aligned through this ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExperimentalDataset {
    entries: Vec<(BondRecord, f64)>,
}

impl ExperimentalDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, bond: BondRecord, coupling: f64) {
        self.entries.push((bond, coupling));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &(BondRecord, f64)> {
        self.entries.iter()
    }

    pub fn bonds(&self) -> impl Iterator<Item = &BondRecord> {
        self.entries.iter().map(|(bond, _)| bond)
    }

    /// Returns the measured couplings in file order.
    pub fn couplings(&self) -> DVector<f64> {
        DVector::from_iterator(self.entries.len(), self.entries.iter().map(|(_, rdc)| *rdc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nh_bond(resid: i32) -> BondRecord {
        BondRecord::new(resid, "ALA", "N", resid, "ALA", "H")
    }

    #[test]
    fn couplings_preserve_insertion_order() {
        let mut dataset = ExperimentalDataset::new();
        dataset.push(nh_bond(2), 10.0);
        dataset.push(nh_bond(3), -5.0);
        dataset.push(nh_bond(4), 2.5);

        let couplings = dataset.couplings();
        assert_eq!(couplings.len(), 3);
        assert_eq!(couplings[0], 10.0);
        assert_eq!(couplings[1], -5.0);
        assert_eq!(couplings[2], 2.5);
    }

    #[test]
    fn empty_dataset_reports_empty() {
        let dataset = ExperimentalDataset::new();
        assert!(dataset.is_empty());
        assert_eq!(dataset.len(), 0);
        assert_eq!(dataset.couplings().len(), 0);
    }
}
