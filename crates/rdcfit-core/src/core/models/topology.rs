const ALPHA_CARBON_ATOM_NAME: &str = "CA";

/// One atom of the trajectory's atom table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyAtom {
    /// Atom name, in the same convention the RDC table uses (e.g. "N", "CA").
    pub name: String,
    /// 0-based residue index.
    pub residue_index: usize,
    /// Three-letter residue code (e.g. "ALA").
    pub residue_name: String,
}

impl TopologyAtom {
    pub fn new(name: &str, residue_index: usize, residue_name: &str) -> Self {
        Self {
            name: name.to_string(),
            residue_index,
            residue_name: residue_name.to_string(),
        }
    }
}

/// The atom table of a trajectory, queried by residue index and atom name.
///
/// This is the narrow interface the pipeline needs from a topology: the atom
/// count, a selection query, and the list of alpha carbons used for
/// reference-frame selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Topology {
    atoms: Vec<TopologyAtom>,
}

impl Topology {
    pub fn new(atoms: Vec<TopologyAtom>) -> Self {
        Self { atoms }
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn atoms(&self) -> &[TopologyAtom] {
        &self.atoms
    }

    /// Returns the indices of all atoms with the given name in the given
    /// 0-based residue, in atom-table order.
    pub fn select(&self, residue_index: usize, atom_name: &str) -> Vec<usize> {
        self.atoms
            .iter()
            .enumerate()
            .filter(|(_, atom)| atom.residue_index == residue_index && atom.name == atom_name)
            .map(|(index, _)| index)
            .collect()
    }

    /// Returns the indices of all alpha-carbon atoms, in atom-table order.
    pub fn alpha_carbons(&self) -> Vec<usize> {
        self.atoms
            .iter()
            .enumerate()
            .filter(|(_, atom)| atom.name == ALPHA_CARBON_ATOM_NAME)
            .map(|(index, _)| index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backbone_topology() -> Topology {
        Topology::new(vec![
            TopologyAtom::new("N", 0, "ALA"),
            TopologyAtom::new("CA", 0, "ALA"),
            TopologyAtom::new("C", 0, "ALA"),
            TopologyAtom::new("N", 1, "GLY"),
            TopologyAtom::new("CA", 1, "GLY"),
            TopologyAtom::new("C", 1, "GLY"),
        ])
    }

    #[test]
    fn select_finds_single_named_atom() {
        let topology = backbone_topology();
        assert_eq!(topology.select(1, "N"), vec![3]);
        assert_eq!(topology.select(0, "C"), vec![2]);
    }

    #[test]
    fn select_returns_empty_for_missing_atom() {
        let topology = backbone_topology();
        assert!(topology.select(0, "H").is_empty());
        assert!(topology.select(5, "N").is_empty());
    }

    #[test]
    fn select_returns_all_duplicate_matches() {
        let mut atoms = backbone_topology().atoms().to_vec();
        atoms.push(TopologyAtom::new("N", 1, "GLY"));
        let topology = Topology::new(atoms);
        assert_eq!(topology.select(1, "N"), vec![3, 6]);
    }

    #[test]
    fn alpha_carbons_lists_ca_atoms_in_order() {
        let topology = backbone_topology();
        assert_eq!(topology.alpha_carbons(), vec![1, 4]);
    }
}
