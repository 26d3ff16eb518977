use super::config::BondMode;
use super::error::EngineError;
use crate::core::models::bond::BondRecord;
use crate::core::models::dataset::ExperimentalDataset;
use crate::core::models::selection::BondSelection;
use crate::core::models::topology::Topology;

/// Resolves every bond record of the dataset to trajectory atom indices.
///
/// Atom names in the RDC table must follow the same convention as the
/// topology's atom table. Residue ids in the table are 1-based; the topology
/// query is 0-based. Any resolution failure aborts the whole run: a missing
/// bond row would break the positional correspondence between the
/// experimental and predicted coupling arrays.
pub fn resolve_selections(
    dataset: &ExperimentalDataset,
    topology: &Topology,
    mode: BondMode,
) -> Result<Vec<BondSelection>, EngineError> {
    dataset
        .bonds()
        .map(|bond| match mode {
            BondMode::Direct => resolve_direct(bond, topology),
            BondMode::AmideReconstructed => resolve_amide(bond, topology),
        })
        .collect()
}

fn select_single(
    topology: &Topology,
    residue_index: usize,
    atom_name: &str,
) -> Result<usize, EngineError> {
    let matches = topology.select(residue_index, atom_name);
    match matches.len() {
        0 => Err(EngineError::AtomNotFound {
            residue: residue_index,
            atom: atom_name.to_string(),
        }),
        1 => Ok(matches[0]),
        count => Err(EngineError::AmbiguousAtom {
            residue: residue_index,
            atom: atom_name.to_string(),
            count,
        }),
    }
}

fn one_based_to_index(bond: &BondRecord, resid: i32) -> Result<usize, EngineError> {
    if resid < 1 {
        return Err(EngineError::MalformedBond {
            resid_i: bond.residue_id_i,
            resid_j: bond.residue_id_j,
            reason: "residue ids are 1-based",
        });
    }
    Ok((resid - 1) as usize)
}

fn resolve_direct(bond: &BondRecord, topology: &Topology) -> Result<BondSelection, EngineError> {
    let i = select_single(
        topology,
        one_based_to_index(bond, bond.residue_id_i)?,
        &bond.atom_name_i,
    )?;
    let j = select_single(
        topology,
        one_based_to_index(bond, bond.residue_id_j)?,
        &bond.atom_name_j,
    )?;
    Ok(BondSelection::Direct { i, j })
}

fn resolve_amide(bond: &BondRecord, topology: &Topology) -> Result<BondSelection, EngineError> {
    let malformed = |reason: &'static str| EngineError::MalformedBond {
        resid_i: bond.residue_id_i,
        resid_j: bond.residue_id_j,
        reason,
    };

    let names = (bond.atom_name_i.as_str(), bond.atom_name_j.as_str());
    if names.0 != "N" && names.1 != "N" {
        return Err(malformed("amide bond must name atom N"));
    }
    if names.0 != "H" && names.1 != "H" {
        return Err(malformed("amide bond must name atom H"));
    }
    if bond.residue_id_i != bond.residue_id_j {
        return Err(malformed("both bond atoms must belong to the same residue"));
    }
    if bond.residue_name_i != bond.residue_name_j {
        return Err(malformed(
            "both bond atoms must carry the same residue name",
        ));
    }
    if bond.residue_id_i == 1 {
        return Err(EngineError::UnsupportedResidue {
            resid: bond.residue_id_i,
        });
    }

    let current = one_based_to_index(bond, bond.residue_id_i)?;
    // The carbonyl carbon comes from the preceding residue.
    let c = select_single(topology, current - 1, "C")?;
    let n = select_single(topology, current, "N")?;
    let ca = select_single(topology, current, "CA")?;
    Ok(BondSelection::AmideReconstructed { c, n, ca })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::topology::TopologyAtom;

    fn dataset_of(bonds: Vec<(BondRecord, f64)>) -> ExperimentalDataset {
        let mut dataset = ExperimentalDataset::new();
        for (bond, rdc) in bonds {
            dataset.push(bond, rdc);
        }
        dataset
    }

    fn nh_bond(resid: i32) -> BondRecord {
        BondRecord::new(resid, "ALA", "N", resid, "ALA", "H")
    }

    fn backbone_with_hydrogens() -> Topology {
        let mut atoms = Vec::new();
        for residue in 0..3 {
            atoms.push(TopologyAtom::new("N", residue, "ALA"));
            atoms.push(TopologyAtom::new("H", residue, "ALA"));
            atoms.push(TopologyAtom::new("CA", residue, "ALA"));
            atoms.push(TopologyAtom::new("C", residue, "ALA"));
        }
        Topology::new(atoms)
    }

    #[test]
    fn direct_mode_resolves_both_atoms() {
        let topology = backbone_with_hydrogens();
        let dataset = dataset_of(vec![(nh_bond(2), 1.0), (nh_bond(3), -2.0)]);
        let selections =
            resolve_selections(&dataset, &topology, BondMode::Direct).unwrap();
        assert_eq!(
            selections,
            vec![
                BondSelection::Direct { i: 4, j: 5 },
                BondSelection::Direct { i: 8, j: 9 },
            ]
        );
    }

    #[test]
    fn direct_mode_fails_on_missing_atom() {
        let topology = backbone_with_hydrogens();
        let dataset = dataset_of(vec![(
            BondRecord::new(2, "ALA", "N", 2, "ALA", "HX"),
            1.0,
        )]);
        let error = resolve_selections(&dataset, &topology, BondMode::Direct).unwrap_err();
        match error {
            EngineError::AtomNotFound { residue, atom } => {
                assert_eq!(residue, 1);
                assert_eq!(atom, "HX");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn direct_mode_fails_on_ambiguous_atom() {
        let mut atoms = backbone_with_hydrogens().atoms().to_vec();
        atoms.push(TopologyAtom::new("H", 1, "ALA"));
        let topology = Topology::new(atoms);
        let dataset = dataset_of(vec![(nh_bond(2), 1.0)]);
        let error = resolve_selections(&dataset, &topology, BondMode::Direct).unwrap_err();
        assert!(matches!(
            error,
            EngineError::AmbiguousAtom { count: 2, .. }
        ));
    }

    #[test]
    fn direct_mode_rejects_zero_residue_id() {
        let topology = backbone_with_hydrogens();
        let dataset = dataset_of(vec![(
            BondRecord::new(0, "ALA", "N", 0, "ALA", "H"),
            1.0,
        )]);
        let error = resolve_selections(&dataset, &topology, BondMode::Direct).unwrap_err();
        assert!(matches!(error, EngineError::MalformedBond { .. }));
    }

    #[test]
    fn amide_mode_resolves_backbone_triple() {
        let topology = backbone_with_hydrogens();
        let dataset = dataset_of(vec![(nh_bond(2), 1.0)]);
        let selections =
            resolve_selections(&dataset, &topology, BondMode::AmideReconstructed).unwrap();
        // C of residue 0, N and CA of residue 1.
        assert_eq!(
            selections,
            vec![BondSelection::AmideReconstructed { c: 3, n: 4, ca: 6 }]
        );
    }

    #[test]
    fn amide_mode_rejects_non_nh_bond() {
        let topology = backbone_with_hydrogens();
        let dataset = dataset_of(vec![(
            BondRecord::new(2, "ALA", "CA", 2, "ALA", "HA"),
            1.0,
        )]);
        let error =
            resolve_selections(&dataset, &topology, BondMode::AmideReconstructed).unwrap_err();
        assert!(matches!(error, EngineError::MalformedBond { .. }));
    }

    #[test]
    fn amide_mode_rejects_cross_residue_bond() {
        let topology = backbone_with_hydrogens();
        let dataset = dataset_of(vec![(
            BondRecord::new(2, "ALA", "N", 3, "ALA", "H"),
            1.0,
        )]);
        let error =
            resolve_selections(&dataset, &topology, BondMode::AmideReconstructed).unwrap_err();
        assert!(matches!(error, EngineError::MalformedBond { .. }));
    }

    #[test]
    fn amide_mode_rejects_first_residue() {
        let topology = backbone_with_hydrogens();
        let dataset = dataset_of(vec![(nh_bond(1), 1.0)]);
        let error =
            resolve_selections(&dataset, &topology, BondMode::AmideReconstructed).unwrap_err();
        assert!(matches!(
            error,
            EngineError::UnsupportedResidue { resid: 1 }
        ));
    }
}
