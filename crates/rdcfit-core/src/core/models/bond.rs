/// One covalent bond whose orientation carries dipolar-coupling information.
///
/// Created by parsing one matched line of the experimental RDC table and
/// discarded once it has been resolved to trajectory atom indices. Residue
/// ids are 1-based, as in the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BondRecord {
    pub residue_id_i: i32,
    pub residue_name_i: String,
    pub atom_name_i: String,
    pub residue_id_j: i32,
    pub residue_name_j: String,
    pub atom_name_j: String,
}

impl BondRecord {
    pub fn new(
        residue_id_i: i32,
        residue_name_i: &str,
        atom_name_i: &str,
        residue_id_j: i32,
        residue_name_j: &str,
        atom_name_j: &str,
    ) -> Self {
        Self {
            residue_id_i,
            residue_name_i: residue_name_i.to_string(),
            atom_name_i: atom_name_i.to_string(),
            residue_id_j,
            residue_name_j: residue_name_j.to_string(),
            atom_name_j: atom_name_j.to_string(),
        }
    }
}
