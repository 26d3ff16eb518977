/// Shape of the predicted-coupling output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// One prediction per bond, from the frame-averaged geometry matrix.
    #[default]
    Average,
    /// One prediction per bond per frame, requiring a second pass over the
    /// trajectory.
    Full,
}

/// How the trajectory is rigidly aligned before geometry extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignmentPolicy {
    /// Superpose every frame onto the frame minimizing the summed
    /// alpha-carbon RMSD to all other frames. Unavailable for streamed
    /// trajectories, where it degrades to an advisory.
    #[default]
    MinimizeRmsd,
    /// Superpose every frame onto frame 0.
    FirstFrame,
    /// Use the frames exactly as provided.
    None,
}

/// How bond records are resolved to trajectory atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BondMode {
    /// Both bond atoms exist in the trajectory.
    #[default]
    Direct,
    /// The trajectory has no hydrogens; the amide N-H direction is
    /// reconstructed from backbone C, N, and CA positions.
    AmideReconstructed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FitConfig {
    pub mode: OutputMode,
    pub alignment: AlignmentPolicy,
    pub bond_mode: BondMode,
}

impl FitConfig {
    pub fn builder() -> FitConfigBuilder {
        FitConfigBuilder::default()
    }
}

/// Builder for [`FitConfig`]; every parameter has a default, so `build`
/// cannot fail.
#[derive(Debug, Default)]
pub struct FitConfigBuilder {
    mode: Option<OutputMode>,
    alignment: Option<AlignmentPolicy>,
    bond_mode: Option<BondMode>,
}

impl FitConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: OutputMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn alignment(mut self, alignment: AlignmentPolicy) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn bond_mode(mut self, bond_mode: BondMode) -> Self {
        self.bond_mode = Some(bond_mode);
        self
    }

    pub fn build(self) -> FitConfig {
        FitConfig {
            mode: self.mode.unwrap_or_default(),
            alignment: self.alignment.unwrap_or_default(),
            bond_mode: self.bond_mode.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_match_config_defaults() {
        let config = FitConfig::builder().build();
        assert_eq!(config, FitConfig::default());
        assert_eq!(config.mode, OutputMode::Average);
        assert_eq!(config.alignment, AlignmentPolicy::MinimizeRmsd);
        assert_eq!(config.bond_mode, BondMode::Direct);
    }

    #[test]
    fn builder_overrides_individual_fields() {
        let config = FitConfig::builder()
            .mode(OutputMode::Full)
            .alignment(AlignmentPolicy::None)
            .bond_mode(BondMode::AmideReconstructed)
            .build();
        assert_eq!(config.mode, OutputMode::Full);
        assert_eq!(config.alignment, AlignmentPolicy::None);
        assert_eq!(config.bond_mode, BondMode::AmideReconstructed);
    }
}
