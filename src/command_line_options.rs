use std::path::PathBuf;

use clap::Parser;

use crate::contribution::ContributionParameters;
use crate::error::Result;
use crate::parameters::ParameterFileContents;
use crate::transform::TransformKind;
use crate::transform::TransformParameters;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct CommandLineOptions {
    /// Number of ranks (coordinator included) to run as local threads.
    #[cfg(not(feature = "mpi"))]
    #[clap(long, default_value = "4")]
    pub num_ranks: usize,
    /// YAML file with `contributions` and `transform` sections.
    pub parameter_file_path: Option<PathBuf>,
    #[clap(short, parse(from_occurrences))]
    pub verbosity: usize,
    /// Overrides the base seed of the parameter file.
    #[clap(long)]
    pub seed: Option<u64>,
    /// Overrides the transform of the parameter file.
    #[clap(long, arg_enum)]
    pub transform: Option<TransformKind>,
}

impl CommandLineOptions {
    pub fn contribution_parameters(
        &self,
        parameters: &ParameterFileContents,
    ) -> Result<ContributionParameters> {
        let mut contributions: ContributionParameters = parameters.get()?;
        if let Some(seed) = self.seed {
            contributions.seed = Some(seed);
        }
        Ok(contributions)
    }

    /// The transform given on the command line or, if there is none,
    /// the one of the parameter file. The file section is only read
    /// in the latter case.
    pub fn transform_kind(&self, parameters: &ParameterFileContents) -> Result<TransformKind> {
        match self.transform {
            Some(kind) => Ok(kind),
            None => Ok(parameters.get::<TransformParameters>()?.kind),
        }
    }
}
