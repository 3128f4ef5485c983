use clap::Parser;
use loadbalance::command_line_options::CommandLineOptions;
use loadbalance::contribution::ContributionParameters;
use loadbalance::coordinator::RunSummary;
use loadbalance::error::Result;
use loadbalance::logging;
use loadbalance::parameters::ParameterFileContents;
use log::info;

fn main() -> Result<()> {
    let opts = CommandLineOptions::parse();
    logging::initialize(opts.verbosity)?;
    let parameters = match opts.parameter_file_path {
        Some(ref path) => ParameterFileContents::from_file(path)?,
        None => ParameterFileContents::default(),
    };
    let contributions = opts.contribution_parameters(&parameters)?;
    let transform = opts.transform_kind(&parameters)?;
    info!("Applying {:?} transform", transform);
    run(&opts, &contributions, transform.function())
}

#[cfg(not(feature = "mpi"))]
fn run(
    opts: &CommandLineOptions,
    contributions: &ContributionParameters,
    transform: fn(f64) -> f64,
) -> Result<()> {
    let summary = loadbalance::run::run_local(opts.num_ranks, contributions, transform)?;
    report(&summary);
    Ok(())
}

#[cfg(feature = "mpi")]
fn run(
    _opts: &CommandLineOptions,
    contributions: &ContributionParameters,
    transform: fn(f64) -> f64,
) -> Result<()> {
    use loadbalance::communication::MPI_UNIVERSE;

    let summary = loadbalance::run::run_mpi(contributions, transform);
    if let Ok(Some(ref summary)) = summary {
        report(summary);
    }
    MPI_UNIVERSE.drop();
    summary.map(|_| ())
}

fn report(summary: &RunSummary) {
    info!(
        "Balanced {} items across {} workers, chunk lengths {:?}",
        summary.combined.len(),
        summary.chunks.len(),
        summary.chunk_lengths()
    );
}
