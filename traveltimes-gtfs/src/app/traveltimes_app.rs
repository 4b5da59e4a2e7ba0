use std::path::Path;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::schedule::{
    gtfs_import, store::JsonFileTravelTimesStore, BatchSummary, ScheduleBasedTravelTimesProcessor,
    ScheduleError, TravelTimesConfig,
};

/// Command line tool for generating transit travel times from GTFS schedules
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct TravelTimesApp {
    #[command(subcommand)]
    pub op: TravelTimesOperation,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum TravelTimesOperation {
    /// generate schedule-based travel times for every trip of a GTFS feed and write
    /// them as the next travel times revision of the store
    ScheduleBased {
        /// a GTFS archive or a directory of GTFS files
        #[arg(long)]
        gtfs_input: String,

        /// directory holding the travel times store. created if missing.
        #[arg(long)]
        store_directory: String,

        /// TOML file overriding travel times configuration defaults
        #[arg(long)]
        configuration_file: Option<String>,
    },
}

impl TravelTimesOperation {
    pub fn run(&self) -> Result<(), ScheduleError> {
        match self {
            TravelTimesOperation::ScheduleBased {
                gtfs_input,
                store_directory,
                configuration_file,
            } => {
                let summary = run_schedule_based(
                    Path::new(gtfs_input),
                    Path::new(store_directory),
                    configuration_file.as_deref().map(Path::new),
                )?;
                println!(
                    "wrote travel times rev {} for {} trips ({} reused, {} generated)",
                    summary.travel_times_rev,
                    summary.n_trips,
                    summary.n_reused,
                    summary.n_generated
                );
                Ok(())
            }
        }
    }
}

pub fn run_schedule_based(
    gtfs_input: &Path,
    store_directory: &Path,
    configuration_file: Option<&Path>,
) -> Result<BatchSummary, ScheduleError> {
    let config = TravelTimesConfig::load(configuration_file)?;
    log::debug!("travel times configuration: {config:?}");
    let mut schedule = gtfs_import::read_gtfs(gtfs_input)?;
    let mut store = JsonFileTravelTimesStore::new(store_directory)?;
    ScheduleBasedTravelTimesProcessor::new(config).process(&mut schedule, &mut store)
}
