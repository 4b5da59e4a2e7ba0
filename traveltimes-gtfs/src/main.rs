use clap::Parser;
use traveltimes_gtfs::{app::TravelTimesApp, schedule::ScheduleError};

fn main() -> Result<(), ScheduleError> {
    env_logger::init();
    let args = TravelTimesApp::parse();
    args.op.run()
}
