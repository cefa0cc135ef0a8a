use alertfeed_app::platform::{self, config::Args};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    platform::run_app(args)
}
