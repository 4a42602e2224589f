use std::process;

use clap::Parser;
use cli::PhylogenyToSdpArgs;

#[macro_use]
extern crate log;

/// Parse command line arguments and run `maxk_phylogeny::run_phylogeny_to_sdp()`.
fn main() {
    let args = PhylogenyToSdpArgs::parse();
    args.log();
    logger::init_logger(&(args.verbose + u8::from(!args.quiet)));

    if let Err(err) = maxk_phylogeny::run_phylogeny_to_sdp(&args) {
        error!("{err:#}");
        process::exit(1);
    }
}
