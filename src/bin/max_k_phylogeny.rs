use std::process;

use clap::Parser;
use cli::MaxKPhylogenyArgs;

#[macro_use]
extern crate log;

/// Parse command line arguments and run `maxk_phylogeny::run_max_k_phylogeny()`.
fn main() {
    let args = MaxKPhylogenyArgs::parse();
    args.log();
    logger::init_logger(&(args.verbose + u8::from(!args.quiet)));

    if let Err(err) = maxk_phylogeny::run_max_k_phylogeny(&args) {
        error!("{err:#}");
        process::exit(1);
    }
}
