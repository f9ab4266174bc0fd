use crate::cli::ViewArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::tui::{self, KeyMap};
use molprisma::workflows::session;
use tracing::info;

pub fn run(args: ViewArgs, config: AppConfig) -> Result<()> {
    info!("Loading input structure from {:?}", &args.input);
    let controller = session::open_path(&args.input, &config.constants, &config.viewer)?;
    tui::run(controller, KeyMap::new(config.filter_keys))
}
