use log::info;

use crate::{command::SessionArg, tui::Runtime, util};

use self::app::PlayApp;

mod app;
mod effects;
mod screen;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    session: SessionArg,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { session } = arg;

    util::init_logger(&session.log_file)?;
    let mut app = PlayApp::new(session.new_session());

    Runtime::new().run(&mut app)?;

    let session = app.session();
    info!(
        "game closed with score {} after eliminating {} tile(s)",
        session.score(),
        session.eliminated_count()
    );
    Ok(())
}
