use clap::Parser;
use dotenv::dotenv;
use steam_tradeoffer_poller::logging::setup_logger;
use steam_tradeoffer_poller::{establish_session, Config, OfferPoller, SteamSession};

#[tokio::main]
async fn main() {
    dotenv().ok();
    setup_logger();

    let config = Config::parse();
    let session = match SteamSession::new("english") {
        Ok(session) => session,
        Err(error) => {
            log::error!("{error}");
            std::process::exit(1);
        },
    };
    let session = match establish_session(session, &config.credentials()).await {
        Ok(session) => session,
        Err(error) => {
            log::error!("{error}");
            std::process::exit(1);
        },
    };

    OfferPoller::new(session, config.poll_options()).run().await;
}
