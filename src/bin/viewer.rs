use std::io::{self, Write};

use fileview::handler::content::CONTENT_ROUTE;
use fileview::viewer::Viewer;

fn main() {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to build runtime: {e}");
            std::process::exit(2);
        }
    };

    std::process::exit(runtime.block_on(run()));
}

async fn run() -> i32 {
    let url = match resolve_url() {
        Ok(url) => url,
        Err(e) => {
            eprintln!("failed to resolve server url: {e}");
            return 2;
        }
    };

    let client = reqwest::Client::new();
    let mut viewer = Viewer::new();
    viewer.mount(&client, &url).await;

    if viewer.failed() {
        let mut err = io::stderr().lock();
        if viewer.render(&mut err).and_then(|()| err.flush()).is_err() {
            return 2;
        }
        return 1;
    }

    let mut out = io::stdout().lock();
    match viewer.render(&mut out).and_then(|()| out.flush()) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("failed to write content: {e}");
            2
        }
    }
}

/// Resolve the endpoint URL.
///
/// The first CLI argument wins; otherwise host and port come from the same
/// `config.toml` / `FILEVIEW__*` environment the server reads.
fn resolve_url() -> Result<String, config::ConfigError> {
    if let Some(url) = std::env::args().nth(1) {
        return Ok(url);
    }

    let settings = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::with_prefix("FILEVIEW").separator("__"))
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .build()?;

    let host = settings.get_string("server.host")?;
    let port = settings.get_int("server.port")?;
    let port = u16::try_from(port)
        .map_err(|_| config::ConfigError::Message(format!("invalid server.port: {port}")))?;

    Ok(format!("http://{host}:{port}{CONTENT_ROUTE}"))
}
