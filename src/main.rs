use std::env;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use keepsake::capability::Capabilities;
use keepsake::error::Result;
use keepsake::settings::Settings;

/// Decodes service capability masks given on the command line and prints
/// the set of capability names for each. `--json` switches the output to
/// JSON arrays.
fn main() -> Result<()> {
    let settings = Settings::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_level))
        .init();

    let mut json = false;
    let mut decoded = 0usize;
    for arg in env::args().skip(1) {
        if arg == "--json" {
            json = true;
            continue;
        }
        match arg.parse::<u32>() {
            Ok(number) => {
                let capabilities = Capabilities::new(number);
                if json {
                    println!("{}", serde_json::to_string(&capabilities.as_set())?);
                } else {
                    println!("{} {}", number, capabilities);
                }
                decoded += 1;
            }
            Err(e) => warn!(%arg, error = %e, "not a capability number"),
        }
    }
    info!(decoded, "capability masks decoded");
    Ok(())
}
