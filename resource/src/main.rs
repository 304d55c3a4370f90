//! vault-resource entry point

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use vault_resource::Invocation;
use vr_config::{user_id_from_env, ResourceSettings};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let step = Invocation::parse().into_step();

    let settings = match ResourceSettings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };
    vr_telemetry::init(settings.log_format, &settings.log_level);
    info!(step = step.name(), "Resource invoked");

    let user_id = user_id_from_env();
    let result = vault_resource::run(
        step,
        &settings,
        user_id,
        std::io::stdin().lock(),
        std::io::stdout().lock(),
    )
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let report = err.to_report();
            error!(kind = ?report.kind, stage = report.stage, "{}", report.detail);
            ExitCode::from(err.exit_code())
        }
    }
}
