//! Headless `--agent` mode: a blocking synchronous loop that reads JSON
//! commands from stdin and writes JSON responses to stdout.
//!
//! ## Protocol
//!
//! Each line of stdin is a JSON object with a `"cmd"` discriminator.
//! Each line of stdout is a JSON response with `"protocol_version"` and
//! `"type"` fields. See [`simulation::analysis_protocol`] for the full schema.

use std::io::{BufRead, Write};

use bevy::prelude::*;

use simulation::analysis::{AnalysisLog, AnalysisResults};
use simulation::analysis_params::AnalysisParams;
use simulation::analysis_protocol::{
    make_response, AnalysisCommand, AnalysisResponse, ResponsePayload, PROTOCOL_VERSION,
};
use simulation::narrative::AnalysisKind;
use simulation::sim_rng::SimRng;

pub fn run_agent_mode(params: AnalysisParams) {
    let mut app = crate::build_app(params);
    app.update();

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();

    write_response(&mut stdout, &make_response(ResponsePayload::Ready));
    info!("airtwin agent mode v{} ready, waiting for commands on stdin", PROTOCOL_VERSION);

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!("stdin read error: {e}");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<AnalysisCommand>(&line) {
            Ok(cmd) => process_command(cmd, &mut app),
            Err(e) => make_response(ResponsePayload::error(format!("Parse error: {e}"))),
        };
        let is_goodbye = matches!(response.payload, ResponsePayload::Goodbye);

        write_response(&mut stdout, &response);

        if is_goodbye {
            break;
        }
    }

    info!("airtwin agent mode shutting down");
}

fn write_response(out: &mut impl Write, response: &AnalysisResponse) {
    match serde_json::to_string(response) {
        Ok(json) => {
            let _ = writeln!(out, "{json}");
        }
        Err(e) => {
            error!("failed to encode response: {e}");
            let _ = writeln!(
                out,
                r#"{{"protocol_version":{PROTOCOL_VERSION},"type":"error","message":"encode failure"}}"#
            );
        }
    }
    let _ = out.flush();
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

fn process_command(cmd: AnalysisCommand, app: &mut App) -> AnalysisResponse {
    if let Some(request) = cmd.recompute_request() {
        let request = match request {
            Ok(r) => r,
            Err(e) => return make_response(ResponsePayload::error(e)),
        };
        app.world_mut().send_event(request);
        // Run one update so the executor processes the request.
        app.update();
        return make_response(latest_payload(app));
    }

    match cmd {
        AnalysisCommand::Cities => {
            let cities = app.world().resource::<AnalysisParams>().cities.clone();
            make_response(ResponsePayload::Cities { cities })
        }
        AnalysisCommand::Reseed { seed } => {
            app.world_mut().resource_mut::<SimRng>().reseed(seed);
            info!("SimRng reseeded with {}", seed);
            make_response(ResponsePayload::Ok)
        }
        AnalysisCommand::Quit => make_response(ResponsePayload::Goodbye),
        AnalysisCommand::Forecast { .. }
        | AnalysisCommand::Historical { .. }
        | AnalysisCommand::Scenario { .. } => {
            make_response(ResponsePayload::error("analysis command was not dispatched"))
        }
    }
}

/// Payload for the request the executor handled last.
fn latest_payload(app: &App) -> ResponsePayload {
    let world = app.world();
    let Some(entry) = world.resource::<AnalysisLog>().last() else {
        return ResponsePayload::error("no analysis was recorded");
    };
    let kind = match &entry.outcome {
        Ok(kind) => *kind,
        Err(e) => return ResponsePayload::error(e),
    };

    let results = world.resource::<AnalysisResults>();
    let payload = match kind {
        AnalysisKind::Forecast => results.forecast.as_ref().map(ResponsePayload::forecast),
        AnalysisKind::Pattern => results.historical.as_ref().map(ResponsePayload::historical),
        AnalysisKind::Scenario => results.scenario.as_ref().map(ResponsePayload::scenario),
    };
    payload.unwrap_or_else(|| ResponsePayload::error("analysis result missing"))
}
