use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use matledger_core::{EventStore, LedgerError};
use matledger_platform::{DashboardView, PurchaseHistoryView, TrackerConfig};
use tracing::{debug, warn};

use crate::commands::{Command, HELP, parse_command};
use crate::form::{FormSession, parse_material_id};

enum Flow {
    Continue,
    Stop,
}

/// Reads one command per line until `quit` or end of input. A failed line is
/// reported and the session keeps going.
pub fn run<R, W>(config: &TrackerConfig, input: R, mut output: W) -> Result<FormSession>
where
    R: BufRead,
    W: Write,
{
    let mut session = FormSession::new();
    let mut lines = input.lines();

    loop {
        write!(output, "{}", config.prompt)?;
        output.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read input")?;

        match handle_line(config, &mut session, &line) {
            Ok((text, flow)) => {
                if !text.is_empty() {
                    writeln!(output, "{text}")?;
                }
                if let Flow::Stop = flow {
                    break;
                }
            }
            Err(err) => {
                warn!("rejected {:?}: {err:#}", line.trim());
                writeln!(output, "error: {err:#}")?;
            }
        }
    }

    Ok(session)
}

fn handle_line(
    config: &TrackerConfig,
    session: &mut FormSession,
    line: &str,
) -> Result<(String, Flow)> {
    let command = parse_command(line)?;
    debug!(?command, "dispatching");

    let text = match command {
        Command::Empty => String::new(),
        Command::Quit => return Ok((String::new(), Flow::Stop)),
        Command::Help => HELP.to_string(),
        Command::Toggle => {
            if session.toggle_material_form() {
                "new material form opened".to_string()
            } else {
                "new material form closed".to_string()
            }
        }
        Command::Name(name) => {
            session.new_material_name = name;
            String::new()
        }
        Command::Add => added(session.submit_new_material()?),
        Command::New(name) => {
            session.show_material_form = true;
            session.new_material_name = name;
            added(session.submit_new_material()?)
        }
        Command::Select(material) => {
            session.selected_material = material;
            String::new()
        }
        Command::Weight(weight) => {
            session.weight = weight;
            String::new()
        }
        Command::Price(price_per_kg) => {
            session.price_per_kg = price_per_kg;
            String::new()
        }
        Command::Buy => bought(session.submit_purchase()?),
        Command::Purchase {
            material,
            weight,
            price_per_kg,
        } => {
            session.selected_material = material;
            session.weight = weight;
            session.price_per_kg = price_per_kg;
            bought(session.submit_purchase()?)
        }
        Command::List => {
            let view = DashboardView::from_ledger(session.materials())?;
            crate::render::render_dashboard(&view, config.output)?
        }
        Command::History(material) => {
            let material_id = parse_material_id(&material)?;
            let material = session
                .materials()
                .get(material_id)
                .ok_or(LedgerError::UnknownMaterial(material_id))?;
            let stream = session.events().stream(material_id);
            let view = PurchaseHistoryView::from_stream(material, &stream)?;
            crate::render::render_history(&view, config.output)?
        }
    };

    Ok((text, Flow::Continue))
}

fn added(material: matledger_core::Material) -> String {
    format!("added material #{} {}", material.id, material.name)
}

fn bought(material: matledger_core::Material) -> String {
    format!(
        "{} now {} kg at {} per kg",
        material.name,
        material.weight.round_dp(2),
        material.price_per_kg.round_dp(2)
    )
}
