mod cli;
mod core;
mod error;
mod http;
mod reporting;
mod sqli;

use crate::cli::args::Cli;
use crate::cli::menu::Menu;
use crate::core::context::{delay_or_default, has_http_scheme, Context};
use crate::core::gate::ProbeGate;
use crate::core::logging::init_logging;
use crate::core::settings::DEFAULT_DELAY;
use crate::http::client::HttpClient;
use crate::reporting::{sink_for, Event, Sink};
use crate::sqli::{InjectionPoint, Session, TimingOracle};
use clap::Parser;
use std::io::BufRead;
use std::process::ExitCode;

const BANNER: &str = r#"
 ╔════════════════════════════════════════════════════════════════════╗
 ║                                                                    ║
 ║    ██╗  ██╗ ██████╗ ██╗   ██╗██████╗  ██████╗ ██╗      █████╗      ║
 ║    ██║  ██║██╔═══██╗██║   ██║██╔══██╗██╔════╝ ██║     ██╔══██╗     ║
 ║    ███████║██║   ██║██║   ██║██████╔╝██║  ███╗██║     ███████║     ║
 ║    ██╔══██║██║   ██║██║   ██║██╔══██╗██║   ██║██║     ██╔══██║     ║
 ║    ██║  ██║╚██████╔╝╚██████╔╝██║  ██║╚██████╔╝███████╗██║  ██║     ║
 ║    ╚═╝  ╚═╝ ╚═════╝  ╚═════╝ ╚═╝  ╚═╝ ╚═════╝ ╚══════╝╚═╝  ╚═╝     ║
 ║                                                                    ║
 ║    Time-based Blind SQL Injection Extractor                        ║
 ║                                                                    ║
 ║    Author  : Siddhant Bhattarai                                    ║
 ║    Version : 0.1.0                                                 ║
 ║    License : Apache-2.0                                            ║
 ║                                                                    ║
 ╚════════════════════════════════════════════════════════════════════╝
"#;

fn print_banner() {
    println!("\x1b[36m{}\x1b[0m", BANNER); // Cyan color
}

/// Flag value when given, otherwise an answer read from `input`.
fn flag_or_prompt(
    flag: Option<&str>,
    label: &str,
    sink: &dyn Sink,
    input: &mut impl BufRead,
) -> anyhow::Result<String> {
    if let Some(value) = flag {
        return Ok(value.trim().to_string());
    }

    sink.prompt(label);
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if !cli.no_banner && !cli.quiet {
        print_banner();
    }

    init_logging(cli.verbose, cli.quiet)?;

    let sink = sink_for(cli.format);
    let mut input = std::io::stdin().lock();

    let target = flag_or_prompt(
        cli.target.as_deref(),
        "Target URL (e.g. http://testphp.vulnweb.com/artists.php)",
        sink.as_ref(),
        &mut input,
    )?;
    if !has_http_scheme(&target) {
        sink.render(&Event::warn("The URL must start with http:// or https://"));
        return Ok(ExitCode::from(1));
    }

    let raw_delay = flag_or_prompt(
        cli.delay.as_deref(),
        "Delay in seconds (e.g. 2.0)",
        sink.as_ref(),
        &mut input,
    )?;
    let (delay, valid) = delay_or_default(&raw_delay);
    if !valid {
        sink.render(&Event::warn(format!(
            "Invalid delay, using {:.1}",
            DEFAULT_DELAY
        )));
    }

    let ctx = Context::from_cli(&cli, &target, delay)?;
    if !ctx.quiet {
        sink.render(&Event::info(format!(
            "Target = {} | Parameter = {} | Delay = {} sec",
            ctx.target.url, ctx.target.param, ctx.target.delay
        )));
    }

    let client = HttpClient::new(
        ctx.scope.clone(),
        ProbeGate::new(ctx.probe_pause),
        ctx.target.timeout(),
    )?;
    let point = InjectionPoint::new(client, ctx.target.url.clone(), ctx.target.param.clone());
    let oracle = TimingOracle::new(point, ctx.target.delay);
    let session = Session::new(oracle, ctx.target.max_length, ctx.limits, sink);

    let mut menu = Menu::new(session, input, ctx.op_timeout);
    menu.run().await?;

    tracing::info!(
        "[MAIN] session finished after {} probe(s)",
        menu.session().oracle().probes()
    );

    Ok(ExitCode::SUCCESS)
}
