//! Entry point for the mprompt binary.
//!
//! Opens one dialog against the headless widget, prints its markup, answers
//! it as instructed on the command line and reports the outcome.

mod args;
mod tracing_setup;

use std::io::{self, Write};

use anyhow::{Context, Result};
use futures::executor::block_on;
use modal_prompt::{
    Dialogs, Document, ElementId, HeadlessModalFactory, PartialAlertOptions,
    PartialConfirmOptions, PromptConfig,
};

use crate::args::{Answer, Kind};

fn main() -> Result<()> {
    let config = PromptConfig::load_default().unwrap_or_else(|err| {
        eprintln!("Warning: failed to load prompt.toml: {err}");
        eprintln!("Using default configuration");
        PromptConfig::default()
    });

    tracing_setup::init(&config.logging);

    let invocation = args::parse_args()?;
    log::info!("Starting mprompt: {invocation:?}");

    let document = Document::new();
    let dialogs = Dialogs::new(document.clone(), HeadlessModalFactory::default())
        .with_defaults(config.defaults());
    let mut out = io::stdout().lock();

    match invocation.kind {
        Kind::Confirm => {
            let options = invocation
                .title
                .map_or_else(PartialConfirmOptions::default, PartialConfirmOptions::from);
            let answer = dialogs.confirm(options)?;
            let wrapper = answer.wrapper();
            print_markup(&mut out, &document, wrapper)?;
            respond(&document, wrapper, invocation.answer)?;
            let confirmed = block_on(answer)?;
            writeln!(out, "answer: {confirmed}")?;
            finish(&mut out, &document, wrapper)
        }
        Kind::Alert => {
            let options = invocation
                .title
                .map_or_else(PartialAlertOptions::default, PartialAlertOptions::from);
            let ack = dialogs.alert(options)?;
            let wrapper = ack.wrapper();
            print_markup(&mut out, &document, wrapper)?;
            respond(&document, wrapper, invocation.answer)?;
            block_on(ack)?;
            writeln!(out, "acknowledged")?;
            finish(&mut out, &document, wrapper)
        }
    }
}

fn print_markup(out: &mut impl Write, document: &Document, wrapper: ElementId) -> Result<()> {
    let markup = document
        .outer_html(wrapper)
        .context("dialog markup disappeared before it was shown")?;
    writeln!(out, "{markup}")?;
    Ok(())
}

/// Act out the scripted answer. Buttons are taken in footer order, so the
/// last one is the affirmative choice.
fn respond(document: &Document, wrapper: ElementId, answer: Answer) -> Result<()> {
    let buttons = document.find_by_tag(wrapper, "button");
    let target = match answer {
        Answer::Yes => buttons.last(),
        Answer::No => buttons.first(),
        Answer::Dismiss => {
            document.key_down(wrapper, "Escape");
            // Dismissal answers only once the widget reports it is hidden.
            document.run_pending();
            return Ok(());
        }
    };
    let button = target.copied().context("dialog has no buttons")?;
    document.click(button);
    Ok(())
}

/// Let the widget finish hiding and check the markup is gone.
fn finish(out: &mut impl Write, document: &Document, wrapper: ElementId) -> Result<()> {
    let delivered = document.run_pending();
    log::debug!("Delivered {delivered} pending events");
    if document.contains(wrapper) {
        anyhow::bail!("dialog markup was not removed after hiding");
    }
    writeln!(out, "dialog removed")?;
    Ok(())
}
