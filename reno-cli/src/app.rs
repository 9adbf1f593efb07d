use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reno_core::{
    PriceEstimate, PricingTable, RevealSink, RevealTarget, Revealer, WizardController,
    WizardEvent, WizardOutput,
};
use reno_data::PricingTableLoader;
use rust_decimal::Decimal;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::input::{Command, parse_command};
use crate::render::{
    HELP, render_breakdown, render_feedback, render_ignored, render_question, render_range,
};

/// Where screens are written. Shared with the reveal tasks.
pub type SharedOutput = Arc<Mutex<dyn Write + Send>>;

const BANNER: &str = "\
Renovation Cost Estimator
Answer five quick questions to get a price range. Type h for help.";

/// Whether the session should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Loads the pricing table named in `settings`, or the built-in table.
pub fn load_pricing_table(settings: &Settings) -> Result<PricingTable> {
    match &settings.pricing_table {
        Some(path) => {
            info!(path = %path.display(), "loading pricing table");
            PricingTableLoader::load_from_path(path)
                .with_context(|| format!("Failed to load pricing table: {}", path.display()))
        }
        None => Ok(PricingTable::standard()),
    }
}

/// Rewrites the range line in place as the bounds count up.
struct TerminalRevealSink {
    out: SharedOutput,
    bounds: Mutex<(Decimal, Decimal)>,
    write_failed: AtomicBool,
}

impl TerminalRevealSink {
    fn new(out: SharedOutput) -> Self {
        Self {
            out,
            bounds: Mutex::new((Decimal::ZERO, Decimal::ZERO)),
            write_failed: AtomicBool::new(false),
        }
    }

    fn reset(&self) {
        *self.bounds.lock().unwrap_or_else(PoisonError::into_inner) =
            (Decimal::ZERO, Decimal::ZERO);
        self.write_failed.store(false, Ordering::Relaxed);
    }
}

impl RevealSink for TerminalRevealSink {
    fn render(
        &self,
        target: RevealTarget,
        value: Decimal,
    ) {
        let (min, max) = {
            let mut bounds = self.bounds.lock().unwrap_or_else(PoisonError::into_inner);
            match target {
                RevealTarget::Min => bounds.0 = value,
                RevealTarget::Max => bounds.1 = value,
            }
            *bounds
        };

        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let drawn = write!(out, "\r{}", render_range(min, max)).and_then(|()| out.flush());
        if let Err(err) = drawn {
            // Once per reveal; a closed terminal fails every frame.
            if !self.write_failed.swap(true, Ordering::Relaxed) {
                warn!(%target, %err, "failed to draw reveal frame");
            }
        }
    }
}

/// One interactive estimating session.
pub struct EstimatorApp {
    controller: WizardController,
    revealer: Revealer,
    sink: Arc<TerminalRevealSink>,
    out: SharedOutput,
    /// The estimate whose range is still counting up. Its breakdown is
    /// printed once the count-up finishes.
    revealing: Option<PriceEstimate>,
}

impl EstimatorApp {
    pub fn new(
        table: Arc<PricingTable>,
        reveal_duration: Duration,
        out: SharedOutput,
    ) -> Self {
        let sink = Arc::new(TerminalRevealSink::new(Arc::clone(&out)));
        let revealer = Revealer::with_duration(sink.clone(), reveal_duration);

        Self {
            controller: WizardController::new(table),
            revealer,
            sink,
            out,
            revealing: None,
        }
    }

    pub fn controller(&self) -> &WizardController {
        &self.controller
    }

    /// Whether a range is still counting up.
    pub fn is_revealing(&self) -> bool {
        self.revealing.is_some()
    }

    /// Runs the wizard until `q` or end of input. Returns the estimate on
    /// screen when the session ended, if any.
    ///
    /// Input is read while the range counts up, so `r` or `q` cut the
    /// animation short. At end of input a running count-up is played out.
    pub async fn run<R>(
        &mut self,
        input: R,
    ) -> Result<Option<PriceEstimate>>
    where
        R: AsyncBufRead + Unpin,
    {
        self.say(BANNER)?;
        self.show_current()?;

        let mut lines = input.lines();
        loop {
            tokio::select! {
                biased;
                line = lines.next_line() => {
                    match line.context("Failed to read input")? {
                        Some(line) => {
                            if self.handle_line(&line)? == Flow::Quit {
                                break;
                            }
                        }
                        None => {
                            self.revealer.settle().await;
                            self.finish_reveal()?;
                            break;
                        }
                    }
                }
                () = self.revealer.settle(), if self.revealing.is_some() => {
                    self.finish_reveal()?;
                }
            }
        }

        self.revealer.cancel_all();
        Ok(self.controller.last_estimate().cloned())
    }

    /// Applies one line of input. A submit only starts the count-up; the
    /// breakdown follows from [`EstimatorApp::run`] once it finishes.
    pub fn handle_line(
        &mut self,
        line: &str,
    ) -> Result<Flow> {
        let command = match parse_command(line, self.controller.current_question()) {
            Ok(command) => command,
            Err(err) => {
                debug!(input = line, %err, "input rejected");
                self.say(&err.to_string())?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Answer(events) => {
                for event in events {
                    self.controller.handle(event);
                }
                self.show_current()?;
            }
            Command::Next => self.apply(WizardEvent::Next)?,
            Command::Previous => self.apply(WizardEvent::Previous)?,
            Command::Submit => self.apply(WizardEvent::Submit)?,
            Command::Restart => {
                if self.revealing.take().is_some() {
                    debug!("restart abandoned running reveal");
                    self.say("")?;
                }
                self.revealer.cancel_all();
                self.say("Starting over.")?;
                self.apply(WizardEvent::Restart)?;
            }
            Command::Help => self.say(HELP)?,
            Command::Quit => {
                if self.revealing.take().is_some() {
                    self.revealer.cancel_all();
                    self.say("")?;
                }
                self.say("Goodbye.")?;
                return Ok(Flow::Quit);
            }
        }

        Ok(Flow::Continue)
    }

    fn apply(
        &mut self,
        event: WizardEvent,
    ) -> Result<()> {
        match self.controller.handle(event) {
            WizardOutput::Updated(_) => self.show_current(),
            WizardOutput::Invalid { question, .. } => self.say(&render_feedback(question)),
            WizardOutput::Ignored(snapshot) => self.say(&render_ignored(event, &snapshot)),
            WizardOutput::Completed { estimate, .. } => self.reveal(estimate),
        }
    }

    fn reveal(
        &mut self,
        estimate: PriceEstimate,
    ) -> Result<()> {
        self.say("")?;
        self.sink.reset();
        self.revealer.reveal(&estimate);
        self.revealing = Some(estimate);
        Ok(())
    }

    fn finish_reveal(&mut self) -> Result<()> {
        match self.revealing.take() {
            Some(estimate) => {
                self.say("")?;
                self.say(&render_breakdown(&estimate))
            }
            None => Ok(()),
        }
    }

    fn show_current(&self) -> Result<()> {
        match self.controller.current_question() {
            Some(question) => {
                let screen = render_question(
                    question,
                    self.controller.answers(),
                    &self.controller.snapshot(),
                );
                self.say(&format!("\n{screen}"))
            }
            None => match self.controller.last_estimate() {
                Some(estimate) => {
                    self.say(&render_range(estimate.min, estimate.max))?;
                    self.say(&render_breakdown(estimate))
                }
                None => Ok(()),
            },
        }
    }

    fn say(
        &self,
        text: &str,
    ) -> Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| anyhow!("output is unavailable after a writer panicked"))?;
        writeln!(out, "{text}").context("Failed to write output")?;
        out.flush().context("Failed to flush output")
    }
}
