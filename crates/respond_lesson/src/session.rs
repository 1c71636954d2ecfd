//! A text session driving the mounted page, one command per line.

use std::io::{BufRead, Write};

use owo_colors::OwoColorize;
use respond::dom::events::{self, Activation};
use respond::window::{self, RecordedAlerts};
use respond::{NodeId, RenderResult, with_document};

use crate::{App, ids};

/// Help text for the `help` command
const HELP: &str = "\
commands:
  click <id>    click a element (buttons inside a form submit it)
  submit <id>   submit a form
  html [id]     print the html of a element, or of the whole page
  text <id>     print the text content of a element
  help          show this message
  quit          end the session";

/// Should the session keep reading commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next command
    Continue,
    /// End the session
    Quit,
}

/// A single parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// Click the element with the id
    Click(&'a str),
    /// Submit the form with the id
    Submit(&'a str),
    /// Print html of the element, or the page
    Html(Option<&'a str>),
    /// Print text of the element
    Text(&'a str),
    /// Print the help
    Help,
    /// End the session
    Quit,
}

impl<'a> Command<'a> {
    /// Parse a command line, `Ok(None)` for blank lines and `#` comments.
    ///
    /// # Errors
    /// If the command is unknown or its arguments are wrong.
    pub fn parse(line: &'a str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default();
        let argument = words.next();
        if let Some(extra) = words.next() {
            return Err(format!("unexpected argument `{extra}`"));
        }

        let required = |argument: Option<&'a str>| {
            argument.ok_or_else(|| format!("`{command}` needs a element id"))
        };
        let command = match command {
            "click" => Command::Click(required(argument)?),
            "submit" => Command::Submit(required(argument)?),
            "text" => Command::Text(required(argument)?),
            "html" => Command::Html(argument),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("unknown command `{other}`, try `help`")),
        };
        Ok(Some(command))
    }
}

/// The mounted page plus everything needed to report what it does.
pub struct Session {
    /// The mounted app, dropped on remount
    page: Option<RenderResult<App>>,
    /// Alerts shown by the page
    alerts: RecordedAlerts,
}

impl Session {
    /// Mount a fresh page and start recording its alerts.
    ///
    /// # Errors
    /// If the page can not be mounted.
    pub fn new() -> anyhow::Result<Self> {
        let alerts = RecordedAlerts::new();
        drop(window::set_alert_surface(alerts.clone()));

        let mut session = Self { page: None, alerts };
        session.remount()?;
        Ok(session)
    }

    /// Throw away the document and mount the app again, resetting all component state.
    fn remount(&mut self) -> anyhow::Result<()> {
        let old = self.page.take();
        respond::reset_document();
        drop(old);
        let _ = window::take_navigations();

        let _ = respond::mount_point();
        let page = respond::render_component(App, respond::MOUNT_POINT)
            .map_err(anyhow::Error::msg)?;
        self.page = Some(page);
        log::debug!("Page mounted");
        Ok(())
    }

    /// Look up a element by id
    fn find(id: &str) -> Result<NodeId, String> {
        with_document(|document| document.get_element_by_id(id))
            .ok_or_else(|| format!("no element with id `{id}`"))
    }

    /// Run one command line, writing its output to `out`.
    ///
    /// Mistakes in the command are reported to `out` and do not end the session.
    ///
    /// # Errors
    /// If writing fails or the page can not be remounted.
    pub fn execute(&mut self, line: &str, out: &mut impl Write) -> anyhow::Result<Flow> {
        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(message) => {
                writeln!(out, "{} {message}", "error:".red())?;
                return Ok(Flow::Continue);
            }
        };
        log::debug!("Running {command:?}");

        let result = match command {
            Command::Click(id) => Self::find(id).map(|node| Some(events::click(node))),
            Command::Submit(id) => Self::find(id).and_then(|node| match events::submit(node) {
                Activation::NotAForm => Err(format!("`{id}` is not a form")),
                activation => Ok(Some(activation)),
            }),
            Command::Html(Some(id)) => Self::find(id).map(|node| {
                writeln_lossy(out, &with_document(|document| document.outer_html(node)));
                None
            }),
            Command::Html(None) => {
                let html = with_document(|document| document.inner_html(document.body()));
                writeln_lossy(out, &html);
                Ok(None)
            }
            Command::Text(id) => Self::find(id).map(|node| {
                writeln_lossy(out, &with_document(|document| document.text_content(node)));
                None
            }),
            Command::Help => {
                writeln!(out, "{HELP}")?;
                writeln!(out, "ids: {}", ids::ALL.join(", "))?;
                Ok(None)
            }
            Command::Quit => return Ok(Flow::Quit),
        };

        match result {
            Ok(activation) => self.report(activation, out)?,
            Err(message) => writeln!(out, "{} {message}", "error:".red())?,
        }
        Ok(Flow::Continue)
    }

    /// Print alerts and act on navigations caused by the last command
    fn report(&mut self, activation: Option<Activation>, out: &mut impl Write) -> anyhow::Result<()> {
        for message in self.alerts.take() {
            writeln!(out, "{} {message}", "alert:".yellow().bold())?;
        }

        if let Some(activation) = activation {
            log::trace!("Activation result: {activation:?}");
        }

        let navigations = window::take_navigations();
        if let Some(target) = navigations.last() {
            writeln!(
                out,
                "{} page navigated to `{target}`, reloading (state is reset)",
                "notice:".cyan()
            )?;
            self.remount()?;
        }
        Ok(())
    }

    /// Run commands from `input` until it ends or `quit` is read.
    ///
    /// # Errors
    /// If reading or writing fails.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line?;
            if self.execute(&line, out)? == Flow::Quit {
                break;
            }
            out.flush()?;
        }
        Ok(())
    }
}

/// Write a line, logging instead of failing when the output is gone
fn writeln_lossy(out: &mut impl Write, text: &str) {
    if let Err(err) = writeln!(out, "{text}") {
        log::warn!("Failed to write output: {err}");
    }
}

/// Mount the app and return the html of the page, or of the element with `id`.
///
/// # Errors
/// If the page can not be mounted or `id` does not exist.
pub fn render(id: Option<&str>) -> anyhow::Result<String> {
    let session = Session::new()?;
    let html = match id {
        Some(id) => {
            let node = Session::find(id).map_err(anyhow::Error::msg)?;
            with_document(|document| document.outer_html(node))
        }
        None => with_document(|document| document.inner_html(document.body())),
    };
    drop(session);
    Ok(html)
}
