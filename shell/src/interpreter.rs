use crate::builtin::{self, Outcome};
use crate::config::ShellConfig;
use crate::console::{self, Console, Style};
use crate::env::Environment;
use crate::external::Launcher;
use crate::history::is_bang;
use crate::input::{EditorSource, LineSource, RawSource, ReadOutcome};
use crate::interrupt;
use crate::session::Session;
use crate::tokenizer::{CommandLine, split_into_tokens};
use anyhow::{Context, Result};
use std::io::{self, Stdout, Write};

/// The command loop: prompt, read, expand history, dispatch.
///
/// Example
/// ```
/// use bangsh::{Interpreter, Session, Environment, Console, RawSource, Outcome};
/// let source = RawSource::new(std::io::Cursor::new("help exit\n"), std::io::sink());
/// let mut sh = Interpreter::new(
///     Session::new(10, Environment::default()),
///     Box::new(source),
///     Console::buffer(false),
/// );
/// assert_eq!(sh.execute_line("help exit").unwrap(), Outcome::Continue);
/// assert_eq!(sh.session().history.count(), 1);
/// ```
pub struct Interpreter<W: Write> {
    session: Session,
    launcher: Launcher,
    source: Box<dyn LineSource>,
    out: Console<W>,
}

impl Interpreter<Stdout> {
    /// An interpreter on the process's own stdin and stdout.
    pub fn with_stdio(config: &ShellConfig) -> Result<Self> {
        let source: Box<dyn LineSource> = if config.use_editor() {
            Box::new(EditorSource::new().context("failed to start the line editor")?)
        } else {
            Box::new(RawSource::new(io::stdin(), io::stdout()))
        };
        Ok(Self::new(
            Session::new(config.history_depth, Environment::from_process()),
            source,
            Console::new(io::stdout(), config.color),
        ))
    }
}

impl<W: Write> Interpreter<W> {
    pub fn new(session: Session, source: Box<dyn LineSource>, out: Console<W>) -> Self {
        Self {
            session,
            launcher: Launcher::new(),
            source,
            out,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn output(&self) -> &Console<W> {
        &self.out
    }

    /// Run until `exit` or end of input.
    pub fn repl(&mut self) -> Result<()> {
        tracing::info!(depth = self.session.history.depth(), "session started");
        while self.step()? == Outcome::Continue {}
        tracing::info!(commands = self.session.history.count(), "session finished");
        Ok(())
    }

    /// One prompt-to-prompt iteration.
    pub fn step(&mut self) -> Result<Outcome> {
        interrupt::clear();
        self.launcher.reap();

        let cwd = self.session.dirs.refresh()?.display().to_string();
        let prompt = console::render(&format!("{cwd}$ "), Style::Header, self.out.color());

        let line = match self.source.read_line(&prompt)? {
            ReadOutcome::Line(line) => line,
            ReadOutcome::Interrupted => {
                // The signal handler already printed help; a Ctrl-C seen by
                // the line editor raised no signal.
                if !interrupt::take() {
                    builtin::write_summary(&mut self.out, self.session.history.depth())?;
                }
                tracing::debug!("read interrupted");
                return Ok(Outcome::Continue);
            }
            ReadOutcome::Eof => return Ok(Outcome::Exit),
        };
        if interrupt::take() {
            tracing::debug!("discarding line read across an interrupt");
            return Ok(Outcome::Continue);
        }
        self.execute_line(&line)
    }

    /// Expand, record and run one raw input line.
    ///
    /// Every accepted line is recorded before it runs, builtins with too many
    /// arguments included. Blank lines and failed history expansions are not.
    pub fn execute_line(&mut self, line: &str) -> Result<Outcome> {
        let parsed = CommandLine::parse(line);
        let Some(first) = parsed.name() else {
            return Ok(Outcome::Continue);
        };

        let expanded;
        let tokens = if is_bang(first) {
            match self.session.history.resolve(&parsed.tokens) {
                Ok(text) => {
                    expanded = text.to_string();
                    tracing::debug!(reference = first, command = %expanded, "expanded history");
                    self.out.line(&expanded, Style::Normal)?;
                    split_into_tokens(&expanded)
                }
                Err(err) => {
                    self.out.line(&err.to_string(), Style::Warning)?;
                    return Ok(Outcome::Continue);
                }
            }
        } else {
            parsed.tokens.clone()
        };
        let Some((name, args)) = tokens.split_first() else {
            return Ok(Outcome::Continue);
        };

        let number = self.session.history.record(&tokens);
        tracing::info!(
            number,
            command = %tokens.join(" "),
            background = parsed.background,
            "accepted"
        );

        if let Some(outcome) = builtin::dispatch(name, args, &mut self.session, &mut self.out)? {
            return Ok(outcome);
        }

        match self.launcher.launch(&tokens, parsed.background) {
            Ok(_) => {}
            Err(err) if err.is_fatal() => return Err(err.into()),
            Err(err) => self.out.line(&err.to_string(), Style::Error)?,
        }
        self.launcher.reap();
        Ok(Outcome::Continue)
    }
}
