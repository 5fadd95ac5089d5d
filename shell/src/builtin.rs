use crate::console::{Console, Style};
use crate::error::BuiltinError;
use crate::session::Session;
use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;

/// Names of the builtins, in the order the help summary lists them.
pub const BUILTINS: [&str; 5] = [Help::NAME, Exit::NAME, Pwd::NAME, Cd::NAME, History::NAME];

/// What the command loop should do after a command has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Go back to the prompt.
    Continue,
    /// `exit` was invoked.
    Exit,
}

/// Commands implemented inside the shell process.
///
/// Each builtin validates its own argument count in [`from_args`] and runs
/// against the session in [`execute`].
///
/// [`from_args`]: BuiltinCommand::from_args
/// [`execute`]: BuiltinCommand::execute
pub(crate) trait BuiltinCommand: Sized {
    /// Canonical name of the command, e.g. "cd".
    const NAME: &'static str;

    /// One-paragraph description shown by `help`.
    fn describe(history_depth: usize) -> String;

    /// Check the argument-count contract and capture the arguments.
    fn from_args(args: &[&str]) -> Result<Self, BuiltinError>;

    fn execute<W: Write>(self, session: &mut Session, out: &mut Console<W>) -> Result<Outcome>;
}

/// Run `name` as a builtin if it is one.
///
/// Returns `None` when `name` is not a builtin. A broken argument contract is
/// reported as a warning and the command is skipped.
pub fn dispatch<W: Write>(
    name: &str,
    args: &[&str],
    session: &mut Session,
    out: &mut Console<W>,
) -> Result<Option<Outcome>> {
    let outcome = match name {
        Exit::NAME => run::<Exit, W>(args, session, out)?,
        Pwd::NAME => run::<Pwd, W>(args, session, out)?,
        Cd::NAME => run::<Cd, W>(args, session, out)?,
        History::NAME => run::<History, W>(args, session, out)?,
        Help::NAME => run::<Help, W>(args, session, out)?,
        _ => return Ok(None),
    };
    Ok(Some(outcome))
}

fn run<T: BuiltinCommand, W: Write>(
    args: &[&str],
    session: &mut Session,
    out: &mut Console<W>,
) -> Result<Outcome> {
    match T::from_args(args) {
        Ok(cmd) => cmd.execute(session, out),
        Err(err) => {
            tracing::debug!(builtin = T::NAME, %err, "rejected arguments");
            out.line(&err.to_string(), Style::Warning)?;
            Ok(Outcome::Continue)
        }
    }
}

/// Description of a builtin by name.
pub fn describe(name: &str, history_depth: usize) -> Option<String> {
    Some(match name {
        Help::NAME => Help::describe(history_depth),
        Exit::NAME => Exit::describe(history_depth),
        Pwd::NAME => Pwd::describe(history_depth),
        Cd::NAME => Cd::describe(history_depth),
        History::NAME => History::describe(history_depth),
        _ => return None,
    })
}

/// Print the numbered list of every builtin with its description.
pub fn write_summary<W: Write>(out: &mut Console<W>, history_depth: usize) -> std::io::Result<()> {
    out.write("The following commands are supported:\n", Style::Info)?;
    for (i, name) in BUILTINS.iter().enumerate() {
        out.write(&format!("{}. {}:\n", i + 1, name), Style::Info)?;
        let text = describe(name, history_depth).unwrap_or_default();
        out.line(&text, Style::Normal)?;
    }
    Ok(())
}

fn no_args(name: &'static str, args: &[&str]) -> Result<(), BuiltinError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(BuiltinError::TakesNoArguments { name })
    }
}

fn at_most_one(name: &'static str, args: &[&str]) -> Result<Option<String>, BuiltinError> {
    match args {
        [] => Ok(None),
        [arg] => Ok(Some(arg.to_string())),
        _ => Err(BuiltinError::TooManyArguments { name }),
    }
}

/// Leave the shell with a success status.
pub struct Exit;

impl BuiltinCommand for Exit {
    const NAME: &'static str = "exit";

    fn describe(_: usize) -> String {
        "Exits the shell. Takes no other arguments.".to_string()
    }

    fn from_args(args: &[&str]) -> Result<Self, BuiltinError> {
        no_args(Self::NAME, args).map(|_| Exit)
    }

    fn execute<W: Write>(self, _session: &mut Session, _out: &mut Console<W>) -> Result<Outcome> {
        Ok(Outcome::Exit)
    }
}

/// Print the current working directory.
pub struct Pwd;

impl BuiltinCommand for Pwd {
    const NAME: &'static str = "pwd";

    fn describe(_: usize) -> String {
        "Prints the current working directory. Takes no other arguments.".to_string()
    }

    fn from_args(args: &[&str]) -> Result<Self, BuiltinError> {
        no_args(Self::NAME, args).map(|_| Pwd)
    }

    fn execute<W: Write>(self, session: &mut Session, out: &mut Console<W>) -> Result<Outcome> {
        let current = session.dirs.current().display().to_string();
        out.line(&current, Style::Normal)?;
        Ok(Outcome::Continue)
    }
}

/// Change the working directory.
///
/// No argument goes home, `-` goes back to the previous directory and a
/// leading `~` is replaced by `$HOME`.
pub struct Cd {
    pub target: Option<String>,
}

impl Cd {
    fn resolve(&self, session: &Session) -> Result<PathBuf, BuiltinError> {
        let home = || session.env.home().ok_or(BuiltinError::HomeNotSet);
        Ok(match self.target.as_deref() {
            None => PathBuf::from(home()?),
            Some("-") => session.dirs.previous().to_path_buf(),
            Some(target) => match target.strip_prefix('~') {
                Some(rest) => PathBuf::from(format!("{}{}", home()?, rest)),
                None => PathBuf::from(target),
            },
        })
    }
}

impl BuiltinCommand for Cd {
    const NAME: &'static str = "cd";

    fn describe(_: usize) -> String {
        "Changes the current working directory to the directory specified. Takes only one argument."
            .to_string()
    }

    fn from_args(args: &[&str]) -> Result<Self, BuiltinError> {
        at_most_one(Self::NAME, args).map(|target| Cd { target })
    }

    fn execute<W: Write>(self, session: &mut Session, out: &mut Console<W>) -> Result<Outcome> {
        let result = match self.resolve(session) {
            Ok(target) => session.dirs.cd(target).map_err(BuiltinError::ChangeDir),
            Err(err) => {
                session.dirs.snapshot();
                Err(err)
            }
        };
        if let Err(err) = result {
            out.line(&err.to_string(), Style::Error)?;
        }
        Ok(Outcome::Continue)
    }
}

/// List the commands still in the history window.
pub struct History;

impl BuiltinCommand for History {
    const NAME: &'static str = "history";

    fn describe(depth: usize) -> String {
        format!(
            "Displays the {depth} most recent commands entered. If less than {depth} commands \
             were entered then only those are displayed. Takes no other arguments."
        )
    }

    fn from_args(args: &[&str]) -> Result<Self, BuiltinError> {
        no_args(Self::NAME, args).map(|_| History)
    }

    fn execute<W: Write>(self, session: &mut Session, out: &mut Console<W>) -> Result<Outcome> {
        for (number, text) in session.history.list() {
            out.write(&format!("{number}. "), Style::Header)?;
            out.line(text, Style::Normal)?;
        }
        Ok(Outcome::Continue)
    }
}

/// Describe one command, or all builtins when called bare.
pub struct Help {
    pub topic: Option<String>,
}

impl BuiltinCommand for Help {
    const NAME: &'static str = "help";

    fn describe(_: usize) -> String {
        "Displays information about the passed command. If no argument is provided then it \
         displays all the commands. Takes only one argument."
            .to_string()
    }

    fn from_args(args: &[&str]) -> Result<Self, BuiltinError> {
        at_most_one(Self::NAME, args).map(|topic| Help { topic })
    }

    fn execute<W: Write>(self, session: &mut Session, out: &mut Console<W>) -> Result<Outcome> {
        let depth = session.history.depth();
        let Some(topic) = self.topic else {
            write_summary(out, depth)?;
            return Ok(Outcome::Continue);
        };
        match describe(&topic, depth) {
            Some(text) => {
                out.write(&format!("{topic}:\n"), Style::Info)?;
                out.line(&text, Style::Normal)?;
            }
            None => {
                out.write(&format!("{topic}:\n"), Style::Other)?;
                out.line(&format!("{topic} is an external command or application"), Style::Other)?;
            }
        }
        Ok(Outcome::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Environment;
    use crate::test_utils::{CwdGuard, canonical};

    fn session() -> Session {
        Session::new(10, Environment::default())
    }

    fn run_line(session: &mut Session, line: &str) -> (Option<Outcome>, String) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let mut out = Console::buffer(false);
        let outcome = dispatch(tokens[0], &tokens[1..], session, &mut out).unwrap();
        (outcome, out.contents())
    }

    #[test]
    fn test_exit_requests_loop_exit() {
        let mut session = session();
        let (outcome, out) = run_line(&mut session, "exit");
        assert_eq!(outcome, Some(Outcome::Exit));
        assert_eq!(out, "");
    }

    #[test]
    fn test_exit_with_arguments_is_rejected() {
        let mut session = session();
        let (outcome, out) = run_line(&mut session, "exit now");
        assert_eq!(outcome, Some(Outcome::Continue));
        assert_eq!(out, "Uh-oh exit does not take any arguments!\n");
    }

    #[test]
    fn test_unknown_name_is_not_a_builtin() {
        let mut session = session();
        let (outcome, out) = run_line(&mut session, "ls -la");
        assert_eq!(outcome, None);
        assert_eq!(out, "");
    }

    #[test]
    fn test_pwd_prints_current_dir() {
        let _guard = CwdGuard::new();
        let mut session = session();
        let cur = session.dirs.refresh().unwrap().to_path_buf();

        let (_, out) = run_line(&mut session, "pwd");
        assert_eq!(out, format!("{}\n", cur.display()));

        let (_, out) = run_line(&mut session, "pwd -P");
        assert_eq!(out, "Uh-oh pwd does not take any arguments!\n");
    }

    #[test]
    fn test_cd_dash_returns_to_previous() {
        let _guard = CwdGuard::new();
        let home = tempfile::tempdir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        std::env::set_current_dir(home.path()).unwrap();

        let mut session = session();
        session.dirs.refresh().unwrap();
        run_line(&mut session, &format!("cd {}", tmp.path().display()));
        session.dirs.refresh().unwrap();
        assert_eq!(canonical(session.dirs.current()), canonical(tmp.path()));

        let (_, out) = run_line(&mut session, "cd -");
        assert_eq!(out, "");
        assert_eq!(canonical(std::env::current_dir().unwrap()), canonical(home.path()));
    }

    #[test]
    fn test_cd_two_arguments_is_rejected() {
        let _guard = CwdGuard::new();
        let mut session = session();
        let before = session.dirs.refresh().unwrap().to_path_buf();

        let (outcome, out) = run_line(&mut session, "cd /tmp /");
        assert_eq!(outcome, Some(Outcome::Continue));
        assert_eq!(out, "Uh-oh cd does not take more than one argument!\n");
        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_cd_without_argument_goes_home() {
        let _guard = CwdGuard::new();
        let home = tempfile::tempdir().unwrap();
        let mut session = session();
        session.env.set_var("HOME", home.path().display().to_string());
        session.dirs.refresh().unwrap();

        run_line(&mut session, "cd");
        assert_eq!(canonical(std::env::current_dir().unwrap()), canonical(home.path()));
    }

    #[test]
    fn test_cd_expands_tilde_prefix() {
        let _guard = CwdGuard::new();
        let home = tempfile::tempdir().unwrap();
        std::fs::create_dir(home.path().join("projects")).unwrap();
        let mut session = session();
        session.env.set_var("HOME", home.path().display().to_string());
        session.dirs.refresh().unwrap();

        run_line(&mut session, "cd ~/projects");
        assert_eq!(
            canonical(std::env::current_dir().unwrap()),
            canonical(home.path().join("projects"))
        );
    }

    #[test]
    fn test_cd_to_missing_dir_reports_error() {
        let _guard = CwdGuard::new();
        let tmp = tempfile::tempdir().unwrap();
        let mut session = session();
        session.dirs.refresh().unwrap();

        let missing = tmp.path().join("nope");
        let (outcome, out) = run_line(&mut session, &format!("cd {}", missing.display()));
        assert_eq!(outcome, Some(Outcome::Continue));
        assert!(out.starts_with("Error chdir failed to run command: "), "{out}");
    }

    #[test]
    fn test_cd_without_home_still_updates_previous() {
        let _guard = CwdGuard::new();
        let start = tempfile::tempdir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        std::env::set_current_dir(start.path()).unwrap();

        let mut session = session();
        session.env.set_var("HOME", "");
        session.dirs.refresh().unwrap();
        run_line(&mut session, &format!("cd {}", tmp.path().display()));
        session.dirs.refresh().unwrap();
        assert_eq!(canonical(session.dirs.previous()), canonical(start.path()));

        let (_, out) = run_line(&mut session, "cd");
        assert_eq!(out, "Error chdir failed to run command: HOME is not set\n");
        assert_eq!(canonical(session.dirs.previous()), canonical(tmp.path()));
        assert_eq!(canonical(std::env::current_dir().unwrap()), canonical(tmp.path()));
    }

    #[test]
    fn test_history_lists_most_recent_first() {
        let mut session = session();
        session.history.record(&["echo", "one"]);
        session.history.record(&["echo", "two"]);
        session.history.record(&["history"]);

        let (_, out) = run_line(&mut session, "history");
        assert_eq!(out, "3. history\n2. echo two\n1. echo one\n");
    }

    #[test]
    fn test_help_for_builtin_prints_its_description() {
        let mut session = session();
        let (_, out) = run_line(&mut session, "help cd");
        assert_eq!(
            out,
            "cd:\nChanges the current working directory to the directory specified. \
             Takes only one argument.\n"
        );
    }

    #[test]
    fn test_help_for_unknown_name_calls_it_external() {
        let mut session = session();
        let (_, out) = run_line(&mut session, "help bogus");
        assert_eq!(out, "bogus:\nbogus is an external command or application\n");
    }

    #[test]
    fn test_help_summary_lists_every_builtin() {
        let mut session = session();
        let (_, out) = run_line(&mut session, "help");
        assert!(out.starts_with("The following commands are supported:\n1. help:\n"));
        for (i, name) in BUILTINS.iter().enumerate() {
            assert!(out.contains(&format!("{}. {}:\n", i + 1, name)));
        }
        assert!(out.contains("Displays the 10 most recent commands entered."));
    }

    #[test]
    fn test_help_with_two_arguments_is_rejected() {
        let mut session = session();
        let (_, out) = run_line(&mut session, "help cd pwd");
        assert_eq!(out, "Uh-oh help does not take more than one argument!\n");
    }
}
