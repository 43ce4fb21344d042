use clap::{CommandFactory, Parser};
use std::collections::HashMap;
use std::io::{self, BufRead};
use tasklist_cli::cli::{Cli, Command, ConfigOverrideTarget, parse_config_override};
use tasklist_cli::render;
use tasklist_core::capture::{self, RawEntry};
use tasklist_core::config::{self, Config, ConfigOverrides, Palette};
use tasklist_core::editor::EditSession;
use tasklist_core::error::AppError;
use tasklist_core::notify::{NoopNotifier, Notifier, notifier_from_env};
use tasklist_core::store::{Notice, StoreObserver, TaskStore};

/// Displays store notices as toast lines on stderr so stdout stays
/// machine-readable, and forwards them to the desktop notifier.
struct Toasts {
    notifier: Box<dyn Notifier>,
}

impl StoreObserver for Toasts {
    fn on_notice(&self, notice: &Notice) {
        eprintln!("{} - {}", notice.title, notice.description);
        // A missing notification service never blocks the mutation.
        let _ = self.notifier.notify(notice);
    }
}

struct Session {
    store: TaskStore,
    editor: Option<EditSession>,
    config: Config,
    palette: Palette,
}

fn build_session() -> Session {
    let load = config::load_config_with_fallback();
    if let Some(err) = load.error {
        eprintln!("WARNING: {err}");
    }
    let palette = config::palette_for_theme(load.config.theme.as_deref());

    let notifier: Box<dyn Notifier> = match notifier_from_env() {
        Ok(notifier) => notifier,
        Err(err) => {
            eprintln!("WARNING: {err}");
            Box::new(NoopNotifier)
        }
    };

    let mut store = TaskStore::new();
    store.subscribe(Box::new(Toasts { notifier }));

    Session {
        store,
        editor: None,
        config: load.config,
        palette,
    }
}

fn apply_overrides(session: &mut Session, raw_overrides: &[String]) -> Result<(), AppError> {
    if raw_overrides.is_empty() {
        return Ok(());
    }

    let mut overrides = ConfigOverrides::default();
    for raw in raw_overrides {
        let parsed = parse_config_override(raw).map_err(AppError::invalid_input)?;
        match parsed.target {
            ConfigOverrideTarget::Theme => overrides.theme = Some(parsed.value),
            ConfigOverrideTarget::Alias(name) => {
                overrides.aliases.insert(name, parsed.value);
            }
        }
    }

    session.config = config::merge_overrides(&session.config, &overrides);
    session.palette = config::palette_for_theme(session.config.theme.as_deref());
    Ok(())
}

fn no_edit() -> AppError {
    AppError::invalid_input("no edit in progress")
}

fn run_command(cli: Cli, session: &mut Session) -> Result<(), AppError> {
    let Cli {
        command,
        json,
        config_override,
    } = cli;
    apply_overrides(session, &config_override)?;

    match command {
        Command::Add {
            text,
            desc,
            date,
            time,
            photo,
        } => {
            let raw = RawEntry {
                text: text.unwrap_or_default(),
                description: desc,
                scheduled_date: date,
                scheduled_time: time,
                photo,
            };
            let fields = capture::validate_entry(&raw)?;
            let task = session.store.add(fields)?;
            if json {
                render::print_task_json(&task);
            } else {
                println!("Added task: {} ({})", task.text, task.id);
            }
        }
        Command::List => {
            if json {
                render::print_tasks_json(session.store.tasks());
            } else {
                render::print_tasks(session.store.tasks(), &session.palette);
            }
        }
        Command::Show { id } => {
            let task = session.store.get(&id)?;
            if json {
                render::print_task_json(task);
            } else {
                render::print_task_plain(task);
            }
        }
        Command::Toggle { id } => {
            let task = session.store.toggle_complete(&id)?;
            if json {
                render::print_task_json(&task);
            } else if task.completed {
                println!("Completed task: {} ({})", task.text, task.id);
            } else {
                println!("Reopened task: {} ({})", task.text, task.id);
            }
        }
        Command::Delete { id } => {
            let task = session.store.delete(&id)?;
            if session
                .editor
                .as_ref()
                .is_some_and(|editor| editor.task_id() == task.id)
            {
                session.editor = None;
            }
            if json {
                render::print_task_json(&task);
            } else {
                println!("Deleted task: {} ({})", task.text, task.id);
            }
        }
        Command::Edit {
            id,
            text,
            desc,
            date,
            time,
            photo,
        } => {
            let task = session.store.get(&id)?.clone();
            let mut editor = EditSession::begin(&task)?;

            let immediate = text.is_some()
                || desc.is_some()
                || date.is_some()
                || time.is_some()
                || photo.is_some();
            if let Some(value) = text.as_deref() {
                editor.set_text(value);
            }
            if let Some(value) = desc.as_deref() {
                editor.set_description(value);
            }
            if let Some(value) = date.as_deref() {
                editor.set_date(Some(value));
            }
            if let Some(value) = time.as_deref() {
                editor.set_time(Some(value));
            }
            if let Some(value) = photo.as_deref() {
                editor.set_photo(Some(value));
            }

            if immediate {
                let updated = editor.save(&mut session.store)?;
                if json {
                    render::print_task_json(&updated);
                } else {
                    println!("Updated task: {} ({})", updated.text, updated.id);
                }
            } else {
                println!("Editing task: {} ({})", task.text, task.id);
                render::print_draft(editor.draft());
                session.editor = Some(editor);
            }
        }
        Command::Text { value } => {
            session.editor.as_mut().ok_or_else(no_edit)?.set_text(&value);
        }
        Command::Desc { value } => {
            session
                .editor
                .as_mut()
                .ok_or_else(no_edit)?
                .set_description(&value);
        }
        Command::Date { value } => {
            session
                .editor
                .as_mut()
                .ok_or_else(no_edit)?
                .set_date(value.as_deref());
        }
        Command::Time { value } => {
            session
                .editor
                .as_mut()
                .ok_or_else(no_edit)?
                .set_time(value.as_deref());
        }
        Command::Photo { value } => {
            session
                .editor
                .as_mut()
                .ok_or_else(no_edit)?
                .set_photo(value.as_deref());
        }
        Command::Draft => {
            let editor = session.editor.as_ref().ok_or_else(no_edit)?;
            render::print_draft(editor.draft());
        }
        Command::Save => {
            let editor = session.editor.as_ref().ok_or_else(no_edit)?;
            let task = editor.save(&mut session.store)?;
            session.editor = None;
            if json {
                render::print_task_json(&task);
            } else {
                println!("Updated task: {} ({})", task.text, task.id);
            }
        }
        Command::Cancel => {
            if session.editor.take().is_none() {
                return Err(no_edit());
            }
            println!("Edit cancelled.");
        }
    }

    Ok(())
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '\\' if in_quotes => match chars.next() {
                Some(next @ ('"' | '\\')) => current.push(next),
                Some(next) => {
                    current.push('\\');
                    current.push(next);
                }
                None => current.push('\\'),
            },
            ch if ch.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            ch => current.push(ch),
        }
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

/// Replace a leading alias token with its configured expansion.
fn expand_alias(mut args: Vec<String>, aliases: &HashMap<String, String>) -> Vec<String> {
    if let Some(first) = args.first()
        && let Some(expansion) = aliases.get(first)
    {
        let mut expanded: Vec<String> = expansion.split_whitespace().map(str::to_string).collect();
        expanded.extend(args.drain(1..));
        return expanded;
    }
    args
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn run_interactive() -> Result<(), AppError> {
    let mut session = build_session();
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {err}");
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let args = expand_alias(args, &session.config.aliases);
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("tasklist".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        if let Err(err) = run_command(cli, &mut session) {
            eprintln!("ERROR: {err}");
        }
    }

    Ok(())
}

fn main() {
    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        if let Err(err) = run_interactive() {
            eprintln!("ERROR: {err}");
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    let mut session = build_session();
    if let Err(err) = run_command(cli, &mut session) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{expand_alias, split_command_line};
    use std::collections::HashMap;

    #[test]
    fn split_command_line_groups_quoted_words() {
        let args = split_command_line("add \"Buy milk\" --date 2025-12-24").unwrap();
        assert_eq!(args, vec!["add", "Buy milk", "--date", "2025-12-24"]);
    }

    #[test]
    fn split_command_line_honors_escapes_inside_quotes() {
        let args = split_command_line("add \"say \\\"hi\\\"\"").unwrap();
        assert_eq!(args, vec!["add", "say \"hi\""]);
    }

    #[test]
    fn split_command_line_rejects_unterminated_quote() {
        let err = split_command_line("add \"oops").unwrap_err();
        assert_eq!(err.code(), "invalid_input");
    }

    #[test]
    fn expand_alias_replaces_leading_token() {
        let aliases: HashMap<String, String> =
            [("ls".to_string(), "list".to_string())].into_iter().collect();
        let args = expand_alias(vec!["ls".to_string(), "--json".to_string()], &aliases);
        assert_eq!(args, vec!["list", "--json"]);
    }

    #[test]
    fn expand_alias_leaves_unknown_tokens_alone() {
        let aliases = HashMap::new();
        let args = expand_alias(vec!["list".to_string()], &aliases);
        assert_eq!(args, vec!["list"]);
    }
}
