//! Interactive read-eval loop driving a calculator session.
//!
//! Plain lines are treated as expressions; lines starting with `:` are
//! shell commands. A lone `=` evaluates whatever is in the input buffer,
//! which is how a recalled expression gets re-run.

use crate::calculator::{copy_to_clipboard, format_clipboard, is_plain_number, looks_like_expression};
use crate::session::{CalculatorSession, Token};
use std::io::{BufRead, Write};
use tracing::debug;

const HELP: &str = "\
Enter an expression to evaluate it, or one of:
  :help         show this message
  :history      list past calculations, oldest first
  :recall N     load history entry N into the input buffer (run with =)
  :fn NAME      append a function call, e.g. :fn sin appends \"sin(\"
  :sign         toggle a leading minus on the input buffer
  :del          delete the last character of the input buffer
  :clear        forget all history
  :reset        clear the input buffer and display
  :copy         copy the last result to the clipboard
  :mode         toggle engineering mode
  :theme        toggle light/dark theme
  :quit         exit
The prompt shows the pending input buffer; = evaluates it.";

/// Run the interactive loop until EOF or `:quit`.
pub fn run(session: &mut CalculatorSession) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    println!("engcalc (type :help for commands)");

    loop {
        if session.input().is_empty() {
            print!("> ");
        } else {
            print!("[{}]> ", session.input());
        }
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix(':') {
            if !handle_command(session, command) {
                break;
            }
            continue;
        }

        if line == "=" {
            session.apply(Token::Evaluate);
            println!("{}", session.display());
            continue;
        }

        // Continuations of a pending buffer skip the screen: fragments
        // like "+2" or ")" are legitimate there.
        if session.input().is_empty() && !is_plain_number(line) && !looks_like_expression(line) {
            println!("not a calculator expression (try :help)");
            continue;
        }

        session.apply(Token::Literal(line.to_string()));
        session.apply(Token::Evaluate);
        println!("{}", session.display());
    }

    Ok(())
}

/// Handle a `:command`. Returns false when the loop should exit.
fn handle_command(session: &mut CalculatorSession, command: &str) -> bool {
    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or("");
    let arg = parts.next();

    match name {
        "help" => println!("{HELP}"),
        "history" => print_history(session),
        "recall" => recall(session, arg),
        "fn" => match arg {
            Some(name) => session.apply(Token::Function(name.to_string())),
            None => println!("usage: :fn NAME"),
        },
        "sign" => session.apply(Token::ToggleSign),
        "del" => session.apply(Token::Backspace),
        "clear" => {
            session.clear_history();
            println!("history cleared");
        }
        "reset" => {
            session.apply(Token::Clear);
            println!("{}", session.display());
        }
        "copy" => copy_last_result(session),
        "mode" => {
            session.apply(Token::ToggleMode);
            let mode = if session.engineering_mode() {
                "engineering"
            } else {
                "basic"
            };
            println!("mode: {mode}");
        }
        "theme" => {
            session.apply(Token::ToggleTheme);
            let theme = if session.dark_mode() { "dark" } else { "light" };
            println!("theme: {theme}");
        }
        "quit" | "q" | "exit" => return false,
        other => println!("unknown command :{other} (try :help)"),
    }

    true
}

fn print_history(session: &CalculatorSession) {
    let records = session.history().snapshot();
    if records.is_empty() {
        println!("history is empty");
        return;
    }

    for (i, record) in records.iter().enumerate() {
        println!("{:>3}  {} = {}", i + 1, record.input, format_clipboard(record.value));
    }
}

fn recall(session: &mut CalculatorSession, arg: Option<&str>) {
    let records = session.history().snapshot();

    let Some(index) = arg.and_then(|a| a.parse::<usize>().ok()) else {
        println!("usage: :recall N (see :history)");
        return;
    };

    match records.get(index.wrapping_sub(1)) {
        Some(record) => {
            debug!(input = %record.input, "recalling expression");
            session.apply(Token::Recall(record.input.clone()));
            println!("recalled: {}  (= to evaluate)", session.input());
        }
        None => println!("no history entry {index}"),
    }
}

fn copy_last_result(session: &CalculatorSession) {
    let Some(record) = session.history().last() else {
        println!("nothing to copy");
        return;
    };

    let text = format_clipboard(record.value);
    match copy_to_clipboard(&text) {
        Ok(()) => println!("copied {text}"),
        Err(err) => println!("copy failed: {err:#}"),
    }
}
