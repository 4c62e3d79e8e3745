//! Turns a typed line into messages for the reducer.
//!
//! Positions are 1-based and refer to the lists as last rendered.

use std::path::PathBuf;

use recognizer_core::{resolve_action_choice, AppViewModel, FileId, Msg, ResultId};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dispatch(Vec<Msg>),
    /// Paths still have to be read from disk before they become a `Msg`.
    Pick(Vec<PathBuf>),
    Help,
    Quit,
}

/// Parses one input line. `Ok(None)` for a blank line; `Err` carries a usage hint.
pub fn parse(line: &str, view: &AppViewModel) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "pick" => {
            let paths = tokenize(rest)?;
            if paths.is_empty() {
                return Err(usage("pick <path>..."));
            }
            Command::Pick(paths.into_iter().map(PathBuf::from).collect())
        }
        "toggle" => {
            let positions = tokenize(rest)?;
            if positions.is_empty() {
                return Err(usage("toggle <n>..."));
            }
            let msgs = positions
                .iter()
                .map(|raw| file_at(view, raw).map(Msg::FileToggled))
                .collect::<Result<Vec<_>, _>>()?;
            Command::Dispatch(msgs)
        }
        "all" => single(Msg::SelectAllToggled),
        "preview" => single(Msg::PreviewClicked),
        "close-preview" => single(Msg::PreviewClosed),
        "upload" => single(Msg::UploadClicked),
        "history" => single(Msg::HistoryToggled),
        "refresh" => single(Msg::HistoryRefreshClicked),
        "open" => {
            let position = one_arg(rest, "open <n>")?;
            let entry = position_in(&view.history, &position, "history entry")?;
            single(Msg::HistoryEntrySelected {
                video_id: entry.video_id.clone(),
            })
        }
        "close" => single(Msg::DetailsClosed),
        "feedback" => single(Msg::FeedbackOpened),
        "label" => {
            let choice = text_arg(rest, "label <action|n>")?;
            single(Msg::FeedbackLabelChosen(resolve_action_choice(&choice)))
        }
        "comment" => single(Msg::FeedbackCommentChanged(unquote(rest))),
        "submit" => single(Msg::FeedbackSubmitClicked),
        "cancel" => single(Msg::FeedbackCancelled),
        "rfeedback" => single(Msg::ResultFeedbackOpened(row_at(
            view,
            &one_arg(rest, "rfeedback <row>")?,
        )?)),
        "rlabel" => {
            let (row, choice) = row_and_text(rest, "rlabel <row> <action|n>")?;
            if choice.is_empty() {
                return Err(usage("rlabel <row> <action|n>"));
            }
            single(Msg::ResultFeedbackLabelChosen {
                result_id: row_at(view, &row)?,
                label: resolve_action_choice(&choice),
            })
        }
        "rcomment" => {
            let (row, comment) = row_and_text(rest, "rcomment <row> <text>")?;
            single(Msg::ResultFeedbackCommentChanged {
                result_id: row_at(view, &row)?,
                comment,
            })
        }
        "rsubmit" => single(Msg::ResultFeedbackSubmitClicked(row_at(
            view,
            &one_arg(rest, "rsubmit <row>")?,
        )?)),
        "rcancel" => single(Msg::ResultFeedbackCancelled(row_at(
            view,
            &one_arg(rest, "rcancel <row>")?,
        )?)),
        "dismiss" => single(Msg::ErrorDismissed),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("Unknown command {other:?}. Type `help` for a list.")),
    };
    Ok(Some(command))
}

fn single(msg: Msg) -> Command {
    Command::Dispatch(vec![msg])
}

fn usage(form: &str) -> String {
    format!("Usage: {form}")
}

/// Splits on whitespace; double quotes group words and are removed.
fn tokenize(input: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for ch in input.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }
    if in_quotes {
        return Err("Unterminated quote".to_string());
    }
    if has_token {
        tokens.push(current);
    }
    Ok(tokens)
}

fn unquote(text: &str) -> String {
    let text = text.trim();
    text.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(text)
        .to_string()
}

fn one_arg(rest: &str, form: &str) -> Result<String, String> {
    let mut tokens = tokenize(rest)?;
    if tokens.len() != 1 {
        return Err(usage(form));
    }
    Ok(tokens.remove(0))
}

fn text_arg(rest: &str, form: &str) -> Result<String, String> {
    let text = unquote(rest);
    if text.is_empty() {
        return Err(usage(form));
    }
    Ok(text)
}

fn row_and_text(rest: &str, form: &str) -> Result<(String, String), String> {
    match rest.split_once(char::is_whitespace) {
        Some((row, text)) => Ok((row.to_string(), unquote(text))),
        None if !rest.is_empty() => Ok((rest.to_string(), String::new())),
        None => Err(usage(form)),
    }
}

fn position_in<'a, T>(items: &'a [T], raw: &str, what: &str) -> Result<&'a T, String> {
    let position: usize = raw
        .parse()
        .map_err(|_| format!("{raw:?} is not a position"))?;
    position
        .checked_sub(1)
        .and_then(|index| items.get(index))
        .ok_or_else(|| format!("No {what} at position {position}"))
}

fn file_at(view: &AppViewModel, raw: &str) -> Result<FileId, String> {
    position_in(&view.files, raw, "file").map(|file| file.file_id)
}

fn row_at(view: &AppViewModel, raw: &str) -> Result<ResultId, String> {
    position_in(&view.results, raw, "result").map(|row| row.result_id)
}
