//! Line commands typed by the user, one per controller action.

use client_core::FilterMode;
use shared::domain::ItemId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Add(String),
    Toggle(ItemId),
    ToggleAll,
    Delete(ItemId),
    ClearCompleted,
    StartEdit(ItemId),
    SaveEdit { id: ItemId, title: String },
    CancelEdit,
    Filter(FilterMode),
    Dismiss,
    List,
    Help,
    Quit,
}

impl UiCommand {
    /// Commands that issue remote calls and run in the background.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            UiCommand::Add(_)
                | UiCommand::Toggle(_)
                | UiCommand::ToggleAll
                | UiCommand::Delete(_)
                | UiCommand::ClearCompleted
                | UiCommand::SaveEdit { .. }
        )
    }
}

pub const HELP: &str = "\
commands:
  add <title>          create an item
  toggle <id>          flip an item between pending and completed
  toggle-all           complete everything (or un-complete if all are done)
  rm <id>              delete an item
  clear-completed      delete every completed item
  edit <id>            enter edit mode for an item
  save <id> <title>    save an edit (empty title deletes)
  esc                  leave edit mode
  filter <all|active|completed>
  dismiss              hide the current error
  ls                   show the list
  quit";

pub fn parse_command(line: &str) -> Result<UiCommand, String> {
    let line = line.trim_start();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

    match verb {
        "add" | "new" => Ok(UiCommand::Add(rest.to_string())),
        "toggle" | "t" => parse_id(rest).map(UiCommand::Toggle),
        "toggle-all" => Ok(UiCommand::ToggleAll),
        "rm" | "delete" => parse_id(rest).map(UiCommand::Delete),
        "clear-completed" => Ok(UiCommand::ClearCompleted),
        "edit" => parse_id(rest).map(UiCommand::StartEdit),
        "save" => {
            let rest = rest.trim_start();
            let (id, title) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            Ok(UiCommand::SaveEdit {
                id: parse_id(id)?,
                title: title.to_string(),
            })
        }
        "esc" | "cancel" => Ok(UiCommand::CancelEdit),
        "filter" => rest.parse().map(UiCommand::Filter),
        "dismiss" => Ok(UiCommand::Dismiss),
        "ls" | "list" | "" => Ok(UiCommand::List),
        "help" | "?" => Ok(UiCommand::Help),
        "quit" | "exit" | "q" => Ok(UiCommand::Quit),
        other => Err(format!("unknown command '{other}' (try 'help')")),
    }
}

fn parse_id(raw: &str) -> Result<ItemId, String> {
    raw.trim()
        .parse::<i64>()
        .map(ItemId)
        .map_err(|_| format!("expected an item id, got '{}'", raw.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_keeps_raw_title_for_the_controller_to_trim() {
        assert_eq!(
            parse_command("add   Buy milk "),
            Ok(UiCommand::Add("  Buy milk ".to_string()))
        );
        assert_eq!(parse_command("add"), Ok(UiCommand::Add(String::new())));
    }

    #[test]
    fn save_splits_id_from_title() {
        assert_eq!(
            parse_command("save 4 Walk the dog"),
            Ok(UiCommand::SaveEdit {
                id: ItemId(4),
                title: "Walk the dog".to_string()
            })
        );
        assert_eq!(
            parse_command("save 4"),
            Ok(UiCommand::SaveEdit {
                id: ItemId(4),
                title: String::new()
            })
        );
    }

    #[test]
    fn filter_and_ids_are_validated() {
        assert_eq!(
            parse_command("filter completed"),
            Ok(UiCommand::Filter(FilterMode::Completed))
        );
        assert!(parse_command("filter done").is_err());
        assert!(parse_command("toggle x").is_err());
        assert!(parse_command("frobnicate").is_err());
    }

    #[test]
    fn only_remote_commands_are_mutations() {
        assert!(UiCommand::ToggleAll.is_mutation());
        assert!(!UiCommand::CancelEdit.is_mutation());
        assert!(!UiCommand::StartEdit(ItemId(1)).is_mutation());
    }
}
