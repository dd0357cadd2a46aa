//! A stand-in spreadsheet that records the commands run against it.

use std::cell::RefCell;

use keytips::{CommandExecutor, CommandId, ExecError};

/// Named sheet with an append-only record of applied commands.
#[derive(Debug)]
pub struct Sheet {
    /// Sheet name shown in reports.
    name: String,
    /// Reject every command.
    read_only: bool,
    /// Commands applied so far, in order.
    applied: RefCell<Vec<CommandId>>,
}

impl Sheet {
    /// Create an empty sheet.
    pub fn new(name: impl Into<String>, read_only: bool) -> Self {
        Self {
            name: name.into(),
            read_only,
            applied: RefCell::new(Vec::new()),
        }
    }

    /// Sheet name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Commands applied so far.
    pub fn applied(&self) -> Vec<CommandId> {
        self.applied.borrow().clone()
    }
}

/// Applies commands to a [`Sheet`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SheetExecutor;

impl CommandExecutor for SheetExecutor {
    type Surface = Sheet;

    fn execute(&self, command: CommandId, sheet: &Sheet) -> Result<(), ExecError> {
        if sheet.read_only {
            return Err(ExecError::new(
                command,
                format!("sheet {} is read-only", sheet.name),
            ));
        }
        sheet.applied.borrow_mut().push(command);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use keytips::{KeytipEvent, run_matched};

    use super::*;

    #[test]
    fn records_in_order() {
        let sheet = Sheet::new("Budget", false);
        let events = [
            KeytipEvent::MatchedCommand(CommandId::BorderTop),
            KeytipEvent::Cancelled,
            KeytipEvent::MatchedCommand(CommandId::SortDesc),
        ];
        assert_eq!(run_matched(&SheetExecutor, &sheet, events), 2);
        assert_eq!(sheet.applied(), vec![CommandId::BorderTop, CommandId::SortDesc]);
    }

    #[test]
    fn read_only_rejects() {
        let sheet = Sheet::new("Locked", true);
        let err = SheetExecutor
            .execute(CommandId::Bold, &sheet)
            .expect_err("read-only");
        assert_eq!(err.to_string(), "Command bold failed: sheet Locked is read-only");
        assert!(sheet.applied().is_empty());
    }
}
