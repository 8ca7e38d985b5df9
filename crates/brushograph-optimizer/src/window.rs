//! Read-only view of the classified line buffer around the scan position

use brushograph_gcode::Command;

/// Classified buffer plus the index of the line being processed
///
/// Lookahead never consumes lines; the driver advances one line at a time.
#[derive(Debug, Clone, Copy)]
pub struct LineWindow<'a> {
    commands: &'a [Command],
    index: usize,
}

impl<'a> LineWindow<'a> {
    /// Window at `index`, or `None` past the end of the buffer
    pub fn new(commands: &'a [Command], index: usize) -> Option<Self> {
        (index < commands.len()).then_some(Self { commands, index })
    }

    /// Index of the current line
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current line
    pub fn current(&self) -> &'a Command {
        &self.commands[self.index]
    }

    /// Line `offset` positions after the current one
    pub fn ahead(&self, offset: usize) -> Option<&'a Command> {
        self.commands.get(self.index + offset)
    }

    /// Line immediately before the current one
    pub fn previous(&self) -> Option<&'a Command> {
        self.index
            .checked_sub(1)
            .and_then(|index| self.commands.get(index))
    }

    /// Line immediately after the current one
    pub fn next(&self) -> Option<&'a Command> {
        self.ahead(1)
    }

    /// Offset of the first line within `limit` lines, starting at the current
    /// one, that satisfies `predicate`
    pub fn find_ahead<P>(&self, limit: usize, predicate: P) -> Option<usize>
    where
        P: Fn(&Command) -> bool,
    {
        (0..limit)
            .map_while(|offset| self.ahead(offset).map(|command| (offset, command)))
            .find(|&(_, command)| predicate(command))
            .map(|(offset, _)| offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brushograph_gcode::classify_all;

    #[test]
    fn test_neighbours() {
        let commands = classify_all(&["G1 X1 Y1", "G1 X2 Y2", "G0 Z5"]);
        let first = LineWindow::new(&commands, 0).unwrap();
        assert!(first.previous().is_none());
        assert!(first.next().is_some_and(Command::is_draw));

        let last = LineWindow::new(&commands, 2).unwrap();
        assert!(last.current().is_lift());
        assert!(last.previous().is_some_and(Command::is_draw));
        assert!(last.next().is_none());

        assert!(LineWindow::new(&commands, 3).is_none());
    }

    #[test]
    fn test_find_ahead_is_bounded() {
        let commands = classify_all(&["G1 X1 Y1", "G1 X2 Y2", "G1 X3 Y3", "G0 Z5"]);
        let window = LineWindow::new(&commands, 0).unwrap();
        assert_eq!(window.find_ahead(20, Command::is_lift), Some(3));
        assert_eq!(window.find_ahead(3, Command::is_lift), None);
        assert_eq!(window.find_ahead(20, Command::is_draw), Some(0));
    }
}
