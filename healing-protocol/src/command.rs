//! Command parsing and encoding
//!
//! A command is exactly six ASCII characters: the `HTC` prefix, a board
//! selector, a stepper selector and the command letter.

use core::fmt::Write;

use heapless::String;

/// Every command starts with this ("Healing Time Command")
pub const COMMAND_PREFIX: &str = "HTC";

/// Length of a complete command in bytes
pub const COMMAND_LEN: usize = 6;

/// Highest addressable board id
pub const MAX_BOARD_ID: u8 = 9;

/// Lowest stepper id on a board
pub const MIN_STEPPER_ID: u8 = 1;

/// Highest stepper id on a board
pub const MAX_STEPPER_ID: u8 = 2;

/// Wildcard character for board and stepper selectors
const WILDCARD: u8 = b'*';

/// Errors that reject a command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Line does not start with `HTC`
    BadPrefix,
    /// Line is not exactly six characters
    WrongLength,
    /// Board selector is not `0`-`9` or `*`
    InvalidBoard,
    /// Stepper selector is not `1`-`2` or `*`
    InvalidStepper,
    /// Command letter is not `S` or `C`
    UnknownCommand,
}

/// Which boards a command addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardSelector {
    /// Every board on the line
    All,
    /// A single board
    Board(u8),
}

impl BoardSelector {
    /// Check if a board with this id is addressed
    pub fn matches(self, board_id: u8) -> bool {
        match self {
            BoardSelector::All => board_id <= MAX_BOARD_ID,
            BoardSelector::Board(id) => id == board_id,
        }
    }

    fn parse(c: u8) -> Result<Self, CommandError> {
        match c {
            WILDCARD => Ok(BoardSelector::All),
            b'0'..=b'9' => Ok(BoardSelector::Board(c - b'0')),
            _ => Err(CommandError::InvalidBoard),
        }
    }

    fn as_char(self) -> char {
        match self {
            BoardSelector::All => WILDCARD as char,
            BoardSelector::Board(id) => (b'0' + id) as char,
        }
    }
}

/// Which steppers of a board a command addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepperSelector {
    /// Both steppers
    All,
    /// A single stepper
    Stepper(u8),
}

impl StepperSelector {
    /// Check if a stepper with this id is addressed
    pub fn matches(self, stepper_id: u8) -> bool {
        match self {
            StepperSelector::All => (MIN_STEPPER_ID..=MAX_STEPPER_ID).contains(&stepper_id),
            StepperSelector::Stepper(id) => id == stepper_id,
        }
    }

    fn parse(c: u8) -> Result<Self, CommandError> {
        match c {
            WILDCARD => Ok(StepperSelector::All),
            b'1'..=b'2' => Ok(StepperSelector::Stepper(c - b'0')),
            _ => Err(CommandError::InvalidStepper),
        }
    }

    fn as_char(self) -> char {
        match self {
            StepperSelector::All => WILDCARD as char,
            StepperSelector::Stepper(id) => (b'0' + id) as char,
        }
    }
}

/// Action requested from the addressed steppers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandKind {
    /// Perform one scheduled rotation (`S`)
    Spin,
    /// Arm or advance the calibration sequence (`C`)
    Calibrate,
}

impl CommandKind {
    fn parse(c: u8) -> Result<Self, CommandError> {
        match c {
            b'S' => Ok(CommandKind::Spin),
            b'C' => Ok(CommandKind::Calibrate),
            _ => Err(CommandError::UnknownCommand),
        }
    }

    fn as_char(self) -> char {
        match self {
            CommandKind::Spin => 'S',
            CommandKind::Calibrate => 'C',
        }
    }
}

/// A parsed addressing command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    /// Addressed board(s)
    pub board: BoardSelector,
    /// Addressed stepper(s)
    pub stepper: StepperSelector,
    /// Requested action
    pub kind: CommandKind,
}

impl Command {
    /// Create a command
    pub const fn new(board: BoardSelector, stepper: StepperSelector, kind: CommandKind) -> Self {
        Self {
            board,
            stepper,
            kind,
        }
    }

    /// Parse a command line
    ///
    /// Trailing whitespace (line terminators) is ignored.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim_end();
        if !line.starts_with(COMMAND_PREFIX) {
            return Err(CommandError::BadPrefix);
        }
        let bytes = line.as_bytes();
        if bytes.len() != COMMAND_LEN {
            return Err(CommandError::WrongLength);
        }

        let board = BoardSelector::parse(bytes[3])?;
        let stepper = StepperSelector::parse(bytes[4])?;
        let kind = CommandKind::parse(bytes[5])?;

        Ok(Self::new(board, stepper, kind))
    }

    /// Check if this command addresses the given stepper of the given board
    pub fn matches(&self, board_id: u8, stepper_id: u8) -> bool {
        self.board.matches(board_id) && self.stepper.matches(stepper_id)
    }

    /// Encode as a command line (without terminator)
    pub fn encode(&self) -> String<COMMAND_LEN> {
        let mut out = String::new();
        // Six characters always fit
        let _ = write!(
            out,
            "{}{}{}{}",
            COMMAND_PREFIX,
            self.board.as_char(),
            self.stepper.as_char(),
            self.kind.as_char()
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_single_target() {
        let cmd = Command::parse("HTC21S").unwrap();
        assert_eq!(cmd.board, BoardSelector::Board(2));
        assert_eq!(cmd.stepper, StepperSelector::Stepper(1));
        assert_eq!(cmd.kind, CommandKind::Spin);
    }

    #[test]
    fn test_parse_wildcards() {
        let cmd = Command::parse("HTC**C").unwrap();
        assert_eq!(cmd.board, BoardSelector::All);
        assert_eq!(cmd.stepper, StepperSelector::All);
        assert_eq!(cmd.kind, CommandKind::Calibrate);

        for board in 0..=MAX_BOARD_ID {
            for stepper in MIN_STEPPER_ID..=MAX_STEPPER_ID {
                assert!(cmd.matches(board, stepper));
            }
        }
        assert!(!cmd.matches(0, 3));
        assert!(!cmd.matches(10, 1));
    }

    #[test]
    fn test_parse_ignores_line_terminator() {
        assert!(Command::parse("HTC0*S\r\n").is_ok());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Command::parse("XYZ21S"), Err(CommandError::BadPrefix));
        assert_eq!(Command::parse(""), Err(CommandError::BadPrefix));
        assert_eq!(Command::parse("HTC21"), Err(CommandError::WrongLength));
        assert_eq!(Command::parse("HTC21SS"), Err(CommandError::WrongLength));
        assert_eq!(Command::parse("HTCA1S"), Err(CommandError::InvalidBoard));
        assert_eq!(Command::parse("HTC20S"), Err(CommandError::InvalidStepper));
        assert_eq!(Command::parse("HTC23S"), Err(CommandError::InvalidStepper));
        assert_eq!(Command::parse("HTC21X"), Err(CommandError::UnknownCommand));
        assert_eq!(Command::parse("HTC21s"), Err(CommandError::UnknownCommand));
    }

    #[test]
    fn test_encode() {
        let cmd = Command::new(BoardSelector::All, StepperSelector::Stepper(2), CommandKind::Spin);
        assert_eq!(cmd.encode().as_str(), "HTC*2S");
    }

    proptest! {
        #[test]
        fn prop_bad_board_rejected(c in any::<u8>().prop_filter("not a board selector", |c| {
            !c.is_ascii_digit() && *c != b'*' && c.is_ascii() && !c.is_ascii_whitespace()
        })) {
            let line = [b'H', b'T', b'C', c, b'1', b'S'];
            let line = core::str::from_utf8(&line).unwrap();
            prop_assert_eq!(Command::parse(line), Err(CommandError::InvalidBoard));
        }

        #[test]
        fn prop_bad_stepper_rejected(c in any::<u8>().prop_filter("not a stepper selector", |c| {
            !(b'1'..=b'2').contains(c) && *c != b'*' && c.is_ascii() && !c.is_ascii_whitespace()
        })) {
            let line = [b'H', b'T', b'C', b'3', c, b'C'];
            let line = core::str::from_utf8(&line).unwrap();
            prop_assert_eq!(Command::parse(line), Err(CommandError::InvalidStepper));
        }
    }
}
