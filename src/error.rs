use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    UndefinedConstant,
    Deserialize,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
    pub location: Option<Location>,
}

impl Error {
    pub fn syntax(message: impl Into<String>, location: Location) -> Self {
        Self {
            kind: ErrorKind::Syntax,
            message: message.into(),
            location: Some(location),
        }
    }

    pub fn undefined_constant(name: &str, location: Location) -> Self {
        Self {
            kind: ErrorKind::UndefinedConstant,
            message: format!("constant '{name}' is not defined"),
            location: Some(location),
        }
    }

    pub fn deserialize(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Deserialize,
            message: message.into(),
            location: None,
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Io,
            message: message.into(),
            location: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(location) => write!(
                f,
                "{} at line {}, column {}",
                self.message, location.line, location.column
            ),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for Error {}
