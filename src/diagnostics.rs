use colored::Colorize;

use crate::metadata::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Static description of a diagnostic kind. `{0}`, `{1}`, ... in `message`
/// are filled from `Diagnostic::args`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticDescriptor {
    pub code: &'static str,
    pub title: &'static str,
    pub message: &'static str,
    pub severity: Severity,
}

pub const INVALID_ENUM_ACCESSIBILITY: DiagnosticDescriptor = DiagnosticDescriptor {
    code: "EPG0001",
    title: "Invalid enum accessibility",
    message: "Enum '{0}' and every type containing it must be public or internal to generate predicates",
    severity: Severity::Error,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub descriptor: DiagnosticDescriptor,
    pub args: Vec<String>,
    pub location: Option<Location>,
}

impl Diagnostic {
    pub fn new(descriptor: DiagnosticDescriptor, location: Option<Location>, args: Vec<String>) -> Self {
        Self { descriptor, args, location }
    }

    pub fn code(&self) -> &'static str {
        self.descriptor.code
    }

    pub fn severity(&self) -> Severity {
        self.descriptor.severity
    }

    pub fn message(&self) -> String {
        let mut out = self.descriptor.message.to_string();
        for (i, arg) in self.args.iter().enumerate() {
            out = out.replace(&format!("{{{i}}}"), arg);
        }
        out
    }

    /// `path:line:col: error[CODE]: message`, colored for terminals.
    pub fn render(&self) -> String {
        let severity = match self.severity() {
            Severity::Error => self.severity().as_str().red().bold(),
            Severity::Warning => self.severity().as_str().yellow().bold(),
            Severity::Info => self.severity().as_str().cyan(),
        };
        let head = format!("{severity}[{}]", self.code());
        match &self.location {
            Some(loc) => format!("{}: {head}: {}", loc.to_string().as_str().bold(), self.message()),
            None => format!("{head}: {}", self.message()),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(loc) = &self.location {
            write!(f, "{loc}: ")?;
        }
        write!(f, "{}[{}]: {}", self.severity().as_str(), self.code(), self.message())
    }
}
