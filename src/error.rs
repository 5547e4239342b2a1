/// Process-level error carrying the exit code handed back from `main`.
///
/// Two failure classes exist in this tool:
///
/// - **input** (exit code 2): bad arguments, unreadable files, or a CSV whose
///   schema is missing required columns — all detected before the screening
///   pipeline runs
/// - **render** (exit code 4): chart or document layout failures, surfaced
///   unmodified from the drawing backends
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Input-class error: arguments, file IO, CSV schema.
    pub fn input(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    /// Rendering-class error: chart drawing or document layout.
    pub fn render(message: impl Into<String>) -> Self {
        Self::new(4, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
