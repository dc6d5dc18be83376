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

    /// Missing column, malformed row, or an empty dataset (exit code 2).
    pub fn data_format(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    /// Unreadable input path or unwritable output path (exit code 3).
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(3, message)
    }

    /// Degenerate derivation input, e.g. an underdetermined fit (exit code 4).
    pub fn computation(message: impl Into<String>) -> Self {
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
