use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClassroomError>;

/// Failures a single classroom interaction can report back to the student.
#[derive(Error, Debug)]
pub enum ClassroomError {
    /// Author or comment was blank after trimming
    #[error("missing input: both a name and a reflection are required")]
    MissingInput,

    /// Comment text would be read back as an author line
    #[error("a reflection cannot start with '{0}'")]
    MarkerInComment(&'static str),

    #[error("unsupported image type '{0}' (expected jpg, jpeg or png)")]
    UnsupportedImage(String),

    #[error("could not decode image: {0}")]
    Decode(String),

    #[error("image contains no pixel data")]
    EmptyImage,

    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClassroomError {
    /// Validation problems are shown as warnings rather than errors.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ClassroomError::MissingInput
                | ClassroomError::MarkerInComment(_)
                | ClassroomError::UnsupportedImage(_)
        )
    }
}
