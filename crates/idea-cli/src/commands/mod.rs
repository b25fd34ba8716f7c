pub mod dispatch;
pub mod idea;
pub mod label;

/// How a command finished, mapped to the process exit code in `main`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Done,
    /// The requested idea does not exist. `null` has already been printed.
    NotFound,
}

impl Outcome {
    #[must_use]
    pub const fn found(found: bool) -> Self {
        if found { Self::Done } else { Self::NotFound }
    }
}
