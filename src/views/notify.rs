use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Failure(m) => m,
        }
    }
}

/// Blocking notice shown after a mutation.
pub trait Notifier: Send + Sync {
    fn alert(&self, notice: &Notice);
}

/// Prints notices to the terminal: successes on stdout, failures on stderr.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, notice: &Notice) {
        match notice {
            Notice::Success(m) => {
                debug!("notice: {}", m);
                println!("{}", m);
            }
            Notice::Failure(m) => {
                debug!("failure notice: {}", m);
                eprintln!("{}", m);
            }
        }
    }
}
