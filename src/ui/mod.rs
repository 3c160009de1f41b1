pub mod output;
pub mod progress;
pub mod signals;

pub use output::{stylize, OutputFormatter, OutputMode, Style};
pub use progress::ProgressManager;
pub use signals::GracefulShutdown;
