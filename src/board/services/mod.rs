//! Application services for the task board.

mod dispatcher;
mod session;

pub use dispatcher::{
    BoardCommandError, BoardService, CommandOutcome, CreateTaskRequest, LoadReport,
    PersistenceWarning,
};
pub use session::{Session, SessionError, SessionService};
