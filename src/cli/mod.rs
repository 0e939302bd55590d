mod args;
mod perform;

pub use self::args::{normalize_args, Arguments};
pub use self::perform::{perform, Operation};
